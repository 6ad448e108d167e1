//! Inbound webhook verification.
//!
//! The marketplace proves endpoint ownership with a challenge handshake and signs notification
//! bodies with HMAC-SHA256 keyed by the shared verify token.

use base64::{engine::general_purpose::STANDARD, Engine};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

use crate::server::error::webhook::WebhookError;

type HmacSha256 = Hmac<Sha256>;

/// Policy for notifications that arrive without a signature header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignatureMode {
    /// Accept unsigned notifications with a warning.
    #[default]
    Relaxed,
    /// Reject unsigned notifications with 401.
    Strict,
}

/// Computes the challenge response: base64 of SHA-256 over
/// `challenge_code ‖ verify_token ‖ endpoint`.
pub fn compute_challenge_response(challenge_code: &str, verify_token: &str, endpoint: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(challenge_code.as_bytes());
    hasher.update(verify_token.as_bytes());
    hasher.update(endpoint.as_bytes());
    STANDARD.encode(hasher.finalize())
}

/// Checks a base64 signature header against HMAC-SHA256 of `body` keyed by `verify_token`.
///
/// The comparison runs in constant time. An empty or undecodable header is simply invalid.
pub fn verify_signature(body: &[u8], signature_header: &str, verify_token: &str) -> bool {
    let signature_header = signature_header.trim();
    if signature_header.is_empty() {
        return false;
    }

    let Ok(signature) = STANDARD.decode(signature_header) else {
        return false;
    };

    let Ok(mut mac) = HmacSha256::new_from_slice(verify_token.as_bytes()) else {
        return false;
    };
    mac.update(body);
    mac.verify_slice(&signature).is_ok()
}

/// Verifier bound to the configured verify token, endpoint and signature policy.
pub struct WebhookVerifier {
    verify_token: String,
    endpoint_override: Option<String>,
    mode: SignatureMode,
}

impl WebhookVerifier {
    /// # Arguments
    /// - `verify_token` - Shared secret registered with the marketplace
    /// - `endpoint_override` - Endpoint string hashed into challenge responses; the request
    ///   path is used when `None`
    /// - `mode` - Handling of unsigned notifications
    pub fn new(verify_token: String, endpoint_override: Option<String>, mode: SignatureMode) -> Self {
        Self {
            verify_token,
            endpoint_override,
            mode,
        }
    }

    /// Answers a challenge received on `request_path`.
    ///
    /// # Returns
    /// - `Ok(String)` - Base64 challenge response
    /// - `Err(WebhookError::MissingChallengeCode)` - Missing or empty challenge code
    pub fn challenge_response(
        &self,
        challenge_code: Option<&str>,
        request_path: &str,
    ) -> Result<String, WebhookError> {
        let challenge_code = challenge_code
            .filter(|code| !code.is_empty())
            .ok_or(WebhookError::MissingChallengeCode)?;

        let endpoint = self.endpoint_override.as_deref().unwrap_or(request_path);

        Ok(compute_challenge_response(
            challenge_code,
            &self.verify_token,
            endpoint,
        ))
    }

    /// Applies the signature policy to an inbound notification body.
    ///
    /// # Returns
    /// - `Ok(())` - Signature valid, or absent in relaxed mode
    /// - `Err(WebhookError::SignatureInvalid)` - Signature present but wrong
    /// - `Err(WebhookError::SignatureMissing)` - Signature absent in strict mode
    pub fn check(&self, body: &[u8], signature_header: Option<&str>) -> Result<(), WebhookError> {
        match signature_header {
            Some(signature) => {
                if verify_signature(body, signature, &self.verify_token) {
                    Ok(())
                } else {
                    Err(WebhookError::SignatureInvalid)
                }
            }
            None => match self.mode {
                SignatureMode::Relaxed => {
                    tracing::warn!("Accepting webhook notification without a signature header");
                    Ok(())
                }
                SignatureMode::Strict => Err(WebhookError::SignatureMissing),
            },
        }
    }
}
