//! Inbound webhook notification bodies and signatures.

use base64::{engine::general_purpose::STANDARD, Engine};
use hmac::{Hmac, Mac};
use serde_json::{json, Value};
use sha2::Sha256;

use crate::factory::helpers::next_id;

/// Builds a serialized notification body for the given event type and metadata.
///
/// Each call gets a fresh `notificationId`.
pub fn notification_body(event_type: &str, metadata: Value) -> Vec<u8> {
    let body = json!({
        "notificationEventType": event_type,
        "notificationId": format!("notification-{}", next_id()),
        "publishDate": "2025-01-15T10:30:00.000Z",
        "metadata": metadata,
    });

    body.to_string().into_bytes()
}

/// Computes the base64 HMAC-SHA256 signature the marketplace would send for `body`.
pub fn sign(body: &[u8], verify_token: &str) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(verify_token.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(body);
    STANDARD.encode(mac.finalize().into_bytes())
}
