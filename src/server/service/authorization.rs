//! User authorization flow.
//!
//! An operator starts the flow from Discord: a random `state` is registered together with an
//! awaiter that can report back to the operator, and the consent URL is handed out. The
//! marketplace later calls back with either a code or an error for that `state`. Each pending
//! entry is consumed exactly once; whoever takes the write lock first wins and later callers
//! see `UnknownState`. Entries left unclaimed expire after `PENDING_TTL`.

use async_trait::async_trait;
use rand::Rng;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use url::Url;

use crate::server::{
    error::auth::AuthError,
    model::{authorization::AuthorizationOutcome, token::Token},
    service::{oauth::MarketplaceOAuth, token::TokenManager},
    util::parse::decode_pasted_code,
};

/// Lifetime of an unclaimed pending authorization.
pub const PENDING_TTL: Duration = Duration::from_secs(10 * 60);

const STATE_LENGTH: usize = 32;

/// Notify-only capability for reporting an authorization outcome to whoever started the flow.
#[async_trait]
pub trait AuthorizationAwaiter: Send + Sync {
    async fn notify(&self, outcome: AuthorizationOutcome);
}

struct PendingAuthorization {
    created_at: Instant,
    awaiter: Arc<dyn AuthorizationAwaiter>,
}

impl PendingAuthorization {
    fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.created_at) >= PENDING_TTL
    }
}

pub struct AuthorizationFlow {
    oauth: Arc<MarketplaceOAuth>,
    tokens: Arc<TokenManager>,
    pending: RwLock<HashMap<String, PendingAuthorization>>,
}

impl AuthorizationFlow {
    pub fn new(oauth: Arc<MarketplaceOAuth>, tokens: Arc<TokenManager>) -> Self {
        Self {
            oauth,
            tokens,
            pending: RwLock::new(HashMap::new()),
        }
    }

    /// Generates a random 32-character alphanumeric `state` value.
    pub fn generate_state() -> String {
        const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ\
                                 abcdefghijklmnopqrstuvwxyz\
                                 0123456789";

        let mut rng = rand::rng();

        (0..STATE_LENGTH)
            .map(|_| {
                let idx = rng.random_range(0..CHARSET.len());
                CHARSET[idx] as char
            })
            .collect()
    }

    /// Builds the consent URL for `state`. No I/O.
    pub fn build_authorization_url(&self, state: &str) -> Url {
        self.oauth.authorization_url(state)
    }

    /// Registers a pending authorization for `state`.
    ///
    /// An existing entry for the same `state` is replaced and its clock reset; only the latest
    /// awaiter is ever notified.
    pub async fn register_pending(&self, state: String, awaiter: Arc<dyn AuthorizationAwaiter>) {
        let entry = PendingAuthorization {
            created_at: Instant::now(),
            awaiter,
        };

        if self.pending.write().await.insert(state, entry).is_some() {
            tracing::debug!("Replaced an existing pending authorization");
        }
    }

    /// Completes the pending authorization for `state` with an authorization code.
    ///
    /// The entry is removed before the exchange so the code is exchanged at most once. On
    /// success the token is installed in the `TokenManager`; either way the awaiter is told
    /// the outcome.
    ///
    /// # Arguments
    /// - `state` - Correlation value from the callback
    /// - `code` - Authorization code from the callback
    ///
    /// # Returns
    /// - `Ok(Token)` - The installed token
    /// - `Err(AuthError::UnknownState)` - No live entry for `state`; nothing was exchanged
    /// - `Err(AuthError::ExchangeFailed)` - The code exchange failed
    pub async fn complete_with_code(&self, state: &str, code: &str) -> Result<Token, AuthError> {
        let entry = self.take(state).await?;

        match self.oauth.exchange_code(code).await {
            Ok(token) => {
                self.tokens.install(token.clone()).await;
                tracing::info!("Marketplace authorization completed");

                entry
                    .awaiter
                    .notify(AuthorizationOutcome::Authorized {
                        expires_at: token.expires_at,
                        has_refresh_token: token.refresh_token.is_some(),
                    })
                    .await;

                Ok(token)
            }
            Err(e) => {
                tracing::warn!("{}", e);

                let reason = match &e {
                    AuthError::ExchangeFailed(reason) => reason.clone(),
                    other => other.to_string(),
                };
                entry
                    .awaiter
                    .notify(AuthorizationOutcome::ExchangeFailed(reason))
                    .await;

                Err(e)
            }
        }
    }

    /// Completes the pending authorization for `state` with a denial.
    ///
    /// # Returns
    /// - `Ok(())` - The awaiter was notified
    /// - `Err(AuthError::UnknownState)` - No live entry for `state`
    pub async fn complete_with_error(&self, state: &str, reason: &str) -> Result<(), AuthError> {
        let entry = self.take(state).await?;

        tracing::info!("Marketplace authorization denied: {}", reason);
        entry
            .awaiter
            .notify(AuthorizationOutcome::Denied(reason.to_string()))
            .await;

        Ok(())
    }

    /// Removes pending authorizations older than `PENDING_TTL` without notifying them.
    ///
    /// # Returns
    /// - `usize` - Number of entries removed
    pub async fn sweep_expired(&self) -> usize {
        let now = Instant::now();
        let mut pending = self.pending.write().await;

        let before = pending.len();
        pending.retain(|_, entry| !entry.is_expired(now));
        before - pending.len()
    }

    /// Exchanges a code pasted by the operator, without a pending entry.
    ///
    /// Percent-encoded codes copied from a redirect URL are decoded first.
    ///
    /// # Returns
    /// - `Ok(Token)` - The installed token
    /// - `Err(AuthError::ExchangeFailed)` - The code exchange failed
    pub async fn exchange_manual_code(&self, code: &str) -> Result<Token, AuthError> {
        let code = decode_pasted_code(code);
        let token = self.oauth.exchange_code(&code).await?;

        self.tokens.install(token.clone()).await;
        tracing::info!("Marketplace authorization completed from a pasted code");

        Ok(token)
    }

    /// Number of pending authorizations, including expired ones not yet swept.
    #[cfg(test)]
    pub(crate) async fn pending_count(&self) -> usize {
        self.pending.read().await.len()
    }

    /// Removes the entry for `state`, treating an expired entry as absent.
    async fn take(&self, state: &str) -> Result<PendingAuthorization, AuthError> {
        let entry = self
            .pending
            .write()
            .await
            .remove(state)
            .ok_or_else(|| AuthError::UnknownState(state.to_string()))?;

        if entry.is_expired(Instant::now()) {
            return Err(AuthError::UnknownState(state.to_string()));
        }

        Ok(entry)
    }
}
