//! Marketplace token lifecycle.
//!
//! `TokenManager` exclusively owns the live token. Every read that may need a refresh takes
//! the token mutex and holds it across the exchange, so concurrent callers that find the token
//! near expiry wait for the one in-flight refresh instead of starting their own.

use chrono::{Duration, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::server::{
    data::token_store::TokenStore,
    error::auth::AuthError,
    model::token::{Token, TokenStatus},
    service::oauth::MarketplaceOAuth,
};

pub struct TokenManager {
    oauth: Arc<MarketplaceOAuth>,
    store: Arc<dyn TokenStore>,
    token: Mutex<Option<Token>>,
    safety_margin: Duration,
}

impl TokenManager {
    /// Creates a manager with no token.
    ///
    /// # Arguments
    /// - `oauth` - Client for the marketplace token endpoint
    /// - `store` - Durable backing written after every successful exchange or refresh
    /// - `safety_margin` - Minimum remaining lifetime of a token handed out
    pub fn new(
        oauth: Arc<MarketplaceOAuth>,
        store: Arc<dyn TokenStore>,
        safety_margin: Duration,
    ) -> Self {
        Self {
            oauth,
            store,
            token: Mutex::new(None),
            safety_margin,
        }
    }

    /// Loads the persisted token, if any, as the live token.
    ///
    /// The loaded token has an unknown expiry and is treated as already expired, so the first
    /// `get_valid_token` refreshes it.
    ///
    /// # Returns
    /// - `Ok(true)` - A token was restored
    /// - `Ok(false)` - Nothing was persisted
    /// - `Err(AuthError::TokenStore)` - The store could not be read
    pub async fn restore(&self) -> Result<bool, AuthError> {
        let Some(token) = self.store.load().await? else {
            return Ok(false);
        };

        if token.refresh_token.is_none() {
            tracing::warn!(
                "Restored marketplace token has no refresh token; run /ebay-authorize to renew it"
            );
        }

        *self.token.lock().await = Some(token);
        Ok(true)
    }

    /// Returns a token valid for at least the safety margin.
    ///
    /// Refreshes first when the live token expires within the margin. If the refreshed token's
    /// own lifetime is shorter than the margin it is still returned, with a warning.
    ///
    /// # Returns
    /// - `Ok(Token)` - Usable token
    /// - `Err(AuthError::TokenUnavailable)` - No token, or near expiry without a refresh token
    /// - `Err(AuthError::RefreshFailed)` - The refresh exchange failed
    pub async fn get_valid_token(&self) -> Result<Token, AuthError> {
        let mut slot = self.token.lock().await;

        let current = slot.as_ref().ok_or(AuthError::TokenUnavailable)?;
        if current.is_valid_for(self.safety_margin, Utc::now()) {
            return Ok(current.clone());
        }

        let refresh_token = current
            .refresh_token
            .clone()
            .ok_or(AuthError::TokenUnavailable)?;

        tracing::debug!("Marketplace token expires within the safety margin, refreshing");
        let refreshed = self.refresh_locked(&mut slot, &refresh_token).await?;

        if !refreshed.is_valid_for(self.safety_margin, Utc::now()) {
            tracing::warn!(
                "Refreshed marketplace token expires at {}, inside the {}s safety margin",
                refreshed.expires_at,
                self.safety_margin.num_seconds()
            );
        }

        Ok(refreshed)
    }

    /// Exchanges the current refresh token for a new token.
    ///
    /// On success the live token is replaced and persisted. A refresh token in the response
    /// replaces the old one; when the response has none the old one is kept. On failure the
    /// previous token stays in place.
    ///
    /// # Returns
    /// - `Ok(Token)` - The new live token
    /// - `Err(AuthError::TokenUnavailable)` - No refresh token is held
    /// - `Err(AuthError::RefreshFailed)` - The refresh exchange failed
    pub async fn refresh(&self) -> Result<Token, AuthError> {
        let mut slot = self.token.lock().await;

        let refresh_token = slot
            .as_ref()
            .and_then(|token| token.refresh_token.clone())
            .ok_or(AuthError::TokenUnavailable)?;

        self.refresh_locked(&mut slot, &refresh_token).await
    }

    /// Replaces the live token after an authorization-code exchange and persists it.
    pub async fn install(&self, token: Token) {
        let mut slot = self.token.lock().await;
        self.persist(&token).await;
        *slot = Some(token);
    }

    /// Secret-free snapshot of the live token.
    pub async fn status(&self) -> TokenStatus {
        self.token
            .lock()
            .await
            .as_ref()
            .map(Token::status)
            .unwrap_or_default()
    }

    async fn refresh_locked(
        &self,
        slot: &mut Option<Token>,
        refresh_token: &str,
    ) -> Result<Token, AuthError> {
        let mut token = match self.oauth.exchange_refresh_token(refresh_token).await {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!("{}", e);
                return Err(e);
            }
        };

        if token.refresh_token.is_none() {
            token.refresh_token = Some(refresh_token.to_string());
        }

        self.persist(&token).await;
        *slot = Some(token.clone());

        tracing::info!("Marketplace token refreshed, expires at {}", token.expires_at);

        Ok(token)
    }

    /// Writes the token to the store. Failures are logged; the in-memory token stays
    /// authoritative.
    async fn persist(&self, token: &Token) {
        if let Err(e) = self.store.save(token).await {
            tracing::error!("Failed to persist marketplace token: {}", e);
        }
    }
}
