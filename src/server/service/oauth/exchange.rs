use chrono::{DateTime, Duration, Utc};
use oauth2::{
    basic::{BasicErrorResponse, BasicTokenResponse},
    AuthorizationCode, RefreshToken, RequestTokenError, Scope, TokenResponse,
};
use std::collections::BTreeSet;

use crate::server::{
    error::auth::AuthError,
    model::token::Token,
    service::oauth::MarketplaceOAuth,
};

/// Lifetime assumed when the token endpoint omits `expires_in`.
const DEFAULT_EXPIRES_IN_SECONDS: i64 = 7200;

impl MarketplaceOAuth {
    /// Exchanges an authorization code for a token.
    ///
    /// # Arguments
    /// - `code` - Authorization code from the callback
    ///
    /// # Returns
    /// - `Ok(Token)` - Token expiring `expires_in` after the response was received
    /// - `Err(AuthError::ExchangeFailed)` - Transport failure, error response, or unparseable body
    pub async fn exchange_code(&self, code: &str) -> Result<Token, AuthError> {
        let response = self
            .oauth_client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .add_extra_param("redirect_uri", self.redirect_uri.clone())
            .request_async(&self.http_client)
            .await
            .map_err(|e| AuthError::ExchangeFailed(describe_error(e)))?;

        Ok(self.into_token(response, Utc::now()))
    }

    /// Exchanges a refresh token for a new access token.
    ///
    /// The returned token's `refresh_token` is `None` when the endpoint did not rotate it; the
    /// caller decides whether to keep the previous one.
    ///
    /// # Arguments
    /// - `refresh_token` - Current refresh token
    ///
    /// # Returns
    /// - `Ok(Token)` - Refreshed token
    /// - `Err(AuthError::RefreshFailed)` - Transport failure, error response, or unparseable body
    pub async fn exchange_refresh_token(&self, refresh_token: &str) -> Result<Token, AuthError> {
        let response = self
            .oauth_client
            .exchange_refresh_token(&RefreshToken::new(refresh_token.to_string()))
            .add_scopes(self.scopes.iter().cloned().map(Scope::new))
            .request_async(&self.http_client)
            .await
            .map_err(|e| AuthError::RefreshFailed(describe_error(e)))?;

        Ok(self.into_token(response, Utc::now()))
    }

    /// Converts a token endpoint response received at `received_at` into a `Token`.
    ///
    /// Granted scopes default to the requested scopes when the response does not list them.
    fn into_token(&self, response: BasicTokenResponse, received_at: DateTime<Utc>) -> Token {
        let expires_in = response
            .expires_in()
            .and_then(|d| Duration::from_std(d).ok())
            .unwrap_or_else(|| Duration::seconds(DEFAULT_EXPIRES_IN_SECONDS));

        let scopes: BTreeSet<String> = match response.scopes() {
            Some(scopes) => scopes.iter().map(|scope| scope.to_string()).collect(),
            None => self.scopes.iter().cloned().collect(),
        };

        Token::issued(
            response.access_token().secret().to_string(),
            response
                .refresh_token()
                .map(|token| token.secret().to_string()),
            expires_in,
            scopes,
            received_at,
        )
    }
}

/// Flattens a token request error into a loggable reason.
fn describe_error<RE>(err: RequestTokenError<RE, BasicErrorResponse>) -> String
where
    RE: std::error::Error + 'static,
{
    match err {
        RequestTokenError::ServerResponse(response) => response.to_string(),
        RequestTokenError::Request(e) => format!("request failed: {}", e),
        RequestTokenError::Parse(e, body) => format!(
            "unexpected response ({}): {}",
            e,
            String::from_utf8_lossy(&body)
        ),
        RequestTokenError::Other(msg) => msg,
    }
}
