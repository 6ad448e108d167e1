//! OAuth2 client for the marketplace token endpoint.
//!
//! Wraps the `oauth2` client configured with the marketplace's authorize and token URLs. The
//! marketplace identifies the redirect target by RuName rather than URL, so `redirect_uri` is
//! sent as an extra parameter instead of through the client's redirect URL setting.

use oauth2::{basic::BasicClient, AuthUrl, ClientId, ClientSecret, TokenUrl};

use crate::server::{
    error::{internal::InternalError, AppError},
    state::OAuth2Client,
};

pub mod authorize;
pub mod exchange;

#[cfg(test)]
mod test;

/// Scopes requested on authorization and refresh.
pub const SCOPES: [&str; 5] = [
    "https://api.ebay.com/oauth/api_scope",
    "https://api.ebay.com/oauth/api_scope/sell.inventory",
    "https://api.ebay.com/oauth/api_scope/sell.fulfillment",
    "https://api.ebay.com/oauth/api_scope/sell.account",
    "https://api.ebay.com/oauth/api_scope/sell.finances",
];

pub struct MarketplaceOAuth {
    pub oauth_client: OAuth2Client,
    pub http_client: reqwest::Client,
    /// RuName of the app.
    pub redirect_uri: String,
    pub scopes: Vec<String>,
}

impl MarketplaceOAuth {
    /// Creates a marketplace OAuth client.
    ///
    /// # Arguments
    /// - `client_id` - Marketplace app ID
    /// - `client_secret` - Marketplace cert ID, sent through HTTP Basic auth
    /// - `auth_url` - Consent page URL
    /// - `token_url` - Token endpoint URL
    /// - `redirect_uri` - RuName registered for the app
    /// - `http_client` - Shared HTTP client (redirects disabled)
    ///
    /// # Returns
    /// - `Ok(MarketplaceOAuth)` - Configured client requesting the default `SCOPES`
    /// - `Err(AppError::InternalErr)` - One of the URLs failed to parse
    pub fn new(
        client_id: &str,
        client_secret: &str,
        auth_url: &str,
        token_url: &str,
        redirect_uri: &str,
        http_client: reqwest::Client,
    ) -> Result<Self, AppError> {
        let auth_url = AuthUrl::new(auth_url.to_string()).map_err(|e| {
            InternalError::InvalidEndpointUrl {
                url: auth_url.to_string(),
                reason: e.to_string(),
            }
        })?;
        let token_url = TokenUrl::new(token_url.to_string()).map_err(|e| {
            InternalError::InvalidEndpointUrl {
                url: token_url.to_string(),
                reason: e.to_string(),
            }
        })?;

        let oauth_client = BasicClient::new(ClientId::new(client_id.to_string()))
            .set_client_secret(ClientSecret::new(client_secret.to_string()))
            .set_auth_uri(auth_url)
            .set_token_uri(token_url);

        Ok(Self {
            oauth_client,
            http_client,
            redirect_uri: redirect_uri.to_string(),
            scopes: SCOPES.iter().map(|scope| scope.to_string()).collect(),
        })
    }
}
