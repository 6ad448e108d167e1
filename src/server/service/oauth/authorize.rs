use oauth2::{CsrfToken, Scope};
use url::Url;

use crate::server::service::oauth::MarketplaceOAuth;

impl MarketplaceOAuth {
    /// Builds the consent page URL for the given `state`.
    ///
    /// Carries `client_id`, `response_type=code`, the requested scopes, the RuName as
    /// `redirect_uri`, and `state` verbatim. Performs no I/O.
    ///
    /// # Arguments
    /// - `state` - Correlation value echoed back on the callback
    ///
    /// # Returns
    /// - `Url` - Authorization URL to hand to the user
    pub fn authorization_url(&self, state: &str) -> Url {
        let state = state.to_string();
        let (authorize_url, _csrf_state) = self
            .oauth_client
            .authorize_url(move || CsrfToken::new(state))
            .add_scopes(self.scopes.iter().cloned().map(Scope::new))
            .add_extra_param("redirect_uri", self.redirect_uri.clone())
            .url();

        authorize_url
    }
}
