//! Application state shared across all request handlers.
//!
//! The state is built once in `main` and cloned into every handler through Axum's state
//! extraction. Every field is an `Arc`, so clones share the same services.

use oauth2::basic::{BasicErrorResponseType, BasicTokenType};
use oauth2::{
    Client, EmptyExtraTokenFields, EndpointNotSet, EndpointSet, RevocationErrorResponseType,
    StandardErrorResponse, StandardRevocableToken, StandardTokenIntrospectionResponse,
    StandardTokenResponse,
};
use std::sync::Arc;

use crate::server::service::{
    authorization::AuthorizationFlow, notification::NotificationDispatcher,
    webhook::WebhookVerifier,
};

/// Type alias for the OAuth2 client configured for the marketplace token endpoint.
pub(crate) type OAuth2Client = Client<
    StandardErrorResponse<BasicErrorResponseType>,
    StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardTokenIntrospectionResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardRevocableToken,
    StandardErrorResponse<RevocationErrorResponseType>,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

#[derive(Clone)]
pub struct AppState {
    /// Pending authorizations completed by the OAuth callback routes.
    pub auth_flow: Arc<AuthorizationFlow>,

    /// Challenge and signature checks for inbound notifications.
    pub verifier: Arc<WebhookVerifier>,

    /// Relays accepted notifications to Discord in the background.
    pub dispatcher: Arc<NotificationDispatcher>,
}

impl AppState {
    pub fn new(
        auth_flow: Arc<AuthorizationFlow>,
        verifier: Arc<WebhookVerifier>,
        dispatcher: Arc<NotificationDispatcher>,
    ) -> Self {
        Self {
            auth_flow,
            verifier,
            dispatcher,
        }
    }
}
