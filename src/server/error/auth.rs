use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

/// Errors raised by the marketplace token lifecycle and the authorization flow.
#[derive(Error, Debug)]
pub enum AuthError {
    /// No usable token is held.
    ///
    /// Either no authorization has completed yet, or the current token is about to expire and
    /// there is no refresh token to renew it with. The operator must authorize again.
    #[error("No valid marketplace token is available")]
    TokenUnavailable,

    /// The refresh exchange at the token endpoint failed.
    ///
    /// The previous token is left in place.
    #[error("Failed to refresh marketplace token: {0}")]
    RefreshFailed(String),

    /// The authorization code exchange at the token endpoint failed.
    #[error("Failed to exchange authorization code: {0}")]
    ExchangeFailed(String),

    /// No pending authorization matches the callback's `state`.
    ///
    /// The authorization was never issued, already completed, or expired.
    #[error("No pending authorization for state '{0}'")]
    UnknownState(String),

    /// Reading or writing the token file failed.
    #[error("Token store error: {0}")]
    TokenStore(String),
}

/// Converts authentication errors into HTTP responses.
///
/// - `UnknownState` → 400 Bad Request
/// - `TokenUnavailable` → 401 Unauthorized
/// - `RefreshFailed` / `ExchangeFailed` → 502 Bad Gateway
/// - `TokenStore` → 500 Internal Server Error
///
/// Upstream failure reasons are logged but not returned to the client.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            Self::UnknownState(_) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorDto {
                    error: "Authorization request expired or unknown, please try again."
                        .to_string(),
                }),
            )
                .into_response(),
            Self::TokenUnavailable => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorDto {
                    error: self.to_string(),
                }),
            )
                .into_response(),
            Self::RefreshFailed(_) | Self::ExchangeFailed(_) => {
                tracing::warn!("{}", self);
                (
                    StatusCode::BAD_GATEWAY,
                    Json(ErrorDto {
                        error: "Marketplace token endpoint request failed".to_string(),
                    }),
                )
                    .into_response()
            }
            Self::TokenStore(_) => {
                tracing::error!("{}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorDto {
                        error: "Internal server error".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}
