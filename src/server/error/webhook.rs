use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

/// Errors raised while validating inbound webhook requests.
#[derive(Error, Debug)]
pub enum WebhookError {
    /// Challenge request without a `challenge_code` query parameter, or with an empty one.
    #[error("Missing challenge_code parameter")]
    MissingChallengeCode,

    /// The signature header is present but does not match the body.
    #[error("Invalid signature")]
    SignatureInvalid,

    /// No signature header was sent and signatures are required.
    #[error("Missing signature")]
    SignatureMissing,

    /// The notification body is not valid JSON of the expected shape.
    #[error("Invalid JSON: {0}")]
    MalformedPayload(String),
}

/// Converts webhook errors into HTTP responses.
///
/// # Returns
/// - 400 Bad Request - For `MissingChallengeCode` and `MalformedPayload`
/// - 401 Unauthorized - For `SignatureInvalid` and `SignatureMissing`
impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::MissingChallengeCode | Self::MalformedPayload(_) => StatusCode::BAD_REQUEST,
            Self::SignatureInvalid | Self::SignatureMissing => StatusCode::UNAUTHORIZED,
        };

        (
            status,
            Json(ErrorDto {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
