use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, Uri},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::{
    model::api::ChallengeResponseDto,
    server::{error::AppError, model::notification::WebhookNotification, state::AppState},
};

/// Signature headers in order of preference.
const SIGNATURE_HEADERS: [&str; 2] = ["x-signature", "x-ebay-signature"];

/// Query parameters of the endpoint ownership challenge.
#[derive(Deserialize)]
pub struct ChallengeParams {
    pub challenge_code: Option<String>,
}

/// Answers the marketplace's endpoint ownership challenge.
///
/// # Returns
/// - `200 OK` - `{"challengeResponse": "<base64>"}`
/// - `400 Bad Request` - Missing or empty `challenge_code`
pub async fn challenge(
    State(state): State<AppState>,
    uri: Uri,
    Query(params): Query<ChallengeParams>,
) -> Result<impl IntoResponse, AppError> {
    let challenge_response = state
        .verifier
        .challenge_response(params.challenge_code.as_deref(), uri.path())?;

    tracing::info!("Answered webhook challenge on {}", uri.path());

    Ok(Json(ChallengeResponseDto { challenge_response }))
}

/// Accepts an inbound notification and relays it to Discord in the background.
///
/// # Returns
/// - `200 OK` - Notification accepted
/// - `400 Bad Request` - Body is not a notification
/// - `401 Unauthorized` - Signature invalid, or missing while signatures are required
pub async fn notification(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    // A blank header counts as missing; one that is not valid UTF-8 as present and invalid.
    let signature = SIGNATURE_HEADERS
        .iter()
        .find_map(|name| headers.get(*name))
        .map(|value| value.to_str().unwrap_or("\u{fffd}"))
        .filter(|value| !value.trim().is_empty());

    state.verifier.check(&body, signature)?;

    let notification = WebhookNotification::from_json(&body)?;
    tracing::info!(
        "Received {} notification {}",
        notification.event_type,
        notification.notification_id
    );

    state.dispatcher.spawn_dispatch(notification);

    Ok((StatusCode::OK, "OK"))
}

pub async fn health() -> &'static str {
    "OK"
}
