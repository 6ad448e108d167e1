use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
};
use serde::Deserialize;

use crate::server::{state::AppState, util::html::escape};

const DECLINED_REASON: &str = "Authorization declined by user";
const MISSING_CODE_REASON: &str = "No authorization code received";

/// Query parameters of the consent redirect.
///
/// The marketplace sends either `code` or `error` (with an optional description), together
/// with the `state` handed out when the flow started.
#[derive(Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

#[derive(Deserialize)]
pub struct DeclinedParams {
    pub state: Option<String>,
}

/// Completes a pending authorization from the consent redirect.
///
/// The page is returned immediately; the code exchange and the Discord followup run on a
/// spawned task.
///
/// # Returns
/// - `200 OK` - Success page when a code was received, failure page for an `error` redirect
/// - `400 Bad Request` - Failure page when neither `code` nor `error` was sent
pub async fn callback(
    State(state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> impl IntoResponse {
    let pending_state = params.state.unwrap_or_default();

    tracing::info!(
        "OAuth callback received (code: {}, error: {})",
        params.code.is_some(),
        params.error.as_deref().unwrap_or("none")
    );

    if let Some(error) = params.error.filter(|error| !error.is_empty()) {
        let description = params.error_description.unwrap_or_default();
        let reason = if description.is_empty() {
            error
        } else {
            format!("{}: {}", error, description)
        };

        spawn_error(&state, pending_state, reason.clone());

        return (StatusCode::OK, failure_page("Authorization Failed", &reason));
    }

    let Some(code) = params.code.filter(|code| !code.is_empty()) else {
        spawn_error(&state, pending_state, MISSING_CODE_REASON.to_string());

        return (
            StatusCode::BAD_REQUEST,
            failure_page("Authorization Failed", MISSING_CODE_REASON),
        );
    };

    let flow = state.auth_flow.clone();
    tokio::spawn(async move {
        if let Err(e) = flow.complete_with_code(&pending_state, &code).await {
            tracing::warn!("OAuth callback not completed: {}", e);
        }
    });

    (StatusCode::OK, success_page())
}

/// Completes a pending authorization the user declined on the consent page.
pub async fn declined(
    State(state): State<AppState>,
    Query(params): Query<DeclinedParams>,
) -> impl IntoResponse {
    tracing::info!("OAuth authorization declined");

    spawn_error(
        &state,
        params.state.unwrap_or_default(),
        DECLINED_REASON.to_string(),
    );

    failure_page("Authorization Declined", "You declined the authorization request.")
}

fn spawn_error(state: &AppState, pending_state: String, reason: String) {
    let flow = state.auth_flow.clone();
    tokio::spawn(async move {
        if let Err(e) = flow.complete_with_error(&pending_state, &reason).await {
            tracing::warn!("OAuth denial not delivered: {}", e);
        }
    });
}

fn success_page() -> Html<String> {
    page(
        "Authorization Successful",
        "success",
        "✅ Authorization Successful!",
        "<p>Your eBay account has been connected successfully.</p>\
         <p><strong>You can now close this window and return to Discord.</strong></p>",
    )
}

fn failure_page(title: &str, message: &str) -> Html<String> {
    page(
        title,
        "error",
        &format!("❌ {}", title),
        &format!(
            "<p>{}</p><p>You can close this window and try again in Discord with \
             <code>/ebay-authorize</code></p>",
            escape(message)
        ),
    )
}

fn page(title: &str, class: &str, heading: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\
         <html><head><meta charset=\"utf-8\"><title>{title}</title>\
         <style>body{{font-family:Arial;max-width:600px;margin:50px auto;padding:20px}}\
         .success{{color:green}}.error{{color:red}}</style></head>\
         <body><h1 class=\"{class}\">{heading}</h1>{body}</body></html>",
        title = escape(title),
        class = class,
        heading = escape(heading),
        body = body,
    ))
}
