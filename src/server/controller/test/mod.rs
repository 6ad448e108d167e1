use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::server::{
    model::authorization::AuthorizationOutcome,
    router::router,
    service::{
        authorization::AuthorizationFlow,
        notification::NotificationDispatcher,
        test::{RecordingAwaiter, RecordingSink},
        webhook::{SignatureMode, WebhookVerifier},
    },
    state::AppState,
};


const VERIFY_TOKEN: &str = "verify-token-0123456789";
const CHANNEL_ID: u64 = 42;

/// Router over `flow` with a recording sink on `CHANNEL_ID`.
fn app(flow: Arc<AuthorizationFlow>, mode: SignatureMode) -> (Router, Arc<RecordingSink>) {
    let sink = RecordingSink::new();
    let state = AppState::new(
        flow,
        Arc::new(WebhookVerifier::new(VERIFY_TOKEN.to_string(), None, mode)),
        Arc::new(NotificationDispatcher::new(sink.clone(), Some(CHANNEL_ID))),
    );

    (router(state), sink)
}

async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: Response) -> Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}

/// Polls `condition` until it holds or a second has passed.
async fn eventually(condition: impl Fn() -> bool) -> bool {
    for _ in 0..100 {
        if condition() {
            return true;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    condition()
}
