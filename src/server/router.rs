use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::server::{
    controller::{
        oauth::{callback, declined},
        webhook::{challenge, health, notification},
    },
    state::AppState,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/webhook/ebay/notification", get(challenge).post(notification))
        .route("/webhook/ebay/challenge", get(challenge))
        .route("/webhook/health", get(health))
        .route("/webhook/oauth/callback", get(callback))
        .route("/webhook/oauth/declined", get(declined))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
