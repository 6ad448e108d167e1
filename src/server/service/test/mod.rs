//! Service tests and the fakes shared with controller tests.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use crate::server::{
    data::token_store::EnvFileTokenStore,
    error::AppError,
    model::{authorization::AuthorizationOutcome, notification::Presentation, token::Token},
    service::{
        authorization::{AuthorizationAwaiter, AuthorizationFlow},
        notification::NotificationSink,
        oauth::MarketplaceOAuth,
        token::TokenManager,
    },
};
use test_utils::context::TestContext;

mod authorization;
mod token;

pub(crate) const SAFETY_MARGIN_SECONDS: i64 = 300;
pub(crate) const TEST_AUTH_URL: &str = "https://auth.sandbox.ebay.com/oauth2/authorize";
pub(crate) const TEST_RUNAME: &str = "Test_App-TestApp-SBX-abcdef";

/// Awaiter recording every outcome it is notified with.
#[derive(Default)]
pub(crate) struct RecordingAwaiter {
    outcomes: Mutex<Vec<AuthorizationOutcome>>,
}

impl RecordingAwaiter {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn outcomes(&self) -> Vec<AuthorizationOutcome> {
        self.outcomes.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuthorizationAwaiter for RecordingAwaiter {
    async fn notify(&self, outcome: AuthorizationOutcome) {
        self.outcomes.lock().unwrap().push(outcome);
    }
}

/// Sink recording every presentation it is asked to send, optionally failing each send.
#[derive(Default)]
pub(crate) struct RecordingSink {
    sent: Mutex<Vec<(u64, Presentation)>>,
    fail: bool,
}

impl RecordingSink {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn failing() -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        })
    }

    pub(crate) fn sent(&self) -> Vec<(u64, Presentation)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn send(&self, channel_id: u64, presentation: Presentation) -> Result<(), AppError> {
        self.sent.lock().unwrap().push((channel_id, presentation));
        if self.fail {
            return Err(AppError::BadRequest("sink unavailable".to_string()));
        }
        Ok(())
    }
}

/// Builds a token expiring `expires_in_seconds` from now.
pub(crate) fn token(access: &str, refresh: Option<&str>, expires_in_seconds: i64) -> Token {
    Token::issued(
        access.to_string(),
        refresh.map(str::to_string),
        Duration::seconds(expires_in_seconds),
        BTreeSet::new(),
        Utc::now(),
    )
}

/// Client pointed at the context's mocked token endpoint.
pub(crate) fn oauth(test: &TestContext) -> Arc<MarketplaceOAuth> {
    Arc::new(
        MarketplaceOAuth::new(
            "test-app-id",
            "test-cert-id",
            TEST_AUTH_URL,
            &test.token_url(),
            TEST_RUNAME,
            reqwest::Client::new(),
        )
        .unwrap(),
    )
}

/// Token manager backed by the context's env file, with no token installed.
pub(crate) fn token_manager(test: &TestContext) -> Arc<TokenManager> {
    Arc::new(TokenManager::new(
        oauth(test),
        Arc::new(EnvFileTokenStore::new(test.env_path())),
        Duration::seconds(SAFETY_MARGIN_SECONDS),
    ))
}

/// Authorization flow sharing `tokens` with the caller.
pub(crate) fn authorization_flow(
    test: &TestContext,
    tokens: Arc<TokenManager>,
) -> Arc<AuthorizationFlow> {
    Arc::new(AuthorizationFlow::new(oauth(test), tokens))
}

/// Flow whose token endpoint is unreachable, for tests that never exchange a code.
///
/// Built without a mock server so it can run under paused time.
pub(crate) fn offline_flow(dir: &tempfile::TempDir) -> Arc<AuthorizationFlow> {
    let oauth = Arc::new(
        MarketplaceOAuth::new(
            "test-app-id",
            "test-cert-id",
            TEST_AUTH_URL,
            "http://127.0.0.1:9/identity/v1/oauth2/token",
            TEST_RUNAME,
            reqwest::Client::new(),
        )
        .unwrap(),
    );
    let tokens = Arc::new(TokenManager::new(
        oauth.clone(),
        Arc::new(EnvFileTokenStore::new(dir.path().join(".env"))),
        Duration::seconds(SAFETY_MARGIN_SECONDS),
    ));

    Arc::new(AuthorizationFlow::new(oauth, tokens))
}
