use serde_json::Value;
use std::time::Duration;
use wiremock::{
    matchers::{body_string_contains, method, path},
    Mock, MockServer, ResponseTemplate,
};

use crate::{context::TestContext, error::TestError};

/// Path of the mocked OAuth2 token endpoint on the mock server.
pub const TOKEN_PATH: &str = "/identity/v1/oauth2/token";

/// OAuth2 grant types the mocked token endpoint can answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantType {
    AuthorizationCode,
    RefreshToken,
}

impl GrantType {
    /// Form value of the `grant_type` parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AuthorizationCode => "authorization_code",
            Self::RefreshToken => "refresh_token",
        }
    }
}

/// A canned token endpoint response registered on the mock server.
struct TokenEndpoint {
    grant_type: GrantType,
    status: u16,
    body: Value,
    delay: Option<Duration>,
    expected_calls: Option<u64>,
}

/// Builder for creating test contexts with a mocked token endpoint.
///
/// Provides a fluent interface for registering token endpoint responses per grant type and
/// an optional env file. Call `build()` to start the mock server and write the file.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::{GrantType, TestBuilder};
///
/// let test = TestBuilder::new()
///     .with_token_response(GrantType::RefreshToken, 200, body)
///     .with_delay(Duration::from_millis(200))
///     .expect_calls(1)
///     .with_env_file("EBAY_ACCESS_TOKEN=old\n")
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// Token endpoint responses, mounted in insertion order.
    endpoints: Vec<TokenEndpoint>,
    /// Initial contents of the env file, if one should exist.
    env_file: Option<String>,
}

impl TestBuilder {
    /// Creates a new test builder with no mocked responses and no env file.
    pub fn new() -> Self {
        Self {
            endpoints: Vec::new(),
            env_file: None,
        }
    }

    /// Registers a response for token requests of the given grant type.
    ///
    /// Requests are matched on the `grant_type` form field so a single server can answer both
    /// code exchanges and refreshes with different bodies.
    ///
    /// # Arguments
    /// - `grant_type` - Grant type the response applies to
    /// - `status` - HTTP status code to answer with
    /// - `body` - JSON body to answer with
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_token_response(mut self, grant_type: GrantType, status: u16, body: Value) -> Self {
        self.endpoints.push(TokenEndpoint {
            grant_type,
            status,
            body,
            delay: None,
            expected_calls: None,
        });
        self
    }

    /// Delays the most recently registered response.
    ///
    /// Used by coalescing tests to keep a refresh in flight while other callers queue up.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        if let Some(endpoint) = self.endpoints.last_mut() {
            endpoint.delay = Some(delay);
        }
        self
    }

    /// Sets the exact number of calls the most recently registered response must receive.
    ///
    /// The expectation is verified when the `TestContext` (and with it the mock server) is
    /// dropped; an unmet expectation fails the test.
    pub fn expect_calls(mut self, calls: u64) -> Self {
        if let Some(endpoint) = self.endpoints.last_mut() {
            endpoint.expected_calls = Some(calls);
        }
        self
    }

    /// Writes an env file with the given contents into the context's scratch directory.
    pub fn with_env_file(mut self, contents: &str) -> Self {
        self.env_file = Some(contents.to_string());
        self
    }

    /// Starts the mock server, mounts all responses and prepares the scratch directory.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Running mock server and scratch directory
    /// - `Err(TestError::Io)` - Failed to create the directory or write the env file
    pub async fn build(self) -> Result<TestContext, TestError> {
        let server = MockServer::start().await;

        for endpoint in self.endpoints {
            let mut template = ResponseTemplate::new(endpoint.status).set_body_json(endpoint.body);
            if let Some(delay) = endpoint.delay {
                template = template.set_delay(delay);
            }

            let mut mock = Mock::given(method("POST"))
                .and(path(TOKEN_PATH))
                .and(body_string_contains(format!(
                    "grant_type={}",
                    endpoint.grant_type.as_str()
                )))
                .respond_with(template);
            if let Some(calls) = endpoint.expected_calls {
                mock = mock.expect(calls);
            }

            mock.mount(&server).await;
        }

        let context = TestContext::new(server)?;
        if let Some(contents) = self.env_file {
            std::fs::write(context.env_path(), contents)?;
        }

        Ok(context)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
