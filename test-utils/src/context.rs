use std::path::PathBuf;
use tempfile::TempDir;
use wiremock::MockServer;

use crate::{builder::TOKEN_PATH, error::TestError};

/// Test context containing the mocked marketplace API and a scratch directory.
///
/// Dropping the context shuts the mock server down, which also verifies every call-count
/// expectation registered through the builder.
pub struct TestContext {
    /// Mock server standing in for the marketplace API.
    ///
    /// Tests may mount additional mocks (for example notification destination endpoints)
    /// directly on it.
    pub server: MockServer,

    /// Scratch directory that holds the env file. Removed on drop.
    pub dir: TempDir,
}

impl TestContext {
    /// Wraps a started mock server together with a fresh scratch directory.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - New context
    /// - `Err(TestError::Io)` - Failed to create the temporary directory
    pub fn new(server: MockServer) -> Result<Self, TestError> {
        Ok(Self {
            server,
            dir: tempfile::tempdir()?,
        })
    }

    /// Base URL of the mock server, usable as the marketplace API base.
    pub fn api_url(&self) -> String {
        self.server.uri()
    }

    /// Full URL of the mocked token endpoint.
    pub fn token_url(&self) -> String {
        format!("{}{}", self.server.uri(), TOKEN_PATH)
    }

    /// Path of the env file inside the scratch directory.
    ///
    /// The file only exists if the builder was given contents or code under test wrote it.
    pub fn env_path(&self) -> PathBuf {
        self.dir.path().join(".env")
    }

    /// Reads the env file back, returning an empty string if it does not exist.
    pub fn read_env_file(&self) -> String {
        std::fs::read_to_string(self.env_path()).unwrap_or_default()
    }
}
