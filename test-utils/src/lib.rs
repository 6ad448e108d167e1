//! Marketbot Test Utils
//!
//! Provides shared testing utilities for the marketbot server. The crate offers a builder for
//! test contexts that bundle a mocked marketplace API (token endpoint and friends, served by
//! `wiremock`) with a scratch directory holding an env-style token file.
//!
//! # Overview
//!
//! The test utilities consist of four main components:
//! - **TestBuilder**: Fluent builder for configuring token endpoint responses and the env file
//! - **TestContext**: Running mock server plus temporary directory
//! - **TestError**: Error types that can occur during test setup
//! - **factory**: JSON bodies and signatures for token responses and webhook notifications
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::{builder::{GrantType, TestBuilder}, factory};
//!
//! #[tokio::test]
//! async fn refreshes_token() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_token_response(
//!             GrantType::RefreshToken,
//!             200,
//!             factory::token::token_response("new-access", 7200, None),
//!         )
//!         .expect_calls(1)
//!         .build()
//!         .await?;
//!
//!     let token_url = test.token_url();
//!     // Point the OAuth client at `token_url`...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
