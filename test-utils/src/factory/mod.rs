//! Factory methods for creating test payloads.
//!
//! Token endpoint bodies live in `token`, inbound webhook bodies and their signatures in
//! `notification`. Both produce wire-format JSON so tests exercise the real parsers.
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let body = factory::notification::notification_body("OFFER_RECEIVED", json!({"buyer": "alice"}));
//! let signature = factory::notification::sign(&body, "verify-token");
//! ```

pub mod helpers;
pub mod notification;
pub mod token;
