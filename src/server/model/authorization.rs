//! Authorization flow outcome reported to whoever started the flow.

use chrono::{DateTime, Utc};

/// Result of a pending authorization, delivered to its awaiter exactly once.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthorizationOutcome {
    /// The code was exchanged and the token installed.
    Authorized {
        /// Expiry of the newly installed access token
        expires_at: DateTime<Utc>,
        /// Whether the marketplace issued a refresh token
        has_refresh_token: bool,
    },
    /// The code exchange at the token endpoint failed.
    ExchangeFailed(String),
    /// The user declined consent or the marketplace reported an error.
    Denied(String),
}
