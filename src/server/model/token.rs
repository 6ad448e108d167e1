//! Marketplace OAuth token domain model.

use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeSet;
use std::fmt;

/// User access token issued by the marketplace, with its refresh token and expiry.
///
/// `expires_at` is always computed from the `expires_in` of the token response at the moment
/// the response was received. A token without a refresh token cannot be renewed once it
/// expires.
#[derive(Clone, PartialEq)]
pub struct Token {
    /// Bearer token sent on API calls.
    pub access_token: String,
    /// Token used to obtain a new access token, if the marketplace issued one.
    pub refresh_token: Option<String>,
    /// Absolute expiry of `access_token`.
    pub expires_at: DateTime<Utc>,
    /// Scopes granted to the token.
    pub scopes: BTreeSet<String>,
}

impl Token {
    /// Builds a token from a token endpoint response.
    ///
    /// # Arguments
    /// - `access_token` - Issued access token
    /// - `refresh_token` - Issued refresh token, if any
    /// - `expires_in` - Lifetime reported by the endpoint
    /// - `scopes` - Granted scopes
    /// - `received_at` - When the response was received
    ///
    /// # Returns
    /// - `Token` - Token expiring at `received_at + expires_in`
    pub fn issued(
        access_token: String,
        refresh_token: Option<String>,
        expires_in: Duration,
        scopes: BTreeSet<String>,
        received_at: DateTime<Utc>,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            expires_at: received_at + expires_in,
            scopes,
        }
    }

    /// Builds a token restored from the token store.
    ///
    /// The store does not record expiry, so the restored token is treated as already expired
    /// and the first request for a valid token refreshes it.
    pub fn restored(access_token: String, refresh_token: Option<String>) -> Self {
        Self {
            access_token,
            refresh_token,
            expires_at: DateTime::UNIX_EPOCH,
            scopes: BTreeSet::new(),
        }
    }

    /// Whether the token stays valid for at least `margin` beyond `now`.
    pub fn is_valid_for(&self, margin: Duration, now: DateTime<Utc>) -> bool {
        self.expires_at >= now + margin
    }

    /// Snapshot of the token without its secrets.
    pub fn status(&self) -> TokenStatus {
        TokenStatus {
            has_token: true,
            has_refresh_token: self.refresh_token.is_some(),
            expires_at: Some(self.expires_at),
            scopes: self.scopes.clone(),
        }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("access_token", &"[redacted]")
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "[redacted]"),
            )
            .field("expires_at", &self.expires_at)
            .field("scopes", &self.scopes)
            .finish()
    }
}

/// Secret-free snapshot of the token manager's state, used by the status command.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenStatus {
    pub has_token: bool,
    pub has_refresh_token: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub scopes: BTreeSet<String>,
}
