//! Token endpoint response bodies.

use serde_json::{json, Value};

/// Builds a successful token endpoint response.
///
/// Mirrors the marketplace's shape, including its non-standard `token_type` and the extra
/// `refresh_token_expires_in` field that clients must ignore.
///
/// # Arguments
/// - `access_token` - Access token to issue
/// - `expires_in` - Lifetime of the access token in seconds
/// - `refresh_token` - Refresh token to issue, omitted from the body when `None`
///
/// # Returns
/// - `Value` - JSON body
pub fn token_response(access_token: &str, expires_in: u64, refresh_token: Option<&str>) -> Value {
    let mut body = json!({
        "access_token": access_token,
        "expires_in": expires_in,
        "token_type": "User Access Token",
    });

    if let Some(refresh_token) = refresh_token {
        body["refresh_token"] = json!(refresh_token);
        body["refresh_token_expires_in"] = json!(47_304_000);
    }

    body
}

/// Same as `token_response` but with an explicit space-separated `scope` field.
pub fn token_response_with_scope(
    access_token: &str,
    expires_in: u64,
    refresh_token: Option<&str>,
    scope: &str,
) -> Value {
    let mut body = token_response(access_token, expires_in, refresh_token);
    body["scope"] = json!(scope);
    body
}

/// Builds an RFC 6749 error body, e.g. `invalid_grant`.
pub fn oauth_error(error: &str, description: &str) -> Value {
    json!({
        "error": error,
        "error_description": description,
    })
}
