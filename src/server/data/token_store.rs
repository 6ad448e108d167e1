//! Durable backing for the marketplace token.
//!
//! Tokens are persisted as `EBAY_ACCESS_TOKEN` / `EBAY_REFRESH_TOKEN` lines in a flat
//! `KEY=value` file, the same file the configuration is loaded from. Rewrites preserve every
//! other line and replace the file atomically through a temporary sibling.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::server::{error::auth::AuthError, model::token::Token};

pub const ACCESS_TOKEN_KEY: &str = "EBAY_ACCESS_TOKEN";
pub const REFRESH_TOKEN_KEY: &str = "EBAY_REFRESH_TOKEN";

/// Persistence boundary for the live token.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Loads the persisted token, if any.
    ///
    /// Expiry is not persisted; the returned token is treated as already expired.
    async fn load(&self) -> Result<Option<Token>, AuthError>;

    /// Persists the token, replacing whatever was stored before.
    async fn save(&self, token: &Token) -> Result<(), AuthError>;
}

/// `TokenStore` backed by an env-style file.
pub struct EnvFileTokenStore {
    path: PathBuf,
}

impl EnvFileTokenStore {
    /// Creates a store for the file at `path`. The file need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Reads the file, returning an empty string when it does not exist.
    async fn read_contents(&self) -> Result<String, AuthError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => Ok(contents),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(AuthError::TokenStore(format!(
                "failed to read {}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}

#[async_trait]
impl TokenStore for EnvFileTokenStore {
    async fn load(&self) -> Result<Option<Token>, AuthError> {
        let contents = self.read_contents().await?;

        let mut access_token = None;
        let mut refresh_token = None;
        for item in dotenvy::from_read_iter(contents.as_bytes()) {
            let (key, value) = item.map_err(|e| {
                AuthError::TokenStore(format!("failed to parse {}: {}", self.path.display(), e))
            })?;
            if value.is_empty() {
                continue;
            }
            match key.as_str() {
                ACCESS_TOKEN_KEY => access_token = Some(value),
                REFRESH_TOKEN_KEY => refresh_token = Some(value),
                _ => {}
            }
        }

        if access_token.is_none() && refresh_token.is_none() {
            return Ok(None);
        }

        Ok(Some(Token::restored(
            access_token.unwrap_or_default(),
            refresh_token,
        )))
    }

    async fn save(&self, token: &Token) -> Result<(), AuthError> {
        let contents = self.read_contents().await?;

        let mut updates = vec![(ACCESS_TOKEN_KEY, token.access_token.as_str())];
        if let Some(refresh_token) = token.refresh_token.as_deref() {
            updates.push((REFRESH_TOKEN_KEY, refresh_token));
        }
        let rewritten = rewrite_env(&contents, &updates);

        let mut tmp_name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_else(|| ".env".into());
        tmp_name.push(".tmp");
        let tmp_path = self.path.with_file_name(tmp_name);

        let io_err = |e: std::io::Error| {
            AuthError::TokenStore(format!("failed to write {}: {}", self.path.display(), e))
        };
        tokio::fs::write(&tmp_path, rewritten).await.map_err(io_err)?;
        tokio::fs::rename(&tmp_path, &self.path).await.map_err(io_err)?;

        tracing::debug!("Persisted marketplace token to {}", self.path.display());

        Ok(())
    }
}

/// Rewrites `KEY=value` lines for the given keys, preserving every other line.
///
/// Keys already present (optionally prefixed with `export `) are replaced in place; missing
/// keys are appended. Values are single-quoted so marketplace tokens containing `#` or `^`
/// survive a reload.
///
/// # Arguments
/// - `contents` - Current file contents
/// - `updates` - Key/value pairs to write
///
/// # Returns
/// - `String` - New file contents, always newline-terminated
pub fn rewrite_env(contents: &str, updates: &[(&str, &str)]) -> String {
    let mut written = vec![false; updates.len()];
    let mut lines: Vec<String> = Vec::new();

    for line in contents.lines() {
        let key = line
            .trim_start()
            .trim_start_matches("export ")
            .split('=')
            .next()
            .map(str::trim);

        let update = key.and_then(|key| updates.iter().position(|(k, _)| *k == key));
        match update {
            Some(index) if line.contains('=') => {
                if !written[index] {
                    let (key, value) = updates[index];
                    lines.push(format_line(key, value));
                    written[index] = true;
                }
            }
            _ => lines.push(line.to_string()),
        }
    }

    for (index, (key, value)) in updates.iter().enumerate() {
        if !written[index] {
            lines.push(format_line(key, value));
        }
    }

    let mut output = lines.join("\n");
    output.push('\n');
    output
}

fn format_line(key: &str, value: &str) -> String {
    if value.contains('\'') {
        let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
        format!("{}=\"{}\"", key, escaped)
    } else {
        format!("{}='{}'", key, value)
    }
}
