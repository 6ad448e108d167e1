use std::path::PathBuf;

use crate::server::{
    error::{config::ConfigError, AppError},
    service::webhook::SignatureMode,
};

const SANDBOX_AUTH_URL: &str = "https://auth.sandbox.ebay.com/oauth2/authorize";
const SANDBOX_TOKEN_URL: &str = "https://api.sandbox.ebay.com/identity/v1/oauth2/token";
const SANDBOX_API_URL: &str = "https://api.sandbox.ebay.com";

const PRODUCTION_AUTH_URL: &str = "https://auth.ebay.com/oauth2/authorize";
const PRODUCTION_TOKEN_URL: &str = "https://api.ebay.com/identity/v1/oauth2/token";
const PRODUCTION_API_URL: &str = "https://api.ebay.com";

/// Placeholder verify token used when none is configured.
pub const DEFAULT_VERIFY_TOKEN: &str = "default_verify_token_change_me";

const DEFAULT_WEBHOOK_PORT: u16 = 8080;
const DEFAULT_REFRESH_INTERVAL_MINUTES: u64 = 90;
const DEFAULT_SAFETY_MARGIN_SECONDS: i64 = 300;
const DEFAULT_ENV_FILE: &str = ".env";

/// Marketplace environment the bot talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketplaceEnvironment {
    Sandbox,
    Production,
}

impl MarketplaceEnvironment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sandbox => "SANDBOX",
            Self::Production => "PRODUCTION",
        }
    }

    pub fn auth_url(&self) -> &'static str {
        match self {
            Self::Sandbox => SANDBOX_AUTH_URL,
            Self::Production => PRODUCTION_AUTH_URL,
        }
    }

    pub fn token_url(&self) -> &'static str {
        match self {
            Self::Sandbox => SANDBOX_TOKEN_URL,
            Self::Production => PRODUCTION_TOKEN_URL,
        }
    }

    pub fn api_url(&self) -> &'static str {
        match self {
            Self::Sandbox => SANDBOX_API_URL,
            Self::Production => PRODUCTION_API_URL,
        }
    }
}

pub struct Config {
    pub discord_bot_token: String,

    pub ebay_app_id: String,
    pub ebay_cert_id: String,
    /// RuName registered for the app; sent as `redirect_uri`.
    pub ebay_redirect_uri: String,
    pub ebay_environment: MarketplaceEnvironment,
    pub ebay_access_token: Option<String>,
    pub ebay_refresh_token: Option<String>,

    pub ebay_auth_url: String,
    pub ebay_token_url: String,
    pub ebay_api_url: String,

    pub webhook_port: u16,
    pub webhook_verify_token: String,
    pub webhook_signature_mode: SignatureMode,
    /// Endpoint string hashed into challenge responses. Falls back to the request path.
    pub webhook_endpoint_url: Option<String>,
    pub notification_channel_id: Option<u64>,

    pub token_refresh_interval: std::time::Duration,
    pub token_safety_margin: chrono::Duration,
    pub env_file: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    ///
    /// # Arguments
    /// - `lookup` - Returns the value of the named variable, if set
    ///
    /// # Returns
    /// - `Ok(Config)` - Parsed configuration
    /// - `Err(AppError::ConfigErr)` - A required variable is missing or a value is invalid
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let require = |key: &str| get(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()));

        let ebay_environment = match get("EBAY_ENVIRONMENT") {
            None => MarketplaceEnvironment::Sandbox,
            Some(value) => match value.to_uppercase().as_str() {
                "SANDBOX" => MarketplaceEnvironment::Sandbox,
                "PRODUCTION" => MarketplaceEnvironment::Production,
                _ => {
                    return Err(invalid("EBAY_ENVIRONMENT", &value, "expected SANDBOX or PRODUCTION").into())
                }
            },
        };

        let webhook_verify_token = get("WEBHOOK_VERIFY_TOKEN").unwrap_or_else(|| {
            tracing::warn!(
                "WEBHOOK_VERIFY_TOKEN not set, using the insecure default verify token"
            );
            DEFAULT_VERIFY_TOKEN.to_string()
        });

        let webhook_signature_mode = match get("WEBHOOK_REQUIRE_SIGNATURE") {
            None => SignatureMode::Relaxed,
            Some(value) => {
                if parse_bool("WEBHOOK_REQUIRE_SIGNATURE", &value)? {
                    SignatureMode::Strict
                } else {
                    SignatureMode::Relaxed
                }
            }
        };

        let notification_channel_id = get("NOTIFICATION_CHANNEL_ID")
            .map(|value| parse_number::<u64>("NOTIFICATION_CHANNEL_ID", &value))
            .transpose()?;
        if notification_channel_id == Some(0) {
            return Err(invalid("NOTIFICATION_CHANNEL_ID", "0", "must be a Discord channel ID").into());
        }

        let refresh_minutes = get("TOKEN_REFRESH_INTERVAL_MINUTES")
            .map(|value| parse_number::<u64>("TOKEN_REFRESH_INTERVAL_MINUTES", &value))
            .transpose()?
            .unwrap_or(DEFAULT_REFRESH_INTERVAL_MINUTES);
        if refresh_minutes == 0 {
            return Err(invalid("TOKEN_REFRESH_INTERVAL_MINUTES", "0", "must be positive").into());
        }

        let margin_seconds = get("TOKEN_SAFETY_MARGIN_SECONDS")
            .map(|value| parse_number::<i64>("TOKEN_SAFETY_MARGIN_SECONDS", &value))
            .transpose()?
            .unwrap_or(DEFAULT_SAFETY_MARGIN_SECONDS);
        if margin_seconds < 0 {
            return Err(invalid(
                "TOKEN_SAFETY_MARGIN_SECONDS",
                &margin_seconds.to_string(),
                "must not be negative",
            )
            .into());
        }

        Ok(Self {
            discord_bot_token: require("DISCORD_BOT_TOKEN")?,
            ebay_app_id: require("EBAY_APP_ID")?,
            ebay_cert_id: get("EBAY_CERT_ID").unwrap_or_default(),
            ebay_redirect_uri: get("EBAY_REDIRECT_URI").unwrap_or_default(),
            ebay_environment,
            ebay_access_token: get("EBAY_ACCESS_TOKEN"),
            ebay_refresh_token: get("EBAY_REFRESH_TOKEN"),
            ebay_auth_url: ebay_environment.auth_url().to_string(),
            ebay_token_url: ebay_environment.token_url().to_string(),
            ebay_api_url: ebay_environment.api_url().to_string(),
            webhook_port: get("WEBHOOK_PORT")
                .map(|value| parse_number::<u16>("WEBHOOK_PORT", &value))
                .transpose()?
                .unwrap_or(DEFAULT_WEBHOOK_PORT),
            webhook_verify_token,
            webhook_signature_mode,
            webhook_endpoint_url: get("WEBHOOK_ENDPOINT_URL"),
            notification_channel_id,
            token_refresh_interval: std::time::Duration::from_secs(refresh_minutes * 60),
            token_safety_margin: chrono::Duration::seconds(margin_seconds),
            env_file: PathBuf::from(get("ENV_FILE").unwrap_or_else(|| DEFAULT_ENV_FILE.to_string())),
        })
    }
}

fn invalid(key: &str, value: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_number<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| invalid(key, value, &e.to_string()))
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(invalid(key, value, "expected true or false")),
    }
}
