use chrono::{DateTime, Utc};
use serenity::all::{CommandInteraction, Context};

use crate::server::{
    bot::handler::Handler, config::MarketplaceEnvironment, error::AppError,
    model::token::TokenStatus,
};

use super::reply;

/// `/ebay-status`
pub async fn status(
    handler: &Handler,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let status = handler.tokens.status().await;

    reply(
        ctx,
        command,
        status_message(&status, handler.environment, Utc::now()),
        false,
    )
    .await
}

/// `/ebay-scopes`
pub async fn scopes(
    handler: &Handler,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let status = handler.tokens.status().await;

    reply(
        ctx,
        command,
        scopes_message(&status, &handler.requested_scopes),
        false,
    )
    .await
}

pub fn status_message(
    status: &TokenStatus,
    environment: MarketplaceEnvironment,
    now: DateTime<Utc>,
) -> String {
    let mut message = String::from("🔍 **eBay API Status**\n\n");

    if !status.has_token {
        message.push_str(
            "❌ No access token configured. Run `/ebay-authorize` to connect your eBay account.",
        );
        return message;
    }

    message.push_str(&format!(
        "✅ Connected to eBay API ({} mode)\n",
        environment.as_str()
    ));

    match status.expires_at {
        // Tokens restored from the env file carry no expiry.
        Some(expires_at) if expires_at > DateTime::UNIX_EPOCH && expires_at > now => {
            message.push_str(&format!(
                "⏰ Access token expires <t:{}:R>\n",
                expires_at.timestamp()
            ));
        }
        Some(expires_at) if expires_at > DateTime::UNIX_EPOCH => {
            message.push_str(&format!(
                "⚠️ Access token expired <t:{}:R>\n",
                expires_at.timestamp()
            ));
        }
        _ => message.push_str("⏰ Access token expiry unknown, it is refreshed on next use\n"),
    }

    if status.has_refresh_token {
        message.push_str("🔄 Refresh token: ✅ available");
    } else {
        message.push_str("🔄 Refresh token: ❌ missing, run `/ebay-authorize` to get one");
    }

    message
}

pub fn scopes_message(status: &TokenStatus, requested: &[String]) -> String {
    let mut message = String::from("🔐 **OAuth Token Scopes**\n\n");

    if !status.has_token {
        message.push_str(
            "⚠️ No token found or unable to determine scopes.\n\n\
             Run `/ebay-authorize` to authorize the bot.",
        );
        return message;
    }

    if status.scopes.is_empty() {
        message.push_str("The token's granted scopes are unknown. These are requested:\n\n");
        for scope in requested {
            message.push_str(&format!("• `{}`\n", short_scope(scope)));
        }
        return message;
    }

    message.push_str("Your current token has these scopes:\n\n");
    for scope in &status.scopes {
        message.push_str(&format!("✅ `{}`\n", short_scope(scope)));
    }

    let missing: Vec<&str> = requested
        .iter()
        .filter(|scope| !status.scopes.contains(*scope))
        .map(|scope| short_scope(scope))
        .collect();
    if !missing.is_empty() {
        message.push_str("\n**Missing scopes:**\n");
        for scope in &missing {
            message.push_str(&format!("⚠️ `{}`\n", scope));
        }
        message.push_str("\nRun `/ebay-authorize` to re-authorize.");
    }

    message
}

/// Last path segment of a scope URL (`sell.inventory`, `api_scope`).
fn short_scope(scope: &str) -> &str {
    scope.rsplit('/').next().unwrap_or(scope)
}
