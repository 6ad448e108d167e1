use serenity::all::{CommandInteraction, Context};
use std::sync::Arc;

use crate::server::{
    bot::{awaiter::DiscordFollowupAwaiter, handler::Handler},
    error::{auth::AuthError, AppError},
    model::token::Token,
    service::authorization::{AuthorizationFlow, PENDING_TTL},
};

use super::{edit, option_str};

/// `/ebay-authorize`: starts the consent flow and hands out the authorization URL.
///
/// The outcome arrives later as a followup once the consent redirect hits the callback route.
pub async fn authorize(
    handler: &Handler,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    command.defer_ephemeral(&ctx.http).await?;

    let state = AuthorizationFlow::generate_state();
    let url = handler.auth_flow.build_authorization_url(&state);

    let awaiter = Arc::new(DiscordFollowupAwaiter::new(
        ctx.http.clone(),
        command.clone(),
    ));
    handler.auth_flow.register_pending(state, awaiter).await;

    edit(ctx, command, authorize_message(url.as_str())).await
}

/// `/ebay-code`: exchanges a code pasted from the redirect URL.
pub async fn code(
    handler: &Handler,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let Some(code) = option_str(command, "code") else {
        return Err(AppError::BadRequest("Missing authorization code".to_string()));
    };

    command.defer_ephemeral(&ctx.http).await?;

    let content = match handler.auth_flow.exchange_manual_code(code).await {
        Ok(token) => code_success_message(&token),
        Err(AuthError::ExchangeFailed(reason)) => code_failure_message(&reason),
        Err(e) => return Err(e.into()),
    };

    edit(ctx, command, content).await
}

fn authorize_message(url: &str) -> String {
    format!(
        "🔐 **eBay Authorization**\n\n\
         Click the link below and sign in:\n\n{}\n\n\
         You'll be notified here when the authorization completes.\n\n\
         ⏱️ This link expires in {} minutes.",
        url,
        PENDING_TTL.as_secs() / 60
    )
}

fn code_success_message(token: &Token) -> String {
    let refresh = if token.refresh_token.is_some() {
        "The bot will refresh the token automatically."
    } else {
        "⚠️ No refresh token was issued; the token cannot be renewed once it expires."
    };

    format!(
        "✅ **Authorization Successful!**\n\nAccess token saved, expires <t:{}:R>.\n{}",
        token.expires_at.timestamp(),
        refresh
    )
}

fn code_failure_message(reason: &str) -> String {
    format!(
        "❌ Failed to exchange code for tokens: {}\n\n💡 Tips:\n\
         - Copy the ENTIRE code value from the URL (it's very long)\n\
         - The code starts after `code=` and ends before `&expires_in`\n\
         - It should look like: `v^1.1#i^1#f^0#I^3...`\n\
         - Codes expire after a few minutes; run `/ebay-authorize` for a fresh one",
        reason
    )
}
