//! Slash commands.
//!
//! `definitions` is registered on ready; `run` routes an invocation by name. Commands that
//! call the marketplace defer first, since the token endpoint may need a refresh before the
//! actual request.

use serenity::all::{
    CommandInteraction, CommandOptionType, Context, CreateCommand, CreateCommandOption,
    CreateInteractionResponse, CreateInteractionResponseMessage, EditInteractionResponse,
};

use crate::server::{
    bot::handler::Handler,
    error::{auth::AuthError, AppError},
    util::parse::truncate_chars,
};

pub mod authorize;
pub mod status;
pub mod webhook;

/// Discord's limit on message content.
const MAX_MESSAGE_CHARS: usize = 2000;

/// Every slash command the bot registers.
pub fn definitions() -> Vec<CreateCommand> {
    vec![
        CreateCommand::new("ebay-status").description("Check eBay API connection status"),
        CreateCommand::new("ebay-scopes")
            .description("Check what API scopes your OAuth token has"),
        CreateCommand::new("ebay-authorize")
            .description("Authorize bot with your eBay account (get refresh token)"),
        CreateCommand::new("ebay-code")
            .description("Submit eBay authorization code manually")
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "code",
                    "Authorization code from eBay redirect URL",
                )
                .required(true),
            ),
        CreateCommand::new("webhook-subscribe")
            .description("Subscribe to eBay notifications (orders, offers, etc)")
            .add_option(CreateCommandOption::new(
                CommandOptionType::String,
                "url",
                "Webhook URL (leave empty to use the configured endpoint)",
            )),
        CreateCommand::new("webhook-list").description("List active webhook subscriptions"),
        CreateCommand::new("webhook-unsubscribe")
            .description("Delete a webhook subscription")
            .add_option(
                CreateCommandOption::new(CommandOptionType::String, "id", "Destination ID")
                    .required(true),
            ),
        CreateCommand::new("webhook-test").description("Test webhook notification to this channel"),
    ]
}

/// Runs the command named by the interaction.
pub async fn run(
    handler: &Handler,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    match command.data.name.as_str() {
        "ebay-status" => status::status(handler, ctx, command).await,
        "ebay-scopes" => status::scopes(handler, ctx, command).await,
        "ebay-authorize" => authorize::authorize(handler, ctx, command).await,
        "ebay-code" => authorize::code(handler, ctx, command).await,
        "webhook-subscribe" => webhook::subscribe(handler, ctx, command).await,
        "webhook-list" => webhook::list(handler, ctx, command).await,
        "webhook-unsubscribe" => webhook::unsubscribe(handler, ctx, command).await,
        "webhook-test" => webhook::test(ctx, command).await,
        other => {
            tracing::warn!("Received unknown slash command /{}", other);
            Ok(())
        }
    }
}

/// Tells the user a command failed, whether or not it was already deferred.
pub async fn report_failure(ctx: &Context, command: &CommandInteraction, error: &AppError) {
    let content = describe_failure(error);

    let response = CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(&content)
            .ephemeral(true),
    );
    if command.create_response(&ctx.http, response).await.is_ok() {
        return;
    }

    if let Err(e) = command
        .edit_response(&ctx.http, EditInteractionResponse::new().content(content))
        .await
    {
        tracing::warn!("Failed to report command failure: {}", e);
    }
}

/// User-facing description of a command failure.
pub fn describe_failure(error: &AppError) -> String {
    match error {
        AppError::AuthErr(AuthError::TokenUnavailable | AuthError::RefreshFailed(_)) => {
            "❌ No valid eBay token.\n\nRun `/ebay-authorize` to connect your eBay account again."
                .to_string()
        }
        AppError::Upstream { status, body } => format!(
            "❌ eBay API returned {}:\n```\n{}\n```",
            status,
            truncate_chars(body, 1500)
        ),
        AppError::BadRequest(message) => format!("❌ {}", message),
        _ => "❌ Something went wrong. Check the bot logs for details.".to_string(),
    }
}

/// String value of the named option, if the user supplied one.
fn option_str<'a>(command: &'a CommandInteraction, name: &str) -> Option<&'a str> {
    command
        .data
        .options
        .iter()
        .find(|option| option.name == name)
        .and_then(|option| option.value.as_str())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

async fn reply(
    ctx: &Context,
    command: &CommandInteraction,
    content: String,
    ephemeral: bool,
) -> Result<(), AppError> {
    let response = CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(truncate_chars(&content, MAX_MESSAGE_CHARS))
            .ephemeral(ephemeral),
    );
    command.create_response(&ctx.http, response).await?;

    Ok(())
}

/// Replaces the deferred response with `content`.
async fn edit(ctx: &Context, command: &CommandInteraction, content: String) -> Result<(), AppError> {
    command
        .edit_response(
            &ctx.http,
            EditInteractionResponse::new().content(truncate_chars(&content, MAX_MESSAGE_CHARS)),
        )
        .await?;

    Ok(())
}
