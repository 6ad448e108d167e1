use serenity::all::{Client, GatewayIntents, Http};
use std::sync::Arc;

use crate::server::{bot::handler::Handler, config::Config, error::AppError};

/// Builds the Discord client and extracts its HTTP client.
///
/// The HTTP client is shared with the notification sink so notifications are posted through
/// the same rate-limited connection the bot uses.
///
/// # Arguments
/// - `config` - Application configuration containing the bot token
/// - `handler` - Event handler with the services the slash commands use
///
/// # Returns
/// - `Ok((Client, Arc<Http>))` - Client ready to start and its HTTP client
/// - `Err(AppError::DiscordErr)` - The client could not be built
pub async fn init_bot(config: &Config, handler: Handler) -> Result<(Client, Arc<Http>), AppError> {
    // Slash commands arrive as interactions, which need no privileged intents.
    let intents = GatewayIntents::GUILDS;

    let client = Client::builder(&config.discord_bot_token, intents)
        .event_handler(handler)
        .await?;
    let http = client.http.clone();

    Ok((client, http))
}

/// Runs the Discord bot until its shards shut down.
///
/// Should be called from within a spawned task since it blocks until the bot stops.
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    tracing::info!("Starting Discord bot");

    client.start().await?;

    Ok(())
}
