use chrono::Utc;
use serenity::all::{CommandInteraction, Context};
use url::Url;

use crate::server::{
    bot::{handler::Handler, sink::DiscordChannelSink},
    error::AppError,
    model::{
        notification::{Presentation, PresentationField},
        subscription::Subscription,
    },
    service::{notification::NotificationSink, subscription::SubscriptionService},
};

use super::{edit, option_str, reply};

/// `/webhook-test`: posts a sample notification to the invoking channel through the same
/// sink real notifications use.
pub async fn test(ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    let channel_id = command.channel_id.get();

    DiscordChannelSink::new(ctx.http.clone())
        .send(channel_id, test_presentation(channel_id))
        .await?;

    reply(
        ctx,
        command,
        format!("✅ Test notification sent to <#{}>", channel_id),
        true,
    )
    .await
}

/// `/webhook-list`
pub async fn list(
    handler: &Handler,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    command.defer_ephemeral(&ctx.http).await?;

    let destinations = handler.subscriptions.list().await?;

    edit(ctx, command, list_message(&destinations)).await
}

/// `/webhook-subscribe [url]`: creates a destination for every known event type.
pub async fn subscribe(
    handler: &Handler,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let endpoint = resolve_endpoint(
        option_str(command, "url"),
        handler.webhook_endpoint_url.as_deref(),
    )?;

    command.defer_ephemeral(&ctx.http).await?;

    let topics = SubscriptionService::default_topics();
    handler
        .subscriptions
        .create(&endpoint, &handler.verify_token, &topics)
        .await?;

    edit(
        ctx,
        command,
        format!(
            "✅ **Subscribed!**\n\nNotifications are delivered to `{}` for:\n{}",
            endpoint,
            topics
                .iter()
                .map(|topic| format!("• `{}`", topic))
                .collect::<Vec<_>>()
                .join("\n")
        ),
    )
    .await
}

/// `/webhook-unsubscribe id`
pub async fn unsubscribe(
    handler: &Handler,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let Some(destination_id) = option_str(command, "id") else {
        return Err(AppError::BadRequest("Missing destination ID".to_string()));
    };

    command.defer_ephemeral(&ctx.http).await?;

    handler.subscriptions.delete(destination_id).await?;

    edit(
        ctx,
        command,
        format!("🗑️ Deleted notification destination `{}`", destination_id),
    )
    .await
}

/// Picks the endpoint to subscribe: the given URL, else the configured one.
///
/// # Returns
/// - `Ok(String)` - Absolute https URL
/// - `Err(AppError::BadRequest)` - No URL available, or the URL is not absolute https
fn resolve_endpoint(given: Option<&str>, configured: Option<&str>) -> Result<String, AppError> {
    let endpoint = given.or(configured).ok_or_else(|| {
        AppError::BadRequest(
            "No webhook URL given and WEBHOOK_ENDPOINT_URL is not configured".to_string(),
        )
    })?;

    let url = Url::parse(endpoint)
        .map_err(|e| AppError::BadRequest(format!("Invalid webhook URL '{}': {}", endpoint, e)))?;
    if url.scheme() != "https" {
        return Err(AppError::BadRequest(format!(
            "Webhook URL '{}' must use https",
            endpoint
        )));
    }

    Ok(endpoint.to_string())
}

fn test_presentation(channel_id: u64) -> Presentation {
    Presentation {
        title: "🔔 Test Notification".to_string(),
        description: "This is a test webhook notification from your eBay bot!".to_string(),
        color: 0x00ff00,
        fields: vec![
            PresentationField {
                name: "Status".to_string(),
                value: "✅ Working".to_string(),
                inline: true,
            },
            PresentationField {
                name: "Channel".to_string(),
                value: format!("<#{}>", channel_id),
                inline: true,
            },
        ],
        timestamp: Utc::now(),
    }
}

fn list_message(destinations: &[Subscription]) -> String {
    if destinations.is_empty() {
        return "📭 No notification destinations. Use `/webhook-subscribe` to create one."
            .to_string();
    }

    let mut message = format!(
        "📋 **Notification Destinations** ({})\n\n",
        destinations.len()
    );
    for destination in destinations {
        message.push_str(&format!(
            "• `{}` {} → {}\n",
            destination.destination_id, destination.status, destination.delivery_config.endpoint
        ));
        if !destination.topics.is_empty() {
            let topics: Vec<&str> = destination
                .topics
                .iter()
                .map(|topic| topic.topic_name.as_str())
                .collect();
            message.push_str(&format!("   Topics: {}\n", topics.join(", ")));
        }
    }

    message
}
