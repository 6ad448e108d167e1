//! Discord delivery of notification presentations.

use async_trait::async_trait;
use serenity::all::{ChannelId, CreateEmbed, CreateMessage, Http, Timestamp};
use std::sync::Arc;

use crate::server::{
    error::{internal::InternalError, AppError},
    model::notification::Presentation,
    service::notification::NotificationSink,
};

/// Posts presentations as embeds to a Discord channel.
pub struct DiscordChannelSink {
    http: Arc<Http>,
}

impl DiscordChannelSink {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl NotificationSink for DiscordChannelSink {
    async fn send(&self, channel_id: u64, presentation: Presentation) -> Result<(), AppError> {
        if channel_id == 0 {
            return Err(AppError::BadRequest("Channel ID must not be 0".to_string()));
        }

        let embed = build_embed(&presentation)?;
        ChannelId::new(channel_id)
            .send_message(&self.http, CreateMessage::new().embed(embed))
            .await?;

        Ok(())
    }
}

/// Builds the Discord embed for a presentation.
///
/// # Returns
/// - `Ok(CreateEmbed)` - Embed with title, description, color, inline fields and timestamp
/// - `Err(AppError::InternalErr)` - The presentation timestamp is out of Discord's range
pub fn build_embed(presentation: &Presentation) -> Result<CreateEmbed, AppError> {
    let timestamp =
        Timestamp::from_unix_timestamp(presentation.timestamp.timestamp()).map_err(|e| {
            InternalError::InvalidDiscordTimestamp {
                timestamp: presentation.timestamp.timestamp(),
                reason: e.to_string(),
            }
        })?;

    let embed = CreateEmbed::new()
        .title(&presentation.title)
        .description(&presentation.description)
        .color(presentation.color)
        .fields(
            presentation
                .fields
                .iter()
                .map(|field| (field.name.clone(), field.value.clone(), field.inline)),
        )
        .timestamp(timestamp);

    Ok(embed)
}
