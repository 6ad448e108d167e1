//! Presentation and delivery of inbound notifications.
//!
//! Each event type maps to a fixed title, description and color; unknown types get a generic
//! presentation naming the raw type. Metadata becomes inline fields. Delivery goes through a
//! `NotificationSink` so the HTTP layer never depends on Discord directly.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use std::sync::Arc;

use crate::server::{
    error::AppError,
    model::notification::{EventKind, Presentation, PresentationField, WebhookNotification},
    util::parse::truncate_chars,
};

/// Maximum number of fields on a Discord embed.
pub const MAX_FIELDS: usize = 25;
/// Maximum length of a Discord embed field value.
pub const MAX_FIELD_VALUE_CHARS: usize = 1024;

const GREEN: u32 = 0x00ff00;
const BLUE: u32 = 0x3498db;
const ORANGE: u32 = 0xffaa00;
const DARK_ORANGE: u32 = 0xff6600;
const DEFAULT_BLUE: u32 = 0x0099ff;

/// Destination for presented notifications.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn send(&self, channel_id: u64, presentation: Presentation) -> Result<(), AppError>;
}

/// Renders a notification for the sink.
///
/// # Arguments
/// - `notification` - Parsed inbound notification
///
/// # Returns
/// - `Presentation` - Title, description and color from the event table, one inline field per
///   metadata entry (at most `MAX_FIELDS`, values truncated to `MAX_FIELD_VALUE_CHARS`)
pub fn present(notification: &WebhookNotification) -> Presentation {
    let (title, description, color) = match &notification.event_type {
        EventKind::ItemSold => ("💰 Item Sold!", "You have a new sale!".to_string(), GREEN),
        EventKind::OrderPaymentReceived => (
            "💵 Payment Received",
            "Payment has been received for an order".to_string(),
            GREEN,
        ),
        EventKind::OrderShipped => (
            "📦 Order Shipped",
            "An order has been marked as shipped".to_string(),
            BLUE,
        ),
        EventKind::OfferReceived => (
            "💬 Offer Received",
            "You have received a new offer from a buyer".to_string(),
            ORANGE,
        ),
        EventKind::OfferCountered => (
            "💬 Offer Countered",
            "A buyer has countered your offer".to_string(),
            ORANGE,
        ),
        EventKind::ListingEnded => (
            "⏰ Listing Ended",
            "One of your listings has ended".to_string(),
            DARK_ORANGE,
        ),
        EventKind::Unknown(raw) => (
            "🔔 eBay Notification",
            format!("Event: {}", raw),
            DEFAULT_BLUE,
        ),
    };

    if notification.metadata.len() > MAX_FIELDS {
        tracing::debug!(
            "Notification {} has {} metadata entries, presenting the first {}",
            notification.notification_id,
            notification.metadata.len(),
            MAX_FIELDS
        );
    }

    let fields = notification
        .metadata
        .iter()
        .take(MAX_FIELDS)
        .map(|(key, value)| PresentationField {
            name: key.clone(),
            value: truncate_chars(&field_value(value), MAX_FIELD_VALUE_CHARS),
            inline: true,
        })
        .collect();

    Presentation {
        title: title.to_string(),
        description,
        color,
        fields,
        timestamp: Utc::now(),
    }
}

/// Strings are shown unquoted; everything else as compact JSON.
fn field_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Sends presented notifications to the configured channel.
pub struct NotificationDispatcher {
    sink: Arc<dyn NotificationSink>,
    channel_id: Option<u64>,
}

impl NotificationDispatcher {
    pub fn new(sink: Arc<dyn NotificationSink>, channel_id: Option<u64>) -> Self {
        Self { sink, channel_id }
    }

    /// Presents the notification and sends it to the configured channel.
    ///
    /// Sink errors are logged and never retried. Without a configured channel the
    /// notification is dropped with a warning.
    pub async fn dispatch(&self, notification: WebhookNotification) {
        let Some(channel_id) = self.channel_id else {
            tracing::warn!(
                "No notification channel configured, dropping {} notification {}",
                notification.event_type,
                notification.notification_id
            );
            return;
        };

        let presentation = present(&notification);
        match self.sink.send(channel_id, presentation).await {
            Ok(()) => tracing::info!(
                "Delivered {} notification {} to channel {}",
                notification.event_type,
                notification.notification_id,
                channel_id
            ),
            Err(e) => tracing::error!(
                "Failed to deliver {} notification {} to channel {}: {}",
                notification.event_type,
                notification.notification_id,
                channel_id,
                e
            ),
        }
    }

    /// Dispatches on a background task so the caller never waits for delivery.
    pub fn spawn_dispatch(self: &Arc<Self>, notification: WebhookNotification) {
        let dispatcher = Arc::clone(self);
        tokio::spawn(async move {
            dispatcher.dispatch(notification).await;
        });
    }
}
