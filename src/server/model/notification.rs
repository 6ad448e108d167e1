//! Inbound webhook notification models.
//!
//! A `WebhookNotification` is parsed once from the request body, presented as a
//! `Presentation` and handed to the notification sink. Nothing here is persisted.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;

use crate::server::error::webhook::WebhookError;

/// Marketplace event types the bot presents with a dedicated embed.
///
/// Any other event type string is kept verbatim in `Unknown` and presented generically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    ItemSold,
    OrderPaymentReceived,
    OrderShipped,
    OfferReceived,
    OfferCountered,
    ListingEnded,
    Unknown(String),
}

impl EventKind {
    /// Wire name of the event type.
    pub fn as_str(&self) -> &str {
        match self {
            Self::ItemSold => "ITEM_SOLD",
            Self::OrderPaymentReceived => "ORDER_PAYMENT_RECEIVED",
            Self::OrderShipped => "ORDER_SHIPPED",
            Self::OfferReceived => "OFFER_RECEIVED",
            Self::OfferCountered => "OFFER_COUNTERED",
            Self::ListingEnded => "LISTING_ENDED",
            Self::Unknown(raw) => raw,
        }
    }

    /// Every event type with a dedicated presentation.
    pub fn known() -> [EventKind; 6] {
        [
            Self::ItemSold,
            Self::OrderPaymentReceived,
            Self::OrderShipped,
            Self::OfferReceived,
            Self::OfferCountered,
            Self::ListingEnded,
        ]
    }
}

impl From<&str> for EventKind {
    fn from(value: &str) -> Self {
        match value {
            "ITEM_SOLD" => Self::ItemSold,
            "ORDER_PAYMENT_RECEIVED" => Self::OrderPaymentReceived,
            "ORDER_SHIPPED" => Self::OrderShipped,
            "OFFER_RECEIVED" => Self::OfferReceived,
            "OFFER_COUNTERED" => Self::OfferCountered,
            "LISTING_ENDED" => Self::ListingEnded,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Notification body as sent by the marketplace. Every field is optional on the wire.
#[derive(Deserialize, Default)]
struct NotificationPayload {
    #[serde(rename = "notificationEventType", default)]
    event_type: Option<String>,
    #[serde(rename = "notificationId", default)]
    notification_id: Option<String>,
    #[serde(rename = "publishDate", default)]
    publish_date: Option<String>,
    #[serde(default)]
    metadata: Option<Map<String, Value>>,
}

/// A parsed inbound notification.
#[derive(Debug, Clone, PartialEq)]
pub struct WebhookNotification {
    pub event_type: EventKind,
    pub notification_id: String,
    pub publish_date: String,
    pub metadata: Map<String, Value>,
}

impl WebhookNotification {
    /// Parses a raw request body.
    ///
    /// A missing event type parses as `Unknown("")` and missing metadata as an empty map.
    ///
    /// # Arguments
    /// - `body` - Raw request body bytes
    ///
    /// # Returns
    /// - `Ok(WebhookNotification)` - Parsed notification
    /// - `Err(WebhookError::MalformedPayload)` - Body is not a JSON object of the expected shape
    pub fn from_json(body: &[u8]) -> Result<Self, WebhookError> {
        // `null` is valid JSON and carries nothing, same as `{}`.
        let payload: Option<NotificationPayload> = serde_json::from_slice(body)
            .map_err(|e| WebhookError::MalformedPayload(e.to_string()))?;
        let payload = payload.unwrap_or_default();

        Ok(Self {
            event_type: EventKind::from(payload.event_type.as_deref().unwrap_or_default()),
            notification_id: payload.notification_id.unwrap_or_default(),
            publish_date: payload.publish_date.unwrap_or_default(),
            metadata: payload.metadata.unwrap_or_default(),
        })
    }
}

/// A single `name = value` line of a presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentationField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// Sink-agnostic rendering of a notification; the Discord sink turns it into an embed.
#[derive(Debug, Clone, PartialEq)]
pub struct Presentation {
    pub title: String,
    pub description: String,
    /// RGB color as `0xRRGGBB`.
    pub color: u32,
    pub fields: Vec<PresentationField>,
    pub timestamp: DateTime<Utc>,
}
