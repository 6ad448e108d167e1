//! Notification destination records owned by the marketplace's notification API.

use serde::{Deserialize, Serialize};

/// Delivery target of a notification destination.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryConfig {
    #[serde(default)]
    pub endpoint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verify_token: Option<String>,
}

/// A topic the destination is subscribed to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub topic_name: String,
}

/// A notification destination as returned by the list endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    #[serde(default)]
    pub destination_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub delivery_config: DeliveryConfig,
    #[serde(default)]
    pub topics: Vec<Topic>,
}

/// Request body for creating a destination.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubscriptionParam {
    pub name: String,
    pub status: String,
    pub delivery_config: DeliveryConfig,
    pub topics: Vec<Topic>,
}

/// Envelope of the list endpoint.
#[derive(Debug, Deserialize)]
pub struct SubscriptionList {
    #[serde(default)]
    pub destinations: Vec<Subscription>,
}
