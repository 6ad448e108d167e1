//! Client for the marketplace's notification destination API.
//!
//! Destinations are owned remotely; nothing is cached locally. Every call fetches a valid
//! token from the `TokenManager` first.

use std::sync::Arc;

use crate::server::{
    error::AppError,
    model::{
        notification::EventKind,
        subscription::{
            CreateSubscriptionParam, DeliveryConfig, Subscription, SubscriptionList, Topic,
        },
    },
    service::token::TokenManager,
};

const DESTINATION_PATH: &str = "/commerce/notification/v1/destination";
const DESTINATION_NAME: &str = "Discord_Bot_Notifications";

pub struct SubscriptionService {
    http_client: reqwest::Client,
    tokens: Arc<TokenManager>,
    api_url: String,
}

impl SubscriptionService {
    /// # Arguments
    /// - `http_client` - Shared HTTP client
    /// - `tokens` - Source of bearer tokens
    /// - `api_url` - Marketplace API base URL
    pub fn new(http_client: reqwest::Client, tokens: Arc<TokenManager>, api_url: String) -> Self {
        Self {
            http_client,
            tokens,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    /// Topics subscribed to by default: every event type with a dedicated presentation.
    pub fn default_topics() -> Vec<String> {
        EventKind::known()
            .iter()
            .map(|kind| kind.as_str().to_string())
            .collect()
    }

    /// Creates a notification destination delivering to `endpoint`.
    ///
    /// # Returns
    /// - `Ok(())` - Destination created
    /// - `Err(AppError::AuthErr)` - No valid token
    /// - `Err(AppError::Upstream)` - Marketplace rejected the request
    /// - `Err(AppError::ReqwestErr)` - Transport failure
    pub async fn create(
        &self,
        endpoint: &str,
        verify_token: &str,
        topics: &[String],
    ) -> Result<(), AppError> {
        let token = self.tokens.get_valid_token().await?;

        let param = CreateSubscriptionParam {
            name: DESTINATION_NAME.to_string(),
            status: "ENABLED".to_string(),
            delivery_config: DeliveryConfig {
                endpoint: endpoint.to_string(),
                verify_token: Some(verify_token.to_string()),
            },
            topics: topics
                .iter()
                .map(|topic| Topic {
                    topic_name: topic.clone(),
                })
                .collect(),
        };

        let response = self
            .http_client
            .post(format!("{}{}", self.api_url, DESTINATION_PATH))
            .bearer_auth(&token.access_token)
            .json(&param)
            .send()
            .await?;
        Self::ensure_success(response).await?;

        tracing::info!("Created notification destination for {}", endpoint);

        Ok(())
    }

    /// Lists notification destinations.
    pub async fn list(&self) -> Result<Vec<Subscription>, AppError> {
        let token = self.tokens.get_valid_token().await?;

        let response = self
            .http_client
            .get(format!("{}{}", self.api_url, DESTINATION_PATH))
            .bearer_auth(&token.access_token)
            .send()
            .await?;
        let response = Self::ensure_success(response).await?;

        let list: SubscriptionList = response.json().await?;
        Ok(list.destinations)
    }

    /// Deletes the destination with the given ID.
    pub async fn delete(&self, destination_id: &str) -> Result<(), AppError> {
        if destination_id.is_empty() || destination_id.contains('/') {
            return Err(AppError::BadRequest(format!(
                "Invalid destination ID '{}'",
                destination_id
            )));
        }

        let token = self.tokens.get_valid_token().await?;

        let response = self
            .http_client
            .delete(format!(
                "{}{}/{}",
                self.api_url, DESTINATION_PATH, destination_id
            ))
            .bearer_auth(&token.access_token)
            .send()
            .await?;
        Self::ensure_success(response).await?;

        tracing::info!("Deleted notification destination {}", destination_id);

        Ok(())
    }

    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, AppError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(AppError::Upstream {
            status: status.as_u16(),
            body,
        })
    }
}
