use serenity::all::{Context, EventHandler, Interaction, Ready};
use serenity::async_trait;
use std::sync::Arc;

use crate::server::{
    config::MarketplaceEnvironment,
    service::{
        authorization::AuthorizationFlow, subscription::SubscriptionService, token::TokenManager,
    },
};

pub mod interaction;
pub mod ready;

/// Discord bot event handler
pub struct Handler {
    pub auth_flow: Arc<AuthorizationFlow>,
    pub tokens: Arc<TokenManager>,
    pub subscriptions: Arc<SubscriptionService>,
    pub environment: MarketplaceEnvironment,
    /// Scopes requested on authorization.
    pub requested_scopes: Vec<String>,
    /// Verify token registered with new notification destinations.
    pub verify_token: String,
    /// Endpoint used by `/webhook-subscribe` when no URL is given.
    pub webhook_endpoint_url: Option<String>,
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(ctx, ready).await;
    }

    /// Called for slash commands and other interactions
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        interaction::handle_interaction(self, ctx, interaction).await;
    }
}
