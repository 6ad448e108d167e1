//! Reports authorization outcomes back to the slash command that started the flow.

use async_trait::async_trait;
use serenity::all::{CommandInteraction, CreateInteractionResponseFollowup, Http};
use std::sync::Arc;

use crate::server::{
    model::authorization::AuthorizationOutcome, service::authorization::AuthorizationAwaiter,
};

/// Sends the outcome as an ephemeral followup to the `/ebay-authorize` interaction.
///
/// Interaction tokens stay valid for 15 minutes, longer than a pending authorization lives.
pub struct DiscordFollowupAwaiter {
    http: Arc<Http>,
    interaction: CommandInteraction,
}

impl DiscordFollowupAwaiter {
    pub fn new(http: Arc<Http>, interaction: CommandInteraction) -> Self {
        Self { http, interaction }
    }
}

#[async_trait]
impl AuthorizationAwaiter for DiscordFollowupAwaiter {
    async fn notify(&self, outcome: AuthorizationOutcome) {
        let followup = CreateInteractionResponseFollowup::new()
            .content(outcome_message(&outcome))
            .ephemeral(true);

        if let Err(e) = self.interaction.create_followup(&self.http, followup).await {
            tracing::warn!("Failed to send authorization followup: {}", e);
        }
    }
}

/// Message shown to the operator for an authorization outcome.
pub fn outcome_message(outcome: &AuthorizationOutcome) -> String {
    match outcome {
        AuthorizationOutcome::Authorized {
            expires_at,
            has_refresh_token,
        } => {
            let refresh = if *has_refresh_token {
                "💡 The bot will refresh the token automatically."
            } else {
                "⚠️ No refresh token was issued; run `/ebay-authorize` again when the token expires."
            };

            format!(
                "✅ **Authorization Successful!**\n\nYour eBay account has been connected.\n\
                 Access token expires <t:{}:R>.\n\n{}",
                expires_at.timestamp(),
                refresh
            )
        }
        AuthorizationOutcome::ExchangeFailed(reason) => format!(
            "❌ **Failed to get access token:** {}\n\n\
             Try `/ebay-authorize` again or use `/ebay-code` for manual entry.",
            reason
        ),
        AuthorizationOutcome::Denied(reason) => format!(
            "❌ **Authorization failed:** {}\n\n💡 Try again with `/ebay-authorize`",
            reason
        ),
    }
}
