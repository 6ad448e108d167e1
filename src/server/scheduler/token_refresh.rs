use std::sync::Arc;
use std::time::Duration;

use crate::server::{error::AppError, scheduler::TaskScheduler, service::token::TokenManager};

/// Registers the periodic token refresh.
///
/// Each tick refreshes the live token when a refresh token is held, so the token stays fresh
/// even while nothing calls the marketplace. Without a refresh token the tick does nothing.
///
/// # Arguments
/// - `scheduler` - Scheduler to register the job on
/// - `tokens` - Token manager to refresh
/// - `interval` - Time between refreshes
pub async fn start_auto_refresh(
    scheduler: &TaskScheduler,
    tokens: Arc<TokenManager>,
    interval: Duration,
) -> Result<(), AppError> {
    scheduler
        .every("token-refresh", interval, move || {
            let tokens = tokens.clone();

            async move { refresh_if_possible(&tokens).await }
        })
        .await
}

pub(super) async fn refresh_if_possible(tokens: &TokenManager) -> Result<(), AppError> {
    if !tokens.status().await.has_refresh_token {
        tracing::debug!("No marketplace refresh token, skipping scheduled refresh");
        return Ok(());
    }

    tokens.refresh().await?;

    Ok(())
}
