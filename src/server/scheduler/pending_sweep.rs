use std::sync::Arc;
use std::time::Duration;

use crate::server::{
    error::AppError, scheduler::TaskScheduler, service::authorization::AuthorizationFlow,
};

/// Time between sweeps of expired pending authorizations.
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Registers the sweep of pending authorizations older than their lifetime.
pub async fn start_pending_sweep(
    scheduler: &TaskScheduler,
    flow: Arc<AuthorizationFlow>,
) -> Result<(), AppError> {
    scheduler
        .every("pending-sweep", SWEEP_INTERVAL, move || {
            let flow = flow.clone();

            async move {
                let swept = flow.sweep_expired().await;
                if swept > 0 {
                    tracing::info!("Removed {} expired pending authorizations", swept);
                }

                Ok(())
            }
        })
        .await
}
