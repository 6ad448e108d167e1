//! Background jobs.
//!
//! `TaskScheduler` wraps a single `tokio_cron_scheduler::JobScheduler` owned by `main`. Every
//! periodic task of the bot is registered on it before `start`, and `shutdown` stops them all
//! when the process exits. Each tick runs as its own task; an error returned by one tick is
//! logged and the job keeps its schedule.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::error::AppError;

pub mod pending_sweep;
pub mod token_refresh;

#[cfg(test)]
mod test;

pub struct TaskScheduler {
    scheduler: JobScheduler,
}

impl TaskScheduler {
    pub async fn new() -> Result<Self, AppError> {
        let scheduler = JobScheduler::new().await?;

        Ok(Self { scheduler })
    }

    /// Registers `job` to run every `interval`, first after one interval has elapsed.
    ///
    /// # Arguments
    /// - `name` - Job name used in logs
    /// - `interval` - Time between ticks
    /// - `job` - Produces the future run on each tick
    ///
    /// # Returns
    /// - `Ok(())` - Job registered
    /// - `Err(AppError::SchedulerErr)` - The scheduler rejected the job
    pub async fn every<F, Fut>(
        &self,
        name: &'static str,
        interval: Duration,
        job: F,
    ) -> Result<(), AppError>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), AppError>> + Send + 'static,
    {
        let job = Arc::new(job);

        let job = Job::new_repeated_async(interval, move |_uuid, _lock| {
            let job = job.clone();

            Box::pin(async move {
                if let Err(e) = (*job)().await {
                    tracing::error!("Scheduled job {} failed: {}", name, e);
                }
            })
        })?;

        self.scheduler.add(job).await?;
        tracing::debug!("Scheduled job {} every {:?}", name, interval);

        Ok(())
    }

    pub async fn start(&self) -> Result<(), AppError> {
        self.scheduler.start().await?;

        tracing::info!("Task scheduler started");

        Ok(())
    }

    /// Stops every job. Ticks already running are not awaited.
    pub async fn shutdown(&self) -> Result<(), AppError> {
        let mut scheduler = self.scheduler.clone();
        scheduler.shutdown().await?;

        tracing::info!("Task scheduler stopped");

        Ok(())
    }
}
