use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::server::{error::AppError, scheduler::TaskScheduler};


/// Tests that a registered job runs repeatedly.
///
/// Expected: at least two ticks within three and a half intervals
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn runs_job_repeatedly() {
    let scheduler = TaskScheduler::new().await.unwrap();
    let ticks = Arc::new(AtomicUsize::new(0));

    let counter = ticks.clone();
    scheduler
        .every("counter", Duration::from_secs(1), move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        })
        .await
        .unwrap();
    scheduler.start().await.unwrap();

    tokio::time::sleep(Duration::from_millis(3500)).await;
    scheduler.shutdown().await.unwrap();

    assert!(ticks.load(Ordering::SeqCst) >= 2);
}

/// Tests that a failing tick does not stop the job.
///
/// Expected: the job keeps running after its first failure
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn failing_tick_keeps_schedule() {
    let scheduler = TaskScheduler::new().await.unwrap();
    let ticks = Arc::new(AtomicUsize::new(0));

    let counter = ticks.clone();
    scheduler
        .every("failing", Duration::from_secs(1), move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(AppError::BadRequest("tick failed".to_string()))
            }
        })
        .await
        .unwrap();
    scheduler.start().await.unwrap();

    tokio::time::sleep(Duration::from_millis(3500)).await;
    scheduler.shutdown().await.unwrap();

    assert!(ticks.load(Ordering::SeqCst) >= 2);
}
