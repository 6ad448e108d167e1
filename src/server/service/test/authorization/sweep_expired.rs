use super::*;

/// Tests sweeping an authorization older than the pending lifetime.
///
/// Verifies that the entry is removed without notifying its awaiter and that a late callback
/// for it is rejected.
///
/// Expected: one entry swept, no outcome, later completion Err(UnknownState)
#[tokio::test(start_paused = true)]
async fn removes_entries_older_than_ttl() {
    let dir = tempfile::tempdir().unwrap();
    let flow = offline_flow(&dir);
    let awaiter = RecordingAwaiter::new();
    flow.register_pending("state-1".to_string(), awaiter.clone())
        .await;

    tokio::time::advance(std::time::Duration::from_secs(11 * 60)).await;
    let swept = flow.sweep_expired().await;

    assert_eq!(swept, 1);
    assert_eq!(flow.pending_count().await, 0);
    assert!(awaiter.outcomes().is_empty());
    assert!(matches!(
        flow.complete_with_error("state-1", "access_denied").await,
        Err(AuthError::UnknownState(_))
    ));
}

/// Tests sweeping entries that are still within their lifetime.
///
/// Expected: nothing swept
#[tokio::test(start_paused = true)]
async fn keeps_fresh_entries() {
    let dir = tempfile::tempdir().unwrap();
    let flow = offline_flow(&dir);
    flow.register_pending("state-1".to_string(), RecordingAwaiter::new())
        .await;

    tokio::time::advance(PENDING_TTL / 2).await;

    assert_eq!(flow.sweep_expired().await, 0);
    assert_eq!(flow.pending_count().await, 1);
}

/// Tests completing an entry that expired but was not swept yet.
///
/// Expected: Err(UnknownState) and no notification
#[tokio::test(start_paused = true)]
async fn expired_unswept_entry_is_unknown_state() {
    let dir = tempfile::tempdir().unwrap();
    let flow = offline_flow(&dir);
    let awaiter = RecordingAwaiter::new();
    flow.register_pending("state-1".to_string(), awaiter.clone())
        .await;

    tokio::time::advance(PENDING_TTL).await;
    let result = flow.complete_with_code("state-1", "code-1").await;

    assert!(matches!(result, Err(AuthError::UnknownState(_))));
    assert!(awaiter.outcomes().is_empty());
}

/// Tests that re-registering resets the entry's clock.
///
/// Expected: the re-registered entry survives a sweep after the original would have expired
#[tokio::test(start_paused = true)]
async fn re_registration_resets_clock() {
    let dir = tempfile::tempdir().unwrap();
    let flow = offline_flow(&dir);
    flow.register_pending("state-1".to_string(), RecordingAwaiter::new())
        .await;

    tokio::time::advance(std::time::Duration::from_secs(8 * 60)).await;
    flow.register_pending("state-1".to_string(), RecordingAwaiter::new())
        .await;
    tokio::time::advance(std::time::Duration::from_secs(4 * 60)).await;

    assert_eq!(flow.sweep_expired().await, 0);
    assert_eq!(flow.pending_count().await, 1);
}
