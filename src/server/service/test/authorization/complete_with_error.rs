use super::*;

/// Tests denying a registered authorization.
///
/// Expected: Ok, entry removed, awaiter notified with the reason
#[tokio::test]
async fn notifies_awaiter_with_denial() {
    let dir = tempfile::tempdir().unwrap();
    let flow = offline_flow(&dir);
    let awaiter = RecordingAwaiter::new();
    flow.register_pending("state-1".to_string(), awaiter.clone())
        .await;

    flow.complete_with_error("state-1", "Authorization declined by user")
        .await
        .unwrap();

    assert_eq!(flow.pending_count().await, 0);
    assert_eq!(
        awaiter.outcomes(),
        vec![AuthorizationOutcome::Denied(
            "Authorization declined by user".to_string()
        )]
    );
}

/// Tests denying a state that was never registered.
///
/// Expected: Err(UnknownState)
#[tokio::test]
async fn unknown_state_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let flow = offline_flow(&dir);

    let result = flow.complete_with_error("never-issued", "access_denied").await;

    assert!(matches!(result, Err(AuthError::UnknownState(_))));
}

/// Tests that a denial consumes the entry.
///
/// Expected: a later code completion for the same state is Err(UnknownState)
#[tokio::test]
async fn denial_consumes_entry() {
    let dir = tempfile::tempdir().unwrap();
    let flow = offline_flow(&dir);
    let awaiter = RecordingAwaiter::new();
    flow.register_pending("state-1".to_string(), awaiter.clone())
        .await;

    flow.complete_with_error("state-1", "access_denied")
        .await
        .unwrap();
    let result = flow.complete_with_code("state-1", "code-1").await;

    assert!(matches!(result, Err(AuthError::UnknownState(_))));
    assert_eq!(awaiter.outcomes().len(), 1);
}

/// Tests generating state values.
///
/// Expected: 32 alphanumeric characters, different on every call
#[test]
fn generates_random_alphanumeric_state() {
    let first = AuthorizationFlow::generate_state();
    let second = AuthorizationFlow::generate_state();

    assert_eq!(first.len(), 32);
    assert!(first.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_ne!(first, second);
}
