use super::*;

/// Tests installing a token.
///
/// Verifies that the token becomes live, is persisted, and is reflected in the status
/// snapshot.
///
/// Expected: status with token, refresh token and expiry; env file containing both tokens
#[tokio::test]
async fn installs_and_persists_token() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_env_file("DISCORD_BOT_TOKEN=bot\n")
        .build()
        .await?;
    let tokens = token_manager(&test);
    let installed = token("access-1", Some("refresh-1"), 7200);

    tokens.install(installed.clone()).await;

    let status = tokens.status().await;
    assert!(status.has_token);
    assert!(status.has_refresh_token);
    assert_eq!(status.expires_at, Some(installed.expires_at));
    assert_eq!(
        test.read_env_file(),
        "DISCORD_BOT_TOKEN=bot\nEBAY_ACCESS_TOKEN='access-1'\nEBAY_REFRESH_TOKEN='refresh-1'\n"
    );
    Ok(())
}

/// Tests the status snapshot before any token exists.
///
/// Expected: empty status
#[tokio::test]
async fn status_is_empty_without_token() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;
    let tokens = token_manager(&test);

    let status = tokens.status().await;

    assert!(!status.has_token);
    assert!(status.expires_at.is_none());
    Ok(())
}

/// Tests restoring when nothing was persisted.
///
/// Expected: Ok(false) and no token
#[tokio::test]
async fn restore_without_persisted_token() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;
    let tokens = token_manager(&test);

    assert!(!tokens.restore().await.unwrap());
    assert!(!tokens.status().await.has_token);
    Ok(())
}
