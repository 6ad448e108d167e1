use super::*;

/// Tests requesting a token before any authorization.
///
/// Expected: Err(TokenUnavailable)
#[tokio::test]
async fn fails_without_token() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;
    let tokens = token_manager(&test);

    let result = tokens.get_valid_token().await;

    assert!(matches!(result, Err(AuthError::TokenUnavailable)));
    Ok(())
}

/// Tests requesting a token that is comfortably valid.
///
/// Verifies that the live token is returned without contacting the token endpoint.
///
/// Expected: Ok with the installed token and zero refresh calls
#[tokio::test]
async fn returns_valid_token_without_refresh() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_token_response(
            GrantType::RefreshToken,
            200,
            factory::token::token_response("access-2", 7200, None),
        )
        .expect_calls(0)
        .build()
        .await?;
    let tokens = token_manager(&test);
    tokens.install(token("access-1", Some("refresh-1"), 3600)).await;

    let valid = tokens.get_valid_token().await.unwrap();

    assert_eq!(valid.access_token, "access-1");
    Ok(())
}

/// Tests requesting a token that expires inside the safety margin.
///
/// Verifies that a refresh runs first, the new token is returned, and it is valid for at
/// least the safety margin.
///
/// Expected: Ok with the refreshed token and exactly one refresh call
#[tokio::test]
async fn refreshes_token_near_expiry() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_token_response(
            GrantType::RefreshToken,
            200,
            factory::token::token_response("access-2", 7200, None),
        )
        .expect_calls(1)
        .build()
        .await?;
    let tokens = token_manager(&test);
    tokens.install(token("access-1", Some("refresh-1"), 60)).await;

    let valid = tokens.get_valid_token().await.unwrap();

    assert_eq!(valid.access_token, "access-2");
    assert!(valid.is_valid_for(Duration::seconds(SAFETY_MARGIN_SECONDS), Utc::now()));
    assert_eq!(valid.refresh_token.as_deref(), Some("refresh-1"));
    Ok(())
}

/// Tests requesting a near-expiry token that has no refresh token.
///
/// Expected: Err(TokenUnavailable)
#[tokio::test]
async fn fails_near_expiry_without_refresh_token() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;
    let tokens = token_manager(&test);
    tokens.install(token("access-1", None, 60)).await;

    let result = tokens.get_valid_token().await;

    assert!(matches!(result, Err(AuthError::TokenUnavailable)));
    Ok(())
}

/// Tests requesting a near-expiry token when the refresh is rejected.
///
/// Verifies that the failure surfaces and the previous token stays in place.
///
/// Expected: Err(RefreshFailed) and unchanged token status
#[tokio::test]
async fn keeps_previous_token_when_refresh_fails() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_token_response(
            GrantType::RefreshToken,
            400,
            factory::token::oauth_error("invalid_grant", "refresh token is invalid"),
        )
        .build()
        .await?;
    let tokens = token_manager(&test);
    let previous = token("access-1", Some("refresh-1"), 60);
    tokens.install(previous.clone()).await;

    let result = tokens.get_valid_token().await;

    assert!(matches!(result, Err(AuthError::RefreshFailed(_))));
    let status = tokens.status().await;
    assert_eq!(status.expires_at, Some(previous.expires_at));
    assert!(status.has_refresh_token);
    Ok(())
}

/// Tests two concurrent requests for a near-expiry token.
///
/// Verifies that the second caller waits for the in-flight refresh instead of starting its
/// own exchange.
///
/// Expected: both Ok with the same refreshed token and exactly one refresh call
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn coalesces_concurrent_refreshes() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_token_response(
            GrantType::RefreshToken,
            200,
            factory::token::token_response("access-2", 7200, Some("refresh-2")),
        )
        .with_delay(StdDuration::from_millis(300))
        .expect_calls(1)
        .build()
        .await?;
    let tokens = token_manager(&test);
    tokens.install(token("access-1", Some("refresh-1"), 60)).await;

    let first = tokio::spawn({
        let tokens = tokens.clone();
        async move { tokens.get_valid_token().await }
    });
    let second = tokio::spawn({
        let tokens = tokens.clone();
        async move { tokens.get_valid_token().await }
    });

    let first = first.await.unwrap().unwrap();
    let second = second.await.unwrap().unwrap();

    assert_eq!(first.access_token, "access-2");
    assert_eq!(second.access_token, "access-2");
    Ok(())
}

/// Tests the first request after restoring a persisted token.
///
/// Verifies that the restored token is treated as expired and refreshed with the persisted
/// refresh token.
///
/// Expected: Ok with the refreshed token
#[tokio::test]
async fn refreshes_restored_token_on_first_use() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_token_response(
            GrantType::RefreshToken,
            200,
            factory::token::token_response("access-2", 7200, None),
        )
        .expect_calls(1)
        .with_env_file("EBAY_ACCESS_TOKEN=access-1\nEBAY_REFRESH_TOKEN=refresh-1\n")
        .build()
        .await?;
    let tokens = token_manager(&test);

    assert!(tokens.restore().await.unwrap());
    let valid = tokens.get_valid_token().await.unwrap();

    assert_eq!(valid.access_token, "access-2");
    Ok(())
}
