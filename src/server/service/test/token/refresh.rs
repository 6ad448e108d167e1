use super::*;

/// Tests a refresh response that omits the refresh token.
///
/// Verifies that the previous refresh token is retained in memory and in the token file.
///
/// Expected: Ok with the old refresh token kept alongside the new access token
#[tokio::test]
async fn retains_refresh_token_when_absent() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_token_response(
            GrantType::RefreshToken,
            200,
            factory::token::token_response("access-2", 7200, None),
        )
        .build()
        .await?;
    let tokens = token_manager(&test);
    tokens.install(token("access-1", Some("refresh-1"), 3600)).await;

    let refreshed = tokens.refresh().await.unwrap();

    assert_eq!(refreshed.access_token, "access-2");
    assert_eq!(refreshed.refresh_token.as_deref(), Some("refresh-1"));

    let stored = EnvFileTokenStore::new(test.env_path())
        .load()
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.access_token, "access-2");
    assert_eq!(stored.refresh_token.as_deref(), Some("refresh-1"));
    Ok(())
}

/// Tests a refresh response that rotates the refresh token.
///
/// Expected: Ok with the new refresh token replacing the old one
#[tokio::test]
async fn replaces_rotated_refresh_token() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_token_response(
            GrantType::RefreshToken,
            200,
            factory::token::token_response("access-2", 7200, Some("refresh-2")),
        )
        .build()
        .await?;
    let tokens = token_manager(&test);
    tokens.install(token("access-1", Some("refresh-1"), 3600)).await;

    let refreshed = tokens.refresh().await.unwrap();

    assert_eq!(refreshed.refresh_token.as_deref(), Some("refresh-2"));
    assert!(test.read_env_file().contains("EBAY_REFRESH_TOKEN='refresh-2'"));
    Ok(())
}

/// Tests refreshing when no refresh token is held.
///
/// Expected: Err(TokenUnavailable) without contacting the endpoint
#[tokio::test]
async fn fails_without_refresh_token() -> Result<(), TestError> {
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
    tokens.install(token("access-1", None, 3600)).await;

    let result = tokens.refresh().await;

    assert!(matches!(result, Err(AuthError::TokenUnavailable)));
    Ok(())
}

/// Tests a failed unconditional refresh.
///
/// Verifies that the failure leaves the current, still valid token usable.
///
/// Expected: Err(RefreshFailed), then Ok with the original token
#[tokio::test]
async fn failed_refresh_leaves_token_usable() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_token_response(
            GrantType::RefreshToken,
            500,
            factory::token::oauth_error("server_error", "try again later"),
        )
        .build()
        .await?;
    let tokens = token_manager(&test);
    tokens.install(token("access-1", Some("refresh-1"), 3600)).await;

    assert!(matches!(
        tokens.refresh().await,
        Err(AuthError::RefreshFailed(_))
    ));
    assert_eq!(
        tokens.get_valid_token().await.unwrap().access_token,
        "access-1"
    );
    Ok(())
}
