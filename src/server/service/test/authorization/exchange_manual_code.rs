use super::*;

/// Tests exchanging a pasted code without a pending entry.
///
/// Expected: Ok with the token installed in the token manager
#[tokio::test]
async fn installs_token_from_pasted_code() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_token_response(
            GrantType::AuthorizationCode,
            200,
            factory::token::token_response("access-1", 7200, Some("refresh-1")),
        )
        .expect_calls(1)
        .build()
        .await?;
    let tokens = token_manager(&test);
    let flow = authorization_flow(&test, tokens.clone());

    let token = flow.exchange_manual_code("code-1").await.unwrap();

    assert_eq!(token.access_token, "access-1");
    assert!(tokens.status().await.has_refresh_token);
    Ok(())
}

/// Tests exchanging a percent-encoded code copied from a redirect URL.
///
/// Verifies that the code reaches the token endpoint decoded (and form-encoded once).
///
/// Expected: Ok, with the mock only matching the singly encoded code
#[tokio::test]
async fn decodes_percent_encoded_code() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .and(body_string_contains("code=v%5E1.1%23i%5E1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(factory::token::token_response("access-1", 7200, None)),
        )
        .expect(1)
        .mount(&test.server)
        .await;
    let flow = authorization_flow(&test, token_manager(&test));

    assert!(flow.exchange_manual_code("v%5E1.1%23i%5E1").await.is_ok());
    Ok(())
}

/// Tests a pasted code rejected by the token endpoint.
///
/// Expected: Err(ExchangeFailed) and no token installed
#[tokio::test]
async fn rejected_code_installs_nothing() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_token_response(
            GrantType::AuthorizationCode,
            400,
            factory::token::oauth_error("invalid_grant", "code expired"),
        )
        .build()
        .await?;
    let tokens = token_manager(&test);
    let flow = authorization_flow(&test, tokens.clone());

    let result = flow.exchange_manual_code("code-1").await;

    assert!(matches!(result, Err(AuthError::ExchangeFailed(_))));
    assert!(!tokens.status().await.has_token);
    Ok(())
}
