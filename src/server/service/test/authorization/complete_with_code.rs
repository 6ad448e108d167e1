use super::*;

/// Tests completing a registered authorization.
///
/// Verifies that the code is exchanged, the token installed in the token manager, the entry
/// consumed and the awaiter told about the success.
///
/// Expected: Ok with the token and one Authorized outcome
#[tokio::test]
async fn exchanges_code_and_notifies_awaiter() -> Result<(), TestError> {
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
    let awaiter = RecordingAwaiter::new();

    flow.register_pending("state-1".to_string(), awaiter.clone())
        .await;
    let token = flow.complete_with_code("state-1", "code-1").await.unwrap();

    assert_eq!(token.access_token, "access-1");
    assert!(tokens.status().await.has_token);
    assert_eq!(flow.pending_count().await, 0);
    assert_eq!(
        awaiter.outcomes(),
        vec![AuthorizationOutcome::Authorized {
            expires_at: token.expires_at,
            has_refresh_token: true,
        }]
    );
    Ok(())
}

/// Tests completing the same state twice.
///
/// Verifies that the second completion finds no entry and does not exchange the code again.
///
/// Expected: first Ok, second Err(UnknownState), exactly one exchange
#[tokio::test]
async fn second_completion_is_unknown_state() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_token_response(
            GrantType::AuthorizationCode,
            200,
            factory::token::token_response("access-1", 7200, Some("refresh-1")),
        )
        .expect_calls(1)
        .build()
        .await?;
    let flow = authorization_flow(&test, token_manager(&test));
    let awaiter = RecordingAwaiter::new();
    flow.register_pending("state-1".to_string(), awaiter.clone())
        .await;

    assert!(flow.complete_with_code("state-1", "code-1").await.is_ok());
    let second = flow.complete_with_code("state-1", "code-1").await;

    assert!(matches!(second, Err(AuthError::UnknownState(ref s)) if s == "state-1"));
    assert_eq!(awaiter.outcomes().len(), 1);
    Ok(())
}

/// Tests completing a state that was never registered.
///
/// Expected: Err(UnknownState) without contacting the token endpoint
#[tokio::test]
async fn unknown_state_skips_exchange() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_token_response(
            GrantType::AuthorizationCode,
            200,
            factory::token::token_response("access-1", 7200, None),
        )
        .expect_calls(0)
        .build()
        .await?;
    let flow = authorization_flow(&test, token_manager(&test));

    let result = flow.complete_with_code("never-issued", "code-1").await;

    assert!(matches!(result, Err(AuthError::UnknownState(_))));
    Ok(())
}

/// Tests re-registering a state before it completes.
///
/// Verifies that the later registration replaces the earlier one.
///
/// Expected: only the second awaiter notified
#[tokio::test]
async fn re_registration_notifies_latest_awaiter_only() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_token_response(
            GrantType::AuthorizationCode,
            200,
            factory::token::token_response("access-1", 7200, Some("refresh-1")),
        )
        .build()
        .await?;
    let flow = authorization_flow(&test, token_manager(&test));
    let first = RecordingAwaiter::new();
    let second = RecordingAwaiter::new();

    flow.register_pending("state-1".to_string(), first.clone())
        .await;
    flow.register_pending("state-1".to_string(), second.clone())
        .await;
    flow.complete_with_code("state-1", "code-1").await.unwrap();

    assert!(first.outcomes().is_empty());
    assert_eq!(second.outcomes().len(), 1);
    assert_eq!(flow.pending_count().await, 0);
    Ok(())
}

/// Tests a code rejected by the token endpoint.
///
/// Verifies that the entry is still consumed, no token is installed, and the awaiter learns
/// the specific failure.
///
/// Expected: Err(ExchangeFailed) and one ExchangeFailed outcome
#[tokio::test]
async fn failed_exchange_notifies_awaiter() -> Result<(), TestError> {
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
    let awaiter = RecordingAwaiter::new();
    flow.register_pending("state-1".to_string(), awaiter.clone())
        .await;

    let result = flow.complete_with_code("state-1", "code-1").await;

    assert!(matches!(result, Err(AuthError::ExchangeFailed(_))));
    assert!(!tokens.status().await.has_token);
    assert_eq!(flow.pending_count().await, 0);
    assert!(matches!(
        awaiter.outcomes().as_slice(),
        [AuthorizationOutcome::ExchangeFailed(reason)] if reason.contains("invalid_grant")
    ));
    Ok(())
}

/// Tests that the exchange sends the RuName as `redirect_uri`.
///
/// Expected: Ok, with the mock only matching requests carrying the RuName
#[tokio::test]
async fn sends_runame_as_redirect_uri() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .and(body_string_contains(format!("redirect_uri={}", TEST_RUNAME)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(factory::token::token_response("access-1", 7200, None)),
        )
        .expect(1)
        .mount(&test.server)
        .await;
    let flow = authorization_flow(&test, token_manager(&test));
    flow.register_pending("state-1".to_string(), RecordingAwaiter::new())
        .await;

    assert!(flow.complete_with_code("state-1", "code-1").await.is_ok());
    Ok(())
}
