mod model;
mod server;

use std::net::SocketAddr;
use std::sync::Arc;

use crate::server::{
    bot::{self, handler::Handler, sink::DiscordChannelSink},
    config::Config,
    data::token_store::EnvFileTokenStore,
    error::AppError,
    model::token::Token,
    router,
    scheduler::{pending_sweep, token_refresh, TaskScheduler},
    service::{
        authorization::AuthorizationFlow, notification::NotificationDispatcher,
        subscription::SubscriptionService, token::TokenManager, webhook::WebhookVerifier,
    },
    startup,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = Config::from_env()?;

    let http_client = startup::setup_reqwest_client()?;
    let oauth = Arc::new(startup::setup_oauth_client(&config, http_client.clone())?);

    let store = Arc::new(EnvFileTokenStore::new(config.env_file.clone()));
    let tokens = Arc::new(TokenManager::new(
        oauth.clone(),
        store,
        config.token_safety_margin,
    ));
    match tokens.restore().await {
        Ok(true) => tracing::info!("Restored marketplace token from {}", config.env_file.display()),
        Ok(false) => match config.ebay_access_token.clone() {
            Some(access_token) => {
                tokens
                    .install(Token::restored(
                        access_token,
                        config.ebay_refresh_token.clone(),
                    ))
                    .await;
                tracing::info!("Using marketplace token from the environment");
            }
            None => tracing::warn!(
                "No marketplace token available; run /ebay-authorize in Discord to connect"
            ),
        },
        Err(e) => tracing::warn!("Failed to restore marketplace token: {}", e),
    }

    let auth_flow = Arc::new(AuthorizationFlow::new(oauth.clone(), tokens.clone()));
    let subscriptions = Arc::new(SubscriptionService::new(
        http_client,
        tokens.clone(),
        config.ebay_api_url.clone(),
    ));

    tracing::info!(
        "Starting marketbot against the {} marketplace",
        config.ebay_environment.as_str()
    );

    let handler = Handler {
        auth_flow: auth_flow.clone(),
        tokens: tokens.clone(),
        subscriptions,
        environment: config.ebay_environment,
        requested_scopes: oauth.scopes.clone(),
        verify_token: config.webhook_verify_token.clone(),
        webhook_endpoint_url: config.webhook_endpoint_url.clone(),
    };
    let (bot_client, discord_http) = bot::start::init_bot(&config, handler).await?;
    let shard_manager = bot_client.shard_manager.clone();

    tokio::spawn(async move {
        if let Err(e) = bot::start::start_bot(bot_client).await {
            tracing::error!("Discord bot error: {}", e);
        }
    });

    if config.notification_channel_id.is_none() {
        tracing::warn!("NOTIFICATION_CHANNEL_ID not set, notifications will be dropped");
    }
    let dispatcher = Arc::new(NotificationDispatcher::new(
        Arc::new(DiscordChannelSink::new(discord_http)),
        config.notification_channel_id,
    ));
    let verifier = Arc::new(WebhookVerifier::new(
        config.webhook_verify_token.clone(),
        config.webhook_endpoint_url.clone(),
        config.webhook_signature_mode,
    ));

    let scheduler = TaskScheduler::new().await?;
    token_refresh::start_auto_refresh(&scheduler, tokens, config.token_refresh_interval).await?;
    pending_sweep::start_pending_sweep(&scheduler, auth_flow.clone()).await?;
    scheduler.start().await?;

    let app = router::router(AppState::new(auth_flow, verifier, dispatcher));
    let addr = SocketAddr::from(([0, 0, 0, 0], config.webhook_port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Webhook server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(startup::shutdown_signal())
        .await?;

    if let Err(e) = scheduler.shutdown().await {
        tracing::error!("Failed to stop task scheduler: {}", e);
    }
    shard_manager.shutdown_all().await;

    tracing::info!("Shutdown complete");

    Ok(())
}
