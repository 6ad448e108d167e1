use std::time::Duration;
use tracing_subscriber::EnvFilter;

use crate::server::{config::Config, error::AppError, service::oauth::MarketplaceOAuth};

const DEFAULT_LOG_FILTER: &str = "info,marketbot=debug";
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Installs the global tracing subscriber.
///
/// The filter is read from `RUST_LOG`, falling back to `info,marketbot=debug`.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Builds the HTTP client shared by every outbound marketplace call.
///
/// Redirects are disabled so a token endpoint answering with a redirect fails instead of
/// leaking credentials to another host.
///
/// # Returns
/// - `Ok(reqwest::Client)` - Client with a 30 second timeout
/// - `Err(AppError::ReqwestErr)` - The client could not be built
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    let client = reqwest::ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(HTTP_TIMEOUT)
        .build()?;

    Ok(client)
}

/// Creates the marketplace OAuth client from configuration.
///
/// # Arguments
/// - `config` - Application configuration with app credentials and endpoint URLs
/// - `http_client` - Shared HTTP client
pub fn setup_oauth_client(
    config: &Config,
    http_client: reqwest::Client,
) -> Result<MarketplaceOAuth, AppError> {
    MarketplaceOAuth::new(
        &config.ebay_app_id,
        &config.ebay_cert_id,
        &config.ebay_auth_url,
        &config.ebay_token_url,
        &config.ebay_redirect_uri,
        http_client,
    )
}

/// Resolves once the process receives Ctrl+C or, on Unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
