use std::sync::Arc;

use auth::Authenticator;
use garden_api::config::Config;
use garden_api::inbound::http::router::create_router;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "garden_api=debug,auth=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "garden-api",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;
    let signing_secret = config.jwt.signing_secret();

    tracing::info!(
        http_port = config.server.http_port,
        jwt_secret_configured = signing_secret.is_some(),
        "Configuration loaded"
    );

    let authenticator = match signing_secret {
        Some(secret) => Some(Arc::new(Authenticator::new(secret))),
        None => {
            tracing::warn!("No JWT secret configured; authenticated routes will answer 500");
            None
        }
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(authenticator);
    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited successfully");

    Ok(())
}
