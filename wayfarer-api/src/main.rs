use std::net::SocketAddr;

use chrono::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wayfarer_api::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wayfarer_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = wayfarer_store::app_config::Config::load()?;
    tracing::info!("Starting Wayfarer API on port {}", config.server.port);

    let state = AppState::in_memory(Duration::seconds(config.auth.session_ttl_seconds as i64));
    state
        .credentials
        .ensure_admin(&config.bootstrap.admin_email, &config.bootstrap.admin_password)
        .await?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state)).await?;
    Ok(())
}
