use anyhow::Context;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use voya_api::{
    app,
    state::{AppState, AuthConfig},
};
use voya_core::LifecycleCoordinator;
use voya_store::{PostgresQuoteRepository, PostgresTravelRequestRepository};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "voya_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = voya_store::app_config::Config::load().context("Failed to load config")?;
    tracing::info!("Starting Voya API on port {}", config.server.port);

    // Postgres connection + migrations
    let db = voya_store::DbClient::new(&config.database.url)
        .await
        .context("Failed to connect to Postgres")?;
    db.migrate().await.context("Failed to run migrations")?;

    // Redis connection (rate limiting)
    let redis_client = voya_store::RedisClient::new(&config.redis.url)
        .await
        .context("Failed to connect to Redis")?;

    let requests = Arc::new(PostgresTravelRequestRepository::new(db.pool.clone()));
    let quotes = Arc::new(PostgresQuoteRepository::new(db.pool.clone()));
    let notifier = Arc::new(voya_notify::ResendMailer::new(
        config.email.api_key.clone(),
        config.email.from.clone(),
        config.email.agency_address.clone(),
        config.app.base_url.clone(),
    ));
    let coordinator = Arc::new(LifecycleCoordinator::new(
        requests.clone(),
        quotes.clone(),
        notifier,
    ));

    let app_state = AppState {
        coordinator,
        requests,
        quotes,
        redis: Some(Arc::new(redis_client)),
        auth: AuthConfig {
            secret: config.auth.jwt_secret.clone(),
            expiration: config.auth.jwt_expiration_seconds,
        },
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind listener")?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}
