// Main entry point for the API server

use std::sync::Arc;

use anyhow::{Context, Result};
use server_core::domains::auth::SessionStore;
use server_core::kernel::{DiskMediaStore, ServerDeps, TwilioAdapter};
use server_core::server::build_app;
use server_core::Config;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use twilio::{TwilioOptions, TwilioService};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Partyline API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    // Connect to database
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Run migrations
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations complete");

    // Wire up dependencies
    let twilio = Arc::new(TwilioService::new(TwilioOptions {
        account_sid: config.twilio_account_sid.clone(),
        auth_token: config.twilio_auth_token.clone(),
        service_id: config.twilio_verify_service_sid.clone(),
    }));
    let media = DiskMediaStore::new(config.media_dir.clone().into(), &config.media_base_url)
        .await
        .context("Failed to initialize media storage")?;

    let sessions = Arc::new(SessionStore::new());

    // Expired sessions are evicted on read, but tokens that are never
    // presented again would otherwise linger forever.
    {
        let sessions = sessions.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(std::time::Duration::from_secs(60 * 60));
            loop {
                interval.tick().await;
                sessions.cleanup_expired().await;
            }
        });
    }

    let deps = Arc::new(ServerDeps::new(
        pool,
        Arc::new(TwilioAdapter::new(twilio)),
        Arc::new(media),
        sessions,
        config.test_identifier_enabled,
    ));

    if config.test_identifier_enabled {
        tracing::warn!("Test identifiers enabled - +1-555 numbers bypass Twilio");
    }

    let app = build_app(deps);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .await
        .context("Server exited with error")?;

    Ok(())
}
