//! pos-transactions-api - Point-of-sale transactions reporting API
//!
//! Exposes a single authenticated read endpoint returning formatted
//! point-of-sale transactions for a date range, plus a health check.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pos_transactions_api::api::{self, AppState, SERVICE_NAME};
use pos_transactions_api::auth::TokenVerifier;
use pos_transactions_api::{db, Config};

/// Initialize tracing/logging
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pos_transactions_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    init_tracing();

    // Load configuration
    let config = Config::from_env()?;
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    tracing::info!("Starting {}", SERVICE_NAME);
    tracing::info!("Connecting to database...");

    // Create database pool and verify connectivity
    let pool = db::connect(&config).await?;
    db::verify_connection(&pool).await?;

    tracing::info!("Database connected successfully");

    // The bearer-token gate is a configuration choice; Config::from_env
    // guarantees a secret exists whenever the gate is on.
    let verifier = match (config.auth_enabled, config.jwt_secret.as_deref()) {
        (true, Some(secret)) => Some(Arc::new(TokenVerifier::new(secret))),
        (true, None) => return Err(anyhow::anyhow!("JWT_SECRET is required when auth is enabled")),
        (false, _) => {
            tracing::warn!("Bearer-token gate disabled; /transactions is publicly reachable");
            None
        }
    };

    let state = AppState {
        pool: pool.clone(),
        verifier,
        discount_strategy: config.discount_strategy,
    };

    tracing::info!("Listening on http://{}", addr);

    // Build router and start server
    let app = api::build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Cleanup
    tracing::info!("Server shutting down...");
    pool.close().await;
    tracing::info!("Database connections closed. Goodbye!");

    Ok(())
}

/// Shutdown signal handler for graceful shutdown
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}
