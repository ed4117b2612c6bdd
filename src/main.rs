use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use boost_messenger::{
    api::{create_router, AppState},
    config::Config,
    db,
    error::AppError,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,boost_messenger=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting boost-messenger v{}", env!("CARGO_PKG_VERSION"));

    let config = Arc::new(Config::from_env()?);
    tracing::info!("Configuration loaded");

    let db = db::open(&config).await?;
    tracing::info!("Database ready: {}", config.database_url);

    let state = AppState::new(db.clone(), config.clone());
    let app = create_router(state);

    let addr = config.server_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("  POST /register      - Register new user");
    tracing::info!("  POST /login         - Login, returns bearer token");
    tracing::info!("  GET  /check_auth    - Check token (requires auth)");
    tracing::info!("  GET  /logout        - Logout (requires auth)");
    tracing::info!("  POST /send_message  - Send message (requires auth)");
    tracing::info!("  GET  /get_messages  - Get all messages (requires auth)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Internal(format!("Server error: {}", e)))?;

    db.close().await;
    tracing::info!("Database closed, bye");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
