//! Codecamp - Application Entry Point
//!
//! This is the main entry point for the Codecamp server.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use codecamp::{
    config::CONFIG,
    create_router, db,
    grader::{AssignmentCatalog, LoggingSubmissionSink},
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let (json_layer, pretty_layer) = if CONFIG.server.json_logs {
        (Some(tracing_subscriber::fmt::layer().json()), None)
    } else {
        (None, Some(tracing_subscriber::fmt::layer()))
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| CONFIG.server.rust_log.clone().into()),
        )
        .with(json_layer)
        .with(pretty_layer)
        .init();

    tracing::info!("Starting Codecamp server...");

    // Initialize database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&CONFIG.database).await?;

    // Run database migrations
    tracing::info!("Running database migrations...");
    db::run_migrations(&db_pool).await?;

    // Load assignments
    let catalog = match &CONFIG.grader.assignments_path {
        Some(path) => AssignmentCatalog::from_file(path)
            .with_context(|| format!("Failed to load assignments from {}", path.display()))?,
        None => AssignmentCatalog::builtin(),
    };
    tracing::info!(assignments = catalog.len(), "Assignment catalog loaded");

    // Create application state
    let state = AppState::new(
        db_pool,
        CONFIG.clone(),
        catalog,
        Arc::new(LoggingSubmissionSink),
    );

    let app = create_router(state);

    // Start the server
    let addr = SocketAddr::new(CONFIG.server.host.parse()?, CONFIG.server.port);
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = ?e, "Failed to listen for shutdown signal");
    }
}
