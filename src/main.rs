use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use transaction_stats_server::{
    AppState, build_router,
    config::Config,
    db::{init_db_pool, setup_database, transaction_store::TransactionStore},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_logging();

    let config = Config::from_env()?;
    let pool = init_db_pool(&config)?;

    // A missing table only breaks the queries, so keep serving.
    match setup_database(&pool).await {
        Ok(()) => tracing::info!("Transactions table is ready"),
        Err(e) => tracing::error!("Error creating transactions table: {}", e),
    }

    let state = AppState::new(TransactionStore::new(pool));
    let app = build_router(state, Duration::from_secs(config.request_timeout_secs));

    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("Server is running on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

fn setup_logging() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "transaction_stats_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::warn!("Received Ctrl+C, shutting down");
}
