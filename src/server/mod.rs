//! HTTP server: shared state, routing and request handlers

pub mod extract;
pub mod handlers;
pub mod router;

pub use extract::Customer;
pub use router::build_router;

use crate::auth::token::TokenIssuer;
use crate::config::AppConfig;
use crate::core::store::{
    AccountStore, CartStore, CatalogStore, FeedbackStore, NotificationStore,
};
use crate::storage::{
    InMemoryAccountStore, InMemoryCartStore, InMemoryCatalogStore, InMemoryFeedbackStore,
    InMemoryNotificationStore,
};
use anyhow::Result;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Shared application state injected into every handler
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogStore>,
    pub carts: Arc<dyn CartStore>,
    pub accounts: Arc<dyn AccountStore>,
    pub notifications: Arc<dyn NotificationStore>,
    pub feedback: Arc<dyn FeedbackStore>,
    pub tokens: Arc<TokenIssuer>,
    pub low_stock_threshold: i64,
}

impl AppState {
    /// State backed by in-memory stores (development and tests)
    pub fn in_memory(config: &AppConfig) -> Self {
        Self {
            catalog: Arc::new(InMemoryCatalogStore::new()),
            carts: Arc::new(InMemoryCartStore::new()),
            accounts: Arc::new(InMemoryAccountStore::new()),
            notifications: Arc::new(InMemoryNotificationStore::new()),
            feedback: Arc::new(InMemoryFeedbackStore::new()),
            tokens: Arc::new(TokenIssuer::new(
                &config.auth.jwt_secret,
                config.auth.token_ttl_secs,
            )),
            low_stock_threshold: config.low_stock_threshold,
        }
    }
}

/// Serve the application with graceful shutdown.
///
/// Binds to the provided address, serves requests, and handles SIGTERM
/// and Ctrl+C for graceful shutdown.
pub async fn serve(state: AppState, addr: &str) -> Result<()> {
    let app = build_router(state);
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
