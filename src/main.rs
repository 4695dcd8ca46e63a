//! Bakehouse server binary
//!
//! Loads configuration (YAML file named by `BAKEHOUSE_CONFIG`, plus
//! environment overrides), wires the configured storage backend, and
//! serves the REST API until interrupted.

use bakehouse::config::AppConfig;
use bakehouse::server::{self, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bakehouse=info,tower_http=info".into()),
        )
        .init();

    let config = AppConfig::load()?;
    let state = build_state(&config).await?;

    server::serve(state, &config.bind_addr).await
}

#[cfg(feature = "mongodb_backend")]
async fn build_state(config: &AppConfig) -> anyhow::Result<AppState> {
    use bakehouse::auth::TokenIssuer;
    use bakehouse::storage::{
        MongoAccountStore, MongoCartStore, MongoCatalogStore, MongoFeedbackStore,
        MongoNotificationStore,
    };
    use std::sync::Arc;

    let client = mongodb::Client::with_uri_str(&config.database.uri).await?;
    let db = client.database(&config.database.name);

    tracing::info!(database = %config.database.name, "using MongoDB storage");
    Ok(AppState {
        catalog: Arc::new(MongoCatalogStore::new(db.clone())),
        carts: Arc::new(MongoCartStore::new(db.clone())),
        accounts: Arc::new(MongoAccountStore::new(db.clone())),
        notifications: Arc::new(MongoNotificationStore::new(db.clone())),
        feedback: Arc::new(MongoFeedbackStore::new(db)),
        tokens: Arc::new(TokenIssuer::new(
            &config.auth.jwt_secret,
            config.auth.token_ttl_secs,
        )),
        low_stock_threshold: config.low_stock_threshold,
    })
}

#[cfg(not(feature = "mongodb_backend"))]
async fn build_state(config: &AppConfig) -> anyhow::Result<AppState> {
    tracing::info!("using in-memory storage");
    Ok(AppState::in_memory(config))
}
