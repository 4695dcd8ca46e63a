//! # Bakehouse
//!
//! A bakery storefront backend: customer-facing ordering and cart flows,
//! an admin inventory surface, authentication, and notification/feedback
//! records, exposed as an HTTP/JSON REST API.
//!
//! ## Architecture
//!
//! - **Domain types** live in [`core`]: catalog items, carts with tagged
//!   line items (catalog product vs custom cake spec), accounts,
//!   notifications and feedback, plus the date/order-form validation rules.
//! - **Store traits** ([`core::store`]) decouple the domain from
//!   persistence; [`storage`] ships an in-memory backend (default) and a
//!   MongoDB backend behind the `mongodb_backend` feature.
//! - **Auth** ([`auth`]) issues HS256 bearer credentials and salted
//!   password digests.
//! - **HTTP** ([`server`]) wires axum handlers over shared [`server::AppState`].
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bakehouse::config::AppConfig;
//! use bakehouse::server::{self, AppState};
//!
//! let config = AppConfig::load()?;
//! let state = AppState::in_memory(&config);
//! server::serve(state, &config.bind_addr).await?;
//! ```

pub mod auth;
pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types
pub mod prelude {
    // === Domain ===
    pub use crate::core::{
        ApiError, ApiResult, CakeBase, CakeOrderForm, CakeSize, CakeSpec, Cart, CartLine,
        CatalogItem, CatalogItemPatch, DesignSource, FeedbackRecord, FieldIssue, Fulfilment,
        NotificationKind, NotificationRecord, Profile, StockStatus, UserAccount, is_low_stock,
        normalize_email,
    };

    // === Store traits ===
    pub use crate::core::store::{
        AccountStore, CartStore, CatalogStore, FeedbackStore, NotificationStore,
    };

    // === Auth ===
    pub use crate::auth::{TokenIssuer, hash_password, verify_password};

    // === Server ===
    pub use crate::server::{AppState, Customer, build_router};

    // === Storage ===
    pub use crate::storage::{
        InMemoryAccountStore, InMemoryCartStore, InMemoryCatalogStore, InMemoryFeedbackStore,
        InMemoryNotificationStore,
    };

    // === Config ===
    pub use crate::config::AppConfig;

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, NaiveDate, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
