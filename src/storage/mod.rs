//! Storage backends for the storefront's collections
//!
//! The in-memory backend is always available and is the default for tests
//! and development. The MongoDB backend is enabled with the
//! `mongodb_backend` feature.

pub mod in_memory;

#[cfg(feature = "mongodb_backend")]
pub mod mongodb;

pub use in_memory::{
    InMemoryAccountStore, InMemoryCartStore, InMemoryCatalogStore, InMemoryFeedbackStore,
    InMemoryNotificationStore,
};

#[cfg(feature = "mongodb_backend")]
pub use mongodb::{
    MongoAccountStore, MongoCartStore, MongoCatalogStore, MongoFeedbackStore,
    MongoNotificationStore,
};
