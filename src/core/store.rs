//! Store traits for the storefront's persistent collections
//!
//! Implementations provide per-collection persistence; the service is
//! agnostic to the underlying mechanism. The in-memory backend is the
//! default; the MongoDB backend lives behind the `mongodb_backend` feature.
//!
//! All methods return `anyhow::Result`: storage failures are unexpected by
//! the domain and surface as 500s at the boundary. Domain-level outcomes
//! ("no such item") are expressed in the types (`Option`, `bool`), not as
//! errors.

use crate::core::account::UserAccount;
use crate::core::cart::Cart;
use crate::core::catalog::CatalogItem;
use crate::core::feedback::FeedbackRecord;
use crate::core::notification::NotificationRecord;
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Persistence for sellable catalog items
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Insert a new item
    async fn insert(&self, item: CatalogItem) -> Result<CatalogItem>;

    /// Get an item by ID
    async fn get(&self, id: &Uuid) -> Result<Option<CatalogItem>>;

    /// Look an item up by its display name (case-insensitive)
    async fn find_by_name(&self, name: &str) -> Result<Option<CatalogItem>>;

    /// List all items, newest first
    async fn list(&self) -> Result<Vec<CatalogItem>>;

    /// Replace an existing item
    async fn update(&self, id: &Uuid, item: CatalogItem) -> Result<CatalogItem>;

    /// Delete an item; returns false when it did not exist
    async fn delete(&self, id: &Uuid) -> Result<bool>;
}

/// Persistence for per-customer carts (one document per identity)
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Get a customer's cart, if one exists
    async fn get(&self, customer: &str) -> Result<Option<Cart>>;

    /// Upsert a whole cart document.
    ///
    /// Single-document atomicity only: concurrent writers to the same cart
    /// resolve last-write-wins.
    async fn put(&self, cart: Cart) -> Result<Cart>;
}

/// Persistence for registered accounts
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Insert a new account
    async fn insert(&self, account: UserAccount) -> Result<UserAccount>;

    /// Find an account by its (lowercased) email
    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>>;
}

/// Append-only persistence for notifications
#[async_trait]
pub trait NotificationStore: Send + Sync {
    /// Append a record. Implementations clamp the record's timestamp so
    /// that stored timestamps are monotonic non-decreasing per insert.
    async fn append(&self, record: NotificationRecord) -> Result<NotificationRecord>;

    /// All records for a recipient, oldest first
    async fn list_for(&self, recipient: &str) -> Result<Vec<NotificationRecord>>;
}

/// Append-only persistence for customer feedback
#[async_trait]
pub trait FeedbackStore: Send + Sync {
    /// Append a record
    async fn append(&self, record: FeedbackRecord) -> Result<FeedbackRecord>;

    /// All feedback, newest first (admin dashboard view)
    async fn list(&self) -> Result<Vec<FeedbackRecord>>;
}
