//! In-memory store implementations for testing and development
//!
//! Thread-safe via `RwLock`; lock poisoning surfaces as a storage error
//! rather than a panic.

use crate::core::account::UserAccount;
use crate::core::cart::Cart;
use crate::core::catalog::CatalogItem;
use crate::core::feedback::FeedbackRecord;
use crate::core::notification::NotificationRecord;
use crate::core::store::{
    AccountStore, CartStore, CatalogStore, FeedbackStore, NotificationStore,
};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// In-memory catalog store
#[derive(Clone, Default)]
pub struct InMemoryCatalogStore {
    items: Arc<RwLock<HashMap<Uuid, CatalogItem>>>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn insert(&self, item: CatalogItem) -> Result<CatalogItem> {
        let mut items = self
            .items
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;
        items.insert(item.id, item.clone());
        Ok(item)
    }

    async fn get(&self, id: &Uuid) -> Result<Option<CatalogItem>> {
        let items = self
            .items
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;
        Ok(items.get(id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<CatalogItem>> {
        let items = self
            .items
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;
        let wanted = name.trim().to_lowercase();
        Ok(items
            .values()
            .find(|item| item.name.to_lowercase() == wanted)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<CatalogItem>> {
        let items = self
            .items
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;
        let mut all: Vec<CatalogItem> = items.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    async fn update(&self, id: &Uuid, item: CatalogItem) -> Result<CatalogItem> {
        let mut items = self
            .items
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;
        items
            .get_mut(id)
            .ok_or_else(|| anyhow!("Catalog item not found"))?;
        items.insert(*id, item.clone());
        Ok(item)
    }

    async fn delete(&self, id: &Uuid) -> Result<bool> {
        let mut items = self
            .items
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;
        Ok(items.remove(id).is_some())
    }
}

/// In-memory cart store, keyed by customer identity
#[derive(Clone, Default)]
pub struct InMemoryCartStore {
    carts: Arc<RwLock<HashMap<String, Cart>>>,
}

impl InMemoryCartStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CartStore for InMemoryCartStore {
    async fn get(&self, customer: &str) -> Result<Option<Cart>> {
        let carts = self
            .carts
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;
        Ok(carts.get(customer).cloned())
    }

    async fn put(&self, cart: Cart) -> Result<Cart> {
        let mut carts = self
            .carts
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;
        carts.insert(cart.customer.clone(), cart.clone());
        Ok(cart)
    }
}

/// In-memory account store, keyed by lowercased email
#[derive(Clone, Default)]
pub struct InMemoryAccountStore {
    accounts: Arc<RwLock<HashMap<String, UserAccount>>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn insert(&self, account: UserAccount) -> Result<UserAccount> {
        let mut accounts = self
            .accounts
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;
        accounts.insert(account.email.clone(), account.clone());
        Ok(account)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>> {
        let accounts = self
            .accounts
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;
        Ok(accounts.get(email).cloned())
    }
}

/// In-memory append-only notification store.
///
/// Timestamps are clamped on append so they never decrease in insertion
/// order, even under clock adjustments.
#[derive(Clone, Default)]
pub struct InMemoryNotificationStore {
    records: Arc<RwLock<Vec<NotificationRecord>>>,
}

impl InMemoryNotificationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NotificationStore for InMemoryNotificationStore {
    async fn append(&self, mut record: NotificationRecord) -> Result<NotificationRecord> {
        let mut records = self
            .records
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        if let Some(last) = records.last() {
            if record.created_at < last.created_at {
                record.created_at = last.created_at;
            }
        }

        records.push(record.clone());
        Ok(record)
    }

    async fn list_for(&self, recipient: &str) -> Result<Vec<NotificationRecord>> {
        let records = self
            .records
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;
        Ok(records
            .iter()
            .filter(|r| r.recipient == recipient)
            .cloned()
            .collect())
    }
}

/// In-memory append-only feedback store
#[derive(Clone, Default)]
pub struct InMemoryFeedbackStore {
    records: Arc<RwLock<Vec<FeedbackRecord>>>,
}

impl InMemoryFeedbackStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FeedbackStore for InMemoryFeedbackStore {
    async fn append(&self, record: FeedbackRecord) -> Result<FeedbackRecord> {
        let mut records = self
            .records
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;
        records.push(record.clone());
        Ok(record)
    }

    async fn list(&self) -> Result<Vec<FeedbackRecord>> {
        let records = self
            .records
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;
        let mut all: Vec<FeedbackRecord> = records.clone();
        all.reverse();
        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cart::CartLine;
    use crate::core::notification::NotificationKind;
    use chrono::{Duration, Utc};

    #[tokio::test]
    async fn test_catalog_insert_and_get() {
        let store = InMemoryCatalogStore::new();
        let item = CatalogItem::new("Croissant", None, 450, 20).unwrap();

        store.insert(item.clone()).await.unwrap();

        let fetched = store.get(&item.id).await.unwrap();
        assert_eq!(fetched, Some(item));
    }

    #[tokio::test]
    async fn test_catalog_find_by_name_case_insensitive() {
        let store = InMemoryCatalogStore::new();
        let item = CatalogItem::new("Chocolate Cake", None, 2500, 5).unwrap();
        store.insert(item.clone()).await.unwrap();

        let found = store.find_by_name("chocolate cake").await.unwrap();
        assert_eq!(found.map(|i| i.id), Some(item.id));

        assert!(store.find_by_name("Eclair").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_catalog_delete_reports_absence() {
        let store = InMemoryCatalogStore::new();
        let item = CatalogItem::new("Croissant", None, 450, 20).unwrap();
        store.insert(item.clone()).await.unwrap();

        assert!(store.delete(&item.id).await.unwrap());
        assert!(!store.delete(&item.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_cart_upsert_round_trip() {
        let store = InMemoryCartStore::new();
        assert!(store.get("maya@example.com").await.unwrap().is_none());

        let mut cart = Cart::empty("maya@example.com");
        cart.push_line(CartLine::Product {
            name: "Croissant".into(),
            quantity: 2,
            unit_price_cents: 450,
        });
        store.put(cart.clone()).await.unwrap();

        let fetched = store.get("maya@example.com").await.unwrap().unwrap();
        assert_eq!(fetched, cart);
    }

    #[tokio::test]
    async fn test_cart_put_is_last_write_wins() {
        let store = InMemoryCartStore::new();
        let mut first = Cart::empty("maya@example.com");
        first.push_line(CartLine::Product {
            name: "Croissant".into(),
            quantity: 1,
            unit_price_cents: 450,
        });
        let second = Cart::empty("maya@example.com");

        store.put(first).await.unwrap();
        store.put(second.clone()).await.unwrap();

        let fetched = store.get("maya@example.com").await.unwrap().unwrap();
        assert_eq!(fetched.lines.len(), 0);
        assert_eq!(fetched, second);
    }

    #[tokio::test]
    async fn test_account_find_by_email() {
        let store = InMemoryAccountStore::new();
        let account = UserAccount::new("maya@example.com", "Maya", None, None, "s$d".into());
        store.insert(account.clone()).await.unwrap();

        let found = store.find_by_email("maya@example.com").await.unwrap();
        assert_eq!(found, Some(account));
        assert!(store.find_by_email("nobody@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_notification_timestamps_monotonic() {
        let store = InMemoryNotificationStore::new();

        let mut early = NotificationRecord::new("maya@example.com", "first", NotificationKind::General);
        let mut late = NotificationRecord::new("maya@example.com", "second", NotificationKind::General);
        // simulate clock skew: the later insert carries an older timestamp
        late.created_at = Utc::now() - Duration::hours(1);
        early.created_at = Utc::now();

        store.append(early.clone()).await.unwrap();
        let stored_late = store.append(late).await.unwrap();

        assert!(stored_late.created_at >= early.created_at);

        let feed = store.list_for("maya@example.com").await.unwrap();
        assert_eq!(feed.len(), 2);
        assert!(feed[0].created_at <= feed[1].created_at);
    }

    #[tokio::test]
    async fn test_notification_list_filters_by_recipient() {
        let store = InMemoryNotificationStore::new();
        store
            .append(NotificationRecord::new(
                "maya@example.com",
                "yours",
                NotificationKind::General,
            ))
            .await
            .unwrap();
        store
            .append(NotificationRecord::new(
                "liam@example.com",
                "not yours",
                NotificationKind::General,
            ))
            .await
            .unwrap();

        let feed = store.list_for("maya@example.com").await.unwrap();
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].message, "yours");
    }

    #[tokio::test]
    async fn test_feedback_newest_first() {
        let store = InMemoryFeedbackStore::new();
        let first = FeedbackRecord::new("a@b.c", "first", 5, None).unwrap();
        let second = FeedbackRecord::new("a@b.c", "second", 3, None).unwrap();
        store.append(first).await.unwrap();
        store.append(second).await.unwrap();

        let all = store.list().await.unwrap();
        assert_eq!(all[0].description, "second");
        assert_eq!(all[1].description, "first");
    }
}
