//! MongoDB storage backend using the official MongoDB async driver.
//!
//! # Feature flag
//!
//! This module is gated behind the `mongodb_backend` feature flag:
//! ```toml
//! [dependencies]
//! bakehouse = { version = "0.1", features = ["mongodb_backend"] }
//! ```
//!
//! # Storage model
//!
//! Collection-per-entity: `catalog_items`, `carts`, `accounts`,
//! `notifications` and `feedback`. Carts are one document per customer
//! identity, replaced whole on write (last-write-wins under concurrent
//! adds, relying on MongoDB's single-document atomicity).
//!
//! # Serialization strategy
//!
//! Entities are serialized via `serde_json::Value` as an intermediate
//! format, then converted to BSON documents. UUIDs are stored as strings,
//! timestamps as ISO 8601 strings. The `id` field is mapped to MongoDB's
//! `_id` convention where the entity has its own identifier.

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
use futures::TryStreamExt;
use mongodb::Database;
use mongodb::bson::{Bson, Document, doc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

/// Convert a serializable entity into a BSON document, renaming
/// `id` → `_id` for MongoDB convention.
fn entity_to_document<T: Serialize>(entity: &T) -> Result<Document> {
    let json =
        serde_json::to_value(entity).map_err(|e| anyhow!("Failed to serialize entity: {}", e))?;
    let bson_val =
        mongodb::bson::to_bson(&json).map_err(|e| anyhow!("Failed to convert JSON to BSON: {}", e))?;

    let mut doc = match bson_val {
        Bson::Document(d) => d,
        _ => return Err(anyhow!("Expected BSON document, got non-object")),
    };

    if let Some(id) = doc.remove("id") {
        doc.insert("_id", id);
    }

    Ok(doc)
}

/// Convert a BSON document back into a domain entity, renaming
/// `_id` → `id`.
fn document_to_entity<T: DeserializeOwned>(mut doc: Document) -> Result<T> {
    if let Some(id) = doc.remove("_id") {
        doc.insert("id", id);
    }

    let json = Bson::Document(doc).into_relaxed_extjson();
    serde_json::from_value(json)
        .map_err(|e| anyhow!("Failed to deserialize entity from document: {}", e))
}

/// Convert a UUID to its BSON string representation for queries.
fn uuid_bson(id: &Uuid) -> Bson {
    Bson::String(id.to_string())
}

// ---------------------------------------------------------------------------
// MongoCatalogStore
// ---------------------------------------------------------------------------

/// Catalog storage backed by the `catalog_items` collection
#[derive(Clone, Debug)]
pub struct MongoCatalogStore {
    database: Database,
}

impl MongoCatalogStore {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    fn collection(&self) -> mongodb::Collection<Document> {
        self.database.collection("catalog_items")
    }
}

#[async_trait]
impl CatalogStore for MongoCatalogStore {
    async fn insert(&self, item: CatalogItem) -> Result<CatalogItem> {
        let mut doc = entity_to_document(&item)?;
        // secondary key for case-insensitive name lookups
        doc.insert("name_lower", item.name.to_lowercase());

        self.collection()
            .insert_one(doc)
            .await
            .map_err(|e| anyhow!("Failed to insert catalog item: {}", e))?;

        Ok(item)
    }

    async fn get(&self, id: &Uuid) -> Result<Option<CatalogItem>> {
        let doc = self
            .collection()
            .find_one(doc! { "_id": uuid_bson(id) })
            .await
            .map_err(|e| anyhow!("Failed to get catalog item: {}", e))?;

        match doc {
            Some(d) => Ok(Some(document_to_entity(d)?)),
            None => Ok(None),
        }
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<CatalogItem>> {
        let doc = self
            .collection()
            .find_one(doc! { "name_lower": name.trim().to_lowercase() })
            .await
            .map_err(|e| anyhow!("Failed to find catalog item by name: {}", e))?;

        match doc {
            Some(d) => Ok(Some(document_to_entity(d)?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<CatalogItem>> {
        let cursor = self
            .collection()
            .find(doc! {})
            .sort(doc! { "created_at": -1 })
            .await
            .map_err(|e| anyhow!("Failed to list catalog items: {}", e))?;

        let docs: Vec<Document> = cursor
            .try_collect()
            .await
            .map_err(|e| anyhow!("Failed to collect catalog items: {}", e))?;

        docs.into_iter().map(document_to_entity).collect()
    }

    async fn update(&self, id: &Uuid, item: CatalogItem) -> Result<CatalogItem> {
        let mut doc = entity_to_document(&item)?;
        doc.insert("name_lower", item.name.to_lowercase());

        let result = self
            .collection()
            .replace_one(doc! { "_id": uuid_bson(id) }, doc)
            .await
            .map_err(|e| anyhow!("Failed to update catalog item: {}", e))?;

        if result.matched_count == 0 {
            return Err(anyhow!("Catalog item not found: {}", id));
        }

        Ok(item)
    }

    async fn delete(&self, id: &Uuid) -> Result<bool> {
        let result = self
            .collection()
            .delete_one(doc! { "_id": uuid_bson(id) })
            .await
            .map_err(|e| anyhow!("Failed to delete catalog item: {}", e))?;

        Ok(result.deleted_count > 0)
    }
}

// ---------------------------------------------------------------------------
// MongoCartStore
// ---------------------------------------------------------------------------

/// Cart storage: one document per customer in the `carts` collection
#[derive(Clone, Debug)]
pub struct MongoCartStore {
    database: Database,
}

impl MongoCartStore {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    fn collection(&self) -> mongodb::Collection<Document> {
        self.database.collection("carts")
    }
}

#[async_trait]
impl CartStore for MongoCartStore {
    async fn get(&self, customer: &str) -> Result<Option<Cart>> {
        let doc = self
            .collection()
            .find_one(doc! { "customer": customer })
            .await
            .map_err(|e| anyhow!("Failed to get cart: {}", e))?;

        match doc {
            Some(d) => Ok(Some(document_to_entity(d)?)),
            None => Ok(None),
        }
    }

    async fn put(&self, cart: Cart) -> Result<Cart> {
        let doc = entity_to_document(&cart)?;

        self.collection()
            .replace_one(doc! { "customer": &cart.customer }, doc)
            .upsert(true)
            .await
            .map_err(|e| anyhow!("Failed to store cart: {}", e))?;

        Ok(cart)
    }
}

// ---------------------------------------------------------------------------
// MongoAccountStore
// ---------------------------------------------------------------------------

/// Account storage backed by the `accounts` collection
#[derive(Clone, Debug)]
pub struct MongoAccountStore {
    database: Database,
}

impl MongoAccountStore {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    fn collection(&self) -> mongodb::Collection<Document> {
        self.database.collection("accounts")
    }
}

#[async_trait]
impl AccountStore for MongoAccountStore {
    async fn insert(&self, account: UserAccount) -> Result<UserAccount> {
        let doc = entity_to_document(&account)?;

        self.collection()
            .insert_one(doc)
            .await
            .map_err(|e| anyhow!("Failed to insert account: {}", e))?;

        Ok(account)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>> {
        let doc = self
            .collection()
            .find_one(doc! { "email": email })
            .await
            .map_err(|e| anyhow!("Failed to find account: {}", e))?;

        match doc {
            Some(d) => Ok(Some(document_to_entity(d)?)),
            None => Ok(None),
        }
    }
}

// ---------------------------------------------------------------------------
// MongoNotificationStore
// ---------------------------------------------------------------------------

/// Append-only notification storage in the `notifications` collection
#[derive(Clone, Debug)]
pub struct MongoNotificationStore {
    database: Database,
}

impl MongoNotificationStore {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    fn collection(&self) -> mongodb::Collection<Document> {
        self.database.collection("notifications")
    }
}

#[async_trait]
impl NotificationStore for MongoNotificationStore {
    async fn append(&self, mut record: NotificationRecord) -> Result<NotificationRecord> {
        // clamp against the latest stored timestamp so the feed never
        // reorders under clock skew
        let latest = self
            .collection()
            .find_one(doc! {})
            .sort(doc! { "created_at": -1 })
            .await
            .map_err(|e| anyhow!("Failed to read latest notification: {}", e))?;

        if let Some(doc) = latest {
            let last: NotificationRecord = document_to_entity(doc)?;
            if record.created_at < last.created_at {
                record.created_at = last.created_at;
            }
        }

        let doc = entity_to_document(&record)?;
        self.collection()
            .insert_one(doc)
            .await
            .map_err(|e| anyhow!("Failed to append notification: {}", e))?;

        Ok(record)
    }

    async fn list_for(&self, recipient: &str) -> Result<Vec<NotificationRecord>> {
        let cursor = self
            .collection()
            .find(doc! { "recipient": recipient })
            .sort(doc! { "created_at": 1 })
            .await
            .map_err(|e| anyhow!("Failed to list notifications: {}", e))?;

        let docs: Vec<Document> = cursor
            .try_collect()
            .await
            .map_err(|e| anyhow!("Failed to collect notifications: {}", e))?;

        docs.into_iter().map(document_to_entity).collect()
    }
}

// ---------------------------------------------------------------------------
// MongoFeedbackStore
// ---------------------------------------------------------------------------

/// Append-only feedback storage in the `feedback` collection
#[derive(Clone, Debug)]
pub struct MongoFeedbackStore {
    database: Database,
}

impl MongoFeedbackStore {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    fn collection(&self) -> mongodb::Collection<Document> {
        self.database.collection("feedback")
    }
}

#[async_trait]
impl FeedbackStore for MongoFeedbackStore {
    async fn append(&self, record: FeedbackRecord) -> Result<FeedbackRecord> {
        let doc = entity_to_document(&record)?;

        self.collection()
            .insert_one(doc)
            .await
            .map_err(|e| anyhow!("Failed to append feedback: {}", e))?;

        Ok(record)
    }

    async fn list(&self) -> Result<Vec<FeedbackRecord>> {
        let cursor = self
            .collection()
            .find(doc! {})
            .sort(doc! { "created_at": -1 })
            .await
            .map_err(|e| anyhow!("Failed to list feedback: {}", e))?;

        let docs: Vec<Document> = cursor
            .try_collect()
            .await
            .map_err(|e| anyhow!("Failed to collect feedback: {}", e))?;

        docs.into_iter().map(document_to_entity).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_document_round_trip() {
        let item = CatalogItem::new("Croissant", Some("img/croissant.png".into()), 450, 12)
            .unwrap();

        let doc = entity_to_document(&item).unwrap();
        assert!(doc.contains_key("_id"));
        assert!(!doc.contains_key("id"));
        assert_eq!(doc.get_str("name").unwrap(), "Croissant");

        let back: CatalogItem = document_to_entity(doc).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn test_cart_document_keeps_customer_field() {
        let cart = Cart::empty("maya@example.com");
        let doc = entity_to_document(&cart).unwrap();
        assert_eq!(doc.get_str("customer").unwrap(), "maya@example.com");

        let back: Cart = document_to_entity(doc).unwrap();
        assert_eq!(back, cart);
    }

    #[test]
    fn test_extra_document_fields_are_ignored() {
        let item = CatalogItem::new("Croissant", None, 450, 12).unwrap();
        let mut doc = entity_to_document(&item).unwrap();
        doc.insert("name_lower", "croissant");

        let back: CatalogItem = document_to_entity(doc).unwrap();
        assert_eq!(back, item);
    }
}
