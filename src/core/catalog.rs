//! Catalog items: the bakery's sellable, non-custom products
//!
//! Stock status is derived from the stock level rather than stored as an
//! independent flag, so the two can never disagree. The low-stock predicate
//! is a pure function of stock level and threshold; the threshold itself
//! lives in one place (configuration, defaulting to
//! [`DEFAULT_LOW_STOCK_THRESHOLD`]) and is consumed by both the admin
//! listing and the stock-alert path.

use crate::core::error::{ApiError, ApiResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Items whose stock level falls below this are flagged for restocking
/// attention, unless configuration overrides it.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 10;

/// Availability of a catalog item, derived from its stock level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StockStatus {
    InStock,
    OutOfStock,
}

impl StockStatus {
    /// Derive the status from a stock level
    pub fn from_stock_level(stock_level: i64) -> Self {
        if stock_level > 0 {
            StockStatus::InStock
        } else {
            StockStatus::OutOfStock
        }
    }
}

/// A sellable product with a fixed unit price and a tracked stock level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: Uuid,
    pub name: String,
    pub image: Option<String>,
    /// Unit price in cents; always strictly positive
    pub unit_price_cents: i64,
    pub stock_level: i64,
    pub status: StockStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CatalogItem {
    /// Create a catalog item, enforcing the positive-price invariant
    pub fn new(
        name: impl Into<String>,
        image: Option<String>,
        unit_price_cents: i64,
        stock_level: i64,
    ) -> ApiResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ApiError::Validation("item name is required".into()));
        }
        if unit_price_cents <= 0 {
            return Err(ApiError::Validation(format!(
                "unit price must be positive (got {})",
                unit_price_cents
            )));
        }
        if stock_level < 0 {
            return Err(ApiError::Validation(format!(
                "stock level cannot be negative (got {})",
                stock_level
            )));
        }

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            image,
            unit_price_cents,
            stock_level,
            status: StockStatus::from_stock_level(stock_level),
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply a partial update, re-deriving the status and refreshing
    /// the update timestamp. Invariants are re-checked.
    pub fn apply(&mut self, patch: CatalogItemPatch) -> ApiResult<()> {
        if let Some(name) = patch.name {
            if name.trim().is_empty() {
                return Err(ApiError::Validation("item name is required".into()));
            }
            self.name = name;
        }
        if let Some(image) = patch.image {
            self.image = Some(image);
        }
        if let Some(price) = patch.unit_price_cents {
            if price <= 0 {
                return Err(ApiError::Validation(format!(
                    "unit price must be positive (got {})",
                    price
                )));
            }
            self.unit_price_cents = price;
        }
        if let Some(stock) = patch.stock_level {
            if stock < 0 {
                return Err(ApiError::Validation(format!(
                    "stock level cannot be negative (got {})",
                    stock
                )));
            }
            self.stock_level = stock;
        }

        self.status = StockStatus::from_stock_level(self.stock_level);
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// Partial update for a catalog item; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogItemPatch {
    pub name: Option<String>,
    pub image: Option<String>,
    pub unit_price_cents: Option<i64>,
    pub stock_level: Option<i64>,
}

/// True iff the item's stock level is strictly below the threshold.
///
/// A stock level equal to the threshold is not low.
pub fn is_low_stock(item: &CatalogItem, threshold: i64) -> bool {
    item.stock_level < threshold
}
