//! Admin inventory surface over the catalog store
//!
//! The listing decorates every item with a computed `low_stock` flag; the
//! threshold comes from configuration and is the same one the stock-alert
//! path uses.

use crate::core::catalog::{CatalogItem, CatalogItemPatch, is_low_stock};
use crate::core::error::{ApiError, ApiResult};
use crate::core::notification::{NotificationKind, NotificationRecord};
use crate::server::extract::Customer;
use crate::server::AppState;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

/// A catalog item as shown in the admin listing
#[derive(Debug, Serialize)]
pub struct InventoryEntry {
    #[serde(flatten)]
    pub item: CatalogItem,
    /// Computed from the stock level and the configured threshold,
    /// never stored
    pub low_stock: bool,
}

/// Body for `POST /admin/inventory`
#[derive(Debug, Deserialize)]
pub struct NewItemRequest {
    pub name: String,
    pub image: Option<String>,
    pub unit_price_cents: i64,
    #[serde(default)]
    pub stock_level: i64,
}

/// `GET /admin/inventory`
pub async fn list_inventory(
    _admin: Customer,
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<InventoryEntry>>> {
    let items = state.catalog.list().await?;
    let entries = items
        .into_iter()
        .map(|item| InventoryEntry {
            low_stock: is_low_stock(&item, state.low_stock_threshold),
            item,
        })
        .collect();
    Ok(Json(entries))
}

/// `POST /admin/inventory`
pub async fn create_item(
    admin: Customer,
    State(state): State<AppState>,
    Json(req): Json<NewItemRequest>,
) -> ApiResult<(StatusCode, Json<CatalogItem>)> {
    let item = CatalogItem::new(req.name, req.image, req.unit_price_cents, req.stock_level)?;
    let item = state.catalog.insert(item).await?;

    info!(admin = %admin.0, item = %item.name, "created catalog item");
    Ok((StatusCode::CREATED, Json(item)))
}

/// `PUT /admin/inventory/{id}`
pub async fn update_item(
    admin: Customer,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<CatalogItemPatch>,
) -> ApiResult<Json<CatalogItem>> {
    let mut item = state
        .catalog
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            resource: "catalog item",
            key: id.to_string(),
        })?;

    let was_low = is_low_stock(&item, state.low_stock_threshold);
    item.apply(patch)?;
    let item = state.catalog.update(&id, item).await?;

    if !was_low && is_low_stock(&item, state.low_stock_threshold) {
        warn!(item = %item.name, stock = item.stock_level, "item fell below low-stock threshold");
        state
            .notifications
            .append(NotificationRecord::new(
                &admin.0,
                format!(
                    "'{}' is running low ({} left, threshold {})",
                    item.name, item.stock_level, state.low_stock_threshold
                ),
                NotificationKind::StockAlert,
            ))
            .await?;
    }

    Ok(Json(item))
}

/// `DELETE /admin/inventory/{id}`
pub async fn delete_item(
    admin: Customer,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    if state.catalog.delete(&id).await? {
        info!(admin = %admin.0, id = %id, "deleted catalog item");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound {
            resource: "catalog item",
            key: id.to_string(),
        })
    }
}
