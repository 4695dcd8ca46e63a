//! Cart aggregator: per-customer cart reads and line-item additions
//!
//! The cart identity always comes from the verified bearer token; there is
//! no way to address another customer's cart. Carts are created lazily on
//! first add and persisted whole (last-write-wins under concurrent adds).

use crate::core::cake::{CakeOrderForm, CakeSpec};
use crate::core::cart::{Cart, CartLine};
use crate::core::error::{ApiError, ApiResult};
use crate::core::notification::{NotificationKind, NotificationRecord};
use crate::server::extract::Customer;
use crate::server::AppState;
use axum::Json;
use axum::extract::{Path, State};
use chrono::Utc;
use serde::Deserialize;
use tracing::info;

/// Body for `POST /api/cart/add`
#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub name: Option<String>,
    /// Defaults to 1 when omitted; must be at least 1
    pub quantity: Option<i64>,
}

/// `GET /api/cart` — the caller's cart, empty if nothing was added yet
pub async fn get_cart(
    customer: Customer,
    State(state): State<AppState>,
) -> ApiResult<Json<Cart>> {
    let cart = state
        .carts
        .get(&customer.0)
        .await?
        .unwrap_or_else(|| Cart::empty(&customer.0));
    Ok(Json(cart))
}

/// `POST /api/cart/add` — append a catalog product line
pub async fn add_item(
    customer: Customer,
    State(state): State<AppState>,
    Json(req): Json<AddItemRequest>,
) -> ApiResult<Json<Cart>> {
    let name = req
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| ApiError::Validation("item name is required".into()))?;

    let quantity = req.quantity.unwrap_or(1);
    let quantity = u32::try_from(quantity).ok().filter(|q| *q >= 1).ok_or_else(|| {
        ApiError::Validation(format!("quantity must be at least 1 (got {})", quantity))
    })?;

    let item = state.catalog.find_by_name(name).await?.ok_or_else(|| {
        ApiError::NotFound {
            resource: "catalog item",
            key: name.to_string(),
        }
    })?;

    let mut cart = state
        .carts
        .get(&customer.0)
        .await?
        .unwrap_or_else(|| Cart::empty(&customer.0));

    cart.push_line(CartLine::Product {
        name: item.name.clone(),
        quantity,
        unit_price_cents: item.unit_price_cents,
    });
    let cart = state.carts.put(cart).await?;

    info!(customer = %customer.0, item = %item.name, quantity, "added catalog item to cart");
    Ok(Json(cart))
}

/// `POST /api/cart/add-cake` — validate, price and append a custom cake
pub async fn add_cake(
    customer: Customer,
    State(state): State<AppState>,
    Json(form): Json<CakeOrderForm>,
) -> ApiResult<Json<Cart>> {
    let today = Utc::now().date_naive();
    let spec = CakeSpec::from_form(form, today)?;

    let mut cart = state
        .carts
        .get(&customer.0)
        .await?
        .unwrap_or_else(|| Cart::empty(&customer.0));

    let message = format!(
        "Your custom {} cake for {} was added to your cart",
        spec.occasion, spec.required_date
    );
    cart.push_line(CartLine::CustomCake { spec });
    let cart = state.carts.put(cart).await?;

    state
        .notifications
        .append(NotificationRecord::new(
            &customer.0,
            message,
            NotificationKind::OrderPlaced,
        ))
        .await?;

    info!(customer = %customer.0, "added custom cake to cart");
    Ok(Json(cart))
}

/// `DELETE /api/cart/lines/{index}` — remove a line by position
pub async fn remove_line(
    customer: Customer,
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> ApiResult<Json<Cart>> {
    let mut cart = state
        .carts
        .get(&customer.0)
        .await?
        .unwrap_or_else(|| Cart::empty(&customer.0));

    cart.remove_line(index).ok_or_else(|| ApiError::NotFound {
        resource: "cart line",
        key: index.to_string(),
    })?;

    let cart = state.carts.put(cart).await?;
    info!(customer = %customer.0, index, "removed cart line");
    Ok(Json(cart))
}
