//! Route table for the storefront API

use super::AppState;
use super::handlers::{auth, cart, feedback, inventory, notifications};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the application router.
///
/// - `POST /api/auth/register`, `POST /api/auth/login` — public
/// - `/api/cart*`, `/api/notifications`, `/api/feedback` — bearer-authenticated
/// - `/admin/*` — bearer-authenticated admin surface
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/cart", get(cart::get_cart))
        .route("/api/cart/add", post(cart::add_item))
        .route("/api/cart/add-cake", post(cart::add_cake))
        .route("/api/cart/lines/{index}", delete(cart::remove_line))
        .route("/api/notifications", get(notifications::list_notifications))
        .route("/api/feedback", post(feedback::submit_feedback))
        .route(
            "/admin/inventory",
            get(inventory::list_inventory).post(inventory::create_item),
        )
        .route(
            "/admin/inventory/{id}",
            put(inventory::update_item).delete(inventory::delete_item),
        )
        .route("/admin/feedback", get(feedback::list_feedback))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
