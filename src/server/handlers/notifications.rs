//! Notification feed for the calling customer

use crate::core::error::ApiResult;
use crate::core::notification::NotificationRecord;
use crate::server::AppState;
use crate::server::extract::Customer;
use axum::Json;
use axum::extract::State;

/// `GET /api/notifications` — the caller's notifications, oldest first
pub async fn list_notifications(
    customer: Customer,
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<NotificationRecord>>> {
    let records = state.notifications.list_for(&customer.0).await?;
    Ok(Json(records))
}
