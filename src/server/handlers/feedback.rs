//! Customer feedback: submission and the admin listing

use crate::core::error::ApiResult;
use crate::core::feedback::FeedbackRecord;
use crate::server::AppState;
use crate::server::extract::Customer;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use tracing::info;

/// Body for `POST /api/feedback`
#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub description: String,
    pub rating: i64,
    pub image: Option<String>,
}

/// `POST /api/feedback`
pub async fn submit_feedback(
    customer: Customer,
    State(state): State<AppState>,
    Json(req): Json<FeedbackRequest>,
) -> ApiResult<(StatusCode, Json<FeedbackRecord>)> {
    let record = FeedbackRecord::new(&customer.0, req.description, req.rating, req.image)?;
    let record = state.feedback.append(record).await?;

    info!(author = %record.author, rating = record.rating, "recorded feedback");
    Ok((StatusCode::CREATED, Json(record)))
}

/// `GET /admin/feedback` — all feedback, newest first
pub async fn list_feedback(
    _admin: Customer,
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<FeedbackRecord>>> {
    let records = state.feedback.list().await?;
    Ok(Json(records))
}
