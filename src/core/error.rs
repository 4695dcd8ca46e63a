//! Typed error handling for the storefront API
//!
//! Every fallible boundary operation resolves to an [`ApiError`], which knows
//! its HTTP status code, a stable error code for programmatic handling, and
//! how to render itself as a JSON response body.
//!
//! # Error Categories
//!
//! - `Validation` / `Invalid`: missing or malformed input → 400
//! - `Auth`: bad credentials, missing or expired token → 401
//! - `NotFound`: missing catalog item, cart line, account → 404
//! - `Conflict`: duplicate registration → 409
//! - `Internal`: unexpected failures (store errors) → 500, logged server-side
//!   and returned as a generic message

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

/// The main error type for the storefront API
#[derive(Debug)]
pub enum ApiError {
    /// Missing or malformed input (single message)
    Validation(String),

    /// A form failed validation; all problems are reported at once
    /// so a caller can display them together
    Invalid(Vec<FieldIssue>),

    /// Bad credentials or an absent/invalid/expired bearer token
    Auth(String),

    /// A referenced resource does not exist
    NotFound { resource: &'static str, key: String },

    /// The operation conflicts with existing state (e.g. duplicate email)
    Conflict { resource: &'static str, key: String },

    /// Unexpected failure; the message is logged, never sent to the client
    Internal(String),
}

/// A single field validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

impl FieldIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Validation(msg) => write!(f, "Validation error: {}", msg),
            ApiError::Invalid(issues) => {
                let msgs: Vec<String> = issues
                    .iter()
                    .map(|i| format!("{}: {}", i.field, i.message))
                    .collect();
                write!(f, "Validation errors: {}", msgs.join(", "))
            }
            ApiError::Auth(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::NotFound { resource, key } => {
                write!(f, "{} '{}' not found", resource, key)
            }
            ApiError::Conflict { resource, key } => {
                write!(f, "{} '{}' already exists", resource, key)
            }
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Invalid(_) => StatusCode::BAD_REQUEST,
            ApiError::Auth(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::Invalid(_) => "VALIDATION_ERROR",
            ApiError::Auth(_) => "AUTH_ERROR",
            ApiError::NotFound { .. } => "NOT_FOUND",
            ApiError::Conflict { .. } => "CONFLICT",
            ApiError::Internal(_) => "SERVER_ERROR",
        }
    }

    /// Convert to an error response body
    pub fn to_response(&self) -> ErrorResponse {
        let message = match self {
            // Never leak internals to the client
            ApiError::Internal(_) => "An unexpected error occurred".to_string(),
            other => other.to_string(),
        };

        ErrorResponse {
            code: self.error_code().to_string(),
            message,
            details: self.details(),
        }
    }

    /// Get additional details for the error
    fn details(&self) -> Option<serde_json::Value> {
        match self {
            ApiError::Invalid(issues) => Some(serde_json::json!({ "fields": issues })),
            ApiError::NotFound { resource, key } => Some(serde_json::json!({
                "resource": resource,
                "key": key,
            })),
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(detail) = &self {
            tracing::error!(detail = %detail, "internal error while handling request");
        }

        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

/// Store failures surface as opaque 500s
impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}

/// A specialized Result type for storefront operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_follow_taxonomy() {
        assert_eq!(
            ApiError::Validation("quantity must be at least 1".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Invalid(vec![]).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Auth("invalid token".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::NotFound {
                resource: "catalog item",
                key: "Eclair".into()
            }
            .status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Conflict {
                resource: "account",
                key: "a@b.c".into()
            }
            .status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_not_found_display() {
        let err = ApiError::NotFound {
            resource: "catalog item",
            key: "Chocolate Cake".into(),
        };
        assert!(err.to_string().contains("Chocolate Cake"));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_invalid_lists_every_field() {
        let err = ApiError::Invalid(vec![
            FieldIssue::new("required_date", "date is required"),
            FieldIssue::new("colors", "at most 3 colors may be chosen"),
        ]);
        let display = err.to_string();
        assert!(display.contains("required_date"));
        assert!(display.contains("colors"));

        let details = err.to_response().details.unwrap();
        assert_eq!(details["fields"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_internal_error_body_is_generic() {
        let err = ApiError::Internal("mongodb: connection refused at 10.0.0.3".into());
        let body = err.to_response();
        assert_eq!(body.code, "SERVER_ERROR");
        assert!(!body.message.contains("mongodb"));
        assert!(!body.message.contains("10.0.0.3"));
    }

    #[test]
    fn test_error_code_mapping() {
        assert_eq!(
            ApiError::Conflict {
                resource: "account",
                key: "a@b.c".into()
            }
            .error_code(),
            "CONFLICT"
        );
        assert_eq!(ApiError::Auth("nope".into()).error_code(), "AUTH_ERROR");
        assert_eq!(
            ApiError::Validation("bad".into()).error_code(),
            "VALIDATION_ERROR"
        );
    }

    #[test]
    fn test_from_anyhow_is_internal() {
        let err: ApiError = anyhow::anyhow!("lock poisoned").into();
        assert!(matches!(err, ApiError::Internal(_)));
    }
}
