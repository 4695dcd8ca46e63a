//! Axum extractors for authenticated requests
//!
//! [`Customer`] pulls the bearer credential from the `Authorization`
//! header and verifies it. Absence or invalidity rejects the request with
//! a 401 before the handler runs; the handler receives only the asserted
//! customer identity.

use super::AppState;
use crate::core::error::ApiError;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

/// The verified identity of the calling customer (lowercased email)
#[derive(Debug, Clone)]
pub struct Customer(pub String);

impl FromRequestParts<AppState> for Customer {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::Auth("missing Authorization header".into()))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::Auth("expected a bearer token".into()))?;

        let identity = state
            .tokens
            .verify(token)
            .map_err(|e| ApiError::Auth(e.to_string()))?;

        Ok(Customer(identity))
    }
}
