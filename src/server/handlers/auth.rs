//! Auth gateway: registration and login
//!
//! Registration is a multipart form (profile fields plus an optional
//! avatar reference). Only a salted digest of the password is ever stored.
//! Login issues the signed bearer credential carrying the customer
//! identity as its only claim.

use crate::core::account::{Profile, UserAccount, normalize_email};
use crate::core::error::{ApiError, ApiResult, FieldIssue};
use crate::server::AppState;
use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

/// Registration form, collected from the multipart payload
#[derive(Debug, Default, Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(length(min = 1, max = 120, message = "name is required"))]
    pub name: String,

    #[validate(email(message = "a valid email address is required"))]
    pub email: String,

    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,

    pub phone: Option<String>,

    /// Reference to an uploaded profile image; the bytes are stored elsewhere
    pub avatar: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: Profile,
}

/// `POST /api/auth/register`
pub async fn register(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<Profile>)> {
    let mut form = RegisterForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(format!("invalid multipart payload: {}", e)))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        let value = field
            .text()
            .await
            .map_err(|e| ApiError::Validation(format!("unreadable field '{}': {}", name, e)))?;

        match name.as_str() {
            "name" => form.name = value,
            "email" => form.email = value,
            "password" => form.password = value,
            "phone" => form.phone = Some(value),
            "avatar" => form.avatar = Some(value),
            _ => {}
        }
    }

    form.validate().map_err(validation_issues)?;

    let email = normalize_email(&form.email);
    if state.accounts.find_by_email(&email).await?.is_some() {
        return Err(ApiError::Conflict {
            resource: "account",
            key: email,
        });
    }

    let digest = crate::auth::hash_password(&form.password)
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    let account = UserAccount::new(email, form.name, form.phone, form.avatar, digest);
    let account = state.accounts.insert(account).await?;

    info!(email = %account.email, "registered new account");
    Ok((StatusCode::CREATED, Json(account.profile())))
}

/// `POST /api/auth/login`
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let email = normalize_email(&req.email);

    let account = state
        .accounts
        .find_by_email(&email)
        .await?
        .ok_or_else(|| ApiError::Auth("invalid email or password".into()))?;

    let matches = crate::auth::verify_password(&req.password, &account.password_digest)
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    if !matches {
        return Err(ApiError::Auth("invalid email or password".into()));
    }

    let token = state
        .tokens
        .issue(&account.email)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    info!(email = %account.email, "issued bearer credential");
    Ok(Json(LoginResponse {
        token,
        user: account.profile(),
    }))
}

/// Flatten `validator` errors into the issue-list shape
fn validation_issues(errors: validator::ValidationErrors) -> ApiError {
    let issues = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("invalid value for '{}'", field));
                FieldIssue::new(field.to_string(), message)
            })
        })
        .collect();
    ApiError::Invalid(issues)
}
