//! Customer feedback records
//!
//! Created by customers, read by the admin dashboard. Ratings are bounded
//! to the 1..=5 scale at construction.

use crate::core::error::{ApiError, ApiResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const RATING_MIN: u8 = 1;
pub const RATING_MAX: u8 = 5;

/// A piece of customer feedback with a bounded rating
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub id: Uuid,
    /// Author identity (lowercased email)
    pub author: String,
    pub description: String,
    /// Always within [`RATING_MIN`]..=[`RATING_MAX`]
    pub rating: u8,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl FeedbackRecord {
    /// Create a feedback record, enforcing rating bounds
    pub fn new(
        author: impl Into<String>,
        description: impl Into<String>,
        rating: i64,
        image: Option<String>,
    ) -> ApiResult<Self> {
        if rating < i64::from(RATING_MIN) || rating > i64::from(RATING_MAX) {
            return Err(ApiError::Validation(format!(
                "rating must be between {} and {} (got {})",
                RATING_MIN, RATING_MAX, rating
            )));
        }
        let description = description.into();
        if description.trim().is_empty() {
            return Err(ApiError::Validation("description is required".into()));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            author: author.into(),
            description,
            rating: rating as u8,
            image,
            created_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_bounds() {
        assert!(FeedbackRecord::new("a@b.c", "lovely croissants", 0, None).is_err());
        assert!(FeedbackRecord::new("a@b.c", "lovely croissants", 6, None).is_err());
        assert!(FeedbackRecord::new("a@b.c", "lovely croissants", -2, None).is_err());
        assert!(FeedbackRecord::new("a@b.c", "lovely croissants", 1, None).is_ok());
        assert!(FeedbackRecord::new("a@b.c", "lovely croissants", 5, None).is_ok());
    }

    #[test]
    fn test_description_required() {
        assert!(FeedbackRecord::new("a@b.c", "  ", 4, None).is_err());
    }
}
