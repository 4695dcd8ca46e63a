//! Append-only notification records
//!
//! Notifications are user-visible messages produced by the system (an order
//! landing in a cart, stock running low). Stores guarantee that timestamps
//! are monotonic non-decreasing in insertion order, so a recipient's feed
//! never reorders under clock skew.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What produced the notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    OrderPlaced,
    StockAlert,
    General,
}

/// A single user-visible message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationRecord {
    pub id: Uuid,
    /// Recipient identity (lowercased email)
    pub recipient: String,
    pub message: String,
    pub kind: NotificationKind,
    pub created_at: DateTime<Utc>,
}

impl NotificationRecord {
    pub fn new(
        recipient: impl Into<String>,
        message: impl Into<String>,
        kind: NotificationKind,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            recipient: recipient.into(),
            message: message.into(),
            kind,
            created_at: Utc::now(),
        }
    }
}
