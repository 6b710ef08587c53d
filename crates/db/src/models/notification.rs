//! Notification entity model and DTOs.

use academy_core::announcement::{Priority, MAX_TITLE_LEN};
use academy_core::error::CoreError;
use academy_core::notification::{CATEGORY_DIRECT, TYPE_ADMIN_MESSAGE};
use academy_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `notifications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub user_id: DbId,
    pub notification_type: String,
    pub category: String,
    pub title: String,
    pub message: String,
    pub payload: Option<serde_json::Value>,
    pub action_url: Option<String>,
    #[sqlx(try_from = "String")]
    pub priority: Priority,
    pub read_at: Option<Timestamp>,
    pub expires_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// A notification ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewNotification {
    pub user_id: DbId,
    pub notification_type: String,
    pub category: String,
    pub title: String,
    pub message: String,
    pub payload: Option<serde_json::Value>,
    pub action_url: Option<String>,
    pub priority: Priority,
    pub expires_at: Option<Timestamp>,
}

/// DTO for an administrator sending a notification to a single recipient.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SendNotification {
    pub user_id: DbId,
    #[validate(length(min = 1, max = MAX_TITLE_LEN))]
    pub title: String,
    #[validate(length(min = 1))]
    pub message: String,
    pub action_url: Option<String>,
    pub payload: Option<serde_json::Value>,
    #[serde(default)]
    pub priority: Priority,
}

impl SendNotification {
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate()
            .map_err(|e| CoreError::Validation(e.to_string()))
    }

    /// Convert into an insertable row tagged as a direct admin message.
    pub fn into_new_notification(self, expires_at: Option<Timestamp>) -> NewNotification {
        NewNotification {
            user_id: self.user_id,
            notification_type: TYPE_ADMIN_MESSAGE.to_string(),
            category: CATEGORY_DIRECT.to_string(),
            title: self.title,
            message: self.message,
            payload: self.payload,
            action_url: self.action_url,
            priority: self.priority,
            expires_at,
        }
    }
}
