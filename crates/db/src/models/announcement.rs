//! Announcement entity model and DTOs.

use academy_core::announcement::{
    validate_initial_status, validate_schedule, validate_target, AnnouncementStatus, Audience,
    Priority, MAX_TITLE_LEN,
};
use academy_core::error::CoreError;
use academy_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `announcements` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Announcement {
    pub id: DbId,
    pub title: String,
    pub body: String,
    #[sqlx(try_from = "String")]
    pub status: AnnouncementStatus,
    pub scheduled_for: Option<Timestamp>,
    #[sqlx(try_from = "String")]
    pub audience: Audience,
    pub target_user_id: Option<DbId>,
    #[sqlx(try_from = "String")]
    pub priority: Priority,
    pub created_by: Option<DbId>,
    pub published_at: Option<Timestamp>,
    /// Set once the fan-out for this announcement has been written.
    pub notifications_sent_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an announcement.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAnnouncement {
    #[validate(length(min = 1, max = MAX_TITLE_LEN))]
    pub title: String,
    #[validate(length(min = 1))]
    pub body: String,
    #[serde(default = "default_status")]
    pub status: AnnouncementStatus,
    pub scheduled_for: Option<Timestamp>,
    #[serde(default = "default_audience")]
    pub audience: Audience,
    pub target_user_id: Option<DbId>,
    #[serde(default)]
    pub priority: Priority,
}

impl CreateAnnouncement {
    /// Run field validation plus the cross-field announcement invariants.
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate()
            .map_err(|e| CoreError::Validation(e.to_string()))?;
        validate_initial_status(self.status)?;
        validate_target(self.audience, self.target_user_id)?;
        validate_schedule(self.status, self.scheduled_for)?;
        Ok(())
    }
}

fn default_status() -> AnnouncementStatus {
    AnnouncementStatus::Draft
}

fn default_audience() -> Audience {
    Audience::All
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn base() -> CreateAnnouncement {
        CreateAnnouncement {
            title: "Exam week".into(),
            body: "Exams start Monday.".into(),
            status: AnnouncementStatus::Draft,
            scheduled_for: None,
            audience: Audience::Students,
            target_user_id: None,
            priority: Priority::High,
        }
    }

    #[test]
    fn valid_draft_passes() {
        assert!(base().check().is_ok());
    }

    #[test]
    fn empty_title_rejected() {
        let input = CreateAnnouncement {
            title: String::new(),
            ..base()
        };
        assert_matches!(input.check(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn overlong_title_rejected() {
        let input = CreateAnnouncement {
            title: "x".repeat(MAX_TITLE_LEN as usize + 1),
            ..base()
        };
        assert_matches!(input.check(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn single_user_without_target_rejected() {
        let input = CreateAnnouncement {
            audience: Audience::SingleUser,
            ..base()
        };
        assert_matches!(input.check(), Err(CoreError::Validation(msg)) if msg.contains("target_user_id"));
    }

    #[test]
    fn scheduled_without_time_rejected() {
        let input = CreateAnnouncement {
            status: AnnouncementStatus::Scheduled,
            ..base()
        };
        assert_matches!(input.check(), Err(CoreError::Validation(msg)) if msg.contains("scheduled_for"));
    }

    #[test]
    fn deserializes_with_defaults() {
        let input: CreateAnnouncement =
            serde_json::from_str(r#"{"title":"Hi","body":"Welcome"}"#).unwrap();
        assert_eq!(input.status, AnnouncementStatus::Draft);
        assert_eq!(input.audience, Audience::All);
        assert_eq!(input.priority, Priority::Normal);
    }
}
