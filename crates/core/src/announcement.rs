//! Announcement lifecycle, audience selectors, and priority levels.
//!
//! The database stores each of these as TEXT; the values here must match the
//! CHECK constraints in `20240101000002_create_announcements.sql`.

use crate::error::CoreError;
use crate::macros::define_text_enum;
use crate::roles::Role;
use crate::types::{DbId, Timestamp};

/// Maximum title length accepted for an announcement.
pub const MAX_TITLE_LEN: u64 = 200;

define_text_enum! {
    /// Publication state of an announcement.
    AnnouncementStatus as "announcement status" {
        Draft = "draft",
        Scheduled = "scheduled",
        Published = "published",
        Archived = "archived",
    }
}

define_text_enum! {
    /// Who receives the notifications derived from an announcement.
    Audience as "audience" {
        All = "all",
        Students = "students",
        Affiliates = "affiliates",
        Admins = "admins",
        SingleUser = "single_user",
    }
}

define_text_enum! {
    /// Display priority copied onto derived notifications.
    Priority as "priority" {
        Low = "low",
        Normal = "normal",
        High = "high",
        Urgent = "urgent",
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Normal
    }
}

impl Audience {
    /// Map a plural role cohort to the singular role stored on profiles.
    ///
    /// `All` and `SingleUser` are not role cohorts and return `None`.
    pub fn cohort_role(self) -> Option<Role> {
        match self {
            Audience::Students => Some(Role::Student),
            Audience::Affiliates => Some(Role::Affiliate),
            Audience::Admins => Some(Role::Admin),
            Audience::All | Audience::SingleUser => None,
        }
    }
}

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

/// Returns the set of statuses reachable from `from`.
///
/// `Archived` is terminal.
pub fn valid_transitions(from: AnnouncementStatus) -> &'static [AnnouncementStatus] {
    use AnnouncementStatus::*;
    match from {
        Draft => &[Scheduled, Published, Archived],
        Scheduled => &[Draft, Published, Archived],
        Published => &[Archived],
        Archived => &[],
    }
}

/// Check whether a transition from `from` to `to` is valid.
pub fn can_transition(from: AnnouncementStatus, to: AnnouncementStatus) -> bool {
    valid_transitions(from).contains(&to)
}

/// Validate a state transition, returning a `Conflict` for invalid ones.
pub fn validate_transition(
    from: AnnouncementStatus,
    to: AnnouncementStatus,
) -> Result<(), CoreError> {
    if can_transition(from, to) {
        Ok(())
    } else {
        Err(CoreError::Conflict(format!(
            "Invalid announcement transition: {from} -> {to}"
        )))
    }
}

// ---------------------------------------------------------------------------
// Field invariants
// ---------------------------------------------------------------------------

/// `target_user_id` must be set iff the audience is `single_user`.
pub fn validate_target(audience: Audience, target_user_id: Option<DbId>) -> Result<(), CoreError> {
    match (audience, target_user_id) {
        (Audience::SingleUser, None) => Err(CoreError::Validation(
            "target_user_id is required when audience is single_user".into(),
        )),
        (Audience::SingleUser, Some(_)) => Ok(()),
        (other, Some(_)) => Err(CoreError::Validation(format!(
            "target_user_id must be empty when audience is {other}"
        ))),
        (_, None) => Ok(()),
    }
}

/// A `scheduled` announcement needs a `scheduled_for` timestamp.
pub fn validate_schedule(
    status: AnnouncementStatus,
    scheduled_for: Option<Timestamp>,
) -> Result<(), CoreError> {
    if status == AnnouncementStatus::Scheduled && scheduled_for.is_none() {
        return Err(CoreError::Validation(
            "scheduled_for is required when status is scheduled".into(),
        ));
    }
    Ok(())
}

/// Statuses an announcement may be created in.
pub fn validate_initial_status(status: AnnouncementStatus) -> Result<(), CoreError> {
    match status {
        AnnouncementStatus::Archived => Err(CoreError::Validation(
            "announcements cannot be created archived".into(),
        )),
        _ => Ok(()),
    }
}
