//! Well-known notification tags and helpers for announcement-derived rows.
//!
//! The type and category values are matched by the client's notification
//! bell, so they must stay stable.

use chrono::Duration;
use serde_json::json;

use crate::announcement::Audience;
use crate::types::{DbId, Timestamp};

/// Type tag for notifications materialized from a published announcement.
pub const TYPE_ANNOUNCEMENT: &str = "announcement";

/// Type tag for notifications sent directly by an administrator.
pub const TYPE_ADMIN_MESSAGE: &str = "admin_message";

/// Category for audience-wide broadcasts.
pub const CATEGORY_BROADCAST: &str = "broadcast";

/// Category for one-to-one administrator messages.
pub const CATEGORY_DIRECT: &str = "direct";

/// Default notification lifetime before it drops out of listings.
pub const DEFAULT_TTL_DAYS: i64 = 30;

/// Payload tying a notification back to its originating announcement.
pub fn announcement_payload(announcement_id: DbId, audience: Audience) -> serde_json::Value {
    json!({
        "announcement_id": announcement_id,
        "audience": audience.as_str(),
    })
}

/// Client route that opens the announcement detail view.
pub fn announcement_action_url(announcement_id: DbId) -> String {
    format!("/announcements/{announcement_id}")
}

/// Expiry timestamp for a notification created at `created_at`.
///
/// Non-positive TTLs fall back to [`DEFAULT_TTL_DAYS`].
pub fn expires_at(created_at: Timestamp, ttl_days: i64) -> Timestamp {
    let days = if ttl_days > 0 { ttl_days } else { DEFAULT_TTL_DAYS };
    created_at + Duration::days(days)
}
