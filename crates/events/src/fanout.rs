//! Audience resolution and per-recipient notification fan-out.
//!
//! [`FanoutNotifier`] turns one published announcement into one
//! notification row per recipient, written in a single insert.

use academy_core::announcement::Audience;
use academy_core::notification::{
    announcement_action_url, announcement_payload, expires_at, CATEGORY_BROADCAST,
    TYPE_ANNOUNCEMENT,
};
use academy_core::types::{DbId, Timestamp};
use academy_db::models::announcement::Announcement;
use academy_db::models::notification::NewNotification;
use academy_db::models::profile::Profile;
use academy_db::repositories::{AnnouncementRepo, ProfileRepo};
use academy_db::DbPool;

/// Result of a successful fan-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FanoutOutcome {
    /// One notification was written for each of `recipients` profiles.
    Delivered { recipients: u64 },
    /// The audience resolved to nobody. Not an error.
    NoRecipients,
    /// Another caller recorded this fan-out first; nothing was written.
    AlreadySent,
}

impl FanoutOutcome {
    /// Number of notifications written by this call.
    pub fn recipients(self) -> u64 {
        match self {
            FanoutOutcome::Delivered { recipients } => recipients,
            FanoutOutcome::NoRecipients | FanoutOutcome::AlreadySent => 0,
        }
    }
}

/// Writes announcement-derived notifications.
#[derive(Clone)]
pub struct FanoutNotifier {
    pool: DbPool,
    ttl_days: i64,
}

impl FanoutNotifier {
    /// Create a notifier whose notifications expire `ttl_days` after creation.
    pub fn new(pool: DbPool, ttl_days: i64) -> Self {
        Self { pool, ttl_days }
    }

    /// Resolve the profiles an announcement is addressed to.
    ///
    /// A `single_user` announcement whose target no longer exists resolves to
    /// an empty cohort.
    pub async fn resolve_audience(
        &self,
        announcement: &Announcement,
    ) -> Result<Vec<Profile>, sqlx::Error> {
        match announcement.audience {
            Audience::All => ProfileRepo::list_all(&self.pool).await,
            Audience::SingleUser => match announcement.target_user_id {
                Some(user_id) => Ok(ProfileRepo::find_by_id(&self.pool, user_id)
                    .await?
                    .into_iter()
                    .collect()),
                None => Ok(Vec::new()),
            },
            cohort => match cohort.cohort_role() {
                Some(role) => ProfileRepo::list_by_role(&self.pool, role).await,
                None => Ok(Vec::new()),
            },
        }
    }

    /// Fan an announcement out to its audience.
    ///
    /// The notification rows and the `notifications_sent_at` stamp are
    /// written in one transaction, including when the audience is empty. On
    /// error nothing is kept, so a later run can retry without duplicating.
    pub async fn notify(
        &self,
        announcement: &Announcement,
        now: Timestamp,
    ) -> Result<FanoutOutcome, sqlx::Error> {
        let recipients = self.resolve_audience(announcement).await?;
        let user_ids: Vec<DbId> = recipients.iter().map(|p| p.id).collect();
        let rows = build_notifications(announcement, &user_ids, now, self.ttl_days);

        let Some(inserted) =
            AnnouncementRepo::record_fanout(&self.pool, announcement.id, &rows, now).await?
        else {
            tracing::info!(
                announcement_id = announcement.id,
                "Announcement notifications already sent, skipping"
            );
            return Ok(FanoutOutcome::AlreadySent);
        };

        if user_ids.is_empty() {
            tracing::info!(
                announcement_id = announcement.id,
                audience = %announcement.audience,
                "No recipients for announcement, skipping notifications"
            );
            return Ok(FanoutOutcome::NoRecipients);
        }

        tracing::info!(
            announcement_id = announcement.id,
            audience = %announcement.audience,
            recipients = inserted,
            "Announcement notifications created"
        );

        Ok(FanoutOutcome::Delivered {
            recipients: inserted,
        })
    }
}

/// Build one notification per recipient, copying the announcement content.
pub fn build_notifications(
    announcement: &Announcement,
    user_ids: &[DbId],
    now: Timestamp,
    ttl_days: i64,
) -> Vec<NewNotification> {
    let payload = announcement_payload(announcement.id, announcement.audience);
    let action_url = announcement_action_url(announcement.id);
    let expiry = expires_at(now, ttl_days);

    user_ids
        .iter()
        .map(|&user_id| NewNotification {
            user_id,
            notification_type: TYPE_ANNOUNCEMENT.to_string(),
            category: CATEGORY_BROADCAST.to_string(),
            title: announcement.title.clone(),
            message: announcement.body.clone(),
            payload: Some(payload.clone()),
            action_url: Some(action_url.clone()),
            priority: announcement.priority,
            expires_at: Some(expiry),
        })
        .collect()
}
