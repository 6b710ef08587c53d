//! Repository for the `announcements` table.

use academy_core::announcement::AnnouncementStatus;
use academy_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::announcement::{Announcement, CreateAnnouncement};
use crate::models::notification::NewNotification;
use crate::repositories::NotificationRepo;

/// Column list for `announcements` queries.
const COLUMNS: &str = "id, title, body, status, scheduled_for, audience, target_user_id, \
     priority, created_by, published_at, notifications_sent_at, created_at, updated_at";

/// Provides lifecycle operations for announcements.
pub struct AnnouncementRepo;

impl AnnouncementRepo {
    /// Insert an announcement in the given status.
    pub async fn create(
        pool: &PgPool,
        input: &CreateAnnouncement,
        status: AnnouncementStatus,
        created_by: Option<DbId>,
    ) -> Result<Announcement, sqlx::Error> {
        let query = format!(
            "INSERT INTO announcements \
                (title, body, status, scheduled_for, audience, target_user_id, priority, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Announcement>(&query)
            .bind(&input.title)
            .bind(&input.body)
            .bind(status.as_str())
            .bind(input.scheduled_for)
            .bind(input.audience.as_str())
            .bind(input.target_user_id)
            .bind(input.priority.as_str())
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// Find an announcement by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Announcement>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM announcements WHERE id = $1");
        sqlx::query_as::<_, Announcement>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List announcements, newest first, optionally filtered by status.
    pub async fn list(
        pool: &PgPool,
        status: Option<AnnouncementStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Announcement>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM announcements \
             WHERE ($1::TEXT IS NULL OR status = $1) \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Announcement>(&query)
            .bind(status.map(AnnouncementStatus::as_str))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// List scheduled announcements whose `scheduled_for` is at or before `now`.
    pub async fn list_due(pool: &PgPool, now: Timestamp) -> Result<Vec<Announcement>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM announcements \
             WHERE status = 'scheduled' AND scheduled_for <= $1 \
             ORDER BY scheduled_for ASC, id ASC"
        );
        sqlx::query_as::<_, Announcement>(&query)
            .bind(now)
            .fetch_all(pool)
            .await
    }

    /// Publish an announcement if its current status is one of `from`.
    ///
    /// This is a compare-and-swap: the status check and the update happen in
    /// one statement. Returns `None` when the row does not exist or has
    /// already moved to another status.
    pub async fn publish_from(
        pool: &PgPool,
        id: DbId,
        from: &[AnnouncementStatus],
        now: Timestamp,
    ) -> Result<Option<Announcement>, sqlx::Error> {
        let from: Vec<&str> = from.iter().map(|s| s.as_str()).collect();
        let query = format!(
            "UPDATE announcements \
             SET status = 'published', published_at = $3, updated_at = NOW() \
             WHERE id = $1 AND status = ANY($2) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Announcement>(&query)
            .bind(id)
            .bind(&from)
            .bind(now)
            .fetch_optional(pool)
            .await
    }

    /// Archive an announcement that is not already archived.
    pub async fn archive(pool: &PgPool, id: DbId) -> Result<Option<Announcement>, sqlx::Error> {
        let query = format!(
            "UPDATE announcements \
             SET status = 'archived', updated_at = NOW() \
             WHERE id = $1 AND status <> 'archived' \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Announcement>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a draft or archived announcement.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM announcements \
             WHERE id = $1 AND status IN ('draft', 'archived')",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Claim an announcement's fan-out and write its notifications atomically.
    ///
    /// The `notifications_sent_at IS NULL` claim runs first, so it holds the
    /// row lock while the batch is inserted. A concurrent caller blocks on that
    /// lock and then matches no row. Returns `None` when the fan-out was
    /// already recorded, otherwise the number of notifications inserted
    /// (zero for an empty cohort). On error nothing is kept.
    pub async fn record_fanout(
        pool: &PgPool,
        id: DbId,
        rows: &[NewNotification],
        now: Timestamp,
    ) -> Result<Option<u64>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let claimed = sqlx::query(
            "UPDATE announcements \
             SET notifications_sent_at = $2 \
             WHERE id = $1 AND notifications_sent_at IS NULL",
        )
        .bind(id)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        if claimed.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        let inserted = NotificationRepo::create_many(&mut *tx, rows).await?;

        tx.commit().await?;
        Ok(Some(inserted))
    }

    /// Published announcements whose fan-out never completed, oldest first.
    pub async fn list_pending_fanout(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<Announcement>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM announcements \
             WHERE status = 'published' AND notifications_sent_at IS NULL \
             ORDER BY published_at ASC, id ASC \
             LIMIT $1"
        );
        sqlx::query_as::<_, Announcement>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
