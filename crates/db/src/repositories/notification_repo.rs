//! Repository for the `notifications` table.

use academy_core::types::{DbId, Timestamp};
use sqlx::{PgExecutor, PgPool};

use crate::models::notification::{NewNotification, Notification};

/// Column list for `notifications` queries.
const COLUMNS: &str = "id, user_id, notification_type, category, title, message, payload, \
     action_url, priority, read_at, expires_at, created_at";

/// Excludes rows past their expiry.
const NOT_EXPIRED: &str = "(expires_at IS NULL OR expires_at > NOW())";

/// Provides CRUD operations for notifications.
pub struct NotificationRepo;

impl NotificationRepo {
    /// Insert a single notification.
    pub async fn create(
        pool: &PgPool,
        input: &NewNotification,
    ) -> Result<Notification, sqlx::Error> {
        let query = format!(
            "INSERT INTO notifications \
                (user_id, notification_type, category, title, message, payload, \
                 action_url, priority, expires_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(input.user_id)
            .bind(&input.notification_type)
            .bind(&input.category)
            .bind(&input.title)
            .bind(&input.message)
            .bind(&input.payload)
            .bind(&input.action_url)
            .bind(input.priority.as_str())
            .bind(input.expires_at)
            .fetch_one(pool)
            .await
    }

    /// Insert many notifications in one statement.
    ///
    /// Rows are passed as parallel column arrays and expanded with `UNNEST`,
    /// so the whole batch succeeds or fails together. Accepts a pool or an
    /// open transaction. Returns the number of rows inserted.
    pub async fn create_many<'e, E>(
        executor: E,
        rows: &[NewNotification],
    ) -> Result<u64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        if rows.is_empty() {
            return Ok(0);
        }

        let mut user_ids: Vec<DbId> = Vec::with_capacity(rows.len());
        let mut types: Vec<&str> = Vec::with_capacity(rows.len());
        let mut categories: Vec<&str> = Vec::with_capacity(rows.len());
        let mut titles: Vec<&str> = Vec::with_capacity(rows.len());
        let mut messages: Vec<&str> = Vec::with_capacity(rows.len());
        let mut payloads: Vec<Option<serde_json::Value>> = Vec::with_capacity(rows.len());
        let mut action_urls: Vec<Option<&str>> = Vec::with_capacity(rows.len());
        let mut priorities: Vec<&str> = Vec::with_capacity(rows.len());
        let mut expiries: Vec<Option<Timestamp>> = Vec::with_capacity(rows.len());

        for row in rows {
            user_ids.push(row.user_id);
            types.push(&row.notification_type);
            categories.push(&row.category);
            titles.push(&row.title);
            messages.push(&row.message);
            payloads.push(row.payload.clone());
            action_urls.push(row.action_url.as_deref());
            priorities.push(row.priority.as_str());
            expiries.push(row.expires_at);
        }

        let result = sqlx::query(
            "INSERT INTO notifications \
                (user_id, notification_type, category, title, message, payload, \
                 action_url, priority, expires_at) \
             SELECT * FROM UNNEST( \
                $1::BIGINT[], $2::TEXT[], $3::TEXT[], $4::TEXT[], $5::TEXT[], \
                $6::JSONB[], $7::TEXT[], $8::TEXT[], $9::TIMESTAMPTZ[])",
        )
        .bind(&user_ids)
        .bind(&types)
        .bind(&categories)
        .bind(&titles)
        .bind(&messages)
        .bind(&payloads)
        .bind(&action_urls)
        .bind(&priorities)
        .bind(&expiries)
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }

    /// List live notifications for a user, newest first.
    ///
    /// When `unread_only` is `true`, only rows with `read_at IS NULL` are
    /// returned.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        unread_only: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        let filter = if unread_only {
            "AND read_at IS NULL"
        } else {
            ""
        };
        let query = format!(
            "SELECT {COLUMNS} FROM notifications \
             WHERE user_id = $1 AND {NOT_EXPIRED} {filter} \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// All notifications derived from one announcement.
    pub async fn list_for_announcement(
        pool: &PgPool,
        announcement_id: DbId,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notifications \
             WHERE payload ->> 'announcement_id' = $1::TEXT \
             ORDER BY user_id ASC"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(announcement_id.to_string())
            .fetch_all(pool)
            .await
    }

    /// Count notifications derived from one announcement.
    pub async fn count_for_announcement(
        pool: &PgPool,
        announcement_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let count: Option<i64> = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications \
             WHERE payload ->> 'announcement_id' = $1::TEXT",
        )
        .bind(announcement_id.to_string())
        .fetch_one(pool)
        .await?;
        Ok(count.unwrap_or(0))
    }

    /// Mark a single notification as read.
    ///
    /// Returns `true` if the notification exists for the given user. Marking
    /// an already-read notification keeps its original `read_at`.
    pub async fn mark_read(
        pool: &PgPool,
        notification_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications \
             SET read_at = COALESCE(read_at, NOW()) \
             WHERE id = $1 AND user_id = $2",
        )
        .bind(notification_id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Mark all unread notifications as read for a user.
    ///
    /// Returns the number of notifications that were marked read.
    pub async fn mark_all_read(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications \
             SET read_at = NOW() \
             WHERE user_id = $1 AND read_at IS NULL",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Get the number of live unread notifications for a user.
    pub async fn unread_count(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        let query = format!(
            "SELECT COUNT(*) FROM notifications \
             WHERE user_id = $1 AND read_at IS NULL AND {NOT_EXPIRED}"
        );
        let count: Option<i64> = sqlx::query_scalar(&query)
            .bind(user_id)
            .fetch_one(pool)
            .await?;
        Ok(count.unwrap_or(0))
    }

    /// Delete a notification owned by the user.
    pub async fn delete(
        pool: &PgPool,
        notification_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1 AND user_id = $2")
            .bind(notification_id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete notifications whose expiry is at or before `cutoff`.
    pub async fn delete_expired(pool: &PgPool, cutoff: Timestamp) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM notifications WHERE expires_at IS NOT NULL AND expires_at <= $1",
        )
        .bind(cutoff)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
