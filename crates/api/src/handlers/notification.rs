//! Handlers for the `/notifications` resource.
//!
//! Recipient endpoints require authentication via [`AuthUser`] and only ever
//! touch the caller's own rows.

use academy_core::error::CoreError;
use academy_core::notification::expires_at;
use academy_core::types::DbId;
use academy_db::models::notification::{Notification, SendNotification};
use academy_db::repositories::{NotificationRepo, ProfileRepo};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::{clamp_limit, clamp_offset};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /notifications`.
#[derive(Debug, Deserialize)]
pub struct NotificationQuery {
    /// If `true`, return only unread notifications. Defaults to `false`.
    pub unread_only: Option<bool>,
    /// Maximum number of results. Defaults to 50, capped at 100.
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct MarkedRead {
    pub marked_read: u64,
}

#[derive(Debug, Serialize)]
pub struct UnreadCount {
    pub count: i64,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Notification",
        id,
    })
}

/// GET /api/v1/notifications
///
/// List the caller's live notifications, newest first.
pub async fn list_notifications(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<NotificationQuery>,
) -> AppResult<Json<DataResponse<Vec<Notification>>>> {
    let notifications = NotificationRepo::list_for_user(
        &state.pool,
        auth.user_id,
        params.unread_only.unwrap_or(false),
        clamp_limit(params.limit),
        clamp_offset(params.offset),
    )
    .await?;

    Ok(Json(DataResponse {
        data: notifications,
    }))
}

/// POST /api/v1/notifications/{id}/read
///
/// Idempotent: re-reading keeps the original `read_at`. 404 when the row
/// belongs to someone else.
pub async fn mark_read(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(notification_id): Path<DbId>,
) -> AppResult<StatusCode> {
    NotificationRepo::mark_read(&state.pool, notification_id, auth.user_id)
        .await?
        .then_some(StatusCode::NO_CONTENT)
        .ok_or_else(|| not_found(notification_id))
}

/// POST /api/v1/notifications/read-all
pub async fn mark_all_read(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<MarkedRead>>> {
    let marked_read = NotificationRepo::mark_all_read(&state.pool, auth.user_id).await?;
    tracing::debug!(user_id = auth.user_id, marked_read, "Marked all notifications read");

    Ok(Json(DataResponse {
        data: MarkedRead { marked_read },
    }))
}

/// GET /api/v1/notifications/unread-count
pub async fn unread_count(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<UnreadCount>>> {
    let count = NotificationRepo::unread_count(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse {
        data: UnreadCount { count },
    }))
}

/// DELETE /api/v1/notifications/{id}
pub async fn delete_notification(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(notification_id): Path<DbId>,
) -> AppResult<StatusCode> {
    NotificationRepo::delete(&state.pool, notification_id, auth.user_id)
        .await?
        .then_some(StatusCode::NO_CONTENT)
        .ok_or_else(|| not_found(notification_id))
}

/// POST /api/v1/admin/notifications
///
/// Send a direct notification to one profile.
pub async fn send_notification(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<SendNotification>,
) -> AppResult<impl IntoResponse> {
    input.check()?;

    let recipient = input.user_id;
    if ProfileRepo::find_by_id(&state.pool, recipient).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Profile",
            id: recipient,
        }));
    }

    let expiry = expires_at(chrono::Utc::now(), state.config.notification_ttl_days);
    let created =
        NotificationRepo::create(&state.pool, &input.into_new_notification(Some(expiry))).await?;

    tracing::info!(
        notification_id = created.id,
        recipient,
        sent_by = admin.user_id,
        "Direct notification sent"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}
