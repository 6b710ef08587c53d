//! Handlers for `/admin/announcements`.
//!
//! All endpoints require the `admin` role via [`RequireAdmin`].

use academy_core::announcement::AnnouncementStatus;
use academy_core::error::CoreError;
use academy_core::types::DbId;
use academy_db::models::announcement::{Announcement, CreateAnnouncement};
use academy_db::repositories::AnnouncementRepo;
use academy_events::FanoutOutcome;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::{clamp_limit, clamp_offset};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /admin/announcements`.
#[derive(Debug, Deserialize)]
pub struct AnnouncementListQuery {
    pub status: Option<AnnouncementStatus>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// An announcement together with the outcome of its fan-out.
#[derive(Debug, Serialize)]
pub struct PublishResult {
    pub announcement: Announcement,
    /// `false` when the fan-out failed and was left for the retry pass.
    pub notified: bool,
    pub recipients: u64,
}

impl PublishResult {
    fn new(announcement: Announcement, outcome: Option<FanoutOutcome>) -> Self {
        Self {
            announcement,
            notified: outcome.is_some(),
            recipients: outcome.map(FanoutOutcome::recipients).unwrap_or(0),
        }
    }
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Announcement",
        id,
    })
}

/// POST /api/v1/admin/announcements
///
/// Create a draft or scheduled announcement. A `published` status creates
/// the row as a draft and publishes it immediately.
pub async fn create_announcement(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateAnnouncement>,
) -> AppResult<impl IntoResponse> {
    input.check()?;

    if input.status == AnnouncementStatus::Published {
        let draft = AnnouncementRepo::create(
            &state.pool,
            &input,
            AnnouncementStatus::Draft,
            Some(admin.user_id),
        )
        .await?;
        let (published, outcome) = state.publisher.publish_now(draft.id).await?;
        return Ok((
            StatusCode::CREATED,
            Json(DataResponse {
                data: PublishResult::new(published, outcome),
            }),
        )
            .into_response());
    }

    let created =
        AnnouncementRepo::create(&state.pool, &input, input.status, Some(admin.user_id)).await?;

    tracing::info!(
        announcement_id = created.id,
        status = %created.status,
        audience = %created.audience,
        created_by = admin.user_id,
        "Announcement created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })).into_response())
}

/// GET /api/v1/admin/announcements
pub async fn list_announcements(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<AnnouncementListQuery>,
) -> AppResult<Json<DataResponse<Vec<Announcement>>>> {
    let items = AnnouncementRepo::list(
        &state.pool,
        params.status,
        clamp_limit(params.limit),
        clamp_offset(params.offset),
    )
    .await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/admin/announcements/{id}
pub async fn get_announcement(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Announcement>>> {
    let item = AnnouncementRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: item }))
}

/// POST /api/v1/admin/announcements/{id}/publish
///
/// Publish a draft or scheduled announcement now and fan it out.
pub async fn publish_announcement(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<PublishResult>>> {
    let (published, outcome) = state.publisher.publish_now(id).await?;

    tracing::info!(
        announcement_id = id,
        published_by = admin.user_id,
        recipients = outcome.map(FanoutOutcome::recipients).unwrap_or(0),
        "Announcement published by admin"
    );

    Ok(Json(DataResponse {
        data: PublishResult::new(published, outcome),
    }))
}

/// POST /api/v1/admin/announcements/{id}/archive
pub async fn archive_announcement(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Announcement>>> {
    match AnnouncementRepo::archive(&state.pool, id).await? {
        Some(archived) => {
            tracing::info!(announcement_id = id, "Announcement archived");
            Ok(Json(DataResponse { data: archived }))
        }
        None => {
            let current = AnnouncementRepo::find_by_id(&state.pool, id)
                .await?
                .ok_or_else(|| not_found(id))?;
            Err(AppError::Core(CoreError::Conflict(format!(
                "Announcement {id} is already {}",
                current.status
            ))))
        }
    }
}

/// DELETE /api/v1/admin/announcements/{id}
///
/// Only drafts and archived announcements may be deleted.
pub async fn delete_announcement(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if AnnouncementRepo::delete(&state.pool, id).await? {
        tracing::info!(announcement_id = id, "Announcement deleted");
        return Ok(StatusCode::NO_CONTENT);
    }

    let current = AnnouncementRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Err(AppError::Core(CoreError::Conflict(format!(
        "Cannot delete a {} announcement; archive it first",
        current.status
    ))))
}
