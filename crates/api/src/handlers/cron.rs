//! Handlers for the scheduled-publish trigger at `/api/cron/publish-scheduled`.

use academy_core::types::{DbId, Timestamp};
use academy_events::{PublishFailure, PublishSummary, PublishedItem};
use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::error::CronError;
use crate::middleware::cron::CronTrigger;
use crate::state::AppState;

/// Body returned by a successful trigger run.
#[derive(Debug, Serialize)]
pub struct CronRunResponse {
    pub message: String,
    /// Number of announcements published in this run.
    pub published: usize,
    pub announcements: Vec<PublishedItem>,
    pub errors: Vec<PublishFailure>,
    /// Due items already published by an overlapping run.
    pub skipped: Vec<DbId>,
    /// Number of earlier fan-outs completed by the retry pass.
    pub fanout_retried: usize,
    pub timestamp: Timestamp,
}

impl From<PublishSummary> for CronRunResponse {
    fn from(summary: PublishSummary) -> Self {
        let published = summary.published_count();
        Self {
            message: format!("Published {published} scheduled announcement(s)"),
            published,
            fanout_retried: summary.fanout_retried.len(),
            announcements: summary.published,
            errors: summary.errors,
            skipped: summary.skipped,
            timestamp: summary.now,
        }
    }
}

/// GET /api/cron/publish-scheduled
///
/// Publish every due scheduled announcement and fan out its notifications.
pub async fn publish_scheduled(
    _trigger: CronTrigger,
    State(state): State<AppState>,
) -> Result<Json<CronRunResponse>, CronError> {
    let summary = state.publisher.run_once().await?;
    Ok(Json(summary.into()))
}

/// POST /api/cron/publish-scheduled
///
/// Informational only; the scheduler uses GET.
pub async fn describe() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "endpoint": "/api/cron/publish-scheduled",
        "method": "GET",
        "description": "Publishes scheduled announcements whose scheduled_for has passed \
                        and notifies their audience.",
    }))
}
