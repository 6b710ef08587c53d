use axum::routing::get;
use axum::Router;

use crate::handlers::cron;
use crate::state::AppState;

/// Scheduler trigger routes, mounted at the root (not under `/api/v1`).
///
/// ```text
/// GET    /api/cron/publish-scheduled   -> publish_scheduled
/// POST   /api/cron/publish-scheduled   -> describe
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/api/cron/publish-scheduled",
        get(cron::publish_scheduled).post(cron::describe),
    )
}
