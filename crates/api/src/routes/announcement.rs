//! Route definitions for `/admin/announcements`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::announcement;
use crate::state::AppState;

/// Routes mounted at `/admin/announcements`.
///
/// ```text
/// GET    /                 -> list_announcements
/// POST   /                 -> create_announcement
/// GET    /{id}             -> get_announcement
/// DELETE /{id}             -> delete_announcement
/// POST   /{id}/publish     -> publish_announcement
/// POST   /{id}/archive     -> archive_announcement
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(announcement::list_announcements).post(announcement::create_announcement),
        )
        .route(
            "/{id}",
            get(announcement::get_announcement).delete(announcement::delete_announcement),
        )
        .route("/{id}/publish", post(announcement::publish_announcement))
        .route("/{id}/archive", post(announcement::archive_announcement))
}
