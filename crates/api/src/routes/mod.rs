pub mod affiliate;
pub mod announcement;
pub mod cron;
pub mod health;
pub mod notification;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /admin/announcements                       list, create (admin only)
/// /admin/announcements/{id}                  get, delete
/// /admin/announcements/{id}/publish          publish now (POST)
/// /admin/announcements/{id}/archive          archive (POST)
///
/// /admin/notifications                       direct send (POST, admin only)
///
/// /admin/affiliates/{profile_id}/onboard     onboard affiliate (POST, admin only)
/// /affiliates/invite/{code}                  invite lookup (public)
///
/// /notifications                             list (auth required)
/// /notifications/unread-count                unread count
/// /notifications/read-all                    mark all read (POST)
/// /notifications/{id}                        delete
/// /notifications/{id}/read                   mark read (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/admin/announcements", announcement::router())
        .nest("/notifications", notification::router())
        .merge(notification::admin_router())
        .merge(affiliate::router())
}
