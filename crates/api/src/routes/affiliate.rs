use axum::routing::{get, post};
use axum::Router;

use crate::handlers::affiliate;
use crate::state::AppState;

/// Affiliate routes, merged at the `/api/v1` level.
///
/// ```text
/// POST   /admin/affiliates/{profile_id}/onboard  -> onboard_affiliate (admin)
/// GET    /affiliates/invite/{code}               -> lookup_invite (public)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/admin/affiliates/{profile_id}/onboard",
            post(affiliate::onboard_affiliate),
        )
        .route("/affiliates/invite/{code}", get(affiliate::lookup_invite))
}
