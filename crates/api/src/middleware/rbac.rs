//! Role gate for administrator endpoints.

use academy_core::error::CoreError;
use academy_core::roles::Role;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// An [`AuthUser`] whose token carries the `admin` role; 403 otherwise.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        match Role::parse(&user.role) {
            Some(Role::Admin) => Ok(RequireAdmin(user)),
            _ => {
                tracing::debug!(user_id = user.user_id, role = %user.role, "Admin route denied");
                Err(CoreError::Forbidden("Admin role required".into()).into())
            }
        }
    }
}
