//! Affiliate onboarding and public invite-code lookup.

use academy_core::error::CoreError;
use academy_core::invite_code::{
    generate_invite_code, is_well_formed, normalize_invite_code, MAX_GENERATION_ATTEMPTS,
};
use academy_core::roles::Role;
use academy_core::types::DbId;
use academy_db::models::profile::Profile;
use academy_db::repositories::profile_repo::INVITE_CODE_CONSTRAINT;
use academy_db::repositories::{is_unique_violation, ProfileRepo};
use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Public view of an invite code's owner.
#[derive(Debug, Serialize)]
pub struct InviteLookup {
    pub affiliate_id: DbId,
    pub full_name: String,
}

/// POST /api/v1/admin/affiliates/{profile_id}/onboard
///
/// Promote a profile to affiliate and give it an invite code. An affiliate
/// that already has a code keeps it.
pub async fn onboard_affiliate(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(profile_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Profile>>> {
    let profile = ProfileRepo::find_by_id(&state.pool, profile_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Profile",
            id: profile_id,
        }))?;

    if profile.role == Role::Affiliate && profile.invite_code.is_some() {
        return Ok(Json(DataResponse { data: profile }));
    }

    for attempt in 1..=MAX_GENERATION_ATTEMPTS {
        let code = generate_invite_code();
        match ProfileRepo::assign_affiliate_code(&state.pool, profile_id, &code).await {
            Ok(Some(updated)) => {
                tracing::info!(
                    profile_id,
                    onboarded_by = admin.user_id,
                    attempt,
                    "Affiliate onboarded"
                );
                return Ok(Json(DataResponse { data: updated }));
            }
            Ok(None) => {
                return Err(AppError::Core(CoreError::NotFound {
                    entity: "Profile",
                    id: profile_id,
                }))
            }
            Err(e) if is_unique_violation(&e, INVITE_CODE_CONSTRAINT) => {
                tracing::warn!(profile_id, attempt, "Invite code collision, regenerating");
            }
            Err(e) => return Err(e.into()),
        }
    }

    Err(AppError::Core(CoreError::Conflict(format!(
        "Could not generate a unique invite code after {MAX_GENERATION_ATTEMPTS} attempts"
    ))))
}

/// GET /api/v1/affiliates/invite/{code}
///
/// Public. Codes are matched case-insensitively.
pub async fn lookup_invite(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> AppResult<Json<DataResponse<InviteLookup>>> {
    let normalized = normalize_invite_code(&code);
    let not_found = || {
        AppError::Core(CoreError::NotFoundByKey {
            entity: "Invite code",
            key: normalized.clone(),
        })
    };

    if !is_well_formed(&normalized) {
        return Err(not_found());
    }

    let affiliate = ProfileRepo::find_by_invite_code(&state.pool, &normalized)
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(DataResponse {
        data: InviteLookup {
            affiliate_id: affiliate.id,
            full_name: affiliate.full_name,
        },
    }))
}
