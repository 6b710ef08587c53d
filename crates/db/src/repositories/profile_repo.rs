//! Repository for the `profiles` table.

use academy_core::roles::Role;
use academy_core::types::DbId;
use sqlx::PgPool;

use crate::models::profile::{CreateProfile, Profile};

/// Column list for `profiles` queries.
const COLUMNS: &str = "id, email, full_name, role, invite_code, created_at, updated_at";

/// Unique constraint guarding invite codes.
pub const INVITE_CODE_CONSTRAINT: &str = "uq_profiles_invite_code";

/// Provides lookups used for audience resolution and affiliate onboarding.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Insert a new profile.
    pub async fn create(pool: &PgPool, input: &CreateProfile) -> Result<Profile, sqlx::Error> {
        let query = format!(
            "INSERT INTO profiles (email, full_name, role) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(&input.email)
            .bind(&input.full_name)
            .bind(input.role.as_str())
            .fetch_one(pool)
            .await
    }

    /// Find a profile by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Every profile on the platform.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles ORDER BY id ASC");
        sqlx::query_as::<_, Profile>(&query).fetch_all(pool).await
    }

    /// Profiles holding exactly `role`.
    pub async fn list_by_role(pool: &PgPool, role: Role) -> Result<Vec<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE role = $1 ORDER BY id ASC");
        sqlx::query_as::<_, Profile>(&query)
            .bind(role.as_str())
            .fetch_all(pool)
            .await
    }

    /// Find the affiliate owning an invite code.
    pub async fn find_by_invite_code(
        pool: &PgPool,
        code: &str,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM profiles \
             WHERE invite_code = $1 AND role = 'affiliate'"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(code)
            .fetch_optional(pool)
            .await
    }

    /// Promote a profile to affiliate and store its invite code.
    ///
    /// A colliding code surfaces as a unique violation on
    /// [`INVITE_CODE_CONSTRAINT`]; callers regenerate and retry.
    pub async fn assign_affiliate_code(
        pool: &PgPool,
        id: DbId,
        code: &str,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!(
            "UPDATE profiles \
             SET role = 'affiliate', invite_code = $2, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(id)
            .bind(code)
            .fetch_optional(pool)
            .await
    }
}
