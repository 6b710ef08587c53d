//! Repository layer: one zero-sized struct per table with async associated
//! functions taking a `&PgPool`.

pub mod announcement_repo;
pub mod notification_repo;
pub mod profile_repo;

pub use announcement_repo::AnnouncementRepo;
pub use notification_repo::NotificationRepo;
pub use profile_repo::ProfileRepo;

/// PostgreSQL SQLSTATE for unique constraint violations.
const UNIQUE_VIOLATION: &str = "23505";

/// Whether `err` is a unique violation on the named constraint.
pub fn is_unique_violation(err: &sqlx::Error, constraint: &str) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some(UNIQUE_VIOLATION)
                && db_err.constraint() == Some(constraint)
        }
        _ => false,
    }
}
