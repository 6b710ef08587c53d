//! HTTP error mapping.
//!
//! [`AppError`] renders `{ "error", "code" }` for every resource endpoint.
//! [`CronError`] renders the `{ "error", "message" }` body the external
//! scheduler expects from the trigger endpoint.

use academy_core::error::CoreError;
use academy_events::PublishError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Application-level error type for HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<PublishError> for AppError {
    fn from(err: PublishError) -> Self {
        match err {
            PublishError::Core(core) => AppError::Core(core),
            PublishError::Database(db) | PublishError::DueQuery(db) => AppError::Database(db),
        }
    }
}

/// Status, machine-readable code, and client-safe message.
type ErrorParts = (StatusCode, &'static str, String);

const GENERIC_INTERNAL: &str = "An internal error occurred";

fn internal() -> ErrorParts {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        GENERIC_INTERNAL.to_string(),
    )
}

impl AppError {
    fn parts(&self) -> ErrorParts {
        match self {
            AppError::Core(core) => core_parts(core),
            AppError::Database(err) => database_parts(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        (status, axum::Json(json!({ "error": message, "code": code }))).into_response()
    }
}

fn core_parts(err: &CoreError) -> ErrorParts {
    match err {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::NotFoundByKey { entity, key } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} '{key}' not found"),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
        CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
        CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
    }
}

/// `RowNotFound` is a 404 and `uq_*` unique violations are 409. Anything
/// else is logged and reported as a sanitized 500.
fn database_parts(err: &sqlx::Error) -> ErrorParts {
    if let sqlx::Error::RowNotFound = err {
        return (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        );
    }

    if let Some(db_err) = err.as_database_error() {
        let constraint = db_err.constraint().unwrap_or_default();
        if db_err.is_unique_violation() && constraint.starts_with("uq_") {
            return (
                StatusCode::CONFLICT,
                "CONFLICT",
                format!("Duplicate value violates unique constraint: {constraint}"),
            );
        }
    }

    tracing::error!(error = %err, "Database error");
    internal()
}

// ---------------------------------------------------------------------------
// Cron trigger errors
// ---------------------------------------------------------------------------

/// Client-facing detail for an aborted run; the cause is only logged.
const RUN_FAILED_MESSAGE: &str = "The scheduled publish run did not complete";

/// Failures of the scheduled-publish trigger endpoint.
#[derive(Debug, thiserror::Error)]
pub enum CronError {
    #[error("Unauthorized cron trigger")]
    Unauthorized,

    #[error("Scheduled publish run failed: {0}")]
    RunFailed(#[from] PublishError),
}

impl IntoResponse for CronError {
    fn into_response(self) -> Response {
        let (status, error, message) = match &self {
            CronError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "Unauthorized",
                "Unauthorized cron trigger",
            ),
            CronError::RunFailed(e) => {
                tracing::error!(error = %e, "Scheduled publish run aborted");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to publish scheduled announcements",
                    RUN_FAILED_MESSAGE,
                )
            }
        };

        let body = json!({ "error": error, "message": message });
        (status, axum::Json(body)).into_response()
    }
}
