use academy_core::error::CoreError;

/// Errors surfaced by the publisher.
///
/// Per-item failures inside a run are collected into the summary instead;
/// these variants are what abort a run or an explicit publish.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    /// The initial due-items query failed; nothing was processed.
    #[error("Failed to query due announcements: {0}")]
    DueQuery(#[source] sqlx::Error),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}
