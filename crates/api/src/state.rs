use std::sync::Arc;

use academy_events::ScheduledPublisher;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: academy_db::DbPool,
    /// Server configuration (cron authorization, JWT, notification TTL).
    pub config: Arc<ServerConfig>,
    /// Publisher shared by the cron endpoint, admin publish, and the interval loop.
    pub publisher: ScheduledPublisher,
}
