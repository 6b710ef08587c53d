//! Periodic purge of expired notifications.
//!
//! Expired rows are already hidden from listings; this job reclaims them.

use std::time::Duration;

use academy_db::repositories::NotificationRepo;
use academy_db::DbPool;
use chrono::Utc;
use tokio_util::sync::CancellationToken;

/// How often the purge runs.
const PURGE_INTERVAL: Duration = Duration::from_secs(3600); // 1 hour

/// Run the expired-notification purge loop until `cancel` is triggered.
pub async fn run(pool: DbPool, cancel: CancellationToken) {
    tracing::info!(
        interval_secs = PURGE_INTERVAL.as_secs(),
        "Notification retention job started"
    );

    let mut interval = tokio::time::interval(PURGE_INTERVAL);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Notification retention job stopping");
                break;
            }
            _ = interval.tick() => {
                match NotificationRepo::delete_expired(&pool, Utc::now()).await {
                    Ok(0) => tracing::debug!("Notification retention: nothing to purge"),
                    Ok(deleted) => {
                        tracing::info!(deleted, "Notification retention: purged expired rows");
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Notification retention: purge failed");
                    }
                }
            }
        }
    }
}
