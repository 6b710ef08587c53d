//! In-process trigger for deployments without an external scheduler.

use std::time::Duration;

use academy_events::ScheduledPublisher;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Spawn the publisher loop when `interval_secs` is non-zero.
///
/// Returns `None` when the loop is disabled, leaving the cron endpoint as
/// the only trigger.
pub fn spawn(
    publisher: ScheduledPublisher,
    interval_secs: u64,
    cancel: CancellationToken,
) -> Option<JoinHandle<()>> {
    if interval_secs == 0 {
        tracing::info!("In-process publish loop disabled (PUBLISH_INTERVAL_SECS=0)");
        return None;
    }

    Some(tokio::spawn(
        publisher.run(Duration::from_secs(interval_secs), cancel),
    ))
}
