//! Scheduled announcement publisher.
//!
//! [`ScheduledPublisher::run_once`] is the body of the cron endpoint: it
//! publishes every announcement whose `scheduled_for` has elapsed and fans
//! each one out to its audience. [`ScheduledPublisher::run`] wraps it in an
//! interval loop for deployments without an external trigger.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use academy_core::announcement::{validate_transition, AnnouncementStatus};
use academy_core::clock::Clock;
use academy_core::error::CoreError;
use academy_core::types::{DbId, Timestamp};
use academy_db::models::announcement::Announcement;
use academy_db::repositories::AnnouncementRepo;
use academy_db::DbPool;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::error::PublishError;
use crate::fanout::{FanoutNotifier, FanoutOutcome};

/// Maximum number of stalled fan-outs retried per run.
const FANOUT_RETRY_BATCH: i64 = 50;

// ---------------------------------------------------------------------------
// Summary types
// ---------------------------------------------------------------------------

/// An announcement published during a run.
#[derive(Debug, Clone, Serialize)]
pub struct PublishedItem {
    pub id: DbId,
    pub title: String,
    pub published_at: Option<Timestamp>,
    /// Whether the fan-out completed. `false` leaves it for the retry pass.
    pub notified: bool,
    pub recipients: u64,
}

/// An announcement whose status update failed.
#[derive(Debug, Clone, Serialize)]
pub struct PublishFailure {
    pub id: DbId,
    pub title: String,
    pub error: String,
}

/// Outcome of one publisher run.
#[derive(Debug, Clone, Serialize)]
pub struct PublishSummary {
    /// The instant used as "now" for the due-items predicate.
    pub now: Timestamp,
    pub published: Vec<PublishedItem>,
    pub errors: Vec<PublishFailure>,
    /// Due items another invocation published first.
    pub skipped: Vec<DbId>,
    /// Previously stalled fan-outs completed during this run.
    pub fanout_retried: Vec<DbId>,
}

impl PublishSummary {
    fn new(now: Timestamp) -> Self {
        Self {
            now,
            published: Vec::new(),
            errors: Vec::new(),
            skipped: Vec::new(),
            fanout_retried: Vec::new(),
        }
    }

    pub fn published_count(&self) -> usize {
        self.published.len()
    }
}

// ---------------------------------------------------------------------------
// ScheduledPublisher
// ---------------------------------------------------------------------------

/// Publishes due announcements and drives their notification fan-out.
#[derive(Clone)]
pub struct ScheduledPublisher {
    pool: DbPool,
    clock: Arc<dyn Clock>,
    notifier: FanoutNotifier,
}

impl ScheduledPublisher {
    pub fn new(pool: DbPool, clock: Arc<dyn Clock>, notification_ttl_days: i64) -> Self {
        let notifier = FanoutNotifier::new(pool.clone(), notification_ttl_days);
        Self {
            pool,
            clock,
            notifier,
        }
    }

    /// Publish every due announcement once.
    ///
    /// Items are processed sequentially. A failed status update is recorded
    /// and the run moves on; a failed fan-out is logged and left for a later
    /// run. Only a failure of the initial due-items query aborts the run.
    pub async fn run_once(&self) -> Result<PublishSummary, PublishError> {
        let now = self.clock.now();
        let mut summary = PublishSummary::new(now);

        let due = AnnouncementRepo::list_due(&self.pool, now)
            .await
            .map_err(PublishError::DueQuery)?;

        tracing::debug!(due = due.len(), %now, "Scheduled publish run started");

        let mut handled: HashSet<DbId> = HashSet::with_capacity(due.len());

        for item in &due {
            handled.insert(item.id);

            let published = match AnnouncementRepo::publish_from(
                &self.pool,
                item.id,
                &[AnnouncementStatus::Scheduled],
                now,
            )
            .await
            {
                Ok(Some(published)) => published,
                Ok(None) => {
                    tracing::info!(
                        announcement_id = item.id,
                        "Announcement already published by another run, skipping"
                    );
                    summary.skipped.push(item.id);
                    continue;
                }
                Err(e) => {
                    tracing::error!(
                        announcement_id = item.id,
                        error = %e,
                        "Failed to publish scheduled announcement"
                    );
                    summary.errors.push(PublishFailure {
                        id: item.id,
                        title: item.title.clone(),
                        error: e.to_string(),
                    });
                    continue;
                }
            };

            tracing::info!(
                announcement_id = published.id,
                title = %published.title,
                "Published scheduled announcement"
            );

            let outcome = self.fan_out(&published, now).await;
            summary.published.push(PublishedItem {
                id: published.id,
                title: published.title.clone(),
                published_at: published.published_at,
                notified: outcome.is_some(),
                recipients: outcome.map(FanoutOutcome::recipients).unwrap_or(0),
            });
        }

        self.retry_stalled_fanouts(now, &handled, &mut summary).await;

        tracing::info!(
            published = summary.published.len(),
            failed = summary.errors.len(),
            skipped = summary.skipped.len(),
            fanout_retried = summary.fanout_retried.len(),
            "Scheduled publish run finished"
        );

        Ok(summary)
    }

    /// Publish an announcement immediately (explicit administrator action).
    ///
    /// Allowed from `draft` or `scheduled`. Returns the published row and the
    /// fan-out outcome, which is `None` when the fan-out failed and was left
    /// for the retry pass.
    pub async fn publish_now(
        &self,
        id: DbId,
    ) -> Result<(Announcement, Option<FanoutOutcome>), PublishError> {
        let current = AnnouncementRepo::find_by_id(&self.pool, id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Announcement",
                id,
            })?;
        validate_transition(current.status, AnnouncementStatus::Published)?;

        let now = self.clock.now();
        let published = AnnouncementRepo::publish_from(
            &self.pool,
            id,
            &[AnnouncementStatus::Draft, AnnouncementStatus::Scheduled],
            now,
        )
        .await?
        .ok_or_else(|| {
            CoreError::Conflict(format!("Announcement {id} changed status while publishing"))
        })?;

        tracing::info!(announcement_id = id, "Published announcement on demand");

        let outcome = self.fan_out(&published, now).await;
        Ok((published, outcome))
    }

    /// Run the publisher on a fixed interval until `cancel` fires.
    pub async fn run(self, every: Duration, cancel: CancellationToken) {
        tracing::info!(
            interval_secs = every.as_secs(),
            "Scheduled publisher loop started"
        );

        let mut interval = tokio::time::interval(every);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Scheduled publisher loop stopping");
                    break;
                }
                _ = interval.tick() => {
                    if let Err(e) = self.run_once().await {
                        tracing::error!(error = %e, "Scheduled publish run failed");
                    }
                }
            }
        }
    }

    /// Fan out, logging instead of propagating failures.
    async fn fan_out(&self, announcement: &Announcement, now: Timestamp) -> Option<FanoutOutcome> {
        match self.notifier.notify(announcement, now).await {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                tracing::error!(
                    announcement_id = announcement.id,
                    error = %e,
                    "Failed to create announcement notifications; will retry next run"
                );
                None
            }
        }
    }

    /// Retry fan-outs for published announcements that never got one.
    ///
    /// Items handled earlier in this run are excluded so a fan-out that just
    /// failed is not hammered twice in the same invocation. An item whose
    /// fan-out another caller (a concurrent run or `publish_now`) records
    /// first comes back as `AlreadySent` and is not counted.
    async fn retry_stalled_fanouts(
        &self,
        now: Timestamp,
        handled: &HashSet<DbId>,
        summary: &mut PublishSummary,
    ) {
        let stalled = match AnnouncementRepo::list_pending_fanout(&self.pool, FANOUT_RETRY_BATCH)
            .await
        {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!(error = %e, "Failed to query stalled fan-outs");
                return;
            }
        };

        for item in stalled.iter().filter(|a| !handled.contains(&a.id)) {
            match self.fan_out(item, now).await {
                Some(FanoutOutcome::AlreadySent) | None => {}
                Some(_) => {
                    tracing::info!(announcement_id = item.id, "Retried stalled fan-out");
                    summary.fanout_retried.push(item.id);
                }
            }
        }
    }
}
