//! Announcement publishing and notification fan-out.
//!
//! - [`ScheduledPublisher`] moves due announcements to `published` and
//!   drives the fan-out for each one.
//! - [`FanoutNotifier`] resolves an announcement's audience and writes one
//!   notification per recipient.

pub mod error;
pub mod fanout;
pub mod publisher;

pub use error::PublishError;
pub use fanout::{FanoutNotifier, FanoutOutcome};
pub use publisher::{PublishFailure, PublishSummary, PublishedItem, ScheduledPublisher};
