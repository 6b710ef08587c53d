//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`rbac::RequireAdmin`] -- Requires the `admin` role.
//! - [`cron::CronTrigger`] -- Gates the scheduled-publish trigger.

pub mod auth;
pub mod cron;
pub mod rbac;
