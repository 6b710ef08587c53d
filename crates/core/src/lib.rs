//! Domain vocabulary shared by every academy crate.
//!
//! This crate has zero internal dependencies so the database layer, the
//! publisher, and the HTTP server can all agree on the same ids, roles,
//! statuses, and error types.

pub mod announcement;
pub mod clock;
pub mod error;
pub mod invite_code;
pub mod macros;
pub mod notification;
pub mod roles;
pub mod types;
