//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` DTOs for inserts coming from the HTTP layer

pub mod announcement;
pub mod notification;
pub mod profile;
