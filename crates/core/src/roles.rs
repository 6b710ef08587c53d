//! Profile roles.
//!
//! Values must match the CHECK constraint on `profiles.role` in
//! `20240101000001_create_profiles.sql`.

use crate::macros::define_text_enum;

define_text_enum! {
    /// A profile's role on the platform.
    Role as "role" {
        Student = "student",
        Affiliate = "affiliate",
        Admin = "admin",
    }
}
