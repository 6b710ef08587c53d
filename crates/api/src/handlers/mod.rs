pub mod affiliate;
pub mod announcement;
pub mod cron;
pub mod notification;
