//! BDD step definitions for the homework watcher

pub mod formatting_steps;
pub mod notification_steps;
pub mod tracking_steps;
