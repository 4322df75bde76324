//! Notification derivation from task due dates.
//!
//! # Responsibility
//! - Turn the task collection into "due today" / "overdue" reminders.
//! - Merge new reminders without touching existing ones.

pub mod derive;
