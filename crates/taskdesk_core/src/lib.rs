//! Core domain logic for taskdesk.
//! This crate is the single source of truth for task and reminder state.

pub mod clock;
pub mod config;
pub mod logging;
pub mod model;
pub mod notification;
pub mod query;
pub mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ConfigError, ConfigResult, StoreConfig, DEFAULT_CATEGORIES};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::notification::{Notification, NotificationId, NotificationReason};
pub use model::task::{
    FieldError, Task, TaskDraft, TaskId, TaskPatch, TaskPriority, TaskStatus, ValidationErrors,
};
pub use notification::derive::{classify_due_date, derive_notifications};
pub use query::calendar::{tasks_due_between, tasks_due_on};
pub use query::filter::{filter_tasks, TaskFilter};
pub use query::overdue::{end_of_day, is_overdue, overdue_tasks};
pub use store::events::{StoreEvent, SubscriptionId};
pub use store::task_store::{StoreError, StoreResult, TaskStore};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
