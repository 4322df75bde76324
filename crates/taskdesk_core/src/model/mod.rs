//! Task and notification domain model.
//!
//! # Responsibility
//! - Define canonical records held by the store.
//! - Keep input shapes (draft/patch) separate from stored records.
//!
//! # Invariants
//! - Tasks are identified by a store-assigned `TaskId`.
//! - Notifications are identified by a deterministic `NotificationId`.

pub mod notification;
pub mod task;
