//! Canonical in-memory task state.
//!
//! # Responsibility
//! - Own the task and notification collections and the category list.
//! - Apply user intents atomically and re-derive notifications after each
//!   task-collection change.
//! - Notify subscribers once a mutation is fully applied.
//!
//! # Invariants
//! - Task ids are unique among held tasks.
//! - Deleting a task removes every notification that references it.
//! - A rejected operation leaves state untouched.

pub mod events;
pub mod task_store;
