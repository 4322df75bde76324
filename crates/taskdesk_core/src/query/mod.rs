//! Read-only derived views over the task collection.
//!
//! # Responsibility
//! - Filter tasks by status/priority/category and free-text search.
//! - Classify overdue tasks and project tasks onto calendar days.
//!
//! # Invariants
//! - Every function here is pure: inputs are borrowed, never mutated.
//! - Results keep the input order (stable filter, no re-sort).

pub mod calendar;
pub mod filter;
pub mod overdue;
