//! End-of-day overdue classification.
//!
//! This is deliberately not the same test the notification generator uses:
//! the generator compares calendar dates, while this compares the instant at
//! the end of the due day against "now".

use crate::model::task::Task;
use chrono::{NaiveDate, NaiveDateTime};

/// Last representable millisecond of `date` (23:59:59.999).
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_milli_opt(23, 59, 59, 999)
        .unwrap_or(NaiveDateTime::MAX)
}

/// Returns whether `task` is past due at local time `now`.
///
/// True iff the task has a due date, is not completed, and the end of the
/// due day is strictly before `now`.
pub fn is_overdue(task: &Task, now: NaiveDateTime) -> bool {
    match task.due_date {
        Some(due) if !task.is_completed() => end_of_day(due.date()) < now,
        _ => false,
    }
}

/// Returns every overdue task, preserving input order.
pub fn overdue_tasks(tasks: &[Task], now: NaiveDateTime) -> Vec<&Task> {
    tasks.iter().filter(|task| is_overdue(task, now)).collect()
}
