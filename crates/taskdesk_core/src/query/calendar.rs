//! Calendar projection of tasks by local due date.

use crate::model::task::Task;
use chrono::NaiveDate;

/// Returns tasks whose due date lies in `start..=end`, in input order.
///
/// An inverted range yields no tasks. Tasks without a due date never appear.
pub fn tasks_due_between(tasks: &[Task], start: NaiveDate, end: NaiveDate) -> Vec<&Task> {
    if start > end {
        return Vec::new();
    }
    tasks
        .iter()
        .filter(|task| {
            task.due_date
                .map(|due| (start..=end).contains(&due.date()))
                .unwrap_or(false)
        })
        .collect()
}

pub fn tasks_due_on(tasks: &[Task], date: NaiveDate) -> Vec<&Task> {
    tasks_due_between(tasks, date, date)
}
