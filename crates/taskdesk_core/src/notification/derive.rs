//! Due-date notification derivation pass.
//!
//! # Invariants
//! - Only non-completed tasks with a due date produce notifications.
//! - Comparison is date-only: time of day is stripped on both sides.
//! - A generated id already present in `existing` is skipped, so re-running
//!   the pass never duplicates entries or resets `is_read`.
//! - The pass never removes notifications. Completing a task or moving its
//!   due date later leaves earlier reminders in place.

use crate::model::notification::{Notification, NotificationId, NotificationReason};
use crate::model::task::Task;
use chrono::{DateTime, NaiveDate, Utc};
use std::cmp::Ordering;
use std::collections::HashSet;

/// Classifies a task's due date relative to `today`.
///
/// Returns `None` for completed tasks, tasks without a due date and tasks due
/// after `today`.
pub fn classify_due_date(task: &Task, today: NaiveDate) -> Option<NotificationReason> {
    if task.is_completed() {
        return None;
    }
    let due = task.due_date?.date();
    match due.cmp(&today) {
        Ordering::Equal => Some(NotificationReason::DueToday),
        Ordering::Less => Some(NotificationReason::Overdue),
        Ordering::Greater => None,
    }
}

/// Returns the notifications that should be appended to `existing`.
///
/// The result is ordered like `tasks`. `created_at` stamps every new entry.
pub fn derive_notifications(
    tasks: &[Task],
    existing: &[Notification],
    today: NaiveDate,
    created_at: DateTime<Utc>,
) -> Vec<Notification> {
    let mut known: HashSet<NotificationId> =
        existing.iter().map(|notification| notification.id.clone()).collect();
    let mut fresh = Vec::new();

    for task in tasks {
        let Some(reason) = classify_due_date(task, today) else {
            continue;
        };
        let notification = Notification::for_task(task, reason, created_at);
        if known.insert(notification.id.clone()) {
            fresh.push(notification);
        }
    }

    fresh
}

#[cfg(test)]
mod tests {
    use super::{classify_due_date, derive_notifications};
    use crate::model::notification::NotificationReason;
    use crate::model::task::{Task, TaskDraft, TaskStatus};
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, day).unwrap()
    }

    fn task_due(day: u32, hour: u32) -> Task {
        let due = date(day).and_hms_opt(hour, 0, 0).unwrap();
        Task::from_draft(
            Uuid::new_v4(),
            TaskDraft::new("Pay rent", "Personal").due_date(due),
            Utc::now(),
        )
    }

    #[test]
    fn classification_ignores_time_of_day() {
        let today = date(19);
        assert_eq!(
            classify_due_date(&task_due(19, 23), today),
            Some(NotificationReason::DueToday)
        );
        assert_eq!(
            classify_due_date(&task_due(18, 23), today),
            Some(NotificationReason::Overdue)
        );
        assert_eq!(classify_due_date(&task_due(20, 0), today), None);
    }

    #[test]
    fn completed_tasks_are_skipped() {
        let mut task = task_due(18, 9);
        task.status = TaskStatus::Completed;
        assert_eq!(classify_due_date(&task, date(19)), None);
    }

    #[test]
    fn overdue_message_embeds_due_date() {
        let task = task_due(18, 9);
        let fresh = derive_notifications(std::slice::from_ref(&task), &[], date(19), Utc::now());
        assert_eq!(fresh.len(), 1);
        assert_eq!(fresh[0].id.to_string(), format!("overdue:{}", task.id));
        assert_eq!(
            fresh[0].message,
            "Task \"Pay rent\" is overdue! It was due on October 18th, 2026."
        );
    }

    #[test]
    fn existing_ids_are_not_regenerated() {
        let task = task_due(19, 9);
        let tasks = vec![task];
        let mut existing = derive_notifications(&tasks, &[], date(19), Utc::now());
        existing[0].mark_read();

        let again = derive_notifications(&tasks, &existing, date(19), Utc::now());
        assert!(again.is_empty());
        assert!(existing[0].is_read);
    }
}
