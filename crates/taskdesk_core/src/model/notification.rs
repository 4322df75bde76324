//! Notification domain model.
//!
//! # Responsibility
//! - Define reminder records generated from task due dates.
//! - Build deterministic ids so repeated derivation never duplicates entries.
//!
//! # Invariants
//! - `id` is `"{reason}:{task_id}"`; one task has at most one entry per reason.
//! - `task_id` references its owning task; the store cascades deletes.
//! - `is_read` only ever flips from `false` to `true`.

use crate::model::task::{Task, TaskId};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Why a notification was generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationReason {
    DueToday,
    Overdue,
}

impl NotificationReason {
    /// Prefix used in the deterministic notification id.
    pub fn id_prefix(self) -> &'static str {
        match self {
            Self::DueToday => "today",
            Self::Overdue => "overdue",
        }
    }
}

/// Deterministic notification identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(String);

impl NotificationId {
    pub fn for_task(reason: NotificationReason, task_id: TaskId) -> Self {
        Self(format!("{}:{task_id}", reason.id_prefix()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for NotificationId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub task_id: TaskId,
    pub reason: NotificationReason,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Builds an unread notification for `task`.
    ///
    /// Overdue messages embed the due date, e.g. `October 18th, 2026`.
    pub fn for_task(task: &Task, reason: NotificationReason, created_at: DateTime<Utc>) -> Self {
        let message = match (reason, task.due_date) {
            (NotificationReason::Overdue, Some(due)) => format!(
                "Task \"{}\" is overdue! It was due on {}.",
                task.title,
                format_long_date(due.date())
            ),
            (NotificationReason::Overdue, None) => format!("Task \"{}\" is overdue!", task.title),
            (NotificationReason::DueToday, _) => format!("Task \"{}\" is due today!", task.title),
        };

        Self {
            id: NotificationId::for_task(reason, task.id),
            task_id: task.id,
            reason,
            message,
            is_read: false,
            created_at,
        }
    }

    pub fn mark_read(&mut self) {
        self.is_read = true;
    }
}

/// Formats a date as `Month Dth, YYYY` with an English ordinal suffix.
pub fn format_long_date(date: NaiveDate) -> String {
    let day = date.day();
    let suffix = match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{} {day}{suffix}, {}", date.format("%B"), date.year())
}
