//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record and its draft/patch input shapes.
//! - Validate user input before it reaches the store.
//!
//! # Invariants
//! - `id` and `created_at` are assigned once by the store and never change.
//! - Completion is derived from `status`; there is no second flag to drift.
//! - `title` is non-blank and `category` belongs to the store category list.

use crate::query::overdue;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier assigned by the store on creation.
pub type TaskId = Uuid;

/// Workflow state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [Self::Pending, Self::InProgress, Self::Completed];

    /// Human-readable label for list/calendar rendering.
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl TaskPriority {
    pub const ALL: [TaskPriority; 3] = [Self::Low, Self::Medium, Self::High];

    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

/// Canonical task record held by [`crate::TaskStore`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    /// Local wall-clock due time as picked in the calendar/form.
    pub due_date: Option<NaiveDateTime>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub category: String,
    pub created_at: DateTime<Utc>,
}

impl Task {
    pub(crate) fn from_draft(id: TaskId, draft: TaskDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title.trim().to_string(),
            description: draft.description,
            due_date: draft.due_date,
            status: draft.status,
            priority: draft.priority,
            category: draft.category.trim().to_string(),
            created_at,
        }
    }

    /// Returns whether the task is done. Derived from `status` only.
    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    /// End-of-day overdue check against a local wall-clock instant.
    ///
    /// See [`overdue::is_overdue`].
    pub fn is_overdue(&self, now: NaiveDateTime) -> bool {
        overdue::is_overdue(self, now)
    }

    /// Merges every field set in `patch` into this task.
    ///
    /// Identity fields are not representable in a patch, so they are kept.
    pub fn apply_patch(&mut self, patch: &TaskPatch) {
        if let Some(title) = &patch.title {
            self.title = title.trim().to_string();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(category) = &patch.category {
            self.category = category.trim().to_string();
        }
    }

    /// Validates title and category against the known category list.
    pub fn validate(&self, categories: &[String]) -> Result<(), ValidationErrors> {
        validate_fields(&self.title, &self.category, categories)
    }
}

/// User input for creating a task. The store assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub due_date: Option<NaiveDateTime>,
    #[serde(default = "default_status")]
    pub status: TaskStatus,
    #[serde(default = "default_priority")]
    pub priority: TaskPriority,
    pub category: String,
}

fn default_status() -> TaskStatus {
    TaskStatus::Pending
}

fn default_priority() -> TaskPriority {
    TaskPriority::Medium
}

impl TaskDraft {
    /// Creates a pending, medium-priority draft with no due date.
    pub fn new(title: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            due_date: None,
            status: default_status(),
            priority: default_priority(),
            category: category.into(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn due_date(mut self, due_date: NaiveDateTime) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Collects field-level errors for the form layer.
    ///
    /// # Errors
    /// - `title` is blank after trimming.
    /// - `category` is blank or not part of `categories`.
    pub fn validate(&self, categories: &[String]) -> Result<(), ValidationErrors> {
        validate_fields(&self.title, &self.category, categories)
    }
}

/// Partial update for an existing task.
///
/// `due_date` is doubly optional: `None` keeps the current value,
/// `Some(None)` clears it. On the wire an absent key keeps the value and an
/// explicit `null` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub due_date: Option<Option<NaiveDateTime>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl TaskPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn due_date(mut self, due_date: NaiveDateTime) -> Self {
        self.due_date = Some(Some(due_date));
        self
    }

    pub fn clear_due_date(mut self) -> Self {
        self.due_date = Some(None);
        self
    }

    pub fn status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Returns whether the patch would leave every field unchanged.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// One field-level validation message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Validation failure carrying every offending field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Returns the message recorded for `field`, if any.
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message.as_str())
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .errors
            .iter()
            .map(|error| format!("{}: {}", error.field, error.message))
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "invalid task: {joined}")
    }
}

impl Error for ValidationErrors {}

fn validate_fields(
    title: &str,
    category: &str,
    categories: &[String],
) -> Result<(), ValidationErrors> {
    let mut errors = Vec::new();

    if title.trim().is_empty() {
        errors.push(FieldError {
            field: "title",
            message: "Title is required".to_string(),
        });
    }

    let category = category.trim();
    if category.is_empty() {
        errors.push(FieldError {
            field: "category",
            message: "Category is required".to_string(),
        });
    } else if !categories.iter().any(|known| known == category) {
        errors.push(FieldError {
            field: "category",
            message: format!("Unknown category `{category}`"),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors { errors })
    }
}

#[cfg(test)]
mod tests {
    use super::{Task, TaskDraft, TaskPatch, TaskPriority, TaskStatus};
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    fn categories() -> Vec<String> {
        vec!["Work".to_string(), "Health".to_string()]
    }

    #[test]
    fn draft_validation_reports_every_field() {
        let err = TaskDraft::new("   ", "")
            .validate(&categories())
            .expect_err("blank draft must be rejected");
        assert_eq!(err.errors().len(), 2);
        assert_eq!(err.message_for("title"), Some("Title is required"));
        assert_eq!(err.message_for("category"), Some("Category is required"));
    }

    #[test]
    fn draft_validation_rejects_unknown_category() {
        let err = TaskDraft::new("Write report", "Chores")
            .validate(&categories())
            .expect_err("unknown category must be rejected");
        assert_eq!(err.message_for("category"), Some("Unknown category `Chores`"));
        assert!(err.message_for("title").is_none());
    }

    #[test]
    fn patch_keeps_unspecified_fields() {
        let draft = TaskDraft::new("Morning jog", "Health")
            .description("Run for 30 minutes")
            .priority(TaskPriority::High);
        let mut task = Task::from_draft(Uuid::new_v4(), draft, Utc::now());
        let before = task.clone();

        task.apply_patch(&TaskPatch::new().status(TaskStatus::InProgress));

        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.title, before.title);
        assert_eq!(task.description, before.description);
        assert_eq!(task.priority, before.priority);
        assert_eq!(task.id, before.id);
        assert_eq!(task.created_at, before.created_at);
    }

    #[test]
    fn patch_can_clear_due_date() {
        let due = NaiveDate::from_ymd_opt(2026, 10, 20)
            .and_then(|date| date.and_hms_opt(9, 0, 0))
            .unwrap();
        let draft = TaskDraft::new("Dentist", "Health").due_date(due);
        let mut task = Task::from_draft(Uuid::new_v4(), draft, Utc::now());

        task.apply_patch(&TaskPatch::new().clear_due_date());
        assert_eq!(task.due_date, None);
        assert!(TaskPatch::new().is_empty());
    }

    #[test]
    fn completion_follows_status() {
        let mut task = Task::from_draft(Uuid::new_v4(), TaskDraft::new("x", "Work"), Utc::now());
        assert!(!task.is_completed());
        task.status = TaskStatus::Completed;
        assert!(task.is_completed());
    }
}
