//! Ad-hoc task filtering.
//!
//! # Invariants
//! - A task matches iff every supplied criterion matches.
//! - Absent criteria, an empty category and an empty search term match all.
//! - Search is a literal, case-insensitive substring match on title or
//!   description.

use crate::model::task::{Task, TaskPriority, TaskStatus};
use log::warn;
use regex::{Regex, RegexBuilder};

/// Filter criteria applied by [`filter_tasks`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub category: Option<String>,
    pub search: Option<String>,
}

impl TaskFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    fn matches_fields(&self, task: &Task) -> bool {
        let status_ok = self.status.map_or(true, |status| task.status == status);
        let priority_ok = self
            .priority
            .map_or(true, |priority| task.priority == priority);
        let category_ok = match self.category.as_deref() {
            None | Some("") => true,
            Some(category) => task.category == category,
        };
        status_ok && priority_ok && category_ok
    }
}

/// Returns the tasks matching `filter`, in their original order.
pub fn filter_tasks<'a>(tasks: &'a [Task], filter: &TaskFilter) -> Vec<&'a Task> {
    let matcher = SearchMatcher::new(filter.search.as_deref());
    tasks
        .iter()
        .filter(|task| filter.matches_fields(task) && matcher.matches(task))
        .collect()
}

enum SearchMatcher {
    Any,
    Pattern(Regex),
    // Used only when the escaped pattern exceeds regex size limits.
    Lowercase(String),
}

impl SearchMatcher {
    fn new(term: Option<&str>) -> Self {
        let term = match term {
            None | Some("") => return Self::Any,
            Some(term) => term,
        };

        match RegexBuilder::new(&regex::escape(term))
            .case_insensitive(true)
            .build()
        {
            Ok(pattern) => Self::Pattern(pattern),
            Err(err) => {
                warn!("event=search_compile module=query status=fallback error={err}");
                Self::Lowercase(term.to_lowercase())
            }
        }
    }

    fn matches(&self, task: &Task) -> bool {
        match self {
            Self::Any => true,
            Self::Pattern(pattern) => {
                pattern.is_match(&task.title) || pattern.is_match(&task.description)
            }
            Self::Lowercase(term) => {
                task.title.to_lowercase().contains(term.as_str())
                    || task.description.to_lowercase().contains(term.as_str())
            }
        }
    }
}
