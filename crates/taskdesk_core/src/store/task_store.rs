//! Task store and its error type.
//!
//! # Responsibility
//! - Provide the create/update/delete/complete entry points for callers.
//! - Run the notification derivation pass after every task change.
//!
//! # Invariants
//! - `version` increases by one on every task-collection change.
//! - Derivation is memoized on `(version, today)`.
//! - Events fire after state is final, in subscription order.

use crate::clock::{Clock, SystemClock};
use crate::config::{ConfigError, StoreConfig, DEFAULT_CATEGORIES};
use crate::model::notification::{Notification, NotificationId};
use crate::model::task::{
    Task, TaskDraft, TaskId, TaskPatch, TaskPriority, TaskStatus, ValidationErrors,
};
use crate::notification::derive::derive_notifications;
use crate::query::calendar::tasks_due_between;
use crate::query::filter::{filter_tasks, TaskFilter};
use crate::query::overdue::overdue_tasks;
use crate::store::events::{Listeners, StoreEvent, SubscriptionId};
use chrono::{Duration, NaiveDate};
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    TaskNotFound(TaskId),
    NotificationNotFound(NotificationId),
    Validation(ValidationErrors),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::NotificationNotFound(id) => write!(f, "notification not found: {id}"),
            Self::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::TaskNotFound(_) | Self::NotificationNotFound(_) => None,
        }
    }
}

impl From<ValidationErrors> for StoreError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value)
    }
}

/// In-memory task/notification state container.
#[derive(Debug)]
pub struct TaskStore<C: Clock = SystemClock> {
    clock: C,
    categories: Vec<String>,
    tasks: Vec<Task>,
    notifications: Vec<Notification>,
    version: u64,
    derived_key: Option<(u64, NaiveDate)>,
    listeners: Listeners,
}

impl TaskStore<SystemClock> {
    /// Creates an empty store on the system clock with default categories.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for TaskStore<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> TaskStore<C> {
    pub fn with_clock(clock: C) -> Self {
        Self::with_categories(
            clock,
            DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
        )
    }

    fn with_categories(clock: C, categories: Vec<String>) -> Self {
        Self {
            clock,
            categories,
            tasks: Vec::new(),
            notifications: Vec::new(),
            version: 0,
            derived_key: None,
            listeners: Listeners::default(),
        }
    }

    /// Builds a store from configuration, seeding sample tasks if requested.
    ///
    /// # Errors
    /// - Returns `ConfigError::Invalid` when the config fails normalization.
    pub fn from_config(config: &StoreConfig, clock: C) -> Result<Self, ConfigError> {
        let config = config.normalized()?;
        let mut store = Self::with_categories(clock, config.categories);
        if config.seed_sample_tasks {
            store
                .seed_sample_tasks()
                .map_err(|err| ConfigError::Invalid(err.to_string()))?;
        }
        info!(
            "event=store_init module=store status=ok categories={} tasks={}",
            store.categories.len(),
            store.tasks.len()
        );
        Ok(store)
    }

    /// Adds the demo tasks shipped with the app.
    ///
    /// Due dates are relative to the store clock: two tomorrow, one next week.
    pub fn seed_sample_tasks(&mut self) -> StoreResult<Vec<TaskId>> {
        let now = self.clock.now_local();
        let tomorrow = now + Duration::days(1);
        let next_week = now + Duration::days(7);

        let drafts = [
            TaskDraft::new("Complete project proposal", "Work")
                .description("Finish the draft and send for review")
                .due_date(tomorrow)
                .priority(TaskPriority::High),
            TaskDraft::new("Morning jog", "Health")
                .description("Run for 30 minutes")
                .due_date(tomorrow)
                .priority(TaskPriority::Medium),
            TaskDraft::new("Read book", "Personal")
                .description("Read chapter 5")
                .due_date(next_week)
                .status(TaskStatus::InProgress)
                .priority(TaskPriority::Low),
        ];

        for draft in &drafts {
            draft.validate(&self.categories)?;
        }
        drafts
            .into_iter()
            .map(|draft| self.add_task(draft).map(|task| task.id))
            .collect()
    }

    /// Validates and appends a new task.
    ///
    /// # Contract
    /// - Assigns a fresh id unique among held tasks and stamps `created_at`.
    /// - Re-derives notifications and emits `TaskAdded`.
    pub fn add_task(&mut self, draft: TaskDraft) -> StoreResult<Task> {
        draft.validate(&self.categories)?;

        let id = self.next_task_id();
        let task = Task::from_draft(id, draft, self.clock.now_utc());
        self.tasks.push(task.clone());
        info!("event=task_add module=store status=ok task_id={id}");

        self.commit(StoreEvent::TaskAdded(id));
        Ok(task)
    }

    /// Merges `patch` into the task with `id`.
    ///
    /// The merged task is validated before it replaces the stored one. An
    /// empty patch returns the stored task without bumping the version or
    /// emitting an event.
    pub fn update_task(&mut self, id: TaskId, patch: &TaskPatch) -> StoreResult<Task> {
        let index = self.position(id)?;
        if patch.is_empty() {
            debug!("event=task_update module=store status=noop task_id={id}");
            return Ok(self.tasks[index].clone());
        }
        let mut updated = self.tasks[index].clone();
        updated.apply_patch(patch);
        updated.validate(&self.categories)?;

        self.tasks[index] = updated.clone();
        info!("event=task_update module=store status=ok task_id={id}");

        self.commit(StoreEvent::TaskUpdated(id));
        Ok(updated)
    }

    /// Removes a task and every notification that references it.
    pub fn delete_task(&mut self, id: TaskId) -> StoreResult<Task> {
        let index = self.position(id)?;
        let removed = self.tasks.remove(index);

        let before = self.notifications.len();
        self.notifications
            .retain(|notification| notification.task_id != id);
        info!(
            "event=task_delete module=store status=ok task_id={id} notifications_removed={}",
            before - self.notifications.len()
        );

        self.commit(StoreEvent::TaskDeleted(id));
        Ok(removed)
    }

    /// Sets the task status to `Completed`.
    ///
    /// Already-completed tasks are returned as-is without re-derivation or
    /// events, so repeated calls are idempotent.
    pub fn mark_task_completed(&mut self, id: TaskId) -> StoreResult<Task> {
        let index = self.position(id)?;
        if self.tasks[index].is_completed() {
            debug!("event=task_complete module=store status=noop task_id={id}");
            return Ok(self.tasks[index].clone());
        }

        self.tasks[index].status = TaskStatus::Completed;
        let task = self.tasks[index].clone();
        info!("event=task_complete module=store status=ok task_id={id}");

        self.commit(StoreEvent::TaskCompleted(id));
        Ok(task)
    }

    pub fn get_task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Monotonic task-collection version.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// All notifications in generation order.
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn unread_notifications(&self) -> Vec<&Notification> {
        self.notifications
            .iter()
            .filter(|notification| !notification.is_read)
            .collect()
    }

    pub fn unread_count(&self) -> usize {
        self.notifications
            .iter()
            .filter(|notification| !notification.is_read)
            .count()
    }

    /// Flips one notification to read. Already-read entries are a no-op.
    pub fn mark_notification_read(&mut self, id: &NotificationId) -> StoreResult<()> {
        let notification = self
            .notifications
            .iter_mut()
            .find(|notification| &notification.id == id)
            .ok_or_else(|| StoreError::NotificationNotFound(id.clone()))?;

        if notification.is_read {
            return Ok(());
        }
        notification.mark_read();
        debug!("event=notification_read module=store status=ok");
        self.listeners
            .emit(&StoreEvent::NotificationRead(id.clone()));
        Ok(())
    }

    /// Marks every unread notification as read and returns how many flipped.
    pub fn mark_all_notifications_read(&mut self) -> usize {
        let mut flipped = Vec::new();
        for notification in self
            .notifications
            .iter_mut()
            .filter(|notification| !notification.is_read)
        {
            notification.mark_read();
            flipped.push(notification.id.clone());
        }
        for id in &flipped {
            self.listeners.emit(&StoreEvent::NotificationRead(id.clone()));
        }
        flipped.len()
    }

    /// Re-runs the derivation pass if tasks or the calendar day changed since
    /// the last pass.
    ///
    /// Derivation otherwise runs only on task mutations; nothing calls this
    /// on a timer. Returns the number of notifications added.
    pub fn refresh_notifications(&mut self) -> usize {
        if self.derived_key == Some((self.version, self.clock.today())) {
            return 0;
        }
        let added = self.derive_pass();
        self.emit_derived(added);
        added
    }

    pub fn filter_tasks(&self, filter: &TaskFilter) -> Vec<&Task> {
        filter_tasks(&self.tasks, filter)
    }

    pub fn tasks_due_between(&self, start: NaiveDate, end: NaiveDate) -> Vec<&Task> {
        tasks_due_between(&self.tasks, start, end)
    }

    /// End-of-day overdue check against the store clock.
    pub fn is_overdue(&self, id: TaskId) -> StoreResult<bool> {
        let task = self.get_task(id).ok_or(StoreError::TaskNotFound(id))?;
        Ok(task.is_overdue(self.clock.now_local()))
    }

    pub fn overdue_tasks(&self) -> Vec<&Task> {
        overdue_tasks(&self.tasks, self.clock.now_local())
    }

    /// Registers a listener invoked after every applied change.
    pub fn subscribe(&mut self, listener: impl FnMut(&StoreEvent) + 'static) -> SubscriptionId {
        let id = self.listeners.subscribe(Box::new(listener));
        debug!(
            "event=store_subscribe module=store status=ok listeners={}",
            self.listeners.len()
        );
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }

    fn position(&self, id: TaskId) -> StoreResult<usize> {
        self.tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or(StoreError::TaskNotFound(id))
    }

    fn next_task_id(&self) -> TaskId {
        loop {
            let id = Uuid::new_v4();
            if self.get_task(id).is_none() {
                return id;
            }
        }
    }

    fn commit(&mut self, event: StoreEvent) {
        self.version += 1;
        let added = self.derive_pass();
        self.listeners.emit(&event);
        self.emit_derived(added);
    }

    fn derive_pass(&mut self) -> usize {
        let today = self.clock.today();
        let fresh = derive_notifications(
            &self.tasks,
            &self.notifications,
            today,
            self.clock.now_utc(),
        );
        let added = fresh.len();
        self.notifications.extend(fresh);
        self.derived_key = Some((self.version, today));

        if added > 0 {
            debug!(
                "event=notifications_derive module=notification status=ok added={added} total={}",
                self.notifications.len()
            );
        }
        added
    }

    fn emit_derived(&mut self, added: usize) {
        if added > 0 {
            self.listeners
                .emit(&StoreEvent::NotificationsDerived { added });
        }
    }
}
