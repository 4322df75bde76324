use chrono::{NaiveDate, NaiveDateTime};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use taskdesk_core::{
    FixedClock, StoreError, StoreEvent, TaskDraft, TaskPatch, TaskPriority, TaskStatus, TaskStore,
};
use uuid::Uuid;

fn at(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

fn store() -> TaskStore<FixedClock> {
    TaskStore::with_clock(FixedClock::new(at(19, 10)))
}

#[test]
fn add_assigns_unique_ids_and_created_at() {
    let mut store = store();
    let mut ids = HashSet::new();

    for index in 0..50 {
        let task = store
            .add_task(TaskDraft::new(format!("task {index}"), "Work"))
            .unwrap();
        assert!(!task.id.is_nil());
        assert_eq!(task.created_at.naive_utc(), at(19, 10));
        assert!(ids.insert(task.id));
    }

    assert_eq!(store.tasks().len(), 50);
}

#[test]
fn add_trims_title_and_keeps_draft_fields() {
    let mut store = store();
    let task = store
        .add_task(
            TaskDraft::new("  Morning jog  ", "Health")
                .description("Run for 30 minutes")
                .due_date(at(20, 7))
                .priority(TaskPriority::High),
        )
        .unwrap();

    let loaded = store.get_task(task.id).unwrap();
    assert_eq!(loaded.title, "Morning jog");
    assert_eq!(loaded.description, "Run for 30 minutes");
    assert_eq!(loaded.due_date, Some(at(20, 7)));
    assert_eq!(loaded.status, TaskStatus::Pending);
    assert_eq!(loaded.priority, TaskPriority::High);
    assert_eq!(loaded.category, "Health");
}

#[test]
fn update_merges_only_specified_fields() {
    let mut store = store();
    let original = store
        .add_task(
            TaskDraft::new("Read book", "Personal")
                .description("Read chapter 5")
                .due_date(at(26, 20)),
        )
        .unwrap();

    let patch = TaskPatch::new()
        .title("Read two chapters")
        .status(TaskStatus::InProgress);
    store.update_task(original.id, &patch).unwrap();

    let loaded = store.get_task(original.id).unwrap();
    assert_eq!(loaded.title, "Read two chapters");
    assert_eq!(loaded.status, TaskStatus::InProgress);
    assert_eq!(loaded.description, original.description);
    assert_eq!(loaded.due_date, original.due_date);
    assert_eq!(loaded.priority, original.priority);
    assert_eq!(loaded.category, original.category);
    assert_eq!(loaded.id, original.id);
    assert_eq!(loaded.created_at, original.created_at);
}

#[test]
fn update_rejects_invalid_merge_without_changing_state() {
    let mut store = store();
    let task = store.add_task(TaskDraft::new("Plan sprint", "Work")).unwrap();
    let version = store.version();

    let err = store
        .update_task(task.id, &TaskPatch::new().title(" ").category("Chores"))
        .unwrap_err();

    assert!(matches!(err, StoreError::Validation(_)));
    assert_eq!(store.get_task(task.id).unwrap(), &task);
    assert_eq!(store.version(), version);
}

#[test]
fn unknown_ids_report_not_found() {
    let mut store = store();
    store.add_task(TaskDraft::new("keep me", "Work")).unwrap();
    let before = store.tasks().to_vec();
    let missing = Uuid::new_v4();

    assert_eq!(
        store.update_task(missing, &TaskPatch::new().title("x")),
        Err(StoreError::TaskNotFound(missing))
    );
    assert_eq!(
        store.mark_task_completed(missing),
        Err(StoreError::TaskNotFound(missing))
    );
    assert_eq!(
        store.delete_task(missing),
        Err(StoreError::TaskNotFound(missing))
    );
    assert!(store.get_task(missing).is_none());
    assert_eq!(store.tasks(), before.as_slice());
}

#[test]
fn delete_removes_task_and_repeat_is_noop() {
    let mut store = store();
    let keep = store.add_task(TaskDraft::new("keep", "Work")).unwrap();
    let gone = store.add_task(TaskDraft::new("gone", "Work")).unwrap();

    let removed = store.delete_task(gone.id).unwrap();
    assert_eq!(removed.id, gone.id);
    assert!(store.get_task(gone.id).is_none());

    let snapshot = store.tasks().to_vec();
    let version = store.version();
    assert!(store.delete_task(gone.id).is_err());
    assert_eq!(store.tasks(), snapshot.as_slice());
    assert_eq!(store.version(), version);
    assert!(store.get_task(keep.id).is_some());
}

#[test]
fn mark_completed_is_idempotent() {
    let mut store = store();
    let task = store.add_task(TaskDraft::new("Ship release", "Work")).unwrap();

    let once = store.mark_task_completed(task.id).unwrap();
    let snapshot = store.tasks().to_vec();
    let twice = store.mark_task_completed(task.id).unwrap();

    assert_eq!(once, twice);
    assert_eq!(once.status, TaskStatus::Completed);
    assert!(once.is_completed());
    assert_eq!(store.tasks(), snapshot.as_slice());
}

#[test]
fn status_update_drives_completion() {
    let mut store = store();
    let task = store.add_task(TaskDraft::new("File taxes", "Personal")).unwrap();

    store
        .update_task(task.id, &TaskPatch::new().status(TaskStatus::Completed))
        .unwrap();
    assert!(store.get_task(task.id).unwrap().is_completed());

    store
        .update_task(task.id, &TaskPatch::new().status(TaskStatus::Pending))
        .unwrap();
    assert!(!store.get_task(task.id).unwrap().is_completed());
}

#[test]
fn subscribers_see_events_in_order() {
    let mut store = store();
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    let subscription = store.subscribe(move |event| sink.borrow_mut().push(event.clone()));

    let task = store
        .add_task(TaskDraft::new("Pay rent", "Personal").due_date(at(19, 9)))
        .unwrap();
    store.mark_task_completed(task.id).unwrap();
    store.mark_task_completed(task.id).unwrap();
    store.delete_task(task.id).unwrap();

    assert_eq!(
        events.borrow().as_slice(),
        &[
            StoreEvent::TaskAdded(task.id),
            StoreEvent::NotificationsDerived { added: 1 },
            StoreEvent::TaskCompleted(task.id),
            StoreEvent::TaskDeleted(task.id),
        ]
    );

    assert!(store.unsubscribe(subscription));
    assert!(!store.unsubscribe(subscription));
    store.add_task(TaskDraft::new("unseen", "Work")).unwrap();
    assert_eq!(events.borrow().len(), 4);
}

#[test]
fn rejected_operations_emit_nothing() {
    let mut store = store();
    let count = Rc::new(RefCell::new(0usize));
    let sink = Rc::clone(&count);
    store.subscribe(move |_| *sink.borrow_mut() += 1);

    assert!(store.add_task(TaskDraft::new("", "")).is_err());
    assert!(store.delete_task(Uuid::new_v4()).is_err());

    assert_eq!(*count.borrow(), 0);
}

#[test]
fn empty_patch_is_a_no_op() {
    let mut store = store();
    let task = store.add_task(TaskDraft::new("Pay rent", "Personal")).unwrap();
    let version = store.version();
    let count = Rc::new(RefCell::new(0usize));
    let sink = Rc::clone(&count);
    store.subscribe(move |_| *sink.borrow_mut() += 1);

    let unchanged = store.update_task(task.id, &TaskPatch::new()).unwrap();

    assert_eq!(unchanged, task);
    assert_eq!(store.version(), version);
    assert_eq!(*count.borrow(), 0);

    let missing = Uuid::new_v4();
    assert_eq!(
        store.update_task(missing, &TaskPatch::new()),
        Err(StoreError::TaskNotFound(missing))
    );
}
