//! Store change events and listener registry.

use crate::model::notification::NotificationId;
use crate::model::task::TaskId;
use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter};

/// Handle returned by [`crate::TaskStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

/// Change emitted after a store mutation has fully applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    TaskAdded(TaskId),
    TaskUpdated(TaskId),
    TaskDeleted(TaskId),
    TaskCompleted(TaskId),
    /// Emitted only when a derivation pass appended at least one entry.
    NotificationsDerived { added: usize },
    NotificationRead(NotificationId),
}

pub type Listener = Box<dyn FnMut(&StoreEvent)>;

/// Listeners keyed by subscription order.
#[derive(Default)]
pub(crate) struct Listeners {
    next_id: u64,
    entries: BTreeMap<SubscriptionId, Listener>,
}

impl Listeners {
    pub(crate) fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.insert(id, listener);
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.entries.remove(&id).is_some()
    }

    pub(crate) fn emit(&mut self, event: &StoreEvent) {
        for listener in self.entries.values_mut() {
            listener(event);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

impl Debug for Listeners {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}
