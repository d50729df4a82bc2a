//! Change notification for store observers.

use crate::model::CollectionKind;
use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use uuid::Uuid;

pub type SubscriptionId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Updated,
    Deleted,
    /// Block sequence of a service was reordered.
    BlocksReordered,
}

impl ChangeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Updated => "updated",
            Self::Deleted => "deleted",
            Self::BlocksReordered => "blocks_reordered",
        }
    }
}

/// One committed mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreChange {
    /// Store revision after this change was applied.
    pub revision: u64,
    pub collection: CollectionKind,
    pub kind: ChangeKind,
    /// Id of the top-level record that changed.
    pub id: Uuid,
}

/// Observer notified synchronously after every committed mutation.
pub trait StoreListener {
    fn on_change(&self, change: &StoreChange);
}

impl<F> StoreListener for F
where
    F: Fn(&StoreChange),
{
    fn on_change(&self, change: &StoreChange) {
        self(change)
    }
}

#[derive(Default)]
pub(crate) struct ListenerRegistry {
    next_id: SubscriptionId,
    listeners: BTreeMap<SubscriptionId, Arc<dyn StoreListener>>,
}

impl ListenerRegistry {
    pub(crate) fn subscribe(&mut self, listener: Arc<dyn StoreListener>) -> SubscriptionId {
        self.next_id += 1;
        self.listeners.insert(self.next_id, listener);
        self.next_id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Notifies listeners in subscription order.
    pub(crate) fn notify(&self, change: &StoreChange) {
        for listener in self.listeners.values() {
            listener.on_change(change);
        }
    }
}

impl Debug for ListenerRegistry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("next_id", &self.next_id)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
