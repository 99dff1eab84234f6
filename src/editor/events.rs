//! Change notification
//!
//! Observers register a callback and are called once per applied store
//! operation, after the new state is in place. Failed operations notify
//! nobody.

use super::EditorState;
use crate::id::{ObjectId, ProjectId};

/// What an applied operation changed
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    CatalogLoaded { count: usize },
    ProjectCreated(ProjectId),
    ProjectLoaded(ProjectId),
    ProjectSaved(ProjectId),
    ProjectDeleted { id: ProjectId, was_current: bool },
    ObjectAdded(ObjectId),
    ObjectUpdated(ObjectId),
    ObjectDeleted { id: ObjectId, was_selected: bool },
    ObjectDuplicated { source: ObjectId, copy: ObjectId },
    SelectionChanged(Option<ObjectId>),
    ViewChanged,
}

impl Change {
    /// Whether the working object list may have changed
    pub fn touches_objects(&self) -> bool {
        matches!(
            self,
            Change::ProjectCreated(_)
                | Change::ProjectLoaded(_)
                | Change::ProjectDeleted { was_current: true, .. }
                | Change::ObjectAdded(_)
                | Change::ObjectUpdated(_)
                | Change::ObjectDeleted { .. }
                | Change::ObjectDuplicated { .. }
        )
    }
}

/// Handle returned by `subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&Change, &EditorState)>;

/// Registered observers, called in subscription order
#[derive(Default)]
pub struct Observers {
    next_id: u64,
    callbacks: Vec<(SubscriptionId, Callback)>,
}

impl Observers {
    pub fn subscribe(&mut self, callback: impl FnMut(&Change, &EditorState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.callbacks.push((id, Box::new(callback)));
        id
    }

    /// Returns false if `id` was not subscribed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(sid, _)| *sid != id);
        self.callbacks.len() != before
    }

    pub fn notify(&mut self, change: &Change, state: &EditorState) {
        for (_, callback) in &mut self.callbacks {
            callback(change, state);
        }
    }
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("count", &self.callbacks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_notify_in_order_and_unsubscribe() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut observers = Observers::default();

        let l1 = Rc::clone(&log);
        let a = observers.subscribe(move |_, _| l1.borrow_mut().push("a"));
        let l2 = Rc::clone(&log);
        observers.subscribe(move |_, _| l2.borrow_mut().push("b"));

        let state = EditorState::default();
        observers.notify(&Change::ViewChanged, &state);
        assert_eq!(*log.borrow(), vec!["a", "b"]);

        assert!(observers.unsubscribe(a));
        assert!(!observers.unsubscribe(a));
        observers.notify(&Change::ViewChanged, &state);
        assert_eq!(*log.borrow(), vec!["a", "b", "b"]);
        assert_eq!(observers.callbacks.len(), 1);
    }

    #[test]
    fn test_touches_objects() {
        assert!(Change::ObjectAdded(ObjectId::new("x")).touches_objects());
        assert!(!Change::ViewChanged.touches_objects());
        assert!(!Change::ProjectDeleted {
            id: ProjectId::new("p"),
            was_current: false
        }
        .touches_objects());
    }
}
