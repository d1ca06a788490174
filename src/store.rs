//! The observable project store.
//!
//! [`ProjectStore`] owns the canonical, insertion-ordered sequence of
//! [`WorkItem`]s. Every mutation synchronously hands each registered listener
//! its own copy of the sequence, in registration order, before returning.
//!
//! The store is single-threaded (`Rc`/`RefCell`). Cloning a `ProjectStore`
//! clones the handle, not the state. Listeners must not call
//! [`ProjectStore::add`] or [`ProjectStore::move_item`] themselves.

use crate::domain::{ItemId, ItemStatus, WorkItem};
use std::{cell::RefCell, fmt, rc::Rc};

/// Subscriber callback; receives an owned snapshot of the store
pub type Listener = Rc<dyn Fn(Vec<WorkItem>)>;

#[derive(Default)]
struct StoreState {
    items: RefCell<Vec<WorkItem>>,
    listeners: RefCell<Vec<Listener>>,
}

/// Shared handle to the board's state
#[derive(Clone, Default)]
pub struct ProjectStore {
    state: Rc<StoreState>,
}

thread_local! {
    static GLOBAL: ProjectStore = ProjectStore::new();
}

impl ProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide store, created on first access
    pub fn global() -> Self {
        GLOBAL.with(ProjectStore::clone)
    }

    /// Creates an active item, appends it and notifies every listener
    pub fn add(&self, title: &str, description: &str, people: u32) -> ItemId {
        let item = WorkItem::new(title.to_string(), description.to_string(), people);
        let id = item.id().clone();
        tracing::debug!(id = %id, title, people, "adding work item");

        self.state.items.borrow_mut().push(item);
        self.notify();
        id
    }

    /// Sets the status of the item with `id` and notifies every listener.
    ///
    /// An unknown identity is a silent no-op: nothing changes and nobody is
    /// notified.
    pub fn move_item(&self, id: &ItemId, status: ItemStatus) {
        {
            let mut items = self.state.items.borrow_mut();
            let Some(item) = items.iter_mut().find(|item| item.id() == id) else {
                tracing::debug!(id = %id, "move ignored, no such work item");
                return;
            };
            tracing::debug!(id = %id, from = %item.status(), to = %status, "moving work item");
            item.set_status(status);
        }
        self.notify();
    }

    /// Registers a listener. There is no removal; registering the same
    /// callback twice gets it called twice.
    pub fn add_listener<F>(&self, listener: F)
    where
        F: Fn(Vec<WorkItem>) + 'static,
    {
        self.state.listeners.borrow_mut().push(Rc::new(listener));
    }

    /// Independent copy of the current items, in insertion order
    pub fn snapshot(&self) -> Vec<WorkItem> {
        self.state.items.borrow().clone()
    }

    pub fn get(&self, id: &ItemId) -> Option<WorkItem> {
        self.state
            .items
            .borrow()
            .iter()
            .find(|item| item.id() == id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.state.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.items.borrow().is_empty()
    }

    pub fn listener_count(&self) -> usize {
        self.state.listeners.borrow().len()
    }

    fn notify(&self) {
        let listeners = self.state.listeners.borrow().clone();
        tracing::trace!(listeners = listeners.len(), "notifying store listeners");
        for listener in listeners {
            listener(self.snapshot());
        }
    }
}

impl fmt::Debug for ProjectStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProjectStore")
            .field("items", &self.state.items.borrow())
            .field("listeners", &self.listener_count())
            .finish()
    }
}
