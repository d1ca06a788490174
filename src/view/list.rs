use crate::{
    config::BoardConfig,
    domain::{ItemId, ItemStatus, WorkItem},
    dom::{DomHandle, Event, EventKind, InsertPosition, NodeId},
    drag::{carries_item, decode_item, DragTarget},
    error::{BoardError, Result},
    store::ProjectStore,
    view::{required, Component, ComponentBase, ItemView, Mount},
};
use std::{
    cell::{Cell, RefCell},
    rc::{Rc, Weak},
};

/// Class applied to the inner list while an item hovers over it
pub const DROPPABLE_CLASS: &str = "droppable";

/// Drag interaction state of one list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    DragHover,
}

struct ListState {
    dom: DomHandle,
    store: ProjectStore,
    category: ItemStatus,
    item_template: String,
    base: ComponentBase,
    assigned: RefCell<Vec<WorkItem>>,
    rendered: RefCell<Vec<ItemView>>,
    drag_state: Cell<DragState>,
}

/// One of the board's two lists: subscribes to the store, renders the items
/// of its category and accepts dropped items.
///
/// Event handlers and the store subscription only hold weak references, so
/// they go quiet once the `ListView` is dropped.
pub struct ListView {
    state: Rc<ListState>,
}

impl ListView {
    pub fn new(
        dom: &DomHandle,
        store: &ProjectStore,
        config: &BoardConfig,
        category: ItemStatus,
    ) -> Result<Self> {
        let element_id = format!("{}-projects", category);
        let base = ComponentBase::attach(
            &mut *dom.borrow_mut(),
            Mount {
                template: &config.templates.list,
                host_id: &config.host_id,
                position: InsertPosition::End,
                element_id: Some(element_id.as_str()),
            },
        )?;

        let mut view = Self {
            state: Rc::new(ListState {
                dom: Rc::clone(dom),
                store: store.clone(),
                category,
                item_template: config.templates.item.clone(),
                base,
                assigned: RefCell::new(Vec::new()),
                rendered: RefCell::new(Vec::new()),
                drag_state: Cell::new(DragState::Idle),
            }),
        };
        view.configure()?;
        view.render_content()?;

        // Catch up with items added before this list existed
        view.state.assign(store.snapshot())?;
        Ok(view)
    }

    pub fn category(&self) -> ItemStatus {
        self.state.category
    }

    /// Identifier of the inner `<ul>` the items are rendered into
    pub fn list_id(&self) -> String {
        self.state.list_id()
    }

    pub fn drag_state(&self) -> DragState {
        self.state.drag_state.get()
    }

    /// Items of this list's category from the latest snapshot
    pub fn assigned(&self) -> Vec<WorkItem> {
        self.state.assigned.borrow().clone()
    }

    /// Identities of the currently rendered item views, in order
    pub fn rendered_ids(&self) -> Vec<ItemId> {
        self.state
            .rendered
            .borrow()
            .iter()
            .map(|view| view.item().id().clone())
            .collect()
    }

    fn handler(&self, action: fn(&ListView, &mut Event)) -> Rc<dyn Fn(&mut Event)> {
        let weak: Weak<ListState> = Rc::downgrade(&self.state);
        Rc::new(move |event: &mut Event| {
            if let Some(state) = weak.upgrade() {
                action(&ListView { state }, event);
            }
        })
    }
}

impl ListState {
    fn list_id(&self) -> String {
        format!("{}-projects-list", self.category)
    }

    fn list_element(&self) -> Result<NodeId> {
        required(&*self.dom.borrow(), self.base.element, "ul")
    }

    /// Keeps this category's items and rebuilds the rendered list
    fn assign(&self, snapshot: Vec<WorkItem>) -> Result<()> {
        let relevant: Vec<WorkItem> = snapshot
            .into_iter()
            .filter(|item| item.status() == self.category)
            .collect();
        *self.assigned.borrow_mut() = relevant;
        self.render_items()
    }

    /// Clears every rendered item and builds one view per assigned item
    fn render_items(&self) -> Result<()> {
        let list_id = self.list_id();
        {
            let mut dom = self.dom.borrow_mut();
            let list = dom
                .element_by_id(&list_id)
                .ok_or_else(|| BoardError::ElementNotFound(format!("#{}", list_id)))?;
            dom.clear_children(list)?;
            dom.remove_class(list, DROPPABLE_CLASS)?;
        }
        self.drag_state.set(DragState::Idle);
        self.rendered.borrow_mut().clear();

        let assigned = self.assigned.borrow();
        let mut views = Vec::with_capacity(assigned.len());
        for item in assigned.iter() {
            views.push(ItemView::new(
                &self.dom,
                &list_id,
                &self.item_template,
                item.clone(),
            )?);
        }
        tracing::trace!(list = %self.category, items = views.len(), "rebuilt list");
        *self.rendered.borrow_mut() = views;
        Ok(())
    }
}

impl DragTarget for ListView {
    fn drag_over_handler(&self, event: &mut Event) {
        let accepted = event.data_transfer.as_ref().map_or(false, carries_item);
        if !accepted {
            return;
        }
        event.prevent_default();

        let marked = self.state.list_element().and_then(|list| {
            self.state
                .dom
                .borrow_mut()
                .add_class(list, DROPPABLE_CLASS)
        });
        match marked {
            Ok(()) => self.state.drag_state.set(DragState::DragHover),
            Err(e) => tracing::error!(list = %self.state.category, "failed to mark list: {e}"),
        }
    }

    fn drop_handler(&self, event: &mut Event) {
        let Some(id) = event.data_transfer.as_ref().and_then(decode_item) else {
            return;
        };
        self.state.drag_state.set(DragState::Idle);
        tracing::debug!(id = %id, list = %self.state.category, "item dropped");
        self.state.store.move_item(&id, self.state.category);
    }

    fn drag_leave_handler(&self, _event: &mut Event) {
        let unmarked = self.state.list_element().and_then(|list| {
            self.state
                .dom
                .borrow_mut()
                .remove_class(list, DROPPABLE_CLASS)
        });
        if let Err(e) = unmarked {
            tracing::error!(list = %self.state.category, "failed to unmark list: {e}");
        }
        self.state.drag_state.set(DragState::Idle);
    }
}

impl Component for ListView {
    fn base(&self) -> &ComponentBase {
        &self.state.base
    }

    fn configure(&mut self) -> Result<()> {
        {
            let mut dom = self.state.dom.borrow_mut();
            let element = self.state.base.element;
            dom.add_event_listener(
                element,
                EventKind::DragOver,
                self.handler(|view, event| view.drag_over_handler(event)),
            )?;
            dom.add_event_listener(
                element,
                EventKind::DragLeave,
                self.handler(|view, event| view.drag_leave_handler(event)),
            )?;
            dom.add_event_listener(
                element,
                EventKind::Drop,
                self.handler(|view, event| view.drop_handler(event)),
            )?;
        }

        let weak = Rc::downgrade(&self.state);
        self.state.store.add_listener(move |items| {
            let Some(state) = weak.upgrade() else {
                return;
            };
            if let Err(e) = state.assign(items) {
                tracing::error!(list = %state.category, "failed to render list: {e}");
            }
        });
        Ok(())
    }

    fn render_content(&mut self) -> Result<()> {
        let list_id = self.state.list_id();
        let mut dom = self.state.dom.borrow_mut();
        let list = required(&*dom, self.state.base.element, "ul")?;
        let heading = required(&*dom, self.state.base.element, "h2")?;

        dom.set_id(list, &list_id)?;
        dom.set_text(
            heading,
            &format!("{} PROJECTS", self.state.category.as_str().to_uppercase()),
        )
    }
}
