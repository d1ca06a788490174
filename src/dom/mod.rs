//! The document platform the views render into.
//!
//! Views only talk to the [`Dom`] trait: clone a named template, insert an
//! element into a host, look up descendants, set text and classes, and
//! register event handlers. [`MemoryDom`] is a headless implementation.

use crate::error::Result;
use std::{cell::RefCell, rc::Rc};

pub mod event;
pub mod memory;
pub mod template;

pub use event::{DataTransfer, DropEffect, Event, EventHandler, EventKind};
pub use memory::MemoryDom;
pub use template::TemplateNode;

/// Handle to a node owned by a [`Dom`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// Where an element is inserted among the host's children
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    Start,
    End,
}

/// Shared, single-threaded access to the document
pub type DomHandle = Rc<RefCell<dyn Dom>>;

pub trait Dom {
    /// Produces a detached copy of a named template's content
    fn instantiate_template(&mut self, name: &str) -> Result<NodeId>;

    fn first_element_child(&self, node: NodeId) -> Option<NodeId>;

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Moves `element` into `host`, first or last
    fn insert(&mut self, host: NodeId, element: NodeId, position: InsertPosition) -> Result<()>;

    /// Finds an element attached to the document by its identifier
    fn element_by_id(&self, id: &str) -> Option<NodeId>;

    /// First descendant of `root` matching a `tag`, `#id` or `.class` selector
    fn query(&self, root: NodeId, selector: &str) -> Option<NodeId>;

    fn id(&self, node: NodeId) -> Option<String>;

    fn set_id(&mut self, node: NodeId, id: &str) -> Result<()>;

    fn text(&self, node: NodeId) -> Option<String>;

    fn set_text(&mut self, node: NodeId, text: &str) -> Result<()>;

    /// Current value of a form field
    fn value(&self, node: NodeId) -> Option<String>;

    fn set_value(&mut self, node: NodeId, value: &str) -> Result<()>;

    fn add_class(&mut self, node: NodeId, class: &str) -> Result<()>;

    fn remove_class(&mut self, node: NodeId, class: &str) -> Result<()>;

    fn has_class(&self, node: NodeId, class: &str) -> bool;

    fn children(&self, node: NodeId) -> Vec<NodeId>;

    /// Removes and discards every child of `node`
    fn clear_children(&mut self, node: NodeId) -> Result<()>;

    fn add_event_listener(
        &mut self,
        node: NodeId,
        kind: EventKind,
        handler: EventHandler,
    ) -> Result<()>;

    fn event_listeners(&self, node: NodeId, kind: EventKind) -> Vec<EventHandler>;

    /// Blocking user-facing notification
    fn alert(&mut self, message: &str);
}

/// Delivers `event` to `target` and then to each ancestor in turn.
///
/// The document is only borrowed while collecting handlers, so handlers are
/// free to mutate it.
pub fn dispatch(dom: &DomHandle, target: NodeId, event: &mut Event) {
    let handlers: Vec<EventHandler> = {
        let dom = dom.borrow();
        let mut handlers = Vec::new();
        let mut current = Some(target);
        while let Some(node) = current {
            handlers.extend(dom.event_listeners(node, event.kind));
            current = dom.parent(node);
        }
        handlers
    };

    tracing::trace!(kind = ?event.kind, handlers = handlers.len(), "dispatching event");
    for handler in handlers {
        handler(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_dispatch_bubbles_to_ancestors() {
        let memory = Rc::new(RefCell::new(MemoryDom::new()));
        let dom: DomHandle = memory.clone();
        memory.borrow_mut().register_template(
            "card",
            vec![TemplateNode::element("section").with_child(TemplateNode::element("ul"))],
        );

        let host = memory.borrow_mut().append_host("app");
        let section = {
            let mut dom = memory.borrow_mut();
            let fragment = dom.instantiate_template("card").unwrap();
            let section = dom.first_element_child(fragment).unwrap();
            dom.insert(host, section, InsertPosition::End).unwrap();
            section
        };
        let list = memory.borrow().query(section, "ul").unwrap();

        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        memory
            .borrow_mut()
            .add_event_listener(
                section,
                EventKind::DragOver,
                Rc::new(move |event: &mut Event| {
                    counter.set(counter.get() + 1);
                    event.prevent_default();
                }),
            )
            .unwrap();

        let mut event = Event::new(EventKind::DragOver);
        dispatch(&dom, list, &mut event);
        assert_eq!(hits.get(), 1);
        assert!(event.default_prevented());

        let mut other = Event::new(EventKind::Drop);
        dispatch(&dom, list, &mut other);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_handlers_may_mutate_document() {
        let memory = Rc::new(RefCell::new(MemoryDom::new()));
        let dom: DomHandle = memory.clone();
        let host = memory.borrow_mut().append_host("app");

        let inner = Rc::clone(&dom);
        memory
            .borrow_mut()
            .add_event_listener(
                host,
                EventKind::Submit,
                Rc::new(move |_: &mut Event| {
                    inner.borrow_mut().alert("submitted");
                }),
            )
            .unwrap();

        dispatch(&dom, host, &mut Event::new(EventKind::Submit));
        assert_eq!(memory.borrow().alerts(), ["submitted".to_string()]);
    }
}
