use crate::{
    domain::{ItemId, WorkItem},
    dom::{DataTransfer, DomHandle, Event, EventKind, InsertPosition},
    drag::{encode_item, Draggable},
    error::Result,
    view::{required, Component, ComponentBase, Mount},
};
use std::rc::Rc;

/// A single draggable entry of a list, bound to one work item
pub struct ItemView {
    dom: DomHandle,
    base: ComponentBase,
    item: WorkItem,
}

impl ItemView {
    /// Renders `item` at the end of the element identified by `host_id`
    pub fn new(dom: &DomHandle, host_id: &str, template: &str, item: WorkItem) -> Result<Self> {
        let base = ComponentBase::attach(
            &mut *dom.borrow_mut(),
            Mount {
                template,
                host_id,
                position: InsertPosition::End,
                element_id: Some(item.id().as_str()),
            },
        )?;

        let mut view = Self {
            dom: Rc::clone(dom),
            base,
            item,
        };
        view.configure()?;
        view.render_content()?;
        Ok(view)
    }

    pub fn item(&self) -> &WorkItem {
        &self.item
    }
}

fn start_drag(id: &ItemId, event: &mut Event) {
    let transfer = event.data_transfer.get_or_insert_with(DataTransfer::new);
    encode_item(transfer, id);
    tracing::trace!(id = %id, "drag started");
}

impl Draggable for ItemView {
    fn drag_start_handler(&self, event: &mut Event) {
        start_drag(self.item.id(), event);
    }

    // The list owns the visual state, nothing to reset here
    fn drag_end_handler(&self, _event: &mut Event) {}
}

impl Component for ItemView {
    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn configure(&mut self) -> Result<()> {
        let id = self.item.id().clone();
        let mut dom = self.dom.borrow_mut();
        dom.add_event_listener(
            self.base.element,
            EventKind::DragStart,
            Rc::new(move |event: &mut Event| start_drag(&id, event)),
        )?;
        dom.add_event_listener(
            self.base.element,
            EventKind::DragEnd,
            Rc::new(|_: &mut Event| {}),
        )
    }

    fn render_content(&mut self) -> Result<()> {
        let mut dom = self.dom.borrow_mut();
        let title = required(&*dom, self.base.element, "h2")?;
        let people = required(&*dom, self.base.element, "h3")?;
        let description = required(&*dom, self.base.element, "p")?;

        dom.set_text(title, self.item.title())?;
        dom.set_text(people, &format!("{} assigned", self.item.people_label()))?;
        dom.set_text(description, self.item.description())
    }
}
