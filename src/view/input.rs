use crate::{
    config::{BoardConfig, InputRules},
    domain::ItemId,
    dom::{DomHandle, Event, EventKind, InsertPosition, NodeId},
    error::{BoardError, Result},
    store::ProjectStore,
    validation::{validate, FieldValue},
    view::{required, Component, ComponentBase, Mount},
};
use std::rc::{Rc, Weak};

pub const INVALID_INPUT_MESSAGE: &str = "Invalid input, please try again!";

struct Fields {
    title: NodeId,
    description: NodeId,
    people: NodeId,
}

struct InputState {
    dom: DomHandle,
    store: ProjectStore,
    rules: InputRules,
    base: ComponentBase,
    fields: Fields,
}

/// The new-item form. Submitting validates the three fields and, if they
/// pass, adds an item to the store and clears the form.
pub struct InputView {
    state: Rc<InputState>,
}

impl InputView {
    pub fn new(dom: &DomHandle, store: &ProjectStore, config: &BoardConfig) -> Result<Self> {
        let (base, fields) = {
            let mut dom = dom.borrow_mut();
            let base = ComponentBase::attach(
                &mut *dom,
                Mount {
                    template: &config.templates.input,
                    host_id: &config.host_id,
                    position: InsertPosition::Start,
                    element_id: Some("user-input"),
                },
            )?;
            let fields = Fields {
                title: required(&*dom, base.element, "#title")?,
                description: required(&*dom, base.element, "#description")?,
                people: required(&*dom, base.element, "#people")?,
            };
            (base, fields)
        };

        let mut view = Self {
            state: Rc::new(InputState {
                dom: Rc::clone(dom),
                store: store.clone(),
                rules: config.rules.clone(),
                base,
                fields,
            }),
        };
        view.configure()?;
        view.render_content()?;
        Ok(view)
    }

    /// Types values into the form fields
    pub fn fill(&self, title: &str, description: &str, people: &str) -> Result<()> {
        let fields = &self.state.fields;
        let mut dom = self.state.dom.borrow_mut();
        dom.set_value(fields.title, title)?;
        dom.set_value(fields.description, description)?;
        dom.set_value(fields.people, people)
    }

    /// Validates the form and adds the item, without notifying the user on
    /// failure
    pub fn submit(&self) -> Result<ItemId> {
        self.state.submit()
    }
}

impl InputState {
    fn gather(&self) -> Result<(String, String, u32)> {
        let (title, description, people) = {
            let dom = self.dom.borrow();
            let read = |node| dom.value(node).ok_or(BoardError::NodeDetached);
            (
                read(self.fields.title)?,
                read(self.fields.description)?,
                read(self.fields.people)?,
            )
        };

        let headcount = people.trim().parse::<f64>().unwrap_or(f64::NAN);
        let valid = validate(&FieldValue::from(title.as_str()), &self.rules.title)
            && validate(&FieldValue::from(description.as_str()), &self.rules.description)
            && !(self.rules.people.required && people.trim().is_empty())
            && validate(&FieldValue::Number(headcount), &self.rules.people)
            && headcount >= 0.0
            && headcount.fract() == 0.0
            && headcount <= f64::from(u32::MAX);

        if !valid {
            return Err(BoardError::InvalidInput(INVALID_INPUT_MESSAGE.to_string()));
        }
        Ok((title, description, headcount as u32))
    }

    fn clear(&self) -> Result<()> {
        let mut dom = self.dom.borrow_mut();
        for field in [self.fields.title, self.fields.description, self.fields.people] {
            dom.set_value(field, "")?;
        }
        Ok(())
    }

    fn submit(&self) -> Result<ItemId> {
        let (title, description, people) = self.gather()?;
        let id = self.store.add(&title, &description, people);
        self.clear()?;
        Ok(id)
    }

    fn submit_handler(&self, event: &mut Event) {
        event.prevent_default();
        match self.submit() {
            Ok(id) => tracing::debug!(id = %id, "work item submitted"),
            Err(BoardError::InvalidInput(message)) => {
                tracing::warn!("rejected form input");
                self.dom.borrow_mut().alert(&message);
            }
            Err(e) => tracing::error!("failed to submit form: {e}"),
        }
    }
}

impl Component for InputView {
    fn base(&self) -> &ComponentBase {
        &self.state.base
    }

    fn configure(&mut self) -> Result<()> {
        let weak: Weak<InputState> = Rc::downgrade(&self.state);
        self.state.dom.borrow_mut().add_event_listener(
            self.state.base.element,
            EventKind::Submit,
            Rc::new(move |event: &mut Event| {
                if let Some(state) = weak.upgrade() {
                    state.submit_handler(event);
                }
            }),
        )
    }

    // The form is static markup
    fn render_content(&mut self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dom::{dispatch, Dom, MemoryDom},
        domain::ItemStatus,
    };
    use std::cell::RefCell;

    fn setup() -> (Rc<RefCell<MemoryDom>>, ProjectStore, InputView) {
        let memory = Rc::new(RefCell::new(MemoryDom::with_board_templates()));
        let dom: DomHandle = memory.clone();
        let store = ProjectStore::new();
        let view = InputView::new(&dom, &store, &BoardConfig::default()).unwrap();
        (memory, store, view)
    }

    fn submit_event(memory: &Rc<RefCell<MemoryDom>>, view: &InputView) -> Event {
        let dom: DomHandle = memory.clone();
        let mut event = Event::new(EventKind::Submit);
        dispatch(&dom, view.base().element, &mut event);
        event
    }

    #[test]
    fn test_form_attached_at_start() {
        let (memory, _store, view) = setup();
        let dom = memory.borrow();
        let app = dom.element_by_id("app").unwrap();

        assert_eq!(dom.children(app).first(), Some(&view.base().element));
        assert_eq!(dom.element_by_id("user-input"), Some(view.base().element));
    }

    #[test]
    fn test_valid_submit_adds_item_and_clears() {
        let (memory, store, view) = setup();
        view.fill("Build API", "Implement REST endpoints", "3").unwrap();

        let event = submit_event(&memory, &view);

        assert!(event.default_prevented());
        let items = store.snapshot();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title(), "Build API");
        assert_eq!(items[0].people(), 3);
        assert_eq!(items[0].status(), ItemStatus::Active);

        let dom = memory.borrow();
        let title = dom.element_by_id("title").unwrap();
        assert_eq!(dom.value(title).as_deref(), Some(""));
        assert!(dom.alerts().is_empty());
    }

    #[test]
    fn test_invalid_submit_alerts_without_mutation() {
        let (memory, store, view) = setup();
        view.fill("Build API", "tiny", "3").unwrap();

        let event = submit_event(&memory, &view);

        assert!(event.default_prevented());
        assert!(store.is_empty());
        let dom = memory.borrow();
        assert_eq!(dom.alerts(), [INVALID_INPUT_MESSAGE.to_string()]);
        let description = dom.element_by_id("description").unwrap();
        assert_eq!(dom.value(description).as_deref(), Some("tiny"));
    }

    #[test]
    fn test_people_bounds() {
        let (_memory, store, view) = setup();

        for people in ["0", "6", "", "two", "2.5", "-1"] {
            view.fill("Build API", "Implement REST endpoints", people)
                .unwrap();
            assert!(
                matches!(view.submit(), Err(BoardError::InvalidInput(_))),
                "people = {people:?}"
            );
        }
        assert!(store.is_empty());

        view.fill("Build API", "Implement REST endpoints", " 5 ").unwrap();
        let id = view.submit().unwrap();
        assert_eq!(store.get(&id).unwrap().people(), 5);
    }

    #[test]
    fn test_blank_title_rejected() {
        let (_memory, store, view) = setup();
        view.fill("   ", "Implement REST endpoints", "2").unwrap();
        assert!(view.submit().is_err());
        assert_eq!(store.len(), 0);
    }
}
