//! Views and their shared lifecycle.
//!
//! Every view is built in the same order: [`ComponentBase::attach`] clones
//! the view's template, tags its root element and inserts it into the host;
//! then the view runs [`Component::configure`] to wire events and
//! subscriptions, and finally [`Component::render_content`] to fill in text.
//! Views are never detached individually.

use crate::{
    dom::{Dom, InsertPosition, NodeId},
    error::{BoardError, Result},
};

pub mod input;
pub mod item;
pub mod list;

pub use input::InputView;
pub use item::ItemView;
pub use list::{DragState, ListView};

/// Where and from what a view is attached
#[derive(Debug, Clone, Copy)]
pub struct Mount<'a> {
    pub template: &'a str,
    pub host_id: &'a str,
    pub position: InsertPosition,
    pub element_id: Option<&'a str>,
}

/// The attached root element of a view and the host it lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentBase {
    pub host: NodeId,
    pub element: NodeId,
}

impl ComponentBase {
    /// Instantiates the template, assigns the optional identifier to its
    /// root element and inserts that element into the host. Exactly one
    /// insertion happens per call.
    pub fn attach(dom: &mut dyn Dom, mount: Mount<'_>) -> Result<Self> {
        let host = dom
            .element_by_id(mount.host_id)
            .ok_or_else(|| BoardError::ElementNotFound(format!("#{}", mount.host_id)))?;

        let fragment = dom.instantiate_template(mount.template)?;
        let element = dom
            .first_element_child(fragment)
            .ok_or_else(|| BoardError::EmptyTemplate(mount.template.to_string()))?;
        if let Some(id) = mount.element_id {
            dom.set_id(element, id)?;
        }
        dom.insert(host, element, mount.position)?;

        tracing::trace!(template = mount.template, host = mount.host_id, "attached view");
        Ok(Self { host, element })
    }
}

/// The two phases every concrete view implements. Constructors call
/// `configure` and then `render_content` right after attaching.
pub trait Component {
    fn base(&self) -> &ComponentBase;

    /// Wires event handlers and store subscriptions
    fn configure(&mut self) -> Result<()>;

    /// Populates text and attributes
    fn render_content(&mut self) -> Result<()>;
}

/// Looks up a required descendant of a view's root element
pub(crate) fn required(dom: &dyn Dom, root: NodeId, selector: &str) -> Result<NodeId> {
    dom.query(root, selector)
        .ok_or_else(|| BoardError::ElementNotFound(selector.to_string()))
}
