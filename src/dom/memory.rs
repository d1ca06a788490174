use crate::{
    dom::{template, Dom, EventHandler, EventKind, InsertPosition, NodeId, TemplateNode},
    error::{BoardError, Result},
};
use std::collections::HashMap;

struct Node {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    text: String,
    value: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    listeners: Vec<(EventKind, EventHandler)>,
}

impl Node {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            id: None,
            classes: Vec::new(),
            text: String::new(),
            value: String::new(),
            parent: None,
            children: Vec::new(),
            listeners: Vec::new(),
        }
    }

    fn matches(&self, selector: &str) -> bool {
        if let Some(id) = selector.strip_prefix('#') {
            self.id.as_deref() == Some(id)
        } else if let Some(class) = selector.strip_prefix('.') {
            self.classes.iter().any(|c| c == class)
        } else {
            self.tag.eq_ignore_ascii_case(selector)
        }
    }
}

/// In-memory document: an arena of element nodes under a single root,
/// plus a registry of named templates
pub struct MemoryDom {
    nodes: Vec<Option<Node>>,
    root: NodeId,
    templates: HashMap<String, Vec<TemplateNode>>,
    alerts: Vec<String>,
}

impl MemoryDom {
    const FRAGMENT_TAG: &'static str = "#fragment";

    pub fn new() -> Self {
        Self {
            nodes: vec![Some(Node::new("body"))],
            root: NodeId(0),
            templates: HashMap::new(),
            alerts: Vec::new(),
        }
    }

    /// A document with an `app` host and the board's three templates
    pub fn with_board_templates() -> Self {
        let mut dom = Self::new();
        dom.register_template("project-input", template::project_input());
        dom.register_template("project-list", template::project_list());
        dom.register_template("single-project", template::single_project());
        dom.append_host("app");
        dom
    }

    pub fn register_template(&mut self, name: &str, content: Vec<TemplateNode>) {
        self.templates.insert(name.to_string(), content);
    }

    /// Appends an empty `div` with the given identifier to the document body
    pub fn append_host(&mut self, id: &str) -> NodeId {
        let mut node = Node::new("div");
        node.id = Some(id.to_string());
        node.parent = Some(self.root);
        let host = self.alloc(node);
        if let Some(root) = self.nodes[self.root.0].as_mut() {
            root.children.push(host);
        }
        host
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.node(node).map(|n| n.tag.as_str())
    }

    /// Messages shown through [`Dom::alert`], oldest first
    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    /// Whether `node` is still reachable from the document root
    pub fn is_attached(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == self.root {
                return true;
            }
            current = self.node(id).and_then(|n| n.parent);
        }
        false
    }

    /// Number of live nodes, detached fragments included
    pub fn node_count(&self) -> usize {
        self.nodes.iter().filter(|slot| slot.is_some()).count()
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        self.nodes.push(Some(node));
        NodeId(self.nodes.len() - 1)
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(BoardError::NodeDetached)
    }

    fn build(&mut self, spec: &TemplateNode, parent: NodeId) -> NodeId {
        let mut node = Node::new(&spec.tag);
        node.id = spec.id.clone();
        node.classes = spec.classes.clone();
        node.text = spec.text.clone();
        node.parent = Some(parent);
        let id = self.alloc(node);
        let children: Vec<NodeId> = spec
            .children
            .iter()
            .map(|child| self.build(child, id))
            .collect();
        if let Some(node) = self.nodes[id.0].as_mut() {
            node.children = children;
        }
        id
    }

    fn free(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.get_mut(id.0).and_then(Option::take) {
            for child in node.children {
                self.free(child);
            }
        }
    }

    fn find(&self, root: NodeId, predicate: &dyn Fn(&Node) -> bool) -> Option<NodeId> {
        let node = self.node(root)?;
        node.children.iter().find_map(|&child| {
            let child_node = self.node(child)?;
            if predicate(child_node) {
                Some(child)
            } else {
                self.find(child, predicate)
            }
        })
    }
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl Dom for MemoryDom {
    fn instantiate_template(&mut self, name: &str) -> Result<NodeId> {
        let content = self
            .templates
            .get(name)
            .cloned()
            .ok_or_else(|| BoardError::TemplateNotFound(name.to_string()))?;

        let fragment = self.alloc(Node::new(Self::FRAGMENT_TAG));
        let children: Vec<NodeId> = content
            .iter()
            .map(|spec| self.build(spec, fragment))
            .collect();
        self.node_mut(fragment)?.children = children;
        Ok(fragment)
    }

    fn first_element_child(&self, node: NodeId) -> Option<NodeId> {
        self.node(node)?.children.first().copied()
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node)?.parent
    }

    fn insert(&mut self, host: NodeId, element: NodeId, position: InsertPosition) -> Result<()> {
        // Validate both ends before touching either
        self.node_mut(host)?;
        let old_parent = self.node_mut(element)?.parent;

        if let Some(old_parent) = old_parent {
            if let Ok(parent) = self.node_mut(old_parent) {
                parent.children.retain(|&child| child != element);
                let emptied_fragment =
                    parent.tag == Self::FRAGMENT_TAG && parent.children.is_empty();
                if emptied_fragment {
                    self.free(old_parent);
                }
            }
        }

        let host_node = self.node_mut(host)?;
        match position {
            InsertPosition::Start => host_node.children.insert(0, element),
            InsertPosition::End => host_node.children.push(element),
        }
        self.node_mut(element)?.parent = Some(host);
        Ok(())
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        if self.node(self.root)?.id.as_deref() == Some(id) {
            return Some(self.root);
        }
        self.find(self.root, &|node: &Node| node.id.as_deref() == Some(id))
    }

    fn query(&self, root: NodeId, selector: &str) -> Option<NodeId> {
        self.find(root, &|node: &Node| node.matches(selector))
    }

    fn id(&self, node: NodeId) -> Option<String> {
        self.node(node)?.id.clone()
    }

    fn set_id(&mut self, node: NodeId, id: &str) -> Result<()> {
        self.node_mut(node)?.id = Some(id.to_string());
        Ok(())
    }

    fn text(&self, node: NodeId) -> Option<String> {
        Some(self.node(node)?.text.clone())
    }

    fn set_text(&mut self, node: NodeId, text: &str) -> Result<()> {
        self.node_mut(node)?.text = text.to_string();
        Ok(())
    }

    fn value(&self, node: NodeId) -> Option<String> {
        Some(self.node(node)?.value.clone())
    }

    fn set_value(&mut self, node: NodeId, value: &str) -> Result<()> {
        self.node_mut(node)?.value = value.to_string();
        Ok(())
    }

    fn add_class(&mut self, node: NodeId, class: &str) -> Result<()> {
        let node = self.node_mut(node)?;
        if !node.classes.iter().any(|c| c == class) {
            node.classes.push(class.to_string());
        }
        Ok(())
    }

    fn remove_class(&mut self, node: NodeId, class: &str) -> Result<()> {
        self.node_mut(node)?.classes.retain(|c| c != class);
        Ok(())
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.node(node)
            .map(|n| n.classes.iter().any(|c| c == class))
            .unwrap_or(false)
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.node(node)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    fn clear_children(&mut self, node: NodeId) -> Result<()> {
        let children = std::mem::take(&mut self.node_mut(node)?.children);
        for child in children {
            self.free(child);
        }
        Ok(())
    }

    fn add_event_listener(
        &mut self,
        node: NodeId,
        kind: EventKind,
        handler: EventHandler,
    ) -> Result<()> {
        self.node_mut(node)?.listeners.push((kind, handler));
        Ok(())
    }

    fn event_listeners(&self, node: NodeId, kind: EventKind) -> Vec<EventHandler> {
        self.node(node)
            .map(|n| {
                n.listeners
                    .iter()
                    .filter(|(k, _)| *k == kind)
                    .map(|(_, handler)| handler.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn alert(&mut self, message: &str) {
        tracing::warn!(message, "alert");
        self.alerts.push(message.to_string());
    }
}
