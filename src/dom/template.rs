use serde::{Deserialize, Serialize};

/// Declarative description of an element subtree used as template content
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateNode {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub text: String,
    pub children: Vec<TemplateNode>,
}

impl TemplateNode {
    pub fn element(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn with_child(mut self, child: TemplateNode) -> Self {
        self.children.push(child);
        self
    }
}

fn form_control(label: &str, field: TemplateNode) -> TemplateNode {
    TemplateNode::element("div")
        .with_class("form-control")
        .with_child(TemplateNode::element("label").with_text(label))
        .with_child(field)
}

/// Markup of the new-project form
pub fn project_input() -> Vec<TemplateNode> {
    vec![TemplateNode::element("form")
        .with_child(form_control(
            "Title",
            TemplateNode::element("input").with_id("title"),
        ))
        .with_child(form_control(
            "Description",
            TemplateNode::element("textarea").with_id("description"),
        ))
        .with_child(form_control(
            "People",
            TemplateNode::element("input").with_id("people"),
        ))
        .with_child(TemplateNode::element("button").with_text("ADD PROJECT"))]
}

/// Markup of one project list section
pub fn project_list() -> Vec<TemplateNode> {
    vec![TemplateNode::element("section")
        .with_class("projects")
        .with_child(TemplateNode::element("header").with_child(TemplateNode::element("h2")))
        .with_child(TemplateNode::element("ul"))]
}

/// Markup of a single project entry
pub fn single_project() -> Vec<TemplateNode> {
    vec![TemplateNode::element("li")
        .with_child(TemplateNode::element("h2"))
        .with_child(TemplateNode::element("h3"))
        .with_child(TemplateNode::element("p"))]
}
