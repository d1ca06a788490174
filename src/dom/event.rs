use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// Platform events the board listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Submit,
    DragStart,
    DragEnd,
    DragOver,
    DragLeave,
    Drop,
}

/// Operation a drag source allows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DropEffect {
    #[default]
    None,
    Copy,
    Move,
    Link,
    All,
}

/// Data carried by a drag operation, keyed by MIME type in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataTransfer {
    entries: Vec<(String, String)>,
    pub effect_allowed: DropEffect,
}

impl DataTransfer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `data` under `format`, replacing an existing entry of that type
    pub fn set_data(&mut self, format: &str, data: &str) {
        match self.entries.iter_mut().find(|(kind, _)| kind == format) {
            Some(entry) => entry.1 = data.to_string(),
            None => self.entries.push((format.to_string(), data.to_string())),
        }
    }

    pub fn get_data(&self, format: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(kind, _)| kind == format)
            .map(|(_, data)| data.as_str())
    }

    /// Advertised MIME types
    pub fn types(&self) -> Vec<&str> {
        self.entries.iter().map(|(kind, _)| kind.as_str()).collect()
    }

    pub fn clear_data(&mut self) {
        self.entries.clear();
    }
}

/// An event as seen by handlers
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub kind: EventKind,
    pub data_transfer: Option<DataTransfer>,
    default_prevented: bool,
}

impl Event {
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            data_transfer: None,
            default_prevented: false,
        }
    }

    pub fn with_data_transfer(kind: EventKind, data_transfer: DataTransfer) -> Self {
        Self {
            kind,
            data_transfer: Some(data_transfer),
            default_prevented: false,
        }
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

pub type EventHandler = Rc<dyn Fn(&mut Event)>;
