//! # Taskboard Core
//!
//! State, views and drag-and-drop for a two-list task board.
//!
//! A single [`ProjectStore`] owns every work item and pushes a fresh
//! snapshot to each subscribed view on every change. Views render into any
//! [`dom::Dom`] implementation through a shared attach/configure/render
//! lifecycle, and dragging an item between lists moves it through the store.

pub mod app;
pub mod config;
pub mod dom;
pub mod domain;
pub mod drag;
pub mod error;
pub mod store;
pub mod validation;
pub mod view;

// Re-export commonly used types
pub use app::Board;
pub use config::BoardConfig;
pub use domain::{ItemId, ItemStatus, WorkItem};
pub use error::{BoardError, Result};
pub use store::ProjectStore;
pub use validation::{validate, Constraints, FieldValue};
pub use view::{Component, InputView, ItemView, ListView};
