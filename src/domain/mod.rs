pub mod item;

pub use item::{ItemId, ItemStatus, WorkItem};
