//! Drag payload protocol.
//!
//! A dragged work item travels as a single `text/plain` entry holding its
//! identity. Drop targets recognise an item drag by that MIME type being the
//! first one advertised; anything else is left to the platform default,
//! which refuses the drop.

use crate::{
    domain::ItemId,
    dom::{dispatch, DataTransfer, DomHandle, DropEffect, Event, EventKind, NodeId},
};

pub const PLAIN_TEXT: &str = "text/plain";

/// Implemented by views that can be picked up
pub trait Draggable {
    fn drag_start_handler(&self, event: &mut Event);
    fn drag_end_handler(&self, event: &mut Event);
}

/// Implemented by views that accept dropped items
pub trait DragTarget {
    fn drag_over_handler(&self, event: &mut Event);
    fn drop_handler(&self, event: &mut Event);
    fn drag_leave_handler(&self, event: &mut Event);
}

/// Writes the item identity into the payload and allows a move
pub fn encode_item(transfer: &mut DataTransfer, id: &ItemId) {
    transfer.set_data(PLAIN_TEXT, id.as_str());
    transfer.effect_allowed = DropEffect::Move;
}

/// Whether the payload advertises a dragged work item
pub fn carries_item(transfer: &DataTransfer) -> bool {
    transfer.types().first() == Some(&PLAIN_TEXT)
}

pub fn decode_item(transfer: &DataTransfer) -> Option<ItemId> {
    transfer.get_data(PLAIN_TEXT).map(ItemId::from)
}

/// Plays a full drag sequence from `source` onto `target`: drag start, drag
/// over, then drop only if a drag-over handler accepted it, then drag end.
///
/// Returns whether the drop happened.
pub fn drag_and_drop(dom: &DomHandle, source: NodeId, target: NodeId) -> bool {
    let mut start = Event::with_data_transfer(EventKind::DragStart, DataTransfer::new());
    dispatch(dom, source, &mut start);
    let transfer = start.data_transfer.unwrap_or_default();

    let mut over = Event::with_data_transfer(EventKind::DragOver, transfer.clone());
    dispatch(dom, target, &mut over);

    let dropped = over.default_prevented();
    if dropped {
        let mut drop = Event::with_data_transfer(EventKind::Drop, transfer.clone());
        dispatch(dom, target, &mut drop);
    } else {
        tracing::debug!("drop refused by target");
    }

    let mut end = Event::with_data_transfer(EventKind::DragEnd, transfer);
    dispatch(dom, source, &mut end);
    dropped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_then_detect() {
        let mut transfer = DataTransfer::new();
        assert!(!carries_item(&transfer));

        encode_item(&mut transfer, &ItemId::from("abc"));

        assert!(carries_item(&transfer));
        assert_eq!(transfer.effect_allowed, DropEffect::Move);
        assert_eq!(decode_item(&transfer), Some(ItemId::from("abc")));
    }

    #[test]
    fn test_foreign_payload_is_not_an_item() {
        let mut transfer = DataTransfer::new();
        transfer.set_data("text/uri-list", "https://example.com");
        transfer.set_data(PLAIN_TEXT, "https://example.com");

        assert!(!carries_item(&transfer));
        assert!(decode_item(&transfer).is_some());
    }

    #[test]
    fn test_missing_text_decodes_to_none() {
        let mut transfer = DataTransfer::new();
        transfer.set_data("text/html", "<p>hi</p>");
        assert_eq!(decode_item(&transfer), None);
    }
}
