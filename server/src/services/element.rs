//! Element mutations against a room's authoritative store.
//!
//! Each function mutates a room the caller already holds the write lock for
//! and reports whether the store changed. The websocket layer calls these
//! inside the same critical section it fans out from, so the forward order
//! peers observe always matches the order the store applied. The return
//! value decides whether the event is worth forwarding at all: an add that
//! lost an id collision or an update for a vanished element dies here.

use board::element::Element;
use tracing::info;

use crate::state::RoomState;

/// Record a new element. Returns `false` without touching the store when
/// the id is already taken.
pub fn add(room_state: &mut RoomState, room: &str, element: Element) -> bool {
    let id = element.id.clone();
    let added = room_state.elements.add(element);
    if added {
        info!(room, %id, "element added");
    }
    added
}

/// Replace an element wholesale, keyed by id. Returns `false` when no
/// element with that id exists.
pub fn update(room_state: &mut RoomState, element: Element) -> bool {
    room_state.elements.update(element)
}

/// Remove an element by id. Returns whether anything was removed.
pub fn delete(room_state: &mut RoomState, room: &str, id: &str) -> bool {
    let deleted = room_state.elements.delete(id);
    if deleted {
        info!(room, %id, "element deleted");
    }
    deleted
}

/// Empty the room's element sequence.
pub fn clear(room_state: &mut RoomState, room: &str) {
    let count = room_state.elements.len();
    room_state.elements.clear();
    info!(room, count, "room cleared");
}
