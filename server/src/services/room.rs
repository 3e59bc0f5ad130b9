//! Room membership and fan-out.
//!
//! DESIGN
//! ======
//! A room is named by an arbitrary string from the connection query; sessions
//! that name no room share [`DEFAULT_ROOM`]. Room state is created lazily on
//! first join and evicted when the last session parts. Nothing survives
//! eviction: a later join starts from an empty board.

use board::element::Element;
use board::wire::WireEvent;
use tokio::sync::mpsc;
use tracing::info;
use uuid::Uuid;

use crate::state::{AppState, RoomState};

/// Room used when the connection query names none.
pub const DEFAULT_ROOM: &str = "lobby";

/// Join a room, creating it if needed. Registers the session's outgoing
/// channel and returns the ordered element snapshot for the welcome frame.
pub async fn join_room(
    state: &AppState,
    room: &str,
    session_id: Uuid,
    tx: mpsc::Sender<WireEvent>,
) -> Vec<Element> {
    let mut rooms = state.rooms.write().await;
    let room_state = rooms.entry(room.to_owned()).or_insert_with(RoomState::new);
    room_state.clients.insert(session_id, tx);
    let snapshot = room_state.elements.snapshot();

    info!(room, %session_id, sessions = room_state.clients.len(), "session joined room");
    snapshot
}

/// Leave a room. Removes the session sender; the last session out evicts the
/// room state from memory.
pub async fn part_room(state: &AppState, room: &str, session_id: Uuid) {
    let mut rooms = state.rooms.write().await;
    let Some(room_state) = rooms.get_mut(room) else {
        return;
    };

    room_state.clients.remove(&session_id);
    info!(room, %session_id, remaining = room_state.clients.len(), "session left room");

    if room_state.clients.is_empty() {
        rooms.remove(room);
        info!(room, "evicted room from memory");
    }
}

/// Queue an event to every session in a room, optionally excluding one.
///
/// Sync on purpose: the websocket dispatch layer calls this inside the same
/// write-lock critical section that mutated the store, so no other mutation
/// can slip between application and fan-out.
pub fn fan_out(room_state: &RoomState, event: &WireEvent, exclude: Option<Uuid>) {
    for (session_id, tx) in &room_state.clients {
        if exclude == Some(*session_id) {
            continue;
        }
        // Best-effort: if a session's channel is full, skip it.
        let _ = tx.try_send(event.clone());
    }
}

/// Broadcast an event to all sessions in a room, optionally excluding one.
/// For events that do not touch the store (`leave`).
pub async fn broadcast(state: &AppState, room: &str, event: &WireEvent, exclude: Option<Uuid>) {
    let rooms = state.rooms.read().await;
    let Some(room_state) = rooms.get(room) else {
        return;
    };
    fan_out(room_state, event, exclude);
}
