//! WebSocket handler — the broadcast relay.
//!
//! DESIGN
//! ======
//! On upgrade, generates a session ID, joins the requested room, and enters
//! a `select!` loop:
//! - Incoming client events → decode + dispatch by event variant
//! - Broadcast events from room peers → forward to client
//!
//! Event processing is pure business logic — it validates, mutates the room
//! store, and returns an [`Outcome`]. The dispatch layer owns all outbound
//! fan-out, so tests can exercise the relay with fake sessions and no socket.
//!
//! ORDERING
//! ========
//! Store mutation and fan-out happen inside one room write-lock critical
//! section. The lock is the room's single serialization point: if it were
//! released between applying and forwarding, two racing mutations could be
//! applied in order A,B but forwarded B,A, stranding every mirror on A.
//!
//! LIFECYCLE
//! =========
//! 1. Upgrade → join room → unicast `snapshot` to the new session
//! 2. Client sends events → process → dispatch applies the outcome
//! 3. Close → broadcast `leave` → part room

use std::collections::HashMap;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::Response;
use board::wire::{self, WireEvent};
use tokio::sync::mpsc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::services;
use crate::state::{AppState, RoomState};

// =============================================================================
// OUTCOME
// =============================================================================

/// Result of processing one inbound event. The dispatch layer uses this to
/// decide who receives what — processing never sends frames directly.
enum Outcome {
    /// Forward to all room sessions EXCLUDING the sender, which already
    /// applied the mutation optimistically.
    Broadcast(WireEvent),
    /// Forward to all room sessions INCLUDING the sender. Used for `clear`,
    /// where the echo doubles as the sender's confirmation.
    BroadcastAll(WireEvent),
    /// Nothing to forward.
    Ignore,
}

// =============================================================================
// UPGRADE
// =============================================================================

pub async fn handle_ws(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
    ws: WebSocketUpgrade,
) -> Response {
    let room = params
        .get("room")
        .cloned()
        .unwrap_or_else(|| services::room::DEFAULT_ROOM.into());
    ws.on_upgrade(move |socket| run_ws(socket, state, room))
}

// =============================================================================
// CONNECTION
// =============================================================================

async fn run_ws(mut socket: WebSocket, state: AppState, room: String) {
    let session_id = Uuid::new_v4();

    // Per-connection channel for receiving broadcast events from peers.
    let (session_tx, mut session_rx) = mpsc::channel::<WireEvent>(256);

    let snapshot = services::room::join_room(&state, &room, session_id, session_tx).await;
    if send_event(&mut socket, &WireEvent::Snapshot(snapshot)).await.is_err() {
        services::room::part_room(&state, &room, session_id).await;
        return;
    }

    info!(%session_id, room, "ws: session connected");

    loop {
        tokio::select! {
            msg = socket.recv() => {
                let Some(msg) = msg else { break };
                let Ok(msg) = msg else { break };
                match msg {
                    Message::Text(text) => {
                        dispatch_event(&state, &room, session_id, &text).await;
                    }
                    Message::Close(_) => break,
                    _ => {}
                }
            }
            Some(event) = session_rx.recv() => {
                if send_event(&mut socket, &event).await.is_err() {
                    break;
                }
            }
        }
    }

    // Tell peers BEFORE cleanup: part_room may evict the room state.
    services::room::broadcast(&state, &room, &WireEvent::Leave(session_id), Some(session_id)).await;
    services::room::part_room(&state, &room, session_id).await;
    info!(%session_id, "ws: session disconnected");
}

// =============================================================================
// EVENT DISPATCH
// =============================================================================

/// Process one inbound text frame and apply its outcome to the room.
///
/// Mutation and fan-out share the critical section: the queues of every
/// session receive events in exactly the order the store applied them.
async fn dispatch_event(state: &AppState, room: &str, session_id: Uuid, text: &str) {
    let mut rooms = state.rooms.write().await;
    let Some(room_state) = rooms.get_mut(room) else {
        return;
    };

    match process_event(room_state, room, session_id, text) {
        Outcome::Broadcast(event) => {
            services::room::fan_out(room_state, &event, Some(session_id));
        }
        Outcome::BroadcastAll(event) => {
            services::room::fan_out(room_state, &event, None);
        }
        Outcome::Ignore => {}
    }
}

/// Decode and process one inbound event against the room's authoritative
/// store. A mutation that does not change the store is not forwarded; a
/// malformed frame is logged and dropped, never echoed.
fn process_event(room_state: &mut RoomState, room: &str, session_id: Uuid, text: &str) -> Outcome {
    let event = match wire::decode(text) {
        Ok(event) => event,
        Err(e) => {
            warn!(%session_id, error = %e, "ws: invalid inbound event");
            return Outcome::Ignore;
        }
    };

    match event {
        WireEvent::Add(element) => {
            if services::element::add(room_state, room, element.clone()) {
                Outcome::Broadcast(WireEvent::Add(element))
            } else {
                warn!(%session_id, id = %element.id, "ws: add collided, dropped");
                Outcome::Ignore
            }
        }
        WireEvent::Update(element) => {
            if services::element::update(room_state, element.clone()) {
                Outcome::Broadcast(WireEvent::Update(element))
            } else {
                Outcome::Ignore
            }
        }
        WireEvent::Delete(id) => {
            // Deletes race: two erasers hitting the same element should both
            // see it disappear, so the event is forwarded either way.
            services::element::delete(room_state, room, &id);
            Outcome::Broadcast(WireEvent::Delete(id))
        }
        WireEvent::Clear => {
            services::element::clear(room_state, room);
            Outcome::BroadcastAll(WireEvent::Clear)
        }
        WireEvent::Cursor(cursor) => {
            Outcome::Broadcast(WireEvent::Cursor(services::cursor::stamp(cursor, session_id)))
        }
        WireEvent::Snapshot(_) | WireEvent::Leave(_) => {
            warn!(%session_id, "ws: server-only event from client, dropped");
            Outcome::Ignore
        }
    }
}

// =============================================================================
// HELPERS
// =============================================================================

async fn send_event(socket: &mut WebSocket, event: &WireEvent) -> Result<(), ()> {
    let json = match wire::encode(event) {
        Ok(j) => j,
        Err(e) => {
            warn!(error = %e, "ws: failed to serialize event");
            return Err(());
        }
    };
    socket.send(Message::Text(json.into())).await.map_err(|_| ())
}

#[cfg(test)]
#[path = "ws_test.rs"]
mod tests;
