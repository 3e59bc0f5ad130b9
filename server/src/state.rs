//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds a map of live rooms, each with its own authoritative element store
//! and connected sessions. Rooms exist only while a session is connected;
//! there is no persistence, so an empty room is simply evicted.

use std::collections::HashMap;
use std::sync::Arc;

use board::store::ElementStore;
use board::wire::WireEvent;
use tokio::sync::{RwLock, mpsc};
use uuid::Uuid;

// =============================================================================
// ROOM STATE
// =============================================================================

/// Per-room live state. Kept in memory for real-time performance.
pub struct RoomState {
    /// Authoritative ordered element sequence for this room.
    pub elements: ElementStore,
    /// Connected sessions: `session_id` -> sender for outgoing events.
    pub clients: HashMap<Uuid, mpsc::Sender<WireEvent>>,
}

impl RoomState {
    #[must_use]
    pub fn new() -> Self {
        Self { elements: ElementStore::new(), clients: HashMap::new() }
    }
}

impl Default for RoomState {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// APP STATE
// =============================================================================

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; the room map is Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub rooms: Arc<RwLock<HashMap<String, RoomState>>>,
}

impl AppState {
    #[must_use]
    pub fn new() -> Self {
        Self { rooms: Arc::new(RwLock::new(HashMap::new())) }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
