//! Ephemeral peer cursors.
//!
//! Presence never touches the element store: a cursor event is forwarded by
//! the relay and simply overwrites the previous entry for that session in
//! each recipient's peer map. Nothing is persisted and no history is kept;
//! a peer disappears when its session leaves.

#[cfg(test)]
#[path = "presence_test.rs"]
mod presence_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One pointer-position sample from a peer session.
///
/// `session_id` is stamped by the relay on forward; whatever a client puts
/// there outbound is overwritten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cursor {
    pub session_id: Uuid,
    pub x: f64,
    pub y: f64,
    /// Cursor color chosen by the peer.
    pub color: String,
    /// Peer display name.
    pub name: String,
}

/// Last-known cursor per peer session.
#[derive(Debug, Clone, Default)]
pub struct PeerMap {
    peers: HashMap<Uuid, Cursor>,
}

impl PeerMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a cursor sample, superseding any previous one for the session.
    pub fn apply(&mut self, cursor: Cursor) {
        self.peers.insert(cursor.session_id, cursor);
    }

    /// Drop a departed session, returning its last cursor if known.
    pub fn remove(&mut self, session_id: &Uuid) -> Option<Cursor> {
        self.peers.remove(session_id)
    }

    /// Last-known cursor for a session.
    #[must_use]
    pub fn get(&self, session_id: &Uuid) -> Option<&Cursor> {
        self.peers.get(session_id)
    }

    /// Iterate all known peer cursors in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Cursor> {
        self.peers.values()
    }

    /// Number of peers currently known.
    #[must_use]
    pub fn len(&self) -> usize {
        self.peers.len()
    }

    /// Returns `true` when no peers are known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }
}
