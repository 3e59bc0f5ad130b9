//! Wire event model and JSON codec shared by clients and the relay.
//!
//! Every message on the websocket is one [`WireEvent`] serialized as a JSON
//! text frame of the form `{"event": <name>, "data": <payload>}`. The enum
//! is exhaustive on both ends, so an unknown event name fails decoding
//! instead of silently falling through.
//!
//! Delivery rules (enforced by the relay, documented here because the shape
//! and the rule travel together):
//!
//! | Event | Delivery |
//! |-------|----------|
//! | `snapshot` | unicast to the joining session only |
//! | `add` / `update` / `delete` | broadcast to all sessions except the sender |
//! | `cursor` | broadcast to all except sender, never stored |
//! | `clear` | broadcast to all sessions including the sender |
//! | `leave` | broadcast to remaining sessions on disconnect |

#[cfg(test)]
#[path = "wire_test.rs"]
mod wire_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::element::{Element, ElementId};
use crate::presence::Cursor;

/// Error returned by [`decode`] and [`encode`].
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The text frame is not valid JSON for any known event.
    #[error("invalid event json: {0}")]
    Json(#[from] serde_json::Error),
}

/// One message on the relay wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "lowercase")]
pub enum WireEvent {
    /// Full ordered state, sent to a newly joined session.
    Snapshot(Vec<Element>),
    /// A committed new element.
    Add(Element),
    /// Full-record replacement of an existing element, keyed by id.
    Update(Element),
    /// Removal of the element with this id.
    Delete(ElementId),
    /// Ephemeral pointer position of one session.
    Cursor(Cursor),
    /// Global reset of the room's element sequence.
    Clear,
    /// A session disconnected; peers drop its cursor entry.
    Leave(Uuid),
}

/// Serialize an event to a JSON text frame.
///
/// # Errors
///
/// Returns [`CodecError::Json`] if serialization fails (never in practice
/// for these shapes).
pub fn encode(event: &WireEvent) -> Result<String, CodecError> {
    Ok(serde_json::to_string(event)?)
}

/// Parse a JSON text frame into an event.
///
/// # Errors
///
/// Returns [`CodecError::Json`] for malformed frames or unknown event names.
pub fn decode(text: &str) -> Result<WireEvent, CodecError> {
    Ok(serde_json::from_str(text)?)
}
