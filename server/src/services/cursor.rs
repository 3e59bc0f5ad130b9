//! Cursor forwarding.
//!
//! Cursor samples are ephemeral: they never touch the element store and are
//! not replayed to late joiners. The relay is the authority on identity, so
//! whatever session id a client wrote into its sample is replaced here.

use board::presence::Cursor;
use uuid::Uuid;

/// Stamp the authenticated session id onto an inbound cursor sample.
#[must_use]
pub fn stamp(mut cursor: Cursor, session_id: Uuid) -> Cursor {
    cursor.session_id = session_id;
    cursor
}
