//! Domain services used by the websocket route.
//!
//! Service modules own room membership and store mutation so the websocket
//! handler can stay focused on protocol translation.

pub mod cursor;
pub mod element;
pub mod room;
