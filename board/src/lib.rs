//! Client-side engine and shared data model for the collaborative whiteboard.
//!
//! This crate owns everything a whiteboard client computes locally: the
//! element data model, geometric queries (hit-testing, resize handles,
//! marquee intersection), the pointer gesture state machine, the local
//! mirror of shared state, and the peer/presence map. It also owns the wire
//! event model shared with the relay server, so both sides agree on one
//! serialized shape.
//!
//! The crate is deliberately free of networking and rendering. The host
//! wires pointer events into [`engine::EngineCore`], ships the returned
//! [`engine::Action`]s to the relay, and feeds relay broadcasts back in
//! through the `apply_*` methods.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`element`] | Element data model and per-kind payloads |
//! | [`store`] | Ordered, id-unique element sequence (relay authority and client mirror) |
//! | [`geometry`] | Pure geometric queries over elements |
//! | [`camera`] | Pan/zoom view transform |
//! | [`input`] | Tools, buttons, and the gesture state machine states |
//! | [`engine`] | Pointer event handling and remote reconciliation |
//! | [`presence`] | Ephemeral peer cursors |
//! | [`wire`] | Wire event model and JSON codec |
//! | [`consts`] | Shared numeric constants (tolerances, default sizes) |

pub mod camera;
pub mod consts;
pub mod element;
pub mod engine;
pub mod geometry;
pub mod input;
pub mod presence;
pub mod store;
pub mod wire;
