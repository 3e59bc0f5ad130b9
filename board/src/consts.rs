//! Shared numeric constants for the board crate.

// ── Hit-testing ─────────────────────────────────────────────────

/// World-space slop in pixels when hit-testing lines and freehand strokes.
pub const HIT_TOLERANCE: f64 = 10.0;

/// Distance from a bounding-box corner within which a resize handle grabs.
pub const HANDLE_THRESHOLD: f64 = 10.0;

// ── Default element sizes ───────────────────────────────────────

/// Default stroke width for pencil strokes and shape outlines.
pub const DEFAULT_STROKE_WIDTH: f64 = 3.0;

/// Fixed stroke width for highlighter strokes.
pub const HIGHLIGHTER_STROKE_WIDTH: f64 = 15.0;

/// Side length of a freshly inserted sticky note.
pub const STICKY_EXTENT: f64 = 200.0;

/// Width of one grid-table column at insertion time.
pub const TABLE_CELL_WIDTH: f64 = 100.0;

/// Height of one grid-table row at insertion time.
pub const TABLE_CELL_HEIGHT: f64 = 40.0;

/// Line height of a text element.
pub const TEXT_HEIGHT: f64 = 30.0;

/// Initial width of a text element before the host measures the glyphs.
pub const TEXT_MIN_WIDTH: f64 = 150.0;

// ── Presence ────────────────────────────────────────────────────

/// Cursor colors for peer sessions. The first entry is the engine's default
/// until the host assigns one via `set_identity`.
pub const CURSOR_PALETTE: [&str; 10] = [
    "#ef4444", "#f97316", "#f59e0b", "#84cc16", "#10b981", "#06b6d4", "#3b82f6", "#8b5cf6", "#d946ef", "#f43f5e",
];
