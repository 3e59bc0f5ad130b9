//! Element data model: the unit of shared whiteboard state.
//!
//! An [`Element`] is a plain value that serializes to the wire shape both
//! the relay and every client agree on. The per-kind payload lives in
//! [`ElementKind`], an exhaustive tagged enum, so every consumption site
//! (geometry, serialization, rendering hosts) matches on kinds at compile
//! time instead of falling through on an unknown string tag.
//!
//! Image elements carry only a `src` reference. Decoded pixel data belongs
//! to an external cache owned by the rendering consumer and is never part
//! of the synchronized value.

#[cfg(test)]
#[path = "element_test.rs"]
mod element_test;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_STROKE_WIDTH, TABLE_CELL_HEIGHT, TABLE_CELL_WIDTH};

/// Unique identifier for an element. Caller-generated; clients use UUIDv4
/// strings so concurrent creation cannot collide on a coarse timestamp.
pub type ElementId = String;

/// A point in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Per-kind payload of an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ElementKind {
    /// Freehand pencil stroke: an ordered, non-empty point list.
    Pencil { points: Vec<Point> },
    /// Freehand highlighter stroke. Same payload as pencil, wider default stroke.
    Highlighter { points: Vec<Point> },
    /// Axis-aligned rectangle spanning origin and extent.
    Rectangle,
    /// Ellipse inscribed within the bounding box.
    Ellipse,
    /// Straight line segment from origin to origin + extent.
    Line,
    /// Free-floating text label.
    Text { text: String },
    /// Sticky note with a text body.
    Sticky { text: String },
    /// Image placeholder; `src` references externally cached pixel data.
    Image { src: String },
    /// Grid table. `cells` is row-major and always `rows` x `cols`.
    Table { rows: usize, cols: usize, cells: Vec<Vec<String>> },
}

impl ElementKind {
    /// The point list of a freehand stroke, if this is one.
    #[must_use]
    pub fn points(&self) -> Option<&[Point]> {
        match self {
            Self::Pencil { points } | Self::Highlighter { points } => Some(points),
            _ => None,
        }
    }

    /// Mutable access to the point list of a freehand stroke.
    pub fn points_mut(&mut self) -> Option<&mut Vec<Point>> {
        match self {
            Self::Pencil { points } | Self::Highlighter { points } => Some(points),
            _ => None,
        }
    }

    /// Whether this kind carries a freehand point list.
    #[must_use]
    pub fn is_freehand(&self) -> bool {
        matches!(self, Self::Pencil { .. } | Self::Highlighter { .. })
    }
}

/// A single drawable element as stored and synchronized.
///
/// `width`/`height` may be negative while a shape is dragged out; geometric
/// queries normalize before comparing. Freehand kinds carry their point list
/// in addition to the (advisory) extent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Immutable, globally unique within a room.
    pub id: ElementId,
    #[serde(flatten)]
    pub kind: ElementKind,
    /// Origin x in world coordinates.
    pub x: f64,
    /// Origin y in world coordinates.
    pub y: f64,
    /// Signed extent along x.
    pub width: f64,
    /// Signed extent along y.
    pub height: f64,
    /// Stroke (or note) color as a CSS color string.
    pub color: String,
    /// Stroke width in world units.
    pub stroke_width: f64,
    /// Display name of the last editor. Advisory only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_edited_by: Option<String>,
}

impl Element {
    /// Create an element of the given kind with zero extent at `origin`.
    #[must_use]
    pub fn new(id: impl Into<ElementId>, kind: ElementKind, origin: Point) -> Self {
        Self {
            id: id.into(),
            kind,
            x: origin.x,
            y: origin.y,
            width: 0.0,
            height: 0.0,
            color: "#000000".into(),
            stroke_width: DEFAULT_STROKE_WIDTH,
            last_edited_by: None,
        }
    }

    /// Create a grid table with an empty `rows` x `cols` cell matrix.
    ///
    /// This is the only way tables are built, which keeps the cell matrix
    /// dimensions in lockstep with the declared row/column counts.
    #[must_use]
    pub fn table(id: impl Into<ElementId>, origin: Point, rows: usize, cols: usize) -> Self {
        let cells = vec![vec![String::new(); cols]; rows];
        let mut element = Self::new(id, ElementKind::Table { rows, cols, cells }, origin);
        #[allow(clippy::cast_precision_loss)]
        {
            element.width = TABLE_CELL_WIDTH * cols as f64;
            element.height = TABLE_CELL_HEIGHT * rows as f64;
        }
        element
    }

    /// Builder-style color assignment.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Builder-style extent assignment.
    #[must_use]
    pub fn with_extent(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}
