//! Input model: tools, mouse buttons, and the gesture state machine.
//!
//! `Tool` captures the user's intent at pointer-down time. `InputState` is
//! the active gesture tracked between pointer-down and pointer-up; each
//! variant carries exactly the context its pointer-move and pointer-up
//! handling needs. Exactly one state is active at a time and every gesture
//! resolves back to `Idle`.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::element::{Element, ElementId, Point};
use crate::geometry::{Bounds, Handle};

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Pointer / selection tool (default).
    #[default]
    Select,
    /// Pan the view by dragging.
    Hand,
    /// Delete elements under the pointer while dragging.
    Eraser,
    /// Freehand pencil stroke.
    Pencil,
    /// Freehand highlighter stroke.
    Highlighter,
    /// Drag out a rectangle.
    Rectangle,
    /// Drag out an ellipse.
    Ellipse,
    /// Drag out a straight line.
    Line,
    /// Place a text label.
    Text,
}

impl Tool {
    /// Whether this tool draws a freehand point list.
    #[must_use]
    pub fn is_freehand(self) -> bool {
        matches!(self, Self::Pencil | Self::Highlighter)
    }

    /// Whether this tool drags out a shape from an anchor corner.
    #[must_use]
    pub fn is_shape(self) -> bool {
        matches!(self, Self::Rectangle | Self::Ellipse | Self::Line)
    }

    /// Whether pointer-down with this tool starts a drawing gesture.
    #[must_use]
    pub fn is_drawing(self) -> bool {
        self.is_freehand() || self.is_shape() || self == Self::Text
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button; always pans regardless of tool.
    Middle,
    /// Right mouse button.
    Secondary,
}

/// Persistent UI state visible to the host and renderer.
#[derive(Debug, Clone)]
pub struct UiState {
    /// Currently active tool.
    pub tool: Tool,
    /// The id of the currently selected element, if any.
    pub selected_id: Option<ElementId>,
    /// Stroke color applied to newly drawn elements.
    pub color: String,
    /// Stroke width applied to newly drawn pencil strokes and shapes.
    pub stroke_width: f64,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            tool: Tool::default(),
            selected_id: None,
            color: "#000000".into(),
            stroke_width: crate::consts::DEFAULT_STROKE_WIDTH,
        }
    }
}

/// The active gesture between pointer-down and pointer-up.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Dragging the view; camera-only, nothing is broadcast.
    Panning {
        /// Screen-space position of the previous pointer event.
        last_screen: Point,
    },
    /// Dragging out a marquee rectangle to select by intersection.
    Selecting {
        /// World-space corner where the drag started.
        start: Point,
        /// World-space corner under the pointer now.
        current: Point,
    },
    /// Building a new element; committed as an add on pointer-up.
    Drawing {
        /// The in-progress element, not yet in the local mirror.
        element: Element,
        /// World-space anchor where the drag started.
        origin: Point,
    },
    /// Translating an existing element.
    Moving {
        /// Full copy of the element at gesture start.
        snapshot: Element,
        /// World-space pointer position at gesture start.
        start: Point,
    },
    /// Resizing an existing element by a corner handle.
    Resizing {
        /// Full copy of the element at gesture start.
        snapshot: Element,
        /// Normalized bounding box of the snapshot; the resize anchor frame.
        orig_bounds: Bounds,
        /// Which corner is being dragged.
        handle: Handle,
    },
    /// Deleting whatever the pointer touches while dragging.
    Erasing,
}
