//! The client engine: pointer gestures in, mutation actions out.
//!
//! DESIGN
//! ======
//! `EngineCore` owns the local mirror of shared state, the camera, the peer
//! map, and the gesture state machine. Pointer handlers mutate the mirror
//! optimistically and return an [`Action`] when a gesture commits; the host
//! forwards actions to the relay (fire-and-forget, no acknowledgment) and
//! feeds relay broadcasts back through the `apply_*` methods. The engine
//! never owns a socket, which is what makes it testable against a fake
//! relay.
//!
//! Intermediate gesture state (a half-dragged move, an in-progress stroke)
//! lives only in the local mirror; peers see nothing until pointer-up.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use uuid::Uuid;

use crate::camera::Camera;
use crate::consts::{CURSOR_PALETTE, HIGHLIGHTER_STROKE_WIDTH, STICKY_EXTENT, TEXT_HEIGHT, TEXT_MIN_WIDTH};
use crate::element::{Element, ElementId, ElementKind, Point};
use crate::geometry::{self, Bounds, Handle};
use crate::input::{Button, InputState, Tool, UiState};
use crate::presence::{Cursor, PeerMap};
use crate::store::ElementStore;

/// A committed mutation for the host to ship to the relay.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A new element finished its creating gesture.
    Add(Element),
    /// An existing element finished a move/resize/edit gesture.
    Update(Element),
    /// An element was deleted locally.
    Delete(ElementId),
    /// The local user reset the whole board.
    Clear,
}

/// Client-local engine state.
pub struct EngineCore {
    /// Local mirror of the room's element sequence.
    pub doc: ElementStore,
    pub camera: Camera,
    pub ui: UiState,
    pub input: InputState,
    /// Last-known cursors of the other sessions.
    pub peers: PeerMap,
    /// Local display name, stamped onto edited elements and cursors.
    pub name: String,
    /// Local cursor color, carried on outgoing cursor samples.
    pub cursor_color: String,
    pub viewport_width: f64,
    pub viewport_height: f64,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self {
            doc: ElementStore::new(),
            camera: Camera::default(),
            ui: UiState::default(),
            input: InputState::default(),
            peers: PeerMap::new(),
            name: String::new(),
            cursor_color: CURSOR_PALETTE[0].into(),
            viewport_width: 0.0,
            viewport_height: 0.0,
        }
    }
}

fn new_element_id() -> ElementId {
    Uuid::new_v4().to_string()
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Host configuration ---

    /// Update viewport dimensions (screen pixels).
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport_width = width;
        self.viewport_height = height;
    }

    /// Set the active tool.
    pub fn set_tool(&mut self, tool: Tool) {
        self.ui.tool = tool;
    }

    /// Set the stroke style applied to newly drawn elements.
    pub fn set_style(&mut self, color: impl Into<String>, stroke_width: f64) {
        self.ui.color = color.into();
        self.ui.stroke_width = stroke_width;
    }

    /// Set the local identity used for `last_edited_by` and cursor samples.
    pub fn set_identity(&mut self, name: impl Into<String>, cursor_color: impl Into<String>) {
        self.name = name.into();
        self.cursor_color = cursor_color.into();
    }

    // --- Remote reconciliation ---

    /// Hydrate the mirror from a relay snapshot.
    pub fn load_snapshot(&mut self, elements: Vec<Element>) {
        self.doc.load_snapshot(elements);
        self.ui.selected_id = None;
    }

    /// Apply a relay broadcast: element added.
    pub fn apply_add(&mut self, element: Element) {
        self.doc.add(element);
    }

    /// Apply a relay broadcast: element replaced.
    pub fn apply_update(&mut self, element: Element) {
        self.doc.update(element);
    }

    /// Apply a relay broadcast: element deleted.
    pub fn apply_delete(&mut self, id: &str) {
        self.doc.delete(id);
        if self.ui.selected_id.as_deref() == Some(id) {
            self.ui.selected_id = None;
        }
    }

    /// Apply a relay broadcast: board cleared. Also sent back to the
    /// initiator, so this must be idempotent with a local [`Self::clear`].
    pub fn apply_clear(&mut self) {
        self.doc.clear();
        self.ui.selected_id = None;
    }

    /// Apply a relay broadcast: peer cursor moved.
    pub fn apply_cursor(&mut self, cursor: Cursor) {
        self.peers.apply(cursor);
    }

    /// Apply a relay broadcast: peer session left.
    pub fn remove_peer(&mut self, session_id: &Uuid) {
        self.peers.remove(session_id);
    }

    // --- Presence ---

    /// Build an outgoing cursor sample for the current pointer position.
    /// The relay stamps the real session id on forward.
    #[must_use]
    pub fn local_cursor(&self, screen: Point) -> Cursor {
        let world = self.camera.screen_to_world(screen);
        Cursor {
            session_id: Uuid::nil(),
            x: world.x,
            y: world.y,
            color: self.cursor_color.clone(),
            name: self.name.clone(),
        }
    }

    // --- Pointer gestures ---

    /// Pointer-down: dispatch into a gesture state.
    ///
    /// A select-tool press that matches neither a resize handle nor an
    /// element body silently starts a marquee; there is no error state.
    pub fn on_pointer_down(&mut self, screen: Point, button: Button) -> Option<Action> {
        let world = self.camera.screen_to_world(screen);

        if self.ui.tool == Tool::Hand || button == Button::Middle {
            self.input = InputState::Panning { last_screen: screen };
            return None;
        }
        if self.ui.tool == Tool::Eraser {
            // Erase acts on pointer-move, not on the press itself.
            self.input = InputState::Erasing;
            return None;
        }
        if self.ui.tool == Tool::Select {
            self.start_select_gesture(world);
            return None;
        }
        if self.ui.tool.is_drawing() {
            let element = self.begin_drawing(world);
            self.input = InputState::Drawing { element, origin: world };
        }
        None
    }

    /// Pointer-move: evolve the active gesture.
    ///
    /// Only erasing produces actions mid-gesture; everything else stays in
    /// the local mirror until pointer-up.
    pub fn on_pointer_move(&mut self, screen: Point) -> Option<Action> {
        let world = self.camera.screen_to_world(screen);

        match std::mem::take(&mut self.input) {
            InputState::Idle => None,
            InputState::Panning { last_screen } => {
                self.camera.pan_by(screen.x - last_screen.x, screen.y - last_screen.y);
                self.input = InputState::Panning { last_screen: screen };
                None
            }
            InputState::Selecting { start, .. } => {
                self.input = InputState::Selecting { start, current: world };
                None
            }
            InputState::Drawing { mut element, origin } => {
                if let Some(points) = element.kind.points_mut() {
                    points.push(world);
                } else if matches!(element.kind, ElementKind::Rectangle | ElementKind::Ellipse | ElementKind::Line) {
                    element.width = world.x - origin.x;
                    element.height = world.y - origin.y;
                }
                self.input = InputState::Drawing { element, origin };
                None
            }
            InputState::Moving { snapshot, start } => {
                let dx = world.x - start.x;
                let dy = world.y - start.y;
                let mut updated = snapshot.clone();
                updated.x = snapshot.x + dx;
                updated.y = snapshot.y + dy;
                if let (Some(points), Some(orig)) = (updated.kind.points_mut(), snapshot.kind.points()) {
                    for (p, o) in points.iter_mut().zip(orig) {
                        p.x = o.x + dx;
                        p.y = o.y + dy;
                    }
                }
                self.stamp_editor(&mut updated);
                self.doc.update(updated);
                self.input = InputState::Moving { snapshot, start };
                None
            }
            InputState::Resizing { snapshot, orig_bounds, handle } => {
                let new_bounds = resized_bounds(orig_bounds, handle, world);
                let mut updated = snapshot.clone();
                updated.x = new_bounds.x;
                updated.y = new_bounds.y;
                updated.width = new_bounds.width;
                updated.height = new_bounds.height;
                if let (Some(points), Some(orig)) = (updated.kind.points_mut(), snapshot.kind.points()) {
                    *points = geometry::rescale_points(orig, orig_bounds, new_bounds);
                }
                self.stamp_editor(&mut updated);
                self.doc.update(updated);
                self.input = InputState::Resizing { snapshot, orig_bounds, handle };
                None
            }
            InputState::Erasing => {
                self.input = InputState::Erasing;
                let hit = self
                    .doc
                    .iter_topmost_first()
                    .find(|e| geometry::hit_test(world, e))
                    .map(|e| e.id.clone());
                let id = hit?;
                self.doc.delete(&id);
                if self.ui.selected_id.as_ref() == Some(&id) {
                    self.ui.selected_id = None;
                }
                Some(Action::Delete(id))
            }
        }
    }

    /// Pointer-up: resolve the gesture to its terminal action and return to
    /// idle.
    pub fn on_pointer_up(&mut self, screen: Point) -> Option<Action> {
        let world = self.camera.screen_to_world(screen);

        match std::mem::take(&mut self.input) {
            InputState::Idle | InputState::Panning { .. } | InputState::Erasing => None,
            InputState::Selecting { start, .. } => {
                let region = Bounds::new(start.x, start.y, world.x - start.x, world.y - start.y);
                self.ui.selected_id = self
                    .doc
                    .iter()
                    .find(|e| geometry::box_intersects(region, e))
                    .map(|e| e.id.clone());
                None
            }
            InputState::Moving { snapshot, .. } | InputState::Resizing { snapshot, .. } => {
                // The mirror already holds the final intermediate state.
                self.doc.get(&snapshot.id).cloned().map(Action::Update)
            }
            InputState::Drawing { element, .. } => {
                // Policy: a stroke that somehow ends with no points is
                // discarded; shapes commit even with zero extent.
                if element.kind.is_freehand() && element.kind.points().is_none_or(|p| p.is_empty()) {
                    return None;
                }
                self.doc.add(element.clone());
                Some(Action::Add(element))
            }
        }
    }

    // --- Direct insertion (chrome-driven creation) ---

    /// Insert a sticky note at the view center.
    pub fn insert_sticky(&mut self, note_color: impl Into<String>) -> Action {
        let center = self.view_center_world();
        let mut element = Element::new(
            new_element_id(),
            ElementKind::Sticky { text: String::new() },
            center,
        )
        .with_color(note_color)
        .with_extent(STICKY_EXTENT, STICKY_EXTENT);
        self.stamp_editor(&mut element);
        self.commit_add(element)
    }

    /// Insert a `rows` x `cols` grid table centered on the view.
    pub fn insert_table(&mut self, rows: usize, cols: usize) -> Action {
        let center = self.view_center_world();
        let mut element = Element::table(new_element_id(), center, rows, cols);
        element.x = center.x - element.width / 2.0;
        element.y = center.y - element.height / 2.0;
        self.stamp_editor(&mut element);
        self.commit_add(element)
    }

    /// Insert an image reference at the view center.
    pub fn insert_image(&mut self, src: impl Into<String>, width: f64, height: f64) -> Action {
        let center = self.view_center_world();
        let origin = Point::new(center.x - width / 2.0, center.y - height / 2.0);
        let mut element = Element::new(new_element_id(), ElementKind::Image { src: src.into() }, origin)
            .with_extent(width, height);
        self.stamp_editor(&mut element);
        self.commit_add(element)
    }

    /// Insert a text label at a screen position.
    pub fn insert_text(&mut self, screen: Point, text: impl Into<String>) -> Action {
        let origin = self.camera.screen_to_world(screen);
        let mut element = Element::new(new_element_id(), ElementKind::Text { text: text.into() }, origin)
            .with_color(self.ui.color.clone())
            .with_extent(TEXT_MIN_WIDTH, TEXT_HEIGHT);
        self.stamp_editor(&mut element);
        self.commit_add(element)
    }

    // --- Edits outside pointer gestures ---

    /// Replace the text body of a text or sticky element.
    pub fn set_element_text(&mut self, id: &str, text: impl Into<String>) -> Option<Action> {
        let mut element = self.doc.get(id)?.clone();
        match &mut element.kind {
            ElementKind::Text { text: body } | ElementKind::Sticky { text: body } => *body = text.into(),
            _ => return None,
        }
        self.stamp_editor(&mut element);
        self.doc.update(element.clone());
        Some(Action::Update(element))
    }

    /// Replace one cell of a grid table. Out-of-range coordinates are a
    /// no-op, as is a cell matrix smaller than its declared dimensions (a
    /// malformed table can arrive off the wire, bypassing [`Element::table`]).
    pub fn set_table_cell(&mut self, id: &str, row: usize, col: usize, value: impl Into<String>) -> Option<Action> {
        let mut element = self.doc.get(id)?.clone();
        let ElementKind::Table { cells, .. } = &mut element.kind else {
            return None;
        };
        let cell = cells.get_mut(row).and_then(|cells_row| cells_row.get_mut(col))?;
        *cell = value.into();
        self.stamp_editor(&mut element);
        self.doc.update(element.clone());
        Some(Action::Update(element))
    }

    /// Delete the currently selected element.
    pub fn delete_selection(&mut self) -> Option<Action> {
        let id = self.ui.selected_id.take()?;
        if self.doc.delete(&id) {
            Some(Action::Delete(id))
        } else {
            None
        }
    }

    /// Reset the board locally. The relay echoes `clear` back to everyone,
    /// including this session; `apply_clear` is idempotent for that reason.
    pub fn clear(&mut self) -> Action {
        self.doc.clear();
        self.ui.selected_id = None;
        Action::Clear
    }

    // --- Queries ---

    /// The currently selected element, if any.
    #[must_use]
    pub fn selection(&self) -> Option<&Element> {
        self.ui.selected_id.as_deref().and_then(|id| self.doc.get(id))
    }

    /// Look up an element by id.
    #[must_use]
    pub fn element(&self, id: &str) -> Option<&Element> {
        self.doc.get(id)
    }

    // --- Internals ---

    fn view_center_world(&self) -> Point {
        self.camera
            .screen_to_world(Point::new(self.viewport_width / 2.0, self.viewport_height / 2.0))
    }

    fn stamp_editor(&self, element: &mut Element) {
        if !self.name.is_empty() {
            element.last_edited_by = Some(self.name.clone());
        }
    }

    fn commit_add(&mut self, element: Element) -> Action {
        self.doc.add(element.clone());
        Action::Add(element)
    }

    /// Select-tool pointer-down: handle, body, or marquee, in that order.
    fn start_select_gesture(&mut self, world: Point) {
        if let Some(selected) = self.selection().cloned() {
            if let Some(handle) = geometry::resize_handle_at(world, &selected) {
                let orig_bounds = geometry::bounding_box(&selected);
                self.input = InputState::Resizing { snapshot: selected, orig_bounds, handle };
                return;
            }
        }

        let hit = self
            .doc
            .iter_topmost_first()
            .find(|e| geometry::hit_test(world, e))
            .cloned();
        if let Some(found) = hit {
            self.ui.selected_id = Some(found.id.clone());
            self.input = InputState::Moving { snapshot: found, start: world };
        } else {
            self.ui.selected_id = None;
            self.input = InputState::Selecting { start: world, current: world };
        }
    }

    /// Build the provisional element for a drawing-tool pointer-down.
    fn begin_drawing(&mut self, world: Point) -> Element {
        let kind = match self.ui.tool {
            Tool::Pencil => ElementKind::Pencil { points: vec![world] },
            Tool::Highlighter => ElementKind::Highlighter { points: vec![world] },
            Tool::Rectangle => ElementKind::Rectangle,
            Tool::Ellipse => ElementKind::Ellipse,
            Tool::Line => ElementKind::Line,
            // `is_drawing` gates the remaining tools out before this point.
            _ => ElementKind::Text { text: String::new() },
        };
        let mut element = Element::new(new_element_id(), kind, world).with_color(self.ui.color.clone());
        element.stroke_width = if self.ui.tool == Tool::Highlighter {
            HIGHLIGHTER_STROKE_WIDTH
        } else {
            self.ui.stroke_width
        };
        if self.ui.tool == Tool::Text {
            element.width = TEXT_MIN_WIDTH;
            element.height = TEXT_HEIGHT;
        }
        self.stamp_editor(&mut element);
        element
    }
}

/// New bounding box for a resize drag: the dragged corner follows the
/// pointer while the opposite corner stays fixed. Extent goes negative when
/// the pointer crosses the fixed edge; queries normalize later.
fn resized_bounds(orig: Bounds, handle: Handle, pointer: Point) -> Bounds {
    let o = orig.normalized();
    let (x, width) = match handle {
        Handle::TopLeft | Handle::BottomLeft => (pointer.x, o.x + o.width - pointer.x),
        Handle::TopRight | Handle::BottomRight => (o.x, pointer.x - o.x),
    };
    let (y, height) = match handle {
        Handle::TopLeft | Handle::TopRight => (pointer.y, o.y + o.height - pointer.y),
        Handle::BottomLeft | Handle::BottomRight => (o.y, pointer.y - o.y),
    };
    Bounds::new(x, y, width, height)
}
