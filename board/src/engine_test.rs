use super::*;

fn rect(id: &str, x: f64, y: f64, w: f64, h: f64) -> Element {
    Element::new(id, ElementKind::Rectangle, Point::new(x, y)).with_extent(w, h)
}

fn engine_with(elements: Vec<Element>) -> EngineCore {
    let mut engine = EngineCore::new();
    engine.load_snapshot(elements);
    engine
}

// =============================================================
// Remote reconciliation
// =============================================================

#[test]
fn load_snapshot_hydrates_and_clears_selection() {
    let mut engine = EngineCore::new();
    engine.ui.selected_id = Some("stale".into());
    engine.load_snapshot(vec![rect("a", 0.0, 0.0, 10.0, 10.0)]);
    assert_eq!(engine.doc.len(), 1);
    assert!(engine.ui.selected_id.is_none());
}

#[test]
fn apply_delete_drops_a_matching_selection() {
    let mut engine = engine_with(vec![rect("a", 0.0, 0.0, 10.0, 10.0)]);
    engine.ui.selected_id = Some("a".into());
    engine.apply_delete("a");
    assert!(engine.doc.is_empty());
    assert!(engine.ui.selected_id.is_none());
}

#[test]
fn apply_clear_after_local_clear_is_idempotent() {
    let mut engine = engine_with(vec![rect("a", 0.0, 0.0, 10.0, 10.0)]);
    assert_eq!(engine.clear(), Action::Clear);
    engine.apply_clear();
    assert!(engine.doc.is_empty());
}

#[test]
fn peer_cursors_apply_and_leave() {
    let mut engine = EngineCore::new();
    let session = Uuid::new_v4();
    engine.apply_cursor(Cursor {
        session_id: session,
        x: 5.0,
        y: 5.0,
        color: "#123456".into(),
        name: "bo".into(),
    });
    assert_eq!(engine.peers.len(), 1);
    engine.remove_peer(&session);
    assert!(engine.peers.is_empty());
}

#[test]
fn local_cursor_is_world_space_and_unstamped() {
    let mut engine = EngineCore::new();
    engine.set_identity("ana", "#ff0000");
    engine.camera.pan_by(100.0, 0.0);
    let cursor = engine.local_cursor(Point::new(150.0, 20.0));
    assert_eq!(cursor.session_id, Uuid::nil());
    assert!((cursor.x - 50.0).abs() < f64::EPSILON);
    assert_eq!(cursor.name, "ana");
}

#[test]
fn default_cursor_color_comes_from_the_palette() {
    let engine = EngineCore::new();
    assert!(crate::consts::CURSOR_PALETTE.contains(&engine.cursor_color.as_str()));
}

// =============================================================
// Panning
// =============================================================

#[test]
fn hand_tool_pans_without_producing_actions() {
    let mut engine = EngineCore::new();
    engine.set_tool(Tool::Hand);
    assert!(engine.on_pointer_down(Point::new(0.0, 0.0), Button::Primary).is_none());
    assert!(engine.on_pointer_move(Point::new(30.0, 10.0)).is_none());
    assert!(engine.on_pointer_up(Point::new(30.0, 10.0)).is_none());
    assert!((engine.camera.pan_x - 30.0).abs() < f64::EPSILON);
    assert!((engine.camera.pan_y - 10.0).abs() < f64::EPSILON);
    assert!(matches!(engine.input, InputState::Idle));
}

#[test]
fn middle_button_pans_regardless_of_tool() {
    let mut engine = EngineCore::new();
    engine.set_tool(Tool::Pencil);
    engine.on_pointer_down(Point::new(0.0, 0.0), Button::Middle);
    assert!(matches!(engine.input, InputState::Panning { .. }));
    engine.on_pointer_move(Point::new(5.0, 5.0));
    engine.on_pointer_up(Point::new(5.0, 5.0));
    assert!(engine.doc.is_empty(), "middle-drag must not draw");
}

// =============================================================
// Drawing
// =============================================================

#[test]
fn pencil_drag_commits_a_stroke_with_all_samples() {
    let mut engine = EngineCore::new();
    engine.set_tool(Tool::Pencil);
    engine.on_pointer_down(Point::new(1.0, 1.0), Button::Primary);
    engine.on_pointer_move(Point::new(2.0, 2.0));
    engine.on_pointer_move(Point::new(3.0, 3.0));
    let action = engine.on_pointer_up(Point::new(3.0, 3.0)).unwrap();

    let Action::Add(element) = action else {
        panic!("expected add");
    };
    assert_eq!(
        element.kind.points().unwrap(),
        &[Point::new(1.0, 1.0), Point::new(2.0, 2.0), Point::new(3.0, 3.0)]
    );
    assert!(engine.doc.get(&element.id).is_some(), "mirror holds the commit");
}

#[test]
fn highlighter_uses_its_wide_stroke() {
    let mut engine = EngineCore::new();
    engine.set_tool(Tool::Highlighter);
    engine.on_pointer_down(Point::new(0.0, 0.0), Button::Primary);
    let Some(Action::Add(element)) = engine.on_pointer_up(Point::new(0.0, 0.0)) else {
        panic!("expected add");
    };
    assert!((element.stroke_width - crate::consts::HIGHLIGHTER_STROKE_WIDTH).abs() < f64::EPSILON);
}

#[test]
fn rectangle_drag_sets_extent_from_anchor() {
    let mut engine = EngineCore::new();
    engine.set_tool(Tool::Rectangle);
    engine.set_style("#00aa00", 5.0);
    engine.on_pointer_down(Point::new(10.0, 10.0), Button::Primary);
    engine.on_pointer_move(Point::new(60.0, 40.0));
    let Some(Action::Add(element)) = engine.on_pointer_up(Point::new(60.0, 40.0)) else {
        panic!("expected add");
    };
    assert!((element.x - 10.0).abs() < f64::EPSILON);
    assert!((element.width - 50.0).abs() < f64::EPSILON);
    assert!((element.height - 30.0).abs() < f64::EPSILON);
    assert_eq!(element.color, "#00aa00");
}

#[test]
fn dragging_up_left_leaves_extent_negative() {
    let mut engine = EngineCore::new();
    engine.set_tool(Tool::Ellipse);
    engine.on_pointer_down(Point::new(50.0, 50.0), Button::Primary);
    engine.on_pointer_move(Point::new(20.0, 10.0));
    let Some(Action::Add(element)) = engine.on_pointer_up(Point::new(20.0, 10.0)) else {
        panic!("expected add");
    };
    assert!((element.width + 30.0).abs() < f64::EPSILON);
    assert!((element.height + 40.0).abs() < f64::EPSILON);
}

#[test]
fn zero_extent_shape_still_commits() {
    let mut engine = EngineCore::new();
    engine.set_tool(Tool::Rectangle);
    engine.on_pointer_down(Point::new(5.0, 5.0), Button::Primary);
    let action = engine.on_pointer_up(Point::new(5.0, 5.0));
    assert!(matches!(action, Some(Action::Add(_))));
    assert_eq!(engine.doc.len(), 1);
}

#[test]
fn empty_freehand_stroke_is_discarded() {
    let mut engine = EngineCore::new();
    engine.input = InputState::Drawing {
        element: Element::new("s", ElementKind::Pencil { points: vec![] }, Point::new(0.0, 0.0)),
        origin: Point::new(0.0, 0.0),
    };
    assert!(engine.on_pointer_up(Point::new(0.0, 0.0)).is_none());
    assert!(engine.doc.is_empty());
    assert!(matches!(engine.input, InputState::Idle));
}

// =============================================================
// Selection and marquee
// =============================================================

#[test]
fn clicking_an_element_selects_the_topmost_hit() {
    let mut engine = engine_with(vec![
        rect("below", 0.0, 0.0, 100.0, 100.0),
        rect("above", 0.0, 0.0, 100.0, 100.0),
    ]);
    engine.on_pointer_down(Point::new(50.0, 50.0), Button::Primary);
    assert_eq!(engine.ui.selected_id.as_deref(), Some("above"));
    assert!(matches!(engine.input, InputState::Moving { .. }));
    engine.on_pointer_up(Point::new(50.0, 50.0));
}

#[test]
fn clicking_empty_space_deselects_and_starts_a_marquee() {
    let mut engine = engine_with(vec![rect("a", 0.0, 0.0, 10.0, 10.0)]);
    engine.ui.selected_id = Some("a".into());
    engine.on_pointer_down(Point::new(500.0, 500.0), Button::Primary);
    assert!(engine.ui.selected_id.is_none());
    assert!(matches!(engine.input, InputState::Selecting { .. }));
}

#[test]
fn marquee_selects_the_first_element_whose_center_is_inside() {
    let mut engine = engine_with(vec![
        rect("a", 10.0, 10.0, 20.0, 20.0),  // center (20, 20)
        rect("b", 40.0, 10.0, 20.0, 20.0),  // center (50, 20)
    ]);
    engine.on_pointer_down(Point::new(0.0, 0.0), Button::Primary);
    engine.on_pointer_move(Point::new(60.0, 60.0));
    assert!(engine.on_pointer_up(Point::new(60.0, 60.0)).is_none());
    assert_eq!(engine.ui.selected_id.as_deref(), Some("a"));
}

#[test]
fn marquee_over_nothing_clears_selection() {
    let mut engine = engine_with(vec![rect("a", 100.0, 100.0, 20.0, 20.0)]);
    engine.on_pointer_down(Point::new(0.0, 0.0), Button::Primary);
    engine.on_pointer_move(Point::new(10.0, 10.0));
    engine.on_pointer_up(Point::new(10.0, 10.0));
    assert!(engine.ui.selected_id.is_none());
}

// =============================================================
// Moving
// =============================================================

#[test]
fn move_updates_the_mirror_live_and_commits_once_on_release() {
    let mut engine = engine_with(vec![rect("a", 10.0, 10.0, 20.0, 20.0)]);
    engine.on_pointer_down(Point::new(15.0, 15.0), Button::Primary);
    assert!(engine.on_pointer_move(Point::new(25.0, 20.0)).is_none(), "no mid-drag broadcast");

    let live = engine.element("a").unwrap();
    assert!((live.x - 20.0).abs() < f64::EPSILON);
    assert!((live.y - 15.0).abs() < f64::EPSILON);

    let Some(Action::Update(committed)) = engine.on_pointer_up(Point::new(25.0, 20.0)) else {
        panic!("expected update");
    };
    assert!((committed.x - 20.0).abs() < f64::EPSILON);
    assert!((committed.y - 15.0).abs() < f64::EPSILON);
}

#[test]
fn move_translates_deltas_from_the_gesture_start_not_cumulatively() {
    let mut engine = engine_with(vec![rect("a", 0.0, 0.0, 10.0, 10.0)]);
    engine.on_pointer_down(Point::new(5.0, 5.0), Button::Primary);
    engine.on_pointer_move(Point::new(105.0, 5.0));
    engine.on_pointer_move(Point::new(15.0, 5.0));
    let Some(Action::Update(committed)) = engine.on_pointer_up(Point::new(15.0, 5.0)) else {
        panic!("expected update");
    };
    assert!((committed.x - 10.0).abs() < f64::EPSILON, "delta is start-relative");
}

#[test]
fn moving_a_stroke_translates_every_point() {
    let stroke = Element::new(
        "s",
        ElementKind::Pencil { points: vec![Point::new(0.0, 0.0), Point::new(10.0, 10.0)] },
        Point::new(0.0, 0.0),
    );
    let mut engine = engine_with(vec![stroke]);
    engine.on_pointer_down(Point::new(5.0, 5.0), Button::Primary);
    engine.on_pointer_move(Point::new(8.0, 9.0));
    let Some(Action::Update(committed)) = engine.on_pointer_up(Point::new(8.0, 9.0)) else {
        panic!("expected update");
    };
    assert_eq!(
        committed.kind.points().unwrap(),
        &[Point::new(3.0, 4.0), Point::new(13.0, 14.0)]
    );
}

// =============================================================
// Resizing
// =============================================================

#[test]
fn resize_via_bottom_right_handle_converges_across_sessions() {
    // Session A creates the rectangle.
    let mut a = EngineCore::new();
    a.set_tool(Tool::Rectangle);
    a.on_pointer_down(Point::new(10.0, 10.0), Button::Primary);
    a.on_pointer_move(Point::new(60.0, 40.0));
    let Some(Action::Add(added)) = a.on_pointer_up(Point::new(60.0, 40.0)) else {
        panic!("expected add");
    };

    // Session B receives it, selects it, and drags the bottom-right handle.
    let mut b = EngineCore::new();
    b.apply_add(added.clone());
    b.ui.selected_id = Some(added.id.clone());
    b.on_pointer_down(Point::new(60.0, 40.0), Button::Primary);
    assert!(matches!(b.input, InputState::Resizing { handle: Handle::BottomRight, .. }));
    b.on_pointer_move(Point::new(90.0, 70.0));
    let Some(Action::Update(update)) = b.on_pointer_up(Point::new(90.0, 70.0)) else {
        panic!("expected update");
    };

    // The relayed update lands in A's mirror with the origin intact.
    a.apply_update(update);
    let mirrored = a.element(&added.id).unwrap();
    assert!((mirrored.x - 10.0).abs() < f64::EPSILON);
    assert!((mirrored.y - 10.0).abs() < f64::EPSILON);
    assert!((mirrored.width - 80.0).abs() < f64::EPSILON);
    assert!((mirrored.height - 60.0).abs() < f64::EPSILON);
}

#[test]
fn top_left_handle_keeps_the_bottom_right_corner_fixed() {
    let mut engine = engine_with(vec![rect("a", 10.0, 10.0, 50.0, 30.0)]);
    engine.ui.selected_id = Some("a".into());
    engine.on_pointer_down(Point::new(10.0, 10.0), Button::Primary);
    engine.on_pointer_move(Point::new(30.0, 20.0));
    let Some(Action::Update(update)) = engine.on_pointer_up(Point::new(30.0, 20.0)) else {
        panic!("expected update");
    };
    assert!((update.x - 30.0).abs() < f64::EPSILON);
    assert!((update.y - 20.0).abs() < f64::EPSILON);
    assert!((update.width - 30.0).abs() < f64::EPSILON);
    assert!((update.height - 20.0).abs() < f64::EPSILON);
}

#[test]
fn crossing_the_fixed_edge_yields_negative_extent() {
    let mut engine = engine_with(vec![rect("a", 10.0, 10.0, 50.0, 30.0)]);
    engine.ui.selected_id = Some("a".into());
    engine.on_pointer_down(Point::new(60.0, 40.0), Button::Primary);
    engine.on_pointer_move(Point::new(0.0, 0.0));
    let Some(Action::Update(update)) = engine.on_pointer_up(Point::new(0.0, 0.0)) else {
        panic!("expected update");
    };
    assert!(update.width < 0.0);
    assert!(update.height < 0.0);
    // Queries see the normalized box.
    assert!(geometry::hit_test(Point::new(5.0, 5.0), &update));
}

#[test]
fn resizing_a_stroke_rescales_its_points() {
    let stroke = Element::new(
        "s",
        ElementKind::Pencil { points: vec![Point::new(0.0, 0.0), Point::new(10.0, 10.0)] },
        Point::new(0.0, 0.0),
    );
    let mut engine = engine_with(vec![stroke]);
    engine.ui.selected_id = Some("s".into());
    engine.on_pointer_down(Point::new(10.0, 10.0), Button::Primary);
    assert!(matches!(engine.input, InputState::Resizing { handle: Handle::BottomRight, .. }));
    engine.on_pointer_move(Point::new(20.0, 20.0));
    let Some(Action::Update(update)) = engine.on_pointer_up(Point::new(20.0, 20.0)) else {
        panic!("expected update");
    };
    assert_eq!(
        update.kind.points().unwrap(),
        &[Point::new(0.0, 0.0), Point::new(20.0, 20.0)]
    );
}

// =============================================================
// Erasing
// =============================================================

#[test]
fn eraser_deletes_on_move_and_reports_each_deletion() {
    let mut engine = engine_with(vec![
        rect("a", 0.0, 0.0, 20.0, 20.0),
        rect("b", 100.0, 100.0, 20.0, 20.0),
    ]);
    engine.set_tool(Tool::Eraser);
    assert!(engine.on_pointer_down(Point::new(10.0, 10.0), Button::Primary).is_none());

    assert_eq!(engine.on_pointer_move(Point::new(10.0, 10.0)), Some(Action::Delete("a".into())));
    assert!(engine.on_pointer_move(Point::new(10.0, 10.0)).is_none(), "already gone");
    assert_eq!(engine.on_pointer_move(Point::new(110.0, 110.0)), Some(Action::Delete("b".into())));
    assert!(engine.on_pointer_up(Point::new(110.0, 110.0)).is_none());
    assert!(engine.doc.is_empty());
}

#[test]
fn eraser_takes_the_topmost_of_overlapping_elements() {
    let mut engine = engine_with(vec![
        rect("below", 0.0, 0.0, 20.0, 20.0),
        rect("above", 0.0, 0.0, 20.0, 20.0),
    ]);
    engine.set_tool(Tool::Eraser);
    engine.on_pointer_down(Point::new(10.0, 10.0), Button::Primary);
    assert_eq!(engine.on_pointer_move(Point::new(10.0, 10.0)), Some(Action::Delete("above".into())));
    assert!(engine.doc.get("below").is_some());
}

// =============================================================
// Direct insertion
// =============================================================

#[test]
fn sticky_lands_at_the_view_center() {
    let mut engine = EngineCore::new();
    engine.set_viewport(800.0, 600.0);
    let Action::Add(element) = engine.insert_sticky("#ffeb3b") else {
        panic!("expected add");
    };
    assert!((element.x - 400.0).abs() < f64::EPSILON);
    assert!((element.y - 300.0).abs() < f64::EPSILON);
    assert!((element.width - crate::consts::STICKY_EXTENT).abs() < f64::EPSILON);
    assert_eq!(element.color, "#ffeb3b");
    assert_eq!(engine.doc.len(), 1);
}

#[test]
fn table_is_centered_on_the_view() {
    let mut engine = EngineCore::new();
    engine.set_viewport(800.0, 600.0);
    let Action::Add(element) = engine.insert_table(2, 2) else {
        panic!("expected add");
    };
    // 2x2 at 100x40 cells: 200 x 80, centered on (400, 300).
    assert!((element.x - 300.0).abs() < f64::EPSILON);
    assert!((element.y - 260.0).abs() < f64::EPSILON);
}

#[test]
fn insert_text_places_the_label_in_world_space() {
    let mut engine = EngineCore::new();
    engine.camera.pan_by(50.0, 0.0);
    let Action::Add(element) = engine.insert_text(Point::new(150.0, 40.0), "hello") else {
        panic!("expected add");
    };
    assert!((element.x - 100.0).abs() < f64::EPSILON);
    assert!((element.width - crate::consts::TEXT_MIN_WIDTH).abs() < f64::EPSILON);
    assert!(matches!(element.kind, ElementKind::Text { ref text } if text == "hello"));
}

// =============================================================
// Text and cell edits
// =============================================================

#[test]
fn set_element_text_edits_sticky_bodies() {
    let mut engine = EngineCore::new();
    engine.set_identity("ana", "#ff0000");
    let Action::Add(sticky) = engine.insert_sticky("#ffeb3b") else {
        panic!("expected add");
    };
    let Some(Action::Update(updated)) = engine.set_element_text(&sticky.id, "ship it") else {
        panic!("expected update");
    };
    assert!(matches!(updated.kind, ElementKind::Sticky { ref text } if text == "ship it"));
    assert_eq!(updated.last_edited_by.as_deref(), Some("ana"));
}

#[test]
fn set_element_text_rejects_non_text_kinds() {
    let mut engine = engine_with(vec![rect("a", 0.0, 0.0, 10.0, 10.0)]);
    assert!(engine.set_element_text("a", "nope").is_none());
    assert!(engine.set_element_text("ghost", "nope").is_none());
}

#[test]
fn set_table_cell_bounds_checked() {
    let mut engine = EngineCore::new();
    let Action::Add(table) = engine.insert_table(2, 3) else {
        panic!("expected add");
    };
    let Some(Action::Update(updated)) = engine.set_table_cell(&table.id, 1, 2, "42") else {
        panic!("expected update");
    };
    let ElementKind::Table { cells, .. } = &updated.kind else {
        panic!("expected table");
    };
    assert_eq!(cells[1][2], "42");

    assert!(engine.set_table_cell(&table.id, 2, 0, "x").is_none(), "row out of range");
    assert!(engine.set_table_cell(&table.id, 0, 3, "x").is_none(), "col out of range");
}

#[test]
fn set_table_cell_tolerates_a_malformed_wire_table() {
    // A peer can ship a table whose cell matrix is smaller than its declared
    // dimensions; edits against the missing cells must degrade to no-ops.
    let hollow = Element::new(
        "t",
        ElementKind::Table { rows: 2, cols: 2, cells: vec![] },
        Point::new(0.0, 0.0),
    );
    let mut engine = EngineCore::new();
    engine.apply_add(hollow);
    assert!(engine.set_table_cell("t", 0, 0, "x").is_none());

    let ragged = Element::new(
        "r",
        ElementKind::Table { rows: 2, cols: 2, cells: vec![vec![String::new()]] },
        Point::new(0.0, 0.0),
    );
    engine.apply_add(ragged);
    assert!(engine.set_table_cell("r", 0, 1, "x").is_none(), "short row");
    assert!(engine.set_table_cell("r", 0, 0, "x").is_some(), "the cell that exists still edits");
}

// =============================================================
// Deletion and editor stamping
// =============================================================

#[test]
fn delete_selection_emits_the_action_once() {
    let mut engine = engine_with(vec![rect("a", 0.0, 0.0, 10.0, 10.0)]);
    engine.ui.selected_id = Some("a".into());
    assert_eq!(engine.delete_selection(), Some(Action::Delete("a".into())));
    assert!(engine.delete_selection().is_none(), "selection was consumed");
    assert!(engine.doc.is_empty());
}

#[test]
fn anonymous_sessions_do_not_stamp_an_editor() {
    let mut engine = EngineCore::new();
    engine.set_tool(Tool::Rectangle);
    engine.on_pointer_down(Point::new(0.0, 0.0), Button::Primary);
    let Some(Action::Add(element)) = engine.on_pointer_up(Point::new(0.0, 0.0)) else {
        panic!("expected add");
    };
    assert!(element.last_edited_by.is_none());
}

#[test]
fn named_sessions_stamp_edits() {
    let mut engine = engine_with(vec![rect("a", 10.0, 10.0, 20.0, 20.0)]);
    engine.set_identity("bo", "#00ff00");
    engine.on_pointer_down(Point::new(20.0, 20.0), Button::Primary);
    engine.on_pointer_move(Point::new(25.0, 25.0));
    let Some(Action::Update(update)) = engine.on_pointer_up(Point::new(25.0, 25.0)) else {
        panic!("expected update");
    };
    assert_eq!(update.last_edited_by.as_deref(), Some("bo"));
}
