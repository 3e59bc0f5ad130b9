use super::*;

#[test]
fn default_is_identity_transform() {
    let cam = Camera::default();
    let p = Point::new(12.0, 34.0);
    assert_eq!(cam.screen_to_world(p), p);
    assert_eq!(cam.world_to_screen(p), p);
}

#[test]
fn screen_to_world_undoes_pan_then_zoom() {
    let cam = Camera { pan_x: 100.0, pan_y: 50.0, zoom: 2.0 };
    let world = cam.screen_to_world(Point::new(140.0, 70.0));
    assert_eq!(world, Point::new(20.0, 10.0));
}

#[test]
fn world_to_screen_round_trips() {
    let cam = Camera { pan_x: -30.0, pan_y: 12.5, zoom: 0.5 };
    let world = Point::new(7.0, -3.0);
    let back = cam.screen_to_world(cam.world_to_screen(world));
    assert!((back.x - world.x).abs() < 1e-9);
    assert!((back.y - world.y).abs() < 1e-9);
}

#[test]
fn pan_by_accumulates() {
    let mut cam = Camera::default();
    cam.pan_by(10.0, -5.0);
    cam.pan_by(2.0, 3.0);
    assert!((cam.pan_x - 12.0).abs() < f64::EPSILON);
    assert!((cam.pan_y + 2.0).abs() < f64::EPSILON);
}

#[test]
fn panning_shifts_the_visible_world() {
    let mut cam = Camera::default();
    let before = cam.screen_to_world(Point::new(0.0, 0.0));
    cam.pan_by(50.0, 0.0);
    let after = cam.screen_to_world(Point::new(0.0, 0.0));
    assert!((before.x - after.x - 50.0).abs() < f64::EPSILON);
    assert!((before.y - after.y).abs() < f64::EPSILON);
}
