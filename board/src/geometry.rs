//! Pure geometric queries over elements.
//!
//! Everything in this module is a stateless function of an element and a
//! point or region. Extents may be negative (drag direction), so every
//! query goes through a normalized bounding box first.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use crate::consts::{HANDLE_THRESHOLD, HIT_TOLERANCE};
use crate::element::{Element, ElementKind, Point};

/// An axis-aligned box with signed extent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// The same box with a min-corner origin and non-negative extent.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            x: self.x.min(self.x + self.width),
            y: self.y.min(self.y + self.height),
            width: self.width.abs(),
            height: self.height.abs(),
        }
    }

    /// Whether `p` lies inside the normalized box (inclusive edges).
    #[must_use]
    pub fn contains(self, p: Point) -> bool {
        let b = self.normalized();
        p.x >= b.x && p.x <= b.x + b.width && p.y >= b.y && p.y <= b.y + b.height
    }

    /// Tight bounding box of a point list. Zero-sized at the origin when empty.
    #[must_use]
    pub fn from_points(points: &[Point]) -> Self {
        let Some(first) = points.first() else {
            return Self::default();
        };
        let mut min = *first;
        let mut max = *first;
        for p in &points[1..] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Self::new(min.x, min.y, max.x - min.x, max.y - min.y)
    }
}

/// One of the four corner resize handles, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Distance from `p` to the segment `a`-`b`, clamping the projection
/// parameter to `[0, 1]` so endpoints behave like caps.
fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let l2 = (a.x - b.x).powi(2) + (a.y - b.y).powi(2);
    if l2 == 0.0 {
        return ((p.x - a.x).powi(2) + (p.y - a.y).powi(2)).sqrt();
    }
    let t = (((p.x - a.x) * (b.x - a.x) + (p.y - a.y) * (b.y - a.y)) / l2).clamp(0.0, 1.0);
    let cx = a.x + t * (b.x - a.x);
    let cy = a.y + t * (b.y - a.y);
    ((p.x - cx).powi(2) + (p.y - cy).powi(2)).sqrt()
}

/// Normalized bounding box of an element. Freehand boxes derive from the
/// point list; everything else derives from origin and extent.
#[must_use]
pub fn bounding_box(element: &Element) -> Bounds {
    match element.kind.points() {
        Some(points) => Bounds::from_points(points).normalized(),
        None => Bounds::new(element.x, element.y, element.width, element.height).normalized(),
    }
}

/// Whether `point` hits `element`.
#[must_use]
pub fn hit_test(point: Point, element: &Element) -> bool {
    match &element.kind {
        ElementKind::Rectangle
        | ElementKind::Text { .. }
        | ElementKind::Sticky { .. }
        | ElementKind::Image { .. }
        | ElementKind::Table { .. } => {
            Bounds::new(element.x, element.y, element.width, element.height).contains(point)
        }
        ElementKind::Line => {
            let a = Point::new(element.x, element.y);
            let b = Point::new(element.x + element.width, element.y + element.height);
            distance_to_segment(point, a, b) < HIT_TOLERANCE
        }
        ElementKind::Pencil { points } | ElementKind::Highlighter { points } => {
            // Cheap bounding-box rejection before per-segment checks.
            let b = Bounds::from_points(points).normalized();
            if point.x < b.x - HIT_TOLERANCE
                || point.x > b.x + b.width + HIT_TOLERANCE
                || point.y < b.y - HIT_TOLERANCE
                || point.y > b.y + b.height + HIT_TOLERANCE
            {
                return false;
            }
            points
                .windows(2)
                .any(|pair| distance_to_segment(point, pair[0], pair[1]) < HIT_TOLERANCE)
        }
        ElementKind::Ellipse => {
            let rx = element.width.abs() / 2.0;
            let ry = element.height.abs() / 2.0;
            let cx = element.x + element.width / 2.0;
            let cy = element.y + element.height / 2.0;
            // Degenerate radii divide to inf/NaN, which fails the test below.
            (point.x - cx).powi(2) / rx.powi(2) + (point.y - cy).powi(2) / ry.powi(2) <= 1.0
        }
    }
}

/// Which corner resize handle (if any) of `element` is under `point`.
///
/// Corners are checked in a fixed priority order: top-left, top-right,
/// bottom-left, bottom-right.
#[must_use]
pub fn resize_handle_at(point: Point, element: &Element) -> Option<Handle> {
    let b = bounding_box(element);
    let near = |hx: f64, hy: f64| (point.x - hx).abs() < HANDLE_THRESHOLD && (point.y - hy).abs() < HANDLE_THRESHOLD;

    if near(b.x, b.y) {
        Some(Handle::TopLeft)
    } else if near(b.x + b.width, b.y) {
        Some(Handle::TopRight)
    } else if near(b.x, b.y + b.height) {
        Some(Handle::BottomLeft)
    } else if near(b.x + b.width, b.y + b.height) {
        Some(Handle::BottomRight)
    } else {
        None
    }
}

/// Affinely remap `points` from the coordinate frame of `old` into `new`.
///
/// Identity when `old` has zero width or height, so a degenerate stroke can
/// never divide by zero.
#[must_use]
pub fn rescale_points(points: &[Point], old: Bounds, new: Bounds) -> Vec<Point> {
    if old.width == 0.0 || old.height == 0.0 {
        return points.to_vec();
    }
    let scale_x = new.width / old.width;
    let scale_y = new.height / old.height;
    points
        .iter()
        .map(|p| Point::new(new.x + (p.x - old.x) * scale_x, new.y + (p.y - old.y) * scale_y))
        .collect()
}

/// Marquee test: whether the element's representative point lies within
/// `region`. Freehand strokes are represented by their first point,
/// everything else by its geometric center.
#[must_use]
pub fn box_intersects(region: Bounds, element: &Element) -> bool {
    let representative = match element.kind.points() {
        Some(points) => match points.first() {
            Some(first) => *first,
            None => return false,
        },
        None => Point::new(element.x + element.width / 2.0, element.y + element.height / 2.0),
    };
    region.contains(representative)
}
