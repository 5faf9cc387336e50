//! Point store: the points placed so far, the active shape and whether the
//! shape is complete.

use crate::shape::{capacity, RectangleMode, RequiredPoints, ShapeKind};
use std::fmt;

/// Chebyshev radius within which a press grabs an existing point.
pub const HIT_TOLERANCE: f32 = 5.0;

/// A click closer than this to the first vertex (on both axes) closes a line.
pub const CLOSE_TOLERANCE: f32 = 10.0;

/// Surface-local pixel coordinates, origin at the overlay's top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// max(|dx|, |dy|)
    pub fn chebyshev(self, other: Point) -> f32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    pub fn distance(self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn to_pos2(self) -> egui::Pos2 {
        egui::pos2(self.x, self.y)
    }
}

impl From<egui::Pos2> for Point {
    fn from(p: egui::Pos2) -> Self {
        Self::new(p.x, p.y)
    }
}

/// Coordinate list entry, e.g. `X: 10, Y: 42.5`.
impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "X: {}, Y: {}", self.x, self.y)
    }
}

/// Index of the first point within [`HIT_TOLERANCE`] of `cursor`.
pub fn hit_test(points: &[Point], cursor: Point) -> Option<usize> {
    points
        .iter()
        .position(|p| p.chebyshev(cursor) <= HIT_TOLERANCE)
}

#[derive(Clone, Debug, PartialEq)]
pub struct AnnotationState {
    points: Vec<Point>,
    shape: ShapeKind,
    rectangle_mode: RectangleMode,
    completed: bool,
}

impl Default for AnnotationState {
    fn default() -> Self {
        Self::new(ShapeKind::default(), RectangleMode::default())
    }
}

impl AnnotationState {
    pub fn new(shape: ShapeKind, rectangle_mode: RectangleMode) -> Self {
        Self {
            points: Vec::new(),
            shape,
            rectangle_mode,
            completed: false,
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn shape(&self) -> ShapeKind {
        self.shape
    }

    pub fn rectangle_mode(&self) -> RectangleMode {
        self.rectangle_mode
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn capacity(&self) -> RequiredPoints {
        capacity(self.shape, self.rectangle_mode)
    }

    /// No further clicks will be accepted. Dragging is still allowed.
    pub fn is_saturated(&self) -> bool {
        match self.capacity() {
            RequiredPoints::Unbounded => self.completed,
            bounded => bounded.is_saturated(self.points.len()),
        }
    }

    /// Drop all points and start over with `shape`.
    pub fn reset_for_shape(&mut self, shape: ShapeKind) {
        tracing::debug!(%shape, "reset annotation");
        self.points.clear();
        self.shape = shape;
        self.completed = false;
    }

    /// Switch rectangle tracing mode. Resets the points like a shape change.
    pub fn set_rectangle_mode(&mut self, mode: RectangleMode) {
        self.rectangle_mode = mode;
        self.reset_for_shape(self.shape);
    }

    /// Append a clicked point. Returns whether the state changed.
    pub fn add_point(&mut self, cursor: Point) -> bool {
        if self.shape == ShapeKind::Line && !self.completed && self.points.len() > 2 {
            let first = self.points[0];
            if (first.x - cursor.x).abs() < CLOSE_TOLERANCE
                && (first.y - cursor.y).abs() < CLOSE_TOLERANCE
            {
                self.points.push(first);
                self.completed = true;
                tracing::debug!(vertices = self.points.len() - 1, "line closed");
                return true;
            }
        }

        if self.is_saturated() {
            tracing::trace!(shape = %self.shape, "click ignored, shape saturated");
            return false;
        }

        self.points.push(cursor);
        tracing::debug!(shape = %self.shape, index = self.points.len() - 1, x = cursor.x, y = cursor.y, "point added");

        if let RequiredPoints::Bounded(n) = self.capacity() {
            if self.points.len() == n {
                self.completed = true;
                tracing::debug!(shape = %self.shape, "shape completed");
            }
        }
        true
    }

    /// Replace the point at `index`. Returns false if there is no such point.
    pub fn move_point(&mut self, index: usize, to: Point) -> bool {
        match self.points.get_mut(index) {
            Some(p) if *p != to => {
                *p = to;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(shape: ShapeKind) -> AnnotationState {
        AnnotationState::new(shape, RectangleMode::TwoCorner)
    }

    #[test]
    fn test_reset_clears_every_shape() {
        for kind in ShapeKind::ALL {
            let mut s = state(ShapeKind::Triangle);
            s.add_point(Point::new(1.0, 1.0));
            s.add_point(Point::new(20.0, 1.0));
            s.add_point(Point::new(1.0, 20.0));
            assert!(s.is_completed());

            s.reset_for_shape(kind);
            assert!(s.points().is_empty());
            assert!(!s.is_completed());
            assert_eq!(s.shape(), kind);
        }
    }

    #[test]
    fn test_two_corner_rectangle_completes() {
        let mut s = state(ShapeKind::Rectangle);
        s.add_point(Point::new(10.0, 10.0));
        assert!(!s.is_completed());
        s.add_point(Point::new(50.0, 40.0));
        assert!(s.is_completed());
        assert!(!s.add_point(Point::new(200.0, 200.0)));
        assert_eq!(s.points().len(), 2);
    }

    #[test]
    fn test_four_corner_rectangle_completes_on_fourth() {
        let mut s = AnnotationState::new(ShapeKind::Rectangle, RectangleMode::FourCorner);
        for (i, p) in [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)].into_iter().enumerate() {
            s.add_point(Point::new(p.0, p.1));
            assert!(!s.is_completed(), "completed after {} points", i + 1);
        }
        s.add_point(Point::new(0.0, 10.0));
        assert!(s.is_completed());
        assert_eq!(s.points().len(), 4);
    }

    #[test]
    fn test_triangle_completes_on_third_click() {
        let mut s = state(ShapeKind::Triangle);
        s.add_point(Point::new(0.0, 0.0));
        assert!(!s.is_completed());
        s.add_point(Point::new(30.0, 0.0));
        assert!(!s.is_completed());
        s.add_point(Point::new(15.0, 30.0));
        assert!(s.is_completed());
    }

    #[test]
    fn test_saturated_add_is_noop() {
        for kind in [ShapeKind::Rectangle, ShapeKind::Triangle, ShapeKind::Circle] {
            let mut s = state(kind);
            let mut x = 0.0;
            while !s.is_saturated() {
                s.add_point(Point::new(x, 0.0));
                x += 50.0;
            }
            let len = s.points().len();
            for _ in 0..5 {
                assert!(!s.add_point(Point::new(300.0, 300.0)));
            }
            assert_eq!(s.points().len(), len);
        }
    }

    #[test]
    fn test_line_closes_near_first_point() {
        let mut s = state(ShapeKind::Line);
        s.add_point(Point::new(0.0, 0.0));
        s.add_point(Point::new(50.0, 0.0));
        s.add_point(Point::new(50.0, 50.0));
        assert!(!s.is_completed());

        assert!(s.add_point(Point::new(5.0, 5.0)));
        assert!(s.is_completed());
        assert_eq!(s.points().len(), 4);
        assert_eq!(s.points()[3], Point::new(0.0, 0.0));

        // closed lines take no more points
        assert!(!s.add_point(Point::new(100.0, 100.0)));
        assert!(!s.add_point(Point::new(1.0, 1.0)));
        assert_eq!(s.points().len(), 4);
    }

    #[test]
    fn test_line_far_click_appends_vertex() {
        let mut s = state(ShapeKind::Line);
        s.add_point(Point::new(0.0, 0.0));
        s.add_point(Point::new(50.0, 0.0));
        s.add_point(Point::new(50.0, 50.0));

        s.add_point(Point::new(15.0, 0.0));
        assert!(!s.is_completed());
        assert_eq!(s.points().len(), 4);
        assert_eq!(s.points()[3], Point::new(15.0, 0.0));
    }

    #[test]
    fn test_line_close_tolerance_is_strict() {
        let mut s = state(ShapeKind::Line);
        s.add_point(Point::new(0.0, 0.0));
        s.add_point(Point::new(50.0, 0.0));
        s.add_point(Point::new(50.0, 50.0));

        // exactly 10px away on one axis: a new vertex
        assert!(s.add_point(Point::new(10.0, 0.0)));
        assert!(!s.is_completed());
        assert_eq!(s.points()[3], Point::new(10.0, 0.0));

        s.add_point(Point::new(9.5, 9.5));
        assert!(s.is_completed());
        assert_eq!(s.points()[4], Point::new(0.0, 0.0));
    }

    #[test]
    fn test_bounded_saturation_uses_capacity() {
        let mut s = AnnotationState::new(ShapeKind::Rectangle, RectangleMode::FourCorner);
        s.add_point(Point::new(0.0, 0.0));
        s.add_point(Point::new(10.0, 0.0));
        assert!(!s.is_saturated());
        s.add_point(Point::new(10.0, 10.0));
        s.add_point(Point::new(0.0, 10.0));
        assert!(s.is_saturated());
    }

    #[test]
    fn test_line_needs_three_points_before_closing() {
        let mut s = state(ShapeKind::Line);
        s.add_point(Point::new(0.0, 0.0));
        s.add_point(Point::new(50.0, 0.0));
        s.add_point(Point::new(2.0, 2.0));
        assert!(!s.is_completed());
        assert_eq!(s.points()[2], Point::new(2.0, 2.0));
    }

    #[test]
    fn test_hit_test_bounds() {
        let points = [Point::new(104.0, 96.0)];
        assert_eq!(hit_test(&points, Point::new(100.0, 100.0)), Some(0));
        let points = [Point::new(106.0, 100.0)];
        assert_eq!(hit_test(&points, Point::new(100.0, 100.0)), None);
        let points = [Point::new(105.0, 95.0)];
        assert_eq!(hit_test(&points, Point::new(100.0, 100.0)), Some(0));
    }

    #[test]
    fn test_hit_test_prefers_earliest() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(12.0, 12.0),
            Point::new(10.0, 10.0),
        ];
        assert_eq!(hit_test(&points, Point::new(11.0, 11.0)), Some(1));
        assert_eq!(hit_test(&[], Point::new(0.0, 0.0)), None);
    }

    #[test]
    fn test_point_display() {
        assert_eq!(Point::new(10.0, 42.5).to_string(), "X: 10, Y: 42.5");
    }

    #[test]
    fn test_rectangle_mode_switch_resets() {
        let mut s = state(ShapeKind::Rectangle);
        s.add_point(Point::new(1.0, 1.0));
        s.set_rectangle_mode(RectangleMode::FourCorner);
        assert!(s.points().is_empty());
        assert_eq!(s.rectangle_mode(), RectangleMode::FourCorner);
        assert_eq!(s.shape(), ShapeKind::Rectangle);
    }
}
