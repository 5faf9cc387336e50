//! Input controller: turns pointer events on the frame surface into point
//! store mutations.

use crate::shape::{RectangleMode, ShapeKind};
use crate::state::{hit_test, AnnotationState, Point};

/// Pointer input in surface-local coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    /// Primary button went down at this position.
    Press(Point),
    /// Pointer moved while the primary button is held.
    Move(Point),
    /// Primary button released, wherever the pointer is.
    Release,
    /// Press and release without movement.
    Click(Point),
}

#[derive(Clone, Debug, Default)]
pub struct Controller {
    state: AnnotationState,
    drag: Option<usize>,
}

impl Controller {
    pub fn new(shape: ShapeKind, rectangle_mode: RectangleMode) -> Self {
        Self {
            state: AnnotationState::new(shape, rectangle_mode),
            drag: None,
        }
    }

    pub fn state(&self) -> &AnnotationState {
        &self.state
    }

    /// Index of the point being dragged, if any.
    pub fn drag_selection(&self) -> Option<usize> {
        self.drag
    }

    /// Screen position to surface-local coordinates.
    pub fn to_local(surface_origin: egui::Pos2, screen: egui::Pos2) -> Point {
        Point::from(egui::pos2(screen.x - surface_origin.x, screen.y - surface_origin.y))
    }

    /// Apply one event. Returns whether the overlay needs redrawing.
    pub fn handle(&mut self, event: PointerEvent) -> bool {
        match event {
            PointerEvent::Press(p) => {
                self.begin_drag(p);
                false
            }
            PointerEvent::Move(p) => self.update_drag(p),
            PointerEvent::Release => {
                self.end_drag();
                false
            }
            PointerEvent::Click(p) => self.state.add_point(p),
        }
    }

    pub fn begin_drag(&mut self, cursor: Point) {
        if let Some(index) = hit_test(self.state.points(), cursor) {
            tracing::debug!(index, "drag started");
            self.drag = Some(index);
        }
    }

    pub fn update_drag(&mut self, cursor: Point) -> bool {
        match self.drag {
            Some(index) => self.state.move_point(index, cursor),
            None => false,
        }
    }

    pub fn end_drag(&mut self) {
        if let Some(index) = self.drag.take() {
            tracing::debug!(index, "drag released");
        }
    }

    pub fn add_point(&mut self, cursor: Point) -> bool {
        self.state.add_point(cursor)
    }

    /// Shape selector change: discard the points and any drag in progress.
    pub fn reset_for_shape(&mut self, shape: ShapeKind) {
        self.drag = None;
        self.state.reset_for_shape(shape);
    }

    pub fn set_rectangle_mode(&mut self, mode: RectangleMode) {
        self.drag = None;
        self.state.set_rectangle_mode(mode);
    }
}
