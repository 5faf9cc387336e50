//! Shape registry: the kinds of shape a user can trace and how many clicks
//! each one takes.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// How many points a shape needs before it counts as complete.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequiredPoints {
    Bounded(usize),
    /// Grows until the user closes it by clicking near the first point.
    Unbounded,
}

impl RequiredPoints {
    /// Whether `len` points already fill the shape.
    pub fn is_saturated(self, len: usize) -> bool {
        match self {
            RequiredPoints::Bounded(n) => len >= n,
            RequiredPoints::Unbounded => false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    #[default]
    Rectangle,
    Triangle,
    Line,
    Circle,
}

impl ShapeKind {
    /// Selector order.
    pub const ALL: [ShapeKind; 4] = [
        ShapeKind::Rectangle,
        ShapeKind::Triangle,
        ShapeKind::Line,
        ShapeKind::Circle,
    ];

    pub fn required_points(self) -> RequiredPoints {
        match self {
            ShapeKind::Rectangle => RequiredPoints::Bounded(4),
            ShapeKind::Triangle => RequiredPoints::Bounded(3),
            ShapeKind::Line => RequiredPoints::Unbounded,
            ShapeKind::Circle => RequiredPoints::Bounded(2),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Triangle => "triangle",
            ShapeKind::Line => "line",
            ShapeKind::Circle => "circle",
        }
    }

    /// Capitalized label for the selector.
    pub fn label(self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "Rectangle",
            ShapeKind::Triangle => "Triangle",
            ShapeKind::Line => "Line",
            ShapeKind::Circle => "Circle",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown shape `{0}` (expected rectangle, triangle, line or circle)")]
pub struct ParseShapeError(pub String);

impl FromStr for ShapeKind {
    type Err = ParseShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShapeKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseShapeError(s.to_string()))
    }
}

/// How a rectangle is traced. Fixed for a session; switching resets the
/// current points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RectangleMode {
    /// Two clicks at opposite corners of an axis-aligned box.
    #[default]
    TwoCorner,
    /// Four clicks, one per corner, in drawing order.
    FourCorner,
}

impl RectangleMode {
    pub const ALL: [RectangleMode; 2] = [RectangleMode::TwoCorner, RectangleMode::FourCorner];

    pub fn label(self) -> &'static str {
        match self {
            RectangleMode::TwoCorner => "2 corners",
            RectangleMode::FourCorner => "4 corners",
        }
    }
}

/// Points the store accepts for `kind` under `mode`. Only rectangles depend
/// on the mode.
pub fn capacity(kind: ShapeKind, mode: RectangleMode) -> RequiredPoints {
    match (kind, mode) {
        (ShapeKind::Rectangle, RectangleMode::TwoCorner) => RequiredPoints::Bounded(2),
        _ => kind.required_points(),
    }
}
