//! Overlay renderer. [`overlay`] is a pure function of the annotation state;
//! [`paint`] draws its result with an egui painter.

use crate::shape::{RectangleMode, ShapeKind};
use crate::state::{AnnotationState, Point};
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillRule, FillTessellator, FillVertex, VertexBuffers,
};

/// Logical size of the frame surface and overlay.
pub const SURFACE_SIZE: egui::Vec2 = egui::vec2(600.0, 400.0);

pub const MARKER_RADIUS: f32 = 5.0;

pub const STROKE_WIDTH: f32 = 1.0;

pub const STROKE_COLOR: egui::Color32 = egui::Color32::RED;

pub const MARKER_COLOR: egui::Color32 = egui::Color32::RED;

/// rgba(0, 255, 0, 0.5)
pub fn fill_color() -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(0, 255, 0, 128)
}

#[derive(Clone, Debug, PartialEq)]
pub enum Outline {
    /// Axis-aligned box, `min` top-left and `max` bottom-right.
    Rect { min: Point, max: Point },
    Polygon { points: Vec<Point>, closed: bool },
    Circle { center: Point, radius: f32 },
}

impl Outline {
    fn rect_from_corners(a: Point, b: Point) -> Self {
        Outline::Rect {
            min: Point::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    pub fn width(&self) -> Option<f32> {
        match self {
            Outline::Rect { min, max } => Some(max.x - min.x),
            _ => None,
        }
    }

    pub fn height(&self) -> Option<f32> {
        match self {
            Outline::Rect { min, max } => Some(max.y - min.y),
            _ => None,
        }
    }
}

/// Everything drawn on top of the frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Overlay {
    pub outline: Outline,
    pub filled: bool,
    pub markers: Vec<Point>,
}

pub fn overlay(state: &AnnotationState) -> Option<Overlay> {
    let points = state.points();
    if points.is_empty() {
        return None;
    }

    let outline = match (state.shape(), points) {
        (ShapeKind::Rectangle, &[a, b])
            if state.rectangle_mode() == RectangleMode::TwoCorner =>
        {
            Outline::rect_from_corners(a, b)
        }
        (ShapeKind::Rectangle, &[_, _, _, _]) | (ShapeKind::Triangle, &[_, _, _]) => {
            Outline::Polygon {
                points: points.to_vec(),
                closed: true,
            }
        }
        (ShapeKind::Line, _) => Outline::Polygon {
            points: points.to_vec(),
            closed: state.is_completed(),
        },
        (ShapeKind::Circle, &[center, edge]) => Outline::Circle {
            center,
            radius: center.distance(edge),
        },
        _ => Outline::Polygon {
            points: points.to_vec(),
            closed: false,
        },
    };

    Some(Overlay {
        outline,
        filled: state.is_completed(),
        markers: points.to_vec(),
    })
}

/// Triangulated interior of a closed polygon, in surface coordinates.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FillMesh {
    pub vertices: Vec<Point>,
    pub indices: Vec<u32>,
}

impl FillMesh {
    pub fn triangles(&self) -> impl Iterator<Item = [Point; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| {
            [
                self.vertices[t[0] as usize],
                self.vertices[t[1] as usize],
                self.vertices[t[2] as usize],
            ]
        })
    }
}

/// Tessellate the area enclosed by `points` (non-zero winding, like a canvas
/// fill). Concave and self-intersecting outlines are handled. `None` for
/// degenerate input or if tessellation fails.
pub fn tessellate_fill(points: &[Point]) -> Option<FillMesh> {
    let mut points = points;
    // a closed line repeats its first vertex
    if points.len() > 1 && points.first() == points.last() {
        points = &points[..points.len() - 1];
    }
    let (first, rest) = points.split_first()?;
    if rest.len() < 2 {
        return None;
    }

    let mut builder = lyon::path::Path::builder();
    builder.begin(lyon::math::point(first.x, first.y));
    for p in rest {
        builder.line_to(lyon::math::point(p.x, p.y));
    }
    builder.end(true);
    let path = builder.build();

    let mut buffers: VertexBuffers<Point, u32> = VertexBuffers::new();
    let result = FillTessellator::new().tessellate_path(
        &path,
        &FillOptions::default().with_fill_rule(FillRule::NonZero),
        &mut BuffersBuilder::new(&mut buffers, |v: FillVertex| {
            let pos = v.position();
            Point::new(pos.x, pos.y)
        }),
    );
    if let Err(err) = result {
        tracing::warn!(?err, vertices = points.len(), "fill tessellation failed");
        return None;
    }

    Some(FillMesh {
        vertices: buffers.vertices,
        indices: buffers.indices,
    })
}

/// Draw `overlay` with surface coordinates offset by `origin`.
pub fn paint(overlay: &Overlay, painter: &egui::Painter, origin: egui::Pos2) {
    let to_screen = |p: Point| origin + p.to_pos2().to_vec2();
    let stroke = egui::Stroke::new(STROKE_WIDTH, STROKE_COLOR);
    let fill = if overlay.filled {
        fill_color()
    } else {
        egui::Color32::TRANSPARENT
    };

    match &overlay.outline {
        Outline::Rect { min, max } => {
            let rect = egui::Rect::from_min_max(to_screen(*min), to_screen(*max));
            painter.rect_filled(rect, 0.0, fill);
            painter.rect_stroke(rect, 0.0, stroke, egui::StrokeKind::Middle);
        }
        Outline::Polygon { points, closed } => {
            let pts: Vec<egui::Pos2> = points.iter().map(|p| to_screen(*p)).collect();
            if overlay.filled {
                if let Some(fill_mesh) = tessellate_fill(points) {
                    let mut mesh = egui::Mesh::default();
                    for v in &fill_mesh.vertices {
                        mesh.colored_vertex(to_screen(*v), fill);
                    }
                    mesh.indices = fill_mesh.indices;
                    painter.add(egui::Shape::mesh(mesh));
                }
            }
            if *closed {
                painter.add(egui::Shape::closed_line(pts, stroke));
            } else {
                painter.add(egui::Shape::line(pts, stroke));
            }
        }
        Outline::Circle { center, radius } => {
            painter.circle(to_screen(*center), *radius, fill, stroke);
        }
    }

    for p in &overlay.markers {
        painter.circle_filled(to_screen(*p), MARKER_RADIUS, MARKER_COLOR);
    }
}
