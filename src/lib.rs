//! Click-to-place shape annotation over a video frame.
//!
//! [`input::Controller`] owns the annotation state and consumes pointer
//! events; [`render::overlay`] turns that state into something to draw.

pub mod app;
pub mod config;
pub mod input;
pub mod logging;
pub mod render;
pub mod shape;
pub mod state;

pub use config::{Args, Config, ConfigError};
pub use input::{Controller, PointerEvent};
pub use shape::{RectangleMode, RequiredPoints, ShapeKind};
pub use state::{AnnotationState, Point};
