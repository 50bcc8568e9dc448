//! Geometry primitives and rendering.
//!
//! - [`Coordinate`], [`OpenSegment`], [`Segment`]: the values the stroke engine stores
//! - [`Canvas`]: the render sink the engine draws the completed history into
//! - [`CairoCanvas`]: the Cairo-backed canvas used by the Wayland overlay

pub mod color;
pub mod geometry;
pub mod render;

pub use color::Color;
pub use geometry::{Coordinate, OpenSegment, Segment, SegmentKind};
pub use render::{CairoCanvas, Canvas, Palette, render_history};
