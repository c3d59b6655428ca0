//! Rendering collaborator contracts.
//!
//! The scene does not rasterize anything itself; it drives two traits. A
//! [`Surface`] covers the plain raster ops used for text, selection overlays,
//! and the debug hit-map. A [`SketchBackend`] covers the hand-drawn style
//! primitives and must be deterministic for a given seed + geometry + style,
//! so repeated renders of an unchanged scene are visually identical.
//!
//! `recording` provides in-memory implementations of both that append every
//! op to a shared log, used by the test suite to assert paint order and
//! determinism.

pub mod recording;

pub use recording::{DrawLog, DrawOp, RecordingSketch, RecordingSurface, draw_log};

use crate::geometry::{Bounding, Position, Size};
use crate::item::TextAlign;

/// Style record handed to every sketch primitive.
#[derive(Clone, Debug, PartialEq)]
pub struct SketchStyle {
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub fill_weight: f32,
    /// Per-item deterministic seed; equal seeds must produce equal output.
    pub seed: u64,
}

/// Style record for text drawn onto the surface.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    pub color: String,
    pub font: String,
    pub size: f32,
    pub line_height: f32,
    pub align: TextAlign,
}

/// Plain raster surface the scene composes overlays and text onto.
///
/// Transform calls nest: the scene applies scale and translate before
/// painting and undoes them afterwards in reverse order.
pub trait Surface {
    /// Top-left of the surface in client coordinates, used to convert raw
    /// device positions into canvas space.
    fn origin(&self) -> Position {
        Position::ZERO
    }

    fn scale(&mut self, factor: f32);
    fn translate(&mut self, delta: Position);
    fn clear(&mut self, size: Size);
    fn fill_rect(&mut self, bounds: Bounding, color: &str);
    fn stroke_rect(&mut self, bounds: Bounding, color: &str, line_width: f32);
    fn fill_round_rect(&mut self, bounds: Bounding, radius: f32, color: &str);
    fn stroke_round_rect(&mut self, bounds: Bounding, radius: f32, color: &str, dashed: bool);
    /// Draw `text` inside `bounds`, vertically centered, horizontally per
    /// `style.align`.
    fn draw_text(&mut self, text: &str, bounds: Bounding, style: &TextStyle);
}

/// Hand-drawn ("sketchy") rendering primitives.
pub trait SketchBackend {
    fn rectangle(&mut self, bounds: Bounding, style: &SketchStyle);
    /// Ellipse centered at `center` spanning `size`.
    fn ellipse(&mut self, center: Position, size: Size, style: &SketchStyle);
    fn line(&mut self, start: Position, end: Position, style: &SketchStyle);
    fn linear_path(&mut self, points: &[Position], style: &SketchStyle);
    /// Circle centered at `center` with the given diameter.
    fn circle(&mut self, center: Position, diameter: f32, style: &SketchStyle);
}
