//! Recording render backends for headless use and tests.
//!
//! Both backends append to a shared [`DrawLog`], so a test can observe the
//! exact interleaving of surface and sketch ops produced by a scene render.

use std::cell::RefCell;
use std::rc::Rc;

use crate::geometry::{Bounding, Position, Size};
use crate::render::{SketchBackend, SketchStyle, Surface, TextStyle};

/// One recorded draw call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Scale(f32),
    Translate(Position),
    Clear(Size),
    FillRect { bounds: Bounding, color: String },
    StrokeRect { bounds: Bounding, color: String, line_width: f32 },
    FillRoundRect { bounds: Bounding, radius: f32, color: String },
    StrokeRoundRect { bounds: Bounding, radius: f32, color: String, dashed: bool },
    Text { text: String, bounds: Bounding, style: TextStyle },
    SketchRect { bounds: Bounding, style: SketchStyle },
    SketchEllipse { center: Position, size: Size, style: SketchStyle },
    SketchLine { start: Position, end: Position, style: SketchStyle },
    SketchPath { points: Vec<Position>, style: SketchStyle },
    SketchCircle { center: Position, diameter: f32, style: SketchStyle },
}

/// Shared, append-only log of draw calls.
pub type DrawLog = Rc<RefCell<Vec<DrawOp>>>;

/// Create an empty draw log to share between a surface and a sketch backend.
pub fn draw_log() -> DrawLog {
    Rc::new(RefCell::new(Vec::new()))
}

/// [`Surface`] implementation that records every call.
pub struct RecordingSurface {
    log: DrawLog,
    origin: Position,
}

impl RecordingSurface {
    pub fn new(log: DrawLog) -> Self {
        Self { log, origin: Position::ZERO }
    }

    pub fn with_origin(log: DrawLog, origin: Position) -> Self {
        Self { log, origin }
    }
}

impl Surface for RecordingSurface {
    fn origin(&self) -> Position {
        self.origin
    }

    fn scale(&mut self, factor: f32) {
        self.log.borrow_mut().push(DrawOp::Scale(factor));
    }

    fn translate(&mut self, delta: Position) {
        self.log.borrow_mut().push(DrawOp::Translate(delta));
    }

    fn clear(&mut self, size: Size) {
        self.log.borrow_mut().push(DrawOp::Clear(size));
    }

    fn fill_rect(&mut self, bounds: Bounding, color: &str) {
        self.log.borrow_mut().push(DrawOp::FillRect { bounds, color: color.to_string() });
    }

    fn stroke_rect(&mut self, bounds: Bounding, color: &str, line_width: f32) {
        self.log
            .borrow_mut()
            .push(DrawOp::StrokeRect { bounds, color: color.to_string(), line_width });
    }

    fn fill_round_rect(&mut self, bounds: Bounding, radius: f32, color: &str) {
        self.log
            .borrow_mut()
            .push(DrawOp::FillRoundRect { bounds, radius, color: color.to_string() });
    }

    fn stroke_round_rect(&mut self, bounds: Bounding, radius: f32, color: &str, dashed: bool) {
        self.log.borrow_mut().push(DrawOp::StrokeRoundRect {
            bounds,
            radius,
            color: color.to_string(),
            dashed,
        });
    }

    fn draw_text(&mut self, text: &str, bounds: Bounding, style: &TextStyle) {
        self.log.borrow_mut().push(DrawOp::Text {
            text: text.to_string(),
            bounds,
            style: style.clone(),
        });
    }
}

/// [`SketchBackend`] implementation that records every call. Trivially
/// deterministic: output depends only on the calls made.
pub struct RecordingSketch {
    log: DrawLog,
}

impl RecordingSketch {
    pub fn new(log: DrawLog) -> Self {
        Self { log }
    }
}

impl SketchBackend for RecordingSketch {
    fn rectangle(&mut self, bounds: Bounding, style: &SketchStyle) {
        self.log.borrow_mut().push(DrawOp::SketchRect { bounds, style: style.clone() });
    }

    fn ellipse(&mut self, center: Position, size: Size, style: &SketchStyle) {
        self.log.borrow_mut().push(DrawOp::SketchEllipse { center, size, style: style.clone() });
    }

    fn line(&mut self, start: Position, end: Position, style: &SketchStyle) {
        self.log.borrow_mut().push(DrawOp::SketchLine { start, end, style: style.clone() });
    }

    fn linear_path(&mut self, points: &[Position], style: &SketchStyle) {
        self.log
            .borrow_mut()
            .push(DrawOp::SketchPath { points: points.to_vec(), style: style.clone() });
    }

    fn circle(&mut self, center: Position, diameter: f32, style: &SketchStyle) {
        self.log.borrow_mut().push(DrawOp::SketchCircle { center, diameter, style: style.clone() });
    }
}
