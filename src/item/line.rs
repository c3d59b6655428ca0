//! Two-point connector lines with optional head decorations.

use crate::constants::{
    ARROW_HEAD_LENGTH, CIRCLE_HEAD_DIAMETER, HIT_PADDING, MIN_INSERT_SIZE, SKETCH_FILL_WEIGHT,
};
use crate::geometry::{Bounding, Position, distance, point_near_segment};
use crate::input::DragEvent;
use crate::item::controls;
use crate::item::{ItemBase, LineHead, LineProps, line_points, render_text};
use crate::render::{SketchBackend, SketchStyle, Surface};

/// A straight connector between exactly two points.
#[derive(Clone, Debug)]
pub struct Line {
    base: ItemBase,
    points: [Position; 2],
    head_start: LineHead,
    head_end: LineHead,
}

impl Line {
    pub(crate) fn new(props: &LineProps) -> crate::error::BoardResult<Self> {
        let points = line_points(&props.points)?;
        let mut base = ItemBase::new();
        if let Some(stroke) = &props.stroke {
            base.stroke = Some(stroke.clone());
        }
        base.text = props.text.clone();
        if let Some(align) = props.align_h_text {
            base.align_h_text = align;
        }
        if let Some(size) = props.text_size {
            base.text_size = size;
        }
        Ok(Self {
            base,
            points,
            head_start: props.head_start.unwrap_or(LineHead::None),
            head_end: props.head_end.unwrap_or(LineHead::Arrow),
        })
    }

    pub(crate) fn to_props(&self) -> LineProps {
        LineProps {
            points: self.points.to_vec(),
            head_start: Some(self.head_start),
            head_end: Some(self.head_end),
            stroke: self.base.stroke.clone(),
            text: self.base.text.clone(),
            align_h_text: Some(self.base.align_h_text),
            text_size: Some(self.base.text_size),
        }
    }

    pub fn points(&self) -> [Position; 2] {
        self.points
    }

    pub(crate) fn set_head_start(&mut self, head: LineHead) {
        self.head_start = head;
    }

    pub(crate) fn set_head_end(&mut self, head: LineHead) {
        self.head_end = head;
    }

    /// Box spanning the min/max of both points.
    pub fn bounding(&self) -> Bounding {
        Bounding::from_corners(self.points[0], self.points[1])
    }

    /// The tolerance band scales with line length, so the spatial-index
    /// envelope has to as well.
    pub(crate) fn hit_padding(&self) -> f32 {
        let len = distance(self.points[0], self.points[1]);
        HIT_PADDING.max(len * 0.005)
    }

    pub fn hit_test(&self, point: Position) -> bool {
        point_near_segment(point, self.points[0], self.points[1])
            || self.control_at(point).is_some()
    }

    /// One handle per point, indexed 0 and 1.
    pub fn control_at(&self, point: Position) -> Option<usize> {
        controls::line_handle_at(point, &self.points)
    }

    pub fn move_by(&mut self, delta: Position) {
        for point in &mut self.points {
            *point = point.translated(delta);
        }
    }

    pub(crate) fn resize(&mut self, event: &DragEvent, handle: Option<usize>) {
        match handle {
            Some(idx) => {
                debug_assert!(idx < 2, "line handle index out of range");
                self.points[idx.min(1)] = event.position;
            }
            None => {
                // Fresh insert: anchor at the drag start, follow the cursor.
                self.points[0] = event.start;
                self.points[1] = event.position;
            }
        }
    }

    pub fn min_insert_size_reached(&self) -> bool {
        distance(self.points[0], self.points[1]) > MIN_INSERT_SIZE
    }

    pub fn render(&self, surface: &mut dyn Surface, sketch: &mut dyn SketchBackend) {
        let style = SketchStyle {
            fill: self.base.stroke.clone(),
            stroke: self.base.stroke.clone(),
            fill_weight: SKETCH_FILL_WEIGHT,
            seed: self.base.seed,
        };
        sketch.linear_path(&self.points, &style);

        match self.head_start {
            LineHead::Arrow => {
                let angle = angle_between(self.points[1], self.points[0]);
                render_arrow(sketch, self.points[0], angle, &style);
            }
            LineHead::Circle => {
                sketch.circle(self.points[0], CIRCLE_HEAD_DIAMETER, &style);
            }
            LineHead::None => {}
        }
        match self.head_end {
            LineHead::Arrow => {
                let angle = angle_between(self.points[0], self.points[1]);
                render_arrow(sketch, self.points[1], angle, &style);
            }
            LineHead::Circle => {
                sketch.circle(self.points[1], CIRCLE_HEAD_DIAMETER, &style);
            }
            LineHead::None => {}
        }

        render_text(&self.base, true, self.bounding(), surface);
    }

    pub(crate) fn base(&self) -> &ItemBase {
        &self.base
    }

    pub(crate) fn base_mut(&mut self) -> &mut ItemBase {
        &mut self.base
    }
}

fn angle_between(from: Position, to: Position) -> f32 {
    (to.y - from.y).atan2(to.x - from.x)
}

/// Two short flanks diverging at ±144° from the line direction.
fn render_arrow(sketch: &mut dyn SketchBackend, tip: Position, angle: f32, style: &SketchStyle) {
    let spread = std::f32::consts::PI / 1.25;
    for flank in [angle + spread, angle - spread] {
        let end = Position::new(
            tip.x + ARROW_HEAD_LENGTH * flank.cos(),
            tip.y + ARROW_HEAD_LENGTH * flank.sin(),
        );
        sketch.line(tip, end, style);
    }
}
