//! Rectangle, circle, and text-box items.

use crate::constants::{FILL_COLORS, MIN_INSERT_SIZE, SKETCH_FILL_WEIGHT};
use crate::geometry::{Bounding, Position, Size, point_in_rect};
use crate::input::DragEvent;
use crate::item::controls::{self, BOTTOM_LEFT, BOTTOM_RIGHT, TOP_LEFT, TOP_RIGHT};
use crate::item::{ItemBase, ShapeKind, ShapeProps, render_text};
use crate::render::{SketchBackend, SketchStyle, Surface};

/// An axis-aligned shape with optional fill and text.
#[derive(Clone, Debug)]
pub struct Shape {
    base: ItemBase,
    kind: ShapeKind,
    position: Position,
    size: Size,
    fill: Option<String>,
}

impl Shape {
    pub(crate) fn new(props: &ShapeProps) -> Self {
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
        Self {
            base,
            kind: props.shape,
            position: props.position,
            size: props.size,
            fill: props.fill.clone().or_else(|| Some(FILL_COLORS[0].to_string())),
        }
    }

    pub(crate) fn to_props(&self) -> ShapeProps {
        ShapeProps {
            shape: self.kind,
            position: self.position,
            size: self.size,
            fill: self.fill.clone(),
            stroke: self.base.stroke.clone(),
            text: self.base.text.clone(),
            align_h_text: Some(self.base.align_h_text),
            text_size: Some(self.base.text_size),
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub(crate) fn set_fill(&mut self, fill: Option<String>) {
        self.fill = fill;
    }

    pub fn bounding(&self) -> Bounding {
        Bounding::new(self.position, self.size)
    }

    pub fn hit_test(&self, point: Position) -> bool {
        point_in_rect(point, self.position, self.size) || self.control_at(point).is_some()
    }

    /// Corner handles in index order: top-left, top-right, bottom-right,
    /// bottom-left.
    pub fn control_at(&self, point: Position) -> Option<usize> {
        controls::shape_handle_at(point, self.position, self.size)
    }

    pub fn move_by(&mut self, delta: Position) {
        self.position = self.position.translated(delta);
    }

    pub(crate) fn resize(&mut self, event: &DragEvent, handle: Option<usize>) {
        let Some(handle) = handle else {
            // Fresh insert: the drag's bounding box is the shape.
            self.position = event.dragged_bounding.position;
            self.size = event.dragged_bounding.size;
            return;
        };
        if handle == TOP_LEFT || handle == BOTTOM_LEFT {
            self.position.x += event.delta.x;
            self.size.width -= event.delta.x;
        }
        if handle == TOP_LEFT || handle == TOP_RIGHT {
            self.position.y += event.delta.y;
            self.size.height -= event.delta.y;
        }
        if handle == TOP_RIGHT || handle == BOTTOM_RIGHT {
            self.size.width += event.delta.x;
        }
        if handle == BOTTOM_RIGHT || handle == BOTTOM_LEFT {
            self.size.height += event.delta.y;
        }
        self.size.width = self.size.width.max(0.0);
        self.size.height = self.size.height.max(0.0);
    }

    pub fn min_insert_size_reached(&self) -> bool {
        self.size.width > MIN_INSERT_SIZE || self.size.height > MIN_INSERT_SIZE
    }

    pub fn render(&self, surface: &mut dyn Surface, sketch: &mut dyn SketchBackend) {
        let style = SketchStyle {
            fill: self.fill.clone(),
            stroke: self.base.stroke.clone(),
            fill_weight: SKETCH_FILL_WEIGHT,
            seed: self.base.seed,
        };
        match self.kind {
            ShapeKind::Rect => sketch.rectangle(self.bounding(), &style),
            ShapeKind::Circle => {
                let center = Position::new(
                    self.position.x + self.size.width / 2.0,
                    self.position.y + self.size.height / 2.0,
                );
                sketch.ellipse(center, self.size, &style);
            }
            ShapeKind::Text => {}
        }
        render_text(&self.base, false, self.bounding(), surface);
    }

    pub(crate) fn base(&self) -> &ItemBase {
        &self.base
    }

    pub(crate) fn base_mut(&mut self) -> &mut ItemBase {
        &mut self.base
    }
}
