//! The item model: drawable scene entities and their wire format.
//!
//! Items form a closed set of two variants, [`Shape`] and [`Line`], carried
//! by the [`Item`] enum and exhaustively matched everywhere they are
//! serialized, hit-tested, resized, or rendered. The serializable form is
//! [`ItemProps`], a tagged union that round-trips exactly through JSON.
//!
//! Hit tests are pure queries: `control_at` returns the handle index under a
//! point and leaves the item untouched; the controller keeps the active
//! handle in its own state while a resize drag is in progress.

pub mod controls;
mod line;
mod shape;

pub use line::Line;
pub use shape::Shape;

use std::sync::atomic::{AtomicU64, Ordering};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::STROKE_COLORS;
use crate::error::{BoardResult, Error};
use crate::geometry::{Bounding, Position};
use crate::input::DragEvent;
use crate::render::{SketchBackend, Surface};

/// Process-unique item identity, stable for the item's lifetime.
pub type ItemId = u64;

static NEXT_ITEM_ID: AtomicU64 = AtomicU64::new(1);

fn next_item_id() -> ItemId {
    NEXT_ITEM_ID.fetch_add(1, Ordering::Relaxed)
}

/// Fresh render seed for the sketch backend, fixed at item creation.
fn new_seed() -> u64 {
    rand::thread_rng().gen_range(1..2_147_483_647)
}

// ============================================================================
// Wire format
// ============================================================================

/// Geometry drawn by a shape item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rect,
    Circle,
    /// No fill shape is drawn; the item is its text.
    Text,
}

/// Decoration at a line endpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineHead {
    #[default]
    None,
    Arrow,
    Circle,
}

/// Horizontal text alignment within an item's bounding box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

/// Fixed text size classes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextSize {
    Small,
    #[default]
    Normal,
    Large,
}

/// Serialized form of a shape item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeProps {
    pub shape: ShapeKind,
    pub position: Position,
    pub size: crate::geometry::Size,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align_h_text: Option<TextAlign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_size: Option<TextSize>,
}

/// Serialized form of a line item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineProps {
    pub points: Vec<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head_start: Option<LineHead>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head_end: Option<LineHead>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align_h_text: Option<TextAlign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_size: Option<TextSize>,
}

/// Tagged union persisted in documents and carried on the clipboard.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ItemProps {
    Shape(ShapeProps),
    Line(LineProps),
}

impl ItemProps {
    /// Same props shifted by `delta`. Pasting uses this for cascading.
    pub fn translated(&self, delta: Position) -> Self {
        match self {
            ItemProps::Shape(props) => {
                let mut props = props.clone();
                props.position = props.position.translated(delta);
                ItemProps::Shape(props)
            }
            ItemProps::Line(props) => {
                let mut props = props.clone();
                for point in &mut props.points {
                    *point = point.translated(delta);
                }
                ItemProps::Line(props)
            }
        }
    }
}

/// Partial style update sent from a property panel or the text overlay.
/// Fields inapplicable to the target variant are skipped.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ItemPatch {
    pub stroke: Option<String>,
    pub fill: Option<String>,
    pub text: Option<String>,
    pub align_h_text: Option<TextAlign>,
    pub text_size: Option<TextSize>,
    pub head_start: Option<LineHead>,
    pub head_end: Option<LineHead>,
}

/// Style controls a property panel should expose for an item, in display
/// order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StyleKey {
    TextAlignH,
    TextSize,
    Stroke,
    Fill,
    HeadStart,
    HeadEnd,
}

// ============================================================================
// Common item state
// ============================================================================

/// Fields shared by every item variant.
#[derive(Clone, Debug)]
pub(crate) struct ItemBase {
    pub id: ItemId,
    pub seed: u64,
    pub stroke: Option<String>,
    pub text: Option<String>,
    pub align_h_text: TextAlign,
    pub text_size: TextSize,
    /// Cleared while the item's text is under live edit in the overlay.
    pub text_visible: bool,
}

impl ItemBase {
    pub(crate) fn new() -> Self {
        Self {
            id: next_item_id(),
            seed: new_seed(),
            stroke: Some(STROKE_COLORS[0].to_string()),
            text: None,
            align_h_text: TextAlign::default(),
            text_size: TextSize::default(),
            text_visible: true,
        }
    }
}

// ============================================================================
// Item
// ============================================================================

/// A drawable scene entity.
#[derive(Clone, Debug)]
pub enum Item {
    Shape(Shape),
    Line(Line),
}

impl Item {
    /// Construct the right variant from a serialized record. Fails with
    /// [`Error::Precondition`] when a line record does not carry exactly two
    /// points.
    pub fn from_props(props: &ItemProps) -> BoardResult<Item> {
        match props {
            ItemProps::Shape(shape) => Ok(Item::Shape(Shape::new(shape))),
            ItemProps::Line(line) => Ok(Item::Line(Line::new(line)?)),
        }
    }

    /// Deep value snapshot; shares no state with the live item.
    pub fn to_props(&self) -> ItemProps {
        match self {
            Item::Shape(shape) => ItemProps::Shape(shape.to_props()),
            Item::Line(line) => ItemProps::Line(line.to_props()),
        }
    }

    pub fn id(&self) -> ItemId {
        self.base().id
    }

    pub fn seed(&self) -> u64 {
        self.base().seed
    }

    pub fn is_line(&self) -> bool {
        matches!(self, Item::Line(_))
    }

    /// True if the point hits the item body or any control handle.
    pub fn hit_test(&self, point: Position) -> bool {
        match self {
            Item::Shape(shape) => shape.hit_test(point),
            Item::Line(line) => line.hit_test(point),
        }
    }

    /// Index of the control handle under `point`, if any. Pure query.
    pub fn control_at(&self, point: Position) -> Option<usize> {
        match self {
            Item::Shape(shape) => shape.control_at(point),
            Item::Line(line) => line.control_at(point),
        }
    }

    pub fn bounding(&self) -> Bounding {
        match self {
            Item::Shape(shape) => shape.bounding(),
            Item::Line(line) => line.bounding(),
        }
    }

    /// Strict containment of this item's bounding box inside `outer`.
    pub fn contained_by(&self, outer: &Bounding) -> bool {
        outer.strictly_contains(&self.bounding())
    }

    /// How far this item's hittable area can reach beyond its bounding box;
    /// used to pad spatial-index envelopes.
    pub fn hit_padding(&self) -> f32 {
        match self {
            Item::Shape(_) => crate::constants::HIT_PADDING,
            Item::Line(line) => line.hit_padding(),
        }
    }

    pub fn move_by(&mut self, delta: Position) {
        match self {
            Item::Shape(shape) => shape.move_by(delta),
            Item::Line(line) => line.move_by(delta),
        }
    }

    /// Reshape from a drag. `handle` is the active control handle, or `None`
    /// for a fresh insert drag, in which case the drag's bounding box (shape)
    /// or start/current points (line) replace the geometry wholesale.
    pub fn resize(&mut self, event: &DragEvent, handle: Option<usize>) {
        match self {
            Item::Shape(shape) => shape.resize(event, handle),
            Item::Line(line) => line.resize(event, handle),
        }
    }

    /// False for accidental zero-size inserts, which get discarded on
    /// pointer release.
    pub fn min_insert_size_reached(&self) -> bool {
        match self {
            Item::Shape(shape) => shape.min_insert_size_reached(),
            Item::Line(line) => line.min_insert_size_reached(),
        }
    }

    pub fn render(&self, surface: &mut dyn Surface, sketch: &mut dyn SketchBackend) {
        match self {
            Item::Shape(shape) => shape.render(surface, sketch),
            Item::Line(line) => line.render(surface, sketch),
        }
    }

    /// Style controls applicable to this item, in display order.
    pub fn style_keys(&self) -> Vec<StyleKey> {
        let mut keys = if self.text_disabled() {
            vec![StyleKey::Stroke]
        } else {
            vec![StyleKey::TextAlignH, StyleKey::TextSize, StyleKey::Stroke]
        };
        match self {
            Item::Shape(shape) => {
                if shape.kind() != ShapeKind::Text {
                    keys.push(StyleKey::Fill);
                }
            }
            Item::Line(_) => {
                keys.push(StyleKey::HeadStart);
                keys.push(StyleKey::HeadEnd);
            }
        }
        keys
    }

    /// Apply a partial style update. Fields the variant does not support are
    /// logged and skipped so a stray panel update cannot corrupt an item.
    pub fn apply_patch(&mut self, patch: &ItemPatch) {
        {
            let base = self.base_mut();
            if let Some(stroke) = &patch.stroke {
                base.stroke = Some(stroke.clone());
            }
            if let Some(text) = &patch.text {
                base.text = Some(text.clone());
            }
            if let Some(align) = patch.align_h_text {
                base.align_h_text = align;
            }
            if let Some(size) = patch.text_size {
                base.text_size = size;
            }
        }
        match self {
            Item::Shape(shape) => {
                if patch.head_start.is_some() || patch.head_end.is_some() {
                    tracing::debug!("ignoring line head patch on a shape item");
                }
                if let Some(fill) = &patch.fill {
                    shape.set_fill(Some(fill.clone()));
                }
            }
            Item::Line(line) => {
                if patch.fill.is_some() {
                    tracing::debug!("ignoring fill patch on a line item");
                }
                if let Some(head) = patch.head_start {
                    line.set_head_start(head);
                }
                if let Some(head) = patch.head_end {
                    line.set_head_end(head);
                }
            }
        }
    }

    /// Lines never render text.
    pub fn text_disabled(&self) -> bool {
        self.is_line()
    }

    pub fn text(&self) -> Option<&str> {
        self.base().text.as_deref()
    }

    pub fn set_text(&mut self, text: String) {
        self.base_mut().text = Some(text);
    }

    /// Suppress or restore text rendering while the overlay owns the text.
    pub fn set_text_visible(&mut self, shown: bool) {
        self.base_mut().text_visible = shown;
    }

    pub fn stroke(&self) -> Option<&str> {
        self.base().stroke.as_deref()
    }

    pub fn align_h_text(&self) -> TextAlign {
        self.base().align_h_text
    }

    pub fn text_size(&self) -> TextSize {
        self.base().text_size
    }

    fn base(&self) -> &ItemBase {
        match self {
            Item::Shape(shape) => shape.base(),
            Item::Line(line) => line.base(),
        }
    }

    fn base_mut(&mut self) -> &mut ItemBase {
        match self {
            Item::Shape(shape) => shape.base_mut(),
            Item::Line(line) => line.base_mut(),
        }
    }
}

/// Draw an item's text into its bounding box, if any should be shown.
pub(crate) fn render_text(base: &ItemBase, disabled: bool, bounds: Bounding, surface: &mut dyn Surface) {
    if !base.text_visible || disabled {
        return;
    }
    let metrics = crate::constants::font_metrics(base.text_size);
    let style = crate::render::TextStyle {
        color: base.stroke.clone().unwrap_or_else(|| "#000000".to_string()),
        font: crate::constants::TEXT_FONT.to_string(),
        size: metrics.size,
        line_height: metrics.line_height,
        align: base.align_h_text,
    };
    surface.draw_text(base.text.as_deref().unwrap_or(""), bounds, &style);
}

/// Construct a line from a props record, surfacing the exact-two-points
/// precondition as a crate error.
pub(crate) fn line_points(points: &[Position]) -> BoardResult<[Position; 2]> {
    match points {
        [a, b] => Ok([*a, *b]),
        other => Err(Error::Precondition(format!(
            "lines must have exactly 2 points, got {}",
            other.len()
        ))),
    }
}
