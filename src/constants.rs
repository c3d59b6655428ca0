//! Crate-wide constants.
//!
//! Centralizes magic numbers and style values so the item model, the scene
//! renderer, and the controller agree on geometry and defaults.

use crate::item::TextSize;

// ============================================================================
// Rendering
// ============================================================================

/// Internal resolution multiplier applied on top of the view scale.
pub const RESOLUTION_SCALE: f32 = 2.0;

/// Fill weight passed to the sketch backend for every item.
pub const SKETCH_FILL_WEIGHT: f32 = 3.0;

/// Font family used for item text.
pub const TEXT_FONT: &str = "Delius";

/// Length of arrow-head flanks on line items.
pub const ARROW_HEAD_LENGTH: f32 = 10.0;

/// Diameter of circle head decorations on line items.
pub const CIRCLE_HEAD_DIAMETER: f32 = 10.0;

// ============================================================================
// Colors
// ============================================================================

/// Shape fill palette; index 0 is the default fill.
pub const FILL_COLORS: [&str; 5] = ["#E9F7EF", "#EAF6FF", "#FDEDEC", "#FFF9E6", "#EEE"];

/// Stroke palette; index 0 is the default stroke, index 4 the text-shape stroke.
pub const STROKE_COLORS: [&str; 5] = ["#27AE60", "#2980B9", "#C0392B", "#F1C40F", "#2c3e50"];

/// Accent color for selection boxes, control handles, and the marquee stroke.
pub const SELECTION_COLOR: &str = "#16a085";

/// Marquee interior fill while a selection drag is in progress.
pub const MARQUEE_FILL: &str = "rgba(22, 160, 133, 0.06)";

// ============================================================================
// Control handles
// ============================================================================

/// Rendered size of a control handle square.
pub const CONTROL_SIZE: f32 = 10.0;

/// Padding between an item's bounding box and its selection frame.
pub const CONTROL_PADDING: f32 = 4.5;

/// Side length of a control handle hitbox.
pub const CONTROL_HIT_SIZE: f32 = CONTROL_SIZE + 2.0;

/// Reach of handle hitboxes beyond an item's bounding box; also the margin
/// scanned by the debug hit-map.
pub const HIT_PADDING: f32 = 15.0;

// ============================================================================
// Interaction
// ============================================================================

/// Items smaller than this on both axes are discarded on insert release.
pub const MIN_INSERT_SIZE: f32 = 5.0;

/// Paste offset per cascading paste, on both axes.
pub const PASTE_OFFSET: f32 = 20.0;

/// Zoom step applied per zoom-in/zoom-out intent.
pub const ZOOM_STEP: f32 = 0.25;

/// Minimum view scale.
pub const MIN_SCALE: f32 = 0.25;

/// Maximum view scale.
pub const MAX_SCALE: f32 = 4.0;

// ============================================================================
// Text metrics
// ============================================================================

/// Font metrics for one text size class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    pub size: f32,
    pub line_height: f32,
}

/// Font metrics for the three fixed text size classes.
pub fn font_metrics(size: TextSize) -> FontMetrics {
    match size {
        TextSize::Small => FontMetrics { size: 13.0, line_height: 18.5 },
        TextSize::Normal => FontMetrics { size: 18.0, line_height: 22.5 },
        TextSize::Large => FontMetrics { size: 25.0, line_height: 32.0 },
    }
}
