//! Control-handle geometry and overlay painting.
//!
//! Hitbox geometry and painted geometry intentionally differ slightly (the
//! hitboxes are a touch larger than the drawn squares); both are fixed so the
//! debug hit-map stays reproducible for visual regression tests.

use crate::constants::{CONTROL_HIT_SIZE, CONTROL_PADDING, CONTROL_SIZE, SELECTION_COLOR};
use crate::geometry::{Bounding, Position, Size, point_in_rect};
use crate::item::Item;
use crate::render::Surface;

/// Shape corner handle indices.
pub const TOP_LEFT: usize = 0;
pub const TOP_RIGHT: usize = 1;
pub const BOTTOM_RIGHT: usize = 2;
pub const BOTTOM_LEFT: usize = 3;

/// Corner handle hitbox test for a shape's box. Handles sit just outside the
/// top/left edges and overlap the bottom/right corner.
pub(crate) fn shape_handle_at(point: Position, position: Position, size: Size) -> Option<usize> {
    let hit = Size::new(CONTROL_HIT_SIZE, CONTROL_HIT_SIZE);
    let pad = CONTROL_HIT_SIZE - 1.0;
    let Position { x, y } = position;
    let Size { width, height } = size;
    if point_in_rect(point, Position::new(x - pad, y - pad), hit) {
        return Some(TOP_LEFT);
    }
    if point_in_rect(point, Position::new(x + width - 2.0, y - pad), hit) {
        return Some(TOP_RIGHT);
    }
    if point_in_rect(point, Position::new(x + width - 2.0, y + height - 2.0), hit) {
        return Some(BOTTOM_RIGHT);
    }
    if point_in_rect(point, Position::new(x - pad, y + height - 2.0), hit) {
        return Some(BOTTOM_LEFT);
    }
    None
}

/// Point handle hitbox test for a line's endpoints; one handle per point.
pub(crate) fn line_handle_at(point: Position, points: &[Position]) -> Option<usize> {
    let hit = Size::new(CONTROL_HIT_SIZE, CONTROL_HIT_SIZE);
    let pad = CONTROL_PADDING * 1.5;
    points.iter().position(|p| {
        point_in_rect(point, Position::new(p.x - pad, p.y - pad), hit)
    })
}

/// Stroke a selection frame padded around `bounding`; dashed for the union
/// box of a multi-selection.
pub fn render_selection_rect(surface: &mut dyn Surface, bounding: Bounding, dashed: bool) {
    surface.stroke_round_rect(
        bounding.inflated(CONTROL_PADDING),
        0.0,
        SELECTION_COLOR,
        dashed,
    );
}

/// Paint the control handles for a selected item.
pub fn render_handles(surface: &mut dyn Surface, item: &Item) {
    match item {
        Item::Shape(_) => {
            let Bounding { position, size } = item.bounding();
            render_selection_rect(surface, item.bounding(), false);
            let span = CONTROL_PADDING * 2.0;
            render_corner(surface, position.x, position.y);
            render_corner(surface, position.x + size.width + span, position.y);
            render_corner(
                surface,
                position.x + size.width + span,
                position.y + size.height + span,
            );
            render_corner(surface, position.x, position.y + size.height + span);
        }
        Item::Line(line) => {
            for point in line.points() {
                render_corner(surface, point.x + CONTROL_PADDING, point.y + CONTROL_PADDING);
            }
        }
    }
}

fn render_corner(surface: &mut dyn Surface, x: f32, y: f32) {
    let bounds = Bounding::new(
        Position::new(x - CONTROL_PADDING * 2.0 - 0.5, y - CONTROL_PADDING * 2.0 - 0.5),
        Size::new(CONTROL_SIZE, CONTROL_SIZE),
    );
    surface.fill_round_rect(bounds, 2.0, "#FFFFFF");
    surface.stroke_round_rect(bounds, 2.0, SELECTION_COLOR, false);
}
