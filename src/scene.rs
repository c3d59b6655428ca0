//! Scene graph: owns the items, the canvas offset, and the render pipeline.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{
    HIT_PADDING, MARQUEE_FILL, RESOLUTION_SCALE, SELECTION_COLOR,
};
use crate::error::BoardResult;
use crate::geometry::{Bounding, Position, Size};
use crate::item::{controls, Item, ItemId, ItemPatch, ItemProps};
use crate::render::{SketchBackend, Surface};
use crate::spatial::SpatialIndex;

/// Serialized scene state, the unit of persistence and clipboard-free
/// import/export.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Document {
    pub offset: Position,
    pub items: Vec<ItemProps>,
}

/// Rubber-band rectangle painted over the items. Stroke always draws; the
/// fill is omitted for insert previews.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marquee {
    pub bounding: Bounding,
    pub fill: bool,
}

/// Items plus the viewport they draw into. The scene is the sole owner of the
/// pan offset; callers express panning as `move_offset_by`.
pub struct Scene {
    surface: Box<dyn Surface>,
    sketcher: Box<dyn SketchBackend>,
    items: Vec<Item>,
    offset: Position,
    viewport: Size,
    debug: bool,
    // None whenever items moved since the last query.
    index: Option<SpatialIndex>,
}

impl Scene {
    pub fn new(surface: Box<dyn Surface>, sketcher: Box<dyn SketchBackend>, viewport: Size) -> Self {
        Self {
            surface,
            sketcher,
            items: Vec::new(),
            offset: Position::ZERO,
            viewport,
            debug: false,
            index: None,
        }
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    pub fn offset(&self) -> Position {
        self.offset
    }

    /// Top-left of the drawing surface in client coordinates; used when
    /// converting device events into canvas space.
    pub fn surface_origin(&self) -> Position {
        self.surface.origin()
    }

    pub fn move_offset_by(&mut self, delta: Position) {
        self.offset = self.offset.translated(delta);
    }

    /// Replaces the whole scene from a document. Fails without touching
    /// anything if any item fails validation.
    pub fn set_document(&mut self, document: &Document) -> BoardResult<()> {
        let items = document
            .items
            .iter()
            .map(Item::from_props)
            .collect::<BoardResult<Vec<_>>>()?;
        debug!(items = items.len(), "loaded document into scene");
        self.items = items;
        self.offset = document.offset;
        self.index = None;
        Ok(())
    }

    pub fn to_document(&self) -> Document {
        Document {
            offset: self.offset,
            items: self.items.iter().map(Item::to_props).collect(),
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item_by_id(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn item(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub fn last_item_mut(&mut self) -> Option<&mut Item> {
        self.index = None;
        self.items.last_mut()
    }

    pub fn item_mut(&mut self, index: usize) -> Option<&mut Item> {
        self.index = None;
        self.items.get_mut(index)
    }

    /// Appends an item on top of the stack and returns its index.
    pub fn push(&mut self, item: Item) -> usize {
        self.index = None;
        self.items.push(item);
        self.items.len() - 1
    }

    pub fn pop(&mut self) -> Option<Item> {
        self.index = None;
        self.items.pop()
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.offset = Position::ZERO;
        self.index = None;
    }

    /// Topmost item whose body or control handles contain the point.
    pub fn item_at_point(&mut self, point: Position) -> Option<usize> {
        let candidates = self.index().candidates_at(point);
        self.items
            .iter()
            .enumerate()
            .rev()
            .find(|(_, item)| candidates.contains(&item.id()) && item.hit_test(point))
            .map(|(index, _)| index)
    }

    /// Indices of items fully inside the rectangle, topmost first. Items
    /// touching the boundary are excluded.
    pub fn items_in_rect(&mut self, rect: Bounding) -> Vec<usize> {
        let candidates = self.index().candidates_in(rect);
        self.items
            .iter()
            .enumerate()
            .rev()
            .filter(|(_, item)| candidates.contains(&item.id()) && item.contained_by(&rect))
            .map(|(index, _)| index)
            .collect()
    }

    pub fn bounding_of(&self, indices: &[usize]) -> Option<Bounding> {
        let mut selected = indices.iter().filter_map(|&i| self.items.get(i));
        let first = selected.next()?.bounding();
        Some(selected.fold(first, |acc, item| acc.union(item.bounding())))
    }

    /// Removes the given indices; survivors keep their relative order.
    pub fn delete_items(&mut self, indices: &[usize]) {
        let mut sorted: Vec<usize> = indices.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        for index in sorted.into_iter().rev() {
            if index < self.items.len() {
                self.items.remove(index);
            }
        }
        self.index = None;
    }

    pub fn move_items_by(&mut self, indices: &[usize], delta: Position) {
        for &index in indices {
            if let Some(item) = self.items.get_mut(index) {
                item.move_by(delta);
            }
        }
        self.index = None;
    }

    pub fn set_style(&mut self, indices: &[usize], patch: &ItemPatch) {
        for &index in indices {
            if let Some(item) = self.items.get_mut(index) {
                item.apply_patch(patch);
            }
        }
    }

    /// Full repaint. Draw order is items bottom-up, then the dashed union
    /// frame for multi-selections, then the marquee, then per-item handles.
    pub fn render(&mut self, view_scale: f32, selection: &[usize], marquee: Option<Marquee>) {
        let scale = RESOLUTION_SCALE * view_scale;
        self.surface.scale(scale);
        self.surface.clear(self.viewport);
        self.surface.translate(self.offset);

        if self.debug {
            for item in &self.items {
                render_hit_map(self.surface.as_mut(), item);
            }
        }

        for item in &self.items {
            item.render(self.surface.as_mut(), self.sketcher.as_mut());
        }

        if selection.len() > 1 {
            if let Some(union) = self.bounding_of(selection) {
                controls::render_selection_rect(self.surface.as_mut(), union, true);
            }
        }

        if let Some(marquee) = marquee {
            if marquee.fill {
                self.surface.fill_rect(marquee.bounding, MARQUEE_FILL);
            }
            self.surface.stroke_rect(marquee.bounding, SELECTION_COLOR, 1.0);
        }

        for &index in selection {
            if let Some(item) = self.items.get(index) {
                controls::render_handles(self.surface.as_mut(), item);
            }
        }

        self.surface.translate(Position::new(-self.offset.x, -self.offset.y));
        self.surface.scale(1.0 / scale);
    }

    fn index(&mut self) -> &SpatialIndex {
        let items = &self.items;
        self.index.get_or_insert_with(|| {
            SpatialIndex::from_envelopes(
                items
                    .iter()
                    .map(|item| (item.id(), item.bounding().inflated(item.hit_padding()))),
            )
        })
    }
}

/// Per-pixel visualization of the hit test, for tuning hit slack. Control
/// hits paint blue, body hits red.
fn render_hit_map(surface: &mut dyn Surface, item: &Item) {
    let probe = item.bounding().inflated(HIT_PADDING);
    let mut y = probe.position.y;
    while y < probe.bottom() {
        let mut x = probe.position.x;
        while x < probe.right() {
            let point = Position::new(x, y);
            let pixel = Bounding::new(point, Size::new(1.0, 1.0));
            if item.control_at(point).is_some() {
                surface.fill_rect(pixel, "#0000FF");
            } else if item.hit_test(point) {
                surface.fill_rect(pixel, "#FF0000");
            }
            x += 1.0;
        }
        y += 1.0;
    }
    surface.stroke_rect(item.bounding(), "#FF0000", 1.0);
    surface.stroke_rect(probe, "#FF0000", 1.0);
}
