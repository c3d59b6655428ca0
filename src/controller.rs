//! The interaction state machine.
//!
//! Owns the scene, the input trackers, the clipboard, and the text overlay,
//! and interprets device events according to the current tool. Presentation
//! layers subscribe to [`ControllerEvent`]s instead of polling; the
//! persistence layer subscribes to `DocumentChanged` and is the only writer.
//!
//! Mode transitions run through [`Controller::set_mode`], which performs its
//! side effects in a fixed order: stop any active text edit, repaint under
//! the old tool, clear the selection when entering insert, notify
//! subscribers, assign. Callers never replicate pieces of that sequence.

use tracing::warn;

use crate::clipboard::Clipboard;
use crate::constants::{MAX_SCALE, MIN_SCALE, STROKE_COLORS, ZOOM_STEP};
use crate::events::{Event, EventChannel};
use crate::geometry::{Position, Size, point_in_rect};
use crate::input::{Key, Keyboard, Modifiers, Pointer, PointerEvent};
use crate::item::{Item, ItemPatch, ItemProps, LineProps, ShapeKind, ShapeProps};
use crate::overlay::{TextEditSession, TextOverlay};
use crate::scene::{Document, Marquee, Scene};

/// Kind of item an insert drag will create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertKind {
    Rect,
    Circle,
    Text,
    Line,
}

/// The tool mode. Resize carries the active control handle so hit queries
/// stay pure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    /// Pan-only.
    Normal,
    /// A control handle of the sole selected item is being dragged.
    Resize { handle: usize },
    /// The next pointer drag places a new item.
    Insert { kind: InsertKind },
    /// Idle with no selection, or a marquee drag in progress.
    Selecting,
    /// Idle with at least one item selected.
    Selected,
}

/// Cursor hint for the hosting surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorStyle {
    Default,
    Crosshair,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

/// Notifications published by the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum ControllerEvent {
    /// Tool mode changed; emitted before the new mode is assigned.
    Mode(Tool),
    /// Selection changed. Carries the sole selected item's props, or `None`
    /// for an empty or multi-selection.
    Selected(Option<ItemProps>),
    /// A style patch landed on the representative selected item.
    UpdatedItem(ItemProps),
    /// A persistable mutation happened; carries the full document snapshot.
    DocumentChanged(Document),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControllerEventKind {
    Mode,
    Selected,
    UpdatedItem,
    DocumentChanged,
}

impl Event for ControllerEvent {
    type Kind = ControllerEventKind;

    fn kind(&self) -> ControllerEventKind {
        match self {
            ControllerEvent::Mode(_) => ControllerEventKind::Mode,
            ControllerEvent::Selected(_) => ControllerEventKind::Selected,
            ControllerEvent::UpdatedItem(_) => ControllerEventKind::UpdatedItem,
            ControllerEvent::DocumentChanged(_) => ControllerEventKind::DocumentChanged,
        }
    }
}

pub struct Controller {
    scene: Scene,
    pointer: Pointer,
    keyboard: Keyboard,
    clipboard: Clipboard,
    overlay: Box<dyn TextOverlay>,
    events: EventChannel<ControllerEvent>,
    selection: Vec<usize>,
    tool: Tool,
    scale: f32,
}

impl Controller {
    pub fn new(scene: Scene, overlay: Box<dyn TextOverlay>) -> Self {
        Self {
            scene,
            pointer: Pointer::new(),
            keyboard: Keyboard::new(),
            clipboard: Clipboard::new(),
            overlay,
            events: EventChannel::new(),
            selection: Vec::new(),
            tool: Tool::Selecting,
            scale: 1.0,
        }
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn selection(&self) -> &[usize] {
        &self.selection
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn events(&mut self) -> &mut EventChannel<ControllerEvent> {
        &mut self.events
    }

    pub fn document(&self) -> Document {
        self.scene.to_document()
    }

    pub fn cursor(&self) -> CursorStyle {
        match self.tool {
            Tool::Normal | Tool::Selecting | Tool::Selected => CursorStyle::Default,
            Tool::Resize { .. } | Tool::Insert { .. } => CursorStyle::Crosshair,
        }
    }

    // ========================================================================
    // Mode and selection
    // ========================================================================

    /// Atomic mode transition. Side-effect order is load-bearing: the repaint
    /// happens under the old tool before insert clears the selection.
    pub fn set_mode(&mut self, tool: Tool) {
        self.stop_text_edit();
        self.render();
        if matches!(tool, Tool::Insert { .. }) {
            self.set_selection(Vec::new());
        }
        self.events.emit(&ControllerEvent::Mode(tool));
        self.tool = tool;
    }

    /// Replaces the selection and notifies subscribers. The representative is
    /// resolved before the notification fires so subscribers observe it
    /// consistently with the new selection.
    pub fn set_selection(&mut self, indices: Vec<usize>) {
        let representative = if indices.len() == 1 {
            indices.first().and_then(|&i| self.scene.item(i)).map(Item::to_props)
        } else {
            None
        };
        self.events.emit(&ControllerEvent::Selected(representative));
        self.selection = indices;
    }

    // ========================================================================
    // UI intents
    // ========================================================================

    pub fn insert(&mut self, kind: InsertKind) {
        self.set_mode(Tool::Insert { kind });
    }

    pub fn normal(&mut self) {
        self.set_mode(Tool::Normal);
    }

    pub fn select(&mut self) {
        self.set_mode(Tool::Selecting);
    }

    /// Empties the board and resets the pan offset.
    pub fn clear(&mut self) {
        self.set_document(&Document::default());
    }

    pub fn zoom(&mut self, direction: ZoomDirection) {
        let next = match direction {
            ZoomDirection::In => self.scale + ZOOM_STEP,
            ZoomDirection::Out => self.scale - ZOOM_STEP,
        };
        self.scale = next.clamp(MIN_SCALE, MAX_SCALE);
        self.render();
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.scene.set_debug(debug);
        self.render();
    }

    /// Loads a document wholesale. A document failing validation is logged
    /// and replaced by an empty board so the session stays alive.
    pub fn set_document(&mut self, document: &Document) {
        self.set_selection(Vec::new());
        // Discard any edit session without flushing into the outgoing items.
        let _ = self.overlay.end();
        if let Err(error) = self.scene.set_document(document) {
            warn!(%error, "invalid document, falling back to an empty board");
            self.scene.clear();
        }
        self.did_update();
        self.render();
    }

    /// Applies a style patch to every selected item and the live overlay, then
    /// republishes the representative item.
    pub fn set_selected_item_props(&mut self, patch: &ItemPatch) {
        self.overlay.apply_style(patch);
        self.scene.set_style(&self.selection, patch);
        if let Some(props) = self
            .selection
            .first()
            .and_then(|&i| self.scene.item(i))
            .map(Item::to_props)
        {
            self.events.emit(&ControllerEvent::UpdatedItem(props));
        }
        self.did_update();
        self.render();
    }

    /// Deletes the current selection; the board drops back to `Selecting`.
    pub fn delete_selection(&mut self) {
        let doomed = std::mem::take(&mut self.selection);
        self.set_selection(Vec::new());
        self.scene.delete_items(&doomed);
        self.set_mode(Tool::Selecting);
        self.did_update();
    }

    // ========================================================================
    // Device events
    // ========================================================================

    pub fn pointer_down(&mut self, client: Position) {
        let position = self.canvas_position(client);
        let event = self.pointer.track_down(position);
        self.handle_down(&event);
        self.render();
    }

    pub fn pointer_move(&mut self, client: Position) {
        let position = self.canvas_position(client);
        let event = self.pointer.track_move(position);
        if self.overlay.is_active() {
            self.render();
            return;
        }

        match self.tool {
            Tool::Insert { .. } if event.dragging => {
                if let Some(item) = self.scene.last_item_mut() {
                    item.resize(&event, None);
                }
            }
            Tool::Resize { handle } if event.dragging && !self.selection.is_empty() => {
                let index = self.selection[0];
                if let Some(item) = self.scene.item_mut(index) {
                    item.resize(&event, Some(handle));
                }
            }
            _ if event.dragging => {
                if self.selection.is_empty() || self.tool == Tool::Selecting {
                    if self.tool == Tool::Normal {
                        self.move_offset_by(event.delta);
                    } else if self.tool == Tool::Selecting {
                        let contained = self.scene.items_in_rect(event.dragged_bounding);
                        self.set_selection(contained);
                    }
                } else {
                    self.scene.move_items_by(&self.selection, event.delta);
                }
            }
            _ => {}
        }
        self.render();
    }

    pub fn pointer_up(&mut self, client: Position) {
        let position = self.canvas_position(client);
        self.pointer.track_up(position);

        match self.tool {
            Tool::Insert { .. } => {
                self.set_mode(Tool::Selecting);
                let survived = self
                    .scene
                    .items()
                    .last()
                    .is_some_and(Item::min_insert_size_reached);
                if !survived {
                    self.scene.pop();
                    self.render();
                    return;
                }
                self.set_selection(vec![self.scene.len() - 1]);
                self.set_mode(Tool::Selected);
            }
            Tool::Resize { .. } => self.set_mode(Tool::Selecting),
            _ => {}
        }

        self.did_update();
        self.render();
    }

    /// Double-click on a sole selected non-line item opens text editing.
    pub fn double_click(&mut self, _client: Position) {
        if self.selection.len() == 1 {
            self.begin_text_edit(self.selection[0]);
        }
        self.render();
    }

    /// Pans by the negated wheel delta. Returns true so hosts suppress the
    /// default scroll.
    pub fn wheel(&mut self, delta: Position) -> bool {
        self.move_offset_by(Position::new(-delta.x, -delta.y));
        self.render();
        true
    }

    /// Returns true when the key was consumed as a shortcut.
    pub fn key_down(&mut self, key: &Key, modifiers: Modifiers) -> bool {
        self.keyboard.track(modifiers);
        if self.overlay.is_active() {
            return false;
        }
        let mut consumed = false;
        if *key == Key::KeyC && modifiers.ctrl {
            self.clipboard
                .copy(self.selection.iter().filter_map(|&i| self.scene.item(i)));
            consumed = true;
        }
        if *key == Key::KeyV && modifiers.ctrl {
            self.paste();
            consumed = true;
        }
        self.render();
        consumed
    }

    pub fn key_up(&mut self, key: &Key, modifiers: Modifiers) {
        self.keyboard.track(modifiers);
        if self.overlay.is_active() {
            return;
        }
        match key {
            Key::KeyC => self.insert(InsertKind::Circle),
            Key::KeyR => self.insert(InsertKind::Rect),
            Key::KeyL => self.insert(InsertKind::Line),
            Key::Escape => self.set_mode(Tool::Selected),
            Key::Backspace => self.delete_selection(),
            _ => {}
        }
        self.render();
    }

    // ========================================================================
    // Internals
    // ========================================================================

    pub fn render(&mut self) {
        let show_marquee = self.tool == Tool::Selecting
            || matches!(self.tool, Tool::Insert { kind: InsertKind::Text });
        let marquee = if show_marquee {
            self.pointer.drag_bounding().map(|bounding| Marquee {
                bounding,
                fill: self.tool == Tool::Selecting,
            })
        } else {
            None
        };
        self.scene.render(self.scale, &self.selection, marquee);
    }

    fn handle_down(&mut self, event: &PointerEvent) {
        if let Tool::Insert { kind } = self.tool {
            self.insert_item_at(kind, event.position);
            return;
        }

        if let Some(&first) = self.selection.first() {
            if let Some(handle) = self
                .scene
                .item(first)
                .and_then(|item| item.control_at(event.position))
            {
                self.set_mode(Tool::Resize { handle });
            }
        }

        self.update_selection_from(event);

        let first = self.selection.first().copied();
        let editing_first = first
            .and_then(|i| self.scene.item(i))
            .is_some_and(|item| self.overlay.active_item() == Some(item.id()));
        if self.selection.len() > 1 || first.is_none() || !editing_first {
            self.stop_text_edit();
        }

        if first.is_some() && self.tool == Tool::Selecting {
            self.set_mode(Tool::Selected);
        }
        if first.is_none() && self.tool == Tool::Selected {
            self.set_mode(Tool::Selecting);
        }
    }

    /// Re-evaluates the selection on pointer-down: shift-click toggles
    /// membership, a plain click replaces the selection unless it lands
    /// inside a multi-selection's union box (preserved for group drags).
    fn update_selection_from(&mut self, event: &PointerEvent) {
        if self.keyboard.modifiers().shift {
            match self.scene.item_at_point(event.position) {
                Some(hit) if self.selection.contains(&hit) => {
                    let next = self
                        .selection
                        .iter()
                        .copied()
                        .filter(|&index| index != hit)
                        .collect();
                    self.set_selection(next);
                }
                Some(hit) => {
                    let mut next = self.selection.clone();
                    next.push(hit);
                    self.set_selection(next);
                }
                None => {}
            }
        } else {
            let inside_union = self.selection.len() > 1
                && self
                    .scene
                    .bounding_of(&self.selection)
                    .is_some_and(|b| point_in_rect(event.position, b.position, b.size));
            if !inside_union {
                let next = self.scene.item_at_point(event.position).into_iter().collect();
                self.set_selection(next);
            }
        }
    }

    fn insert_item_at(&mut self, kind: InsertKind, position: Position) {
        let props = match kind {
            InsertKind::Line => ItemProps::Line(LineProps {
                points: vec![position, position],
                head_start: None,
                head_end: None,
                stroke: None,
                text: None,
                align_h_text: None,
                text_size: None,
            }),
            InsertKind::Rect | InsertKind::Circle | InsertKind::Text => {
                let shape = match kind {
                    InsertKind::Circle => ShapeKind::Circle,
                    InsertKind::Text => ShapeKind::Text,
                    _ => ShapeKind::Rect,
                };
                let stroke_index = if kind == InsertKind::Text { 4 } else { 0 };
                ItemProps::Shape(ShapeProps {
                    shape,
                    position,
                    size: Size::new(0.0, 0.0),
                    fill: None,
                    stroke: Some(STROKE_COLORS[stroke_index].to_string()),
                    text: None,
                    align_h_text: None,
                    text_size: None,
                })
            }
        };
        match Item::from_props(&props) {
            Ok(item) => {
                self.scene.push(item);
            }
            Err(error) => warn!(%error, "could not create inserted item"),
        }
    }

    fn begin_text_edit(&mut self, index: usize) {
        let Some(item) = self.scene.item(index) else {
            return;
        };
        if item.is_line() || self.overlay.active_item() == Some(item.id()) {
            return;
        }
        let session = TextEditSession {
            item: item.id(),
            bounds: item.bounding(),
            text: item.text().unwrap_or("").to_owned(),
            stroke: item.stroke().map(str::to_owned),
            align: item.align_h_text(),
            text_size: item.text_size(),
        };
        self.overlay.begin(session);
        if let Some(item) = self.scene.item_mut(index) {
            item.set_text_visible(false);
        }
    }

    /// Ends any active edit session and flushes its text back into the item.
    fn stop_text_edit(&mut self) {
        let Some(result) = self.overlay.end() else {
            return;
        };
        let Some(index) = self
            .scene
            .items()
            .iter()
            .position(|item| item.id() == result.item)
        else {
            return;
        };
        if let Some(item) = self.scene.item_mut(index) {
            item.set_text(result.text);
            item.set_text_visible(true);
        }
        self.did_update();
    }

    fn paste(&mut self) {
        let mut pasted = Vec::new();
        for props in self.clipboard.paste() {
            match Item::from_props(&props) {
                Ok(item) => pasted.push(self.scene.push(item)),
                Err(error) => warn!(%error, "skipping invalid clipboard record"),
            }
        }
        self.set_selection(pasted);
    }

    fn move_offset_by(&mut self, delta: Position) {
        self.scene.move_offset_by(delta);
        self.did_update();
    }

    fn did_update(&mut self) {
        let document = self.scene.to_document();
        self.events.emit(&ControllerEvent::DocumentChanged(document));
    }

    fn canvas_position(&self, client: Position) -> Position {
        let origin = self.scene.surface_origin();
        let offset = self.scene.offset();
        Position::new(
            (client.x - origin.x) / self.scale - offset.x,
            (client.y - origin.y) / self.scale - offset.y,
        )
    }
}
