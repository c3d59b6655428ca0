//! Test helpers and builders for reducing boilerplate in tests.
//!
//! `TestBoard` wires a controller over recording render backends and an
//! in-memory text overlay, keeping handles to both so tests can inspect the
//! draw log and drive text editing.

use std::cell::RefCell;
use std::rc::Rc;

use doodleboard::controller::{Controller, ControllerEvent, ControllerEventKind};
use doodleboard::geometry::{Position, Size};
use doodleboard::item::{ItemProps, LineProps, ShapeKind, ShapeProps};
use doodleboard::overlay::InMemoryOverlay;
use doodleboard::render::{DrawLog, RecordingSketch, RecordingSurface, draw_log};
use doodleboard::scene::{Document, Scene};

pub const VIEWPORT: Size = Size { width: 800.0, height: 600.0 };

/// Fully-wired controller over recording backends.
pub struct TestBoard {
    pub controller: Controller,
    pub log: DrawLog,
    pub overlay: Rc<RefCell<InMemoryOverlay>>,
}

/// Builder for boards pre-populated with items.
///
/// # Example
/// ```ignore
/// let mut board = TestBoardBuilder::new()
///     .with_shape(ShapeKind::Rect, 100.0, 100.0, 50.0, 40.0)
///     .build();
/// board.controller.pointer_down(Position::new(120.0, 120.0));
/// ```
#[derive(Default)]
pub struct TestBoardBuilder {
    items: Vec<ItemProps>,
}

impl TestBoardBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_shape(mut self, kind: ShapeKind, x: f32, y: f32, width: f32, height: f32) -> Self {
        self.items.push(shape_props(kind, x, y, width, height));
        self
    }

    pub fn with_line(mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        self.items.push(line_props(x1, y1, x2, y2));
        self
    }

    pub fn build(self) -> TestBoard {
        let log = draw_log();
        let scene = Scene::new(
            Box::new(RecordingSurface::new(log.clone())),
            Box::new(RecordingSketch::new(log.clone())),
            VIEWPORT,
        );
        let overlay = Rc::new(RefCell::new(InMemoryOverlay::new()));
        let mut controller = Controller::new(scene, Box::new(overlay.clone()));
        if !self.items.is_empty() {
            controller.set_document(&Document {
                offset: Position::ZERO,
                items: self.items,
            });
        }
        log.borrow_mut().clear();
        TestBoard { controller, log, overlay }
    }
}

/// Build a recording scene with no controller on top.
pub fn recording_scene() -> (Scene, DrawLog) {
    let log = draw_log();
    let scene = Scene::new(
        Box::new(RecordingSurface::new(log.clone())),
        Box::new(RecordingSketch::new(log.clone())),
        VIEWPORT,
    );
    (scene, log)
}

pub fn shape_props(kind: ShapeKind, x: f32, y: f32, width: f32, height: f32) -> ItemProps {
    ItemProps::Shape(ShapeProps {
        shape: kind,
        position: Position::new(x, y),
        size: Size::new(width, height),
        fill: None,
        stroke: None,
        text: None,
        align_h_text: None,
        text_size: None,
    })
}

pub fn line_props(x1: f32, y1: f32, x2: f32, y2: f32) -> ItemProps {
    ItemProps::Line(LineProps {
        points: vec![Position::new(x1, y1), Position::new(x2, y2)],
        head_start: None,
        head_end: None,
        stroke: None,
        text: None,
        align_h_text: None,
        text_size: None,
    })
}

/// Collect every event of one kind into a shared vec for later assertions.
pub fn record_events(
    controller: &mut Controller,
    kind: ControllerEventKind,
) -> Rc<RefCell<Vec<ControllerEvent>>> {
    let recorded = Rc::new(RefCell::new(Vec::new()));
    let sink = recorded.clone();
    controller.events().subscribe(kind, move |event| {
        sink.borrow_mut().push(event.clone());
    });
    recorded
}

/// Click (press and release) at a client position.
pub fn click(controller: &mut Controller, x: f32, y: f32) {
    controller.pointer_down(Position::new(x, y));
    controller.pointer_up(Position::new(x, y));
}

/// Press, drag, and release.
pub fn drag(controller: &mut Controller, from: (f32, f32), to: (f32, f32)) {
    controller.pointer_down(Position::new(from.0, from.1));
    controller.pointer_move(Position::new(to.0, to.1));
    controller.pointer_up(Position::new(to.0, to.1));
}
