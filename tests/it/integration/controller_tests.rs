//! Controller workflow tests: tool transitions, selection, insert, resize,
//! clipboard, zoom, and text editing.

use doodleboard::controller::{
    ControllerEvent, ControllerEventKind, CursorStyle, InsertKind, Tool, ZoomDirection,
};
use doodleboard::geometry::{Bounding, Position, Size};
use doodleboard::input::{Key, Modifiers};
use doodleboard::overlay::TextOverlay;
use doodleboard::item::{ItemPatch, ItemProps, ShapeKind};

use crate::helpers::{TestBoardBuilder, click, drag, record_events};

fn ctrl() -> Modifiers {
    Modifiers { ctrl: true, ..Modifiers::default() }
}

fn item_position(props: &ItemProps) -> Position {
    match props {
        ItemProps::Shape(shape) => shape.position,
        ItemProps::Line(line) => line.points[0],
    }
}

#[test]
fn test_click_selection_mode_scenario() {
    let mut board = TestBoardBuilder::new()
        .with_shape(ShapeKind::Rect, 100.0, 100.0, 50.0, 40.0)
        .build();
    assert_eq!(board.controller.tool(), Tool::Selecting);

    // Click over empty canvas: still selecting, nothing selected.
    click(&mut board.controller, 400.0, 400.0);
    assert_eq!(board.controller.tool(), Tool::Selecting);
    assert!(board.controller.selection().is_empty());

    // Click over the item: selected.
    click(&mut board.controller, 120.0, 120.0);
    assert_eq!(board.controller.tool(), Tool::Selected);
    assert_eq!(board.controller.selection(), &[0]);

    // Escape is a no-op here.
    board.controller.key_up(&Key::Escape, Modifiers::default());
    assert_eq!(board.controller.tool(), Tool::Selected);

    // Backspace deletes and drops back to selecting.
    board.controller.key_up(&Key::Backspace, Modifiers::default());
    assert!(board.controller.selection().is_empty());
    assert_eq!(board.controller.tool(), Tool::Selecting);
    assert!(board.controller.document().items.is_empty());
}

#[test]
fn test_click_off_item_deselects() {
    let mut board = TestBoardBuilder::new()
        .with_shape(ShapeKind::Rect, 100.0, 100.0, 50.0, 40.0)
        .build();
    click(&mut board.controller, 120.0, 120.0);
    assert_eq!(board.controller.tool(), Tool::Selected);

    click(&mut board.controller, 500.0, 500.0);
    assert!(board.controller.selection().is_empty());
    assert_eq!(board.controller.tool(), Tool::Selecting);
}

#[test]
fn test_insert_drag_creates_and_selects() {
    let mut board = TestBoardBuilder::new().build();
    board.controller.insert(InsertKind::Rect);
    assert_eq!(board.controller.cursor(), CursorStyle::Crosshair);

    drag(&mut board.controller, (10.0, 10.0), (60.0, 40.0));

    let document = board.controller.document();
    assert_eq!(document.items.len(), 1);
    let ItemProps::Shape(props) = &document.items[0] else {
        panic!("expected shape props");
    };
    assert_eq!(props.position, Position::new(10.0, 10.0));
    assert_eq!(props.size, Size::new(50.0, 30.0));
    assert_eq!(board.controller.selection(), &[0]);
    assert_eq!(board.controller.tool(), Tool::Selected);
}

#[test]
fn test_insert_without_drag_is_discarded() {
    let mut board = TestBoardBuilder::new().build();
    let changes = record_events(&mut board.controller, ControllerEventKind::DocumentChanged);
    board.controller.insert(InsertKind::Rect);

    click(&mut board.controller, 10.0, 10.0);

    assert!(board.controller.document().items.is_empty());
    assert!(board.controller.selection().is_empty());
    assert_eq!(board.controller.tool(), Tool::Selecting);
    // A discarded insert is not a persistable mutation.
    assert!(changes.borrow().is_empty());
}

#[test]
fn test_insert_text_kind_uses_dark_stroke() {
    let mut board = TestBoardBuilder::new().build();
    board.controller.insert(InsertKind::Text);
    drag(&mut board.controller, (0.0, 0.0), (80.0, 30.0));

    let ItemProps::Shape(props) = &board.controller.document().items[0] else {
        panic!("expected shape props");
    };
    assert_eq!(props.shape, ShapeKind::Text);
    assert_eq!(props.stroke.as_deref(), Some("#2c3e50"));
}

#[test]
fn test_insert_hotkeys_on_key_up() {
    let mut board = TestBoardBuilder::new().build();
    board.controller.key_up(&Key::KeyC, Modifiers::default());
    assert_eq!(board.controller.tool(), Tool::Insert { kind: InsertKind::Circle });
    board.controller.key_up(&Key::KeyR, Modifiers::default());
    assert_eq!(board.controller.tool(), Tool::Insert { kind: InsertKind::Rect });
    board.controller.key_up(&Key::KeyL, Modifiers::default());
    assert_eq!(board.controller.tool(), Tool::Insert { kind: InsertKind::Line });
}

#[test]
fn test_entering_insert_clears_selection() {
    let mut board = TestBoardBuilder::new()
        .with_shape(ShapeKind::Rect, 100.0, 100.0, 50.0, 40.0)
        .build();
    click(&mut board.controller, 120.0, 120.0);
    assert!(!board.controller.selection().is_empty());

    board.controller.insert(InsertKind::Circle);
    assert!(board.controller.selection().is_empty());
}

#[test]
fn test_resize_via_corner_handle() {
    let mut board = TestBoardBuilder::new()
        .with_shape(ShapeKind::Rect, 100.0, 100.0, 50.0, 40.0)
        .build();
    click(&mut board.controller, 120.0, 120.0);

    // Press on the top-left handle, drag it up and left.
    board.controller.pointer_down(Position::new(95.0, 95.0));
    assert_eq!(board.controller.tool(), Tool::Resize { handle: 0 });
    board.controller.pointer_move(Position::new(85.0, 85.0));
    board.controller.pointer_up(Position::new(85.0, 85.0));

    let ItemProps::Shape(props) = &board.controller.document().items[0] else {
        panic!("expected shape props");
    };
    assert_eq!(props.position, Position::new(90.0, 90.0));
    assert_eq!(props.size, Size::new(60.0, 50.0));
    assert_eq!(board.controller.tool(), Tool::Selecting);
}

#[test]
fn test_marquee_selects_contained_items_only() {
    let mut board = TestBoardBuilder::new()
        .with_shape(ShapeKind::Rect, 50.0, 50.0, 30.0, 30.0)
        .with_shape(ShapeKind::Rect, 150.0, 50.0, 30.0, 30.0)
        .with_shape(ShapeKind::Rect, 400.0, 400.0, 30.0, 30.0)
        .build();

    board.controller.pointer_down(Position::new(10.0, 10.0));
    board.controller.pointer_move(Position::new(300.0, 300.0));

    let mut selection = board.controller.selection().to_vec();
    selection.sort_unstable();
    assert_eq!(selection, vec![0, 1]);
    assert_eq!(board.controller.tool(), Tool::Selecting);

    board.controller.pointer_up(Position::new(300.0, 300.0));
    assert_eq!(board.controller.selection().len(), 2);
}

#[test]
fn test_shift_click_toggles_membership() {
    let mut board = TestBoardBuilder::new()
        .with_shape(ShapeKind::Rect, 50.0, 50.0, 30.0, 30.0)
        .with_shape(ShapeKind::Rect, 150.0, 50.0, 30.0, 30.0)
        .build();
    click(&mut board.controller, 60.0, 60.0);
    assert_eq!(board.controller.selection(), &[0]);

    let shift = Modifiers { shift: true, ..Modifiers::default() };
    board.controller.key_down(&Key::Other("ShiftLeft".to_string()), shift);
    click(&mut board.controller, 160.0, 60.0);
    let mut selection = board.controller.selection().to_vec();
    selection.sort_unstable();
    assert_eq!(selection, vec![0, 1]);

    // Shift-clicking a selected item removes it.
    click(&mut board.controller, 60.0, 60.0);
    assert_eq!(board.controller.selection(), &[1]);
}

#[test]
fn test_click_inside_union_box_preserves_multi_selection() {
    let mut board = TestBoardBuilder::new()
        .with_shape(ShapeKind::Rect, 50.0, 50.0, 30.0, 30.0)
        .with_shape(ShapeKind::Rect, 150.0, 50.0, 30.0, 30.0)
        .build();
    drag(&mut board.controller, (10.0, 10.0), (300.0, 300.0));
    assert_eq!(board.controller.selection().len(), 2);

    // The gap between the items lies inside the union box.
    board.controller.pointer_down(Position::new(120.0, 65.0));
    assert_eq!(board.controller.selection().len(), 2);

    // Dragging from there moves the whole group.
    board.controller.pointer_move(Position::new(130.0, 75.0));
    board.controller.pointer_up(Position::new(130.0, 75.0));
    let document = board.controller.document();
    assert_eq!(item_position(&document.items[0]), Position::new(60.0, 60.0));
    assert_eq!(item_position(&document.items[1]), Position::new(160.0, 60.0));
}

#[test]
fn test_normal_mode_drag_pans_offset() {
    let mut board = TestBoardBuilder::new().build();
    board.controller.normal();
    drag(&mut board.controller, (100.0, 100.0), (130.0, 120.0));
    assert_eq!(board.controller.document().offset, Position::new(30.0, 20.0));
}

#[test]
fn test_wheel_pans_and_persists() {
    let mut board = TestBoardBuilder::new().build();
    let changes = record_events(&mut board.controller, ControllerEventKind::DocumentChanged);

    assert!(board.controller.wheel(Position::new(10.0, 5.0)));

    assert_eq!(board.controller.document().offset, Position::new(-10.0, -5.0));
    let last = changes.borrow().last().cloned();
    let Some(ControllerEvent::DocumentChanged(document)) = last else {
        panic!("expected a document-changed event");
    };
    assert_eq!(document.offset, Position::new(-10.0, -5.0));
}

#[test]
fn test_zoom_clamps_at_bounds() {
    let mut board = TestBoardBuilder::new().build();
    for _ in 0..20 {
        board.controller.zoom(ZoomDirection::In);
    }
    assert_eq!(board.controller.scale(), 4.0);
    for _ in 0..40 {
        board.controller.zoom(ZoomDirection::Out);
    }
    assert_eq!(board.controller.scale(), 0.25);
}

#[test]
fn test_zoom_scales_pointer_coordinates() {
    let mut board = TestBoardBuilder::new()
        .with_shape(ShapeKind::Rect, 100.0, 100.0, 50.0, 40.0)
        .build();
    board.controller.zoom(ZoomDirection::In); // scale 1.25

    // Client (150, 150) maps to canvas (120, 120), inside the item.
    click(&mut board.controller, 150.0, 150.0);
    assert_eq!(board.controller.selection(), &[0]);
}

#[test]
fn test_copy_paste_cascades_and_selects_new_items() {
    let mut board = TestBoardBuilder::new()
        .with_shape(ShapeKind::Rect, 100.0, 100.0, 50.0, 40.0)
        .build();
    click(&mut board.controller, 120.0, 120.0);

    assert!(board.controller.key_down(&Key::KeyC, ctrl()));
    assert!(board.controller.key_down(&Key::KeyV, ctrl()));
    assert_eq!(board.controller.selection(), &[1]);
    board.controller.key_down(&Key::KeyV, ctrl());
    assert_eq!(board.controller.selection(), &[2]);

    let document = board.controller.document();
    assert_eq!(item_position(&document.items[1]), Position::new(120.0, 120.0));
    assert_eq!(item_position(&document.items[2]), Position::new(140.0, 140.0));
}

#[test]
fn test_double_click_edits_text_and_flushes_on_next_click() {
    let mut board = TestBoardBuilder::new()
        .with_shape(ShapeKind::Rect, 100.0, 100.0, 50.0, 40.0)
        .build();
    click(&mut board.controller, 120.0, 120.0);
    board.controller.double_click(Position::new(120.0, 120.0));
    assert!(board.overlay.borrow().is_active());

    board.overlay.borrow_mut().type_text("hello");

    // Clicking empty canvas ends the session and flushes the text.
    board.controller.pointer_down(Position::new(500.0, 500.0));
    assert!(!board.overlay.borrow().is_active());
    let ItemProps::Shape(props) = &board.controller.document().items[0] else {
        panic!("expected shape props");
    };
    assert_eq!(props.text.as_deref(), Some("hello"));
}

#[test]
fn test_double_click_on_line_does_not_edit() {
    let mut board = TestBoardBuilder::new().with_line(50.0, 50.0, 150.0, 50.0).build();
    click(&mut board.controller, 100.0, 50.0);
    assert_eq!(board.controller.selection(), &[0]);

    board.controller.double_click(Position::new(100.0, 50.0));
    assert!(!board.overlay.borrow().is_active());
}

#[test]
fn test_keyboard_suppressed_while_editing() {
    let mut board = TestBoardBuilder::new()
        .with_shape(ShapeKind::Rect, 100.0, 100.0, 50.0, 40.0)
        .build();
    click(&mut board.controller, 120.0, 120.0);
    board.controller.double_click(Position::new(120.0, 120.0));

    board.controller.key_up(&Key::Backspace, Modifiers::default());
    assert_eq!(board.controller.document().items.len(), 1);
    assert_eq!(board.controller.tool(), Tool::Selected);
}

#[test]
fn test_style_patch_reaches_selection_and_subscribers() {
    let mut board = TestBoardBuilder::new()
        .with_shape(ShapeKind::Rect, 100.0, 100.0, 50.0, 40.0)
        .build();
    click(&mut board.controller, 120.0, 120.0);
    let updates = record_events(&mut board.controller, ControllerEventKind::UpdatedItem);

    board.controller.set_selected_item_props(&ItemPatch {
        stroke: Some("#C0392B".to_string()),
        ..ItemPatch::default()
    });

    let ItemProps::Shape(props) = &board.controller.document().items[0] else {
        panic!("expected shape props");
    };
    assert_eq!(props.stroke.as_deref(), Some("#C0392B"));
    let recorded = updates.borrow();
    let Some(ControllerEvent::UpdatedItem(ItemProps::Shape(published))) = recorded.last() else {
        panic!("expected an updated-item event");
    };
    assert_eq!(published.stroke.as_deref(), Some("#C0392B"));
}

#[test]
fn test_selected_event_carries_sole_representative_only() {
    let mut board = TestBoardBuilder::new()
        .with_shape(ShapeKind::Rect, 50.0, 50.0, 30.0, 30.0)
        .with_shape(ShapeKind::Rect, 150.0, 50.0, 30.0, 30.0)
        .build();
    let selections = record_events(&mut board.controller, ControllerEventKind::Selected);

    click(&mut board.controller, 60.0, 60.0);
    assert!(matches!(
        selections.borrow().last(),
        Some(ControllerEvent::Selected(Some(ItemProps::Shape(_))))
    ));

    drag(&mut board.controller, (10.0, 10.0), (300.0, 300.0));
    assert_eq!(board.controller.selection().len(), 2);
    assert!(matches!(selections.borrow().last(), Some(ControllerEvent::Selected(None))));
}

#[test]
fn test_clear_empties_board_and_resets_offset() {
    let mut board = TestBoardBuilder::new()
        .with_shape(ShapeKind::Rect, 100.0, 100.0, 50.0, 40.0)
        .build();
    board.controller.wheel(Position::new(10.0, 10.0));
    let changes = record_events(&mut board.controller, ControllerEventKind::DocumentChanged);

    board.controller.clear();

    let document = board.controller.document();
    assert!(document.items.is_empty());
    assert_eq!(document.offset, Position::ZERO);
    assert!(!changes.borrow().is_empty());
}

#[test]
fn test_mode_events_fire_on_transition() {
    let mut board = TestBoardBuilder::new().build();
    let modes = record_events(&mut board.controller, ControllerEventKind::Mode);

    board.controller.insert(InsertKind::Rect);
    board.controller.select();

    let recorded = modes.borrow();
    assert!(recorded.contains(&ControllerEvent::Mode(Tool::Insert { kind: InsertKind::Rect })));
    assert_eq!(recorded.last(), Some(&ControllerEvent::Mode(Tool::Selecting)));
}

#[test]
fn test_marquee_drag_bounding_is_normalized() {
    // Dragging up-left produces the same selection as down-right.
    let mut board = TestBoardBuilder::new()
        .with_shape(ShapeKind::Rect, 50.0, 50.0, 30.0, 30.0)
        .build();
    board.controller.pointer_down(Position::new(300.0, 300.0));
    board.controller.pointer_move(Position::new(10.0, 10.0));
    assert_eq!(board.controller.selection(), &[0]);
    board.controller.pointer_up(Position::new(10.0, 10.0));
}

#[test]
fn test_selected_items_move_with_drag() {
    let mut board = TestBoardBuilder::new()
        .with_shape(ShapeKind::Rect, 100.0, 100.0, 50.0, 40.0)
        .build();
    click(&mut board.controller, 120.0, 120.0);

    drag(&mut board.controller, (120.0, 120.0), (145.0, 135.0));

    assert_eq!(
        item_position(&board.controller.document().items[0]),
        Position::new(125.0, 115.0)
    );
}

#[test]
fn test_escape_returns_from_insert_mode() {
    let mut board = TestBoardBuilder::new().build();
    board.controller.insert(InsertKind::Line);
    board.controller.key_up(&Key::Escape, Modifiers::default());
    assert_eq!(board.controller.tool(), Tool::Selected);
    assert_eq!(board.controller.cursor(), CursorStyle::Default);
}
