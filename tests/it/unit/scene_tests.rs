//! Unit tests for scene queries and bulk mutation.

use doodleboard::geometry::{Bounding, Position, Size};
use doodleboard::item::{ItemProps, ShapeKind};
use doodleboard::scene::Document;

use crate::helpers::{line_props, recording_scene, shape_props};

fn shape_xs(document: &Document) -> Vec<f32> {
    document
        .items
        .iter()
        .map(|props| match props {
            ItemProps::Shape(shape) => shape.position.x,
            ItemProps::Line(line) => line.points[0].x,
        })
        .collect()
}

#[test]
fn test_delete_items_preserves_survivor_order() {
    let (mut scene, _log) = recording_scene();
    let items = (0..5)
        .map(|i| shape_props(ShapeKind::Rect, i as f32, 0.0, 10.0, 10.0))
        .collect();
    scene.set_document(&Document { offset: Position::ZERO, items }).unwrap();

    scene.delete_items(&[2, 0, 3]);

    assert_eq!(shape_xs(&scene.to_document()), vec![1.0, 4.0]);
}

#[test]
fn test_delete_tolerates_duplicates_and_out_of_range() {
    let (mut scene, _log) = recording_scene();
    let items = (0..3)
        .map(|i| shape_props(ShapeKind::Rect, i as f32, 0.0, 10.0, 10.0))
        .collect();
    scene.set_document(&Document { offset: Position::ZERO, items }).unwrap();

    scene.delete_items(&[1, 1, 9]);

    assert_eq!(shape_xs(&scene.to_document()), vec![0.0, 2.0]);
}

#[test]
fn test_items_in_rect_excludes_flush_boundaries() {
    let (mut scene, _log) = recording_scene();
    scene
        .set_document(&Document {
            offset: Position::ZERO,
            items: vec![shape_props(ShapeKind::Rect, 10.0, 10.0, 20.0, 20.0)],
        })
        .unwrap();

    let flush = Bounding::new(Position::new(10.0, 10.0), Size::new(20.0, 20.0));
    assert!(scene.items_in_rect(flush).is_empty());

    let clearing = Bounding::new(Position::new(9.0, 9.0), Size::new(22.0, 22.0));
    assert_eq!(scene.items_in_rect(clearing), vec![0]);
}

#[test]
fn test_item_at_point_prefers_topmost() {
    let (mut scene, _log) = recording_scene();
    scene
        .set_document(&Document {
            offset: Position::ZERO,
            items: vec![
                shape_props(ShapeKind::Rect, 0.0, 0.0, 100.0, 100.0),
                shape_props(ShapeKind::Rect, 50.0, 50.0, 100.0, 100.0),
            ],
        })
        .unwrap();

    assert_eq!(scene.item_at_point(Position::new(75.0, 75.0)), Some(1));
    assert_eq!(scene.item_at_point(Position::new(25.0, 25.0)), Some(0));
    assert_eq!(scene.item_at_point(Position::new(400.0, 400.0)), None);
}

#[test]
fn test_item_at_point_hits_lines_within_tolerance_only() {
    let (mut scene, _log) = recording_scene();
    scene
        .set_document(&Document {
            offset: Position::ZERO,
            items: vec![line_props(0.0, 0.0, 100.0, 0.0)],
        })
        .unwrap();

    assert_eq!(scene.item_at_point(Position::new(50.0, 0.4)), Some(0));
    assert_eq!(scene.item_at_point(Position::new(50.0, 2.0)), None);
}

#[test]
fn test_bounding_of_unions_selection() {
    let (mut scene, _log) = recording_scene();
    scene
        .set_document(&Document {
            offset: Position::ZERO,
            items: vec![
                shape_props(ShapeKind::Rect, 0.0, 0.0, 10.0, 10.0),
                shape_props(ShapeKind::Rect, 50.0, 30.0, 10.0, 10.0),
            ],
        })
        .unwrap();

    let union = scene.bounding_of(&[0, 1]).unwrap();
    assert_eq!(union, Bounding::new(Position::ZERO, Size::new(60.0, 40.0)));
    assert!(scene.bounding_of(&[]).is_none());
}

#[test]
fn test_move_items_by_translates_only_targets() {
    let (mut scene, _log) = recording_scene();
    scene
        .set_document(&Document {
            offset: Position::ZERO,
            items: vec![
                shape_props(ShapeKind::Rect, 0.0, 0.0, 10.0, 10.0),
                shape_props(ShapeKind::Rect, 50.0, 0.0, 10.0, 10.0),
            ],
        })
        .unwrap();

    scene.move_items_by(&[1], Position::new(5.0, 7.0));

    assert_eq!(shape_xs(&scene.to_document()), vec![0.0, 55.0]);
}

#[test]
fn test_set_document_rejects_bad_line_without_touching_scene() {
    let (mut scene, _log) = recording_scene();
    scene
        .set_document(&Document {
            offset: Position::ZERO,
            items: vec![shape_props(ShapeKind::Rect, 0.0, 0.0, 10.0, 10.0)],
        })
        .unwrap();

    let mut bad = line_props(0.0, 0.0, 1.0, 1.0);
    if let ItemProps::Line(line) = &mut bad {
        line.points.push(Position::new(2.0, 2.0));
    }
    let result = scene.set_document(&Document {
        offset: Position::new(9.0, 9.0),
        items: vec![bad],
    });

    assert!(result.is_err());
    assert_eq!(scene.len(), 1);
    assert_eq!(scene.offset(), Position::ZERO);
}
