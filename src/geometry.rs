//! Geometry value types and hit-test primitives.
//!
//! `Position`, `Size`, and `Bounding` are plain serde value types shared by
//! the item model, the scene, and the wire format. The free functions cover
//! the three spatial predicates the rest of the crate needs: distance,
//! point-in-rect, and point-near-segment.

use serde::{Deserialize, Serialize};

/// A point in canvas coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const ZERO: Position = Position { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Translate by `delta`, returning the moved point.
    pub fn translated(self, delta: Position) -> Self {
        Self { x: self.x + delta.x, y: self.y + delta.y }
    }
}

/// Extent in canvas units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned box given by its top-left corner and size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounding {
    pub position: Position,
    pub size: Size,
}

impl Bounding {
    pub fn new(position: Position, size: Size) -> Self {
        Self { position, size }
    }

    /// Box spanning two arbitrary corner points.
    pub fn from_corners(a: Position, b: Position) -> Self {
        Self {
            position: Position::new(a.x.min(b.x), a.y.min(b.y)),
            size: Size::new((a.x - b.x).abs(), (a.y - b.y).abs()),
        }
    }

    pub fn right(&self) -> f32 {
        self.position.x + self.size.width
    }

    pub fn bottom(&self) -> f32 {
        self.position.y + self.size.height
    }

    /// Grow the box by `margin` on every side.
    pub fn inflated(&self, margin: f32) -> Self {
        Self {
            position: Position::new(self.position.x - margin, self.position.y - margin),
            size: Size::new(self.size.width + margin * 2.0, self.size.height + margin * 2.0),
        }
    }

    /// Smallest box containing both `self` and `other`.
    pub fn union(&self, other: Bounding) -> Self {
        let left = self.position.x.min(other.position.x);
        let top = self.position.y.min(other.position.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Self {
            position: Position::new(left, top),
            size: Size::new(right - left, bottom - top),
        }
    }

    /// True if `inner` lies strictly inside this box on all four sides.
    /// A box flush with an edge does not count as contained.
    pub fn strictly_contains(&self, inner: &Bounding) -> bool {
        self.position.x < inner.position.x
            && self.position.y < inner.position.y
            && self.right() > inner.right()
            && self.bottom() > inner.bottom()
    }
}

/// Euclidean distance between two points.
pub fn distance(a: Position, b: Position) -> f32 {
    ((b.x - a.x).powi(2) + (b.y - a.y).powi(2)).sqrt()
}

/// True if `point` lies strictly inside the rect at `position` with `size`.
pub fn point_in_rect(point: Position, position: Position, size: Size) -> bool {
    point.x > position.x
        && point.y > position.y
        && point.x < position.x + size.width
        && point.y < position.y + size.height
}

/// Distance from `point` to the segment `start`..`end`.
pub fn segment_distance(point: Position, start: Position, end: Position) -> f32 {
    let len = distance(start, end);
    if len == 0.0 {
        return distance(point, start);
    }
    let t = ((point.x - start.x) * (end.x - start.x) + (point.y - start.y) * (end.y - start.y))
        / (len * len);
    let t = t.clamp(0.0, 1.0);
    let closest = Position::new(
        start.x + t * (end.x - start.x),
        start.y + t * (end.y - start.y),
    );
    distance(point, closest)
}

/// True if `point` lies within the segment's tolerance band: 0.5% of the
/// segment length on either side.
pub fn point_near_segment(point: Position, start: Position, end: Position) -> bool {
    let len = distance(start, end);
    segment_distance(point, start, end) < len * 0.005
}
