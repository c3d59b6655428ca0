//! R-tree index over item hit envelopes.
//!
//! Candidate pruning only: envelopes are padded by each item's hit slack, so
//! a point query returns a superset of the items actually hit and the scene
//! still runs the precise per-item test on the survivors.

use rstar::{AABB, RTree, RTreeObject};

use crate::geometry::{Bounding, Position};
use crate::item::ItemId;

#[derive(Debug, Clone, Copy)]
struct SpatialEntry {
    item_id: ItemId,
    min: [f32; 2],
    max: [f32; 2],
}

impl SpatialEntry {
    fn new(item_id: ItemId, envelope: Bounding) -> Self {
        Self {
            item_id,
            min: [envelope.position.x, envelope.position.y],
            max: [envelope.right(), envelope.bottom()],
        }
    }
}

impl RTreeObject for SpatialEntry {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.min, self.max)
    }
}

/// Spatial index rebuilt lazily by the scene whenever items change.
#[derive(Default)]
pub struct SpatialIndex {
    tree: RTree<SpatialEntry>,
}

impl SpatialIndex {
    /// Bulk-loads the index from `(item id, padded hit envelope)` pairs.
    pub fn from_envelopes<I>(envelopes: I) -> Self
    where
        I: IntoIterator<Item = (ItemId, Bounding)>,
    {
        let entries = envelopes
            .into_iter()
            .map(|(id, envelope)| SpatialEntry::new(id, envelope))
            .collect();
        Self {
            tree: RTree::bulk_load(entries),
        }
    }

    /// Item ids whose padded envelope contains the point. Callers must still
    /// run the precise hit test on each candidate.
    pub fn candidates_at(&self, point: Position) -> Vec<ItemId> {
        self.tree
            .locate_in_envelope_intersecting(&AABB::from_point([point.x, point.y]))
            .map(|entry| entry.item_id)
            .collect()
    }

    /// Item ids whose padded envelope intersects the rectangle.
    pub fn candidates_in(&self, rect: Bounding) -> Vec<ItemId> {
        let envelope = AABB::from_corners(
            [rect.position.x, rect.position.y],
            [rect.right(), rect.bottom()],
        );
        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .map(|entry| entry.item_id)
            .collect()
    }
}
