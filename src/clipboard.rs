//! Copy/paste buffer holding serialized item props.
//!
//! The buffer stores props rather than live items so each paste can mint
//! fresh ids and seeds. Repeated pastes of one copy cascade by a growing
//! offset so they do not stack on top of each other.

use crate::constants::PASTE_OFFSET;
use crate::geometry::Position;
use crate::item::{Item, ItemProps};

#[derive(Debug, Default)]
pub struct Clipboard {
    snapshot: Vec<ItemProps>,
    pasted_count: u32,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.is_empty()
    }

    /// Snapshots the given items and resets the paste cascade.
    pub fn copy<'a, I>(&mut self, items: I)
    where
        I: IntoIterator<Item = &'a Item>,
    {
        self.snapshot = items.into_iter().map(Item::to_props).collect();
        self.pasted_count = 0;
    }

    /// Returns props for the next paste, shifted down-right by one cascade
    /// step per paste since the copy.
    pub fn paste(&mut self) -> Vec<ItemProps> {
        self.pasted_count += 1;
        let shift = PASTE_OFFSET * self.pasted_count as f32;
        self.snapshot
            .iter()
            .map(|props| props.translated(Position::new(shift, shift)))
            .collect()
    }
}
