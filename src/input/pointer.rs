use crate::geometry::{Bounding, Position};

/// Snapshot of a pointer press, in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub position: Position,
}

/// Snapshot of pointer motion while a gesture may be in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragEvent {
    pub position: Position,
    pub start: Position,
    /// Motion since the previous move event, not since the press.
    pub delta: Position,
    pub dragging: bool,
    /// Axis-aligned box spanned by the press point and the current point.
    pub dragged_bounding: Bounding,
}

/// Tracks pointer gesture state between events. Positions fed in are already
/// converted to canvas space by the caller.
#[derive(Debug, Default)]
pub struct Pointer {
    dragging: bool,
    start: Position,
    previous: Position,
}

impl Pointer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn start(&self) -> Position {
        self.start
    }

    /// Last position seen by a move, press, or double-click event.
    pub fn previous(&self) -> Position {
        self.previous
    }

    pub fn drag_bounding(&self) -> Option<Bounding> {
        self.dragging
            .then(|| Bounding::from_corners(self.start, self.previous))
    }

    pub fn track_down(&mut self, position: Position) -> PointerEvent {
        self.dragging = true;
        self.start = position;
        self.previous = position;
        PointerEvent { position }
    }

    pub fn track_move(&mut self, position: Position) -> DragEvent {
        let event = DragEvent {
            position,
            start: self.start,
            delta: Position::new(position.x - self.previous.x, position.y - self.previous.y),
            dragging: self.dragging,
            dragged_bounding: Bounding::from_corners(self.start, position),
        };
        self.previous = position;
        event
    }

    /// Ends the gesture. Does not update `previous`, so the delta reported
    /// here covers motion since the last move event.
    pub fn track_up(&mut self, position: Position) -> DragEvent {
        let event = DragEvent {
            position,
            start: self.start,
            delta: Position::new(position.x - self.previous.x, position.y - self.previous.y),
            dragging: self.dragging,
            dragged_bounding: Bounding::from_corners(self.start, position),
        };
        self.dragging = false;
        event
    }
}
