//! Text editing overlay contract.
//!
//! While an item's text is being edited the item itself hides its label and a
//! host-provided overlay shows an editable field over the item's bounds. The
//! controller only talks to the [`TextOverlay`] trait; hosts supply a DOM or
//! native widget behind it, tests use [`InMemoryOverlay`].

use crate::geometry::Bounding;
use crate::item::{ItemId, ItemPatch, TextAlign, TextSize};

/// Everything the overlay needs to mirror an item's text styling.
#[derive(Debug, Clone, PartialEq)]
pub struct TextEditSession {
    pub item: ItemId,
    pub bounds: Bounding,
    pub text: String,
    pub stroke: Option<String>,
    pub align: TextAlign,
    pub text_size: TextSize,
}

/// Edited text handed back when a session ends.
#[derive(Debug, Clone, PartialEq)]
pub struct TextEditResult {
    pub item: ItemId,
    pub text: String,
}

pub trait TextOverlay {
    /// Opens an editing session, replacing any session already active.
    fn begin(&mut self, session: TextEditSession);

    /// Closes the active session, returning the final text. `None` when no
    /// session was active.
    fn end(&mut self) -> Option<TextEditResult>;

    fn is_active(&self) -> bool;

    fn active_item(&self) -> Option<ItemId>;

    /// Restyles the overlay in place while a session is open so style edits
    /// made mid-edit show immediately.
    fn apply_style(&mut self, patch: &ItemPatch);
}

/// Overlay that stores the session in memory. Used by tests and by headless
/// hosts that feed text programmatically.
#[derive(Debug, Default)]
pub struct InMemoryOverlay {
    session: Option<TextEditSession>,
}

impl InMemoryOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the text of the active session, as a user typing would.
    pub fn type_text(&mut self, text: &str) {
        if let Some(session) = self.session.as_mut() {
            session.text = text.to_owned();
        }
    }

    pub fn session(&self) -> Option<&TextEditSession> {
        self.session.as_ref()
    }
}

impl TextOverlay for InMemoryOverlay {
    fn begin(&mut self, session: TextEditSession) {
        self.session = Some(session);
    }

    fn end(&mut self) -> Option<TextEditResult> {
        self.session.take().map(|session| TextEditResult {
            item: session.item,
            text: session.text,
        })
    }

    fn is_active(&self) -> bool {
        self.session.is_some()
    }

    fn active_item(&self) -> Option<ItemId> {
        self.session.as_ref().map(|session| session.item)
    }

    fn apply_style(&mut self, patch: &ItemPatch) {
        if let Some(session) = self.session.as_mut() {
            if let Some(stroke) = &patch.stroke {
                session.stroke = Some(stroke.clone());
            }
            if let Some(align) = patch.align_h_text {
                session.align = align;
            }
            if let Some(size) = patch.text_size {
                session.text_size = size;
            }
        }
    }
}

// Shared-handle forwarding so a host (or test) can keep a handle to the
// overlay it hands the controller.
impl<T: TextOverlay> TextOverlay for std::rc::Rc<std::cell::RefCell<T>> {
    fn begin(&mut self, session: TextEditSession) {
        self.borrow_mut().begin(session);
    }

    fn end(&mut self) -> Option<TextEditResult> {
        self.borrow_mut().end()
    }

    fn is_active(&self) -> bool {
        self.borrow().is_active()
    }

    fn active_item(&self) -> Option<ItemId> {
        self.borrow().active_item()
    }

    fn apply_style(&mut self, patch: &ItemPatch) {
        self.borrow_mut().apply_style(patch);
    }
}
