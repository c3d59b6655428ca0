//! Pointer and keyboard trackers feeding the board controller.

mod keyboard;
mod pointer;

pub use keyboard::{Key, Keyboard, Modifiers};
pub use pointer::{DragEvent, Pointer, PointerEvent};
