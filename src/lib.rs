//! Doodleboard is the headless core of a sketch-style whiteboard: a scene of
//! hand-drawn-looking shapes and lines with selection, marquee, resize
//! handles, text labels, clipboard, pan/zoom, and JSON persistence.
//!
//! The crate owns the model and the interaction rules; drawing, text editing,
//! and storage plug in through the [`render::Surface`] / [`render::SketchBackend`],
//! [`overlay::TextOverlay`], and [`repository::DocumentRepository`] traits. A
//! host wires device events into a [`controller::Controller`] and subscribes
//! to its events for everything flowing the other way.

pub mod clipboard;
pub mod constants;
pub mod controller;
pub mod error;
pub mod events;
pub mod geometry;
pub mod input;
pub mod item;
pub mod overlay;
pub mod render;
pub mod repository;
pub mod scene;
pub mod spatial;

pub use controller::{Controller, ControllerEvent, ControllerEventKind, InsertKind, Tool};
pub use error::{BoardResult, Error};
pub use geometry::{Bounding, Position, Size};
pub use item::{Item, ItemPatch, ItemProps};
pub use scene::{Document, Scene};
