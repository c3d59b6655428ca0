//! Single test binary entry point.
//!
//! All tests compile into one binary to keep link time down.
//!
//! Structure:
//! - unit: Single-component tests (items, scene, events)
//! - integration: Controller workflows, render pipeline, persistence

mod helpers;
mod unit;
