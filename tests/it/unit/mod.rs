//! Unit tests for doodleboard.

mod scene_tests;
