//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::Intent`]s and repeats held
//! intents at a fixed rate. Works in terminals that never report key release.

pub mod handler;
pub mod map;

pub use lazy_blocks_types as types;

pub use handler::HeldKeys;
pub use map::{map_key, should_quit};
