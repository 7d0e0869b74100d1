//! LazyBlocks (workspace facade crate).
//!
//! Re-exports the workspace crates as `lazy_blocks::{core,input,scores,term,types}`
//! and holds the pieces only the terminal binary needs.

pub mod audio;
pub mod config;
pub mod logging;

pub use lazy_blocks_core as core;
pub use lazy_blocks_input as input;
pub use lazy_blocks_scores as scores;
pub use lazy_blocks_term as term;
pub use lazy_blocks_types as types;
