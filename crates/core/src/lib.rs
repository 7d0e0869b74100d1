//! Core board logic - deterministic apart from session ids and timestamps
//!
//! This crate holds the rules of the falling-block board and nothing else. It has
//! no terminal, audio or file I/O; collaborators read [`GameSnapshot`]s and drain
//! events and score records from the [`BoardEngine`].
//!
//! # Module Structure
//!
//! - [`grid`]: 10x20 grid of settled blocks, row 0 at the bottom
//! - [`shapes`]: the seven canonical shape matrices and clockwise rotation
//! - [`piece`]: projecting a matrix onto the grid and the `can_place` predicate
//! - [`rng`]: seeded uniform shape draws
//! - [`history`]: placement counter and single-step undo
//! - [`scoring`]: lowest-first row clearing, one point per row
//! - [`session`]: game id, score and score records
//! - [`engine`]: the piece lifecycle state machine
//! - [`snapshot`]: owned copy of the state for renderers
//!
//! # Game Rules
//!
//! - **Uniform draws**: every shape is equally likely on every draw, no bag
//! - **Plain rotation**: clockwise about the anchor, rejected when blocked, no kicks
//! - **Input-driven descent**: pieces only move down on drop intents by default
//! - **Helper piece**: swap the active piece with a second preview at any time
//! - **Undo**: remove the latest placement and hand its shape back as next
//! - **Scoring**: one point per cleared row
//!
//! # Example
//!
//! ```
//! use lazy_blocks_core::{BoardEngine, EngineConfig};
//! use lazy_blocks_types::Intent;
//!
//! let mut engine = BoardEngine::new(EngineConfig::with_seed(12345));
//!
//! engine.apply(Intent::MoveRight);
//! engine.apply(Intent::Rotate);
//! engine.apply(Intent::HardDrop);
//!
//! assert_eq!(engine.grid().occupied_count(), 4);
//! assert_eq!(engine.score(), 0);
//! ```

pub mod engine;
pub mod grid;
pub mod history;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod shapes;
pub mod snapshot;

pub use lazy_blocks_types as types;

pub use engine::{
    BoardEngine, DropOutcome, EngineConfig, GravityPolicy, Phase, RowClearPolicy, SpawnResult,
};
pub use grid::{Block, Cell, Grid, PlacementId};
pub use history::UndoOutcome;
pub use piece::{Anchor, Piece, Preview};
pub use session::{GameSession, ScoreRecord};
pub use shapes::ShapeMatrix;
pub use snapshot::GameSnapshot;
