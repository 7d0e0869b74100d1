use uuid::Uuid;

use crate::engine::Phase;
use crate::grid::{Cell, Grid};
use crate::piece::{Piece, Preview};
use crate::types::ShapeId;

/// Read-only copy of everything a renderer needs
///
/// Owns all of its data, so it can be handed to another thread while the
/// engine keeps running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub grid: Grid,
    pub active: Option<Piece>,
    pub next: Option<ShapeId>,
    pub helper: Option<Preview>,
    pub score: u32,
    pub game_over: bool,
    pub game_id: Uuid,
    pub phase: Phase,
}

impl GameSnapshot {
    /// Cell at `(x, y)` with the active piece drawn on top
    pub fn composed_cell(&self, x: i8, y: i8) -> Option<ShapeId> {
        if let Some(active) = self.active {
            if active.cells().contains(&(x, y)) {
                return Some(active.shape);
            }
        }
        self.grid.get(x, y).flatten().map(|block| block.shape)
    }

    pub fn cell(&self, x: i8, y: i8) -> Option<Cell> {
        self.grid.get(x, y)
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            grid: Grid::new(),
            active: None,
            next: None,
            helper: None,
            score: 0,
            game_over: false,
            game_id: Uuid::nil(),
            phase: Phase::Spawning,
        }
    }
}
