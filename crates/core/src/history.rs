//! Placement history - undo keyed on placement order
//!
//! The history is only a counter. Every settled cell already carries the
//! [`PlacementId`] of the hard drop that produced it, so undoing the latest
//! placement is a scan for cells carrying the counter's current value.
//!
//! Limits:
//! - one call rolls back exactly one placement;
//! - rows removed by a line clear are gone for good. Undoing the placement that
//!   completed them does not bring them back, and cells of that placement that
//!   were shifted down by the clear are removed from wherever they now sit.

use tracing::debug;

use crate::grid::{Grid, PlacementId};
use crate::types::ShapeId;

/// Result of an undo request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndoOutcome {
    /// The latest placement was removed from the grid
    Undone {
        placement: PlacementId,
        /// Kind to hand back to the next slot. `None` when every cell of the
        /// placement had already been cleared away by a row clear.
        restored: Option<ShapeId>,
        cells_removed: usize,
    },
    /// No placement has happened yet (or the game is over)
    NothingToUndo,
}

impl UndoOutcome {
    pub fn is_undone(&self) -> bool {
        matches!(self, UndoOutcome::Undone { .. })
    }
}

/// Counter of placements made so far
///
/// `base` is the highest tag that existed before the history started. Undo
/// never steps the counter below it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlacementHistory {
    base: Option<PlacementId>,
    last: Option<PlacementId>,
}

impl PlacementHistory {
    pub fn new() -> Self {
        Self::starting_after(None)
    }

    /// Continue numbering after `base`; cells tagged `base` or lower are never undone
    pub fn starting_after(base: Option<PlacementId>) -> Self {
        Self { base, last: base }
    }

    /// Id of the most recent placement made through this history
    pub fn last(&self) -> Option<PlacementId> {
        if self.last == self.base {
            None
        } else {
            self.last
        }
    }

    /// Advance the counter and return the id for the placement being made
    pub fn begin_placement(&mut self) -> PlacementId {
        let id = self.last.map_or(PlacementId::FIRST, PlacementId::next);
        self.last = Some(id);
        id
    }

    /// Remove every cell tagged with the latest placement and step the counter back
    ///
    /// When several cells match, the one scanned last (highest row, then highest
    /// column) decides the restored kind.
    pub fn undo(&mut self, grid: &mut Grid) -> UndoOutcome {
        let Some(placement) = self.last() else {
            debug!("nothing to undo");
            return UndoOutcome::NothingToUndo;
        };

        let mut restored = None;
        let mut cells_removed = 0;
        let tagged: Vec<(i8, i8, ShapeId)> = grid
            .iter()
            .filter_map(|(x, y, cell)| {
                cell.filter(|block| block.placement == placement)
                    .map(|block| (x, y, block.shape))
            })
            .collect();

        for (x, y, shape) in tagged {
            grid.clear(x, y);
            restored = Some(shape);
            cells_removed += 1;
        }

        self.last = placement.prev();
        debug!(
            placement = placement.get(),
            cells_removed,
            ?restored,
            "undid placement"
        );

        UndoOutcome::Undone {
            placement,
            restored,
            cells_removed,
        }
    }
}
