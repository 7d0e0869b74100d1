//! Scoring module - row clearing with flat per-row points
//!
//! Rules:
//! - Each removed row is worth exactly [`POINTS_PER_ROW`], no multi-line bonus.
//! - Drops (soft or hard) score nothing.
//! - Rows are removed one at a time, always the lowest full row first, and the
//!   scan restarts from the floor after each removal because indices shift.

use crate::grid::Grid;
use crate::types::GRID_HEIGHT;

/// Points awarded per cleared row
pub const POINTS_PER_ROW: u32 = 1;

/// Index of the lowest full row, if any
pub fn lowest_full_row(grid: &Grid) -> Option<usize> {
    (0..GRID_HEIGHT as usize).find(|&y| grid.row_is_full(y))
}

/// Remove the lowest full row and return its index
///
/// Call repeatedly until it returns `None` to clear everything.
pub fn remove_lowest_full_row(grid: &mut Grid) -> Option<usize> {
    let y = lowest_full_row(grid)?;
    grid.remove_row(y);
    Some(y)
}
