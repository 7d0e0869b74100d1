//! Grid module - the authoritative store of settled cells
//!
//! The grid is 10 columns by 20 rows stored as a flat array (`y * WIDTH + x`),
//! so every cell is its own value and no two rows can alias each other.
//! Coordinates: x grows to the right from 0, y grows *upward* from the floor (row 0).
//!
//! Out-of-bounds reads behave like a wall: `is_occupied` reports them as occupied.
//! Out-of-bounds writes are engine bugs and panic.

use crate::types::{ColorId, ShapeId, GRID_HEIGHT, GRID_WIDTH};

/// Total number of cells on the grid
const GRID_SIZE: usize = (GRID_WIDTH as usize) * (GRID_HEIGHT as usize);

/// Tag identifying the hard drop that produced a settled cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlacementId(u32);

impl PlacementId {
    pub const FIRST: PlacementId = PlacementId(0);

    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// The placement before this one, or `None` when this is the first
    pub fn prev(self) -> Option<Self> {
        self.0.checked_sub(1).map(Self)
    }
}

/// Contents of an occupied cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Block {
    pub color: ColorId,
    pub placement: PlacementId,
    /// Kind that produced this cell; undo hands it back to the next slot
    pub shape: ShapeId,
}

/// A grid cell: `None` is empty, `Some` is fully occupied
pub type Cell = Option<Block>;

/// Settled cells of the play field
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    cells: [Cell; GRID_SIZE],
}

impl Grid {
    /// Create an empty grid
    pub fn new() -> Self {
        Self {
            cells: [None; GRID_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= GRID_WIDTH as i8 || y < 0 || y >= GRID_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (GRID_WIDTH as usize) + (x as usize))
    }

    #[inline(always)]
    fn index_or_panic(x: i8, y: i8) -> usize {
        match Self::index(x, y) {
            Some(idx) => idx,
            None => panic!(
                "grid coordinate ({}, {}) outside {}x{}",
                x, y, GRID_WIDTH, GRID_HEIGHT
            ),
        }
    }

    pub fn width(&self) -> u8 {
        GRID_WIDTH
    }

    pub fn height(&self) -> u8 {
        GRID_HEIGHT
    }

    /// Get the cell at `(x, y)`, or `None` when out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Whether `(x, y)` blocks a piece; everything outside the grid does
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        match Self::index(x, y) {
            Some(idx) => self.cells[idx].is_some(),
            None => true,
        }
    }

    /// Write one occupied cell per coordinate
    ///
    /// Cells with negative `y` are skipped (they sit above a clipped spawn).
    /// Returns how many already-occupied cells were overwritten.
    ///
    /// # Panics
    ///
    /// Panics if any `x` is outside the grid or any `y` is at or above the top.
    pub fn place(
        &mut self,
        cells: &[(i8, i8)],
        color: ColorId,
        placement: PlacementId,
        shape: ShapeId,
    ) -> usize {
        let mut overwritten = 0;
        for &(x, y) in cells {
            if y < 0 {
                continue;
            }
            let idx = Self::index_or_panic(x, y);
            if self.cells[idx].is_some() {
                overwritten += 1;
            }
            self.cells[idx] = Some(Block {
                color,
                placement,
                shape,
            });
        }
        overwritten
    }

    /// Reset a cell to empty
    ///
    /// # Panics
    ///
    /// Panics when `(x, y)` is out of bounds.
    pub fn clear(&mut self, x: i8, y: i8) {
        let idx = Self::index_or_panic(x, y);
        self.cells[idx] = None;
    }

    /// Whether every cell in row `y` is occupied; rows outside the grid never are
    pub fn row_is_full(&self, y: usize) -> bool {
        if y >= GRID_HEIGHT as usize {
            return false;
        }
        self.row(y).iter().all(|cell| cell.is_some())
    }

    /// Delete row `y`, shift every row above it down by one, and open an empty top row
    ///
    /// # Panics
    ///
    /// Panics when `y` is not a row of the grid.
    pub fn remove_row(&mut self, y: usize) {
        let height = GRID_HEIGHT as usize;
        let width = GRID_WIDTH as usize;
        assert!(y < height, "row {} outside grid of height {}", y, height);

        // copy_within handles the overlapping ranges.
        self.cells.copy_within((y + 1) * width..height * width, y * width);
        self.cells[(height - 1) * width..].fill(None);
    }

    /// Cells of row `y`, left to right; empty for rows outside the grid
    pub fn row(&self, y: usize) -> &[Cell] {
        if y >= GRID_HEIGHT as usize {
            return &[];
        }
        let width = GRID_WIDTH as usize;
        &self.cells[y * width..(y + 1) * width]
    }

    /// Rows from the floor up
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(GRID_WIDTH as usize)
    }

    /// Iterate every cell with its coordinates, row 0 first
    pub fn iter(&self) -> impl Iterator<Item = (i8, i8, Cell)> + '_ {
        self.cells.iter().enumerate().map(|(idx, cell)| {
            let x = (idx % GRID_WIDTH as usize) as i8;
            let y = (idx / GRID_WIDTH as usize) as i8;
            (x, y, *cell)
        })
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}
