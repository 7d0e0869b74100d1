//! Piece geometry - projecting shape matrices onto the grid
//!
//! A piece is a shape matrix plus an anchor. Matrix cell `(col, row)` lands on
//! grid cell `(anchor.x + col, anchor.y - row)`: matrix rows grow downward,
//! grid rows grow upward.

use arrayvec::ArrayVec;

use crate::grid::Grid;
use crate::shapes::{canonical, ShapeMatrix};
use crate::types::{ShapeId, GRID_HEIGHT, GRID_WIDTH, MAX_SHAPE_EXTENT};

/// Projected grid cells of one piece
pub type PieceCells = ArrayVec<(i8, i8), { MAX_SHAPE_EXTENT * MAX_SHAPE_EXTENT }>;

/// Reference grid coordinate a matrix is projected from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Anchor {
    pub x: i8,
    pub y: i8,
}

impl Anchor {
    pub fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// Shifted anchor, or `None` when the shift leaves the `i8` range
    pub fn offset(self, dx: i8, dy: i8) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
        })
    }

    /// Horizontally centred on the top row: `x = width/2 - cols/2`, `y = height - 1`
    pub fn spawn(matrix: &ShapeMatrix) -> Self {
        Self {
            x: (GRID_WIDTH / 2) as i8 - (matrix.cols() / 2) as i8,
            y: GRID_HEIGHT as i8 - 1,
        }
    }
}

/// Project every filled matrix cell onto grid coordinates
///
/// Coordinates saturate at the `i8` bounds, which all lie outside the grid.
pub fn project(matrix: &ShapeMatrix, anchor: Anchor) -> PieceCells {
    matrix
        .occupied()
        .map(|(col, row)| {
            (
                anchor.x.saturating_add(col as i8),
                anchor.y.saturating_sub(row as i8),
            )
        })
        .collect()
}

/// Whether `matrix` fits at `anchor`: inside the grid and clear of settled cells
///
/// This one predicate backs spawn, movement and rotation.
pub fn can_place(grid: &Grid, matrix: &ShapeMatrix, anchor: Anchor) -> bool {
    matrix.occupied().all(|(col, row)| {
        let gx = i16::from(anchor.x) + i16::from(col);
        let gy = i16::from(anchor.y) - i16::from(row);
        (0..i16::from(GRID_WIDTH)).contains(&gx)
            && (0..i16::from(GRID_HEIGHT)).contains(&gy)
            && !grid.is_occupied(gx as i8, gy as i8)
    })
}

/// A shape kind together with its current orientation (next/helper slots)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Preview {
    pub shape: ShapeId,
    pub matrix: ShapeMatrix,
}

impl Preview {
    pub fn canonical(shape: ShapeId) -> Self {
        Self {
            shape,
            matrix: canonical(shape),
        }
    }
}

/// The active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub shape: ShapeId,
    pub matrix: ShapeMatrix,
    pub anchor: Anchor,
}

impl Piece {
    /// Canonical orientation at the spawn anchor
    pub fn spawn(shape: ShapeId) -> Self {
        Self::at_spawn(Preview::canonical(shape))
    }

    /// Keep the preview's orientation, recentred at the spawn anchor
    pub fn at_spawn(preview: Preview) -> Self {
        Self {
            shape: preview.shape,
            matrix: preview.matrix,
            anchor: Anchor::spawn(&preview.matrix),
        }
    }

    pub fn cells(&self) -> PieceCells {
        project(&self.matrix, self.anchor)
    }

    pub fn fits(&self, grid: &Grid) -> bool {
        can_place(grid, &self.matrix, self.anchor)
    }

    /// Shifted by `(dx, dy)`, or `None` when the anchor would overflow
    pub fn moved(&self, dx: i8, dy: i8) -> Option<Self> {
        Some(Self {
            anchor: self.anchor.offset(dx, dy)?,
            ..*self
        })
    }

    /// Rotated clockwise about the same anchor (no kicks)
    pub fn rotated(&self) -> Self {
        Self {
            matrix: self.matrix.rotated_clockwise(),
            ..*self
        }
    }

    pub fn preview(&self) -> Preview {
        Preview {
            shape: self.shape,
            matrix: self.matrix,
        }
    }
}
