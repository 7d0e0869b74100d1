//! Shape library - canonical tetromino matrices and clockwise rotation
//!
//! Each shape is a small boolean matrix whose row 0 is the *top* row of the
//! shape. Pieces project that matrix onto the grid with `gx = x + col` and
//! `gy = y - row`, so the matrix grows downward while the grid grows upward.

use crate::types::{ShapeId, MAX_SHAPE_EXTENT};

/// Fixed-capacity boolean matrix describing one orientation of a shape
///
/// Only the top-left `rows x cols` region is meaningful; everything outside it
/// is always `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeMatrix {
    rows: u8,
    cols: u8,
    cells: [[bool; MAX_SHAPE_EXTENT]; MAX_SHAPE_EXTENT],
}

const fn matrix(rows: u8, cols: u8, bits: [[u8; MAX_SHAPE_EXTENT]; MAX_SHAPE_EXTENT]) -> ShapeMatrix {
    let mut cells = [[false; MAX_SHAPE_EXTENT]; MAX_SHAPE_EXTENT];
    let mut r = 0;
    while r < MAX_SHAPE_EXTENT {
        let mut c = 0;
        while c < MAX_SHAPE_EXTENT {
            cells[r][c] = bits[r][c] != 0;
            c += 1;
        }
        r += 1;
    }
    ShapeMatrix { rows, cols, cells }
}

/// Canonical orientations, indexed by `ShapeId::index()`
const CANONICAL: [ShapeMatrix; 7] = [
    // I
    matrix(1, 4, [[1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
    // O
    matrix(2, 2, [[1, 1, 0, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
    // T
    matrix(2, 3, [[0, 1, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
    // S
    matrix(2, 3, [[0, 1, 1, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
    // Z
    matrix(2, 3, [[1, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
    // J
    matrix(3, 2, [[1, 0, 0, 0], [1, 0, 0, 0], [1, 1, 0, 0], [0, 0, 0, 0]]),
    // L
    matrix(3, 2, [[0, 1, 0, 0], [0, 1, 0, 0], [1, 1, 0, 0], [0, 0, 0, 0]]),
];

/// Get the canonical (spawn) orientation of a shape
pub fn canonical(shape: ShapeId) -> ShapeMatrix {
    CANONICAL[shape.index()]
}

/// Rotate a matrix 90° clockwise
///
/// Reverse the row order, then transpose: `result[col][rows - 1 - row] = input[row][col]`.
pub fn rotate_clockwise_90(input: &ShapeMatrix) -> ShapeMatrix {
    let rows = input.rows as usize;
    let cols = input.cols as usize;
    let mut cells = [[false; MAX_SHAPE_EXTENT]; MAX_SHAPE_EXTENT];
    for row in 0..rows {
        for col in 0..cols {
            cells[col][rows - 1 - row] = input.cells[row][col];
        }
    }
    ShapeMatrix {
        rows: input.cols,
        cols: input.rows,
        cells,
    }
}

impl ShapeMatrix {
    /// Build a matrix from rows of 0/1 values
    ///
    /// Panics if the rows are ragged or exceed the 4x4 capacity.
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        assert!(
            !rows.is_empty() && rows.len() <= MAX_SHAPE_EXTENT,
            "shape matrix needs 1..={} rows, got {}",
            MAX_SHAPE_EXTENT,
            rows.len()
        );
        let cols = rows[0].len();
        assert!(
            cols > 0 && cols <= MAX_SHAPE_EXTENT,
            "shape matrix needs 1..={} columns, got {}",
            MAX_SHAPE_EXTENT,
            cols
        );

        let mut cells = [[false; MAX_SHAPE_EXTENT]; MAX_SHAPE_EXTENT];
        for (r, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), cols, "ragged shape matrix at row {}", r);
            for (c, &bit) in row.iter().enumerate() {
                cells[r][c] = bit != 0;
            }
        }

        Self {
            rows: rows.len() as u8,
            cols: cols as u8,
            cells,
        }
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Whether the cell at `(row, col)` is filled; false outside the matrix
    pub fn get(&self, row: usize, col: usize) -> bool {
        row < self.rows as usize && col < self.cols as usize && self.cells[row][col]
    }

    /// Iterate filled cells as `(col, row)` pairs, top row first
    pub fn occupied(&self) -> impl Iterator<Item = (u8, u8)> {
        let m = *self;
        (0..m.rows).flat_map(move |row| {
            (0..m.cols).filter_map(move |col| m.cells[row as usize][col as usize].then_some((col, row)))
        })
    }

    /// Number of filled cells
    pub fn filled(&self) -> usize {
        self.occupied().count()
    }

    pub fn rotated_clockwise(&self) -> Self {
        rotate_clockwise_90(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_shapes_have_four_cells() {
        for shape in ShapeId::ALL {
            assert_eq!(canonical(shape).filled(), 4, "{:?}", shape);
        }
    }

    #[test]
    fn test_t_shape_rows() {
        let t = canonical(ShapeId::T);
        assert_eq!(t, ShapeMatrix::from_rows(&[&[0, 1, 0], &[1, 1, 1]]));
    }

    #[test]
    fn test_rotate_swaps_dimensions() {
        let i = canonical(ShapeId::I);
        let r = rotate_clockwise_90(&i);
        assert_eq!((r.rows(), r.cols()), (4, 1));
        assert_eq!(r.filled(), 4);
    }

    #[test]
    fn test_rotate_t_clockwise() {
        // 010      10
        // 111  ->  11
        //          10
        let r = canonical(ShapeId::T).rotated_clockwise();
        assert_eq!(r, ShapeMatrix::from_rows(&[&[1, 0], &[1, 1], &[1, 0]]));
    }

    #[test]
    fn test_four_rotations_are_identity() {
        for shape in ShapeId::ALL {
            let m = canonical(shape);
            let back = m
                .rotated_clockwise()
                .rotated_clockwise()
                .rotated_clockwise()
                .rotated_clockwise();
            assert_eq!(m, back, "{:?}", shape);
        }
    }

    #[test]
    fn test_occupied_lists_col_row_pairs() {
        let j = canonical(ShapeId::J);
        let cells: Vec<_> = j.occupied().collect();
        assert_eq!(cells, vec![(0, 0), (0, 1), (0, 2), (1, 2)]);
    }

    #[test]
    #[should_panic(expected = "ragged")]
    fn test_from_rows_rejects_ragged_input() {
        ShapeMatrix::from_rows(&[&[1, 1], &[1]]);
    }
}
