//! Mapping of an operation onto the Tensix core grid.
//!
//! The device is drawn as a 12x12 array of cores. Conceptually the cores
//! sit on a 2D torus network, but the mapping itself does no wraparound:
//! a coordinate either matches a cell exactly or never lights up.

use super::report::Operation;

/// Rows in the rendered core grid.
pub const GRID_ROWS: usize = 12;
/// Columns in the rendered core grid.
pub const GRID_COLS: usize = 12;

/// Whether `(row, col)` is one of the operation's cores.
///
/// Exact equality on both coordinates; duplicates in `cores` are harmless.
pub fn is_active(operation: &Operation, row: i64, col: i64) -> bool {
    operation.cores.iter().any(|core| core.row() == row && core.col() == col)
}

/// Per-cell activity for one operation over a fixed-size grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridMask {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl GridMask {
    /// A grid with no active cells.
    pub fn empty(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![false; rows * cols],
        }
    }

    /// Evaluate [`is_active`] for every cell of a `rows x cols` grid.
    pub fn from_operation(operation: &Operation, rows: usize, cols: usize) -> Self {
        let mut cells = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                cells.push(is_active(operation, row as i64, col as i64));
            }
        }
        Self { rows, cols, cells }
    }

    /// Mask for the device's 12x12 grid.
    pub fn device(operation: &Operation) -> Self {
        Self::from_operation(operation, GRID_ROWS, GRID_COLS)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Activity of a cell; out-of-range cells are inactive.
    pub fn get(&self, row: usize, col: usize) -> bool {
        if row >= self.rows || col >= self.cols {
            return false;
        }
        self.cells[row * self.cols + col]
    }

    /// Number of distinct cells lit inside the grid.
    pub fn active_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_active_membership() {
        let op = Operation::new(1, "matmul", &[(2, 2), (3, 3)]);
        assert!(is_active(&op, 2, 2));
        assert!(is_active(&op, 3, 3));
        assert!(!is_active(&op, 2, 3));

        let op = Operation::new(2, "single", &[(2, 2)]);
        assert!(!is_active(&op, 9, 9));

        let op = Operation::new(3, "idle", &[]);
        assert!(!is_active(&op, 0, 0));
    }

    #[test]
    fn test_no_wraparound() {
        let op = Operation::new(1, "edge", &[(12, 0), (-1, 11)]);
        assert!(!is_active(&op, 0, 0));
        assert!(!is_active(&op, 11, 11));
        assert!(is_active(&op, 12, 0));
        assert!(is_active(&op, -1, 11));
    }

    #[test]
    fn test_mask_ignores_out_of_bounds_and_duplicates() {
        let op = Operation::new(1, "mixed", &[(0, 0), (0, 0), (11, 11), (12, 12), (-3, 4)]);
        let mask = GridMask::device(&op);
        assert_eq!(mask.rows(), GRID_ROWS);
        assert_eq!(mask.cols(), GRID_COLS);
        assert!(mask.get(0, 0));
        assert!(mask.get(11, 11));
        assert!(!mask.get(12, 12));
        assert_eq!(mask.active_count(), 2);
    }

    #[test]
    fn test_mask_matches_is_active_everywhere() {
        let op = Operation::new(4, "attention", &[(3, 5), (4, 6), (5, 7)]);
        let mask = GridMask::from_operation(&op, 8, 8);
        for row in 0..8 {
            for col in 0..8 {
                assert_eq!(mask.get(row, col), is_active(&op, row as i64, col as i64));
            }
        }
    }

    #[test]
    fn test_is_active_is_idempotent() {
        let op = Operation::new(1, "ffn", &[(0, 5), (1, 6)]);
        assert_eq!(is_active(&op, 1, 6), is_active(&op, 1, 6));
        assert_eq!(GridMask::device(&op), GridMask::device(&op));
    }

    #[test]
    fn test_empty_mask() {
        let mask = GridMask::empty(3, 4);
        assert_eq!(mask.active_count(), 0);
        assert!(!mask.get(2, 3));
    }
}
