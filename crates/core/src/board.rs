//! Board module - manages the locked-cell grid
//!
//! The board is a `width x height` grid where each cell is empty or holds the
//! kind (and so the color) of the piece that locked there.
//! Storage is a flat row-major vector: index = `y * width + x`.
//! Coordinates: `x` grows to the right, `y` grows upwards, row 0 is the bottom.

use arrayvec::ArrayVec;

use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, MAX_CLEAR_ROWS};

/// Row indices of the rows that were full, bottom to top.
pub type FullRows = ArrayVec<usize, MAX_CLEAR_ROWS>;

/// The game board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: u8,
    height: u8,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board of the given size
    pub fn new(width: u8, height: u8) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    /// Build a board from ASCII rows, listed top to bottom.
    ///
    /// The rows describe the bottom `rows.len()` rows of the board; everything
    /// above is empty. `.` and space are empty, a piece letter (`IOTSZJL`,
    /// either case) locks that kind and `#` locks an `O` cell.
    ///
    /// ```
    /// use blockdrop_core::Board;
    /// use blockdrop_types::PieceKind;
    ///
    /// let board = Board::from_ascii(4, 4, &["T...", "####"]);
    /// assert_eq!(board.get(0, 1), Some(Some(PieceKind::T)));
    /// assert!(board.is_row_full(0));
    /// ```
    pub fn from_ascii(width: u8, height: u8, rows: &[&str]) -> Self {
        let mut board = Self::new(width, height);
        let count = rows.len().min(height as usize);
        for (i, row) in rows.iter().rev().take(count).enumerate() {
            for (x, ch) in row.chars().take(width as usize).enumerate() {
                let cell = match ch {
                    '#' => Some(PieceKind::O),
                    c => PieceKind::from_str(c.encode_utf8(&mut [0; 4])),
                };
                board.set(x as i8, i as i8, cell);
            }
        }
        board
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i8, y: i8) -> Option<usize> {
        if self.is_out_of_bounds(x, y) {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    /// Get width of the board
    pub fn width(&self) -> u8 {
        self.width
    }

    /// Get height of the board
    pub fn height(&self) -> u8 {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is valid (within bounds and empty)
    pub fn is_valid(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if position is out of bounds
    pub fn is_out_of_bounds(&self, x: i8, y: i8) -> bool {
        x < 0
            || y < 0
            || i16::from(x) >= i16::from(self.width)
            || i16::from(y) >= i16::from(self.height)
    }

    /// Cells of row `y`, left to right
    pub fn row(&self, y: usize) -> &[Cell] {
        let width = self.width as usize;
        let start = y * width;
        &self.cells[start..start + width]
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.height as usize {
            return false;
        }
        self.row(y).iter().all(|cell| cell.is_some())
    }

    /// Indices of every full row, bottom to top.
    ///
    /// A single lock can complete at most four rows; more than that means an
    /// earlier clear was skipped.
    pub fn full_rows(&self) -> FullRows {
        let mut rows = FullRows::new();
        for y in 0..self.height as usize {
            if self.is_row_full(y) && rows.try_push(y).is_err() {
                debug_assert!(false, "more than {} full rows on the board", MAX_CLEAR_ROWS);
                break;
            }
        }
        rows
    }

    /// Remove the given rows and drop everything above them.
    ///
    /// Builds a fresh cell array and copies each surviving row, in its original
    /// bottom-to-top order, into consecutive rows starting at 0. `rows` must be
    /// sorted ascending.
    pub fn remove_rows(&mut self, rows: &[usize]) {
        if rows.is_empty() {
            return;
        }
        let width = self.width as usize;
        let mut next = Vec::with_capacity(self.cells.len());
        for y in 0..self.height as usize {
            if rows.binary_search(&y).is_err() {
                next.extend_from_slice(self.row(y));
            }
        }
        next.resize(self.cells.len(), None);
        debug_assert_eq!(next.len() % width, 0);
        self.cells = next;
    }

    /// Clear all full rows and return the row indices that were cleared (bottom to top)
    pub fn clear_full_rows(&mut self) -> FullRows {
        let rows = self.full_rows();
        self.remove_rows(&rows);
        rows
    }

    /// Write `kind` into every absolute cell that lies on the board.
    ///
    /// Cells above the top (or otherwise off the board) are skipped. Returns the
    /// number of cells written.
    pub fn lock_cells(&mut self, cells: &[(i8, i8)], kind: PieceKind) -> usize {
        let mut written = 0;
        for &(x, y) in cells {
            let Some(idx) = self.index(x, y) else {
                continue;
            };
            debug_assert!(
                self.cells[idx].is_none(),
                "locking over occupied cell ({}, {})",
                x,
                y
            );
            self.cells[idx] = Some(kind);
            written += 1;
        }
        written
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BOARD_WIDTH, BOARD_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_index_calculation() {
        let board = Board::default();
        assert_eq!(board.index(0, 0), Some(0));
        assert_eq!(board.index(9, 0), Some(9));
        assert_eq!(board.index(0, 1), Some(10));
        assert_eq!(board.index(9, 19), Some(199));
        assert_eq!(board.index(-1, 0), None);
        assert_eq!(board.index(10, 0), None);
        assert_eq!(board.index(0, 20), None);
    }

    #[test]
    fn test_board_flat_array() {
        let mut board = Board::default();

        board.set(0, 0, Some(PieceKind::I));
        board.set(5, 10, Some(PieceKind::T));

        assert_eq!(board.get(0, 0), Some(Some(PieceKind::I)));
        assert_eq!(board.get(5, 10), Some(Some(PieceKind::T)));

        assert_eq!(board.cells[0], Some(PieceKind::I));
        assert_eq!(board.cells[10 * 10 + 5], Some(PieceKind::T));
    }

    #[test]
    fn test_from_ascii_bottom_aligned() {
        let board = Board::from_ascii(4, 6, &["I...", ".Z..", "####"]);
        assert_eq!(board.get(0, 2), Some(Some(PieceKind::I)));
        assert_eq!(board.get(1, 1), Some(Some(PieceKind::Z)));
        assert!(board.is_row_full(0));
        assert!(!board.is_row_full(1));
        assert_eq!(board.occupied_count(), 6);
    }

    #[test]
    fn test_remove_rows_rebuilds_storage() {
        let mut board = Board::from_ascii(4, 5, &["T...", "####", ".S..", "####"]);
        board.remove_rows(&[0, 2]);

        assert_eq!(board.get(1, 0), Some(Some(PieceKind::S)));
        assert_eq!(board.get(0, 1), Some(Some(PieceKind::T)));
        assert_eq!(board.occupied_count(), 2);
        assert_eq!(board.cells.len(), 20);
    }

    #[test]
    fn test_lock_cells_skips_cells_above_top() {
        let mut board = Board::new(4, 4);
        let written = board.lock_cells(&[(0, 3), (1, 3), (0, 4), (1, 4)], PieceKind::O);
        assert_eq!(written, 2);
        assert_eq!(board.occupied_count(), 2);
    }
}
