//! Board module - manages the tetris grid
//!
//! The board is a 10x20 grid where each cell can be empty or filled with a piece kind.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//! Rows above the board (y < 0) are open space: pieces may overlap them while entering.

use crate::pieces::Piece;
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Whether a piece placed as given would hit a wall, the floor or a filled cell.
    ///
    /// Cells above the board only collide with the side walls.
    pub fn collides(&self, piece: &Piece) -> bool {
        piece.cells().iter().any(|&(x, y)| {
            x < 0
                || x >= BOARD_WIDTH as i8
                || y >= BOARD_HEIGHT as i8
                || (y >= 0 && self.is_occupied(x, y))
        })
    }

    /// Write the piece's cells into the board, tagged with its kind.
    ///
    /// Cells still above the board are dropped.
    pub fn merge(&mut self, piece: &Piece) {
        for (x, y) in piece.cells() {
            if y >= 0 {
                self.set(x, y, Some(piece.kind));
            }
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y).is_some_and(|row| row.iter().all(|cell| cell.is_some()))
    }

    /// Number of filled cells in a row (0 for out-of-range rows)
    pub fn filled_in_row(&self, y: usize) -> usize {
        self.row(y)
            .map(|row| row.iter().filter(|cell| cell.is_some()).count())
            .unwrap_or(0)
    }

    /// Cells of one row, left to right
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= BOARD_HEIGHT as usize {
            return None;
        }
        let start = y * BOARD_WIDTH as usize;
        Some(&self.cells[start..start + BOARD_WIDTH as usize])
    }

    /// Remove row `y`, shifting every row above it down by one and
    /// inserting an empty row at the top.
    fn remove_row(&mut self, y: usize) {
        let width = BOARD_WIDTH as usize;

        // copy_within handles the overlapping ranges
        for row in (1..=y).rev() {
            let src_start = (row - 1) * width;
            self.cells
                .copy_within(src_start..src_start + width, row * width);
        }

        self.cells[..width].fill(None);
    }

    /// Remove every full row and return how many were removed.
    ///
    /// Scans bottom to top. After a removal the same index is checked again,
    /// because the row above has just slid into it; this keeps multi-line
    /// clears (adjacent or not) within a single pass.
    pub fn sweep(&mut self) -> u32 {
        let mut lines = 0;
        let mut y = BOARD_HEIGHT as usize;
        while y > 0 {
            if self.is_row_full(y - 1) {
                self.remove_row(y - 1);
                lines += 1;
            } else {
                y -= 1;
            }
        }
        lines
    }

    /// Write the board into a compact grid of piece codes (0 = empty).
    pub fn write_u8_grid(&self, out: &mut [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        let width = BOARD_WIDTH as usize;
        for (y, row) in out.iter_mut().enumerate() {
            for (x, slot) in row.iter_mut().enumerate() {
                *slot = self.cells[y * width + x].map(|k| k.code()).unwrap_or(0);
            }
        }
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::Piece;
    use crate::types::PieceKind;

    fn fill_row(board: &mut Board, y: i8) {
        for x in 0..BOARD_WIDTH as i8 {
            board.set(x, y, Some(PieceKind::I));
        }
    }

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 0), Some(9));
        assert_eq!(Board::index(0, 1), Some(10));
        assert_eq!(Board::index(9, 19), Some(199));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 20), None);
    }

    #[test]
    fn test_collides_walls_and_floor() {
        let board = Board::new();
        let o = Piece::spawn(PieceKind::O, 0);
        assert!(!board.collides(&o));
        assert!(board.collides(&Piece { x: -1, ..o }));
        assert!(board.collides(&Piece { x: 9, ..o }));
        assert!(board.collides(&Piece { y: 19, ..o }));
        assert!(!board.collides(&Piece { y: 18, ..o }));
    }

    #[test]
    fn test_cells_above_board_only_hit_side_walls() {
        let mut board = Board::new();
        fill_row(&mut board, 0);
        // Two rows above the top: fully out of sight, nothing to hit
        let o = Piece::spawn(PieceKind::O, -2);
        assert!(!board.collides(&o));
        // Lower half reaches row 0 which is filled
        assert!(board.collides(&o.shifted(0, 1)));
        assert!(board.collides(&Piece { x: -1, ..o }));
    }

    #[test]
    fn test_merge_discards_cells_above_board() {
        let mut board = Board::new();
        let o = Piece::spawn(PieceKind::O, -1);
        board.merge(&o);
        assert_eq!(board.filled_in_row(0), 2);
        assert_eq!(board.get(4, 0), Some(Some(PieceKind::O)));
        assert_eq!(board.cells().iter().filter(|c| c.is_some()).count(), 2);
    }

    #[test]
    fn test_sweep_non_adjacent_rows() {
        let mut board = Board::new();
        fill_row(&mut board, 19);
        fill_row(&mut board, 17);
        board.set(0, 18, Some(PieceKind::T));
        board.set(3, 16, Some(PieceKind::S));

        assert_eq!(board.sweep(), 2);

        // The partial rows slid down past the removed ones.
        assert_eq!(board.get(0, 19), Some(Some(PieceKind::T)));
        assert_eq!(board.get(3, 18), Some(Some(PieceKind::S)));
        assert_eq!(board.filled_in_row(19), 1);
        assert_eq!(board.filled_in_row(18), 1);
        assert!((0..BOARD_HEIGHT as usize).all(|y| !board.is_row_full(y)));
    }

    #[test]
    fn test_sweep_adjacent_rows_rechecks_same_index() {
        let mut board = Board::new();
        for y in 16..20 {
            fill_row(&mut board, y);
        }
        board.set(9, 15, Some(PieceKind::L));

        assert_eq!(board.sweep(), 4);
        assert_eq!(board.get(9, 19), Some(Some(PieceKind::L)));
        assert_eq!(board.cells().iter().filter(|c| c.is_some()).count(), 1);
    }

    #[test]
    fn test_sweep_with_nothing_full() {
        let mut board = Board::new();
        board.set(4, 19, Some(PieceKind::Z));
        let before = board.clone();
        assert_eq!(board.sweep(), 0);
        assert_eq!(board, before);
    }

    #[test]
    fn test_write_u8_grid() {
        let mut board = Board::new();
        board.set(0, 0, Some(PieceKind::I));
        board.set(9, 19, Some(PieceKind::L));
        let mut grid = [[0u8; 10]; 20];
        board.write_u8_grid(&mut grid);
        assert_eq!(grid[0][0], 1);
        assert_eq!(grid[19][9], 7);
        assert_eq!(grid[10][5], 0);
    }
}
