//! Pieces module - tetromino shape matrices and the falling piece
//!
//! Shapes are small binary matrices (at most 4x4). Rotation builds a new
//! matrix instead of mutating the old one, so a failed rotation can simply
//! keep the previous shape.

use arrayvec::ArrayVec;
use serde::Serialize;

use crate::types::{PieceKind, SPAWN_X};

/// Largest matrix side length among the tetrominoes
pub const MAX_SHAPE_SIDE: usize = 4;

/// Upper bound on filled cells in a shape matrix
pub const MAX_PIECE_CELLS: usize = MAX_SHAPE_SIDE * MAX_SHAPE_SIDE;

/// Offset of a filled cell: (column, row)
pub type CellOffset = (i8, i8);

/// Filled cells of a shape, without allocation
pub type CellList = ArrayVec<CellOffset, MAX_PIECE_CELLS>;

/// Binary shape matrix, row-major.
///
/// Only the `rows x cols` region is meaningful; everything outside it is
/// always `false`, so the derived equality compares shapes exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeMatrix {
    rows: u8,
    cols: u8,
    bits: [[bool; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE],
}

impl ShapeMatrix {
    /// Build a matrix from rows of 0/1 values.
    ///
    /// Returns `None` for empty, ragged or oversized input.
    pub fn from_rows(rows: &[&[u8]]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first()?.len();
        if height > MAX_SHAPE_SIDE
            || width == 0
            || width > MAX_SHAPE_SIDE
            || rows.iter().any(|r| r.len() != width)
        {
            return None;
        }

        let mut bits = [[false; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE];
        for (y, row) in rows.iter().enumerate() {
            for (x, &v) in row.iter().enumerate() {
                bits[y][x] = v != 0;
            }
        }

        Some(Self {
            rows: height as u8,
            cols: width as u8,
            bits,
        })
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Whether (col, row) is filled; out-of-range is empty.
    pub fn is_filled(&self, col: usize, row: usize) -> bool {
        row < self.rows as usize && col < self.cols as usize && self.bits[row][col]
    }

    /// Rotate 90° clockwise: an N x M matrix becomes M x N.
    pub fn rotated(&self) -> Self {
        let n = self.rows as usize;
        let m = self.cols as usize;
        let mut bits = [[false; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE];
        for y in 0..n {
            for x in 0..m {
                bits[x][n - 1 - y] = self.bits[y][x];
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            bits,
        }
    }

    /// Filled cells as (col, row) offsets, scanned row by row.
    pub fn cells(&self) -> CellList {
        let mut out = CellList::new();
        for y in 0..self.rows as usize {
            for x in 0..self.cols as usize {
                if self.bits[y][x] {
                    out.push((x as i8, y as i8));
                }
            }
        }
        out
    }
}

/// Spawn shape for a piece kind
pub fn shape_of(kind: PieceKind) -> ShapeMatrix {
    let rows: &[&[u8]] = match kind {
        PieceKind::I => &[&[1, 1, 1, 1]],
        PieceKind::O => &[&[1, 1], &[1, 1]],
        PieceKind::T => &[&[0, 1, 0], &[1, 1, 1]],
        PieceKind::S => &[&[0, 1, 1], &[1, 1, 0]],
        PieceKind::Z => &[&[1, 1, 0], &[0, 1, 1]],
        PieceKind::J => &[&[1, 0, 0], &[1, 1, 1]],
        PieceKind::L => &[&[0, 0, 1], &[1, 1, 1]],
    };
    // Static tables above are always well-formed.
    match ShapeMatrix::from_rows(rows) {
        Some(shape) => shape,
        None => unreachable!("malformed tetromino table for {:?}", kind),
    }
}

/// The falling piece: kind, current shape and board position of its
/// top-left matrix corner. `y` may be negative while the piece enters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: ShapeMatrix,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    /// New piece in spawn orientation at the spawn column and the given row
    pub fn spawn(kind: PieceKind, y: i8) -> Self {
        Self {
            kind,
            shape: shape_of(kind),
            x: SPAWN_X,
            y,
        }
    }

    /// Same piece moved by (dx, dy)
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Absolute board coordinates of every filled cell
    pub fn cells(&self) -> CellList {
        let mut out = self.shape.cells();
        for cell in out.iter_mut() {
            cell.0 += self.x;
            cell.1 += self.y;
        }
        out
    }
}

/// Render-facing copy of the falling piece
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PieceSnapshot {
    pub kind: PieceKind,
    pub cells: CellList,
}

impl From<&Piece> for PieceSnapshot {
    fn from(piece: &Piece) -> Self {
        Self {
            kind: piece.kind,
            cells: piece.cells(),
        }
    }
}
