//! Rendering surface dimensions and the grids derived from them.

use crate::types::{
    BOARD_HEIGHT, BOARD_WIDTH, DEFAULT_SURFACE_HEIGHT, DEFAULT_SURFACE_WIDTH, SNAKE_CELL_PX,
};

/// Fixed pixel size of the surface a game is constructed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Surface {
    pub width_px: u32,
    pub height_px: u32,
}

impl Surface {
    pub fn new(width_px: u32, height_px: u32) -> Self {
        Self {
            width_px,
            height_px,
        }
    }

    /// Snake grid size: whole 24px cells that fit on the surface.
    pub fn snake_grid(&self) -> (u16, u16) {
        let cols = (self.width_px / SNAKE_CELL_PX).min(u16::MAX as u32) as u16;
        let rows = (self.height_px / SNAKE_CELL_PX).min(u16::MAX as u32) as u16;
        (cols, rows)
    }

    /// Tetris block size: the largest square block that fits the 10x20 board.
    pub fn tetris_block_px(&self) -> u32 {
        (self.width_px / BOARD_WIDTH as u32).min(self.height_px / BOARD_HEIGHT as u32)
    }
}

impl Default for Surface {
    fn default() -> Self {
        Self::new(DEFAULT_SURFACE_WIDTH, DEFAULT_SURFACE_HEIGHT)
    }
}
