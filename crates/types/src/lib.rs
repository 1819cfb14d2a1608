//! Shared types and constants for both arcade games.
//!
//! Everything here is plain data with no behavior beyond small conversions, so it can be used from the simulators, the engine, the input
//! mapping and the terminal views alike.
//!
//! # Tetris timing and scoring
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DROP_INTERVAL_MS` | 700 | Gravity interval after a restart |
//! | `DROP_INTERVAL_FLOOR_MS` | 120 | Fastest gravity interval |
//! | `DROP_INTERVAL_STEP_MS` | 20 | Interval reduction per cleared line |
//! | `SOFT_DROP_POINTS` | 1 | Points per manual soft-drop step |
//! | `HARD_DROP_POINTS_PER_ROW` | 2 | Points per row of a hard drop |
//!
//! # Snake timing and scoring
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `SNAKE_TICK_MS` | 140 | Tick interval after a reset |
//! | `SNAKE_TICK_FLOOR_MS` | 70 | Interval only shrinks while above this |
//! | `SNAKE_TICK_STEP_MS` | 2 | Interval reduction per food eaten |
//! | `FOOD_SCORE` | 10 | Points per food eaten |
//!
//! # Examples
//!
//! ```
//! use arcade_types::{Direction, GameId, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::from_code(PieceKind::T.code()), Some(PieceKind::T));
//! assert!(Direction::RIGHT.is_same_axis(Direction::LEFT));
//! assert_eq!(GameId::from_str("Snake"), Some(GameId::Snake));
//! assert_eq!((BOARD_WIDTH, BOARD_HEIGHT), (10, 20));
//! ```

use serde::Serialize;

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Spawn column for new pieces (top-center)
pub const SPAWN_X: i8 = (BOARD_WIDTH / 2) as i8 - 1;

/// Spawn row for the first piece after a restart
pub const SPAWN_Y: i8 = 0;

/// Spawn row for pieces following a lock (one row above the visible board)
pub const SPAWN_Y_AFTER_LOCK: i8 = -1;

/// Gravity interval after a restart
pub const DROP_INTERVAL_MS: u32 = 700;

/// Minimum gravity interval
pub const DROP_INTERVAL_FLOOR_MS: u32 = 120;

/// Gravity speed-up per cleared line
pub const DROP_INTERVAL_STEP_MS: u32 = 20;

/// Points awarded per manual soft-drop step
pub const SOFT_DROP_POINTS: u32 = 1;

/// Points awarded per row descended by a hard drop
pub const HARD_DROP_POINTS_PER_ROW: u32 = 2;

/// Line clear scoring table, indexed by lines cleared in one lock.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Snake cell size in surface pixels
pub const SNAKE_CELL_PX: u32 = 24;

/// Snake tick interval after a reset
pub const SNAKE_TICK_MS: u32 = 140;

/// The snake only speeds up while its interval is above this value
pub const SNAKE_TICK_FLOOR_MS: u32 = 70;

/// Snake tick speed-up per food eaten
pub const SNAKE_TICK_STEP_MS: u32 = 2;

/// Points per food eaten
pub const FOOD_SCORE: u32 = 10;

/// Default surface width in pixels (matches the original canvas)
pub const DEFAULT_SURFACE_WIDTH: u32 = 480;

/// Default surface height in pixels
pub const DEFAULT_SURFACE_HEIGHT: u32 = 640;

/// Default host frame interval (~60 FPS)
pub const FRAME_MS: u32 = 16;

/// The seven tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in a fixed order; random spawns index into this.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Uppercase letter used by views
    pub fn letter(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::J => "J",
            PieceKind::L => "L",
        }
    }

    /// Compact grid code (1..=7); 0 is reserved for empty cells.
    pub fn code(&self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::O => 2,
            PieceKind::T => 3,
            PieceKind::S => 4,
            PieceKind::Z => 5,
            PieceKind::J => 6,
            PieceKind::L => 7,
        }
    }

    /// Inverse of [`PieceKind::code`]
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1..=7 => Some(Self::ALL[(code - 1) as usize]),
            _ => None,
        }
    }
}

/// A cell on the tetris board: `None` is empty, `Some(kind)` is filled.
pub type Cell = Option<PieceKind>;

/// Unit direction vector for the snake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Direction {
    pub x: i8,
    pub y: i8,
}

impl Direction {
    pub const UP: Direction = Direction { x: 0, y: -1 };
    pub const DOWN: Direction = Direction { x: 0, y: 1 };
    pub const LEFT: Direction = Direction { x: -1, y: 0 };
    pub const RIGHT: Direction = Direction { x: 1, y: 0 };

    /// True when both directions move along the same axis.
    ///
    /// The snake rejects a pending direction that shares the current axis,
    /// which covers both the reversal and the no-op case.
    pub fn is_same_axis(&self, other: Direction) -> bool {
        self.x.abs() == other.x.abs() && self.y.abs() == other.y.abs()
    }
}

/// Inputs understood by the snake simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnakeAction {
    /// Buffer a direction change for the next tick
    Turn(Direction),
}

/// Inputs understood by the tetris simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TetrisAction {
    MoveLeft,
    MoveRight,
    /// Rotate 90° clockwise with a simple horizontal kick
    Rotate,
    /// One row down (1 point per step)
    SoftDrop,
    /// Drop to the floor and lock (2 points per row)
    HardDrop,
}

/// A key press already mapped to the game it targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameInput {
    Snake(SnakeAction),
    Tetris(TetrisAction),
}

/// The games the arcade can host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GameId {
    Snake,
    Tetris,
}

impl GameId {
    /// Parse a game id (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "snake" => Some(GameId::Snake),
            "tetris" => Some(GameId::Tetris),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameId::Snake => "snake",
            GameId::Tetris => "tetris",
        }
    }

    /// Display title shown in the status panel
    pub fn title(&self) -> &'static str {
        match self {
            GameId::Snake => "Snake",
            GameId::Tetris => "Tetris",
        }
    }
}
