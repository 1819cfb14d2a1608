//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains both simulators and nothing else. It has **no
//! dependencies** on terminals, clocks or I/O, which keeps it:
//!
//! - **Deterministic**: randomness comes from an injected [`RandomSource`]
//! - **Testable**: scripted random sources pin down exact outcomes
//! - **Portable**: any host that can count milliseconds can drive it
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 tetris grid with collision, merge and sweep
//! - [`pieces`]: tetromino shape matrices, rotation and the falling piece
//! - [`tetris`]: tetris game state, gravity, locking and scoring
//! - [`snake`]: snake game state, ticks, food and collisions
//! - [`scoring`]: score tables and speed curves for both games
//! - [`rng`]: random source trait, LCG and scripted sources
//!
//! # Example
//!
//! ```
//! use arcade_core::{SimpleRng, TetrisGame};
//! use arcade_core::types::TetrisAction;
//!
//! let mut game = TetrisGame::new(SimpleRng::new(12345));
//! game.apply_action(TetrisAction::MoveRight);
//! game.apply_action(TetrisAction::Rotate);
//! game.apply_action(TetrisAction::HardDrop);
//!
//! assert!(game.score() > 0); // Hard drop awards points
//! ```
//!
//! # Timing
//!
//! Both games are fixed-timestep simulations driven by a variable clock:
//! the host passes elapsed milliseconds every frame and the game decides
//! when a step is due.
//!
//! - **Tetris**: gravity step once the accumulator exceeds the drop interval
//!   (700ms, 20ms faster per cleared line, 120ms floor)
//! - **Snake**: one tick per elapsed interval (140ms, 2ms faster per food
//!   while above 70ms)

pub mod board;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snake;
pub mod tetris;

pub use arcade_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use pieces::{shape_of, Piece, PieceSnapshot, ShapeMatrix};
pub use rng::{RandomSource, SequenceRng, SimpleRng};
pub use scoring::{drop_score, line_clear_score};
pub use snake::{Collision, Food, Segment, SnakeGame, SnakeSnapshot, TickOutcome};
pub use tetris::{LockEvent, TetrisGame, TetrisSnapshot};
