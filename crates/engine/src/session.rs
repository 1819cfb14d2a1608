//! One loaded game: construction against a surface, input routing and ticks.

use anyhow::{bail, Result};
use serde::Serialize;

use crate::core::{SimpleRng, SnakeGame, SnakeSnapshot, TetrisGame, TetrisSnapshot, TickOutcome};
use crate::status::Status;
use crate::surface::Surface;
use crate::types::{GameId, GameInput};

/// What the host draws this frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "game", rename_all = "lowercase")]
pub enum Frame {
    Snake(SnakeSnapshot),
    Tetris(TetrisSnapshot),
}

impl Frame {
    pub fn game_over(&self) -> bool {
        match self {
            Frame::Snake(s) => s.game_over,
            Frame::Tetris(s) => s.game_over,
        }
    }
}

/// An owned game instance.
#[derive(Debug, Clone)]
pub enum Session {
    Snake(SnakeGame),
    Tetris(TetrisGame),
}

impl Session {
    /// Construct `id` against `surface`, seeding its random source with `seed`.
    pub fn load(id: GameId, surface: Surface, seed: u32) -> Result<Self> {
        let rng = SimpleRng::new(seed);
        match id {
            GameId::Snake => {
                let (cols, rows) = surface.snake_grid();
                match SnakeGame::new(cols, rows, rng) {
                    Some(game) => Ok(Session::Snake(game)),
                    None => bail!(
                        "surface {}x{} gives a {}x{} snake grid, too small for the starting snake and food",
                        surface.width_px,
                        surface.height_px,
                        cols,
                        rows
                    ),
                }
            }
            GameId::Tetris => {
                if surface.tetris_block_px() == 0 {
                    bail!(
                        "surface {}x{} cannot fit the tetris board",
                        surface.width_px,
                        surface.height_px
                    );
                }
                Ok(Session::Tetris(TetrisGame::new(rng)))
            }
        }
    }

    pub fn id(&self) -> GameId {
        match self {
            Session::Snake(_) => GameId::Snake,
            Session::Tetris(_) => GameId::Tetris,
        }
    }

    pub fn game_over(&self) -> bool {
        match self {
            Session::Snake(g) => g.game_over(),
            Session::Tetris(g) => g.game_over(),
        }
    }

    pub fn score(&self) -> u32 {
        match self {
            Session::Snake(g) => g.score(),
            Session::Tetris(g) => g.score(),
        }
    }

    pub fn restart(&mut self) {
        match self {
            Session::Snake(g) => g.reset(),
            Session::Tetris(g) => g.restart(),
        }
    }

    /// Route an input to the game. Inputs for the other game are ignored.
    pub fn handle_input(&mut self, input: GameInput) -> bool {
        match (self, input) {
            (Session::Snake(g), GameInput::Snake(action)) => g.apply_action(action),
            (Session::Tetris(g), GameInput::Tetris(action)) => {
                let changed = g.apply_action(action);
                log_lock(g);
                changed
            }
            _ => false,
        }
    }

    /// Advance by `elapsed_ms`. Returns whether the game stepped.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        match self {
            Session::Snake(g) => match g.tick(elapsed_ms) {
                Some(TickOutcome::Crashed(collision)) => {
                    log::debug!("snake crashed: {:?} at length {}", collision, g.len());
                    true
                }
                Some(TickOutcome::Idle) | None => false,
                Some(_) => true,
            },
            Session::Tetris(g) => {
                let stepped = g.advance(elapsed_ms);
                log_lock(g);
                stepped
            }
        }
    }

    pub fn frame(&self) -> Frame {
        match self {
            Session::Snake(g) => Frame::Snake(g.snapshot()),
            Session::Tetris(g) => Frame::Tetris(g.snapshot()),
        }
    }

    /// Refresh `out` in place, reusing its buffers when the game matches.
    pub fn frame_into(&self, out: &mut Frame) {
        match (self, out) {
            (Session::Snake(g), Frame::Snake(s)) => g.snapshot_into(s),
            (Session::Tetris(g), Frame::Tetris(s)) => g.snapshot_into(s),
            (_, out) => *out = self.frame(),
        }
    }

    pub fn status(&self) -> Status {
        match self {
            Session::Snake(g) => Status::snake(g.score(), g.high_score(), g.game_over()),
            Session::Tetris(g) => Status::tetris(
                g.score(),
                g.lines_cleared(),
                g.high_score(),
                g.game_over(),
            ),
        }
    }
}

fn log_lock(game: &mut TetrisGame) {
    if let Some(event) = game.take_last_event() {
        if event.lines_cleared > 0 {
            log::debug!(
                "{} locked, cleared {} line(s) for {} points",
                event.kind.letter(),
                event.lines_cleared,
                event.line_clear_score
            );
        }
        if event.topped_out {
            log::debug!("tetris topped out after {}", event.kind.letter());
        }
    }
}
