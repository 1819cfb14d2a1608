//! Status panel content published to the host.

use std::fmt;

use serde::Serialize;

use crate::types::GameId;

pub const SNAKE_CONTROLS: &str = "Arrow keys / WASD. R to restart.";
pub const SNAKE_TIP: &str = "Don't run into yourself or the walls!";
pub const TETRIS_CONTROLS: &str =
    "Left/Right to move, Up to rotate, Down to soft drop, Space for hard drop, R to restart.";

pub const WELCOME_MESSAGE: &str = "Select a game to start playing.";
pub const UNLOADED_MESSAGE: &str = "Select a game to see stats and controls.";
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load the game. Check the log for details.";

/// What the status panel shows.
///
/// Idle and failure states carry only a `message`; a running game carries
/// its title, counters and control hints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Status {
    pub game: Option<GameId>,
    pub title: Option<&'static str>,
    pub score: Option<u32>,
    /// Tetris only
    pub lines: Option<u32>,
    pub high_score: Option<u32>,
    pub controls: Option<&'static str>,
    pub tip: Option<&'static str>,
    pub message: Option<&'static str>,
    /// `message` describes a failure
    pub error: bool,
    pub game_over: bool,
    /// A game is loaded, so restart does something
    pub can_restart: bool,
}

impl Status {
    /// A message-only status (no game loaded).
    pub fn idle(message: &'static str) -> Self {
        Self {
            game: None,
            title: None,
            score: None,
            lines: None,
            high_score: None,
            controls: None,
            tip: None,
            message: Some(message),
            error: false,
            game_over: false,
            can_restart: false,
        }
    }

    pub fn load_failed(game: GameId) -> Self {
        Self {
            game: Some(game),
            error: true,
            ..Self::idle(LOAD_FAILED_MESSAGE)
        }
    }

    pub fn snake(score: u32, high_score: u32, game_over: bool) -> Self {
        Self {
            game: Some(GameId::Snake),
            title: Some(GameId::Snake.title()),
            score: Some(score),
            lines: None,
            high_score: Some(high_score),
            controls: Some(SNAKE_CONTROLS),
            tip: Some(SNAKE_TIP),
            message: None,
            error: false,
            game_over,
            can_restart: true,
        }
    }

    pub fn tetris(score: u32, lines: u32, high_score: u32, game_over: bool) -> Self {
        Self {
            game: Some(GameId::Tetris),
            title: Some(GameId::Tetris.title()),
            score: Some(score),
            lines: Some(lines),
            high_score: Some(high_score),
            controls: Some(TETRIS_CONTROLS),
            tip: None,
            message: None,
            error: false,
            game_over,
            can_restart: true,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(title) = self.title {
            write!(f, "{}", title)?;
            if let Some(score) = self.score {
                write!(f, " | Score: {}", score)?;
            }
            if let Some(lines) = self.lines {
                write!(f, " | Lines: {}", lines)?;
            }
            if let Some(high) = self.high_score {
                write!(f, " | High: {}", high)?;
            }
            if self.game_over {
                write!(f, " | Game Over")?;
            }
            return Ok(());
        }
        write!(f, "{}", self.message.unwrap_or_default())
    }
}
