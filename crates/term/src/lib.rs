//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal play. It avoids widget
//! toolkits and renders into a simple framebuffer that is diffed and flushed
//! to a crossterm backend.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Draw any arcade [`engine::Frame`] plus its [`engine::Status`] panel
//! - Allow precise control over aspect ratio (2 chars wide per grid cell)

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use arcade_core as core;
pub use arcade_engine as engine;
pub use arcade_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, FieldRect, GameView, Viewport, GAME_OVER_TEXT};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
