//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameInput`] for the loaded
//! game and [`HostCommand`]s for the arcade host (quit, game selection,
//! restart). Both games react to discrete key presses only, so there is no
//! repeat handling here.

pub mod map;

pub use arcade_types as types;

pub use map::{handle_key_event, host_command, should_quit, HostCommand};
