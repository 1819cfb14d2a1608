//! Host-side session management for the arcade.
//!
//! [`Arcade`] plays the role of the page around the games: it owns at most one
//! loaded [`Session`], routes key presses and elapsed time to it, and pushes
//! [`Status`] changes to a caller-provided sink. Configuration for the terminal
//! host lives in [`config`].
//!
//! ```
//! use arcade_engine::{Arcade, Status, Surface};
//! use arcade_engine::types::GameId;
//!
//! let mut arcade = Arcade::new(Surface::default(), |status: &Status| {
//!     println!("{}", status);
//! });
//! arcade.load_game(Some(GameId::Snake)).unwrap();
//! arcade.tick(16);
//! assert!(arcade.frame().is_some());
//! arcade.destroy();
//! ```

pub mod arcade;
pub mod config;
pub mod session;
pub mod status;
pub mod surface;

pub use arcade_core as core;
pub use arcade_types as types;

pub use arcade::{Arcade, StatusSink};
pub use config::ArcadeConfig;
pub use session::{Frame, Session};
pub use status::Status;
pub use surface::Surface;
