//! TUI Arcade (workspace facade crate).
//!
//! Re-exports the workspace crates as `tui_arcade::{types, core, engine, input, term}`
//! so the binary, integration tests and benches share one import path.

pub use arcade_core as core;
pub use arcade_engine as engine;
pub use arcade_input as input;
pub use arcade_term as term;
pub use arcade_types as types;
