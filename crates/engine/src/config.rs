//! Host configuration from environment variables and command-line arguments.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `ARCADE_GAME` | none | `snake`, `tetris` or `none` (game selector) |
//! | `ARCADE_SURFACE` | `480x640` | Surface size in pixels, `WIDTHxHEIGHT` |
//! | `ARCADE_SEED` | time-based | Seed for the random source |
//! | `ARCADE_FRAME_MS` | 16 | Host frame interval |
//! | `ARCADE_LOG_PATH` | unset | Write logs to this file |
//!
//! A first positional argument overrides `ARCADE_GAME`.

use anyhow::{bail, Context, Result};

use crate::surface::Surface;
use crate::types::{GameId, FRAME_MS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArcadeConfig {
    /// Game to load at startup (`None` shows the selector)
    pub game: Option<GameId>,
    pub surface: Surface,
    /// Fixed seed; `None` lets the host pick one
    pub seed: Option<u32>,
    pub frame_ms: u32,
    pub log_path: Option<String>,
}

impl Default for ArcadeConfig {
    fn default() -> Self {
        Self {
            game: None,
            surface: Surface::default(),
            seed: None,
            frame_ms: FRAME_MS,
            log_path: None,
        }
    }
}

impl ArcadeConfig {
    /// Read the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the environment in production, a map in tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(game) = get("ARCADE_GAME") {
            config.game = parse_game(&game).context("invalid ARCADE_GAME")?;
        }

        if let Some(surface) = get("ARCADE_SURFACE") {
            config.surface = parse_surface(&surface).context("invalid ARCADE_SURFACE")?;
        }

        if let Some(seed) = get("ARCADE_SEED") {
            config.seed = Some(
                seed.parse()
                    .with_context(|| format!("invalid ARCADE_SEED {:?}", seed))?,
            );
        }

        if let Some(frame_ms) = get("ARCADE_FRAME_MS") {
            let frame_ms: u32 = frame_ms
                .parse()
                .with_context(|| format!("invalid ARCADE_FRAME_MS {:?}", frame_ms))?;
            if frame_ms == 0 {
                bail!("ARCADE_FRAME_MS must be at least 1");
            }
            config.frame_ms = frame_ms;
        }

        config.log_path = get("ARCADE_LOG_PATH");

        Ok(config)
    }

    /// Apply command-line arguments (program name already stripped).
    pub fn with_args<I, S>(mut self, args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if let Some(first) = args.into_iter().next() {
            self.game = parse_game(first.as_ref()).context("invalid game argument")?;
        }
        Ok(self)
    }
}

/// `snake`, `tetris` or `none`.
pub fn parse_game(s: &str) -> Result<Option<GameId>> {
    if s.trim().eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    match GameId::from_str(s) {
        Some(id) => Ok(Some(id)),
        None => bail!("unknown game {:?} (expected snake, tetris or none)", s),
    }
}

/// `WIDTHxHEIGHT` in pixels, both non-zero.
pub fn parse_surface(s: &str) -> Result<Surface> {
    let Some((w, h)) = s.trim().to_lowercase().split_once('x').map(|(w, h)| {
        (w.trim().to_string(), h.trim().to_string())
    }) else {
        bail!("expected WIDTHxHEIGHT, got {:?}", s);
    };
    let width: u32 = w.parse().with_context(|| format!("bad width {:?}", w))?;
    let height: u32 = h.parse().with_context(|| format!("bad height {:?}", h))?;
    if width == 0 || height == 0 {
        bail!("surface dimensions must be non-zero, got {}x{}", width, height);
    }
    Ok(Surface::new(width, height))
}
