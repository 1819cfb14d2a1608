//! Terminal arcade runner (default binary).
//!
//! Hosts one game at a time on a fixed surface. Uses crossterm for input and
//! the framebuffer renderer from `arcade-term`.
//!
//! Keys: `1` snake, `2` tetris, `0` close the game, `R` restart, `q` quit.

use std::fs::OpenOptions;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use log::LevelFilter;

use tui_arcade::engine::{Arcade, ArcadeConfig, Frame, Status};
use tui_arcade::input::{handle_key_event, host_command, HostCommand};
use tui_arcade::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

/// Variable holding an `env_logger` filter (e.g. `debug`).
const LOG_FILTER_ENV: &str = "ARCADE_LOG";

fn main() -> Result<()> {
    let config = ArcadeConfig::from_env()?.with_args(std::env::args().skip(1))?;
    init_logging(&config)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(err) = &result {
        log::error!("arcade stopped: {:#}", err);
    }
    result
}

/// Logs go to `ARCADE_LOG_PATH` when set; the raw-mode screen leaves no room for stderr
/// unless a filter is requested explicitly.
fn init_logging(config: &ArcadeConfig) -> Result<()> {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::new().filter(LOG_FILTER_ENV));
    let filter_set = std::env::var_os(LOG_FILTER_ENV).is_some();

    if let Some(path) = &config.log_path {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open log file {}", path))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
        if !filter_set {
            builder.filter_level(LevelFilter::Info);
        }
    } else if !filter_set {
        builder.filter_level(LevelFilter::Off);
    }

    builder.try_init().context("failed to initialize logging")
}

fn time_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u32)
        .unwrap_or(1)
}

fn run(term: &mut TerminalRenderer, config: &ArcadeConfig) -> Result<()> {
    let seed = config.seed.unwrap_or_else(time_seed);
    log::info!(
        "starting arcade: surface {}x{}, seed {}",
        config.surface.width_px,
        config.surface.height_px,
        seed
    );

    let mut arcade = Arcade::with_seed(
        config.surface,
        |status: &Status| log::debug!("status: {}", status),
        seed,
    );
    if config.game.is_some() {
        // Failures are logged and shown in the status panel.
        let _ = arcade.load_game(config.game);
    }

    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut frame: Option<Frame> = None;
    let frame_duration = Duration::from_millis(config.frame_ms as u64);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        if arcade.current_game().is_none() {
            frame = None;
        } else if let Some(f) = frame.as_mut() {
            arcade.frame_into(f);
        } else {
            frame = arcade.frame();
        }
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(frame.as_ref(), arcade.status(), Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input until the next frame is due.
        let timeout = frame_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if let Some(command) = host_command(key) {
                        match command {
                            HostCommand::Quit => break,
                            HostCommand::Select(id) => {
                                let _ = arcade.load_game(id);
                            }
                            HostCommand::Restart => {
                                arcade.restart();
                            }
                        }
                    } else if let Some(game) = arcade.current_game() {
                        if let Some(input) = handle_key_event(game, key) {
                            arcade.handle_input(input);
                        }
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick with the real elapsed time.
        let elapsed = last_tick.elapsed();
        if elapsed >= frame_duration {
            last_tick = Instant::now();
            arcade.tick(elapsed.as_millis().min(u32::MAX as u128) as u32);
        }
    }

    arcade.destroy();
    log::info!("arcade closed");
    Ok(())
}
