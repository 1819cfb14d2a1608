//! Host controller: owns at most one game and publishes its status.

use anyhow::{bail, Result};

use crate::core::{RandomSource, SimpleRng};
use crate::session::{Frame, Session};
use crate::status::{Status, UNLOADED_MESSAGE, WELCOME_MESSAGE};
use crate::surface::Surface;
use crate::types::{GameId, GameInput};

/// Receives every status change.
pub type StatusSink = Box<dyn FnMut(&Status)>;

/// Game selector, lifecycle and status publishing for one surface.
///
/// The sink is called once with the welcome status on construction and then
/// whenever the status changes. After [`Arcade::destroy`] it is never called
/// again and every operation is a no-op.
pub struct Arcade {
    surface: Surface,
    seeds: SimpleRng,
    session: Option<Session>,
    status: Status,
    sink: Option<StatusSink>,
}

impl Arcade {
    pub fn new(surface: Surface, sink: impl FnMut(&Status) + 'static) -> Self {
        Self::with_seed(surface, sink, 1)
    }

    /// Like [`Arcade::new`], deriving each loaded game's seed from `seed`.
    pub fn with_seed(surface: Surface, sink: impl FnMut(&Status) + 'static, seed: u32) -> Self {
        let mut arcade = Self {
            surface,
            seeds: SimpleRng::new(seed),
            session: None,
            status: Status::idle(WELCOME_MESSAGE),
            sink: Some(Box::new(sink)),
        };
        let welcome = arcade.status.clone();
        arcade.emit(&welcome);
        arcade
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    pub fn current_game(&self) -> Option<GameId> {
        self.session.as_ref().map(Session::id)
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn is_destroyed(&self) -> bool {
        self.sink.is_none()
    }

    /// Tear down the current game, then load `id` (`None` leaves the selector empty).
    ///
    /// A game that cannot initialize is logged and reported through the
    /// status; the error is also returned so the caller may log it.
    pub fn load_game(&mut self, id: Option<GameId>) -> Result<()> {
        if self.is_destroyed() {
            bail!("arcade has been destroyed");
        }
        if let Some(old) = self.session.take() {
            log::info!("unloaded {} (score {})", old.id().as_str(), old.score());
        }
        self.set_status(Status::idle(UNLOADED_MESSAGE));

        let Some(id) = id else {
            return Ok(());
        };

        let seed = self.seeds.next_u32();
        match Session::load(id, self.surface, seed) {
            Ok(session) => {
                log::info!(
                    "loaded {} on {}x{} (seed {})",
                    id.as_str(),
                    self.surface.width_px,
                    self.surface.height_px,
                    seed
                );
                self.session = Some(session);
                self.publish();
                Ok(())
            }
            Err(err) => {
                log::error!("failed to load {}: {:#}", id.as_str(), err);
                self.set_status(Status::load_failed(id));
                Err(err)
            }
        }
    }

    /// Restart the loaded game in place. Returns false when nothing is loaded.
    pub fn restart(&mut self) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        session.restart();
        log::info!("restarted {}", session.id().as_str());
        self.publish();
        true
    }

    /// Forward a key press to the loaded game.
    pub fn handle_input(&mut self, input: GameInput) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let was_over = session.game_over();
        let changed = session.handle_input(input);
        if changed {
            self.after_step(was_over);
        }
        changed
    }

    /// Feed elapsed host time to the loaded game.
    pub fn tick(&mut self, elapsed_ms: u32) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let was_over = session.game_over();
        if session.tick(elapsed_ms) {
            self.after_step(was_over);
        }
    }

    /// Snapshot of the loaded game, if any.
    pub fn frame(&self) -> Option<Frame> {
        self.session.as_ref().map(Session::frame)
    }

    /// Refresh a host-owned frame buffer. Returns false when nothing is loaded.
    pub fn frame_into(&self, out: &mut Frame) -> bool {
        match &self.session {
            Some(session) => {
                session.frame_into(out);
                true
            }
            None => false,
        }
    }

    /// Release the game and the sink. Safe to call more than once.
    pub fn destroy(&mut self) {
        if self.sink.take().is_none() {
            return;
        }
        if let Some(session) = self.session.take() {
            log::info!("destroyed {}", session.id().as_str());
        }
    }

    fn after_step(&mut self, was_over: bool) {
        if let Some(session) = &self.session {
            if !was_over && session.game_over() {
                log::info!(
                    "{} over with score {}",
                    session.id().as_str(),
                    session.score()
                );
            }
        }
        self.publish();
    }

    fn publish(&mut self) {
        if let Some(status) = self.session.as_ref().map(Session::status) {
            self.set_status(status);
        }
    }

    fn set_status(&mut self, status: Status) {
        if status == self.status {
            return;
        }
        self.emit(&status);
        self.status = status;
    }

    fn emit(&mut self, status: &Status) {
        if let Some(sink) = self.sink.as_mut() {
            sink(status);
        }
    }
}

impl Drop for Arcade {
    fn drop(&mut self) {
        self.destroy();
    }
}
