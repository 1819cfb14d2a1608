//! Snake simulator - grid locomotion, food and self/wall collisions.
//!
//! One call to [`SnakeGame::advance`] is one tick: the head moves one cell in
//! the current direction. [`SnakeGame::tick`] is the time-driven wrapper that
//! runs a tick once enough elapsed time has accumulated for the current
//! (score-dependent) interval.
//!
//! Direction input is buffered: [`SnakeGame::set_pending_direction`] only
//! records it, and the next tick promotes it unless it lies on the current
//! axis. That stops a quick double key press from reversing the snake into
//! its own neck.

use std::collections::VecDeque;

use serde::Serialize;

use crate::rng::{RandomSource, SimpleRng};
use crate::scoring::next_snake_interval;
use crate::types::{Direction, SnakeAction, FOOD_SCORE, SNAKE_TICK_MS};

/// One grid cell of the snake body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Segment {
    pub x: i32,
    pub y: i32,
}

impl Segment {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Neighbor cell in the given direction
    pub fn step(&self, direction: Direction) -> Self {
        Self {
            x: self.x + direction.x as i32,
            y: self.y + direction.y as i32,
        }
    }
}

/// A food pellet.
pub type Food = Segment;

/// What a tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Game already over; nothing moved
    Idle,
    Moved,
    Ate,
    Crashed(Collision),
}

/// Type of collision that ended the round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    Wall,
    SelfBody,
    /// The body covers every cell; no food can be placed
    BoardFull,
}

/// Complete snake game state
#[derive(Debug, Clone)]
pub struct SnakeGame<R = SimpleRng> {
    cols: i32,
    rows: i32,
    /// Head first
    segments: VecDeque<Segment>,
    direction: Direction,
    pending_direction: Direction,
    /// `None` only after the body has filled the grid
    food: Option<Food>,
    score: u32,
    high_score: u32,
    tick_interval_ms: u32,
    since_tick_ms: u32,
    running: bool,
    rng: R,
}

impl<R: RandomSource> SnakeGame<R> {
    /// Create a running game on a `cols x rows` grid.
    ///
    /// Returns `None` when the grid cannot hold the two-segment starting snake
    /// plus one free cell for food.
    pub fn new(cols: u16, rows: u16, rng: R) -> Option<Self> {
        if !Self::fits(cols, rows) {
            return None;
        }
        let mut game = Self {
            cols: cols as i32,
            rows: rows as i32,
            segments: VecDeque::new(),
            direction: Direction::RIGHT,
            pending_direction: Direction::RIGHT,
            food: None,
            score: 0,
            high_score: 0,
            tick_interval_ms: SNAKE_TICK_MS,
            since_tick_ms: 0,
            running: true,
            rng,
        };
        game.reset();
        Some(game)
    }

    /// Whether a grid is large enough for the starting snake and its first food
    pub fn fits(cols: u16, rows: u16) -> bool {
        cols >= 2 && rows >= 1 && cols as u32 * rows as u32 > 2
    }

    /// Start a fresh round: centered two-segment snake heading right.
    ///
    /// The high score survives; everything else is replaced.
    pub fn reset(&mut self) {
        let cx = self.cols / 2;
        let cy = self.rows / 2;
        self.segments.clear();
        self.segments.push_back(Segment::new(cx, cy));
        self.segments.push_back(Segment::new(cx - 1, cy));
        self.direction = Direction::RIGHT;
        self.pending_direction = Direction::RIGHT;
        self.score = 0;
        self.tick_interval_ms = SNAKE_TICK_MS;
        self.since_tick_ms = 0;
        self.running = true;
        self.spawn_food();
    }

    pub fn cols(&self) -> u16 {
        self.cols as u16
    }

    pub fn rows(&self) -> u16 {
        self.rows as u16
    }

    pub fn segments(&self) -> &VecDeque<Segment> {
        &self.segments
    }

    pub fn head(&self) -> Segment {
        self.segments[0]
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Never true for a constructed game: [`SnakeGame::new`] rejects grids
    /// that cannot hold the two starting segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    /// Current food, `None` once the body covers the whole grid
    pub fn food(&self) -> Option<Food> {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn tick_interval_ms(&self) -> u32 {
        self.tick_interval_ms
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn game_over(&self) -> bool {
        !self.running
    }

    fn occupies(&self, cell: Segment) -> bool {
        self.segments.contains(&cell)
    }

    fn in_bounds(&self, cell: Segment) -> bool {
        cell.x >= 0 && cell.x < self.cols && cell.y >= 0 && cell.y < self.rows
    }

    /// Place food on a uniformly random free cell (rejection sampling).
    ///
    /// Ends the round instead when the body covers the whole grid.
    fn spawn_food(&mut self) -> bool {
        if self.segments.len() >= self.cols as usize * self.rows as usize {
            self.food = None;
            self.end_round();
            return false;
        }
        loop {
            let x = self.rng.next_range(self.cols as u32) as i32;
            let y = self.rng.next_range(self.rows as u32) as i32;
            let cell = Segment::new(x, y);
            if !self.occupies(cell) {
                self.food = Some(cell);
                return true;
            }
        }
    }

    fn end_round(&mut self) {
        self.running = false;
        self.high_score = self.high_score.max(self.score);
    }

    /// Buffer a direction for the next tick.
    pub fn set_pending_direction(&mut self, direction: Direction) {
        self.pending_direction = direction;
    }

    /// Run one tick.
    pub fn advance(&mut self) -> TickOutcome {
        if !self.pending_direction.is_same_axis(self.direction) {
            self.direction = self.pending_direction;
        }

        if !self.running {
            return TickOutcome::Idle;
        }

        let head = self.head().step(self.direction);

        if !self.in_bounds(head) {
            self.end_round();
            return TickOutcome::Crashed(Collision::Wall);
        }
        if self.occupies(head) {
            self.end_round();
            return TickOutcome::Crashed(Collision::SelfBody);
        }

        self.segments.push_front(head);
        if self.food == Some(head) {
            self.score += FOOD_SCORE;
            self.tick_interval_ms = next_snake_interval(self.tick_interval_ms);
            if !self.spawn_food() {
                return TickOutcome::Crashed(Collision::BoardFull);
            }
            TickOutcome::Ate
        } else {
            self.segments.pop_back();
            TickOutcome::Moved
        }
    }

    /// Feed elapsed time; runs one tick once the interval has elapsed.
    ///
    /// The accumulator resets on every tick (no catch-up), so a long stall
    /// produces a single step rather than a burst.
    pub fn tick(&mut self, elapsed_ms: u32) -> Option<TickOutcome> {
        self.since_tick_ms = self.since_tick_ms.saturating_add(elapsed_ms);
        if self.since_tick_ms < self.tick_interval_ms {
            return None;
        }
        self.since_tick_ms = 0;
        Some(self.advance())
    }

    /// Apply an input; returns whether it was accepted.
    pub fn apply_action(&mut self, action: SnakeAction) -> bool {
        match action {
            SnakeAction::Turn(direction) => {
                self.set_pending_direction(direction);
                true
            }
        }
    }

    pub fn snapshot_into(&self, out: &mut SnakeSnapshot) {
        out.cols = self.cols as u16;
        out.rows = self.rows as u16;
        out.segments.clear();
        out.segments.extend(self.segments.iter().copied());
        out.food = self.food;
        out.score = self.score;
        out.high_score = self.high_score;
        out.tick_interval_ms = self.tick_interval_ms;
        out.game_over = !self.running;
    }

    pub fn snapshot(&self) -> SnakeSnapshot {
        let mut s = SnakeSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

/// Everything a host needs to draw one snake frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnakeSnapshot {
    pub cols: u16,
    pub rows: u16,
    /// Head first
    pub segments: Vec<Segment>,
    pub food: Option<Food>,
    pub score: u32,
    pub high_score: u32,
    pub tick_interval_ms: u32,
    pub game_over: bool,
}

impl Default for SnakeSnapshot {
    fn default() -> Self {
        Self {
            cols: 0,
            rows: 0,
            segments: Vec::new(),
            food: None,
            score: 0,
            high_score: 0,
            tick_interval_ms: SNAKE_TICK_MS,
            game_over: false,
        }
    }
}
