//! Tetris simulator - falling piece, locking, line clears and gravity.
//!
//! The game is a small state machine: `Running -> GameOver` when a freshly
//! spawned piece collides, and back to `Running` only through
//! [`TetrisGame::restart`]. While over, every command except restart is ignored.
//!
//! Gravity is driven by [`TetrisGame::advance`] with the elapsed milliseconds
//! since the previous call; the game never reads a clock itself.

use serde::Serialize;

use crate::board::Board;
use crate::pieces::{Piece, PieceSnapshot};
use crate::rng::{RandomSource, SimpleRng};
use crate::scoring::{drop_score, line_clear_score, next_drop_interval};
use crate::types::*;

/// Summary of the most recent lock (consumed by observers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LockEvent {
    pub kind: PieceKind,
    pub lines_cleared: u32,
    pub line_clear_score: u32,
    /// The replacement piece could not spawn
    pub topped_out: bool,
}

/// Complete tetris game state
#[derive(Debug, Clone)]
pub struct TetrisGame<R = SimpleRng> {
    board: Board,
    piece: Piece,
    drop_counter_ms: u32,
    drop_interval_ms: u32,
    score: u32,
    lines_cleared: u32,
    high_score: u32,
    running: bool,
    last_event: Option<LockEvent>,
    rng: R,
}

impl<R: RandomSource> TetrisGame<R> {
    /// Create a running game with the first piece at the spawn position
    pub fn new(rng: R) -> Self {
        let mut game = Self {
            board: Board::new(),
            piece: Piece::spawn(PieceKind::I, SPAWN_Y),
            drop_counter_ms: 0,
            drop_interval_ms: DROP_INTERVAL_MS,
            score: 0,
            lines_cleared: 0,
            high_score: 0,
            running: true,
            last_event: None,
            rng,
        };
        game.restart();
        game
    }

    /// Start a fresh round. The high score survives; everything else is replaced.
    pub fn restart(&mut self) {
        let kind = self.random_kind();
        self.board = Board::new();
        self.piece = Piece::spawn(kind, SPAWN_Y);
        self.drop_counter_ms = 0;
        self.drop_interval_ms = DROP_INTERVAL_MS;
        self.score = 0;
        self.lines_cleared = 0;
        self.running = true;
        self.last_event = None;
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn game_over(&self) -> bool {
        !self.running
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn piece(&self) -> &Piece {
        &self.piece
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    fn random_kind(&mut self) -> PieceKind {
        PieceKind::ALL[self.rng.next_range(PieceKind::ALL.len() as u32) as usize]
    }

    /// Shift the piece one column; reverted on collision.
    pub fn move_piece(&mut self, offset: i8) -> bool {
        if !self.running {
            return false;
        }
        let moved = self.piece.shifted(offset, 0);
        if self.board.collides(&moved) {
            return false;
        }
        self.piece = moved;
        true
    }

    /// Rotate clockwise with a simple kick: in place, one right, one left.
    ///
    /// If all three placements collide the piece keeps its old shape and column.
    pub fn rotate_piece(&mut self) -> bool {
        if !self.running {
            return false;
        }
        let rotated = Piece {
            shape: self.piece.shape.rotated(),
            ..self.piece
        };
        for dx in [0, 1, -1] {
            let candidate = rotated.shifted(dx, 0);
            if !self.board.collides(&candidate) {
                self.piece = candidate;
                return true;
            }
        }
        false
    }

    /// Move down one row, locking on collision. Returns true if the piece moved.
    fn drop_step(&mut self) -> bool {
        self.drop_counter_ms = 0;
        let lowered = self.piece.shifted(0, 1);
        if self.board.collides(&lowered) {
            self.lock_piece();
            return false;
        }
        self.piece = lowered;
        true
    }

    /// Manual one-row drop; each row actually descended scores a point.
    pub fn soft_drop(&mut self) -> bool {
        if !self.running {
            return false;
        }
        let moved = self.drop_step();
        if moved {
            self.score += drop_score(1, false);
        }
        moved
    }

    /// Drop to the lowest free position and lock. Returns rows descended.
    pub fn hard_drop(&mut self) -> u32 {
        if !self.running {
            return 0;
        }
        let mut rows = 0;
        while !self.board.collides(&self.piece.shifted(0, 1)) {
            self.piece = self.piece.shifted(0, 1);
            rows += 1;
        }
        self.score += drop_score(rows, true);
        self.lock_piece();
        self.drop_counter_ms = 0;
        rows
    }

    /// Feed elapsed time into gravity. Returns true when a gravity step ran.
    ///
    /// Once the accumulated time exceeds the drop interval, one step runs and
    /// the accumulator starts over from zero.
    pub fn advance(&mut self, elapsed_ms: u32) -> bool {
        if !self.running {
            return false;
        }
        self.drop_counter_ms = self.drop_counter_ms.saturating_add(elapsed_ms);
        if self.drop_counter_ms > self.drop_interval_ms {
            self.drop_step();
            return true;
        }
        false
    }

    /// Commit the piece, clear full rows, score them and spawn the next piece.
    fn lock_piece(&mut self) {
        let kind = self.piece.kind;
        self.board.merge(&self.piece);

        let lines = self.board.sweep();
        let points = line_clear_score(lines);
        if lines > 0 {
            self.lines_cleared += lines;
            self.score += points;
            self.drop_interval_ms = next_drop_interval(self.drop_interval_ms, lines);
        }

        let next = self.random_kind();
        self.piece = Piece::spawn(next, SPAWN_Y_AFTER_LOCK);
        let topped_out = self.board.collides(&self.piece);
        if topped_out {
            self.running = false;
            self.high_score = self.high_score.max(self.score);
        }

        self.last_event = Some(LockEvent {
            kind,
            lines_cleared: lines,
            line_clear_score: points,
            topped_out,
        });
    }

    /// Apply an input; returns whether it changed anything.
    pub fn apply_action(&mut self, action: TetrisAction) -> bool {
        match action {
            TetrisAction::MoveLeft => self.move_piece(-1),
            TetrisAction::MoveRight => self.move_piece(1),
            TetrisAction::Rotate => self.rotate_piece(),
            TetrisAction::SoftDrop => {
                if !self.running {
                    return false;
                }
                // A blocked soft drop still locks the piece.
                self.soft_drop();
                true
            }
            TetrisAction::HardDrop => {
                if !self.running {
                    return false;
                }
                self.hard_drop();
                true
            }
        }
    }

    pub fn snapshot_into(&self, out: &mut TetrisSnapshot) {
        self.board.write_u8_grid(&mut out.board);
        out.piece = Some(PieceSnapshot::from(&self.piece));
        out.score = self.score;
        out.lines_cleared = self.lines_cleared;
        out.high_score = self.high_score;
        out.drop_interval_ms = self.drop_interval_ms;
        out.game_over = !self.running;
    }

    pub fn snapshot(&self) -> TetrisSnapshot {
        let mut s = TetrisSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for TetrisGame<SimpleRng> {
    fn default() -> Self {
        Self::new(SimpleRng::default())
    }
}

/// Everything a host needs to draw one tetris frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TetrisSnapshot {
    /// Locked cells as piece codes (0 = empty), see [`PieceKind::code`]
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub piece: Option<PieceSnapshot>,
    pub score: u32,
    pub lines_cleared: u32,
    pub high_score: u32,
    pub drop_interval_ms: u32,
    pub game_over: bool,
}

impl Default for TetrisSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            piece: None,
            score: 0,
            lines_cleared: 0,
            high_score: 0,
            drop_interval_ms: DROP_INTERVAL_MS,
            game_over: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SequenceRng;

    /// Game whose every spawn is `kind`.
    fn game_with(kind: PieceKind) -> TetrisGame<SequenceRng> {
        let idx = PieceKind::ALL.iter().position(|k| *k == kind).unwrap() as u32;
        TetrisGame::new(SequenceRng::new(vec![idx]))
    }

    fn fill_row_except(game: &mut TetrisGame<SequenceRng>, y: i8, gaps: &[i8]) {
        for x in 0..BOARD_WIDTH as i8 {
            if !gaps.contains(&x) {
                game.board.set(x, y, Some(PieceKind::Z));
            }
        }
    }

    #[test]
    fn test_new_game_state() {
        let game = game_with(PieceKind::T);
        assert!(game.running());
        assert_eq!(game.score(), 0);
        assert_eq!(game.lines_cleared(), 0);
        assert_eq!(game.drop_interval_ms(), DROP_INTERVAL_MS);
        assert_eq!(game.piece().kind, PieceKind::T);
        assert_eq!((game.piece().x, game.piece().y), (SPAWN_X, SPAWN_Y));
    }

    #[test]
    fn test_move_reverts_at_wall() {
        let mut game = game_with(PieceKind::O);
        for _ in 0..4 {
            assert!(game.move_piece(-1));
        }
        assert_eq!(game.piece().x, 0);
        assert!(!game.move_piece(-1));
        assert_eq!(game.piece().x, 0);
    }

    #[test]
    fn test_move_reverts_on_filled_cell() {
        let mut game = game_with(PieceKind::O);
        game.board.set(6, 1, Some(PieceKind::S));
        assert!(!game.move_piece(1));
        assert_eq!(game.piece().x, SPAWN_X);
    }

    #[test]
    fn test_rotate_in_open_space() {
        let mut game = game_with(PieceKind::T);
        let before = game.piece().shape;
        assert!(game.rotate_piece());
        assert_eq!(game.piece().shape, before.rotated());
        assert_eq!(game.piece().x, SPAWN_X);
    }

    #[test]
    fn test_rotate_kicks_left_off_right_wall() {
        // Vertical I near the right wall rotates into a 4-wide row.
        let mut game = game_with(PieceKind::I);
        game.piece = Piece {
            shape: game.piece.shape.rotated(),
            x: 8,
            y: 5,
            ..game.piece
        };
        // 1x4 at x=8 would cover 8..=11: both in place and +1 collide, -1 covers 7..=10 also collides.
        assert!(!game.rotate_piece());
        assert_eq!(game.piece().x, 8);
        assert_eq!(game.piece().shape.cols(), 1);

        // At x=7 in place covers 7..=10 (collides), +1 worse, -1 covers 6..=9 and fits.
        game.piece.x = 7;
        assert!(game.rotate_piece());
        assert_eq!(game.piece().x, 6);
        assert_eq!(game.piece().shape.rows(), 1);
    }

    #[test]
    fn test_rotate_kicks_right_first() {
        let mut game = game_with(PieceKind::T);
        game.piece.y = 10;
        // Rotated T (3 rows x 2 cols) at x=4 covers (4,10), (4,11), (5,11), (4,12);
        // block (4,12) so only the +1 kick fits.
        game.board.set(4, 12, Some(PieceKind::I));
        assert!(game.rotate_piece());
        assert_eq!(game.piece().x, SPAWN_X + 1);
    }

    #[test]
    fn test_rotate_restores_shape_when_every_kick_fails() {
        let mut game = game_with(PieceKind::T);
        game.piece.y = 10;
        game.board.set(4, 12, Some(PieceKind::I));
        game.board.set(5, 12, Some(PieceKind::I));
        game.board.set(3, 12, Some(PieceKind::I));
        let before = *game.piece();
        assert!(!game.rotate_piece());
        assert_eq!(*game.piece(), before);
    }

    #[test]
    fn test_soft_drop_scores_per_step() {
        let mut game = game_with(PieceKind::O);
        assert!(game.soft_drop());
        assert!(game.soft_drop());
        assert_eq!(game.score(), 2);
        assert_eq!(game.piece().y, SPAWN_Y + 2);
    }

    #[test]
    fn test_soft_drop_locks_when_blocked() {
        let mut game = game_with(PieceKind::O);
        game.piece.y = 18;
        assert!(!game.soft_drop());
        assert_eq!(game.score(), 0);
        assert_eq!(game.board().filled_in_row(18), 2);
        assert_eq!(game.board().filled_in_row(19), 2);
        assert_eq!(game.piece().y, SPAWN_Y_AFTER_LOCK);
        let event = game.take_last_event().unwrap();
        assert_eq!(event.kind, PieceKind::O);
        assert_eq!(event.lines_cleared, 0);
        assert!(game.take_last_event().is_none());
    }

    #[test]
    fn test_hard_drop_from_top_scores_two_per_row() {
        let mut game = game_with(PieceKind::O);
        assert_eq!(game.hard_drop(), 18);
        assert_eq!(game.score(), 36);
    }

    #[test]
    fn test_o_piece_lands_without_clearing() {
        let mut game = game_with(PieceKind::O);
        game.hard_drop();
        assert_eq!(game.board().filled_in_row(18), 2);
        assert_eq!(game.board().filled_in_row(19), 2);
        assert_eq!(game.board().get(4, 19), Some(Some(PieceKind::O)));
        assert_eq!(game.board().get(5, 18), Some(Some(PieceKind::O)));
        assert_eq!(game.lines_cleared(), 0);
    }

    #[test]
    fn test_tetris_awards_800_and_speeds_up() {
        let mut game = game_with(PieceKind::I);
        for y in 16..20 {
            fill_row_except(&mut game, y, &[0]);
        }
        game.piece = Piece {
            shape: game.piece.shape.rotated(),
            x: 0,
            ..game.piece
        };
        let rows = game.hard_drop();
        assert_eq!(rows, 16);
        assert_eq!(game.lines_cleared(), 4);
        assert_eq!(game.score(), 800 + 2 * 16);
        assert_eq!(game.drop_interval_ms(), DROP_INTERVAL_MS - 4 * DROP_INTERVAL_STEP_MS);
        assert!(game.board().cells().iter().all(|c| c.is_none()));
        let event = game.take_last_event().unwrap();
        assert_eq!(event.line_clear_score, 800);
    }

    #[test]
    fn test_non_adjacent_double_clear() {
        let mut game = game_with(PieceKind::I);
        fill_row_except(&mut game, 19, &[0]);
        fill_row_except(&mut game, 18, &[0, 1]);
        fill_row_except(&mut game, 17, &[0]);
        game.piece = Piece {
            shape: game.piece.shape.rotated(),
            x: 0,
            ..game.piece
        };
        game.hard_drop();
        assert_eq!(game.lines_cleared(), 2);
        // Row 18 (with its own gap at x=1) is now the bottom row.
        assert_eq!(game.board().get(1, 19), Some(None));
        assert_eq!(game.board().get(0, 19), Some(Some(PieceKind::I)));
        assert_eq!(game.board().filled_in_row(19), 9);
        assert_eq!(game.score(), 300 + 2 * 16);
    }

    #[test]
    fn test_advance_waits_for_interval() {
        let mut game = game_with(PieceKind::O);
        assert!(!game.advance(DROP_INTERVAL_MS));
        assert_eq!(game.piece().y, SPAWN_Y);
        assert!(game.advance(1));
        assert_eq!(game.piece().y, SPAWN_Y + 1);
        // Accumulator restarts from zero, no points for gravity
        assert!(!game.advance(DROP_INTERVAL_MS));
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn test_advance_handles_irregular_frames() {
        let mut game = game_with(PieceKind::O);
        let mut steps = 0;
        for _ in 0..100 {
            if game.advance(16) {
                steps += 1;
            }
        }
        // 1600ms at 700ms per row, each trigger needs > 700ms: two steps.
        assert_eq!(steps, 2);
    }

    #[test]
    fn test_top_out_ends_game_and_sets_high_score() {
        let mut game = game_with(PieceKind::O);
        game.score = 250;
        game.board.set(4, 0, Some(PieceKind::J));
        game.piece.y = 10;
        game.hard_drop();
        assert!(game.game_over());
        assert_eq!(game.high_score(), game.score());
        assert!(game.take_last_event().unwrap().topped_out);
    }

    #[test]
    fn test_commands_ignored_while_over() {
        let mut game = game_with(PieceKind::O);
        game.running = false;
        let before = *game.piece();
        assert!(!game.apply_action(TetrisAction::MoveLeft));
        assert!(!game.apply_action(TetrisAction::Rotate));
        assert!(!game.apply_action(TetrisAction::SoftDrop));
        assert!(!game.apply_action(TetrisAction::HardDrop));
        assert!(!game.advance(10_000));
        assert_eq!(*game.piece(), before);
        game.restart();
        assert!(game.running());
    }

    #[test]
    fn test_restart_keeps_high_score_only() {
        let mut game = game_with(PieceKind::O);
        game.score = 900;
        game.lines_cleared = 7;
        game.drop_interval_ms = 300;
        game.running = false;
        game.high_score = 900;
        game.board.set(0, 19, Some(PieceKind::L));
        game.restart();
        assert_eq!(game.score(), 0);
        assert_eq!(game.lines_cleared(), 0);
        assert_eq!(game.drop_interval_ms(), DROP_INTERVAL_MS);
        assert_eq!(game.high_score(), 900);
        assert!(game.board().cells().iter().all(|c| c.is_none()));
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut game = game_with(PieceKind::O);
        game.hard_drop();
        let snap = game.snapshot();
        assert_eq!(snap.board[19][4], PieceKind::O.code());
        assert_eq!(snap.score, 36);
        let piece = snap.piece.unwrap();
        assert_eq!(piece.kind, PieceKind::O);
        assert_eq!(piece.cells.as_slice(), &[(4, -1), (5, -1), (4, 0), (5, 0)]);
        assert!(!snap.game_over);
    }
}
