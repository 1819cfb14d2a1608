//! Scoring module - points and speed curves for both games.

use crate::types::{
    DROP_INTERVAL_FLOOR_MS, DROP_INTERVAL_STEP_MS, HARD_DROP_POINTS_PER_ROW, LINE_SCORES,
    SNAKE_TICK_FLOOR_MS, SNAKE_TICK_STEP_MS, SOFT_DROP_POINTS,
};

/// Points for clearing `lines` rows in one lock.
///
/// A single lock can clear at most four rows with tetrominoes; anything above
/// that is scored as four.
pub fn line_clear_score(lines: u32) -> u32 {
    LINE_SCORES[(lines as usize).min(LINE_SCORES.len() - 1)]
}

/// Points for a drop of `rows` rows.
pub fn drop_score(rows: u32, hard: bool) -> u32 {
    if hard {
        rows * HARD_DROP_POINTS_PER_ROW
    } else {
        rows * SOFT_DROP_POINTS
    }
}

/// Gravity interval after clearing `lines` rows.
pub fn next_drop_interval(current_ms: u32, lines: u32) -> u32 {
    current_ms
        .saturating_sub(lines.saturating_mul(DROP_INTERVAL_STEP_MS))
        .max(DROP_INTERVAL_FLOOR_MS)
}

/// Snake tick interval after eating one food.
///
/// Only shrinks while above the floor, so the result never goes below
/// `SNAKE_TICK_FLOOR_MS - SNAKE_TICK_STEP_MS + 1` for any starting value.
pub fn next_snake_interval(current_ms: u32) -> u32 {
    if current_ms > SNAKE_TICK_FLOOR_MS {
        current_ms - SNAKE_TICK_STEP_MS
    } else {
        current_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DROP_INTERVAL_MS, SNAKE_TICK_MS};

    #[test]
    fn test_line_clear_table() {
        assert_eq!(line_clear_score(0), 0);
        assert_eq!(line_clear_score(1), 100);
        assert_eq!(line_clear_score(2), 300);
        assert_eq!(line_clear_score(3), 500);
        assert_eq!(line_clear_score(4), 800);
        assert_eq!(line_clear_score(6), 800);
    }

    #[test]
    fn test_drop_score() {
        assert_eq!(drop_score(18, true), 36);
        assert_eq!(drop_score(3, false), 3);
        assert_eq!(drop_score(0, true), 0);
    }

    #[test]
    fn test_drop_interval_is_floored() {
        assert_eq!(next_drop_interval(DROP_INTERVAL_MS, 1), 680);
        assert_eq!(next_drop_interval(DROP_INTERVAL_MS, 4), 620);
        assert_eq!(next_drop_interval(130, 4), DROP_INTERVAL_FLOOR_MS);
        assert_eq!(next_drop_interval(DROP_INTERVAL_FLOOR_MS, 2), DROP_INTERVAL_FLOOR_MS);
    }

    #[test]
    fn test_snake_interval_speeds_up_until_floor() {
        let mut ms = SNAKE_TICK_MS;
        let mut prev = ms;
        for _ in 0..100 {
            ms = next_snake_interval(ms);
            assert!(ms <= prev);
            prev = ms;
        }
        assert_eq!(ms, SNAKE_TICK_FLOOR_MS);
    }
}
