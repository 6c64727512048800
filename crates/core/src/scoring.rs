//! Scoring module - classic line scores, row count and level progression
//!
//! [`Scoreboard`] is the only place where the level changes. The drop interval
//! is derived from the level by [`drop_interval_ms`].

use crate::types::{
    DROP_INTERVAL_BASE_MS, DROP_INTERVAL_FLOOR_MS, INITIAL_DROP_MS, LINE_POINTS,
    MAX_ROWS_PER_LOCK, ROWS_PER_LEVEL,
};

/// Calculate line clear score (Classic rules)
/// rows: number of rows cleared by one lock (1-4)
/// level: current level (0-based)
pub fn calculate_line_score(rows: u32, level: u32) -> u32 {
    if rows == 0 || rows > MAX_ROWS_PER_LOCK {
        return 0;
    }
    LINE_POINTS[(rows - 1) as usize].saturating_mul(level.saturating_add(1))
}

/// Get drop interval for a level (in milliseconds)
///
/// Level 0 uses the starting interval; higher levels follow
/// `1000 / (level + 1) + 200`, which stays above the 200ms floor.
pub fn drop_interval_ms(level: u32) -> u32 {
    if level == 0 {
        return INITIAL_DROP_MS;
    }
    DROP_INTERVAL_BASE_MS / level.saturating_add(1) + DROP_INTERVAL_FLOOR_MS
}

/// Result of recording one lock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClearOutcome {
    pub rows_cleared: u32,
    pub points: u32,
    pub leveled_up: bool,
}

/// Running score, cleared rows and level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Scoreboard {
    score: u32,
    rows: u32,
    level: u32,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scoreboard with existing counters, e.g. to resume a session
    pub fn with_counts(score: u32, rows: u32, level: u32) -> Self {
        Self { score, rows, level }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Record the rows cleared by one lock
    ///
    /// Points use the level before this update. The level goes up by at most
    /// one per call, once the row total reaches `(level + 1) * 10`. Counts of 0
    /// or above 4 change nothing.
    pub fn record_clear(&mut self, rows_cleared: u32) -> ClearOutcome {
        if rows_cleared == 0 || rows_cleared > MAX_ROWS_PER_LOCK {
            return ClearOutcome::default();
        }

        let points = calculate_line_score(rows_cleared, self.level);
        self.score = self.score.saturating_add(points);
        self.rows = self.rows.saturating_add(rows_cleared);

        let threshold = self.level.saturating_add(1).saturating_mul(ROWS_PER_LEVEL);
        let leveled_up = self.rows >= threshold;
        if leveled_up {
            self.level += 1;
        }

        ClearOutcome {
            rows_cleared,
            points,
            leveled_up,
        }
    }

    /// Current drop interval for this level
    pub fn drop_interval_ms(&self) -> u32 {
        drop_interval_ms(self.level)
    }
}
