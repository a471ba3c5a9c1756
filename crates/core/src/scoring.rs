//! Scoring module - line-clear points, level progression and gravity pace
//!
//! Points follow the classic table scaled by the current level (which starts
//! at 1). A level is gained once the cumulative line count exceeds
//! `level * 10`, at most one level per lock.

use crate::types::{LINES_PER_LEVEL, LINE_SCORES};

/// Points for clearing `lines` rows in a single lock.
///
/// Four or more lines score as four.
pub fn line_clear_score(lines: u32, level: u32) -> u32 {
    let index = (lines as usize).min(LINE_SCORES.len() - 1);
    LINE_SCORES[index].saturating_mul(level)
}

/// Gravity interval for a level, in milliseconds.
///
/// `base * 2 / (level + 1)`: level 1 runs at `base`, each level after that is
/// faster, and the result never drops below `floor` (nor below 1ms).
pub fn gravity_interval_ms(level: u32, base_ms: u64, floor_ms: u64) -> u64 {
    let divisor = u64::from(level.max(1)) + 1;
    (base_ms.saturating_mul(2) / divisor).max(floor_ms).max(1)
}

/// What a single lock contributed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClearResult {
    pub lines: u32,
    pub points: u32,
    /// The new level, when this lock triggered a level-up.
    pub level_up: Option<u32>,
}

/// Running score, level and cumulative line count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub level: u32,
    pub score: u32,
    pub lines: u32,
}

impl Progress {
    pub fn new() -> Self {
        Self {
            level: 1,
            score: 0,
            lines: 0,
        }
    }

    /// Account for a lock that cleared `lines` rows.
    pub fn apply_clear(&mut self, lines: u32) -> ClearResult {
        if lines == 0 {
            return ClearResult::default();
        }

        let points = line_clear_score(lines, self.level);
        self.score = self.score.saturating_add(points);
        self.lines = self.lines.saturating_add(lines);

        let level_up = if self.lines > self.level * LINES_PER_LEVEL {
            self.level += 1;
            Some(self.level)
        } else {
            None
        };

        ClearResult {
            lines,
            points,
            level_up,
        }
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::new()
    }
}
