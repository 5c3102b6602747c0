use serde::{Deserialize, Serialize};

use crate::models::Level;

pub const CORRECT_POINTS: i64 = 5;
pub const WRONG_POINTS: i64 = -1;
pub const UNANSWERED_POINTS: i64 = -1;
/// Seconds of remaining time worth one bonus point.
pub const BONUS_STEP_SECONDS: u64 = 10;

/// Level → score multiplier. Read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub beginner: f64,
    pub intermediate: f64,
    pub advanced: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            beginner: 1.0,
            intermediate: 1.3,
            advanced: 1.6,
        }
    }
}

impl ScoringWeights {
    /// Multiplier for a level name; unrecognized names weigh 1.0.
    pub fn multiplier(&self, level: &str) -> f64 {
        match Level::parse(level) {
            Some(Level::Beginner) => self.beginner,
            Some(Level::Intermediate) => self.intermediate,
            Some(Level::Advanced) => self.advanced,
            None => 1.0,
        }
    }

    /// Points for one answer.
    ///
    /// No selection is always -1. A correct answer earns `5 * multiplier`
    /// plus one point per full ten seconds left; a wrong one `-1 * multiplier`
    /// with no time bonus. Fractions truncate toward zero.
    pub fn score(&self, selected: Option<usize>, correct: usize, level: &str, time_left_seconds: i64) -> i64 {
        let Some(selected) = selected else {
            return UNANSWERED_POINTS;
        };

        let multiplier = self.multiplier(level);
        if selected == correct {
            let bonus = time_left_seconds.max(0) as u64 / BONUS_STEP_SECONDS;
            (CORRECT_POINTS as f64 * multiplier + bonus as f64).trunc() as i64
        } else {
            (WRONG_POINTS as f64 * multiplier).trunc() as i64
        }
    }
}

/// Scores with the default weight table.
pub fn score(selected: Option<usize>, correct: usize, level: &str, time_left_seconds: i64) -> i64 {
    ScoringWeights::default().score(selected, correct, level, time_left_seconds)
}
