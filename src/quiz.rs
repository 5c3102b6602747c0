use std::collections::HashMap;

use crate::dedup::dedupe_mcqs;
use crate::models::{Level, Mcq, McqAttempt};
use crate::scoring::ScoringWeights;

/// Untimed quiz where each question is checked on demand.
///
/// Every check appends an [`McqAttempt`] row. The running score counts the
/// latest row of each question, scored with no time bonus.
#[derive(Debug, Clone)]
pub struct AdhocQuiz {
    level: Level,
    weights: ScoringWeights,
    mcqs: Vec<Mcq>,
    rows: Vec<McqAttempt>,
}

impl AdhocQuiz {
    pub fn new(mcqs: Vec<Mcq>, level: Level) -> Self {
        Self {
            level,
            weights: ScoringWeights::default(),
            mcqs: dedupe_mcqs(mcqs),
            rows: Vec::new(),
        }
    }

    pub fn questions(&self) -> &[Mcq] {
        &self.mcqs
    }

    pub fn rows(&self) -> &[McqAttempt] {
        &self.rows
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// Checks `selected` against question `index` (both zero-based).
    /// Returns `None` when either is out of range.
    pub fn check(&mut self, index: usize, selected: usize) -> Option<&McqAttempt> {
        let mcq = self.mcqs.get(index)?;
        let selected_text = mcq.options.get(selected)?.clone();
        let is_correct = selected == mcq.answer_index;
        let score = self
            .weights
            .score(Some(selected), mcq.answer_index, self.level.as_str(), 0);

        self.rows.push(McqAttempt {
            number: index + 1,
            difficulty: mcq.difficulty,
            selected: selected_text,
            correct: mcq.correct_option().to_string(),
            is_correct,
            score,
        });
        self.rows.last()
    }

    pub fn score(&self) -> i64 {
        let latest: HashMap<usize, i64> = self.rows.iter().map(|row| (row.number, row.score)).collect();
        latest.values().sum()
    }

    pub fn max_score(&self) -> i64 {
        let best = self.weights.score(Some(0), 0, self.level.as_str(), 0);
        best * self.mcqs.len() as i64
    }
}
