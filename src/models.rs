use serde::{Deserialize, Serialize};
use std::fmt;

/// Difficulty tier a question was drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Easy,
    Intermediate,
    Advanced,
    #[default]
    Unknown,
}

impl Tier {
    pub const SAMPLED: [Tier; 3] = [Tier::Easy, Tier::Intermediate, Tier::Advanced];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Easy => "easy",
            Tier::Intermediate => "intermediate",
            Tier::Advanced => "advanced",
            Tier::Unknown => "",
        }
    }

    /// Short badge shown next to a question.
    pub fn badge(&self) -> &'static str {
        match self {
            Tier::Easy => "Easy",
            Tier::Intermediate => "Intermediate",
            Tier::Advanced => "Advanced",
            Tier::Unknown => "Mixed",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Candidate experience level chosen for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Level {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Beginner, Level::Intermediate, Level::Advanced];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Beginner => "Beginner",
            Level::Intermediate => "Intermediate",
            Level::Advanced => "Advanced",
        }
    }

    /// Case-insensitive lookup, `None` for anything that is not a level name.
    pub fn parse(value: &str) -> Option<Level> {
        match value.trim().to_lowercase().as_str() {
            "beginner" => Some(Level::Beginner),
            "intermediate" => Some(Level::Intermediate),
            "advanced" => Some(Level::Advanced),
            _ => None,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One static question of the bank: question, 4 options, correct index, explanation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BankEntry {
    pub question: &'static str,
    pub options: [&'static str; 4],
    pub answer_index: usize,
    pub explanation: &'static str,
}

impl BankEntry {
    pub fn to_mcq(&self, tier: Tier) -> Mcq {
        Mcq {
            question: self.question.to_string(),
            options: self.options.map(str::to_string),
            answer_index: self.answer_index,
            explanation: self.explanation.to_string(),
            difficulty: tier,
        }
    }
}

/// A multiple-choice question. The fixed-size option array makes a
/// record with fewer than four options unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mcq {
    pub question: String,
    pub options: [String; 4],
    pub answer_index: usize,
    pub explanation: String,
    pub difficulty: Tier,
}

impl Mcq {
    /// Builds a record, rejecting blank questions, out-of-range answers and repeated options.
    pub fn new(
        question: impl Into<String>,
        options: [String; 4],
        answer_index: usize,
        explanation: impl Into<String>,
        difficulty: Tier,
    ) -> Option<Self> {
        let question = question.into().trim().to_string();
        if question.is_empty() || answer_index >= options.len() {
            return None;
        }
        for (i, option) in options.iter().enumerate() {
            if options[..i].iter().any(|earlier| earlier == option) {
                return None;
            }
        }

        Some(Self {
            question,
            options,
            answer_index,
            explanation: explanation.into().trim().to_string(),
            difficulty,
        })
    }

    pub fn correct_option(&self) -> &str {
        &self.options[self.answer_index]
    }

    pub fn option_letter(index: usize) -> char {
        (b'A' + index as u8) as char
    }
}

/// Outcome of one answered (or expired) practice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticeResult {
    /// `None` when the timer ran out without a selection.
    pub selected_index: Option<usize>,
    pub correct_index: usize,
    pub score_delta: i64,
    pub time_left_seconds: u64,
}

/// Row recorded each time a question of the ad-hoc quiz is checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct McqAttempt {
    pub number: usize,
    pub difficulty: Tier,
    pub selected: String,
    pub correct: String,
    pub is_correct: bool,
    pub score: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AtsReport {
    pub score: u32,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct JdSummary {
    pub overview: String,
    pub must_have: Vec<String>,
    pub nice_to_have: Vec<String>,
}

/// Structured evaluation of a spoken interview answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct InterviewFeedback {
    pub clarity: Option<String>,
    pub relevance: Option<String>,
    pub completeness: Option<String>,
    pub overall: Option<String>,
    pub feedback: Option<String>,
    pub improvement: Option<String>,
}

impl InterviewFeedback {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
