use regex::Regex;
use std::sync::LazyLock;

use crate::models::{Mcq, Tier};

static SEPARATOR_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*-{3,}\s*$").unwrap());
static QUESTION_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^Q\s*:\s*(.+)$").unwrap());
static OPTION_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([A-D])\)\s*(.+)$").unwrap());
static CORRECT_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^Correct\s*:\s*([A-D])").unwrap());
static EXPLANATION_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Explanation\s*:\s*(.*)$").unwrap());
static BULLET_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(?:[-•*]+|\d+[.)]?)\s*").unwrap());

/// Fields collected while scanning one block.
#[derive(Debug, Default)]
struct BlockScan {
    question: Option<String>,
    options: Vec<String>,
    correct: Option<usize>,
    explanation: Option<Vec<String>>,
}

impl BlockScan {
    fn feed(&mut self, line: &str) {
        // Explanation runs to the end of the block.
        if let Some(explanation) = self.explanation.as_mut() {
            explanation.push(line.to_string());
        }

        if self.question.is_none() {
            if let Some(caps) = QUESTION_LINE.captures(line) {
                self.question = Some(caps[1].trim().to_string());
                return;
            }
        }

        if let Some(caps) = OPTION_LINE.captures(line) {
            self.options.push(caps[2].trim().to_string());
            return;
        }

        if self.correct.is_none() {
            if let Some(caps) = CORRECT_LINE.captures(line) {
                self.correct = letter_index(&caps[1]);
                return;
            }
        }

        if self.explanation.is_none() {
            if let Some(caps) = EXPLANATION_LINE.captures(line) {
                self.explanation = Some(vec![caps[1].to_string()]);
            }
        }
    }

    /// A block without a question, four options and a correct letter yields nothing.
    fn finish(self) -> Option<Mcq> {
        let question = self.question?;
        let correct = self.correct?;
        if self.options.len() < 4 {
            return None;
        }

        let mut options = self.options.into_iter();
        let options: [String; 4] = std::array::from_fn(|_| options.next().unwrap_or_default());
        let explanation = self
            .explanation
            .map(|lines| lines.join("\n").trim().to_string())
            .unwrap_or_default();

        Mcq::new(question, options, correct, explanation, Tier::Unknown)
    }
}

fn letter_index(letter: &str) -> Option<usize> {
    "ABCD".find(letter)
}

/// Parses model output in the `Q:` / `A)`..`D)` / `Correct:` / `Explanation:`
/// block format into MCQs. Blocks are separated by lines of three or more
/// dashes; malformed blocks are skipped.
pub fn parse_blocks(text: &str) -> Vec<Mcq> {
    let mut blocks: Vec<Vec<&str>> = vec![Vec::new()];
    for raw in text.lines() {
        if SEPARATOR_LINE.is_match(raw) {
            blocks.push(Vec::new());
            continue;
        }
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(current) = blocks.last_mut() {
            current.push(line);
        }
    }

    blocks
        .into_iter()
        .filter(|lines| !lines.is_empty())
        .filter_map(|lines| {
            let mut scan = BlockScan::default();
            for line in lines {
                scan.feed(line);
            }
            scan.finish()
        })
        .collect()
}

/// Splits a bullet or numbered list into plain lines, stripping one leading marker.
pub fn parse_bulleted(text: &str) -> Vec<String> {
    text.replace('\r', "\n")
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| BULLET_PREFIX.replace(line, "").trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}
