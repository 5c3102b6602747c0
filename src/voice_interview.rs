use rand::Rng;
use rand::seq::SliceRandom;

use crate::llm_service::TextGenerator;
use crate::log_llm_operation;
use crate::models::{InterviewFeedback, Level};
use crate::prompts::{FEEDBACK_PARAMS, feedback_prompt};
use crate::question_generator::simple_hr_questions;

pub const DEFAULT_INTERVIEW_QUESTION: &str = "Tell me about yourself.";

/// Converts a recorded answer into text. `None` means the audio could not be understood.
pub trait Transcriber {
    fn transcribe(&self, audio: &[u8]) -> Option<String>;
}

/// Treats the "recording" as UTF-8 text. Used by the terminal front-end,
/// where the candidate types the spoken answer.
#[derive(Debug, Default, Clone, Copy)]
pub struct TypedTranscriber;

impl Transcriber for TypedTranscriber {
    fn transcribe(&self, audio: &[u8]) -> Option<String> {
        let text = std::str::from_utf8(audio).ok()?.trim();
        (!text.is_empty()).then(|| text.to_string())
    }
}

pub fn pick_interview_question<R>(role: &str, level: Level, rng: &mut R) -> String
where
    R: Rng + ?Sized,
{
    simple_hr_questions(role, level, 5, rng)
        .choose(rng)
        .cloned()
        .unwrap_or_else(|| DEFAULT_INTERVIEW_QUESTION.to_string())
}

/// Asks the model to grade an answer. An unavailable model yields empty feedback.
pub async fn evaluate_answer(generator: &dyn TextGenerator, question: &str, transcript: &str) -> InterviewFeedback {
    let response = generator
        .generate_text(
            &feedback_prompt(question, transcript),
            FEEDBACK_PARAMS.max_tokens,
            FEEDBACK_PARAMS.temperature,
        )
        .await;
    if response.trim().is_empty() {
        log_llm_operation!(empty, "evaluate_answer");
    }
    parse_feedback(&response)
}

#[derive(Clone, Copy)]
enum FreeText {
    Feedback,
    Improvement,
}

/// Line parser for the graded layout. Unlabelled lines continue the most
/// recent free-text field, which starts out as `Feedback`.
pub fn parse_feedback(response: &str) -> InterviewFeedback {
    let mut feedback = InterviewFeedback::default();
    let mut current = FreeText::Feedback;

    for line in response.lines().map(str::trim).filter(|line| !line.is_empty()) {
        if let Some(value) = labelled(line, "Clarity:") {
            feedback.clarity = Some(value);
        } else if let Some(value) = labelled(line, "Relevance:") {
            feedback.relevance = Some(value);
        } else if let Some(value) = labelled(line, "Completeness:") {
            feedback.completeness = Some(value);
        } else if let Some(value) = labelled(line, "Overall:") {
            feedback.overall = Some(value);
        } else if let Some(value) = labelled(line, "Feedback:") {
            feedback.feedback = Some(value);
            current = FreeText::Feedback;
        } else if let Some(value) = labelled(line, "Improvement:") {
            feedback.improvement = Some(value);
            current = FreeText::Improvement;
        } else {
            let field = match current {
                FreeText::Feedback => &mut feedback.feedback,
                FreeText::Improvement => &mut feedback.improvement,
            };
            let text = field.get_or_insert_with(String::new);
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(line);
        }
    }

    feedback
}

fn labelled(line: &str, label: &str) -> Option<String> {
    line.strip_prefix(label).map(|value| value.trim().to_string())
}
