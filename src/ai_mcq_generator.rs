use rand::Rng;

use crate::ai_parser::parse_blocks;
use crate::dedup::dedupe_mcqs;
use crate::llm_service::TextGenerator;
use crate::mcq_generator::{FALLBACK_SKILL, generate_mcqs};
use crate::models::Mcq;
use crate::prompts::{MCQ_PARAMS, mcq_prompt};
use crate::{log_generation, log_llm_operation};

/// Asks the model for `n` MCQs and tops up any shortfall from the bank.
///
/// The result holds at most `n` unique questions; it is shorter only when
/// the model output and the bank together cannot supply `n`. An empty or
/// unparseable completion falls back entirely to the bank.
pub async fn generate_ai_mcqs<R>(
    generator: &dyn TextGenerator,
    role: &str,
    skills: &[String],
    n: usize,
    level: &str,
    rng: &mut R,
) -> Vec<Mcq>
where
    R: Rng + ?Sized,
{
    let skill = skills
        .first()
        .map(String::as_str)
        .filter(|skill| !skill.trim().is_empty())
        .unwrap_or(FALLBACK_SKILL);

    let completion = generator
        .generate_text(&mcq_prompt(n, skill), MCQ_PARAMS.max_tokens, MCQ_PARAMS.temperature)
        .await;
    if completion.trim().is_empty() {
        log_llm_operation!(empty, "ai_mcqs");
    }

    let mut mcqs = dedupe_mcqs(parse_blocks(&completion));

    if mcqs.len() < n {
        let shortfall = n - mcqs.len();
        log_generation!(fallback, "ai_mcqs", ai_count = mcqs.len(), shortfall = shortfall);

        let extra = dedupe_mcqs(generate_mcqs(role, skills, shortfall, level, rng));
        mcqs = dedupe_mcqs(mcqs.into_iter().chain(extra));
    }
    mcqs.truncate(n);

    log_generation!("ai_mcqs", skill = skill, requested = n, produced = mcqs.len());
    mcqs
}
