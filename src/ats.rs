//! Keyword extraction and ATS-style scoring of a résumé against a role.

use std::collections::BTreeSet;

use crate::llm_service::TextGenerator;
use crate::log_llm_operation;
use crate::models::AtsReport;
use crate::prompts::{SUGGESTION_PARAMS, suggestions_prompt};
use crate::question_bank::{SKILL_KEYWORDS, role_skills};

const MAX_SUGGESTIONS: usize = 10;

const GENERIC_TIPS: [&str; 5] = [
    "Quantify outcomes (e.g., reduced latency 30%, improved accuracy 4%).",
    "Use action verbs (designed, optimized, automated, deployed).",
    "Mirror job description keywords in skills and experience sections.",
    "Place most relevant projects above older experience.",
    "Include links: GitHub, portfolio, Kaggle (if applicable).",
];

/// Known skill keywords that occur in `text` as whole space-delimited
/// phrases, case-folded and sorted.
pub fn extract_skills(text: &str) -> Vec<String> {
    let padded = format!(" {} ", text.to_lowercase().split_whitespace().collect::<Vec<_>>().join(" "));
    SKILL_KEYWORDS
        .iter()
        .filter(|keyword| padded.contains(&format!(" {keyword} ")))
        .map(|keyword| keyword.to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Percentage of the role's required skills found in `extracted`.
/// Matched and missing keep the role's skill order. Unknown roles score 0.
pub fn ats_score(extracted: &[String], role: &str) -> AtsReport {
    let required = role_skills(role);
    if required.is_empty() {
        return AtsReport::default();
    }

    let (matched, missing): (Vec<String>, Vec<String>) = required
        .iter()
        .map(|skill| skill.to_string())
        .partition(|skill| extracted.contains(skill));

    let score = (matched.len() * 100 / required.len()) as u32;
    AtsReport { score, matched, missing }
}

/// Up to ten model-written résumé improvements, or a fixed tip list when
/// the model returns nothing.
pub async fn resume_suggestions(
    generator: &dyn TextGenerator,
    extracted: &[String],
    missing: &[String],
    role: &str,
) -> Vec<String> {
    let raw = generator
        .generate_text(
            &suggestions_prompt(extracted, missing, role),
            SUGGESTION_PARAMS.max_tokens,
            SUGGESTION_PARAMS.temperature,
        )
        .await;

    let lines: Vec<String> = raw
        .lines()
        .map(|line| line.trim_matches(|c: char| c == '-' || c == '•' || c == '*' || c.is_whitespace()))
        .filter(|line| !line.is_empty())
        .take(MAX_SUGGESTIONS)
        .map(str::to_string)
        .collect();
    if !lines.is_empty() {
        return lines;
    }

    log_llm_operation!(empty, "resume_suggestions");
    let mut tips = Vec::with_capacity(GENERIC_TIPS.len() + 1);
    if !missing.is_empty() {
        tips.push(format!(
            "Add concrete mentions of: {} (projects, tools, achievements).",
            missing.join(", ")
        ));
    }
    tips.extend(GENERIC_TIPS.iter().map(|tip| tip.to_string()));
    tips
}
