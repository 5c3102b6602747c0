use std::collections::HashSet;

use crate::models::Mcq;

/// Uniqueness key for a question: trimmed and case-folded.
pub fn dedup_key(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Keeps the first occurrence of each question text, in input order.
/// Blank entries carry no question and are dropped.
pub fn dedupe_texts<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .map(Into::into)
        .filter(|item| {
            let key = dedup_key(item);
            !key.is_empty() && seen.insert(key)
        })
        .collect()
}

/// Keeps the first MCQ for each question text, in input order.
pub fn dedupe_mcqs<I>(items: I) -> Vec<Mcq>
where
    I: IntoIterator<Item = Mcq>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|mcq| {
            let key = dedup_key(&mcq.question);
            !key.is_empty() && seen.insert(key)
        })
        .collect()
}
