use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::dedup::dedupe_mcqs;
use crate::models::{Mcq, Tier};
use crate::question_bank::{QuestionBank, role_skills};
use crate::sampler::pick_unique;

pub const FALLBACK_SKILL: &str = "python";

/// Per-tier targets for a set of `n` questions (30/50/20 split).
///
/// Each tier gets at least one question, so small `n` can ask for more than
/// `n` candidates in total; the generator truncates after shuffling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierCounts {
    pub easy: usize,
    pub intermediate: usize,
    pub advanced: usize,
}

impl TierCounts {
    pub fn for_total(n: usize) -> Self {
        // half-up rounding of n * 0.3 and n * 0.5, split so large n cannot overflow
        let easy = (n / 10 * 3 + ((n % 10) * 3 + 5) / 10).max(1);
        let intermediate = (n / 2 + n % 2).max(1);
        let advanced = n.saturating_sub(easy.saturating_add(intermediate)).max(1);
        Self {
            easy,
            intermediate,
            advanced,
        }
    }

    pub fn get(&self, tier: Tier) -> usize {
        match tier {
            Tier::Easy => self.easy,
            Tier::Intermediate => self.intermediate,
            Tier::Advanced => self.advanced,
            Tier::Unknown => 0,
        }
    }

    pub fn total(&self) -> usize {
        self.easy.saturating_add(self.intermediate).saturating_add(self.advanced)
    }
}

/// Skill a rule-based set is drawn from: first requested skill, then the
/// role's first skill, then python.
pub fn resolve_skill<'a>(role: &str, skills: &'a [String]) -> &'a str {
    skills
        .first()
        .map(String::as_str)
        .filter(|skill| !skill.trim().is_empty())
        .or_else(|| role_skills(role).first().copied())
        .unwrap_or(FALLBACK_SKILL)
}

/// Builds up to `n` unique MCQs from the static bank.
///
/// `level` does not change the draw; the tier mix is fixed.
pub fn generate_mcqs<R>(role: &str, skills: &[String], n: usize, level: &str, rng: &mut R) -> Vec<Mcq>
where
    R: Rng + ?Sized,
{
    let skill = resolve_skill(role, skills);
    let bank = QuestionBank::for_skill(skill);
    let counts = TierCounts::for_total(n);

    let candidates = Tier::SAMPLED
        .into_iter()
        .flat_map(|tier| pick_unique(bank.tier(tier), tier, counts.get(tier), rng))
        .collect::<Vec<_>>();

    let mut mcqs = dedupe_mcqs(candidates);
    mcqs.shuffle(rng);
    mcqs.truncate(n);

    crate::log_generation!(
        "rule_based_mcqs",
        skill = skill,
        requested = n,
        produced = mcqs.len()
    );
    debug!(role = %role, level = %level, candidates = counts.total(), "Bank draw complete");

    mcqs
}
