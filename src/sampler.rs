use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;

use crate::models::{BankEntry, Mcq, Tier};

/// Draws up to `count` distinct questions from one tier.
///
/// Makes at most `2 * count` draws with replacement, so a pool with fewer
/// distinct questions than `count` (or an unlucky run of repeats) yields a
/// shorter list. The result is never padded, and drawing stops once every
/// distinct question in the pool has been picked.
pub fn pick_unique<R>(tier_items: &[BankEntry], tier: Tier, count: usize, rng: &mut R) -> Vec<Mcq>
where
    R: Rng + ?Sized,
{
    // no more than the pool's distinct questions can ever be picked
    let target = count.min(tier_items.iter().map(|entry| entry.question).collect::<HashSet<_>>().len());
    let mut picked = Vec::with_capacity(target);
    let mut used = HashSet::new();

    if target == 0 {
        return picked;
    }

    for _ in 0..count.saturating_mul(2) {
        let Some(entry) = tier_items.choose(rng) else {
            break;
        };
        if used.insert(entry.question) {
            picked.push(entry.to_mcq(tier));
        }
        if picked.len() >= target {
            break;
        }
    }

    picked
}
