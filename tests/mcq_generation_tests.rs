use interview_prep::dedup::{dedup_key, dedupe_mcqs};
use interview_prep::mcq_generator::TierCounts;
use interview_prep::question_bank::QuestionBank;
use interview_prep::sampler::pick_unique;
use interview_prep::{Mcq, Tier, generate_mcqs};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashSet;

fn mcq(question: &str) -> Mcq {
    Mcq::new(question, ["a", "b", "c", "d"].map(str::to_string), 0, "", Tier::Easy).unwrap()
}

fn assert_unique(mcqs: &[Mcq]) {
    let keys: HashSet<String> = mcqs.iter().map(|m| dedup_key(&m.question)).collect();
    assert_eq!(keys.len(), mcqs.len(), "duplicate question in {:?}", mcqs);
}

#[test]
fn test_dedup_is_idempotent_and_order_preserving() {
    let list = vec![
        mcq("Why Rust?"),
        mcq("What is a trait?"),
        mcq("  why rust?  "),
        mcq("Explain lifetimes"),
        mcq("WHAT IS A TRAIT?"),
    ];

    let once = dedupe_mcqs(list.clone());
    let twice = dedupe_mcqs(once.clone());

    assert_eq!(once, twice);
    assert!(once.len() <= list.len());
    assert_unique(&once);

    let questions: Vec<&str> = once.iter().map(|m| m.question.as_str()).collect();
    assert_eq!(questions, vec!["Why Rust?", "What is a trait?", "Explain lifetimes"]);
}

#[test]
fn test_generator_shape_for_python_developer() {
    let skills = vec!["python".to_string()];

    // several seeds so the assertion is not tied to one lucky draw
    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mcqs = generate_mcqs("Python Developer", &skills, 12, "Intermediate", &mut rng);

        assert!(!mcqs.is_empty());
        assert!(mcqs.len() <= 12);
        assert!(mcqs.iter().all(|m| m.options.len() == 4 && m.answer_index <= 3));
        assert!(mcqs.iter().all(|m| m.difficulty != Tier::Unknown));
        assert_unique(&mcqs);
    }
}

#[test]
fn test_generator_is_reproducible_with_a_seed() {
    let skills = vec!["python".to_string()];
    let first = generate_mcqs("Python Developer", &skills, 12, "Beginner", &mut StdRng::seed_from_u64(99));
    let second = generate_mcqs("Python Developer", &skills, 12, "Beginner", &mut StdRng::seed_from_u64(99));
    assert_eq!(first, second);
}

#[test]
fn test_small_sets_are_truncated_to_request() {
    // n=3 asks the tiers for 1 + 2 + 1 candidates
    let counts = TierCounts::for_total(3);
    assert_eq!((counts.easy, counts.intermediate, counts.advanced), (1, 2, 1));
    assert_eq!(counts.total(), 4);

    for seed in 0..20 {
        let mcqs = generate_mcqs("Python Developer", &[], 3, "Beginner", &mut StdRng::seed_from_u64(seed));
        assert!(mcqs.len() <= 3);
    }
}

#[test]
fn test_unknown_skill_uses_default_bank() {
    let skills = vec!["cobol".to_string()];
    let python: HashSet<&str> = Tier::SAMPLED
        .iter()
        .flat_map(|tier| QuestionBank::for_skill("python").tier(*tier))
        .map(|entry| entry.question)
        .collect();

    let mcqs = generate_mcqs("Astronaut", &skills, 8, "Advanced", &mut StdRng::seed_from_u64(4));
    assert!(!mcqs.is_empty());
    assert!(mcqs.iter().all(|m| python.contains(m.question.as_str())));
}

#[test]
fn test_sampler_never_pads_a_short_tier() {
    let pool = QuestionBank::for_skill("sql").easy;
    assert_eq!(pool.len(), 1);

    let mut rng = StdRng::seed_from_u64(21);
    let picked = pick_unique(pool, Tier::Easy, 5, &mut rng);
    assert_eq!(picked.len(), 1);
    assert_eq!(picked[0].difficulty, Tier::Easy);

    assert!(pick_unique(&[], Tier::Advanced, 3, &mut rng).is_empty());
}
