use chrono::{DateTime, Utc};
use interview_prep::scoring::{ScoringWeights, score};
use interview_prep::{
    LLMService, Level, Mcq, PracticeEvent, PracticeRequest, PracticeSession, PracticeState, Tier,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn at(seconds: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(1_750_000_000 + seconds, 0).unwrap()
}

fn question(text: &str, answer_index: usize) -> Mcq {
    Mcq::new(text, ["w", "x", "y", "z"].map(str::to_string), answer_index, "", Tier::Intermediate).unwrap()
}

#[test]
fn test_scoring_table() {
    assert_eq!(score(Some(1), 1, "Beginner", 23), 7);
    assert_eq!(score(Some(0), 1, "Beginner", 50), -1);
    assert_eq!(score(None, 1, "Beginner", 40), -1);

    // fractional negatives truncate toward zero
    assert_eq!(score(Some(0), 1, "Advanced", 90), -1);
    assert_eq!(score(Some(2), 2, "Advanced", 0), 8);
    assert_eq!(score(Some(2), 2, "Intermediate", 29), 8);

    // unknown level names weigh 1.0 and negative time is no bonus
    assert_eq!(score(Some(3), 3, "Guru", -30), 5);
}

#[test]
fn test_custom_weights() {
    let weights = ScoringWeights {
        beginner: 2.0,
        intermediate: 2.0,
        advanced: 2.0,
    };
    assert_eq!(weights.score(Some(0), 0, "advanced", 10), 11);
    assert_eq!(weights.score(Some(1), 0, "advanced", 10), -2);

    let mut session = PracticeSession::with_weights(Level::Beginner, 60, weights);
    session.start(vec![question("Only?", 0)], at(0));
    let event = session.submit(Some(0), at(30)).unwrap();
    assert!(matches!(event, PracticeEvent::Finished { total: 13, .. }));
}

#[test]
fn test_total_is_sum_of_results() {
    let mut session = PracticeSession::new(Level::Intermediate, 90);
    let set = vec![question("A?", 0), question("B?", 1), question("C?", 2), question("D?", 3)];
    assert_eq!(session.start(set, at(0)), PracticeState::Running);
    assert_eq!(session.per_question_seconds(), 90);

    session.submit(Some(0), at(10)); // 6.5 + 8, truncated to 14
    session.submit(Some(0), at(20)); // -1
    session.submit(None, at(25)); // -1
    let last = session.submit(Some(3), at(200)).unwrap(); // deadline passed, no bonus: 6

    let sum: i64 = session.results().iter().map(|r| r.score_delta).sum();
    assert_eq!(sum, 14 - 1 - 1 + 6);
    assert_eq!(last, PracticeEvent::Finished {
        last: session.results()[3].clone(),
        total: sum,
    });
    assert_eq!(session.state(), PracticeState::Finished { total: sum });
    assert!(session.current_question().is_none());
}

#[test]
fn test_expiry_without_selection_appends_penalty() {
    let mut session = PracticeSession::new(Level::Beginner, 60);
    session.start(vec![question("A?", 0), question("B?", 1)], at(0));

    assert!(session.tick(Some(0), at(59)).is_none());
    assert_eq!(session.remaining_seconds(at(59)), 1);

    let event = session.tick(None, at(60)).unwrap();
    let result = event.result();
    assert_eq!(result.selected_index, None);
    assert_eq!(result.score_delta, -1);
    assert_eq!(result.time_left_seconds, 0);
    assert_eq!(session.current_question().map(|m| m.question.as_str()), Some("B?"));
}

#[test]
fn test_stop_then_restart() {
    let mut session = PracticeSession::new(Level::Advanced, 120);
    session.start(vec![question("A?", 0), question("B?", 1)], at(0));
    let first_id = session.id();

    session.submit(Some(0), at(5));
    session.stop();
    assert_eq!(session.state(), PracticeState::Idle);
    assert_eq!(session.results().len(), 1);
    assert!(session.tick(None, at(500)).is_none());

    session.start(vec![question("C?", 2)], at(600));
    assert_ne!(session.id(), first_id);
    assert!(session.results().is_empty());
    assert_eq!(session.remaining_seconds(at(600)), 120);
}

#[tokio::test]
async fn test_start_generated_uses_bank_when_ai_is_unavailable() {
    let request = PracticeRequest {
        role: "Data Scientist".to_string(),
        skills: vec!["sql".to_string()],
        level: Level::Intermediate,
        question_count: 30,
        use_ai: true,
    };
    let mut session = PracticeSession::new(Level::Beginner, 45);
    let mut rng = StdRng::seed_from_u64(30);

    let state = session
        .start_generated(&request, &LLMService::disabled(), &mut rng, at(0))
        .await;

    assert_eq!(state, PracticeState::Running);
    assert_eq!(session.level(), Level::Intermediate);
    // the sql bank holds one question per tier
    assert_eq!(session.question_count(), 3);
}
