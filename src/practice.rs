use chrono::{DateTime, TimeDelta, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ai_mcq_generator::generate_ai_mcqs;
use crate::dedup::dedupe_mcqs;
use crate::llm_service::TextGenerator;
use crate::log_practice_event;
use crate::mcq_generator::generate_mcqs;
use crate::models::{Level, Mcq, PracticeResult};
use crate::scoring::ScoringWeights;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PracticeState {
    Idle,
    Running,
    Finished { total: i64 },
}

/// What a caller asked for when starting a practice run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PracticeRequest {
    pub role: String,
    pub skills: Vec<String>,
    pub level: Level,
    pub question_count: usize,
    pub use_ai: bool,
}

/// Emitted whenever a question is resolved by submission or expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PracticeEvent {
    Answered(PracticeResult),
    Finished { last: PracticeResult, total: i64 },
}

impl PracticeEvent {
    pub fn result(&self) -> &PracticeResult {
        match self {
            PracticeEvent::Answered(result) => result,
            PracticeEvent::Finished { last, .. } => last,
        }
    }
}

/// Timed practice run over a generated MCQ set.
///
/// The session never reads a clock. Every call takes `now`, and the
/// deadline is re-evaluated on each external trigger (a submission or a
/// UI refresh via [`PracticeSession::tick`]).
#[derive(Debug, Clone)]
pub struct PracticeSession {
    id: Uuid,
    state: PracticeState,
    level: Level,
    per_question: TimeDelta,
    weights: ScoringWeights,
    mcqs: Vec<Mcq>,
    index: usize,
    deadline: Option<DateTime<Utc>>,
    results: Vec<PracticeResult>,
}

impl PracticeSession {
    pub fn new(level: Level, per_question_seconds: u64) -> Self {
        Self::with_weights(level, per_question_seconds, ScoringWeights::default())
    }

    pub fn with_weights(level: Level, per_question_seconds: u64, weights: ScoringWeights) -> Self {
        Self {
            id: Uuid::new_v4(),
            state: PracticeState::Idle,
            level,
            per_question: i64::try_from(per_question_seconds)
                .ok()
                .and_then(TimeDelta::try_seconds)
                .unwrap_or(TimeDelta::MAX),
            weights,
            mcqs: Vec::new(),
            index: 0,
            deadline: None,
            results: Vec::new(),
        }
    }

    /// Starts (or restarts) a run over `mcqs`. An empty set finishes at once with a total of 0.
    pub fn start(&mut self, mcqs: Vec<Mcq>, now: DateTime<Utc>) -> PracticeState {
        self.id = Uuid::new_v4();
        self.mcqs = dedupe_mcqs(mcqs);
        self.index = 0;
        self.results.clear();
        self.deadline = Some(self.deadline_from(now));
        self.state = PracticeState::Running;

        log_practice_event!(start, session_id = self.id, question_count = self.mcqs.len());

        if self.mcqs.is_empty() {
            self.finish();
        }
        self.state
    }

    /// Generates the set (rule-based or AI-assisted per `request.use_ai`) and starts the run.
    pub async fn start_generated<R>(
        &mut self,
        request: &PracticeRequest,
        generator: &dyn TextGenerator,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> PracticeState
    where
        R: Rng + ?Sized,
    {
        self.level = request.level;
        let level = request.level.as_str();
        let mcqs = if request.use_ai {
            generate_ai_mcqs(generator, &request.role, &request.skills, request.question_count, level, rng).await
        } else {
            generate_mcqs(&request.role, &request.skills, request.question_count, level, rng)
        };
        self.start(mcqs, now)
    }

    /// Seconds until the current question expires, never negative.
    pub fn remaining_seconds(&self, now: DateTime<Utc>) -> u64 {
        match (self.state, self.deadline) {
            (PracticeState::Running, Some(deadline)) => deadline.signed_duration_since(now).num_seconds().max(0) as u64,
            _ => 0,
        }
    }

    /// Answers the current question. Ignored unless the session is running.
    pub fn submit(&mut self, selected: Option<usize>, now: DateTime<Utc>) -> Option<PracticeEvent> {
        if self.state != PracticeState::Running {
            return None;
        }
        let time_left = self.remaining_seconds(now);
        Some(self.resolve(selected, time_left, now))
    }

    /// Resolves the current question with `pending` once its time is up.
    pub fn tick(&mut self, pending: Option<usize>, now: DateTime<Utc>) -> Option<PracticeEvent> {
        if self.state != PracticeState::Running || self.remaining_seconds(now) > 0 {
            return None;
        }
        Some(self.resolve(pending, 0, now))
    }

    /// Abandons a running session. Results so far are kept and no total is produced.
    pub fn stop(&mut self) {
        if self.state == PracticeState::Running {
            self.state = PracticeState::Idle;
            self.deadline = None;
            log_practice_event!(stop, session_id = self.id, answered = self.results.len());
        }
    }

    fn resolve(&mut self, selected: Option<usize>, time_left: u64, now: DateTime<Utc>) -> PracticeEvent {
        let correct = self.mcqs[self.index].answer_index;
        let score_delta = self.weights.score(selected, correct, self.level.as_str(), time_left as i64);
        let result = PracticeResult {
            selected_index: selected,
            correct_index: correct,
            score_delta,
            time_left_seconds: time_left,
        };

        log_practice_event!(
            answer,
            session_id = self.id,
            index = self.index,
            score_delta = score_delta,
            expired = time_left == 0
        );

        self.results.push(result.clone());
        self.index += 1;
        self.deadline = Some(self.deadline_from(now));

        if self.index >= self.mcqs.len() {
            let total = self.finish();
            PracticeEvent::Finished { last: result, total }
        } else {
            PracticeEvent::Answered(result)
        }
    }

    /// Deadline one question-length after `now`, saturating at the latest representable instant.
    fn deadline_from(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.checked_add_signed(self.per_question).unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    fn finish(&mut self) -> i64 {
        let total = self.total_score();
        self.state = PracticeState::Finished { total };
        self.deadline = None;
        log_practice_event!(finish, session_id = self.id, total = total);
        total
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> PracticeState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == PracticeState::Running
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn per_question_seconds(&self) -> u64 {
        self.per_question.num_seconds().max(0) as u64
    }

    pub fn current_question(&self) -> Option<&Mcq> {
        if self.is_running() { self.mcqs.get(self.index) } else { None }
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn question_count(&self) -> usize {
        self.mcqs.len()
    }

    pub fn questions(&self) -> &[Mcq] {
        &self.mcqs
    }

    pub fn results(&self) -> &[PracticeResult] {
        &self.results
    }

    pub fn total_score(&self) -> i64 {
        self.results.iter().map(|r| r.score_delta).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Tier;

    fn mcq(question: &str, answer_index: usize) -> Mcq {
        Mcq::new(question, ["a", "b", "c", "d"].map(str::to_string), answer_index, "", Tier::Easy).unwrap()
    }

    fn at(seconds: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000 + seconds, 0).unwrap()
    }

    #[test]
    fn test_full_run_sums_results() {
        let mut session = PracticeSession::new(Level::Beginner, 60);
        session.start(vec![mcq("One?", 1), mcq("Two?", 2)], at(0));
        assert_eq!(session.remaining_seconds(at(37)), 23);

        let event = session.submit(Some(1), at(37)).unwrap();
        assert_eq!(event, PracticeEvent::Answered(PracticeResult {
            selected_index: Some(1),
            correct_index: 1,
            score_delta: 7,
            time_left_seconds: 23,
        }));

        let event = session.submit(Some(0), at(50)).unwrap();
        assert!(matches!(event, PracticeEvent::Finished { total: 6, .. }));
        assert_eq!(session.state(), PracticeState::Finished { total: 6 });
        assert!(session.submit(Some(0), at(51)).is_none());
    }

    #[test]
    fn test_tick_only_fires_after_deadline() {
        let mut session = PracticeSession::new(Level::Advanced, 30);
        session.start(vec![mcq("One?", 0), mcq("Two?", 0)], at(0));

        assert!(session.tick(None, at(29)).is_none());
        let event = session.tick(None, at(31)).unwrap();
        assert_eq!(event.result().score_delta, -1);
        assert_eq!(event.result().selected_index, None);
        assert_eq!(session.current_index(), 1);
        assert_eq!(session.remaining_seconds(at(31)), 30);

        // expiry with a pending choice scores it without bonus
        let event = session.tick(Some(0), at(70)).unwrap();
        assert!(matches!(event, PracticeEvent::Finished { total: 7, .. }));
    }

    #[test]
    fn test_stop_keeps_results_without_total() {
        let mut session = PracticeSession::new(Level::Intermediate, 60);
        session.start(vec![mcq("One?", 0), mcq("Two?", 0), mcq("one?", 3)], at(0));
        assert_eq!(session.question_count(), 2);

        session.submit(Some(0), at(10));
        session.stop();
        assert_eq!(session.state(), PracticeState::Idle);
        assert_eq!(session.results().len(), 1);
        assert!(session.current_question().is_none());
        assert!(session.submit(Some(0), at(11)).is_none());
        assert_eq!(session.remaining_seconds(at(11)), 0);
    }

    #[test]
    fn test_huge_time_limits_saturate() {
        let mut session = PracticeSession::new(Level::Beginner, u64::MAX);
        session.start(vec![mcq("One?", 0), mcq("Two?", 0)], at(0));
        assert!(session.remaining_seconds(at(0)) > 0);
        assert!(session.tick(None, at(1_000_000)).is_none());

        let mut session = PracticeSession::new(Level::Advanced, 10_000_000_000_000);
        assert_eq!(session.per_question_seconds(), 10_000_000_000_000);
        session.start(vec![mcq("One?", 0), mcq("Two?", 1)], at(0));
        let event = session.submit(Some(0), at(5)).unwrap();
        assert!(event.result().score_delta > 0);
        assert!(session.is_running());
        assert!(session.remaining_seconds(at(5)) > 0);
    }

    #[test]
    fn test_empty_set_finishes_immediately() {
        let mut session = PracticeSession::new(Level::Beginner, 60);
        assert_eq!(session.start(Vec::new(), at(0)), PracticeState::Finished { total: 0 });
    }
}
