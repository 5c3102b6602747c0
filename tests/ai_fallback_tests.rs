use async_trait::async_trait;
use interview_prep::ai_parser::parse_blocks;
use interview_prep::{LLMService, TextGenerator, generate_ai_mcqs, generate_mcqs};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Mutex;

/// Returns a fixed completion and remembers the prompts it saw.
struct StubGenerator {
    completion: String,
    prompts: Mutex<Vec<String>>,
}

impl StubGenerator {
    fn new(completion: &str) -> Self {
        Self {
            completion: completion.to_string(),
            prompts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate_text(&self, prompt: &str, _max_tokens: u32, _temperature: f32) -> String {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.completion.clone()
    }
}

const GOOD_BLOCK: &str = "Q: Which HTTP verb is idempotent?
A) POST
B) PUT
C) PATCH
D) CONNECT
Correct: B
Explanation: Repeating a PUT leaves the same state.";

const MISSING_CORRECT: &str = "Q: Which port does HTTPS use?
A) 80
B) 443
C) 21
D) 25
Explanation: TLS default.";

#[test]
fn test_parser_drops_malformed_block() {
    let text = format!("{}\n---\n{}", GOOD_BLOCK, MISSING_CORRECT);
    let mcqs = parse_blocks(&text);

    assert_eq!(mcqs.len(), 1);
    assert_eq!(mcqs[0].question, "Which HTTP verb is idempotent?");
    assert_eq!(mcqs[0].answer_index, 1);
}

#[tokio::test]
async fn test_empty_completion_matches_rule_based_set() {
    let stub = StubGenerator::new("");
    let skills = vec!["python".to_string()];

    let ai = generate_ai_mcqs(&stub, "Python Developer", &skills, 10, "Beginner", &mut StdRng::seed_from_u64(8)).await;
    let rule_based = generate_mcqs("Python Developer", &skills, 10, "Beginner", &mut StdRng::seed_from_u64(8));

    assert_eq!(ai, rule_based);
    assert!(ai.len() <= 10);
    assert!(ai.iter().all(|m| m.answer_index < 4));
    assert!(stub.prompts.lock().unwrap()[0].contains("Generate 10 MCQs for the topic: python."));
}

#[tokio::test]
async fn test_disabled_service_falls_back() {
    let service = LLMService::disabled();
    let mcqs = generate_ai_mcqs(&service, "Data Scientist", &[], 6, "Advanced", &mut StdRng::seed_from_u64(15)).await;
    assert!(!mcqs.is_empty());
    assert!(mcqs.len() <= 6);
}

#[tokio::test]
async fn test_garbage_output_never_panics() {
    let stub = StubGenerator::new("Sure! Here are some questions:\n---\nQ: ???\nCorrect: Z\n---\n\n");
    let mcqs = generate_ai_mcqs(&stub, "Web Developer", &[], 4, "Intermediate", &mut StdRng::seed_from_u64(3)).await;
    assert!(mcqs.len() <= 4);
    assert!(mcqs.iter().all(|m| m.question != "???"));
}

#[tokio::test]
async fn test_ai_questions_come_first_when_topped_up() {
    let stub = StubGenerator::new(GOOD_BLOCK);
    let skills = vec!["sql".to_string()];
    let mcqs = generate_ai_mcqs(&stub, "Web Developer", &skills, 3, "Beginner", &mut StdRng::seed_from_u64(5)).await;

    assert_eq!(mcqs[0].question, "Which HTTP verb is idempotent?");
    assert!(mcqs.len() <= 3);
    assert!(mcqs.len() >= 2);
}
