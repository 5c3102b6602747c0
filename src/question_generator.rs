use rand::Rng;
use rand::seq::SliceRandom;

use crate::ai_parser::parse_bulleted;
use crate::dedup::dedupe_texts;
use crate::llm_service::TextGenerator;
use crate::models::Level;
use crate::prompts::{self, ANSWER_PARAMS, HR_PARAMS, TECH_PARAMS, TECH_TEMPLATES};
use crate::question_bank::role_skills;
use crate::{log_generation, log_llm_operation};

const HR_BASE_COUNT: usize = 7;

fn hr_base(role: &str) -> [String; HR_BASE_COUNT] {
    [
        format!("Tell me about a challenge you faced while working as a {role} and how you resolved it."),
        "Describe a time you had to handle conflicting priorities.".to_string(),
        "How do you approach learning a new technology under a deadline?".to_string(),
        "Give an example of working with a difficult stakeholder.".to_string(),
        "What motivates you during long-term projects?".to_string(),
        "Describe a failure and what you learned.".to_string(),
        "How do you handle feedback professionally?".to_string(),
    ]
}

/// Behavioural questions from fixed templates, shuffled and suffixed for the level.
pub fn simple_hr_questions<R>(role: &str, level: Level, n: usize, rng: &mut R) -> Vec<String>
where
    R: Rng + ?Sized,
{
    let suffix = prompts::hr_suffix(level);
    let mut questions: Vec<String> = hr_base(role).into_iter().map(|q| q + suffix).collect();
    questions.shuffle(rng);
    questions.truncate(n);
    dedupe_texts(questions)
}

/// Technical questions built from templates over the given skills, the
/// role's skills, or "problem solving" as a last resort.
pub fn simple_tech_questions<R>(role: &str, level: Level, skills: &[String], n: usize, rng: &mut R) -> Vec<String>
where
    R: Rng + ?Sized,
{
    let selected: Vec<&str> = if !skills.is_empty() {
        skills.iter().map(String::as_str).collect()
    } else if !role_skills(role).is_empty() {
        role_skills(role).to_vec()
    } else {
        vec!["problem solving"]
    };

    let mut pool: Vec<String> = selected
        .iter()
        .flat_map(|skill| TECH_TEMPLATES.iter().map(move |t| t.replace("{skill}", skill)))
        .collect();
    pool.shuffle(rng);

    let tag = prompts::tech_tag(level);
    dedupe_texts(pool.into_iter().take(n).map(|q| format!("{q} {tag}")))
}

/// Model-written HR questions, falling back to the templates when the model returns none.
pub async fn ai_hr_questions<R>(
    generator: &dyn TextGenerator,
    role: &str,
    level: Level,
    n: usize,
    rng: &mut R,
) -> Vec<String>
where
    R: Rng + ?Sized,
{
    let completion = generator
        .generate_text(&prompts::hr_prompt(n, role, level), HR_PARAMS.max_tokens, HR_PARAMS.temperature)
        .await;
    let mut questions = parse_bulleted(&completion);
    questions.truncate(n);

    if questions.is_empty() {
        log_generation!(fallback, "ai_hr_questions", "model returned no questions");
        questions = simple_hr_questions(role, level, n, rng);
    }

    let questions = dedupe_texts(questions);
    log_generation!("ai_hr_questions", role = role, requested = n, produced = questions.len());
    questions
}

/// Model-written technical questions, falling back to the templates when the model returns none.
pub async fn ai_tech_questions<R>(
    generator: &dyn TextGenerator,
    role: &str,
    level: Level,
    n: usize,
    skills: &[String],
    rng: &mut R,
) -> Vec<String>
where
    R: Rng + ?Sized,
{
    let prompt = prompts::tech_prompt(n, role, level, skills);
    let completion = generator
        .generate_text(&prompt, TECH_PARAMS.max_tokens, TECH_PARAMS.temperature)
        .await;
    let mut questions = parse_bulleted(&completion);
    questions.truncate(n);

    if questions.is_empty() {
        log_generation!(fallback, "ai_tech_questions", "model returned no questions");
        questions = simple_tech_questions(role, level, skills, n, rng);
    }

    let questions = dedupe_texts(questions);
    log_generation!("ai_tech_questions", role = role, requested = n, produced = questions.len());
    questions
}

/// A model answer for `question`, or a generic answer outline.
pub async fn generate_answer(generator: &dyn TextGenerator, question: &str, role: &str, level: Level) -> String {
    let answer = generator
        .generate_text(
            &prompts::answer_prompt(question, role, level),
            ANSWER_PARAMS.max_tokens,
            ANSWER_PARAMS.temperature,
        )
        .await;
    let answer = answer.trim();
    if !answer.is_empty() {
        return answer.to_string();
    }

    log_llm_operation!(empty, "generate_answer");
    format!(
        "Answer outline: 1) Context 2) Approach 3) Key decisions 4) Result (metrics) 5) Learnings. \
         Tailor to {role}, keep it {} depth, quantify impact.",
        level.as_str().to_lowercase()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_service::LLMService;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_simple_hr_questions() {
        let mut rng = StdRng::seed_from_u64(11);
        let questions = simple_hr_questions("Web Developer", Level::Advanced, 5, &mut rng);
        assert_eq!(questions.len(), 5);
        assert!(questions.iter().all(|q| q.ends_with("(quantify impact, discuss strategy and risks)")));

        let all = simple_hr_questions("Web Developer", Level::Beginner, 20, &mut rng);
        assert_eq!(all.len(), HR_BASE_COUNT);
        assert!(all.iter().any(|q| q.contains("working as a Web Developer")));
    }

    #[test]
    fn test_simple_tech_questions_skill_resolution() {
        let mut rng = StdRng::seed_from_u64(12);
        let skills = vec!["rust".to_string()];
        let questions = simple_tech_questions("Any", Level::Intermediate, &skills, 10, &mut rng);
        assert_eq!(questions.len(), TECH_TEMPLATES.len());
        assert!(questions.iter().all(|q| q.contains("rust") && q.ends_with("(Depth)")));

        let fallback = simple_tech_questions("Astronaut", Level::Beginner, &[], 2, &mut rng);
        assert_eq!(fallback.len(), 2);
        assert!(fallback.iter().all(|q| q.contains("problem solving")));

        let role_based = simple_tech_questions("DevOps Engineer", Level::Advanced, &[], 30, &mut rng);
        assert_eq!(role_based.len(), 30);
    }

    #[tokio::test]
    async fn test_ai_questions_fall_back_when_model_is_silent() {
        let service = LLMService::disabled();
        let mut rng = StdRng::seed_from_u64(13);
        let hr = ai_hr_questions(&service, "ML Engineer", Level::Beginner, 3, &mut rng).await;
        assert_eq!(hr.len(), 3);

        let tech = ai_tech_questions(&service, "ML Engineer", Level::Beginner, 4, &[], &mut rng).await;
        assert_eq!(tech.len(), 4);
        assert!(tech.iter().all(|q| q.ends_with("(Basics)")));
    }

    #[tokio::test]
    async fn test_answer_outline_fallback() {
        let answer = generate_answer(&LLMService::disabled(), "Why Rust?", "Python Developer", Level::Intermediate).await;
        assert!(answer.starts_with("Answer outline:"));
        assert!(answer.contains("intermediate depth"));
    }
}
