use interview_prep::config::{Config, mask_sensitive_data, parse_skills};
use interview_prep::{LLMProviderType, Level};
use std::collections::HashMap;
use std::path::PathBuf;

fn config_from(pairs: &[(&str, &str)]) -> anyhow::Result<Config> {
    let vars: HashMap<&str, &str> = pairs.iter().copied().collect();
    Config::from_lookup(&|key: &str| vars.get(key).map(|value| value.to_string()))
}

#[test]
fn test_full_environment() {
    let config = config_from(&[
        ("LLM_PROVIDER", "gemini"),
        ("LLM_API_KEY", "AIza-1234567890"),
        ("LLM_MODEL", "gemini-1.5-flash"),
        ("ROLE", "DevOps Engineer"),
        ("LEVEL", "Intermediate"),
        ("SKILLS", "docker, Kubernetes"),
        ("USE_AI", "true"),
        ("PRACTICE_TOTAL_MCQS", "45"),
        ("PRACTICE_SECONDS_PER_QUESTION", "75"),
        ("QUIZ_MCQ_COUNT", "20"),
        ("REPORT_PATH", "out/report.json"),
        ("LOG_FILE_ENABLED", "false"),
    ])
    .unwrap();

    assert_eq!(config.llm.provider, LLMProviderType::Gemini);
    assert_eq!(config.llm.model.as_deref(), Some("gemini-1.5-flash"));
    assert_eq!(config.profile.level, Level::Intermediate);
    assert_eq!(config.profile.skills, vec!["docker", "kubernetes"]);
    assert!(config.profile.use_ai);
    assert_eq!(config.practice.total_mcqs, 45);
    assert_eq!(config.practice.seconds_for(Level::Beginner), 75);
    assert_eq!(config.practice.quiz_mcqs, 20);
    assert_eq!(config.report_path, PathBuf::from("out/report.json"));
    assert!(!config.logging.file_enabled);
    assert!(config.logging.console_enabled);
    assert!(config.validate().is_ok());
}

#[test]
fn test_level_default_time_limits() {
    let config = config_from(&[]).unwrap();
    assert_eq!(config.practice.seconds_per_question, None);
    assert_eq!(config.practice.seconds_for(Level::Beginner), 60);
    assert_eq!(config.practice.seconds_for(Level::Intermediate), 90);
    assert_eq!(config.practice.seconds_for(Level::Advanced), 120);
}

#[test]
fn test_bad_values_are_reported() {
    let err = config_from(&[("PRACTICE_SECONDS_PER_QUESTION", "soon")]).unwrap_err();
    assert!(err.to_string().contains("PRACTICE_SECONDS_PER_QUESTION"));

    let err = config_from(&[("LEVEL", "wizard")]).unwrap_err();
    assert!(err.to_string().contains("LEVEL"));
}

#[test]
fn test_unknown_role_is_a_warning_not_an_error() {
    let config = config_from(&[("ROLE", "Astronaut"), ("LLM_PROVIDER", "none")]).unwrap();
    assert!(config.validate().is_ok());
}

#[test]
fn test_skill_list_and_masking_helpers() {
    assert_eq!(parse_skills(" ,Python,, python ,CI/CD"), vec!["python", "ci/cd"]);
    assert!(parse_skills("").is_empty());
    assert_eq!(mask_sensitive_data("AIza-1234567890"), "AIza***7890");
    assert_eq!(mask_sensitive_data(""), "");
}
