use anyhow::{Result, anyhow};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::errors::{PrepError, PrepResult};
use crate::llm_providers::LLMProviderType;
use crate::llm_service::LLMService;
use crate::models::Level;
use crate::question_bank::{DifficultySettings, role_skills};

// Import logging macros
use crate::{log_system_event, log_validation};

pub const PRACTICE_MCQ_RANGE: (usize, usize) = (30, 60);
pub const PRACTICE_SECONDS_RANGE: (u64, u64) = (20, 180);
pub const QUIZ_MCQ_RANGE: (usize, usize) = (5, 60);

/// Complete application configuration loaded from environment variables
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub llm: LLMConfig,
    pub profile: ProfileConfig,
    pub practice: PracticeConfig,
    pub logging: LoggingConfig,
    pub report_path: PathBuf,
}

/// Large Language Model service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LLMConfig {
    pub api_key: String,
    pub base_url: Option<String>,
    pub provider: LLMProviderType,
    pub model: Option<String>,
}

/// Who the candidate is preparing as
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileConfig {
    pub role: String,
    pub level: Level,
    pub skills: Vec<String>,
    pub use_ai: bool,
}

/// Question counts and timing for quizzes and practice runs
#[derive(Debug, Clone, Deserialize)]
pub struct PracticeConfig {
    pub total_mcqs: usize,
    /// Overrides the level's default time limit when set.
    pub seconds_per_question: Option<u64>,
    pub quiz_mcqs: usize,
}

/// Logging system configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_enabled: bool,
    pub console_enabled: bool,
    pub log_directory: String,
}

/// Variable lookup; `env::var` in production, a map in tests.
pub type Lookup<'a> = &'a dyn Fn(&str) -> Option<String>;

fn process_env(key: &str) -> Option<String> {
    env::var(key).ok()
}

impl Config {
    /// Load configuration from environment variables with sensible defaults
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(&process_env)
    }

    /// Same as [`Config::from_env`] but reads variables through `get`.
    pub fn from_lookup(get: Lookup<'_>) -> Result<Self> {
        log_system_event!(config, "Loading application configuration from environment variables");

        let config = Config {
            llm: LLMConfig::from_lookup(get),
            profile: ProfileConfig::from_lookup(get)?,
            practice: PracticeConfig::from_lookup(get)?,
            logging: LoggingConfig::from_lookup(get),
            report_path: get("REPORT_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("interview_report.md")),
        };

        log_system_event!(config, "Configuration loaded successfully");
        config.log_configuration_summary();

        Ok(config)
    }

    /// Log a summary of loaded configuration (without sensitive data)
    fn log_configuration_summary(&self) {
        info!(
            llm_provider = ?self.llm.provider,
            llm_model = ?self.llm.model,
            llm_api_key_masked = %mask_sensitive_data(&self.llm.api_key),
            role = %self.profile.role,
            level = %self.profile.level,
            use_ai = self.profile.use_ai,
            report_path = %self.report_path.display(),
            log_level = %self.logging.level,
            "Configuration summary"
        );
    }

    /// Validate configuration values
    pub fn validate(&self) -> PrepResult<()> {
        if self.profile.role.trim().is_empty() {
            return Err(PrepError::Config("ROLE must not be empty".to_string()));
        }
        if role_skills(&self.profile.role).is_empty() {
            warn!(
                "Role '{}' has no configured skills - generation will use the default topic",
                self.profile.role
            );
        }

        if self.report_path.as_os_str().is_empty() {
            return Err(PrepError::Config("REPORT_PATH must not be empty".to_string()));
        }

        if self.profile.use_ai && self.llm.provider == LLMProviderType::Disabled {
            warn!("USE_AI is set but LLM_PROVIDER is disabled - AI features will fall back to rule-based output");
        }

        // Validate LLM API key presence
        if self.llm.provider != LLMProviderType::Disabled
            && (self.llm.api_key.is_empty() || self.llm.api_key == "your-api-key")
        {
            warn!("LLM API key appears to be placeholder or empty - LLM features may not work");
        }

        // Validate log level
        if !["trace", "debug", "info", "warn", "error"].contains(&self.logging.level.to_lowercase().as_str())
            && !self.logging.level.contains('=')
        {
            warn!("Invalid log level '{}', using 'info' as fallback", self.logging.level);
        }

        log_validation!(success, "configuration", "Configuration validation completed successfully");
        Ok(())
    }

    /// Builds the completion backend described by the LLM section.
    pub fn llm_service(&self) -> LLMService {
        LLMService::new_with_provider(
            self.llm.api_key.clone(),
            self.llm.base_url.clone(),
            self.llm.provider,
            self.llm.model.clone(),
        )
    }
}

impl LLMConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(&process_env)
    }

    fn from_lookup(get: Lookup<'_>) -> Self {
        let api_key = get("LLM_API_KEY").unwrap_or_else(|| "your-api-key".to_string());
        let base_url = get("LLM_BASE_URL");
        let provider = LLMProviderType::parse(&get("LLM_PROVIDER").unwrap_or_else(|| "openai".to_string()));
        let model = get("LLM_MODEL");

        LLMConfig {
            api_key,
            base_url,
            provider,
            model,
        }
    }
}

impl ProfileConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(&process_env)
    }

    fn from_lookup(get: Lookup<'_>) -> Result<Self> {
        let role = get("ROLE").unwrap_or_else(|| "Python Developer".to_string());

        let level = match get("LEVEL") {
            Some(value) => Level::parse(&value).ok_or_else(|| {
                anyhow!("Invalid LEVEL value: '{}'. Must be Beginner, Intermediate or Advanced", value)
            })?,
            None => Level::default(),
        };

        let skills = get("SKILLS").map(|raw| parse_skills(&raw)).unwrap_or_default();
        let use_ai = parse_flag(get("USE_AI"), false);

        Ok(ProfileConfig {
            role: role.trim().to_string(),
            level,
            skills,
            use_ai,
        })
    }
}

impl PracticeConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(&process_env)
    }

    fn from_lookup(get: Lookup<'_>) -> Result<Self> {
        let total_mcqs = parse_number(get, "PRACTICE_TOTAL_MCQS", 40usize)?
            .clamp(PRACTICE_MCQ_RANGE.0, PRACTICE_MCQ_RANGE.1);

        let seconds_per_question = match get("PRACTICE_SECONDS_PER_QUESTION") {
            Some(_) => Some(
                parse_number(get, "PRACTICE_SECONDS_PER_QUESTION", 0u64)?
                    .clamp(PRACTICE_SECONDS_RANGE.0, PRACTICE_SECONDS_RANGE.1),
            ),
            None => None,
        };

        let quiz_mcqs = parse_number(get, "QUIZ_MCQ_COUNT", 12usize)?.clamp(QUIZ_MCQ_RANGE.0, QUIZ_MCQ_RANGE.1);

        Ok(PracticeConfig {
            total_mcqs,
            seconds_per_question,
            quiz_mcqs,
        })
    }

    /// Per-question time limit for `level`, honouring an explicit override.
    pub fn seconds_for(&self, level: Level) -> u64 {
        self.seconds_per_question
            .unwrap_or_else(|| DifficultySettings::for_level(level).time_limit_seconds)
    }
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(&process_env)
    }

    fn from_lookup(get: Lookup<'_>) -> Self {
        let level = get("RUST_LOG").unwrap_or_else(|| "info,interview_prep=debug".to_string());
        let file_enabled = parse_flag(get("LOG_FILE_ENABLED"), true);
        let console_enabled = parse_flag(get("LOG_CONSOLE_ENABLED"), true);
        let log_directory = get("LOG_DIRECTORY").unwrap_or_else(|| "logs".to_string());

        LoggingConfig {
            level,
            file_enabled,
            console_enabled,
            log_directory,
        }
    }
}

fn parse_number<T>(get: Lookup<'_>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| anyhow!("Invalid {} value: '{}'. Must be a non-negative number", key, raw)),
        None => Ok(default),
    }
}

fn parse_flag(value: Option<String>, default: bool) -> bool {
    match value.map(|v| v.trim().to_lowercase()) {
        Some(v) if matches!(v.as_str(), "1" | "true" | "yes" | "on") => true,
        Some(v) if matches!(v.as_str(), "0" | "false" | "no" | "off") => false,
        _ => default,
    }
}

/// Comma-separated skill list, lower-cased, blanks and repeats removed.
pub fn parse_skills(raw: &str) -> Vec<String> {
    let mut skills: Vec<String> = Vec::new();
    for skill in raw.split(',').map(|s| s.trim().to_lowercase()) {
        if !skill.is_empty() && !skills.contains(&skill) {
            skills.push(skill);
        }
    }
    skills
}

/// Mask sensitive data in configuration for safe logging
pub fn mask_sensitive_data(data: &str) -> String {
    let chars: Vec<char> = data.chars().collect();
    if chars.len() <= 8 {
        "*".repeat(chars.len())
    } else {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}***{}", head, tail)
    }
}
