pub mod ai_mcq_generator;
pub mod ai_parser;
pub mod ats;
pub mod config;
pub mod dedup;
pub mod errors;
pub mod jd_analyzer;
pub mod llm_providers;
pub mod llm_service;
pub mod logging;
pub mod mcq_generator;
pub mod models;
pub mod practice;
pub mod prompts;
pub mod question_bank;
pub mod question_generator;
pub mod quiz;
pub mod report;
pub mod sampler;
pub mod scoring;
pub mod voice_interview;

pub use ai_mcq_generator::generate_ai_mcqs;
pub use config::Config;
pub use errors::*;
pub use llm_providers::{LLMProvider, LLMProviderFactory, LLMProviderType};
pub use llm_service::{LLMService, TextGenerator};
pub use mcq_generator::generate_mcqs;
pub use models::*;
pub use practice::{PracticeEvent, PracticeRequest, PracticeSession, PracticeState};
pub use question_bank::QuestionBank;
pub use quiz::AdhocQuiz;
pub use report::{InterviewReport, ReportFormat};
pub use scoring::ScoringWeights;
