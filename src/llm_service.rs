use async_trait::async_trait;
use std::time::Instant;
use tracing::debug;

use crate::llm_providers::{GenerationParams, LLMProvider, LLMProviderFactory, LLMProviderType};
use crate::log_llm_operation;

/// Text-completion backend used by every AI-assisted feature.
///
/// Implementations return an empty string on any failure; callers treat
/// empty as "no AI content" and fall back to rule-based output.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate_text(&self, prompt: &str, max_tokens: u32, temperature: f32) -> String;

    /// Whether calls can ever return content.
    fn is_available(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone)]
pub struct LLMService {
    provider: LLMProvider,
}

impl LLMService {
    pub fn new_with_provider(
        api_key: String,
        base_url: Option<String>,
        provider_type: LLMProviderType,
        model: Option<String>,
    ) -> Self {
        let provider = LLMProviderFactory::create_provider(provider_type, api_key, base_url, model);
        Self { provider }
    }

    /// A service with no backend; every request yields empty text.
    pub fn disabled() -> Self {
        Self {
            provider: LLMProvider::Disabled,
        }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.provider_name()
    }

    pub fn model_name(&self) -> &str {
        self.provider.model_name()
    }
}

#[async_trait]
impl TextGenerator for LLMService {
    async fn generate_text(&self, prompt: &str, max_tokens: u32, temperature: f32) -> String {
        if !self.provider.is_enabled() {
            debug!("LLM provider disabled, returning empty completion");
            return String::new();
        }

        let started = Instant::now();
        let params = GenerationParams::new(max_tokens, temperature);
        match self.provider.make_request(prompt, params).await {
            Ok(text) => {
                log_llm_operation!(
                    success,
                    "generate_text",
                    provider = self.provider_name(),
                    duration_ms = started.elapsed().as_millis() as u64,
                    response_length = text.len()
                );
                text
            }
            Err(e) => {
                log_llm_operation!(error, "generate_text", provider = self.provider_name(), error = e);
                String::new()
            }
        }
    }

    fn is_available(&self) -> bool {
        self.provider.is_enabled()
    }
}
