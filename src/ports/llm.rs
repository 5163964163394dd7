/// LLM service port trait
///
/// Defines the interface for language-model completion services.
/// Implementations: OpenAI, Anthropic.
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Configuration for LLM requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Model name (e.g., "gpt-4o-mini", "claude-3-5-sonnet")
    pub model: String,

    /// Temperature for generation (0.0 to 1.0)
    pub temperature: Option<f32>,

    /// Maximum tokens in response
    pub max_tokens: Option<u32>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            temperature: Some(0.1), // Low temperature for consistent extraction
            max_tokens: Some(4000),
        }
    }
}

impl LlmConfig {
    pub fn for_model(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Self::default()
        }
    }
}

/// Port trait for LLM completion services
#[async_trait]
pub trait LlmServicePort: Send + Sync {
    /// Submit a prompt and return the raw completion text
    async fn complete(&self, system: &str, prompt: &str, config: &LlmConfig) -> Result<String>;

    /// Get the provider name
    fn provider_name(&self) -> &str;

    /// Check if the service is configured (has API key)
    fn is_configured(&self) -> bool;
}
