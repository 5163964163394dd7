//! LLM service adapters
//!
//! Implementations of the LlmServicePort trait:
//! - OpenAI (chat completions, JSON response format)
//! - Anthropic (messages API)

use crate::error::{AppError, Result};
use crate::ports::llm::LlmServicePort;

pub mod anthropic;
pub mod openai;

pub use anthropic::AnthropicService;
pub use openai::OpenAIService;

/// Create an LLM service for the configured provider name
pub fn create_service(provider: &str, api_key: String) -> Result<Box<dyn LlmServicePort>> {
    match provider {
        "openai" => Ok(Box::new(OpenAIService::new(api_key))),
        "anthropic" => Ok(Box::new(AnthropicService::new(api_key))),
        other => Err(AppError::Config(format!(
            "Unknown LLM provider: {} (expected \"openai\" or \"anthropic\")",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_creates_known_providers() {
        let openai = create_service("openai", "k".to_string()).unwrap();
        assert_eq!(openai.provider_name(), "openai");
        let anthropic = create_service("anthropic", "k".to_string()).unwrap();
        assert_eq!(anthropic.provider_name(), "anthropic");
    }

    #[test]
    fn test_factory_rejects_unknown_provider() {
        assert!(create_service("cohere", "k".to_string()).is_err());
    }
}
