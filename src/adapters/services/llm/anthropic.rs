//! Anthropic LLM service adapter
//!
//! Implements the LlmServicePort for Anthropic's messages API. The system
//! message travels in the dedicated `system` field rather than the message
//! list, and max_tokens is mandatory.

use crate::error::{AppError, Result};
use crate::ports::llm::{LlmConfig, LlmServicePort};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const ANTHROPIC_API_BASE: &str = "https://api.anthropic.com/v1";
const ANTHROPIC_API_VERSION: &str = "2023-06-01";

/// Anthropic service implementation
pub struct AnthropicService {
    client: Client,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    system: String,
    messages: Vec<Message>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    text: String,
}

impl AnthropicService {
    /// Create a new Anthropic service with the given API key
    pub fn new(api_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, api_key }
    }
}

#[async_trait]
impl LlmServicePort for AnthropicService {
    async fn complete(&self, system: &str, prompt: &str, config: &LlmConfig) -> Result<String> {
        // Anthropic requires max_tokens to be specified
        let max_tokens = config.max_tokens.unwrap_or(4096);

        let request_body = MessagesRequest {
            model: config.model.clone(),
            system: system.to_string(),
            messages: vec![Message {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            max_tokens,
            temperature: config.temperature,
        };

        log::info!("Calling Anthropic messages API with model: {}", config.model);

        let response = self
            .client
            .post(format!("{}/messages", ANTHROPIC_API_BASE))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_API_VERSION)
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| AppError::Llm(format!("Messages request failed: {}", e)))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::Llm(format!(
                "Messages request failed: {}",
                error_text
            )));
        }

        let messages_response: MessagesResponse = response
            .json()
            .await
            .map_err(|e| AppError::Llm(format!("Failed to parse messages response: {}", e)))?;

        if messages_response.content.is_empty() {
            return Err(AppError::Llm("No content blocks returned".to_string()));
        }

        let content = messages_response.content[0].text.clone();
        log::info!(
            "Anthropic completion successful, generated {} characters",
            content.len()
        );

        Ok(content)
    }

    fn provider_name(&self) -> &str {
        "anthropic"
    }

    fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anthropic_service_creation() {
        let service = AnthropicService::new("test_api_key".to_string());
        assert_eq!(service.provider_name(), "anthropic");
        assert!(service.is_configured());
    }

    #[test]
    fn test_anthropic_service_not_configured() {
        let service = AnthropicService::new("".to_string());
        assert!(!service.is_configured());
    }
}
