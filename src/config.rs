//! Environment-driven configuration
//!
//! All recognized variables are read and validated in one pass at startup;
//! missing required values are reported together so the operator fixes the
//! environment once, not one variable per run. The lookup function is
//! injectable to keep validation testable without touching process state.

use crate::error::{AppError, Result};
use std::path::PathBuf;

/// Runtime settings assembled from the environment
#[derive(Debug, Clone)]
pub struct Settings {
    /// Notion integration token
    pub notion_token: String,
    /// Default (meetings) database id
    pub meetings_db_id: String,
    /// People reference database, enables attendee linking
    pub people_db_id: Option<String>,
    /// Projects reference database, enables project linking
    pub projects_db_id: Option<String>,
    /// LLM provider name ("openai" or "anthropic")
    pub llm_provider: String,
    /// API key for the selected provider
    pub llm_api_key: String,
    /// Model passed to the provider
    pub llm_model: String,
    /// Directory searched for transcript files
    pub transcript_dir: PathBuf,
}

impl Settings {
    /// Read settings from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary lookup function. Blank values are
    /// treated the same as unset ones.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let llm_provider = get("LLM_PROVIDER").unwrap_or_else(|| "openai".to_string());
        let (api_key_var, default_model) = match llm_provider.as_str() {
            "openai" => ("OPENAI_API_KEY", "gpt-4o-mini"),
            "anthropic" => ("ANTHROPIC_API_KEY", "claude-3-5-haiku-latest"),
            other => {
                return Err(AppError::Config(format!(
                    "Unknown LLM provider: {} (expected \"openai\" or \"anthropic\")",
                    other
                )))
            }
        };

        let mut missing = Vec::new();
        let mut require = |key: &'static str| {
            get(key).unwrap_or_else(|| {
                missing.push(key);
                String::new()
            })
        };

        let notion_token = require("NOTION_TOKEN");
        let meetings_db_id = require("DATABASE_ID");
        let llm_api_key = require(api_key_var);

        if !missing.is_empty() {
            return Err(AppError::Config(format!(
                "Missing required environment variables: {}",
                missing.join(", ")
            )));
        }

        Ok(Self {
            notion_token,
            meetings_db_id,
            people_db_id: get("PEOPLE_DATABASE_ID"),
            projects_db_id: get("PROJECTS_DATABASE_ID"),
            llm_provider,
            llm_api_key,
            llm_model: get("LLM_MODEL").unwrap_or_else(|| default_model.to_string()),
            transcript_dir: PathBuf::from(
                get("TRANSCRIPT_DIR").unwrap_or_else(|| "./transcript".to_string()),
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn from_map(map: &HashMap<String, String>) -> Result<Settings> {
        Settings::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_minimal_valid_environment() {
        let map = env(&[
            ("NOTION_TOKEN", "secret_x"),
            ("DATABASE_ID", "db1"),
            ("OPENAI_API_KEY", "sk-x"),
        ]);
        let settings = from_map(&map).unwrap();
        assert_eq!(settings.llm_provider, "openai");
        assert_eq!(settings.llm_model, "gpt-4o-mini");
        assert_eq!(settings.transcript_dir, PathBuf::from("./transcript"));
        assert_eq!(settings.people_db_id, None);
    }

    #[test]
    fn test_all_missing_variables_reported_together() {
        let err = from_map(&HashMap::new()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("NOTION_TOKEN"));
        assert!(message.contains("DATABASE_ID"));
        assert!(message.contains("OPENAI_API_KEY"));
    }

    #[test]
    fn test_blank_values_count_as_missing() {
        let map = env(&[
            ("NOTION_TOKEN", "  "),
            ("DATABASE_ID", "db1"),
            ("OPENAI_API_KEY", "sk-x"),
        ]);
        let err = from_map(&map).unwrap_err();
        assert!(err.to_string().contains("NOTION_TOKEN"));
    }

    #[test]
    fn test_anthropic_provider_requires_its_own_key() {
        let map = env(&[
            ("LLM_PROVIDER", "anthropic"),
            ("NOTION_TOKEN", "secret_x"),
            ("DATABASE_ID", "db1"),
            ("OPENAI_API_KEY", "sk-x"),
        ]);
        let err = from_map(&map).unwrap_err();
        assert!(err.to_string().contains("ANTHROPIC_API_KEY"));
    }

    #[test]
    fn test_unknown_provider_rejected_at_startup() {
        let map = env(&[("LLM_PROVIDER", "cohere")]);
        assert!(matches!(from_map(&map), Err(AppError::Config(_))));
    }

    #[test]
    fn test_optional_databases_and_overrides() {
        let map = env(&[
            ("NOTION_TOKEN", "secret_x"),
            ("DATABASE_ID", "db1"),
            ("OPENAI_API_KEY", "sk-x"),
            ("PEOPLE_DATABASE_ID", "people1"),
            ("PROJECTS_DATABASE_ID", "projects1"),
            ("LLM_MODEL", "gpt-4o"),
            ("TRANSCRIPT_DIR", "/data/transcripts"),
        ]);
        let settings = from_map(&map).unwrap();
        assert_eq!(settings.people_db_id.as_deref(), Some("people1"));
        assert_eq!(settings.projects_db_id.as_deref(), Some("projects1"));
        assert_eq!(settings.llm_model, "gpt-4o");
        assert_eq!(settings.transcript_dir, PathBuf::from("/data/transcripts"));
    }
}
