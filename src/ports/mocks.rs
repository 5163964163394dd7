//! Mock implementations for testing

use crate::domain::models::{EntityKind, ReferenceEntity};
use crate::error::{AppError, Result};
use crate::ports::llm::{LlmConfig, LlmServicePort};
use crate::ports::pages::{PageBody, PageStorePort};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Mock LLM returning a canned response (or a canned failure)
pub struct MockLlm {
    response: std::result::Result<String, String>,
    pub prompts: Arc<Mutex<Vec<String>>>,
}

impl MockLlm {
    pub fn returning(response: impl Into<String>) -> Self {
        Self {
            response: Ok(response.into()),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            response: Err(message.into()),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl LlmServicePort for MockLlm {
    async fn complete(&self, _system: &str, prompt: &str, _config: &LlmConfig) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.response {
            Ok(text) => Ok(text.clone()),
            Err(message) => Err(AppError::Llm(message.clone())),
        }
    }

    fn provider_name(&self) -> &str {
        "mock"
    }

    fn is_configured(&self) -> bool {
        true
    }
}

/// Mock page store with in-memory state and recorded writes
#[derive(Default)]
pub struct MockPageStore {
    pub body: String,
    pub people: Vec<ReferenceEntity>,
    pub projects: Vec<ReferenceEntity>,
    pub fail_entity_queries: bool,
    pub writes: Arc<Mutex<Vec<(String, String, String)>>>,
}

impl MockPageStore {
    pub fn with_body(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            ..Self::default()
        }
    }

    pub fn last_written_body(&self) -> Option<String> {
        self.writes.lock().unwrap().last().map(|w| w.2.clone())
    }
}

#[async_trait]
impl PageStorePort for MockPageStore {
    async fn fetch_page_body(&self, _page_id: &str) -> Result<PageBody> {
        Ok(PageBody {
            property: "Text".to_string(),
            content: self.body.clone(),
        })
    }

    async fn list_entities(
        &self,
        _database_id: &str,
        kind: EntityKind,
    ) -> Result<Vec<ReferenceEntity>> {
        if self.fail_entity_queries {
            return Err(AppError::Notion("database unavailable".to_string()));
        }
        Ok(match kind {
            EntityKind::Person => self.people.clone(),
            EntityKind::Project => self.projects.clone(),
        })
    }

    async fn update_page_body(&self, page_id: &str, property: &str, body: &str) -> Result<()> {
        crate::domain::compose::ensure_within_limit(body, self.body_limit())?;
        self.writes.lock().unwrap().push((
            page_id.to_string(),
            property.to_string(),
            body.to_string(),
        ));
        Ok(())
    }

    fn body_limit(&self) -> usize {
        2000
    }
}
