//! Notion REST client
//!
//! Implements the PageStorePort against the Notion API: page fetch with
//! rich-text property discovery, cursor-paginated database queries for the
//! people/projects reference databases, and the single append-style page
//! update. Notion property payloads are schema-dependent, so responses are
//! navigated as JSON values rather than fixed wire structs.

use crate::domain::compose::ensure_within_limit;
use crate::domain::models::{EntityKind, ReferenceEntity};
use crate::error::{AppError, Result};
use crate::ports::pages::{PageBody, PageStorePort};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

const NOTION_API_BASE: &str = "https://api.notion.com/v1";
const NOTION_API_VERSION: &str = "2022-06-28";

/// Notion caps one rich_text text-content object at this many characters
const RICH_TEXT_CONTENT_LIMIT: usize = 2000;

/// Property names databases commonly use for their title column, probed in
/// order when extracting an entity's canonical name.
const TITLE_PROPERTY_CANDIDATES: [&str; 4] = ["Name", "Title", "Project Name", "Project"];

/// Notion API client
pub struct NotionClient {
    client: Client,
    token: String,
}

impl NotionClient {
    /// Create a new client with the given integration token
    pub fn new(token: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, token }
    }

    async fn get_json(&self, url: &str) -> Result<Value> {
        let response = self
            .client
            .get(url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Notion-Version", NOTION_API_VERSION)
            .send()
            .await
            .map_err(|e| AppError::Notion(format!("Request failed: {}", e)))?;

        Self::json_or_error(response).await
    }

    async fn send_json(&self, request: reqwest::RequestBuilder, body: &Value) -> Result<Value> {
        let response = request
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Notion-Version", NOTION_API_VERSION)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::Notion(format!("Request failed: {}", e)))?;

        Self::json_or_error(response).await
    }

    async fn json_or_error(response: reqwest::Response) -> Result<Value> {
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::Notion(format!("{}: {}", status, error_text)));
        }
        response
            .json()
            .await
            .map_err(|e| AppError::Notion(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl PageStorePort for NotionClient {
    async fn fetch_page_body(&self, page_id: &str) -> Result<PageBody> {
        let page = self
            .get_json(&format!("{}/pages/{}", NOTION_API_BASE, page_id))
            .await?;

        find_rich_text_property(&page).ok_or_else(|| {
            AppError::Notion(format!(
                "Page {} has no rich text property to append to",
                page_id
            ))
        })
    }

    async fn list_entities(
        &self,
        database_id: &str,
        kind: EntityKind,
    ) -> Result<Vec<ReferenceEntity>> {
        let url = format!("{}/databases/{}/query", NOTION_API_BASE, database_id);
        let mut entities = Vec::new();
        let mut start_cursor: Option<String> = None;

        loop {
            let body = match &start_cursor {
                Some(cursor) => json!({ "start_cursor": cursor }),
                None => json!({}),
            };
            let result = self.send_json(self.client.post(&url), &body).await?;

            if let Some(results) = result.get("results").and_then(Value::as_array) {
                entities.extend(results.iter().filter_map(|record| entity_from_record(record, kind)));
            }

            let has_more = result
                .get("has_more")
                .and_then(Value::as_bool)
                .unwrap_or(false);
            start_cursor = result
                .get("next_cursor")
                .and_then(Value::as_str)
                .map(str::to_string);
            if !has_more || start_cursor.is_none() {
                break;
            }
        }

        log::info!(
            "Loaded {} {} records from database {}",
            entities.len(),
            kind,
            database_id
        );
        Ok(entities)
    }

    async fn update_page_body(&self, page_id: &str, property: &str, body: &str) -> Result<()> {
        ensure_within_limit(body, self.body_limit())?;

        // property names are schema-defined, so the payload key is dynamic
        let mut properties = serde_json::Map::new();
        properties.insert(
            property.to_string(),
            json!({ "rich_text": [ { "text": { "content": body } } ] }),
        );
        let update = json!({ "properties": properties });

        let url = format!("{}/pages/{}", NOTION_API_BASE, page_id);
        self.send_json(self.client.patch(&url), &update).await?;

        log::info!("Updated page {} ({} characters)", page_id, body.chars().count());
        Ok(())
    }

    fn body_limit(&self) -> usize {
        RICH_TEXT_CONTENT_LIMIT
    }
}

/// Find the first rich_text property on a page and concatenate its text runs
fn find_rich_text_property(page: &Value) -> Option<PageBody> {
    let properties = page.get("properties")?.as_object()?;
    for (name, prop) in properties {
        if prop.get("type").and_then(Value::as_str) == Some("rich_text") {
            let content = prop
                .get("rich_text")
                .and_then(Value::as_array)
                .map(|runs| {
                    runs.iter()
                        .filter_map(|run| {
                            run.get("text")
                                .and_then(|t| t.get("content"))
                                .and_then(Value::as_str)
                        })
                        .collect::<String>()
                })
                .unwrap_or_default();
            return Some(PageBody {
                property: name.clone(),
                content,
            });
        }
    }
    None
}

/// Build a ReferenceEntity from one database query record. Records without
/// a usable title property are skipped.
fn entity_from_record(record: &Value, kind: EntityKind) -> Option<ReferenceEntity> {
    let id = record.get("id")?.as_str()?.to_string();
    let name = extract_title(record)?;
    let entity = ReferenceEntity::new(id, name, kind);
    Some(match kind {
        EntityKind::Project => {
            let aliases = vec![
                format!("{} project", entity.name),
                format!("the {} project", entity.name),
            ];
            entity.with_aliases(aliases)
        }
        EntityKind::Person => entity,
    })
}

/// Probe the common title property names and pull the first text run
fn extract_title(record: &Value) -> Option<String> {
    let properties = record.get("properties")?.as_object()?;
    for candidate in TITLE_PROPERTY_CANDIDATES {
        if let Some(title) = properties
            .get(candidate)
            .and_then(|prop| prop.get("title"))
            .and_then(Value::as_array)
            .and_then(|runs| runs.first())
            .and_then(|run| run.get("text"))
            .and_then(|t| t.get("content"))
            .and_then(Value::as_str)
        {
            if !title.trim().is_empty() {
                return Some(title.to_string());
            }
        }
    }
    None
}
