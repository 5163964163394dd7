//! Tolerant parsing of LLM extraction output
//!
//! Models are asked for strict JSON but sometimes wrap it in code fences or
//! prose, and sometimes drop sections. The parser locates the outermost JSON
//! object, decodes it, and recovers each section independently: a missing or
//! mistyped section becomes an empty sequence and is reported back to the
//! caller instead of failing the whole run.

use crate::domain::models::{ActionItem, ExtractedMeeting};
use crate::error::{AppError, Result};
use serde_json::Value;

/// Result of parsing an LLM response: the best-effort record plus the names
/// of sections that could not be recovered.
#[derive(Debug, Clone)]
pub struct ParsedExtraction {
    pub meeting: ExtractedMeeting,
    pub missing: Vec<&'static str>,
}

impl ParsedExtraction {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Parse a raw LLM response into an ExtractedMeeting.
///
/// Fails with `AppError::Extraction` only when no JSON object can be decoded
/// at all; otherwise returns a partial record with `missing` listing the
/// unrecoverable sections.
pub fn parse_response(raw: &str) -> Result<ParsedExtraction> {
    let json = locate_json_object(raw)
        .ok_or_else(|| AppError::Extraction("no JSON object in LLM response".to_string()))?;

    let value: Value = serde_json::from_str(json)
        .map_err(|e| AppError::Extraction(format!("invalid JSON in LLM response: {}", e)))?;

    let obj = value
        .as_object()
        .ok_or_else(|| AppError::Extraction("LLM response is not a JSON object".to_string()))?;

    let mut missing = Vec::new();

    let attendees = string_array(obj.get("attendees")).unwrap_or_else(|| {
        missing.push("attendees");
        Vec::new()
    });

    let summary = obj
        .get("summary")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| {
            missing.push("summary");
            String::new()
        });

    let decisions = string_array(obj.get("key_decisions")).unwrap_or_else(|| {
        missing.push("key_decisions");
        Vec::new()
    });

    let action_items = action_item_array(obj.get("action_items")).unwrap_or_else(|| {
        missing.push("action_items");
        Vec::new()
    });

    let next_steps = string_array(obj.get("next_steps")).unwrap_or_else(|| {
        missing.push("next_steps");
        Vec::new()
    });

    let meeting_name = obj
        .get("meeting_name")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string);

    Ok(ParsedExtraction {
        meeting: ExtractedMeeting {
            meeting_name,
            attendees,
            summary,
            decisions,
            action_items,
            next_steps,
        },
        missing,
    })
}

/// Slice out the outermost `{ ... }` span, skipping fences or prose around it.
fn locate_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end <= start {
        return None;
    }
    Some(&raw[start..=end])
}

fn string_array(value: Option<&Value>) -> Option<Vec<String>> {
    let items = value?.as_array()?;
    Some(
        items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
    )
}

fn action_item_array(value: Option<&Value>) -> Option<Vec<ActionItem>> {
    let items = value?.as_array()?;
    Some(items.iter().filter_map(parse_action_item).collect())
}

fn parse_action_item(value: &Value) -> Option<ActionItem> {
    let obj = value.as_object()?;
    let task = obj.get("task")?.as_str()?.trim().to_string();
    if task.is_empty() {
        return None;
    }
    Some(ActionItem {
        task,
        assignee: optional_string(obj.get("assignee")),
        due_date: optional_string(obj.get("due_date")),
    })
}

/// Treats JSON null, absent keys, and blank strings all as "not provided".
fn optional_string(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
