/// Domain models for notion-scribe
///
/// These models represent core business entities and are transport-agnostic.
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::SystemTime;

/// A meeting transcript read from disk. Immutable once constructed.
#[derive(Debug, Clone)]
pub struct Transcript {
    pub path: PathBuf,
    pub text: String,
    pub byte_len: u64,
    pub modified: SystemTime,
}

/// A single action item extracted from a transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionItem {
    pub task: String,
    pub assignee: Option<String>,
    pub due_date: Option<String>,
}

/// Structured meeting information extracted by the LLM.
/// Produced once per run; never mutated after creation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractedMeeting {
    pub meeting_name: Option<String>,
    pub attendees: Vec<String>,
    pub summary: String,
    pub decisions: Vec<String>,
    pub action_items: Vec<ActionItem>,
    pub next_steps: Vec<String>,
}

/// Kind of reference entity a mention can link to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Person,
    Project,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Person => write!(f, "person"),
            EntityKind::Project => write!(f, "project"),
        }
    }
}

/// A known person or project record pulled from a Notion database.
/// Read-only within a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceEntity {
    pub id: String,
    pub name: String,
    pub aliases: Vec<String>,
    pub kind: EntityKind,
    pub url: String,
}

impl ReferenceEntity {
    pub fn new(id: String, name: String, kind: EntityKind) -> Self {
        let url = format!("https://www.notion.so/{}", id.replace('-', ""));
        Self {
            id,
            name,
            aliases: Vec::new(),
            kind,
            url,
        }
    }

    /// Sets alias variations (builder pattern)
    pub fn with_aliases(mut self, aliases: Vec<String>) -> Self {
        self.aliases = aliases;
        self
    }

    /// Canonical name plus all alias variations
    pub fn variations(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}

/// Pairs a raw name from the extraction with at most one matched reference
/// entity and the similarity score that produced the match.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkedMention {
    pub raw: String,
    pub entity: Option<ReferenceEntity>,
    pub score: f64,
}

impl LinkedMention {
    pub fn unmatched(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            entity: None,
            score: 0.0,
        }
    }

    pub fn is_matched(&self) -> bool {
        self.entity.is_some()
    }
}

/// The existing page body and the freshly composed section to append.
/// The existing body is never rewritten, only appended to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContent {
    pub existing_body: String,
    pub appended_body: String,
}

impl PageContent {
    pub fn new(existing_body: String, appended_body: String) -> Self {
        Self {
            existing_body,
            appended_body,
        }
    }

    /// Full body to write back: existing content, separator, new section.
    pub fn full_body(&self) -> String {
        format!(
            "{}{}{}",
            self.existing_body,
            crate::domain::compose::SECTION_SEPARATOR,
            self.appended_body
        )
    }
}
