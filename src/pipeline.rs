//! The one-shot processing pipeline
//!
//! Loader output comes in, one page update goes out: extract structured
//! meeting data through the LLM port, resolve mentioned names against the
//! reference databases, compose the appended body, and write it back through
//! the page-store port. Entity lookups degrade to empty sets on failure;
//! every other error aborts the run before anything is written.

use crate::config::Settings;
use crate::domain::compose::{self, RenderInput};
use crate::domain::extraction;
use crate::domain::linking::EntityResolver;
use crate::domain::models::{EntityKind, LinkedMention, ReferenceEntity, Transcript};
use crate::domain::prompts::ExtractionPrompt;
use crate::error::{AppError, Result};
use crate::ports::llm::{LlmConfig, LlmServicePort};
use crate::ports::pages::PageStorePort;

/// What happened during a run, for operator feedback
#[derive(Debug)]
pub struct RunReport {
    pub meeting_name: Option<String>,
    pub attendees: Vec<LinkedMention>,
    pub action_item_count: usize,
    pub decision_count: usize,
    pub next_step_count: usize,
    pub missing_sections: Vec<&'static str>,
    pub unresolved_names: Vec<String>,
    pub body_chars: usize,
}

/// Process one transcript against one page
pub async fn run(
    llm: &dyn LlmServicePort,
    pages: &dyn PageStorePort,
    settings: &Settings,
    page_id: &str,
    transcript: &Transcript,
) -> Result<RunReport> {
    let people = load_entities(pages, settings.people_db_id.as_deref(), EntityKind::Person).await;
    let projects =
        load_entities(pages, settings.projects_db_id.as_deref(), EntityKind::Project).await;

    let people_names: Vec<String> = people.iter().map(|e| e.name.clone()).collect();
    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    let prompt = ExtractionPrompt::build(&transcript.text, &people_names, &today);

    log::info!("Processing transcript with {}...", llm.provider_name());
    let config = LlmConfig::for_model(settings.llm_model.clone());
    let raw = llm
        .complete(ExtractionPrompt::system_message(), &prompt, &config)
        .await?;

    let parsed = extraction::parse_response(&raw)?;
    if !parsed.is_complete() {
        log::warn!(
            "Extraction recovered partially; missing sections: {}",
            parsed.missing.join(", ")
        );
    }
    let meeting = parsed.meeting;

    // attendees and assignees are people; free-text annotation may also
    // link projects
    let people_resolver = EntityResolver::new(people);
    let attendees = people_resolver.resolve_all(meeting.attendees.iter().map(String::as_str));

    let mut assignee_names: Vec<&str> = meeting
        .action_items
        .iter()
        .filter_map(|item| item.assignee.as_deref())
        .collect();
    assignee_names.dedup();
    let assignees = people_resolver.resolve_all(assignee_names);

    for mention in attendees.iter().chain(assignees.iter()) {
        if let Some(entity) = &mention.entity {
            log::info!(
                "Matched '{}' to {} (similarity: {:.2})",
                mention.raw,
                entity.name,
                mention.score
            );
        }
    }
    let unresolved_names: Vec<String> = attendees
        .iter()
        .chain(assignees.iter())
        .filter(|m| !m.is_matched())
        .map(|m| m.raw.clone())
        .collect();

    let mut all_entities = people_resolver.entities().to_vec();
    all_entities.extend(projects);

    let page_body = pages.fetch_page_body(page_id).await?;

    let section = compose::render_section(&RenderInput {
        meeting: &meeting,
        attendees: &attendees,
        assignees: &assignees,
        entities: &all_entities,
        transcript_text: &transcript.text,
    });
    let full_body = compose::merge(&page_body.content, &section).full_body();
    compose::ensure_within_limit(&full_body, pages.body_limit())?;

    pages
        .update_page_body(page_id, &page_body.property, &full_body)
        .await?;
    log::info!("Preserved existing content and appended the AI summary");

    Ok(RunReport {
        meeting_name: meeting.meeting_name.clone(),
        attendees,
        action_item_count: meeting.action_items.len(),
        decision_count: meeting.decisions.len(),
        next_step_count: meeting.next_steps.len(),
        missing_sections: parsed.missing,
        unresolved_names,
        body_chars: full_body.chars().count(),
    })
}

/// Query one reference database. Absent ids and query failures both yield an
/// empty set - linking degrades, it never aborts the run.
async fn load_entities(
    pages: &dyn PageStorePort,
    database_id: Option<&str>,
    kind: EntityKind,
) -> Vec<ReferenceEntity> {
    let Some(database_id) = database_id else {
        return Vec::new();
    };
    match pages.list_entities(database_id, kind).await {
        Ok(entities) => entities,
        Err(e) => {
            log::warn!(
                "{}",
                AppError::EntityLink(format!("{} database query failed: {}", kind, e))
            );
            Vec::new()
        }
    }
}
