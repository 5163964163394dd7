//! Page body composition
//!
//! Renders the extracted meeting into a text section and appends it to the
//! existing page body behind a banner separator. The existing body is never
//! altered or truncated; when the merged body would not fit the remote
//! field, composition fails instead of writing a partial update.

use crate::domain::linking::annotate_mentions;
use crate::domain::models::{
    ActionItem, ExtractedMeeting, LinkedMention, PageContent, ReferenceEntity,
};
use crate::error::{AppError, Result};

/// Separator placed between the existing body and the appended section
pub const SECTION_SEPARATOR: &str = "\n\n\
==================================================\n\
# AI-Processed Meeting Summary\n\
==================================================\n\n";

/// Everything the renderer needs besides the extraction itself
pub struct RenderInput<'a> {
    pub meeting: &'a ExtractedMeeting,
    pub attendees: &'a [LinkedMention],
    pub assignees: &'a [LinkedMention],
    pub entities: &'a [ReferenceEntity],
    pub transcript_text: &'a str,
}

/// Render the appended section: attendees, summary, decisions, action items,
/// next steps, and the verbatim transcript. Empty sections are omitted.
pub fn render_section(input: &RenderInput<'_>) -> String {
    let mut parts: Vec<String> = Vec::new();

    if !input.attendees.is_empty() {
        let line = input
            .attendees
            .iter()
            .map(render_mention)
            .collect::<Vec<_>>()
            .join(", ");
        parts.push(format!("**Attendees:** {}", line));
    }

    if !input.meeting.summary.is_empty() {
        parts.push(format!(
            "## Summary\n{}",
            annotate_mentions(&input.meeting.summary, input.entities)
        ));
    }

    if !input.meeting.decisions.is_empty() {
        let bullets = input
            .meeting
            .decisions
            .iter()
            .map(|d| format!("• {}", d))
            .collect::<Vec<_>>()
            .join("\n");
        parts.push(format!("## Key Decisions\n{}", bullets));
    }

    if !input.meeting.action_items.is_empty() {
        let bullets = input
            .meeting
            .action_items
            .iter()
            .map(|item| render_action_item(item, input.assignees, input.entities))
            .collect::<Vec<_>>()
            .join("\n");
        parts.push(format!("## Action Items\n{}", bullets));
    }

    if !input.meeting.next_steps.is_empty() {
        let bullets = input
            .meeting
            .next_steps
            .iter()
            .map(|s| format!("• {}", s))
            .collect::<Vec<_>>()
            .join("\n");
        parts.push(format!("## Next Steps\n{}", bullets));
    }

    parts.push(format!(
        "## Original Transcript\n--- BEGIN TRANSCRIPT ---\n{}\n--- END TRANSCRIPT ---",
        input.transcript_text
    ));

    parts.join("\n\n")
}

/// One bullet: "task (Assigned to: X) (Due: Y)", assignee before due date,
/// absent segments omitted entirely.
fn render_action_item(
    item: &ActionItem,
    assignees: &[LinkedMention],
    entities: &[ReferenceEntity],
) -> String {
    let mut line = format!("• {}", annotate_mentions(&item.task, entities));
    if let Some(assignee) = &item.assignee {
        let rendered = assignees
            .iter()
            .find(|m| m.raw == *assignee)
            .map(render_mention)
            .unwrap_or_else(|| assignee.clone());
        line.push_str(&format!(" (Assigned to: {})", rendered));
    }
    if let Some(due) = &item.due_date {
        line.push_str(&format!(" (Due: {})", due));
    }
    line
}

/// A resolved mention renders as a link, an unresolved one as plain text.
fn render_mention(mention: &LinkedMention) -> String {
    match &mention.entity {
        Some(entity) => format!("[{}]({})", mention.raw, entity.url),
        None => mention.raw.clone(),
    }
}

/// Merge the existing body with the new section. The output always starts
/// with the existing body byte for byte, then the separator, then the
/// section - including when the existing body is empty.
pub fn merge(existing_body: &str, section: &str) -> PageContent {
    PageContent::new(existing_body.to_string(), section.to_string())
}

/// Reject bodies that would overflow the remote field instead of truncating.
pub fn ensure_within_limit(body: &str, limit: usize) -> Result<()> {
    let len = body.chars().count();
    if len > limit {
        return Err(AppError::ContentTooLarge { len, limit });
    }
    Ok(())
}
