//! Prompt template for LLM meeting extraction
//!
//! The template asks for strict JSON matching the ExtractedMeeting shape and
//! forbids invented due dates. Known people names are injected so the model
//! canonicalizes attendee spellings against the reference database.

/// Extraction prompt builder
pub struct ExtractionPrompt;

const TEMPLATE: &str = r#"Extract key information from this meeting transcript and return ONLY valid JSON.

{people_context}

TRANSCRIPT:
{transcript}

INSTRUCTIONS:
1. Extract the meeting name/title (if not explicit, create a descriptive one)
2. Extract all attendee names mentioned in the transcript
3. Create a summary of key discussion points, decisions, and action items
4. If speaker labels are present (e.g., John:, Speaker 1:), preserve attribution for important points
5. Extract any action items or tasks mentioned, noting who they're assigned to

Return JSON with this exact structure:
{
    "meeting_name": "string - descriptive meeting title",
    "attendees": ["array of attendee names"],
    "summary": "string - comprehensive summary including key points, decisions, and action items with speaker attribution where relevant",
    "action_items": [
        {
            "task": "string - description of the task",
            "assignee": "string - person assigned (if mentioned)",
            "due_date": "string - ONLY if explicitly mentioned in transcript, otherwise null"
        }
    ],
    "key_decisions": ["array of key decisions made"],
    "next_steps": ["array of next steps or follow-up actions"]
}

CRITICAL RULES:
- Return ONLY the JSON object, no additional text
- Today's date is {current_date}
- NEVER invent or hallucinate due dates - only use dates explicitly mentioned in the transcript
- If no due date is mentioned for an action item, set due_date to null
- Be comprehensive in the summary but concise
- Preserve speaker attribution for action items and decisions
- Only include attendees who are actually mentioned or speak in the transcript
- Do NOT make up information that is not in the transcript"#;

impl ExtractionPrompt {
    /// Render the extraction prompt for a transcript.
    ///
    /// `people_names` comes from the people reference database; when present
    /// the model is told to prefer those exact spellings for attendees.
    pub fn build(transcript: &str, people_names: &[String], current_date: &str) -> String {
        let people_context = if people_names.is_empty() {
            String::new()
        } else {
            format!(
                "EXISTING PEOPLE IN DATABASE:\n{}\n\nWhen extracting attendees, try to match names \
                 to these existing people. If you find variations (e.g., \"John\" vs \"John Smith\"), \
                 use the full name from the database.",
                people_names.join(", ")
            )
        };

        TEMPLATE
            .replace("{people_context}", &people_context)
            .replace("{transcript}", transcript)
            .replace("{current_date}", current_date)
    }

    /// System message sent alongside the rendered prompt
    pub fn system_message() -> &'static str {
        "You are an expert meeting analyst. Extract structured information from transcripts \
         accurately and comprehensively. Always respond with valid JSON only."
    }
}
