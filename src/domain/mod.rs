/// Domain layer - core business logic
///
/// Everything here is pure and transport-agnostic: extraction parsing,
/// entity linking, and page body composition operate on in-memory data only.
pub mod compose;
pub mod extraction;
pub mod linking;
pub mod models;
pub mod prompts;

pub use extraction::{parse_response, ParsedExtraction};
pub use linking::EntityResolver;
pub use models::{
    ActionItem, EntityKind, ExtractedMeeting, LinkedMention, PageContent, ReferenceEntity,
    Transcript,
};
pub use prompts::ExtractionPrompt;
