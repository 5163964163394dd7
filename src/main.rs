//! notion-scribe - append an AI-processed meeting summary to a Notion page
//!
//! One-shot pipeline: read a transcript file, extract structured meeting
//! data through an LLM, link mentioned people and projects against the
//! Notion reference databases, and append the result to the target page.

mod adapters;
mod config;
mod domain;
mod error;
mod pipeline;
mod ports;
mod transcript;

use adapters::notion::{extract_page_id, NotionClient};
use adapters::services::llm::create_service;
use clap::Parser;
use config::Settings;
use error::Result;
use std::io::Write;
use std::path::PathBuf;
use transcript::{Candidate, SelectionPolicy};

#[derive(Debug, Parser)]
#[command(
    name = "notion-scribe",
    version,
    about = "Append an AI-processed meeting summary to a Notion page"
)]
struct Cli {
    /// Notion page URL to update
    page_url: String,

    /// Transcript filename inside the transcript directory; when omitted,
    /// you are prompted to choose from the available files
    transcript_file: Option<String>,

    /// Pick the most recently modified transcript without prompting
    #[arg(long)]
    latest: bool,

    /// Directory searched for transcript files (overrides TRANSCRIPT_DIR)
    #[arg(long, value_name = "PATH")]
    transcript_dir: Option<PathBuf>,
}

impl Cli {
    fn selection_policy(&self) -> SelectionPolicy {
        match (&self.transcript_file, self.latest) {
            (Some(name), _) => SelectionPolicy::Explicit(name.clone()),
            (None, true) => SelectionPolicy::MostRecent,
            (None, false) => SelectionPolicy::Interactive,
        }
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let settings = Settings::from_env()?;
    log::debug!("Configured for meetings database {}", settings.meetings_db_id);

    let page_id = extract_page_id(&cli.page_url)?;
    log::info!("Target page: {}", page_id);

    let dir = cli
        .transcript_dir
        .clone()
        .unwrap_or_else(|| settings.transcript_dir.clone());
    let candidates = transcript::list_candidates(&dir)?;
    let chosen = transcript::select(&candidates, &cli.selection_policy(), prompt_for_choice)?;
    let meeting_transcript = transcript::read(chosen)?;
    let modified: chrono::DateTime<chrono::Local> = meeting_transcript.modified.into();
    log::info!(
        "Read transcript {} ({} bytes, modified {})",
        meeting_transcript.path.display(),
        meeting_transcript.byte_len,
        modified.format("%Y-%m-%d %H:%M")
    );

    let llm = create_service(&settings.llm_provider, settings.llm_api_key.clone())?;
    let notion = NotionClient::new(settings.notion_token.clone());

    let report = pipeline::run(
        llm.as_ref(),
        &notion,
        &settings,
        &page_id,
        &meeting_transcript,
    )
    .await?;

    if let Some(name) = &report.meeting_name {
        log::info!("Meeting: {}", name);
    }
    if !report.attendees.is_empty() {
        let names: Vec<&str> = report.attendees.iter().map(|m| m.raw.as_str()).collect();
        log::info!("Attendees: {}", names.join(", "));
    }
    log::info!(
        "Extracted {} action items, {} decisions, {} next steps",
        report.action_item_count,
        report.decision_count,
        report.next_step_count
    );
    if !report.missing_sections.is_empty() {
        log::warn!(
            "Model output had no usable: {}",
            report.missing_sections.join(", ")
        );
    }
    if !report.unresolved_names.is_empty() {
        log::info!(
            "Rendered as plain text (no database match): {}",
            report.unresolved_names.join(", ")
        );
    }
    log::info!("Page body is now {} characters", report.body_chars);

    println!("Updated meeting page: {}", cli.page_url);
    Ok(())
}

/// Numbered chooser for the interactive policy. Returns None on 'q' or EOF.
fn prompt_for_choice(candidates: &[Candidate]) -> Option<usize> {
    println!("Found {} transcript files:", candidates.len());
    for (i, candidate) in candidates.iter().enumerate() {
        let modified: chrono::DateTime<chrono::Local> = candidate.modified.into();
        println!(
            "  {}. {} ({} bytes, modified: {})",
            i + 1,
            candidate.file_name,
            candidate.byte_len,
            modified.format("%Y-%m-%d %H:%M")
        );
    }

    loop {
        print!("Select a file (1-{}, q to quit): ", candidates.len());
        let _ = std::io::stdout().flush();

        let mut line = String::new();
        if std::io::stdin().read_line(&mut line).is_err() || line.is_empty() {
            return None;
        }
        let input = line.trim();
        if input.eq_ignore_ascii_case("q") || input.eq_ignore_ascii_case("quit") {
            return None;
        }
        match input.parse::<usize>() {
            Ok(n) if (1..=candidates.len()).contains(&n) => return Some(n - 1),
            _ => println!(
                "Invalid input. Enter a number between 1 and {} or 'q' to quit.",
                candidates.len()
            ),
        }
    }
}
