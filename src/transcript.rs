//! Transcript discovery, selection, and reading
//!
//! Candidates are every `.txt` file in the transcript directory. Selection
//! is a pure function over the candidate list and a policy; the interactive
//! chooser is injected by the caller so the policy logic stays testable.

use crate::domain::models::Transcript;
use crate::error::{AppError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// A transcript file that could be processed this run
#[derive(Debug, Clone)]
pub struct Candidate {
    pub path: PathBuf,
    pub file_name: String,
    pub byte_len: u64,
    pub modified: SystemTime,
}

/// How to pick one candidate out of many
#[derive(Debug, Clone)]
pub enum SelectionPolicy {
    /// Use the file with this exact name
    Explicit(String),
    /// Use the most recently modified file
    MostRecent,
    /// Ask the operator, unless there is only one candidate
    Interactive,
}

/// List all `.txt` files in the transcript directory, name-sorted so that
/// interactive numbering is stable across runs.
pub fn list_candidates(dir: &Path) -> Result<Vec<Candidate>> {
    if !dir.is_dir() {
        return Err(AppError::TranscriptNotFound(format!(
            "transcript directory not found: {}",
            dir.display()
        )));
    }

    let mut candidates = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let is_txt = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("txt"))
            .unwrap_or(false);
        if !path.is_file() || !is_txt {
            continue;
        }
        let metadata = entry.metadata()?;
        let file_name = entry.file_name().to_string_lossy().into_owned();
        candidates.push(Candidate {
            path,
            file_name,
            byte_len: metadata.len(),
            modified: metadata.modified()?,
        });
    }

    if candidates.is_empty() {
        return Err(AppError::TranscriptNotFound(format!(
            "no .txt files in {} - save the meeting transcript there and re-run",
            dir.display()
        )));
    }

    candidates.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    Ok(candidates)
}

/// Pick one candidate according to the policy. `chooser` is only invoked for
/// the Interactive policy with more than one candidate; returning None means
/// the operator cancelled.
pub fn select<'a>(
    candidates: &'a [Candidate],
    policy: &SelectionPolicy,
    chooser: impl FnOnce(&[Candidate]) -> Option<usize>,
) -> Result<&'a Candidate> {
    match policy {
        SelectionPolicy::Explicit(name) => candidates
            .iter()
            .find(|c| c.file_name == *name)
            .ok_or_else(|| {
                AppError::TranscriptNotFound(format!("specified file not found: {}", name))
            }),
        SelectionPolicy::MostRecent => {
            // strictly-greater comparison keeps the first candidate on mtime ties
            let mut best: Option<&Candidate> = None;
            for candidate in candidates {
                if best.map_or(true, |b| candidate.modified > b.modified) {
                    best = Some(candidate);
                }
            }
            best.ok_or_else(|| AppError::TranscriptNotFound("no candidates".to_string()))
        }
        SelectionPolicy::Interactive => {
            if candidates.len() == 1 {
                return Ok(&candidates[0]);
            }
            let index = chooser(candidates).ok_or_else(|| {
                AppError::TranscriptNotFound("selection cancelled".to_string())
            })?;
            candidates.get(index).ok_or_else(|| {
                AppError::TranscriptNotFound(format!("invalid selection index {}", index))
            })
        }
    }
}

/// Read a candidate as UTF-8. Whitespace-only files are rejected.
pub fn read(candidate: &Candidate) -> Result<Transcript> {
    let raw = fs::read_to_string(&candidate.path)?;
    let text = raw.trim();
    if text.is_empty() {
        return Err(AppError::TranscriptNotFound(format!(
            "transcript file is empty: {}",
            candidate.path.display()
        )));
    }
    Ok(Transcript {
        path: candidate.path.clone(),
        text: text.to_string(),
        byte_len: candidate.byte_len,
        modified: candidate.modified,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use filetime::FileTime;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &str, mtime_secs: i64) {
        let path = dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        filetime::set_file_mtime(&path, FileTime::from_unix_time(mtime_secs, 0)).unwrap();
    }

    fn no_choice(_: &[Candidate]) -> Option<usize> {
        panic!("chooser should not be called");
    }

    #[test]
    fn test_list_candidates_filters_and_sorts() {
        let dir = TempDir::new().unwrap();
        write_file(&dir, "b.txt", "two", 200);
        write_file(&dir, "a.txt", "one", 100);
        write_file(&dir, "notes.md", "skip", 300);
        let candidates = list_candidates(dir.path()).unwrap();
        let names: Vec<&str> = candidates.iter().map(|c| c.file_name.as_str()).collect();
        assert_eq!(names, vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            list_candidates(&missing),
            Err(AppError::TranscriptNotFound(_))
        ));
    }

    #[test]
    fn test_empty_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        write_file(&dir, "readme.md", "not a transcript", 100);
        assert!(matches!(
            list_candidates(dir.path()),
            Err(AppError::TranscriptNotFound(_))
        ));
    }

    #[test]
    fn test_explicit_selection() {
        let dir = TempDir::new().unwrap();
        write_file(&dir, "a.txt", "one", 100);
        write_file(&dir, "b.txt", "two", 200);
        let candidates = list_candidates(dir.path()).unwrap();

        let policy = SelectionPolicy::Explicit("b.txt".to_string());
        let chosen = select(&candidates, &policy, no_choice).unwrap();
        assert_eq!(chosen.file_name, "b.txt");

        let missing = SelectionPolicy::Explicit("c.txt".to_string());
        assert!(select(&candidates, &missing, no_choice).is_err());
    }

    #[test]
    fn test_most_recent_selection() {
        let dir = TempDir::new().unwrap();
        write_file(&dir, "old.txt", "one", 100);
        write_file(&dir, "new.txt", "two", 500);
        write_file(&dir, "mid.txt", "three", 300);
        let candidates = list_candidates(dir.path()).unwrap();
        let chosen = select(&candidates, &SelectionPolicy::MostRecent, no_choice).unwrap();
        assert_eq!(chosen.file_name, "new.txt");
    }

    #[test]
    fn test_most_recent_tie_keeps_first_in_name_order() {
        let dir = TempDir::new().unwrap();
        write_file(&dir, "b.txt", "two", 100);
        write_file(&dir, "a.txt", "one", 100);
        let candidates = list_candidates(dir.path()).unwrap();
        let chosen = select(&candidates, &SelectionPolicy::MostRecent, no_choice).unwrap();
        assert_eq!(chosen.file_name, "a.txt");
    }

    #[test]
    fn test_interactive_single_candidate_skips_chooser() {
        let dir = TempDir::new().unwrap();
        write_file(&dir, "only.txt", "one", 100);
        let candidates = list_candidates(dir.path()).unwrap();
        let chosen = select(&candidates, &SelectionPolicy::Interactive, no_choice).unwrap();
        assert_eq!(chosen.file_name, "only.txt");
    }

    #[test]
    fn test_interactive_uses_chooser() {
        let dir = TempDir::new().unwrap();
        write_file(&dir, "a.txt", "one", 100);
        write_file(&dir, "b.txt", "two", 200);
        let candidates = list_candidates(dir.path()).unwrap();
        let chosen = select(&candidates, &SelectionPolicy::Interactive, |c| {
            assert_eq!(c.len(), 2);
            Some(1)
        })
        .unwrap();
        assert_eq!(chosen.file_name, "b.txt");
    }

    #[test]
    fn test_interactive_cancel_is_an_error() {
        let dir = TempDir::new().unwrap();
        write_file(&dir, "a.txt", "one", 100);
        write_file(&dir, "b.txt", "two", 200);
        let candidates = list_candidates(dir.path()).unwrap();
        assert!(select(&candidates, &SelectionPolicy::Interactive, |_| None).is_err());
    }

    #[test]
    fn test_read_trims_and_rejects_empty() {
        let dir = TempDir::new().unwrap();
        write_file(&dir, "ok.txt", "  hello world \n", 100);
        write_file(&dir, "blank.txt", "   \n\n", 100);
        let candidates = list_candidates(dir.path()).unwrap();

        let blank = candidates.iter().find(|c| c.file_name == "blank.txt").unwrap();
        assert!(read(blank).is_err());

        let ok = candidates.iter().find(|c| c.file_name == "ok.txt").unwrap();
        let transcript = read(ok).unwrap();
        assert_eq!(transcript.text, "hello world");
    }
}
