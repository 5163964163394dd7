//! Notion page URL parsing
//!
//! Notion shares pages under a handful of URL shapes; the page id is a 32
//! character hex string that may appear as a `?p=` query parameter, a bare
//! path segment, or a (possibly dashed) suffix after the page title.

use crate::error::{AppError, Result};
use regex::Regex;

/// Extract the page id from a Notion page URL, normalized to the dashed
/// UUID form the API expects.
///
/// Recognized shapes:
/// - `https://www.notion.so/Page-Title-{id}?p={id}&pm=c` (query parameter)
/// - `https://www.notion.so/{id}` (bare path segment)
/// - `https://www.notion.so/Page-Title-{id}` (title suffix, dashed or not)
pub fn extract_page_id(url: &str) -> Result<String> {
    let patterns = [
        // URL with ?p= parameter
        r"[?&]p=([a-f0-9]{32})",
        // URL with page ID as its own path segment
        r"/([a-f0-9]{32})(?:\?|$)",
        // URL with page ID appended to the title, dashes optional
        r"-([a-f0-9]{8}-?[a-f0-9]{4}-?[a-f0-9]{4}-?[a-f0-9]{4}-?[a-f0-9]{12})(?:\?|$)",
    ];

    for pattern in patterns {
        let re = Regex::new(pattern).expect("static pattern");
        if let Some(captures) = re.captures(url) {
            let raw = captures[1].replace('-', "");
            return Ok(format_page_id(&raw));
        }
    }

    Err(AppError::UrlParse(url.to_string()))
}

/// Insert dashes at the UUID positions the Notion API expects
fn format_page_id(hex: &str) -> String {
    format!(
        "{}-{}-{}-{}-{}",
        &hex[..8],
        &hex[8..12],
        &hex[12..16],
        &hex[16..20],
        &hex[20..]
    )
}
