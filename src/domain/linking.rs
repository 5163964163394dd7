//! Fuzzy entity resolution and inline mention linking
//!
//! Raw names coming out of the extraction are matched against the reference
//! databases under case-insensitive fuzzy equality: substring containment in
//! either direction counts as a perfect match, anything else is scored with
//! normalized Levenshtein similarity. A name links only when its best score
//! reaches the threshold; ties keep the first entity in reference order.

use crate::domain::models::{LinkedMention, ReferenceEntity};

/// Minimum similarity for a raw name to link to a reference entity
pub const SIMILARITY_THRESHOLD: f64 = 0.8;

/// Case-insensitive similarity between a raw name and a candidate name.
///
/// Empty input never matches. Containment scores 1.0 so that "Steve Keen"
/// matches "Steve Keen project" despite the length difference.
pub fn similarity(raw: &str, candidate: &str) -> f64 {
    let a = raw.trim().to_lowercase();
    let b = candidate.trim().to_lowercase();
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a.contains(&b) || b.contains(&a) {
        return 1.0;
    }
    strsim::normalized_levenshtein(&a, &b)
}

/// Resolves raw names against a fixed, ordered reference set. No side
/// effects; identical inputs always produce identical matches.
pub struct EntityResolver {
    entities: Vec<ReferenceEntity>,
    threshold: f64,
}

impl EntityResolver {
    pub fn new(entities: Vec<ReferenceEntity>) -> Self {
        Self {
            entities,
            threshold: SIMILARITY_THRESHOLD,
        }
    }

    #[cfg(test)]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn entities(&self) -> &[ReferenceEntity] {
        &self.entities
    }

    /// Resolve one raw name. The score of an entity is the best score over
    /// its canonical name and aliases; strictly-greater comparison keeps the
    /// first entity in reference order on ties.
    pub fn resolve(&self, raw: &str) -> LinkedMention {
        if raw.trim().is_empty() {
            return LinkedMention::unmatched(raw);
        }

        let mut best: Option<(&ReferenceEntity, f64)> = None;
        for entity in &self.entities {
            let score = entity
                .variations()
                .map(|v| similarity(raw, v))
                .fold(0.0, f64::max);
            if score >= self.threshold && best.map_or(true, |(_, s)| score > s) {
                best = Some((entity, score));
            }
        }

        match best {
            Some((entity, score)) => LinkedMention {
                raw: raw.to_string(),
                entity: Some(entity.clone()),
                score,
            },
            None => LinkedMention::unmatched(raw),
        }
    }

    pub fn resolve_all<'a>(&self, raws: impl IntoIterator<Item = &'a str>) -> Vec<LinkedMention> {
        raws.into_iter().map(|raw| self.resolve(raw)).collect()
    }
}

/// Rewrite free text so that mentions of known entities become
/// `[mention](url)` links, leaving everything else verbatim.
///
/// Variations are tried longest first so "Steve Keen project" wins over
/// "Steve Keen" at the same position; among candidate positions the earliest
/// occurrence in the text wins.
pub fn annotate_mentions(text: &str, entities: &[ReferenceEntity]) -> String {
    let mut variations: Vec<(&str, &ReferenceEntity)> = entities
        .iter()
        .flat_map(|entity| {
            entity
                .variations()
                .filter(|v| !v.trim().is_empty())
                .map(move |v| (v, entity))
        })
        .collect();
    variations.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

    if variations.is_empty() {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut remaining = text;
    while !remaining.is_empty() {
        let mut earliest: Option<(usize, usize, &ReferenceEntity)> = None;
        for &(variation, entity) in &variations {
            if let Some((start, end)) = find_case_insensitive(remaining, variation) {
                if earliest.map_or(true, |(s, _, _)| start < s) {
                    earliest = Some((start, end, entity));
                }
            }
        }
        match earliest {
            Some((start, end, entity)) => {
                out.push_str(&remaining[..start]);
                out.push('[');
                out.push_str(&remaining[start..end]);
                out.push_str("](");
                out.push_str(&entity.url);
                out.push(')');
                remaining = &remaining[end..];
            }
            None => {
                out.push_str(remaining);
                break;
            }
        }
    }
    out
}

/// Case-insensitive literal search returning byte offsets into `text`.
/// Char-by-char comparison keeps offsets valid for non-ASCII input.
fn find_case_insensitive(text: &str, needle: &str) -> Option<(usize, usize)> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let needle: Vec<char> = needle.chars().collect();
    if needle.is_empty() || needle.len() > chars.len() {
        return None;
    }
    'positions: for start in 0..=chars.len() - needle.len() {
        for (offset, &wanted) in needle.iter().enumerate() {
            let found = chars[start + offset].1;
            if !found.to_lowercase().eq(wanted.to_lowercase()) {
                continue 'positions;
            }
        }
        let (last_idx, last_char) = chars[start + needle.len() - 1];
        return Some((chars[start].0, last_idx + last_char.len_utf8()));
    }
    None
}
