//! Place taggers.
//!
//! A [`PlaceTagger`] reports the substrings of an address it believes name a
//! place. The extractor unions tagger output with its own fallback patterns,
//! so a tagger only needs to be precise, not exhaustive.
//!
//! [`HeuristicPlaceTagger`] is the built-in implementation. It reads the
//! shape of postal text rather than a gazetteer:
//! - comma separated segments made only of capitalized words ("Pune",
//!   "Andhra Pradesh")
//! - phrases ending in a place-type word ("Kent County", "Kowloon City")
//! - phrases starting with a state-type word and "of" ("Republic of Korea")
//! - capitalized phrases after "in", "near" or "at"

use std::sync::LazyLock;

use regex::Regex;

use super::patterns::{is_ignored_code, is_junk_phrase, is_junk_word};

/// Capability interface for place-name taggers.
pub trait PlaceTagger: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Report place strings found in `text`, in the order found.
    fn tag_places(&self, text: &str) -> Vec<String>;
}

/// Maximum number of words in an address segment reported as a place.
const MAX_SEGMENT_WORDS: usize = 3;

/// A word that can be part of a place name inside a segment.
static SEGMENT_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[A-Z][a-z'\-]+|[A-Z]{2,3})$").unwrap());

/// Address segments between separators.
static SEGMENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^,;\n|]+").unwrap());

static PLACE_SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:[A-Z][a-z]+\s){1,2}(?:City|County|District|Province|State|Island|Islands|Republic|Kingdom|Territory)\b",
    )
    .unwrap()
});

static PLACE_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:Republic|Kingdom|State|Province|Commonwealth|Emirate)\s+of\s+(?:the\s+)?[A-Z][a-z]+(?:\s[A-Z][a-z]+)?\b",
    )
    .unwrap()
});

static PREPOSITION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:in|near|at)\s+([A-Z][a-z]+(?:\s[A-Z][a-z]+)?)\b").unwrap()
});

/// Built-in tagger driven by capitalization and address layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicPlaceTagger;

impl HeuristicPlaceTagger {
    pub fn new() -> Self {
        Self
    }
}

impl PlaceTagger for HeuristicPlaceTagger {
    fn name(&self) -> &str {
        "heuristic"
    }

    fn tag_places(&self, text: &str) -> Vec<String> {
        let mut found: Vec<(usize, String)> = Vec::new();

        found.extend(tag_segments(text));
        found.extend(
            PLACE_SUFFIX_RE
                .find_iter(text)
                .filter_map(|m| trim_leading_junk(m.start(), m.as_str())),
        );
        found.extend(
            PLACE_PREFIX_RE
                .find_iter(text)
                .map(|m| (m.start(), m.as_str().to_string())),
        );
        found.extend(PREPOSITION_RE.captures_iter(text).filter_map(|caps| {
            let place = caps.get(1)?;
            if place.as_str().split_whitespace().any(is_junk_word) {
                return None;
            }
            Some((place.start(), place.as_str().to_string()))
        }));

        // Stable sort keeps segment reports ahead of pattern reports at the same offset.
        found.sort_by_key(|(start, _)| *start);

        let mut places: Vec<String> = Vec::with_capacity(found.len());
        for (_, place) in found {
            if !places.contains(&place) {
                places.push(place);
            }
        }
        places
    }
}

/// Segments of an address that consist solely of capitalized words.
fn tag_segments(text: &str) -> Vec<(usize, String)> {
    let mut segments = Vec::new();

    for piece in SEGMENT_RE.find_iter(text) {
        let raw = piece.as_str();
        let segment = raw.trim().trim_end_matches('.');
        let words: Vec<&str> = segment.split_whitespace().collect();
        if words.is_empty() || words.len() > MAX_SEGMENT_WORDS {
            continue;
        }
        if !words.iter().all(|w| SEGMENT_WORD_RE.is_match(w)) {
            continue;
        }
        if words.iter().any(|w| is_junk_word(w) || is_ignored_code(w)) || is_junk_phrase(segment) {
            continue;
        }

        let leading = raw.len() - raw.trim_start().len();
        segments.push((piece.start() + leading, segment.to_string()));
    }

    segments
}

/// Drop leading postal noise words from a suffix match ("Rd Kent County").
/// Returns `None` if only the place-type word would remain.
fn trim_leading_junk(start: usize, phrase: &str) -> Option<(usize, String)> {
    let mut offset = start;
    let mut rest = phrase;
    while let Some((word, tail)) = rest.split_once(' ') {
        if !is_junk_word(word) {
            break;
        }
        offset += word.len() + 1;
        rest = tail;
    }
    if rest.contains(' ') {
        Some((offset, rest.to_string()))
    } else {
        None
    }
}

/// Tagger that reports nothing, leaving extraction to the fallback patterns.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTagger;

impl PlaceTagger for NoopTagger {
    fn name(&self) -> &str {
        "none"
    }

    fn tag_places(&self, _text: &str) -> Vec<String> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(text: &str) -> Vec<String> {
        HeuristicPlaceTagger.tag_places(text)
    }

    #[test]
    fn test_tags_capitalized_segments() {
        assert_eq!(
            tag("123 Main St, Pune, Maharashtra, India"),
            vec!["Pune", "Maharashtra", "India"]
        );
    }

    #[test]
    fn test_tags_multi_word_segments_and_codes() {
        assert_eq!(
            tag("Flat 4, Andhra Pradesh, NY"),
            vec!["Andhra Pradesh", "NY"]
        );
    }

    #[test]
    fn test_skips_segments_with_postal_noise() {
        assert!(tag("PO Box 123, Suite 400").is_empty());
        assert!(tag("Main Street, North").is_empty());
        assert!(tag("PIN").is_empty());
    }

    #[test]
    fn test_skips_long_segments() {
        assert!(tag("The Quick Brown Fox").is_empty());
    }

    #[test]
    fn test_tags_place_suffix() {
        let places = tag("12 High Rd Kent County 5501");
        assert_eq!(places, vec!["Kent County"]);
    }

    #[test]
    fn test_tags_state_of_phrase() {
        let places = tag("Office 5 Republic of Korea 04524");
        assert_eq!(places, vec!["Republic of Korea"]);
    }

    #[test]
    fn test_tags_after_preposition() {
        let places = tag("warehouse located near Lyon 69001");
        assert_eq!(places, vec!["Lyon"]);
    }

    #[test]
    fn test_preposition_skips_junk() {
        assert!(tag("deliver at Main Street 5").is_empty());
    }

    #[test]
    fn test_reports_in_text_order_without_duplicates() {
        let places = tag("Delhi, Ontario, Delhi");
        assert_eq!(places, vec!["Delhi", "Ontario"]);
    }

    #[test]
    fn test_noop_tagger() {
        assert!(NoopTagger.tag_places("Pune, India").is_empty());
    }
}
