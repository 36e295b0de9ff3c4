//! Fallback pattern extraction of place candidates.
//!
//! Runs independently of the place tagger over the same normalized text and
//! catches what a general tagger tends to miss in postal data:
//! - Saint-prefixed names ("Saint Paul", "St. Louis Park")
//! - One or two word capitalized phrases, with postal noise words removed
//! - Two or three letter region codes ("MN", "NSW")

use log::trace;

use super::patterns::{
    CAPITALIZED_PHRASE_RE, EDGE_PUNCTUATION, SAINT_RE, SHORT_CODE_RE, is_ignored_code,
    is_junk_phrase, is_junk_word,
};

/// Minimum length (exclusive) for a filtered phrase or word to be kept.
const MIN_CANDIDATE_LEN: usize = 2;

/// Collect all fallback candidates from normalized `text`.
///
/// Output order is saint matches, then capitalized phrases (each phrase
/// followed by its surviving words), then short codes. Duplicates are left
/// in; the caller deduplicates.
pub fn collect_fallback_candidates(text: &str) -> Vec<String> {
    let mut candidates = saint_candidates(text);
    candidates.extend(capitalized_phrase_candidates(text));
    candidates.extend(short_code_candidates(text));
    candidates
}

fn saint_candidates(text: &str) -> Vec<String> {
    SAINT_RE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

fn capitalized_phrase_candidates(text: &str) -> Vec<String> {
    let mut candidates = Vec::new();

    for m in CAPITALIZED_PHRASE_RE.find_iter(text) {
        let phrase = m.as_str();
        let words: Vec<&str> = phrase
            .split_whitespace()
            .filter(|word| !is_junk_word(word))
            .collect();
        trace!("phrase {:?} -> words {:?}", phrase, words);

        if words.is_empty() {
            continue;
        }

        let filtered = words.join(" ");
        if is_junk_phrase(&filtered) || filtered.chars().count() <= MIN_CANDIDATE_LEN {
            continue;
        }

        candidates.push(filtered);
        candidates.extend(
            words
                .into_iter()
                .filter(|word| word.chars().count() > MIN_CANDIDATE_LEN)
                .map(str::to_string),
        );
    }

    candidates
}

fn short_code_candidates(text: &str) -> Vec<String> {
    SHORT_CODE_RE
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|code| !is_ignored_code(code))
        .map(str::to_string)
        .collect()
}

/// Strip edge punctuation (`. , ; : ! ?`) and whitespace from a candidate.
///
/// Returns `None` when nothing is left.
pub fn clean_candidate(candidate: &str) -> Option<String> {
    let cleaned = candidate
        .trim_matches(|c: char| EDGE_PUNCTUATION.contains(&c) || c.is_whitespace());
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}
