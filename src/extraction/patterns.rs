//! Noise vocabularies and compiled regexes for place extraction.
//!
//! Postal addresses are full of administrative boilerplate that looks like a
//! proper noun to a capitalization heuristic ("Box", "Suite", "North"). The
//! lists here are what the extractor uses to throw those tokens away.
//! All regexes are compiled once via LazyLock.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// Words that never name a place on their own. Compared case-insensitively.
/// Bare numbers are handled separately in [`is_junk_word`].
const JUNK_WORDS: &[&str] = &[
    "po",
    "p.o.",
    "box",
    "post",
    "office",
    "suite",
    "street",
    "st",
    "avenue",
    "ave",
    "blvd",
    "dr",
    "drive",
    "unit",
    "floor",
    "zip",
    "code",
    "phone",
    "mobile",
    "toll-free",
    "toll",
    "email",
    "e-mail",
    "road",
    "rd",
    "wing",
    "flat no",
    "line",
    "sec",
    "sector",
    "mr",
    "mr.",
    "ms",
    "ms.",
    "miss",
    "north",
    "south",
    "east",
    "west",
];

/// Whole phrases that are postal noise even when their words are not.
const JUNK_PHRASES: &[&str] = &["po", "po box", "p.o. box", "post office box", "se"];

/// All-caps short tokens that look like region codes but are form labels.
pub const IGNORED_CODES: &[&str] = &["PO", "BOX", "PIN", "ZIP", "FAX", "TEL"];

/// Characters stripped from the edges of every extracted candidate.
pub const EDGE_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?'];

static JUNK_WORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| JUNK_WORDS.iter().copied().collect());

static JUNK_PHRASE_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| JUNK_PHRASES.iter().copied().collect());

/// `St`, `St.` or `Saint` followed by one or two capitalized words.
pub static SAINT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:St\.?|Saint)\s+[A-Z][a-z]+(?:\s[A-Z][a-z]+)?\b").unwrap()
});

/// One or two consecutive capitalized words ("Pune", "New York").
pub static CAPITALIZED_PHRASE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z][a-z]+(?:\s[A-Z][a-z]+)?\b").unwrap());

/// Bare two or three letter all-caps tokens ("MN", "NSW").
pub static SHORT_CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b[A-Z]{2,3}\b").unwrap());

/// Check whether a single word is postal noise (case-insensitive) or a bare number.
pub fn is_junk_word(word: &str) -> bool {
    if !word.is_empty() && word.chars().all(|c| c.is_ascii_digit()) {
        return true;
    }
    JUNK_WORD_SET.contains(word.to_lowercase().as_str())
}

/// Check whether a rejoined phrase is exactly one of the junk phrases.
pub fn is_junk_phrase(phrase: &str) -> bool {
    JUNK_PHRASE_SET.contains(phrase.to_lowercase().as_str())
}

/// Check whether an all-caps token is one of the ignored form labels.
pub fn is_ignored_code(code: &str) -> bool {
    IGNORED_CODES.contains(&code)
}
