//! Address text preparation.
//!
//! Normalizes a raw address before place extraction:
//! - `#` removal (unit/house number markers)
//! - `St` / `St.` expansion to `Saint` when a capitalized word follows
//! - Whitespace collapsing and trimming
//!
//! The result is stable under repeated application.

use std::sync::LazyLock;

use regex::Regex;

/// Abbreviated saint prefix with its trailing whitespace. Whether a
/// capitalized word follows is checked separately so that back-to-back
/// prefixes ("St St Paul") are both expanded.
static SAINT_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b[Ss][Tt]\.?\s+").unwrap());

/// Runs of whitespace of any kind.
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Prepare a raw `address` for place extraction.
pub fn normalize(address: &str) -> String {
    let s = address.replace('#', "");
    let s = expand_saint_prefixes(&s);
    let s = WHITESPACE_RE.replace_all(&s, " ");
    s.trim().to_string()
}

fn expand_saint_prefixes(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    let mut last = 0;

    for m in SAINT_PREFIX_RE.find_iter(text) {
        let followed_by_capital = text[m.end()..]
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_uppercase());
        if !followed_by_capital {
            continue;
        }
        out.push_str(&text[last..m.start()]);
        out.push_str("Saint ");
        last = m.end();
    }

    out.push_str(&text[last..]);
    out
}
