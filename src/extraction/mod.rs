//! Place extraction module.
//!
//! Pulls candidate place names out of free-form postal addresses using a
//! three-stage pipeline:
//! 1. Text preparation (normalization)
//! 2. Place tagging plus independent fallback patterns
//! 3. Union, edge-punctuation cleanup, and deduplication

mod candidates;
mod patterns;
mod prepare;
mod tagger;
mod types;


use std::sync::{Arc, LazyLock};

use log::debug;

pub use candidates::clean_candidate;
pub use patterns::{is_ignored_code, is_junk_phrase, is_junk_word};
pub use prepare::normalize;
pub use tagger::{HeuristicPlaceTagger, NoopTagger, PlaceTagger};
pub use types::PlaceSet;

static DEFAULT_EXTRACTOR: LazyLock<PlaceExtractor> = LazyLock::new(PlaceExtractor::default);

/// Extract place candidates from `address` with the built-in tagger.
pub fn extract_places(address: &str) -> PlaceSet {
    DEFAULT_EXTRACTOR.extract(address)
}

/// Place extractor bound to a specific [`PlaceTagger`].
#[derive(Clone)]
pub struct PlaceExtractor {
    tagger: Arc<dyn PlaceTagger>,
}

impl Default for PlaceExtractor {
    fn default() -> Self {
        Self::new(Arc::new(HeuristicPlaceTagger))
    }
}

impl std::fmt::Debug for PlaceExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaceExtractor")
            .field("tagger", &self.tagger.name())
            .finish()
    }
}

impl PlaceExtractor {
    pub fn new(tagger: Arc<dyn PlaceTagger>) -> Self {
        Self { tagger }
    }

    pub fn tagger_name(&self) -> &str {
        self.tagger.name()
    }

    /// Extract the deduplicated, cleaned candidate set for one address.
    ///
    /// Tagger results come first, followed by fallback candidates in the
    /// order the patterns found them. An address with nothing place-like in
    /// it yields an empty set.
    pub fn extract(&self, address: &str) -> PlaceSet {
        let cleaned = normalize(address);
        if cleaned.is_empty() {
            return PlaceSet::new();
        }

        let tagged = self.tagger.tag_places(&cleaned);
        let fallback = candidates::collect_fallback_candidates(&cleaned);
        debug!(
            "address {:?}: tagger {} -> {:?}, fallback -> {:?}",
            cleaned,
            self.tagger.name(),
            tagged,
            fallback
        );

        tagged
            .iter()
            .chain(fallback.iter())
            .filter_map(|candidate| clean_candidate(candidate))
            .collect()
    }
}
