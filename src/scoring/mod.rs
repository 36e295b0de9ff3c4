//! Group-wide country scoring and per-place disambiguation.
//!
//! Scoring runs in three passes over one group's resolved places:
//! 1. Every occurrence of a country in any candidate list adds one to that
//!    country's group score (a list naming a country twice counts twice).
//! 2. Each place gets the candidate country with the highest group score.
//! 3. The group's countries are the distinct chosen countries.
//!
//! Places with no candidate countries take part in none of the passes.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use clap::ValueEnum;
use serde::Serialize;

use crate::resolver::PlaceCountries;

/// How to choose between candidate countries with equal group scores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TieBreak {
    /// Keep the candidate the lookup listed first.
    #[default]
    FirstListed,
    /// Keep the lexicographically smallest candidate.
    Alphabetical,
}

impl fmt::Display for TieBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TieBreak::FirstListed => write!(f, "first-listed"),
            TieBreak::Alphabetical => write!(f, "alphabetical"),
        }
    }
}

/// Country name to occurrence count across a group.
pub type CountryScores = HashMap<String, usize>;

/// Outcome of scoring one group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregation {
    /// Chosen country per resolved place.
    pub place_to_country: BTreeMap<String, String>,
    /// Distinct chosen countries, in the order places were resolved.
    pub countries: Vec<String>,
    /// Group-wide country scores the choices were based on.
    pub scores: CountryScores,
}

/// Count every country occurrence over all non-empty candidate lists.
pub fn score_countries(place_countries: &PlaceCountries) -> CountryScores {
    let mut scores = CountryScores::new();
    for (_, countries) in place_countries.resolved() {
        for country in countries {
            *scores.entry(country.clone()).or_insert(0) += 1;
        }
    }
    scores
}

/// Pick the best-scored country among `candidates`.
///
/// Returns `None` only for an empty candidate list.
pub fn select_country<'a>(
    candidates: &'a [String],
    scores: &CountryScores,
    tie_break: TieBreak,
) -> Option<&'a str> {
    let score_of = |country: &str| scores.get(country).copied().unwrap_or(0);
    let (first, rest) = candidates.split_first()?;

    let mut best = first.as_str();
    let mut best_score = score_of(best);
    for candidate in rest {
        let score = score_of(candidate);
        let better = match tie_break {
            TieBreak::FirstListed => score > best_score,
            TieBreak::Alphabetical => {
                score > best_score || (score == best_score && candidate.as_str() < best)
            }
        };
        if better {
            best = candidate;
            best_score = score;
        }
    }
    Some(best)
}

/// Score a group and choose one country per resolved place.
pub fn aggregate(place_countries: &PlaceCountries, tie_break: TieBreak) -> Aggregation {
    let scores = score_countries(place_countries);

    let mut place_to_country = BTreeMap::new();
    let mut countries = Vec::new();
    let mut seen = HashSet::new();

    for (place, candidates) in place_countries.resolved() {
        let Some(best) = select_country(candidates, &scores, tie_break) else {
            continue;
        };
        if seen.insert(best.to_string()) {
            countries.push(best.to_string());
        }
        place_to_country.insert(place.to_string(), best.to_string());
    }

    Aggregation {
        place_to_country,
        countries,
        scores,
    }
}
