//! Place to country resolution.
//!
//! Each candidate place is looked up by a normalized key (trimmed,
//! lowercased) in a [`CountryLookup`] backend. The place string as extracted
//! stays the key everywhere else. Lookups for one group run in parallel and
//! are joined before the group is scored.
//!
//! A backend failure for one place is logged and treated as "no countries";
//! it never aborts the group.

mod csv_table;
mod memory;
mod sqlite;

use std::sync::Arc;

use anyhow::Result;
use log::{debug, warn};
use rayon::prelude::*;

use crate::extraction::PlaceSet;

pub use csv_table::CsvCountryTable;
pub use memory::InMemoryLookup;
pub use sqlite::SqliteCountryTable;

/// Source of place name to country associations.
///
/// `name` is already normalized with [`normalize_for_lookup`]; implementors
/// match it exactly against their own lowercased names and return countries
/// in their stored order, duplicates included.
pub trait CountryLookup: Send + Sync {
    fn countries_for(&self, name: &str) -> Result<Vec<String>>;
}

/// Build the lookup key for a place: trimmed and lowercased.
pub fn normalize_for_lookup(place: &str) -> String {
    place.trim().to_lowercase()
}

/// Candidate countries for every place of a group, in the group's place order.
///
/// Places the lookup knows nothing about, or failed on, are kept with an
/// empty list. Failures are also recorded as messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceCountries {
    entries: Vec<(String, Vec<String>)>,
    errors: Vec<String>,
}

impl PlaceCountries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, place: impl Into<String>, countries: Vec<String>) {
        self.entries.push((place.into(), countries));
    }

    pub fn get(&self, place: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(p, _)| p == place)
            .map(|(_, countries)| countries.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(place, countries)| (place.as_str(), countries.as_slice()))
    }

    /// Places with at least one candidate country.
    pub fn resolved(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.iter().filter(|(_, countries)| !countries.is_empty())
    }

    /// Lookup failures, one message per failed place.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<P: Into<String>> FromIterator<(P, Vec<String>)> for PlaceCountries {
    fn from_iter<I: IntoIterator<Item = (P, Vec<String>)>>(iter: I) -> Self {
        let mut out = PlaceCountries::new();
        for (place, countries) in iter {
            out.push(place, countries);
        }
        out
    }
}

/// Resolves places to candidate countries through an injected lookup.
#[derive(Clone)]
pub struct CountryResolver {
    lookup: Arc<dyn CountryLookup>,
}

impl CountryResolver {
    pub fn new(lookup: Arc<dyn CountryLookup>) -> Self {
        Self { lookup }
    }

    /// Countries associated with `place`, in lookup order. Empty on a miss
    /// or a lookup failure.
    pub fn resolve_countries(&self, place: &str) -> Vec<String> {
        self.try_resolve(place).unwrap_or_default()
    }

    fn try_resolve(&self, place: &str) -> Result<Vec<String>> {
        let key = normalize_for_lookup(place);
        if key.is_empty() {
            return Ok(Vec::new());
        }

        match self.lookup.countries_for(&key) {
            Ok(countries) => {
                debug!("lookup {:?} -> {:?}", key, countries);
                Ok(countries)
            }
            Err(e) => {
                warn!("Country lookup failed for {:?}: {:#}", place, e);
                Err(e)
            }
        }
    }

    /// Resolve every place of a group in parallel.
    pub fn resolve_all(&self, places: &PlaceSet) -> PlaceCountries {
        let outcomes: Vec<(&String, Result<Vec<String>>)> = places
            .as_slice()
            .par_iter()
            .map(|place| (place, self.try_resolve(place)))
            .collect();

        let mut resolved = PlaceCountries::new();
        for (place, outcome) in outcomes {
            match outcome {
                Ok(countries) => resolved.push(place.clone(), countries),
                Err(e) => {
                    resolved.errors.push(format!("{}: {:#}", place, e));
                    resolved.push(place.clone(), Vec::new());
                }
            }
        }
        resolved
    }
}

impl std::fmt::Debug for CountryResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CountryResolver").finish_non_exhaustive()
    }
}
