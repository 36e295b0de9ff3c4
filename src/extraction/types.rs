//! Core types for place extraction.

use std::collections::HashSet;

use serde::{Serialize, Serializer};

/// An insertion-ordered set of place candidates.
///
/// Deduplication is exact and case-sensitive: "Pune" and "pune" are two
/// entries. Iteration yields candidates in the order they were first seen,
/// which keeps group results reproducible across runs.
#[derive(Debug, Clone, Default)]
pub struct PlaceSet {
    order: Vec<String>,
    seen: HashSet<String>,
}

impl PlaceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a candidate. Returns `false` if it was already present.
    pub fn insert(&mut self, place: impl Into<String>) -> bool {
        let place = place.into();
        if self.seen.contains(&place) {
            return false;
        }
        self.seen.insert(place.clone());
        self.order.push(place);
        true
    }

    pub fn contains(&self, place: &str) -> bool {
        self.seen.contains(place)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.order.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.order
    }

    pub fn into_vec(self) -> Vec<String> {
        self.order
    }
}

impl PartialEq for PlaceSet {
    fn eq(&self, other: &Self) -> bool {
        self.order == other.order
    }
}

impl Eq for PlaceSet {}

impl<S: Into<String>> Extend<S> for PlaceSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for place in iter {
            self.insert(place);
        }
    }
}

impl<S: Into<String>> FromIterator<S> for PlaceSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = PlaceSet::new();
        set.extend(iter);
        set
    }
}

impl<'a> IntoIterator for &'a PlaceSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.order.iter()
    }
}

impl IntoIterator for PlaceSet {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.order.into_iter()
    }
}

impl Serialize for PlaceSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.order.serialize(serializer)
    }
}
