use std::collections::HashMap;

use anyhow::Result;

use super::{CountryLookup, normalize_for_lookup};

/// Lookup table held in memory, keyed by normalized place name.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLookup {
    table: HashMap<String, Vec<String>>,
    rows: usize,
}

impl InMemoryLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one `name -> country` association. Repeated rows are kept, in
    /// insertion order, the way a database table would return them.
    pub fn insert(&mut self, name: &str, country: impl Into<String>) {
        self.table
            .entry(normalize_for_lookup(name))
            .or_default()
            .push(country.into());
        self.rows += 1;
    }

    /// Number of distinct place names.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Number of associations inserted.
    pub fn row_count(&self) -> usize {
        self.rows
    }
}

impl CountryLookup for InMemoryLookup {
    fn countries_for(&self, name: &str) -> Result<Vec<String>> {
        Ok(self.table.get(name).cloned().unwrap_or_default())
    }
}
