//! CSV-backed country lookup.
//!
//! Loads a `name,country` table (header row required, extra columns
//! ignored) into memory once. Rows with an empty name or country are
//! skipped with a warning.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use csv::ReaderBuilder;
use log::warn;

use super::{CountryLookup, InMemoryLookup};

const NAME_COLUMN: &str = "name";
const COUNTRY_COLUMN: &str = "country";

#[derive(Debug, Clone)]
pub struct CsvCountryTable {
    table: InMemoryLookup,
}

impl CsvCountryTable {
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open lookup table {}", path.display()))?;
        Self::from_reader(file).with_context(|| format!("Failed to load {}", path.display()))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let column = |wanted: &str| {
            headers
                .iter()
                .position(|h| h.eq_ignore_ascii_case(wanted))
                .ok_or_else(|| anyhow!("Missing '{}' column in lookup table", wanted))
        };
        let name_idx = column(NAME_COLUMN)?;
        let country_idx = column(COUNTRY_COLUMN)?;

        let mut table = InMemoryLookup::new();
        for (line, result) in reader.records().enumerate() {
            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    warn!("Skipping unreadable lookup row {}: {}", line + 2, e);
                    continue;
                }
            };
            match (record.get(name_idx), record.get(country_idx)) {
                (Some(name), Some(country)) if !name.is_empty() && !country.is_empty() => {
                    table.insert(name, country);
                }
                _ => warn!("Skipping incomplete lookup row {}", line + 2),
            }
        }

        Ok(Self { table })
    }

    /// Number of distinct place names loaded.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl CountryLookup for CsvCountryTable {
    fn countries_for(&self, name: &str) -> Result<Vec<String>> {
        self.table.countries_for(name)
    }
}
