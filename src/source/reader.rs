//! CSV address source.
//!
//! Reads rows from a headered CSV file, keeps those whose address matches an
//! optional filter, then applies an offset/limit window to the kept rows.
//! A source that cannot be opened or lacks the required columns is a fatal
//! error; individual unreadable rows are skipped.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use csv::ReaderBuilder;
use log::warn;
use regex::Regex;

use super::AddressRow;

pub const DEFAULT_GROUP_COLUMN: &str = "domainid";
pub const DEFAULT_ADDRESS_COLUMN: &str = "fulladdress";

/// Column selection and windowing for an [`AddressReader`].
#[derive(Debug, Clone)]
pub struct ReaderOptions {
    pub group_column: String,
    pub address_column: String,
    /// Keep only addresses matching this pattern.
    pub filter: Option<Regex>,
    /// Number of kept rows to skip.
    pub offset: usize,
    /// Maximum number of rows to return after the offset.
    pub limit: Option<usize>,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            group_column: DEFAULT_GROUP_COLUMN.to_string(),
            address_column: DEFAULT_ADDRESS_COLUMN.to_string(),
            filter: None,
            offset: 0,
            limit: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AddressReader {
    options: ReaderOptions,
}

impl AddressReader {
    pub fn new(options: ReaderOptions) -> Self {
        Self { options }
    }

    pub fn read_path(&self, path: &Path) -> Result<Vec<AddressRow>> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open address source {}", path.display()))?;
        self.read(file)
            .with_context(|| format!("Failed to read address source {}", path.display()))
    }

    pub fn read<R: Read>(&self, reader: R) -> Result<Vec<AddressRow>> {
        let opts = &self.options;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let column = |wanted: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(wanted))
                .ok_or_else(|| anyhow!("Missing '{}' column in address source", wanted))
        };
        let group_idx = column(opts.group_column.as_str())?;
        let address_idx = column(opts.address_column.as_str())?;

        let limit = opts.limit.unwrap_or(usize::MAX);
        let mut matched = 0usize;
        let mut rows = Vec::new();

        for (line, result) in reader.records().enumerate() {
            if rows.len() >= limit {
                break;
            }
            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    warn!("Skipping unreadable address row {}: {}", line + 2, e);
                    continue;
                }
            };

            let group_id = record.get(group_idx).map(str::trim).unwrap_or_default();
            if group_id.is_empty() {
                warn!("Skipping address row {} without a group id", line + 2);
                continue;
            }
            let address = record.get(address_idx).unwrap_or_default();

            if let Some(filter) = &opts.filter
                && !filter.is_match(address)
            {
                continue;
            }

            matched += 1;
            if matched <= opts.offset {
                continue;
            }
            rows.push(AddressRow::new(group_id, address));
        }

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use regex::RegexBuilder;

    use super::*;

    const DATA: &str = "\
domainid,fulladdress
d1,\"123 Main St, Pune, Maharashtra, India\"
d2,Delhi
d2,\"Delhi, Ontario\"
,Orphan Street
d3,\"10 Rue de Rivoli, Paris, France\"
d1,\"Mumbai, INDIA\"
";

    fn read(options: ReaderOptions) -> Vec<AddressRow> {
        AddressReader::new(options).read(DATA.as_bytes()).unwrap()
    }

    #[test]
    fn test_reads_all_rows_with_group_ids() {
        let rows = read(ReaderOptions::default());
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0], AddressRow::new("d1", "123 Main St, Pune, Maharashtra, India"));
        assert_eq!(rows[2], AddressRow::new("d2", "Delhi, Ontario"));
    }

    #[test]
    fn test_filter_is_applied_before_window() {
        let filter = RegexBuilder::new("india")
            .case_insensitive(true)
            .build()
            .unwrap();
        let rows = read(ReaderOptions {
            filter: Some(filter),
            offset: 1,
            ..ReaderOptions::default()
        });
        assert_eq!(rows, vec![AddressRow::new("d1", "Mumbai, INDIA")]);
    }

    #[test]
    fn test_offset_and_limit() {
        let rows = read(ReaderOptions {
            offset: 1,
            limit: Some(2),
            ..ReaderOptions::default()
        });
        let addresses: Vec<&str> = rows.iter().map(|r| r.address.as_str()).collect();
        assert_eq!(addresses, vec!["Delhi", "Delhi, Ontario"]);
    }

    #[test]
    fn test_custom_columns() {
        let data = "id,address,extra\n7,Pune,x\n";
        let rows = AddressReader::new(ReaderOptions {
            group_column: "ID".to_string(),
            address_column: "address".to_string(),
            ..ReaderOptions::default()
        })
        .read(data.as_bytes())
        .unwrap();
        assert_eq!(rows, vec![AddressRow::new("7", "Pune")]);
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let err = AddressReader::default()
            .read("id,address\n1,Pune\n".as_bytes())
            .unwrap_err();
        assert!(err.to_string().contains("domainid"), "{err}");
    }

    #[test]
    fn test_missing_file_is_fatal() {
        assert!(
            AddressReader::default()
                .read_path(Path::new("/nonexistent/addresses.csv"))
                .is_err()
        );
    }
}
