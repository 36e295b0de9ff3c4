use clap::{Parser, ValueEnum};

use crate::scoring::TieBreak;
use crate::source::{DEFAULT_ADDRESS_COLUMN, DEFAULT_GROUP_COLUMN};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// CSV file of addresses, one (group id, address) pair per row
    pub input: String,

    /// Place to country lookup table (.csv, or .db/.sqlite/.sqlite3 for SQLite)
    #[arg(short, long)]
    pub lookup: String,

    /// Output file path ("-" writes to stdout)
    #[arg(default_value = "output.json", short, long)]
    pub output: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Name of the group id column in the input
    #[arg(long, default_value = DEFAULT_GROUP_COLUMN)]
    pub group_column: String,

    /// Name of the address column in the input
    #[arg(long, default_value = DEFAULT_ADDRESS_COLUMN)]
    pub address_column: String,

    /// Only process addresses matching this regex (case-insensitive)
    #[arg(long)]
    pub filter: Option<String>,

    /// Number of matching input rows to skip
    #[arg(long, default_value = "0")]
    pub offset: usize,

    /// Maximum number of input rows to process after the offset
    #[arg(long)]
    pub limit: Option<usize>,

    /// How to choose between equally scored countries for a place
    #[arg(long, value_enum, default_value_t = TieBreak::FirstListed)]
    pub tie_break: TieBreak,

    /// Disable the built-in place tagger and rely on fallback patterns only
    #[arg(long)]
    pub no_tagger: bool,

    /// Number of worker threads (0 uses all available cores)
    #[arg(short = 'j', long, default_value = "0")]
    pub threads: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty JSON document with a run header
    Json,
    /// One JSON record per group, written as each group completes
    JsonLines,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["placeinfer", "addresses.csv", "-l", "places.csv"]).unwrap();
        assert_eq!(cli.output, "output.json");
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.group_column, "domainid");
        assert_eq!(cli.address_column, "fulladdress");
        assert_eq!(cli.tie_break, TieBreak::FirstListed);
        assert_eq!(cli.offset, 0);
        assert!(cli.limit.is_none());
        assert!(!cli.no_tagger);
    }

    #[test]
    fn test_all_options() {
        let cli = Cli::try_parse_from([
            "placeinfer",
            "in.csv",
            "--lookup",
            "places.db",
            "-o",
            "-",
            "--format",
            "json-lines",
            "--filter",
            "india",
            "--offset",
            "200",
            "--limit",
            "10",
            "--tie-break",
            "alphabetical",
            "--no-tagger",
            "-j",
            "4",
        ])
        .unwrap();
        assert_eq!(cli.output, "-");
        assert_eq!(cli.format, OutputFormat::JsonLines);
        assert_eq!(cli.filter.as_deref(), Some("india"));
        assert_eq!(cli.offset, 200);
        assert_eq!(cli.limit, Some(10));
        assert_eq!(cli.tie_break, TieBreak::Alphabetical);
        assert!(cli.no_tagger);
        assert_eq!(cli.threads, 4);
    }

    #[test]
    fn test_lookup_is_required() {
        assert!(Cli::try_parse_from(["placeinfer", "in.csv"]).is_err());
    }
}
