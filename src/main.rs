use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use indicatif_log_bridge::LogWrapper;
use log::{info, warn};
use regex::RegexBuilder;
use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use placeinfer::cli::{Cli, OutputFormat};
use placeinfer::extraction::{NoopTagger, PlaceExtractor};
use placeinfer::models::{
    ExtraData, GroupResult, Header, OUTPUT_FORMAT_VERSION, Output, SystemEnvironment,
};
use placeinfer::resolver::{CountryLookup, CountryResolver, CsvCountryTable, SqliteCountryTable};
use placeinfer::source::{AddressReader, ReaderOptions, group_addresses};
use placeinfer::Pipeline;

const SQLITE_EXTENSIONS: &[&str] = &["db", "sqlite", "sqlite3"];

fn main() -> std::io::Result<()> {
    if let Err(err) = run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let multi = init_logging();
    let start_time = Utc::now();

    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure worker threads")?;
    }

    let rows = AddressReader::new(reader_options(&cli)?).read_path(Path::new(&cli.input))?;
    let groups = group_addresses(rows);
    info!(
        "Read {} groups ({} addresses) from {}",
        groups.len(),
        groups.iter().map(|g| g.addresses.len()).sum::<usize>(),
        cli.input
    );

    let lookup = open_lookup(Path::new(&cli.lookup))?;
    let extractor = if cli.no_tagger {
        PlaceExtractor::new(Arc::new(NoopTagger))
    } else {
        PlaceExtractor::default()
    };
    let pipeline = Pipeline::new(extractor, CountryResolver::new(lookup), cli.tie_break);

    let progress_bar = multi.add(create_progress_bar(groups.len()));
    let results = match cli.format {
        OutputFormat::Json => {
            let results = pipeline.process(&groups, &progress_bar, |_| {});
            progress_bar.finish_with_message("Done");
            let output = create_output(start_time, Utc::now(), &pipeline, results);
            write_output(&cli.output, &output)?;
            output.groups
        }
        OutputFormat::JsonLines => {
            let writer = Mutex::new(open_writer(&cli.output)?);
            let write_errors = Mutex::new(Vec::new());
            let results = pipeline.process(&groups, &progress_bar, |result| {
                if let Err(e) = write_line(&writer, result) {
                    warn!("Failed to write group {}: {}", result.group_id, e);
                    if let Ok(mut errors) = write_errors.lock() {
                        errors.push(e);
                    }
                }
            });
            progress_bar.finish_with_message("Done");

            let mut writer = writer
                .into_inner()
                .map_err(|_| anyhow::anyhow!("Output writer poisoned"))?;
            writer.flush().context("Failed to flush output")?;
            let write_errors = write_errors.into_inner().unwrap_or_default();
            if let Some(e) = write_errors.into_iter().next() {
                return Err(e).context(format!("Failed to write {}", cli.output));
            }
            results
        }
    };

    let resolved = results.iter().filter(|r| !r.countries.is_empty()).count();
    info!(
        "Resolved countries for {} of {} groups; output written to {}",
        resolved,
        results.len(),
        cli.output
    );
    Ok(())
}

/// Route `log` output through the progress bar so the two do not interleave.
fn init_logging() -> MultiProgress {
    let multi = MultiProgress::new();
    let logger = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .build();
    let level = logger.filter();
    if LogWrapper::new(multi.clone(), logger).try_init().is_ok() {
        log::set_max_level(level);
    }
    multi
}

fn reader_options(cli: &Cli) -> Result<ReaderOptions> {
    let filter = cli
        .filter
        .as_deref()
        .map(|pattern| {
            RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .with_context(|| format!("Invalid --filter pattern {:?}", pattern))
        })
        .transpose()?;

    Ok(ReaderOptions {
        group_column: cli.group_column.clone(),
        address_column: cli.address_column.clone(),
        filter,
        offset: cli.offset,
        limit: cli.limit,
    })
}

fn open_lookup(path: &Path) -> Result<Arc<dyn CountryLookup>> {
    let is_sqlite = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SQLITE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()));

    if is_sqlite {
        let table = SqliteCountryTable::open(path)?;
        info!("Using SQLite lookup table {}", path.display());
        Ok(Arc::new(table))
    } else {
        let table = CsvCountryTable::from_path(path)?;
        info!(
            "Loaded {} place names from lookup table {}",
            table.len(),
            path.display()
        );
        if table.is_empty() {
            warn!("Lookup table {} is empty; no countries will resolve", path.display());
        }
        Ok(Arc::new(table))
    }
}

fn create_progress_bar(total_groups: usize) -> ProgressBar {
    let progress_bar = ProgressBar::new(total_groups as u64);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} groups processed ({eta})")
            .expect("Failed to create progress bar style")
            .progress_chars("#>-"),
    );
    progress_bar
}

fn create_output(
    start_time: chrono::DateTime<Utc>,
    end_time: chrono::DateTime<Utc>,
    pipeline: &Pipeline,
    results: Vec<GroupResult>,
) -> Output {
    let duration = (end_time - start_time).num_nanoseconds().unwrap_or(0) as f64 / 1_000_000_000.0;

    let system_environment = SystemEnvironment {
        operating_system: sys_info::os_type().ok(),
        cpu_architecture: env::consts::ARCH.to_string(),
        platform: format!(
            "{}-{}-{}",
            sys_info::os_type().unwrap_or_else(|_| "unknown".to_string()),
            sys_info::os_release().unwrap_or_else(|_| "unknown".to_string()),
            env::consts::ARCH
        ),
        rust_version: rustc_version_runtime::version().to_string(),
    };

    // Collect lookup errors from individual groups
    let errors: Vec<String> = results
        .iter()
        .flat_map(|result| {
            result
                .lookup_errors
                .iter()
                .map(|error| format!("{}: {}", result.group_id, error))
        })
        .collect();

    Output {
        headers: vec![Header {
            start_timestamp: start_time.to_rfc3339(),
            end_timestamp: end_time.to_rfc3339(),
            duration,
            tagger: pipeline.extractor().tagger_name().to_string(),
            tie_break: pipeline.tie_break(),
            extra_data: ExtraData::from_groups(&results, system_environment),
            errors,
            output_format_version: OUTPUT_FORMAT_VERSION.to_string(),
        }],
        groups: results,
    }
}

fn open_writer(output_file: &str) -> Result<Box<dyn Write + Send>> {
    if output_file == "-" {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    let file = File::create(output_file)
        .with_context(|| format!("Failed to create output file {}", output_file))?;
    Ok(Box::new(BufWriter::new(file)))
}

fn write_output(output_file: &str, output: &Output) -> Result<()> {
    let json_output = serde_json::to_string_pretty(output)?;
    let mut writer = open_writer(output_file)?;
    writer.write_all(json_output.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

fn write_line(writer: &Mutex<Box<dyn Write + Send>>, result: &GroupResult) -> Result<()> {
    let line = serde_json::to_string(result)?;
    let mut writer = writer
        .lock()
        .map_err(|_| anyhow::anyhow!("Output writer poisoned"))?;
    writeln!(writer, "{}", line)?;
    Ok(())
}
