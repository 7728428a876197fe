//! PerfAgg CLI
//!
//! Aggregates performance data read line by line, each line being one row.
//!
//! ## Usage
//!
//! ```bash
//! # Average of every metric, whole line is the perfdata
//! perfagg --op avg perfdata.txt
//!
//! # Livestatus style request over the third tab separated field
//! perfagg --stats "Stats: std perf_data" --field 2 services.tsv
//!
//! # Read from stdin, print a single perfdata string
//! cat perfdata.txt | perfagg --op sum --format perfdata
//!
//! # Write the default config
//! perfagg --generate-config
//! ```

mod config;
mod input;

use anyhow::{Context, Result};
use clap::Parser;
use config::{OutputFormat, PerfaggConfig};
use input::{aggregate_lines, LineColumn};
use perfagg_query::{MetricResult, PerfdataStringSink, StatsOperation, StatsSpec};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "perfagg")]
#[command(author, version, about = "Aggregate monitoring performance data per metric name")]
struct Cli {
    /// Path to config file
    #[arg(short, long, default_value = "perfagg.yml")]
    config: PathBuf,

    /// Reduction to apply: sum, count, avg, std
    #[arg(short, long)]
    op: Option<StatsOperation>,

    /// Livestatus header, e.g. "Stats: avg perf_data" (overrides --op)
    #[arg(long)]
    stats: Option<String>,

    /// Field (0-based) holding the perfdata; the whole line when absent
    #[arg(short, long)]
    field: Option<usize>,

    /// Field delimiter
    #[arg(short, long)]
    delimiter: Option<char>,

    /// Output format
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Write the default config to --config and exit
    #[arg(long)]
    generate_config: bool,

    /// Input file (stdin when absent)
    file: Option<PathBuf>,
}

impl Cli {
    /// Apply command line overrides on top of the loaded config
    fn apply(&self, config: &mut PerfaggConfig) -> Result<()> {
        if let Some(op) = self.op {
            config.aggregation.operation = op;
        }
        if let Some(ref header) = self.stats {
            let spec = StatsSpec::parse(header).context("Invalid --stats header")?;
            config.aggregation.operation = spec.operation;
            config.aggregation.column = spec.column;
        }
        if self.field.is_some() {
            config.aggregation.field = self.field;
        }
        if let Some(delimiter) = self.delimiter {
            config.aggregation.delimiter = delimiter;
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }
        Ok(())
    }
}

fn init_logging(config: &PerfaggConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level().as_str().to_lowercase()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.logging.show_target)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.generate_config {
        PerfaggConfig::write_default(&cli.config)
            .with_context(|| format!("Failed to write {}", cli.config.display()))?;
        println!("Default config written to {}", cli.config.display());
        return Ok(());
    }

    let mut config = PerfaggConfig::load_or_default(&cli.config)?;
    cli.apply(&mut config)?;
    init_logging(&config);

    let operation = config.aggregation.operation;
    let column = LineColumn::new(config.aggregation.field, config.aggregation.delimiter);
    info!(
        "Aggregating {} with {} ({:?})",
        config.aggregation.column, operation, column
    );

    let start = Instant::now();
    let agg = match cli.file {
        Some(ref path) => {
            let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
            aggregate_lines(BufReader::new(file), column, operation)
                .with_context(|| format!("Failed to read {}", path.display()))?
        }
        None => aggregate_lines(io::stdin().lock(), column, operation).context("Failed to read stdin")?,
    };

    info!(
        "Consumed {} rows, {} metrics, {} malformed entries in {:.2}ms",
        agg.rows_consumed(),
        agg.len(),
        agg.tokens_rejected(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    match config.output.format {
        OutputFormat::Table => {
            let mut results: Vec<MetricResult> = Vec::new();
            agg.emit(&mut results);
            for result in &results {
                println!("{}\t{}", result.name, result.value);
            }
        }
        OutputFormat::Perfdata => {
            let mut sink = PerfdataStringSink::new();
            agg.emit(&mut sink);
            println!("{}", sink.as_str());
        }
    }

    debug!(operation = %operation, "Done");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("perfagg").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_overrides_config() {
        let cli = parse(&["--op", "sum", "--field", "3", "-d", ";", "--format", "perfdata"]);
        let mut config = PerfaggConfig::default();
        cli.apply(&mut config).unwrap();

        assert_eq!(config.aggregation.operation, StatsOperation::Sum);
        assert_eq!(config.aggregation.field, Some(3));
        assert_eq!(config.aggregation.delimiter, ';');
        assert_eq!(config.output.format, OutputFormat::Perfdata);
    }

    #[test]
    fn test_stats_header_overrides_op() {
        let cli = parse(&["--op", "sum", "--stats", "Stats: std service_perf_data"]);
        let mut config = PerfaggConfig::default();
        cli.apply(&mut config).unwrap();

        assert_eq!(config.aggregation.operation, StatsOperation::Std);
        assert_eq!(config.aggregation.column, "service_perf_data");
    }

    #[test]
    fn test_invalid_stats_header() {
        let cli = parse(&["--stats", "Stats: max perf_data"]);
        let mut config = PerfaggConfig::default();
        assert!(cli.apply(&mut config).is_err());
    }

    #[test]
    fn test_invalid_op_rejected_by_parser() {
        let result = Cli::try_parse_from(["perfagg", "--op", "median"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_no_overrides_keeps_config() {
        let cli = parse(&["input.txt"]);
        let mut config = PerfaggConfig::default();
        cli.apply(&mut config).unwrap();

        assert_eq!(config.aggregation.operation, StatsOperation::Avg);
        assert_eq!(cli.file, Some(PathBuf::from("input.txt")));
    }
}
