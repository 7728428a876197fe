//! Configuration for the perfagg command - loaded from YAML

use anyhow::Context;
use perfagg_query::StatsOperation;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::Level;

/// Complete configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PerfaggConfig {
    /// How rows are read and reduced
    pub aggregation: AggregationSettings,
    /// How results are printed
    pub output: OutputSettings,
    /// Logging configuration
    pub logging: LoggingSettings,
}

/// Aggregation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationSettings {
    /// Reduction: "sum", "count", "avg", "std"
    pub operation: StatsOperation,
    /// Name of the perfdata column, reported in logs
    pub column: String,
    /// Field holding the perfdata in delimited input (None = whole line)
    pub field: Option<usize>,
    /// Field delimiter for delimited input
    pub delimiter: char,
}

impl Default for AggregationSettings {
    fn default() -> Self {
        Self {
            operation: StatsOperation::Avg,
            column: "perf_data".to_string(),
            field: None,
            delimiter: '\t',
        }
    }
}

/// Result output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One `name<TAB>value` line per metric
    #[default]
    Table,
    /// A single Livestatus-style perfdata string
    Perfdata,
}

/// Output settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub format: OutputFormat,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level: "trace", "debug", "info", "warn", "error"
    pub level: String,
    /// Include target in logs
    pub show_target: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            show_target: false,
        }
    }
}

impl PerfaggConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: PerfaggConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise use the defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Write default config to a file (for generating example config)
    pub fn write_default(path: impl AsRef<Path>) -> anyhow::Result<()> {
        let yaml = serde_yaml::to_string(&Self::default())?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Get log level
    pub fn log_level(&self) -> Level {
        match self.logging.level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "error" => Level::ERROR,
            _ => Level::WARN,
        }
    }
}
