//! CLI argument parsing for tzsleuth

use crate::config::AnalysisConfig;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Format of the report printed to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text report (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// CSV hourly histogram for spreadsheet analysis
    Csv,
    /// Self-contained HTML report
    Html,
}

#[derive(Parser, Debug)]
#[command(name = "tzsleuth")]
#[command(version)]
#[command(about = "Infer a likely UTC offset from the quietest hours of UTC-timestamped activity", long_about = None)]
pub struct Cli {
    /// Timestamps JSON file ({"timestamps": [unix seconds, ...]}), mutually exclusive with --counts
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Analyze a 24-bucket hourly histogram instead (comma separated, UTC hour 0 first)
    #[arg(long = "counts", value_name = "C0,...,C23", value_delimiter = ',')]
    pub counts: Option<Vec<u64>>,

    /// TOML configuration file
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write all report artifacts (text, JSON, CSV, HTML) into this directory
    #[arg(short = 'o', long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Format of the report printed to stdout
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Length of the low-activity window in hours (default: 6)
    #[arg(long = "window-hours", value_name = "HOURS")]
    pub window_hours: Option<u32>,

    /// Local hour assumed to be the middle of the night (default: 4)
    #[arg(long = "sleep-center-hour", value_name = "HOUR")]
    pub sleep_center_hour: Option<u32>,

    /// Log progress to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Enable trace-level debug logging to stderr
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Layer command-line overrides on top of file (or default) configuration
    pub fn apply_overrides(&self, mut config: AnalysisConfig) -> AnalysisConfig {
        if let Some(hours) = self.window_hours {
            config.estimator.window_length_hours = hours;
        }
        if let Some(hour) = self.sleep_center_hour {
            config.estimator.assumed_local_sleep_center_hour = hour;
        }
        if let Some(dir) = &self.output_dir {
            config.output.directory = Some(dir.clone());
        }
        config
    }
}
