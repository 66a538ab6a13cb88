//! JSON output format for analysis results
//!
//! Used for `--format json` and the `estimate.json` artifact.

use crate::analyzer::AnalysisReport;
use crate::estimator::{EstimatorConfig, TimezoneEstimate};
use crate::histogram::HOURS_PER_DAY;
use crate::stats::ActivityStats;
use serde::{Deserialize, Serialize};

/// Format identifier written into every document
pub const JSON_FORMAT: &str = "tzsleuth-json-v1";

/// Root JSON output structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonOutput {
    /// Format version identifier
    pub version: String,
    /// Format name
    pub format: String,
    /// Estimator assumptions used for this run
    pub config: EstimatorConfig,
    /// The timezone estimate
    pub estimate: TimezoneEstimate,
    /// Events per UTC hour
    pub hourly_counts: [u64; HOURS_PER_DAY],
    /// Behavioral statistics (event input only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<ActivityStats>,
}

impl JsonOutput {
    /// Build the document for an analysis
    pub fn from_report(report: &AnalysisReport) -> Self {
        // Histogram input carries no calendar data, only totals
        let stats = report.stats.weekly.is_some().then(|| report.stats.clone());

        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            format: JSON_FORMAT.to_string(),
            config: report.config,
            estimate: report.estimate.clone(),
            hourly_counts: *report.histogram.counts(),
            stats,
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
