//! One analysis run: histogram, estimate and statistics bundled for reporting

use crate::config::ConfigError;
use crate::estimator::{EstimatorConfig, TimezoneEstimate, TimezoneEstimator};
use crate::histogram::ActivityHistogram;
use crate::ingest::EventLog;
use crate::stats::ActivityStats;

/// Everything the report writers need
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    pub config: EstimatorConfig,
    pub histogram: ActivityHistogram,
    pub estimate: TimezoneEstimate,
    pub stats: ActivityStats,
}

/// Runs the estimator and statistics over an input
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    estimator: TimezoneEstimator,
}

impl Analyzer {
    pub fn new(config: EstimatorConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            estimator: TimezoneEstimator::new(config)?,
        })
    }

    /// Analyze raw events
    pub fn analyze_events(&self, events: &EventLog) -> AnalysisReport {
        if events.is_empty() {
            tracing::warn!("No events to analyze; the estimate is meaningless");
        }

        let histogram = ActivityHistogram::from_events(events);
        self.report(histogram, ActivityStats::from_events(events))
    }

    /// Analyze a pre-built hourly histogram
    pub fn analyze_histogram(&self, histogram: ActivityHistogram) -> AnalysisReport {
        if histogram.total() == 0 {
            tracing::warn!("Histogram is empty; the estimate is meaningless");
        }

        self.report(histogram, ActivityStats::from_histogram(&histogram))
    }

    fn report(&self, histogram: ActivityHistogram, stats: ActivityStats) -> AnalysisReport {
        AnalysisReport {
            config: *self.estimator.config(),
            estimate: self.estimator.estimate(&histogram),
            histogram,
            stats,
        }
    }
}
