//! Sleep-window timezone estimation
//!
//! The quietest contiguous stretch of a day profile is taken to be the
//! subject's night. Its midpoint, in UTC, is compared against the hour at
//! which people are assumed to be most deeply asleep locally (04:00 by
//! default) to derive an offset from UTC.
//!
//! # Example
//! ```
//! use tzsleuth::estimator::TimezoneEstimator;
//! use tzsleuth::histogram::ActivityHistogram;
//!
//! // Quiet between 01:00 and 06:59 UTC
//! let mut counts = [10u64; 24];
//! for hour in 1..7 {
//!     counts[hour] = 0;
//! }
//!
//! let estimate = TimezoneEstimator::default().estimate(&ActivityHistogram::from(counts));
//! assert_eq!(estimate.sleep_center_utc_hour, 4);
//! assert_eq!(estimate.utc_offset_hours, 0);
//! ```

use crate::config::ConfigError;
use crate::histogram::{ActivityHistogram, HOURS_PER_DAY};
use crate::region::RegionTable;
use serde::{Deserialize, Serialize};

/// Tunable assumptions behind the sleep-window heuristic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EstimatorConfig {
    /// Length of the low-activity window in hours (1..=24)
    pub window_length_hours: u32,

    /// Local hour assumed to sit at the middle of the night (0..=23)
    pub assumed_local_sleep_center_hour: u32,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            window_length_hours: 6,
            assumed_local_sleep_center_hour: 4,
        }
    }
}

impl EstimatorConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=HOURS_PER_DAY as u32).contains(&self.window_length_hours) {
            return Err(ConfigError::InvalidValue {
                field: "window_length_hours",
                reason: format!("must be in [1, 24], got {}", self.window_length_hours),
            });
        }

        if self.assumed_local_sleep_center_hour >= HOURS_PER_DAY as u32 {
            return Err(ConfigError::InvalidValue {
                field: "assumed_local_sleep_center_hour",
                reason: format!(
                    "must be in [0, 23], got {}",
                    self.assumed_local_sleep_center_hour
                ),
            });
        }

        Ok(())
    }
}

/// The least active circular window found in a histogram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SleepWindow {
    /// First UTC hour of the window
    pub start_utc_hour: u32,
    /// Window length in hours
    pub length_hours: u32,
    /// Number of events inside the window
    pub activity: u64,
}

impl SleepWindow {
    /// Midpoint hour of the window in UTC
    pub fn center_utc_hour(&self) -> u32 {
        (self.start_utc_hour + self.length_hours / 2) % HOURS_PER_DAY as u32
    }

    /// Whether a UTC hour falls inside the window (wrapping past midnight)
    pub fn contains(&self, hour: u32) -> bool {
        let hours = HOURS_PER_DAY as u32;
        (hour % hours + hours - self.start_utc_hour) % hours < self.length_hours
    }
}

/// Result of one estimation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimezoneEstimate {
    /// UTC hour judged to be the middle of the subject's night
    pub sleep_center_utc_hour: u32,
    /// Estimated local offset from UTC in whole hours
    pub utc_offset_hours: i32,
    /// Display form of the offset, e.g. `UTC +1:00`
    pub timezone_label: String,
    /// Coarse region guess, or [`crate::region::UNKNOWN_REGION`]
    pub region_label: String,
    /// The quiet window the estimate was derived from
    pub sleep_window: SleepWindow,
}

/// Format an offset the way reports show it (`UTC +5:00`, `UTC -10:00`)
pub fn timezone_label(offset_hours: i32) -> String {
    format!("UTC {:+}:00", offset_hours)
}

/// Fold a raw offset back towards the conventional range.
///
/// Exactly one adjustment of a full day is applied: below -12 gains 24,
/// above 12 loses 24, anything else is returned unchanged.
pub fn normalize_offset(raw_offset: i32) -> i32 {
    if raw_offset < -12 {
        raw_offset + 24
    } else if raw_offset > 12 {
        raw_offset - 24
    } else {
        raw_offset
    }
}

/// Estimates a UTC offset from the quietest stretch of a day profile
#[derive(Debug, Clone)]
pub struct TimezoneEstimator {
    config: EstimatorConfig,
    regions: RegionTable,
}

impl TimezoneEstimator {
    /// Create an estimator, rejecting out-of-range configuration
    pub fn new(config: EstimatorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            regions: RegionTable::standard(),
        })
    }

    /// Use a different region table for labels
    pub fn with_regions(mut self, regions: RegionTable) -> Self {
        self.regions = regions;
        self
    }

    /// Window length and assumed sleep center in use
    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Find the least active circular window.
    ///
    /// Start hours are scanned from 0 upwards and only a strictly smaller
    /// sum replaces the current best, so the earliest window wins ties.
    pub fn quietest_window(&self, histogram: &ActivityHistogram) -> SleepWindow {
        let len = self.config.window_length_hours as usize;

        let mut best_start = 0;
        let mut best_activity = u64::MAX;
        for start in 0..HOURS_PER_DAY {
            let activity = histogram.window_sum(start, len);
            if activity < best_activity {
                best_activity = activity;
                best_start = start;
            }
        }

        SleepWindow {
            start_utc_hour: best_start as u32,
            length_hours: self.config.window_length_hours,
            activity: best_activity,
        }
    }

    /// Offset implied by a given UTC sleep center
    pub fn offset_for_center(&self, sleep_center_utc_hour: u32) -> i32 {
        let raw = self.config.assumed_local_sleep_center_hour as i32 - sleep_center_utc_hour as i32;
        normalize_offset(raw)
    }

    /// Run the full estimate: quiet window, offset, region
    pub fn estimate(&self, histogram: &ActivityHistogram) -> TimezoneEstimate {
        let sleep_window = self.quietest_window(histogram);
        let sleep_center_utc_hour = sleep_window.center_utc_hour();
        let utc_offset_hours = self.offset_for_center(sleep_center_utc_hour);
        let region_label = self.regions.resolve(utc_offset_hours);

        tracing::debug!(
            window_start = sleep_window.start_utc_hour,
            window_activity = sleep_window.activity,
            "Quietest window located"
        );
        tracing::info!(
            sleep_center_utc = sleep_center_utc_hour,
            offset = utc_offset_hours,
            region = region_label,
            "Estimated timezone"
        );

        TimezoneEstimate {
            sleep_center_utc_hour,
            utc_offset_hours,
            timezone_label: timezone_label(utc_offset_hours),
            region_label: region_label.to_string(),
            sleep_window,
        }
    }
}

impl Default for TimezoneEstimator {
    fn default() -> Self {
        Self {
            config: EstimatorConfig::default(),
            regions: RegionTable::standard(),
        }
    }
}
