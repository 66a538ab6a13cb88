//! Hourly activity histogram
//!
//! A fixed 24-bucket count of events by UTC hour-of-day. Bucket `0` covers
//! 00:00-00:59 UTC, bucket `23` covers 23:00-23:59 UTC.

use crate::ingest::EventLog;
use chrono::Timelike;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of buckets in a day profile
pub const HOURS_PER_DAY: usize = 24;

/// Errors raised while building a histogram from raw counts
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HistogramError {
    #[error("Histogram must have exactly {expected} hourly buckets, got {found}")]
    BucketCount { expected: usize, found: usize },

    #[error("Histogram counts sum past {}", u64::MAX)]
    TotalOverflow,
}

/// Count of events per UTC hour of day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActivityHistogram {
    counts: [u64; HOURS_PER_DAY],
}

impl ActivityHistogram {
    /// Build a histogram from a slice of hourly counts.
    ///
    /// The slice must hold exactly 24 buckets; anything else is rejected
    /// rather than padded or truncated. The buckets must also sum to a `u64`.
    pub fn from_counts(counts: &[u64]) -> Result<Self, HistogramError> {
        let counts: [u64; HOURS_PER_DAY] =
            counts.try_into().map_err(|_| HistogramError::BucketCount {
                expected: HOURS_PER_DAY,
                found: counts.len(),
            })?;
        counts
            .iter()
            .try_fold(0u64, |sum, &count| sum.checked_add(count))
            .ok_or(HistogramError::TotalOverflow)?;
        Ok(Self { counts })
    }

    /// Bin every event of the log by its UTC hour
    pub fn from_events(events: &EventLog) -> Self {
        let mut counts = [0u64; HOURS_PER_DAY];
        for event in events.iter() {
            counts[event.hour() as usize] += 1;
        }
        Self { counts }
    }

    /// Raw bucket counts, index = UTC hour
    pub fn counts(&self) -> &[u64; HOURS_PER_DAY] {
        &self.counts
    }

    /// Count for a single hour (wraps modulo 24)
    pub fn count_at(&self, hour: usize) -> u64 {
        self.counts[hour % HOURS_PER_DAY]
    }

    /// Total number of events across all buckets, saturating at `u64::MAX`
    pub fn total(&self) -> u64 {
        self.counts
            .iter()
            .fold(0u64, |sum, &count| sum.saturating_add(count))
    }

    /// Sum of `len` consecutive buckets starting at `start`, wrapping past
    /// midnight. Saturates at `u64::MAX`.
    pub fn window_sum(&self, start: usize, len: usize) -> u64 {
        (0..len).fold(0u64, |sum, offset| {
            sum.saturating_add(self.count_at(start + offset))
        })
    }

    /// Busiest hour; the lowest hour wins on ties. `None` when there is no activity.
    pub fn peak_hour(&self) -> Option<u32> {
        if self.total() == 0 {
            return None;
        }

        let mut best = 0;
        for hour in 1..HOURS_PER_DAY {
            if self.counts[hour] > self.counts[best] {
                best = hour;
            }
        }
        Some(best as u32)
    }
}

impl From<[u64; HOURS_PER_DAY]> for ActivityHistogram {
    fn from(counts: [u64; HOURS_PER_DAY]) -> Self {
        Self { counts }
    }
}

impl Default for ActivityHistogram {
    fn default() -> Self {
        Self {
            counts: [0; HOURS_PER_DAY],
        }
    }
}
