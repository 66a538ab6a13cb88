//! Timestamp ingestion
//!
//! Reads the collector's JSON dump (`{"timestamps": [<unix seconds>, ...]}`)
//! and converts every entry to a UTC instant.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading events
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid timestamps JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Timestamp #{index} is not a finite number: {value}")]
    NonFinite { index: usize, value: f64 },

    #[error("Timestamp #{index} is outside the representable date range: {value}")]
    OutOfRange { index: usize, value: f64 },
}

/// On-disk layout written by the collector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimestampDump {
    pub timestamps: Vec<f64>,
}

/// Unordered list of UTC event instants
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventLog {
    events: Vec<DateTime<Utc>>,
}

impl EventLog {
    /// Load events from a timestamps JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, IngestError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| IngestError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let log = Self::from_json_str(&content)?;
        tracing::info!(
            events = log.len(),
            path = %path.display(),
            "Loaded activity timestamps"
        );
        Ok(log)
    }

    /// Parse events from the collector's JSON layout
    pub fn from_json_str(content: &str) -> Result<Self, IngestError> {
        let dump: TimestampDump = serde_json::from_str(content)?;
        Self::from_timestamps(&dump.timestamps)
    }

    /// Convert UNIX-second timestamps (fractions allowed) into UTC instants.
    ///
    /// Fractional seconds are kept; hour and weekday binning floors them.
    pub fn from_timestamps(timestamps: &[f64]) -> Result<Self, IngestError> {
        let events = timestamps
            .iter()
            .enumerate()
            .map(|(index, &value)| to_utc(index, value))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { events })
    }

    /// Number of events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the log holds no events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events in input order
    pub fn iter(&self) -> impl Iterator<Item = &DateTime<Utc>> {
        self.events.iter()
    }

    /// Earliest event, if any
    pub fn first_seen(&self) -> Option<DateTime<Utc>> {
        self.events.iter().min().copied()
    }

    /// Latest event, if any
    pub fn last_seen(&self) -> Option<DateTime<Utc>> {
        self.events.iter().max().copied()
    }
}

fn to_utc(index: usize, value: f64) -> Result<DateTime<Utc>, IngestError> {
    if !value.is_finite() {
        return Err(IngestError::NonFinite { index, value });
    }

    let secs = value.floor();
    if secs < i64::MIN as f64 || secs >= i64::MAX as f64 {
        return Err(IngestError::OutOfRange { index, value });
    }

    let nanos = (((value - secs) * 1e9) as u32).min(999_999_999);
    DateTime::<Utc>::from_timestamp(secs as i64, nanos)
        .ok_or(IngestError::OutOfRange { index, value })
}
