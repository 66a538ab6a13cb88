//! Behavioral statistics for the activity report
//!
//! Complements the timezone estimate with the numbers an analyst reads next
//! to it: how much data there is, over what period, when the subject is
//! busiest, and how activity splits between weekdays and weekends.

use crate::histogram::{ActivityHistogram, HOURS_PER_DAY};
use crate::ingest::EventLog;
use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};
use serde::{Deserialize, Serialize};

/// Row labels for the weekday grid, Monday first
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Events counted per (weekday, UTC hour) cell
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyActivity {
    /// `grid[day][hour]`, day 0 = Monday
    grid: [[u64; HOURS_PER_DAY]; 7],
}

impl WeeklyActivity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one event
    pub fn record(&mut self, weekday: Weekday, hour: u32) {
        self.grid[weekday.num_days_from_monday() as usize][hour as usize % HOURS_PER_DAY] += 1;
    }

    /// Hourly counts for one weekday (0 = Monday)
    pub fn row(&self, day: usize) -> &[u64; HOURS_PER_DAY] {
        &self.grid[day % 7]
    }

    pub fn count(&self, day: usize, hour: usize) -> u64 {
        self.grid[day % 7][hour % HOURS_PER_DAY]
    }

    pub fn total(&self) -> u64 {
        self.grid.iter().flatten().sum()
    }

    /// Events on Saturday and Sunday
    pub fn weekend_total(&self) -> u64 {
        self.grid[5..].iter().flatten().sum()
    }

    /// Largest single cell, used to scale heatmap shading
    pub fn max_cell(&self) -> u64 {
        self.grid.iter().flatten().copied().max().unwrap_or(0)
    }
}

/// Summary statistics over an event set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityStats {
    /// Number of events analyzed
    pub total_events: u64,
    /// Earliest event (absent for histogram input or no events)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_seen: Option<DateTime<Utc>>,
    /// Latest event (absent for histogram input or no events)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<DateTime<Utc>>,
    /// Busiest UTC hour, lowest hour on ties
    pub most_active_utc_hour: Option<u32>,
    /// Fraction of events on Saturday or Sunday (0.0 to 1.0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekend_share: Option<f64>,
    /// Weekday x hour grid (event input only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekly: Option<WeeklyActivity>,
}

impl ActivityStats {
    /// Full statistics from individual events
    pub fn from_events(events: &EventLog) -> Self {
        let mut weekly = WeeklyActivity::new();
        for event in events.iter() {
            weekly.record(event.weekday(), event.hour());
        }

        let total_events = weekly.total();
        let weekend_share =
            (total_events > 0).then(|| weekly.weekend_total() as f64 / total_events as f64);

        Self {
            total_events,
            first_seen: events.first_seen(),
            last_seen: events.last_seen(),
            most_active_utc_hour: ActivityHistogram::from_events(events).peak_hour(),
            weekend_share,
            weekly: Some(weekly),
        }
    }

    /// The subset of statistics a bare histogram supports
    pub fn from_histogram(histogram: &ActivityHistogram) -> Self {
        Self {
            total_events: histogram.total(),
            first_seen: None,
            last_seen: None,
            most_active_utc_hour: histogram.peak_hour(),
            weekend_share: None,
            weekly: None,
        }
    }

    /// Weekend and weekday shares as percentages
    pub fn weekend_weekday_percent(&self) -> Option<(f64, f64)> {
        self.weekend_share
            .map(|share| (share * 100.0, (1.0 - share) * 100.0))
    }
}

/// Render an instant the way reports show it (`2024-03-01 14:05:00`)
pub fn format_timestamp(instant: &DateTime<Utc>) -> String {
    instant.format("%Y-%m-%d %H:%M:%S").to_string()
}
