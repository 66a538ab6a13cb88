//! Coarse region guesses for UTC offsets
//!
//! The table is declared data keyed by canonical offsets, half- and
//! quarter-hour zones included. Lookups only ever match entries whose key is
//! a whole number of hours: the estimator emits integral offsets, and
//! fractional input is rounded before the lookup. The fractional rows stay in
//! the table so they can be listed and reported, but no lookup reaches them.

use serde::Serialize;

/// Returned when no table entry matches the offset
pub const UNKNOWN_REGION: &str = "Unknown Region";

/// One row of the region table
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegionEntry {
    /// Canonical offset from UTC in hours
    pub offset_hours: f64,
    /// Human-readable description of where this offset is in use
    pub region: &'static str,
}

impl RegionEntry {
    const fn new(offset_hours: f64, region: &'static str) -> Self {
        Self {
            offset_hours,
            region,
        }
    }

    /// Whether the key is a whole number of hours (and thus matchable)
    pub fn is_whole_hour(&self) -> bool {
        self.offset_hours.fract() == 0.0
    }
}

/// Built-in offset to region mapping
pub static STANDARD_REGIONS: &[RegionEntry] = &[
    RegionEntry::new(-12.0, "Baker Island / Howland Island"),
    RegionEntry::new(-11.0, "American Samoa"),
    RegionEntry::new(-10.0, "Hawaii (HST)"),
    RegionEntry::new(-9.5, "Marquesas Islands"),
    RegionEntry::new(-9.0, "Alaska"),
    RegionEntry::new(-8.0, "US West Coast (Los Angeles, Vancouver)"),
    RegionEntry::new(-7.0, "US Mountain Time (Denver, Phoenix*)"),
    RegionEntry::new(-6.0, "US Central Time (Chicago, Mexico City)"),
    RegionEntry::new(-5.0, "US East Coast (New York, Toronto)"),
    RegionEntry::new(-4.0, "Atlantic Time (Canada) / Caribbean"),
    RegionEntry::new(-3.5, "Newfoundland"),
    RegionEntry::new(-3.0, "Brazil / Argentina / Uruguay"),
    RegionEntry::new(-2.0, "South Georgia & Sandwich Islands"),
    RegionEntry::new(-1.0, "Azores / Cape Verde"),
    RegionEntry::new(0.0, "UK / Ireland / Portugal / West Africa"),
    RegionEntry::new(1.0, "Central Europe (Germany, France, Italy)"),
    RegionEntry::new(2.0, "Eastern Europe / South Africa"),
    RegionEntry::new(3.0, "Moscow / East Africa"),
    RegionEntry::new(3.5, "Iran"),
    RegionEntry::new(4.0, "Gulf States (UAE, Oman)"),
    RegionEntry::new(4.5, "Afghanistan"),
    RegionEntry::new(5.0, "Pakistan / West Asia"),
    RegionEntry::new(5.5, "India (IST)"),
    RegionEntry::new(5.75, "Nepal"),
    RegionEntry::new(6.0, "Bangladesh / Bhutan"),
    RegionEntry::new(6.5, "Myanmar"),
    RegionEntry::new(7.0, "Thailand / Vietnam / Indonesia (WIB)"),
    RegionEntry::new(8.0, "China / Singapore / Western Australia"),
    RegionEntry::new(8.75, "Western Australia (Eucla)"),
    RegionEntry::new(9.0, "Japan / Korea"),
    RegionEntry::new(9.5, "Central Australia (ACST)"),
    RegionEntry::new(10.0, "Eastern Australia / Papua New Guinea"),
    RegionEntry::new(10.5, "Lord Howe Island"),
    RegionEntry::new(11.0, "Solomon Islands"),
    RegionEntry::new(12.0, "New Zealand / Fiji"),
    RegionEntry::new(12.75, "Chatham Islands"),
    RegionEntry::new(13.0, "New Zealand (Summer)"),
    RegionEntry::new(14.0, "Line Islands (Kiribati)"),
];

/// Resolves offsets against a static region table
#[derive(Debug, Clone, Copy)]
pub struct RegionTable {
    entries: &'static [RegionEntry],
}

impl RegionTable {
    /// Table backed by [`STANDARD_REGIONS`]
    pub const fn standard() -> Self {
        Self {
            entries: STANDARD_REGIONS,
        }
    }

    /// Table backed by caller-provided static data
    pub const fn from_static(entries: &'static [RegionEntry]) -> Self {
        Self { entries }
    }

    /// Every row of the table, fractional keys included
    pub fn entries(&self) -> &'static [RegionEntry] {
        self.entries
    }

    /// Region label for a whole-hour offset, or [`UNKNOWN_REGION`]
    pub fn resolve(&self, offset_hours: i32) -> &'static str {
        self.lookup(f64::from(offset_hours))
    }

    /// Region label for an arbitrary offset.
    ///
    /// The offset is rounded to the nearest whole hour (ties to even) before
    /// lookup, so `5.5` resolves like `6` and never reaches the India row.
    pub fn resolve_fractional(&self, offset_hours: f64) -> &'static str {
        if !offset_hours.is_finite() {
            return UNKNOWN_REGION;
        }
        self.lookup(offset_hours.round_ties_even())
    }

    /// Rows whose keys no lookup can match
    pub fn fractional_entries(&self) -> impl Iterator<Item = &'static RegionEntry> {
        self.entries.iter().filter(|entry| !entry.is_whole_hour())
    }

    fn lookup(&self, whole_hours: f64) -> &'static str {
        self.entries
            .iter()
            .find(|entry| entry.offset_hours == whole_hours)
            .map_or(UNKNOWN_REGION, |entry| entry.region)
    }
}

impl Default for RegionTable {
    fn default() -> Self {
        Self::standard()
    }
}
