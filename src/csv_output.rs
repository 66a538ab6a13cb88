//! CSV output format for spreadsheet analysis
//!
//! Two tables: the hourly histogram with the sleep window marked, and the
//! weekday x hour grid behind the heatmap.

use crate::analyzer::AnalysisReport;
use crate::histogram::HOURS_PER_DAY;
use crate::stats::WEEKDAY_NAMES;

/// `hour,count,in_sleep_window` with one row per UTC hour
pub fn hourly_csv(report: &AnalysisReport) -> String {
    let window = &report.estimate.sleep_window;
    let mut output = String::from("hour,count,in_sleep_window\n");

    for (hour, count) in report.histogram.counts().iter().enumerate() {
        output.push_str(&format!(
            "{},{},{}\n",
            hour,
            count,
            window.contains(hour as u32)
        ));
    }

    output
}

/// `day,0,...,23` with one row per weekday, Monday first.
///
/// Returns `None` when the analysis has no calendar data.
pub fn heatmap_csv(report: &AnalysisReport) -> Option<String> {
    let weekly = report.stats.weekly.as_ref()?;

    let mut header = vec!["day".to_string()];
    header.extend((0..HOURS_PER_DAY).map(|hour| hour.to_string()));

    let mut output = header.join(",");
    output.push('\n');

    for (day, name) in WEEKDAY_NAMES.iter().enumerate() {
        let cells: Vec<String> = weekly.row(day).iter().map(u64::to_string).collect();
        output.push_str(name);
        output.push(',');
        output.push_str(&cells.join(","));
        output.push('\n');
    }

    Some(output)
}
