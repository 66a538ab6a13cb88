//! Plain-text analysis report (report.txt and default stdout format)

use crate::analyzer::AnalysisReport;
use crate::stats::format_timestamp;

const NOT_AVAILABLE: &str = "n/a";

/// Render the full text report
pub fn render(report: &AnalysisReport) -> String {
    let estimate = &report.estimate;
    let stats = &report.stats;

    let date_range = match (&stats.first_seen, &stats.last_seen) {
        (Some(first), Some(last)) => {
            format!("{} to {}", format_timestamp(first), format_timestamp(last))
        }
        _ => NOT_AVAILABLE.to_string(),
    };

    let most_active = stats
        .most_active_utc_hour
        .map_or_else(|| NOT_AVAILABLE.to_string(), |hour| format!("{}:00", hour));

    let ratio = stats.weekend_weekday_percent().map_or_else(
        || NOT_AVAILABLE.to_string(),
        |(weekend, weekday)| format!("{:.1}% Weekend / {:.1}% Weekday", weekend, weekday),
    );

    format!(
        "FORENSIC ANALYSIS REPORT\n\
         ========================\n\
         Subject Data Points: {total}\n\
         Date Range: {date_range}\n\
         \n\
         INFERENCE RESULTS\n\
         -----------------\n\
         Estimated Timezone: {label} (Confidence: Medium)\n\
         Calculated Offset: {offset} hours from UTC\n\
         Likely Region: {region}\n\
         Estimated Sleep Center (UTC): {center}:00\n\
         Quietest Window (UTC): {start}:00 +{len}h, {activity} events\n\
         \n\
         BEHAVIORAL STATS\n\
         ----------------\n\
         Most Active Hour (UTC): {most_active}\n\
         Activity Ratio: {ratio}\n",
        total = stats.total_events,
        label = estimate.timezone_label,
        offset = estimate.utc_offset_hours,
        region = estimate.region_label,
        center = estimate.sleep_center_utc_hour,
        start = estimate.sleep_window.start_utc_hour,
        len = estimate.sleep_window.length_hours,
        activity = estimate.sleep_window.activity,
    )
}
