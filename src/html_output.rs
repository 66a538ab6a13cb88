//! HTML output format for analysis reports
//!
//! A single self-contained page with embedded CSS: the estimate, an hourly
//! bar chart with the sleep window highlighted, the weekday/weekend split and
//! a weekday x hour heatmap.

use crate::analyzer::AnalysisReport;
use crate::histogram::HOURS_PER_DAY;
use crate::stats::{format_timestamp, WeeklyActivity, WEEKDAY_NAMES};

/// Escape HTML special characters to prevent XSS
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Generate embedded CSS styles
fn generate_styles() -> &'static str {
    r#"
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            margin: 20px;
            background-color: #f5f5f5;
        }
        h1, h2 {
            color: #333;
        }
        table {
            border-collapse: collapse;
            background-color: white;
            box-shadow: 0 1px 3px rgba(0,0,0,0.1);
            margin-bottom: 20px;
        }
        th, td {
            border: 1px solid #ddd;
            padding: 6px 8px;
            text-align: left;
        }
        th {
            background-color: #4a90d9;
            color: white;
            font-weight: bold;
        }
        .chart {
            display: flex;
            align-items: flex-end;
            height: 220px;
            gap: 4px;
            background-color: white;
            padding: 10px;
            box-shadow: 0 1px 3px rgba(0,0,0,0.1);
        }
        .bar-col {
            flex: 1;
            display: flex;
            flex-direction: column;
            justify-content: flex-end;
            height: 100%;
            text-align: center;
            font-size: 0.75em;
            color: #555;
        }
        .bar {
            background-color: #4a90d9;
            min-height: 1px;
        }
        .bar.sleep {
            background-color: #5c3c92;
        }
        .heatmap td {
            width: 22px;
            text-align: center;
            font-size: 0.75em;
            font-family: monospace;
        }
        .footer {
            margin-top: 20px;
            font-size: 0.8em;
            color: #888;
            text-align: center;
        }
        "#
}

fn estimate_section(report: &AnalysisReport) -> String {
    let estimate = &report.estimate;
    let stats = &report.stats;

    let mut rows = vec![
        ("Estimated Timezone", estimate.timezone_label.clone()),
        ("Likely Region", estimate.region_label.clone()),
        (
            "Estimated Sleep Center (UTC)",
            format!("{}:00", estimate.sleep_center_utc_hour),
        ),
        ("Subject Data Points", stats.total_events.to_string()),
    ];

    if let (Some(first), Some(last)) = (&stats.first_seen, &stats.last_seen) {
        rows.push((
            "Date Range",
            format!("{} to {}", format_timestamp(first), format_timestamp(last)),
        ));
    }
    if let Some(hour) = stats.most_active_utc_hour {
        rows.push(("Most Active Hour (UTC)", format!("{}:00", hour)));
    }

    let body: Vec<String> = rows
        .iter()
        .map(|(name, value)| {
            format!(
                "<tr><th>{}</th><td>{}</td></tr>",
                name,
                escape_html(value)
            )
        })
        .collect();

    format!(
        "<h2>Inference Results</h2>\n<table>\n{}\n</table>\n",
        body.join("\n")
    )
}

fn hourly_chart(report: &AnalysisReport) -> String {
    let counts = report.histogram.counts();
    let peak = counts.iter().copied().max().unwrap_or(0).max(1);
    let window = &report.estimate.sleep_window;

    let columns: Vec<String> = counts
        .iter()
        .enumerate()
        .map(|(hour, &count)| {
            let class = if window.contains(hour as u32) {
                "bar sleep"
            } else {
                "bar"
            };
            let height = count as f64 / peak as f64 * 100.0;
            format!(
                r#"<div class="bar-col"><div class="{}" style="height: {:.1}%" title="{}:00 UTC: {}"></div>{}</div>"#,
                class, height, hour, count, hour
            )
        })
        .collect();

    format!(
        "<h2>Activity Distribution (Hour of Day, UTC)</h2>\n<div class=\"chart\">\n{}\n</div>\n",
        columns.join("\n")
    )
}

fn balance_section(report: &AnalysisReport) -> String {
    match report.stats.weekend_weekday_percent() {
        Some((weekend, weekday)) => format!(
            "<h2>Work-Life Balance Indicator</h2>\n<table>\n\
             <tr><th>Weekday</th><td>{:.1}%</td></tr>\n\
             <tr><th>Weekend</th><td>{:.1}%</td></tr>\n\
             </table>\n",
            weekday, weekend
        ),
        None => String::new(),
    }
}

fn heatmap_section(weekly: &WeeklyActivity) -> String {
    let max = weekly.max_cell().max(1);

    let mut header = String::from("<tr><th>Day</th>");
    for hour in 0..HOURS_PER_DAY {
        header.push_str(&format!("<th>{}</th>", hour));
    }
    header.push_str("</tr>");

    let rows: Vec<String> = WEEKDAY_NAMES
        .iter()
        .enumerate()
        .map(|(day, name)| {
            let cells: String = weekly
                .row(day)
                .iter()
                .map(|&count| {
                    let alpha = count as f64 / max as f64;
                    format!(
                        r#"<td style="background-color: rgba(92, 60, 146, {:.2})">{}</td>"#,
                        alpha, count
                    )
                })
                .collect();
            format!("<tr><th>{}</th>{}</tr>", name, cells)
        })
        .collect();

    format!(
        "<h2>Circadian Rhythm Fingerprint</h2>\n<table class=\"heatmap\">\n{}\n{}\n</table>\n",
        header,
        rows.join("\n")
    )
}

/// Render the full HTML report
pub fn render(report: &AnalysisReport) -> String {
    let heatmap = report
        .stats
        .weekly
        .as_ref()
        .map(heatmap_section)
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>tzsleuth report - {label}</title>
<style>{styles}</style>
</head>
<body>
<h1>Forensic Activity Report</h1>
{estimate}{chart}{balance}{heatmap}<div class="footer">Generated by tzsleuth {version}</div>
</body>
</html>
"#,
        label = escape_html(&report.estimate.timezone_label),
        styles = generate_styles(),
        estimate = estimate_section(report),
        chart = hourly_chart(report),
        balance = balance_section(report),
        heatmap = heatmap,
        version = env!("CARGO_PKG_VERSION"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::Analyzer;
    use crate::histogram::ActivityHistogram;
    use crate::ingest::EventLog;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<a href=\"x\">'&'</a>"),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_render_histogram_report() {
        let report = Analyzer::default().analyze_histogram(ActivityHistogram::from([5; 24]));
        let html = render(&report);

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>tzsleuth report - UTC +1:00</title>"));
        assert!(html.contains("Central Europe (Germany, France, Italy)"));
        assert_eq!(html.matches("class=\"bar-col\"").count(), 24);
        // Window 0..6 highlighted
        assert_eq!(html.matches("class=\"bar sleep\"").count(), 6);
        assert!(!html.contains("Circadian Rhythm Fingerprint"));
        assert!(!html.contains("Work-Life Balance"));
    }

    #[test]
    fn test_render_event_report_has_heatmap() {
        let events = EventLog::from_timestamps(&[1_704_117_600.0, 1_704_553_200.0]).unwrap();
        let html = render(&Analyzer::default().analyze_events(&events));

        assert!(html.contains("Circadian Rhythm Fingerprint"));
        assert!(html.contains("<tr><th>Saturday</th>"));
        assert!(html.contains("Work-Life Balance Indicator"));
        assert!(html.contains("<tr><th>Weekend</th><td>50.0%</td></tr>"));
        assert!(html.contains("rgba(92, 60, 146, 1.00)"));
    }

    #[test]
    fn test_region_is_escaped() {
        let mut report = Analyzer::default().analyze_histogram(ActivityHistogram::from([5; 24]));
        report.estimate.region_label = "<script>".to_string();
        let html = render(&report);
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }
}
