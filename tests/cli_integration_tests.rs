//! Integration tests for the tzsleuth binary
#![allow(deprecated)] // suppress assert_cmd::Command::cargo_bin deprecation in tests

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// 2024-01-01 00:00:00 UTC, a Monday
const MONDAY_MIDNIGHT: u64 = 1_704_067_200;

/// Timestamps for someone active 07:00-22:59 local time in UTC+offset, for two weeks
fn daily_rhythm_timestamps(utc_offset: i64) -> Vec<u64> {
    let mut timestamps = Vec::new();
    for day in 0..14u64 {
        for local_hour in 7..23i64 {
            let utc_hour = (local_hour - utc_offset).rem_euclid(24) as u64;
            timestamps.push(MONDAY_MIDNIGHT + day * 86_400 + utc_hour * 3600 + 120);
        }
    }
    timestamps
}

fn write_timestamps(dir: &Path, timestamps: &[u64]) -> std::path::PathBuf {
    let path = dir.join("output.json");
    let body = serde_json::json!({ "timestamps": timestamps });
    fs::write(&path, serde_json::to_string_pretty(&body).unwrap()).unwrap();
    path
}

fn counts_arg(counts: &[u64]) -> String {
    counts
        .iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

// ============================================================================
// Text report
// ============================================================================

#[test]
fn test_text_report_for_central_europe() {
    let tmp = TempDir::new().unwrap();
    let input = write_timestamps(tmp.path(), &daily_rhythm_timestamps(1));

    let mut cmd = Command::cargo_bin("tzsleuth").unwrap();
    cmd.arg(&input);

    // Local quiet 23:00-06:59 is 22:00-05:59 UTC; of the all-zero windows the
    // one starting at 00:00 is scanned first
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("FORENSIC ANALYSIS REPORT"))
        .stdout(predicate::str::contains("Subject Data Points: 224"))
        .stdout(predicate::str::contains(
            "Estimated Sleep Center (UTC): 3:00",
        ))
        .stdout(predicate::str::contains("Estimated Timezone: UTC +1:00"))
        .stdout(predicate::str::contains(
            "Likely Region: Central Europe (Germany, France, Italy)",
        ));
}

#[test]
fn test_text_report_for_us_west_coast() {
    let tmp = TempDir::new().unwrap();
    let input = write_timestamps(tmp.path(), &daily_rhythm_timestamps(-8));

    let mut cmd = Command::cargo_bin("tzsleuth").unwrap();
    cmd.arg(&input);

    // Quiet 23:00-06:59 local is 07:00-14:59 UTC; first all-zero window 07:00-12:59
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "Estimated Sleep Center (UTC): 10:00",
        ))
        .stdout(predicate::str::contains("Estimated Timezone: UTC -6:00"))
        .stdout(predicate::str::contains("Activity Ratio: 28.6% Weekend / 71.4% Weekday"));
}

#[test]
fn test_uniform_counts() {
    let mut cmd = Command::cargo_bin("tzsleuth").unwrap();
    cmd.arg("--counts").arg(counts_arg(&[10; 24]));

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Estimated Sleep Center (UTC): 3:00"))
        .stdout(predicate::str::contains("Calculated Offset: 1 hours from UTC"))
        .stdout(predicate::str::contains("Date Range: n/a"));
}

#[test]
fn test_counts_with_wrapped_offset() {
    // Quiet window 17:00-22:59 UTC: center 20, 4 - 20 = -16, folded to +8
    let mut counts = [50u64; 24];
    for hour in 17..23 {
        counts[hour] = 0;
    }

    let mut cmd = Command::cargo_bin("tzsleuth").unwrap();
    cmd.arg("--counts").arg(counts_arg(&counts));

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Estimated Timezone: UTC +8:00"))
        .stdout(predicate::str::contains(
            "Likely Region: China / Singapore / Western Australia",
        ));
}

// ============================================================================
// Other stdout formats
// ============================================================================

#[test]
fn test_json_output_parses() {
    let tmp = TempDir::new().unwrap();
    let input = write_timestamps(tmp.path(), &daily_rhythm_timestamps(0));

    let mut cmd = Command::cargo_bin("tzsleuth").unwrap();
    cmd.arg("--format").arg("json").arg(&input);

    let output = cmd.output().unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["format"], "tzsleuth-json-v1");
    assert_eq!(parsed["estimate"]["sleep_window"]["start_utc_hour"], 0);
    assert_eq!(parsed["estimate"]["sleep_center_utc_hour"], 3);
    assert_eq!(parsed["estimate"]["utc_offset_hours"], 1);
    assert_eq!(parsed["stats"]["total_events"], 224);
    assert_eq!(parsed["hourly_counts"][12], 14);
}

#[test]
fn test_csv_output() {
    let mut cmd = Command::cargo_bin("tzsleuth").unwrap();
    cmd.arg("--format")
        .arg("csv")
        .arg("--counts")
        .arg(counts_arg(&[1; 24]));

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("hour,count,in_sleep_window\n"))
        .stdout(predicate::str::contains("5,1,true\n"))
        .stdout(predicate::str::contains("6,1,false\n"));
}

#[test]
fn test_html_output() {
    let mut cmd = Command::cargo_bin("tzsleuth").unwrap();
    cmd.arg("--format")
        .arg("html")
        .arg("--counts")
        .arg(counts_arg(&[1; 24]));

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("<!DOCTYPE html>"))
        .stdout(predicate::str::contains("Activity Distribution"));
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_cli_overrides_estimator_config() {
    let mut counts = [9u64; 24];
    for hour in 10..14 {
        counts[hour] = 0;
    }

    let mut cmd = Command::cargo_bin("tzsleuth").unwrap();
    cmd.arg("--window-hours")
        .arg("4")
        .arg("--sleep-center-hour")
        .arg("3")
        .arg("--counts")
        .arg(counts_arg(&counts));

    // Window 10..14, center 12, 3 - 12 = -9
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Estimated Timezone: UTC -9:00"))
        .stdout(predicate::str::contains("Likely Region: Alaska"));
}

#[test]
fn test_config_file_is_applied() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("tzsleuth.toml");
    fs::write(
        &config,
        "[estimator]\nassumed_local_sleep_center_hour = 5\n",
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("tzsleuth").unwrap();
    cmd.arg("--config")
        .arg(&config)
        .arg("--counts")
        .arg(counts_arg(&[1; 24]));

    // Center 3, 5 - 3 = 2
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Estimated Timezone: UTC +2:00"));
}

#[test]
fn test_invalid_config_value_fails() {
    let mut cmd = Command::cargo_bin("tzsleuth").unwrap();
    cmd.arg("--window-hours")
        .arg("0")
        .arg("--counts")
        .arg(counts_arg(&[1; 24]));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("window_length_hours"));
}

// ============================================================================
// Logging
// ============================================================================

#[test]
fn test_rust_log_is_honored_without_flags() {
    let mut cmd = Command::cargo_bin("tzsleuth").unwrap();
    cmd.env("RUST_LOG", "debug")
        .arg("--counts")
        .arg(counts_arg(&[1; 24]));

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Quietest window located"));
}

#[test]
fn test_default_logging_is_quiet() {
    let mut cmd = Command::cargo_bin("tzsleuth").unwrap();
    cmd.env_remove("RUST_LOG")
        .arg("--counts")
        .arg(counts_arg(&[1; 24]));

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Quietest window located").not());
}

#[test]
fn test_verbose_flag_enables_info() {
    let mut cmd = Command::cargo_bin("tzsleuth").unwrap();
    cmd.env_remove("RUST_LOG")
        .arg("-v")
        .arg("--counts")
        .arg(counts_arg(&[1; 24]));

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Estimated timezone"));
}

// ============================================================================
// Output directory
// ============================================================================

#[test]
fn test_output_dir_artifacts() {
    let tmp = TempDir::new().unwrap();
    let input = write_timestamps(tmp.path(), &daily_rhythm_timestamps(9));
    let out = tmp.path().join("processed-data");

    let mut cmd = Command::cargo_bin("tzsleuth").unwrap();
    cmd.arg("-o").arg(&out).arg(&input);
    cmd.assert().success();

    for name in [
        "report.txt",
        "estimate.json",
        "hourly_activity.csv",
        "weekly_heatmap.csv",
        "report.html",
    ] {
        assert!(out.join(name).is_file(), "{name} not written");
    }

    let report = fs::read_to_string(out.join("report.txt")).unwrap();
    assert!(report.contains("Subject Data Points: 224"));

    let heatmap = fs::read_to_string(out.join("weekly_heatmap.csv")).unwrap();
    assert_eq!(heatmap.lines().count(), 8);

    // Running again over an existing directory succeeds
    let mut again = Command::cargo_bin("tzsleuth").unwrap();
    again.arg("-o").arg(&out).arg(&input);
    again.assert().success();
}

#[test]
fn test_output_dir_from_config_file() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("from-config");
    let config = tmp.path().join("tzsleuth.toml");
    fs::write(
        &config,
        format!("[output]\ndirectory = {:?}\n", out.display().to_string()),
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("tzsleuth").unwrap();
    cmd.arg("-c")
        .arg(&config)
        .arg("--counts")
        .arg(counts_arg(&[2; 24]));
    cmd.assert().success();

    assert!(out.join("estimate.json").is_file());
    assert!(!out.join("weekly_heatmap.csv").exists());
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_no_input_fails() {
    let mut cmd = Command::cargo_bin("tzsleuth").unwrap();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Must specify either INPUT or --counts"));
}

#[test]
fn test_input_and_counts_conflict() {
    let mut cmd = Command::cargo_bin("tzsleuth").unwrap();
    cmd.arg("--counts").arg(counts_arg(&[1; 24])).arg("output.json");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Cannot specify both"));
}

#[test]
fn test_wrong_bucket_count_fails() {
    let mut cmd = Command::cargo_bin("tzsleuth").unwrap();
    cmd.arg("--counts").arg(counts_arg(&[1; 23]));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("exactly 24 hourly buckets, got 23"));
}

#[test]
fn test_overflowing_counts_fail() {
    let mut counts = [1u64; 24];
    counts[0] = u64::MAX;

    let mut cmd = Command::cargo_bin("tzsleuth").unwrap();
    cmd.arg("--counts").arg(counts_arg(&counts));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid --counts histogram"))
        .stderr(predicate::str::contains("sum past"))
        .stderr(predicate::str::contains("panicked").not());
}

#[test]
fn test_missing_input_file_fails() {
    let mut cmd = Command::cargo_bin("tzsleuth").unwrap();
    cmd.arg("/nonexistent/tzsleuth/output.json");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}

#[test]
fn test_malformed_json_fails() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("bad.json");
    fs::write(&input, r#"{"timestamps": "soon"}"#).unwrap();

    let mut cmd = Command::cargo_bin("tzsleuth").unwrap();
    cmd.arg(&input);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid timestamps JSON"));
}
