//! Report artifact directory
//!
//! Creating the directory is an explicit step the caller takes before any
//! artifact is written. `ensure` is idempotent.

use crate::analyzer::AnalysisReport;
use crate::{csv_output, html_output, json_output, text_report};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const TEXT_REPORT_FILE: &str = "report.txt";
pub const JSON_REPORT_FILE: &str = "estimate.json";
pub const HOURLY_CSV_FILE: &str = "hourly_activity.csv";
pub const HEATMAP_CSV_FILE: &str = "weekly_heatmap.csv";
pub const HTML_REPORT_FILE: &str = "report.html";

/// A directory known to exist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDir {
    root: PathBuf,
}

impl OutputDir {
    /// Create `path` (and parents) unless it already exists
    pub fn ensure<P: AsRef<Path>>(path: P) -> Result<Self> {
        let root = path.as_ref().to_path_buf();

        if root.is_dir() {
            tracing::debug!(path = %root.display(), "Output directory already exists");
        } else {
            fs::create_dir_all(&root)
                .with_context(|| format!("Failed to create output directory {}", root.display()))?;
            tracing::info!(path = %root.display(), "Created output directory");
        }

        Ok(Self { root })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Write one artifact, replacing any previous file of the same name
    pub fn write(&self, file_name: &str, contents: &str) -> Result<PathBuf> {
        let path = self.root.join(file_name);
        fs::write(&path, contents).with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::debug!(path = %path.display(), bytes = contents.len(), "Wrote artifact");
        Ok(path)
    }

    /// Write every report artifact for an analysis; returns the written paths
    pub fn write_all(&self, report: &AnalysisReport) -> Result<Vec<PathBuf>> {
        let mut written = vec![
            self.write(TEXT_REPORT_FILE, &text_report::render(report))?,
            self.write(
                JSON_REPORT_FILE,
                &json_output::JsonOutput::from_report(report).to_json()?,
            )?,
            self.write(HOURLY_CSV_FILE, &csv_output::hourly_csv(report))?,
        ];

        if let Some(heatmap) = csv_output::heatmap_csv(report) {
            written.push(self.write(HEATMAP_CSV_FILE, &heatmap)?);
        }

        written.push(self.write(HTML_REPORT_FILE, &html_output::render(report))?);

        tracing::info!(
            dir = %self.root.display(),
            artifacts = written.len(),
            "Analysis artifacts written"
        );
        Ok(written)
    }
}
