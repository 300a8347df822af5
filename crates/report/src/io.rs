//! Artifact persistence: CSV, JSON and markdown under one output directory.

use crate::{csv, markdown};
use parabench_core::ExperimentReport;
use std::fs;
use std::io;
use std::path::Path;

/// Write every output artifact for one sweep into `dir`.
///
/// Produces `<kernel>_results.csv`, `<kernel>_results.json` and
/// `<kernel>_summary.md`. The directory is created if missing.
pub fn write_all_outputs(report: &ExperimentReport, dir: impl AsRef<Path>) -> io::Result<()> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    csv::write_csv(report, dir.join(format!("{}_results.csv", report.kernel)))?;

    let json = serde_json::to_string_pretty(report)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    fs::write(dir.join(format!("{}_results.json", report.kernel)), json)?;

    fs::write(
        dir.join(format!("{}_summary.md", report.kernel)),
        markdown::generate_summary(report),
    )?;

    Ok(())
}

/// Read a previously written JSON report.
pub fn read_report_json(path: impl AsRef<Path>) -> io::Result<ExperimentReport> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| io::Error::new(io::ErrorKind::Other, e))
}
