//! ASCII speedup chart.
//!
//! Stands in for image plotting: one row per parallel configuration, bar
//! length proportional to speedup, the sweep maximum setting the scale.
//! Sequential baselines are omitted; their speedup is 1.0 by definition.

use parabench_core::{ExperimentReport, MetricsRecord};
use std::fmt::Write;

/// Width of the longest bar, in character cells.
const BAR_WIDTH: usize = 40;

/// Render speedup bars for every parallel record, in record order.
/// Empty when the report holds no parallel records.
pub fn speedup_chart(report: &ExperimentReport) -> String {
    let parallel: Vec<&MetricsRecord> = report.records.iter().filter(|r| !r.baseline).collect();
    if parallel.is_empty() {
        return String::new();
    }

    let max = parallel.iter().fold(1.0_f64, |acc, r| acc.max(r.speedup));
    let label_width = parallel.iter().map(|r| r.method.len()).max().unwrap_or(0);

    let mut out = String::new();
    writeln!(out, "Speedup (full bar = {max:.2}x)").unwrap();
    for r in &parallel {
        let filled = ((r.speedup / max) * BAR_WIDTH as f64).round() as usize;
        let bar = "#".repeat(filled.min(BAR_WIDTH));
        writeln!(
            out,
            "{:<label_width$} {:>3} |{:<bar_width$}| {:.2}x",
            r.method,
            r.threads,
            bar,
            r.speedup,
            bar_width = BAR_WIDTH
        )
        .unwrap();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(method: &str, threads: u32, speedup: f64, baseline: bool) -> MetricsRecord {
        MetricsRecord {
            method: method.to_string(),
            threads,
            mean_time_secs: 1.0 / speedup,
            mean_value: None,
            speedup,
            efficiency: speedup / threads as f64,
            baseline,
        }
    }

    fn report(records: Vec<MetricsRecord>) -> ExperimentReport {
        ExperimentReport {
            kernel: "matmul".to_string(),
            title: "Matrix Multiplication".to_string(),
            records,
            failures: vec![],
        }
    }

    #[test]
    fn test_baselines_are_excluded() {
        let chart = speedup_chart(&report(vec![
            record("Sequential", 1, 1.0, true),
            record("Blocked", 4, 3.2, false),
        ]));
        assert!(!chart.contains("Sequential"));
        assert!(chart.contains("Blocked"));
    }

    #[test]
    fn test_bar_length_scales_with_speedup() {
        let chart = speedup_chart(&report(vec![
            record("Blocked", 2, 2.0, false),
            record("Blocked", 4, 4.0, false),
        ]));
        let bars: Vec<usize> = chart
            .lines()
            .skip(1)
            .map(|l| l.matches('#').count())
            .collect();
        assert_eq!(bars.len(), 2);
        assert!(bars[0] < bars[1]);
        assert_eq!(bars[1], 40);
    }

    #[test]
    fn test_empty_without_parallel_records() {
        let chart = speedup_chart(&report(vec![record("Sequential", 1, 1.0, true)]));
        assert!(chart.is_empty());
    }
}
