//! Fixed-width terminal tables.

use parabench_core::ExperimentReport;
use std::fmt::Write;

/// Render the results table.
///
/// Columns: Method, Threads, Time (s), Result (only when the kernel reports
/// one), Speedup, Efficiency. Times keep six decimal places, matching the
/// kernels' own output resolution.
pub fn render_table(report: &ExperimentReport) -> String {
    let has_value = report.records.iter().any(|r| r.mean_value.is_some());
    let method_width = report
        .records
        .iter()
        .map(|r| r.method.len())
        .chain(["Method".len()])
        .max()
        .unwrap_or(6);

    let mut out = String::new();
    write!(
        out,
        "{:<method_width$}  {:>7}  {:>12}",
        "Method", "Threads", "Time (s)"
    )
    .unwrap();
    if has_value {
        write!(out, "  {:>14}", "Result").unwrap();
    }
    writeln!(out, "  {:>8}  {:>10}", "Speedup", "Efficiency").unwrap();

    let width = method_width + 45 + if has_value { 16 } else { 0 };
    writeln!(out, "{}", "-".repeat(width)).unwrap();

    for r in &report.records {
        write!(
            out,
            "{:<method_width$}  {:>7}  {:>12.6}",
            r.method, r.threads, r.mean_time_secs
        )
        .unwrap();
        if has_value {
            match r.mean_value {
                Some(v) => write!(out, "  {:>14.8}", v).unwrap(),
                None => write!(out, "  {:>14}", "-").unwrap(),
            }
        }
        writeln!(out, "  {:>8.2}  {:>10.2}", r.speedup, r.efficiency).unwrap();
    }

    out
}

/// Render the failed-configuration block shown before the results table.
/// Empty when every configuration succeeded.
pub fn render_failures(report: &ExperimentReport) -> String {
    let mut out = String::new();
    for f in &report.failures {
        writeln!(
            out,
            "FAILED  {} with {} thread(s): {}",
            f.method, f.threads, f.reason
        )
        .unwrap();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use parabench_core::{FailedConfiguration, MetricsRecord};

    fn record(
        method: &str,
        threads: u32,
        secs: f64,
        value: Option<f64>,
        speedup: f64,
        baseline: bool,
    ) -> MetricsRecord {
        MetricsRecord {
            method: method.to_string(),
            threads,
            mean_time_secs: secs,
            mean_value: value,
            speedup,
            efficiency: speedup / threads as f64,
            baseline,
        }
    }

    fn report(records: Vec<MetricsRecord>, failures: Vec<FailedConfiguration>) -> ExperimentReport {
        ExperimentReport {
            kernel: "integration".to_string(),
            title: "Numerical Integration".to_string(),
            records,
            failures,
        }
    }

    #[test]
    fn test_table_includes_result_column_when_values_present() {
        let report = report(
            vec![
                record("Rectangle (Sequential)", 1, 1.0, Some(1.99998), 1.0, true),
                record("Rectangle (OpenMP)", 4, 0.3, Some(1.99997), 3.33, false),
            ],
            vec![],
        );
        let table = render_table(&report);
        assert!(table.contains("Result"));
        assert!(table.contains("Rectangle (Sequential)"));
        assert!(table.contains("1.99998"));
    }

    #[test]
    fn test_table_omits_result_column_without_values() {
        let report = report(vec![record("Sequential", 1, 2.0, None, 1.0, true)], vec![]);
        let table = render_table(&report);
        assert!(!table.contains("Result"));
        assert!(table.contains("2.000000"));
    }

    #[test]
    fn test_table_preserves_record_order() {
        let report = report(
            vec![
                record("Seq", 1, 1.0, None, 1.0, true),
                record("Blocked", 2, 0.6, None, 1.67, false),
                record("Blocked", 4, 0.3, None, 3.33, false),
            ],
            vec![],
        );
        let table = render_table(&report);
        let seq_pos = table.find("Seq").unwrap();
        let blocked_pos = table.find("Blocked").unwrap();
        assert!(seq_pos < blocked_pos);
    }

    #[test]
    fn test_failures_listed_by_name() {
        let report = report(
            vec![],
            vec![FailedConfiguration {
                method: "Standard".to_string(),
                threads: 16,
                reason: "timed out after 60s".to_string(),
            }],
        );
        let block = render_failures(&report);
        assert!(block.contains("Standard"));
        assert!(block.contains("16"));
        assert!(block.contains("timed out"));
    }

    #[test]
    fn test_no_failures_renders_nothing() {
        let report = report(vec![], vec![]);
        assert!(render_failures(&report).is_empty());
    }
}
