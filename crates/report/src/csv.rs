//! CSV export.
//!
//! Column layout follows what each kernel's downstream spreadsheets already
//! ingest: `Method,Threads,Time[,Result],Speedup,Efficiency`, with the
//! result column present only for kernels that report one.

use parabench_core::ExperimentReport;
use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;

/// Render the report as CSV.
pub fn render_csv(report: &ExperimentReport) -> String {
    let has_value = report.records.iter().any(|r| r.mean_value.is_some());

    let mut out = String::new();
    if has_value {
        out.push_str("Method,Threads,Time,Result,Speedup,Efficiency\n");
    } else {
        out.push_str("Method,Threads,Time,Speedup,Efficiency\n");
    }

    for r in &report.records {
        write!(out, "{},{},{:.6}", r.method, r.threads, r.mean_time_secs).unwrap();
        if has_value {
            match r.mean_value {
                Some(v) => write!(out, ",{v}").unwrap(),
                None => out.push(','),
            }
        }
        writeln!(out, ",{:.6},{:.6}", r.speedup, r.efficiency).unwrap();
    }

    out
}

/// Write the CSV rendering to `path`.
pub fn write_csv(report: &ExperimentReport, path: impl AsRef<Path>) -> io::Result<()> {
    fs::write(path, render_csv(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use parabench_core::MetricsRecord;

    fn record(method: &str, threads: u32, secs: f64, value: Option<f64>) -> MetricsRecord {
        MetricsRecord {
            method: method.to_string(),
            threads,
            mean_time_secs: secs,
            mean_value: value,
            speedup: 1.0,
            efficiency: 1.0 / threads as f64,
            baseline: threads == 1,
        }
    }

    fn report(records: Vec<MetricsRecord>) -> ExperimentReport {
        ExperimentReport {
            kernel: "integration".to_string(),
            title: "Numerical Integration".to_string(),
            records,
            failures: vec![],
        }
    }

    #[test]
    fn test_header_with_result_column() {
        let csv = render_csv(&report(vec![record("Seq", 1, 1.0, Some(2.0))]));
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("Method,Threads,Time,Result,Speedup,Efficiency")
        );
        assert_eq!(lines.next(), Some("Seq,1,1.000000,2,1.000000,1.000000"));
    }

    #[test]
    fn test_header_without_result_column() {
        let csv = render_csv(&report(vec![record("Seq", 1, 0.5, None)]));
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("Method,Threads,Time,Speedup,Efficiency"));
        assert_eq!(lines.next(), Some("Seq,1,0.500000,1.000000,1.000000"));
    }

    #[test]
    fn test_one_row_per_record_in_order() {
        let csv = render_csv(&report(vec![
            record("Seq", 1, 1.0, None),
            record("Blocked", 2, 0.6, None),
            record("Blocked", 4, 0.3, None),
        ]));
        let rows: Vec<&str> = csv.lines().skip(1).collect();
        assert_eq!(rows.len(), 3);
        assert!(rows[0].starts_with("Seq,1,"));
        assert!(rows[1].starts_with("Blocked,2,"));
        assert!(rows[2].starts_with("Blocked,4,"));
    }
}
