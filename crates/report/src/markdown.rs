//! Markdown summary generation.

use chrono::Utc;
use parabench_core::ExperimentReport;
use std::fmt::Write;

/// Generate a markdown summary for one sweep.
///
/// Failed configurations are listed before the results, so a truncated
/// sweep is visible at the top of the document.
pub fn generate_summary(report: &ExperimentReport) -> String {
    let mut output = String::new();

    writeln!(output, "# {} Benchmark Summary", report.title).unwrap();
    writeln!(output).unwrap();
    writeln!(output, "Generated: {}", Utc::now().to_rfc3339()).unwrap();
    writeln!(output).unwrap();

    if !report.failures.is_empty() {
        writeln!(output, "## Failed configurations").unwrap();
        writeln!(output).unwrap();
        for f in &report.failures {
            writeln!(
                output,
                "- {} with {} thread(s): {}",
                f.method, f.threads, f.reason
            )
            .unwrap();
        }
        writeln!(output).unwrap();
    }

    writeln!(output, "## Results").unwrap();
    writeln!(output).unwrap();

    let has_value = report.records.iter().any(|r| r.mean_value.is_some());
    if has_value {
        writeln!(
            output,
            "| Method | Threads | Time (s) | Result | Speedup | Efficiency |"
        )
        .unwrap();
        writeln!(output, "|--------|---------|----------|--------|---------|------------|").unwrap();
    } else {
        writeln!(output, "| Method | Threads | Time (s) | Speedup | Efficiency |").unwrap();
        writeln!(output, "|--------|---------|----------|---------|------------|").unwrap();
    }

    for r in &report.records {
        write!(
            output,
            "| {} | {} | {:.6} |",
            r.method, r.threads, r.mean_time_secs
        )
        .unwrap();
        if has_value {
            match r.mean_value {
                Some(v) => write!(output, " {v:.8} |").unwrap(),
                None => write!(output, " - |").unwrap(),
            }
        }
        writeln!(output, " {:.2} | {:.2} |", r.speedup, r.efficiency).unwrap();
    }

    writeln!(output).unwrap();
    writeln!(output, "---").unwrap();
    writeln!(
        output,
        "Configurations: {} succeeded, {} failed",
        report.records.len(),
        report.failures.len()
    )
    .unwrap();

    output
}
