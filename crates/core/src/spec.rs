// Copyright 2025 Parabench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Benchmark target descriptions and run configuration.

use std::path::PathBuf;
use std::time::Duration;

/// Whether a variant is a single-threaded baseline or a parallel candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantKind {
    /// Single-threaded reference implementation; serves as its family's
    /// baseline.
    Sequential,
    /// Multi-threaded implementation measured against the family baseline.
    Parallel,
}

/// A named algorithmic approach under test.
#[derive(Debug, Clone)]
pub struct Variant {
    /// Numeric method selector passed to the kernel.
    pub id: u32,
    /// Human-readable label used in reports.
    pub label: String,
    /// Sequential baseline or parallel candidate.
    pub kind: VariantKind,
    /// Baseline routing key: a parallel variant compares against the
    /// sequential variant sharing this family.
    pub family: String,
}

impl Variant {
    /// Sequential variant of the given family.
    pub fn sequential(id: u32, label: &str, family: &str) -> Self {
        Self {
            id,
            label: label.to_string(),
            kind: VariantKind::Sequential,
            family: family.to_string(),
        }
    }

    /// Parallel variant of the given family.
    pub fn parallel(id: u32, label: &str, family: &str) -> Self {
        Self {
            id,
            label: label.to_string(),
            kind: VariantKind::Parallel,
            family: family.to_string(),
        }
    }
}

/// Known-correct kernel result and the relative tolerance applied to it.
#[derive(Debug, Clone, Copy)]
pub struct ExpectedValue {
    /// The analytic constant the kernel should reproduce. Always non-zero.
    pub value: f64,
    /// Relative error above which a measurement is flagged.
    pub relative_tolerance: f64,
}

/// Immutable description of one kernel family: where its executable lives,
/// which arguments stay fixed, and the (variant × thread count) matrix to
/// sweep.
#[derive(Debug, Clone)]
pub struct BenchmarkSpec {
    /// Short identifier used for output file names.
    pub id: String,
    /// Title used in report headings.
    pub title: String,
    /// Path to the benchmarked executable.
    pub executable: PathBuf,
    /// Fixed argv prefix placed before the per-trial variant id and thread
    /// count.
    pub fixed_args: Vec<String>,
    /// Algorithm variants, sequential baselines and parallel candidates.
    pub variants: Vec<Variant>,
    /// Ordered thread-count sweep applied to every parallel variant.
    pub threads: Vec<u32>,
    /// Whether the kernel appends a computed result value to its output
    /// line.
    pub reports_value: bool,
    /// Analytic constant the kernel result is checked against, when known.
    pub expected: Option<ExpectedValue>,
}

impl BenchmarkSpec {
    /// Number of comma-separated fields one kernel output line must carry.
    pub fn field_count(&self) -> usize {
        if self.reports_value {
            4
        } else {
            3
        }
    }

    /// Variants of the given kind, in declaration order.
    pub fn variants_of(&self, kind: VariantKind) -> impl Iterator<Item = &Variant> {
        self.variants.iter().filter(move |v| v.kind == kind)
    }
}

/// Caller-supplied knobs for one sweep. Nothing here has a hidden default
/// inside the engine; the CLI surfaces every field.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Independent trials per configuration.
    pub repeats: usize,
    /// Wall-clock budget for a single trial.
    pub timeout: Duration,
    /// Minimum surviving trials for a configuration to count. Values below
    /// one are treated as one.
    pub min_successes: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            repeats: 3,
            timeout: Duration::from_secs(30),
            min_successes: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(reports_value: bool) -> BenchmarkSpec {
        BenchmarkSpec {
            id: "test".to_string(),
            title: "Test".to_string(),
            executable: PathBuf::from("/bin/true"),
            fixed_args: vec![],
            variants: vec![
                Variant::parallel(1, "Fast", "a"),
                Variant::sequential(3, "Slow", "a"),
                Variant::parallel(2, "Faster", "b"),
                Variant::sequential(4, "Slower", "b"),
            ],
            threads: vec![1, 2, 4],
            reports_value,
            expected: None,
        }
    }

    #[test]
    fn test_field_count_tracks_reported_value() {
        assert_eq!(target(true).field_count(), 4);
        assert_eq!(target(false).field_count(), 3);
    }

    #[test]
    fn test_variants_of_preserves_declaration_order() {
        let target = target(true);
        let sequential: Vec<&str> = target
            .variants_of(VariantKind::Sequential)
            .map(|v| v.label.as_str())
            .collect();
        assert_eq!(sequential, ["Slow", "Slower"]);

        let parallel: Vec<&str> = target
            .variants_of(VariantKind::Parallel)
            .map(|v| v.label.as_str())
            .collect();
        assert_eq!(parallel, ["Fast", "Faster"]);
    }

    #[test]
    fn test_default_run_options() {
        let opts = RunOptions::default();
        assert_eq!(opts.repeats, 3);
        assert_eq!(opts.timeout, Duration::from_secs(30));
        assert_eq!(opts.min_successes, 1);
    }
}
