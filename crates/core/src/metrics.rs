// Copyright 2025 Parabench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Speedup and efficiency against the family's sequential baseline.

use crate::aggregate::AggregateSample;
use crate::spec::VariantKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Final, persisted measurement for one configuration. The ordered sequence
/// of records for one benchmark target is the engine's complete output
/// artifact, immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsRecord {
    /// Method label, as shown in tables and charts.
    pub method: String,
    /// Thread count; 1 for sequential baselines by convention.
    pub threads: u32,
    /// Mean wall-clock time in seconds.
    pub mean_time_secs: f64,
    /// Mean computed result value, for kernels that report one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_value: Option<f64>,
    /// Ratio of the sequential baseline time to this configuration's time.
    pub speedup: f64,
    /// Speedup divided by thread count.
    pub efficiency: f64,
    /// Whether this row is a sequential baseline.
    pub baseline: bool,
}

/// Violation of the baseline-pairing contract.
#[derive(Debug, Error)]
pub enum MetricsError {
    /// A parallel sample was presented without its family's sequential
    /// baseline. Correct driver logic never produces this; treat it as an
    /// assertion failure, not a skippable configuration.
    #[error("no sequential baseline for {variant} (family {family:?})")]
    MissingBaseline {
        /// Variant label of the orphaned parallel sample.
        variant: String,
        /// Family whose baseline was absent.
        family: String,
    },
}

/// Derive the metrics record for one aggregated configuration.
///
/// Sequential samples are their own baseline: speedup and efficiency are
/// assigned 1.0 outright rather than computed, so floating-point
/// self-division can never perturb them. Parallel samples must be paired
/// with the sequential sample of the *same algorithm family*; the pairing
/// is the caller's responsibility and cannot be checked here structurally.
pub fn compute_metrics(
    sample: &AggregateSample,
    baseline: Option<&AggregateSample>,
) -> Result<MetricsRecord, MetricsError> {
    let (speedup, efficiency, is_baseline) = match sample.variant.kind {
        VariantKind::Sequential => (1.0, 1.0, true),
        VariantKind::Parallel => {
            let baseline = baseline.ok_or_else(|| MetricsError::MissingBaseline {
                variant: sample.variant.label.clone(),
                family: sample.variant.family.clone(),
            })?;
            let speedup = baseline.mean_time.as_secs_f64() / sample.mean_time.as_secs_f64();
            (speedup, speedup / sample.threads as f64, false)
        }
    };

    Ok(MetricsRecord {
        method: sample.variant.label.clone(),
        threads: sample.threads,
        mean_time_secs: sample.mean_time.as_secs_f64(),
        mean_value: sample.mean_value,
        speedup,
        efficiency,
        baseline: is_baseline,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::Variant;
    use std::time::Duration;

    fn sample(variant: Variant, threads: u32, secs: f64) -> AggregateSample {
        AggregateSample {
            variant,
            threads,
            mean_time: Duration::from_secs_f64(secs),
            mean_value: None,
            successes: 3,
        }
    }

    #[test]
    fn test_sequential_sample_is_pinned_to_unity() {
        // Whatever the measured time, the baseline's own speedup and
        // efficiency are 1.0 by definition.
        let seq = sample(Variant::sequential(3, "Sequential", "fam"), 1, 17.3);
        let record = compute_metrics(&seq, None).unwrap();
        assert_eq!(record.speedup, 1.0);
        assert_eq!(record.efficiency, 1.0);
        assert!(record.baseline);
    }

    #[test]
    fn test_parallel_speedup_against_baseline() {
        let seq = sample(Variant::sequential(3, "Sequential", "fam"), 1, 1.0);
        let par = sample(Variant::parallel(1, "Worker", "fam"), 4, 0.25);
        let record = compute_metrics(&par, Some(&seq)).unwrap();
        assert!((record.speedup - 4.0).abs() < 1e-9);
        assert!((record.efficiency - 1.0).abs() < 1e-9);
        assert!(!record.baseline);
    }

    #[test]
    fn test_efficiency_is_exactly_speedup_over_threads() {
        let seq = sample(Variant::sequential(3, "Sequential", "fam"), 1, 1.0);
        let par = sample(Variant::parallel(1, "Worker", "fam"), 8, 0.52);
        let record = compute_metrics(&par, Some(&seq)).unwrap();
        // Derived, never independently perturbed.
        assert_eq!(record.efficiency, record.speedup / 8.0);
    }

    #[test]
    fn test_missing_baseline_is_an_error_not_a_default() {
        let par = sample(Variant::parallel(1, "Worker", "fam"), 4, 0.25);
        match compute_metrics(&par, None) {
            Err(MetricsError::MissingBaseline { variant, family }) => {
                assert_eq!(variant, "Worker");
                assert_eq!(family, "fam");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_record_carries_the_sample_measurements() {
        let mut seq = sample(Variant::sequential(3, "Sequential", "fam"), 1, 2.5);
        seq.mean_value = Some(1.99998);
        let record = compute_metrics(&seq, None).unwrap();
        assert_eq!(record.method, "Sequential");
        assert_eq!(record.threads, 1);
        assert!((record.mean_time_secs - 2.5).abs() < 1e-12);
        assert_eq!(record.mean_value, Some(1.99998));
    }
}
