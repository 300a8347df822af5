// Copyright 2025 Parabench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Full-matrix experiment orchestration.

use crate::aggregate::{self, AggregationError};
use crate::metrics::{self, MetricsError, MetricsRecord};
use crate::spec::{BenchmarkSpec, RunOptions, VariantKind};
use crate::trial::{KernelInvoker, TrialError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use tracing::{error, info};

/// A configuration that produced no metrics record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailedConfiguration {
    /// Variant label.
    pub method: String,
    /// Thread count of the failed configuration.
    pub threads: u32,
    /// Human-readable failure description.
    pub reason: String,
}

/// Everything one sweep produced: the ordered records plus the
/// configurations that were skipped along the way. Failed configurations
/// are absent from `records`, never represented by sentinel rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentReport {
    /// Kernel identifier, used for output file names.
    pub kernel: String,
    /// Kernel title, used for report headings.
    pub title: String,
    /// Records grouped by method: baselines in declaration order, then each
    /// parallel variant's thread sweep. Consumers must not reorder.
    pub records: Vec<MetricsRecord>,
    /// Configurations skipped during the sweep.
    pub failures: Vec<FailedConfiguration>,
}

/// A failure that aborts the whole sweep.
#[derive(Debug, Error)]
pub enum RunError {
    /// The benchmarked executable could not be launched.
    #[error(transparent)]
    Launch(TrialError),
    /// Baseline pairing was violated; indicates a harness bug.
    #[error(transparent)]
    Metrics(#[from] MetricsError),
}

/// Run the full (variant × thread count) matrix for one benchmark target.
///
/// Sequential baselines run first, pinned to one thread, and are stored in
/// a family-keyed map; parallel variants then sweep the configured thread
/// counts against their own family's baseline. Configurations never run
/// concurrently with each other: competing children would contend for
/// cores and corrupt the timings.
///
/// A configuration that fails to aggregate is recorded in
/// [`ExperimentReport::failures`] and the sweep continues; only a launch
/// failure (or a baseline-pairing bug) aborts the run.
pub fn run_experiment<I>(
    target: &BenchmarkSpec,
    opts: &RunOptions,
    invoker: &I,
) -> Result<ExperimentReport, RunError>
where
    I: KernelInvoker + ?Sized,
{
    let mut records = Vec::new();
    let mut failures = Vec::new();
    let mut baselines: HashMap<String, aggregate::AggregateSample> = HashMap::new();

    for variant in target.variants_of(VariantKind::Sequential) {
        info!(variant = %variant.label, "running sequential baseline");
        // Sequential kernels ignore the thread argument; 1 by convention.
        match aggregate::aggregate(invoker, target, variant, 1, opts) {
            Ok(sample) => {
                records.push(metrics::compute_metrics(&sample, None)?);
                baselines.insert(variant.family.clone(), sample);
            }
            Err(AggregationError::Launch(err)) => return Err(RunError::Launch(err)),
            Err(err) => {
                error!(variant = %variant.label, error = %err, "baseline failed");
                failures.push(FailedConfiguration {
                    method: variant.label.clone(),
                    threads: 1,
                    reason: err.to_string(),
                });
            }
        }
    }

    for variant in target.variants_of(VariantKind::Parallel) {
        let Some(baseline) = baselines.get(&variant.family) else {
            // Speedup is undefined without the family baseline; mark every
            // configuration of this variant failed rather than defaulting.
            for &threads in &target.threads {
                failures.push(FailedConfiguration {
                    method: variant.label.clone(),
                    threads,
                    reason: format!("no sequential baseline for family {:?}", variant.family),
                });
            }
            continue;
        };

        info!(variant = %variant.label, "running parallel sweep");
        for &threads in &target.threads {
            match aggregate::aggregate(invoker, target, variant, threads, opts) {
                Ok(sample) => records.push(metrics::compute_metrics(&sample, Some(baseline))?),
                Err(AggregationError::Launch(err)) => return Err(RunError::Launch(err)),
                Err(err) => {
                    error!(variant = %variant.label, threads, error = %err, "configuration failed");
                    failures.push(FailedConfiguration {
                        method: variant.label.clone(),
                        threads,
                        reason: err.to_string(),
                    });
                }
            }
        }
    }

    Ok(ExperimentReport {
        kernel: target.id.clone(),
        title: target.title.clone(),
        records,
        failures,
    })
}
