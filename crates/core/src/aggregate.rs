// Copyright 2025 Parabench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Reduction of repeated trials into per-configuration point estimates.

use crate::spec::{BenchmarkSpec, RunOptions, Variant};
use crate::trial::{KernelInvoker, TrialError};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// Mean measurements over the surviving trials of one configuration.
///
/// Produced by [`aggregate`] and consumed by the metrics engine. A family's
/// sequential sample is additionally kept around, read-only, as the baseline
/// for every parallel configuration of that family.
#[derive(Debug, Clone)]
pub struct AggregateSample {
    /// The variant the trials ran.
    pub variant: Variant,
    /// Thread count the trials ran with.
    pub threads: u32,
    /// Arithmetic mean wall-clock time over surviving trials.
    pub mean_time: Duration,
    /// Arithmetic mean result value, for kernels that report one.
    pub mean_value: Option<f64>,
    /// Number of trials that survived.
    pub successes: usize,
}

/// A configuration that produced too few usable trials, or a failure that
/// dooms the whole sweep.
#[derive(Debug, Error)]
pub enum AggregationError {
    /// Fewer trials survived than the configured minimum. The configuration
    /// is skipped; the sweep continues.
    #[error("{variant} with {threads} thread(s): only {successes}/{required} trials usable")]
    InsufficientTrials {
        /// Variant label.
        variant: String,
        /// Thread count of the skipped configuration.
        threads: u32,
        /// Trials that survived.
        successes: usize,
        /// Minimum required by policy.
        required: usize,
    },
    /// The executable could not be launched at all; aborts the sweep.
    #[error(transparent)]
    Launch(TrialError),
}

/// Run `opts.repeats` trials of one configuration and reduce the survivors
/// to arithmetic means.
///
/// Trials run strictly one after another: the kernel's internal worker
/// threads are the only concurrency, so wall-clock times are not skewed by
/// competing children. Failed trials are dropped from the sample and
/// logged with enough context to diagnose without rerunning. There is no
/// outlier rejection beyond that drop.
pub fn aggregate<I>(
    invoker: &I,
    target: &BenchmarkSpec,
    variant: &Variant,
    threads: u32,
    opts: &RunOptions,
) -> Result<AggregateSample, AggregationError>
where
    I: KernelInvoker + ?Sized,
{
    let mut times: Vec<Duration> = Vec::with_capacity(opts.repeats);
    let mut values: Vec<f64> = Vec::new();

    for attempt in 1..=opts.repeats {
        match invoker.invoke(target, variant, threads) {
            Ok(trial) => {
                times.push(trial.elapsed);
                if let Some(value) = trial.value {
                    values.push(value);
                }
            }
            Err(err) if err.is_fatal() => return Err(AggregationError::Launch(err)),
            Err(err) => {
                warn!(
                    variant = %variant.label,
                    threads,
                    attempt,
                    error = %err,
                    "trial dropped"
                );
            }
        }
    }

    let required = opts.min_successes.max(1);
    if times.len() < required {
        return Err(AggregationError::InsufficientTrials {
            variant: variant.label.clone(),
            threads,
            successes: times.len(),
            required,
        });
    }

    let sample = AggregateSample {
        variant: variant.clone(),
        threads,
        mean_time: mean_duration(&times),
        mean_value: mean(&values),
        successes: times.len(),
    };
    info!(
        variant = %variant.label,
        threads,
        mean_secs = sample.mean_time.as_secs_f64(),
        successes = sample.successes,
        "configuration aggregated"
    );
    Ok(sample)
}

fn mean_duration(times: &[Duration]) -> Duration {
    times.iter().sum::<Duration>() / times.len() as u32
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
