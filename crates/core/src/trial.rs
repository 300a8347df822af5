// Copyright 2025 Parabench Contributors
// SPDX-License-Identifier: Apache-2.0

//! One kernel invocation: process launch, output parse, accuracy check.

use crate::accuracy;
use crate::parse::{self, ParseError};
use crate::process::{self, ProcessOutcome};
use crate::spec::{BenchmarkSpec, Variant};
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// One raw kernel execution that produced a usable measurement.
///
/// Trials are ephemeral: created and consumed inside a single aggregation
/// step, never persisted individually.
#[derive(Debug, Clone)]
pub struct Trial {
    /// Method selector echoed back by the kernel.
    pub variant_id: u32,
    /// Thread count echoed back by the kernel.
    pub threads: u32,
    /// Measured wall-clock time.
    pub elapsed: Duration,
    /// Computed result value, for kernels that report one.
    pub value: Option<f64>,
}

/// Why a single trial produced no usable measurement.
#[derive(Debug, Error)]
pub enum TrialError {
    /// The executable could not be spawned. Fatal: every later trial of the
    /// sweep would fail the same way.
    #[error("failed to launch {executable}: {reason}")]
    Launch {
        /// Path that failed to spawn.
        executable: String,
        /// Operating-system error text.
        reason: String,
    },
    /// The trial exceeded its wall-clock budget and was killed.
    #[error("timed out after {timeout:?}")]
    TimedOut {
        /// The budget that expired.
        timeout: Duration,
    },
    /// The kernel exited with a non-zero status.
    #[error("kernel exited with status {code}: {stderr}")]
    NonZeroExit {
        /// Exit code; -1 when signal-terminated.
        code: i32,
        /// Captured standard error, trimmed.
        stderr: String,
    },
    /// The kernel wrote something other than the expected output line.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl TrialError {
    /// Whether this failure dooms the whole run rather than one trial.
    pub fn is_fatal(&self) -> bool {
        matches!(self, TrialError::Launch { .. })
    }
}

/// The seam between the harness and the benchmarked executable. The
/// production implementation spawns a child process; tests script the
/// outcomes instead.
pub trait KernelInvoker {
    /// Run one trial of `variant` with `threads` worker threads.
    fn invoke(
        &self,
        target: &BenchmarkSpec,
        variant: &Variant,
        threads: u32,
    ) -> Result<Trial, TrialError>;
}

/// Production invoker: one child process per trial, argv built as
/// `<fixed args...> <variant id> <thread count>`.
#[derive(Debug, Clone)]
pub struct ProcessInvoker {
    /// Wall-clock budget for each child process.
    pub timeout: Duration,
}

impl ProcessInvoker {
    /// Invoker with the given per-trial timeout.
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl KernelInvoker for ProcessInvoker {
    fn invoke(
        &self,
        target: &BenchmarkSpec,
        variant: &Variant,
        threads: u32,
    ) -> Result<Trial, TrialError> {
        let mut args = target.fixed_args.clone();
        args.push(variant.id.to_string());
        args.push(threads.to_string());

        let (stdout, stderr, exit_code) =
            match process::run(&target.executable, &args, self.timeout) {
                ProcessOutcome::Completed {
                    stdout,
                    stderr,
                    exit_code,
                } => (stdout, stderr, exit_code),
                ProcessOutcome::TimedOut => {
                    return Err(TrialError::TimedOut {
                        timeout: self.timeout,
                    })
                }
                ProcessOutcome::LaunchFailed { reason } => {
                    return Err(TrialError::Launch {
                        executable: target.executable.display().to_string(),
                        reason,
                    })
                }
            };

        if exit_code != 0 {
            return Err(TrialError::NonZeroExit {
                code: exit_code,
                stderr: stderr.trim().to_string(),
            });
        }

        let output = parse::parse(&stdout, target.field_count())?;
        let elapsed = Duration::try_from_secs_f64(output.elapsed_secs).map_err(|_| {
            ParseError::InvalidNumber {
                field: output.elapsed_secs.to_string(),
                raw: stdout.trim().to_string(),
            }
        })?;

        if let (Some(expected), Some(value)) = (target.expected, output.value) {
            let check = accuracy::validate(value, expected.value, expected.relative_tolerance);
            if !check.ok {
                // Flag the trial but keep it; the timing is still usable.
                warn!(
                    variant = %variant.label,
                    threads,
                    value,
                    relative_error = check.relative_error,
                    tolerance = expected.relative_tolerance,
                    "kernel result outside tolerance"
                );
            }
        }

        Ok(Trial {
            variant_id: output.variant_id,
            threads: output.threads,
            elapsed,
            value: output.value,
        })
    }
}
