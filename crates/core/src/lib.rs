// Copyright 2025 Parabench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Benchmark orchestration and statistics engine for parabench.
//!
//! parabench drives an external computational kernel through a matrix of
//! (algorithm variant × thread count) configurations, one child process at a
//! time, and reduces the timings to speedup and efficiency figures against
//! the matching sequential baseline. The kernels themselves are opaque:
//! they are reached only through their argument vector and a one-line
//! comma-separated stdout contract.
//!
//! # Quick Start
//!
//! ```no_run
//! use parabench_core::kernels::{self, IntegrationParams};
//! use parabench_core::{run_experiment, ProcessInvoker, RunOptions};
//!
//! let target = kernels::numerical_integration(IntegrationParams::default());
//! let opts = RunOptions::default();
//! let invoker = ProcessInvoker::new(opts.timeout);
//!
//! let report = run_experiment(&target, &opts, &invoker)?;
//! for record in &report.records {
//!     println!("{} x{}: {:.2}x", record.method, record.threads, record.speedup);
//! }
//! # Ok::<(), parabench_core::RunError>(())
//! ```
//!
//! # Modules
//!
//! - [`process`] - child-process invocation with a hard wall-clock timeout
//! - [`parse`] - kernel stdout parsing
//! - [`accuracy`] - result validation against known analytic constants
//! - [`trial`] - the per-trial pipeline behind the [`KernelInvoker`] seam
//! - [`aggregate`] - reduction of repeated trials to point estimates
//! - [`metrics`] - speedup and efficiency against the family baseline
//! - [`driver`] - full-matrix experiment orchestration
//! - [`spec`] - benchmark target descriptions and run configuration
//! - [`kernels`] - the two declarative benchmark targets

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod accuracy;
pub mod aggregate;
pub mod driver;
pub mod kernels;
pub mod metrics;
pub mod parse;
pub mod process;
pub mod spec;
pub mod trial;

pub use aggregate::{AggregateSample, AggregationError};
pub use driver::{run_experiment, ExperimentReport, FailedConfiguration, RunError};
pub use metrics::{compute_metrics, MetricsError, MetricsRecord};
pub use spec::{BenchmarkSpec, ExpectedValue, RunOptions, Variant, VariantKind};
pub use trial::{KernelInvoker, ProcessInvoker, Trial, TrialError};
