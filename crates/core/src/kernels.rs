// Copyright 2025 Parabench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Declarative benchmark targets for the two kernel families.
//!
//! One configurable engine, two descriptions: the numerical-integration
//! kernel and the matrix-multiplication kernel differ only in their fixed
//! argument prefix, variant table and output schema.

use crate::spec::{BenchmarkSpec, ExpectedValue, Variant};
use std::path::PathBuf;
use thiserror::Error;

/// Default thread-count sweep shared by both kernels.
pub const DEFAULT_THREADS: [u32; 5] = [1, 2, 4, 8, 16];

/// Integral of sin(x) over [0, π].
const INTEGRATION_EXPECTED: f64 = 2.0;
/// Relative tolerance applied to the integration result.
const INTEGRATION_TOLERANCE: f64 = 0.01;

/// Parameters for the numerical-integration kernel.
#[derive(Debug, Clone)]
pub struct IntegrationParams {
    /// Lower integration bound.
    pub lower: f64,
    /// Upper integration bound.
    pub upper: f64,
    /// Integration step size.
    pub step: f64,
    /// Path to the kernel executable.
    pub executable: PathBuf,
    /// Thread-count sweep.
    pub threads: Vec<u32>,
}

impl Default for IntegrationParams {
    fn default() -> Self {
        Self {
            lower: 0.0,
            upper: 3.14159,
            step: 0.0001,
            executable: PathBuf::from("./numerical-integration"),
            threads: DEFAULT_THREADS.to_vec(),
        }
    }
}

/// Parameters for the matrix-multiplication kernel.
#[derive(Debug, Clone)]
pub struct MatMulParams {
    /// Square matrix dimension.
    pub size: usize,
    /// Block dimension for the blocked algorithm.
    pub block_size: usize,
    /// Path to the kernel executable.
    pub executable: PathBuf,
    /// Thread-count sweep.
    pub threads: Vec<u32>,
}

impl Default for MatMulParams {
    fn default() -> Self {
        Self {
            size: 1024,
            block_size: 128,
            executable: PathBuf::from("./blocked-matrix-multiplication"),
            threads: DEFAULT_THREADS.to_vec(),
        }
    }
}

/// Invalid kernel parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KernelConfigError {
    /// The blocked algorithm needs the matrix to tile evenly.
    #[error("matrix size {size} is not divisible by block size {block_size}")]
    BlockMismatch {
        /// Matrix dimension.
        size: usize,
        /// Block dimension.
        block_size: usize,
    },
}

/// Benchmark target for the numerical-integration kernel.
///
/// Kernel argv: `<lower> <upper> <step> <method> <threads>`. The kernel
/// reports the computed area as a fourth output field, checked against
/// ∫sin(x)dx = 2 over [0, π] at 1% relative tolerance. Rectangle and
/// trapezoidal methods form separate families, each with its own
/// sequential baseline.
pub fn numerical_integration(params: IntegrationParams) -> BenchmarkSpec {
    BenchmarkSpec {
        id: "integration".to_string(),
        title: "Numerical Integration".to_string(),
        executable: params.executable,
        fixed_args: vec![
            params.lower.to_string(),
            params.upper.to_string(),
            params.step.to_string(),
        ],
        variants: vec![
            Variant::parallel(1, "Rectangle (OpenMP)", "rectangle"),
            Variant::parallel(2, "Trapezoidal (OpenMP)", "trapezoidal"),
            Variant::sequential(3, "Rectangle (Sequential)", "rectangle"),
            Variant::sequential(4, "Trapezoidal (Sequential)", "trapezoidal"),
        ],
        threads: params.threads,
        reports_value: true,
        expected: Some(ExpectedValue {
            value: INTEGRATION_EXPECTED,
            relative_tolerance: INTEGRATION_TOLERANCE,
        }),
    }
}

/// Benchmark target for the matrix-multiplication kernel.
///
/// Kernel argv: `<size> <block size> <method> <threads>`. The kernel
/// reports no result value, and both parallel variants compare against the
/// single sequential baseline.
pub fn matrix_multiplication(params: MatMulParams) -> Result<BenchmarkSpec, KernelConfigError> {
    if params.block_size == 0 || params.size % params.block_size != 0 {
        return Err(KernelConfigError::BlockMismatch {
            size: params.size,
            block_size: params.block_size,
        });
    }

    Ok(BenchmarkSpec {
        id: "matmul".to_string(),
        title: "Matrix Multiplication".to_string(),
        executable: params.executable,
        fixed_args: vec![params.size.to_string(), params.block_size.to_string()],
        variants: vec![
            Variant::parallel(1, "Blocked", "matmul"),
            Variant::parallel(2, "Standard", "matmul"),
            Variant::sequential(3, "Sequential", "matmul"),
        ],
        threads: params.threads,
        reports_value: false,
        expected: None,
    })
}
