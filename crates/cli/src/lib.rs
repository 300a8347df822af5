//! Command-line interface for parabench.
//!
//! One subcommand per kernel family. Each sweep prints any failed
//! configurations first, then the results table and an ASCII speedup
//! chart, and optionally persists CSV/JSON/markdown artifacts with
//! `--output`.

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use parabench_core::kernels::{self, IntegrationParams, MatMulParams};
use parabench_core::{
    run_experiment, BenchmarkSpec, ExperimentReport, KernelInvoker, ProcessInvoker, RunOptions,
    Trial, TrialError, Variant, VariantKind,
};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// parabench CLI.
#[derive(Parser, Debug)]
#[command(name = "parabench")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Benchmark the numerical-integration kernel.
    Integration(IntegrationArgs),
    /// Benchmark the matrix-multiplication kernel.
    Matmul(MatmulArgs),
}

/// Flags shared by every sweep.
#[derive(Args, Debug)]
pub struct SweepArgs {
    /// Thread counts to sweep.
    #[arg(long, value_delimiter = ',', default_values_t = vec![1u32, 2, 4, 8, 16])]
    pub threads: Vec<u32>,

    /// Trials per configuration.
    #[arg(long, default_value_t = 3)]
    pub runs: usize,

    /// Minimum surviving trials for a configuration to count.
    #[arg(long, default_value_t = 1)]
    pub min_successes: usize,

    /// Directory to write CSV/JSON/markdown artifacts into.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the integration benchmark.
#[derive(Args, Debug)]
pub struct IntegrationArgs {
    /// Path to the numerical-integration executable.
    #[arg(long, default_value = "./numerical-integration")]
    pub executable: PathBuf,

    /// Lower integration bound.
    #[arg(long, default_value_t = 0.0)]
    pub lower: f64,

    /// Upper integration bound.
    #[arg(long, default_value_t = 3.14159)]
    pub upper: f64,

    /// Integration step size.
    #[arg(long, default_value_t = 0.0001)]
    pub step: f64,

    /// Per-trial timeout in seconds.
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Shared sweep flags.
    #[command(flatten)]
    pub sweep: SweepArgs,
}

/// Arguments for the matrix-multiplication benchmark.
#[derive(Args, Debug)]
pub struct MatmulArgs {
    /// Path to the matrix-multiplication executable.
    #[arg(long, default_value = "./blocked-matrix-multiplication")]
    pub executable: PathBuf,

    /// Square matrix dimension.
    #[arg(long, default_value_t = 1024)]
    pub size: usize,

    /// Block dimension for the blocked algorithm.
    #[arg(long, default_value_t = 128)]
    pub block_size: usize,

    /// Per-trial timeout in seconds.
    #[arg(long, default_value_t = 60)]
    pub timeout_secs: u64,

    /// Shared sweep flags.
    #[command(flatten)]
    pub sweep: SweepArgs,
}

/// Run the CLI with the given arguments.
pub fn run() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Integration(args) => {
            let opts = options(&args.sweep, args.timeout_secs);
            let target = kernels::numerical_integration(IntegrationParams {
                lower: args.lower,
                upper: args.upper,
                step: args.step,
                executable: args.executable,
                threads: args.sweep.threads.clone(),
            });
            execute(target, opts, args.sweep.output)
        }
        Commands::Matmul(args) => {
            let opts = options(&args.sweep, args.timeout_secs);
            let target = kernels::matrix_multiplication(MatMulParams {
                size: args.size,
                block_size: args.block_size,
                executable: args.executable,
                threads: args.sweep.threads.clone(),
            })?;
            execute(target, opts, args.sweep.output)
        }
    }
}

fn options(sweep: &SweepArgs, timeout_secs: u64) -> RunOptions {
    RunOptions {
        repeats: sweep.runs,
        timeout: Duration::from_secs(timeout_secs),
        min_successes: sweep.min_successes,
    }
}

fn execute(target: BenchmarkSpec, opts: RunOptions, output: Option<PathBuf>) -> anyhow::Result<()> {
    if !target.executable.exists() {
        bail!(
            "executable {} not found; compile the kernel first",
            target.executable.display()
        );
    }
    if target.threads.iter().any(|&t| t == 0) {
        bail!("thread counts must be at least 1");
    }

    print_banner(&target, &opts);

    let bar = progress_bar(&target, &opts);
    let invoker = ProgressInvoker {
        inner: ProcessInvoker::new(opts.timeout),
        bar: bar.clone(),
    };

    let report = run_experiment(&target, &opts, &invoker)
        .with_context(|| format!("benchmark run for {} failed", target.title))?;
    bar.finish_and_clear();
    tracing::info!(
        records = report.records.len(),
        failures = report.failures.len(),
        "sweep complete"
    );

    print_report(&report);

    if let Some(dir) = output {
        parabench_report::io::write_all_outputs(&report, &dir)
            .with_context(|| format!("writing results to {}", dir.display()))?;
        println!("\nResults written to {}", dir.display());
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn print_banner(target: &BenchmarkSpec, opts: &RunOptions) {
    println!("{}", format!("{} Performance Testing", target.title).bold());
    println!("{}", "=".repeat(50));
    println!("Executable:   {}", target.executable.display());
    println!("Fixed args:   {}", target.fixed_args.join(" "));
    println!("Thread sweep: {:?}", target.threads);
    println!("Runs per configuration: {}", opts.repeats);
    if let Some(expected) = target.expected {
        println!(
            "Expected result: {} (within {}%)",
            expected.value,
            expected.relative_tolerance * 100.0
        );
    }
    println!("{}", "-".repeat(50));
}

fn progress_bar(target: &BenchmarkSpec, opts: &RunOptions) -> ProgressBar {
    let sequential = target.variants_of(VariantKind::Sequential).count() as u64;
    let parallel = target.variants_of(VariantKind::Parallel).count() as u64;
    let total = (sequential + parallel * target.threads.len() as u64) * opts.repeats as u64;

    let bar = ProgressBar::new(total);
    bar.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} trials {msg}",
        )
        .expect("static progress template is valid")
        .progress_chars("#>-"),
    );
    bar
}

fn print_report(report: &ExperimentReport) {
    if !report.failures.is_empty() {
        println!();
        print!(
            "{}",
            parabench_report::table::render_failures(report).as_str().red()
        );
    }

    println!();
    print!("{}", parabench_report::table::render_table(report));

    let chart = parabench_report::chart::speedup_chart(report);
    if !chart.is_empty() {
        println!();
        print!("{chart}");
    }
}

/// Ticks the progress bar once per trial, leaving the engine display-free.
struct ProgressInvoker {
    inner: ProcessInvoker,
    bar: ProgressBar,
}

impl KernelInvoker for ProgressInvoker {
    fn invoke(
        &self,
        target: &BenchmarkSpec,
        variant: &Variant,
        threads: u32,
    ) -> Result<Trial, TrialError> {
        self.bar
            .set_message(format!("{} x {}", variant.label, threads));
        let result = self.inner.invoke(target, variant, threads);
        self.bar.inc(1);
        result
    }
}
