//! Rendering and persistence for parabench sweep results.
//!
//! Everything here is formatting: the engine hands over an
//! [`ExperimentReport`](parabench_core::ExperimentReport) and these modules
//! turn it into terminal tables, an ASCII speedup chart, and CSV, JSON and
//! markdown artifacts. Record order is preserved everywhere; it groups rows
//! by method and the renderers rely on that.
//!
//! # Modules
//!
//! - [`table`] - fixed-width terminal tables
//! - [`chart`] - ASCII speedup chart
//! - [`csv`] - CSV export
//! - [`markdown`] - markdown summary generation
//! - [`io`] - artifact persistence under one output directory

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod chart;
pub mod csv;
pub mod io;
pub mod markdown;
pub mod table;
