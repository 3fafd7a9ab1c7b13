//! Output module for concentration profiles
//!
//! This module provides tools to output profiles in two formats:
//! - **Visualization**: SVG/PNG plots of `Cg/Cg₀` against `z` using plotters
//! - **Export**: CSV data for external analysis
//!
//! # Architecture
//!
//! ```text
//! output/
//! ├── mod.rs              ← This file (OutputError)
//! ├── visualization/      ← Plots
//! │   ├── mod.rs
//! │   ├── config.rs
//! │   └── profile.rs
//! └── export/             ← Data export
//!     ├── mod.rs
//!     └── csv.rs
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use biotrickle_rs::models::FilterParameters;
//! use biotrickle_rs::output::{export_profile_csv, plot_profile};
//! use biotrickle_rs::profile::solve_profile;
//! use biotrickle_rs::solver::linspace;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let z = linspace(0.0, 5.0, 100);
//! let profile = solve_profile(0.000195, &z, &FilterParameters::ammonia_reference())?;
//!
//! export_profile_csv(&profile, "profile.csv", None)?;
//! plot_profile(&profile, "profile.svg", None)?;
//! # Ok(())
//! # }
//! ```

use thiserror::Error;

pub mod visualization;
pub mod export;

// Re-export commonly used items for convenience
pub use visualization::{plot_profile, plot_profile_comparison, PlotConfig};

pub use export::{export_profile_csv, export_profiles_csv, CsvConfig, CsvExporter, CsvMetadata, Exporter};

/// Errors raised while exporting or plotting profiles
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Nothing to write or draw
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Series that must be co-indexed have different lengths
    #[error("Data length mismatch: {0}")]
    LengthMismatch(String),

    /// NaN or infinite values
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Backend failure while drawing
    #[error("Drawing error: {0}")]
    Drawing(String),
}

/// Convenience type for `Result<T, OutputError>`
pub type OutputResult<T> = Result<T, OutputError>;
