//! Export module for concentration profiles.
//!
//! # Architecture
//!
//! The [`Exporter`] trait abstracts the export format. Each format is an
//! independent implementation in its own sub-module; CSV is the only one
//! shipped.
//!
//! # Usage example
//!
//! ```rust,no_run
//! use biotrickle_rs::models::FilterParameters;
//! use biotrickle_rs::output::export::{CsvExporter, Exporter};
//! use biotrickle_rs::profile::solve_profile;
//! use biotrickle_rs::solver::linspace;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let z = linspace(0.0, 5.0, 100);
//! let profile = solve_profile(0.000195, &z, &FilterParameters::ammonia_reference())?;
//!
//! let exporter = CsvExporter::default();
//! exporter.export_single(&profile, "ammonia.csv")?;
//! # Ok(())
//! # }
//! ```

pub mod csv;

pub use csv::{export_profile_csv, export_profiles_csv, CsvConfig, CsvExporter, CsvMetadata};

use std::path::Path;

use crate::profile::ConcentrationProfile;

/// Abstraction trait for all export formats.
///
/// Each format manages its own errors via the associated type, so the
/// caller can react to the precise failure.
pub trait Exporter {
    /// Error type specific to this export format.
    type Error: std::error::Error;

    /// Exports one profile: height, concentration and normalized concentration.
    fn export_single(&self, profile: &ConcentrationProfile, path: impl AsRef<Path>) -> Result<(), Self::Error>;

    /// Exports several profiles sharing the same heights, one labelled
    /// normalized-concentration column per profile.
    fn export_multi(
        &self,
        profiles: &[ConcentrationProfile],
        labels: &[&str],
        path: impl AsRef<Path>,
    ) -> Result<(), Self::Error>;
}
