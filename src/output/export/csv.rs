//! CSV export of concentration profiles
//!
//! The files open in any spreadsheet, pandas or MATLAB.
//!
//! # Features
//!
//! - **Simple interface**: one call per profile
//! - **Metadata support**: optional `#` header with the filter parameters
//! - **Customizable**: delimiter, precision, notation
//! - **Several profiles**: one normalized column per profile
//! - **Validation**: checks for NaN, empty data, mismatched lengths
//!
//! # Output
//!
//! ```csv
//! # Biotrickling Filter Profile
//! # Generated: 2026-02-11T15:30:00+00:00
//! # Model: Gas-phase biotrickling filter
//! # Solver: Dormand-Prince 5(4)
//! # Inlet Concentration: 0.000195 mg/L
//! #
//! z,Cg (mg/L),Cg/Cg0
//! 0.000000e0,1.950000e-4,1.000000e0
//! ...
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::models::FilterParameters;
use crate::output::export::Exporter;
use crate::output::{OutputError, OutputResult};
use crate::profile::ConcentrationProfile;

// =============================================================================
// Configuration Structures
// =============================================================================

/// Configuration for CSV export
///
/// # Example
///
/// ```rust
/// use biotrickle_rs::output::CsvConfig;
///
/// let config = CsvConfig {
///     delimiter: ';',
///     precision: 10,
///     ..Default::default()
/// };
/// assert!(config.scientific);
/// ```
#[derive(Clone, Debug)]
pub struct CsvConfig {
    /// Column delimiter (default: ',')
    pub delimiter: char,

    /// Decimal separator (default: '.')
    pub decimal_separator: char,

    /// Number of digits after the decimal point (default: 6)
    pub precision: usize,

    /// Write numbers in scientific notation (default: true)
    ///
    /// Concentrations span several decades along the column; fixed
    /// notation with few decimals flattens the outlet values to zero.
    pub scientific: bool,

    /// Include metadata header comments (default: false)
    pub include_metadata: bool,

    /// Metadata to include in header
    pub metadata: Option<CsvMetadata>,

    /// Header of the height column (default: "z")
    pub height_header: String,

    /// Header of the concentration column (default: "Cg (mg/L)")
    pub concentration_header: String,

    /// Header of the normalized column (default: "Cg/Cg0")
    pub normalized_header: String,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            decimal_separator: '.',
            precision: 6,
            scientific: true,
            include_metadata: false,
            metadata: None,
            height_header: "z".to_string(),
            concentration_header: "Cg (mg/L)".to_string(),
            normalized_header: "Cg/Cg0".to_string(),
        }
    }
}

impl CsvConfig {
    /// European CSV format (semicolon, comma for decimal)
    pub fn european() -> Self {
        Self {
            delimiter: ';',
            decimal_separator: ',',
            ..Default::default()
        }
    }

    /// High precision (12 digits)
    pub fn high_precision() -> Self {
        Self {
            precision: 12,
            ..Default::default()
        }
    }

    /// Builder pattern: set delimiter
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Builder pattern: set precision
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Builder pattern: fixed-point notation
    pub fn fixed(mut self) -> Self {
        self.scientific = false;
        self
    }

    /// Builder pattern: enable metadata
    pub fn with_metadata(mut self, metadata: CsvMetadata) -> Self {
        self.include_metadata = true;
        self.metadata = Some(metadata);
        self
    }
}

/// Metadata for CSV header comments
///
/// Only non-None fields are written.
#[derive(Clone, Debug, Default)]
pub struct CsvMetadata {
    /// Model name (e.g., "Gas-phase biotrickling filter")
    pub model_name: Option<String>,

    /// Solver name (e.g., "Dormand-Prince 5(4)")
    pub solver_name: Option<String>,

    /// Inlet concentration Cg₀
    pub inlet_concentration: Option<f64>,

    /// Filter parameters
    pub parameters: Option<FilterParameters>,

    /// Additional custom parameters
    pub custom: Vec<(String, String)>,
}

impl CsvMetadata {
    /// Metadata describing one solve
    pub fn from_parameters(model: &str, solver: &str, inlet_concentration: f64, params: &FilterParameters) -> Self {
        Self {
            model_name: Some(model.to_string()),
            solver_name: Some(solver.to_string()),
            inlet_concentration: Some(inlet_concentration),
            parameters: Some(*params),
            ..Default::default()
        }
    }

    /// Add custom parameter
    pub fn add_custom(&mut self, key: &str, value: &str) {
        self.custom.push((key.to_string(), value.to_string()));
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn write_metadata_header<W: Write>(out: &mut W, metadata: &CsvMetadata) -> OutputResult<()> {
    writeln!(out, "# Biotrickling Filter Profile")?;
    writeln!(out, "# Generated: {}", chrono::Utc::now().to_rfc3339())?;

    if let Some(model) = &metadata.model_name {
        writeln!(out, "# Model: {}", model)?;
    }
    if let Some(solver) = &metadata.solver_name {
        writeln!(out, "# Solver: {}", solver)?;
    }
    if let Some(cg0) = metadata.inlet_concentration {
        writeln!(out, "# Inlet Concentration: {} mg/L", cg0)?;
    }

    if let Some(p) = &metadata.parameters {
        writeln!(out, "# Alpha: {}", p.alpha)?;
        writeln!(out, "# Superficial Velocity: {}", p.superficial_velocity)?;
        writeln!(out, "# Biomass: {}", p.biomass)?;
        writeln!(out, "# Yield Coefficient: {}", p.yield_coefficient)?;
        writeln!(out, "# Max Growth Rate: {}", p.max_growth_rate)?;
        writeln!(out, "# Half Saturation: {}", p.half_saturation)?;
        writeln!(out, "# Partition: {}", p.partition)?;
        writeln!(out, "# Biofilm Thickness: {}", p.biofilm_thickness)?;
    }

    for (key, value) in &metadata.custom {
        writeln!(out, "# {}: {}", key, value)?;
    }

    writeln!(out, "#")?;
    Ok(())
}

/// Format number with configured precision, notation and decimal separator
fn format_number(value: f64, config: &CsvConfig) -> String {
    let formatted = if config.scientific {
        format!("{:.prec$e}", value, prec = config.precision)
    } else {
        format!("{:.prec$}", value, prec = config.precision)
    };

    if config.decimal_separator != '.' {
        formatted.replace('.', &config.decimal_separator.to_string())
    } else {
        formatted
    }
}

fn validate_profile(profile: &ConcentrationProfile, label: &str) -> OutputResult<()> {
    if profile.is_empty() || profile.positions.is_empty() {
        return Err(OutputError::EmptyData(format!("profile {} has no points", label)));
    }
    if profile.positions.len() != profile.concentrations.len() {
        return Err(OutputError::LengthMismatch(format!(
            "profile {}: {} heights versus {} concentrations",
            label,
            profile.positions.len(),
            profile.concentrations.len()
        )));
    }
    if profile.positions.iter().any(|z| !z.is_finite()) {
        return Err(OutputError::InvalidData(format!("NaN or Inf in heights of profile {}", label)));
    }
    if profile.concentrations.iter().any(|c| !c.is_finite()) || !profile.inlet.is_finite() {
        return Err(OutputError::InvalidData(format!("NaN or Inf in concentrations of profile {}", label)));
    }
    Ok(())
}

// =============================================================================
// Export Functions
// =============================================================================

/// Export one profile to CSV
///
/// Columns: height, concentration, normalized concentration.
///
/// # Errors
///
/// - Empty profile
/// - Mismatched lengths
/// - NaN or Inf values
/// - File creation errors
pub fn export_profile_csv(
    profile: &ConcentrationProfile,
    output_path: impl AsRef<Path>,
    configuration: Option<&CsvConfig>,
) -> OutputResult<()> {

    // ============================= Validation =============================

    validate_profile(profile, "0")?;

    let binding = CsvConfig::default();
    let configuration = configuration.unwrap_or(&binding);

    // ============================= Write ==================================

    let mut out = BufWriter::new(File::create(output_path.as_ref())?);

    if configuration.include_metadata {
        if let Some(metadata) = &configuration.metadata {
            write_metadata_header(&mut out, metadata)?;
        }
    }

    let d = configuration.delimiter;
    writeln!(
        out,
        "{}{d}{}{d}{}",
        configuration.height_header, configuration.concentration_header, configuration.normalized_header
    )?;

    for ((z, cg), ratio) in profile.iter().zip(profile.normalized()) {
        writeln!(
            out,
            "{}{d}{}{d}{}",
            format_number(z, configuration),
            format_number(cg, configuration),
            format_number(ratio, configuration)
        )?;
    }

    out.flush()?;
    log::debug!("Exported {} points to {}", profile.len(), output_path.as_ref().display());
    Ok(())
}

/// Export several profiles on the same heights to CSV
///
/// Columns: height, then `Cg/Cg₀` for each profile under its label.
pub fn export_profiles_csv(
    profiles: &[ConcentrationProfile],
    labels: &[&str],
    output_path: impl AsRef<Path>,
    configuration: Option<&CsvConfig>,
) -> OutputResult<()> {

    // ============================= Validation =============================

    let reference = profiles
        .first()
        .ok_or_else(|| OutputError::EmptyData("no profiles to export".to_string()))?;

    if profiles.len() != labels.len() {
        return Err(OutputError::LengthMismatch(format!(
            "{} profiles versus {} labels",
            profiles.len(),
            labels.len()
        )));
    }

    for (profile, label) in profiles.iter().zip(labels) {
        validate_profile(profile, label)?;
        if profile.positions != reference.positions {
            return Err(OutputError::LengthMismatch(format!(
                "profile {} is not on the same heights as profile {}",
                label, labels[0]
            )));
        }
    }

    let binding = CsvConfig::default();
    let configuration = configuration.unwrap_or(&binding);

    // ============================= Write ==================================

    let mut out = BufWriter::new(File::create(output_path.as_ref())?);

    if configuration.include_metadata {
        if let Some(metadata) = &configuration.metadata {
            write_metadata_header(&mut out, metadata)?;
        }
    }

    write!(out, "{}", configuration.height_header)?;
    for label in labels {
        write!(out, "{}{}", configuration.delimiter, label)?;
    }
    writeln!(out)?;

    let normalized: Vec<Vec<f64>> = profiles.iter().map(ConcentrationProfile::normalized).collect();

    for (i, z) in reference.positions.iter().enumerate() {
        write!(out, "{}", format_number(*z, configuration))?;
        for column in &normalized {
            write!(out, "{}{}", configuration.delimiter, format_number(column[i], configuration))?;
        }
        writeln!(out)?;
    }

    out.flush()?;
    Ok(())
}

// =============================================================================
// Exporter implementation
// =============================================================================

/// CSV implementation of [`Exporter`]
#[derive(Clone, Debug, Default)]
pub struct CsvExporter {
    pub config: CsvConfig,
}

impl CsvExporter {
    pub fn new(config: CsvConfig) -> Self {
        Self { config }
    }
}

impl Exporter for CsvExporter {
    type Error = OutputError;

    fn export_single(&self, profile: &ConcentrationProfile, path: impl AsRef<Path>) -> Result<(), Self::Error> {
        export_profile_csv(profile, path, Some(&self.config))
    }

    fn export_multi(
        &self,
        profiles: &[ConcentrationProfile],
        labels: &[&str],
        path: impl AsRef<Path>,
    ) -> Result<(), Self::Error> {
        export_profiles_csv(profiles, labels, path, Some(&self.config))
    }
}

// =================================================================================================
// Tests
// =================================================================================================
