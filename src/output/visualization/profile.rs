//! Normalized concentration profile plots
//!
//! Draws `Cg/Cg₀` against the column height. The backend follows the file
//! extension: `.svg` uses the SVG backend, anything else the bitmap one.

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use super::config::{PlotConfig, NO_TITLE};
use crate::output::{OutputError, OutputResult};
use crate::profile::ConcentrationProfile;

fn drawing_error<E: std::fmt::Display>(error: E) -> OutputError {
    OutputError::Drawing(error.to_string())
}

fn check_profile(profile: &ConcentrationProfile, label: &str) -> OutputResult<()> {
    if profile.is_empty() {
        return Err(OutputError::EmptyData(format!("profile {} has no points", label)));
    }
    if profile.positions.len() != profile.len() {
        return Err(OutputError::LengthMismatch(format!(
            "profile {}: {} heights versus {} concentrations",
            label,
            profile.positions.len(),
            profile.len()
        )));
    }
    if profile.iter().any(|(z, c)| !z.is_finite() || !c.is_finite()) || !(profile.inlet > 0.0) {
        return Err(OutputError::InvalidData(format!("profile {} holds non-finite values", label)));
    }
    Ok(())
}

/// Height range covering every profile; widened when all heights coincide
fn height_range(profiles: &[(&str, &ConcentrationProfile)]) -> (f64, f64) {
    let (min, max) = profiles
        .iter()
        .flat_map(|(_, p)| p.positions.iter().copied())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), z| (lo.min(z), hi.max(z)));

    if max > min { (min, max) } else { (min, min + 1.0) }
}

fn is_svg(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("svg")
}

/// Plot one normalized profile
///
/// # Example
///
/// ```rust,no_run
/// use biotrickle_rs::models::FilterParameters;
/// use biotrickle_rs::output::plot_profile;
/// use biotrickle_rs::profile::solve_profile;
/// use biotrickle_rs::solver::linspace;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let z = linspace(0.0, 5.0, 100);
/// let profile = solve_profile(0.000195, &z, &FilterParameters::ammonia_reference())?;
/// plot_profile(&profile, "profile.svg", None)?;
/// # Ok(())
/// # }
/// ```
pub fn plot_profile(
    profile: &ConcentrationProfile,
    output_path: impl AsRef<Path>,
    config: Option<&PlotConfig>,
) -> OutputResult<()> {
    let default_config = PlotConfig::profile(NO_TITLE);
    let config = config.unwrap_or(&default_config);

    let mut single = config.clone();
    single.series_colors = Some(vec![config.line_color]);

    plot_profile_comparison(&[("Cg/Cg0", profile)], output_path, Some(&single))
}

/// Overlay several normalized profiles on the same axes
///
/// Useful for parameter sweeps (biofilm thickness, temperature, load).
pub fn plot_profile_comparison(
    profiles: &[(&str, &ConcentrationProfile)],
    output_path: impl AsRef<Path>,
    config: Option<&PlotConfig>,
) -> OutputResult<()> {
    if profiles.is_empty() {
        return Err(OutputError::EmptyData("no profiles provided".to_string()));
    }
    for (label, profile) in profiles {
        check_profile(profile, label)?;
    }

    let default_config = PlotConfig::profile(NO_TITLE);
    let config = config.unwrap_or(&default_config);

    let path = output_path.as_ref();
    let size = (config.width, config.height);

    let drawn = if is_svg(path) {
        let root = SVGBackend::new(path, size).into_drawing_area();
        draw_profiles(&root, profiles, config)
    } else {
        let root = BitMapBackend::new(path, size).into_drawing_area();
        draw_profiles(&root, profiles, config)
    };
    drawn?;

    log::debug!("Plotted {} profile(s) to {}", profiles.len(), path.display());
    Ok(())
}

fn draw_profiles<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    profiles: &[(&str, &ConcentrationProfile)],
    config: &PlotConfig,
) -> OutputResult<()> {
    root.fill(&config.background).map_err(drawing_error)?;

    let (z_min, z_max) = height_range(profiles);
    let y_max = profiles
        .iter()
        .flat_map(|(_, p)| p.normalized())
        .fold(1.0, f64::max);

    let mut chart = ChartBuilder::on(root)
        .caption(&config.title, ("sans-serif", 40).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(z_min..z_max, 0.0..(y_max * 1.05))
        .map_err(drawing_error)?;

    if config.show_grid {
        chart
            .configure_mesh()
            .x_desc(&config.xlabel)
            .y_desc(&config.ylabel)
            .x_label_formatter(&|x| format!("{:.2}", x))
            .y_label_formatter(&|y| format!("{:.2}", y))
            .draw()
            .map_err(drawing_error)?;
    }

    for (idx, (label, profile)) in profiles.iter().enumerate() {
        let color = config.series_color(idx);
        let normalized = profile.normalized();

        chart
            .draw_series(LineSeries::new(
                profile.positions.iter().copied().zip(normalized),
                ShapeStyle::from(&color).stroke_width(config.line_width),
            ))
            .map_err(drawing_error)?
            .label(*label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .background_style(config.background.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(drawing_error)?;

    root.present().map_err(drawing_error)?;
    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn decay(rate: f64) -> ConcentrationProfile {
        let positions: Vec<f64> = (0..50).map(|i| i as f64 * 0.1).collect();
        let concentrations = positions.iter().map(|z| 2.0 * (-rate * z).exp()).collect();
        ConcentrationProfile { positions, concentrations, inlet: 2.0 }
    }

    #[test]
    fn test_plot_profile_svg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.svg");

        plot_profile(&decay(0.5), &path, None).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<svg"));
    }

    #[test]
    fn test_plot_comparison_svg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("comparison.svg");
        let (thin, thick) = (decay(0.2), decay(0.8));

        let config = PlotConfig::profile("Biofilm thickness");
        plot_profile_comparison(&[("thin", &thin), ("thick", &thick)], &path, Some(&config)).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_plot_rejects_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.svg");

        assert!(matches!(
            plot_profile_comparison(&[], &path, None),
            Err(OutputError::EmptyData(_))
        ));

        let empty = ConcentrationProfile { positions: vec![], concentrations: vec![], inlet: 1.0 };
        assert!(matches!(plot_profile(&empty, &path, None), Err(OutputError::EmptyData(_))));
    }

    #[test]
    fn test_height_range_single_point() {
        let single = ConcentrationProfile { positions: vec![2.0], concentrations: vec![1.0], inlet: 1.0 };
        assert_eq!(height_range(&[("a", &single)]), (2.0, 3.0));
    }
}
