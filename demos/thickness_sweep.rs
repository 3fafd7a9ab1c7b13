//! Example: Biofilm Thickness and Temperature Sweeps
//!
//! Solves the reference column for several biofilm thicknesses and
//! operating temperatures with `solve_sweep` (rayon when the `parallel`
//! feature is on), then overlays the normalized profiles.

use biotrickle_rs::{
    models::FilterParameters,
    output::{export_profiles_csv, plot_profile_comparison, PlotConfig},
    profile::{solve_sweep, ConcentrationProfile},
    solver::linspace,
    FilterResult,
};

fn print_section(title: &str) {
    println!("\n═══════════════════════════════════════════════════════");
    println!("  {title}");
    println!("═══════════════════════════════════════════════════════\n");
}

/// Print one line per case and keep the successful profiles with their labels
fn report(labels: Vec<String>, results: Vec<FilterResult<ConcentrationProfile>>) -> Vec<(String, ConcentrationProfile)> {
    println!("{:<16} {:>14} {:>12}", "Case", "Outlet Cg/Cg0", "Removal (%)");

    let mut profiles = Vec::new();
    for (label, result) in labels.into_iter().zip(results) {
        match result {
            Ok(profile) => {
                println!("{:<16} {:>14.4e} {:>12.2}",
                    label,
                    profile.outlet() / profile.inlet,
                    100.0 * profile.removal_efficiency()
                );
                profiles.push((label, profile));
            }
            Err(e) => println!("{:<16} failed: {}", label, e),
        }
    }
    profiles
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cg0 = 0.000195;
    let z = linspace(0.0, 5.0, 100);
    let base = FilterParameters::ammonia_reference();
    let tmp_dir = std::env::temp_dir();

    // ====== Biofilm thickness ======

    print_section("Biofilm thickness δ");

    let thicknesses = [0.00025, 0.0005, 0.001, 0.002];
    let sets: Vec<_> = thicknesses.iter().map(|&d| base.with_biofilm_thickness(d)).collect();
    let labels: Vec<String> = thicknesses.iter().map(|d| format!("δ = {} m", d)).collect();

    let solved = report(labels, solve_sweep(cg0, &z, &sets));

    let pairs: Vec<(&str, &ConcentrationProfile)> = solved.iter().map(|(l, p)| (l.as_str(), p)).collect();
    plot_profile_comparison(&pairs, tmp_dir.join("thickness_sweep.svg"), Some(&PlotConfig::profile("Biofilm thickness")))?;

    let (labels, profiles): (Vec<&str>, Vec<ConcentrationProfile>) =
        solved.iter().map(|(l, p)| (l.as_str(), p.clone())).unzip();
    export_profiles_csv(&profiles, &labels, tmp_dir.join("thickness_sweep.csv"), None)?;

    // ====== Temperature ======

    print_section("Operating temperature T");

    let temperatures = [10.0, 20.0, 30.0, 40.0];
    let sets: Vec<_> = temperatures.iter().map(|&t| base.with_temperature(t)).collect();
    let labels: Vec<String> = temperatures.iter().map(|t| format!("T = {} °C", t)).collect();

    let solved = report(labels, solve_sweep(cg0, &z, &sets));

    let pairs: Vec<(&str, &ConcentrationProfile)> = solved.iter().map(|(l, p)| (l.as_str(), p)).collect();
    plot_profile_comparison(&pairs, tmp_dir.join("temperature_sweep.svg"), Some(&PlotConfig::profile("Temperature")))?;

    println!("\nPlots written to {}", tmp_dir.display());
    Ok(())
}
