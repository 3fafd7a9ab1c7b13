//! Monod kinetics and empirical correlations
//!
//! The biofilm consumes dissolved substrate at a saturating rate
//! `μ·S/(K + S)`. `K` depends on temperature through an empirical
//! correlation; the steady-state biomass is tied to the inlet load.

/// Molar mass of ammonia \[g/mol\]
pub const AMMONIA_MOLAR_MASS: f64 = 17.0;

/// Biomass carried per unit of inlet load, before dividing by the molar mass
pub const BIOMASS_LOAD_FACTOR: f64 = 100.0;

/// Half-saturation constant at `temperature` (°C)
///
/// `K = 10^(0.051·T − 1.158)`
///
/// ```rust
/// use biotrickle_rs::models::kinetics::half_saturation_constant;
///
/// let k = half_saturation_constant(20.0);
/// assert!((k - 0.72778).abs() < 1e-5);
/// ```
pub fn half_saturation_constant(temperature: f64) -> f64 {
    10f64.powf(0.051 * temperature - 1.158)
}

/// Monod saturation fraction `S/(K + S)`
#[inline]
pub fn monod_fraction(substrate: f64, half_saturation: f64) -> f64 {
    substrate / (half_saturation + substrate)
}

/// Steady-state biomass sustained by an inlet concentration `cg0`
///
/// `X = Cg0 · 100 / 17`
pub fn steady_state_biomass(cg0: f64) -> f64 {
    cg0 * BIOMASS_LOAD_FACTOR / AMMONIA_MOLAR_MASS
}
