//! Biotrickling filter parameters
//!
//! All parameters are fixed before a solve and never mutated by it.

use crate::error::{require_non_negative, require_positive, FilterError, FilterResult};
use crate::models::kinetics::{half_saturation_constant, monod_fraction, steady_state_biomass};

/// Inlet ammonia concentration of the reference column \[mg/L\]
pub const REFERENCE_INLET_CONCENTRATION: f64 = 0.000195;

/// Operating temperature of the reference column (°C)
pub const REFERENCE_TEMPERATURE: f64 = 20.0;

/// Physical and biological parameters of the column
///
/// # Example
///
/// ```rust
/// use biotrickle_rs::models::FilterParameters;
///
/// let params = FilterParameters::ammonia_reference()
///     .with_biofilm_thickness(0.002)
///     .with_temperature(25.0);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterParameters {
    /// Void-fraction-derived geometric factor α, in (0, 1]
    pub alpha: f64,
    /// Superficial gas velocity V₀
    pub superficial_velocity: f64,
    /// Steady-state biomass concentration X
    pub biomass: f64,
    /// Biomass yield coefficient Y (biomass per substrate)
    pub yield_coefficient: f64,
    /// Maximum specific growth rate μ
    pub max_growth_rate: f64,
    /// Monod half-saturation constant K
    pub half_saturation: f64,
    /// Gas–biofilm partition constant m
    pub partition: f64,
    /// Biofilm thickness δ
    pub biofilm_thickness: f64,
}

impl FilterParameters {
    /// Ammonia column at 20 °C fed with 0.000195 mg/L
    ///
    /// `X` follows from the inlet load, `K` from the temperature correlation.
    pub fn ammonia_reference() -> Self {
        Self {
            alpha: 0.9,
            superficial_velocity: 0.001,
            biomass: steady_state_biomass(REFERENCE_INLET_CONCENTRATION),
            yield_coefficient: 0.08,
            max_growth_rate: 0.5,
            half_saturation: half_saturation_constant(REFERENCE_TEMPERATURE),
            partition: 0.01,
            biofilm_thickness: 0.001,
        }
    }

    /// Unit-scale parameter set used for quick checks of the profile shape
    pub fn script_defaults() -> Self {
        Self {
            alpha: 0.9,
            superficial_velocity: 2.0,
            biomass: 2.0,
            yield_coefficient: 5.0,
            max_growth_rate: 5.0,
            half_saturation: 1.0,
            partition: 1.0,
            biofilm_thickness: 0.001,
        }
    }

    // ====================================== Builder methods ======================================

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_superficial_velocity(mut self, velocity: f64) -> Self {
        self.superficial_velocity = velocity;
        self
    }

    pub fn with_biomass(mut self, biomass: f64) -> Self {
        self.biomass = biomass;
        self
    }

    pub fn with_yield_coefficient(mut self, yield_coefficient: f64) -> Self {
        self.yield_coefficient = yield_coefficient;
        self
    }

    pub fn with_max_growth_rate(mut self, rate: f64) -> Self {
        self.max_growth_rate = rate;
        self
    }

    pub fn with_half_saturation(mut self, half_saturation: f64) -> Self {
        self.half_saturation = half_saturation;
        self
    }

    /// Set `K` from the temperature correlation (°C)
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.half_saturation = half_saturation_constant(temperature);
        self
    }

    pub fn with_partition(mut self, partition: f64) -> Self {
        self.partition = partition;
        self
    }

    pub fn with_biofilm_thickness(mut self, thickness: f64) -> Self {
        self.biofilm_thickness = thickness;
        self
    }

    // ======================================== Validation =========================================

    /// Check every parameter
    ///
    /// `V₀`, `Y`, `K` and `m` appear in denominators and must be strictly
    /// positive. `X`, `μ` and `δ` may be zero (no degradation).
    pub fn validate(&self) -> FilterResult<()> {
        if !self.alpha.is_finite() || self.alpha <= 0.0 || self.alpha > 1.0 {
            return Err(FilterError::InvalidParameter {
                name: "alpha",
                value: self.alpha,
                reason: "must lie in (0, 1]",
            });
        }
        require_positive("superficial_velocity", self.superficial_velocity)?;
        require_positive("yield_coefficient", self.yield_coefficient)?;
        require_positive("half_saturation", self.half_saturation)?;
        require_positive("partition", self.partition)?;
        require_non_negative("biomass", self.biomass)?;
        require_non_negative("max_growth_rate", self.max_growth_rate)?;
        require_non_negative("biofilm_thickness", self.biofilm_thickness)?;
        Ok(())
    }

    // ======================================= Derived terms =======================================

    /// First-order degradation capacity `A = (α/V₀)·(X/Y)·μ·δ`
    pub fn degradation_capacity(&self) -> f64 {
        (self.alpha / self.superficial_velocity)
            * (self.biomass / self.yield_coefficient)
            * self.max_growth_rate
            * self.biofilm_thickness
    }

    /// `dCg/dz` at gas concentration `cg`
    ///
    /// `-A · (Cg/m) / (K + Cg/m)`
    #[inline]
    pub fn gas_gradient(&self, cg: f64) -> f64 {
        let dissolved = cg / self.partition;
        -self.degradation_capacity() * monod_fraction(dissolved, self.half_saturation)
    }
}

impl Default for FilterParameters {
    fn default() -> Self {
        Self::ammonia_reference()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_presets_are_valid() {
        assert!(FilterParameters::ammonia_reference().validate().is_ok());
        assert!(FilterParameters::script_defaults().validate().is_ok());
        assert_eq!(FilterParameters::default(), FilterParameters::ammonia_reference());
    }

    #[test]
    fn test_reference_capacity() {
        let params = FilterParameters::ammonia_reference();
        // 900 · 0.014338 · 0.5 · 0.001
        assert_relative_eq!(params.degradation_capacity(), 6.4522059e-3, max_relative = 1e-7);
    }

    #[test]
    fn test_gas_gradient_is_negative_and_saturating() {
        let params = FilterParameters::ammonia_reference();
        assert!(params.gas_gradient(1e-4) < 0.0);
        assert_eq!(params.gas_gradient(0.0), 0.0);

        // Saturation: the rate approaches -A
        let saturated = params.gas_gradient(1e6);
        assert_relative_eq!(saturated, -params.degradation_capacity(), max_relative = 1e-6);
    }

    #[test]
    fn test_rejects_division_by_zero_parameters() {
        let base = FilterParameters::ammonia_reference();
        let cases = [
            ("superficial_velocity", base.with_superficial_velocity(0.0)),
            ("yield_coefficient", base.with_yield_coefficient(-0.08)),
            ("half_saturation", base.with_half_saturation(0.0)),
            ("partition", base.with_partition(0.0)),
        ];

        for (expected, params) in cases {
            match params.validate() {
                Err(FilterError::InvalidParameter { name, .. }) => assert_eq!(name, expected),
                other => panic!("{} accepted: {:?}", expected, other),
            }
        }
    }

    #[test]
    fn test_rejects_alpha_out_of_range() {
        let base = FilterParameters::ammonia_reference();
        assert!(base.with_alpha(0.0).validate().is_err());
        assert!(base.with_alpha(1.2).validate().is_err());
        assert!(base.with_alpha(1.0).validate().is_ok());
    }

    #[test]
    fn test_zero_reaction_terms_allowed() {
        let base = FilterParameters::ammonia_reference();
        assert!(base.with_max_growth_rate(0.0).validate().is_ok());
        assert!(base.with_biomass(0.0).validate().is_ok());
        assert!(base.with_max_growth_rate(-0.5).validate().is_err());
        assert!(base.with_biofilm_thickness(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_with_temperature_sets_half_saturation() {
        let params = FilterParameters::ammonia_reference().with_temperature(30.0);
        assert_relative_eq!(params.half_saturation, half_saturation_constant(30.0));
    }
}
