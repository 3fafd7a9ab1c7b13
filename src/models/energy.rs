//! Metabolic heat balance
//!
//! Biomass growth on the substrate releases heat that the trickling liquid
//! must remove. The heat yield `yH` is the biomass formed per unit of
//! released energy:
//!
//! ```text
//! yH = 1 / (ΔHs/Y − ΔHc)
//! q_cool = μ·X / yH
//! ```
//!
//! with `ΔHs` the heat of combustion of the substrate and `ΔHc` that of the
//! biomass.

use crate::error::{require_positive, FilterError, FilterResult};
use crate::models::FilterParameters;

/// Molar mass of biomass, taken as C₅H₇NO₂ \[g/mol\]
pub const BIOMASS_MOLAR_MASS: f64 = 5.0 * 12.0 + 7.0 + 14.0 + 16.0 * 2.0;

/// Heats of combustion and yield used for the cooling estimate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatBalance {
    /// Substrate heat of combustion ΔHs
    pub substrate_heat_of_combustion: f64,
    /// Biomass heat of combustion ΔHc
    pub biomass_heat_of_combustion: f64,
    /// Biomass yield coefficient Y
    pub yield_coefficient: f64,
}

impl HeatBalance {
    pub fn new(substrate_heat_of_combustion: f64, biomass_heat_of_combustion: f64, yield_coefficient: f64) -> Self {
        Self {
            substrate_heat_of_combustion,
            biomass_heat_of_combustion,
            yield_coefficient,
        }
    }

    /// Ammonia and C₅H₇NO₂ biomass with `Y = 0.08`
    ///
    /// ```rust
    /// use biotrickle_rs::models::{FilterParameters, HeatBalance};
    ///
    /// # fn main() -> Result<(), biotrickle_rs::FilterError> {
    /// let params = FilterParameters::ammonia_reference();
    /// let q = HeatBalance::ammonia_reference().cooling_rate(params.max_growth_rate, params.biomass)?;
    /// assert!((q - 1.6038e-5).abs() < 1e-8);
    /// # Ok(())
    /// # }
    /// ```
    pub fn ammonia_reference() -> Self {
        Self::new(22477.0 / 10e6, 15.0 / BIOMASS_MOLAR_MASS / 1000.0, 0.08)
    }

    /// Heat yield `yH = 1 / (ΔHs/Y − ΔHc)`
    pub fn heat_yield(&self) -> FilterResult<f64> {
        require_positive("yield_coefficient", self.yield_coefficient)?;

        let denominator = self.substrate_heat_of_combustion / self.yield_coefficient
            - self.biomass_heat_of_combustion;

        if !denominator.is_finite() {
            return Err(FilterError::InvalidParameter {
                name: "heat_of_combustion",
                value: denominator,
                reason: "must be finite",
            });
        }
        if denominator == 0.0 {
            return Err(FilterError::DivisionByZero(format!(
                "ΔHs/Y − ΔHc vanishes (ΔHs = {}, ΔHc = {}, Y = {})",
                self.substrate_heat_of_combustion, self.biomass_heat_of_combustion, self.yield_coefficient
            )));
        }

        Ok(1.0 / denominator)
    }

    /// Cooling load `μ·X / yH` \[kJ/L/day\]
    pub fn cooling_rate(&self, max_growth_rate: f64, biomass: f64) -> FilterResult<f64> {
        let heat_yield = self.heat_yield()?;
        Ok(max_growth_rate * biomass / heat_yield)
    }

    /// Cooling load for the growth rate and biomass of a column
    pub fn cooling_rate_for(&self, params: &FilterParameters) -> FilterResult<f64> {
        self.cooling_rate(params.max_growth_rate, params.biomass)
    }
}

impl Default for HeatBalance {
    fn default() -> Self {
        Self::ammonia_reference()
    }
}
