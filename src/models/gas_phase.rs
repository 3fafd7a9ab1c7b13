//! Steady-state gas-phase model of a biotrickling filter
//!
//! The contaminant travels up the column in the gas phase and partitions
//! into the biofilm, where it is consumed with Monod kinetics:
//!
//! ```text
//! dCg/dz = −(α/V₀)·(X/Y)·μ·δ · (Cg/m) / (K + Cg/m)
//! ```
//!
//! The state is a single scalar concentration. With `A = (α/V₀)(X/Y)μδ`
//! the equation separates and integrates to
//!
//! ```text
//! m·K·ln(Cg/Cg₀) + (Cg − Cg₀) = −A·z
//! ```
//!
//! which [`GasPhaseModel::height_for`] and
//! [`GasPhaseModel::implicit_residual`] expose for checking solver output.
//!
//! # Logarithmic form
//!
//! Far up a thick biofilm `Cg` falls below anything `f64` can hold, and an
//! error test on `Cg` itself turns absolute at that scale. In terms of
//! `w = ln(Cg/Cg₀)` the same equation reads
//!
//! ```text
//! dw/dz = −A / (m·K + Cg₀·eʷ)
//! ```
//!
//! whose slope is bounded and strictly negative whenever `A > 0`.
//! [`StateVariable::LogRatio`] integrates `w`, and
//! [`GasPhaseModel::concentration`] maps either state back to `Cg`.

use crate::error::{require_positive, FilterResult};
use crate::models::FilterParameters;
use crate::physics::{PhysicalData, PhysicalModel, PhysicalQuantity, PhysicalState};

/// Gas-phase concentration along the column height
///
/// # Example
///
/// ```rust
/// use biotrickle_rs::models::{FilterParameters, GasPhaseModel};
/// use biotrickle_rs::physics::{PhysicalModel, PhysicalQuantity};
///
/// # fn main() -> Result<(), biotrickle_rs::FilterError> {
/// let model = GasPhaseModel::new(FilterParameters::ammonia_reference(), 1.95e-4)?;
/// let inlet = model.setup_initial_state();
///
/// let slope = model.compute_physics(&inlet);
/// assert!(slope.scalar(PhysicalQuantity::Concentration).unwrap() < 0.0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GasPhaseModel {
    params: FilterParameters,
    /// Inlet concentration Cg₀
    inlet_concentration: f64,
    /// Degradation capacity A, computed once
    capacity: f64,
    variable: StateVariable,
}

/// Quantity carried in the state vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StateVariable {
    /// `Cg` itself, under [`PhysicalQuantity::Concentration`]
    #[default]
    Concentration,
    /// `ln(Cg/Cg₀)`, under [`PhysicalQuantity::LogConcentrationRatio`]
    LogRatio,
}

impl GasPhaseModel {
    /// Create a model, validating the parameters and the inlet concentration
    pub fn new(params: FilterParameters, inlet_concentration: f64) -> FilterResult<Self> {
        params.validate()?;
        require_positive("inlet_concentration", inlet_concentration)?;

        Ok(Self {
            capacity: params.degradation_capacity(),
            params,
            inlet_concentration,
            variable: StateVariable::Concentration,
        })
    }

    /// Integrate `ln(Cg/Cg₀)` instead of `Cg`
    pub fn in_log_form(mut self) -> Self {
        self.variable = StateVariable::LogRatio;
        self
    }

    pub fn state_variable(&self) -> StateVariable {
        self.variable
    }

    pub fn parameters(&self) -> &FilterParameters {
        &self.params
    }

    pub fn inlet_concentration(&self) -> f64 {
        self.inlet_concentration
    }

    /// Degradation capacity `A`
    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    /// `dCg/dz` at gas concentration `cg`
    #[inline]
    pub fn gradient(&self, cg: f64) -> f64 {
        let dissolved = cg / self.params.partition;
        -self.capacity * dissolved / (self.params.half_saturation + dissolved)
    }

    /// `d ln(Cg/Cg₀)/dz` at `w = ln(Cg/Cg₀)`
    #[inline]
    pub fn log_gradient(&self, w: f64) -> f64 {
        let mk = self.params.partition * self.params.half_saturation;
        -self.capacity / (mk + self.inlet_concentration * w.exp())
    }

    /// Gas concentration held by `state`, whichever variable it carries
    pub fn concentration(&self, state: &PhysicalState) -> Option<f64> {
        match self.variable {
            StateVariable::Concentration => state.scalar(PhysicalQuantity::Concentration),
            StateVariable::LogRatio => state
                .scalar(PhysicalQuantity::LogConcentrationRatio)
                .map(|w| self.inlet_concentration * w.exp()),
        }
    }

    /// Residual of the implicit solution at `(z, cg)`
    ///
    /// `m·K·ln(Cg/Cg₀) + (Cg − Cg₀) + A·z`, zero on the exact profile.
    pub fn implicit_residual(&self, z: f64, cg: f64) -> f64 {
        let mk = self.params.partition * self.params.half_saturation;
        let cg0 = self.inlet_concentration;
        mk * (cg / cg0).ln() + (cg - cg0) + self.capacity * z
    }

    /// Height, measured from the inlet, at which the exact profile reaches `cg`
    ///
    /// Returns `None` when `cg` is not in `(0, Cg₀]` or when nothing is
    /// degraded (`A = 0`).
    pub fn height_for(&self, cg: f64) -> Option<f64> {
        if !(cg > 0.0 && cg <= self.inlet_concentration) || self.capacity <= 0.0 {
            return None;
        }
        let mk = self.params.partition * self.params.half_saturation;
        let cg0 = self.inlet_concentration;
        Some(-(mk * (cg / cg0).ln() + (cg - cg0)) / self.capacity)
    }
}

impl PhysicalModel for GasPhaseModel {
    fn points(&self) -> usize {
        1
    }

    fn compute_physics(&self, state: &PhysicalState) -> PhysicalState {
        // A missing or vector-valued state gives a NaN slope,
        // which the solvers report as a numerical instability.
        let (quantity, slope) = match self.variable {
            StateVariable::Concentration => (
                PhysicalQuantity::Concentration,
                state.scalar(PhysicalQuantity::Concentration).map(|cg| self.gradient(cg)),
            ),
            StateVariable::LogRatio => (
                PhysicalQuantity::LogConcentrationRatio,
                state.scalar(PhysicalQuantity::LogConcentrationRatio).map(|w| self.log_gradient(w)),
            ),
        };

        PhysicalState::new(quantity, PhysicalData::from_scalar(slope.unwrap_or(f64::NAN)))
    }

    fn setup_initial_state(&self) -> PhysicalState {
        match self.variable {
            StateVariable::Concentration => PhysicalState::new(
                PhysicalQuantity::Concentration,
                PhysicalData::from_scalar(self.inlet_concentration),
            ),
            StateVariable::LogRatio => {
                PhysicalState::new(PhysicalQuantity::LogConcentrationRatio, PhysicalData::from_scalar(0.0))
            }
        }
    }

    fn name(&self) -> &str {
        "Gas-phase biotrickling filter"
    }

    fn description(&self) -> Option<&str> {
        Some("Steady-state gas concentration with Monod consumption in the biofilm")
    }
}
