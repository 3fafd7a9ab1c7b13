//! Concentration profile along the column
//!
//! [`solve_profile`] is the entry point: it validates the inputs, builds a
//! [`GasPhaseModel`] and integrates it with the adaptive Dormand-Prince
//! solver on the requested grid.
//!
//! The profile is integrated in the logarithmic form `w = ln(Cg/Cg₀)` and
//! mapped back with `Cg = Cg₀·eʷ`, so the error control stays relative to
//! `Cg` however far the concentration falls.
//!
//! ```rust
//! use biotrickle_rs::models::FilterParameters;
//! use biotrickle_rs::profile::solve_profile;
//! use biotrickle_rs::solver::linspace;
//!
//! # fn main() -> Result<(), biotrickle_rs::FilterError> {
//! let z = linspace(0.0, 5.0, 100);
//! let profile = solve_profile(0.000195, &z, &FilterParameters::ammonia_reference())?;
//!
//! assert_eq!(profile.len(), 100);
//! assert_eq!(profile.concentrations[0], 0.000195);
//! assert!(profile.is_non_increasing());
//! # Ok(())
//! # }
//! ```

use crate::error::{FilterError, FilterResult};
use crate::models::{FilterParameters, GasPhaseModel};
use crate::physics::{PhysicalData, PhysicalQuantity};
use crate::solver::{
    validate_grid, DormandPrinceSolver, Scenario, SimulationResult, Solver, SolverConfiguration,
};

/// Relative tolerance on `ln(Cg/Cg₀)` used by [`solve_profile`]
pub const PROFILE_RELATIVE_TOLERANCE: f64 = 1e-8;

/// Absolute tolerance on `ln(Cg/Cg₀)` used by [`solve_profile`]
///
/// An absolute error `ε` on the logarithm is a relative error `ε` on `Cg`.
pub const PROFILE_LOG_ABSOLUTE_TOLERANCE: f64 = 1e-10;

// =================================================================================================
// Concentration profile
// =================================================================================================

/// Gas concentration on the evaluation grid
#[derive(Debug, Clone, PartialEq)]
pub struct ConcentrationProfile {
    /// Heights `z`
    pub positions: Vec<f64>,
    /// `Cg(z)`, co-indexed with `positions`
    pub concentrations: Vec<f64>,
    /// Inlet concentration `Cg₀`
    pub inlet: f64,
}

impl ConcentrationProfile {
    /// Extract the scalar concentration series of a solver result
    ///
    /// Works on complete and partial results alike. The inlet is the first
    /// recorded concentration. Returns `None` if the result is empty or
    /// does not hold a scalar concentration.
    pub fn from_result(result: &SimulationResult) -> Option<Self> {
        let concentrations = result.scalar_series(PhysicalQuantity::Concentration)?;
        let inlet = *concentrations.first()?;

        Some(Self {
            positions: result.positions.clone(),
            concentrations,
            inlet,
        })
    }

    pub fn len(&self) -> usize {
        self.concentrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.concentrations.is_empty()
    }

    /// `Cg/Cg₀` at each height
    pub fn normalized(&self) -> Vec<f64> {
        self.concentrations.iter().map(|cg| cg / self.inlet).collect()
    }

    /// Concentration at the last grid point
    pub fn outlet(&self) -> f64 {
        self.concentrations.last().copied().unwrap_or(self.inlet)
    }

    /// Fraction of the inlet load removed by the column, `1 − Cg(out)/Cg₀`
    pub fn removal_efficiency(&self) -> f64 {
        1.0 - self.outlet() / self.inlet
    }

    /// True when `Cg[i+1] <= Cg[i]` everywhere
    pub fn is_non_increasing(&self) -> bool {
        self.concentrations.windows(2).all(|pair| pair[1] <= pair[0])
    }

    /// `(z, Cg)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.positions.iter().copied().zip(self.concentrations.iter().copied())
    }
}

// =================================================================================================
// Solving
// =================================================================================================

/// Steady-state gas concentration on `z_grid`
///
/// Parameters, inlet concentration and grid are validated before any
/// integration step. The grid must be non-empty and sorted ascending;
/// integration starts at `z_grid[0]` with `Cg = cg0`.
///
/// # Errors
///
/// - `InvalidParameter` for a bad parameter or `cg0`
/// - `InvalidGrid` for an empty, non-finite or unsorted grid
/// - `NumericalInstability` if the integrator cannot advance
pub fn solve_profile(cg0: f64, z_grid: &[f64], params: &FilterParameters) -> FilterResult<ConcentrationProfile> {
    let config = SolverConfiguration::adaptive(
        z_grid.to_vec(),
        PROFILE_RELATIVE_TOLERANCE,
        PROFILE_LOG_ABSOLUTE_TOLERANCE,
    );
    solve_profile_with(&DormandPrinceSolver::new(), cg0, params, &config)
}

/// Same problem as [`solve_profile`] with a chosen solver and configuration
///
/// The evaluation grid is the one of `config`. Adaptive tolerances apply to
/// `ln(Cg/Cg₀)`. A partial result attached to a `NumericalInstability`
/// carries the concentration as well, so [`ConcentrationProfile::from_result`]
/// accepts it.
///
/// ```rust
/// use biotrickle_rs::models::FilterParameters;
/// use biotrickle_rs::profile::solve_profile_with;
/// use biotrickle_rs::solver::{RK4Solver, SolverConfiguration};
///
/// # fn main() -> Result<(), biotrickle_rs::FilterError> {
/// let config = SolverConfiguration::uniform(5.0, 51).with_substeps(10);
/// let profile = solve_profile_with(
///     &RK4Solver::new(),
///     0.000195,
///     &FilterParameters::ammonia_reference(),
///     &config,
/// )?;
/// assert!(profile.removal_efficiency() > 0.9);
/// # Ok(())
/// # }
/// ```
pub fn solve_profile_with(
    solver: &dyn Solver,
    cg0: f64,
    params: &FilterParameters,
    config: &SolverConfiguration,
) -> FilterResult<ConcentrationProfile> {
    // ====== Step 1: Validation ======

    let model = GasPhaseModel::new(*params, cg0)?.in_log_form();
    validate_grid(config.grid())?;

    // ====== Step 2: Integration ======

    let scenario = Scenario::from_model(Box::new(model.clone()));
    let result = match solver.solve(&scenario, config) {
        Ok(mut result) => {
            record_concentration(&model, &mut result);
            result
        }
        Err(FilterError::NumericalInstability { position, reason, mut partial }) => {
            record_concentration(&model, &mut partial);
            return Err(FilterError::NumericalInstability { position, reason, partial });
        }
        Err(err) => return Err(err),
    };

    log::debug!(
        "{} profile: {} points, outlet/inlet = {:e}",
        solver.name(),
        result.len(),
        result
            .final_state
            .scalar(PhysicalQuantity::Concentration)
            .map_or(f64::NAN, |cg| cg / cg0)
    );

    ConcentrationProfile::from_result(&result).ok_or_else(|| {
        FilterError::InvalidConfiguration(format!(
            "{} did not produce a scalar concentration profile",
            solver.name()
        ))
    })
}

/// Add `Cg` next to the integrated variable in every recorded state
fn record_concentration(model: &GasPhaseModel, result: &mut SimulationResult) {
    let states = result
        .state_trajectory
        .iter_mut()
        .chain(std::iter::once(&mut result.final_state));

    for state in states {
        if let Some(cg) = model.concentration(state) {
            state.set(PhysicalQuantity::Concentration, PhysicalData::from_scalar(cg));
        }
    }
}

/// Solve independent parameter sets on the same grid
///
/// Results keep the order of `parameter_sets`. Each entry fails or
/// succeeds on its own. With the `parallel` feature the sets are solved
/// on the rayon thread pool.
pub fn solve_sweep(
    cg0: f64,
    z_grid: &[f64],
    parameter_sets: &[FilterParameters],
) -> Vec<FilterResult<ConcentrationProfile>> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        parameter_sets
            .par_iter()
            .map(|params| solve_profile(cg0, z_grid, params))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        parameter_sets
            .iter()
            .map(|params| solve_profile(cg0, z_grid, params))
            .collect()
    }
}

// =================================================================================================
// Tests
// =================================================================================================
