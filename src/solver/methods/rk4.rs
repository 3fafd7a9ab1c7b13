//! Runge-Kutta 4 (RK4) numerical solver
//!
//! # Mathematical Background
//!
//! The classical fourth-order Runge-Kutta method uses a weighted average of
//! four slope estimates over a step of size h:
//!
//! ```text
//! k₁ = f(yₙ)
//! k₂ = f(yₙ + h/2 * k₁)
//! k₃ = f(yₙ + h/2 * k₂)
//! k₄ = f(yₙ + h * k₃)
//!
//! yₙ₊₁ = yₙ + h/6 * (k₁ + 2k₂ + 2k₃ + k₄)
//! ```
//!
//! # Characteristics
//!
//! - **Order**: Fourth-order accurate (global error ~ O(h⁴))
//! - **Complexity**: 4 function evaluations per step
//! - **Step**: Fixed, set by the grid and `substeps`
//!
//! The column equations are autonomous in `z`, so the stages need no
//! position argument.

use crate::error::{FilterError, FilterResult};
use crate::solver::methods::march;
use crate::solver::{Scenario, SimulationResult, Solver, SolverConfiguration, SolverType};

// =================================================================================================
// RK4 Solver
// =================================================================================================

/// Classical fourth-order Runge-Kutta solver
///
/// # Example
///
/// ```rust
/// use biotrickle_rs::models::{FilterParameters, GasPhaseModel};
/// use biotrickle_rs::solver::{RK4Solver, Scenario, Solver, SolverConfiguration};
///
/// # fn main() -> Result<(), biotrickle_rs::FilterError> {
/// let model = GasPhaseModel::new(FilterParameters::script_defaults(), 1.95e-4)?;
/// let scenario = Scenario::from_model(Box::new(model));
///
/// let config = SolverConfiguration::uniform(5.0, 100);
/// let result = RK4Solver::new().solve(&scenario, &config)?;
/// assert_eq!(result.len(), 100);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RK4Solver;

impl RK4Solver {
    /// Create a new RK4 solver
    ///
    /// ```rust
    /// use biotrickle_rs::solver::{RK4Solver, Solver};
    ///
    /// let solver = RK4Solver::new();
    /// assert_eq!(solver.name(), "Runge Kutta (RK4)");
    /// ```
    pub fn new() -> Self {
        Self
    }
}

impl Solver for RK4Solver {
    fn solve(
        &self,
        scenario: &Scenario,
        config: &SolverConfiguration
    ) -> FilterResult<SimulationResult> {

        // ====== Step 1: Validation ======

        config.validate()?;
        scenario.validate()?;

        let (grid, substeps) = match &config.solver_type {
            SolverType::Marching { grid, substeps } => (grid.as_slice(), *substeps),
            other => {
                return Err(FilterError::InvalidConfiguration(format!(
                    "RK4Solver only supports Marching configuration, got {}",
                    other.name()
                )));
            }
        };

        // ====== Step 2: Integration ======

        let mut result = march(self.name(), scenario, grid, substeps, |model, state, h| {

            // Stage 1: Slope at beginning of interval
            let k1 = model.compute_physics(state);

            // Stage 2: Slope at midpoint using Euler prediction with k₁
            let k2 = model.compute_physics(&(state.clone() + k1.clone() * (h / 2.0)));

            // Stage 3: Slope at midpoint using Euler prediction with k₂
            let k3 = model.compute_physics(&(state.clone() + k2.clone() * (h / 2.0)));

            // Stage 4: Slope at end using Euler prediction with k₃
            let k4 = model.compute_physics(&(state.clone() + k3.clone() * h));

            // Simpson weights: 1/6 at the ends, 1/3 at the midpoints
            let weighted_slope = k1 + k2 * 2.0 + k3 * 2.0 + k4;

            state.clone() + weighted_slope * (h / 6.0)
        })?;

        let steps: usize = result.get_metadata("steps").and_then(|s| s.parse().ok()).unwrap_or(0);
        result.add_metadata("function evaluations", &(4 * steps).to_string());

        Ok(result)
    }

    fn name(&self) -> &'static str {
        "Runge Kutta (RK4)"
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{PhysicalData, PhysicalModel, PhysicalQuantity, PhysicalState};

    /// dy/dz = -k·y on several species at once
    struct ExponentialDecay {
        points: usize,
        decay_rate: f64,
    }

    impl PhysicalModel for ExponentialDecay {
        fn points(&self) -> usize {
            self.points
        }

        fn compute_physics(&self, state: &PhysicalState) -> PhysicalState {
            let mut result = state.clone();
            if let Some(conc) = result.get_mut(PhysicalQuantity::Concentration) {
                conc.apply(|y| -self.decay_rate * y);
            }
            result
        }

        fn setup_initial_state(&self) -> PhysicalState {
            PhysicalState::new(
                PhysicalQuantity::Concentration,
                PhysicalData::uniform_vector(self.points, 1.0),
            )
        }

        fn name(&self) -> &str {
            "Exponential Decay"
        }
    }

    /// dy/dz = c, exact solution y₀ + c·z
    struct ConstantGrowth {
        growth_rate: f64,
    }

    impl PhysicalModel for ConstantGrowth {
        fn points(&self) -> usize {
            1
        }

        fn compute_physics(&self, _state: &PhysicalState) -> PhysicalState {
            PhysicalState::new(PhysicalQuantity::Concentration, PhysicalData::from_scalar(self.growth_rate))
        }

        fn setup_initial_state(&self) -> PhysicalState {
            PhysicalState::new(PhysicalQuantity::Concentration, PhysicalData::from_scalar(0.0))
        }

        fn name(&self) -> &str {
            "Constant Growth"
        }
    }

    #[test]
    fn test_rk4_rejects_adaptive() {
        let scenario = Scenario::from_model(Box::new(ConstantGrowth { growth_rate: 1.0 }));
        let config = SolverConfiguration::adaptive(vec![0.0, 1.0], 1e-6, 1e-12);

        let err = RK4Solver::new().solve(&scenario, &config).unwrap_err();
        assert!(err.to_string().contains("only supports Marching"));
    }

    #[test]
    fn test_rk4_constant_growth_is_exact() {
        let scenario = Scenario::from_model(Box::new(ConstantGrowth { growth_rate: 2.0 }));
        let config = SolverConfiguration::uniform(10.0, 101);

        let result = RK4Solver::new().solve(&scenario, &config).unwrap();
        let final_value = result.final_state.scalar(PhysicalQuantity::Concentration).unwrap();

        assert!((final_value - 20.0).abs() < 1e-10);
        assert_eq!(result.get_metadata("function evaluations"), Some("400"));
    }

    #[test]
    fn test_rk4_exponential_decay_vector_state() {
        let decay_rate = 0.1;
        let scenario = Scenario::from_model(Box::new(ExponentialDecay { points: 5, decay_rate }));
        let config = SolverConfiguration::uniform(10.0, 101);

        let result = RK4Solver::new().solve(&scenario, &config).unwrap();
        let expected = (-decay_rate * 10.0f64).exp();

        let final_values = result.final_state.get(PhysicalQuantity::Concentration).unwrap();
        assert_eq!(final_values.len(), 5);
        for value in final_values.as_slice() {
            assert!((value - expected).abs() < 1e-8, "error {}", (value - expected).abs());
        }
    }

    #[test]
    fn test_rk4_convergence() {
        let decay_rate = 1.0;
        let exact = (-decay_rate * 5.0f64).exp();

        let errors: Vec<f64> = [20, 40, 80, 160]
            .iter()
            .map(|&substeps| {
                let scenario = Scenario::from_model(Box::new(ExponentialDecay { points: 1, decay_rate }));
                let config = SolverConfiguration::uniform(5.0, 2).with_substeps(substeps);
                let result = RK4Solver::new().solve(&scenario, &config).unwrap();
                let value = result.final_state.get(PhysicalQuantity::Concentration).unwrap().as_slice()[0];
                (value - exact).abs()
            })
            .collect();

        // Fourth order: halving h divides the error by ~16
        for pair in errors.windows(2) {
            let ratio = pair[0] / pair[1];
            assert!(ratio > 12.0 && ratio < 20.0, "convergence ratio {} is not fourth order", ratio);
        }
    }
}
