//! Forward Euler numerical solver
//!
//! # Mathematical Background
//!
//! ```text
//! dy/dz = f(y)
//! yₙ₊₁ = yₙ + h·f(yₙ)
//! ```
//!
//! - **Order**: First-order accurate (global error ~ O(h))
//! - **Cost**: 1 function evaluation per step
//!
//! Useful as a reference and for convergence studies. Prefer
//! [`RK4Solver`](crate::solver::RK4Solver) or
//! [`DormandPrinceSolver`](crate::solver::DormandPrinceSolver) for results.

use crate::error::{FilterError, FilterResult};
use crate::solver::methods::march;
use crate::solver::{Scenario, SimulationResult, Solver, SolverConfiguration, SolverType};

/// Forward Euler solver
///
/// # Example
///
/// ```rust
/// use biotrickle_rs::solver::{EulerSolver, Solver};
///
/// let solver = EulerSolver::new();
/// assert_eq!(solver.name(), "Forward Euler");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct EulerSolver;

impl EulerSolver {
    /// Create a new Euler solver
    pub fn new() -> Self {
        Self
    }
}

impl Solver for EulerSolver {
    fn solve(&self, scenario: &Scenario, config: &SolverConfiguration) -> FilterResult<SimulationResult> {

        // ====== Step 1: Validation ======

        config.validate()?;
        scenario.validate()?;

        let (grid, substeps) = match &config.solver_type {
            SolverType::Marching { grid, substeps } => (grid.as_slice(), *substeps),
            other => {
                return Err(FilterError::InvalidConfiguration(format!(
                    "EulerSolver only supports Marching configuration, got {}",
                    other.name()
                )));
            }
        };

        // ====== Step 2: Integration ======

        let mut result = march(self.name(), scenario, grid, substeps, |model, state, h| {
            // yₙ₊₁ = yₙ + h·f(yₙ)
            let slope = model.compute_physics(state);
            state.clone() + slope * h
        })?;

        let steps: usize = result.get_metadata("steps").and_then(|s| s.parse().ok()).unwrap_or(0);
        result.add_metadata("function evaluations", &steps.to_string());

        Ok(result)
    }

    fn name(&self) -> &'static str {
        "Forward Euler"
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{PhysicalData, PhysicalModel, PhysicalQuantity, PhysicalState};

    /// dy/dz = -k·y, exact solution y₀·exp(-k·z)
    struct ExponentialDecay {
        decay_rate: f64,
    }

    impl PhysicalModel for ExponentialDecay {
        fn points(&self) -> usize {
            1
        }

        fn compute_physics(&self, state: &PhysicalState) -> PhysicalState {
            let mut result = state.clone();
            if let Some(conc) = result.get_mut(PhysicalQuantity::Concentration) {
                conc.apply(|y| -self.decay_rate * y);
            }
            result
        }

        fn setup_initial_state(&self) -> PhysicalState {
            PhysicalState::new(PhysicalQuantity::Concentration, PhysicalData::from_scalar(1.0))
        }

        fn name(&self) -> &str {
            "Exponential Decay"
        }
    }

    fn decay_scenario(decay_rate: f64) -> Scenario {
        Scenario::from_model(Box::new(ExponentialDecay { decay_rate }))
    }

    #[test]
    fn test_euler_solver_creation() {
        assert_eq!(EulerSolver::default().name(), "Forward Euler");
    }

    #[test]
    fn test_euler_rejects_adaptive() {
        let config = SolverConfiguration::adaptive(vec![0.0, 1.0], 1e-6, 1e-12);
        let err = EulerSolver::new().solve(&decay_scenario(1.0), &config).unwrap_err();
        assert!(err.to_string().contains("only supports Marching"));
    }

    #[test]
    fn test_euler_trajectory_matches_grid() {
        let config = SolverConfiguration::uniform(2.0, 21);
        let result = EulerSolver::new().solve(&decay_scenario(0.5), &config).unwrap();

        assert_eq!(result.len(), 21);
        assert_eq!(result.positions, config.grid());
        assert_eq!(result.get_metadata("function evaluations"), Some("20"));
    }

    #[test]
    fn test_euler_exponential_decay() {
        let config = SolverConfiguration::uniform(1.0, 11).with_substeps(100);
        let result = EulerSolver::new().solve(&decay_scenario(1.0), &config).unwrap();

        let actual = result.final_state.scalar(PhysicalQuantity::Concentration).unwrap();
        let expected = (-1.0f64).exp();

        // h = 1e-3, first-order error ~ h·y/2
        assert!((actual - expected).abs() < 1e-3, "error {}", (actual - expected).abs());
    }

    #[test]
    fn test_euler_repeated_grid_point() {
        let config = SolverConfiguration::on_grid(vec![0.0, 0.5, 0.5, 1.0]);
        let result = EulerSolver::new().solve(&decay_scenario(1.0), &config).unwrap();

        let cg = result.scalar_series(PhysicalQuantity::Concentration).unwrap();
        assert_eq!(cg.len(), 4);
        assert_eq!(cg[1], cg[2]);
    }

    #[test]
    fn test_euler_detects_nan() {
        struct Broken;

        impl PhysicalModel for Broken {
            fn points(&self) -> usize {
                1
            }

            fn compute_physics(&self, _state: &PhysicalState) -> PhysicalState {
                PhysicalState::new(PhysicalQuantity::Concentration, PhysicalData::from_scalar(f64::NAN))
            }

            fn setup_initial_state(&self) -> PhysicalState {
                PhysicalState::new(PhysicalQuantity::Concentration, PhysicalData::from_scalar(1.0))
            }

            fn name(&self) -> &str {
                "Broken"
            }
        }

        let scenario = Scenario::from_model(Box::new(Broken));
        let config = SolverConfiguration::uniform(1.0, 5);
        let err = EulerSolver::new().solve(&scenario, &config).unwrap_err();

        match err {
            FilterError::NumericalInstability { position, partial, .. } => {
                assert!((position - 0.25).abs() < 1e-12);
                assert_eq!(partial.len(), 1);
                assert_eq!(partial.final_state.scalar(PhysicalQuantity::Concentration), Some(1.0));
            }
            other => panic!("unexpected error {other}"),
        }
    }
}
