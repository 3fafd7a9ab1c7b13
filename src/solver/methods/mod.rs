//! Numerical methods for solving the column equations
//!
//! This module contains concrete implementations of the [`Solver`](crate::solver::Solver) trait.
//!
//! # Available Methods
//!
//! ## Fixed-step methods (`SolverType::Marching`)
//!
//! - **[`EulerSolver`]**: Forward Euler, first order, 1 evaluation per step
//! - **[`RK4Solver`]**: Classical Runge-Kutta, fourth order, 4 evaluations per step
//!
//! ## Adaptive methods (`SolverType::Adaptive`)
//!
//! - **[`DormandPrinceSolver`]**: Dormand-Prince 5(4) with embedded error
//!   estimate, 6 evaluations per attempted step. Default method of
//!   [`solve_profile`](crate::profile::solve_profile).
//!
//! Each solver is stateless and can be reused for multiple simulations.

pub mod euler;
mod rk4;
mod dopri;

// Re-exports for convenience
pub use euler::EulerSolver;
pub use rk4::RK4Solver;
pub use dopri::DormandPrinceSolver;

use crate::error::{FilterError, FilterResult};
use crate::physics::{PhysicalModel, PhysicalState};
use crate::solver::{instability, validate_state, Scenario, SimulationResult};

/// Inlet state of the scenario
pub(crate) fn inlet_state(scenario: &Scenario) -> FilterResult<PhysicalState> {
    scenario
        .conditions
        .initial_condition()
        .cloned()
        .ok_or_else(|| {
            FilterError::InvalidConfiguration("No inlet condition found in domain boundaries".to_string())
        })
}

/// Fixed-step integration shared by the explicit one-step methods
///
/// Every grid interval is split into `substeps` equal steps; `step` advances
/// the state by one step of size `h`. The state is recorded on each grid point.
pub(crate) fn march<F>(
    solver: &str,
    scenario: &Scenario,
    grid: &[f64],
    substeps: usize,
    step: F,
) -> FilterResult<SimulationResult>
where
    F: Fn(&dyn PhysicalModel, &PhysicalState, f64) -> PhysicalState,
{
    let model = scenario.model.as_ref();

    let mut state = inlet_state(scenario)?;

    let mut positions = Vec::with_capacity(grid.len());
    let mut trajectory = Vec::with_capacity(grid.len());
    positions.push(grid[0]);
    trajectory.push(state.clone());

    let mut steps_taken = 0usize;

    for window in grid.windows(2) {
        let (z_start, z_end) = (window[0], window[1]);
        let h = (z_end - z_start) / substeps as f64;

        if h > 0.0 {
            for k in 0..substeps {
                state = step(model, &state, h);
                steps_taken += 1;

                if let Err(reason) = validate_state(&state) {
                    // Position computed from the index to avoid accumulated rounding
                    let position = z_start + (k as f64 + 1.0) * h;
                    return Err(instability(solver, position, reason, positions, trajectory));
                }
            }
        }

        positions.push(z_end);
        trajectory.push(state.clone());
    }

    log::debug!(
        "{}: {} steps over {} grid points for {}",
        solver,
        steps_taken,
        grid.len(),
        model.name()
    );

    let mut result = SimulationResult::new(positions, trajectory, state);
    result.add_metadata("solver", solver);
    result.add_metadata("steps", &steps_taken.to_string());
    result.add_metadata("substeps", &substeps.to_string());
    Ok(result)
}
