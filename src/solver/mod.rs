//! Numerical solvers
//!
//! This module provides traits and implementations for numerical solvers.
//! A numerical solver applies a numerical method to the equations provided
//! by a physical model within a specific scenario.
//!
//! # The Architecture (WHAT vs HOW)
//!
//! 1. **Scenario** (`Scenario`) - WHAT to solve
//!    - Physical model (equations)
//!    - Domain boundaries (inlet condition)
//!
//! 2. **Configuration** (`SolverConfiguration`) - HOW to solve
//!    - Evaluation grid along the column height
//!    - Fixed-step size or adaptive tolerances
//!
//! 3. **Solver** (`Solver` trait) - The numerical method
//!    - Euler, RK4 (fixed step) or Dormand-Prince (adaptive)
//!    - Returns the states on the grid
//!
//! # Workflow Diagram
//!
//! ```text
//! ┌─────────────────┐
//! │  Physical Model │  (equations)
//! └────────┬────────┘
//!          │
//! ┌────────▼────────┐ ┌─────────────────┐
//! │ Scenario        │◄┤ Inlet condition │ ← WHAT to solve
//! └────────┬────────┘ └─────────────────┘
//!          │
//! ┌────────▼─────────────┐
//! │ Solver Configuration │ ← HOW to solve (grid + step control)
//! └────────┬─────────────┘
//!          │
//! ┌────────▼────────┐
//! │ Numerical Solver│ ← The method
//! └────────┬────────┘
//!          │
//! ┌────────▼────────────┐
//! │ Simulation Result   │ ← States on the grid
//! └─────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use biotrickle_rs::models::{FilterParameters, GasPhaseModel};
//! use biotrickle_rs::physics::PhysicalQuantity;
//! use biotrickle_rs::solver::{RK4Solver, Scenario, Solver, SolverConfiguration};
//!
//! # fn main() -> Result<(), biotrickle_rs::FilterError> {
//! let model = GasPhaseModel::new(FilterParameters::ammonia_reference(), 1.95e-4)?;
//! let scenario = Scenario::from_model(Box::new(model));
//!
//! let config = SolverConfiguration::uniform(5.0, 100).with_substeps(4);
//! let result = RK4Solver::new().solve(&scenario, &config)?;
//!
//! let cg = result.scalar_series(PhysicalQuantity::Concentration).unwrap();
//! assert_eq!(cg.len(), 100);
//! assert!(cg[99] < cg[0]);
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! Solvers return [`FilterError`](crate::FilterError):
//! - `InvalidGrid` / `InvalidConfiguration` before any step is taken
//! - `NumericalInstability` with the partial result when a step fails

// =================================================================================================
// Module Declarations
// =================================================================================================
mod traits;
mod boundary;
mod scenario;
mod methods;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use traits::{
    linspace,
    validate_grid,
    SimulationResult,
    Solver,
    SolverConfiguration,
    SolverType,
    DEFAULT_ABSOLUTE_TOLERANCE,
    DEFAULT_MAX_STEPS,
    DEFAULT_RELATIVE_TOLERANCE,
};

pub use boundary::DomainBoundaries;
pub use scenario::Scenario;

pub use methods::{DormandPrinceSolver, EulerSolver, RK4Solver};

// =================================================================================================
// Helper Functions
// =================================================================================================

use crate::error::FilterError;
use crate::physics::PhysicalState;

/// Validate physical state for numerical issues
///
/// Returns a diagnostic message when the state holds NaN or Inf values.
pub(crate) fn validate_state(state: &PhysicalState) -> Result<(), String> {
    for (quantity, data) in state.iter() {
        let values = data.as_slice();

        // NaN can arise from 0/0, Inf - Inf, or other undefined operations
        if values.iter().any(|x| x.is_nan()) {
            return Err(format!("NaN detected in {}", quantity));
        }

        // Inf can indicate overflow or division by zero
        if values.iter().any(|x| x.is_infinite()) {
            return Err(format!("Infinity detected in {}", quantity));
        }
    }

    Ok(())
}

/// Build a `NumericalInstability` error carrying what was computed so far
pub(crate) fn instability(
    solver: &str,
    position: f64,
    reason: String,
    positions: Vec<f64>,
    trajectory: Vec<PhysicalState>,
) -> FilterError {
    log::warn!("{} stopped at z = {}: {}", solver, position, reason);

    // The inlet state is always recorded first, so the trajectory is never empty
    let final_state = trajectory.last().cloned().unwrap_or_else(PhysicalState::empty);
    let mut partial = SimulationResult::new(positions, trajectory, final_state);
    partial.add_metadata("solver", solver);
    partial.add_metadata("status", "partial");

    FilterError::NumericalInstability {
        position,
        reason,
        partial: Box::new(partial),
    }
}

// =================================================================================================
// Tests
// =================================================================================================
