//! biotrickle-rs: Biotrickling Filter Simulation
//!
//! Steady-state model of a biotrickling filter, a packed column in which a
//! biofilm degrades a gas-phase contaminant such as ammonia. The crate
//! computes the gas concentration profile `Cg(z)` along the column height
//! together with the auxiliary quantities of the biofilm (half-saturation
//! constant, steady biomass, cooling load).
//!
//! # Architecture
//!
//! The crate keeps physics and numerics apart:
//!
//! 1. **Physical models** define equations (what to solve):
//!    [`models::GasPhaseModel`] implements [`physics::PhysicalModel`]
//! 2. **Numerical solvers** provide methods (how to solve):
//!    Euler, RK4 and adaptive Dormand-Prince behind the [`solver::Solver`] trait
//! 3. **[`profile`]** wires both together for the common case
//!
//! # Quick Start
//!
//! ```rust
//! use biotrickle_rs::prelude::*;
//!
//! # fn main() -> Result<(), biotrickle_rs::FilterError> {
//! // 1. Parameters of the reference ammonia column
//! let params = FilterParameters::ammonia_reference();
//!
//! // 2. Evaluation grid: 100 heights between 0 and 5
//! let z = linspace(0.0, 5.0, 100);
//!
//! // 3. Solve
//! let profile = solve_profile(0.000195, &z, &params)?;
//!
//! // 4. Access results
//! println!("Removal efficiency: {:.1} %", 100.0 * profile.removal_efficiency());
//! assert!(profile.is_non_increasing());
//!
//! // Cooling load of the biofilm
//! let q_cool = HeatBalance::ammonia_reference().cooling_rate_for(&params)?;
//! assert!((q_cool - 1.6038e-5).abs() < 1e-8);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`physics`]: Model trait and state containers
//! - [`models`]: Filter parameters, kinetics, heat balance, gas-phase model
//! - [`solver`]: Numerical solvers (methods)
//! - [`profile`]: `solve_profile` and parameter sweeps
//! - [`output`]: CSV export and profile plots
//!
//! # Features
//!
//! - `parallel` (default): solve parameter sweeps on the rayon thread pool

// Core modules
pub mod error;
pub mod physics;

pub mod models;
pub mod solver;
pub mod profile;

pub mod output;

pub use error::{FilterError, FilterResult};

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use biotrickle_rs::prelude::*;
    //! ```
    pub use crate::error::{FilterError, FilterResult};
    pub use crate::models::{FilterParameters, GasPhaseModel, HeatBalance};
    pub use crate::physics::{PhysicalData, PhysicalModel, PhysicalQuantity, PhysicalState};
    pub use crate::profile::{solve_profile, solve_profile_with, solve_sweep, ConcentrationProfile};
    pub use crate::solver::{
        linspace, DormandPrinceSolver, EulerSolver, RK4Solver, Scenario, SimulationResult, Solver,
        SolverConfiguration, SolverType,
    };
}
