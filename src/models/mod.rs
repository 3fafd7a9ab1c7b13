//! Biotrickling filter models
//!
//! [`GasPhaseModel`] implements the [`PhysicalModel`](crate::physics::PhysicalModel)
//! trait: it provides `dCg/dz`, the solver integrates it along the column height.
//!
//! # Contents
//!
//! - [`FilterParameters`]: the physical and biological parameter set,
//!   with validation and the derived degradation capacity
//! - [`kinetics`]: Monod saturation, the temperature correlation for `K`
//!   and the steady-state biomass
//! - [`energy`]: heat yield and cooling load of the biofilm
//! - [`GasPhaseModel`]: the gas-phase concentration equation

// =================================================================================================
// Module Declarations
// =================================================================================================

pub mod energy;
pub mod gas_phase;
pub mod kinetics;
pub mod parameters;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use energy::{HeatBalance, BIOMASS_MOLAR_MASS};
pub use gas_phase::{GasPhaseModel, StateVariable};
pub use kinetics::{half_saturation_constant, monod_fraction, steady_state_biomass, AMMONIA_MOLAR_MASS};
pub use parameters::FilterParameters;
