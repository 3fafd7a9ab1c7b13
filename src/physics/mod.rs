//! Physical models
//!
//! This module provides traits and types for physical models.
//! A physical model encapsulates the governing equations of a system
//! (here: gas transport through a biofilm-coated column).
//!
//! # Core Concepts
//!
//! - **Physical Model**: Computes the equations at a given state
//! - **Physical State**: Container for all physical quantities
//! - **Physical Quantity**: Type-safe identifier for physical variables
//!
//! # Architecture
//!
//! Physical models are **separate from numerical solvers**:
//! - The model provides the **equations** (physics)
//! - The solver provides the **method** to solve them (numerics)
//!
//! # Implementing a New Physical Model
//!
//! ```rust
//! use biotrickle_rs::physics::{PhysicalData, PhysicalModel, PhysicalQuantity, PhysicalState};
//!
//! /// First-order decay dC/dz = -k C
//! struct FirstOrderDecay {
//!     rate: f64,
//! }
//!
//! impl PhysicalModel for FirstOrderDecay {
//!     fn points(&self) -> usize { 1 }
//!
//!     fn compute_physics(&self, state: &PhysicalState) -> PhysicalState {
//!         let c = state.scalar(PhysicalQuantity::Concentration).unwrap_or(0.0);
//!         PhysicalState::new(
//!             PhysicalQuantity::Concentration,
//!             PhysicalData::from_scalar(-self.rate * c),
//!         )
//!     }
//!
//!     fn setup_initial_state(&self) -> PhysicalState {
//!         PhysicalState::new(PhysicalQuantity::Concentration, PhysicalData::from_scalar(1.0))
//!     }
//!
//!     fn name(&self) -> &str { "First-order decay" }
//! }
//!
//! let model = FirstOrderDecay { rate: 0.5 };
//! let slope = model.compute_physics(&model.setup_initial_state());
//! assert_eq!(slope.scalar(PhysicalQuantity::Concentration), Some(-0.5));
//! ```

// module declaration
pub mod traits;
pub mod data;

// re-export commonly used types for convenience
pub use data::PhysicalData;
pub use traits::{
    PhysicalModel,
    PhysicalQuantity,
    PhysicalState, };
