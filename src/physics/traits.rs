//! Physical models traits and types
//!
//! This module defines the core API for physical models:
//! - `PhysicalModel`: trait for all physical models
//! - `PhysicalState`: flexible state container
//! - `PhysicalQuantity`: type-safe quantity identifiers

use std::collections::HashMap;
use std::fmt;

use crate::physics::PhysicalData;

// =================================================================================================
// Physical quantities (Type-safe Identifiers)
// =================================================================================================

/// Known physical quantities (type-safe enum)
///
/// # Example
/// ```
/// use biotrickle_rs::physics::{PhysicalData, PhysicalQuantity, PhysicalState};
///
/// let oxygen = PhysicalQuantity::Custom("Oxygen");
/// let mut state = PhysicalState::empty();
/// state.set(oxygen, PhysicalData::from_scalar(8.0e-3));
/// assert!(state.get(oxygen).is_some());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhysicalQuantity {
    /// Gas-phase concentration (mg/L)
    Concentration,

    /// `ln(Cg/Cg₀)`, dimensionless
    LogConcentrationRatio,

    /// Temperature (°C)
    Temperature,

    /// Custom quantity (for use extension)
    Custom(&'static str),
}

impl fmt::Display for PhysicalQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhysicalQuantity::Concentration => write!(f, "Concentration"),
            PhysicalQuantity::LogConcentrationRatio => write!(f, "ln(Cg/Cg0)"),
            PhysicalQuantity::Temperature => write!(f, "Temperature"),
            PhysicalQuantity::Custom(name) => write!(f, "{}", name),
        }
    }
}

// =================================================================================================
// Physical State (Flexible State Container)
// =================================================================================================

/// Physical state of the system at one position along the column
///
/// # Example
/// ```
/// use biotrickle_rs::physics::{PhysicalData, PhysicalQuantity, PhysicalState};
///
/// let state = PhysicalState::new(
///     PhysicalQuantity::Concentration,
///     PhysicalData::from_scalar(1.95e-4),
/// );
/// assert_eq!(state.scalar(PhysicalQuantity::Concentration), Some(1.95e-4));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicalState {
    /// Physical quantities stored in a dictionary
    pub(crate) quantities: HashMap<PhysicalQuantity, PhysicalData>,

    /// Scalar metadata (optional)
    metadata: HashMap<String, f64>,
}

impl PhysicalState {
    /// Create a new state with primary quantity
    pub fn new(quantity: PhysicalQuantity, value: PhysicalData) -> Self {
        let mut quantities = HashMap::new();
        quantities.insert(quantity, value);

        Self {
            quantities,
            metadata: HashMap::new(),
        }
    }

    /// Create an empty state
    pub fn empty() -> Self {
        Self {
            quantities: HashMap::new(),
            metadata: HashMap::new(),
        }
    }

    /// Get a quantity by type
    pub fn get(&self, quantity: PhysicalQuantity) -> Option<&PhysicalData> {
        self.quantities.get(&quantity)
    }

    /// Get mutable reference to a quantity
    pub fn get_mut(&mut self, quantity: PhysicalQuantity) -> Option<&mut PhysicalData> {
        self.quantities.get_mut(&quantity)
    }

    /// Get a scalar quantity
    pub fn scalar(&self, quantity: PhysicalQuantity) -> Option<f64> {
        self.get(quantity).and_then(PhysicalData::try_as_scalar)
    }

    /// Set a quantity
    pub fn set(&mut self, quantity: PhysicalQuantity, value: PhysicalData) {
        self.quantities.insert(quantity, value);
    }

    /// List of available physical state quantities
    pub fn available_quantities(&self) -> Vec<PhysicalQuantity> {
        self.quantities.keys().cloned().collect()
    }

    /// Iterate over quantities and their data
    pub fn iter(&self) -> impl Iterator<Item = (&PhysicalQuantity, &PhysicalData)> {
        self.quantities.iter()
    }

    /// Get a metadata
    pub fn get_metadata(&self, key: &str) -> Option<f64> {
        self.metadata.get(key).copied()
    }

    /// Set a metadata
    pub fn set_metadata(&mut self, key: String, value: f64) {
        self.metadata.insert(key, value);
    }
}

// Operator overloading for numerical operations

impl std::ops::Add for PhysicalState {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        for (quantity, value) in rhs.quantities {
            match self.quantities.remove(&quantity) {
                Some(existing) => {
                    self.quantities.insert(quantity, existing + value);
                }
                None => {
                    self.quantities.insert(quantity, value);
                }
            }
        }
        self
    }
}

impl std::ops::Mul<f64> for PhysicalState {

    type Output = Self;
    fn mul(mut self, scalar: f64) -> Self::Output {
        self.quantities = self
            .quantities
            .into_iter()
            .map(|(quantity, data)| (quantity, data * scalar))
            .collect();
        self
    }
}

// =================================================================================================
// Physical Model Trait
// =================================================================================================

/// Trait for physical models
///
/// # Responsibility
/// Computes the right-hand side of the governing equations at a given state.
/// Does NOT solve them (that's the Solver's job).
///
/// For the column models in this crate the independent variable is the
/// height `z`: `compute_physics` returns `dy/dz`.
pub trait PhysicalModel: Send + Sync {

    /// Number of points carried by the state
    fn points(&self) -> usize;

    /// Computes the derivative of every quantity at `state`
    ///
    /// The equations are autonomous in `z`.
    fn compute_physics(&self, state: &PhysicalState) -> PhysicalState;

    /// Creates the inlet state for this physical model
    fn setup_initial_state(&self) -> PhysicalState;

    /// Name of the model (used to display and logging)
    fn name(&self) -> &str;

    /// Description of the model (option)
    fn description(&self) -> Option<&str> {
        None
    }
}

// =================================================================================================
// Tests
// =================================================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_physical_state() {
        let physics = PhysicalState::empty();

        assert_eq!(physics.quantities.len(), 0);
        assert_eq!(physics.metadata.len(), 0);
    }

    #[test]
    fn test_new_physical_state() {
        let quantity = PhysicalQuantity::Custom("Oxygen");
        let physics = PhysicalState::new(quantity, PhysicalData::from_vec(vec![1.0, 2.0]));

        assert_eq!(physics.quantities.len(), 1);
        assert!(physics.available_quantities().contains(&quantity));
        assert_eq!(physics.get(quantity).unwrap().len(), 2);
        assert!(physics.scalar(quantity).is_none());
    }

    #[test]
    fn test_metadata() {
        let mut physics = PhysicalState::empty();

        physics.set_metadata("position".to_string(), 2.5);
        assert_eq!(physics.get_metadata("position"), Some(2.5));
        assert_eq!(physics.get_metadata("missing"), None);
    }

    #[test]
    fn test_addition() {
        let state_one = PhysicalState::new(
            PhysicalQuantity::Concentration,
            PhysicalData::from_scalar(3.0),
        );
        let state_two = PhysicalState::new(
            PhysicalQuantity::Concentration,
            PhysicalData::from_scalar(-1.0),
        );
        let temperature = PhysicalState::new(
            PhysicalQuantity::Temperature,
            PhysicalData::from_scalar(20.0),
        );

        let sum = state_one.clone() + state_two;
        assert_eq!(sum.scalar(PhysicalQuantity::Concentration), Some(2.0));

        let merged = temperature + state_one;
        assert_eq!(merged.scalar(PhysicalQuantity::Temperature), Some(20.0));
        assert_eq!(merged.scalar(PhysicalQuantity::Concentration), Some(3.0));
    }

    #[test]
    fn test_multiplication() {
        let state = PhysicalState::new(
            PhysicalQuantity::Concentration,
            PhysicalData::from_vec(vec![1.0, 2.0]),
        ) * 10.0;

        assert_eq!(
            state.get(PhysicalQuantity::Concentration).unwrap().as_slice(),
            &[10.0, 20.0]
        );
    }

    #[test]
    fn test_quantity_display() {
        assert_eq!(PhysicalQuantity::Concentration.to_string(), "Concentration");
        assert_eq!(PhysicalQuantity::LogConcentrationRatio.to_string(), "ln(Cg/Cg0)");
        assert_eq!(PhysicalQuantity::Custom("H2S").to_string(), "H2S");
    }
}
