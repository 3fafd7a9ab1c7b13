//! Column boundary conditions
//!
//! A plug-flow column with no axial dispersion needs a single condition:
//! the state entering at the bottom of the bed. The outlet is free.

use std::fmt;

use crate::error::{FilterError, FilterResult};
use crate::physics::PhysicalState;

/// Domain boundaries along the column axis
///
/// # Examples
///
/// ```rust
/// use biotrickle_rs::physics::{PhysicalData, PhysicalQuantity, PhysicalState};
/// use biotrickle_rs::solver::DomainBoundaries;
///
/// let inlet = PhysicalState::new(
///     PhysicalQuantity::Concentration,
///     PhysicalData::from_scalar(1.95e-4),
/// );
/// let boundaries = DomainBoundaries::inlet(inlet);
///
/// assert_eq!(boundaries.axis(), "z");
/// assert!(boundaries.initial_condition().is_some());
/// assert!(boundaries.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub struct DomainBoundaries {
    /// Name of the integration axis
    axis: String,

    /// State at the first grid point
    inlet: Option<PhysicalState>,
}

impl DomainBoundaries {
    /// Inlet condition on the column height `z`
    pub fn inlet(state: PhysicalState) -> Self {
        Self::along("z", state)
    }

    /// Inlet condition on a named axis
    pub fn along(axis: &str, state: PhysicalState) -> Self {
        Self {
            axis: axis.to_string(),
            inlet: Some(state),
        }
    }

    /// Axis name
    pub fn axis(&self) -> &str {
        &self.axis
    }

    /// State imposed at the first grid point
    pub fn initial_condition(&self) -> Option<&PhysicalState> {
        self.inlet.as_ref()
    }

    /// Check the inlet condition exists and is finite
    pub fn validate(&self) -> FilterResult<()> {
        let inlet = self.inlet.as_ref().ok_or_else(|| {
            FilterError::InvalidConfiguration("No inlet condition found in domain boundaries".to_string())
        })?;

        if inlet.iter().next().is_none() {
            return Err(FilterError::InvalidConfiguration(
                "Inlet condition holds no physical quantity".to_string(),
            ));
        }

        for (quantity, data) in inlet.iter() {
            if !data.is_finite() {
                return Err(FilterError::InvalidConfiguration(format!(
                    "Inlet {} is not finite",
                    quantity
                )));
            }
        }
        Ok(())
    }
}

impl fmt::Display for DomainBoundaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inlet {
            Some(state) => write!(
                f,
                "inlet on {} ({} quantities)",
                self.axis,
                state.available_quantities().len()
            ),
            None => write!(f, "no inlet condition"),
        }
    }
}
