//! Error types
//!
//! Every fallible operation in the crate returns [`FilterResult`].
//! Input problems are reported before any integration step is taken;
//! numerical failures carry whatever part of the profile was computed.

use thiserror::Error;

use crate::solver::SimulationResult;

/// Errors raised by parameter validation, the solvers and the heat balance.
#[derive(Error, Debug)]
pub enum FilterError {
    /// A physical parameter is non-finite or outside its admissible range.
    #[error("Invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// The evaluation grid is empty, non-finite or not sorted ascending.
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    /// The solver configuration cannot be used with this solver or scenario.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The integrator could not advance. `partial` holds every grid point
    /// reached before the failure, starting with the inlet state.
    #[error("Numerical instability at z = {position}: {reason}")]
    NumericalInstability {
        position: f64,
        reason: String,
        partial: Box<SimulationResult>,
    },

    /// A closed-form expression has a vanishing denominator.
    #[error("Division by zero: {0}")]
    DivisionByZero(String),
}

impl FilterError {
    /// Partial result attached to a numerical failure, if any.
    pub fn partial_result(&self) -> Option<&SimulationResult> {
        match self {
            FilterError::NumericalInstability { partial, .. } => Some(partial),
            _ => None,
        }
    }

    /// True for input errors that are raised before integration starts.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            FilterError::InvalidParameter { .. }
                | FilterError::InvalidGrid(_)
                | FilterError::InvalidConfiguration(_)
        )
    }
}

/// Convenience type for `Result<T, FilterError>`.
pub type FilterResult<T> = Result<T, FilterError>;

/// Check that `value` is finite and strictly positive.
pub(crate) fn require_positive(name: &'static str, value: f64) -> FilterResult<()> {
    if !value.is_finite() {
        return Err(FilterError::InvalidParameter {
            name,
            value,
            reason: "must be finite",
        });
    }
    if value <= 0.0 {
        return Err(FilterError::InvalidParameter {
            name,
            value,
            reason: "must be strictly positive",
        });
    }
    Ok(())
}

/// Check that `value` is finite and not negative.
pub(crate) fn require_non_negative(name: &'static str, value: f64) -> FilterResult<()> {
    if !value.is_finite() {
        return Err(FilterError::InvalidParameter {
            name,
            value,
            reason: "must be finite",
        });
    }
    if value < 0.0 {
        return Err(FilterError::InvalidParameter {
            name,
            value,
            reason: "must not be negative",
        });
    }
    Ok(())
}
