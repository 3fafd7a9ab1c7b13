//! Numerical solver traits and types
//!
//! # Design Philosophy
//!
//! - Central enum `SolverType` defines the kind of integration
//! - `SolverConfiguration` wraps a `SolverType`
//! - `SimulationResult` holds the states computed on the evaluation grid
//!
//! The independent variable of every column problem is the height `z`,
//! so configurations are built around an evaluation grid rather than a time span.

use std::collections::HashMap;

use crate::error::{FilterError, FilterResult};
use crate::physics::{PhysicalQuantity, PhysicalState};
use crate::solver::Scenario;

/// Default relative tolerance of adaptive integration
pub const DEFAULT_RELATIVE_TOLERANCE: f64 = 1e-8;

/// Default absolute tolerance of adaptive integration
pub const DEFAULT_ABSOLUTE_TOLERANCE: f64 = 1e-14;

/// Default budget of accepted plus rejected adaptive steps
pub const DEFAULT_MAX_STEPS: usize = 100_000;

// ============================================================================
// Central Solver Type Enumeration
// ============================================================================

/// Type of numerical integration
///
/// # Examples
///
/// ```rust
/// use biotrickle_rs::solver::SolverType;
///
/// let marching = SolverType::Marching {
///     grid: vec![0.0, 0.5, 1.0],
///     substeps: 10,
/// };
/// assert_eq!(marching.name(), "Marching");
/// assert!(marching.validate().is_ok());
/// ```
#[derive(Clone, Debug)]
pub enum SolverType {

    /// Fixed-step integration along the grid
    ///
    /// Used by: Euler, Runge-Kutta 4
    ///
    /// # Parameters
    /// - `grid`: Evaluation points, sorted ascending
    /// - `substeps`: Equal steps taken between two consecutive grid points
    Marching {
        grid: Vec<f64>,
        substeps: usize,
    },

    /// Adaptive integration with embedded error control
    ///
    /// Used by: Dormand-Prince 5(4)
    ///
    /// # Parameters
    /// - `grid`: Evaluation points, sorted ascending
    /// - `relative_tolerance`, `absolute_tolerance`: Local error bounds
    /// - `max_steps`: Total number of attempted steps before giving up
    Adaptive {
        grid: Vec<f64>,
        relative_tolerance: f64,
        absolute_tolerance: f64,
        max_steps: usize,
    },
}

impl SolverType {
    /// Get name identifier
    pub fn name(&self) -> &str {
        match self {
            SolverType::Marching { .. } => "Marching",
            SolverType::Adaptive { .. } => "Adaptive",
        }
    }

    /// Evaluation grid
    pub fn grid(&self) -> &[f64] {
        match self {
            SolverType::Marching { grid, .. } | SolverType::Adaptive { grid, .. } => grid,
        }
    }

    /// Validate that parameters are meaningful
    pub fn validate(&self) -> FilterResult<()> {
        validate_grid(self.grid())?;
        match self {
            SolverType::Marching { substeps, .. } => {
                if *substeps == 0 {
                    return Err(FilterError::InvalidConfiguration(
                        "Substeps must be greater than 0".to_string(),
                    ));
                }
                Ok(())
            }
            SolverType::Adaptive { relative_tolerance, absolute_tolerance, max_steps, .. } => {
                if !(relative_tolerance.is_finite() && *relative_tolerance > 0.0) {
                    return Err(FilterError::InvalidConfiguration(format!(
                        "Relative tolerance must be positive, got {}",
                        relative_tolerance
                    )));
                }
                if !(absolute_tolerance.is_finite() && *absolute_tolerance >= 0.0) {
                    return Err(FilterError::InvalidConfiguration(format!(
                        "Absolute tolerance must be non-negative, got {}",
                        absolute_tolerance
                    )));
                }
                if *max_steps == 0 {
                    return Err(FilterError::InvalidConfiguration(
                        "Maximum steps must be positive".to_string(),
                    ));
                }
                Ok(())
            }
        }
    }
}

/// Check an evaluation grid: non-empty, finite, sorted ascending
///
/// Repeated points are accepted; the profile simply repeats its value there.
pub fn validate_grid(grid: &[f64]) -> FilterResult<()> {
    if grid.is_empty() {
        return Err(FilterError::InvalidGrid("grid is empty".to_string()));
    }
    if let Some(index) = grid.iter().position(|z| !z.is_finite()) {
        return Err(FilterError::InvalidGrid(format!(
            "grid point {} is not finite ({})",
            index, grid[index]
        )));
    }
    if let Some(index) = grid.windows(2).position(|w| w[1] < w[0]) {
        return Err(FilterError::InvalidGrid(format!(
            "grid is not sorted ascending: z[{}] = {} > z[{}] = {}",
            index,
            grid[index],
            index + 1,
            grid[index + 1]
        )));
    }
    Ok(())
}

/// Evenly spaced grid of `points` values from 0 to `length`, endpoints included
///
/// ```rust
/// use biotrickle_rs::solver::linspace;
///
/// let grid = linspace(0.0, 5.0, 11);
/// assert_eq!(grid.len(), 11);
/// assert_eq!(grid[10], 5.0);
/// ```
pub fn linspace(start: f64, end: f64, points: usize) -> Vec<f64> {
    match points {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (points - 1) as f64;
            let mut grid: Vec<f64> = (0..points).map(|i| start + i as f64 * step).collect();
            // Avoid rounding drift on the last point
            grid[points - 1] = end;
            grid
        }
    }
}

// =================================================================================================
// Solver configuration
// =================================================================================================

/// Configuration for numerical solver
///
/// # Examples
///
/// ```rust
/// use biotrickle_rs::solver::SolverConfiguration;
///
/// // 100 points from z = 0 to z = 5, RK4 with 4 steps per interval
/// let config = SolverConfiguration::uniform(5.0, 100).with_substeps(4);
/// assert!(config.validate().is_ok());
///
/// // Adaptive integration on a custom grid
/// let config = SolverConfiguration::adaptive(vec![0.0, 1.0, 2.5], 1e-10, 1e-16);
/// assert_eq!(config.grid().len(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct SolverConfiguration {
    /// Type of solver and its parameters
    pub solver_type: SolverType,
}

impl SolverConfiguration {
    /// Create a new configuration with a given solver type
    pub fn new(solver_type: SolverType) -> Self {
        Self { solver_type }
    }

    /// Fixed-step configuration on `points` evenly spaced heights in `[0, length]`
    pub fn uniform(length: f64, points: usize) -> Self {
        Self::on_grid(linspace(0.0, length, points))
    }

    /// Fixed-step configuration on an explicit grid (one step per interval)
    pub fn on_grid(grid: Vec<f64>) -> Self {
        Self::new(SolverType::Marching { grid, substeps: 1 })
    }

    /// Adaptive configuration on an explicit grid
    pub fn adaptive(grid: Vec<f64>, relative_tolerance: f64, absolute_tolerance: f64) -> Self {
        Self::new(SolverType::Adaptive {
            grid,
            relative_tolerance,
            absolute_tolerance,
            max_steps: DEFAULT_MAX_STEPS,
        })
    }

    /// Builder pattern: steps per grid interval (fixed-step only)
    pub fn with_substeps(mut self, steps: usize) -> Self {
        if let SolverType::Marching { substeps, .. } = &mut self.solver_type {
            *substeps = steps;
        }
        self
    }

    /// Builder pattern: step budget (adaptive only)
    pub fn with_max_steps(mut self, steps: usize) -> Self {
        if let SolverType::Adaptive { max_steps, .. } = &mut self.solver_type {
            *max_steps = steps;
        }
        self
    }

    /// Evaluation grid
    pub fn grid(&self) -> &[f64] {
        self.solver_type.grid()
    }

    /// Validate configuration
    pub fn validate(&self) -> FilterResult<()> {
        self.solver_type.validate()
    }
}

// =================================================================================================
// Simulation result
// =================================================================================================

/// States computed on the evaluation grid
///
/// `state_trajectory[i]` is the state at `positions[i]`.
#[derive(Clone, Debug)]
pub struct SimulationResult {
    /// Heights at which the state was recorded
    pub positions: Vec<f64>,

    /// State at each recorded height
    pub state_trajectory: Vec<PhysicalState>,

    /// Last recorded state
    pub final_state: PhysicalState,

    /// Solver information (name, step counts, tolerances)
    pub metadata: HashMap<String, String>,
}

impl SimulationResult {
    /// Create a result
    pub fn new(
        positions: Vec<f64>,
        state_trajectory: Vec<PhysicalState>,
        final_state: PhysicalState,
    ) -> Self {
        Self {
            positions,
            state_trajectory,
            final_state,
            metadata: HashMap::new(),
        }
    }

    /// Number of recorded points
    pub fn len(&self) -> usize {
        self.state_trajectory.len()
    }

    /// True when nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.state_trajectory.is_empty()
    }

    /// Add a metadata entry
    pub fn add_metadata(&mut self, key: &str, value: &str) {
        self.metadata.insert(key.to_string(), value.to_string());
    }

    /// Get a metadata entry
    pub fn get_metadata(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    /// Values of a scalar quantity along the grid
    ///
    /// Returns `None` if any recorded state lacks the quantity
    /// or holds it as a vector.
    pub fn scalar_series(&self, quantity: PhysicalQuantity) -> Option<Vec<f64>> {
        self.state_trajectory
            .iter()
            .map(|state| state.scalar(quantity))
            .collect()
    }
}

// =================================================================================================
// Solver trait
// =================================================================================================

/// Trait for numerical solvers
///
/// A solver integrates the equations of `scenario.model` from the inlet
/// state of `scenario.conditions`, recording the state at every grid point
/// of `config`.
pub trait Solver: Send + Sync {
    /// Integrate the scenario on the configured grid
    fn solve(&self, scenario: &Scenario, config: &SolverConfiguration) -> FilterResult<SimulationResult>;

    /// Solver name
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::PhysicalData;

    #[test]
    fn test_linspace_matches_endpoints() {
        let grid = linspace(0.0, 5.0, 100);
        assert_eq!(grid.len(), 100);
        assert_eq!(grid[0], 0.0);
        assert_eq!(grid[99], 5.0);
        assert!((grid[1] - 5.0 / 99.0).abs() < 1e-15);
    }

    #[test]
    fn test_linspace_degenerate_sizes() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(2.0, 3.0, 1), vec![2.0]);
    }

    #[test]
    fn test_validate_grid() {
        assert!(validate_grid(&[0.0, 1.0, 2.0]).is_ok());
        assert!(validate_grid(&[0.0]).is_ok());
        assert!(validate_grid(&[0.0, 1.0, 1.0]).is_ok());

        assert!(matches!(validate_grid(&[]), Err(FilterError::InvalidGrid(_))));
        assert!(matches!(validate_grid(&[0.0, 2.0, 1.0]), Err(FilterError::InvalidGrid(_))));
        assert!(matches!(validate_grid(&[0.0, f64::NAN]), Err(FilterError::InvalidGrid(_))));
    }

    #[test]
    fn test_configuration_builders() {
        let config = SolverConfiguration::uniform(5.0, 100).with_substeps(8);
        match &config.solver_type {
            SolverType::Marching { grid, substeps } => {
                assert_eq!(grid.len(), 100);
                assert_eq!(*substeps, 8);
            }
            other => panic!("unexpected solver type {}", other.name()),
        }

        let config = SolverConfiguration::adaptive(vec![0.0, 1.0], 1e-6, 1e-12).with_max_steps(10);
        match &config.solver_type {
            SolverType::Adaptive { max_steps, .. } => assert_eq!(*max_steps, 10),
            other => panic!("unexpected solver type {}", other.name()),
        }
    }

    #[test]
    fn test_configuration_validation() {
        assert!(SolverConfiguration::uniform(5.0, 10).with_substeps(0).validate().is_err());
        assert!(SolverConfiguration::adaptive(vec![0.0, 1.0], 0.0, 1e-12).validate().is_err());
        assert!(SolverConfiguration::adaptive(vec![0.0, 1.0], 1e-6, -1.0).validate().is_err());
        assert!(SolverConfiguration::adaptive(vec![0.0, 1.0], 1e-6, 0.0).with_max_steps(0).validate().is_err());
        assert!(SolverConfiguration::on_grid(vec![]).validate().is_err());
    }

    #[test]
    fn test_scalar_series() {
        let states: Vec<PhysicalState> = [3.0, 2.0, 1.0]
            .iter()
            .map(|&c| PhysicalState::new(PhysicalQuantity::Concentration, PhysicalData::from_scalar(c)))
            .collect();
        let final_state = states[2].clone();
        let mut result = SimulationResult::new(vec![0.0, 1.0, 2.0], states, final_state);
        result.add_metadata("solver", "test");

        assert_eq!(result.len(), 3);
        assert_eq!(result.get_metadata("solver"), Some("test"));
        assert_eq!(result.scalar_series(PhysicalQuantity::Concentration), Some(vec![3.0, 2.0, 1.0]));
        assert_eq!(result.scalar_series(PhysicalQuantity::Temperature), None);
    }
}
