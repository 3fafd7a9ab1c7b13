//! Dormand-Prince 5(4) adaptive solver
//!
//! # Mathematical Background
//!
//! Seven-stage explicit Runge-Kutta pair. The fifth-order solution is
//! propagated, the embedded fourth-order solution gives the local error
//! estimate. The last stage is evaluated at the new state and reused as the
//! first stage of the next step (FSAL), so an accepted step costs 6
//! evaluations.
//!
//! # Step Control
//!
//! For every element the error is scaled by `atol + rtol·max(|yₙ|, |yₙ₊₁|)`
//! and the RMS norm `err` of the scaled vector decides:
//!
//! ```text
//! err ≤ 1  → accept,  h ← h·min(5, 0.9·err^(-1/5))
//! err > 1  → reject,  h ← h·max(0.2, 0.9·err^(-1/5))
//! ```
//!
//! Steps are clipped so every grid point is hit exactly; no interpolation is
//! involved in the recorded profile.

use crate::error::FilterResult;
use crate::physics::{PhysicalModel, PhysicalState};
use crate::solver::methods::inlet_state;
use crate::solver::{
    instability, validate_state, Scenario, SimulationResult, Solver, SolverConfiguration, SolverType,
    DEFAULT_ABSOLUTE_TOLERANCE, DEFAULT_MAX_STEPS, DEFAULT_RELATIVE_TOLERANCE,
};

// Butcher tableau. The column equations do not depend on z explicitly, so
// the stage nodes c = (1/5, 3/10, 4/5, 8/9, 1, 1) are never evaluated.
const A21: f64 = 1.0 / 5.0;
const A31: f64 = 3.0 / 40.0;
const A32: f64 = 9.0 / 40.0;
const A41: f64 = 44.0 / 45.0;
const A42: f64 = -56.0 / 15.0;
const A43: f64 = 32.0 / 9.0;
const A51: f64 = 19372.0 / 6561.0;
const A52: f64 = -25360.0 / 2187.0;
const A53: f64 = 64448.0 / 6561.0;
const A54: f64 = -212.0 / 729.0;
const A61: f64 = 9017.0 / 3168.0;
const A62: f64 = -355.0 / 33.0;
const A63: f64 = 46732.0 / 5247.0;
const A64: f64 = 49.0 / 176.0;
const A65: f64 = -5103.0 / 18656.0;

// Fifth-order weights (also the seventh stage row)
const B1: f64 = 35.0 / 384.0;
const B3: f64 = 500.0 / 1113.0;
const B4: f64 = 125.0 / 192.0;
const B5: f64 = -2187.0 / 6784.0;
const B6: f64 = 11.0 / 84.0;

// Fifth minus fourth order weights
const E1: f64 = 71.0 / 57600.0;
const E3: f64 = -71.0 / 16695.0;
const E4: f64 = 71.0 / 1920.0;
const E5: f64 = -17253.0 / 339200.0;
const E6: f64 = 22.0 / 525.0;
const E7: f64 = -1.0 / 40.0;

const SAFETY: f64 = 0.9;
const MIN_FACTOR: f64 = 0.2;
const MAX_FACTOR: f64 = 5.0;

/// Adaptive Dormand-Prince 5(4) solver
///
/// Accepts `SolverType::Adaptive`. A `SolverType::Marching` configuration is
/// also accepted and solved on its grid with the default tolerances.
///
/// # Example
///
/// ```rust
/// use biotrickle_rs::models::{FilterParameters, GasPhaseModel};
/// use biotrickle_rs::solver::{linspace, DormandPrinceSolver, Scenario, Solver, SolverConfiguration};
///
/// # fn main() -> Result<(), biotrickle_rs::FilterError> {
/// let model = GasPhaseModel::new(FilterParameters::ammonia_reference(), 1.95e-4)?;
/// let scenario = Scenario::from_model(Box::new(model));
///
/// let config = SolverConfiguration::adaptive(linspace(0.0, 5.0, 100), 1e-8, 1e-16);
/// let result = DormandPrinceSolver::new().solve(&scenario, &config)?;
/// assert_eq!(result.len(), 100);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DormandPrinceSolver;

impl DormandPrinceSolver {
    /// Create a new Dormand-Prince solver
    pub fn new() -> Self {
        Self
    }
}

/// `y + h·Σ aᵢ·kᵢ`
fn combine(y: &PhysicalState, terms: &[(&PhysicalState, f64)], h: f64) -> PhysicalState {
    terms
        .iter()
        .fold(y.clone(), |acc, (k, a)| acc + (*k).clone() * (a * h))
}

/// Scaled RMS norm of the local error estimate
fn error_norm(
    error: &PhysicalState,
    y: &PhysicalState,
    y_new: &PhysicalState,
    relative_tolerance: f64,
    absolute_tolerance: f64,
) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;

    for (quantity, e) in error.iter() {
        let (Some(before), Some(after)) = (y.get(*quantity), y_new.get(*quantity)) else {
            continue;
        };

        for ((ei, a), b) in e.as_slice().iter().zip(before.as_slice()).zip(after.as_slice()) {
            let scale = absolute_tolerance + relative_tolerance * a.abs().max(b.abs());
            let ratio = if scale > 0.0 {
                ei / scale
            } else if *ei == 0.0 {
                0.0
            } else {
                f64::INFINITY
            };
            sum += ratio * ratio;
            count += 1;
        }
    }

    if count == 0 {
        0.0
    } else {
        (sum / count as f64).sqrt()
    }
}

/// Starting step from the ratio of state to slope magnitude
fn initial_step(
    y: &PhysicalState,
    slope: &PhysicalState,
    relative_tolerance: f64,
    absolute_tolerance: f64,
    span: f64,
) -> f64 {
    let zero = y.clone() * 0.0;
    let d0 = error_norm(y, y, &zero, relative_tolerance, absolute_tolerance);
    let d1 = error_norm(slope, y, &zero, relative_tolerance, absolute_tolerance);

    let h0 = if d0 < 1e-5 || d1 < 1e-5 || !d1.is_finite() {
        1e-6 * span
    } else {
        0.01 * d0 / d1
    };
    h0.min(span)
}

struct Stages {
    y_new: PhysicalState,
    k7: PhysicalState,
    error: PhysicalState,
}

fn attempt_step(model: &dyn PhysicalModel, y: &PhysicalState, k1: &PhysicalState, h: f64) -> Stages {
    let k2 = model.compute_physics(&combine(y, &[(k1, A21)], h));
    let k3 = model.compute_physics(&combine(y, &[(k1, A31), (&k2, A32)], h));
    let k4 = model.compute_physics(&combine(y, &[(k1, A41), (&k2, A42), (&k3, A43)], h));
    let k5 = model.compute_physics(&combine(y, &[(k1, A51), (&k2, A52), (&k3, A53), (&k4, A54)], h));
    let k6 = model.compute_physics(&combine(
        y,
        &[(k1, A61), (&k2, A62), (&k3, A63), (&k4, A64), (&k5, A65)],
        h,
    ));

    let y_new = combine(y, &[(k1, B1), (&k3, B3), (&k4, B4), (&k5, B5), (&k6, B6)], h);
    let k7 = model.compute_physics(&y_new);

    let error = combine(
        &(k1.clone() * 0.0),
        &[(k1, E1), (&k3, E3), (&k4, E4), (&k5, E5), (&k6, E6), (&k7, E7)],
        h,
    );

    Stages { y_new, k7, error }
}

impl Solver for DormandPrinceSolver {
    fn solve(&self, scenario: &Scenario, config: &SolverConfiguration) -> FilterResult<SimulationResult> {

        // ====== Step 1: Validation ======

        config.validate()?;
        scenario.validate()?;

        let (grid, rtol, atol, max_steps) = match &config.solver_type {
            SolverType::Adaptive { grid, relative_tolerance, absolute_tolerance, max_steps } => {
                (grid.as_slice(), *relative_tolerance, *absolute_tolerance, *max_steps)
            }
            SolverType::Marching { grid, .. } => (
                grid.as_slice(),
                DEFAULT_RELATIVE_TOLERANCE,
                DEFAULT_ABSOLUTE_TOLERANCE,
                DEFAULT_MAX_STEPS,
            ),
        };

        // ====== Step 2: Setup ======

        let model = scenario.model.as_ref();
        let mut y = inlet_state(scenario)?;

        let mut positions = Vec::with_capacity(grid.len());
        let mut trajectory = Vec::with_capacity(grid.len());
        positions.push(grid[0]);
        trajectory.push(y.clone());

        let span = grid[grid.len() - 1] - grid[0];
        let mut k1 = model.compute_physics(&y);
        let mut evaluations = 1usize;

        if let Err(reason) = validate_state(&k1) {
            return Err(instability(self.name(), grid[0], reason, positions, trajectory));
        }

        let mut h = if span > 0.0 { initial_step(&y, &k1, rtol, atol, span) } else { 0.0 };
        let mut z = grid[0];
        let mut accepted = 0usize;
        let mut rejected = 0usize;

        // ====== Step 3: Integration, grid point by grid point ======

        for &target in &grid[1..] {
            while z < target {
                if accepted + rejected >= max_steps {
                    let reason = format!("step budget of {} exhausted", max_steps);
                    return Err(instability(self.name(), z, reason, positions, trajectory));
                }

                let remaining = target - z;
                let clipped = h >= remaining;
                let h_step = if clipped { remaining } else { h };

                let min_step = 16.0 * f64::EPSILON * z.abs().max(1.0);
                if h_step < min_step && !clipped {
                    let reason = format!("step size {:e} fell below {:e}", h_step, min_step);
                    return Err(instability(self.name(), z, reason, positions, trajectory));
                }

                let stages = attempt_step(model, &y, &k1, h_step);
                evaluations += 6;

                let err = if validate_state(&stages.y_new).is_ok() && validate_state(&stages.k7).is_ok() {
                    error_norm(&stages.error, &y, &stages.y_new, rtol, atol)
                } else {
                    f64::INFINITY
                };

                if err <= 1.0 {
                    accepted += 1;
                    z = if clipped { target } else { z + h_step };
                    y = stages.y_new;
                    k1 = stages.k7;

                    let factor = if err == 0.0 {
                        MAX_FACTOR
                    } else {
                        (SAFETY * err.powf(-0.2)).clamp(MIN_FACTOR, MAX_FACTOR)
                    };
                    let proposed = h_step * factor;
                    h = if clipped { h.max(proposed) } else { proposed };
                } else {
                    rejected += 1;
                    let factor = if err.is_finite() {
                        (SAFETY * err.powf(-0.2)).clamp(MIN_FACTOR, 1.0)
                    } else {
                        MIN_FACTOR
                    };
                    log::trace!("{}: rejected h = {:e} at z = {} (err = {:e})", self.name(), h_step, z, err);
                    h = h_step * factor;
                }
            }

            positions.push(target);
            trajectory.push(y.clone());
        }

        log::debug!(
            "{}: {} accepted, {} rejected steps, {} evaluations for {}",
            self.name(),
            accepted,
            rejected,
            evaluations,
            model.name()
        );

        // ====== Step 4: Build Result ======

        let mut result = SimulationResult::new(positions, trajectory, y);
        result.add_metadata("solver", self.name());
        result.add_metadata("accepted steps", &accepted.to_string());
        result.add_metadata("rejected steps", &rejected.to_string());
        result.add_metadata("function evaluations", &evaluations.to_string());
        result.add_metadata("relative tolerance", &rtol.to_string());
        result.add_metadata("absolute tolerance", &atol.to_string());

        Ok(result)
    }

    fn name(&self) -> &'static str {
        "Dormand-Prince 5(4)"
    }
}

// =================================================================================================
// Tests
// =================================================================================================
