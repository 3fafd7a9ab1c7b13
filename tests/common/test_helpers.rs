//! Helper functions for integration tests

use biotrickle_rs::physics::{PhysicalModel, PhysicalQuantity, PhysicalState};
use biotrickle_rs::solver::{linspace, DomainBoundaries, Scenario};

/// Inlet concentration of the reference ammonia column
pub const REFERENCE_CG0: f64 = 0.000195;

/// 100 heights between 0 and 5
pub fn reference_grid() -> Vec<f64> {
    linspace(0.0, 5.0, 100)
}

/// Assert that two physical states are close (within tolerance)
pub fn assert_states_close(
    state1: &PhysicalState,
    state2: &PhysicalState,
    tolerance: f64,
    message: &str,
) {
    for quantity in [PhysicalQuantity::Concentration, PhysicalQuantity::Temperature] {
        if let (Some(data1), Some(data2)) = (state1.get(quantity), state2.get(quantity)) {
            let (values1, values2) = (data1.as_slice(), data2.as_slice());

            assert_eq!(values1.len(), values2.len(), "{}: Dimension mismatch", message);

            for (i, (&v1, &v2)) in values1.iter().zip(values2.iter()).enumerate() {
                let diff = (v1 - v2).abs();
                assert!(
                    diff < tolerance,
                    "{}: Element {} differs by {} (tolerance {})",
                    message, i, diff, tolerance
                );
            }
        }
    }
}

/// Root mean square difference between two states
pub fn compute_l2_error(state1: &PhysicalState, state2: &PhysicalState) -> f64 {
    let mut sum_squared_diff = 0.0;
    let mut count = 0;

    for quantity in [PhysicalQuantity::Concentration, PhysicalQuantity::Temperature] {
        if let (Some(data1), Some(data2)) = (state1.get(quantity), state2.get(quantity)) {
            for (&v1, &v2) in data1.as_slice().iter().zip(data2.as_slice()) {
                sum_squared_diff += (v1 - v2).powi(2);
                count += 1;
            }
        }
    }

    if count > 0 {
        (sum_squared_diff / count as f64).sqrt()
    } else {
        0.0
    }
}

/// Scenario whose inlet is the model's own initial state
pub fn create_simple_scenario(model: Box<dyn PhysicalModel>) -> Scenario {
    let inlet = model.setup_initial_state();
    Scenario::new(model, DomainBoundaries::inlet(inlet))
}

/// Compute relative error: |actual - expected| / |expected|
pub fn relative_error(actual: f64, expected: f64) -> f64 {
    if expected.abs() < f64::MIN_POSITIVE {
        (actual - expected).abs()
    } else {
        (actual - expected).abs() / expected.abs()
    }
}
