//! Convergence tests for numerical solvers
//!
//! These tests verify that solvers exhibit the expected
//! convergence rates when refining the step along the column.

use biotrickle_rs::physics::PhysicalQuantity;
use biotrickle_rs::solver::{DormandPrinceSolver, EulerSolver, RK4Solver, Solver, SolverConfiguration};

mod common;
use common::{create_simple_scenario, ExponentialDecay};

fn final_value(solver: &dyn Solver, config: &SolverConfiguration, decay_rate: f64) -> f64 {
    let scenario = create_simple_scenario(Box::new(ExponentialDecay::new(5, decay_rate)));
    let result = solver.solve(&scenario, config).unwrap();
    result.final_state.get(PhysicalQuantity::Concentration).unwrap().as_slice()[0]
}

#[test]
fn test_euler_first_order_convergence() {
    // error ~ O(h): halving h halves the error
    let decay_rate: f64 = 0.3;
    let length = 10.0;
    let exact = (-decay_rate * length).exp();

    let errors: Vec<f64> = [100, 200, 400, 800]
        .iter()
        .map(|&steps| {
            let config = SolverConfiguration::uniform(length, steps + 1);
            (final_value(&EulerSolver::new(), &config, decay_rate) - exact).abs()
        })
        .collect();

    for (i, pair) in errors.windows(2).enumerate() {
        let ratio = pair[0] / pair[1];
        println!("Euler convergence ratio {}->{}: {}", i, i + 1, ratio);
        assert!(ratio > 1.8 && ratio < 2.2, "Convergence ratio {} not first-order", ratio);
    }
}

#[test]
fn test_rk4_fourth_order_convergence() {
    // error ~ O(h⁴): halving h divides the error by 16
    let decay_rate: f64 = 0.3;
    let length = 5.0;
    let exact = (-decay_rate * length).exp();

    let errors: Vec<f64> = [10, 20, 40, 80]
        .iter()
        .map(|&steps| {
            let config = SolverConfiguration::uniform(length, 2).with_substeps(steps);
            (final_value(&RK4Solver::new(), &config, decay_rate) - exact).abs()
        })
        .collect();

    for (i, pair) in errors.windows(2).enumerate() {
        let ratio = pair[0] / pair[1];
        println!("RK4 convergence ratio {}->{}: {}", i, i + 1, ratio);
        assert!(ratio > 12.0 && ratio < 20.0, "Convergence ratio {} not fourth-order", ratio);
    }
}

#[test]
fn test_dormand_prince_error_follows_tolerance() {
    let decay_rate: f64 = 0.8;
    let length = 5.0;
    let exact = (-decay_rate * length).exp();
    let grid = vec![0.0, length];

    let errors: Vec<f64> = [1e-4, 1e-7, 1e-10]
        .iter()
        .map(|&rtol| {
            let config = SolverConfiguration::adaptive(grid.clone(), rtol, rtol * 1e-3);
            (final_value(&DormandPrinceSolver::new(), &config, decay_rate) - exact).abs() / exact
        })
        .collect();

    assert!(errors[0] > errors[1] && errors[1] > errors[2], "errors {:?}", errors);
    assert!(errors[2] < 1e-8);
}
