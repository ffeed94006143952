//! End-to-end tests of the variable-coefficient multigrid solver.
//!
//! Manufactured solutions with zero Dirichlet boundaries check the second
//! order of the discretisation; periodic problems check the solvability
//! condition and recovery up to an additive constant.

use ccfv::{
    Bounds2D, BoundaryCondition, BoundaryConditions, Grid2D, MultigridConfig, MultigridError,
    ScalarField, Smoother, SolverState, StoppingCriterion, VarCoeffMultigrid,
};
use std::f64::consts::PI;

/// `v = (x² - x⁴)(y⁴ - y²)`, zero on the unit square boundary.
fn exact(x: f64, y: f64) -> f64 {
    (x * x - x.powi(4)) * (y.powi(4) - y * y)
}

/// `∇²v` for [`exact`].
fn laplacian(x: f64, y: f64) -> f64 {
    -2.0 * ((1.0 - 6.0 * x * x) * y * y * (1.0 - y * y)
        + (1.0 - 6.0 * y * y) * x * x * (1.0 - x * x))
}

fn eta(x: f64, y: f64) -> f64 {
    1.0 + x + y
}

/// `∇·(η ∇v)` for [`exact`] and [`eta`].
fn variable_rhs(x: f64, y: f64) -> f64 {
    let vx = (2.0 * x - 4.0 * x.powi(3)) * (y.powi(4) - y * y);
    let vy = (x * x - x.powi(4)) * (4.0 * y.powi(3) - 2.0 * y);
    eta(x, y) * laplacian(x, y) + vx + vy
}

fn solve_dirichlet<C, F>(n: usize, coeff: C, rhs: F, config: MultigridConfig) -> (f64, usize)
where
    C: Fn(f64, f64) -> f64,
    F: Fn(f64, f64) -> f64,
{
    let grid = Grid2D::unit_square(n, n, 1).unwrap();
    let coeffs = ScalarField::from_fn(grid, coeff);
    let bcs = BoundaryConditions::dirichlet_zero();
    let mut mg = VarCoeffMultigrid::new(grid, bcs, &coeffs, config).unwrap();
    mg.init_zeros();
    mg.init_rhs_with(rhs).unwrap();

    let report = mg.solve(1e-11).unwrap();
    assert!(report.converged, "n={}: {}", n, report);
    assert_eq!(mg.state(), SolverState::Converged);
    (mg.true_error(exact).l2, report.num_cycles)
}

fn check_second_order(label: &str, results: &[(usize, f64, usize)]) {
    println!("{}:", label);
    for (k, &(n, err, cycles)) in results.iter().enumerate() {
        if k > 0 {
            let ratio = results[k - 1].1 / err;
            println!(
                "  n={:3}: error={:.4e}, ratio={:.2}, order={:.2}, cycles={}",
                n,
                err,
                ratio,
                ratio.log2(),
                cycles
            );
            assert!(ratio > 3.0, "{}: error ratio {:.2} at n={}", label, ratio, n);
        } else {
            println!("  n={:3}: error={:.4e}, cycles={}", n, err, cycles);
        }
        assert!(cycles < 50, "{}: {} cycles at n={}", label, cycles, n);
    }
}

#[test]
fn test_constant_coefficient_convergence() {
    let results: Vec<_> = [16, 32, 64]
        .iter()
        .map(|&n| {
            let config = MultigridConfig::default();
            let (err, cycles) = solve_dirichlet(n, |_, _| 1.0, laplacian, config);
            (n, err, cycles)
        })
        .collect();
    check_second_order("Constant coefficient", &results);
}

#[test]
fn test_variable_coefficient_convergence() {
    let results: Vec<_> = [16, 32, 64]
        .iter()
        .map(|&n| {
            let (err, cycles) = solve_dirichlet(n, eta, variable_rhs, MultigridConfig::default());
            (n, err, cycles)
        })
        .collect();
    check_second_order("Variable coefficient", &results);
}

#[test]
fn test_jacobi_matches_gauss_seidel() {
    let config = MultigridConfig::default()
        .with_smoother(Smoother::WeightedJacobi)
        .with_criterion(StoppingCriterion::RelativeResidual);
    let (err_jacobi, _) = solve_dirichlet(32, eta, variable_rhs, config);
    let (err_gs, _) = solve_dirichlet(32, eta, variable_rhs, MultigridConfig::default());
    assert!((err_jacobi - err_gs).abs() < 1e-8 * err_gs.max(1.0));
}

#[test]
fn test_periodic_scenario_recovers_solution_up_to_constant() {
    let bounds = Bounds2D::new(0.0, 2.0, 0.0, 2.0);
    let grid = Grid2D::new(8, 8, 1, bounds).unwrap();
    let coeffs = ScalarField::from_fn(grid, |_, _| 1.0);
    let rhs = ScalarField::from_fn(grid, |x, y| -2.0 * PI * PI * (PI * x).sin() * (PI * y).sin());

    // The right-hand side of a periodic problem must integrate to zero
    assert!(rhs.interior_sum().abs() < 1e-12);

    let config = MultigridConfig::default().with_verbose(true);
    let bcs = BoundaryConditions::periodic();
    let mut mg = VarCoeffMultigrid::new(grid, bcs, &coeffs, config).unwrap();
    mg.init_zeros();
    mg.init_rhs(&rhs).unwrap();
    let report = mg.solve(1e-11).unwrap();
    assert!(report.converged, "{}", report);
    assert!(report.num_cycles > 0);

    let v = mg.solution();
    let g = *v.grid();
    let v_mean = v.interior_mean();
    let mut max_err: f64 = 0.0;
    for (i, j) in g.interior().iter() {
        let expected = (PI * g.x(i)).sin() * (PI * g.y(j)).sin();
        max_err = max_err.max((v[(i, j)] - v_mean - expected).abs());
    }
    println!("periodic 8x8: max error {:.4e} after {} cycles", max_err, report.num_cycles);
    assert!(max_err < 0.1);
}

#[test]
fn test_periodic_nonzero_mean_is_ill_posed() {
    // Same right-hand side on [0, 1]² no longer integrates to zero
    let grid = Grid2D::unit_square(8, 8, 1).unwrap();
    let coeffs = ScalarField::from_fn(grid, |_, _| 1.0);
    let mut mg = VarCoeffMultigrid::new(
        grid,
        BoundaryConditions::periodic(),
        &coeffs,
        MultigridConfig::default(),
    )
    .unwrap();
    mg.init_zeros();

    let err = mg
        .init_rhs_with(|x, y| -2.0 * PI * PI * (PI * x).sin() * (PI * y).sin())
        .unwrap_err();
    match err {
        MultigridError::IncompatibleRhs { mean, tolerance } => {
            assert!(mean.abs() > tolerance);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(matches!(mg.solve(1e-8), Err(MultigridError::NotInitialized { .. })));
}

#[test]
fn test_zero_flux_walls_are_singular_too() {
    let grid = Grid2D::unit_square(8, 8, 1).unwrap();
    let coeffs = ScalarField::from_fn(grid, |_, _| 1.0);
    let bcs = BoundaryConditions::new(
        BoundaryCondition::Periodic,
        BoundaryCondition::Periodic,
        BoundaryCondition::Neumann(0.0),
        BoundaryCondition::Neumann(0.0),
    )
    .unwrap();
    let mut mg = VarCoeffMultigrid::new(grid, bcs, &coeffs, MultigridConfig::default()).unwrap();
    mg.init_zeros();
    assert!(mg.init_rhs_with(|_, y| y).is_err());

    // cos(πy) has zero mean and zero normal derivative at the walls
    mg.init_rhs_with(|_, y| (PI * y).cos()).unwrap();
    let report = mg.solve(1e-10).unwrap();
    assert!(report.converged, "{}", report);
}

#[test]
fn test_inhomogeneous_edges() {
    // Fixed slope on the left, fixed value on the right: v = 2 (x - 1)
    let grid = Grid2D::unit_square(16, 16, 1).unwrap();
    let coeffs = ScalarField::from_fn(grid, |_, y| 1.0 + y * y);
    let bcs = BoundaryConditions::new(
        BoundaryCondition::Neumann(2.0),
        BoundaryCondition::Dirichlet(0.0),
        BoundaryCondition::Periodic,
        BoundaryCondition::Periodic,
    )
    .unwrap();
    let mut mg = VarCoeffMultigrid::new(grid, bcs, &coeffs, MultigridConfig::default()).unwrap();
    mg.init_zeros();
    mg.init_rhs_with(|_, _| 0.0).unwrap();
    let report = mg.solve(1e-12).unwrap();
    assert!(report.converged, "{}", report);

    // η varies only across the flow, so v stays linear
    let err = mg.true_error(|x, _| 2.0 * (x - 1.0));
    assert!(err.max < 1e-8, "max error {:.3e}", err.max);

    let (gx, gy) = mg.solution_gradient().unwrap();
    assert!((gx.interior_mean() - 2.0).abs() < 1e-8);
    assert!(gy.interior_max_abs() < 1e-8);
}

#[test]
fn test_history_records_every_cycle() {
    let grid = Grid2D::unit_square(32, 32, 1).unwrap();
    let coeffs = ScalarField::from_fn(grid, eta);
    let mut mg = VarCoeffMultigrid::new(
        grid,
        BoundaryConditions::dirichlet_zero(),
        &coeffs,
        MultigridConfig::default(),
    )
    .unwrap();
    mg.init_zeros();
    mg.init_rhs_with(variable_rhs).unwrap();
    let report = mg.solve(1e-10).unwrap();

    let history = mg.history();
    assert_eq!(history.len(), report.num_cycles);
    assert_eq!(mg.num_cycles(), report.num_cycles);
    assert_eq!(history.last().map(|r| r.solution_change), Some(mg.relative_error()));
    let first = history[0].residual;
    let last = history[history.len() - 1].residual;
    assert!(last < 1e-6 * first, "residual {:.3e} -> {:.3e}", first, last);
}
