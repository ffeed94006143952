//! Convergence study for the multigrid solver with zero Dirichlet edges.
//!
//! Manufactured solution `v = (x² - x⁴)(y⁴ - y²)` on the unit square,
//! optionally with the variable coefficient `η = 1 + x + y`. Settings can
//! be read from a parameter file with a `[multigrid]` section.
//!
//! Run with: `cargo run --example mg_dirichlet [params.ini]`

use ccfv::{
    BoundaryConditions, ConvergenceStudy, Grid2D, MultigridConfig, RuntimeParameters, ScalarField,
    VarCoeffMultigrid,
};
use std::error::Error;

fn exact(x: f64, y: f64) -> f64 {
    (x * x - x.powi(4)) * (y.powi(4) - y * y)
}

fn laplacian(x: f64, y: f64) -> f64 {
    -2.0 * ((1.0 - 6.0 * x * x) * y * y * (1.0 - y * y)
        + (1.0 - 6.0 * y * y) * x * x * (1.0 - x * x))
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let params = match std::env::args().nth(1) {
        Some(path) => RuntimeParameters::from_file(path)?,
        None => RuntimeParameters::new(),
    };
    let config = MultigridConfig::from_parameters(&params)?;
    let variable = params.contains("problem.variable") && params.get_bool("problem.variable")?;
    let rtol = params.get_or("problem.rtol", 1e-11)?;

    let eta = |x: f64, y: f64| if variable { 1.0 + x + y } else { 1.0 };
    let rhs = |x: f64, y: f64| {
        if variable {
            let vx = (2.0 * x - 4.0 * x.powi(3)) * (y.powi(4) - y * y);
            let vy = (x * x - x.powi(4)) * (4.0 * y.powi(3) - 2.0 * y);
            eta(x, y) * laplacian(x, y) + vx + vy
        } else {
            laplacian(x, y)
        }
    };

    println!(
        "{} coefficient, smoother {}, rtol {:e}",
        if variable { "variable" } else { "constant" },
        config.smoother,
        rtol
    );

    let mut study = ConvergenceStudy::new();
    for n in [16, 32, 64, 128] {
        let grid = Grid2D::unit_square(n, n, 1)?;
        let coeffs = ScalarField::from_fn(grid, eta);
        let mut mg =
            VarCoeffMultigrid::new(grid, BoundaryConditions::dirichlet_zero(), &coeffs, config)?;
        mg.init_zeros();
        mg.init_rhs_with(rhs)?;
        let report = mg.solve(rtol)?;
        let error = mg.true_error(exact);

        println!("  n={:4}: {} ; L2 error {:.4e}", n, report, error.l2);
        study.push(n, error.l2);
    }

    println!("{}", study);
    Ok(())
}
