//! Variable-coefficient multigrid on a doubly periodic domain.
//!
//! Solves `∇·(η ∇v) = -2π² sin(πx) sin(πy)` with `η = 1` on `[0, 2]²`,
//! where the right-hand side integrates to zero, and compares with
//! `sin(πx) sin(πy)` up to the additive constant periodic problems leave
//! free.
//!
//! Run with: `RUST_LOG=info cargo run --example mg_vc_periodic [nx]`

use ccfv::io::{write_solution, write_vti};
use ccfv::{
    Bounds2D, BoundaryConditions, Grid2D, MultigridConfig, ScalarField, VarCoeffMultigrid, l2_norm,
};
use std::error::Error;
use std::f64::consts::PI;

fn exact(x: f64, y: f64) -> f64 {
    (PI * x).sin() * (PI * y).sin()
}

fn rhs(x: f64, y: f64) -> f64 {
    -2.0 * PI * PI * exact(x, y)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let n: usize = match std::env::args().nth(1) {
        Some(arg) => arg.parse()?,
        None => 8,
    };

    let grid = Grid2D::new(n, n, 1, Bounds2D::new(0.0, 2.0, 0.0, 2.0))?;
    let coeffs = ScalarField::from_fn(grid, |_, _| 1.0);

    // A periodic problem only has a solution if the source integrates to zero
    let f = ScalarField::from_fn(grid, rhs);
    println!("sum of right-hand side over interior = {:e}", f.interior_sum());

    let config = MultigridConfig::default().with_verbose(true);
    let mut mg = VarCoeffMultigrid::new(grid, BoundaryConditions::periodic(), &coeffs, config)?;
    mg.init_zeros();
    mg.init_rhs(&f)?;
    let report = mg.solve(1e-11)?;

    let v = mg.solution();
    let mut error = v.clone();
    let mean = v.interior_mean();
    let exact_field = ScalarField::from_fn(*v.grid(), exact);
    error.shift_interior(-mean);
    error.axpy(-1.0, &exact_field)?;

    println!(" L2 error from true solution = {:e}", l2_norm(&error));
    println!(" rel. err from previous cycle = {:e}", report.relative_error);
    println!(" num. cycles = {}", report.num_cycles);

    write_solution("mg_test.txt", "v", v)?;
    write_vti("mg_test.vti", &[("v", v), ("error", &error)], None)?;
    println!("wrote mg_test.txt and mg_test.vti");

    Ok(())
}
