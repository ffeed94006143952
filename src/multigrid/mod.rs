//! Geometric multigrid for variable-coefficient elliptic problems.
//!
//! Solves
//!
//! ```text
//! ∇·(η(x, y) ∇v) = f
//! ```
//!
//! on a cell-centred grid with per-edge boundary conditions, using
//! V-cycles over a hierarchy of grids halved in each direction.
//!
//! ## Discretisation
//!
//! | Piece          | Choice                                                        |
//! |----------------|---------------------------------------------------------------|
//! | Operator       | five-point, `η` on faces = mean of the two adjacent cells      |
//! | Coarse `η`     | each coarse face averages the two fine faces it covers         |
//! | Smoother       | red-black Gauss-Seidel (default) or weighted Jacobi            |
//! | Restriction    | 2×2 average of the residual (conserves its integral)           |
//! | Prolongation   | centred, unlimited slopes                                      |
//! | Coarsest level | `bottom_smooth` sweeps on the 2-cell level                     |
//!
//! Coarse levels solve for a correction, so they use the homogeneous
//! version of the boundary conditions.
//!
//! ## Usage
//!
//! 1. [`VarCoeffMultigrid::new`] with the grid, conditions and `η`
//! 2. [`init_zeros`](VarCoeffMultigrid::init_zeros) or
//!    [`init_solution`](VarCoeffMultigrid::init_solution)
//! 3. [`init_rhs`](VarCoeffMultigrid::init_rhs) (checks solvability when
//!    the operator is singular)
//! 4. [`solve`](VarCoeffMultigrid::solve), then read
//!    [`solution`](VarCoeffMultigrid::solution)

mod config;
mod diagnostics;
mod error;
mod level;
mod operators;
mod solver;

pub use config::{MultigridConfig, Smoother, StoppingCriterion};
pub use diagnostics::{CycleRecord, SolveReport, SolverState};
pub use error::MultigridError;
pub use level::{EdgeCoeffs, MultigridLevel};
pub use solver::VarCoeffMultigrid;
