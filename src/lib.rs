//! # ccfv
//!
//! Cell-centred finite-volume building blocks on uniform 2D grids.
//!
//! This crate provides:
//! - Grids with a ghost halo and validated shifted stencil views
//! - Per-edge boundary conditions and ghost-cell filling
//! - Fourth-order face-averaged fluxes for linear advection
//! - Variable-coefficient geometric multigrid (V-cycles)
//! - Discrete norms and convergence-order helpers
//! - Runtime parameter files, solution files and VTK output
//!
//! ## Example
//!
//! ```
//! use ccfv::{AdvectionVelocity, BoundaryConditions, Grid2D, ScalarField, compute_fluxes};
//!
//! let grid = Grid2D::unit_square(32, 32, 2).unwrap();
//! let mut phi = ScalarField::from_fn(grid, |x, y| (x * y).sin());
//! BoundaryConditions::periodic().fill(&mut phi).unwrap();
//!
//! let fluxes = compute_fluxes(&phi, AdvectionVelocity::new(1.0, 0.5)).unwrap();
//! assert_eq!(fluxes.x.grid().nx, 32);
//! ```

pub mod analysis;
pub mod boundary;
pub mod flux;
pub mod io;
pub mod mesh;
pub mod multigrid;
pub mod types;

// Re-export main types for convenience
pub use boundary::{BoundaryCondition, BoundaryConditions, BoundaryError};
pub use flux::{
    AdvectionVelocity, FaceFluxes, FluxError, compute_fluxes, compute_fluxes_from_parameters,
    flux_divergence,
};
pub use mesh::{Grid2D, GridError, Region, ScalarField, StencilView};
pub use multigrid::{
    CycleRecord, MultigridConfig, MultigridError, Smoother, SolveReport, SolverState,
    StoppingCriterion, VarCoeffMultigrid,
};
pub use types::{Bounds2D, Buffer, Edges, LevelIndex};

// Analysis and I/O
pub use analysis::{ConvergenceStudy, ErrorNorms, l1_norm, l2_norm, max_norm, observed_order};
pub use io::{
    ParameterFileError, RuntimeParameters, SolutionFileError, VtkError, read_solution,
    write_solution, write_vti,
};
