//! I/O utilities for reading and writing data files.
//!
//! This module provides:
//! - **Runtime parameters**: ini-style `section.key` values read by drivers
//! - **Solution files**: text snapshots of a field with grid metadata, for regression comparison
//! - **VTK output**: cell data on uniform grids for ParaView (VTI format)
//!
//! # File Formats
//!
//! ## Runtime Parameter Files
//!
//! ```text
//! [advection]
//! u = 1.0
//! v = 0.5
//! ```
//!
//! ## Solution Files
//!
//! ```text
//! # name: phi
//! # nx: 64
//! # ny: 64
//! # ng: 1
//! # xmin: 0e0
//! # xmax: 1e0
//! # ymin: 0e0
//! # ymax: 1e0
//! # columns: x y value
//! 7.8125e-3 7.8125e-3 -1.2e-7
//! ```

mod parameters;
mod solution;
mod vtk;

pub use parameters::{ParameterFileError, RuntimeParameters};
pub use solution::{
    SolutionDifference, SolutionFileError, StoredSolution, compare_solutions, read_solution,
    write_solution,
};
pub use vtk::{VtkError, write_vti, write_vti_series};
