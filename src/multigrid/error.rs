//! Multigrid error types.

use thiserror::Error;

use crate::boundary::BoundaryError;
use crate::mesh::GridError;

/// Errors from multigrid setup and solves.
///
/// Failing to reach the tolerance is not an error: it is reported through
/// [`SolveReport`](super::SolveReport).
#[derive(Error, Debug)]
pub enum MultigridError {
    /// Grid cannot be coarsened into a hierarchy.
    #[error("Grid {nx}x{ny} unsuitable for multigrid: {reason}")]
    InvalidGrid {
        nx: usize,
        ny: usize,
        reason: &'static str,
    },

    /// Operation requires earlier initialization.
    #[error("{operation} called before {required}")]
    NotInitialized {
        operation: &'static str,
        required: &'static str,
    },

    /// Right-hand side has no solution with these boundary conditions.
    #[error(
        "Right-hand side mean {mean:.3e} exceeds {tolerance:.3e}; \
         the problem is singular and has no solution"
    )]
    IncompatibleRhs { mean: f64, tolerance: f64 },

    /// Input field does not match the solver grid.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: String, actual: String },

    /// Level index beyond the hierarchy.
    #[error("Level {level} out of range ({nlevels} levels)")]
    LevelOutOfRange { level: usize, nlevels: usize },

    /// Operator coefficients must be positive and finite.
    #[error("Coefficient {value} at ({x:.4}, {y:.4}) is not positive and finite")]
    InvalidCoefficient { x: f64, y: f64, value: f64 },

    /// Setting that would leave the iteration unable to make progress.
    #[error("Invalid multigrid setting {setting}: {reason}")]
    InvalidConfig {
        setting: &'static str,
        reason: &'static str,
    },

    /// Tolerance must be positive and finite.
    #[error("Invalid tolerance {0}")]
    InvalidTolerance(f64),

    #[error(transparent)]
    Boundary(#[from] BoundaryError),

    #[error(transparent)]
    Grid(#[from] GridError),
}
