//! Error types for grid construction and stencil access.

use thiserror::Error;

use crate::types::Bounds2D;

/// Errors raised by grid construction and stencil validation.
///
/// `InsufficientHalo` signals a programming error: a stencil asked for data
/// farther outside the interior than the ghost halo provides. It is returned
/// before any value is read.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    /// A grid needs at least one cell and one ghost cell in each direction.
    #[error("Invalid grid dimensions: nx={nx}, ny={ny}, ng={ng}")]
    InvalidDimensions { nx: usize, ny: usize, ng: usize },

    #[error("Invalid domain bounds {0}")]
    InvalidBounds(Bounds2D),

    /// A stencil reaches past the ghost halo.
    #[error(
        "Stencil reaches {required} cells past the {axis} interior but the halo is {available} wide"
    )]
    InsufficientHalo {
        axis: &'static str,
        required: usize,
        available: usize,
    },

    /// The grid cannot be coarsened by the requested factor.
    #[error("Cannot coarsen {n} cells by a factor of {factor}")]
    IncompatibleCoarsening { n: usize, factor: usize },

    /// Two fields that must share a grid do not.
    #[error("Grid shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: String, actual: String },
}

impl GridError {
    /// Create a shape mismatch error.
    pub fn shape_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::ShapeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}
