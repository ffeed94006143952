//! Structured grid geometry and cell-centred field storage.
//!
//! - [`Grid2D`]: immutable description of a uniform grid with a ghost halo
//! - [`ScalarField`]: one value per cell, ghosts included
//! - [`StencilView`]: validated shifted access used by every stencil
//! - [`Region`]: inclusive rectangles of storage indices

mod error;
mod field;
mod grid2d;
mod view;

pub use error::GridError;
pub use field::ScalarField;
pub use grid2d::{Grid2D, Region};
pub use view::StencilView;
