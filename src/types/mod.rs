//! Small strongly-typed building blocks shared across the crate.
//!
//! - [`Bounds2D`]: physical extent of the domain
//! - [`Edges`]: one value per domain edge with named fields
//! - [`Buffer`]: how far a stencil region reaches past the interior
//! - [`LevelIndex`]: multigrid level (0 = finest)

mod bounds;
mod buffer;
mod edges;
mod indices;

pub use bounds::Bounds2D;
pub use buffer::Buffer;
pub use edges::Edges;
pub use indices::LevelIndex;
