//! Boundary conditions for cell-centred fields.
//!
//! Each edge of the domain carries one [`BoundaryCondition`]. Ghost cells
//! beyond the edge are populated from interior values so that stencils can
//! be applied uniformly up to the boundary.
//!
//! # Available Boundary Conditions
//!
//! | BC Type | Ghost `k` cells beyond the lower face |
//! |---------|---------------------------------------|
//! | `Periodic` | interior cell `k` from the opposite face |
//! | `Outflow` | the edge cell |
//! | `ReflectEven` | mirror `v[lo + k]` |
//! | `ReflectOdd` | `-v[lo + k]` |
//! | `Dirichlet(a)` | `2a - v[lo + k]` |
//! | `Neumann(g)` | `v[lo + k] - (2k + 1) h g` |
//!
//! Periodic must be set on both edges of an axis. For the multigrid solver,
//! coarse levels solve for a correction and use [`BoundaryConditions::homogeneous`].

mod condition;
mod fill;

pub use condition::{BoundaryCondition, BoundaryConditions, BoundaryError};
