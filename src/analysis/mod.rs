//! Error norms and convergence measurement.
//!
//! - [`l2_norm`], [`l1_norm`], [`max_norm`]: interior norms of a field, area weighted
//! - [`ErrorNorms`]: error against an analytic solution
//! - [`ConvergenceStudy`]: observed order of accuracy under refinement
//!
//! # Example
//!
//! ```
//! use ccfv::analysis::ConvergenceStudy;
//!
//! let mut study = ConvergenceStudy::new();
//! study.push(16, 1.0e-3);
//! study.push(32, 2.5e-4);
//! assert!((study.final_order().unwrap() - 2.0).abs() < 1e-12);
//! ```

mod convergence;
mod norms;

pub use convergence::{ConvergenceStudy, observed_order};
pub use norms::{ErrorNorms, l1_norm, l2_norm, max_norm};
