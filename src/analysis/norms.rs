//! Discrete norms over the interior of a field.

use crate::mesh::ScalarField;

/// Cell-area weighted L2 norm: `sqrt(dx dy Σ v²)`.
///
/// Approximates the continuous L2 norm, so values are comparable across
/// resolutions.
pub fn l2_norm(field: &ScalarField) -> f64 {
    let g = field.grid();
    let sum_sq: f64 = field.interior_values().map(|v| v * v).sum();
    (g.cell_area() * sum_sq).sqrt()
}

/// Largest absolute interior value.
pub fn max_norm(field: &ScalarField) -> f64 {
    field.interior_max_abs()
}

/// Cell-area weighted L1 norm: `dx dy Σ |v|`.
pub fn l1_norm(field: &ScalarField) -> f64 {
    let g = field.grid();
    g.cell_area() * field.interior_values().map(f64::abs).sum::<f64>()
}

/// Error of `field` against an analytic function sampled at cell centres.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ErrorNorms {
    /// Cell-area weighted L2 norm
    pub l2: f64,
    /// Maximum absolute error
    pub max: f64,
    /// Mean error (model minus exact)
    pub bias: f64,
}

impl ErrorNorms {
    /// Compare interior values of `field` with `exact(x, y)`.
    pub fn against<F>(field: &ScalarField, exact: F) -> Self
    where
        F: Fn(f64, f64) -> f64,
    {
        let g = field.grid();
        let mut sum_sq = 0.0;
        let mut sum = 0.0;
        let mut max: f64 = 0.0;

        for (i, j) in g.interior().iter() {
            let e = field[(i, j)] - exact(g.x(i), g.y(j));
            sum_sq += e * e;
            sum += e;
            max = max.max(e.abs());
        }

        let n = (g.nx * g.ny) as f64;
        Self {
            l2: (g.cell_area() * sum_sq).sqrt(),
            max,
            bias: sum / n,
        }
    }
}
