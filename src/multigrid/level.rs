//! One level of the multigrid hierarchy.

use super::MultigridError;
use crate::boundary::{BoundaryConditions, BoundaryError};
use crate::mesh::{Grid2D, GridError, ScalarField};
use crate::types::Buffer;

/// Face coefficients of the discrete operator, pre-divided by the squared
/// spacing normal to the face.
///
/// `x[(i, j)]` sits on the left face of cell `(i, j)` and `y[(i, j)]` on its
/// lower face, so cell `(i, j)` couples to its neighbours through
/// `x[(i, j)]`, `x[(i + 1, j)]`, `y[(i, j)]` and `y[(i, j + 1)]`.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeCoeffs {
    pub x: ScalarField,
    pub y: ScalarField,
}

impl EdgeCoeffs {
    /// Arithmetic mean of the two cells sharing each face.
    ///
    /// Ghosts of `coeffs` must be filled.
    pub fn from_cell_coeffs(coeffs: &ScalarField) -> Result<Self, GridError> {
        let g = *coeffs.grid();
        let x_faces = Buffer::new(0, 1, 0, 0);
        let y_faces = Buffer::new(0, 0, 0, 1);

        let left = coeffs.view(-1, 0, x_faces)?;
        let below = coeffs.view(0, -1, y_faces)?;

        let mut x = g.scratch_array();
        let inv_dx2 = 1.0 / (g.dx * g.dx);
        for (i, j) in left.region().iter() {
            x[(i, j)] = 0.5 * (left.at(i, j) + coeffs[(i, j)]) * inv_dx2;
        }

        let mut y = g.scratch_array();
        let inv_dy2 = 1.0 / (g.dy * g.dy);
        for (i, j) in below.region().iter() {
            y[(i, j)] = 0.5 * (below.at(i, j) + coeffs[(i, j)]) * inv_dy2;
        }

        Ok(Self { x, y })
    }

    /// Coarsen by two: each coarse face averages the two fine faces it
    /// covers, rescaled for the doubled spacing.
    pub fn restrict(&self) -> Result<Self, GridError> {
        let fine = *self.x.grid();
        let coarse = fine.coarse_like(2)?;
        let sx = (fine.dx / coarse.dx).powi(2);
        let sy = (fine.dy / coarse.dy).powi(2);

        let mut x = coarse.scratch_array();
        for (ic, jc) in coarse.region(Buffer::new(0, 1, 0, 0))?.iter() {
            let i_f = fine.ilo + 2 * (ic - coarse.ilo);
            let j_f = fine.jlo + 2 * (jc - coarse.jlo);
            x[(ic, jc)] = 0.5 * sx * (self.x[(i_f, j_f)] + self.x[(i_f, j_f + 1)]);
        }

        let mut y = coarse.scratch_array();
        for (ic, jc) in coarse.region(Buffer::new(0, 0, 0, 1))?.iter() {
            let i_f = fine.ilo + 2 * (ic - coarse.ilo);
            let j_f = fine.jlo + 2 * (jc - coarse.jlo);
            y[(ic, jc)] = 0.5 * sy * (self.y[(i_f, j_f)] + self.y[(i_f + 1, j_f)]);
        }

        Ok(Self { x, y })
    }
}

/// Fields owned by one level.
///
/// On the finest level `v` is the solution and `f` the right-hand side. On
/// coarser levels `v` is the correction and `f` the restricted residual.
#[derive(Clone, Debug)]
pub struct MultigridLevel {
    grid: Grid2D,
    pub(crate) v: ScalarField,
    pub(crate) f: ScalarField,
    pub(crate) r: ScalarField,
    pub(crate) scratch: ScalarField,
    coeffs: ScalarField,
    pub(crate) edges: EdgeCoeffs,
}

impl MultigridLevel {
    /// Level with zero fields and the given coefficients.
    pub(crate) fn new(coeffs: ScalarField, edges: EdgeCoeffs) -> Self {
        let grid = *coeffs.grid();
        Self {
            grid,
            v: grid.scratch_array(),
            f: grid.scratch_array(),
            r: grid.scratch_array(),
            scratch: grid.scratch_array(),
            coeffs,
            edges,
        }
    }

    /// Build the finest level from cell coefficients and every coarser level
    /// below it, `nlevels` in total.
    pub(crate) fn hierarchy(
        coeffs: ScalarField,
        coeff_bcs: &BoundaryConditions,
        nlevels: usize,
    ) -> Result<Vec<Self>, MultigridError> {
        let mut coeffs = coeffs;
        coeff_bcs.fill(&mut coeffs)?;
        let mut edges = EdgeCoeffs::from_cell_coeffs(&coeffs)?;

        let mut levels = Vec::with_capacity(nlevels);
        for _ in 1..nlevels {
            let mut coarse_coeffs = coeffs.restrict()?;
            coeff_bcs.fill(&mut coarse_coeffs)?;
            let coarse_edges = edges.restrict()?;
            levels.push(Self::new(coeffs, edges));
            coeffs = coarse_coeffs;
            edges = coarse_edges;
        }
        levels.push(Self::new(coeffs, edges));
        Ok(levels)
    }

    #[inline]
    pub fn grid(&self) -> &Grid2D {
        &self.grid
    }

    /// Solution (finest level) or correction (coarser levels).
    #[inline]
    pub fn solution(&self) -> &ScalarField {
        &self.v
    }

    /// Right-hand side (finest level) or restricted residual.
    #[inline]
    pub fn rhs(&self) -> &ScalarField {
        &self.f
    }

    /// Residual from the most recent evaluation.
    #[inline]
    pub fn residual(&self) -> &ScalarField {
        &self.r
    }

    /// Cell coefficients, restricted from the finest level.
    #[inline]
    pub fn coeffs(&self) -> &ScalarField {
        &self.coeffs
    }

    #[inline]
    pub fn edge_coeffs(&self) -> &EdgeCoeffs {
        &self.edges
    }

    /// Fill ghost cells of the solution.
    pub(crate) fn fill_ghosts(&mut self, bcs: &BoundaryConditions) -> Result<(), BoundaryError> {
        bcs.fill(&mut self.v)
    }
}
