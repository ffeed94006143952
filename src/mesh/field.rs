//! Cell-centred scalar storage with a ghost halo.

use std::ops::{Index, IndexMut};

use super::{Grid2D, GridError, StencilView};
use crate::types::Buffer;

/// A scalar value per cell of a [`Grid2D`], ghost cells included.
///
/// Values are stored as `data[j * qx + i]` and indexed by storage
/// coordinates `(i, j)`. Interior cells normally hold cell averages; the
/// flux code also stores face quantities here using the left-face
/// convention of [`Grid2D`].
#[derive(Clone, Debug, PartialEq)]
pub struct ScalarField {
    grid: Grid2D,
    data: Vec<f64>,
}

impl ScalarField {
    /// Zero-initialized field.
    pub fn zeros(grid: Grid2D) -> Self {
        Self {
            data: vec![0.0; grid.n_storage()],
            grid,
        }
    }

    /// Evaluate `f(x, y)` at every cell centre, ghosts included.
    pub fn from_fn<F>(grid: Grid2D, f: F) -> Self
    where
        F: Fn(f64, f64) -> f64,
    {
        let mut field = Self::zeros(grid);
        field.fill_with(f);
        field
    }

    /// Overwrite every cell (ghosts included) with `f(x, y)` at its centre.
    pub fn fill_with<F>(&mut self, f: F)
    where
        F: Fn(f64, f64) -> f64,
    {
        let grid = self.grid;
        for j in 0..grid.qy {
            let y = grid.y(j);
            for i in 0..grid.qx {
                self.data[j * grid.qx + i] = f(grid.x(i), y);
            }
        }
    }

    /// Wrap existing storage.
    pub fn from_vec(grid: Grid2D, data: Vec<f64>) -> Result<Self, GridError> {
        if data.len() != grid.n_storage() {
            return Err(GridError::shape_mismatch(
                format!("{} values", grid.n_storage()),
                format!("{} values", data.len()),
            ));
        }
        Ok(Self { grid, data })
    }

    #[inline]
    pub fn grid(&self) -> &Grid2D {
        &self.grid
    }

    #[inline]
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Shifted read-only view over the interior extended by `buf`.
    ///
    /// Fails with [`GridError::InsufficientHalo`] when the shifted region
    /// would leave the ghost halo.
    pub fn view(
        &self,
        shift_x: isize,
        shift_y: isize,
        buf: impl Into<Buffer>,
    ) -> Result<StencilView<'_>, GridError> {
        StencilView::new(self, shift_x, shift_y, buf.into())
    }

    /// Set every value, ghosts included.
    pub fn fill(&mut self, value: f64) {
        self.data.fill(value);
    }

    /// Interior values in storage order.
    pub fn interior_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.grid.interior().iter().map(move |(i, j)| self[(i, j)])
    }

    /// Sum over interior cells.
    pub fn interior_sum(&self) -> f64 {
        self.interior_values().sum()
    }

    /// Mean over interior cells.
    pub fn interior_mean(&self) -> f64 {
        self.interior_sum() / (self.grid.nx * self.grid.ny) as f64
    }

    /// Largest absolute interior value.
    pub fn interior_max_abs(&self) -> f64 {
        self.interior_values().fold(0.0, |m, v| m.max(v.abs()))
    }

    /// `self += a * x` over all storage.
    pub fn axpy(&mut self, a: f64, x: &ScalarField) -> Result<(), GridError> {
        self.check_same_grid(x)?;
        for (s, &xv) in self.data.iter_mut().zip(&x.data) {
            *s += a * xv;
        }
        Ok(())
    }

    /// `self *= a` over all storage.
    pub fn scale(&mut self, a: f64) {
        for s in &mut self.data {
            *s *= a;
        }
    }

    /// Add a constant to interior cells.
    pub fn shift_interior(&mut self, c: f64) {
        for (i, j) in self.grid.interior().iter() {
            let k = self.grid.index(i, j);
            self.data[k] += c;
        }
    }

    /// Copy interior values from a field with the same interior cells.
    ///
    /// Ghost widths may differ; ghosts of `self` are left untouched.
    pub fn copy_interior_from(&mut self, other: &ScalarField) -> Result<(), GridError> {
        if !self.grid.same_interior(&other.grid) {
            return Err(GridError::shape_mismatch(
                self.grid.describe(),
                other.grid.describe(),
            ));
        }
        let (gs, go) = (self.grid, other.grid);
        for jj in 0..gs.ny {
            for ii in 0..gs.nx {
                self.data[gs.index(gs.ilo + ii, gs.jlo + jj)] =
                    other.data[go.index(go.ilo + ii, go.jlo + jj)];
            }
        }
        Ok(())
    }

    /// Average each 2×2 block of interior cells onto a grid half as fine.
    ///
    /// Conserves the interior integral.
    pub fn restrict(&self) -> Result<ScalarField, GridError> {
        let fine = self.grid;
        let coarse = fine.coarse_like(2)?;
        let mut out = ScalarField::zeros(coarse);

        for jc in 0..coarse.ny {
            for ic in 0..coarse.nx {
                let i_f = fine.ilo + 2 * ic;
                let j_f = fine.jlo + 2 * jc;
                out[(coarse.ilo + ic, coarse.jlo + jc)] = 0.25
                    * (self[(i_f, j_f)]
                        + self[(i_f + 1, j_f)]
                        + self[(i_f, j_f + 1)]
                        + self[(i_f + 1, j_f + 1)]);
            }
        }
        Ok(out)
    }

    /// Reconstruct onto a grid twice as fine using centred, unlimited slopes.
    ///
    /// Reads one ghost cell around the interior, which must already be
    /// filled. The four children of a coarse cell average to its value.
    pub fn prolong(&self) -> Result<ScalarField, GridError> {
        let coarse = self.grid;
        let fine = coarse.fine_like(2)?;
        let xp = self.view(1, 0, Buffer::ZERO)?;
        let xm = self.view(-1, 0, Buffer::ZERO)?;
        let yp = self.view(0, 1, Buffer::ZERO)?;
        let ym = self.view(0, -1, Buffer::ZERO)?;
        let mut out = ScalarField::zeros(fine);

        for (ic, jc) in coarse.interior().iter() {
            let c = self[(ic, jc)];
            let slope_x = 0.5 * (xp.at(ic, jc) - xm.at(ic, jc));
            let slope_y = 0.5 * (yp.at(ic, jc) - ym.at(ic, jc));
            let i_f = fine.ilo + 2 * (ic - coarse.ilo);
            let j_f = fine.jlo + 2 * (jc - coarse.jlo);

            out[(i_f, j_f)] = c - 0.25 * slope_x - 0.25 * slope_y;
            out[(i_f + 1, j_f)] = c + 0.25 * slope_x - 0.25 * slope_y;
            out[(i_f, j_f + 1)] = c - 0.25 * slope_x + 0.25 * slope_y;
            out[(i_f + 1, j_f + 1)] = c + 0.25 * slope_x + 0.25 * slope_y;
        }
        Ok(out)
    }

    fn check_same_grid(&self, other: &ScalarField) -> Result<(), GridError> {
        if self.grid != other.grid {
            return Err(GridError::shape_mismatch(
                self.grid.describe(),
                other.grid.describe(),
            ));
        }
        Ok(())
    }
}

impl Index<(usize, usize)> for ScalarField {
    type Output = f64;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        &self.data[self.grid.index(i, j)]
    }
}

impl IndexMut<(usize, usize)> for ScalarField {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut f64 {
        let k = self.grid.index(i, j);
        &mut self.data[k]
    }
}
