//! Level operators: relaxation, residual and inter-level transfer.
//!
//! The discrete operator on cell `k` is
//!
//! ```text
//! (L v)_k = Σ_faces η_face (v_nb - v_k)
//! ```
//!
//! with `η` the [`EdgeCoeffs`](super::EdgeCoeffs). Every pass reads one
//! array and writes a disjoint one, row by row, so with the `parallel`
//! feature rows are processed by rayon.

use super::config::Smoother;
use super::level::MultigridLevel;
use crate::boundary::{BoundaryConditions, BoundaryError};
use crate::mesh::{Grid2D, GridError};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Apply `kernel(j, row)` to every storage row of `data`.
fn for_each_row<F>(data: &mut [f64], qx: usize, kernel: F)
where
    F: Fn(usize, &mut [f64]) + Send + Sync,
{
    #[cfg(feature = "parallel")]
    data.par_chunks_mut(qx)
        .enumerate()
        .for_each(|(j, row)| kernel(j, row));

    #[cfg(not(feature = "parallel"))]
    data.chunks_mut(qx)
        .enumerate()
        .for_each(|(j, row)| kernel(j, row));
}

/// Borrowed inputs of the five-point stencil.
#[derive(Clone, Copy)]
struct Stencil<'a> {
    v: &'a [f64],
    f: &'a [f64],
    ex: &'a [f64],
    ey: &'a [f64],
    qx: usize,
}

impl Stencil<'_> {
    /// `(Σ η v_nb, Σ η)` at linear offset `k`.
    #[inline]
    fn couple(&self, k: usize) -> (f64, f64) {
        let (ex_l, ex_r) = (self.ex[k], self.ex[k + 1]);
        let (ey_b, ey_t) = (self.ey[k], self.ey[k + self.qx]);
        let off = ex_l * self.v[k - 1]
            + ex_r * self.v[k + 1]
            + ey_b * self.v[k - self.qx]
            + ey_t * self.v[k + self.qx];
        (off, ex_l + ex_r + ey_b + ey_t)
    }

    /// Gauss-Seidel target value: the `v_k` that zeroes the local residual.
    #[inline]
    fn relaxed(&self, k: usize) -> f64 {
        let (off, diag) = self.couple(k);
        (off - self.f[k]) / diag
    }

    #[inline]
    fn residual(&self, k: usize) -> f64 {
        let (off, diag) = self.couple(k);
        self.f[k] - (off - diag * self.v[k])
    }
}

#[inline]
fn is_interior_row(g: &Grid2D, j: usize) -> bool {
    j >= g.jlo && j <= g.jhi
}

#[inline]
fn colour_of(g: &Grid2D, i: usize, j: usize) -> usize {
    ((i - g.ilo) + (j - g.jlo)) % 2
}

impl MultigridLevel {
    /// Run `sweeps` relaxation sweeps on this level's `v`.
    ///
    /// Ghosts are filled before every update pass and once more at the end,
    /// so `v` leaves with valid ghosts.
    pub(crate) fn relax(
        &mut self,
        bcs: &BoundaryConditions,
        smoother: Smoother,
        omega: f64,
        sweeps: usize,
    ) -> Result<(), BoundaryError> {
        for _ in 0..sweeps {
            match smoother {
                Smoother::RedBlackGaussSeidel => {
                    for colour in 0..2 {
                        self.fill_ghosts(bcs)?;
                        self.update_colour(colour);
                    }
                }
                Smoother::WeightedJacobi => {
                    self.fill_ghosts(bcs)?;
                    self.jacobi_sweep(omega);
                }
            }
        }
        self.fill_ghosts(bcs)
    }

    /// Gauss-Seidel update of one colour.
    ///
    /// Cells of one colour only read cells of the other, so new values are
    /// computed into scratch and then copied back.
    fn update_colour(&mut self, colour: usize) {
        let g = *self.grid();
        let st = Stencil {
            v: self.v.data(),
            f: self.f.data(),
            ex: self.edges.x.data(),
            ey: self.edges.y.data(),
            qx: g.qx,
        };

        for_each_row(self.scratch.data_mut(), g.qx, |j, row| {
            if !is_interior_row(&g, j) {
                return;
            }
            for i in g.ilo..=g.ihi {
                if colour_of(&g, i, j) == colour {
                    row[i] = st.relaxed(j * g.qx + i);
                }
            }
        });

        let updated = self.scratch.data();
        for_each_row(self.v.data_mut(), g.qx, |j, row| {
            if !is_interior_row(&g, j) {
                return;
            }
            for i in g.ilo..=g.ihi {
                if colour_of(&g, i, j) == colour {
                    row[i] = updated[j * g.qx + i];
                }
            }
        });
    }

    /// One weighted Jacobi sweep.
    fn jacobi_sweep(&mut self, omega: f64) {
        let g = *self.grid();
        let st = Stencil {
            v: self.v.data(),
            f: self.f.data(),
            ex: self.edges.x.data(),
            ey: self.edges.y.data(),
            qx: g.qx,
        };

        for_each_row(self.scratch.data_mut(), g.qx, |j, row| {
            if !is_interior_row(&g, j) {
                return;
            }
            for i in g.ilo..=g.ihi {
                let k = j * g.qx + i;
                row[i] = (1.0 - omega) * st.v[k] + omega * st.relaxed(k);
            }
        });

        let updated = self.scratch.data();
        for_each_row(self.v.data_mut(), g.qx, |j, row| {
            if !is_interior_row(&g, j) {
                return;
            }
            let base = j * g.qx;
            row[g.ilo..=g.ihi].copy_from_slice(&updated[base + g.ilo..=base + g.ihi]);
        });
    }

    /// `r = f - L v` on the interior. Ghosts of `v` must be filled.
    pub(crate) fn compute_residual(&mut self) {
        let g = *self.grid();
        let st = Stencil {
            v: self.v.data(),
            f: self.f.data(),
            ex: self.edges.x.data(),
            ey: self.edges.y.data(),
            qx: g.qx,
        };

        for_each_row(self.r.data_mut(), g.qx, |j, row| {
            if !is_interior_row(&g, j) {
                return;
            }
            for i in g.ilo..=g.ihi {
                row[i] = st.residual(j * g.qx + i);
            }
        });
    }

    /// Restrict `fine`'s residual into this level's right-hand side and
    /// reset the correction to zero.
    pub(crate) fn take_restricted_residual(
        &mut self,
        fine: &MultigridLevel,
    ) -> Result<(), GridError> {
        let restricted = fine.r.restrict()?;
        self.f.copy_interior_from(&restricted)?;
        self.v.fill(0.0);
        Ok(())
    }

    /// Prolong `coarse`'s correction and add it to this level's `v`.
    ///
    /// Ghosts of the coarse correction must be filled.
    pub(crate) fn add_prolonged_correction(
        &mut self,
        coarse: &MultigridLevel,
    ) -> Result<(), GridError> {
        let correction = coarse.v.prolong()?;
        let g = *self.grid();
        for (i, j) in g.interior().iter() {
            self.v[(i, j)] += correction[(i, j)];
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::BoundaryCondition;
    use crate::mesh::ScalarField;

    fn unit_level(n: usize, bcs: &BoundaryConditions) -> MultigridLevel {
        let g = Grid2D::unit_square(n, n, 1).unwrap();
        let c = ScalarField::from_fn(g, |_, _| 1.0);
        MultigridLevel::hierarchy(c, &bcs.for_coefficients(), 1)
            .unwrap()
            .remove(0)
    }

    #[test]
    fn test_residual_of_discrete_quadratic() {
        // v = x² has a five-point Laplacian of exactly 2 away from boundaries
        let bcs = BoundaryConditions::outflow();
        let mut level = unit_level(8, &bcs);
        let g = *level.grid();
        level.v = ScalarField::from_fn(g, |x, _| x * x);
        level.f.fill(2.0);
        level.compute_residual();
        for i in g.ilo + 1..g.ihi {
            for j in g.jlo + 1..g.jhi {
                assert!(level.r[(i, j)].abs() < 1e-10);
            }
        }
    }

    #[test]
    fn test_smoothers_damp_checkerboard() {
        let bcs = BoundaryConditions::dirichlet_zero();
        for smoother in [Smoother::RedBlackGaussSeidel, Smoother::WeightedJacobi] {
            let mut level = unit_level(16, &bcs);
            let g = *level.grid();
            for (i, j) in g.interior().iter() {
                level.v[(i, j)] = if (i + j) % 2 == 0 { 1.0 } else { -1.0 };
            }
            level.fill_ghosts(&bcs).unwrap();
            level.compute_residual();
            let before = level.r.interior_max_abs();

            level.relax(&bcs, smoother, 2.0 / 3.0, 5).unwrap();
            level.compute_residual();
            assert!(level.r.interior_max_abs() < before, "{:?} did not smooth", smoother);
        }
    }

    #[test]
    fn test_colour_update_zeroes_local_residual() {
        let bcs = BoundaryConditions::new(
            BoundaryCondition::Dirichlet(1.0),
            BoundaryCondition::Neumann(0.0),
            BoundaryCondition::Periodic,
            BoundaryCondition::Periodic,
        )
        .unwrap();
        let mut level = unit_level(8, &bcs);
        let g = *level.grid();
        level.f = ScalarField::from_fn(g, |x, y| x - y);
        level.relax(&bcs, Smoother::RedBlackGaussSeidel, 1.0, 1).unwrap();

        // Black cells were updated last; away from the x edges, whose ghosts
        // mirror the updated cell itself, their residuals vanish
        level.compute_residual();
        for (i, j) in g.interior().iter() {
            if i > g.ilo && i < g.ihi && colour_of(&g, i, j) == 1 {
                assert!(level.r[(i, j)].abs() < 1e-10);
            }
        }
    }

    #[test]
    fn test_transfer_round_trip_of_constant_correction() {
        let bcs = BoundaryConditions::periodic();
        let g = Grid2D::unit_square(8, 8, 1).unwrap();
        let c = ScalarField::from_fn(g, |_, _| 1.0);
        let mut levels = MultigridLevel::hierarchy(c, &bcs, 2).unwrap();
        let (fine, coarse) = levels.split_at_mut(1);
        let (fine, coarse) = (&mut fine[0], &mut coarse[0]);

        fine.r.fill(4.0);
        coarse.take_restricted_residual(fine).unwrap();
        assert!((coarse.f.interior_mean() - 4.0).abs() < 1e-14);

        coarse.v.fill(0.5);
        fine.add_prolonged_correction(coarse).unwrap();
        assert!((fine.v.interior_mean() - 0.5).abs() < 1e-14);
    }

    /// One red-black sweep written as a plain sequential loop.
    #[cfg(feature = "parallel")]
    fn sequential_red_black_sweep(level: &mut MultigridLevel, bcs: &BoundaryConditions) {
        let g = *level.grid();
        for colour in 0..2 {
            bcs.fill(&mut level.v).unwrap();
            let old = level.v.clone();
            for (i, j) in g.interior().iter() {
                if colour_of(&g, i, j) != colour {
                    continue;
                }
                let (ex_l, ex_r) = (level.edges.x[(i, j)], level.edges.x[(i + 1, j)]);
                let (ey_b, ey_t) = (level.edges.y[(i, j)], level.edges.y[(i, j + 1)]);
                let off = ex_l * old[(i - 1, j)]
                    + ex_r * old[(i + 1, j)]
                    + ey_b * old[(i, j - 1)]
                    + ey_t * old[(i, j + 1)];
                let diag = ex_l + ex_r + ey_b + ey_t;
                level.v[(i, j)] = (off - level.f[(i, j)]) / diag;
            }
        }
        bcs.fill(&mut level.v).unwrap();
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_sweep_is_bit_identical_to_sequential() {
        let bcs = BoundaryConditions::new(
            BoundaryCondition::Dirichlet(0.5),
            BoundaryCondition::Neumann(1.0),
            BoundaryCondition::Periodic,
            BoundaryCondition::Periodic,
        )
        .unwrap();
        let g = Grid2D::unit_square(32, 16, 1).unwrap();
        let c = ScalarField::from_fn(g, |x, y| 1.0 + x * x + 0.5 * (6.0 * y).sin());
        let mut level = MultigridLevel::hierarchy(c, &bcs.for_coefficients(), 1)
            .unwrap()
            .remove(0);
        level.v = ScalarField::from_fn(g, |x, y| (3.0 * x).cos() * y);
        level.f = ScalarField::from_fn(g, |x, y| x - y * y);

        let mut reference = level.clone();
        sequential_red_black_sweep(&mut reference, &bcs);
        level.relax(&bcs, Smoother::RedBlackGaussSeidel, 1.0, 1).unwrap();

        assert_eq!(level.v.data(), reference.v.data());
    }
}
