//! Ghost-cell filling.
//!
//! The x edges are filled first, on interior rows only. The y edges are then
//! filled across the full storage width, so corner ghosts are derived from
//! x ghosts that are already valid. Filling twice gives the same result as
//! filling once: every ghost is a function of interior values only.

use super::condition::{BoundaryCondition, BoundaryConditions, BoundaryError, GhostSources, Side};
use crate::mesh::ScalarField;

impl BoundaryConditions {
    /// Fill all `ng` ghost layers of `field` from its interior.
    pub fn fill(&self, field: &mut ScalarField) -> Result<(), BoundaryError> {
        let g = *field.grid();
        if g.ng > g.nx {
            return Err(BoundaryError::HaloWiderThanInterior {
                axis: "x",
                n: g.nx,
                ng: g.ng,
            });
        }
        if g.ng > g.ny {
            return Err(BoundaryError::HaloWiderThanInterior {
                axis: "y",
                n: g.ny,
                ng: g.ng,
            });
        }

        let edges = self.edges();
        let qx = g.qx;
        let data = field.data_mut();

        // x edges, interior rows
        for j in g.jlo..=g.jhi {
            let row = j * qx;
            fill_line(
                data,
                |i| row + i,
                (g.ilo, g.ihi),
                g.ng,
                g.dx,
                edges.x_lo,
                edges.x_hi,
            );
        }

        // y edges, every column including the x ghosts
        for i in 0..qx {
            fill_line(
                data,
                |j| j * qx + i,
                (g.jlo, g.jhi),
                g.ng,
                g.dy,
                edges.y_lo,
                edges.y_hi,
            );
        }

        Ok(())
    }
}

/// Fill both ends of one storage line. `at(n)` maps a position along the
/// line to a linear offset; `(lo, hi)` are the first and last interior positions.
fn fill_line<F>(
    data: &mut [f64],
    at: F,
    (lo, hi): (usize, usize),
    ng: usize,
    spacing: f64,
    lower: BoundaryCondition,
    upper: BoundaryCondition,
) where
    F: Fn(usize) -> usize,
{
    for k in 0..ng {
        let lower_src = GhostSources {
            mirror: data[at(lo + k)],
            edge: data[at(lo)],
            wrap: data[at(hi - k)],
        };
        data[at(lo - 1 - k)] = lower.ghost_value(Side::Lower, k, spacing, lower_src);

        let upper_src = GhostSources {
            mirror: data[at(hi - k)],
            edge: data[at(hi)],
            wrap: data[at(lo + k)],
        };
        data[at(hi + 1 + k)] = upper.ghost_value(Side::Upper, k, spacing, upper_src);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Grid2D;

    fn ramp(nx: usize, ny: usize, ng: usize) -> ScalarField {
        let g = Grid2D::unit_square(nx, ny, ng).unwrap();
        let mut f = g.scratch_array();
        f.fill(f64::NAN);
        for (i, j) in g.interior().iter() {
            f[(i, j)] = (10 * j + i) as f64;
        }
        f
    }

    #[test]
    fn test_periodic_wraps_including_corners() {
        let mut f = ramp(4, 3, 2);
        let g = *f.grid();
        BoundaryConditions::periodic().fill(&mut f).unwrap();

        assert_eq!(f[(g.ilo - 1, g.jlo)], f[(g.ihi, g.jlo)]);
        assert_eq!(f[(g.ilo - 2, g.jlo)], f[(g.ihi - 1, g.jlo)]);
        assert_eq!(f[(g.ihi + 2, g.jhi)], f[(g.ilo + 1, g.jhi)]);
        assert_eq!(f[(g.ilo, g.jhi + 1)], f[(g.ilo, g.jlo)]);
        // Corner: wrapped in both directions
        assert_eq!(f[(0, 0)], f[(g.ihi - 1, g.jhi - 1)]);
        assert!(f.data().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_dirichlet_average_across_face_is_value() {
        let mut f = ramp(4, 4, 2);
        let g = *f.grid();
        let bcs = BoundaryConditions::new(
            BoundaryCondition::Dirichlet(3.0),
            BoundaryCondition::Dirichlet(-1.0),
            BoundaryCondition::ReflectOdd,
            BoundaryCondition::ReflectEven,
        )
        .unwrap();
        bcs.fill(&mut f).unwrap();

        let j = g.jlo + 1;
        assert_eq!(0.5 * (f[(g.ilo - 1, j)] + f[(g.ilo, j)]), 3.0);
        assert_eq!(0.5 * (f[(g.ilo - 2, j)] + f[(g.ilo + 1, j)]), 3.0);
        assert_eq!(0.5 * (f[(g.ihi + 1, j)] + f[(g.ihi, j)]), -1.0);
        assert_eq!(f[(g.ilo, g.jlo - 2)], -f[(g.ilo, g.jlo + 1)]);
        assert_eq!(f[(g.ilo, g.jhi + 1)], f[(g.ilo, g.jhi)]);
    }

    #[test]
    fn test_neumann_matches_linear_profile() {
        // v = 2x has dv/dx = 2 everywhere; ghosts should continue the line
        let g = Grid2D::unit_square(4, 2, 2).unwrap();
        let mut f = ScalarField::from_fn(g, |x, _| 2.0 * x);
        let exact = f.clone();
        for i in 0..g.ng {
            for j in g.jlo..=g.jhi {
                f[(i, j)] = 0.0;
                f[(g.ihi + 1 + i, j)] = 0.0;
            }
        }
        let bcs = BoundaryConditions::new(
            BoundaryCondition::Neumann(2.0),
            BoundaryCondition::Neumann(2.0),
            BoundaryCondition::Outflow,
            BoundaryCondition::Outflow,
        )
        .unwrap();
        bcs.fill(&mut f).unwrap();

        for j in g.jlo..=g.jhi {
            for i in (0..g.ilo).chain(g.ihi + 1..g.qx) {
                assert!((f[(i, j)] - exact[(i, j)]).abs() < 1e-13);
            }
        }
    }

    #[test]
    fn test_outflow_copies_edge() {
        let mut f = ramp(3, 3, 2);
        let g = *f.grid();
        BoundaryConditions::outflow().fill(&mut f).unwrap();
        assert_eq!(f[(0, g.jlo)], f[(g.ilo, g.jlo)]);
        assert_eq!(f[(g.qx - 1, g.qy - 1)], f[(g.ihi, g.jhi)]);
    }

    #[test]
    fn test_fill_is_idempotent() {
        let mut f = ramp(5, 4, 2);
        let bcs = BoundaryConditions::new(
            BoundaryCondition::Neumann(0.5),
            BoundaryCondition::Outflow,
            BoundaryCondition::Periodic,
            BoundaryCondition::Periodic,
        )
        .unwrap();
        bcs.fill(&mut f).unwrap();
        let once = f.clone();
        bcs.fill(&mut f).unwrap();
        assert_eq!(f, once);
    }

    #[test]
    fn test_halo_wider_than_interior_rejected() {
        let mut f = ramp(1, 4, 2);
        let err = BoundaryConditions::periodic().fill(&mut f).unwrap_err();
        assert!(matches!(err, BoundaryError::HaloWiderThanInterior { axis: "x", .. }));
    }
}
