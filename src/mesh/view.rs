//! Offset-indexed read access into a field.
//!
//! A [`StencilView`] reads "this cell shifted by (sx, sy)" for every cell of
//! a region. The shift and the region are validated against the ghost width
//! when the view is built, so `at` never leaves the storage array.

use super::{Grid2D, GridError, Region, ScalarField};
use crate::types::Buffer;

/// Read-only shifted view of a [`ScalarField`] over a buffered region.
///
/// # Example
///
/// ```
/// use ccfv::mesh::{Grid2D, ScalarField};
///
/// let grid = Grid2D::unit_square(4, 4, 2).unwrap();
/// let field = ScalarField::from_fn(grid, |x, _y| x);
///
/// let left = field.view(-1, 0, 1).unwrap();
/// let (i, j) = (grid.ilo, grid.jlo);
/// assert!((left.at(i, j) - field[(i - 1, j)]).abs() < 1e-14);
///
/// // Two cells of buffer plus a shift of one does not fit in a halo of two.
/// assert!(field.view(1, 0, 2).is_err());
/// ```
#[derive(Clone, Copy, Debug)]
pub struct StencilView<'a> {
    data: &'a [f64],
    qx: usize,
    shift_x: isize,
    shift_y: isize,
    region: Region,
}

impl<'a> StencilView<'a> {
    pub(crate) fn new(
        field: &'a ScalarField,
        shift_x: isize,
        shift_y: isize,
        buf: Buffer,
    ) -> Result<Self, GridError> {
        let grid = field.grid();
        let region = grid.region(buf)?;
        check_shift(grid, "x", buf.x_lo(), buf.x_hi(), shift_x)?;
        check_shift(grid, "y", buf.y_lo(), buf.y_hi(), shift_y)?;

        Ok(Self {
            data: field.data(),
            qx: grid.qx,
            shift_x,
            shift_y,
            region,
        })
    }

    /// Region this view is valid over (unshifted coordinates).
    #[inline]
    pub fn region(&self) -> Region {
        self.region
    }

    /// Value at `(i + shift_x, j + shift_y)`.
    ///
    /// `(i, j)` must lie in [`region`](Self::region).
    #[inline]
    pub fn at(&self, i: usize, j: usize) -> f64 {
        debug_assert!(self.region.contains(i, j), "({}, {}) outside view region", i, j);
        let ii = (i as isize + self.shift_x) as usize;
        let jj = (j as isize + self.shift_y) as usize;
        self.data[jj * self.qx + ii]
    }
}

fn check_shift(
    grid: &Grid2D,
    axis: &'static str,
    buf_lo: usize,
    buf_hi: usize,
    shift: isize,
) -> Result<(), GridError> {
    let reach_lo = buf_lo + shift.min(0).unsigned_abs();
    let reach_hi = buf_hi + shift.max(0).unsigned_abs();
    let required = reach_lo.max(reach_hi);
    if required > grid.ng {
        return Err(GridError::InsufficientHalo {
            axis,
            required,
            available: grid.ng,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_field() -> ScalarField {
        let grid = Grid2D::unit_square(4, 3, 2).unwrap();
        let mut f = grid.scratch_array();
        for j in 0..grid.qy {
            for i in 0..grid.qx {
                f[(i, j)] = (100 * j + i) as f64;
            }
        }
        f
    }

    #[test]
    fn test_shift_reads_neighbour() {
        let f = index_field();
        let g = *f.grid();
        let v = f.view(-2, 1, Buffer::ZERO).unwrap();
        assert_eq!(v.at(g.ilo, g.jlo), (100 * (g.jlo + 1) + g.ilo - 2) as f64);
    }

    #[test]
    fn test_asymmetric_buffer_allows_one_sided_reach() {
        let f = index_field();
        // Region reaches one past the upper x edge; shifting down by two
        // only touches the lower ghosts.
        assert!(f.view(-2, 0, Buffer::new(0, 1, 1, 1)).is_ok());
        // Shifting up by one on top of the upper buffer needs two ghosts.
        assert!(f.view(1, 0, Buffer::new(0, 1, 1, 1)).is_ok());
        // Three cells below the interior is too far.
        let err = f.view(-2, 0, Buffer::new(1, 1, 0, 0)).unwrap_err();
        assert!(matches!(err, GridError::InsufficientHalo { axis: "x", required: 3, .. }));
    }

    #[test]
    fn test_y_axis_reported() {
        let f = index_field();
        let err = f.view(0, 3, Buffer::ZERO).unwrap_err();
        assert!(matches!(err, GridError::InsufficientHalo { axis: "y", .. }));
    }
}
