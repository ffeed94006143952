//! Physical extent of a rectangular grid.

use std::fmt;

/// Axis-aligned box `[x_min, x_max] × [y_min, y_max]` covered by the interior
/// cells of a grid.
///
/// Construction does not validate the box; [`Grid2D::new`](crate::Grid2D::new)
/// rejects empty or non-finite extents.
///
/// ```
/// use ccfv::types::Bounds2D;
///
/// let bounds = Bounds2D::new(0.0, 2.0, 0.0, 1.0);
/// assert_eq!(bounds.spacing(8, 4), (0.25, 0.25));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds2D {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Bounds2D {
    pub const fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    pub const fn unit_square() -> Self {
        Self::new(0.0, 1.0, 0.0, 1.0)
    }

    #[inline]
    pub fn lx(&self) -> f64 {
        self.x_max - self.x_min
    }

    #[inline]
    pub fn ly(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Measure of the box, used to turn interior sums into integrals.
    #[inline]
    pub fn area(&self) -> f64 {
        self.lx() * self.ly()
    }

    /// Both extents are finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        let finite = [self.x_min, self.x_max, self.y_min, self.y_max]
            .iter()
            .all(|v| v.is_finite());
        finite && self.lx() > 0.0 && self.ly() > 0.0
    }

    /// Cell sizes `(dx, dy)` for `nx × ny` uniform cells.
    #[inline]
    pub fn spacing(&self, nx: usize, ny: usize) -> (f64, f64) {
        (self.lx() / nx as f64, self.ly() / ny as f64)
    }
}

impl fmt::Display for Bounds2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}] x [{}, {}]",
            self.x_min, self.x_max, self.y_min, self.y_max
        )
    }
}

impl Default for Bounds2D {
    fn default() -> Self {
        Self::unit_square()
    }
}
