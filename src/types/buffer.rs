//! Stencil buffer widths.

use super::Edges;

/// Number of cells a stencil region extends past the interior on each edge.
///
/// A zero buffer selects exactly the interior cells. Fluxes stored on the
/// left face of each cell need one extra cell on the upper edge of the
/// differencing direction, which is `Buffer::new(0, 1, 0, 0)` for x-fluxes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Buffer(pub Edges<usize>);

impl Buffer {
    /// Interior only.
    pub const ZERO: Self = Self::uniform(0);

    /// Buffer widths in order x_lo, x_hi, y_lo, y_hi.
    pub const fn new(x_lo: usize, x_hi: usize, y_lo: usize, y_hi: usize) -> Self {
        Self(Edges {
            x_lo,
            x_hi,
            y_lo,
            y_hi,
        })
    }

    /// Same width on every edge.
    pub const fn uniform(width: usize) -> Self {
        Self::new(width, width, width, width)
    }

    #[inline]
    pub fn x_lo(&self) -> usize {
        self.0.x_lo
    }

    #[inline]
    pub fn x_hi(&self) -> usize {
        self.0.x_hi
    }

    #[inline]
    pub fn y_lo(&self) -> usize {
        self.0.y_lo
    }

    #[inline]
    pub fn y_hi(&self) -> usize {
        self.0.y_hi
    }
}

impl From<usize> for Buffer {
    fn from(width: usize) -> Self {
        Self::uniform(width)
    }
}

impl From<(usize, usize, usize, usize)> for Buffer {
    fn from((x_lo, x_hi, y_lo, y_hi): (usize, usize, usize, usize)) -> Self {
        Self::new(x_lo, x_hi, y_lo, y_hi)
    }
}
