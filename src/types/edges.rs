//! Per-edge values with named fields.
//!
//! A rectangular domain has four edges. Storing one value per edge with
//! explicit names avoids remembering an array index convention.

use std::fmt;

/// One value for each edge of a rectangular domain.
///
/// # Example
///
/// ```
/// use ccfv::types::Edges;
///
/// let widths = Edges::new(0, 1, 1, 1);
/// assert_eq!(widths.x_hi, 1);
/// assert_eq!(widths.map(|w| w * 2).y_lo, 2);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edges<T> {
    /// Lower x edge (x = x_min)
    pub x_lo: T,
    /// Upper x edge (x = x_max)
    pub x_hi: T,
    /// Lower y edge (y = y_min)
    pub y_lo: T,
    /// Upper y edge (y = y_max)
    pub y_hi: T,
}

impl<T> Edges<T> {
    /// Order: x_lo, x_hi, y_lo, y_hi.
    pub fn new(x_lo: T, x_hi: T, y_lo: T, y_hi: T) -> Self {
        Self {
            x_lo,
            x_hi,
            y_lo,
            y_hi,
        }
    }

    /// Same value on all edges.
    pub fn uniform(value: T) -> Self
    where
        T: Clone,
    {
        Self {
            x_lo: value.clone(),
            x_hi: value.clone(),
            y_lo: value.clone(),
            y_hi: value,
        }
    }

    /// Map a function over all edges.
    pub fn map<U, F>(self, mut f: F) -> Edges<U>
    where
        F: FnMut(T) -> U,
    {
        Edges {
            x_lo: f(self.x_lo),
            x_hi: f(self.x_hi),
            y_lo: f(self.y_lo),
            y_hi: f(self.y_hi),
        }
    }

    /// Iterate in order: x_lo, x_hi, y_lo, y_hi.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        [&self.x_lo, &self.x_hi, &self.y_lo, &self.y_hi].into_iter()
    }

    /// Convert to array [x_lo, x_hi, y_lo, y_hi].
    pub fn to_array(self) -> [T; 4] {
        [self.x_lo, self.x_hi, self.y_lo, self.y_hi]
    }
}

impl<T: Default> Default for Edges<T> {
    fn default() -> Self {
        Self {
            x_lo: T::default(),
            x_hi: T::default(),
            y_lo: T::default(),
            y_hi: T::default(),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Edges<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "xlo:{} xhi:{} ylo:{} yhi:{}",
            self.x_lo, self.x_hi, self.y_lo, self.y_hi
        )
    }
}

impl<T> From<[T; 4]> for Edges<T> {
    fn from([x_lo, x_hi, y_lo, y_hi]: [T; 4]) -> Self {
        Self::new(x_lo, x_hi, y_lo, y_hi)
    }
}
