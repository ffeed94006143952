//! Strongly-typed multigrid level index.

use std::fmt;

/// Index into a multigrid level hierarchy.
///
/// Level 0 is the finest grid; each increment halves the resolution.
///
/// # Example
///
/// ```
/// use ccfv::types::LevelIndex;
///
/// let fine = LevelIndex::FINEST;
/// assert_eq!(fine.coarser().get(), 1);
/// assert_eq!(fine.coarser().finer(), Some(fine));
/// assert_eq!(fine.finer(), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct LevelIndex(usize);

impl LevelIndex {
    /// The finest level.
    pub const FINEST: Self = Self(0);

    #[inline]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the raw index value.
    #[inline]
    pub const fn get(self) -> usize {
        self.0
    }

    /// Next coarser level.
    #[inline]
    pub fn coarser(self) -> Self {
        Self(self.0 + 1)
    }

    /// Next finer level, or `None` on the finest.
    #[inline]
    pub fn finer(self) -> Option<Self> {
        self.0.checked_sub(1).map(Self)
    }

    /// Iterate [0, n) from finest to coarsest.
    pub fn iter(n: usize) -> impl ExactSizeIterator<Item = LevelIndex> {
        (0..n).map(LevelIndex)
    }
}

impl fmt::Display for LevelIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

impl From<usize> for LevelIndex {
    #[inline]
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl<T> std::ops::Index<LevelIndex> for [T] {
    type Output = T;
    #[inline]
    fn index(&self, idx: LevelIndex) -> &T {
        &self[idx.0]
    }
}

impl<T> std::ops::IndexMut<LevelIndex> for [T] {
    #[inline]
    fn index_mut(&mut self, idx: LevelIndex) -> &mut T {
        &mut self[idx.0]
    }
}

impl<T> std::ops::Index<LevelIndex> for Vec<T> {
    type Output = T;
    #[inline]
    fn index(&self, idx: LevelIndex) -> &T {
        &self[idx.0]
    }
}

impl<T> std::ops::IndexMut<LevelIndex> for Vec<T> {
    #[inline]
    fn index_mut(&mut self, idx: LevelIndex) -> &mut T {
        &mut self[idx.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", LevelIndex::new(3)), "L3");
    }

    #[test]
    fn test_vec_indexing() {
        let v = vec![10, 20, 30];
        assert_eq!(v[LevelIndex::new(2)], 30);
        let levels: Vec<_> = LevelIndex::iter(3).collect();
        assert_eq!(levels.last().map(|l| l.get()), Some(2));
    }
}
