//! Read-only, random-access views of the values being reduced

use ndarray::ArrayView1;

/// A read-only sequence with a known length that supports random access.
///
/// Members of a group read disjoint, strided subsets of the range at the same
/// time, so implementations should make `get` cheap.
pub trait InputRange {
    type Item;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a copy of the element at `index`.
    ///
    /// Callers must ensure that `index < self.len()`.
    fn get(&self, index: usize) -> Self::Item;
}

impl<U: Clone> InputRange for [U] {
    type Item = U;

    #[inline(always)]
    fn len(&self) -> usize {
        <[U]>::len(self)
    }

    #[inline(always)]
    fn get(&self, index: usize) -> U {
        self[index].clone()
    }
}

// this lets callers reduce over non-contiguous data (e.g. a column of a 2D
// array) without first copying it into a contiguous buffer
impl<U: Clone> InputRange for ArrayView1<'_, U> {
    type Item = U;

    #[inline(always)]
    fn len(&self) -> usize {
        ArrayView1::len(self)
    }

    #[inline(always)]
    fn get(&self, index: usize) -> U {
        self[index].clone()
    }
}
