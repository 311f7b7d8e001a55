//! Strides: per-axis element steps into the flat buffer

use super::shape::STACK_DIMS;
use smallvec::SmallVec;
use std::fmt;
use std::ops::Deref;

/// Element offset between neighbours along each axis
///
/// Strides are in ELEMENTS, not bytes. Signed so that flattened offsets can
/// be range-checked against `[0, size)` before touching the buffer.
#[derive(Clone, PartialEq, Eq, Default, Hash)]
pub struct Strides(SmallVec<[isize; STACK_DIMS]>);

impl Strides {
    /// Create empty strides.
    pub fn new() -> Self {
        Self(SmallVec::new())
    }

    /// Row-major (C-order) strides for `shape`
    ///
    /// `strides[last] == 1` and `strides[i] == shape[i + 1] * strides[i + 1]`.
    /// Exact for shapes accepted by [`Shape::validated`](super::Shape::validated);
    /// larger products saturate at `isize::MAX`.
    pub fn contiguous(shape: &[usize]) -> Self {
        let mut strides: SmallVec<[isize; STACK_DIMS]> = SmallVec::from_elem(0, shape.len());
        let mut step = 1isize;
        for (stride, &extent) in strides.iter_mut().zip(shape.iter()).rev() {
            *stride = step;
            step = step.saturating_mul(isize::try_from(extent).unwrap_or(isize::MAX));
        }
        Self(strides)
    }

    pub(crate) fn remove(&mut self, axis: usize) -> isize {
        self.0.remove(axis)
    }

    pub(crate) fn insert(&mut self, axis: usize, stride: isize) {
        self.0.insert(axis, stride);
    }

    pub(crate) fn swap(&mut self, a: usize, b: usize) {
        self.0.swap(a, b);
    }

    /// View strides as a slice.
    pub fn as_slice(&self) -> &[isize] {
        self.0.as_slice()
    }
}

impl Deref for Strides {
    type Target = [isize];

    fn deref(&self) -> &Self::Target {
        self.0.as_slice()
    }
}

impl fmt::Debug for Strides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.as_slice().fmt(f)
    }
}

impl From<&[isize]> for Strides {
    fn from(value: &[isize]) -> Self {
        Self(SmallVec::from_slice(value))
    }
}

impl<const N: usize> From<[isize; N]> for Strides {
    fn from(value: [isize; N]) -> Self {
        Self(value.into_iter().collect())
    }
}

impl FromIterator<isize> for Strides {
    fn from_iter<I: IntoIterator<Item = isize>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
