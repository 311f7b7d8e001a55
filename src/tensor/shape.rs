//! Shape: per-axis extents of a tensor

use crate::error::{Error, Result};
use smallvec::SmallVec;
use std::fmt;
use std::ops::Deref;

/// Metadata up to this rank stays on the stack
pub(crate) const STACK_DIMS: usize = 4;

/// Ordered per-axis extents; axis 0 is the outermost (slowest varying)
#[derive(Clone, PartialEq, Eq, Default, Hash)]
pub struct Shape(SmallVec<[usize; STACK_DIMS]>);

impl Shape {
    /// Create an empty shape (only valid for the default tensor)
    pub fn new() -> Self {
        Self(SmallVec::new())
    }

    /// Build a shape for a data-holding tensor
    ///
    /// Rejects rank 0, and any shape whose element count (or whose
    /// row-major stride for a zero-extent tensor) would exceed `isize::MAX`.
    pub fn validated(dims: &[usize]) -> Result<Self> {
        if dims.is_empty() {
            return Err(Error::invalid_argument("shape", "shape must not be empty"));
        }
        // Zero extents are skipped so `[0, huge]` cannot hide an oversized stride
        let span = dims
            .iter()
            .filter(|&&d| d != 0)
            .try_fold(1usize, |acc, &d| acc.checked_mul(d))
            .filter(|&n| n <= isize::MAX as usize);
        if span.is_none() {
            return Err(Error::invalid_argument(
                "shape",
                format!("element count of {dims:?} overflows isize"),
            ));
        }
        Ok(Self::from(dims))
    }

    /// Product of the extents
    ///
    /// Empty shapes report 0: there is no rank-0 scalar in this crate, an
    /// empty shape only ever describes the default (no data) tensor.
    pub fn numel(&self) -> usize {
        if self.0.is_empty() {
            0
        } else {
            self.0.iter().product()
        }
    }

    /// Number of axes
    #[inline]
    pub fn ndim(&self) -> usize {
        self.0.len()
    }

    pub(crate) fn remove(&mut self, axis: usize) -> usize {
        self.0.remove(axis)
    }

    pub(crate) fn insert(&mut self, axis: usize, extent: usize) {
        self.0.insert(axis, extent);
    }

    pub(crate) fn swap(&mut self, a: usize, b: usize) {
        self.0.swap(a, b);
    }

    /// View shape as a slice.
    pub fn as_slice(&self) -> &[usize] {
        self.0.as_slice()
    }
}

impl Deref for Shape {
    type Target = [usize];

    fn deref(&self) -> &Self::Target {
        self.0.as_slice()
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.as_slice().fmt(f)
    }
}

impl From<&[usize]> for Shape {
    fn from(value: &[usize]) -> Self {
        Self(SmallVec::from_slice(value))
    }
}

impl From<Vec<usize>> for Shape {
    fn from(value: Vec<usize>) -> Self {
        Self(SmallVec::from_vec(value))
    }
}

impl<const N: usize> From<[usize; N]> for Shape {
    fn from(value: [usize; N]) -> Self {
        Self(value.into_iter().collect())
    }
}

impl FromIterator<usize> for Shape {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
