//! Layout: shape and strides describing how a tensor addresses its buffer

use super::shape::Shape;
use super::strides::Strides;
use crate::error::{Error, Result};
use std::fmt;

/// Layout describes the memory layout of a tensor
///
/// The elements live in one flat buffer, not necessarily in row-major order.
/// The layout maps a multi-index to a buffer offset:
///
///   offset = i0 * strides[0] + i1 * strides[1] + ... + in * strides[n]
///
/// For every in-range multi-index that offset lies in `[0, elem_count)`. This
/// holds for fresh layouts and is preserved by every transform below, which
/// only permute, drop or insert extent-1 axes.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Layout {
    shape: Shape,
    strides: Strides,
}

impl Layout {
    /// Create a new contiguous (row-major/C-order) layout from a shape
    ///
    /// # Example
    /// ```
    /// use ntensor::tensor::Layout;
    /// let layout = Layout::contiguous(&[2, 3, 4]);
    /// assert_eq!(layout.shape(), &[2, 3, 4]);
    /// assert_eq!(layout.strides(), &[12, 4, 1]);
    /// ```
    pub fn contiguous(shape: &[usize]) -> Self {
        Self {
            shape: Shape::from(shape),
            strides: Strides::contiguous(shape),
        }
    }

    /// Create a layout with explicit shape and strides
    pub fn new(shape: Shape, strides: Strides) -> Self {
        debug_assert_eq!(shape.len(), strides.len());
        Self { shape, strides }
    }

    /// Get the shape
    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Get the strides
    #[inline]
    pub fn strides(&self) -> &[isize] {
        &self.strides
    }

    /// Number of dimensions (rank)
    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.ndim()
    }

    /// Total number of elements
    #[inline]
    pub fn elem_count(&self) -> usize {
        self.shape.numel()
    }

    /// True for the metadata of a default (no data) tensor
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.shape.is_empty()
    }

    /// Check if memory is contiguous (row-major order)
    ///
    /// Axes of extent 1 are never stepped along, so their strides are ignored.
    /// A transposed layout that only moved extent-1 axes is still contiguous.
    pub fn is_contiguous(&self) -> bool {
        if self.elem_count() == 0 {
            return true;
        }

        let mut expected = 1isize;
        for (&extent, &stride) in self.shape.iter().zip(self.strides.iter()).rev() {
            if extent == 1 {
                continue;
            }
            if stride != expected {
                return false;
            }
            expected *= extent as isize;
        }
        true
    }

    /// Get size along a specific dimension
    pub fn dim(&self, axis: usize) -> Option<usize> {
        self.shape.get(axis).copied()
    }

    fn check_axis(&self, axis: usize) -> Result<()> {
        if axis < self.ndim() {
            Ok(())
        } else {
            Err(Error::InvalidDimension {
                dim: axis,
                ndim: self.ndim(),
            })
        }
    }

    /// Compute the buffer offset for a (possibly partial) multi-index
    ///
    /// `indices` may be shorter than the rank; the missing trailing axes are
    /// taken as 0. Each supplied component is checked against its own axis
    /// before the flattened offset is checked against `[0, elem_count)`, so an
    /// out-of-range component can never alias some other in-range element.
    pub fn index(&self, indices: &[usize]) -> Result<usize> {
        if indices.len() > self.ndim() {
            return Err(Error::invalid_argument(
                "indices",
                format!(
                    "got {} indices for tensor with {} dimensions",
                    indices.len(),
                    self.ndim()
                ),
            ));
        }

        let mut linear = 0isize;
        for ((&idx, &extent), &stride) in indices
            .iter()
            .zip(self.shape.iter())
            .zip(self.strides.iter())
        {
            if idx >= extent {
                return Err(Error::out_of_bounds(idx as isize, extent));
            }
            linear += idx as isize * stride;
        }

        let size = self.elem_count();
        if linear < 0 || linear as usize >= size {
            return Err(Error::out_of_bounds(linear, size));
        }
        Ok(linear as usize)
    }

    /// Create a transposed layout (swap two dimensions)
    pub fn transpose(&self, axis1: usize, axis2: usize) -> Result<Self> {
        self.check_axis(axis1)?;
        self.check_axis(axis2)?;

        let mut layout = self.clone();
        layout.shape.swap(axis1, axis2);
        layout.strides.swap(axis1, axis2);
        Ok(layout)
    }

    /// Reorder all dimensions; `dims[i]` names the source axis placed at `i`
    pub fn permute(&self, dims: &[usize]) -> Result<Self> {
        let ndim = self.ndim();
        if dims.len() != ndim {
            return Err(Error::invalid_argument(
                "dims",
                format!("expected {} axes, got {}", ndim, dims.len()),
            ));
        }

        let mut seen = vec![false; ndim];
        for &d in dims {
            self.check_axis(d)?;
            if std::mem::replace(&mut seen[d], true) {
                return Err(Error::invalid_argument(
                    "dims",
                    format!("axis {d} repeated in permutation {dims:?}"),
                ));
            }
        }

        Ok(Self {
            shape: dims.iter().map(|&d| self.shape[d]).collect(),
            strides: dims.iter().map(|&d| self.strides[d]).collect(),
        })
    }

    /// Create a squeezed layout (remove dimensions of size 1)
    ///
    /// With `None`, every extent-1 axis goes; if that would leave no axes at
    /// all, a single `[1]` axis is kept. With `Some(axis)`, that axis must
    /// exist and have extent 1.
    pub fn squeeze(&self, axis: Option<usize>) -> Result<Self> {
        match axis {
            Some(axis) => {
                self.check_axis(axis)?;
                if self.shape[axis] != 1 {
                    return Err(Error::invalid_argument(
                        "axis",
                        format!(
                            "cannot squeeze axis {} with extent {}",
                            axis, self.shape[axis]
                        ),
                    ));
                }
                if self.ndim() == 1 {
                    return Ok(self.clone());
                }
                let mut layout = self.clone();
                layout.shape.remove(axis);
                layout.strides.remove(axis);
                Ok(layout)
            }
            None => {
                let kept: Vec<(usize, isize)> = self
                    .shape
                    .iter()
                    .zip(self.strides.iter())
                    .filter(|&(&extent, _)| extent != 1)
                    .map(|(&extent, &stride)| (extent, stride))
                    .collect();
                if kept.is_empty() {
                    return Ok(Self::contiguous(&[1]));
                }
                Ok(Self {
                    shape: kept.iter().map(|&(extent, _)| extent).collect(),
                    strides: kept.iter().map(|&(_, stride)| stride).collect(),
                })
            }
        }
    }

    /// Create an unsqueezed layout (add dimension of size 1)
    ///
    /// `None` inserts at the front. The new axis takes the stride that a
    /// row-major layout would give it: `strides[axis] * shape[axis]`, or 1
    /// when appended after the last axis.
    pub fn unsqueeze(&self, axis: Option<usize>) -> Result<Self> {
        let ndim = self.ndim();
        let axis = axis.unwrap_or(0);
        if axis > ndim {
            return Err(Error::InvalidDimension {
                dim: axis,
                ndim: ndim + 1,
            });
        }

        let stride = if axis < ndim {
            self.strides[axis] * self.shape[axis] as isize
        } else {
            1
        };

        let mut layout = self.clone();
        layout.shape.insert(axis, 1);
        layout.strides.insert(axis, stride);
        Ok(layout)
    }
}

impl fmt::Debug for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Layout {{ shape: {:?}, strides: {:?} }}",
            self.shape.as_slice(),
            self.strides.as_slice()
        )
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.shape.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contiguous_layout() {
        let layout = Layout::contiguous(&[2, 3, 4]);
        assert_eq!(layout.shape(), &[2, 3, 4]);
        assert_eq!(layout.strides(), &[12, 4, 1]);
        assert_eq!(layout.elem_count(), 24);
        assert!(layout.is_contiguous());
    }

    #[test]
    fn test_default_layout() {
        let layout = Layout::default();
        assert!(layout.is_empty());
        assert_eq!(layout.elem_count(), 0);
        assert_eq!(layout.ndim(), 0);
    }

    #[test]
    fn test_transpose() {
        let layout = Layout::contiguous(&[2, 3, 4]);
        let transposed = layout.transpose(2, 1).unwrap();
        assert_eq!(transposed.shape(), &[2, 4, 3]);
        assert_eq!(transposed.strides(), &[12, 1, 4]);
        assert!(!transposed.is_contiguous());
    }

    #[test]
    fn test_transpose_bad_axis() {
        let layout = Layout::contiguous(&[2, 3]);
        assert_eq!(
            layout.transpose(0, 2),
            Err(Error::InvalidDimension { dim: 2, ndim: 2 })
        );
    }

    #[test]
    fn test_transpose_unit_axis_stays_contiguous() {
        let transposed = Layout::contiguous(&[1, 2, 3]).transpose(0, 1).unwrap();
        assert_eq!(transposed.shape(), &[2, 1, 3]);
        assert_eq!(transposed.strides(), &[3, 6, 1]);
        assert!(transposed.is_contiguous());
    }

    #[test]
    fn test_permute() {
        let layout = Layout::contiguous(&[2, 3, 4]);
        let permuted = layout.permute(&[2, 0, 1]).unwrap();
        assert_eq!(permuted.shape(), &[4, 2, 3]);
        assert_eq!(permuted.strides(), &[1, 12, 4]);

        assert!(layout.permute(&[0, 0, 1]).unwrap_err().is_invalid_argument());
        assert!(layout.permute(&[0, 1]).unwrap_err().is_invalid_argument());
        assert!(layout.permute(&[0, 1, 3]).unwrap_err().is_out_of_range());
    }

    #[test]
    fn test_squeeze() {
        let layout = Layout::contiguous(&[1, 3, 1, 4]);
        let squeezed = layout.squeeze(None).unwrap();
        assert_eq!(squeezed.shape(), &[3, 4]);
        assert_eq!(squeezed.strides(), &[4, 1]);

        let one = layout.squeeze(Some(2)).unwrap();
        assert_eq!(one.shape(), &[1, 3, 4]);
        assert_eq!(one.strides(), &[12, 4, 1]);

        assert!(layout.squeeze(Some(1)).unwrap_err().is_invalid_argument());
        assert!(layout.squeeze(Some(4)).unwrap_err().is_out_of_range());
    }

    #[test]
    fn test_squeeze_all_ones_keeps_one_axis() {
        let layout = Layout::contiguous(&[1, 1, 1]);
        assert_eq!(layout.squeeze(None).unwrap().shape(), &[1]);
        let single = Layout::contiguous(&[1]);
        assert_eq!(single.squeeze(Some(0)).unwrap().shape(), &[1]);
    }

    #[test]
    fn test_unsqueeze() {
        let layout = Layout::contiguous(&[3, 4]);

        let front = layout.unsqueeze(None).unwrap();
        assert_eq!(front.shape(), &[1, 3, 4]);
        assert_eq!(front.strides(), &[12, 4, 1]);

        let middle = layout.unsqueeze(Some(1)).unwrap();
        assert_eq!(middle.shape(), &[3, 1, 4]);
        assert_eq!(middle.strides(), &[4, 4, 1]);

        let back = layout.unsqueeze(Some(2)).unwrap();
        assert_eq!(back.shape(), &[3, 4, 1]);
        assert_eq!(back.strides(), &[4, 1, 1]);

        assert!(layout.unsqueeze(Some(3)).is_err());
    }

    #[test]
    fn test_index() {
        let layout = Layout::contiguous(&[2, 3]);
        assert_eq!(layout.index(&[0, 0]), Ok(0));
        assert_eq!(layout.index(&[0, 2]), Ok(2));
        assert_eq!(layout.index(&[1, 0]), Ok(3));
        assert_eq!(layout.index(&[1, 2]), Ok(5));
        assert!(layout.index(&[2, 0]).is_err());
    }

    #[test]
    fn test_index_partial() {
        let layout = Layout::contiguous(&[2, 3]);
        assert_eq!(layout.index(&[1]), Ok(3));
        assert_eq!(layout.index(&[]), Ok(0));
        assert!(layout.index(&[0, 0, 0]).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_index_rejects_masked_component() {
        // [0, 4] flattens to 4, which is in range, but axis 1 only has 3 entries
        let layout = Layout::contiguous(&[2, 3]);
        assert_eq!(layout.index(&[0, 4]), Err(Error::out_of_bounds(4, 3)));
    }
}
