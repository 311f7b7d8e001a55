//! Row-major traversal of a strided layout

use super::Layout;

/// Iterator over the buffer offsets of a layout in logical (row-major) order
///
/// The last axis varies fastest. For a contiguous layout this yields
/// `0, 1, 2, ...`; for a transposed or permuted one it yields the offsets
/// that a contiguous copy must read from, in the order it must write them.
#[derive(Debug, Clone)]
pub struct StridedIndex<'a> {
    shape: &'a [usize],
    strides: &'a [isize],
    indices: Vec<usize>,
    next_offset: Option<isize>,
}

impl<'a> StridedIndex<'a> {
    /// Start a traversal at the all-zero multi-index
    pub fn new(layout: &'a Layout) -> Self {
        let shape = layout.shape();
        let next_offset = if layout.elem_count() == 0 {
            None
        } else {
            Some(0)
        };
        Self {
            shape,
            strides: layout.strides(),
            indices: vec![0; shape.len()],
            next_offset,
        }
    }

    /// Multi-index of the element the next call to `next` returns
    pub fn indices(&self) -> Option<&[usize]> {
        self.next_offset.map(|_| self.indices.as_slice())
    }
}

impl Iterator for StridedIndex<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let current = self.next_offset?;

        // Increment indices (row-major order), carrying into outer axes
        let mut offset = current;
        let mut exhausted = true;
        for axis in (0..self.shape.len()).rev() {
            self.indices[axis] += 1;
            offset += self.strides[axis];
            if self.indices[axis] < self.shape[axis] {
                exhausted = false;
                break;
            }
            offset -= self.strides[axis] * self.shape[axis] as isize;
            self.indices[axis] = 0;
        }
        self.next_offset = if exhausted { None } else { Some(offset) };

        Some(current as usize)
    }
}
