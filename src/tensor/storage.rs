//! Storage: host memory management with Arc-based sharing

use crate::dtype::Element;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;

/// Flat element buffer shared by a tensor and every view derived from it
///
/// Storage wraps its buffer with reference counting, enabling zero-copy
/// views (transpose, reshape, squeeze, ...) that share the same elements.
/// Writes through one handle are visible through every other handle.
///
/// The lock only keeps individual element reads and writes sound across
/// threads; it does not order multi-step updates made through different
/// views. Callers coordinating writers must synchronize externally.
///
/// Memory is released when the last handle is dropped.
pub struct Storage<T: Element> {
    inner: Arc<RwLock<Vec<T>>>,
}

impl<T: Element> Storage<T> {
    /// Allocate `len` zero-initialized elements
    pub fn zeros(len: usize) -> Self {
        Self::from_vec(vec![T::zero(); len])
    }

    /// Take ownership of an existing buffer
    pub fn from_vec(data: Vec<T>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(data)),
        }
    }

    /// Copy `data` into a freshly allocated buffer
    pub fn from_slice(data: &[T]) -> Self {
        Self::from_vec(data.to_vec())
    }

    /// Get the number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Check if storage is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read the element at a buffer offset
    #[inline]
    pub fn get(&self, offset: usize) -> Option<T> {
        self.inner.read().get(offset).copied()
    }

    /// Overwrite the element at a buffer offset; returns false when out of range
    #[inline]
    pub fn set(&self, offset: usize, value: T) -> bool {
        match self.inner.write().get_mut(offset) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Shared read access to the whole buffer
    pub fn read(&self) -> RwLockReadGuard<'_, Vec<T>> {
        self.inner.read()
    }

    /// Exclusive write access to the whole buffer
    pub fn write(&self) -> RwLockWriteGuard<'_, Vec<T>> {
        self.inner.write()
    }

    /// Address of the shared allocation, usable as a buffer identity
    #[inline]
    pub fn as_ptr(&self) -> *const () {
        Arc::as_ptr(&self.inner) as *const ()
    }

    /// Whether two handles refer to the same buffer
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Get the reference count
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Check if this is the only reference
    #[inline]
    pub fn is_unique(&self) -> bool {
        Arc::strong_count(&self.inner) == 1
    }

    /// Copy the flat buffer out, in storage order
    pub fn to_vec(&self) -> Vec<T> {
        self.inner.read().clone()
    }
}

impl<T: Element> Clone for Storage<T> {
    /// Clone increments the reference count (zero-copy)
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Element> std::fmt::Debug for Storage<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage")
            .field("ptr", &self.as_ptr())
            .field("len", &self.len())
            .field("dtype", &T::DTYPE)
            .field("refs", &self.ref_count())
            .finish()
    }
}
