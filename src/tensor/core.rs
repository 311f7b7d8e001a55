//! Core Tensor type

use super::{Layout, Shape, Storage, StridedIndex};
use crate::device::Device;
use crate::dtype::{DType, Element};
use crate::error::{Error, Result};
use std::fmt;

/// N-dimensional strided array over a shared host buffer
///
/// `Tensor` is the fundamental data structure in ntensor. It consists of:
/// - **Storage**: a reference-counted flat buffer of `T`
/// - **Layout**: shape and strides mapping multi-indices to buffer offsets
///
/// # Zero-Copy Views
///
/// `transpose`, `permute`, `view`, `squeeze`, `unsqueeze` and (for contiguous
/// receivers) `reshape` create new tensors that share the same underlying
/// storage. `Clone` does too: it is a shallow copy of the handle.
/// Only `deep_clone`, `contiguous` on a non-contiguous receiver and the
/// constructors allocate.
///
/// Aliasing is intentional: a `set` through one view is visible through every
/// tensor sharing the buffer.
///
/// # The default tensor
///
/// `Tensor::default()` holds no buffer, has an empty shape and `size() == 0`.
/// It is the only tensor with an empty shape. Layout transforms on it fail
/// with [`Error::EmptyTensor`].
///
/// # Example
///
/// ```
/// use ntensor::prelude::*;
///
/// let a = Tensor::from_slice(&[2, 3], &[1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0])?;
/// let b = a.transpose(0, 1)?; // Zero-copy, shares storage with a
/// assert_eq!(b.get_at(&[2, 1])?, 6.0);
/// assert!(a.shares_storage(&b));
/// # Ok::<(), ntensor::error::Error>(())
/// ```
pub struct Tensor<T: Element> {
    /// Shared buffer; `None` only for the default tensor
    storage: Option<Storage<T>>,
    /// Shape and strides
    layout: Layout,
}

impl<T: Element> Tensor<T> {
    /// The default tensor: no buffer, no shape, size 0. Does not allocate.
    pub fn empty() -> Self {
        Self {
            storage: None,
            layout: Layout::default(),
        }
    }

    /// Build a tensor over an existing buffer
    pub(crate) fn from_parts(storage: Storage<T>, layout: Layout) -> Result<Self> {
        if layout.is_empty() {
            return Err(Error::invalid_argument("shape", "shape must not be empty"));
        }
        Ok(Self {
            storage: Some(storage),
            layout,
        })
    }

    /// Create a zero-filled tensor
    ///
    /// # Example
    ///
    /// ```
    /// # use ntensor::prelude::*;
    /// let t = Tensor::<f32>::zeros(&[1, 2, 3])?;
    /// assert_eq!(t.size(), 6);
    /// assert_eq!(t.strides(), &[6, 3, 1]);
    /// # Ok::<(), ntensor::error::Error>(())
    /// ```
    pub fn zeros(shape: &[usize]) -> Result<Self> {
        let shape = Shape::validated(shape)?;
        let storage = Storage::zeros(shape.numel());
        Self::from_parts(storage, Layout::contiguous(&shape))
    }

    /// Create a tensor by copying `data` into a new buffer
    ///
    /// Fails with an invalid-argument error when `shape` or `data` is empty,
    /// and with a size mismatch when `data.len()` is not the product of `shape`.
    pub fn from_slice(shape: &[usize], data: &[T]) -> Result<Self> {
        Self::check_data(shape, data.len())?;
        Self::from_parts(Storage::from_slice(data), Layout::contiguous(shape))
    }

    /// Create a tensor that takes ownership of `data` as its buffer
    ///
    /// Same validation as [`Self::from_slice`].
    pub fn from_vec(shape: &[usize], data: Vec<T>) -> Result<Self> {
        Self::check_data(shape, data.len())?;
        Self::from_parts(Storage::from_vec(data), Layout::contiguous(shape))
    }

    fn check_data(shape: &[usize], len: usize) -> Result<()> {
        let shape = Shape::validated(shape)?;
        if len == 0 {
            return Err(Error::invalid_argument("data", "data must not be empty"));
        }
        if len != shape.numel() {
            return Err(Error::size_mismatch(shape.numel(), len));
        }
        Ok(())
    }

    /// Move the contents out, leaving the default tensor behind
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }

    fn require_storage(&self, op: &'static str) -> Result<&Storage<T>> {
        self.storage.as_ref().ok_or(Error::EmptyTensor { op })
    }

    /// New tensor with `layout` over this tensor's buffer
    fn derive(&self, op: &'static str, layout: Layout) -> Result<Self> {
        let storage = self.require_storage(op)?.clone();
        Self::from_parts(storage, layout)
    }

    // ===== Accessors =====

    /// Get the storage; `None` for the default tensor
    #[inline]
    pub fn storage(&self) -> Option<&Storage<T>> {
        self.storage.as_ref()
    }

    /// Get the layout
    #[inline]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Get the shape
    #[inline]
    pub fn shape(&self) -> &[usize] {
        self.layout.shape()
    }

    /// Get the strides
    #[inline]
    pub fn strides(&self) -> &[isize] {
        self.layout.strides()
    }

    /// Get the number of dimensions (rank)
    #[inline]
    pub fn ndim(&self) -> usize {
        self.layout.ndim()
    }

    /// Get the total number of elements
    #[inline]
    pub fn size(&self) -> usize {
        self.layout.elem_count()
    }

    /// Get the extent of one axis
    pub fn dim(&self, axis: usize) -> Option<usize> {
        self.layout.dim(axis)
    }

    /// Get the element type
    #[inline]
    pub fn dtype(&self) -> DType {
        T::DTYPE
    }

    /// Get the device holding the buffer
    #[inline]
    pub fn device(&self) -> Device {
        Device::Cpu
    }

    /// Whether this is the default tensor (no buffer)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.storage.is_none()
    }

    /// Check if the tensor is contiguous in memory
    #[inline]
    pub fn is_contiguous(&self) -> bool {
        self.layout.is_contiguous()
    }

    /// Whether both tensors address the same buffer
    pub fn shares_storage(&self, other: &Self) -> bool {
        match (&self.storage, &other.storage) {
            (Some(a), Some(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    // ===== Element Access =====

    /// Read the element at a linear buffer offset
    ///
    /// No stride translation happens here: `i` indexes the flat buffer, which
    /// matches logical order only for contiguous tensors.
    pub fn get(&self, i: usize) -> Result<T> {
        let storage = self.require_storage("get")?;
        self.check_linear(i)?;
        storage
            .get(i)
            .ok_or_else(|| Error::out_of_bounds(i as isize, self.size()))
    }

    /// Write the element at a linear buffer offset
    pub fn set(&self, i: usize, value: T) -> Result<()> {
        let storage = self.require_storage("set")?;
        self.check_linear(i)?;
        if storage.set(i, value) {
            Ok(())
        } else {
            Err(Error::out_of_bounds(i as isize, self.size()))
        }
    }

    fn check_linear(&self, i: usize) -> Result<()> {
        if i >= self.size() {
            return Err(Error::out_of_bounds(i as isize, self.size()));
        }
        Ok(())
    }

    /// Read the element at a (possibly partial) multi-index
    ///
    /// Missing trailing indices are taken as 0. Each component must be within
    /// its axis extent.
    pub fn get_at(&self, indices: &[usize]) -> Result<T> {
        let storage = self.require_storage("get_at")?;
        let offset = self.layout.index(indices)?;
        storage
            .get(offset)
            .ok_or_else(|| Error::out_of_bounds(offset as isize, self.size()))
    }

    /// Write the element at a (possibly partial) multi-index
    pub fn set_at(&self, indices: &[usize], value: T) -> Result<()> {
        self.update_at(indices, |_| value).map(|_| ())
    }

    /// Replace the element at a multi-index with `f(old)`, returning the old value
    ///
    /// `f` runs with the buffer unlocked, so it may read this tensor or any
    /// alias of it. The read and the write are not one atomic step.
    pub fn update_at<F>(&self, indices: &[usize], f: F) -> Result<T>
    where
        F: FnOnce(T) -> T,
    {
        let storage = self.require_storage("update_at")?;
        let offset = self.layout.index(indices)?;
        let old = storage
            .get(offset)
            .ok_or_else(|| Error::out_of_bounds(offset as isize, self.size()))?;
        let new = f(old);
        if !storage.set(offset, new) {
            return Err(Error::out_of_bounds(offset as isize, self.size()));
        }
        Ok(old)
    }

    /// Copy tensor data to a Vec in logical (row-major) order
    ///
    /// Strides are honored, so a transposed view yields its transposed
    /// element order. Use `storage().to_vec()` for the raw buffer.
    pub fn to_vec(&self) -> Vec<T> {
        match &self.storage {
            Some(storage) => {
                let buf = storage.read();
                StridedIndex::new(&self.layout).map(|o| buf[o]).collect()
            }
            None => Vec::new(),
        }
    }

    // ===== View Operations (Zero-Copy) =====

    /// Reinterpret with a new shape, sharing the buffer; never copies
    ///
    /// Fails with [`Error::NotContiguous`] for transposed or permuted receivers;
    /// use [`Self::reshape`] there.
    pub fn view(&self, shape: &[usize]) -> Result<Self> {
        self.check_reshape("view", shape)?;
        if !self.is_contiguous() {
            return Err(Error::NotContiguous);
        }
        self.derive("view", Layout::contiguous(shape))
    }

    /// Reshape to a new shape
    ///
    /// A contiguous receiver is reshaped in place over the same buffer, so the
    /// result aliases it. A non-contiguous receiver is first materialized
    /// with [`Self::contiguous`], so the result owns a fresh buffer.
    pub fn reshape(&self, shape: &[usize]) -> Result<Self> {
        self.check_reshape("reshape", shape)?;
        if self.is_contiguous() {
            return self.derive("reshape", Layout::contiguous(shape));
        }

        log::debug!(
            "reshape: copying non-contiguous {:?} (strides {:?}) into {:?}",
            self.shape(),
            self.strides(),
            shape
        );
        let dense = self.contiguous()?;
        dense.derive("reshape", Layout::contiguous(shape))
    }

    fn check_reshape(&self, op: &'static str, shape: &[usize]) -> Result<()> {
        self.require_storage(op)?;
        let shape = Shape::validated(shape)?;
        if shape.numel() != self.size() {
            return Err(Error::size_mismatch(self.size(), shape.numel()));
        }
        Ok(())
    }

    /// Flatten to 1D (zero-copy if contiguous)
    pub fn flatten(&self) -> Result<Self> {
        self.reshape(&[self.size()])
    }

    /// Swap two axes (zero-copy)
    ///
    /// Only metadata moves: the result shares the buffer and is in general
    /// no longer contiguous. Call [`Self::contiguous`] to materialize it.
    pub fn transpose(&self, axis1: usize, axis2: usize) -> Result<Self> {
        self.require_storage("transpose")?;
        let layout = self.layout.transpose(axis1, axis2)?;
        self.derive("transpose", layout)
    }

    /// Permute dimensions (zero-copy)
    ///
    /// # Arguments
    /// * `dims` - New order of dimensions. Must be a permutation of 0..ndim.
    ///
    /// # Example
    ///
    /// ```
    /// # use ntensor::prelude::*;
    /// let tensor = Tensor::<f64>::zeros(&[2, 3, 4])?;
    /// let permuted = tensor.permute(&[2, 0, 1])?;
    /// assert_eq!(permuted.shape(), &[4, 2, 3]);
    /// # Ok::<(), ntensor::error::Error>(())
    /// ```
    pub fn permute(&self, dims: &[usize]) -> Result<Self> {
        self.require_storage("permute")?;
        let layout = self.layout.permute(dims)?;
        self.derive("permute", layout)
    }

    /// Remove extent-1 axes: all of them, or just `axis`
    pub fn squeeze(&self, axis: Option<usize>) -> Result<Self> {
        self.require_storage("squeeze")?;
        let layout = self.layout.squeeze(axis)?;
        self.derive("squeeze", layout)
    }

    /// Insert an extent-1 axis at `axis` (front when `None`)
    pub fn unsqueeze(&self, axis: Option<usize>) -> Result<Self> {
        self.require_storage("unsqueeze")?;
        let layout = self.layout.unsqueeze(axis)?;
        self.derive("unsqueeze", layout)
    }

    // ===== Materializing Operations =====

    /// Make tensor contiguous (copy if needed)
    ///
    /// If the memory order already matches the shape, returns a view with
    /// canonical C-order strides over the same buffer. Otherwise allocates
    /// new storage and copies element by element in row-major order.
    pub fn contiguous(&self) -> Result<Self> {
        self.require_storage("contiguous")?;
        if self.is_contiguous() {
            return self.derive("contiguous", Layout::contiguous(self.shape()));
        }

        log::debug!(
            "contiguous: materializing {:?} (strides {:?}), {} elements",
            self.shape(),
            self.strides(),
            self.size()
        );
        Self::from_parts(
            Storage::from_vec(self.to_vec()),
            Layout::contiguous(self.shape()),
        )
    }

    /// Copy into a new, independently owned buffer
    ///
    /// The result is always contiguous and never aliases `self`. The default
    /// tensor clones to another default tensor.
    pub fn deep_clone(&self) -> Self {
        if self.is_empty() {
            return Self::empty();
        }

        log::debug!("deep_clone: copying {:?}, {} elements", self.shape(), self.size());
        Self {
            storage: Some(Storage::from_vec(self.to_vec())),
            layout: Layout::contiguous(self.shape()),
        }
    }

    /// Apply `f` to every element, in logical order, into a new contiguous tensor
    pub fn transform<F>(&self, f: F) -> Self
    where
        F: Fn(T) -> T,
    {
        if self.is_empty() {
            return Self::empty();
        }
        Self {
            storage: Some(Storage::from_vec(self.to_vec().into_iter().map(f).collect())),
            layout: Layout::contiguous(self.shape()),
        }
    }

    /// Apply `f` to every element of `self`, writing results into `out`
    ///
    /// `out` must have the same shape. It may be a view, or even alias
    /// `self`: inputs are read and mapped in full before anything is written,
    /// and `f` never runs under the buffer lock.
    pub fn transform_into<F>(&self, out: &Tensor<T>, f: F) -> Result<()>
    where
        F: Fn(T) -> T,
    {
        self.require_storage("transform_into")?;
        let dst = out.require_storage("transform_into")?;
        if self.shape() != out.shape() {
            return Err(Error::invalid_argument(
                "out",
                format!(
                    "output shape {:?} does not match input shape {:?}",
                    out.shape(),
                    self.shape()
                ),
            ));
        }

        let values: Vec<T> = self.to_vec().into_iter().map(f).collect();
        let mut buf = dst.write();
        for (offset, value) in StridedIndex::new(&out.layout).zip(values) {
            buf[offset] = value;
        }
        Ok(())
    }

    // ===== Device / DType Migration =====

    /// Move to another device
    ///
    /// Only host memory exists today: targeting the current device returns
    /// an aliasing handle, anything else is [`Error::NotImplemented`].
    pub fn to_device(&self, device: Device) -> Result<Self> {
        self.require_storage("to_device")?;
        if device.is_same(&self.device()) {
            return Ok(self.clone());
        }
        log::warn!("to_device: no backend for {device}, tensor stays on {}", self.device());
        Err(Error::NotImplemented {
            feature: "device migration",
        })
    }

    /// Convert to another element type
    ///
    /// Targeting the current dtype returns an aliasing handle; conversions
    /// are [`Error::UnsupportedDType`].
    pub fn to_dtype(&self, dtype: DType) -> Result<Self> {
        self.require_storage("to_dtype")?;
        if dtype == T::DTYPE {
            return Ok(self.clone());
        }
        log::warn!("to_dtype: conversion {} -> {dtype} is not supported", T::DTYPE);
        Err(Error::UnsupportedDType {
            dtype,
            op: "to_dtype",
        })
    }

    /// Move to another device and element type
    pub fn to_device_dtype(&self, device: Device, dtype: DType) -> Result<Self> {
        self.to_device(device)?.to_dtype(dtype)
    }
}

impl<T: Element> Default for Tensor<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Element> Clone for Tensor<T> {
    /// Clone creates a new tensor sharing the same storage (zero-copy)
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            layout: self.layout.clone(),
        }
    }
}

impl<T: Element> fmt::Debug for Tensor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tensor")
            .field("shape", &self.shape())
            .field("strides", &self.strides())
            .field("dtype", &T::DTYPE)
            .field("contiguous", &self.is_contiguous())
            .finish()
    }
}

impl<T: Element> fmt::Display for Tensor<T> {
    /// Shape, strides, dtype, then the flat buffer in storage order
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Tensor(shape={:?}, strides={:?}, dtype={})",
            self.shape(),
            self.strides(),
            T::DTYPE
        )?;
        let Some(storage) = &self.storage else {
            return f.write_str(" []");
        };
        f.write_str(" [")?;
        for (i, value) in storage.read().iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{value}")?;
        }
        f.write_str("]")
    }
}
