//! Tensor types and operations
//!
//! This module provides the core `Tensor` type: an n-dimensional strided
//! array over a reference-counted buffer, plus the layout metadata types
//! that describe how it addresses that buffer.

mod core;
mod iter;
mod layout;
mod shape;
mod storage;
mod strides;

pub use core::Tensor;
pub use iter::StridedIndex;
pub use layout::Layout;
pub use shape::Shape;
pub use storage::Storage;
pub use strides::Strides;
