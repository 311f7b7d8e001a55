//! # ntensor
//!
//! **Strided n-dimensional arrays with shared, reference-counted storage.**
//!
//! ntensor provides the layout and addressing layer of a numeric library: a
//! `Tensor<T>` owns or shares a flat buffer of elements and carries the
//! shape/stride metadata that let reshapes, transposes and squeezes address
//! the same memory without copying.
//!
//! ## Features
//!
//! - **Zero-copy views**: `view`, `reshape`, `transpose`, `permute`,
//!   `squeeze`, `unsqueeze` share the buffer
//! - **Explicit materialization**: `contiguous` and `deep_clone` allocate
//! - **Element types**: i8, i16, i32, i64, f32, f64
//!
//! ## Quick Start
//!
//! ```rust
//! use ntensor::prelude::*;
//!
//! let a = Tensor::from_vec(&[1, 2, 3], vec![1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0])?;
//!
//! let r = a.reshape(&[2, 3, 1])?;
//! assert_eq!(r.get_at(&[1, 2, 0])?, 6.0);
//!
//! let t = a.transpose(0, 1)?;
//! assert_eq!(t.get_at(&[1, 0, 1])?, 5.0);
//! # Ok::<(), ntensor::error::Error>(())
//! ```
//!
//! ## Aliasing
//!
//! Views and `Clone` share storage with their source. A write through one of
//! them is visible through all others. Use `deep_clone` for an independent
//! copy.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod device;
pub mod dtype;
pub mod error;
pub mod tensor;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::device::Device;
    pub use crate::dtype::{DType, Element};
    pub use crate::error::{Error, Result};
    pub use crate::tensor::{Layout, Tensor};
}
