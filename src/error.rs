//! Error types for ntensor

use crate::dtype::DType;
use thiserror::Error;

/// Result type alias using ntensor's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in ntensor operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Element count of a target shape (or supplied data) differs from the source
    #[error("Size mismatch: expected {expected} elements, got {got}")]
    SizeMismatch {
        /// Expected element count
        expected: usize,
        /// Actual element count
        got: usize,
    },

    /// Invalid axis argument
    #[error("Invalid dimension {dim} for tensor with {ndim} dimensions")]
    InvalidDimension {
        /// The invalid dimension
        dim: usize,
        /// Number of dimensions
        ndim: usize,
    },

    /// Element index (linear or flattened) out of bounds
    #[error("Index {index} out of bounds for tensor of size {size}")]
    IndexOutOfBounds {
        /// The invalid index
        index: isize,
        /// Bound that was violated
        size: usize,
    },

    /// Invalid argument provided to an operation
    #[error("Invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// The argument name
        arg: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// Tensor is not contiguous when contiguous memory is required
    #[error("Operation requires contiguous tensor")]
    NotContiguous,

    /// Operation called on a default-constructed tensor
    #[error("Operation '{op}' called on an empty tensor")]
    EmptyTensor {
        /// The operation name
        op: &'static str,
    },

    /// Unsupported dtype for an operation
    #[error("Unsupported dtype {dtype:?} for operation '{op}'")]
    UnsupportedDType {
        /// The unsupported dtype
        dtype: DType,
        /// The operation name
        op: &'static str,
    },

    /// Feature not yet implemented
    #[error("Not implemented: {feature}")]
    NotImplemented {
        /// Description of the unimplemented feature
        feature: &'static str,
    },
}

impl Error {
    /// Create a size mismatch error
    pub fn size_mismatch(expected: usize, got: usize) -> Self {
        Self::SizeMismatch { expected, got }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(arg: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            arg,
            reason: reason.into(),
        }
    }

    /// Create an out-of-bounds error
    pub fn out_of_bounds(index: isize, size: usize) -> Self {
        Self::IndexOutOfBounds { index, size }
    }

    /// True for the out-of-range family (element and axis bounds)
    pub fn is_out_of_range(&self) -> bool {
        matches!(
            self,
            Self::IndexOutOfBounds { .. } | Self::InvalidDimension { .. }
        )
    }

    /// True for invalid-argument failures
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }
}
