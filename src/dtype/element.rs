//! Element trait for mapping Rust types to DType

use super::DType;
use bytemuck::{Pod, Zeroable};
use std::fmt::{Debug, Display};

/// Trait for types that can be elements of a tensor
///
/// Implemented for `i8`, `i16`, `i32`, `i64`, `f32` and `f64`.
///
/// # Bounds
/// - `Copy + Send + Sync + 'static` - values are read out of a shared, locked buffer
/// - `Pod + Zeroable` - zero-filled allocation (bytemuck)
/// - `Debug + Display` - tensor printing
pub trait Element:
    Copy + Send + Sync + Pod + Zeroable + PartialEq + Debug + Display + 'static
{
    /// The corresponding DType for this Rust type
    const DTYPE: DType;

    /// Zero value
    #[inline]
    fn zero() -> Self {
        Self::zeroed()
    }
}

macro_rules! impl_element {
    ($($ty:ty => $dtype:ident),* $(,)?) => {
        $(
            impl Element for $ty {
                const DTYPE: DType = DType::$dtype;
            }
        )*
    };
}

impl_element! {
    f64 => F64,
    f32 => F32,
    i64 => I64,
    i32 => I32,
    i16 => I16,
    i8 => I8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_dtype() {
        assert_eq!(f64::DTYPE, DType::F64);
        assert_eq!(f32::DTYPE, DType::F32);
        assert_eq!(i32::DTYPE, DType::I32);
        assert_eq!(i8::DTYPE, DType::I8);
    }

    #[test]
    fn test_zero() {
        assert_eq!(f32::zero(), 0.0);
        assert_eq!(i64::zero(), 0);
        assert_eq!(std::mem::size_of::<i16>(), i16::DTYPE.size_in_bytes());
    }
}
