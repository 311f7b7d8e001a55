//! Integration tests for element access
//!
//! Linear access indexes the flat buffer directly; multi-index access goes
//! through the strides and checks every component against its axis.

mod common;

use common::{arange_i64, sample_f32};
use ntensor::error::Error;
use ntensor::tensor::Tensor;

#[test]
fn test_linear_get() {
    let tensor = sample_f32();
    assert_eq!(tensor.get(3).unwrap(), 4.0);
    assert_eq!(tensor.get(2).unwrap(), 3.0);
}

#[test]
fn test_multi_index_get() {
    let tensor = sample_f32();
    assert_eq!(tensor.get_at(&[0, 1, 2]).unwrap(), 6.0);
    assert_eq!(tensor.get_at(&[0, 0, 0]).unwrap(), 1.0);
}

#[test]
fn test_linear_out_of_bounds() {
    let tensor = sample_f32();
    let err = tensor.get(6).unwrap_err();
    assert_eq!(err, Error::IndexOutOfBounds { index: 6, size: 6 });
    assert!(tensor.set(100, 0.0).unwrap_err().is_out_of_range());
}

#[test]
fn test_every_non_default_tensor_rejects_size() {
    let shapes: [&[usize]; 4] = [&[1], &[4], &[2, 3], &[2, 1, 3, 2]];
    for shape in shapes {
        let tensor = arange_i64(shape);
        assert!(tensor.get(tensor.size()).unwrap_err().is_out_of_range());
        assert!(tensor.get(usize::MAX).unwrap_err().is_out_of_range());
    }
}

#[test]
fn test_multi_index_out_of_bounds() {
    let tensor = sample_f32();
    assert!(tensor.get_at(&[1, 0, 0]).unwrap_err().is_out_of_range());
    assert!(tensor.get_at(&[0, 2, 0]).unwrap_err().is_out_of_range());
}

#[test]
fn test_component_cannot_spill_into_next_row() {
    // [0, 0, 4] would flatten to offset 4 (in range) but axis 2 has extent 3
    let tensor = sample_f32();
    let err = tensor.get_at(&[0, 0, 4]).unwrap_err();
    assert_eq!(err, Error::IndexOutOfBounds { index: 4, size: 3 });
}

#[test]
fn test_partial_index() {
    let tensor = arange_i64(&[2, 3, 4]);
    // Trailing axes default to 0
    assert_eq!(tensor.get_at(&[1]).unwrap(), 12);
    assert_eq!(tensor.get_at(&[1, 2]).unwrap(), 20);
    assert_eq!(tensor.get_at(&[]).unwrap(), 0);
}

#[test]
fn test_too_many_indices() {
    let tensor = arange_i64(&[2, 3]);
    assert!(tensor.get_at(&[0, 0, 0]).unwrap_err().is_invalid_argument());
}

#[test]
fn test_set_through_multi_index() {
    let tensor = arange_i64(&[2, 3]);
    tensor.set_at(&[1, 1], 99).unwrap();
    assert_eq!(tensor.get(4).unwrap(), 99);
    assert_eq!(tensor.to_vec(), [0, 1, 2, 3, 99, 5]);
}

#[test]
fn test_linear_index_ignores_strides() {
    // On a transposed view, get(i) still reads buffer slot i
    let tensor = arange_i64(&[2, 3]);
    let t = tensor.transpose(0, 1).unwrap();
    assert_eq!(t.get(1).unwrap(), 1);
    assert_eq!(t.get_at(&[0, 1]).unwrap(), 3);
}

#[test]
fn test_access_on_default_tensor() {
    let tensor = Tensor::<f64>::default();
    assert!(matches!(tensor.get(0), Err(Error::EmptyTensor { .. })));
    assert!(matches!(tensor.get_at(&[0]), Err(Error::EmptyTensor { .. })));
    assert!(tensor.set(0, 1.0).is_err());
}
