//! Common test utilities
#![allow(dead_code)]

use ntensor::tensor::Tensor;

/// The `[1, 2, 3]` tensor filled row-major with 1..=6
pub fn sample_f32() -> Tensor<f32> {
    Tensor::from_vec(&[1, 2, 3], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap()
}

/// A tensor of `shape` filled row-major with 0, 1, 2, ...
pub fn arange_i64(shape: &[usize]) -> Tensor<i64> {
    let n: usize = shape.iter().product();
    Tensor::from_vec(shape, (0..n as i64).collect()).unwrap()
}

/// Assert the C-order stride law for a freshly built tensor
pub fn assert_c_order<T: ntensor::dtype::Element>(tensor: &Tensor<T>) {
    let shape = tensor.shape();
    let strides = tensor.strides();
    assert_eq!(shape.len(), strides.len(), "rank mismatch");
    assert_eq!(strides[shape.len() - 1], 1, "last stride must be 1");
    for i in 0..shape.len() - 1 {
        assert_eq!(
            strides[i],
            shape[i + 1] as isize * strides[i + 1],
            "stride {} of {:?}",
            i,
            shape
        );
    }
}
