use super::*;
use crate::error::NeuroGradError;
use crate::types::DType;
use approx::assert_relative_eq;

#[test]
fn test_add_ok() -> Result<(), NeuroGradError> {
    let a = NdArray::new(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2])?;
    let b = NdArray::new(vec![5.0, 6.0, 7.0, 8.0], vec![2, 2])?;
    let r = add(&a, &b)?;
    assert_eq!(r.shape(), vec![2, 2]);
    assert_eq!(r.get_f32_data()?, vec![6.0, 8.0, 10.0, 12.0]);
    Ok(())
}

#[test]
fn test_add_shape_mismatch() {
    let a = NdArray::new(vec![1.0, 2.0], vec![2]).unwrap();
    let b = NdArray::new(vec![1.0, 2.0, 3.0], vec![3]).unwrap();
    match add(&a, &b) {
        Err(NeuroGradError::ShapeMismatch {
            expected,
            actual,
            operation,
        }) => {
            assert_eq!(expected, vec![2]);
            assert_eq!(actual, vec![3]);
            assert_eq!(operation, "add");
        }
        other => panic!("Expected ShapeMismatch, got {:?}", other),
    }
}

#[test]
fn test_mul_dtype_mismatch() {
    let a = NdArray::new(vec![1.0, 2.0], vec![2]).unwrap();
    let b = NdArray::new_f64(vec![1.0, 2.0], vec![2]).unwrap();
    let err = mul(&a, &b).unwrap_err();
    assert_eq!(
        err,
        NeuroGradError::DTypeMismatch {
            expected: DType::F32,
            actual: DType::F64,
            operation: "mul".to_string(),
        }
    );
}

#[test]
fn test_mul_scalar_keeps_dtype() {
    let a = NdArray::new(vec![1.5, -2.0], vec![2]).unwrap();
    let r = mul_scalar(&a, 2.0);
    assert_eq!(r.dtype(), DType::F32);
    assert_eq!(r.get_f32_data().unwrap(), vec![3.0, -4.0]);
}

#[test]
fn test_powi_and_map_on_scalar() {
    let x = NdArray::scalar(3.0);
    assert_eq!(powi(&x, 2).item().unwrap(), 9.0);
    let y = map(&x, f64::sqrt);
    assert_relative_eq!(y.item().unwrap(), 3.0f64.sqrt());
}

#[test]
fn test_sum_all() {
    let a = NdArray::new_f64(vec![0.5, 1.5, -1.0], vec![3]).unwrap();
    assert_relative_eq!(sum_all(&a), 1.0);
}
