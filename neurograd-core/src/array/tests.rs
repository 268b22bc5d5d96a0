use super::*;
use approx::assert_relative_eq;

#[test]
fn test_new_length_mismatch() {
    let err = NdArray::new(vec![1.0, 2.0, 3.0], vec![2, 2]).unwrap_err();
    assert_eq!(
        err,
        NeuroGradError::TensorCreationError {
            data_len: 3,
            shape: vec![2, 2]
        }
    );
}

#[test]
fn test_projections_rank_0_to_3() {
    let cases: Vec<(Vec<usize>, usize)> = vec![
        (vec![], 1),
        (vec![4], 4),
        (vec![2, 3], 6),
        (vec![2, 3, 4], 24),
    ];
    for (shape, numel) in cases {
        let a = NdArray::new_f64(vec![0.5; numel], shape.clone()).unwrap();
        assert_eq!(a.shape(), shape);
        assert_eq!(a.ndim(), shape.len());
        assert_eq!(a.numel(), numel);
        assert_eq!(a.dtype(), DType::F64);
    }
}

#[test]
fn test_strides_and_at() {
    let a = NdArray::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]).unwrap();
    assert_eq!(a.strides(), vec![3, 1]);
    assert_eq!(a.at(&[0, 0]).unwrap(), 1.0);
    assert_eq!(a.at(&[0, 2]).unwrap(), 3.0);
    assert_eq!(a.at(&[1, 0]).unwrap(), 4.0);
    assert_eq!(a.at(&[1, 2]).unwrap(), 6.0);
    assert!(matches!(
        a.at(&[2, 0]),
        Err(NeuroGradError::IndexOutOfBounds { .. })
    ));
    assert!(a.at(&[0]).is_err());
}

#[test]
fn test_len_and_unsized_scalar() {
    let a = NdArray::new(vec![0.0; 6], vec![3, 2]).unwrap();
    assert_eq!(a.len().unwrap(), 3);
    let s = NdArray::scalar(1.0);
    assert_eq!(
        s.len().unwrap_err(),
        NeuroGradError::UnsizedValue { shape: vec![] }
    );
}

#[test]
fn test_item() {
    assert_eq!(NdArray::scalar_f32(2.5).item().unwrap(), 2.5);
    assert_eq!(NdArray::new(vec![4.0], vec![1, 1]).unwrap().item().unwrap(), 4.0);
    assert!(NdArray::new(vec![1.0, 2.0], vec![2]).unwrap().item().is_err());
}

#[test]
fn test_typed_data_access() {
    let a = NdArray::new(vec![1.0, 2.0], vec![2]).unwrap();
    assert_eq!(a.get_f32_data().unwrap(), vec![1.0, 2.0]);
    assert!(matches!(
        a.get_f64_data(),
        Err(NeuroGradError::DTypeMismatch { .. })
    ));
    assert_eq!(a.to_vec_f64(), vec![1.0, 2.0]);
}

#[test]
fn test_with_element_copies() {
    let a = NdArray::new_f64(vec![1.0, 2.0, 3.0], vec![3]).unwrap();
    let b = a.with_element(1, 10.0).unwrap();
    assert_eq!(a.get_f64_data().unwrap(), vec![1.0, 2.0, 3.0]);
    assert_eq!(b.get_f64_data().unwrap(), vec![1.0, 10.0, 3.0]);
    assert!(a.with_element(3, 0.0).is_err());
}

#[test]
fn test_equality() {
    let a = NdArray::new(vec![1.0, 2.0], vec![2]).unwrap();
    let b = NdArray::new(vec![1.0, 2.0], vec![2]).unwrap();
    let c = NdArray::new(vec![1.0, 2.0], vec![1, 2]).unwrap();
    let d = NdArray::new_f64(vec![1.0, 2.0], vec![2]).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_ne!(a, d);
}

#[test]
fn test_relative_eq() {
    let a = NdArray::new_f64(vec![0.1 + 0.2, 1.0], vec![2]).unwrap();
    let b = NdArray::new_f64(vec![0.3, 1.0], vec![2]).unwrap();
    assert_ne!(a, b);
    assert_relative_eq!(a, b);
}

#[test]
fn test_display_scalar() {
    assert_eq!(NdArray::scalar(2.0).to_string(), "2.");
    assert_eq!(NdArray::scalar(0.5).to_string(), "0.5");
    assert_eq!(NdArray::scalar(-3.0).to_string(), "-3.");
    assert_eq!(NdArray::scalar_f32(0.1).to_string(), "0.1");
}

#[test]
fn test_display_matrix() {
    let a = NdArray::new_f64(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]).unwrap();
    assert_eq!(a.to_string(), "[[1. 2. 3.]\n [4. 5. 6.]]");
}

#[test]
fn test_display_alignment_and_rank3() {
    let v = NdArray::new_f64(vec![1.0, -2.0], vec![2]).unwrap();
    assert_eq!(v.to_string(), "[ 1. -2.]");

    let t = NdArray::new_f64((0..8).map(f64::from).collect(), vec![2, 2, 2]).unwrap();
    assert_eq!(
        t.to_string(),
        "[[[0. 1.]\n  [2. 3.]]\n\n [[4. 5.]\n  [6. 7.]]]"
    );
}
