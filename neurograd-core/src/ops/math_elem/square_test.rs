use super::*;
use crate::autograd::check_grad;
use crate::autograd::FunctionNode;
use approx::assert_relative_eq;

#[test]
fn test_square_forward_f32() -> Result<(), NeuroGradError> {
    let x = Variable::new(NdArray::new(vec![1.0, -2.0, 3.0], vec![3])?);
    let y = square(&x)?;
    assert_eq!(y.data().get_f32_data()?, vec![1.0, 4.0, 9.0]);
    assert_eq!(y.dtype(), crate::types::DType::F32);
    Ok(())
}

#[test]
fn test_square_backward_scalar() -> Result<(), NeuroGradError> {
    let x = Variable::new(NdArray::scalar(3.0));
    let y = square(&x)?;
    y.backward(false)?;
    assert_relative_eq!(x.grad().unwrap().item()?, 6.0);
    Ok(())
}

#[test]
fn test_square_backward_scales_upstream() -> Result<(), NeuroGradError> {
    let x = Variable::new(NdArray::new_f64(vec![1.0, 2.0], vec![2])?);
    let y = square(&x)?;
    y.set_grad(Some(NdArray::new_f64(vec![10.0, 0.5], vec![2])?));
    y.backward(false)?;
    assert_eq!(x.grad().unwrap().get_f64_data()?, vec![20.0, 2.0]);
    Ok(())
}

#[test]
fn test_square_arity_checked() {
    let a = Variable::new(NdArray::scalar(1.0));
    let b = Variable::new(NdArray::scalar(2.0));
    let err = crate::autograd::call(SquareOp, &[&a, &b]).unwrap_err();
    assert_eq!(
        err,
        NeuroGradError::ArityMismatch {
            function: "Square".to_string(),
            expected: 1,
            actual: 2,
        }
    );
}

#[test]
fn test_square_backward_before_forward() {
    let node = FunctionNode::new(SquareOp);
    let gy = NdArray::scalar(1.0);
    assert_eq!(
        node.backward(&[gy]).unwrap_err(),
        NeuroGradError::BackwardBeforeForward {
            function: "Square".to_string()
        }
    );
}

#[test]
fn test_square_grad_check() {
    let x = crate::array::randn_seeded(&[3, 2], 11).unwrap();
    let result = check_grad(|vars: &[Variable]| square(&vars[0]), &[x], 1e-6, 1e-5);
    assert!(result.is_ok(), "Grad check failed: {:?}", result.err());
}
