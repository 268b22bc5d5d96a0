use super::*;
use crate::autograd::check_grad;
use crate::config;
use approx::assert_relative_eq;

fn var_f64(data: Vec<f64>, shape: Vec<usize>) -> Variable {
    Variable::new(NdArray::new_f64(data, shape).expect("Failed to create test array"))
}

#[test]
fn test_add_forward() -> Result<(), NeuroGradError> {
    let a = var_f64(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]);
    let b = var_f64(vec![5.0, 6.0, 7.0, 8.0], vec![2, 2]);
    let c = add(&a, &b)?;
    assert_eq!(c.shape(), vec![2, 2]);
    assert_eq!(c.data().get_f64_data()?, vec![6.0, 8.0, 10.0, 12.0]);
    Ok(())
}

#[test]
fn test_add_records_graph() -> Result<(), NeuroGradError> {
    let a = var_f64(vec![1.0], vec![1]);
    let b = var_f64(vec![2.0], vec![1]);
    let c = add(&a, &b)?;
    let creator = c.creator().expect("add output should have a creator");
    assert_eq!(creator.name(), "Add");
    assert_eq!(creator.priority(), 0);
    assert_eq!(c.priority(), 1);
    let inputs = creator.inputs();
    assert_eq!(inputs.len(), 2);
    assert!(inputs[0].ptr_eq(&a));
    assert!(inputs[1].ptr_eq(&b));
    Ok(())
}

#[test]
fn test_add_backward_passes_gradient_through() -> Result<(), NeuroGradError> {
    let a = var_f64(vec![1.0, -2.0], vec![2]);
    let b = var_f64(vec![3.0, 4.0], vec![2]);
    let c = add(&a, &b)?;
    c.set_grad(Some(NdArray::new_f64(vec![0.5, -1.5], vec![2])?));
    c.backward(false)?;
    assert_eq!(a.grad().unwrap().get_f64_data()?, vec![0.5, -1.5]);
    assert_eq!(b.grad().unwrap().get_f64_data()?, vec![0.5, -1.5]);
    Ok(())
}

#[test]
fn test_add_same_input_twice_accumulates() -> Result<(), NeuroGradError> {
    let x = var_f64(vec![3.0], vec![]);
    let y = add(&x, &x)?;
    y.backward(false)?;
    assert_relative_eq!(x.grad().unwrap().item()?, 2.0);
    Ok(())
}

#[test]
fn test_add_shape_mismatch_propagates() {
    let a = var_f64(vec![1.0, 2.0], vec![2]);
    let b = var_f64(vec![1.0, 2.0, 3.0], vec![3]);
    assert!(matches!(
        add(&a, &b),
        Err(NeuroGradError::ShapeMismatch { .. })
    ));
}

#[test]
fn test_add_without_backprop_has_no_creator() -> Result<(), NeuroGradError> {
    let a = var_f64(vec![1.0], vec![1]);
    let b = var_f64(vec![2.0], vec![1]);
    let c = config::no_grad_scope(|| add(&a, &b))?;
    assert!(c.creator().is_none());
    assert_eq!(c.priority(), 0);
    Ok(())
}

#[test]
fn test_add_grad_check() {
    let a = crate::array::randn_seeded(&[2, 3], 1).unwrap();
    let b = crate::array::randn_seeded(&[2, 3], 2).unwrap();
    let result = check_grad(|vars: &[Variable]| add(&vars[0], &vars[1]), &[a, b], 1e-6, 1e-6);
    assert!(result.is_ok(), "Grad check failed: {:?}", result.err());
}
