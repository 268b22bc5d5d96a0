// src/array/math.rs
//
// Elementwise arithmetic on raw arrays. Shapes must match exactly; there is
// no broadcasting at this layer.

use std::sync::Arc;

use num_traits::Float;

use crate::array::NdArray;
use crate::buffer::Buffer;
use crate::error::NeuroGradError;

fn zip_map<T: Float>(a: &[T], b: &[T], op: impl Fn(T, T) -> T) -> Vec<T> {
    a.iter().zip(b).map(|(&x, &y)| op(x, y)).collect()
}

fn check_same_shape(a: &NdArray, b: &NdArray, operation: &str) -> Result<(), NeuroGradError> {
    if a.shape != b.shape {
        return Err(NeuroGradError::ShapeMismatch {
            expected: a.shape.clone(),
            actual: b.shape.clone(),
            operation: operation.to_string(),
        });
    }
    Ok(())
}

fn binary_op(
    a: &NdArray,
    b: &NdArray,
    operation: &str,
    op_f32: impl Fn(f32, f32) -> f32,
    op_f64: impl Fn(f64, f64) -> f64,
) -> Result<NdArray, NeuroGradError> {
    check_same_shape(a, b, operation)?;
    let buffer = match (&a.buffer, &b.buffer) {
        (Buffer::F32(x), Buffer::F32(y)) => Buffer::F32(Arc::new(zip_map(x, y, op_f32))),
        (Buffer::F64(x), Buffer::F64(y)) => Buffer::F64(Arc::new(zip_map(x, y, op_f64))),
        (lhs, rhs) => {
            return Err(NeuroGradError::DTypeMismatch {
                expected: lhs.dtype(),
                actual: rhs.dtype(),
                operation: operation.to_string(),
            })
        }
    };
    Ok(NdArray::from_parts(buffer, a.shape.clone()))
}

/// Elementwise `a + b`.
///
/// # Errors
/// `ShapeMismatch` if shapes differ, `DTypeMismatch` if element types differ.
pub fn add(a: &NdArray, b: &NdArray) -> Result<NdArray, NeuroGradError> {
    binary_op(a, b, "add", |x, y| x + y, |x, y| x + y)
}

/// Elementwise `a * b`.
///
/// # Errors
/// `ShapeMismatch` if shapes differ, `DTypeMismatch` if element types differ.
pub fn mul(a: &NdArray, b: &NdArray) -> Result<NdArray, NeuroGradError> {
    binary_op(a, b, "mul", |x, y| x * y, |x, y| x * y)
}

/// Multiplies every element by `scalar`, keeping the DType of `a`.
pub fn mul_scalar(a: &NdArray, scalar: f64) -> NdArray {
    let buffer = match &a.buffer {
        Buffer::F32(x) => {
            let s = scalar as f32;
            Buffer::F32(Arc::new(x.iter().map(|&v| v * s).collect()))
        }
        Buffer::F64(x) => Buffer::F64(Arc::new(x.iter().map(|&v| v * scalar).collect())),
    };
    NdArray::from_parts(buffer, a.shape.clone())
}

/// Raises every element to the integer power `exp`.
pub fn powi(a: &NdArray, exp: i32) -> NdArray {
    let buffer = match &a.buffer {
        Buffer::F32(x) => Buffer::F32(Arc::new(x.iter().map(|v| v.powi(exp)).collect())),
        Buffer::F64(x) => Buffer::F64(Arc::new(x.iter().map(|v| v.powi(exp)).collect())),
    };
    NdArray::from_parts(buffer, a.shape.clone())
}

/// Applies `f` to every element, computing in f64 and storing back in the
/// DType of `a`.
pub fn map(a: &NdArray, f: impl Fn(f64) -> f64) -> NdArray {
    let buffer = match &a.buffer {
        Buffer::F32(x) => Buffer::F32(Arc::new(
            x.iter().map(|&v| f(f64::from(v)) as f32).collect(),
        )),
        Buffer::F64(x) => Buffer::F64(Arc::new(x.iter().map(|&v| f(v)).collect())),
    };
    NdArray::from_parts(buffer, a.shape.clone())
}

/// Sum of all elements, widened to f64.
pub fn sum_all(a: &NdArray) -> f64 {
    match &a.buffer {
        Buffer::F32(x) => x.iter().map(|&v| f64::from(v)).sum(),
        Buffer::F64(x) => x.iter().sum(),
    }
}

#[cfg(test)]
#[path = "math_test.rs"]
mod tests;
