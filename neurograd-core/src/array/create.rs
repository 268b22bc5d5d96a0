// src/array/create.rs

use crate::array::NdArray;
use crate::error::NeuroGradError;
use crate::types::DType;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};

/// Creates a new F32 array filled with zeros with the specified shape.
pub fn zeros(shape: &[usize]) -> Result<NdArray, NeuroGradError> {
    full(shape, 0.0)
}

/// Creates a new F64 array filled with zeros with the specified shape.
pub fn zeros_f64(shape: &[usize]) -> Result<NdArray, NeuroGradError> {
    full_f64(shape, 0.0)
}

/// Creates a new F32 array filled with ones with the specified shape.
pub fn ones(shape: &[usize]) -> Result<NdArray, NeuroGradError> {
    full(shape, 1.0)
}

/// Creates a new F64 array filled with ones with the specified shape.
pub fn ones_f64(shape: &[usize]) -> Result<NdArray, NeuroGradError> {
    full_f64(shape, 1.0)
}

/// Creates a new F32 array filled with `value`.
pub fn full(shape: &[usize], value: f32) -> Result<NdArray, NeuroGradError> {
    let numel = shape.iter().product();
    NdArray::new(vec![value; numel], shape.to_vec())
}

/// Creates a new F64 array filled with `value`.
pub fn full_f64(shape: &[usize], value: f64) -> Result<NdArray, NeuroGradError> {
    let numel = shape.iter().product();
    NdArray::new_f64(vec![value; numel], shape.to_vec())
}

/// Creates an array of zeros with the same shape and DType as `array`.
pub fn zeros_like(array: &NdArray) -> Result<NdArray, NeuroGradError> {
    zeros_dtype(&array.shape, array.dtype())
}

/// Creates an array of ones with the same shape and DType as `array`.
///
/// This is the seed gradient used by [`Variable::backward`](crate::Variable::backward).
pub fn ones_like(array: &NdArray) -> Result<NdArray, NeuroGradError> {
    match array.dtype() {
        DType::F32 => ones(&array.shape),
        DType::F64 => ones_f64(&array.shape),
    }
}

/// Creates an array of zeros with an explicit DType.
pub fn zeros_dtype(shape: &[usize], dtype: DType) -> Result<NdArray, NeuroGradError> {
    match dtype {
        DType::F32 => zeros(shape),
        DType::F64 => zeros_f64(shape),
    }
}

/// F64 array with elements drawn uniformly from `[0, 1)`.
pub fn rand(shape: &[usize]) -> Result<NdArray, NeuroGradError> {
    let numel = shape.iter().product();
    let mut rng = rand::thread_rng();
    let data_vec: Vec<f64> = (0..numel).map(|_| rng.gen::<f64>()).collect();
    NdArray::new_f64(data_vec, shape.to_vec())
}

/// Same as [`rand`], reproducible from `seed`.
pub fn rand_seeded(shape: &[usize], seed: u64) -> Result<NdArray, NeuroGradError> {
    let numel = shape.iter().product();
    let mut rng = StdRng::seed_from_u64(seed);
    let data_vec: Vec<f64> = (0..numel).map(|_| rng.gen::<f64>()).collect();
    NdArray::new_f64(data_vec, shape.to_vec())
}

/// F64 array with elements drawn from the standard normal distribution.
pub fn randn(shape: &[usize]) -> Result<NdArray, NeuroGradError> {
    let numel = shape.iter().product();
    let mut rng = rand::thread_rng();
    let data_vec: Vec<f64> = (0..numel)
        .map(|_| StandardNormal.sample(&mut rng))
        .collect();
    NdArray::new_f64(data_vec, shape.to_vec())
}

/// Same as [`randn`], reproducible from `seed`.
pub fn randn_seeded(shape: &[usize], seed: u64) -> Result<NdArray, NeuroGradError> {
    let numel = shape.iter().product();
    let mut rng = StdRng::seed_from_u64(seed);
    let data_vec: Vec<f64> = (0..numel)
        .map(|_| StandardNormal.sample(&mut rng))
        .collect();
    NdArray::new_f64(data_vec, shape.to_vec())
}

#[cfg(test)]
#[path = "create_test.rs"]
mod tests;
