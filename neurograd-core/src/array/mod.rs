// src/array/mod.rs

use std::sync::Arc;

use crate::buffer::Buffer;
use crate::error::NeuroGradError;
use crate::types::DType;

pub mod create;
mod display;
pub mod math;
mod traits;
pub mod utils;

pub use create::{
    full, full_f64, ones, ones_f64, ones_like, rand, rand_seeded, randn, randn_seeded, zeros,
    zeros_dtype, zeros_f64, zeros_like,
};
pub use math::{add, map, mul, mul_scalar, powi, sum_all};

use utils::calculate_strides;

/// Dense, contiguous, row-major CPU array.
///
/// This is the raw value carried by a [`Variable`](crate::Variable) and the
/// currency of [`Function::forward`](crate::Function::forward) and
/// [`Function::backward`](crate::Function::backward). It holds no autograd
/// metadata at all: gradients are plain `NdArray`s too.
///
/// Cloning is cheap, the element buffer is shared through an `Arc`.
/// Arrays are never mutated in place, every operation allocates its result.
#[derive(Clone)]
pub struct NdArray {
    pub(crate) buffer: Buffer,
    pub(crate) shape: Vec<usize>,
    pub(crate) strides: Vec<usize>,
}

impl NdArray {
    /// Creates a new F32 array from row-major data and a shape.
    ///
    /// # Errors
    /// Returns `NeuroGradError::TensorCreationError` if the length of `data_vec` does not match
    /// the total number of elements specified by `shape`.
    pub fn new(data_vec: Vec<f32>, shape: Vec<usize>) -> Result<Self, NeuroGradError> {
        Self::check_len(data_vec.len(), &shape)?;
        Ok(Self::from_parts(Buffer::F32(Arc::new(data_vec)), shape))
    }

    /// Creates a new F64 array from row-major data and a shape.
    ///
    /// # Errors
    /// Returns `NeuroGradError::TensorCreationError` if data length mismatches shape numel.
    pub fn new_f64(data_vec: Vec<f64>, shape: Vec<usize>) -> Result<Self, NeuroGradError> {
        Self::check_len(data_vec.len(), &shape)?;
        Ok(Self::from_parts(Buffer::F64(Arc::new(data_vec)), shape))
    }

    /// Rank-0 F64 array, the equivalent of `np.array(2.0)`.
    pub fn scalar(value: f64) -> Self {
        Self::from_parts(Buffer::F64(Arc::new(vec![value])), vec![])
    }

    /// Rank-0 F32 array.
    pub fn scalar_f32(value: f32) -> Self {
        Self::from_parts(Buffer::F32(Arc::new(vec![value])), vec![])
    }

    fn check_len(data_len: usize, shape: &[usize]) -> Result<(), NeuroGradError> {
        let numel: usize = shape.iter().product();
        if data_len != numel {
            return Err(NeuroGradError::TensorCreationError {
                data_len,
                shape: shape.to_vec(),
            });
        }
        Ok(())
    }

    /// Caller guarantees `buffer.len() == product(shape)`.
    pub(crate) fn from_parts(buffer: Buffer, shape: Vec<usize>) -> Self {
        let strides = calculate_strides(&shape);
        NdArray {
            buffer,
            shape,
            strides,
        }
    }

    pub fn shape(&self) -> Vec<usize> {
        self.shape.clone()
    }

    pub fn strides(&self) -> Vec<usize> {
        self.strides.clone()
    }

    /// Number of dimensions (0 for a scalar).
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Total number of elements. A rank-0 array has exactly one.
    pub fn numel(&self) -> usize {
        self.shape.iter().product()
    }

    pub fn dtype(&self) -> DType {
        self.buffer.dtype()
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    /// Size of the first dimension.
    ///
    /// # Errors
    /// `UnsizedValue` for rank-0 arrays, which have no length.
    pub fn len(&self) -> Result<usize, NeuroGradError> {
        self.shape
            .first()
            .copied()
            .ok_or_else(|| NeuroGradError::UnsizedValue {
                shape: self.shape.clone(),
            })
    }

    /// True when the array holds no elements.
    pub fn is_empty(&self) -> bool {
        self.numel() == 0
    }

    /// Reads the element at `coords`, widened to f64.
    ///
    /// # Errors
    /// `IndexOutOfBounds` if the number of coordinates differs from the rank
    /// or any coordinate exceeds its dimension.
    pub fn at(&self, coords: &[usize]) -> Result<f64, NeuroGradError> {
        if coords.len() != self.shape.len()
            || coords.iter().zip(&self.shape).any(|(&c, &dim)| c >= dim)
        {
            return Err(NeuroGradError::IndexOutOfBounds {
                index: coords.to_vec(),
                shape: self.shape.clone(),
            });
        }
        let offset: usize = coords.iter().zip(&self.strides).map(|(c, s)| c * s).sum();
        Ok(self.buffer.get_f64(offset))
    }

    /// Returns the single element of a one-element array.
    pub fn item(&self) -> Result<f64, NeuroGradError> {
        if self.numel() != 1 {
            return Err(NeuroGradError::UnsupportedOperation(format!(
                "item() requires exactly one element, array has shape {:?}",
                self.shape
            )));
        }
        Ok(self.buffer.get_f64(0))
    }

    /// Copies the elements into a `Vec<f32>`.
    /// Returns an error if the array is not F32.
    pub fn get_f32_data(&self) -> Result<Vec<f32>, NeuroGradError> {
        Ok(self.buffer.try_get_f32()?.to_vec())
    }

    /// Copies the elements into a `Vec<f64>`.
    /// Returns an error if the array is not F64.
    pub fn get_f64_data(&self) -> Result<Vec<f64>, NeuroGradError> {
        Ok(self.buffer.try_get_f64()?.to_vec())
    }

    /// Copies the elements into a `Vec<f64>` whatever the dtype.
    pub fn to_vec_f64(&self) -> Vec<f64> {
        match &self.buffer {
            Buffer::F32(data) => data.iter().map(|&v| f64::from(v)).collect(),
            Buffer::F64(data) => data.to_vec(),
        }
    }

    /// Returns a copy with element `index` (row-major) replaced by `value`.
    /// Used by finite-difference gradient checking.
    pub(crate) fn with_element(&self, index: usize, value: f64) -> Result<NdArray, NeuroGradError> {
        if index >= self.numel() {
            return Err(NeuroGradError::IndexOutOfBounds {
                index: vec![index],
                shape: self.shape.clone(),
            });
        }
        let buffer = match &self.buffer {
            Buffer::F32(data) => {
                let mut copy = data.to_vec();
                copy[index] = value as f32;
                Buffer::F32(Arc::new(copy))
            }
            Buffer::F64(data) => {
                let mut copy = data.to_vec();
                copy[index] = value;
                Buffer::F64(Arc::new(copy))
            }
        };
        Ok(NdArray::from_parts(buffer, self.shape.clone()))
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
