// src/array/traits.rs

use approx::{AbsDiffEq, RelativeEq};

use crate::array::NdArray;
use crate::buffer::Buffer;

impl PartialEq for NdArray {
    /// Two arrays are equal when dtype, shape and every element match.
    fn eq(&self, other: &Self) -> bool {
        if self.shape != other.shape {
            return false;
        }
        match (&self.buffer, &other.buffer) {
            (Buffer::F32(a), Buffer::F32(b)) => a == b,
            (Buffer::F64(a), Buffer::F64(b)) => a == b,
            _ => false,
        }
    }
}

impl AbsDiffEq for NdArray {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    // Elements are compared in f64; dtypes must still agree.
    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.dtype() == other.dtype()
            && self.shape == other.shape
            && self
                .to_vec_f64()
                .iter()
                .zip(other.to_vec_f64().iter())
                .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl RelativeEq for NdArray {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.dtype() == other.dtype()
            && self.shape == other.shape
            && self
                .to_vec_f64()
                .iter()
                .zip(other.to_vec_f64().iter())
                .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}
