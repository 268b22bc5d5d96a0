// neurograd-core/src/ops/arithmetic/add.rs

use crate::array::{self, NdArray};
use crate::autograd::{call, Function};
use crate::error::NeuroGradError;
use crate::variable::Variable;

/// Element-wise addition \( y = x_0 + x_1 \).
///
/// Both inputs must have the same shape and DType; there is no broadcasting.
#[derive(Debug, Default, Clone, Copy)]
pub struct AddOp;

impl Function for AddOp {
    fn name(&self) -> &'static str {
        "Add"
    }

    fn arity(&self) -> Option<usize> {
        Some(2)
    }

    fn forward(&self, xs: &[NdArray]) -> Result<Vec<NdArray>, NeuroGradError> {
        Ok(vec![array::add(&xs[0], &xs[1])?])
    }

    /// \( \frac{dL}{dx_0} = \frac{dL}{dx_1} = \frac{dL}{dy} \): the upstream
    /// gradient is passed through unchanged to both inputs.
    fn backward(&self, _xs: &[NdArray], gys: &[NdArray]) -> Result<Vec<NdArray>, NeuroGradError> {
        let gy = &gys[0];
        Ok(vec![gy.clone(), gy.clone()])
    }
}

/// Adds two variables element-wise, recording the operation when backprop is
/// enabled.
///
/// # Errors
/// `ShapeMismatch` or `DTypeMismatch` from the array layer.
pub fn add(x0: &Variable, x1: &Variable) -> Result<Variable, NeuroGradError> {
    call(AddOp, &[x0, x1])?.into_single()
}

#[cfg(test)]
#[path = "add_test.rs"]
mod tests;
