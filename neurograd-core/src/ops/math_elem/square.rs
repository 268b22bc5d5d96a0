// neurograd-core/src/ops/math_elem/square.rs

use crate::array::{self, NdArray};
use crate::autograd::{call, Function};
use crate::error::NeuroGradError;
use crate::variable::Variable;

/// Element-wise square \( y = x^2 \).
#[derive(Debug, Default, Clone, Copy)]
pub struct SquareOp;

impl Function for SquareOp {
    fn name(&self) -> &'static str {
        "Square"
    }

    fn arity(&self) -> Option<usize> {
        Some(1)
    }

    fn forward(&self, xs: &[NdArray]) -> Result<Vec<NdArray>, NeuroGradError> {
        Ok(vec![array::powi(&xs[0], 2)])
    }

    /// Using \( \frac{dy}{dx} = 2x \), the gradient is
    /// \\[ \frac{dL}{dx} = 2x \cdot \frac{dL}{dy} \\]
    /// evaluated at the input value recorded during the forward call.
    fn backward(&self, xs: &[NdArray], gys: &[NdArray]) -> Result<Vec<NdArray>, NeuroGradError> {
        let two_x = array::mul_scalar(&xs[0], 2.0);
        Ok(vec![array::mul(&two_x, &gys[0])?])
    }
}

/// Squares a variable element-wise, recording the operation when backprop is
/// enabled.
pub fn square(x: &Variable) -> Result<Variable, NeuroGradError> {
    call(SquareOp, &[x])?.into_single()
}

#[cfg(test)]
#[path = "square_test.rs"]
mod tests;
