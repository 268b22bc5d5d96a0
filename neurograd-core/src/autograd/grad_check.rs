use approx::relative_eq;
use thiserror::Error;

use crate::array::{self, NdArray};
use crate::config;
use crate::error::NeuroGradError;
use crate::variable::Variable;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed for input {input_index}, element {element_index}: analytical {analytical} != numerical {numerical} (difference {difference})")]
    GradientMismatch {
        input_index: usize,
        element_index: usize,
        analytical: f64,
        numerical: f64,
        difference: f64,
    },

    #[error("Forward function execution failed during gradient check: {0}")]
    ForwardPassError(NeuroGradError),

    #[error("Backward pass execution failed during gradient check: {0}")]
    BackwardPassError(NeuroGradError),

    #[error("Input {input_index} has no gradient after the backward pass")]
    MissingAnalyticalGrad { input_index: usize },

    #[error("Numerical gradient is NaN or infinite for input {input_index}, element {element_index} (loss+ {loss_plus}, loss- {loss_minus})")]
    NumericalGradNaNOrInfinite {
        input_index: usize,
        element_index: usize,
        loss_plus: f64,
        loss_minus: f64,
    },

    #[error("Array error during intermediate calculation: {0}")]
    TensorError(NeuroGradError),
}

impl From<NeuroGradError> for GradCheckError {
    fn from(err: NeuroGradError) -> Self {
        GradCheckError::TensorError(err)
    }
}

/// Evaluates `sum(func(inputs))` without recording a graph.
fn evaluate_loss<F>(func: &F, inputs: &[NdArray]) -> Result<f64, GradCheckError>
where
    F: Fn(&[Variable]) -> Result<Variable, NeuroGradError>,
{
    config::no_grad_scope(|| {
        let vars: Vec<Variable> = inputs.iter().cloned().map(Variable::new).collect();
        let output = func(&vars).map_err(GradCheckError::ForwardPassError)?;
        Ok(array::sum_all(&output.data()))
    })
}

/// Checks analytical gradients against numerical gradients using central
/// finite differences.
///
/// The scalar being differentiated is the sum of all elements of
/// `func(inputs)`, which matches the all-ones seed `backward` uses. Use F64
/// inputs: with F32 the finite differences are dominated by rounding.
///
/// An element passes when the analytical and numerical values are within
/// `tolerance`, absolutely or relatively.
pub fn check_grad<F>(
    func: F,
    inputs: &[NdArray],
    epsilon: f64,
    tolerance: f64,
) -> Result<(), GradCheckError>
where
    F: Fn(&[Variable]) -> Result<Variable, NeuroGradError>,
{
    // --- Analytical gradients ---
    let vars: Vec<Variable> = inputs.iter().cloned().map(Variable::new).collect();
    let output = func(&vars).map_err(GradCheckError::ForwardPassError)?;
    output
        .backward(false)
        .map_err(GradCheckError::BackwardPassError)?;

    for (input_index, (var, input)) in vars.iter().zip(inputs).enumerate() {
        let analytical = var
            .grad()
            .ok_or(GradCheckError::MissingAnalyticalGrad { input_index })?
            .to_vec_f64();

        // --- Numerical gradients ---
        let base = input.to_vec_f64();
        for (element_index, &value) in base.iter().enumerate() {
            let mut perturbed = inputs.to_vec();

            perturbed[input_index] = input.with_element(element_index, value + epsilon)?;
            let loss_plus = evaluate_loss(&func, &perturbed)?;
            perturbed[input_index] = input.with_element(element_index, value - epsilon)?;
            let loss_minus = evaluate_loss(&func, &perturbed)?;

            let numerical = (loss_plus - loss_minus) / (2.0 * epsilon);
            if !numerical.is_finite() {
                return Err(GradCheckError::NumericalGradNaNOrInfinite {
                    input_index,
                    element_index,
                    loss_plus,
                    loss_minus,
                });
            }

            let analytical_value = analytical[element_index];
            if !relative_eq!(
                analytical_value,
                numerical,
                epsilon = tolerance,
                max_relative = tolerance
            ) {
                return Err(GradCheckError::GradientMismatch {
                    input_index,
                    element_index,
                    analytical: analytical_value,
                    numerical,
                    difference: (analytical_value - numerical).abs(),
                });
            }
        }
    }
    log::debug!("check_grad: {} input(s) passed", inputs.len());
    Ok(())
}

#[cfg(test)]
#[path = "grad_check_test.rs"]
mod tests;
