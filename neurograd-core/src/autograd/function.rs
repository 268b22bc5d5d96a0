// src/autograd/function.rs

use std::cell::RefCell;
use std::fmt::{self, Debug};
use std::rc::{Rc, Weak};

use crate::array::{self, NdArray};
use crate::config;
use crate::error::NeuroGradError;
use crate::types::DType;
use crate::variable::{Variable, VariableData};

/// A differentiable operation: a pure forward computation paired with its
/// vector-Jacobian product.
///
/// Implementors are small structs, usually unit structs, and never touch
/// [`Variable`]s directly. [`call`] wraps them into a [`FunctionNode`] and
/// takes care of all graph bookkeeping.
pub trait Function: Debug {
    /// Name used in logs and error messages.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Number of inputs the operation accepts, or `None` for variadic ones.
    /// Checked by [`call`] before `forward` runs.
    fn arity(&self) -> Option<usize> {
        None
    }

    /// Computes the outputs from the raw input values.
    ///
    /// Must return at least one array.
    fn forward(&self, xs: &[NdArray]) -> Result<Vec<NdArray>, NeuroGradError>;

    /// Computes the gradient with respect to each input.
    ///
    /// # Arguments
    /// * `xs`: the raw values of the inputs recorded when the node was called.
    /// * `gys`: one upstream gradient per output, in output order.
    ///
    /// # Returns
    /// One gradient per input, in input order, each shaped like its input.
    fn backward(&self, xs: &[NdArray], gys: &[NdArray]) -> Result<Vec<NdArray>, NeuroGradError>;
}

/// Weak handle to an output plus enough metadata to build a zero gradient
/// if the output is gone or unused.
struct OutputSlot {
    var: Weak<RefCell<VariableData>>,
    shape: Vec<usize>,
    dtype: DType,
}

#[derive(Default)]
struct NodeState {
    invoked: bool,
    recorded: bool,
    priority: usize,
    inputs: Vec<Variable>,
    outputs: Vec<OutputSlot>,
}

/// Operation node of the computation graph.
///
/// Holds the boxed [`Function`] together with the edges recorded at call
/// time: strong handles to its inputs, weak handles to its outputs. Edges and
/// priority are only recorded when backprop is enabled; otherwise the node is
/// dropped as soon as [`call`] returns.
pub struct FunctionNode {
    func: Box<dyn Function>,
    state: RefCell<NodeState>,
}

impl FunctionNode {
    /// Wraps `func` into a fresh, not yet invoked node.
    pub fn new(func: impl Function + 'static) -> Rc<FunctionNode> {
        Rc::new(FunctionNode {
            func: Box::new(func),
            state: RefCell::new(NodeState::default()),
        })
    }

    pub fn name(&self) -> &'static str {
        self.func.name()
    }

    /// `max(input.priority)` at call time, 0 if nothing was recorded.
    pub fn priority(&self) -> usize {
        self.state.borrow().priority
    }

    /// True if the node was called with backprop enabled.
    pub fn is_recorded(&self) -> bool {
        self.state.borrow().recorded
    }

    /// The recorded inputs, in call order.
    pub fn inputs(&self) -> Vec<Variable> {
        self.state.borrow().inputs.clone()
    }

    /// The recorded outputs, in output order. `None` marks an output that has
    /// already been dropped.
    pub fn outputs(&self) -> Vec<Option<Variable>> {
        self.state
            .borrow()
            .outputs
            .iter()
            .map(|slot| slot.var.upgrade().map(|data| Variable { data }))
            .collect()
    }

    /// Runs the graph construction protocol.
    ///
    /// 1. Extract the raw input values and run `forward`.
    /// 2. Wrap every result into a new variable.
    /// 3. If backprop is enabled, set this node's priority to the highest input
    ///    priority, link every output to this node and record inputs/outputs.
    ///
    /// A node can be invoked only once.
    pub fn invoke(self: &Rc<Self>, inputs: &[&Variable]) -> Result<Outputs, NeuroGradError> {
        if self.state.borrow().invoked {
            return Err(NeuroGradError::UnsupportedOperation(format!(
                "function node '{}' has already been called",
                self.name()
            )));
        }
        if inputs.is_empty() {
            return Err(NeuroGradError::UnsupportedOperation(format!(
                "'{}' called without inputs",
                self.name()
            )));
        }
        if let Some(expected) = self.func.arity() {
            if inputs.len() != expected {
                return Err(NeuroGradError::ArityMismatch {
                    function: self.name().to_string(),
                    expected,
                    actual: inputs.len(),
                });
            }
        }
        self.state.borrow_mut().invoked = true;

        let xs: Vec<NdArray> = inputs.iter().map(|x| x.data()).collect();
        let ys = self.func.forward(&xs)?;
        if ys.is_empty() {
            return Err(NeuroGradError::UnsupportedOperation(format!(
                "'{}' forward returned no outputs",
                self.name()
            )));
        }
        let outputs: Vec<Variable> = ys.into_iter().map(Variable::new).collect();

        if config::is_backprop_enabled() {
            let priority = inputs.iter().map(|x| x.priority()).max().unwrap_or(0);
            {
                let mut state = self.state.borrow_mut();
                state.recorded = true;
                state.priority = priority;
                state.inputs = inputs.iter().map(|&x| x.clone()).collect();
                state.outputs = outputs
                    .iter()
                    .map(|y| {
                        let guard = y.read_data();
                        OutputSlot {
                            var: Rc::downgrade(&y.data),
                            shape: guard.data.shape(),
                            dtype: guard.data.dtype(),
                        }
                    })
                    .collect();
            }
            for output in &outputs {
                output.set_creator(self);
            }
            log::trace!(
                "recorded '{}' (priority {}, {} input(s), {} output(s))",
                self.name(),
                priority,
                inputs.len(),
                outputs.len()
            );
        }

        Ok(Outputs::from(outputs))
    }

    /// Collects the gradient of every recorded output.
    ///
    /// Outputs that were dropped, or that hold no gradient while a sibling
    /// output does, contribute zeros: no path connects them to the variable
    /// `backward` started from. If no output holds a gradient the graph is
    /// inconsistent and `MissingGradient` is returned.
    pub(crate) fn output_grads(&self) -> Result<Vec<NdArray>, NeuroGradError> {
        let state = self.state.borrow();
        let grads: Vec<Option<NdArray>> = state
            .outputs
            .iter()
            .map(|slot| {
                let data = slot.var.upgrade()?;
                let grad = data.borrow().grad.clone();
                grad
            })
            .collect();
        if let Some(index) = grads.iter().position(Option::is_none) {
            if grads.iter().all(Option::is_none) {
                return Err(NeuroGradError::MissingGradient {
                    function: self.name().to_string(),
                    output_index: index,
                });
            }
        }
        grads
            .into_iter()
            .zip(&state.outputs)
            .map(|(grad, slot)| match grad {
                Some(g) => Ok(g),
                None => array::zeros_dtype(&slot.shape, slot.dtype),
            })
            .collect()
    }

    /// Runs the wrapped function's backward computation on the recorded
    /// inputs.
    ///
    /// # Errors
    /// `BackwardBeforeForward` if the node recorded nothing,
    /// `UnexpectedOutputCount` if `gys` does not hold one gradient per output,
    /// `GradientCountMismatch` if the function returns the wrong number of
    /// gradients, and anything the function itself reports.
    pub fn backward(&self, gys: &[NdArray]) -> Result<Vec<NdArray>, NeuroGradError> {
        let xs: Vec<NdArray> = {
            let state = self.state.borrow();
            if !state.recorded {
                return Err(NeuroGradError::BackwardBeforeForward {
                    function: self.name().to_string(),
                });
            }
            if gys.len() != state.outputs.len() {
                return Err(NeuroGradError::UnexpectedOutputCount {
                    expected: state.outputs.len(),
                    actual: gys.len(),
                });
            }
            state.inputs.iter().map(|x| x.data()).collect()
        };
        let gxs = self.func.backward(&xs, gys)?;
        if gxs.len() != xs.len() {
            return Err(NeuroGradError::GradientCountMismatch {
                function: self.name().to_string(),
                expected: xs.len(),
                actual: gxs.len(),
            });
        }
        Ok(gxs)
    }
}

impl Drop for FunctionNode {
    // Tears down the upstream graph iteratively; the default drop glue
    // recurses once per operation and overflows the stack on long chains.
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.state.get_mut().inputs);
        while let Some(var) = pending.pop() {
            // Nodes still referenced elsewhere are only released, not walked.
            let Ok(cell) = Rc::try_unwrap(var.data) else {
                continue;
            };
            let Some(creator) = cell.into_inner().creator else {
                continue;
            };
            if let Ok(mut node) = Rc::try_unwrap(creator) {
                pending.append(&mut node.state.get_mut().inputs);
            }
        }
    }
}

impl Debug for FunctionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.state.try_borrow() {
            Ok(state) => f
                .debug_struct("FunctionNode")
                .field("func", &self.func)
                .field("priority", &state.priority)
                .field("recorded", &state.recorded)
                .field("inputs", &state.inputs.len())
                .field("outputs", &state.outputs.len())
                .finish(),
            Err(_) => write!(f, "FunctionNode({:?}, <borrowed>)", self.func),
        }
    }
}

/// Result of calling a function: one variable, or several for multi-output
/// operations.
#[derive(Debug, Clone)]
pub enum Outputs {
    Single(Variable),
    Multiple(Vec<Variable>),
}

impl Outputs {
    /// Returns the only output.
    ///
    /// # Errors
    /// `UnexpectedOutputCount` if the function produced several outputs.
    pub fn into_single(self) -> Result<Variable, NeuroGradError> {
        match self {
            Outputs::Single(var) => Ok(var),
            Outputs::Multiple(vars) => Err(NeuroGradError::UnexpectedOutputCount {
                expected: 1,
                actual: vars.len(),
            }),
        }
    }

    pub fn into_vec(self) -> Vec<Variable> {
        match self {
            Outputs::Single(var) => vec![var],
            Outputs::Multiple(vars) => vars,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Outputs::Single(_) => 1,
            Outputs::Multiple(vars) => vars.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Vec<Variable>> for Outputs {
    fn from(mut vars: Vec<Variable>) -> Self {
        if vars.len() == 1 {
            if let Some(var) = vars.pop() {
                return Outputs::Single(var);
            }
        }
        Outputs::Multiple(vars)
    }
}

/// Creates a node for `func` and invokes it on `inputs`.
///
/// This is what the module-level wrappers such as
/// [`square`](crate::ops::square) are built on.
pub fn call(func: impl Function + 'static, inputs: &[&Variable]) -> Result<Outputs, NeuroGradError> {
    FunctionNode::new(func).invoke(inputs)
}

#[cfg(test)]
#[path = "function_test.rs"]
mod tests;
