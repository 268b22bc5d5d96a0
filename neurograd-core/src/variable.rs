// src/variable.rs

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use crate::array::{self, NdArray};
use crate::autograd::function::FunctionNode;
use crate::autograd::graph;
use crate::error::NeuroGradError;
use crate::types::DType;

/// Internal state of a graph data node.
///
/// Shared through `Rc<RefCell<VariableData>>` by every [`Variable`] handle
/// pointing at the same node.
pub struct VariableData {
    /// The raw value held by this node.
    pub(crate) data: NdArray,
    /// Optional cosmetic label.
    pub(crate) name: Option<String>,
    /// Accumulated gradient, same shape as `data`, or `None`.
    pub(crate) grad: Option<NdArray>,
    /// The operation node that produced this variable. `None` for leaves.
    ///
    /// The variable owns its creator; the creator refers back to its outputs
    /// through weak handles only, so no reference cycle is formed.
    pub(crate) creator: Option<Rc<FunctionNode>>,
    /// `creator.priority + 1`, or 0 for leaves.
    pub(crate) priority: usize,
}

/// A node of the computation graph wrapping a raw value and its gradient.
///
/// `Variable` is a cheap handle: cloning it aliases the same node, so a
/// gradient written during [`backward`](Variable::backward) is visible from
/// every clone.
pub struct Variable {
    pub(crate) data: Rc<RefCell<VariableData>>,
}

impl Variable {
    /// Creates a leaf variable: no gradient, no creator, priority 0.
    pub fn new(data: NdArray) -> Self {
        Variable::from_data(VariableData {
            data,
            name: None,
            grad: None,
            creator: None,
            priority: 0,
        })
    }

    /// Creates a labelled leaf variable.
    pub fn with_name(data: NdArray, name: impl Into<String>) -> Self {
        let var = Variable::new(data);
        var.set_name(name);
        var
    }

    pub(crate) fn from_data(data: VariableData) -> Self {
        Variable {
            data: Rc::new(RefCell::new(data)),
        }
    }

    /// Borrows the node state immutably.
    ///
    /// Panics if the node is currently mutably borrowed, which the engine
    /// never does across calls into user code.
    pub fn read_data(&self) -> Ref<'_, VariableData> {
        self.data.borrow()
    }

    /// Borrows the node state mutably.
    pub fn write_data(&self) -> RefMut<'_, VariableData> {
        self.data.borrow_mut()
    }

    /// True when both handles point to the same node.
    pub fn ptr_eq(&self, other: &Variable) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
    }

    // --- Value accessors ---

    /// Returns the raw value (cheap clone).
    pub fn data(&self) -> NdArray {
        self.read_data().data.clone()
    }

    /// Alias of [`data`](Variable::data).
    pub fn array(&self) -> NdArray {
        self.data()
    }

    /// Replaces the raw value, leaving graph links and gradient untouched.
    pub fn set_data(&self, data: NdArray) {
        self.write_data().data = data;
    }

    pub fn shape(&self) -> Vec<usize> {
        self.read_data().data.shape()
    }

    pub fn ndim(&self) -> usize {
        self.read_data().data.ndim()
    }

    /// Number of elements.
    pub fn size(&self) -> usize {
        self.read_data().data.numel()
    }

    pub fn dtype(&self) -> DType {
        self.read_data().data.dtype()
    }

    /// Size of the first dimension.
    ///
    /// # Errors
    /// `UnsizedValue` when the value is rank 0.
    pub fn len(&self) -> Result<usize, NeuroGradError> {
        self.read_data().data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read_data().data.is_empty()
    }

    pub fn name(&self) -> Option<String> {
        self.read_data().name.clone()
    }

    pub fn set_name(&self, name: impl Into<String>) {
        self.write_data().name = Some(name.into());
    }

    // --- Autograd accessors ---

    /// Returns a clone of the gradient, if any.
    pub fn grad(&self) -> Option<NdArray> {
        self.read_data().grad.clone()
    }

    /// Overwrites the gradient. Used to seed `backward` with a custom
    /// upstream gradient or by optimizers.
    pub fn set_grad(&self, grad: Option<NdArray>) {
        self.write_data().grad = grad;
    }

    /// Resets the gradient to `None`. Idempotent.
    pub fn clear_gradient(&self) {
        self.write_data().grad = None;
    }

    /// Adds `grad` into the stored gradient, or stores it if none is set.
    ///
    /// # Errors
    /// `ShapeMismatch` if `grad` does not have the shape of the value, and
    /// whatever the elementwise addition reports (e.g. `DTypeMismatch`).
    pub(crate) fn accumulate_grad(&self, grad: NdArray) -> Result<(), NeuroGradError> {
        let mut guard = self.write_data();
        if grad.shape != guard.data.shape {
            return Err(NeuroGradError::ShapeMismatch {
                expected: guard.data.shape(),
                actual: grad.shape(),
                operation: "accumulate_grad".to_string(),
            });
        }
        let new_grad = match guard.grad.take() {
            Some(existing) => array::add(&existing, &grad)?,
            None => grad,
        };
        guard.grad = Some(new_grad);
        Ok(())
    }

    /// The operation node that produced this variable.
    pub fn creator(&self) -> Option<Rc<FunctionNode>> {
        self.read_data().creator.clone()
    }

    /// Depth marker used to order the backward traversal.
    pub fn priority(&self) -> usize {
        self.read_data().priority
    }

    /// True for user-created variables (no creator).
    pub fn is_leaf(&self) -> bool {
        self.read_data().creator.is_none()
    }

    /// Links this variable to the operation that produced it and sets its
    /// priority to `func.priority() + 1`.
    ///
    /// A second call overwrites the previous creator. Each variable is normally
    /// produced exactly once, so this is logged as a warning.
    pub fn set_creator(&self, func: &Rc<FunctionNode>) {
        let mut guard = self.write_data();
        if let Some(previous) = guard.creator.as_ref() {
            if !Rc::ptr_eq(previous, func) {
                log::warn!(
                    "set_creator: replacing creator '{}' with '{}'",
                    previous.name(),
                    func.name()
                );
            }
        }
        guard.creator = Some(Rc::clone(func));
        guard.priority = func.priority() + 1;
    }

    /// Returns a new leaf sharing this variable's value, cut from the graph.
    pub fn detach(&self) -> Variable {
        let guard = self.read_data();
        Variable::from_data(VariableData {
            data: guard.data.clone(),
            name: guard.name.clone(),
            grad: None,
            creator: None,
            priority: 0,
        })
    }

    /// Computes gradients of this variable with respect to every ancestor.
    ///
    /// If no gradient is set yet, it is seeded with ones shaped like the
    /// value. Operation nodes are then processed from the highest priority
    /// down, and each input gradient is accumulated (summed) into its
    /// variable. Unless `retain_gradients` is true, the gradients of
    /// intermediate outputs (including this variable when it is non-leaf)
    /// are cleared once propagated, leaving gradients only on leaves.
    ///
    /// Calling this on a leaf only seeds the gradient.
    ///
    /// # Errors
    /// Any error raised by an operation's backward computation, a gradient
    /// accumulation mismatch, or `MissingGradient` if the graph invariants
    /// were broken.
    pub fn backward(&self, retain_gradients: bool) -> Result<(), NeuroGradError> {
        graph::backward(self, retain_gradients)
    }
}

impl Clone for Variable {
    /// Shallow clone: both handles alias the same node.
    fn clone(&self) -> Self {
        Variable {
            data: Rc::clone(&self.data),
        }
    }
}

impl From<NdArray> for Variable {
    fn from(data: NdArray) -> Self {
        Variable::new(data)
    }
}

impl fmt::Display for Variable {
    /// `variable x(2.)`, or `variable(...)` when unnamed. Continuation lines of
    /// multi-line values are indented under the opening parenthesis.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let guard = match self.data.try_borrow() {
            Ok(guard) => guard,
            Err(_) => return write!(f, "variable(<borrowed>)"),
        };
        let prefix = match guard.name.as_deref() {
            Some(name) => format!("variable {}(", name),
            None => "variable(".to_string(),
        };
        let body = guard
            .data
            .to_string()
            .replace('\n', &format!("\n{}", " ".repeat(prefix.len())));
        write!(f, "{}{})", prefix, body)
    }
}

impl fmt::Debug for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.data.try_borrow() {
            Ok(guard) => write!(
                f,
                "Variable(name={:?}, shape={:?}, dtype={:?}, priority={}, has_grad={}, creator={:?})",
                guard.name,
                guard.data.shape,
                guard.data.dtype(),
                guard.priority,
                guard.grad.is_some(),
                guard.creator.as_ref().map(|c| c.name()),
            ),
            Err(_) => write!(f, "Variable(<borrowed>)"),
        }
    }
}

#[cfg(test)]
#[path = "variable_test.rs"]
mod tests;
