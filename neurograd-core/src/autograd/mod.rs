//! Computation graph machinery: operation nodes, the call protocol that links
//! them to variables, and the backward traversal.

pub mod function;
pub mod grad_check;
pub(crate) mod graph;

pub use function::{call, Function, FunctionNode, Outputs};
pub use grad_check::{check_grad, GradCheckError};
