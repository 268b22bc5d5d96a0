//! Dynamic computation graph and reverse-mode automatic differentiation.
//!
//! Operations applied to [`Variable`]s run eagerly and, while backprop is
//! enabled (see [`config`]), record the edges needed to replay them backward.
//! [`Variable::backward`] then walks those edges from the highest-priority
//! operation down and accumulates gradients into every ancestor.
//!
//! ```
//! use neurograd_core::{ops, NdArray, Variable};
//!
//! # fn main() -> Result<(), neurograd_core::NeuroGradError> {
//! let x = Variable::with_name(NdArray::scalar(2.0), "x");
//! let t = ops::square(&x)?;
//! let y = ops::add(&ops::square(&t)?, &ops::square(&t)?)?;
//! y.backward(false)?;
//! assert_eq!(y.data().item()?, 32.0);
//! assert_eq!(x.grad().unwrap().item()?, 64.0);
//! # Ok(())
//! # }
//! ```

pub mod array;
pub mod autograd;
pub mod buffer;
pub mod config;
pub mod error;
pub mod ops;
pub mod types;
pub mod variable;

pub use array::NdArray;
pub use autograd::{call, Function, FunctionNode, Outputs};
pub use config::{no_grad, no_grad_scope, using_config, Setting};
pub use error::NeuroGradError;
pub use types::DType;
pub use variable::Variable;
