//! Concrete differentiable operations and their module-level wrappers.

pub mod arithmetic;
pub mod math_elem;

pub use arithmetic::{add, AddOp};
pub use math_elem::{square, SquareOp};
