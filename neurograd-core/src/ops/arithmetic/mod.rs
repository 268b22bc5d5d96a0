pub mod add;

pub use add::{add, AddOp};
