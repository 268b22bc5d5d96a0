pub mod square;

pub use square::{square, SquareOp};
