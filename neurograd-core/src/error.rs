use crate::types::DType;
use thiserror::Error;

/// Custom error type for the NeuroGrad engine.
#[derive(Error, Debug, PartialEq, Clone)] // PartialEq for easier testing
pub enum NeuroGradError {
    #[error("Shape mismatch: expected {expected:?}, got {actual:?} during operation {operation}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
        operation: String,
    },

    #[error("DType mismatch: expected {expected:?}, got {actual:?} during operation {operation}")]
    DTypeMismatch {
        expected: DType,
        actual: DType,
        operation: String,
    },

    #[error("Array creation error: data length {data_len} does not match shape {shape:?}")]
    TensorCreationError { data_len: usize, shape: Vec<usize> },

    #[error("Index out of bounds: index {index:?} for shape {shape:?}")]
    IndexOutOfBounds {
        index: Vec<usize>,
        shape: Vec<usize>,
    },

    #[error("Value of shape {shape:?} has no length (rank 0)")]
    UnsizedValue { shape: Vec<usize> },

    #[error("Output {output_index} of '{function}' has no gradient when its node was dequeued")]
    MissingGradient {
        function: String,
        output_index: usize,
    },

    #[error("'{function}' expects {expected} input(s), got {actual}")]
    ArityMismatch {
        function: String,
        expected: usize,
        actual: usize,
    },

    #[error("'{function}' backward returned {actual} gradients, expected {expected}")]
    GradientCountMismatch {
        function: String,
        expected: usize,
        actual: usize,
    },

    #[error("backward called on '{function}' before any inputs were recorded")]
    BackwardBeforeForward { function: String },

    #[error("Expected {expected} output(s), got {actual}")]
    UnexpectedOutputCount { expected: usize, actual: usize },

    #[error("Unknown setting: {0}")]
    UnknownSetting(String),

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}
