use std::fmt;

/// Defines the possible element types of an [`NdArray`](crate::array::NdArray).
///
/// This enum allows the engine to handle arrays with different
/// floating-point precisions dynamically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    /// 32-bit floating-point type.
    F32,
    /// 64-bit floating-point type.
    F64,
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DType::F32 => write!(f, "float32"),
            DType::F64 => write!(f, "float64"),
        }
    }
}
