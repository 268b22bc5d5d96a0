use std::sync::Arc;

use crate::error::NeuroGradError;
use crate::types::DType;

/// Typed element storage for an [`NdArray`](crate::array::NdArray).
///
/// The vector is wrapped in an `Arc` so cloning an array (and therefore a
/// gradient or a detached variable) shares the elements instead of copying.
#[derive(Debug, Clone)]
pub enum Buffer {
    /// Buffer holding f32 data.
    F32(Arc<Vec<f32>>),
    /// Buffer holding f64 data.
    F64(Arc<Vec<f64>>),
}

impl Buffer {
    /// Returns the element type stored in this buffer.
    pub fn dtype(&self) -> DType {
        match self {
            Buffer::F32(_) => DType::F32,
            Buffer::F64(_) => DType::F64,
        }
    }

    /// Number of elements in the buffer.
    pub fn len(&self) -> usize {
        match self {
            Buffer::F32(data) => data.len(),
            Buffer::F64(data) => data.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Attempts to get a reference to the underlying `Arc<Vec<f32>>`.
    ///
    /// Returns an error if the buffer is not of type F32.
    pub fn try_get_f32(&self) -> Result<&Arc<Vec<f32>>, NeuroGradError> {
        match self {
            Buffer::F32(data_arc) => Ok(data_arc),
            Buffer::F64(_) => Err(NeuroGradError::DTypeMismatch {
                expected: DType::F32,
                actual: DType::F64,
                operation: "try_get_f32".to_string(),
            }),
        }
    }

    /// Attempts to get a reference to the underlying `Arc<Vec<f64>>`.
    ///
    /// Returns an error if the buffer is not of type F64.
    pub fn try_get_f64(&self) -> Result<&Arc<Vec<f64>>, NeuroGradError> {
        match self {
            Buffer::F64(data_arc) => Ok(data_arc),
            Buffer::F32(_) => Err(NeuroGradError::DTypeMismatch {
                expected: DType::F64,
                actual: DType::F32,
                operation: "try_get_f64".to_string(),
            }),
        }
    }

    /// Reads element `index` widened to f64.
    pub(crate) fn get_f64(&self, index: usize) -> f64 {
        match self {
            Buffer::F32(data) => f64::from(data[index]),
            Buffer::F64(data) => data[index],
        }
    }
}
