// src/array/utils.rs

/// Calculates the contiguous (row-major) strides for a given shape.
///
/// Strides represent the number of elements to skip in the underlying flat buffer
/// to move one step along each dimension.
/// For a shape `[d0, d1, ..., dn]`, the strides are `[s0, s1, ..., sn]` where
/// `sn = 1` and `si = s(i+1) * d(i+1)`.
///
/// # Example
/// ```
/// use neurograd_core::array::utils::calculate_strides;
/// assert_eq!(calculate_strides(&[2, 3, 4]), vec![12, 4, 1]);
/// assert_eq!(calculate_strides(&[]), Vec::<usize>::new());
/// ```
pub fn calculate_strides(shape: &[usize]) -> Vec<usize> {
    if shape.is_empty() {
        return vec![];
    }
    let rank = shape.len();
    let mut strides = vec![1; rank];
    for i in (0..rank - 1).rev() {
        strides[i] = strides[i + 1] * shape[i + 1];
    }
    strides
}

