// src/array/display.rs
use std::fmt;

use num_traits::Float;

use crate::array::NdArray;
use crate::buffer::Buffer;

/// Formats one element the way NumPy prints floats: integral values keep a
/// trailing dot (`2.`), everything else uses the shortest round-trip form.
fn format_element<T: Float + fmt::Display>(v: T) -> String {
    if v.is_nan() {
        "nan".to_string()
    } else if v.is_infinite() {
        let text = if v > T::zero() { "inf" } else { "-inf" };
        text.to_string()
    } else if v.fract() == T::zero() && v.abs().to_f64().map_or(false, |a| a < 1e16) {
        format!("{:.0}.", v)
    } else {
        format!("{}", v)
    }
}

fn format_nested(elems: &[String], shape: &[usize], depth: usize, out: &mut String) {
    match shape.len() {
        0 => out.push_str(&elems[0]),
        1 => {
            out.push('[');
            out.push_str(&elems.join(" "));
            out.push(']');
        }
        rank => {
            let chunk: usize = shape[1..].iter().product();
            out.push('[');
            for i in 0..shape[0] {
                if i > 0 {
                    out.push_str(&"\n".repeat(rank - 1));
                    out.push_str(&" ".repeat(depth + 1));
                }
                format_nested(&elems[i * chunk..(i + 1) * chunk], &shape[1..], depth + 1, out);
            }
            out.push(']');
        }
    }
}

impl fmt::Display for NdArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut elems: Vec<String> = match &self.buffer {
            Buffer::F32(data) => data.iter().map(|&v| format_element(v)).collect(),
            Buffer::F64(data) => data.iter().map(|&v| format_element(v)).collect(),
        };
        // Right-align columns like NumPy.
        let width = elems.iter().map(String::len).max().unwrap_or(0);
        for e in elems.iter_mut() {
            *e = format!("{:>width$}", e, width = width);
        }
        let mut out = String::new();
        format_nested(&elems, &self.shape, 0, &mut out);
        f.write_str(&out)
    }
}

impl fmt::Debug for NdArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "NdArray(shape={:?}, dtype={:?}, data={})",
            self.shape, self.buffer.dtype(), self
        )
    }
}
