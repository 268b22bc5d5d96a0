//! Builds `y = (x^2)^2 + (x^2)^2` and differentiates it.
//!
//! Run with `RUST_LOG=trace` to watch the backward traversal.

use neurograd_core::ops::{add, square};
use neurograd_core::{NdArray, NeuroGradError, Variable};

fn main() -> Result<(), NeuroGradError> {
    env_logger::init();

    let x = Variable::with_name(NdArray::scalar(2.0), "x");
    let t = square(&x)?;
    let y = add(&square(&t)?, &square(&t)?)?;
    println!("{}", x);
    println!("{}", t);
    println!("{}", y);

    y.backward(true)?;
    for (label, v) in [("y", &y), ("t", &t), ("x", &x)] {
        match v.grad() {
            Some(grad) => println!("d{}: {}", label, grad),
            None => println!("d{}: none", label),
        }
    }

    // Gradients accumulate, so reset x before reusing it.
    x.clear_gradient();
    let z = add(&square(&x)?, &x)?;
    z.backward(false)?;
    println!("d(x^2 + x)/dx at 2: {:?}", x.grad());
    Ok(())
}
