//! Runs the same computation with and without graph recording.

use neurograd_core::array::randn_seeded;
use neurograd_core::ops::{add, square};
use neurograd_core::{config, no_grad, NeuroGradError, Variable};

fn polynomial(x: &Variable) -> Result<Variable, NeuroGradError> {
    let x2 = square(x)?;
    add(&square(&x2)?, &x2)
}

fn main() -> Result<(), NeuroGradError> {
    env_logger::init();

    let x = Variable::with_name(randn_seeded(&[2, 3], 42)?, "x");

    let y = polynomial(&x)?;
    println!("training:  priority={} leaf={}", y.priority(), y.is_leaf());

    {
        let _guard = no_grad();
        let y = polynomial(&x)?;
        println!("inference: priority={} leaf={}", y.priority(), y.is_leaf());
        println!("{}", y);
    }

    println!("backprop enabled again: {}", config::is_backprop_enabled());
    y.backward(false)?;
    if let Some(grad) = x.grad() {
        println!("dx:\n{}", grad);
    }
    Ok(())
}
