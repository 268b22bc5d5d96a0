use neurograd_core::{NdArray, Variable};

// Each integration test file is its own crate, so not every helper is used
// everywhere.

/// Routes `log` output through the test harness. Safe to call repeatedly.
#[allow(dead_code)]
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[allow(dead_code)]
pub fn scalar(value: f64) -> Variable {
    Variable::new(NdArray::scalar(value))
}

#[allow(dead_code)]
pub fn named_scalar(value: f64, name: &str) -> Variable {
    Variable::with_name(NdArray::scalar(value), name)
}

#[allow(dead_code)]
pub fn var_f64(data: Vec<f64>, shape: Vec<usize>) -> Variable {
    Variable::new(NdArray::new_f64(data, shape).expect("Test array creation failed"))
}

/// Reads the gradient of `v` as a scalar, panicking if it is absent.
#[allow(dead_code)]
pub fn grad_item(v: &Variable) -> f64 {
    v.grad()
        .expect("variable should hold a gradient")
        .item()
        .expect("gradient should be a single element")
}
