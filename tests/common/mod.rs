//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

pub mod builders;

use numgraph_rs::ops::{OpContext, OpSelector, OperationRegistry};
use numgraph_rs::Value;
use std::sync::Arc;
use std::time::Duration;

/// Fixed vector returned by the stubbed random operation
pub const STUB_VECTOR3: [f32; 3] = [0.25, 0.5, 0.75];

/// One host frame at roughly 60 fps
pub fn frame() -> Duration {
    Duration::from_micros(16_667)
}

/// Built-in registry with the random operation replaced by a constant
pub fn stub_registry() -> Arc<OperationRegistry> {
    fn fixed_vector3(_ctx: &mut OpContext, _inputs: &[Value], outputs: &mut Vec<Value>) {
        outputs.push(Value::Vector3(STUB_VECTOR3));
    }

    let mut registry = OperationRegistry::with_builtins();
    registry.register(OpSelector::RANDOM_VECTOR3, "Fixed Vector3", fixed_vector3);
    Arc::new(registry)
}

/// Assert two floats are approximately equal
pub fn assert_float_eq(a: f32, b: f32, epsilon: f32) {
    assert!(
        (a - b).abs() < epsilon,
        "Expected {} to be approximately equal to {} (epsilon: {})",
        a,
        b,
        epsilon
    );
}
