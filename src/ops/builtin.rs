//! Built-in operations.
//!
//! | family | kind | operation |
//! |--------|------|-----------|
//! | 1 | 1 | Main (sink): identity pass-through |
//! | 1 | 2 | Random Vector3 |
//! | 2 | 1-6 | Constants (bool, integer, float, vector2-4) |
//! | 3 | 1-5 | Add, Subtract, Multiply, Modulo, Divide |
//! | 6 | 1 | Parameter read |

use crate::ops::registry::{OpContext, OperationRegistry};
use crate::ops::selector::OpSelector;
use crate::value::Value;
use rand::Rng;

static ABSENT: Value = Value::None;

/// Input at `index`, or an absent value when the action has fewer inputs.
#[inline]
fn input(inputs: &[Value], index: usize) -> &Value {
    inputs.get(index).unwrap_or(&ABSENT)
}

/// Register every built-in operation.
pub fn register_all(registry: &mut OperationRegistry) {
    registry.register(OpSelector::MAIN, "Main", main_passthrough);
    registry.register(OpSelector::RANDOM_VECTOR3, "Random Vector3", random_vector3);

    registry.register(OpSelector::CONST_BOOL, "Bool", literal_passthrough);
    registry.register(OpSelector::CONST_INTEGER, "Integer", literal_passthrough);
    registry.register(OpSelector::CONST_SCALAR, "Float", literal_passthrough);
    registry.register(OpSelector::CONST_VECTOR2, "Vector2", literal_passthrough);
    registry.register(OpSelector::CONST_VECTOR3, "Vector3", literal_passthrough);
    registry.register(OpSelector::CONST_VECTOR4, "Vector4", literal_passthrough);

    registry.register(OpSelector::ADD, "Add", add);
    registry.register(OpSelector::SUBTRACT, "Subtract", subtract);
    registry.register(OpSelector::MULTIPLY, "Multiply", multiply);
    registry.register(OpSelector::MODULO, "Modulo", modulo);
    registry.register(OpSelector::DIVIDE, "Divide", divide);

    registry.register(OpSelector::PARAMETER_READ, "Get Parameter", literal_passthrough);
}

/// Sink node: makes its inputs readable as outputs. Typing happens when the
/// interpreter writes them into the sink's slots.
pub fn main_passthrough(_ctx: &mut OpContext, inputs: &[Value], outputs: &mut Vec<Value>) {
    outputs.extend_from_slice(inputs);
}

/// A fresh random vector with components in `[0, 1)`.
pub fn random_vector3(ctx: &mut OpContext, _inputs: &[Value], outputs: &mut Vec<Value>) {
    let rng = ctx.rng();
    outputs.push(Value::Vector3([rng.gen(), rng.gen(), rng.gen()]));
}

/// Constants and parameter reads: the single literal input, unchanged.
pub fn literal_passthrough(_ctx: &mut OpContext, inputs: &[Value], outputs: &mut Vec<Value>) {
    outputs.push(*input(inputs, 0));
}

fn binary_scalar(
    ctx: &mut OpContext,
    inputs: &[Value],
    outputs: &mut Vec<Value>,
    op: impl FnOnce(f32, f32) -> f32,
) {
    let a: f32 = ctx.coerce(input(inputs, 0));
    let b: f32 = ctx.coerce(input(inputs, 1));
    outputs.push(Value::Scalar(op(a, b)));
}

pub fn add(ctx: &mut OpContext, inputs: &[Value], outputs: &mut Vec<Value>) {
    binary_scalar(ctx, inputs, outputs, |a, b| a + b);
}

pub fn subtract(ctx: &mut OpContext, inputs: &[Value], outputs: &mut Vec<Value>) {
    binary_scalar(ctx, inputs, outputs, |a, b| a - b);
}

pub fn multiply(ctx: &mut OpContext, inputs: &[Value], outputs: &mut Vec<Value>) {
    binary_scalar(ctx, inputs, outputs, |a, b| a * b);
}

/// Floating point remainder; follows IEEE semantics for a zero divisor (NaN).
pub fn modulo(ctx: &mut OpContext, inputs: &[Value], outputs: &mut Vec<Value>) {
    binary_scalar(ctx, inputs, outputs, |a, b| a % b);
}

/// Floating point division; a zero divisor yields an infinity or NaN.
pub fn divide(ctx: &mut OpContext, inputs: &[Value], outputs: &mut Vec<Value>) {
    binary_scalar(ctx, inputs, outputs, |a, b| a / b);
}
