//! Action list interpreter.
//!
//! One pass:
//! 1. Clear the slot array.
//! 2. Execute actions in list order.
//! 3. Coerce each produced value to its output type and write it to its slot.
//!
//! The main node's action is last; its output slots hold the program outputs.

use crate::compiler::{ActionInput, CompiledProgram};
use crate::ops::{OpContext, OperationRegistry};
use crate::runtime::error::RuntimeResult;
use crate::runtime::slots::SlotArray;
use crate::value::{Value, Vector2, Vector3};
use std::fmt;

/// Values read back from the main node after a pass.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GraphOutputs {
    pub scalar: f32,
    pub vector2: Vector2,
    pub vector3: Vector3,
}

impl GraphOutputs {
    /// Read the main node's slots in port order (scalar, vector2, vector3).
    /// Missing or mistyped values read as zero.
    pub fn read(program: &CompiledProgram, slots: &SlotArray, ctx: &mut OpContext) -> Self {
        let Some(sink) = program.sink() else {
            return Self::default();
        };
        let value = |index: usize| -> Value {
            sink.outputs
                .get(index)
                .and_then(|out| slots.get(out.slot).ok())
                .copied()
                .unwrap_or_default()
        };
        Self {
            scalar: ctx.coerce(&value(0)),
            vector2: ctx.coerce(&value(1)),
            vector3: ctx.coerce(&value(2)),
        }
    }
}

impl fmt::Display for GraphOutputs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x2, y2] = self.vector2;
        let [x3, y3, z3] = self.vector3;
        write!(
            f,
            "scalar={} vector2=({}, {}) vector3=({}, {}, {})",
            self.scalar, x2, y2, x3, y3, z3
        )
    }
}

/// Executes compiled programs. Holds scratch buffers reused across actions.
#[derive(Debug, Default)]
pub struct Interpreter {
    inputs: Vec<Value>,
    outputs: Vec<Value>,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one pass of `program` against `slots`.
    ///
    /// `slots` is resized to the program's slot count if needed and cleared
    /// before the first action runs.
    pub fn run(
        &mut self,
        program: &CompiledProgram,
        slots: &mut SlotArray,
        registry: &OperationRegistry,
        ctx: &mut OpContext,
    ) -> RuntimeResult<()> {
        if slots.len() != program.slot_count() {
            slots.resize(program.slot_count());
        } else {
            slots.reset();
        }
        ctx.coercion_stats_mut().begin_pass();

        for action in program.actions() {
            let func = registry.resolve(action.op)?;

            self.inputs.clear();
            for input in &action.inputs {
                let value = match input {
                    ActionInput::Slot(slot) => *slots.get(*slot)?,
                    ActionInput::Literal(value) => *value,
                };
                self.inputs.push(value);
            }

            self.outputs.clear();
            func(ctx, &self.inputs, &mut self.outputs);

            // Outputs the operation did not produce keep their slot untouched
            for (desc, produced) in action.outputs.iter().zip(&self.outputs) {
                let value = match produced.coerce_to(desc.ty) {
                    Some(value) => value,
                    None => {
                        ctx.coercion_stats_mut()
                            .record_fallback(produced.value_type(), desc.ty);
                        desc.ty.zero()
                    }
                };
                slots.set(desc.slot, value)?;
            }
        }

        Ok(())
    }
}
