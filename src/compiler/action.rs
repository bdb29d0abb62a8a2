//! Compiled actions.
//!
//! An [`Action`] is one flat instruction: gather inputs from slots or
//! embedded literals, invoke an operation, write outputs to slots.

use crate::compiler::slots::SlotId;
use crate::graph::{NodeId, ParameterId};
use crate::ops::OpSelector;
use crate::value::{Value, ValueType};
use std::fmt;

/// Where an action reads one of its inputs from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActionInput {
    /// Value written by an earlier action.
    Slot(SlotId),
    /// Unconnected input: the literal embedded at compile time.
    Literal(Value),
}

impl ActionInput {
    pub fn slot(&self) -> Option<SlotId> {
        match self {
            ActionInput::Slot(slot) => Some(*slot),
            ActionInput::Literal(_) => None,
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, ActionInput::Slot(_))
    }
}

impl fmt::Display for ActionInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionInput::Slot(slot) => write!(f, "{}", slot),
            ActionInput::Literal(value) => write!(f, "{}", value),
        }
    }
}

/// Destination of one produced value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionOutput {
    pub slot: SlotId,
    /// Type the value is coerced to when written.
    pub ty: ValueType,
}

/// One compiled instruction.
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    /// Node this action was compiled from.
    pub node: NodeId,
    pub op: OpSelector,
    pub inputs: Vec<ActionInput>,
    pub outputs: Vec<ActionOutput>,
    /// Captured parameter identity for parameter-read actions.
    pub parameter: Option<ParameterId>,
}

impl Action {
    pub fn new(node: NodeId, op: OpSelector) -> Self {
        Self {
            node,
            op,
            inputs: Vec::new(),
            outputs: Vec::new(),
            parameter: None,
        }
    }

    /// Slots this action reads.
    pub fn reads(&self) -> impl Iterator<Item = SlotId> + '_ {
        self.inputs.iter().filter_map(ActionInput::slot)
    }

    /// Slots this action writes.
    pub fn writes(&self) -> impl Iterator<Item = SlotId> + '_ {
        self.outputs.iter().map(|o| o.slot)
    }

    /// Highest slot referenced by this action.
    pub fn max_slot(&self) -> Option<SlotId> {
        self.reads().chain(self.writes()).max()
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}(", self.node, self.op)?;
        for (i, input) in self.inputs.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", input)?;
        }
        write!(f, ")")?;
        if !self.outputs.is_empty() {
            write!(f, " ->")?;
            for output in &self.outputs {
                write!(f, " {}:{}", output.slot, output.ty)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Action {
        let mut action = Action::new(NodeId(2), OpSelector::MULTIPLY);
        action.inputs = vec![
            ActionInput::Slot(SlotId(0)),
            ActionInput::Literal(Value::Scalar(3.5)),
        ];
        action.outputs = vec![ActionOutput {
            slot: SlotId(4),
            ty: ValueType::Scalar,
        }];
        action
    }

    #[test]
    fn test_reads_and_writes() {
        let action = sample();
        assert_eq!(action.reads().collect::<Vec<_>>(), vec![SlotId(0)]);
        assert_eq!(action.writes().collect::<Vec<_>>(), vec![SlotId(4)]);
        assert_eq!(action.max_slot(), Some(SlotId(4)));
        assert!(action.inputs[0].is_connected());
        assert!(!action.inputs[1].is_connected());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            sample().to_string(),
            "NodeId(2) 3:3($0, 3.5) -> $4:Float"
        );
    }
}
