//! Runtime error types.
//!
//! A successfully compiled program is not expected to fail. Both variants
//! indicate a compiler or registry defect and fault the running instance.

use crate::compiler::SlotId;
use crate::ops::OpSelector;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("No operation registered for {0}")]
    UnknownOperation(OpSelector),

    #[error("Slot {slot} out of bounds (slot array holds {len})")]
    SlotOutOfBounds { slot: SlotId, len: usize },
}

pub type RuntimeResult<T> = std::result::Result<T, RuntimeError>;
