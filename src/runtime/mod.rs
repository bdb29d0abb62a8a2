//! Program execution: slot array, interpreter, scheduler and the running
//! instance a host ticks every frame.

pub mod bridge;
pub mod error;
pub mod instance;
pub mod interpreter;
pub mod scheduler;
pub mod slots;

pub use bridge::{GraphBridge, GraphCommand};
pub use error::{RuntimeError, RuntimeResult};
pub use instance::NumberGraph;
pub use interpreter::{GraphOutputs, Interpreter};
pub use scheduler::Scheduler;
pub use slots::SlotArray;
