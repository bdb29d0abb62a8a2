//! Graph compiler.
//!
//! Turns a [`Graph`](crate::graph::Graph) into a [`CompiledProgram`]: a flat,
//! dependency-ordered action list with explicit slot assignment, plus the
//! catalog of parameters the program reads.

pub mod action;
#[allow(clippy::module_inception)]
pub mod compiler;
pub mod error;
pub mod program;
pub mod slots;

pub use action::{Action, ActionInput, ActionOutput};
pub use compiler::GraphCompiler;
pub use error::{CompileError, CompileResult};
pub use program::{CompileStats, CompiledProgram};
pub use slots::{SlotAllocator, SlotId};
