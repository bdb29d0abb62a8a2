//! Operation registry and built-in operations.
//!
//! Operations are plain function pointers keyed by [`OpSelector`]. The
//! registry is open: hosts may register additional operations or replace
//! built-ins (for example a deterministic stand-in for the random generator).

pub mod builtin;
pub mod registry;
pub mod selector;

pub use registry::{OpContext, OpEntry, OpFn, OperationRegistry};
pub use selector::{family, OpSelector};
