//! # numgraph-rs: Number Graph Compiler and Interpreter
//!
//! Node-based "number graph" scripting: constants, random generators,
//! arithmetic and parameter readers wired into a single main node. A graph is
//! compiled once into a flat action list and replayed at a fixed cadence to
//! produce a scalar, a 2-vector and a 3-vector.
//!
//! ## Architecture
//!
//! - **Graph**: nodes with typed ports, connections and parameters (serde JSON)
//! - **Compiler**: cycle-checked post-order from the main node, slot allocation
//! - **Ops**: registry of operations keyed by (family, kind)
//! - **Runtime**: interpreter over a slot array, fixed-rate scheduler, and a
//!   crossbeam channel bridge for installing new programs
//!
//! ## Configuration
//!
//! Runtime settings live in `numgraph.toml` (see [`config::NumGraphConfig`]).
//!
//! ## Example
//!
//! ```ignore
//! use numgraph_rs::{graph::GraphBuilder, NumberGraph, OperationRegistry};
//! use numgraph_rs::graph::builder::{MAIN_SCALAR_PORT, MATH_RESULT_PORT};
//! use std::{sync::Arc, time::Duration};
//!
//! let mut b = GraphBuilder::new();
//! let main = b.main();
//! let mul = b.multiply(2.0, 3.5);
//! b.connect(mul, MATH_RESULT_PORT, main, MAIN_SCALAR_PORT);
//!
//! let mut graph = NumberGraph::new(Arc::new(OperationRegistry::with_builtins()));
//! graph.compile_and_install(&b.build())?;
//!
//! // Called every host frame
//! if graph.tick(Duration::from_millis(16)) {
//!     println!("{}", graph.outputs());
//! }
//! ```

pub mod compiler;
pub mod config;
pub mod error;
pub mod graph;
pub mod ops;
pub mod runtime;
pub mod value;

// Re-export commonly used types
pub use compiler::{CompileError, CompiledProgram, GraphCompiler};
pub use config::NumGraphConfig;
pub use error::{NumGraphError, Result, ResultExt};
pub use graph::{Graph, GraphBuilder};
pub use ops::{OpSelector, OperationRegistry};
pub use runtime::{GraphBridge, GraphCommand, GraphOutputs, NumberGraph, RuntimeError};
pub use value::{coerce, try_coerce, Value, ValueType};
