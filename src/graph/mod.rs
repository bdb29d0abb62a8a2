//! Graph model: nodes, typed ports, connections and parameters.
//!
//! The graph is owned by the editor/host. The compiler treats it as a
//! read-only value snapshot.

pub mod builder;
pub mod id;
pub mod model;
pub mod port;

pub use builder::GraphBuilder;
pub use id::{NodeId, ParameterId, PortIndex, PortRef};
pub use model::{Connection, Graph, Node, Parameter};
pub use port::{Port, PortDirection};
