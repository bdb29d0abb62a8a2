//! Compile-time error types.

use crate::graph::{NodeId, ParameterId, PortIndex, PortRef};
use crate::ops::OpSelector;
use thiserror::Error;

/// Errors that abort a compile. No partial program is ever produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("Graph has no main node")]
    NoMainNode,

    #[error("Graph has more than one main node ({first} and {second})")]
    MultipleMainNodes { first: NodeId, second: NodeId },

    #[error("Input {input} has {count} incoming connections")]
    MultipleInputConnections { input: PortRef, count: usize },

    #[error("Cycle detected through node {node}")]
    CycleDetected { node: NodeId },

    #[error("Node {node} uses unregistered operation {op}")]
    UnknownOperation { node: NodeId, op: OpSelector },

    #[error("Node {node} reads unknown parameter {parameter:?}")]
    UnknownParameter {
        node: NodeId,
        parameter: Option<ParameterId>,
    },

    #[error("Duplicate node id {0}")]
    DuplicateNode(NodeId),

    #[error("Invalid connection {from} -> {to}: {reason}")]
    InvalidConnection {
        from: PortRef,
        to: PortRef,
        reason: String,
    },
}

impl CompileError {
    pub(crate) fn invalid_connection(
        from: PortRef,
        to: PortRef,
        reason: impl Into<String>,
    ) -> Self {
        CompileError::InvalidConnection {
            from,
            to,
            reason: reason.into(),
        }
    }

    pub(crate) fn missing_port(from: PortRef, to: PortRef, node: NodeId, port: PortIndex) -> Self {
        Self::invalid_connection(from, to, format!("node {} has no port {}", node, port))
    }
}

pub type CompileResult<T> = std::result::Result<T, CompileError>;
