//! Port descriptors for graph nodes.
//!
//! Each node owns an ordered list of ports. Input ports may receive at most
//! one connection; output ports fan out freely.

use crate::graph::id::PortIndex;
use crate::value::ValueType;
use serde::{Deserialize, Serialize};

/// Whether a port is an input or output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortDirection {
    Input,
    Output,
}

/// A typed port on a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Port {
    /// Node-local id, referenced by connections.
    pub id: PortIndex,
    #[serde(default)]
    pub name: String,
    pub direction: PortDirection,
    pub ty: ValueType,
}

impl Port {
    pub fn input(id: PortIndex, name: impl Into<String>, ty: ValueType) -> Self {
        Self {
            id,
            name: name.into(),
            direction: PortDirection::Input,
            ty,
        }
    }

    pub fn output(id: PortIndex, name: impl Into<String>, ty: ValueType) -> Self {
        Self {
            id,
            name: name.into(),
            direction: PortDirection::Output,
            ty,
        }
    }

    #[inline]
    pub fn is_input(&self) -> bool {
        self.direction == PortDirection::Input
    }

    #[inline]
    pub fn is_output(&self) -> bool {
        self.direction == PortDirection::Output
    }
}
