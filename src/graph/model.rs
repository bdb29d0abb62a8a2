//! The graph model consumed by the compiler.
//!
//! A [`Graph`] is a value snapshot handed over by the editor: nodes with typed
//! ports, point-to-point connections, and the graph-owned parameter list. The
//! compiler only reads it, and a compiled program does not borrow from it.

use crate::error::{NumGraphError, Result};
use crate::graph::id::{NodeId, ParameterId, PortIndex, PortRef};
use crate::graph::port::Port;
use crate::ops::OpSelector;
use crate::value::{Value, ValueType};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A node in the graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    /// Which registered operation this node invokes.
    pub op: OpSelector,
    #[serde(default)]
    pub ports: Vec<Port>,
    /// Literal values, matched positionally to the node's input ports and used
    /// when an input is unconnected. Constant nodes keep their value at index 0.
    #[serde(default)]
    pub values: Vec<Value>,
    /// Parameter referenced by a parameter-read node.
    #[serde(default)]
    pub parameter: Option<ParameterId>,
}

impl Node {
    pub fn new(id: NodeId, op: OpSelector) -> Self {
        Self {
            id,
            op,
            ports: Vec::new(),
            values: Vec::new(),
            parameter: None,
        }
    }

    /// Input ports in declaration order.
    pub fn inputs(&self) -> impl Iterator<Item = &Port> {
        self.ports.iter().filter(|p| p.is_input())
    }

    /// Output ports in declaration order.
    pub fn outputs(&self) -> impl Iterator<Item = &Port> {
        self.ports.iter().filter(|p| p.is_output())
    }

    pub fn port(&self, id: PortIndex) -> Option<&Port> {
        self.ports.iter().find(|p| p.id == id)
    }

    /// Literal for the `position`-th input port, if one was set.
    pub fn literal(&self, position: usize) -> Value {
        self.values.get(position).copied().unwrap_or_default()
    }

    pub fn port_ref(&self, port: PortIndex) -> PortRef {
        PortRef::new(self.id, port)
    }
}

/// A directed edge from an output port to an input port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Connection {
    pub from: PortRef,
    pub to: PortRef,
}

impl Connection {
    pub fn new(from: PortRef, to: PortRef) -> Self {
        Self { from, to }
    }
}

/// A named, externally adjustable graph value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub id: ParameterId,
    pub name: String,
    pub value: Value,
}

impl Parameter {
    pub fn new(id: ParameterId, name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            id,
            name: name.into(),
            value: value.into(),
        }
    }

    /// Declared type of the parameter, `None` when it holds no value.
    pub fn value_type(&self) -> Option<ValueType> {
        self.value.value_type()
    }
}

/// A complete number graph as authored in the editor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub connections: Vec<Connection>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn parameter(&self, id: ParameterId) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.id == id)
    }

    /// Set a parameter's value by name. Returns `false` if no parameter has that name.
    pub fn set_parameter(&mut self, name: &str, value: impl Into<Value>) -> bool {
        match self.parameters.iter_mut().find(|p| p.name == name) {
            Some(param) => {
                param.value = value.into();
                true
            }
            None => false,
        }
    }

    /// Load a graph document from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content).map_err(|e| e.with_context(format!("{}", path.display())))
    }

    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| NumGraphError::Serialization(format!("Failed to parse graph: {}", e)))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| NumGraphError::Serialization(format!("Failed to serialize graph: {}", e)))
    }

    /// Save the graph document as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
