//! Programmatic graph construction.
//!
//! [`GraphBuilder`] lays out the built-in node archetypes with their standard
//! port layouts, so hosts and tests can assemble graphs without an editor.
//!
//! ```text
//! Main          in 0 Float, in 1 Vector2, in 2 Vector3
//! Random        out 0 XYZ (Vector3)
//! Constant      out 0 Value
//! Math binary   in 0 A, in 1 B, out 2 Result (Float)
//! Parameter     out 0 Value (typed after the parameter)
//! ```

use crate::graph::id::{NodeId, ParameterId, PortIndex, PortRef};
use crate::graph::model::{Connection, Graph, Node, Parameter};
use crate::graph::port::Port;
use crate::ops::OpSelector;
use crate::value::{Value, ValueType};

/// Main node input port for the scalar output.
pub const MAIN_SCALAR_PORT: PortIndex = 0;
/// Main node input port for the Vector2 output.
pub const MAIN_VECTOR2_PORT: PortIndex = 1;
/// Main node input port for the Vector3 output.
pub const MAIN_VECTOR3_PORT: PortIndex = 2;

/// Output port of single-output archetypes (random, constant, parameter).
pub const VALUE_OUTPUT_PORT: PortIndex = 0;
/// Output port of binary math nodes.
pub const MATH_RESULT_PORT: PortIndex = 2;

/// Builder for [`Graph`] values.
#[derive(Debug)]
pub struct GraphBuilder {
    graph: Graph,
    next_node: u32,
    next_parameter: u32,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            graph: Graph::new(),
            next_node: 1,
            next_parameter: 1,
        }
    }

    fn next_node_id(&mut self) -> NodeId {
        let id = NodeId(self.next_node);
        self.next_node += 1;
        id
    }

    /// Add an arbitrary node. Its id is taken as-is.
    pub fn node(&mut self, node: Node) -> NodeId {
        let id = node.id;
        self.next_node = self.next_node.max(id.0 + 1);
        self.graph.nodes.push(node);
        id
    }

    /// Add the sink node.
    pub fn main(&mut self) -> NodeId {
        let mut node = Node::new(self.next_node_id(), OpSelector::MAIN);
        node.ports = vec![
            Port::input(MAIN_SCALAR_PORT, "Float", ValueType::Scalar),
            Port::input(MAIN_VECTOR2_PORT, "Vector2", ValueType::Vector2),
            Port::input(MAIN_VECTOR3_PORT, "Vector3", ValueType::Vector3),
        ];
        self.node(node)
    }

    pub fn random_vector3(&mut self) -> NodeId {
        let mut node = Node::new(self.next_node_id(), OpSelector::RANDOM_VECTOR3);
        node.ports = vec![Port::output(VALUE_OUTPUT_PORT, "XYZ", ValueType::Vector3)];
        self.node(node)
    }

    /// Add a constant node producing `value`.
    pub fn constant(&mut self, value: impl Into<Value>) -> NodeId {
        let value = value.into();
        let (op, ty) = match value.value_type() {
            Some(ValueType::Bool) => (OpSelector::CONST_BOOL, ValueType::Bool),
            Some(ValueType::Integer) => (OpSelector::CONST_INTEGER, ValueType::Integer),
            Some(ValueType::Vector2) => (OpSelector::CONST_VECTOR2, ValueType::Vector2),
            Some(ValueType::Vector3) => (OpSelector::CONST_VECTOR3, ValueType::Vector3),
            Some(ValueType::Vector4) => (OpSelector::CONST_VECTOR4, ValueType::Vector4),
            Some(ValueType::Scalar) | None => (OpSelector::CONST_SCALAR, ValueType::Scalar),
        };
        let mut node = Node::new(self.next_node_id(), op);
        node.ports = vec![Port::output(VALUE_OUTPUT_PORT, "Value", ty)];
        node.values = vec![value];
        self.node(node)
    }

    /// Add a binary scalar math node with literals for unconnected inputs.
    pub fn math(&mut self, op: OpSelector, a: f32, b: f32) -> NodeId {
        let mut node = Node::new(self.next_node_id(), op);
        node.ports = vec![
            Port::input(0, "A", ValueType::Scalar),
            Port::input(1, "B", ValueType::Scalar),
            Port::output(MATH_RESULT_PORT, "Result", ValueType::Scalar),
        ];
        node.values = vec![Value::Scalar(a), Value::Scalar(b)];
        self.node(node)
    }

    pub fn multiply(&mut self, a: f32, b: f32) -> NodeId {
        self.math(OpSelector::MULTIPLY, a, b)
    }

    pub fn add(&mut self, a: f32, b: f32) -> NodeId {
        self.math(OpSelector::ADD, a, b)
    }

    /// Declare a graph parameter.
    pub fn parameter(&mut self, name: impl Into<String>, value: impl Into<Value>) -> ParameterId {
        let id = ParameterId(self.next_parameter);
        self.next_parameter += 1;
        self.graph.parameters.push(Parameter::new(id, name, value));
        id
    }

    /// Add a node reading `parameter`. The output type follows the parameter's
    /// current value, defaulting to scalar.
    pub fn parameter_read(&mut self, parameter: ParameterId) -> NodeId {
        let ty = self
            .graph
            .parameter(parameter)
            .and_then(Parameter::value_type)
            .unwrap_or(ValueType::Scalar);
        let mut node = Node::new(self.next_node_id(), OpSelector::PARAMETER_READ);
        node.ports = vec![Port::output(VALUE_OUTPUT_PORT, "Value", ty)];
        node.parameter = Some(parameter);
        self.node(node)
    }

    /// Connect `from`'s output port to `to`'s input port.
    pub fn connect(
        &mut self,
        from: NodeId,
        from_port: PortIndex,
        to: NodeId,
        to_port: PortIndex,
    ) -> &mut Self {
        self.graph.connections.push(Connection::new(
            PortRef::new(from, from_port),
            PortRef::new(to, to_port),
        ));
        self
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn build(self) -> Graph {
        self.graph
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_assigns_sequential_ids() {
        let mut b = GraphBuilder::new();
        let main = b.main();
        let mul = b.multiply(2.0, 3.5);
        assert_eq!(main, NodeId(1));
        assert_eq!(mul, NodeId(2));
    }

    #[test]
    fn test_builder_custom_node_bumps_ids() {
        let mut b = GraphBuilder::new();
        b.node(Node::new(NodeId(10), OpSelector::ADD));
        assert_eq!(b.random_vector3(), NodeId(11));
    }

    #[test]
    fn test_constant_archetype_typing() {
        let mut b = GraphBuilder::new();
        let c = b.constant([1.0f32, 2.0, 3.0]);
        let graph = b.build();
        let node = graph.node(c).unwrap();
        assert_eq!(node.op, OpSelector::CONST_VECTOR3);
        assert_eq!(node.outputs().next().map(|p| p.ty), Some(ValueType::Vector3));
    }

    #[test]
    fn test_parameter_read_follows_parameter_type() {
        let mut b = GraphBuilder::new();
        let p = b.parameter("offset", [0.5f32, 0.5]);
        let reader = b.parameter_read(p);
        let graph = b.build();
        let node = graph.node(reader).unwrap();
        assert_eq!(node.parameter, Some(p));
        assert_eq!(node.outputs().next().map(|p| p.ty), Some(ValueType::Vector2));
    }

    #[test]
    fn test_connect_records_connection() {
        let mut b = GraphBuilder::new();
        let main = b.main();
        let mul = b.multiply(1.0, 1.0);
        b.connect(mul, MATH_RESULT_PORT, main, MAIN_SCALAR_PORT);
        let graph = b.build();
        assert_eq!(graph.connections.len(), 1);
        assert_eq!(graph.connections[0].from, PortRef::new(mul, MATH_RESULT_PORT));
        assert_eq!(graph.connections[0].to, PortRef::new(main, MAIN_SCALAR_PORT));
    }
}
