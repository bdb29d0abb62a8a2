//! Test data builders for creating graphs

use numgraph_rs::graph::builder::{
    MAIN_SCALAR_PORT, MAIN_VECTOR2_PORT, MAIN_VECTOR3_PORT, MATH_RESULT_PORT, VALUE_OUTPUT_PORT,
};
use numgraph_rs::graph::{GraphBuilder, NodeId};
use numgraph_rs::{Graph, Value};

/// Builder for graphs wired into a main node
pub struct ScenarioBuilder {
    builder: GraphBuilder,
    main: NodeId,
}

impl ScenarioBuilder {
    pub fn new() -> Self {
        let mut builder = GraphBuilder::new();
        let main = builder.main();
        Self { builder, main }
    }

    pub fn main(&self) -> NodeId {
        self.main
    }

    /// Multiply node with literal inputs feeding the scalar output
    pub fn scalar_from_multiply(mut self, a: f32, b: f32) -> Self {
        let mul = self.builder.multiply(a, b);
        self.builder
            .connect(mul, MATH_RESULT_PORT, self.main, MAIN_SCALAR_PORT);
        self
    }

    /// Parameter times a literal feeding the scalar output
    pub fn scalar_from_parameter(mut self, name: &str, value: f32, factor: f32) -> Self {
        let param = self.builder.parameter(name, value);
        let read = self.builder.parameter_read(param);
        let mul = self.builder.multiply(0.0, factor);
        self.builder
            .connect(read, VALUE_OUTPUT_PORT, mul, 0)
            .connect(mul, MATH_RESULT_PORT, self.main, MAIN_SCALAR_PORT);
        self
    }

    /// Constant feeding the Vector2 output
    pub fn vector2_from_constant(mut self, value: impl Into<Value>) -> Self {
        let c = self.builder.constant(value);
        self.builder
            .connect(c, VALUE_OUTPUT_PORT, self.main, MAIN_VECTOR2_PORT);
        self
    }

    /// Random node feeding the Vector3 output
    pub fn vector3_from_random(mut self) -> Self {
        let r = self.builder.random_vector3();
        self.builder
            .connect(r, VALUE_OUTPUT_PORT, self.main, MAIN_VECTOR3_PORT);
        self
    }

    /// Direct access for wiring not covered above
    pub fn graph_builder(&mut self) -> &mut GraphBuilder {
        &mut self.builder
    }

    pub fn build(self) -> Graph {
        self.builder.build()
    }
}

impl Default for ScenarioBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_builder() {
        let graph = ScenarioBuilder::new()
            .scalar_from_multiply(2.0, 3.5)
            .vector3_from_random()
            .build();

        assert_eq!(graph.nodes.len(), 3);
        assert_eq!(graph.connections.len(), 2);
    }
}
