use super::action::{Action, ActionInput, ActionOutput};
use super::error::{CompileError, CompileResult};
use super::program::{CompileStats, CompiledProgram};
use super::slots::SlotAllocator;
use crate::graph::{Graph, Node, NodeId, Parameter, PortRef};
use crate::ops::OperationRegistry;
use std::collections::HashMap;

/// Compiles a number graph into a linear action list
pub struct GraphCompiler;

/// Producer feeding each connected input port.
type IncomingMap = HashMap<PortRef, PortRef>;

impl GraphCompiler {
    /// Compile a graph into an executable program.
    ///
    /// Only nodes the main node depends on are compiled. Actions are emitted
    /// in depth-first post-order from the main node, so every producer comes
    /// before all of its consumers and the main node's action is last.
    ///
    /// # Arguments
    /// * `graph` - Graph snapshot to compile
    /// * `registry` - Operations available at runtime
    ///
    /// # Errors
    /// Any structural defect aborts the compile; no partial program is returned.
    pub fn compile(graph: &Graph, registry: &OperationRegistry) -> CompileResult<CompiledProgram> {
        let start_time = std::time::Instant::now();

        let nodes = Self::index_nodes(graph)?;
        let incoming = Self::build_incoming(graph, &nodes)?;
        let sink = Self::find_sink(graph)?;
        let order = Self::dependency_order(sink, &nodes, &incoming)?;

        let mut allocator = SlotAllocator::new();
        let mut actions = Vec::with_capacity(order.len());
        let mut parameters: Vec<Parameter> = Vec::new();

        for id in &order {
            let node = nodes[id];
            let action = Self::build_action(
                node,
                graph,
                registry,
                &incoming,
                &mut allocator,
                &mut parameters,
            )?;
            actions.push(action);
        }

        let slot_count = allocator.slot_count();
        let total_nodes = graph.nodes.len();
        let active_nodes = actions.len();

        let stats = CompileStats {
            total_nodes,
            active_nodes,
            disconnected_nodes: total_nodes.saturating_sub(active_nodes),
            slot_count,
            parameters: parameters.len(),
            compile_time_us: start_time.elapsed().as_micros() as u64,
        };

        tracing::debug!(
            "Compiled number graph: {} actions ({} of {} nodes), {} slots, {} parameters in {}us",
            stats.active_nodes,
            stats.active_nodes,
            stats.total_nodes,
            stats.slot_count,
            stats.parameters,
            stats.compile_time_us
        );

        Ok(CompiledProgram::new(actions, parameters, slot_count, stats))
    }

    /// Index nodes by id
    fn index_nodes(graph: &Graph) -> CompileResult<HashMap<NodeId, &Node>> {
        let mut nodes = HashMap::with_capacity(graph.nodes.len());
        for node in &graph.nodes {
            if nodes.insert(node.id, node).is_some() {
                return Err(CompileError::DuplicateNode(node.id));
            }
        }
        Ok(nodes)
    }

    /// Validate connections and map every connected input to its producer.
    ///
    /// An input fed by more than one connection is rejected here, whether or
    /// not the main node depends on it.
    fn build_incoming(
        graph: &Graph,
        nodes: &HashMap<NodeId, &Node>,
    ) -> CompileResult<IncomingMap> {
        let mut sources: HashMap<PortRef, Vec<PortRef>> = HashMap::new();

        for conn in &graph.connections {
            let (from, to) = (conn.from, conn.to);

            let producer = nodes.get(&from.node).ok_or_else(|| {
                CompileError::invalid_connection(from, to, format!("unknown node {}", from.node))
            })?;
            let consumer = nodes.get(&to.node).ok_or_else(|| {
                CompileError::invalid_connection(from, to, format!("unknown node {}", to.node))
            })?;

            let out_port = producer
                .port(from.port)
                .ok_or_else(|| CompileError::missing_port(from, to, from.node, from.port))?;
            let in_port = consumer
                .port(to.port)
                .ok_or_else(|| CompileError::missing_port(from, to, to.node, to.port))?;

            if !out_port.is_output() {
                return Err(CompileError::invalid_connection(
                    from,
                    to,
                    "source is not an output port",
                ));
            }
            if !in_port.is_input() {
                return Err(CompileError::invalid_connection(
                    from,
                    to,
                    "target is not an input port",
                ));
            }

            sources.entry(to).or_default().push(from);
        }

        // Report the first offending input in connection order
        for conn in &graph.connections {
            let count = sources.get(&conn.to).map_or(0, Vec::len);
            if count > 1 {
                return Err(CompileError::MultipleInputConnections {
                    input: conn.to,
                    count,
                });
            }
        }

        Ok(sources
            .into_iter()
            .filter_map(|(to, from)| from.first().map(|&f| (to, f)))
            .collect())
    }

    /// Locate the unique main node
    fn find_sink(graph: &Graph) -> CompileResult<NodeId> {
        let mut mains = graph.nodes.iter().filter(|n| n.op.is_main());
        let first = mains.next().ok_or(CompileError::NoMainNode)?;
        if let Some(second) = mains.next() {
            return Err(CompileError::MultipleMainNodes {
                first: first.id,
                second: second.id,
            });
        }
        Ok(first.id)
    }

    /// Explicit-stack depth-first post-order from `sink`.
    ///
    /// A node may be pushed more than once before it is expanded (fan-out);
    /// the `emitted` mark keeps it to a single entry in the order.
    fn dependency_order(
        sink: NodeId,
        nodes: &HashMap<NodeId, &Node>,
        incoming: &IncomingMap,
    ) -> CompileResult<Vec<NodeId>> {
        #[derive(Default, Clone, Copy)]
        struct Marks {
            visited: bool,
            on_stack: bool,
            emitted: bool,
        }

        let mut marks: HashMap<NodeId, Marks> = HashMap::with_capacity(nodes.len());
        let mut stack = vec![sink];
        let mut order = Vec::new();

        while let Some(&id) = stack.last() {
            let mark = marks.entry(id).or_default();

            if mark.visited {
                // All dependencies expanded
                stack.pop();
                mark.on_stack = false;
                if !mark.emitted {
                    mark.emitted = true;
                    order.push(id);
                }
                continue;
            }

            mark.visited = true;
            mark.on_stack = true;

            let Some(node) = nodes.get(&id) else {
                continue;
            };

            let producers: Vec<NodeId> = node
                .inputs()
                .filter_map(|port| incoming.get(&node.port_ref(port.id)))
                .map(|from| from.node)
                .collect();

            for &producer in &producers {
                let producer_mark = marks.get(&producer).copied().unwrap_or_default();
                if producer_mark.on_stack {
                    return Err(CompileError::CycleDetected { node: producer });
                }
            }

            // Reverse so the first input's producer is expanded first
            for &producer in producers.iter().rev() {
                if !marks.get(&producer).is_some_and(|m| m.visited) {
                    stack.push(producer);
                }
            }
        }

        Ok(order)
    }

    /// Build the action for one node
    fn build_action(
        node: &Node,
        graph: &Graph,
        registry: &OperationRegistry,
        incoming: &IncomingMap,
        allocator: &mut SlotAllocator,
        parameters: &mut Vec<Parameter>,
    ) -> CompileResult<Action> {
        if !registry.contains(node.op) {
            return Err(CompileError::UnknownOperation {
                node: node.id,
                op: node.op,
            });
        }

        let mut action = Action::new(node.id, node.op);

        if node.op.is_parameter_read() {
            let parameter = node
                .parameter
                .and_then(|id| graph.parameter(id))
                .ok_or(CompileError::UnknownParameter {
                    node: node.id,
                    parameter: node.parameter,
                })?;

            if !parameters.iter().any(|p| p.id == parameter.id) {
                parameters.push(parameter.clone());
            }
            action.inputs.push(ActionInput::Literal(parameter.value));
            action.parameter = Some(parameter.id);
        } else if node.op.is_constant() {
            action.inputs.push(ActionInput::Literal(node.literal(0)));
        } else {
            for (position, port) in node.inputs().enumerate() {
                let input = match incoming.get(&node.port_ref(port.id)) {
                    Some(&producer) => ActionInput::Slot(allocator.allocate(producer)),
                    None => ActionInput::Literal(node.literal(position)),
                };
                action.inputs.push(input);
            }
        }

        if node.op.is_main() {
            // The main node's inputs are read back as the program outputs
            for port in node.inputs() {
                action.outputs.push(ActionOutput {
                    slot: allocator.allocate_fresh(),
                    ty: port.ty,
                });
            }
        } else {
            for port in node.outputs() {
                action.outputs.push(ActionOutput {
                    slot: allocator.allocate(node.port_ref(port.id)),
                    ty: port.ty,
                });
            }
        }

        Ok(action)
    }
}
