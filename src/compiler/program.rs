use crate::compiler::action::Action;
use crate::graph::Parameter;
use crate::value::Value;

/// Compiled number graph program.
/// Holds only the nodes the main node depends on, in execution order.
#[derive(Debug, Clone)]
pub struct CompiledProgram {
    /// Actions in dependency order; the main node's action is last
    pub(crate) actions: Vec<Action>,

    /// Parameters read by the program, one entry per parameter identity
    pub(crate) parameters: Vec<Parameter>,

    /// One past the highest slot id referenced by any action
    pub(crate) slot_count: usize,

    /// Compilation statistics
    pub(crate) stats: CompileStats,
}

/// Statistics about a compile
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileStats {
    /// Total number of nodes in the graph
    pub total_nodes: usize,

    /// Number of nodes compiled into actions
    pub active_nodes: usize,

    /// Number of nodes the main node does not depend on
    pub disconnected_nodes: usize,

    /// Number of slots the program needs
    pub slot_count: usize,

    /// Number of distinct parameters read
    pub parameters: usize,

    /// Compilation time in microseconds
    pub compile_time_us: u64,
}

impl CompiledProgram {
    pub(crate) fn new(
        actions: Vec<Action>,
        parameters: Vec<Parameter>,
        slot_count: usize,
        stats: CompileStats,
    ) -> Self {
        Self {
            actions,
            parameters,
            slot_count,
            stats,
        }
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// The main node's action.
    pub fn sink(&self) -> Option<&Action> {
        self.actions.last()
    }

    /// Parameter catalog in discovery order.
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// `(name, value)` pairs for display in a host.
    pub fn parameter_values(&self) -> impl Iterator<Item = (&str, Value)> + '_ {
        self.parameters.iter().map(|p| (p.name.as_str(), p.value))
    }

    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    pub fn stats(&self) -> &CompileStats {
        &self.stats
    }

    /// Check if the program has any actions
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }
}
