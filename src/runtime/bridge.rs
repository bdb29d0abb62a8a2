//! Channel boundary between an editor/host and a running number graph.
//!
//! The host compiles graphs and sends the resulting programs through a
//! [`GraphBridge`]. The [`NumberGraph`](crate::runtime::NumberGraph) owning
//! the receiver drains it at the start of each tick, so a replacement program
//! is only ever observed between passes.

use crate::compiler::{CompileError, CompiledProgram, GraphCompiler};
use crate::graph::Graph;
use crate::ops::OperationRegistry;
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use std::sync::Arc;

/// Commands sent from the host to a running instance.
#[derive(Debug, Clone)]
pub enum GraphCommand {
    /// Replace the installed program.
    Install(Arc<CompiledProgram>),
    /// Change the scheduler's update rate.
    SetUpdateRate(f32),
    /// Remove the installed program.
    Clear,
}

/// Channel capacity for commands (host → instance).
const CMD_CHANNEL_CAPACITY: usize = 16;

/// Host-side handle for a running instance.
#[derive(Debug, Clone)]
pub struct GraphBridge {
    pub cmd_tx: Sender<GraphCommand>,
}

impl GraphBridge {
    /// Create a new bridge pair: `(bridge_for_host, cmd_rx)`.
    ///
    /// The instance owns `cmd_rx`.
    pub fn new() -> (Self, Receiver<GraphCommand>) {
        let (cmd_tx, cmd_rx) = bounded(CMD_CHANNEL_CAPACITY);
        (Self { cmd_tx }, cmd_rx)
    }

    /// Queue a command without blocking. Returns `false` if the instance is
    /// gone or has not drained the queue.
    pub fn send_command(&self, cmd: GraphCommand) -> bool {
        match self.cmd_tx.try_send(cmd) {
            Ok(()) => true,
            Err(TrySendError::Full(cmd)) => {
                tracing::warn!("Number graph command queue full, dropping {:?}", cmd);
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }

    pub fn install(&self, program: Arc<CompiledProgram>) -> bool {
        self.send_command(GraphCommand::Install(program))
    }

    /// Compile `graph` and queue the program for installation.
    ///
    /// On a compile error nothing is sent and the running program is kept.
    pub fn compile_and_install(
        &self,
        graph: &Graph,
        registry: &OperationRegistry,
    ) -> Result<Arc<CompiledProgram>, CompileError> {
        let program = Arc::new(GraphCompiler::compile(graph, registry)?);
        self.install(Arc::clone(&program));
        Ok(program)
    }

    pub fn set_update_rate(&self, updates_per_second: f32) -> bool {
        self.send_command(GraphCommand::SetUpdateRate(updates_per_second))
    }

    pub fn clear(&self) -> bool {
        self.send_command(GraphCommand::Clear)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_arrive_in_order() {
        let (bridge, rx) = GraphBridge::new();
        assert!(bridge.set_update_rate(5.0));
        assert!(bridge.clear());

        let received: Vec<_> = rx.try_iter().collect();
        assert_eq!(received.len(), 2);
        assert!(matches!(received[0], GraphCommand::SetUpdateRate(r) if r == 5.0));
        assert!(matches!(received[1], GraphCommand::Clear));
    }

    #[test]
    fn test_full_queue_does_not_block() {
        let (bridge, _rx) = GraphBridge::new();
        for _ in 0..CMD_CHANNEL_CAPACITY {
            assert!(bridge.clear());
        }
        assert!(!bridge.clear());
    }

    #[test]
    fn test_disconnected_receiver() {
        let (bridge, rx) = GraphBridge::new();
        drop(rx);
        assert!(!bridge.clear());
    }

    #[test]
    fn test_failed_compile_sends_nothing() {
        let (bridge, rx) = GraphBridge::new();
        let err = bridge
            .compile_and_install(&Graph::new(), &OperationRegistry::with_builtins())
            .unwrap_err();
        assert_eq!(err, CompileError::NoMainNode);
        assert!(rx.try_recv().is_err());
    }
}
