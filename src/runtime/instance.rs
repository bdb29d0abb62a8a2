//! The host-facing number graph value.

use crate::compiler::{CompileError, CompiledProgram, GraphCompiler};
use crate::config::NumGraphConfig;
use crate::error::Result;
use crate::graph::{Graph, Parameter};
use crate::ops::{OpContext, OperationRegistry};
use crate::runtime::bridge::GraphCommand;
use crate::runtime::error::RuntimeError;
use crate::runtime::interpreter::{GraphOutputs, Interpreter};
use crate::runtime::scheduler::Scheduler;
use crate::runtime::slots::SlotArray;
use crate::value::{CoercionStats, Vector2, Vector3};
use crossbeam_channel::Receiver;
use std::sync::Arc;
use std::time::Duration;

/// A running number graph.
///
/// Owns the installed program, its slot array and the scheduler. Each call
/// to [`tick`](Self::tick):
/// 1. Drain bridge commands.
/// 2. Advance the scheduler.
/// 3. Run one interpreter pass if one is due.
pub struct NumberGraph {
    program: Option<Arc<CompiledProgram>>,
    slots: SlotArray,
    registry: Arc<OperationRegistry>,
    interpreter: Interpreter,
    scheduler: Scheduler,
    ctx: OpContext,
    outputs: GraphOutputs,
    cmd_rx: Option<Receiver<GraphCommand>>,
    fault: Option<RuntimeError>,
    passes: u64,
    log_compile_stats: bool,
}

impl NumberGraph {
    /// Create an empty instance with the default update rate.
    pub fn new(registry: Arc<OperationRegistry>) -> Self {
        Self {
            program: None,
            slots: SlotArray::default(),
            registry,
            interpreter: Interpreter::new(),
            scheduler: Scheduler::default(),
            ctx: OpContext::new(None),
            outputs: GraphOutputs::default(),
            cmd_rx: None,
            fault: None,
            passes: 0,
            log_compile_stats: false,
        }
    }

    /// Create an empty instance using the update rate, seed and logging
    /// settings from `config`.
    pub fn from_config(config: &NumGraphConfig, registry: Arc<OperationRegistry>) -> Result<Self> {
        let mut graph = Self::new(registry);
        graph.scheduler = Scheduler::new(config.updates_per_second)?;
        graph.ctx = OpContext::new(config.seed);
        graph.log_compile_stats = config.log_compile_stats;
        Ok(graph)
    }

    /// Receive commands from a [`GraphBridge`](crate::runtime::GraphBridge).
    pub fn with_bridge(mut self, cmd_rx: Receiver<GraphCommand>) -> Self {
        self.cmd_rx = Some(cmd_rx);
        self
    }

    /// Replace the installed program. Clears any fault and the coercion
    /// counters; the scheduler keeps its cadence.
    pub fn install(&mut self, program: Arc<CompiledProgram>) {
        tracing::info!(
            "Installing number graph program: {} actions, {} slots, {} parameters",
            program.len(),
            program.slot_count(),
            program.parameters().len()
        );
        self.slots.resize(program.slot_count());
        self.program = Some(program);
        self.fault = None;
        self.ctx.coercion_stats_mut().reset();
    }

    /// Compile `graph` and install the result.
    ///
    /// A compile error leaves the current program installed and running.
    pub fn compile_and_install(&mut self, graph: &Graph) -> std::result::Result<(), CompileError> {
        match GraphCompiler::compile(graph, &self.registry) {
            Ok(program) => {
                if self.log_compile_stats {
                    tracing::info!("Compile stats: {:?}", program.stats());
                }
                self.install(Arc::new(program));
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Compile failed, keeping current program: {}", e);
                Err(e)
            }
        }
    }

    /// Remove the installed program and discard accumulated frame time.
    /// Outputs keep their last values.
    pub fn clear(&mut self) {
        self.program = None;
        self.slots.resize(0);
        self.fault = None;
        self.scheduler.reset();
    }

    /// Advance by one host frame. Returns whether an interpreter pass ran.
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        self.process_commands();

        if !self.scheduler.tick(elapsed) {
            return false;
        }
        self.run_once()
    }

    /// Run one interpreter pass now, ignoring the scheduler.
    ///
    /// Returns `false` when no program is installed or the instance is
    /// faulted. A runtime error faults the instance until a new program is
    /// installed; outputs keep their last values.
    pub fn run_once(&mut self) -> bool {
        if self.fault.is_some() {
            return false;
        }
        let Some(program) = self.program.clone() else {
            return false;
        };

        match self
            .interpreter
            .run(&program, &mut self.slots, &self.registry, &mut self.ctx)
        {
            Ok(()) => {
                self.outputs = GraphOutputs::read(&program, &self.slots, &mut self.ctx);
                self.passes += 1;
                true
            }
            Err(e) => {
                tracing::error!("Number graph faulted: {}", e);
                self.fault = Some(e);
                false
            }
        }
    }

    fn process_commands(&mut self) {
        while let Some(cmd) = self.cmd_rx.as_ref().and_then(|rx| rx.try_recv().ok()) {
            match cmd {
                GraphCommand::Install(program) => {
                    self.install(program);
                }
                GraphCommand::SetUpdateRate(rate) => {
                    if let Err(e) = self.scheduler.set_updates_per_second(rate) {
                        tracing::warn!("Rejected update rate: {}", e);
                    }
                }
                GraphCommand::Clear => {
                    self.clear();
                }
            }
        }
    }

    pub fn set_updates_per_second(&mut self, updates_per_second: f32) -> Result<()> {
        self.scheduler.set_updates_per_second(updates_per_second)
    }

    pub fn outputs(&self) -> &GraphOutputs {
        &self.outputs
    }

    pub fn output_scalar(&self) -> f32 {
        self.outputs.scalar
    }

    pub fn output_vector2(&self) -> Vector2 {
        self.outputs.vector2
    }

    pub fn output_vector3(&self) -> Vector3 {
        self.outputs.vector3
    }

    /// Parameter catalog of the installed program.
    pub fn parameters(&self) -> &[Parameter] {
        self.program
            .as_deref()
            .map(CompiledProgram::parameters)
            .unwrap_or(&[])
    }

    pub fn program(&self) -> Option<&Arc<CompiledProgram>> {
        self.program.as_ref()
    }

    pub fn registry(&self) -> &Arc<OperationRegistry> {
        &self.registry
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn coercion_stats(&self) -> &CoercionStats {
        self.ctx.coercion_stats()
    }

    pub fn is_faulted(&self) -> bool {
        self.fault.is_some()
    }

    pub fn fault(&self) -> Option<&RuntimeError> {
        self.fault.as_ref()
    }

    /// Number of completed passes since creation.
    pub fn passes(&self) -> u64 {
        self.passes
    }

    /// Whether compile statistics are logged by [`compile_and_install`](Self::compile_and_install).
    pub fn logs_compile_stats(&self) -> bool {
        self.log_compile_stats
    }
}
