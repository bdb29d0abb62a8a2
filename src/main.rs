//! numgraph - Number Graph Command Line Entry Point
//!
//! Compiles number graph documents and simulates host frames against the
//! fixed-rate interpreter.

use anyhow::Context;
use clap::{Parser, Subcommand};
use numgraph_rs::{
    config::{NumGraphConfig, CONFIG_FILE_NAME},
    Graph, GraphCompiler, NumberGraph, OperationRegistry,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "numgraph")]
#[command(author, version, about = "Number graph compiler and interpreter", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a graph and print its action list and parameters
    Compile {
        /// Graph document (JSON)
        graph: PathBuf,
    },

    /// Compile a graph and run it against simulated host frames
    Run {
        /// Graph document (JSON)
        graph: PathBuf,

        /// Number of host frames to simulate
        #[arg(long, default_value_t = 60)]
        ticks: u32,

        /// Simulated frame time in milliseconds
        #[arg(long, default_value_t = 16.667)]
        frame_ms: f64,

        /// Config file
        #[arg(long, default_value = CONFIG_FILE_NAME)]
        config: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,numgraph_rs=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Compile { graph } => compile(graph),
        Commands::Run {
            graph,
            ticks,
            frame_ms,
            config,
        } => run(graph, ticks, frame_ms, config),
    }
}

fn compile(path: PathBuf) -> anyhow::Result<()> {
    let graph = Graph::load(&path).with_context(|| format!("Failed to load {:?}", path))?;
    let registry = OperationRegistry::with_builtins();
    let program = GraphCompiler::compile(&graph, &registry)
        .with_context(|| format!("Failed to compile {:?}", path))?;

    println!("Actions ({} slots):", program.slot_count());
    for (i, action) in program.actions().iter().enumerate() {
        let name = registry.name(action.op).unwrap_or("?");
        println!("  {:>3}  {:<16} {}", i, name, action);
    }

    if !program.parameters().is_empty() {
        println!("Parameters:");
        for (name, value) in program.parameter_values() {
            println!("  {} = {}", name, value);
        }
    }

    let stats = program.stats();
    println!(
        "{} of {} nodes compiled in {}us",
        stats.active_nodes, stats.total_nodes, stats.compile_time_us
    );
    Ok(())
}

fn run(path: PathBuf, ticks: u32, frame_ms: f64, config_path: PathBuf) -> anyhow::Result<()> {
    let config = NumGraphConfig::load_or_default(&config_path);
    let graph = Graph::load(&path).with_context(|| format!("Failed to load {:?}", path))?;

    let frame = Duration::try_from_secs_f64(frame_ms / 1000.0)
        .with_context(|| format!("Invalid frame time {}ms", frame_ms))?;

    let registry = Arc::new(OperationRegistry::with_builtins());
    let mut instance = NumberGraph::from_config(&config, registry)?;
    instance
        .compile_and_install(&graph)
        .with_context(|| format!("Failed to compile {:?}", path))?;

    for (name, value) in instance.parameters().iter().map(|p| (&p.name, p.value)) {
        println!("param {} = {}", name, value);
    }

    for frame_index in 0..ticks {
        if instance.tick(frame) {
            println!("[frame {:>4}] {}", frame_index, instance.outputs());
        }
        if instance.is_faulted() {
            anyhow::bail!("Interpreter faulted at frame {}", frame_index);
        }
    }

    let stats = instance.coercion_stats();
    if stats.fallbacks > 0 {
        tracing::warn!("{} coercion fallbacks to zero", stats.fallbacks);
    }
    tracing::info!("{} passes over {} frames", instance.passes(), ticks);
    Ok(())
}
