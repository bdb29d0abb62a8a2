//! End-to-end tests: graph document → compiled program → running instance.

mod common;

use common::builders::ScenarioBuilder;
use common::{assert_float_eq, frame, stub_registry, STUB_VECTOR3};
use numgraph_rs::graph::builder::{MAIN_SCALAR_PORT, MATH_RESULT_PORT};
use numgraph_rs::{
    CompileError, Graph, GraphBridge, GraphCompiler, GraphOutputs, NumGraphConfig, NumberGraph,
    OperationRegistry, Value,
};
use std::sync::Arc;
use std::time::Duration;

fn instance() -> NumberGraph {
    NumberGraph::new(Arc::new(OperationRegistry::with_builtins()))
}

#[test]
fn test_multiply_scenario_outputs() {
    let graph = ScenarioBuilder::new().scalar_from_multiply(2.0, 3.5).build();

    let mut instance = instance();
    instance.compile_and_install(&graph).unwrap();
    assert!(instance.run_once());

    assert_eq!(
        *instance.outputs(),
        GraphOutputs {
            scalar: 7.0,
            vector2: [0.0, 0.0],
            vector3: [0.0, 0.0, 0.0],
        }
    );
}

#[test]
fn test_graph_document_round_trip_compiles_identically() {
    let graph = ScenarioBuilder::new()
        .scalar_from_parameter("gain", 1.5, 2.0)
        .vector2_from_constant([3.0f32, 4.0])
        .vector3_from_random()
        .build();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("graph.json");
    graph.save(&path).unwrap();
    let loaded = Graph::load(&path).unwrap();

    let registry = OperationRegistry::with_builtins();
    let a = GraphCompiler::compile(&graph, &registry).unwrap();
    let b = GraphCompiler::compile(&loaded, &registry).unwrap();
    assert_eq!(a.actions(), b.actions());
    assert_eq!(a.slot_count(), b.slot_count());
}

#[test]
fn test_determinism_with_stubbed_random() {
    let graph = ScenarioBuilder::new()
        .scalar_from_multiply(1.5, 2.0)
        .vector3_from_random()
        .build();

    let mut outputs = Vec::new();
    for _ in 0..2 {
        let mut instance = NumberGraph::new(stub_registry());
        instance.compile_and_install(&graph).unwrap();
        assert!(instance.run_once());
        outputs.push(*instance.outputs());
    }

    assert_eq!(outputs[0], outputs[1]);
    assert_eq!(outputs[0].vector3, STUB_VECTOR3);
    assert_float_eq(outputs[0].scalar, 3.0, 1e-6);
}

#[test]
fn test_seeded_random_is_reproducible() {
    let graph = ScenarioBuilder::new().vector3_from_random().build();
    let config = NumGraphConfig {
        seed: Some(99),
        ..Default::default()
    };

    let run = || {
        let mut instance =
            NumberGraph::from_config(&config, Arc::new(OperationRegistry::with_builtins()))
                .unwrap();
        instance.compile_and_install(&graph).unwrap();
        (0..3)
            .map(|_| {
                assert!(instance.run_once());
                instance.output_vector3()
            })
            .collect::<Vec<_>>()
    };

    let first = run();
    assert_eq!(first, run());
    // A fresh vector every pass
    assert_ne!(first[0], first[1]);
    assert!(first
        .iter()
        .flatten()
        .all(|c| (0.0..1.0).contains(c)));
}

#[test]
fn test_parameter_catalog_and_recompile() {
    let mut graph = ScenarioBuilder::new()
        .scalar_from_parameter("gain", 1.5, 2.0)
        .build();

    let mut instance = instance();
    instance.compile_and_install(&graph).unwrap();
    assert!(instance.run_once());
    assert_eq!(instance.output_scalar(), 3.0);

    let catalog: Vec<_> = instance
        .parameters()
        .iter()
        .map(|p| (p.name.clone(), p.value))
        .collect();
    assert_eq!(catalog, vec![("gain".to_string(), Value::Scalar(1.5))]);

    // Edits only take effect after recompiling
    assert!(graph.set_parameter("gain", 4.0f32));
    assert!(instance.run_once());
    assert_eq!(instance.output_scalar(), 3.0);

    instance.compile_and_install(&graph).unwrap();
    assert!(instance.run_once());
    assert_eq!(instance.output_scalar(), 8.0);
}

#[test]
fn test_compile_errors_surface() {
    let mut cyclic = ScenarioBuilder::new();
    let main = cyclic.main();
    let b = cyclic.graph_builder();
    let x = b.add(0.0, 0.0);
    let y = b.add(0.0, 0.0);
    b.connect(x, MATH_RESULT_PORT, main, MAIN_SCALAR_PORT)
        .connect(y, MATH_RESULT_PORT, x, 0)
        .connect(x, MATH_RESULT_PORT, y, 1);

    let registry = OperationRegistry::with_builtins();
    assert!(matches!(
        GraphCompiler::compile(&cyclic.build(), &registry),
        Err(CompileError::CycleDetected { .. })
    ));

    let mut fan_in = ScenarioBuilder::new().scalar_from_multiply(1.0, 2.0);
    let main = fan_in.main();
    let b = fan_in.graph_builder();
    let extra = b.multiply(3.0, 4.0);
    b.connect(extra, MATH_RESULT_PORT, main, MAIN_SCALAR_PORT);
    assert!(matches!(
        GraphCompiler::compile(&fan_in.build(), &registry),
        Err(CompileError::MultipleInputConnections { count: 2, .. })
    ));
}

#[test]
fn test_failed_compile_keeps_running_program() {
    let mut instance = instance();
    instance
        .compile_and_install(&ScenarioBuilder::new().scalar_from_multiply(2.0, 3.5).build())
        .unwrap();

    let err = instance.compile_and_install(&Graph::new()).unwrap_err();
    assert_eq!(err, CompileError::NoMainNode);

    let passes = (0..30).filter(|_| instance.tick(frame())).count();
    assert_eq!(passes, 1);
    assert_eq!(instance.output_scalar(), 7.0);
}

#[test]
fn test_bridge_installs_between_passes() {
    let (bridge, rx) = GraphBridge::new();
    let registry = OperationRegistry::with_builtins();
    let mut instance = NumberGraph::new(Arc::new(registry.clone())).with_bridge(rx);

    bridge
        .compile_and_install(
            &ScenarioBuilder::new().scalar_from_multiply(2.0, 3.5).build(),
            &registry,
        )
        .unwrap();
    assert!(instance.tick(Duration::from_millis(400)));
    assert_eq!(instance.output_scalar(), 7.0);

    // A rejected graph sends nothing; the old program keeps running
    assert!(bridge.compile_and_install(&Graph::new(), &registry).is_err());
    assert!(instance.tick(Duration::from_millis(400)));
    assert_eq!(instance.output_scalar(), 7.0);

    bridge
        .compile_and_install(
            &ScenarioBuilder::new().scalar_from_multiply(3.0, 3.0).build(),
            &registry,
        )
        .unwrap();
    assert_eq!(instance.output_scalar(), 7.0);
    assert!(instance.tick(Duration::from_millis(400)));
    assert_eq!(instance.output_scalar(), 9.0);
}

#[test]
fn test_scheduler_steps_outputs_at_three_per_second() {
    let graph = ScenarioBuilder::new().vector3_from_random().build();
    let mut instance = NumberGraph::new(stub_registry());
    instance.compile_and_install(&graph).unwrap();

    // Two seconds of 60 fps frames
    let passes = (0..120).filter(|_| instance.tick(frame())).count();
    assert_eq!(passes, 6);
    assert_eq!(instance.output_vector3(), STUB_VECTOR3);

    // One long stall still produces a single pass
    assert!(instance.tick(Duration::from_secs(5)));
    assert!(!instance.tick(frame()));
}

#[test]
fn test_coercion_fallbacks_are_counted() {
    // Vector3 constant wired into the Vector2 output
    let graph = ScenarioBuilder::new()
        .vector2_from_constant([1.0f32, 2.0, 3.0])
        .build();

    let mut instance = instance();
    instance.compile_and_install(&graph).unwrap();
    assert!(instance.run_once());
    assert!(instance.run_once());

    assert_eq!(instance.output_vector2(), [0.0, 0.0]);
    assert_eq!(instance.coercion_stats().last_pass_fallbacks, 1);
    assert_eq!(instance.coercion_stats().fallbacks, 2);
}
