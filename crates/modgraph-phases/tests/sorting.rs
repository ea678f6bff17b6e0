//! Integration tests for phase sequence sorting.
//!
//! These tests go through the public `Phases` API:
//! - Single-phase ordering independent of registration order
//! - Cycle detection
//! - Several phases with cross-phase dependency names
//! - Large generated sequences
//! - Properties checked against petgraph as an independent oracle

use std::collections::HashMap;

use modgraph_phases::{Phase, Phases, SortError, Unit};
use petgraph::algo::is_cyclic_directed;
use petgraph::graph::DiGraph;
use proptest::prelude::*;
use rstest::rstest;

const PHASE_1: &str = "Phase1";
const PHASE_2: &str = "Phase2";
const PHASE_3: &str = "Phase3";

/// A deployment processor: the kind of unit the sorter was built for.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Processor {
    name: String,
    priority: u32,
}

impl Processor {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            priority: 0,
        }
    }
}

impl Unit for Processor {
    fn name(&self) -> &str {
        &self.name
    }
}

fn assert_dependencies_first(phase: &Phase<Processor>, order: &[&str]) {
    let positions: HashMap<&str, usize> = order.iter().enumerate().map(|(i, n)| (*n, i)).collect();
    for unit in phase.unit_names() {
        for dependency in phase.dependencies_of(unit).unwrap() {
            if let Some(dep_pos) = positions.get(dependency.as_str()) {
                assert!(
                    *dep_pos < positions[unit],
                    "{dependency} should come before {unit} in {order:?}"
                );
            }
        }
    }
}

// ============================================================================
// Single Phase
// ============================================================================

#[rstest]
#[case::dependencies_registered_first(false)]
#[case::dependents_registered_first(true)]
fn one_phase_dependencies(#[case] reversed: bool) {
    let mut registrations = vec![
        (Processor::new("four"), vec![]),
        (Processor::new("three"), vec!["four"]),
        (Processor::new("two"), vec!["three", "four"]),
        (Processor::new("one"), vec!["two", "four"]),
    ];
    if reversed {
        registrations.reverse();
    }

    let mut phases = Phases::new([Phase::new(PHASE_1)]);
    for (processor, deps) in registrations {
        phases.add(PHASE_1, processor, deps).unwrap();
    }

    let sorted = phases.sort().unwrap();
    assert_eq!(sorted.len(), 1);
    assert_eq!(sorted[0].phase, PHASE_1);
    assert_eq!(sorted[0].names(), ["four", "three", "two", "one"]);
}

#[test]
fn one_phase_detects_cycle() {
    let mut phases = Phases::new([Phase::new(PHASE_1)]);
    phases.add(PHASE_1, Processor::new("one"), ["two"]).unwrap();
    phases.add(PHASE_1, Processor::new("two"), ["three"]).unwrap();
    phases.add(PHASE_1, Processor::new("three"), ["four"]).unwrap();
    phases.add(PHASE_1, Processor::new("four"), ["one"]).unwrap();

    match phases.sort() {
        Err(SortError::Cycle { phase, unit, cycle }) => {
            assert_eq!(phase, PHASE_1);
            assert_eq!(unit, "one");
            assert_eq!(cycle.first(), cycle.last());
            assert_eq!(cycle.len(), 5);
        }
        other => panic!("expected a cycle, got {other:?}"),
    }
}

#[test]
fn cycle_in_later_phase_aborts_whole_sort() {
    let mut phases = Phases::new([Phase::new(PHASE_1), Phase::new(PHASE_2)]);
    phases.add(PHASE_1, Processor::new("fine"), [] as [&str; 0]).unwrap();
    phases.add(PHASE_2, Processor::new("a"), ["b"]).unwrap();
    phases.add(PHASE_2, Processor::new("b"), ["a"]).unwrap();

    let err = phases.sort().unwrap_err();
    assert!(matches!(err, SortError::Cycle { ref phase, .. } if phase == PHASE_2));
}

#[test]
fn duplicate_registration_is_rejected() {
    let mut phases = Phases::new([Phase::new(PHASE_1)]);
    phases.add(PHASE_1, Processor::new("one"), [] as [&str; 0]).unwrap();

    let mut again = Processor::new("one");
    again.priority = 7;
    let err = phases.add(PHASE_1, again, ["two"]).unwrap_err();

    assert!(matches!(err, SortError::DuplicateUnit { .. }));
    let kept = phases.get(PHASE_1).unwrap().get("one").unwrap();
    assert_eq!(kept.priority, 0);
}

// ============================================================================
// Several Phases
// ============================================================================

#[test]
fn several_phases_dependencies() {
    let mut phases = Phases::new([
        Phase::new(PHASE_1),
        Phase::new(PHASE_2),
        Phase::new(PHASE_3),
    ]);

    phases.add(PHASE_1, Processor::new("one-one"), ["one-two"]).unwrap();
    phases.add(PHASE_1, Processor::new("one-two"), ["one-three", "one-four"]).unwrap();
    phases.add(PHASE_1, Processor::new("one-three"), ["one-four"]).unwrap();
    phases.add(PHASE_1, Processor::new("one-four"), [] as [&str; 0]).unwrap();

    phases.add(PHASE_2, Processor::new("two-one"), ["two-two", "one-two"]).unwrap();
    phases
        .add(
            PHASE_2,
            Processor::new("two-two"),
            ["two-three", "two-four", "one-three", "one-four"],
        )
        .unwrap();
    phases.add(PHASE_2, Processor::new("two-three"), ["two-four", "one-four"]).unwrap();
    phases.add(PHASE_2, Processor::new("two-four"), [] as [&str; 0]).unwrap();

    phases
        .add(PHASE_3, Processor::new("three-one"), ["three-two", "two-two", "one-two"])
        .unwrap();
    phases
        .add(
            PHASE_3,
            Processor::new("three-two"),
            [
                "three-three",
                "three-four",
                "two-three",
                "two-four",
                "one-three",
                "one-four",
            ],
        )
        .unwrap();
    phases
        .add(PHASE_3, Processor::new("three-three"), ["three-four", "two-four", "one-four"])
        .unwrap();
    phases.add(PHASE_3, Processor::new("three-four"), [] as [&str; 0]).unwrap();

    let sorted = phases.sort().unwrap();
    let by_phase: Vec<(&str, Vec<&str>)> = sorted.iter().map(|s| (s.phase, s.names())).collect();

    assert_eq!(
        by_phase,
        vec![
            (PHASE_1, vec!["one-four", "one-three", "one-two", "one-one"]),
            (PHASE_2, vec!["two-four", "two-three", "two-two", "two-one"]),
            (
                PHASE_3,
                vec!["three-four", "three-three", "three-two", "three-one"]
            ),
        ]
    );
    assert!(phases.unresolved_dependencies().is_empty());
}

#[test]
fn registry_spans_all_phases() {
    let mut phases = Phases::new([Phase::new(PHASE_1), Phase::new(PHASE_2)]);
    phases.add(PHASE_1, Processor::new("a"), [] as [&str; 0]).unwrap();
    phases.add(PHASE_2, Processor::new("b"), ["a"]).unwrap();

    let registry = phases.registry();
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.phase_of("a"), Some(0));
    assert_eq!(registry.phase_of("b"), Some(1));
}

// ============================================================================
// Stress
// ============================================================================

fn unit_name(phase: usize, unit: usize) -> String {
    format!("{phase}-{unit}")
}

#[test]
fn generated_phase_sequence_sorts() {
    const PHASES: usize = 20;
    const UNITS_PER_PHASE: usize = 200;
    const CURRENT_PHASE_DEPS: usize = 20;
    const OTHER_PHASE_DEPS: usize = 20;

    let mut phases = Phases::default();
    for p in 0..PHASES {
        let mut phase = Phase::new(format!("Phase{p}"));
        for d in 0..UNITS_PER_PHASE {
            let mut deps: Vec<String> = (d.saturating_sub(CURRENT_PHASE_DEPS)..d)
                .rev()
                .map(|i| unit_name(p, i))
                .collect();
            deps.extend(
                (0..p)
                    .flat_map(|i| (0..UNITS_PER_PHASE).map(move |j| unit_name(i, j)))
                    .take(OTHER_PHASE_DEPS),
            );
            phase.add(Processor::new(&unit_name(p, d)), deps).unwrap();
        }
        phases.push(phase);
    }

    let sorted = phases.sort().unwrap();
    assert_eq!(sorted.len(), PHASES);
    for (phase, result) in phases.iter().zip(&sorted) {
        assert_eq!(result.units.len(), UNITS_PER_PHASE);
        assert_dependencies_first(phase, &result.names());
    }
    assert!(phases.unresolved_dependencies().is_empty());
}

// ============================================================================
// Properties
// ============================================================================

fn edges_strategy() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (1usize..30).prop_flat_map(|n| {
        (
            Just(n),
            prop::collection::vec((0..n, 0..n), 0..(n * 3))
                .prop_map(|edges| edges.into_iter().filter(|(a, b)| a != b).collect()),
        )
    })
}

fn build_phase(n: usize, edges: &[(usize, usize)]) -> Phase<String> {
    let mut deps: Vec<Vec<String>> = vec![Vec::new(); n];
    for (from, to) in edges {
        deps[*from].push(format!("u{to}"));
    }
    let mut phase = Phase::new("generated");
    for (i, d) in deps.into_iter().enumerate() {
        phase.add(format!("u{i}"), d).unwrap();
    }
    phase
}

proptest! {
    #[test]
    fn acyclic_input_sorts_with_dependencies_first((n, edges) in edges_strategy()) {
        // Only keep edges pointing to lower indices: always acyclic.
        let edges: Vec<_> = edges.into_iter().filter(|(a, b)| a > b).collect();
        let phase = build_phase(n, &edges);

        let order: Vec<&str> = phase.sort().unwrap().into_iter().map(String::as_str).collect();
        prop_assert_eq!(order.len(), n);
        let positions: HashMap<&str, usize> =
            order.iter().enumerate().map(|(i, name)| (*name, i)).collect();
        for (from, to) in &edges {
            let from = format!("u{from}");
            let to = format!("u{to}");
            prop_assert!(positions[to.as_str()] < positions[from.as_str()]);
        }
    }

    #[test]
    fn sort_fails_exactly_when_graph_is_cyclic((n, edges) in edges_strategy()) {
        let phase = build_phase(n, &edges);

        let mut graph = DiGraph::<(), ()>::new();
        let nodes: Vec<_> = (0..n).map(|_| graph.add_node(())).collect();
        for (from, to) in &edges {
            graph.add_edge(nodes[*from], nodes[*to], ());
        }

        let result = phase.sort();
        prop_assert_eq!(result.is_err(), is_cyclic_directed(&graph));
        if let Err(SortError::Cycle { unit, cycle, .. }) = result {
            prop_assert_eq!(cycle.first(), Some(&unit));
            prop_assert_eq!(cycle.last(), Some(&unit));
        }
    }

    #[test]
    fn sort_is_deterministic((n, edges) in edges_strategy()) {
        let phase = build_phase(n, &edges);
        let first = phase.sort().map(|units| units.into_iter().cloned().collect::<Vec<_>>());
        let second = phase.sort().map(|units| units.into_iter().cloned().collect::<Vec<_>>());
        prop_assert_eq!(first, second);
    }
}
