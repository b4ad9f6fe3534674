//! Integration tests for gra-automaton: evolution invariants and runner
//! behavior on small regular graphs.

use gra_automaton::{
    AutomatonConfig, Evolver, ExperimentDescription, GraphAutomaton, RuleCode, StopReason,
};
use gra_core::{generators, Graph};

// ============================================================================
// Fixtures
// ============================================================================

fn cubic_ten() -> Graph {
    generators::cubic_ten(generators::CUBIC_TEN_STATE.to_vec()).unwrap()
}

fn k4_one_alive() -> Graph {
    Graph::from_rows(
        &[
            [0u32, 1, 1, 1],
            [1, 0, 1, 1],
            [1, 1, 0, 1],
            [1, 1, 1, 0],
        ],
        vec![1, 0, 0, 0],
    )
    .unwrap()
}

/// Truncated tetrahedron: vertex `(v, u)` for `v != u` in `0..4`.
fn truncated_tetrahedron() -> Graph {
    let index = |v: usize, u: usize| v * 3 + if u < v { u } else { u - 1 };
    let mut edges = Vec::new();
    for v in 0..4 {
        for u in 0..4 {
            if u == v {
                continue;
            }
            for w in (u + 1)..4 {
                if w != v {
                    edges.push((index(v, u), index(v, w), 1));
                }
            }
            if v < u {
                edges.push((index(v, u), index(u, v), 1));
            }
        }
    }
    Graph::from_edges(12, edges, vec![0; 12]).unwrap()
}

fn assert_closed(graph: &Graph, degree: usize) {
    assert!(graph.is_simple(), "output must be simple");
    assert!(graph.is_binary(), "output must be binary-stated");
    assert!(graph.is_regular(degree), "output must be {degree}-regular");
}

// ============================================================================
// Evolution properties
// ============================================================================

#[test]
fn step_is_deterministic() {
    let g = cubic_ten();
    let rule = RuleCode::new(3, 2236).unwrap();
    let evolver = Evolver::new();

    let a = evolver.step(&g.clone(), &rule).unwrap();
    let b = evolver.step(&g.clone(), &rule).unwrap();
    assert!(a.equals_structurally(&b));
}

#[test]
fn jump_composes() {
    let g = cubic_ten();
    let rule = RuleCode::new(3, 2236).unwrap();
    let evolver = Evolver::new();

    for m in 0..3 {
        for n in 0..3 {
            let direct = evolver.jump(&g, &rule, m + n).unwrap();
            let split = evolver
                .jump(&evolver.jump(&g, &rule, m).unwrap(), &rule, n)
                .unwrap();
            assert!(direct.equals_structurally(&split), "m={m} n={n}");
        }
    }
}

#[test]
fn jump_zero_returns_equal_graph() {
    let g = cubic_ten();
    let rule = RuleCode::new(3, 2236).unwrap();
    assert!(rule.jump(&g, 0).unwrap().equals_structurally(&g));
}

#[test]
fn regularity_is_closed_across_rule_space() {
    let evolver = Evolver::new();
    let prism = generators::prism(4, vec![0, 1, 1, 0, 1, 0, 0, 1]).unwrap();

    for number in (0..=65535u64).step_by(617) {
        let rule = RuleCode::new(3, number).unwrap();
        for start in [cubic_ten(), prism.clone()] {
            let mut current = start;
            for _ in 0..2 {
                let (next, report) = evolver.step_with_report(&current, &rule).unwrap();

                assert_closed(&next, 3);
                assert_eq!(next.order(), current.order() + 2 * report.divisions);
                assert!(next.order() >= current.order());
                current = next;
            }
        }
    }
}

#[test]
fn order_counts_dividing_vertices() {
    let g = cubic_ten();
    let rule = RuleCode::new(3, 2236).unwrap();
    let evolver = Evolver::new();

    let configs = evolver.configurations(&g, &rule).unwrap();
    let dividing = configs
        .iter()
        .filter(|&&c| rule.divides(c).unwrap())
        .count();
    let next = evolver.step(&g, &rule).unwrap();

    assert_eq!(next.order(), (g.order() - dividing) + 3 * dividing);
}

#[test]
fn configuration_vector_matches_formula() {
    let g = cubic_ten();
    let rule = RuleCode::new(3, 2236).unwrap();
    let configs = Evolver::new().configurations(&g, &rule).unwrap();

    for (v, &c) in configs.iter().enumerate() {
        let alive: usize = g
            .neighbors(v)
            .unwrap()
            .into_iter()
            .map(|u| usize::from(g.state_of(u).unwrap()))
            .sum();
        assert_eq!(c, 4 * usize::from(g.state_of(v).unwrap()) + alive);
    }
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn rule_zero_on_k4_clears_states() {
    let g = k4_one_alive();
    let rule = RuleCode::new(3, 0).unwrap();

    let next = Evolver::new().step(&g, &rule).unwrap();

    assert_eq!(next.states(), &[0, 0, 0, 0]);
    let dead_k4 = g.with_states(vec![0; 4]).unwrap();
    assert!(next.isomorphic(&dead_k4));
}

#[test]
fn k4_single_alive_vertex_positions_are_isomorphic() {
    let a = k4_one_alive();
    let b = a.with_states(vec![0, 0, 1, 0]).unwrap();
    assert!(a.isomorphic(&b));
    assert!(b.isomorphic(&a));
}

#[test]
fn full_division_of_k4_is_truncated_tetrahedron() {
    let rule = RuleCode::from_tables(3, &[0; 8], &[true; 8]).unwrap();
    let next = Evolver::new().step(&k4_one_alive(), &rule).unwrap();

    assert_eq!(next.order(), 12);
    assert_closed(&next, 3);
    assert!(next.isomorphic(&truncated_tetrahedron()));
}

#[test]
fn full_division_doubles_a_cycle() {
    let rule = RuleCode::from_tables(2, &[1; 6], &[true; 6]).unwrap();
    let c5 = generators::cycle(5, vec![1, 0, 0, 1, 0]).unwrap();

    let next = Evolver::new().step(&c5, &rule).unwrap();

    assert!(next.isomorphic(&generators::cycle(10, vec![1; 10]).unwrap()));
}

#[test]
fn degree_one_division_keeps_order() {
    let matching = Graph::from_edges(4, [(0, 1, 1), (2, 3, 1)], vec![1, 0, 0, 0]).unwrap();
    let rule = RuleCode::from_tables(1, &[0, 1, 1, 0], &[true; 4]).unwrap();

    let next = Evolver::new().step(&matching, &rule).unwrap();

    assert_eq!(next.order(), 4);
    assert_closed(&next, 1);
    assert_eq!(next.states(), &[1, 1, 0, 0]);
}

#[test]
fn input_graph_is_not_mutated() {
    let g = cubic_ten();
    let snapshot = g.clone();
    let rule = RuleCode::new(3, 2236).unwrap();

    let _ = rule.jump(&g, 4).unwrap();
    assert!(g.equals_structurally(&snapshot));
}

// ============================================================================
// Runner
// ============================================================================

#[test]
fn growth_under_rule_2236() {
    let config = AutomatonConfig {
        max_ticks: 8,
        detect_cycles: false,
        ..Default::default()
    };
    let mut automaton =
        GraphAutomaton::with_config(cubic_ten(), RuleCode::new(3, 2236).unwrap(), config).unwrap();

    let summary = automaton.run().unwrap();

    assert_eq!(summary.stop_reason, StopReason::MaxTicks);
    assert_eq!(summary.growth.len(), 9);
    assert!(summary.growth.windows(2).all(|w| w[0] <= w[1]));
    for (result, pair) in automaton.tick_history().iter().zip(summary.growth.windows(2)) {
        assert_eq!(pair[1], pair[0] + 2 * result.divisions);
    }
    assert_closed(automaton.graph(), 3);

    let direct = RuleCode::new(3, 2236).unwrap().jump(&cubic_ten(), 8).unwrap();
    assert!(automaton.graph().equals_structurally(&direct));
}

#[test]
fn blinking_states_form_period_two_cycle() {
    // Every vertex flips: dead -> alive, alive -> dead.
    let rule = RuleCode::from_tables(3, &[1, 1, 1, 1, 0, 0, 0, 0], &[false; 8]).unwrap();
    let mut automaton = GraphAutomaton::new(k4_one_alive(), rule).unwrap();

    let summary = automaton.run().unwrap();

    assert_eq!(summary.stop_reason, StopReason::Cycle);
    let cycle = summary.cycle.unwrap();
    assert_eq!(cycle.period, 2);
    assert_eq!(cycle.start_tick, 0);
}

#[test]
fn sample_experiment_runs() {
    let description = ExperimentDescription::sample()
        .unwrap()
        .with_config(AutomatonConfig::fast());
    let mut automaton = description.build_automaton().unwrap();

    let summary = automaton.run().unwrap();
    assert!(summary.ticks <= 10);
    assert_eq!(summary.growth[0], 10);
}
