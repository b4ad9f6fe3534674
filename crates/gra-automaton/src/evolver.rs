//! One-step evolution of a graph under a rule code.
//!
//! A step reads a single snapshot of the input graph:
//!
//! 1. validate that the graph is simple, binary-stated and d-regular,
//! 2. compute every vertex's configuration and look up its next state and
//!    division flag,
//! 3. assign output indices (one per surviving vertex, `d` consecutive ones
//!    per dividing vertex) before writing any edge,
//! 4. emit the edges purely through that index table.
//!
//! ## Division
//!
//! A dividing vertex becomes a complete graph on `d` children. The neighbors
//! of a vertex, sorted by ascending index, are its ports `0..d`; child `k`
//! inherits the external edge of port `k`. An old edge `{v, u}` therefore
//! joins `child(v, port of u at v)` to `child(u, port of v at u)`, where a
//! non-dividing vertex is its own single child. Every child ends up with
//! `d - 1` siblings plus one external edge, and every surviving vertex keeps
//! one edge per old neighbor, so the output is again simple and d-regular.

use gra_core::Graph;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{AutomatonError, AutomatonResult};
use crate::rule::{configuration, RuleCode};

/// Counts describing what one step did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepReport {
    /// Order of the input graph.
    pub order_before: usize,
    /// Order of the output graph.
    pub order_after: usize,
    /// Input vertices that divided.
    pub divisions: usize,
    /// Input vertices that went from dead to alive.
    pub births: usize,
    /// Input vertices that went from alive to dead.
    pub deaths: usize,
}

/// Stateless evolution engine.
///
/// Holds no data between calls; the only setting is whether the
/// configuration phase runs on the rayon thread pool (effective with the
/// `parallel` feature, sequential otherwise). Both paths produce identical
/// results.
#[derive(Debug, Clone, Copy, Default)]
pub struct Evolver {
    parallel: bool,
}

impl Evolver {
    /// Create a sequential evolver.
    pub fn new() -> Self {
        Self { parallel: false }
    }

    /// Create an evolver that computes configurations in parallel.
    pub fn parallel() -> Self {
        Self { parallel: true }
    }

    /// Whether the configuration phase is parallel.
    pub fn is_parallel(&self) -> bool {
        self.parallel && cfg!(feature = "parallel")
    }

    /// Check that `graph` can be evolved by `rule`.
    pub fn validate(&self, graph: &Graph, rule: &RuleCode) -> AutomatonResult<()> {
        let degree = rule.degree();
        for v in 0..graph.order() {
            let state = graph.state_of(v)?;
            if state > 1 {
                return Err(AutomatonError::regularity(format!(
                    "vertex {v} has non-binary state {state}"
                )));
            }

            let row = graph.incident(v)?;
            for &(u, w) in row {
                if u == v {
                    return Err(AutomatonError::regularity(format!(
                        "vertex {v} has a self-loop"
                    )));
                }
                if w != 1 {
                    return Err(AutomatonError::regularity(format!(
                        "edge ({v}, {u}) has weight {w}, expected 1"
                    )));
                }
            }
            if row.len() != degree {
                return Err(AutomatonError::regularity(format!(
                    "vertex {v} has {} neighbors, {rule} expects {degree}",
                    row.len()
                )));
            }
        }
        Ok(())
    }

    /// Configuration vector `C = (d+1) S + A S`.
    pub fn configurations(&self, graph: &Graph, rule: &RuleCode) -> AutomatonResult<Vec<usize>> {
        self.validate(graph, rule)?;
        Ok(self.configurations_unchecked(graph, rule))
    }

    fn configurations_unchecked(&self, graph: &Graph, rule: &RuleCode) -> Vec<usize> {
        let degree = rule.degree();
        let states = graph.states();
        let config_of = |v: usize| -> usize {
            let alive = graph
                .incident(v)
                .map(|row| row.iter().map(|&(u, _)| usize::from(states[u])).sum())
                .unwrap_or(0);
            configuration(degree, states[v], alive)
        };

        #[cfg(feature = "parallel")]
        if self.parallel {
            return (0..graph.order()).into_par_iter().map(config_of).collect();
        }

        (0..graph.order()).map(config_of).collect()
    }

    /// Advance `graph` by one time step.
    pub fn step(&self, graph: &Graph, rule: &RuleCode) -> AutomatonResult<Graph> {
        self.step_with_report(graph, rule).map(|(next, _)| next)
    }

    /// Advance `graph` by one time step and report what changed.
    pub fn step_with_report(
        &self,
        graph: &Graph,
        rule: &RuleCode,
    ) -> AutomatonResult<(Graph, StepReport)> {
        self.validate(graph, rule)?;

        let degree = rule.degree();
        let order = graph.order();
        let outcomes: Vec<(u8, bool)> = self
            .configurations_unchecked(graph, rule)
            .into_iter()
            .map(|c| rule.outcome(c))
            .collect();

        let mut report = StepReport {
            order_before: order,
            ..Default::default()
        };

        // First output index of every input vertex.
        let mut base = Vec::with_capacity(order);
        let mut next_index = 0;
        for (v, &(new_state, divides)) in outcomes.iter().enumerate() {
            base.push(next_index);
            next_index += if divides { degree } else { 1 };

            let old_state = graph.states()[v];
            if divides {
                report.divisions += 1;
            }
            if old_state == 0 && new_state == 1 {
                report.births += 1;
            } else if old_state == 1 && new_state == 0 {
                report.deaths += 1;
            }
        }
        let new_order = next_index;
        report.order_after = new_order;

        let endpoint = |v: usize, port: usize| -> usize {
            if outcomes[v].1 {
                base[v] + port
            } else {
                base[v]
            }
        };

        let mut state = vec![0u8; new_order];
        let mut edges = Vec::with_capacity(new_order * degree / 2);
        for v in 0..order {
            let (new_state, divides) = outcomes[v];
            let span = if divides { degree } else { 1 };
            state[base[v]..base[v] + span].fill(new_state);

            if divides {
                for a in 0..degree {
                    for b in (a + 1)..degree {
                        edges.push((base[v] + a, base[v] + b, 1));
                    }
                }
            }

            for (port, &(u, _)) in graph.incident(v)?.iter().enumerate() {
                if u < v {
                    continue;
                }
                let back_port = graph
                    .incident(u)?
                    .binary_search_by_key(&v, |&(x, _)| x)
                    .map_err(|_| {
                        AutomatonError::regularity(format!("edge ({v}, {u}) is not symmetric"))
                    })?;
                edges.push((endpoint(v, port), endpoint(u, back_port), 1));
            }
        }

        let next = Graph::from_edges(new_order, edges, state)?;

        debug!(
            order_before = report.order_before,
            order_after = report.order_after,
            divisions = report.divisions,
            "evolution_step_complete"
        );

        Ok((next, report))
    }

    /// Apply [`step`](Self::step) `steps` times; zero steps returns a clone.
    pub fn jump(&self, graph: &Graph, rule: &RuleCode, steps: u64) -> AutomatonResult<Graph> {
        let mut current = graph.clone();
        for _ in 0..steps {
            current = self.step(&current, rule)?;
        }
        Ok(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gra_core::generators;

    #[test]
    fn test_configurations_of_k4() {
        let g = generators::complete(4, vec![1, 0, 0, 0]).unwrap();
        let rule = RuleCode::new(3, 0).unwrap();

        let configs = Evolver::new().configurations(&g, &rule).unwrap();
        assert_eq!(configs, vec![4, 1, 1, 1]);
    }

    #[test]
    fn test_rule_zero_kills_everything() {
        let g = generators::complete(4, vec![1, 0, 0, 0]).unwrap();
        let rule = RuleCode::new(3, 0).unwrap();

        let (next, report) = Evolver::new().step_with_report(&g, &rule).unwrap();
        assert_eq!(next.states(), &[0, 0, 0, 0]);
        assert_eq!(next.rows(), g.rows());
        assert_eq!(report.deaths, 1);
        assert_eq!(report.divisions, 0);
    }

    #[test]
    fn test_single_division_in_k4() {
        // Only configuration 4 (alive, no alive neighbors) divides.
        let mut divides = [false; 8];
        divides[4] = true;
        let rule = RuleCode::from_tables(3, &[0, 0, 0, 0, 1, 0, 0, 0], &divides).unwrap();
        let g = generators::complete(4, vec![1, 0, 0, 0]).unwrap();

        let (next, report) = Evolver::new().step_with_report(&g, &rule).unwrap();

        assert_eq!(report.divisions, 1);
        assert_eq!(next.order(), 6);
        assert_eq!(next.regular_degree(), Some(3));
        assert!(next.is_simple());
        // Children 0..3 form a triangle and inherit the alive state.
        assert_eq!(next.states(), &[1, 1, 1, 0, 0, 0]);
        assert_eq!(next.neighbors(0).unwrap(), vec![1, 2, 3]);
        assert_eq!(next.neighbors(1).unwrap(), vec![0, 2, 4]);
        assert_eq!(next.neighbors(2).unwrap(), vec![0, 1, 5]);
        assert_eq!(next.neighbors(3).unwrap(), vec![0, 4, 5]);
    }

    #[test]
    fn test_rejects_irregular_graph() {
        let path = Graph::from_edges(3, [(0, 1, 1), (1, 2, 1)], vec![0, 0, 0]).unwrap();
        let rule = RuleCode::new(2, 0).unwrap();

        let err = Evolver::new().step(&path, &rule).unwrap_err();
        assert!(matches!(err, AutomatonError::Regularity { .. }));
    }

    #[test]
    fn test_rejects_weighted_loop_and_nonbinary() {
        let rule = RuleCode::new(2, 0).unwrap();
        let evolver = Evolver::new();

        let weighted = Graph::from_edges(3, [(0, 1, 2), (1, 2, 1), (2, 0, 1)], vec![0; 3]).unwrap();
        assert!(matches!(
            evolver.step(&weighted, &rule),
            Err(AutomatonError::Regularity { .. })
        ));

        let looped = Graph::from_edges(2, [(0, 0, 1), (0, 1, 1), (1, 1, 1)], vec![0; 2]).unwrap();
        assert!(matches!(
            evolver.step(&looped, &rule),
            Err(AutomatonError::Regularity { .. })
        ));

        let triangle = generators::cycle(3, vec![0, 2, 0]).unwrap();
        assert!(matches!(
            evolver.step(&triangle, &rule),
            Err(AutomatonError::Regularity { .. })
        ));
    }

    #[test]
    fn test_jump_zero_is_identity() {
        let g = generators::petersen(vec![1, 0, 1, 0, 0, 0, 1, 1, 0, 0]).unwrap();
        let rule = RuleCode::new(3, 2236).unwrap();

        let same = Evolver::new().jump(&g, &rule, 0).unwrap();
        assert!(same.equals_structurally(&g));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let g = generators::cubic_ten(generators::CUBIC_TEN_STATE.to_vec()).unwrap();
        let rule = RuleCode::new(3, 2236).unwrap();

        let sequential = Evolver::new().jump(&g, &rule, 3).unwrap();
        let parallel = Evolver::parallel().jump(&g, &rule, 3).unwrap();
        assert_eq!(sequential, parallel);
    }
}
