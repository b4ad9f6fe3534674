//! Tick-driven runner that evolves a graph and watches its trajectory.
//!
//! The `GraphAutomaton` owns the current generation, records a
//! [`TickResult`] per step, tracks the order growth sequence, and compares
//! each new generation with a window of recent ones to detect cycles.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use gra_core::Graph;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{AutomatonError, AutomatonResult};
use crate::evolver::Evolver;
use crate::rule::RuleCode;

/// Configuration for the automaton.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutomatonConfig {
    /// Maximum ticks per [`GraphAutomaton::run`].
    pub max_ticks: usize,

    /// Number of past generations kept for cycle detection.
    pub history_window: usize,

    /// Compare each new generation with recent ones.
    pub detect_cycles: bool,

    /// Stop a run once the graph has more vertices than this.
    pub max_order: Option<usize>,

    /// Compute configurations on the rayon pool (`parallel` feature).
    pub parallel: bool,
}

impl Default for AutomatonConfig {
    fn default() -> Self {
        Self {
            max_ticks: 100,
            history_window: 16,
            detect_cycles: true,
            max_order: None,
            parallel: false,
        }
    }
}

impl AutomatonConfig {
    /// Create a config for quick iteration (fewer ticks, smaller window).
    pub fn fast() -> Self {
        Self {
            max_ticks: 10,
            history_window: 4,
            ..Default::default()
        }
    }

    /// Create a config for thorough exploration.
    pub fn thorough() -> Self {
        Self {
            max_ticks: 500,
            history_window: 64,
            ..Default::default()
        }
    }

    /// Check that the settings are usable.
    pub fn validate(&self) -> AutomatonResult<()> {
        if self.history_window == 0 {
            return Err(AutomatonError::range(
                "history window must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Result of a single tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickResult {
    /// Generation produced by this tick (the first tick produces 1).
    pub tick: u64,

    /// Order of the new generation.
    pub order: usize,

    /// Alive vertices in the new generation.
    pub alive: usize,

    /// Vertices of the previous generation that divided.
    pub divisions: usize,

    /// Dead-to-alive transitions.
    pub births: usize,

    /// Alive-to-dead transitions.
    pub deaths: usize,

    /// Wall time of the tick, cycle detection included.
    pub duration: Duration,
}

impl TickResult {
    /// Check if the tick changed the topology.
    pub fn had_divisions(&self) -> bool {
        self.divisions > 0
    }

    /// Check if any vertex changed state.
    pub fn had_transitions(&self) -> bool {
        self.births + self.deaths > 0
    }
}

/// A generation that repeats an earlier one up to isomorphism.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cycle {
    /// First generation of the cycle.
    pub start_tick: u64,
    /// Number of ticks between repetitions.
    pub period: u64,
}

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// `max_ticks` ticks were executed.
    MaxTicks,
    /// A generation repeated an earlier one.
    Cycle,
    /// The graph outgrew `max_order`.
    OrderLimit,
}

/// Outcome of [`GraphAutomaton::run`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Generation reached at the end of the run.
    pub final_tick: u64,
    /// Ticks executed by this run.
    pub ticks: usize,
    /// Why the run stopped.
    pub stop_reason: StopReason,
    /// Order of every generation since the last reset.
    pub growth: Vec<usize>,
    /// Detected cycle, if any.
    pub cycle: Option<Cycle>,
}

/// The main runner that evolves a graph under one rule.
pub struct GraphAutomaton {
    /// Generation 0, kept for resets.
    initial: Graph,

    /// Current generation.
    graph: Graph,

    rule: RuleCode,

    config: AutomatonConfig,

    evolver: Evolver,

    /// Current tick counter (index of the current generation).
    current_tick: u64,

    /// History of tick results.
    tick_history: Vec<TickResult>,

    /// Recent generations with their ticks, oldest first.
    recent: VecDeque<(u64, Graph)>,

    /// Order of every generation.
    growth: Vec<usize>,

    /// First cycle found.
    cycle: Option<Cycle>,
}

impl GraphAutomaton {
    /// Create a new automaton with default configuration.
    pub fn new(graph: Graph, rule: RuleCode) -> AutomatonResult<Self> {
        Self::with_config(graph, rule, AutomatonConfig::default())
    }

    /// Create with custom configuration.
    ///
    /// Fails when the config is invalid or `graph` does not satisfy the
    /// rule's precondition.
    pub fn with_config(graph: Graph, rule: RuleCode, config: AutomatonConfig) -> AutomatonResult<Self> {
        config.validate()?;
        let evolver = if config.parallel {
            Evolver::parallel()
        } else {
            Evolver::new()
        };
        evolver.validate(&graph, &rule)?;

        let mut automaton = Self {
            initial: graph.clone(),
            graph,
            rule,
            config,
            evolver,
            current_tick: 0,
            tick_history: Vec::new(),
            recent: VecDeque::new(),
            growth: Vec::new(),
            cycle: None,
        };
        automaton.reset();
        Ok(automaton)
    }

    /// Get reference to the current generation.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Get reference to generation 0.
    pub fn initial(&self) -> &Graph {
        &self.initial
    }

    /// The rule being applied.
    pub fn rule(&self) -> &RuleCode {
        &self.rule
    }

    /// Get the automaton configuration.
    pub fn config(&self) -> &AutomatonConfig {
        &self.config
    }

    /// Get current tick number.
    pub fn tick_count(&self) -> u64 {
        self.current_tick
    }

    /// Get tick history.
    pub fn tick_history(&self) -> &[TickResult] {
        &self.tick_history
    }

    /// Orders of generations `0..=tick_count()`.
    pub fn growth(&self) -> &[usize] {
        &self.growth
    }

    /// First detected cycle, if any.
    pub fn cycle(&self) -> Option<Cycle> {
        self.cycle
    }

    /// Execute a single tick.
    pub fn tick(&mut self) -> AutomatonResult<TickResult> {
        let started = Instant::now();
        debug!(tick = self.current_tick, "automaton_tick_start");

        let (next, report) = self.evolver.step_with_report(&self.graph, &self.rule)?;
        let tick = self.current_tick + 1;

        if self.config.detect_cycles && self.cycle.is_none() {
            self.cycle = self.find_repeat(&next, tick);
            if let Some(cycle) = self.cycle {
                info!(
                    start_tick = cycle.start_tick,
                    period = cycle.period,
                    "automaton_cycle_detected"
                );
            }
        }

        if self.config.detect_cycles {
            self.recent.push_back((tick, next.clone()));
            while self.recent.len() > self.config.history_window {
                self.recent.pop_front();
            }
        }

        let result = TickResult {
            tick,
            order: next.order(),
            alive: next.alive_count(),
            divisions: report.divisions,
            births: report.births,
            deaths: report.deaths,
            duration: started.elapsed(),
        };

        self.graph = next;
        self.current_tick = tick;
        self.growth.push(result.order);
        self.tick_history.push(result.clone());

        debug!(
            tick = result.tick,
            order = result.order,
            alive = result.alive,
            divisions = result.divisions,
            duration_us = result.duration.as_micros() as u64,
            "automaton_tick_complete"
        );

        Ok(result)
    }

    /// Run until a cycle, the order limit, or `max_ticks`.
    pub fn run(&mut self) -> AutomatonResult<RunSummary> {
        info!(
            max_ticks = self.config.max_ticks,
            rule = self.rule.number(),
            degree = self.rule.degree(),
            "automaton_run_start"
        );

        let mut ticks = 0;
        let mut stop_reason = StopReason::MaxTicks;
        let had_cycle = self.cycle.is_some();

        while ticks < self.config.max_ticks {
            let result = self.tick()?;
            ticks += 1;

            if !had_cycle && self.cycle.is_some() {
                stop_reason = StopReason::Cycle;
                break;
            }
            if let Some(limit) = self.config.max_order {
                if result.order > limit {
                    warn!(tick = result.tick, order = result.order, limit, "automaton_order_limit");
                    stop_reason = StopReason::OrderLimit;
                    break;
                }
            }
        }

        info!(
            ticks,
            final_tick = self.current_tick,
            order = self.graph.order(),
            ?stop_reason,
            "automaton_run_complete"
        );

        Ok(RunSummary {
            final_tick: self.current_tick,
            ticks,
            stop_reason,
            growth: self.growth.clone(),
            cycle: self.cycle,
        })
    }

    /// Run exactly N ticks.
    pub fn run_ticks(&mut self, n: usize) -> AutomatonResult<Vec<TickResult>> {
        let mut results = Vec::with_capacity(n);
        for _ in 0..n {
            results.push(self.tick()?);
        }
        Ok(results)
    }

    /// Restore generation 0 and clear all history.
    pub fn reset(&mut self) {
        self.graph = self.initial.clone();
        self.current_tick = 0;
        self.tick_history.clear();
        self.growth = vec![self.initial.order()];
        self.cycle = None;
        self.recent.clear();
        if self.config.detect_cycles {
            self.recent.push_back((0, self.initial.clone()));
        }
    }

    fn find_repeat(&self, next: &Graph, tick: u64) -> Option<Cycle> {
        let alive = next.alive_count();
        self.recent
            .iter()
            .rev()
            .find(|(_, earlier)| {
                earlier.order() == next.order()
                    && earlier.alive_count() == alive
                    && earlier.isomorphic(next)
            })
            .map(|&(start_tick, _)| Cycle {
                start_tick,
                period: tick - start_tick,
            })
    }
}

impl std::fmt::Debug for GraphAutomaton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphAutomaton")
            .field("order", &self.graph.order())
            .field("edge_count", &self.graph.edge_count())
            .field("current_tick", &self.current_tick)
            .field("rule", &self.rule)
            .finish()
    }
}
