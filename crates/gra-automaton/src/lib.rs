//! Graph-rewriting automata: discrete-time evolution of binary-stated,
//! regular graphs under local rules that may divide vertices.
//!
//! ## Core Concepts
//!
//! - **Configuration**: `c(v) = (d+1) s(v) + sum of neighbor states`, one of
//!   `2(d+1)` values for a vertex of degree `d`
//! - **RuleCode**: next-state and division tables for every configuration,
//!   packed into a single rule number
//! - **Division**: replacing a vertex by a complete graph on `d` vertices
//! - **Evolver**: applies a rule to every vertex of one snapshot at once
//! - **GraphAutomaton**: repeated ticks with growth and cycle tracking
//!
//! ## The Rule Number
//!
//! ```text
//! n = sum over c of  2^c * R(c)  +  2^(c + 2(d+1)) * R'(c)
//!
//! R(c)  = next state for configuration c
//! R'(c) = 1 if configuration c divides
//! ```
//!
//! ```
//! use gra_automaton::{Evolver, RuleCode};
//! use gra_core::generators;
//!
//! let g0 = generators::cubic_ten(generators::CUBIC_TEN_STATE.to_vec()).unwrap();
//! let rule = RuleCode::new(3, 2236).unwrap();
//!
//! let g1 = Evolver::new().step(&g0, &rule).unwrap();
//! assert_eq!(g1.regular_degree(), Some(3));
//! ```
//!
//! ## Features
//!
//! - `parallel` - compute configuration vectors with rayon

mod automaton;
pub mod config;
mod error;
mod evolver;
pub mod rule;

pub use automaton::{AutomatonConfig, Cycle, GraphAutomaton, RunSummary, StopReason, TickResult};
pub use config::{ExperimentDescription, ExperimentMeta};
pub use error::{AutomatonError, AutomatonResult};
pub use evolver::{Evolver, StepReport};
pub use rule::{RuleCode, RuleEntry, RuleSpec, MAX_DEGREE};
