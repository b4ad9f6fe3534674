//! Graphs for graph-rewriting automata.
//!
//! A graph-rewriting automaton evolves a finite graph whose vertices carry a
//! binary state. This crate holds the graph value itself and the structural
//! questions asked about it:
//!
//! - [`Graph`]: symmetric weighted adjacency plus a per-vertex state vector,
//!   immutable once built
//! - [`IsomorphismChecker`]: exact isomorphism that preserves both weights and
//!   states
//! - [`generators`]: complete graphs, cycles, prisms and other regular families
//!
//! Rules and time evolution live in `gra-automaton`.
//!
//! ```
//! use gra_core::{generators, Graph};
//!
//! let g = generators::complete(4, vec![1, 0, 0, 0]).unwrap();
//! let h = Graph::from_rows(
//!     &[[0u32, 1, 1, 1], [1, 0, 1, 1], [1, 1, 0, 1], [1, 1, 1, 0]],
//!     vec![0, 0, 1, 0],
//! )
//! .unwrap();
//!
//! assert!(g.isomorphic(&h));
//! assert!(!g.equals_structurally(&h));
//! ```

mod error;
pub mod generators;
mod graph;
mod isomorphism;

pub use error::{GraphError, GraphResult};
pub use graph::{Graph, GraphData, ALIVE, DEAD};
pub use isomorphism::IsomorphismChecker;
