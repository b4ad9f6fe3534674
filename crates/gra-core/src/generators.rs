//! Constructors for common unweighted regular graph families.
//!
//! Every generator takes the initial state vector and fails with
//! [`GraphError::Shape`](crate::GraphError::Shape) when its length does not
//! match the family's order.

use crate::error::{GraphError, GraphResult};
use crate::graph::Graph;

/// Complete graph `K_n`, `(n - 1)`-regular.
pub fn complete(n: usize, state: Vec<u8>) -> GraphResult<Graph> {
    let edges = (0..n).flat_map(|i| ((i + 1)..n).map(move |j| (i, j, 1)));
    Graph::from_edges(n, edges, state)
}

/// Cycle `C_n` for `n >= 3`, 2-regular.
pub fn cycle(n: usize, state: Vec<u8>) -> GraphResult<Graph> {
    if n < 3 {
        return Err(GraphError::Shape {
            message: format!("a simple cycle needs at least 3 vertices, got {n}"),
        });
    }
    Graph::from_edges(n, (0..n).map(|i| (i, (i + 1) % n, 1)), state)
}

/// Circular ladder (prism) on `2n` vertices for `n >= 3`, 3-regular.
///
/// Vertices `0..n` form the outer cycle, `n..2n` the inner cycle, and `i` is
/// joined to `i + n`.
pub fn prism(n: usize, state: Vec<u8>) -> GraphResult<Graph> {
    if n < 3 {
        return Err(GraphError::Shape {
            message: format!("a prism needs cycles of at least 3 vertices, got {n}"),
        });
    }
    let outer = (0..n).map(|i| (i, (i + 1) % n, 1));
    let inner = (0..n).map(|i| (n + i, n + (i + 1) % n, 1));
    let spokes = (0..n).map(|i| (i, n + i, 1));
    Graph::from_edges(2 * n, outer.chain(inner).chain(spokes), state)
}

/// The Petersen graph, 3-regular on 10 vertices.
pub fn petersen(state: Vec<u8>) -> GraphResult<Graph> {
    let outer = (0..5).map(|i| (i, (i + 1) % 5, 1));
    let spokes = (0..5).map(|i| (i, i + 5, 1));
    let star = (0..5).map(|i| (i + 5, (i + 2) % 5 + 5, 1));
    Graph::from_edges(10, outer.chain(spokes).chain(star), state)
}

/// The ten-vertex cubic graph used as the reference initial graph for
/// degree-3 rules such as rule 2236.
pub fn cubic_ten(state: Vec<u8>) -> GraphResult<Graph> {
    const EDGES: [(usize, usize); 15] = [
        (0, 1),
        (0, 8),
        (0, 9),
        (1, 2),
        (1, 3),
        (2, 3),
        (2, 4),
        (3, 5),
        (4, 5),
        (4, 6),
        (5, 7),
        (6, 7),
        (6, 8),
        (7, 9),
        (8, 9),
    ];
    Graph::from_edges(10, EDGES.iter().map(|&(i, j)| (i, j, 1)), state)
}

/// Initial state of [`cubic_ten`] in the rule 2236 growth experiment.
pub const CUBIC_TEN_STATE: [u8; 10] = [1, 0, 0, 0, 0, 1, 1, 0, 1, 1];
