//! The graph value type: weighted adjacency plus one state per vertex.
//!
//! A [`Graph`] is constructed once and never mutated. Evolution produces new
//! graphs, so older generations stay valid for inspection and comparison.

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, GraphResult};
use crate::isomorphism::IsomorphismChecker;

/// State value of a dead vertex.
pub const DEAD: u8 = 0;

/// State value of an alive vertex.
pub const ALIVE: u8 = 1;

/// An undirected, edge-weighted graph with a state value on every vertex.
///
/// The adjacency matrix is stored row-sparse: each row keeps its non-zero
/// `(column, weight)` entries sorted by column. The matrix is symmetric by
/// construction. Self-loops are representable (diagonal entries); rules
/// reject them at evolution time, not here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "GraphData", into = "GraphData")]
pub struct Graph {
    adjacency: Vec<Vec<(usize, u32)>>,
    state: Vec<u8>,
}

/// Plain wire form of a [`Graph`]: dense row-major adjacency and a flat state
/// vector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphData {
    /// Square, symmetric adjacency rows.
    pub adjacency: Vec<Vec<u32>>,
    /// One state value per vertex.
    pub state: Vec<u8>,
}

impl TryFrom<GraphData> for Graph {
    type Error = GraphError;

    fn try_from(data: GraphData) -> GraphResult<Self> {
        Graph::from_rows(&data.adjacency, data.state)
    }
}

impl From<Graph> for GraphData {
    fn from(graph: Graph) -> Self {
        GraphData {
            adjacency: graph.rows(),
            state: graph.state,
        }
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::empty()
    }
}

impl Graph {
    /// The graph with no vertices.
    pub fn empty() -> Self {
        Self {
            adjacency: Vec::new(),
            state: Vec::new(),
        }
    }

    /// Build a graph from nested adjacency rows and a state vector.
    ///
    /// Fails with [`GraphError::Shape`] when the rows do not form a square
    /// symmetric matrix or when `state.len()` differs from the row count.
    pub fn from_rows<R: AsRef<[u32]>>(rows: &[R], state: Vec<u8>) -> GraphResult<Self> {
        let order = rows.len();
        if state.len() != order {
            return Err(GraphError::shape(format!(
                "state vector has {} entries but adjacency has {} rows",
                state.len(),
                order
            )));
        }

        for (i, row) in rows.iter().enumerate() {
            let len = row.as_ref().len();
            if len != order {
                return Err(GraphError::shape(format!(
                    "adjacency row {i} has {len} entries, expected {order}"
                )));
            }
        }

        let mut adjacency = Vec::with_capacity(order);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let mut entries = Vec::new();
            for (j, &w) in row.iter().enumerate() {
                if w != rows[j].as_ref()[i] {
                    return Err(GraphError::shape(format!(
                        "adjacency is not symmetric at ({i}, {j})"
                    )));
                }
                if w != 0 {
                    entries.push((j, w));
                }
            }
            adjacency.push(entries);
        }

        Ok(Self { adjacency, state })
    }

    /// Build a graph from a flat row-major `order × order` adjacency slice.
    pub fn new(order: usize, adjacency: &[u32], state: Vec<u8>) -> GraphResult<Self> {
        if order.checked_mul(order) != Some(adjacency.len()) {
            return Err(GraphError::shape(format!(
                "adjacency has {} entries, expected {}x{}",
                adjacency.len(),
                order,
                order
            )));
        }
        let rows: Vec<&[u32]> = if order == 0 {
            Vec::new()
        } else {
            adjacency.chunks(order).collect()
        };
        Self::from_rows(&rows, state)
    }

    /// Build a graph of `order` vertices from an undirected weighted edge
    /// list.
    ///
    /// Each `(i, j, w)` sets both `(i, j)` and `(j, i)` to `w`. Zero weights
    /// are ignored and an edge may be listed in both directions, but listing
    /// the same pair with two different weights is a shape error.
    pub fn from_edges<I>(order: usize, edges: I, state: Vec<u8>) -> GraphResult<Self>
    where
        I: IntoIterator<Item = (usize, usize, u32)>,
    {
        if state.len() != order {
            return Err(GraphError::shape(format!(
                "state vector has {} entries but graph has order {}",
                state.len(),
                order
            )));
        }

        let mut adjacency: Vec<Vec<(usize, u32)>> = vec![Vec::new(); order];
        for (i, j, w) in edges {
            for index in [i, j] {
                if index >= order {
                    return Err(GraphError::Index { index, order });
                }
            }
            if w == 0 {
                continue;
            }
            adjacency[i].push((j, w));
            if i != j {
                adjacency[j].push((i, w));
            }
        }

        for (i, row) in adjacency.iter_mut().enumerate() {
            row.sort_unstable();
            let mut deduped: Vec<(usize, u32)> = Vec::with_capacity(row.len());
            for &(j, w) in row.iter() {
                match deduped.last() {
                    Some(&(prev, prev_w)) if prev == j => {
                        if prev_w != w {
                            return Err(GraphError::shape(format!(
                                "edge ({i}, {j}) listed with weights {prev_w} and {w}"
                            )));
                        }
                    }
                    _ => deduped.push((j, w)),
                }
            }
            *row = deduped;
        }

        Ok(Self {
            adjacency,
            state,
        })
    }

    /// Number of vertices.
    pub fn order(&self) -> usize {
        self.state.len()
    }

    fn check(&self, index: usize) -> GraphResult<()> {
        if index < self.order() {
            Ok(())
        } else {
            Err(GraphError::Index {
                index,
                order: self.order(),
            })
        }
    }

    /// Vertices `j` with a non-zero weight to `v`, in ascending order.
    pub fn neighbors(&self, v: usize) -> GraphResult<Vec<usize>> {
        Ok(self.incident(v)?.iter().map(|&(j, _)| j).collect())
    }

    /// Non-zero `(neighbor, weight)` entries of row `v`, sorted by neighbor.
    pub fn incident(&self, v: usize) -> GraphResult<&[(usize, u32)]> {
        self.check(v)?;
        Ok(&self.adjacency[v])
    }

    /// Adjacency entry `(i, j)`; zero when there is no edge.
    pub fn weight(&self, i: usize, j: usize) -> GraphResult<u32> {
        self.check(i)?;
        self.check(j)?;
        Ok(self.weight_unchecked(i, j))
    }

    pub(crate) fn weight_unchecked(&self, i: usize, j: usize) -> u32 {
        let row = &self.adjacency[i];
        match row.binary_search_by_key(&j, |&(col, _)| col) {
            Ok(pos) => row[pos].1,
            Err(_) => 0,
        }
    }

    pub(crate) fn row(&self, v: usize) -> &[(usize, u32)] {
        &self.adjacency[v]
    }

    /// State of vertex `v`.
    pub fn state_of(&self, v: usize) -> GraphResult<u8> {
        self.check(v)?;
        Ok(self.state[v])
    }

    /// The state vector, indexed like the adjacency rows.
    pub fn states(&self) -> &[u8] {
        &self.state
    }

    /// Number of neighbors of `v` (a self-loop counts `v` itself once).
    pub fn degree(&self, v: usize) -> GraphResult<usize> {
        Ok(self.incident(v)?.len())
    }

    /// Number of undirected edges, self-loops included.
    pub fn edge_count(&self) -> usize {
        self.edges().count()
    }

    /// Undirected weighted edges `(i, j, w)` with `i <= j`, ordered by `i`
    /// then `j`.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, u32)> + '_ {
        self.adjacency.iter().enumerate().flat_map(|(i, row)| {
            row.iter()
                .filter(move |&&(j, _)| i <= j)
                .map(move |&(j, w)| (i, j, w))
        })
    }

    /// Dense adjacency rows.
    pub fn rows(&self) -> Vec<Vec<u32>> {
        let order = self.order();
        self.adjacency
            .iter()
            .map(|entries| {
                let mut row = vec![0; order];
                for &(j, w) in entries {
                    row[j] = w;
                }
                row
            })
            .collect()
    }

    /// Number of vertices whose state is [`ALIVE`].
    pub fn alive_count(&self) -> usize {
        self.state.iter().filter(|&&s| s == ALIVE).count()
    }

    /// True when every weight is 0 or 1 and there are no self-loops.
    pub fn is_simple(&self) -> bool {
        self.adjacency
            .iter()
            .enumerate()
            .all(|(i, row)| row.iter().all(|&(j, w)| w == 1 && j != i))
    }

    /// True when every state is [`DEAD`] or [`ALIVE`].
    pub fn is_binary(&self) -> bool {
        self.state.iter().all(|&s| s == DEAD || s == ALIVE)
    }

    /// True when every vertex has exactly `degree` neighbors.
    pub fn is_regular(&self, degree: usize) -> bool {
        self.adjacency.iter().all(|row| row.len() == degree)
    }

    /// The common degree of all vertices, if there is one and the graph is
    /// not empty.
    pub fn regular_degree(&self) -> Option<usize> {
        let first = self.adjacency.first()?.len();
        self.is_regular(first).then_some(first)
    }

    /// A copy of this graph's topology carrying a different state vector.
    pub fn with_states(&self, state: Vec<u8>) -> GraphResult<Self> {
        if state.len() != self.order() {
            return Err(GraphError::shape(format!(
                "state vector has {} entries but graph has order {}",
                state.len(),
                self.order()
            )));
        }
        Ok(Self {
            adjacency: self.adjacency.clone(),
            state,
        })
    }

    /// Identity-relabeling equality of order, adjacency and state.
    pub fn equals_structurally(&self, other: &Graph) -> bool {
        self == other
    }

    /// State-aware isomorphism test, see [`IsomorphismChecker`].
    pub fn isomorphic(&self, other: &Graph) -> bool {
        IsomorphismChecker::new().isomorphic(self, other)
    }
}
