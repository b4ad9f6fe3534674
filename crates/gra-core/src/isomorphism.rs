//! State-aware graph isomorphism.
//!
//! Two graphs are isomorphic when some bijection of their vertices preserves
//! every adjacency weight and every vertex state. The search is an exact
//! backtracking over vertex assignments:
//!
//! 1. Reject when orders differ or the multisets of vertex signatures
//!    `(state, degree, weighted degree, loop weight)` differ.
//! 2. Visit the vertices of the first graph in breadth-first order, starting
//!    from the rarest signature class.
//! 3. Map each vertex only onto unused vertices of the same class, adjacent to
//!    the image of an already mapped neighbor when there is one, and keep the
//!    assignment only if it agrees with every mapped vertex.

use std::collections::{BTreeMap, VecDeque};

use tracing::debug;

use crate::graph::Graph;

/// Per-vertex invariant used to bucket candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct Signature {
    state: u8,
    degree: usize,
    strength: u64,
    loop_weight: u32,
}

fn signatures(graph: &Graph) -> Vec<Signature> {
    (0..graph.order())
        .map(|v| {
            let row = graph.row(v);
            Signature {
                state: graph.states()[v],
                degree: row.len(),
                strength: row.iter().map(|&(_, w)| u64::from(w)).sum(),
                loop_weight: graph.weight_unchecked(v, v),
            }
        })
        .collect()
}

/// Exact state-aware isomorphism checker.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsomorphismChecker;

impl IsomorphismChecker {
    /// Create a checker.
    pub fn new() -> Self {
        Self
    }

    /// True iff a state- and weight-preserving relabeling exists.
    pub fn isomorphic(&self, a: &Graph, b: &Graph) -> bool {
        self.find_isomorphism(a, b).is_some()
    }

    /// Find a witness mapping `pi` with `pi[i]` the vertex of `b` that vertex
    /// `i` of `a` maps to.
    pub fn find_isomorphism(&self, a: &Graph, b: &Graph) -> Option<Vec<usize>> {
        if a.order() != b.order() {
            return None;
        }
        if a.equals_structurally(b) {
            return Some((0..a.order()).collect());
        }

        let sig_a = signatures(a);
        let sig_b = signatures(b);

        let mut sorted_a = sig_a.clone();
        let mut sorted_b = sig_b.clone();
        sorted_a.sort_unstable();
        sorted_b.sort_unstable();
        if sorted_a != sorted_b {
            return None;
        }

        let mut classes: BTreeMap<Signature, Vec<usize>> = BTreeMap::new();
        for (v, sig) in sig_b.iter().enumerate() {
            classes.entry(*sig).or_default().push(v);
        }

        let visit_order = search_order(a, &sig_a, &classes);
        let mut search = Search {
            a,
            b,
            sig_a: &sig_a,
            sig_b: &sig_b,
            classes: &classes,
            visit_order: &visit_order,
            forward: vec![None; a.order()],
            backward: vec![None; b.order()],
            explored: 0,
        };

        let found = search.run();
        debug!(
            order = a.order(),
            explored = search.explored,
            found,
            "isomorphism_search_complete"
        );

        if found {
            search.forward.into_iter().collect()
        } else {
            None
        }
    }
}

/// Breadth-first vertex order, restarting each component from the vertex
/// whose signature class is smallest.
fn search_order(
    graph: &Graph,
    sigs: &[Signature],
    classes: &BTreeMap<Signature, Vec<usize>>,
) -> Vec<usize> {
    let class_size = |v: usize| classes.get(&sigs[v]).map_or(0, Vec::len);

    let mut roots: Vec<usize> = (0..graph.order()).collect();
    roots.sort_by_key(|&v| (class_size(v), v));

    let mut seen = vec![false; graph.order()];
    let mut order = Vec::with_capacity(graph.order());
    let mut queue = VecDeque::new();

    for root in roots {
        if seen[root] {
            continue;
        }
        seen[root] = true;
        queue.push_back(root);
        while let Some(v) = queue.pop_front() {
            order.push(v);
            for &(u, _) in graph.row(v) {
                if !seen[u] {
                    seen[u] = true;
                    queue.push_back(u);
                }
            }
        }
    }

    order
}

struct Search<'a> {
    a: &'a Graph,
    b: &'a Graph,
    sig_a: &'a [Signature],
    sig_b: &'a [Signature],
    classes: &'a BTreeMap<Signature, Vec<usize>>,
    visit_order: &'a [usize],
    forward: Vec<Option<usize>>,
    backward: Vec<Option<usize>>,
    explored: u64,
}

/// One level of the backtracking: `visit_order[k]` for the `k`-th frame.
struct Frame {
    vertex: usize,
    candidates: Vec<usize>,
    cursor: usize,
}

impl Search<'_> {
    /// Depth-first search over an explicit stack, so the depth is bounded by
    /// the heap and not the thread stack.
    fn run(&mut self) -> bool {
        let Some(&first) = self.visit_order.first() else {
            return true;
        };
        let mut stack = Vec::with_capacity(self.visit_order.len());
        stack.push(Frame {
            vertex: first,
            candidates: self.candidates(first),
            cursor: 0,
        });

        while let Some(frame) = stack.last_mut() {
            let u = frame.vertex;
            if let Some(w) = self.forward[u].take() {
                self.backward[w] = None;
            }

            let mut chosen = None;
            while let Some(&w) = frame.candidates.get(frame.cursor) {
                frame.cursor += 1;
                self.explored += 1;
                if self.consistent(u, w) {
                    chosen = Some(w);
                    break;
                }
            }

            let Some(w) = chosen else {
                stack.pop();
                continue;
            };
            self.forward[u] = Some(w);
            self.backward[w] = Some(u);

            match self.visit_order.get(stack.len()) {
                Some(&next) => stack.push(Frame {
                    vertex: next,
                    candidates: self.candidates(next),
                    cursor: 0,
                }),
                None => return true,
            }
        }

        false
    }

    fn candidates(&self, u: usize) -> Vec<usize> {
        let anchor = self
            .a
            .row(u)
            .iter()
            .find_map(|&(p, _)| if p == u { None } else { self.forward[p] });

        let pool: Vec<usize> = match anchor {
            Some(image) => self.b.row(image).iter().map(|&(w, _)| w).collect(),
            None => self
                .classes
                .get(&self.sig_a[u])
                .cloned()
                .unwrap_or_default(),
        };

        pool.into_iter()
            .filter(|&w| self.backward[w].is_none() && self.sig_b[w] == self.sig_a[u])
            .collect()
    }

    /// Every mapped neighbor of `u` must map onto a neighbor of `w` with the
    /// same weight, and `w` must have no extra mapped neighbors.
    fn consistent(&self, u: usize, w: usize) -> bool {
        let mut mapped_neighbors = 0;
        for &(x, weight) in self.a.row(u) {
            if x == u {
                continue;
            }
            if let Some(image) = self.forward[x] {
                if self.b.weight_unchecked(w, image) != weight {
                    return false;
                }
                mapped_neighbors += 1;
            }
        }

        let image_neighbors = self
            .b
            .row(w)
            .iter()
            .filter(|&&(y, _)| y != w && self.backward[y].is_some())
            .count();

        mapped_neighbors == image_neighbors
    }
}
