//! Cross-checks the isomorphism checker against petgraph's VF2 matcher.

use gra_core::{generators, Graph, IsomorphismChecker};
use petgraph::algo::is_isomorphic_matching;
use petgraph::graph::UnGraph;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;

fn to_petgraph(graph: &Graph) -> UnGraph<u8, u32> {
    let mut pg = UnGraph::new_undirected();
    let nodes: Vec<_> = graph.states().iter().map(|&s| pg.add_node(s)).collect();
    for (i, j, w) in graph.edges() {
        pg.add_edge(nodes[i], nodes[j], w);
    }
    pg
}

fn oracle(a: &Graph, b: &Graph) -> bool {
    is_isomorphic_matching(&to_petgraph(a), &to_petgraph(b), |x, y| x == y, |x, y| x == y)
}

fn random_graph(rng: &mut XorShiftRng, order: usize) -> Graph {
    let mut edges = Vec::new();
    for i in 0..order {
        for j in (i + 1)..order {
            if rng.random_range(0..3) == 0 {
                edges.push((i, j, rng.random_range(1..=2u32)));
            }
        }
    }
    let state = (0..order).map(|_| rng.random_range(0..=1u8)).collect();
    Graph::from_edges(order, edges, state).unwrap()
}

fn shuffled(rng: &mut XorShiftRng, order: usize) -> Vec<usize> {
    let mut perm: Vec<usize> = (0..order).collect();
    perm.shuffle(rng);
    perm
}

fn relabel(graph: &Graph, perm: &[usize]) -> Graph {
    let mut state = vec![0; graph.order()];
    for (v, &s) in graph.states().iter().enumerate() {
        state[perm[v]] = s;
    }
    let edges = graph.edges().map(|(i, j, w)| (perm[i], perm[j], w));
    Graph::from_edges(graph.order(), edges, state).unwrap()
}

#[test]
fn relabeled_graphs_agree_with_vf2() {
    let mut rng = XorShiftRng::seed_from_u64(0x9e37_79b9_7f4a_7c15);
    let checker = IsomorphismChecker::new();

    for order in 1..9 {
        for _ in 0..10 {
            let g = random_graph(&mut rng, order);
            let perm = shuffled(&mut rng, order);
            let h = relabel(&g, &perm);

            assert!(oracle(&g, &h));
            let mapping = checker.find_isomorphism(&g, &h).expect("relabeling is an isomorphism");
            for i in 0..order {
                assert_eq!(g.state_of(i).unwrap(), h.state_of(mapping[i]).unwrap());
                for j in 0..order {
                    assert_eq!(
                        g.weight(i, j).unwrap(),
                        h.weight(mapping[i], mapping[j]).unwrap()
                    );
                }
            }
        }
    }
}

#[test]
fn perturbed_graphs_agree_with_vf2() {
    let mut rng = XorShiftRng::seed_from_u64(0x2545_f491_4f6c_dd1d);
    let checker = IsomorphismChecker::new();

    for order in 2..9 {
        for _ in 0..10 {
            let g = random_graph(&mut rng, order);
            let perm = shuffled(&mut rng, order);
            let h = relabel(&g, &perm);

            let mut state = h.states().to_vec();
            let flip = rng.random_range(0..order);
            state[flip] ^= 1;
            let flipped = h.with_states(state).unwrap();
            assert_eq!(checker.isomorphic(&g, &flipped), oracle(&g, &flipped));

            let other = random_graph(&mut rng, order);
            assert_eq!(checker.isomorphic(&g, &other), oracle(&g, &other));
            assert_eq!(checker.isomorphic(&other, &g), checker.isomorphic(&g, &other));
        }
    }
}

#[test]
fn cubic_families_agree_with_vf2() {
    let petersen = generators::petersen(vec![0; 10]).unwrap();
    let prism = generators::prism(5, vec![0; 10]).unwrap();
    let cubic = generators::cubic_ten(vec![0; 10]).unwrap();

    for (a, b) in [(&petersen, &prism), (&prism, &cubic), (&cubic, &petersen)] {
        assert_eq!(a.isomorphic(b), oracle(a, b));
    }
}
