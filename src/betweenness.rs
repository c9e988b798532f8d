//! A module for the computation of weighted betweenness.

use tracing::{debug, trace};

use crate::{dijkstra::dijkstra, graph::GraphIndex};

/// This is an implementation of Ulrik Brandes's
/// A Faster Algorithm for Betweenness Centrality
/// http://snap.stanford.edu/class/cs224w-readings/brandes01centrality.pdf
/// with the breadth-first search swapped for Dijkstra so edge weights are honoured.
fn betweenness_for_node(
    index: GraphIndex,
    indices: &[Vec<(GraphIndex, f64)>],
    betweenness_count: &mut [f64],
) {
    let tree = dijkstra(indices, index);
    let mut stack = tree.order;
    let mut delta: Vec<f64> = vec![0.0; indices.len()];

    // Farthest vertices first, so each delta is complete before it's propagated.
    while let Some(w) = stack.pop() {
        for &v in &tree.predecessors[w] {
            delta[v] += tree.sigma[v] / tree.sigma[w] * (1.0 + delta[w]);
        }
        if w != index {
            betweenness_count[w] += delta[w];
        }
    }
}

/// Sums the dependencies of every source, which counts each ordered pair `(s, t)` once. With
/// `normalize` the sums are divided by `(n - 1)(n - 2)`, the number of ordered pairs excluding
/// the vertex itself.
pub fn compute_betweenness(indices: &[Vec<(GraphIndex, f64)>], normalize: bool) -> Vec<f64> {
    let num_nodes = indices.len();
    let mut betweenness_count: Vec<f64> = vec![0.0; num_nodes];

    for index in 0..num_nodes {
        trace!(source = index, "accumulating dependencies");
        betweenness_for_node(index, indices, &mut betweenness_count);
    }

    if normalize && num_nodes > 2 {
        let divisor = ((num_nodes - 1) * (num_nodes - 2)) as f64;
        for count in &mut betweenness_count {
            *count /= divisor;
        }
    }

    debug!(nodes = num_nodes, normalize, "computed betweenness");

    betweenness_count
}
