//! Single-source Dijkstra search shared by the path, betweenness and distance computations.

use std::{cmp::Ordering, collections::BinaryHeap};

use crate::graph::GraphIndex;

#[derive(Copy, Clone, Debug)]
struct State {
    cost: f64,
    /// Push counter, equal costs are popped in the order they were pushed.
    seq: usize,
    node: GraphIndex,
}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap by cost (reversed from standard Rust BinaryHeap).
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for State {}

/// The result of a search from a single source.
#[derive(Debug)]
pub(crate) struct SearchTree {
    /// Distance from the source, `None` if unreachable.
    pub(crate) distance: Vec<Option<f64>>,
    /// Number of distinct shortest paths from the source.
    pub(crate) sigma: Vec<f64>,
    /// Immediate predecessors on shortest paths, in the order they were discovered.
    pub(crate) predecessors: Vec<Vec<GraphIndex>>,
    /// Vertices in the order they were settled, i.e. non-decreasing distance.
    pub(crate) order: Vec<GraphIndex>,
}

impl SearchTree {
    /// Walks back from `target` through the first-discovered predecessors.
    pub(crate) fn path_to(&self, target: GraphIndex) -> Option<Vec<GraphIndex>> {
        self.distance[target]?;

        let mut path = vec![target];
        let mut current = target;
        while let Some(&previous) = self.predecessors[current].first() {
            path.push(previous);
            current = previous;
        }
        path.reverse();

        Some(path)
    }
}

/// Runs Dijkstra from `source`, counting shortest paths as it goes (the weighted variant of
/// the search in Brandes' "A Faster Algorithm for Betweenness Centrality").
///
/// Weights must be non-negative, which the graph guarantees on insertion. Distances are
/// compared exactly when counting ties.
pub(crate) fn dijkstra(indices: &[Vec<(GraphIndex, f64)>], source: GraphIndex) -> SearchTree {
    let num_nodes = indices.len();

    let mut distance: Vec<Option<f64>> = vec![None; num_nodes];
    let mut settled = vec![false; num_nodes];
    let mut sigma = vec![0.0; num_nodes];
    let mut predecessors: Vec<Vec<GraphIndex>> = vec![Vec::new(); num_nodes];
    let mut order = Vec::with_capacity(num_nodes);

    let mut heap = BinaryHeap::new();
    let mut seq = 0;

    distance[source] = Some(0.0);
    sigma[source] = 1.0;
    heap.push(State {
        cost: 0.0,
        seq,
        node: source,
    });

    while let Some(State { cost, node: v, .. }) = heap.pop() {
        // Stale entry, a cheaper one was already processed.
        if settled[v] {
            continue;
        }
        settled[v] = true;
        order.push(v);

        for &(w, weight) in &indices[v] {
            if settled[w] {
                continue;
            }

            let candidate = cost + weight;
            match distance[w] {
                Some(current) if candidate > current => {}
                Some(current) if candidate == current => {
                    sigma[w] += sigma[v];
                    predecessors[w].push(v);
                }
                _ => {
                    distance[w] = Some(candidate);
                    sigma[w] = sigma[v];
                    predecessors[w] = vec![v];

                    seq += 1;
                    heap.push(State {
                        cost: candidate,
                        seq,
                        node: w,
                    });
                }
            }
        }
    }

    SearchTree {
        distance,
        sigma,
        predecessors,
        order,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Two unit-weight routes from 0 to 3: 0-1-3 and 0-2-3.
    fn diamond() -> Vec<Vec<(GraphIndex, f64)>> {
        vec![
            vec![(1, 1.0), (2, 1.0)],
            vec![(0, 1.0), (3, 1.0)],
            vec![(0, 1.0), (3, 1.0)],
            vec![(1, 1.0), (2, 1.0)],
        ]
    }

    #[test]
    fn distances_and_path_counts() {
        let tree = dijkstra(&diamond(), 0);

        assert_eq!(tree.distance, vec![Some(0.0), Some(1.0), Some(1.0), Some(2.0)]);
        assert_eq!(tree.sigma, vec![1.0, 1.0, 1.0, 2.0]);
        assert_eq!(tree.predecessors[3], vec![1, 2]);
        assert_eq!(tree.order, vec![0, 1, 2, 3]);
    }

    #[test]
    fn first_predecessor_wins_the_path() {
        let tree = dijkstra(&diamond(), 0);

        assert_eq!(tree.path_to(3), Some(vec![0, 1, 3]));
        assert_eq!(tree.path_to(0), Some(vec![0]));
    }

    #[test]
    fn weights_beat_hop_count() {
        // 0 -10- 1, 0 -1- 2 -1- 1
        let indices = vec![
            vec![(1, 10.0), (2, 1.0)],
            vec![(0, 10.0), (2, 1.0)],
            vec![(0, 1.0), (1, 1.0)],
        ];
        let tree = dijkstra(&indices, 0);

        assert_eq!(tree.distance[1], Some(2.0));
        assert_eq!(tree.path_to(1), Some(vec![0, 2, 1]));
        assert_eq!(tree.sigma[1], 1.0);
    }

    #[test]
    fn unreachable() {
        let indices = vec![vec![(1, 1.0)], vec![(0, 1.0)], vec![]];
        let tree = dijkstra(&indices, 0);

        assert_eq!(tree.distance[2], None);
        assert_eq!(tree.sigma[2], 0.0);
        assert_eq!(tree.path_to(2), None);
        assert_eq!(tree.order, vec![0, 1]);
    }
}
