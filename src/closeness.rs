//! A module for the computation of per-vertex shortest path totals, the basis of closeness and
//! of the average shortest path length.

use tracing::debug;

use crate::{dijkstra::dijkstra, graph::GraphIndex};

/// Shortest path totals for a single source vertex.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathTotals {
    /// Sum of the weighted distances to every reachable vertex.
    pub length: f64,
    /// Number of other vertices reachable from the source.
    pub reached: usize,
}

fn closeness_for_node(index: GraphIndex, indices: &[Vec<(GraphIndex, f64)>]) -> PathTotals {
    let tree = dijkstra(indices, index);

    // The source itself is reached at distance zero, it counts towards neither total.
    let (length, reached) = tree
        .distance
        .iter()
        .flatten()
        .fold((0.0, 0), |(length, reached), distance| {
            (length + distance, reached + 1)
        });

    PathTotals {
        length,
        reached: reached - 1,
    }
}

/// Runs a single-source search from every vertex and collects its totals, indexed by vertex.
pub fn compute_closeness(indices: &[Vec<(GraphIndex, f64)>]) -> Vec<PathTotals> {
    let totals: Vec<PathTotals> = (0..indices.len())
        .map(|index| closeness_for_node(index, indices))
        .collect();

    debug!(nodes = indices.len(), "computed shortest path totals");

    totals
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_per_source() {
        // 0 -1- 1 -2- 2, and 3 on its own.
        let indices = vec![vec![(1, 1.0)], vec![(0, 1.0), (2, 2.0)], vec![(1, 2.0)], vec![]];

        assert_eq!(
            compute_closeness(&indices),
            vec![
                PathTotals {
                    length: 4.0,
                    reached: 2
                },
                PathTotals {
                    length: 3.0,
                    reached: 2
                },
                PathTotals {
                    length: 5.0,
                    reached: 2
                },
                PathTotals {
                    length: 0.0,
                    reached: 0
                },
            ]
        );
    }
}
