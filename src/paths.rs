//! A module for shortest path queries and simple path enumeration.

use std::{fmt::Debug, hash::Hash, iter::FusedIterator};

use itertools::Itertools;
use tracing::{instrument, trace};

use crate::{
    dijkstra::dijkstra,
    error::GraphError,
    graph::{Graph, GraphIndex, Indices},
};

/// A minimum-weight route between two vertices.
#[derive(Clone, Debug, PartialEq)]
pub struct ShortestPath<T> {
    nodes: Vec<T>,
    length: f64,
}

impl<T> ShortestPath<T> {
    /// Returns the vertices of the route, source and target included.
    pub fn nodes(&self) -> &[T] {
        &self.nodes
    }

    /// Returns the total weight of the route.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Consumes the route, returning its vertices.
    pub fn into_nodes(self) -> Vec<T> {
        self.nodes
    }
}

impl<T> Graph<T>
where
    T: Clone + Eq + Hash + Ord + Debug,
{
    /// Computes the minimum-weight path between two vertices.
    ///
    /// Among routes of equal weight the one discovered first wins: vertices at equal distance
    /// are settled in the order they were reached, and neighbours are scanned in edge insertion
    /// order.
    ///
    /// Fails with [`GraphError::UnknownNode`] if either vertex is missing, and with
    /// [`GraphError::NoPath`] if the target can't be reached.
    ///
    /// # Examples
    ///
    /// ```
    /// use wayfinder::graph::Graph;
    ///
    /// let mut graph = Graph::new();
    /// graph.add_nodes_from(["a", "b", "c"]);
    /// graph
    ///     .add_edges_from([("a", "b", 1.0), ("b", "c", 1.0), ("a", "c", 3.0)])
    ///     .unwrap();
    ///
    /// let path = graph.shortest_path(&"a", &"c").unwrap();
    ///
    /// assert_eq!(path.nodes(), &["a", "b", "c"]);
    /// assert_eq!(path.length(), 2.0);
    /// ```
    #[instrument(skip(self))]
    pub fn shortest_path(&self, source: &T, target: &T) -> Result<ShortestPath<T>, GraphError> {
        let s = self.position(source)?;
        let t = self.position(target)?;

        let tree = dijkstra(&self.indices(), s);

        let (Some(length), Some(path)) = (tree.distance[t], tree.path_to(t)) else {
            trace!("target unreachable");
            return Err(GraphError::no_path(source, target));
        };

        let nodes = path
            .into_iter()
            .map(|i| self.nodes()[i].clone())
            .collect();

        Ok(ShortestPath { nodes, length })
    }

    /// Computes the total weight of the minimum-weight path between two vertices.
    ///
    /// Fails in the same cases as [`Graph::shortest_path`].
    pub fn shortest_path_length(&self, source: &T, target: &T) -> Result<f64, GraphError> {
        self.shortest_path(source, target).map(|path| path.length())
    }

    /// Sums the edge weights along a route given as consecutive vertices.
    ///
    /// Fails with [`GraphError::UnknownNode`] if a vertex is missing, and with
    /// [`GraphError::NoPath`] if two consecutive vertices aren't adjacent. A route made of a
    /// single vertex weighs `0.0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use wayfinder::graph::Graph;
    ///
    /// let mut graph = Graph::new();
    /// graph.add_nodes_from(["a", "b", "c"]);
    /// graph.add_edges_from([("a", "b", 1.5), ("b", "c", 2.0)]).unwrap();
    ///
    /// assert_eq!(graph.path_weight(&["a", "b", "c"]), Ok(3.5));
    /// assert!(graph.path_weight(&["a", "c"]).is_err());
    /// ```
    pub fn path_weight(&self, route: &[T]) -> Result<f64, GraphError> {
        for vertex in route {
            self.position(vertex)?;
        }

        route
            .iter()
            .tuple_windows()
            .map(|(a, b)| self.edge_weight(a, b).ok_or_else(|| GraphError::no_path(a, b)))
            .sum()
    }

    /// Returns a lazy iterator over every path from `source` to `target` that doesn't visit a
    /// vertex twice.
    ///
    /// The enumeration is depth-first with neighbours taken in edge insertion order, and a path
    /// stops as soon as it reaches the target. Each call starts a fresh enumeration. If the
    /// source is the target, the single path `[source]` is yielded.
    ///
    /// # Examples
    ///
    /// ```
    /// use wayfinder::graph::Graph;
    ///
    /// let mut graph = Graph::new();
    /// graph.add_nodes_from(["a", "b", "c", "d"]);
    /// graph
    ///     .add_edges_from([("a", "b", 1.0), ("b", "d", 1.0), ("a", "c", 1.0), ("c", "d", 1.0)])
    ///     .unwrap();
    ///
    /// let paths: Vec<Vec<&str>> = graph.all_simple_paths(&"a", &"d").unwrap().collect();
    /// assert_eq!(paths, vec![vec!["a", "b", "d"], vec!["a", "c", "d"]]);
    ///
    /// // Limit the paths to a single edge.
    /// assert_eq!(graph.all_simple_paths(&"a", &"d").unwrap().with_cutoff(1).count(), 0);
    /// ```
    pub fn all_simple_paths(
        &self,
        source: &T,
        target: &T,
    ) -> Result<AllSimplePaths<'_, T>, GraphError> {
        let s = self.position(source)?;
        let t = self.position(target)?;

        Ok(AllSimplePaths::new(self.nodes(), self.indices(), s, t))
    }
}

/// Depth-first enumeration of the simple paths between two vertices, see
/// [`Graph::all_simple_paths`].
#[derive(Clone, Debug)]
pub struct AllSimplePaths<'a, T> {
    vertices: &'a [T],
    indices: Indices,
    target: GraphIndex,
    /// Maximum number of edges in a yielded path.
    cutoff: Option<usize>,
    /// The path currently being extended, starting at the source.
    path: Vec<GraphIndex>,
    on_path: Vec<bool>,
    /// For each vertex on `path`, the position of the next neighbour to try.
    cursors: Vec<usize>,
    /// The `[source]` path is pending, only when the source is the target.
    trivial: bool,
}

impl<'a, T> AllSimplePaths<'a, T> {
    fn new(vertices: &'a [T], indices: Indices, source: GraphIndex, target: GraphIndex) -> Self {
        let mut on_path = vec![false; vertices.len()];
        let trivial = source == target;

        let (path, cursors) = if trivial {
            (Vec::new(), Vec::new())
        } else {
            on_path[source] = true;
            (vec![source], vec![0])
        };

        Self {
            vertices,
            indices,
            target,
            cutoff: None,
            path,
            on_path,
            cursors,
            trivial,
        }
    }

    /// Only yields paths made of at most `depth` edges.
    pub fn with_cutoff(mut self, depth: usize) -> Self {
        self.cutoff = Some(depth);
        self
    }
}

impl<T: Clone> Iterator for AllSimplePaths<'_, T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.trivial {
            self.trivial = false;
            return Some(vec![self.vertices[self.target].clone()]);
        }

        let max_depth = self.cutoff.unwrap_or(usize::MAX);

        while let Some(&current) = self.path.last() {
            // Taking another step yields a path of `path.len()` edges.
            let cursor = self.cursors.last_mut()?;
            let next = if self.path.len() <= max_depth {
                self.indices[current].get(*cursor).map(|&(n, _)| n)
            } else {
                None
            };

            match next {
                Some(neighbour) => {
                    *cursor += 1;

                    if self.on_path[neighbour] {
                        continue;
                    }

                    if neighbour == self.target {
                        let found = self
                            .path
                            .iter()
                            .chain(std::iter::once(&neighbour))
                            .map(|&i| self.vertices[i].clone())
                            .collect();

                        return Some(found);
                    }

                    self.path.push(neighbour);
                    self.on_path[neighbour] = true;
                    self.cursors.push(0);
                }
                // Exhausted, backtrack.
                None => {
                    self.path.pop();
                    self.cursors.pop();
                    self.on_path[current] = false;
                }
            }
        }

        None
    }
}

impl<T: Clone> FusedIterator for AllSimplePaths<'_, T> {}
