//! A module for working with weighted graphs.

use std::{collections::HashMap, fmt::Debug, hash::Hash, ops::Sub};

use nalgebra::{DMatrix, SymmetricEigen};
use tracing::{debug, instrument};

use crate::{
    betweenness::compute_betweenness,
    closeness::{compute_closeness, PathTotals},
    edge::Edge,
    error::GraphError,
};

/// Position of a vertex in the graph's insertion-ordered vertex list.
pub(crate) type GraphIndex = usize;

/// Per-vertex `(neighbour, weight)` lists, each ordered by edge insertion.
pub(crate) type Indices = Vec<Vec<(GraphIndex, f64)>>;

/// An undirected graph with non-negative edge weights.
///
/// Vertices must be added before the edges that reference them. Both vertices and edges keep
/// their insertion order, which is the order every query visits them in.
#[derive(Clone, Debug)]
pub struct Graph<T> {
    /// The vertices in insertion order.
    vertices: Vec<T>,
    /// A mapping of vertices to their position in `vertices`, used when constructing the
    /// neighbour lists and the various matrices representing the graph.
    index: HashMap<T, GraphIndex>,
    /// The edges in insertion order.
    edges: Vec<Edge<T>>,
}

impl<T> Default for Graph<T>
where
    T: Clone + Eq + Hash + Ord + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Graph<T>
where
    T: Clone + Eq + Hash + Ord + Debug,
{
    /// Creates an empty graph.
    ///
    /// # Examples
    ///
    /// ```
    /// use wayfinder::graph::Graph;
    ///
    /// let graph: Graph<&str> = Graph::new();
    /// assert_eq!(graph.node_count(), 0);
    /// ```
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            index: HashMap::new(),
            edges: Vec::new(),
        }
    }

    /// Inserts a vertex and returns whether it was new. Re-adding a vertex is a no-op.
    pub fn add_node(&mut self, vertex: T) -> bool {
        if self.index.contains_key(&vertex) {
            return false;
        }

        self.index.insert(vertex.clone(), self.vertices.len());
        self.vertices.push(vertex);

        true
    }

    /// Inserts every vertex from the iterator, skipping those already present.
    pub fn add_nodes_from<I>(&mut self, vertices: I)
    where
        I: IntoIterator<Item = T>,
    {
        for vertex in vertices {
            self.add_node(vertex);
        }
    }

    /// Inserts a weighted edge between two existing vertices.
    ///
    /// If the vertices are already connected the weight is overwritten and the previous one
    /// returned. The edge keeps its original position in the insertion order.
    ///
    /// Vertices are never created implicitly: an unknown endpoint is an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use wayfinder::error::GraphError;
    /// use wayfinder::graph::Graph;
    ///
    /// let mut graph = Graph::new();
    /// graph.add_nodes_from(["a", "b"]);
    ///
    /// assert_eq!(graph.add_edge("a", "b", 2.0), Ok(None));
    /// assert_eq!(graph.add_edge("b", "a", 3.0), Ok(Some(2.0)));
    /// assert_eq!(graph.edge_weight(&"a", &"b"), Some(3.0));
    ///
    /// assert!(matches!(graph.add_edge("a", "a", 1.0), Err(GraphError::InvalidEdge(_))));
    /// assert!(matches!(graph.add_edge("a", "b", -1.0), Err(GraphError::InvalidEdge(_))));
    /// assert!(matches!(graph.add_edge("a", "c", 1.0), Err(GraphError::UnknownNode(_))));
    /// ```
    pub fn add_edge(&mut self, a: T, b: T, weight: f64) -> Result<Option<f64>, GraphError> {
        if a == b {
            return Err(GraphError::InvalidEdge(format!("self-loop on {a:?}")));
        }
        if !weight.is_finite() || weight < 0.0 {
            return Err(GraphError::InvalidEdge(format!(
                "weight {weight} between {a:?} and {b:?} must be finite and non-negative"
            )));
        }

        self.position(&a)?;
        self.position(&b)?;

        if let Some(edge) = self.edges.iter_mut().find(|edge| edge.connects(&a, &b)) {
            let previous = edge.weight();
            edge.set_weight(weight);

            return Ok(Some(previous));
        }

        self.edges.push(Edge::new(a, b, weight));

        Ok(None)
    }

    /// Inserts every `(a, b, weight)` edge from the iterator.
    ///
    /// Stops at the first invalid edge and returns its error, the edges before it stay
    /// inserted.
    pub fn add_edges_from<I>(&mut self, edges: I) -> Result<(), GraphError>
    where
        I: IntoIterator<Item = (T, T, f64)>,
    {
        for (a, b, weight) in edges {
            self.add_edge(a, b, weight)?;
        }

        Ok(())
    }

    /// Removes a vertex along with every edge incident to it, returning the removed edges.
    ///
    /// # Examples
    ///
    /// ```
    /// use wayfinder::edge::Edge;
    /// use wayfinder::graph::Graph;
    ///
    /// let mut graph = Graph::new();
    /// graph.add_nodes_from(["a", "b", "c"]);
    /// graph.add_edges_from([("a", "b", 1.0), ("b", "c", 2.0), ("a", "c", 5.0)]).unwrap();
    ///
    /// let removed = graph.remove_node(&"b").unwrap();
    ///
    /// assert_eq!(removed, vec![Edge::new("a", "b", 1.0), Edge::new("b", "c", 2.0)]);
    /// assert_eq!(graph.nodes(), &["a", "c"]);
    /// assert_eq!(graph.edges(), &[Edge::new("a", "c", 5.0)]);
    /// ```
    pub fn remove_node(&mut self, vertex: &T) -> Result<Vec<Edge<T>>, GraphError> {
        let position = self.position(vertex)?;
        self.vertices.remove(position);

        let (removed, kept): (Vec<_>, Vec<_>) =
            self.edges.drain(..).partition(|edge| edge.contains(vertex));
        self.edges = kept;

        // Positions after the removed vertex have shifted.
        self.generate_index();

        Ok(removed)
    }

    /// Removes the edge between two vertices, if any.
    pub fn remove_edge(&mut self, a: &T, b: &T) -> Result<Option<Edge<T>>, GraphError> {
        self.position(a)?;
        self.position(b)?;

        Ok(self
            .edges
            .iter()
            .position(|edge| edge.connects(a, b))
            .map(|i| self.edges.remove(i)))
    }

    /// Returns an independent copy of the graph, for "what-if" experiments that shouldn't touch
    /// the original.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Checks if the graph contains a vertex.
    pub fn contains_node(&self, vertex: &T) -> bool {
        self.index.contains_key(vertex)
    }

    /// Returns the vertices in insertion order.
    pub fn nodes(&self) -> &[T] {
        &self.vertices
    }

    /// Returns the edges in insertion order.
    pub fn edges(&self) -> &[Edge<T>] {
        &self.edges
    }

    /// Returns the vertex count of the graph.
    pub fn node_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the edge count of the graph.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns the weight of the edge between two vertices, if they are connected.
    pub fn edge_weight(&self, a: &T, b: &T) -> Option<f64> {
        self.edges
            .iter()
            .find(|edge| edge.connects(a, b))
            .map(Edge::weight)
    }

    /// Returns the neighbours of a vertex, in the order their edges were inserted.
    ///
    /// # Examples
    ///
    /// ```
    /// use wayfinder::graph::Graph;
    ///
    /// let mut graph = Graph::new();
    /// graph.add_nodes_from(["a", "b", "c"]);
    /// graph.add_edges_from([("c", "a", 1.0), ("a", "b", 1.0)]).unwrap();
    ///
    /// assert_eq!(graph.neighbors(&"a").unwrap(), vec![&"c", &"b"]);
    /// assert!(graph.neighbors(&"d").is_err());
    /// ```
    pub fn neighbors(&self, vertex: &T) -> Result<Vec<&T>, GraphError> {
        self.position(vertex)?;

        Ok(self
            .edges
            .iter()
            .filter_map(|edge| edge.opposite(vertex))
            .collect())
    }

    /// Returns the number of edges incident to a vertex.
    pub fn degree(&self, vertex: &T) -> Result<usize, GraphError> {
        self.position(vertex)?;

        Ok(self.edges.iter().filter(|edge| edge.contains(vertex)).count())
    }

    /// Returns a mapping of vertices to their degree centrality (number of connections) in the
    /// graph.
    pub fn degree_centrality(&self) -> HashMap<T, usize> {
        let mut degrees: HashMap<T, usize> =
            self.vertices.iter().map(|v| (v.clone(), 0)).collect();

        for edge in &self.edges {
            for vertex in [edge.source(), edge.target()] {
                if let Some(degree) = degrees.get_mut(vertex) {
                    *degree += 1;
                }
            }
        }

        degrees
    }

    /// Computes the density of the graph, the ratio of edges with respect to the maximum possible
    /// edges.
    ///
    /// # Examples
    ///
    /// ```
    /// use wayfinder::graph::Graph;
    ///
    /// let mut graph = Graph::new();
    /// graph.add_nodes_from(["a", "b", "c"]);
    ///
    /// graph.add_edge("a", "b", 1.0).unwrap();
    /// assert_eq!(graph.density(), 1.0 / 3.0);
    ///
    /// graph.add_edge("a", "c", 1.0).unwrap();
    /// assert_eq!(graph.density(), 2.0 / 3.0);
    /// ```
    pub fn density(&self) -> f64 {
        let vc = self.node_count() as f64;
        let ec = self.edge_count() as f64;

        // Calculate the total number of possible edges given a vertex count.
        let pec = vc * (vc - 1.0) / 2.0;
        // Actual edges divided by the possible edges gives the density.
        ec / pec
    }

    /// Constructs the weighted adjacency matrix for this graph, rows and columns follow the
    /// vertex insertion order.
    ///
    /// # Examples
    ///
    /// ```
    /// use nalgebra::dmatrix;
    /// use wayfinder::graph::Graph;
    ///
    /// let mut graph = Graph::new();
    /// graph.add_nodes_from(["a", "b"]);
    /// graph.add_edge("a", "b", 2.5).unwrap();
    ///
    /// assert_eq!(
    ///     graph.adjacency_matrix(),
    ///     dmatrix![0.0, 2.5;
    ///              2.5, 0.0]
    /// );
    /// ```
    pub fn adjacency_matrix(&self) -> DMatrix<f64> {
        let n = self.node_count();
        let mut matrix = DMatrix::<f64>::zeros(n, n);

        // The graph is undirected so the matrix is symmetric, both triangles are written for
        // each edge.
        for (i, neighbours) in self.indices().iter().enumerate() {
            for &(j, weight) in neighbours {
                matrix[(i, j)] = weight;
            }
        }

        matrix
    }

    /// Constructs the degree matrix for this graph. The diagonal holds each vertex's weighted
    /// degree (the sum of its edge weights).
    pub fn degree_matrix(&self) -> DMatrix<f64> {
        let adjacency_matrix = self.adjacency_matrix();

        let n = self.node_count();
        let mut matrix = DMatrix::<f64>::zeros(n, n);

        for (i, row) in adjacency_matrix.row_iter().enumerate() {
            matrix[(i, i)] = row.sum()
        }

        matrix
    }

    /// Constructs the laplacian matrix for this graph.
    ///
    /// # Examples
    ///
    /// ```
    /// use nalgebra::dmatrix;
    /// use wayfinder::graph::Graph;
    ///
    /// let mut graph = Graph::new();
    /// graph.add_nodes_from(["a", "b"]);
    /// graph.add_edge("a", "b", 1.0).unwrap();
    ///
    /// assert_eq!(
    ///     graph.laplacian_matrix(),
    ///     dmatrix![1.0, -1.0;
    ///              -1.0, 1.0]
    /// );
    /// ```
    pub fn laplacian_matrix(&self) -> DMatrix<f64> {
        let degree_matrix = self.degree_matrix();
        let adjacency_matrix = self.adjacency_matrix();

        degree_matrix.sub(&adjacency_matrix)
    }

    /// Returns the algebraic connectivity of the graph, the second-smallest eigenvalue of the
    /// laplacian. It is positive if and only if the graph is connected.
    ///
    /// Graphs with fewer than two vertices have an algebraic connectivity of `0.0`.
    pub fn algebraic_connectivity(&self) -> f64 {
        if self.node_count() < 2 {
            return 0.0;
        }

        let eigen = SymmetricEigen::new(self.laplacian_matrix());
        let mut eigenvalues: Vec<f64> = eigen.eigenvalues.iter().copied().collect();
        eigenvalues.sort_unstable_by(f64::total_cmp);

        eigenvalues[1]
    }

    /// Returns a mapping of vertices to their betweenness centrality.
    ///
    /// For each vertex `v` this is the sum, over every ordered pair `(s, t)` of other vertices,
    /// of the fraction of weighted shortest `s`-`t` paths that pass through `v`. Unreachable
    /// pairs contribute nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use wayfinder::graph::Graph;
    ///
    /// let mut graph = Graph::new();
    /// graph.add_nodes_from(["a", "b", "c"]);
    /// graph.add_edges_from([("a", "b", 1.0), ("b", "c", 1.0)]).unwrap();
    ///
    /// let betweenness = graph.betweenness_centrality();
    ///
    /// // "b" sits on the only a-c path, counted in both directions.
    /// assert_eq!(betweenness[&"b"], 2.0);
    /// assert_eq!(betweenness[&"a"], 0.0);
    /// ```
    #[instrument(skip(self))]
    pub fn betweenness_centrality(&self) -> HashMap<T, f64> {
        self.betweenness(false)
    }

    /// Returns the betweenness centrality scaled by `1 / ((n - 1)(n - 2))`, so that scores fall
    /// in `[0, 1]`. Graphs with two or fewer vertices are left unscaled.
    #[instrument(skip(self))]
    pub fn normalized_betweenness_centrality(&self) -> HashMap<T, f64> {
        self.betweenness(true)
    }

    /// Returns the vertex with the highest betweenness centrality, ties going to the smallest
    /// vertex. `None` if the graph is empty.
    pub fn most_central(&self) -> Option<T> {
        let scores = compute_betweenness(&self.indices(), false);

        self.vertices
            .iter()
            .zip(scores)
            .max_by(|(a, x), (b, y)| x.total_cmp(y).then_with(|| b.cmp(a)))
            .map(|(vertex, _)| vertex.clone())
    }

    /// Returns whether every vertex can reach every other one. The empty graph isn't connected.
    pub fn is_connected(&self) -> bool {
        match self.node_count() {
            0 => false,
            n => compute_closeness(&self.indices())
                .first()
                .is_some_and(|totals| totals.reached == n - 1),
        }
    }

    /// Returns the mean weighted distance over all ordered pairs of distinct vertices.
    ///
    /// Fails with [`GraphError::DisconnectedGraph`] if any pair is unreachable (including the
    /// empty graph, which has nothing to average). A single vertex averages to `0.0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use wayfinder::error::GraphError;
    /// use wayfinder::graph::Graph;
    ///
    /// let mut graph = Graph::new();
    /// graph.add_nodes_from(["a", "b", "c"]);
    /// graph.add_edges_from([("a", "b", 1.0), ("b", "c", 2.0)]).unwrap();
    ///
    /// // (1 + 3 + 2) * 2 / 6
    /// assert_eq!(graph.average_shortest_path_length(), Ok(2.0));
    ///
    /// graph.remove_edge(&"b", &"c").unwrap();
    /// assert_eq!(
    ///     graph.average_shortest_path_length(),
    ///     Err(GraphError::DisconnectedGraph)
    /// );
    /// ```
    #[instrument(skip(self))]
    pub fn average_shortest_path_length(&self) -> Result<f64, GraphError> {
        let n = self.node_count();
        match n {
            0 => return Err(GraphError::DisconnectedGraph),
            1 => return Ok(0.0),
            _ => {}
        }

        let totals = compute_closeness(&self.indices());

        // Every pair must be reachable before anything is averaged.
        if totals.iter().any(|totals| totals.reached != n - 1) {
            return Err(GraphError::DisconnectedGraph);
        }

        let sum: f64 = totals.iter().map(|totals| totals.length).sum();
        let average = sum / (n * (n - 1)) as f64;
        debug!(pairs = n * (n - 1), average, "averaged shortest path lengths");

        Ok(average)
    }

    /// Returns a mapping of vertices to their closeness centrality.
    ///
    /// A vertex reaching `r` others at a total distance `d` scores `(r / d) * (r / (n - 1))`,
    /// which scales down vertices stuck in small components. Vertices that reach nothing score
    /// `0.0`.
    #[instrument(skip(self))]
    pub fn closeness_centrality(&self) -> HashMap<T, f64> {
        let n = self.node_count();
        let totals = compute_closeness(&self.indices());

        self.vertices
            .iter()
            .zip(totals)
            .map(|(vertex, PathTotals { length, reached })| {
                let closeness = if length > 0.0 && n > 1 {
                    let r = reached as f64;
                    (r / length) * (r / (n - 1) as f64)
                } else {
                    0.0
                };

                (vertex.clone(), closeness)
            })
            .collect()
    }

    //
    // Crate-internal
    //

    /// Returns the position of a vertex, or an error naming it if it isn't in the graph.
    pub(crate) fn position(&self, vertex: &T) -> Result<GraphIndex, GraphError> {
        self.index
            .get(vertex)
            .copied()
            .ok_or_else(|| GraphError::unknown_node(vertex))
    }

    /// Constructs the neighbour lists of every vertex, indexed by vertex position.
    pub(crate) fn indices(&self) -> Indices {
        let mut indices: Indices = vec![Vec::new(); self.vertices.len()];

        for edge in &self.edges {
            // Both endpoints are present, edges are validated on insertion and removed with
            // their vertices.
            let endpoints = (self.index.get(edge.source()), self.index.get(edge.target()));
            if let (Some(&i), Some(&j)) = endpoints {
                indices[i].push((j, edge.weight()));
                indices[j].push((i, edge.weight()));
            }
        }

        indices
    }

    //
    // Private
    //

    fn betweenness(&self, normalize: bool) -> HashMap<T, f64> {
        let scores = compute_betweenness(&self.indices(), normalize);

        self.vertices.iter().cloned().zip(scores).collect()
    }

    /// Rebuilds the vertex to position mapping from the vertex list.
    fn generate_index(&mut self) {
        self.index = self
            .vertices
            .iter()
            .enumerate()
            .map(|(i, vertex)| (vertex.clone(), i))
            .collect();
    }
}
