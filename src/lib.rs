//! Wayfinder is a small toolkit for querying weighted undirected graphs, such as the walking
//! times between the buildings of a campus.
//!
//! # Basic usage
//!
//! The library is centered around the [`Graph`](graph::Graph) structure. Vertices are added
//! first, then the weighted [`Edge`](edge::Edge)s between them. Once constructed, shortest
//! paths, simple paths and various centrality measures can be computed.
//!
//! ```rust
//! use wayfinder::error::GraphError;
//! use wayfinder::graph::Graph;
//!
//! // Construct the graph instance, the IDs can be any type that is
//! // `Clone + Eq + Hash + Ord + Debug`.
//! let mut graph = Graph::new();
//! graph.add_nodes_from(["library", "hall", "gym"]);
//! graph.add_edges_from([("library", "hall", 2.0), ("hall", "gym", 3.0)])?;
//!
//! // Query the current state of the graph.
//! let route = graph.shortest_path(&"library", &"gym")?;
//! assert_eq!(route.nodes(), &["library", "hall", "gym"]);
//! assert_eq!(route.length(), 5.0);
//! assert_eq!(graph.most_central(), Some("hall"));
//!
//! // Experiment on a copy, the original is left untouched.
//! let mut closed = graph.copy();
//! closed.remove_node(&"hall")?;
//!
//! assert!(matches!(
//!     closed.shortest_path(&"library", &"gym"),
//!     Err(GraphError::NoPath { .. })
//! ));
//! assert_eq!(graph.average_shortest_path_length()?, 20.0 / 6.0);
//! # Ok::<(), GraphError>(())
//! ```

/// Builds a graph from `(a, b, weight)` triples, adding the vertices as they appear.
#[cfg(test)]
macro_rules! graph {
    ($(($a:expr, $b:expr, $weight:expr)),* $(,)?) => {{
        let mut graph = $crate::graph::Graph::new();

        $(
            graph.add_node($a);
            graph.add_node($b);
            graph.add_edge($a, $b, $weight).unwrap();
        )*

        graph
    }};
}

mod betweenness;
mod closeness;
mod dijkstra;
pub mod edge;
pub mod error;
pub mod graph;
pub mod paths;
