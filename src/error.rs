//! The error type returned by fallible graph operations.

use thiserror::Error;

/// Errors raised while building or querying a [`Graph`](crate::graph::Graph).
///
/// Node identifiers are rendered with their `Debug` implementation so the error type doesn't
/// need to be generic over the node type.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    /// The operation referenced a node that isn't in the graph.
    #[error("unknown node: {0}")]
    UnknownNode(String),
    /// The edge is a self-loop or its weight is negative or not finite.
    #[error("invalid edge: {0}")]
    InvalidEdge(String),
    /// Both nodes exist but the target can't be reached from the source.
    ///
    /// This is an expected outcome (e.g. after removing a node), not a defect.
    #[error("no path between {from} and {to}")]
    NoPath { from: String, to: String },
    /// An aggregate metric was requested on a graph that isn't fully connected.
    #[error("graph is not connected")]
    DisconnectedGraph,
}

impl GraphError {
    pub(crate) fn unknown_node<T: std::fmt::Debug>(node: &T) -> Self {
        Self::UnknownNode(format!("{node:?}"))
    }

    pub(crate) fn no_path<T: std::fmt::Debug>(from: &T, to: &T) -> Self {
        Self::NoPath {
            from: format!("{from:?}"),
            to: format!("{to:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_node_message() {
        let err = GraphError::unknown_node(&"Wean Hall");

        assert_eq!(err, GraphError::UnknownNode("\"Wean Hall\"".to_string()));
        assert_eq!(err.to_string(), "unknown node: \"Wean Hall\"");
    }

    #[test]
    fn no_path_message() {
        let err = GraphError::no_path(&1, &2);

        assert_eq!(err.to_string(), "no path between 1 and 2");
    }
}
