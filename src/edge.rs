//! A module for working with weighted edges.

/// A pair of vertices and the weight of the connection between them. Edges don't have a
/// direction, despite the `source`-`target` nomenclature used.
#[derive(Clone, Debug)]
pub struct Edge<T> {
    source: T,
    target: T,
    weight: f64,
}

impl<T> Edge<T> {
    /// Creates a new edge from two vertices and a weight.
    ///
    /// No validation happens here, [`Graph::add_edge`](crate::graph::Graph::add_edge) rejects
    /// self-loops and invalid weights.
    ///
    /// # Examples
    ///
    /// ```
    /// use wayfinder::edge::Edge;
    ///
    /// let edge = Edge::new("a", "b", 2.0);
    /// assert_eq!(edge, Edge::new("b", "a", 2.0));
    /// ```
    pub fn new(source: T, target: T, weight: f64) -> Self {
        Self {
            source,
            target,
            weight,
        }
    }

    /// Returns the first vertice forming the edge.
    ///
    /// # Examples
    ///
    /// ```
    /// use wayfinder::edge::Edge;
    ///
    /// let edge = Edge::new("a", "b", 1.0);
    /// assert_eq!(edge.source(), &"a");
    /// ```
    pub fn source(&self) -> &T {
        &self.source
    }

    /// Returns the second vertice forming the edge.
    ///
    /// # Examples
    ///
    /// ```
    /// use wayfinder::edge::Edge;
    ///
    /// let edge = Edge::new("a", "b", 1.0);
    /// assert_eq!(edge.target(), &"b");
    /// ```
    pub fn target(&self) -> &T {
        &self.target
    }

    /// Returns the weight of the edge.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub(crate) fn set_weight(&mut self, weight: f64) {
        self.weight = weight;
    }

    /// Returns whether the edge contains the given vertice.
    ///
    /// # Examples
    ///
    /// ```
    /// use wayfinder::edge::Edge;
    ///
    /// let edge = Edge::new("a", "b", 1.0);
    ///
    /// assert_eq!(edge.contains(&"a"), true);
    /// assert_eq!(edge.contains(&"b"), true);
    /// assert_eq!(edge.contains(&"c"), false);
    /// ```
    pub fn contains(&self, vertex: &T) -> bool
    where
        T: PartialEq,
    {
        self.source() == vertex || self.target() == vertex
    }

    /// Returns whether the edge joins `a` and `b`, in either direction.
    pub fn connects(&self, a: &T, b: &T) -> bool
    where
        T: PartialEq,
    {
        let (s, t) = (&self.source, &self.target);

        s == a && t == b || s == b && t == a
    }

    /// Returns the vertice at the other end of the edge, or `None` if `vertex` isn't part of it.
    ///
    /// # Examples
    ///
    /// ```
    /// use wayfinder::edge::Edge;
    ///
    /// let edge = Edge::new("a", "b", 1.0);
    ///
    /// assert_eq!(edge.opposite(&"a"), Some(&"b"));
    /// assert_eq!(edge.opposite(&"c"), None);
    /// ```
    pub fn opposite(&self, vertex: &T) -> Option<&T>
    where
        T: PartialEq,
    {
        if &self.source == vertex {
            Some(&self.target)
        } else if &self.target == vertex {
            Some(&self.source)
        } else {
            None
        }
    }
}

//
// Trait implementations
//

impl<T: PartialEq> PartialEq for Edge<T> {
    fn eq(&self, other: &Self) -> bool {
        self.connects(&other.source, &other.target) && self.weight == other.weight
    }
}
