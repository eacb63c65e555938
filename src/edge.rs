use std::fmt::{Debug, Display};

use crate::node::Node;

/// An edge `Edge(worker, task)` of a bipartite assignment graph.
/// Both endpoints are 1-based identifiers of their respective side.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge(pub Node, pub Node);

/// We limit the number of edges to `2^32 - 1`.
pub type NumEdges = u32;

impl Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.0, self.1)
    }
}

impl Debug for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as Display>::fmt(self, f)
    }
}

impl Edge {
    /// Returns the worker endpoint
    #[inline]
    pub fn worker(&self) -> Node {
        self.0
    }

    /// Returns the task endpoint
    #[inline]
    pub fn task(&self) -> Node {
        self.1
    }
}

impl From<(Node, Node)> for Edge {
    fn from(value: (Node, Node)) -> Self {
        Edge(value.0, value.1)
    }
}

impl From<&(Node, Node)> for Edge {
    fn from(value: &(Node, Node)) -> Self {
        Edge(value.0, value.1)
    }
}

impl From<(&Node, &Node)> for Edge {
    fn from(value: (&Node, &Node)) -> Self {
        Edge(*value.0, *value.1)
    }
}

impl From<&Edge> for Edge {
    fn from(value: &Edge) -> Self {
        *value
    }
}

impl From<Edge> for (Node, Node) {
    fn from(value: Edge) -> Self {
        (value.0, value.1)
    }
}
