/*!
# Graph Representations

- [`BipartiteGraph`]: the input model of an assignment instance. Stores both side sizes and the
  edge list in insertion order. Construction does not validate identifiers; the solvers do.
- [`WorkerAdjacency`]: a validated CSR view (worker → tasks) built from any
  [`WorkerTaskGraph`] and used internally by both solvers.
*/

use crate::prelude::*;

mod csr;

pub use csr::*;

/// A bipartite graph between workers `1..=W` and tasks `1..=T` with unit-capacity edges
/// `worker -> task`.
///
/// # Examples
/// ```
/// use bimatch::prelude::*;
///
/// let mut graph = BipartiteGraph::new(2, 3);
/// graph.add_edge(1, 3);
/// graph.add_edges([(2, 1), (2, 3)]);
///
/// assert_eq!(graph.number_of_edges(), 3);
/// assert!(graph.has_edge(2, 1));
/// assert!(graph.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BipartiteGraph {
    number_of_workers: NumNodes,
    number_of_tasks: NumNodes,
    edges: Vec<Edge>,
}

impl BipartiteGraph {
    /// Creates a graph with the given number of workers and tasks and no edges
    pub fn new(number_of_workers: NumNodes, number_of_tasks: NumNodes) -> Self {
        Self {
            number_of_workers,
            number_of_tasks,
            edges: Vec::new(),
        }
    }

    /// Creates a graph from an edge list without validating it
    pub fn from_edges<I, E>(number_of_workers: NumNodes, number_of_tasks: NumNodes, edges: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Edge>,
    {
        let mut graph = Self::new(number_of_workers, number_of_tasks);
        graph.add_edges(edges);
        graph
    }

    /// Creates a graph from an edge list and fails with [`MatchingError::OutOfRange`] if an edge
    /// references an identifier outside of the declared bounds
    pub fn try_from_edges<I, E>(
        number_of_workers: NumNodes,
        number_of_tasks: NumNodes,
        edges: I,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<Edge>,
    {
        let graph = Self::from_edges(number_of_workers, number_of_tasks, edges);
        graph.validate()?;
        Ok(graph)
    }

    /// Appends the edge `(worker, task)`. Identifiers are not checked.
    pub fn add_edge(&mut self, worker: Node, task: Node) {
        self.edges.push(Edge(worker, task));
    }

    /// Appends all given edges in order
    pub fn add_edges<I, E>(&mut self, edges: I)
    where
        I: IntoIterator<Item = E>,
        E: Into<Edge>,
    {
        self.edges.extend(edges.into_iter().map(|e| e.into()));
    }

    /// Returns *true* if `(worker, task)` was added at least once
    pub fn has_edge(&self, worker: Node, task: Node) -> bool {
        self.edges.contains(&Edge(worker, task))
    }

    /// Returns the edges as a slice in insertion order
    pub fn edges_as_slice(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns *true* if the graph has no edges
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Builds the validated CSR adjacency of this graph
    pub fn adjacency(&self) -> Result<WorkerAdjacency> {
        WorkerAdjacency::try_new(self)
    }
}

impl WorkerTaskGraph for BipartiteGraph {
    fn number_of_workers(&self) -> NumNodes {
        self.number_of_workers
    }

    fn number_of_tasks(&self) -> NumNodes {
        self.number_of_tasks
    }

    fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.edges.iter().copied()
    }

    fn number_of_edges(&self) -> NumEdges {
        self.edges.len() as NumEdges
    }

    fn has_no_edges(&self) -> bool {
        self.edges.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction() {
        let graph = BipartiteGraph::from_edges(3, 3, [(1, 1), (1, 2), (2, 1), (2, 3), (3, 2)]);

        assert_eq!(graph.number_of_workers(), 3);
        assert_eq!(graph.number_of_tasks(), 3);
        assert_eq!(graph.number_of_edges(), 5);
        assert_eq!(graph.workers().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(graph.edges().next(), Some(Edge(1, 1)));
        assert!(graph.has_edge(2, 3));
        assert!(!graph.has_edge(3, 3));
        assert!(!graph.is_empty());
    }

    #[test]
    fn try_from_edges() {
        assert!(BipartiteGraph::try_from_edges(2, 2, [(1, 2), (2, 1)]).is_ok());
        assert_eq!(
            BipartiteGraph::try_from_edges(1, 3, [(1, 5)]),
            Err(MatchingError::OutOfRange {
                worker: 1,
                task: 5,
                number_of_workers: 1,
                number_of_tasks: 3
            })
        );
    }

    #[test]
    fn empty() {
        let graph = BipartiteGraph::new(2, 2);
        assert!(graph.is_empty());
        assert!(graph.has_no_edges());
        assert!(graph.validate().is_ok());
        assert_eq!(graph.adjacency().unwrap().number_of_edges(), 0);
    }
}
