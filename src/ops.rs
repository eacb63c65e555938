use crate::prelude::*;

/// Read access to an assignment instance: the sizes of both sides and the ordered edge list.
///
/// Both solvers are implemented for every `WorkerTaskGraph` (see [`AssignmentSolver`](crate::algo::AssignmentSolver)),
/// so any type able to list its edges in a stable order can be solved directly.
pub trait WorkerTaskGraph {
    /// Returns the number of workers; workers are numbered `1..=number_of_workers()`
    fn number_of_workers(&self) -> NumNodes;

    /// Returns the number of tasks; tasks are numbered `1..=number_of_tasks()`
    fn number_of_tasks(&self) -> NumNodes;

    /// Returns an iterator over all edges in insertion order.
    /// The order determines the iteration order of both solvers.
    fn edges(&self) -> impl Iterator<Item = Edge> + '_;

    /// Returns the number of edges (duplicates included)
    fn number_of_edges(&self) -> NumEdges {
        self.edges().count() as NumEdges
    }

    /// Returns an iterator over all worker identifiers
    fn workers(&self) -> std::ops::RangeInclusive<Node> {
        1..=self.number_of_workers()
    }

    /// Returns an iterator over all task identifiers
    fn tasks(&self) -> std::ops::RangeInclusive<Node> {
        1..=self.number_of_tasks()
    }

    /// Returns *true* if the graph has no edges
    fn has_no_edges(&self) -> bool {
        self.edges().next().is_none()
    }

    /// Returns *true* if `(worker, task)` is in range for this graph
    fn is_in_range(&self, Edge(worker, task): Edge) -> bool {
        (1..=self.number_of_workers()).contains(&worker)
            && (1..=self.number_of_tasks()).contains(&task)
    }

    /// Returns the first edge that references an identifier outside of the declared bounds
    fn validate(&self) -> Result<()> {
        match self.edges().find(|&e| !self.is_in_range(e)) {
            None => Ok(()),
            Some(Edge(worker, task)) => Err(MatchingError::OutOfRange {
                worker,
                task,
                number_of_workers: self.number_of_workers(),
                number_of_tasks: self.number_of_tasks(),
            }),
        }
    }
}
