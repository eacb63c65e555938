/*!
# Compressed Sparse Row (CSR) Worker Adjacency

[`WorkerAdjacency`] stores the task lists of all workers in one flattened array with offset
indices marking the start of each worker's slice. It is built once per solver invocation from a
validated edge list and then only read.

In contrast to the public 1-based identifiers, a `WorkerAdjacency` is **0-based** on both sides:
worker `w` is stored at index `w - 1` and lists task `t` as `t - 1`.
*/

use super::*;

/// Immutable CSR adjacency from workers to tasks.
///
/// The neighbors of each worker are kept in edge insertion order, which is the iteration order
/// used by the solvers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerAdjacency {
    offsets: Vec<NumEdges>,
    tasks: Vec<Node>,
    number_of_tasks: NumNodes,
}

impl WorkerAdjacency {
    /// Builds the adjacency of a graph, failing with
    /// [`MatchingError::OutOfRange`] on the first edge outside of the declared bounds.
    pub fn try_new<G>(graph: &G) -> Result<Self>
    where
        G: WorkerTaskGraph + ?Sized,
    {
        graph.validate()?;

        let n = graph.number_of_workers() as usize;

        // counting sort by worker keeps the relative order of each worker's edges
        let mut offsets = vec![0 as NumEdges; n + 1];
        for Edge(w, _) in graph.edges() {
            offsets[w as usize] += 1;
        }
        for i in 1..=n {
            offsets[i] += offsets[i - 1];
        }

        let mut tasks = vec![0 as Node; offsets[n] as usize];
        let mut cursor = offsets.clone();
        for Edge(w, t) in graph.edges() {
            let pos = &mut cursor[w as usize - 1];
            tasks[*pos as usize] = t - 1;
            *pos += 1;
        }

        Ok(Self {
            offsets,
            tasks,
            number_of_tasks: graph.number_of_tasks(),
        })
    }

    /// Returns the number of workers
    pub fn number_of_workers(&self) -> NumNodes {
        (self.offsets.len() - 1) as NumNodes
    }

    /// Returns the number of tasks
    pub fn number_of_tasks(&self) -> NumNodes {
        self.number_of_tasks
    }

    /// Returns the total number of stored edges
    pub fn number_of_edges(&self) -> NumEdges {
        self.tasks.len() as NumEdges
    }

    /// Returns the (0-based) tasks adjacent to the worker with index `u`.
    /// ** Panics if `u >= number_of_workers()` **
    #[inline]
    pub fn tasks_of(&self, u: Node) -> &[Node] {
        let u = u as usize;
        &self.tasks[self.offsets[u] as usize..self.offsets[u + 1] as usize]
    }

    /// Returns the number of tasks adjacent to the worker with index `u`
    #[inline]
    pub fn degree_of(&self, u: Node) -> NumNodes {
        self.offsets[u as usize + 1] - self.offsets[u as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_insertion_order() {
        let graph = BipartiteGraph::from_edges(3, 4, [(2, 4), (1, 3), (2, 1), (1, 1), (2, 2)]);
        let adj = WorkerAdjacency::try_new(&graph).unwrap();

        assert_eq!(adj.number_of_workers(), 3);
        assert_eq!(adj.number_of_tasks(), 4);
        assert_eq!(adj.number_of_edges(), 5);

        assert_eq!(adj.tasks_of(0), &[2, 0]);
        assert_eq!(adj.tasks_of(1), &[3, 0, 1]);
        assert!(adj.tasks_of(2).is_empty());
        assert_eq!(adj.degree_of(1), 3);
    }

    #[test]
    fn rejects_out_of_range() {
        for (w, t) in [(0, 1), (1, 0), (3, 1), (1, 5)] {
            let graph = BipartiteGraph::from_edges(2, 4, [(1, 1), (w, t)]);
            assert_eq!(
                WorkerAdjacency::try_new(&graph),
                Err(MatchingError::OutOfRange {
                    worker: w,
                    task: t,
                    number_of_workers: 2,
                    number_of_tasks: 4,
                })
            );
        }
    }
}
