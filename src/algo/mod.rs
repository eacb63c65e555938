/*!
# Assignment Algorithms

Two independent solvers compute a maximum assignment of workers to tasks:

- [`HopcroftKarp`] computes a maximum bipartite matching directly via phased BFS layering and
  DFS augmentation in `O(E * sqrt(V))`.
- [`EdmondsKarp`] computes a maximum `s-t` flow on the derived unit-capacity network
  `source -> workers -> tasks -> sink` and projects the saturated worker-task arcs back onto a
  matching.

Both are available as configurable structs (Builder / Setter pattern), as methods of the
[`AssignmentSolver`] trait implemented for every [`WorkerTaskGraph`], and as the free functions
[`maximum_bipartite_matching`] and [`maximum_flow_matching`].
```rust
use bimatch::{prelude::*, algo::*};

let graph = BipartiteGraph::from_edges(3, 3, [(1, 1), (1, 2), (2, 1), (2, 3), (3, 2)]);

let matching = graph.maximum_bipartite_matching().unwrap();
let flow = graph.maximum_flow_matching().unwrap();

assert_eq!(matching.size(), 3);
assert_eq!(flow.flow_value(), Some(3));
```
*/

mod edmonds_karp;
mod hopcroft_karp;

use std::{fmt::Display, str::FromStr};

use itertools::Itertools;

use crate::prelude::*;

pub use edmonds_karp::*;
pub use hopcroft_karp::*;

/// Output of either solver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchingResult {
    pairs: Vec<Edge>,
    /// Positions in `pairs` ordered by task
    by_task: Vec<usize>,
    trace: Trace,
    flow_value: Option<NumNodes>,
}

impl MatchingResult {
    pub(crate) fn new(pairs: Vec<Edge>, trace: Trace, flow_value: Option<NumNodes>) -> Self {
        debug_assert!(pairs.is_sorted());
        let by_task = (0..pairs.len())
            .sorted_unstable_by_key(|&i| pairs[i].task())
            .collect();
        Self {
            pairs,
            by_task,
            trace,
            flow_value,
        }
    }

    /// Matched `(worker, task)` pairs sorted by worker.
    /// Each worker and each task occurs at most once.
    pub fn pairs(&self) -> &[Edge] {
        &self.pairs
    }

    /// Number of matched pairs
    pub fn size(&self) -> usize {
        self.pairs.len()
    }

    /// Progress narration of the solver in chronological order
    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    /// Value of the maximum flow; only present for [`EdmondsKarp`]
    pub fn flow_value(&self) -> Option<NumNodes> {
        self.flow_value
    }

    /// Returns the task assigned to `worker`, if any
    pub fn task_of(&self, worker: Node) -> Option<Node> {
        self.pairs
            .binary_search_by_key(&worker, |e| e.worker())
            .ok()
            .map(|i| self.pairs[i].task())
    }

    /// Returns the worker assigned to `task`, if any
    pub fn worker_of(&self, task: Node) -> Option<Node> {
        self.by_task
            .binary_search_by_key(&task, |&i| self.pairs[i].task())
            .ok()
            .map(|i| self.pairs[self.by_task[i]].worker())
    }

    /// Returns *true* if `edge` is part of the matching
    pub fn contains(&self, edge: Edge) -> bool {
        self.pairs.binary_search(&edge).is_ok()
    }

    /// Consumes the result and returns its parts
    pub fn into_parts(self) -> (Vec<Edge>, Trace, Option<NumNodes>) {
        (self.pairs, self.trace, self.flow_value)
    }
}

/// Settings shared by both solvers.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SolverConfig {
    /// Store trace lines in the result
    pub record_trace: bool,
    /// Fail with [`MatchingError::EmptyGraph`] instead of returning an empty matching
    pub reject_empty: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            record_trace: true,
            reject_empty: false,
        }
    }
}

impl SolverConfig {
    /// Creates the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates whether trace lines are stored
    pub fn record_trace(mut self, record_trace: bool) -> Self {
        self.record_trace = record_trace;
        self
    }

    /// Updates whether graphs without edges are rejected
    pub fn reject_empty(mut self, reject_empty: bool) -> Self {
        self.reject_empty = reject_empty;
        self
    }

    /// Creates the trace recorder matching this configuration
    pub(crate) fn new_trace(&self) -> Trace {
        if self.record_trace {
            Trace::new()
        } else {
            Trace::disabled()
        }
    }

    /// Fails if the graph is empty and empty graphs are rejected
    pub(crate) fn check_empty<G>(&self, graph: &G) -> Result<()>
    where
        G: WorkerTaskGraph + ?Sized,
    {
        if self.reject_empty && graph.has_no_edges() {
            Err(MatchingError::EmptyGraph)
        } else {
            Ok(())
        }
    }
}

/// Identifier of a solver.
///
/// Used by the IO layer and the command line to select the algorithm at runtime.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Maximum bipartite matching via [`HopcroftKarp`]
    HopcroftKarp,
    /// Maximum flow via [`EdmondsKarp`]
    EdmondsKarp,
}

impl Algorithm {
    /// Runs the selected solver with the default configuration
    pub fn solve<G>(&self, graph: &G) -> Result<MatchingResult>
    where
        G: WorkerTaskGraph + ?Sized,
    {
        self.solve_with(graph, SolverConfig::default())
    }

    /// Runs the selected solver with the given configuration
    pub fn solve_with<G>(&self, graph: &G, config: SolverConfig) -> Result<MatchingResult>
    where
        G: WorkerTaskGraph + ?Sized,
    {
        match self {
            Algorithm::HopcroftKarp => HopcroftKarp::with_config(graph, config).run(),
            Algorithm::EdmondsKarp => EdmondsKarp::with_config(graph, config).run(),
        }
    }

    /// Canonical name used in files and on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::HopcroftKarp => "hopcroft-karp",
            Algorithm::EdmondsKarp => "edmonds-karp",
        }
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = std::io::Error;

    fn from_str(s: &str) -> std::io::Result<Self> {
        match s.to_lowercase().as_str() {
            "hopcroft-karp" | "hopcroftkarp" | "hk" => Ok(Algorithm::HopcroftKarp),
            "edmonds-karp" | "edmondskarp" | "ek" => Ok(Algorithm::EdmondsKarp),
            _ => Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Unknown Algorithm: {s}").as_str(),
            )),
        }
    }
}

/// A trait providing both assignment solvers on a graph.
pub trait AssignmentSolver: WorkerTaskGraph {
    /// Computes a **maximum bipartite matching** with Hopcroft–Karp.
    ///
    /// # Errors
    /// Fails with [`MatchingError::OutOfRange`] if an edge references an identifier outside
    /// of the declared bounds.
    fn maximum_bipartite_matching(&self) -> Result<MatchingResult>;

    /// Computes a **maximum flow** on the derived network with Edmonds–Karp and projects it
    /// onto a matching. The result carries the flow value.
    ///
    /// # Errors
    /// Fails with [`MatchingError::OutOfRange`] if an edge references an identifier outside
    /// of the declared bounds.
    fn maximum_flow_matching(&self) -> Result<MatchingResult>;
}

impl<G> AssignmentSolver for G
where
    G: WorkerTaskGraph,
{
    fn maximum_bipartite_matching(&self) -> Result<MatchingResult> {
        HopcroftKarp::new(self).run()
    }

    fn maximum_flow_matching(&self) -> Result<MatchingResult> {
        EdmondsKarp::new(self).run()
    }
}

/// Computes a maximum bipartite matching of `graph` with Hopcroft–Karp.
/// See [`AssignmentSolver::maximum_bipartite_matching`].
pub fn maximum_bipartite_matching<G>(graph: &G) -> Result<MatchingResult>
where
    G: WorkerTaskGraph + ?Sized,
{
    HopcroftKarp::new(graph).run()
}

/// Computes a maximum flow matching of `graph` with Edmonds–Karp.
/// See [`AssignmentSolver::maximum_flow_matching`].
pub fn maximum_flow_matching<G>(graph: &G) -> Result<MatchingResult>
where
    G: WorkerTaskGraph + ?Sized,
{
    EdmondsKarp::new(graph).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{gens::*, testing::*};
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    #[test]
    fn algorithm_from_str() {
        assert_eq!("hopcroft-karp".parse::<Algorithm>().unwrap(), Algorithm::HopcroftKarp);
        assert_eq!("HK".parse::<Algorithm>().unwrap(), Algorithm::HopcroftKarp);
        assert_eq!("Edmonds-Karp".parse::<Algorithm>().unwrap(), Algorithm::EdmondsKarp);
        assert_eq!("ek".parse::<Algorithm>().unwrap(), Algorithm::EdmondsKarp);
        assert!("dinic".parse::<Algorithm>().is_err());

        for algo in [Algorithm::HopcroftKarp, Algorithm::EdmondsKarp] {
            assert_eq!(algo.to_string().parse::<Algorithm>().unwrap(), algo);
        }
    }

    #[test]
    fn scenarios() {
        // (workers, tasks, edges, maximum matching size)
        let scenarios: [(NumNodes, NumNodes, Vec<(Node, Node)>, usize); 4] = [
            (3, 3, vec![(1, 1), (1, 2), (2, 1), (2, 3), (3, 2)], 3),
            (2, 2, vec![(1, 1), (2, 1)], 1),
            (2, 2, vec![], 0),
            (4, 4, complete_bipartite(4, 4).edges().map(|e| e.into()).collect(), 4),
        ];

        for (workers, tasks, edges, size) in scenarios {
            let graph = BipartiteGraph::from_edges(workers, tasks, edges);

            let matching = graph.maximum_bipartite_matching().unwrap();
            let flow = graph.maximum_flow_matching().unwrap();

            assert_eq!(matching.size(), size);
            assert_eq!(matching.flow_value(), None);
            assert_eq!(flow.size(), size);
            assert_eq!(flow.flow_value(), Some(size as NumNodes));

            assert!(!matching.trace().is_empty());
            assert!(!flow.trace().is_empty());

            assert_valid_matching(&graph, matching.pairs());
            assert_valid_matching(&graph, flow.pairs());
        }
    }

    #[test]
    fn out_of_range() {
        let graph = BipartiteGraph::from_edges(1, 3, [(1, 5)]);
        let expected = Err(MatchingError::OutOfRange {
            worker: 1,
            task: 5,
            number_of_workers: 1,
            number_of_tasks: 3,
        });

        assert_eq!(graph.maximum_bipartite_matching(), expected);
        assert_eq!(graph.maximum_flow_matching(), expected);
    }

    #[test]
    fn reject_empty() {
        let graph = BipartiteGraph::new(2, 2);
        let config = SolverConfig::new().reject_empty(true);

        for algo in [Algorithm::HopcroftKarp, Algorithm::EdmondsKarp] {
            assert_eq!(algo.solve_with(&graph, config), Err(MatchingError::EmptyGraph));
            assert_eq!(algo.solve(&graph).unwrap().size(), 0);
        }
    }

    #[test]
    fn matching_equals_flow() {
        let rng = &mut Pcg64Mcg::seed_from_u64(3);

        for (workers, tasks) in [(1, 1), (5, 3), (3, 5), (10, 10), (20, 15)] {
            for prob in [0.05, 0.1, 0.3, 0.7] {
                for _ in 0..10 {
                    let graph: BipartiteGraph = RandomBipartite::new()
                        .workers(workers)
                        .tasks(tasks)
                        .prob(prob)
                        .generate(rng);

                    let matching = maximum_bipartite_matching(&graph).unwrap();
                    let flow = maximum_flow_matching(&graph).unwrap();

                    assert_eq!(Some(matching.size() as NumNodes), flow.flow_value());
                    assert_eq!(matching.size(), flow.size());

                    assert_valid_matching(&graph, matching.pairs());
                    assert_valid_matching(&graph, flow.pairs());

                    assert!(!has_augmenting_path(&graph, matching.pairs()).unwrap());
                    assert!(!has_augmenting_path(&graph, flow.pairs()).unwrap());

                    // both solvers are deterministic
                    assert_eq!(maximum_bipartite_matching(&graph).unwrap(), matching);
                    assert_eq!(maximum_flow_matching(&graph).unwrap(), flow);
                }
            }
        }
    }

    #[test]
    fn result_lookups() {
        let graph = BipartiteGraph::from_edges(3, 3, [(1, 2), (2, 1), (3, 3)]);
        let result = graph.maximum_bipartite_matching().unwrap();

        assert_eq!(result.pairs(), &[Edge(1, 2), Edge(2, 1), Edge(3, 3)]);
        assert_eq!(result.task_of(2), Some(1));
        assert_eq!(result.worker_of(3), Some(3));
        assert_eq!(result.task_of(4), None);
        assert!(result.contains(Edge(1, 2)));
        assert!(!result.contains(Edge(1, 1)));
    }

    #[test]
    fn lookups_by_task() {
        // pairs sorted by worker are in decreasing task order here
        let graph = BipartiteGraph::from_edges(4, 5, [(1, 5), (2, 4), (3, 2), (4, 1)]);
        let result = graph.maximum_flow_matching().unwrap();

        assert_eq!(result.pairs(), &[Edge(1, 5), Edge(2, 4), Edge(3, 2), Edge(4, 1)]);
        for &Edge(worker, task) in result.pairs() {
            assert_eq!(result.worker_of(task), Some(worker));
            assert_eq!(result.task_of(worker), Some(task));
        }
        assert_eq!(result.worker_of(3), None);
        assert_eq!(result.worker_of(6), None);
    }
}
