/*!
# Hopcroft–Karp

Computes a **maximum bipartite matching** between workers and tasks.

The algorithm works in phases. Each phase
1. labels all workers with their BFS distance from the set of free workers along alternating
   paths, stopping at the first layer that reaches a free task, and
2. augments along a maximal set of vertex-disjoint shortest augmenting paths found by a DFS that
   only follows edges into the next BFS layer.

As the shortest augmenting path grows with every phase, there are at most `O(sqrt(V))` phases,
yielding a running time of `O(E * sqrt(V))`.
*/

use std::collections::VecDeque;

use log::{debug, info};

use super::*;
use crate::node::partner;

/// Distance label of a worker in the BFS layering
type Distance = NumNodes;

/// Distance of workers that are not (or no longer) part of the layering
const INFINITY: Distance = Distance::MAX;

/// Configurable Hopcroft–Karp solver for a borrowed graph.
///
/// # Examples
/// ```
/// use bimatch::{prelude::*, algo::*};
///
/// let graph = BipartiteGraph::from_edges(2, 2, [(1, 1), (2, 1)]);
/// let result = HopcroftKarp::new(&graph).record_trace(false).run().unwrap();
///
/// assert_eq!(result.size(), 1);
/// assert!(result.trace().is_empty());
/// ```
pub struct HopcroftKarp<'a, G: ?Sized> {
    graph: &'a G,
    config: SolverConfig,
}

/// Summary of one completed phase.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Phase {
    /// Number of edges on the shortest augmenting paths of this phase
    pub path_length: NumNodes,
    /// Number of augmenting paths applied in this phase
    pub augmented: NumNodes,
    /// Size of the matching after this phase
    pub matching_size: NumNodes,
}

impl<'a, G> HopcroftKarp<'a, G>
where
    G: WorkerTaskGraph + ?Sized,
{
    /// Creates a new solver with the default configuration
    pub fn new(graph: &'a G) -> Self {
        Self::with_config(graph, SolverConfig::default())
    }

    /// Creates a new solver with the given configuration
    pub fn with_config(graph: &'a G, config: SolverConfig) -> Self {
        Self { graph, config }
    }

    /// Sets whether trace lines are stored in the result
    pub fn set_record_trace(&mut self, record_trace: bool) {
        self.config.record_trace = record_trace;
    }

    /// Chainable version of [`Self::set_record_trace`]
    pub fn record_trace(mut self, record_trace: bool) -> Self {
        self.set_record_trace(record_trace);
        self
    }

    /// Sets whether graphs without edges are rejected with [`MatchingError::EmptyGraph`]
    pub fn set_reject_empty(&mut self, reject_empty: bool) {
        self.config.reject_empty = reject_empty;
    }

    /// Chainable version of [`Self::set_reject_empty`]
    pub fn reject_empty(mut self, reject_empty: bool) -> Self {
        self.set_reject_empty(reject_empty);
        self
    }

    /// Computes a maximum matching.
    ///
    /// Each call starts from scratch; the graph is not modified.
    pub fn run(&self) -> Result<MatchingResult> {
        let adjacency = WorkerAdjacency::try_new(self.graph)?;
        self.config.check_empty(self.graph)?;

        let mut trace = self.config.new_trace();
        trace.record(format_args!(
            "Initialize all {} workers and {} tasks as free",
            adjacency.number_of_workers(),
            adjacency.number_of_tasks()
        ));

        let mut state = MatchingState::new(adjacency);
        for (i, phase) in state.by_ref().enumerate() {
            debug!(
                "phase {}: {} augmenting paths of length {}",
                i + 1,
                phase.augmented,
                phase.path_length
            );
            trace.record(format_args!(
                "Phase {}: found augmenting paths of length {} using BFS",
                i + 1,
                phase.path_length
            ));
            trace.record(format_args!(
                "Phase {}: updated matching using DFS, size = {}",
                i + 1,
                phase.matching_size
            ));
        }

        let pairs = state.pairs();
        info!("Hopcroft-Karp: maximum matching of size {}", pairs.len());
        trace.record(format_args!(
            "Maximum bipartite matching size = {}",
            pairs.len()
        ));

        Ok(MatchingResult::new(pairs, trace, None))
    }
}

/// Returns *true* if the given matching of `graph` can be extended by an augmenting path,
/// i.e. if it is **not** maximum.
///
/// This runs a single BFS layering phase seeded with `pairs`.
///
/// # Errors
/// Fails with [`MatchingError::OutOfRange`] for invalid graphs and with
/// [`MatchingError::InvalidMatching`] if a pair is not an edge of the graph or shares an
/// endpoint with an earlier pair.
pub fn has_augmenting_path<G>(graph: &G, pairs: &[Edge]) -> Result<bool>
where
    G: WorkerTaskGraph + ?Sized,
{
    let mut state = MatchingState::new(WorkerAdjacency::try_new(graph)?);
    for &pair in pairs {
        state.try_seed(pair)?;
    }

    Ok(state.bfs())
}

/// Stack frame of the augmenting DFS
#[derive(Debug, Copy, Clone)]
struct Frame {
    /// Worker (0-based) this frame explores
    worker: Node,
    /// Position of the next task to try in the worker's adjacency
    next: NumNodes,
    /// Task through which the walk left this worker
    via: Node,
}

impl Frame {
    fn new(worker: Node) -> Self {
        Self {
            worker,
            next: 0,
            via: INVALID_NODE,
        }
    }
}

/// Working memory of a single Hopcroft–Karp run. All indices are 0-based.
struct MatchingState {
    adjacency: WorkerAdjacency,
    worker_partner: Vec<Partner>,
    task_partner: Vec<Partner>,
    dist: Vec<Distance>,
    /// Layer at which the BFS reached a free task
    free_dist: Distance,
    queue: VecDeque<Node>,
    stack: Vec<Frame>,
    size: NumNodes,
}

impl MatchingState {
    fn new(adjacency: WorkerAdjacency) -> Self {
        let n = adjacency.number_of_workers() as usize;
        let m = adjacency.number_of_tasks() as usize;
        Self {
            adjacency,
            worker_partner: vec![None; n],
            task_partner: vec![None; m],
            dist: vec![INFINITY; n],
            free_dist: INFINITY,
            queue: VecDeque::with_capacity(n),
            stack: Vec::new(),
            size: 0,
        }
    }

    /// Adds the (1-based) pair to the matching if it is a free edge of the graph
    fn try_seed(&mut self, pair: Edge) -> Result<()> {
        let Edge(w, t) = pair;
        let valid = (1..=self.adjacency.number_of_workers()).contains(&w)
            && (1..=self.adjacency.number_of_tasks()).contains(&t)
            && self.adjacency.tasks_of(w - 1).contains(&(t - 1))
            && self.worker_partner[w as usize - 1].is_none()
            && self.task_partner[t as usize - 1].is_none();

        if !valid {
            return Err(MatchingError::InvalidMatching(pair));
        }

        self.worker_partner[w as usize - 1] = partner(t - 1);
        self.task_partner[t as usize - 1] = partner(w - 1);
        self.size += 1;
        Ok(())
    }

    /// Computes the BFS layering from all free workers.
    /// Returns *true* if a free task is reachable via an alternating path.
    fn bfs(&mut self) -> bool {
        self.queue.clear();
        for (u, (dist, p)) in self.dist.iter_mut().zip(&self.worker_partner).enumerate() {
            if p.is_none() {
                *dist = 0;
                self.queue.push_back(u as Node);
            } else {
                *dist = INFINITY;
            }
        }
        self.free_dist = INFINITY;

        while let Some(u) = self.queue.pop_front() {
            let d = self.dist[u as usize];
            if d >= self.free_dist {
                continue;
            }

            for &v in self.adjacency.tasks_of(u) {
                match self.task_partner[v as usize] {
                    None => {
                        if self.free_dist == INFINITY {
                            self.free_dist = d + 1;
                        }
                    }
                    Some(w) => {
                        let w = w.get() as usize;
                        if self.dist[w] == INFINITY {
                            self.dist[w] = d + 1;
                            self.queue.push_back(w as Node);
                        }
                    }
                }
            }
        }

        self.free_dist != INFINITY
    }

    /// Searches a layered augmenting path starting at the free worker `root` and flips it.
    /// Workers whose search is exhausted are removed from the layering.
    fn try_augment(&mut self, root: Node) -> bool {
        debug_assert!(self.dist[root as usize] != INFINITY);

        self.stack.clear();
        self.stack.push(Frame::new(root));

        while let Some(frame) = self.stack.last_mut() {
            let u = frame.worker;
            let Some(&v) = self.adjacency.tasks_of(u).get(frame.next as usize) else {
                self.dist[u as usize] = INFINITY;
                self.stack.pop();
                continue;
            };
            frame.next += 1;

            let next_layer = self.dist[u as usize] + 1;
            match self.task_partner[v as usize] {
                None => {
                    if self.free_dist == next_layer {
                        frame.via = v;
                        self.flip_stack();
                        return true;
                    }
                }
                Some(w) => {
                    let w = w.get();
                    if self.dist[w as usize] == next_layer {
                        frame.via = v;
                        self.stack.push(Frame::new(w));
                    }
                }
            }
        }

        false
    }

    /// Matches every worker on the stack with the task it left through
    fn flip_stack(&mut self) {
        for frame in self.stack.drain(..) {
            self.worker_partner[frame.worker as usize] = partner(frame.via);
            self.task_partner[frame.via as usize] = partner(frame.worker);
        }
    }

    /// Returns the matching as sorted 1-based pairs
    fn pairs(&self) -> Vec<Edge> {
        self.worker_partner
            .iter()
            .enumerate()
            .filter_map(|(u, p)| p.map(|t| Edge(u as Node + 1, t.get() + 1)))
            .collect()
    }
}

/// Each iteration executes one phase; iteration ends once the matching is maximum.
impl Iterator for MatchingState {
    type Item = Phase;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.bfs() {
            return None;
        }

        let path_length = 2 * self.free_dist - 1;

        let mut augmented = 0;
        for u in 0..self.adjacency.number_of_workers() {
            if self.worker_partner[u as usize].is_none() && self.try_augment(u) {
                augmented += 1;
            }
        }
        debug_assert!(augmented > 0);

        self.size += augmented;
        Some(Phase {
            path_length,
            augmented,
            matching_size: self.size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;

    #[test]
    fn small_instances() {
        let graph = BipartiteGraph::from_edges(3, 3, [(1, 1), (1, 2), (2, 1), (2, 3), (3, 2)]);
        let result = graph.maximum_bipartite_matching().unwrap();
        assert_eq!(result.size(), 3);
        assert_valid_matching(&graph, result.pairs());

        let graph = BipartiteGraph::from_edges(2, 2, [(1, 1), (2, 1)]);
        let result = graph.maximum_bipartite_matching().unwrap();
        assert_eq!(result.pairs(), &[Edge(1, 1)]);
    }

    #[test]
    fn requires_augmentation() {
        // greedy in edge order matches (1,1) and blocks worker 2
        let graph = BipartiteGraph::from_edges(2, 2, [(1, 1), (1, 2), (2, 1)]);
        let result = graph.maximum_bipartite_matching().unwrap();
        assert_eq!(result.pairs(), &[Edge(1, 2), Edge(2, 1)]);
    }

    #[test]
    fn long_augmenting_path() {
        // staircase: worker i connects to tasks i and i + 1; only the shifted matching is perfect
        let n = 50;
        let mut graph = BipartiteGraph::new(n, n);
        for i in 1..n {
            graph.add_edge(i, i + 1);
            graph.add_edge(i, i);
        }
        graph.add_edge(n, 1);

        let result = graph.maximum_bipartite_matching().unwrap();
        assert_eq!(result.size(), n as usize);
        assert_valid_matching(&graph, result.pairs());
    }

    #[test]
    fn duplicates_and_isolated() {
        let graph = BipartiteGraph::from_edges(4, 3, [(1, 1), (1, 1), (2, 1), (2, 1), (4, 3)]);
        let result = graph.maximum_bipartite_matching().unwrap();

        assert_eq!(result.size(), 2);
        assert_eq!(result.task_of(3), None);
        assert_valid_matching(&graph, result.pairs());
    }

    #[test]
    fn trace() {
        let graph = BipartiteGraph::from_edges(2, 2, [(1, 1), (1, 2), (2, 1)]);
        let result = graph.maximum_bipartite_matching().unwrap();
        let lines = result.trace().lines();

        assert_eq!(lines.first().unwrap(), "Initialize all 2 workers and 2 tasks as free");
        assert_eq!(lines.last().unwrap(), "Maximum bipartite matching size = 2");
        // two lines per phase
        assert_eq!((lines.len() - 2) % 2, 0);
        assert!(lines[1].starts_with("Phase 1: found augmenting paths of length 1"));
        assert_eq!(lines[2], "Phase 1: updated matching using DFS, size = 1");

        let empty = BipartiteGraph::new(2, 2).maximum_bipartite_matching().unwrap();
        assert_eq!(
            empty.trace().lines(),
            [
                "Initialize all 2 workers and 2 tasks as free",
                "Maximum bipartite matching size = 0"
            ]
        );
    }

    #[test]
    fn phases() {
        let graph = BipartiteGraph::from_edges(2, 2, [(1, 1), (1, 2), (2, 1)]);
        let mut state = MatchingState::new(graph.adjacency().unwrap());

        let phases: Vec<Phase> = state.by_ref().collect();
        assert_eq!(
            phases,
            vec![
                Phase {
                    path_length: 1,
                    augmented: 1,
                    matching_size: 1
                },
                Phase {
                    path_length: 3,
                    augmented: 1,
                    matching_size: 2
                }
            ]
        );
        assert_eq!(state.next(), None);
    }

    #[test]
    fn augmenting_path_detection() {
        let graph = BipartiteGraph::from_edges(2, 2, [(1, 1), (1, 2), (2, 1)]);

        assert!(has_augmenting_path(&graph, &[]).unwrap());
        assert!(has_augmenting_path(&graph, &[Edge(1, 1)]).unwrap());
        assert!(!has_augmenting_path(&graph, &[Edge(1, 2), Edge(2, 1)]).unwrap());

        assert_eq!(
            has_augmenting_path(&graph, &[Edge(2, 2)]),
            Err(MatchingError::InvalidMatching(Edge(2, 2)))
        );
        assert_eq!(
            has_augmenting_path(&graph, &[Edge(1, 1), Edge(2, 1)]),
            Err(MatchingError::InvalidMatching(Edge(2, 1)))
        );
        assert_eq!(
            has_augmenting_path(&graph, &[Edge(3, 1)]),
            Err(MatchingError::InvalidMatching(Edge(3, 1)))
        );
    }

    #[test]
    fn does_not_modify_graph() {
        let graph = BipartiteGraph::from_edges(3, 2, [(3, 2), (1, 1), (2, 2)]);
        let copy = graph.clone();

        let first = HopcroftKarp::new(&graph).run().unwrap();
        let second = HopcroftKarp::new(&graph).run().unwrap();

        assert_eq!(graph, copy);
        assert_eq!(first, second);
    }
}
