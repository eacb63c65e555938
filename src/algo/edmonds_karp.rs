/*!
# Edmonds–Karp

Computes a maximum assignment as a **maximum flow** on the unit-capacity network

```text
source --1--> worker --1--> task --1--> sink
```

with vertices numbered `source = 0`, workers `1..=W`, tasks `W+1..=W+T` and `sink = W+T+1`.
Flow is augmented along BFS-shortest paths in the residual network until the sink becomes
unreachable. As all capacities are integral, each augmentation pushes exactly one unit and at
most `W` augmentations happen.

The matching is read off the saturated worker-task arcs: with unit capacities an arc without
residual capacity carries exactly one unit of flow.
*/

use std::collections::VecDeque;

use fxhash::FxHashSet;
use itertools::Itertools;
use log::{debug, info};
use smallvec::SmallVec;

use super::*;

/// Residual capacity of an arc
pub type Capacity = NumNodes;

/// Index of an arc in a [`ResidualNetwork`]. Arcs `a` and `a ^ 1` are reverse to each other.
pub type ArcId = NumEdges;

/// A vertex of the derived flow network.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FlowVertex {
    /// The super source connected to all workers
    Source,
    /// A worker (1-based)
    Worker(Node),
    /// A task (1-based)
    Task(Node),
    /// The super sink connected from all tasks
    Sink,
}

impl Display for FlowVertex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlowVertex::Source => write!(f, "source"),
            FlowVertex::Worker(w) => write!(f, "worker {w}"),
            FlowVertex::Task(t) => write!(f, "task {t}"),
            FlowVertex::Sink => write!(f, "sink"),
        }
    }
}

/// A sparse residual network with paired reverse arcs.
///
/// Every arc is stored together with its reverse arc (initial capacity `0`), so pushing flow
/// over an arc only requires updating the capacities of the pair. The arcs leaving a vertex are
/// kept in increasing order of their head which makes BFS deterministic.
#[derive(Debug, Clone)]
pub struct ResidualNetwork {
    number_of_workers: NumNodes,
    number_of_tasks: NumNodes,
    heads: Vec<Node>,
    capacity: Vec<Capacity>,
    out_arcs: Vec<SmallVec<[ArcId; 4]>>,
    /// Worker-task arcs in order of first occurrence of the input edge
    assignment_arcs: Vec<(Edge, ArcId)>,
}

impl ResidualNetwork {
    /// Builds the assignment network of a graph.
    /// Duplicate edges are collapsed into a single arc of capacity `1`.
    ///
    /// # Errors
    /// Fails with [`MatchingError::OutOfRange`] if an edge is outside of the declared bounds.
    pub fn assignment<G>(graph: &G) -> Result<Self>
    where
        G: WorkerTaskGraph + ?Sized,
    {
        graph.validate()?;

        let number_of_workers = graph.number_of_workers();
        let number_of_tasks = graph.number_of_tasks();
        let n = number_of_workers as usize + number_of_tasks as usize + 2;

        let mut network = Self {
            number_of_workers,
            number_of_tasks,
            heads: Vec::new(),
            capacity: Vec::new(),
            out_arcs: vec![SmallVec::new(); n],
            assignment_arcs: Vec::new(),
        };

        let source = network.source();
        let sink = network.sink();

        for w in graph.workers() {
            network.add_arc(source, w, 1);
        }

        let mut seen = FxHashSet::default();
        for edge in graph.edges() {
            if seen.insert(edge) {
                let Edge(w, t) = edge;
                let arc = network.add_arc(w, number_of_workers + t, 1);
                network.assignment_arcs.push((edge, arc));
            }
        }

        for t in graph.tasks() {
            network.add_arc(number_of_workers + t, sink, 1);
        }

        let heads = &network.heads;
        for arcs in network.out_arcs.iter_mut() {
            arcs.sort_unstable_by_key(|&a| heads[a as usize]);
        }

        Ok(network)
    }

    /// Adds the arc `(u, v)` with capacity `cap` and its reverse arc with capacity `0`.
    /// Returns the id of the forward arc.
    fn add_arc(&mut self, u: Node, v: Node, cap: Capacity) -> ArcId {
        let arc = self.heads.len() as ArcId;

        self.heads.push(v);
        self.capacity.push(cap);
        self.out_arcs[u as usize].push(arc);

        self.heads.push(u);
        self.capacity.push(0);
        self.out_arcs[v as usize].push(arc ^ 1);

        arc
    }

    /// Returns the source vertex
    pub fn source(&self) -> Node {
        0
    }

    /// Returns the sink vertex
    pub fn sink(&self) -> Node {
        self.number_of_workers + self.number_of_tasks + 1
    }

    /// Returns the number of vertices including source and sink
    pub fn number_of_vertices(&self) -> NumNodes {
        self.out_arcs.len() as NumNodes
    }

    /// Returns the number of arcs including reverse arcs
    pub fn number_of_arcs(&self) -> NumEdges {
        self.heads.len() as NumEdges
    }

    /// Returns the number of distinct worker-task arcs
    pub fn number_of_assignment_arcs(&self) -> NumEdges {
        self.assignment_arcs.len() as NumEdges
    }

    /// Returns the vertex the arc points to
    #[inline]
    pub fn head(&self, arc: ArcId) -> Node {
        self.heads[arc as usize]
    }

    /// Returns the vertex the arc starts at
    #[inline]
    pub fn tail(&self, arc: ArcId) -> Node {
        self.heads[(arc ^ 1) as usize]
    }

    /// Returns the residual capacity of the arc
    #[inline]
    pub fn residual_capacity(&self, arc: ArcId) -> Capacity {
        self.capacity[arc as usize]
    }

    /// Returns the ids of all arcs leaving `u` in increasing order of their head
    pub fn out_arcs(&self, u: Node) -> &[ArcId] {
        &self.out_arcs[u as usize]
    }

    /// Maps a vertex back onto the role it plays in the network
    pub fn label(&self, u: Node) -> FlowVertex {
        if u == self.source() {
            FlowVertex::Source
        } else if u <= self.number_of_workers {
            FlowVertex::Worker(u)
        } else if u < self.sink() {
            FlowVertex::Task(u - self.number_of_workers)
        } else {
            FlowVertex::Sink
        }
    }

    /// Moves `amount` units from the arc onto its reverse arc
    fn push(&mut self, arc: ArcId, amount: Capacity) {
        debug_assert!(self.capacity[arc as usize] >= amount);
        self.capacity[arc as usize] -= amount;
        self.capacity[(arc ^ 1) as usize] += amount;
    }

    /// Returns all input edges whose arc is saturated, sorted by worker
    pub fn saturated_assignments(&self) -> Vec<Edge> {
        self.assignment_arcs
            .iter()
            .filter(|&&(_, arc)| self.residual_capacity(arc) == 0)
            .map(|&(edge, _)| edge)
            .sorted_unstable()
            .collect()
    }
}

/// A single augmentation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AugmentingPath {
    /// Vertices from source to sink
    pub vertices: Vec<FlowVertex>,
    /// Minimum residual capacity along the path, i.e. the flow pushed over it
    pub bottleneck: Capacity,
}

impl Display for AugmentingPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.vertices.iter().join(" -> "))
    }
}

/// Configurable Edmonds–Karp solver for a borrowed graph.
///
/// # Examples
/// ```
/// use bimatch::{prelude::*, algo::*};
///
/// let graph = BipartiteGraph::from_edges(2, 2, [(1, 1), (1, 2), (2, 1)]);
///
/// let mut flow = EdmondsKarp::new(&graph).augmenting_paths().unwrap();
/// let paths: Vec<AugmentingPath> = flow.by_ref().collect();
///
/// assert_eq!(paths.len(), 2);
/// assert_eq!(flow.flow_value(), 2);
/// assert_eq!(flow.matching(), vec![Edge(1, 2), Edge(2, 1)]);
/// ```
pub struct EdmondsKarp<'a, G: ?Sized> {
    graph: &'a G,
    config: SolverConfig,
}

impl<'a, G> EdmondsKarp<'a, G>
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

    /// Builds the residual network and returns an iterator performing one augmentation per step
    pub fn augmenting_paths(&self) -> Result<MaxFlow> {
        let network = ResidualNetwork::assignment(self.graph)?;
        self.config.check_empty(self.graph)?;
        Ok(MaxFlow::new(network))
    }

    /// Computes a maximum flow and its matching.
    ///
    /// Each call starts from scratch; the graph is not modified.
    pub fn run(&self) -> Result<MatchingResult> {
        let mut flow = self.augmenting_paths()?;
        let mut trace = self.config.new_trace();

        trace.record(format_args!(
            "Create residual network with source ({}) and sink ({})",
            flow.network.source(),
            flow.network.sink()
        ));
        trace.record(format_args!(
            "Source connected to all {} workers with capacity 1",
            self.graph.number_of_workers()
        ));
        trace.record(format_args!(
            "All {} tasks connected to sink with capacity 1",
            self.graph.number_of_tasks()
        ));
        trace.record(format_args!(
            "Workers connected to tasks by {} edges with capacity 1",
            flow.network.number_of_assignment_arcs()
        ));

        while let Some(path) = flow.next() {
            debug!(
                "augmenting path {} with bottleneck {}",
                path, path.bottleneck
            );
            trace.record(format_args!("Found augmenting path {path}"));
            trace.record(format_args!("Bottleneck capacity = {}", path.bottleneck));
            trace.record("Updated residual capacities");
            trace.record(format_args!("Current max flow = {}", flow.flow_value()));
        }

        let flow_value = flow.flow_value();
        let pairs = flow.matching();
        debug_assert_eq!(pairs.len(), flow_value as usize);

        info!("Edmonds-Karp: maximum flow of value {flow_value}");
        trace.record(format_args!("Maximum flow = {flow_value}"));

        Ok(MatchingResult::new(pairs, trace, Some(flow_value)))
    }
}

/// Edmonds–Karp on a [`ResidualNetwork`].
///
/// Iterates over the augmenting paths; each call to `next` runs one BFS and pushes the
/// bottleneck capacity along the path found. The iterator is exhausted once the sink is no
/// longer reachable, at which point the flow is maximum.
pub struct MaxFlow {
    network: ResidualNetwork,
    predecessor: Vec<Option<ArcId>>,
    visited: Vec<bool>,
    queue: VecDeque<Node>,
    flow_value: Capacity,
}

impl MaxFlow {
    /// Creates a new solver on the given network; no flow has been pushed yet
    pub fn new(network: ResidualNetwork) -> Self {
        let n = network.number_of_vertices() as usize;
        Self {
            network,
            predecessor: vec![None; n],
            visited: vec![false; n],
            queue: VecDeque::with_capacity(n),
            flow_value: 0,
        }
    }

    /// Returns the value of the flow pushed so far
    pub fn flow_value(&self) -> Capacity {
        self.flow_value
    }

    /// Returns the current residual network
    pub fn network(&self) -> &ResidualNetwork {
        &self.network
    }

    /// Returns the pairs of the current flow, sorted by worker
    pub fn matching(&self) -> Vec<Edge> {
        self.network.saturated_assignments()
    }

    /// Runs to completion and returns the maximum flow value
    pub fn run_to_completion(&mut self) -> Capacity {
        self.by_ref().for_each(drop);
        self.flow_value
    }

    /// BFS over arcs with positive residual capacity.
    /// Returns *true* if the sink was reached; `predecessor` then encodes the path.
    fn bfs(&mut self) -> bool {
        let source = self.network.source();
        let sink = self.network.sink();

        self.predecessor.fill(None);
        self.visited.fill(false);
        self.queue.clear();

        self.visited[source as usize] = true;
        self.queue.push_back(source);

        while let Some(u) = self.queue.pop_front() {
            for &arc in self.network.out_arcs(u) {
                let v = self.network.head(arc);
                if self.visited[v as usize] || self.network.residual_capacity(arc) == 0 {
                    continue;
                }

                self.visited[v as usize] = true;
                self.predecessor[v as usize] = Some(arc);
                if v == sink {
                    return true;
                }
                self.queue.push_back(v);
            }
        }

        false
    }
}

impl Iterator for MaxFlow {
    type Item = AugmentingPath;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.bfs() {
            return None;
        }

        let mut arcs = Vec::new();
        let mut v = self.network.sink();
        while let Some(arc) = self.predecessor[v as usize] {
            arcs.push(arc);
            v = self.network.tail(arc);
        }
        debug_assert_eq!(v, self.network.source());

        let bottleneck = arcs
            .iter()
            .map(|&arc| self.network.residual_capacity(arc))
            .min()?;

        for &arc in &arcs {
            self.network.push(arc, bottleneck);
        }
        self.flow_value += bottleneck;

        let vertices = std::iter::once(self.network.source())
            .chain(arcs.iter().rev().map(|&arc| self.network.head(arc)))
            .map(|u| self.network.label(u))
            .collect();

        Some(AugmentingPath {
            vertices,
            bottleneck,
        })
    }
}
