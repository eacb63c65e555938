/*!
# Instance Generators

Random and deterministic assignment instances, mainly used for testing and benchmarking.

Generators follow a builder-style pattern:

1. Create a generator instance (e.g., `RandomBipartite::new()`).
2. Set parameters (e.g., `.workers(w).tasks(t).prob(p)`).
3. Generate edges via `stream()` / `generate_edges()` or a whole graph via `generate()`.

```rust
use bimatch::{prelude::*, gens::*};
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

let rng = &mut Pcg64Mcg::seed_from_u64(1);
let graph = RandomBipartite::new().workers(10).tasks(8).prob(0.3).generate(rng);

assert_eq!(graph.number_of_workers(), 10);
assert_eq!(graph.number_of_tasks(), 8);
assert!(graph.validate().is_ok());
```
*/

use itertools::Itertools;
use rand::Rng;

use crate::{prelude::*, utils::Probability};

/// General trait for a configurable random instance generator.
pub trait BipartiteGenerator {
    /// Returns the number of workers and tasks of generated instances
    fn sides(&self) -> (NumNodes, NumNodes);

    /// Creates a lazy iterator (stream) over generated edges.
    fn stream<R>(&self, rng: &mut R) -> impl Iterator<Item = Edge>
    where
        R: Rng;

    /// Generates a list of random edges.
    fn generate_edges<R>(&self, rng: &mut R) -> Vec<Edge>
    where
        R: Rng,
    {
        self.stream(rng).collect()
    }

    /// Generates a whole instance
    fn generate<R>(&self, rng: &mut R) -> BipartiteGraph
    where
        R: Rng,
    {
        let (workers, tasks) = self.sides();
        BipartiteGraph::from_edges(workers, tasks, self.stream(rng))
    }
}

/// Bipartite analogue of `G(n,p)`: each of the `W * T` possible edges is present independently
/// with probability `p`. Edges are produced ordered by worker, then task.
#[derive(Debug, Copy, Clone, Default)]
pub struct RandomBipartite {
    workers: NumNodes,
    tasks: NumNodes,
    p: f64,
}

impl RandomBipartite {
    /// Creates a new generator without workers or tasks and edge probability `0`
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the number of workers
    pub fn workers(mut self, workers: NumNodes) -> Self {
        self.workers = workers;
        self
    }

    /// Updates the number of tasks
    pub fn tasks(mut self, tasks: NumNodes) -> Self {
        self.tasks = tasks;
        self
    }

    /// Updates the edge probability
    pub fn prob(mut self, prob: f64) -> Self {
        assert!(prob.is_valid_probability());
        self.p = prob;
        self
    }

    /// Sets `p` such that each worker has `deg` adjacent tasks in expectation
    pub fn avg_deg(self, deg: f64) -> Self {
        assert!(self.tasks > 0, "Number of tasks must be set before the average degree!");
        self.prob(deg / self.tasks as f64)
    }
}

impl BipartiteGenerator for RandomBipartite {
    fn sides(&self) -> (NumNodes, NumNodes) {
        (self.workers, self.tasks)
    }

    fn stream<R>(&self, rng: &mut R) -> impl Iterator<Item = Edge>
    where
        R: Rng,
    {
        let p = self.p;
        (1..=self.workers)
            .cartesian_product(1..=self.tasks)
            .filter(move |_| p > 0.0 && (p >= 1.0 || rng.random_bool(p)))
            .map(Edge::from)
    }
}

/// Trait for building random instances directly
pub trait RandomAssignment: Sized {
    /// Creates a random instance where each edge exists with probability `p`
    fn random_bipartite<R>(rng: &mut R, workers: NumNodes, tasks: NumNodes, p: f64) -> Self
    where
        R: Rng;
}

impl RandomAssignment for BipartiteGraph {
    fn random_bipartite<R>(rng: &mut R, workers: NumNodes, tasks: NumNodes, p: f64) -> Self
    where
        R: Rng,
    {
        RandomBipartite::new()
            .workers(workers)
            .tasks(tasks)
            .prob(p)
            .generate(rng)
    }
}

/// Returns the complete bipartite graph between `workers` workers and `tasks` tasks.
/// Edges are ordered by worker, then task.
pub fn complete_bipartite(workers: NumNodes, tasks: NumNodes) -> BipartiteGraph {
    BipartiteGraph::from_edges(
        workers,
        tasks,
        (1..=workers).cartesian_product(1..=tasks),
    )
}
