/*!
`bimatch` computes maximum assignments of workers to tasks.

An instance is a bipartite graph between workers `1..=W` and tasks `1..=T` where an edge
`(w, t)` states that worker `w` can perform task `t`. Every worker performs at most one task and
every task is performed by at most one worker. Two independent solvers compute an assignment of
maximum size:

- **Hopcroft–Karp** finds a maximum bipartite matching via phased BFS layering and DFS augmentation.
- **Edmonds–Karp** finds a maximum flow on the unit-capacity network
  `source -> workers -> tasks -> sink` and projects it back onto a matching.

Both produce the matched pairs sorted by worker together with a human-readable [`Trace`](trace::Trace)
of their progress.

# Representation

We represent **workers** and **tasks** as `u32` identifiers in the ranges `1..=W` and `1..=T`.
For **edges**, we use a simple tuple-struct `Edge(worker, task)`.

# Design

All algorithms/generators are provided as configurable structs that one can alter to their needs
using either the *Builder* / *Setter* pattern before calling the configured algorithm on a
provided graph. The most commonly used functionality is also implemented via traits on the graph
itself, making it usable without configuring the algorithm beforehand.

```rust
use bimatch::prelude::*;

let graph = BipartiteGraph::from_edges(3, 3, [(1, 1), (1, 2), (2, 1), (2, 3), (3, 2)]);
let result = graph.maximum_bipartite_matching().unwrap();

assert_eq!(result.pairs(), &[Edge(1, 1), Edge(2, 3), Edge(3, 2)]);
```

# Usage

There are *4* core submodules you probably want to interact with:
- [`prelude`] includes definitions for nodes, edges, errors, the graph representation and both solvers,
- [`algo`] includes the solvers and their configuration,
- [`gens`] includes generators for random and complete instances,
- [`io`] includes handlers for reading instances and writing reports or GraphViz renderings.

In most use-cases, `use bimatch::prelude::*;` suffices for your needs.
*/

pub mod algo;
pub mod edge;
pub mod error;
pub mod gens;
pub mod io;
pub mod node;
pub mod ops;
pub mod repr;
#[cfg(test)]
pub(crate) mod testing;
pub mod trace;
pub mod utils;

/// `bimatch::prelude` includes definitions for nodes, edges and errors, the graph trait and
/// representation, as well as both solvers.
pub mod prelude {
    pub use super::{algo::*, edge::*, error::*, node::*, ops::*, repr::*, trace::*};
}
