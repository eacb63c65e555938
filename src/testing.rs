//! Assertions shared by the unit tests of the solvers and the IO layer

use fxhash::FxHashSet;

use crate::prelude::*;

/// Asserts that `pairs` is a matching consisting only of edges of `graph`:
/// every pair is an input edge and no worker or task occurs twice.
pub(crate) fn assert_valid_matching<G>(graph: &G, pairs: &[Edge])
where
    G: WorkerTaskGraph + ?Sized,
{
    let edges: FxHashSet<Edge> = graph.edges().collect();
    let mut workers = FxHashSet::default();
    let mut tasks = FxHashSet::default();

    for &pair in pairs {
        assert!(edges.contains(&pair), "{pair} is not an edge of the graph");
        assert!(workers.insert(pair.worker()), "worker of {pair} is matched twice");
        assert!(tasks.insert(pair.task()), "task of {pair} is matched twice");
    }
}
