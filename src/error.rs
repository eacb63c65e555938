//! Error types returned by the assignment algorithms

use thiserror::Error;

use crate::{edge::Edge, node::*};

/// Result type alias using [`MatchingError`]
pub type Result<T> = std::result::Result<T, MatchingError>;

/// Errors that can occur when solving an assignment instance
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchingError {
    /// The instance has no edges and the solver was configured to reject such instances
    #[error("Graph has no edges")]
    EmptyGraph,

    /// An edge references a worker or task outside of the declared bounds
    #[error(
        "Edge ({worker},{task}) is out of range for {number_of_workers} workers and {number_of_tasks} tasks"
    )]
    OutOfRange {
        /// Worker endpoint of the offending edge
        worker: Node,
        /// Task endpoint of the offending edge
        task: Node,
        /// Declared number of workers
        number_of_workers: NumNodes,
        /// Declared number of tasks
        number_of_tasks: NumNodes,
    },

    /// A supplied pair is not an edge of the graph or shares an endpoint with another pair
    #[error("Pair {0} is not part of a matching of this graph")]
    InvalidMatching(Edge),
}

impl From<MatchingError> for std::io::Error {
    fn from(value: MatchingError) -> Self {
        std::io::Error::new(std::io::ErrorKind::InvalidData, value)
    }
}
