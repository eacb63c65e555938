/*!
# Node Representation

Workers and tasks are identified by `Node = u32`. Identifiers handed in and out of the crate are
**1-based** (`1..=W` for workers, `1..=T` for tasks); algorithms translate them to 0-based indices
internally and never expose those.
*/

use std::num::NonZero;

/// Identifier of a worker or task
pub type Node = u32;

/// Node-Value that is considered invalid
pub const INVALID_NODE: Node = Node::MAX;

/// There can be at most `2^32 - 1` workers (or tasks) in a graph!
pub type NumNodes = Node;

/// As `Option<Node>` uses additional bytes for padding, it can be inefficient
/// since we often need to use `Vec<Option<Node>>`. This instead uses the
/// `NonZero`-Wrapper so that `Option<OptionalNodeImpl<N>>` fits into a single `Node`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct OptionalNodeImpl<const N: Node>(NonZero<Node>);

/// Often, `INVALID_NODE` is safe to pick as the `None`-Value
pub type OptionalNode = OptionalNodeImpl<INVALID_NODE>;

impl<const N: Node> OptionalNodeImpl<N> {
    /// Returns `Some(OptionalNodeImpl)` if `n != N` and `None` otherwise
    pub const fn new(n: Node) -> Option<Self> {
        match NonZero::new(n ^ N) {
            Some(inner) => Some(OptionalNodeImpl(inner)),
            None => None,
        }
    }

    /// Gets the underlying Node-Value
    pub const fn get(&self) -> Node {
        self.0.get() ^ N
    }
}

/// Partner pointer of a worker or task: `None` while unmatched.
pub type Partner = Option<OptionalNode>;

/// Shorthand to build a [`Partner`] pointing at `u`.
///
/// `u` must not be [`INVALID_NODE`].
#[inline]
pub(crate) const fn partner(u: Node) -> Partner {
    OptionalNode::new(u)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_node_is_compact() {
        assert_eq!(size_of::<Partner>(), size_of::<Node>());
    }

    #[test]
    fn optional_node_roundtrip() {
        for u in [0, 1, 17, INVALID_NODE - 1] {
            assert_eq!(partner(u).map(|p| p.get()), Some(u));
        }
        assert!(partner(INVALID_NODE).is_none());
    }
}
