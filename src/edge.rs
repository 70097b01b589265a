//! The tagged-reference `Edge` type.
//!
//! Modeled on a complement-edge `EdgeTag` design
//! (`complement_edge/mod.rs`): the output-complement bit lives on the
//! edge rather than the node, which is what makes [`Edge::negate`] an
//! O(1) bit flip instead of a recursive rewrite.

use crate::node::NodeId;

/// A reference to a BDD rooted at some node, or one of the four
/// terminal/sentinel values.
///
/// `Error` and `Overflow` are absorbing: every recursive operator must
/// check for them before doing any other work and propagate them
/// unchanged.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Edge {
    Zero,
    One,
    Error,
    Overflow,
    /// A reference to an internal node, with the output-complement bit.
    Internal(NodeId, bool),
}

impl Edge {
    #[inline]
    pub fn zero() -> Edge {
        Edge::Zero
    }

    #[inline]
    pub fn one() -> Edge {
        Edge::One
    }

    #[inline]
    pub fn error() -> Edge {
        Edge::Error
    }

    #[inline]
    pub fn overflow() -> Edge {
        Edge::Overflow
    }

    #[inline]
    pub fn internal(node: NodeId, inv: bool) -> Edge {
        Edge::Internal(node, inv)
    }

    #[inline]
    pub fn constant(val: bool) -> Edge {
        if val {
            Edge::One
        } else {
            Edge::Zero
        }
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        matches!(self, Edge::Zero)
    }

    #[inline]
    pub fn is_one(self) -> bool {
        matches!(self, Edge::One)
    }

    #[inline]
    pub fn is_const(self) -> bool {
        matches!(self, Edge::Zero | Edge::One)
    }

    #[inline]
    pub fn is_leaf(self) -> bool {
        !matches!(self, Edge::Internal(..))
    }

    #[inline]
    pub fn is_error(self) -> bool {
        matches!(self, Edge::Error)
    }

    #[inline]
    pub fn is_overflow(self) -> bool {
        matches!(self, Edge::Overflow)
    }

    /// `true` if this edge is `Error` or `Overflow`: the two values that
    /// short-circuit every recursive operator.
    #[inline]
    pub fn is_invalid(self) -> bool {
        matches!(self, Edge::Error | Edge::Overflow)
    }

    /// The node this edge targets, if any.
    #[inline]
    pub fn target_node(self) -> Option<NodeId> {
        match self {
            Edge::Internal(n, _) => Some(n),
            _ => None,
        }
    }

    /// The output-complement bit. Always `false` for `Zero`/`Error`/`Overflow`
    /// and `true` for `One` (constants are represented canonically as
    /// `Zero`/`One`, never as a complemented pair of each other).
    #[inline]
    pub fn polarity(self) -> bool {
        matches!(self, Edge::Internal(_, true))
    }

    /// O(1) negation: flip the complement bit (terminals flip between
    /// `Zero`/`One`; `Error`/`Overflow` are their own negation).
    #[inline]
    #[must_use]
    pub fn negate(self) -> Edge {
        match self {
            Edge::Zero => Edge::One,
            Edge::One => Edge::Zero,
            Edge::Error => Edge::Error,
            Edge::Overflow => Edge::Overflow,
            Edge::Internal(n, inv) => Edge::Internal(n, !inv),
        }
    }

    /// Apply a literal's polarity: `if positive { self } else { self.negate() }`.
    #[inline]
    #[must_use]
    pub fn with_polarity(self, positive: bool) -> Edge {
        if positive {
            self
        } else {
            self.negate()
        }
    }
}

impl std::ops::Not for Edge {
    type Output = Edge;

    #[inline]
    fn not(self) -> Edge {
        self.negate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negate_is_involution() {
        let edges = [
            Edge::zero(),
            Edge::one(),
            Edge::error(),
            Edge::overflow(),
            Edge::internal(NodeId(3), false),
            Edge::internal(NodeId(3), true),
        ];
        for e in edges {
            assert_eq!(e.negate().negate(), e);
        }
    }

    #[test]
    fn error_and_overflow_are_self_negating() {
        assert_eq!(Edge::error().negate(), Edge::error());
        assert_eq!(Edge::overflow().negate(), Edge::overflow());
    }

    #[test]
    fn zero_one_negate_to_each_other() {
        assert_eq!(Edge::zero().negate(), Edge::one());
        assert_eq!(Edge::one().negate(), Edge::zero());
    }

    #[test]
    fn invalid_detection() {
        assert!(Edge::error().is_invalid());
        assert!(Edge::overflow().is_invalid());
        assert!(!Edge::zero().is_invalid());
        assert!(!Edge::internal(NodeId(0), false).is_invalid());
    }
}
