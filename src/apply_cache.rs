//! The operation cache: bounded, soft memoization of recursive operator
//! results.
//!
//! Keying follows `apply_rec_st.rs`'s `apply_cache().get/add` and
//! `get_with_numeric`/`add_with_numeric` calls: most operators key on
//! up to three operand edges, and `substitute` additionally keys on a
//! numeric "which substitution" id. Commutative operators canonicalize
//! operand order before lookup (by edge ordering);
//! `Edge` already derives `Ord`, so the byte/variant ordering the design
//! note asks for falls out of `#[derive(Ord)]`.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::edge::Edge;
use crate::node::NodeId;

/// The operator an operation-cache entry was computed for.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Op {
    And,
    Xor,
    Ite,
    Restrict,
    Exist,
    Unique,
    AndExist,
    Substitute,
    PushDown,
    XorMoment,
}

/// Number of [`Op`] variants; kept in lockstep with the enum so
/// `op_index` can index a fixed-size counters array instead of hashing.
#[cfg(feature = "statistics")]
const OP_COUNT: usize = 10;

#[cfg(feature = "statistics")]
fn op_index(op: Op) -> usize {
    match op {
        Op::And => 0,
        Op::Xor => 1,
        Op::Ite => 2,
        Op::Restrict => 3,
        Op::Exist => 4,
        Op::Unique => 5,
        Op::AndExist => 6,
        Op::Substitute => 7,
        Op::PushDown => 8,
        Op::XorMoment => 9,
    }
}

impl Op {
    /// Whether the two-operand form of this operator is commutative
    /// (used to decide whether to canonicalize operand order).
    #[inline]
    fn commutative_pair(self) -> bool {
        matches!(self, Op::And | Op::Xor)
    }
}

/// Per-operator call / cache-query / cache-hit counters, gathered only
/// under the `statistics` feature. Grounded on `apply_rec_st.rs`'s
/// `stat!(call OP)` / `stat!(cache_query OP)` / `stat!(cache_hit OP)`
/// call sites: a call is counted once per recursive-operator entry
/// (before any terminal shortcut), a query once per cache probe, a hit
/// once per successful probe. `Cell` lets these update through a shared
/// `&self` cache lookup without forcing every call site to take
/// `&mut ApplyCache`.
#[cfg(feature = "statistics")]
#[derive(Debug, Default)]
struct OpCounters {
    calls: std::cell::Cell<u64>,
    cache_queries: std::cell::Cell<u64>,
    cache_hits: std::cell::Cell<u64>,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
struct CacheKey {
    op: Op,
    e0: Edge,
    e1: Edge,
    e2: Option<Edge>,
    p0: Option<u32>,
    p1: Option<u32>,
}

impl CacheKey {
    fn new(op: Op, operands: &[Edge], params: &[u32]) -> Self {
        let mut e0 = operands[0];
        let mut e1 = *operands.get(1).unwrap_or(&Edge::Error);
        if op.commutative_pair() && operands.len() == 2 && e1 > e0 {
            std::mem::swap(&mut e0, &mut e1);
        }
        CacheKey {
            op,
            e0,
            e1,
            e2: operands.get(2).copied(),
            p0: params.first().copied(),
            p1: params.get(1).copied(),
        }
    }

    fn referenced_nodes(&self) -> impl Iterator<Item = NodeId> {
        [Some(self.e0), Some(self.e1), self.e2]
            .into_iter()
            .flatten()
            .filter_map(|e| e.target_node())
    }
}

/// Bounded associative memoization of `(op, operand edges[, extra
/// params]) -> result edge`.
#[derive(Default)]
pub struct ApplyCache {
    map: FxHashMap<CacheKey, Edge>,
    /// Reverse index: node id -> cache keys whose operands mention it.
    /// Used to sweep the cache cheaply when that node is freed.
    refs: FxHashMap<NodeId, Vec<CacheKey>>,
    capacity: usize,
    #[cfg(feature = "statistics")]
    counters: [OpCounters; OP_COUNT],
}

impl ApplyCache {
    pub fn new(capacity: usize) -> Self {
        ApplyCache {
            map: FxHashMap::default(),
            refs: FxHashMap::default(),
            capacity,
            #[cfg(feature = "statistics")]
            counters: Default::default(),
        }
    }

    /// Record one recursive-operator entry for `op`, i.e. `stat!(call
    /// OP)`. Callers place this at the very top of each operator's
    /// recursive body, before any terminal-case shortcut, so the count
    /// reflects every invocation rather than only the ones that reach
    /// the cache.
    #[cfg(feature = "statistics")]
    pub fn record_call(&self, op: Op) {
        self.counters[op_index(op)].calls.set(self.counters[op_index(op)].calls.get() + 1);
    }

    /// `(calls, cache_queries, cache_hits)` recorded for `op` since the
    /// cache was created or last cleared.
    #[cfg(feature = "statistics")]
    pub fn op_stats(&self, op: Op) -> (u64, u64, u64) {
        let c = &self.counters[op_index(op)];
        (c.calls.get(), c.cache_queries.get(), c.cache_hits.get())
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn get(&self, op: Op, operands: &[Edge]) -> Option<Edge> {
        self.get_with_numeric(op, operands, &[])
    }

    pub fn get_with_numeric(&self, op: Op, operands: &[Edge], params: &[u32]) -> Option<Edge> {
        let key = CacheKey::new(op, operands, params);
        #[cfg(feature = "statistics")]
        let counters = &self.counters[op_index(op)];
        #[cfg(feature = "statistics")]
        counters.cache_queries.set(counters.cache_queries.get() + 1);
        let result = self.map.get(&key).copied();
        #[cfg(feature = "statistics")]
        if result.is_some() {
            counters.cache_hits.set(counters.cache_hits.get() + 1);
        }
        result
    }

    pub fn add(&mut self, op: Op, operands: &[Edge], result: Edge) {
        self.add_with_numeric(op, operands, &[], result);
    }

    pub fn add_with_numeric(&mut self, op: Op, operands: &[Edge], params: &[u32], result: Edge) {
        if self.map.len() >= self.capacity.max(1) {
            // Soft entries: rather than grow unboundedly, drop the
            // oldest-inserted batch. A full clear is always a valid
            // implementation of "any entry may be dropped at any time",
            // and keeps this O(1) amortized.
            self.clear();
        }
        let key = CacheKey::new(op, operands, params);
        for node in key.referenced_nodes() {
            self.refs.entry(node).or_default().push(key);
        }
        self.map.insert(key, result);
    }

    pub fn clear(&mut self) {
        self.map.clear();
        self.refs.clear();
    }

    /// Remove every entry whose operands mention any node in `freed`:
    /// cache entries referencing freed nodes are purged during GC.
    pub fn purge_nodes(&mut self, freed: &FxHashSet<NodeId>) {
        for node in freed {
            if let Some(keys) = self.refs.remove(node) {
                for key in keys {
                    self.map.remove(&key);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeId;

    #[test]
    fn commutative_lookup_shares_entry() {
        let mut cache = ApplyCache::new(1024);
        let a = Edge::internal(NodeId(1), false);
        let b = Edge::internal(NodeId(2), false);
        cache.add(Op::And, &[a, b], Edge::one());
        assert_eq!(cache.get(Op::And, &[b, a]), Some(Edge::one()));
    }

    #[test]
    fn non_commutative_lookup_is_order_sensitive() {
        let mut cache = ApplyCache::new(1024);
        let a = Edge::internal(NodeId(1), false);
        let b = Edge::internal(NodeId(2), false);
        let c = Edge::internal(NodeId(3), false);
        cache.add(Op::Ite, &[a, b, c], Edge::one());
        assert_eq!(cache.get(Op::Ite, &[a, c, b]), None);
    }

    #[test]
    fn purge_removes_entries_referencing_freed_node() {
        let mut cache = ApplyCache::new(1024);
        let a = Edge::internal(NodeId(1), false);
        let b = Edge::internal(NodeId(2), false);
        cache.add(Op::And, &[a, b], Edge::one());
        let mut freed = FxHashSet::default();
        freed.insert(NodeId(1));
        cache.purge_nodes(&freed);
        assert_eq!(cache.get(Op::And, &[a, b]), None);
    }

    #[test]
    fn numeric_param_distinguishes_substitutions() {
        let mut cache = ApplyCache::new(1024);
        let f = Edge::internal(NodeId(1), false);
        cache.add_with_numeric(Op::Substitute, &[f], &[7], Edge::zero());
        assert_eq!(
            cache.get_with_numeric(Op::Substitute, &[f], &[7]),
            Some(Edge::zero())
        );
        assert_eq!(cache.get_with_numeric(Op::Substitute, &[f], &[8]), None);
    }

    #[test]
    #[cfg(feature = "statistics")]
    fn statistics_count_calls_queries_and_hits() {
        let mut cache = ApplyCache::new(1024);
        let a = Edge::internal(NodeId(1), false);
        let b = Edge::internal(NodeId(2), false);

        cache.record_call(Op::And);
        cache.record_call(Op::And);
        assert_eq!(cache.get(Op::And, &[a, b]), None);
        assert_eq!(cache.op_stats(Op::And), (2, 1, 0));

        cache.add(Op::And, &[a, b], Edge::one());
        assert_eq!(cache.get(Op::And, &[a, b]), Some(Edge::one()));
        assert_eq!(cache.op_stats(Op::And), (2, 2, 1));

        // A distinct operator's counters are unaffected.
        assert_eq!(cache.op_stats(Op::Xor), (0, 0, 0));
    }
}
