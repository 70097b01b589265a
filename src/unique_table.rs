//! The unique table: hash-consed storage of internal nodes, keyed by
//! `(level, edge0, edge1)`.
//!
//! Two table layouts are offered, selected by
//! [`crate::manager::ManagerKind`]: `Chained` buckets nodes by hash
//! (classic separate chaining, the simplest table that is easy to
//! reason about and to shrink), and `OpenAddressed` probes linearly
//! into a flat array (fewer allocations, better cache behavior, no
//! tombstone-free shrink). Both share the same node slab and
//! reduction/installation contract, so the two manager kinds stay
//! interchangeable at the public contract level while differing only
//! in table layout.

use std::hash::{BuildHasher, Hash, Hasher};

use rustc_hash::FxBuildHasher;

use crate::edge::Edge;
use crate::node::{Node, NodeId};
use crate::var::Level;

/// Which physical layout a [`UniqueTable`] uses.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TableLayout {
    /// Separate chaining: one `Vec<NodeId>` bucket per hash slot.
    Chained,
    /// Linear-probed open addressing over a flat slot array.
    OpenAddressed,
}

enum Index {
    Chained { buckets: Vec<Vec<NodeId>> },
    OpenAddressed { slots: Vec<Slot> },
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Slot {
    Empty,
    Tombstone,
    Occupied(NodeId),
}

/// Outcome of a node-table install attempt.
pub enum InstallResult {
    /// The key already existed; here is its (uncomplemented) edge.
    Existing(NodeId),
    /// A fresh node was installed.
    Installed(NodeId),
    /// The table could not grow to accommodate a new node: allocation
    /// failure during node install.
    Overflow,
}

pub struct UniqueTable {
    layout: TableLayout,
    /// Node storage. Freed slots are tracked in `free_list` and must not
    /// be read until reused.
    slab: Vec<Node>,
    free_list: Vec<NodeId>,
    index: Index,
    occupied: usize,
    load_limit: f64,
    hasher: FxBuildHasher,
    /// Hard ceiling on total node count; `None` = unbounded. Installing
    /// past this returns [`InstallResult::Overflow`].
    node_limit: Option<usize>,
}

impl UniqueTable {
    pub fn new(layout: TableLayout, load_limit: f64, node_limit: Option<usize>) -> Self {
        let index = match layout {
            TableLayout::Chained => Index::Chained {
                buckets: vec![Vec::new(); 16],
            },
            TableLayout::OpenAddressed => Index::OpenAddressed {
                slots: vec![Slot::Empty; 16],
            },
        };
        UniqueTable {
            layout,
            slab: Vec::new(),
            free_list: Vec::new(),
            index,
            occupied: 0,
            load_limit,
            hasher: FxBuildHasher::default(),
            node_limit,
        }
    }

    #[inline]
    pub fn layout(&self) -> TableLayout {
        self.layout
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.slab[id.index()]
    }

    #[inline]
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.slab[id.index()]
    }

    /// Total node count (live + not-yet-swept garbage).
    #[inline]
    pub fn total_nodes(&self) -> usize {
        self.slab.len() - self.free_list.len()
    }

    /// Number of free slots available for reuse without growing the slab.
    #[inline]
    pub fn free_slots(&self) -> usize {
        self.free_list.len()
    }

    fn hash_key(&self, level: Level, e0: Edge, e1: Edge) -> u64 {
        let mut hasher = self.hasher.build_hasher();
        level.hash(&mut hasher);
        e0.hash(&mut hasher);
        e1.hash(&mut hasher);
        hasher.finish()
    }

    fn capacity(&self) -> usize {
        match &self.index {
            Index::Chained { buckets } => buckets.len(),
            Index::OpenAddressed { slots } => slots.len(),
        }
    }

    fn find(&self, level: Level, e0: Edge, e1: Edge) -> Option<NodeId> {
        let hash = self.hash_key(level, e0, e1) as usize;
        match &self.index {
            Index::Chained { buckets } => {
                let bucket = &buckets[hash % buckets.len()];
                bucket
                    .iter()
                    .copied()
                    .find(|&id| self.slab[id.index()].key() == (level, e0, e1))
            }
            Index::OpenAddressed { slots } => {
                let cap = slots.len();
                let mut i = hash % cap;
                for _ in 0..cap {
                    match slots[i] {
                        Slot::Empty => return None,
                        Slot::Occupied(id) if self.slab[id.index()].key() == (level, e0, e1) => {
                            return Some(id)
                        }
                        _ => {}
                    }
                    i = (i + 1) % cap;
                }
                None
            }
        }
    }

    fn insert_index(&mut self, id: NodeId) {
        let (level, e0, e1) = self.slab[id.index()].key();
        let hash = self.hash_key(level, e0, e1) as usize;
        match &mut self.index {
            Index::Chained { buckets } => {
                let len = buckets.len();
                buckets[hash % len].push(id);
            }
            Index::OpenAddressed { slots } => {
                let cap = slots.len();
                let mut i = hash % cap;
                loop {
                    if matches!(slots[i], Slot::Empty | Slot::Tombstone) {
                        slots[i] = Slot::Occupied(id);
                        return;
                    }
                    i = (i + 1) % cap;
                }
            }
        }
        self.occupied += 1;
    }

    fn remove_index(&mut self, id: NodeId) {
        let (level, e0, e1) = self.slab[id.index()].key();
        let hash = self.hash_key(level, e0, e1) as usize;
        match &mut self.index {
            Index::Chained { buckets } => {
                let len = buckets.len();
                let bucket = &mut buckets[hash % len];
                if let Some(pos) = bucket.iter().position(|&x| x == id) {
                    bucket.swap_remove(pos);
                }
            }
            Index::OpenAddressed { slots } => {
                let cap = slots.len();
                let mut i = hash % cap;
                for _ in 0..cap {
                    if slots[i] == Slot::Occupied(id) {
                        slots[i] = Slot::Tombstone;
                        break;
                    }
                    i = (i + 1) % cap;
                }
            }
        }
        self.occupied -= 1;
    }

    fn load_factor(&self) -> f64 {
        self.occupied as f64 / self.capacity() as f64
    }

    /// Rehash into a table of double the current capacity, re-inserting
    /// every non-garbage node.
    fn grow(&mut self) {
        let new_cap = (self.capacity() * 2).max(16);
        self.rebuild(new_cap);
    }

    fn rebuild(&mut self, new_cap: usize) {
        self.index = match self.layout {
            TableLayout::Chained => Index::Chained {
                buckets: vec![Vec::new(); new_cap],
            },
            TableLayout::OpenAddressed => Index::OpenAddressed {
                slots: vec![Slot::Empty; new_cap],
            },
        };
        self.occupied = 0;
        let ids: Vec<NodeId> = (0..self.slab.len() as u32)
            .map(NodeId)
            .filter(|id| !self.free_list.contains(id))
            .collect();
        for id in ids {
            self.insert_index(id);
        }
    }

    /// Shrink the table to the smallest power-of-two capacity that keeps
    /// the load factor under the configured limit, if that is smaller
    /// than the current capacity.
    pub fn shrink_to_fit(&mut self) {
        let mut target = 16usize;
        while (self.occupied as f64 / target as f64) > self.load_limit {
            target *= 2;
        }
        if target < self.capacity() {
            self.rebuild(target);
        }
    }

    /// `lookup_or_insert`: the canonicalization and
    /// reduction steps are performed by the caller (see
    /// `crate::ops::reduce`); this function only performs the
    /// hash-consing install of an already-reduced, already-canonical key.
    pub fn lookup_or_insert_raw(&mut self, level: Level, e0: Edge, e1: Edge) -> InstallResult {
        debug_assert!(e0 != e1, "reduction must be applied before installing");
        debug_assert!(!e0.polarity(), "canonical-polarity rule violated");

        if let Some(id) = self.find(level, e0, e1) {
            return InstallResult::Existing(id);
        }

        if let Some(limit) = self.node_limit {
            if self.total_nodes() >= limit && self.free_list.is_empty() {
                return InstallResult::Overflow;
            }
        }

        if self.load_factor() > self.load_limit {
            self.grow();
        }

        let node = Node::new(level, e0, e1);
        let id = if let Some(id) = self.free_list.pop() {
            self.slab[id.index()] = node;
            id
        } else {
            let id = NodeId(self.slab.len() as u32);
            self.slab.push(node);
            id
        };
        self.insert_index(id);
        InstallResult::Installed(id)
    }

    /// Free a node's slot, removing it from the index. Called only by
    /// the manager's GC sweep once a node's computed reference count is
    /// zero.
    pub fn free_node(&mut self, id: NodeId) {
        self.remove_index(id);
        self.free_list.push(id);
    }

    /// Iterate over every occupied slot (live or not-yet-swept garbage).
    pub fn iter_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.slab.len() as u32)
            .map(NodeId)
            .filter(move |id| !self.free_list.contains(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_reduced_install(layout: TableLayout) {
        let mut t = UniqueTable::new(layout, 0.75, None);
        let e0 = Edge::zero();
        let e1 = Edge::one();
        let a = match t.lookup_or_insert_raw(3, e0, e1) {
            InstallResult::Installed(id) => id,
            _ => panic!("expected fresh install"),
        };
        let b = match t.lookup_or_insert_raw(3, e0, e1) {
            InstallResult::Existing(id) => id,
            _ => panic!("expected sharing"),
        };
        assert_eq!(a, b);
    }

    #[test]
    fn sharing_chained() {
        assert_reduced_install(TableLayout::Chained);
    }

    #[test]
    fn sharing_open_addressed() {
        assert_reduced_install(TableLayout::OpenAddressed);
    }

    #[test]
    fn grows_past_load_limit() {
        let mut t = UniqueTable::new(TableLayout::Chained, 0.5, None);
        for i in 0..200u32 {
            t.lookup_or_insert_raw(i, Edge::zero(), Edge::one());
        }
        assert!(t.capacity() > 16);
        // every key still findable after growth
        for i in 0..200u32 {
            assert!(t.find(i, Edge::zero(), Edge::one()).is_some());
        }
    }

    #[test]
    fn free_and_reuse_slot() {
        let mut t = UniqueTable::new(TableLayout::OpenAddressed, 0.75, None);
        let id = match t.lookup_or_insert_raw(0, Edge::zero(), Edge::one()) {
            InstallResult::Installed(id) => id,
            _ => unreachable!(),
        };
        t.free_node(id);
        assert!(t.find(0, Edge::zero(), Edge::one()).is_none());
        let id2 = match t.lookup_or_insert_raw(0, Edge::zero(), Edge::one()) {
            InstallResult::Installed(id) => id,
            _ => panic!("expected fresh install"),
        };
        assert_eq!(id2, id, "freed slot should be recycled");
    }

    #[test]
    fn overflow_when_node_limit_reached() {
        let mut t = UniqueTable::new(TableLayout::Chained, 0.75, Some(1));
        let _ = t.lookup_or_insert_raw(0, Edge::zero(), Edge::one());
        match t.lookup_or_insert_raw(1, Edge::zero(), Edge::one()) {
            InstallResult::Overflow => {}
            _ => panic!("expected overflow at node limit"),
        }
    }
}
