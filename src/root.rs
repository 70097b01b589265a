//! The public, reference-counted root handle surface.
//!
//! Every operator and constructor in [`crate::ops`]/[`Manager`] works
//! directly on `Copy` [`Edge`] values, pinned only for the duration of
//! one call tree. Nothing outside that recursion keeps a node alive
//! unless it is registered as a root — [`Bdd`] is that registration,
//! wrapped as RAII:
//! constructing one calls [`Manager::register_root`], cloning calls it
//! again, and dropping calls [`Manager::unregister_root`], exactly the
//! "created by operator results... destroyed when the client drops it"
//! lifecycle that a handle manager is expected to provide.
//!
//! Grounded on `original_source/Bdd.cc`'s `Bdd::set`/`Bdd::reset`
//! (splice into/out of the manager's intrusive root list, transactional
//! ref-count maintenance), reimplemented with `Rc<RefCell<Manager>>`
//! rather than a raw `BddMgrImpl*` since `#![deny(unsafe_code)]` rules
//! out the original's intrusive pointer list.

use std::cell::RefCell;
use std::rc::Rc;

use crate::edge::Edge;
use crate::handle::HandleId;
use crate::manager::{Manager, ManagerConfig, ManagerKind};
use crate::ops;

/// A shared, clonable reference to a [`Manager`]. Every [`Bdd`] rooted
/// in the same manager holds one of these; the manager itself is
/// dropped once its last `ManagerRef` and every `Bdd` naming it are
/// gone.
#[derive(Clone)]
pub struct ManagerRef(Rc<RefCell<Manager>>);

impl ManagerRef {
    /// As [`Manager::new`], wrapped for shared ownership.
    pub fn new(kind_str: &str, name: impl Into<String>, option: &str) -> Self {
        ManagerRef(Rc::new(RefCell::new(Manager::new(kind_str, name, option))))
    }

    pub fn with_config(kind: ManagerKind, name: impl Into<String>, config: ManagerConfig) -> Self {
        ManagerRef(Rc::new(RefCell::new(Manager::with_config(
            kind, name, config,
        ))))
    }

    /// Run `f` with exclusive, mutable access to the underlying
    /// manager. A re-entrant call (e.g. from a [`Manager::reg_sweep_binder`]
    /// callback that itself touches this same `ManagerRef`) panics via
    /// `RefCell`'s already-borrowed check rather than silently aliasing
    /// — appropriate for this package's single-threaded, non-reentrant
    /// contract.
    pub fn with<R>(&self, f: impl FnOnce(&mut Manager) -> R) -> R {
        f(&mut self.0.borrow_mut())
    }

    /// Register `edge` as a new root handle.
    pub fn root(&self, edge: Edge) -> Bdd {
        Bdd::new(self, edge)
    }

    pub fn ptr_eq(&self, other: &ManagerRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// A reference-counted, externally held edge. Creating, cloning, or dropping a `Bdd` drives its target
/// node's root-ref count through [`Manager::register_root`]/
/// [`Manager::unregister_root`]; the manager's handle list is what lets
/// GC traverse every live root without scanning client memory.
pub struct Bdd {
    mgr: ManagerRef,
    id: HandleId,
}

impl Bdd {
    pub fn new(mgr: &ManagerRef, edge: Edge) -> Self {
        let id = mgr.with(|m| m.register_root(edge));
        Bdd {
            mgr: mgr.clone(),
            id,
        }
    }

    pub fn manager(&self) -> &ManagerRef {
        &self.mgr
    }

    pub fn edge(&self) -> Edge {
        self.mgr.with(|m| m.root_edge(self.id))
    }

    /// Replace this root's edge in place. Equivalent to dropping and recreating the
    /// handle but keeps the same list slot.
    pub fn reassign(&mut self, edge: Edge) {
        self.mgr.with(|m| m.reassign_root(self.id, edge));
    }

    /// `true` if `self` and `other` are rooted in the same manager and
    /// currently denote the same function (edge equality, i.e. canonicity).
    pub fn same_function(&self, other: &Bdd) -> bool {
        self.mgr.ptr_eq(&other.mgr) && self.edge() == other.edge()
    }

    /// `self` negated, rooted in the same manager.
    pub fn negate(&self) -> Bdd {
        self.mgr.root(self.edge().negate())
    }

    /// Binary operators with the ManagerMismatch contract applied at
    /// this wrapper layer, the same place `original_source/Bdd.cc`'s
    /// `operator&=`/`operator|=`/`operator^=` apply it ("マネージャが異なる"
    /// — "the managers differ" — before ever calling into the manager's
    /// raw edge-level operator): the underlying `ops::and`/`ops::or`/
    /// `ops::xor` take a single `&mut Manager` and trust both operand
    /// edges belong to it, so cross-manager misuse can only be caught
    /// here, where two independently-owned `ManagerRef`s are still in
    /// scope to compare.
    pub fn and(&self, other: &Bdd) -> Bdd {
        self.binop(other, ops::and)
    }

    pub fn or(&self, other: &Bdd) -> Bdd {
        self.binop(other, ops::or)
    }

    pub fn xor(&self, other: &Bdd) -> Bdd {
        self.binop(other, ops::xor)
    }

    fn binop(&self, other: &Bdd, op: impl FnOnce(&mut Manager, Edge, Edge) -> Edge) -> Bdd {
        if !self.mgr.ptr_eq(&other.mgr) {
            return self.mgr.root(Edge::error());
        }
        let result = self.mgr.with(|m| op(m, self.edge(), other.edge()));
        self.mgr.root(result)
    }
}

impl Clone for Bdd {
    fn clone(&self) -> Self {
        Bdd::new(&self.mgr, self.edge())
    }
}

impl Drop for Bdd {
    fn drop(&mut self) {
        self.mgr.with(|m| m.unregister_root(self.id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops;
    use crate::var::VarId;

    #[test]
    fn root_survives_gc_after_intermediate_drop() {
        let mgr = ManagerRef::new("classic", "test", "");
        mgr.with(|m| {
            m.new_var(VarId(0));
            m.new_var(VarId(1));
        });
        let f = mgr.with(|m| {
            let a = m.literal(VarId(0), true);
            let b = m.literal(VarId(1), true);
            ops::and(m, a, b)
        });
        let root = mgr.root(f);
        mgr.with(|m| m.gc(false));
        assert_eq!(root.edge(), f);
    }

    #[test]
    fn dropping_last_root_allows_gc_to_reclaim() {
        let mgr = ManagerRef::new("classic", "test", "");
        mgr.with(|m| m.new_var(VarId(0)));
        let f = mgr.with(|m| m.literal(VarId(0), true));
        {
            let root = mgr.root(f);
            assert_eq!(root.edge(), f);
        }
        mgr.with(|m| m.gc(false));
        assert_eq!(mgr.with(|m| m.stats().total_nodes), 0);
    }

    #[test]
    fn binop_across_managers_yields_error() {
        let mgr_a = ManagerRef::new("classic", "a", "");
        let mgr_b = ManagerRef::new("classic", "b", "");
        mgr_a.with(|m| m.new_var(VarId(0)));
        mgr_b.with(|m| m.new_var(VarId(0)));
        let fa = mgr_a.root(mgr_a.with(|m| m.literal(VarId(0), true)));
        let fb = mgr_b.root(mgr_b.with(|m| m.literal(VarId(0), true)));

        let mismatched = fa.and(&fb);
        assert!(mismatched.edge().is_error());
        // The result is rooted in `self`'s manager, not a dangling
        // reference to the mismatched one.
        assert!(mismatched.mgr.ptr_eq(&mgr_a));
    }

    #[test]
    fn binop_within_one_manager_matches_raw_ops() {
        let mgr = ManagerRef::new("classic", "test", "");
        mgr.with(|m| {
            m.new_var(VarId(0));
            m.new_var(VarId(1));
        });
        let a = mgr.root(mgr.with(|m| m.literal(VarId(0), true)));
        let b = mgr.root(mgr.with(|m| m.literal(VarId(1), true)));
        let expected = mgr.with(|m| ops::and(m, a.edge(), b.edge()));
        assert_eq!(a.and(&b).edge(), expected);
    }

    #[test]
    fn clone_keeps_both_handles_rooting_the_node() {
        let mgr = ManagerRef::new("classic", "test", "");
        mgr.with(|m| m.new_var(VarId(0)));
        let f = mgr.with(|m| m.literal(VarId(0), true));
        let a = mgr.root(f);
        let b = a.clone();
        drop(a);
        mgr.with(|m| m.gc(false));
        assert_eq!(b.edge(), f);
    }
}
