//! Manager lifecycle: construction, configuration, statistics, logging,
//! and garbage collection.
//!
//! Grounded on `original_source/include/YmLogic/BddMgr.h` (`BddMgrParam`,
//! `default_mgr()`, `enable/disable_gc`, `gc(bool)`, `reg_sweep_binder`,
//! `set_logstream`/`logstream`, the `used_mem`/`node_num`/`garbage_num`/
//! `avail_num`/`gc_count` statistics), with a lazily-initialized shared
//! default instance accessible without explicit construction.

use std::io::Write;
use std::sync::OnceLock;

use rustc_hash::FxHashSet;

use crate::apply_cache::ApplyCache;
use crate::edge::Edge;
use crate::handle::{HandleId, HandleTable};
use crate::node::NodeId;
use crate::unique_table::{InstallResult, TableLayout, UniqueTable};
use crate::var::{Level, VarId};

/// Selects the unique table's physical layout and, by extension, the
/// manager's internal cache/table policy. The two kinds are
/// interchangeable at the public contract level.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ManagerKind {
    /// Chained hash table, grow-by-doubling. The conservative default.
    #[default]
    Classic,
    /// Open-addressed hash table (linear probing). Favors smaller
    /// memory footprint and better cache locality at the cost of a
    /// pricier shrink (no tombstone compaction on shrink beyond a full
    /// rebuild).
    Modern,
}

impl ManagerKind {
    /// Parses a manager type string, defaulting unknown strings to
    /// `Classic`.
    pub fn from_str_lossy(s: &str) -> Self {
        match s {
            "modern" => ManagerKind::Modern,
            "classic" => ManagerKind::Classic,
            _ => ManagerKind::Classic,
        }
    }

    fn table_layout(self) -> TableLayout {
        match self {
            ManagerKind::Classic => TableLayout::Chained,
            ManagerKind::Modern => TableLayout::OpenAddressed,
        }
    }
}

/// The recognized, independently-maskable configuration parameters.
#[derive(Clone, Copy, Debug)]
pub struct ManagerConfig {
    /// Fraction in `[0, 1]`; GC runs when `garbage / (live + garbage)`
    /// exceeds this.
    pub gc_threshold: f64,
    /// GC does not run below this total node count.
    pub gc_node_limit: usize,
    /// Load factor at which the node table rehashes upward.
    pub nt_load_limit: f64,
    /// Load factor at which the operation cache resizes (here: the soft
    /// capacity past which entries are evicted).
    pub rt_load_limit: f64,
    /// Byte ceiling; operators exceeding it return `Overflow`. `None`
    /// means unbounded.
    pub mem_limit: Option<u64>,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        ManagerConfig {
            gc_threshold: 0.25,
            gc_node_limit: 1000,
            nt_load_limit: 0.75,
            rt_load_limit: 0.75,
            mem_limit: None,
        }
    }
}

impl ManagerConfig {
    pub fn with_gc_threshold(mut self, v: f64) -> Self {
        self.gc_threshold = v;
        self
    }
    pub fn with_gc_node_limit(mut self, v: usize) -> Self {
        self.gc_node_limit = v;
        self
    }
    pub fn with_nt_load_limit(mut self, v: f64) -> Self {
        self.nt_load_limit = v;
        self
    }
    pub fn with_rt_load_limit(mut self, v: f64) -> Self {
        self.rt_load_limit = v;
        self
    }
    pub fn with_mem_limit(mut self, v: Option<u64>) -> Self {
        self.mem_limit = v;
        self
    }

    /// Approximate node-count ceiling implied by `mem_limit`, assuming a
    /// fixed per-node footprint. Used to translate the byte ceiling into
    /// a node-count ceiling the unique table can enforce directly.
    fn node_limit(&self) -> Option<usize> {
        const BYTES_PER_NODE: u64 = 48;
        self.mem_limit.map(|b| (b / BYTES_PER_NODE) as usize)
    }
}

/// A snapshot of manager statistics.
#[derive(Clone, Debug)]
pub struct ManagerStats {
    pub name: String,
    pub used_memory_bytes: u64,
    pub total_nodes: u64,
    pub garbage_nodes: u64,
    pub free_slots: u64,
    pub gc_count: u64,
}

/// Owns every node, the unique table, the operation cache, the
/// variable map, and the live-handle list.
pub struct Manager {
    pub(crate) kind: ManagerKind,
    name: String,
    pub(crate) config: ManagerConfig,
    pub(crate) table: UniqueTable,
    pub(crate) cache: ApplyCache,
    pub(crate) varmap: crate::varmap::VarMap,
    pub(crate) handles: HandleTable,
    /// Operator result pinning: intermediate edges not yet returned by a
    /// recursive operator, treated as extra GC roots.
    pub(crate) protected: Vec<Edge>,
    /// Running estimate of garbage nodes since the last GC, maintained
    /// incrementally by [`Manager::inc_ref_edge`]/[`Manager::dec_root_ref`]
    /// and used only to decide *when* to trigger an automatic GC; the GC
    /// pass itself always recomputes ref counts from scratch.
    garbage_estimate: u64,
    gc_count: u64,
    log_stream: Option<Box<dyn Write + Send>>,
    sweep_binders: Vec<Box<dyn FnMut() + Send>>,
    /// Staged substitution pairs for the multi-variable `compose` API.
    pub(crate) compose_staging: Vec<(VarId, Edge)>,
    gc_enabled: bool,
}

impl Manager {
    /// Construct a manager with the given `(type, name, option)` triple,
    /// matching `BddMgr(const string& type, const string& name, const
    /// string& option)`. `option` is presently unused by
    /// either manager kind but is accepted for contract compatibility.
    pub fn new(kind_str: &str, name: impl Into<String>, _option: &str) -> Manager {
        Manager::with_config(ManagerKind::from_str_lossy(kind_str), name, ManagerConfig::default())
    }

    pub fn with_config(kind: ManagerKind, name: impl Into<String>, config: ManagerConfig) -> Manager {
        Manager {
            kind,
            name: name.into(),
            table: UniqueTable::new(kind.table_layout(), config.nt_load_limit, config.node_limit()),
            cache: ApplyCache::new(4096),
            varmap: crate::varmap::VarMap::new(),
            handles: HandleTable::new(),
            protected: Vec::new(),
            garbage_estimate: 0,
            gc_count: 0,
            log_stream: None,
            sweep_binders: Vec::new(),
            compose_staging: Vec::new(),
            gc_enabled: true,
            config,
        }
    }

    /// The process-global default manager, lazily
    /// constructed on first use. Single-threaded use only: the handle
    /// returned borrows a `static` cell, so callers on other threads
    /// would observe data races.
    pub fn default_manager() -> &'static std::cell::RefCell<Manager> {
        static DEFAULT: OnceLock<std::cell::RefCell<Manager>> = OnceLock::new();
        DEFAULT.get_or_init(|| std::cell::RefCell::new(Manager::new("classic", "default", "")))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ManagerKind {
        self.kind
    }

    // --- Variable / level map -------------------------------------------------

    pub fn new_var(&mut self, var: VarId) -> bool {
        self.varmap.new_var(var)
    }

    pub fn level(&self, var: VarId) -> Level {
        self.varmap.level(var)
    }

    pub fn varid(&self, level: Level) -> VarId {
        self.varmap.varid(level)
    }

    pub fn try_level(&self, var: VarId) -> Option<Level> {
        self.varmap.try_level(var)
    }

    pub fn var_list(&self) -> &[VarId] {
        self.varmap.var_list()
    }

    pub fn enable_dvo(&mut self) {
        self.varmap.enable_dvo();
    }

    pub fn disable_dvo(&mut self) {
        self.varmap.disable_dvo();
        self.cache.clear();
    }

    // --- Terminal / literal constructors ---------------------------------------

    pub fn zero(&self) -> Edge {
        Edge::zero()
    }

    pub fn one(&self) -> Edge {
        Edge::one()
    }

    pub fn error(&self) -> Edge {
        Edge::error()
    }

    pub fn overflow(&self) -> Edge {
        Edge::overflow()
    }

    /// `literal(varid, polarity)`: requires `varid` already registered
    /// (see [`Manager::new_var`]); builds the node on demand.
    pub fn literal(&mut self, var: VarId, polarity: bool) -> Edge {
        let level = self.varmap.level(var);
        let e = self.install_node(level, Edge::zero(), Edge::one());
        e.with_polarity(polarity)
    }

    pub fn positive_literal(&mut self, var: VarId) -> Edge {
        self.literal(var, true)
    }

    pub fn negative_literal(&mut self, var: VarId) -> Edge {
        self.literal(var, false)
    }

    /// `build_node(varid, child0, child1)`: applies
    /// reduction and canonical-polarity, same as every recursive
    /// operator's finalization step.
    pub fn build_node(&mut self, var: VarId, child0: Edge, child1: Edge) -> Edge {
        if child0.is_invalid() || child1.is_invalid() {
            return if child0.is_error() || child1.is_error() {
                Edge::error()
            } else {
                Edge::overflow()
            };
        }
        let level = self.varmap.level(var);
        crate::ops::reduce(self, level, child0, child1)
    }

    /// `tvec_to_bdd` / "table-from-truth-vector": `vars`
    /// gives the ordered variable list of size `k`; `table` must have
    /// length `2^k` and is read as a truth table over `vars` (most
    /// significant variable first).
    pub fn table_from_truth_vector(&mut self, vars: &[VarId], table: &[bool]) -> Edge {
        crate::ops::build::table_from_truth_vector(self, vars, table)
    }

    /// `make_thfunc(n, th)`: 1 iff at least `threshold` of
    /// `vars` are 1.
    pub fn thfunc(&mut self, vars: &[VarId], threshold: usize) -> Edge {
        crate::ops::build::thfunc(self, vars, threshold)
    }

    /// `expr_to_bdd`: realize `expr` as a BDD, substituting
    /// each literal's variable through `subst`.
    pub fn expr_to_bdd(&mut self, expr: &crate::expr::Expr, subst: &crate::expr::Substitution) -> Edge {
        crate::ops::build::expr_to_bdd(self, expr, subst)
    }

    // --- Node install / ref counting / GC --------------------------------------

    pub(crate) fn install_node(&mut self, level: Level, e0: Edge, e1: Edge) -> Edge {
        match self.table.lookup_or_insert_raw(level, e0, e1) {
            InstallResult::Existing(id) => Edge::internal(id, false),
            InstallResult::Installed(id) => {
                self.inc_ref_edge(e0);
                self.inc_ref_edge(e1);
                self.log(&format!(
                    "install: level={level} id={id:?} total_nodes={}",
                    self.table.total_nodes()
                ));
                // The freshly installed node has ref_count 0 and is not
                // yet reachable from any root or caller-held protected
                // edge. Pin it for the duration of the auto-GC check so
                // a threshold-triggered sweep can't free it out from
                // under its own installer.
                let edge = Edge::internal(id, false);
                self.protected.push(edge);
                self.maybe_auto_gc();
                self.protected.pop();
                edge
            }
            InstallResult::Overflow => {
                self.log("overflow: node table allocation refused");
                Edge::overflow()
            }
        }
    }

    pub(crate) fn inc_ref_edge(&mut self, e: Edge) {
        if let Some(id) = e.target_node() {
            let node = self.table.node_mut(id);
            if node.garbage {
                node.garbage = false;
                self.garbage_estimate = self.garbage_estimate.saturating_sub(1);
            }
            node.ref_count += 1;
        }
    }

    pub(crate) fn dec_ref_edge(&mut self, e: Edge) {
        if let Some(id) = e.target_node() {
            let node = self.table.node_mut(id);
            debug_assert!(node.ref_count > 0, "ref count underflow");
            node.ref_count = node.ref_count.saturating_sub(1);
            if node.ref_count == 0 && !node.garbage {
                node.garbage = true;
                self.garbage_estimate += 1;
            }
        }
    }

    /// Register a new live root.
    pub(crate) fn register_root(&mut self, edge: Edge) -> HandleId {
        self.inc_ref_edge(edge);
        self.handles.insert(edge)
    }

    pub(crate) fn unregister_root(&mut self, id: HandleId) {
        let edge = self.handles.remove(id);
        self.dec_ref_edge(edge);
    }

    pub(crate) fn reassign_root(&mut self, id: HandleId, new_edge: Edge) {
        self.inc_ref_edge(new_edge);
        let old = self.handles.reassign(id, new_edge);
        self.dec_ref_edge(old);
    }

    pub(crate) fn root_edge(&self, id: HandleId) -> Edge {
        self.handles.edge(id)
    }

    fn maybe_auto_gc(&mut self) {
        if !self.gc_enabled {
            return;
        }
        let total = self.table.total_nodes() as u64;
        if (total as usize) < self.config.gc_node_limit {
            return;
        }
        if total == 0 {
            return;
        }
        let ratio = self.garbage_estimate as f64 / total as f64;
        if ratio > self.config.gc_threshold {
            self.gc(false);
        }
    }

    pub fn enable_gc(&mut self) {
        self.gc_enabled = true;
    }

    pub fn disable_gc(&mut self) {
        self.gc_enabled = false;
    }

    /// Register a callback invoked just before a GC sweep.
    pub fn reg_sweep_binder(&mut self, binder: Box<dyn FnMut() + Send>) {
        self.sweep_binders.push(binder);
    }

    /// Explicit mark-and-sweep GC. `shrink` requests the
    /// node table be rebuilt at a smaller size if occupancy allows.
    pub fn gc(&mut self, shrink: bool) {
        for binder in &mut self.sweep_binders {
            binder();
        }
        self.log("gc: starting mark-and-sweep");

        for id in self.table.iter_ids() {
            let node = self.table.node_mut(id);
            node.ref_count = 0;
            node.mark = false;
        }

        let mut worklist: Vec<Edge> = self
            .handles
            .live_edges()
            .chain(self.protected.iter().copied())
            .collect();
        while let Some(e) = worklist.pop() {
            let Some(id) = e.target_node() else {
                continue;
            };
            let node = self.table.node_mut(id);
            node.ref_count += 1;
            if node.mark {
                continue;
            }
            node.mark = true;
            let (c0, c1) = node.children();
            worklist.push(c0);
            worklist.push(c1);
        }

        let freed: Vec<NodeId> = self
            .table
            .iter_ids()
            .filter(|id| self.table.node(*id).ref_count == 0)
            .collect();
        let freed_set: FxHashSet<NodeId> = freed.iter().copied().collect();
        for id in &freed {
            self.table.free_node(*id);
        }
        self.cache.purge_nodes(&freed_set);
        self.garbage_estimate = 0;
        self.gc_count += 1;

        if shrink {
            self.table.shrink_to_fit();
        }
        self.log(&format!(
            "gc: done, freed {} nodes, {} remain",
            freed.len(),
            self.table.total_nodes()
        ));
    }

    // --- Operator-result pinning -------------------------------------------------

    /// Run `f` with `edges` pinned against GC for the duration of the
    /// call.
    pub(crate) fn with_protected<R>(&mut self, edges: &[Edge], f: impl FnOnce(&mut Manager) -> R) -> R {
        let mark = self.protected.len();
        self.protected.extend_from_slice(edges);
        let r = f(self);
        self.protected.truncate(mark);
        r
    }

    // --- Logging / statistics ----------------------------------------------------

    pub fn set_log_stream(&mut self, stream: Box<dyn Write + Send>) {
        self.log_stream = Some(stream);
    }

    pub fn unset_log_stream(&mut self) {
        self.log_stream = None;
    }

    pub(crate) fn log(&mut self, message: &str) {
        log::trace!("[{}] {}", self.name, message);
        if let Some(stream) = self.log_stream.as_mut() {
            let _ = writeln!(stream, "[{}] {}", self.name, message);
        }
    }

    pub fn stats(&self) -> ManagerStats {
        ManagerStats {
            name: self.name.clone(),
            used_memory_bytes: self.table.total_nodes() as u64 * 48,
            total_nodes: self.table.total_nodes() as u64,
            garbage_nodes: self.garbage_estimate,
            free_slots: self.table.free_slots() as u64,
            gc_count: self.gc_count,
        }
    }

    /// `(calls, cache_queries, cache_hits)` recorded for `op` since this
    /// manager was created, only available under the `statistics`
    /// feature.
    #[cfg(feature = "statistics")]
    pub fn op_stats(&self, op: crate::apply_cache::Op) -> (u64, u64, u64) {
        self.cache.op_stats(op)
    }
}
