//! Recursive Boolean operators.
//!
//! Every operator here follows the same shape, grounded on
//! `apply_rec_st.rs`'s `apply_bin_rec`/`apply_ite_rec`: check terminal
//! and absorbing cases without touching the manager, probe the
//! operation cache, cofactor both operands on the top variable, recurse
//! on each cofactor pair with the intermediate result pinned against GC,
//! reduce the pair back into a node, and cache the result before
//! returning it.

pub mod analysis;
pub mod build;
pub mod isop;

use crate::apply_cache::Op;
use crate::edge::Edge;
use crate::manager::Manager;
use crate::var::{Level, VarId};

/// The variable level nearest the root among a set of edges, or `None`
/// if every edge is a terminal.
pub(crate) fn top_level(mgr: &Manager, edges: &[Edge]) -> Option<Level> {
    edges
        .iter()
        .filter_map(|e| e.target_node().map(|id| mgr.table.node(id).level()))
        .min()
}

/// Split `e` into its two cofactors at `level`. If `e`'s node sits at a
/// strictly deeper level (or `e` is a terminal), both cofactors equal
/// `e` itself: the function does not yet depend on that variable.
pub(crate) fn cofactors(mgr: &Manager, e: Edge, level: Level) -> (Edge, Edge) {
    match e.target_node() {
        Some(id) if mgr.table.node(id).level() == level => {
            let node = mgr.table.node(id);
            let (c0, c1) = node.children();
            if e.polarity() {
                (c0.negate(), c1.negate())
            } else {
                (c0, c1)
            }
        }
        _ => (e, e),
    }
}

/// Canonicalize and hash-cons a `(level, edge0, edge1)` triple
/// This is the single
/// funnel every operator uses to build a result node; `install_node` is
/// never called directly outside [`Manager::build_node`] and this
/// function.
pub(crate) fn reduce(mgr: &mut Manager, level: Level, e0: Edge, e1: Edge) -> Edge {
    if e0.is_invalid() || e1.is_invalid() {
        return if e0.is_error() || e1.is_error() {
            Edge::error()
        } else {
            Edge::overflow()
        };
    }
    if e0 == e1 {
        return e0;
    }
    if e0.polarity() {
        return reduce(mgr, level, e0.negate(), e1.negate()).negate();
    }
    mgr.install_node(level, e0, e1)
}

fn propagate_invalid(edges: &[Edge]) -> Option<Edge> {
    if edges.iter().any(|e| e.is_error()) {
        Some(Edge::error())
    } else if edges.iter().any(|e| e.is_overflow()) {
        Some(Edge::overflow())
    } else {
        None
    }
}

/// Conjunction. Grounded on `apply_bin_rec`'s AND path, generalized to
/// complement edges: `f == g.negate()` is now an O(1) absorbing check
/// rather than a recursive mismatch, since negation no longer requires
/// a subtree walk.
pub fn and(mgr: &mut Manager, f: Edge, g: Edge) -> Edge {
    and_rec(mgr, f, g)
}

pub(crate) fn and_rec(mgr: &mut Manager, f: Edge, g: Edge) -> Edge {
    #[cfg(feature = "statistics")]
    mgr.cache.record_call(Op::And);
    if let Some(e) = propagate_invalid(&[f, g]) {
        return e;
    }
    if f.is_zero() || g.is_zero() {
        return Edge::zero();
    }
    if f.is_one() {
        return g;
    }
    if g.is_one() || f == g {
        return f;
    }
    if f == g.negate() {
        return Edge::zero();
    }
    if let Some(r) = mgr.cache.get(Op::And, &[f, g]) {
        return r;
    }
    let level = top_level(mgr, &[f, g]).expect("non-terminal edge must resolve to a level");
    let (f0, f1) = cofactors(mgr, f, level);
    let (g0, g1) = cofactors(mgr, g, level);
    let r0 = mgr.with_protected(&[f, g], |mgr| and_rec(mgr, f0, g0));
    let r1 = mgr.with_protected(&[f, g, r0], |mgr| and_rec(mgr, f1, g1));
    let r = reduce(mgr, level, r0, r1);
    mgr.cache.add(Op::And, &[f, g], r);
    r
}

/// Disjunction, derived as `!(!f & !g)`.
pub fn or(mgr: &mut Manager, f: Edge, g: Edge) -> Edge {
    and_rec(mgr, f.negate(), g.negate()).negate()
}

/// Exclusive-or.
pub fn xor(mgr: &mut Manager, f: Edge, g: Edge) -> Edge {
    xor_rec(mgr, f, g)
}

pub(crate) fn xor_rec(mgr: &mut Manager, f: Edge, g: Edge) -> Edge {
    #[cfg(feature = "statistics")]
    mgr.cache.record_call(Op::Xor);
    if let Some(e) = propagate_invalid(&[f, g]) {
        return e;
    }
    if f.is_zero() {
        return g;
    }
    if g.is_zero() {
        return f;
    }
    if f.is_one() {
        return g.negate();
    }
    if g.is_one() {
        return f.negate();
    }
    if f == g {
        return Edge::zero();
    }
    if f == g.negate() {
        return Edge::one();
    }
    if let Some(r) = mgr.cache.get(Op::Xor, &[f, g]) {
        return r;
    }
    let level = top_level(mgr, &[f, g]).expect("non-terminal edge must resolve to a level");
    let (f0, f1) = cofactors(mgr, f, level);
    let (g0, g1) = cofactors(mgr, g, level);
    let r0 = mgr.with_protected(&[f, g], |mgr| xor_rec(mgr, f0, g0));
    let r1 = mgr.with_protected(&[f, g, r0], |mgr| xor_rec(mgr, f1, g1));
    let r = reduce(mgr, level, r0, r1);
    mgr.cache.add(Op::Xor, &[f, g], r);
    r
}

/// If-then-else, grounded on `apply_ite_rec`.
pub fn ite(mgr: &mut Manager, f: Edge, g: Edge, h: Edge) -> Edge {
    ite_rec(mgr, f, g, h)
}

pub(crate) fn ite_rec(mgr: &mut Manager, f: Edge, g: Edge, h: Edge) -> Edge {
    #[cfg(feature = "statistics")]
    mgr.cache.record_call(Op::Ite);
    if let Some(e) = propagate_invalid(&[f, g, h]) {
        return e;
    }
    if f.is_one() {
        return g;
    }
    if f.is_zero() {
        return h;
    }
    if g == h {
        return g;
    }
    if g.is_one() && h.is_zero() {
        return f;
    }
    if g.is_zero() && h.is_one() {
        return f.negate();
    }
    if f == g {
        return or(mgr, f, h);
    }
    if f == h.negate() {
        return and(mgr, f, g);
    }
    if let Some(r) = mgr.cache.get(Op::Ite, &[f, g, h]) {
        return r;
    }
    let level = top_level(mgr, &[f, g, h]).expect("non-terminal edge must resolve to a level");
    let (f0, f1) = cofactors(mgr, f, level);
    let (g0, g1) = cofactors(mgr, g, level);
    let (h0, h1) = cofactors(mgr, h, level);
    let r0 = mgr.with_protected(&[f, g, h], |mgr| ite_rec(mgr, f0, g0, h0));
    let r1 = mgr.with_protected(&[f, g, h, r0], |mgr| ite_rec(mgr, f1, g1, h1));
    let r = reduce(mgr, level, r0, r1);
    mgr.cache.add(Op::Ite, &[f, g, h], r);
    r
}

/// Generalized cofactor / restrict: simplify `f` using
/// the care set `care`, exploiting don't-care points to shrink the
/// result at the cost of exactness outside `care`.
pub fn restrict(mgr: &mut Manager, f: Edge, care: Edge) -> Edge {
    restrict_rec(mgr, f, care)
}

pub(crate) fn restrict_rec(mgr: &mut Manager, f: Edge, care: Edge) -> Edge {
    #[cfg(feature = "statistics")]
    mgr.cache.record_call(Op::Restrict);
    if let Some(e) = propagate_invalid(&[f, care]) {
        return e;
    }
    if care.is_one() || f.is_const() {
        return f;
    }
    if care.is_zero() {
        // Cofactoring by the empty care set is an IllegalArgument: there
        // is no point at which `f` is required to agree with anything.
        return Edge::error();
    }
    if let Some(r) = mgr.cache.get(Op::Restrict, &[f, care]) {
        return r;
    }
    let level = top_level(mgr, &[f, care]).expect("non-terminal edge must resolve to a level");
    let (f0, f1) = cofactors(mgr, f, level);
    let (c0, c1) = cofactors(mgr, care, level);
    let r = if c0.is_zero() {
        mgr.with_protected(&[f, care], |mgr| restrict_rec(mgr, f1, c1))
    } else if c1.is_zero() {
        mgr.with_protected(&[f, care], |mgr| restrict_rec(mgr, f0, c0))
    } else {
        let r0 = mgr.with_protected(&[f, care], |mgr| restrict_rec(mgr, f0, c0));
        let r1 = mgr.with_protected(&[f, care, r0], |mgr| restrict_rec(mgr, f1, c1));
        reduce(mgr, level, r0, r1)
    };
    mgr.cache.add(Op::Restrict, &[f, care], r);
    r
}

/// Single-variable cofactor: `f` restricted to `var == value`. Exactly
/// `restrict(f, literal(var, value))`, since a single positive or
/// negative literal is itself the minimal care set pinning one
/// variable.
pub fn cofactor(mgr: &mut Manager, f: Edge, var: VarId, value: bool) -> Edge {
    let lit = mgr.literal(var, value);
    restrict_rec(mgr, f, lit)
}

/// The level of `e`'s own node, assuming `e` is known to be non-terminal.
fn edge_level(mgr: &Manager, e: Edge) -> Level {
    let id = e.target_node().expect("checked non-terminal above");
    mgr.table.node(id).level()
}

/// Consumes a cube-represented variable set's top variable, returning
/// what remains. A variable-set cube has exactly one non-zero branch at
/// every node, per [`crate::ops::analysis::onepath`]'s single-path
/// invariant.
fn cube_step(mgr: &Manager, vars: Edge) -> Edge {
    let level = edge_level(mgr, vars);
    let (c0, c1) = cofactors(mgr, vars, level);
    if c1.is_zero() {
        c0
    } else {
        c1
    }
}

/// Existential quantification over a cube-represented variable set:
/// `∃S.f` eliminates each variable in `S` by OR-ing the two cofactors.
/// Grounded on `Bdd::esmooth(const BddVarSet&)`, which passes the set's
/// own backing BDD (`sbdd.root()`) as the second operand rather than a
/// single variable id.
pub fn exist(mgr: &mut Manager, f: Edge, vars: Edge) -> Edge {
    exist_rec(mgr, f, vars)
}

pub(crate) fn exist_rec(mgr: &mut Manager, f: Edge, vars: Edge) -> Edge {
    #[cfg(feature = "statistics")]
    mgr.cache.record_call(Op::Exist);
    if let Some(e) = propagate_invalid(&[f, vars]) {
        return e;
    }
    if f.is_const() || vars.is_const() {
        return f;
    }
    let f_level = edge_level(mgr, f);
    let s_level = edge_level(mgr, vars);
    if s_level < f_level {
        // `vars`'s top variable doesn't appear in `f`: skip it.
        return exist_rec(mgr, f, cube_step(mgr, vars));
    }
    if let Some(r) = mgr.cache.get(Op::Exist, &[f, vars]) {
        return r;
    }
    let (f0, f1) = cofactors(mgr, f, f_level);
    let r = if f_level == s_level {
        let rest = cube_step(mgr, vars);
        let r0 = mgr.with_protected(&[f, vars], |mgr| exist_rec(mgr, f0, rest));
        let r1 = mgr.with_protected(&[f, vars, r0], |mgr| exist_rec(mgr, f1, rest));
        mgr.with_protected(&[f, vars], |mgr| or(mgr, r0, r1))
    } else {
        let r0 = mgr.with_protected(&[f, vars], |mgr| exist_rec(mgr, f0, vars));
        let r1 = mgr.with_protected(&[f, vars, r0], |mgr| exist_rec(mgr, f1, vars));
        reduce(mgr, f_level, r0, r1)
    };
    mgr.cache.add(Op::Exist, &[f, vars], r);
    r
}

/// Universal quantification, derived via De Morgan
/// (`!exist(!f, S)`).
pub fn forall(mgr: &mut Manager, f: Edge, vars: Edge) -> Edge {
    exist_rec(mgr, f.negate(), vars).negate()
}

/// Unique quantification: a variable in `S` is eliminated only where
/// exactly one of its cofactors is true, i.e. `f|0 XOR f|1` generalized
/// recursively over the set.
pub fn unique(mgr: &mut Manager, f: Edge, vars: Edge) -> Edge {
    unique_rec(mgr, f, vars)
}

fn unique_rec(mgr: &mut Manager, f: Edge, vars: Edge) -> Edge {
    #[cfg(feature = "statistics")]
    mgr.cache.record_call(Op::Unique);
    if let Some(e) = propagate_invalid(&[f, vars]) {
        return e;
    }
    if f.is_const() || vars.is_const() {
        return f;
    }
    let f_level = edge_level(mgr, f);
    let s_level = edge_level(mgr, vars);
    if s_level < f_level {
        return unique_rec(mgr, f, cube_step(mgr, vars));
    }
    if let Some(r) = mgr.cache.get(Op::Unique, &[f, vars]) {
        return r;
    }
    let (f0, f1) = cofactors(mgr, f, f_level);
    let r = if f_level == s_level {
        let rest = cube_step(mgr, vars);
        let r0 = mgr.with_protected(&[f, vars], |mgr| unique_rec(mgr, f0, rest));
        let r1 = mgr.with_protected(&[f, vars, r0], |mgr| unique_rec(mgr, f1, rest));
        mgr.with_protected(&[f, vars], |mgr| xor(mgr, r0, r1))
    } else {
        let r0 = mgr.with_protected(&[f, vars], |mgr| unique_rec(mgr, f0, vars));
        let r1 = mgr.with_protected(&[f, vars, r0], |mgr| unique_rec(mgr, f1, vars));
        reduce(mgr, f_level, r0, r1)
    };
    mgr.cache.add(Op::Unique, &[f, vars], r);
    r
}

/// `and_exist(f, g, S) = ∃S.(f ∧ g)` in one recursion, computed without
/// materializing the full conjunction: the classic "and-abstract" fused
/// operator used to keep intermediate BDDs small during image
/// computation. Grounded on `Bdd::and_exist`'s `(src1, src2,
/// const BddVarSet&)` signature, which likewise threads the set's own
/// BDD through as `sbdd.root()`.
pub fn and_exist(mgr: &mut Manager, f: Edge, g: Edge, vars: Edge) -> Edge {
    and_exist_rec(mgr, f, g, vars)
}

fn and_exist_rec(mgr: &mut Manager, f: Edge, g: Edge, vars: Edge) -> Edge {
    #[cfg(feature = "statistics")]
    mgr.cache.record_call(Op::AndExist);
    if let Some(e) = propagate_invalid(&[f, g, vars]) {
        return e;
    }
    if f.is_zero() || g.is_zero() {
        return Edge::zero();
    }
    if f.is_one() && g.is_one() {
        return Edge::one();
    }
    if f == g.negate() {
        return Edge::zero();
    }
    if vars.is_const() {
        return and_rec(mgr, f, g);
    }
    let level = top_level(mgr, &[f, g]).unwrap_or(Level::MAX);
    let s_level = edge_level(mgr, vars);
    if s_level < level {
        return and_exist_rec(mgr, f, g, cube_step(mgr, vars));
    }
    if let Some(r) = mgr.cache.get(Op::AndExist, &[f, g, vars]) {
        return r;
    }
    let (f0, f1) = cofactors(mgr, f, level);
    let (g0, g1) = cofactors(mgr, g, level);
    let r = if level == s_level {
        let rest = cube_step(mgr, vars);
        let r0 = mgr.with_protected(&[f, g, vars], |mgr| and_exist_rec(mgr, f0, g0, rest));
        mgr.with_protected(&[f, g, vars, r0], |mgr| {
            let r1 = and_exist_rec(mgr, f1, g1, rest);
            or(mgr, r0, r1)
        })
    } else {
        let r0 = mgr.with_protected(&[f, g, vars], |mgr| and_exist_rec(mgr, f0, g0, vars));
        let r1 = mgr.with_protected(&[f, g, vars, r0], |mgr| and_exist_rec(mgr, f1, g1, vars));
        reduce(mgr, level, r0, r1)
    };
    mgr.cache.add(Op::AndExist, &[f, g, vars], r);
    r
}

/// The Davio / Reed-Muller xor-moment of `f` about `var`: `f|var=0 XOR
/// f|var=1`, pushed recursively past variables above `var` in the
/// order.
pub fn xor_moment(mgr: &mut Manager, f: Edge, var: VarId) -> Edge {
    xor_moment_rec(mgr, f, mgr.level(var))
}

fn xor_moment_rec(mgr: &mut Manager, f: Edge, target_level: Level) -> Edge {
    #[cfg(feature = "statistics")]
    mgr.cache.record_call(Op::XorMoment);
    if f.is_invalid() || f.is_const() {
        return Edge::zero();
    }
    let id = f.target_node().expect("checked non-terminal above");
    let level = mgr.table.node(id).level();
    if level > target_level {
        return Edge::zero();
    }
    if let Some(r) = mgr
        .cache
        .get_with_numeric(Op::XorMoment, &[f], &[target_level])
    {
        return r;
    }
    let (f0, f1) = cofactors(mgr, f, level);
    let r = if level == target_level {
        mgr.with_protected(&[f], |mgr| xor(mgr, f0, f1))
    } else {
        let r0 = mgr.with_protected(&[f], |mgr| xor_moment_rec(mgr, f0, target_level));
        let r1 = mgr.with_protected(&[f, r0], |mgr| xor_moment_rec(mgr, f1, target_level));
        reduce(mgr, level, r0, r1)
    };
    mgr.cache
        .add_with_numeric(Op::XorMoment, &[f], &[target_level], r);
    r
}

/// Push the variable at `x_level` down to `y_level`, shifting every
/// variable originally between them up by one level; `pol = false`
/// additionally swaps the moved variable's 0/1 children. Fails with
/// `Error` when `x_level >= y_level`, matching the
/// Underflow/IllegalArgument contract checked by the original's `Bdd`
/// wrapper before ever calling down into the manager.
pub fn push_down(mgr: &mut Manager, f: Edge, x_level: Level, y_level: Level, pol: bool) -> Edge {
    if x_level >= y_level {
        return Edge::error();
    }
    if f.is_invalid() || f.is_const() {
        return f;
    }
    let mut cur = f;
    let mut level = x_level;
    while level < y_level {
        cur = mgr.with_protected(&[cur], |mgr| swap_adjacent_rec(mgr, cur, level));
        level += 1;
    }
    if !pol {
        cur = flip_at_level_rec(mgr, cur, y_level);
    }
    cur
}

/// Swaps the variables at `lo_level` and `lo_level + 1` throughout `f`'s
/// own decomposition: the standard adjacent-level exchange used to
/// implement `push_down` as a sequence of single-step moves, the same
/// identity the narrower single-level version of this operator used to
/// apply only once.
fn swap_adjacent_rec(mgr: &mut Manager, f: Edge, lo_level: Level) -> Edge {
    #[cfg(feature = "statistics")]
    mgr.cache.record_call(Op::PushDown);
    if f.is_invalid() || f.is_const() {
        return f;
    }
    let hi_level = lo_level + 1;
    let id = f.target_node().expect("checked non-terminal above");
    let level = mgr.table.node(id).level();
    if level > hi_level {
        return f;
    }
    if let Some(r) = mgr
        .cache
        .get_with_numeric(Op::PushDown, &[f], &[lo_level, 0])
    {
        return r;
    }
    let r = if level < lo_level {
        let (f0, f1) = cofactors(mgr, f, level);
        let r0 = mgr.with_protected(&[f], |mgr| swap_adjacent_rec(mgr, f0, lo_level));
        let r1 = mgr.with_protected(&[f, r0], |mgr| swap_adjacent_rec(mgr, f1, lo_level));
        reduce(mgr, level, r0, r1)
    } else if level == hi_level {
        // `f` doesn't depend on `lo_level`'s variable at all: it simply
        // moves up into `lo_level`'s slot.
        let (f0, f1) = cofactors(mgr, f, hi_level);
        reduce(mgr, lo_level, f0, f1)
    } else {
        let (f0, f1) = cofactors(mgr, f, lo_level);
        let (f00, f01) = cofactors(mgr, f0, hi_level);
        let (f10, f11) = cofactors(mgr, f1, hi_level);
        let lo = mgr.with_protected(&[f], |mgr| reduce(mgr, hi_level, f00, f10));
        let hi = mgr.with_protected(&[f, lo], |mgr| reduce(mgr, hi_level, f01, f11));
        reduce(mgr, lo_level, lo, hi)
    };
    mgr.cache
        .add_with_numeric(Op::PushDown, &[f], &[lo_level, 0], r);
    r
}

/// Swaps the 0/1 children of every node at `level` reachable from `f`,
/// leaving nodes above and below untouched; the `pol = false` half of
/// `push_down`.
fn flip_at_level_rec(mgr: &mut Manager, f: Edge, level: Level) -> Edge {
    if f.is_invalid() || f.is_const() {
        return f;
    }
    let id = f.target_node().expect("checked non-terminal above");
    let node_level = mgr.table.node(id).level();
    if node_level > level {
        return f;
    }
    if let Some(r) = mgr.cache.get_with_numeric(Op::PushDown, &[f], &[level, 1]) {
        return r;
    }
    let (f0, f1) = cofactors(mgr, f, node_level);
    let r = if node_level == level {
        reduce(mgr, level, f1, f0)
    } else {
        let r0 = mgr.with_protected(&[f], |mgr| flip_at_level_rec(mgr, f0, level));
        let r1 = mgr.with_protected(&[f, r0], |mgr| flip_at_level_rec(mgr, f1, level));
        reduce(mgr, node_level, r0, r1)
    };
    mgr.cache
        .add_with_numeric(Op::PushDown, &[f], &[level, 1], r);
    r
}

/// Begin a staged, simultaneous-substitution compose batch: clears any
/// previously staged, unconsumed substitutions.
pub fn compose_start(mgr: &mut Manager) {
    mgr.compose_staging.clear();
}

/// Stage `var -> replacement` for the in-progress compose batch.
pub fn compose_reg(mgr: &mut Manager, var: VarId, replacement: Edge) {
    mgr.compose_staging.retain(|(v, _)| *v != var);
    mgr.compose_staging.push((var, replacement));
}

/// Apply every staged substitution to `f` in a single traversal, then
/// clear the staging area. Grounded on the "vector compose" recursion:
/// each variable found while walking `f` is
/// either left alone (no staged replacement) or selected via `ite`
/// between its two already-substituted cofactors.
pub fn compose(mgr: &mut Manager, f: Edge) -> Edge {
    let batch = compose_batch_id(mgr);
    let r = compose_rec(mgr, f, batch);
    mgr.compose_staging.clear();
    r
}

/// A cache-distinguishing id for the current staged batch. Composed
/// from the staged pairs themselves so that two calls staging the same
/// substitutions reuse cache entries, while distinct batches never
/// collide.
fn compose_batch_id(mgr: &Manager) -> u32 {
    use std::hash::{Hash, Hasher};
    let mut hasher = rustc_hash::FxHasher::default();
    for (var, edge) in &mgr.compose_staging {
        var.hash(&mut hasher);
        edge.hash(&mut hasher);
    }
    hasher.finish() as u32
}

fn compose_rec(mgr: &mut Manager, f: Edge, batch: u32) -> Edge {
    #[cfg(feature = "statistics")]
    mgr.cache.record_call(Op::Substitute);
    if f.is_invalid() || f.is_const() {
        return f;
    }
    if let Some(r) = mgr.cache.get_with_numeric(Op::Substitute, &[f], &[batch]) {
        return r;
    }
    let id = f.target_node().expect("checked non-terminal above");
    let level = mgr.table.node(id).level();
    let var = mgr.varid(level);
    let (f0, f1) = cofactors(mgr, f, level);
    let r0 = mgr.with_protected(&[f], |mgr| compose_rec(mgr, f0, batch));
    let r1 = mgr.with_protected(&[f, r0], |mgr| compose_rec(mgr, f1, batch));
    let replacement = mgr
        .compose_staging
        .iter()
        .find(|(v, _)| *v == var)
        .map(|(_, e)| *e);
    let r = match replacement {
        Some(g) => mgr.with_protected(&[f, r0, r1], |mgr| ite_rec(mgr, g, r1, r0)),
        None => reduce(mgr, level, r0, r1),
    };
    mgr.cache.add_with_numeric(Op::Substitute, &[f], &[batch], r);
    r
}

/// Shannon decomposition of `f` about its own root variable: returns
/// `None` for a terminal edge.
pub fn root_var(mgr: &Manager, f: Edge) -> Option<VarId> {
    f.target_node().map(|id| mgr.varid(mgr.table.node(id).level()))
}

pub fn root_decomp(mgr: &Manager, f: Edge) -> Option<(VarId, Edge, Edge)> {
    let id = f.target_node()?;
    let level = mgr.table.node(id).level();
    let node = mgr.table.node(id);
    let (c0, c1) = node.children();
    let (c0, c1) = if f.polarity() {
        (c0.negate(), c1.negate())
    } else {
        (c0, c1)
    };
    Some((mgr.varid(level), c0, c1))
}
