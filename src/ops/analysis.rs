//! Structural analyses over a BDD rooted at a single edge: size,
//! support, satisfying paths, minterm counts, Walsh
//! spectral coefficients, and symmetry/cube checks.
//!
//! Grounded on `original_source/Bdd.cc`'s `size()`/`support()`/
//! `onepath()`/`minterm_count()`/`walsh0()`/`walsh1()`/`check_symmetry()`
//! family: each walks the DAG once using the node's scratch `mark` bit
//! — the same bit GC's mark phase resets before every sweep — never
//! allocating a separate visited-set where the mark bit suffices.

use num_bigint::{BigInt, BigUint};
use num_traits::Zero;
use rustc_hash::FxHashMap;

use crate::edge::Edge;
use crate::expr::Cube;
use crate::manager::Manager;
use crate::ops::{cofactor, cofactors, or, root_decomp};
use crate::var::{Level, Literal, VarId};

/// Number of distinct internal nodes reachable from `f`.
pub fn node_count(mgr: &mut Manager, f: Edge) -> usize {
    let mut count = 0;
    mark_count(mgr, f, &mut count);
    unmark(mgr, f);
    count
}

pub(crate) fn mark_count(mgr: &mut Manager, e: Edge, count: &mut usize) {
    let Some(id) = e.target_node() else { return };
    if mgr.table.node(id).mark {
        return;
    }
    mgr.table.node_mut(id).mark = true;
    *count += 1;
    let (c0, c1) = mgr.table.node(id).children();
    mark_count(mgr, c0, count);
    mark_count(mgr, c1, count);
}

pub(crate) fn unmark(mgr: &mut Manager, e: Edge) {
    let Some(id) = e.target_node() else { return };
    if !mgr.table.node(id).mark {
        return;
    }
    mgr.table.node_mut(id).mark = false;
    let (c0, c1) = mgr.table.node(id).children();
    unmark(mgr, c0);
    unmark(mgr, c1);
}

/// The set of variables `f` actually depends on, in ascending level
/// order.
pub fn support(mgr: &mut Manager, f: Edge) -> Vec<VarId> {
    let mut levels = Vec::new();
    mark_support(mgr, f, &mut levels);
    unmark(mgr, f);
    levels.sort_unstable();
    levels.into_iter().map(|l| mgr.varid(l)).collect()
}

pub(crate) fn mark_support(mgr: &mut Manager, e: Edge, levels: &mut Vec<Level>) {
    let Some(id) = e.target_node() else { return };
    if mgr.table.node(id).mark {
        return;
    }
    mgr.table.node_mut(id).mark = true;
    levels.push(mgr.table.node(id).level());
    let (c0, c1) = mgr.table.node(id).children();
    mark_support(mgr, c0, levels);
    mark_support(mgr, c1, levels);
}

/// Any single satisfying assignment of `f`, expressed as a cube.
/// Prefers the positive branch at each level, matching
/// `original_source/Bdd.cc`'s `onepath()`.
pub fn onepath(mgr: &Manager, f: Edge) -> Option<Cube> {
    if f.is_zero() {
        return None;
    }
    if f.is_one() {
        return Some(Cube::tautology());
    }
    let (var, e0, e1) = root_decomp(mgr, f)?;
    if let Some(mut cube) = onepath(mgr, e1) {
        cube.literals.push(Literal::positive(var));
        return Some(cube);
    }
    let mut cube = onepath(mgr, e0)?;
    cube.literals.push(Literal::negative(var));
    Some(cube)
}

/// The number of literals in the shortest satisfying path, if any.
pub fn shortest_onepath_len(mgr: &Manager, f: Edge) -> Option<usize> {
    let mut memo = FxHashMap::default();
    shortest_len_rec(mgr, f, &mut memo)
}

/// A shortest satisfying assignment of `f`, ties broken toward the
/// positive branch.
pub fn shortest_onepath(mgr: &Manager, f: Edge) -> Option<Cube> {
    let mut memo = FxHashMap::default();
    shortest_len_rec(mgr, f, &mut memo);
    build_shortest(mgr, f, &memo)
}

fn shortest_len_rec(mgr: &Manager, e: Edge, memo: &mut FxHashMap<Edge, Option<usize>>) -> Option<usize> {
    if let Some(v) = memo.get(&e) {
        return *v;
    }
    let result = if e.is_zero() {
        None
    } else if e.is_one() {
        Some(0)
    } else {
        let (_, e0, e1) = root_decomp(mgr, e).expect("checked non-terminal above");
        let l0 = shortest_len_rec(mgr, e0, memo).map(|d| d + 1);
        let l1 = shortest_len_rec(mgr, e1, memo).map(|d| d + 1);
        match (l0, l1) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (Some(a), None) => Some(a),
            (None, Some(b)) => Some(b),
            (None, None) => None,
        }
    };
    memo.insert(e, result);
    result
}

fn build_shortest(mgr: &Manager, e: Edge, memo: &FxHashMap<Edge, Option<usize>>) -> Option<Cube> {
    if e.is_zero() {
        return None;
    }
    if e.is_one() {
        return Some(Cube::tautology());
    }
    let (var, e0, e1) = root_decomp(mgr, e).expect("checked non-terminal above");
    let l0 = memo.get(&e0).copied().flatten();
    let l1 = memo.get(&e1).copied().flatten();
    let take_positive = match (l0, l1) {
        (Some(a), Some(b)) => b <= a,
        (None, Some(_)) => true,
        (Some(_), None) => false,
        (None, None) => unreachable!("e is satisfiable, one branch must lead to One"),
    };
    if take_positive {
        let mut cube = build_shortest(mgr, e1, memo)?;
        cube.literals.push(Literal::positive(var));
        Some(cube)
    } else {
        let mut cube = build_shortest(mgr, e0, memo)?;
        cube.literals.push(Literal::negative(var));
        Some(cube)
    }
}

/// Number of satisfying assignments of `f` over a universe of
/// `num_vars` variables, using
/// arbitrary-precision arithmetic since the count grows as `2^num_vars`.
pub fn minterm_count(mgr: &Manager, f: Edge, num_vars: usize) -> BigUint {
    let mut memo = FxHashMap::default();
    minterm_count_from(mgr, f, 0, num_vars, &mut memo)
}

/// Memoized count of satisfying assignments reachable from `e`,
/// assuming `e`'s own node level as the starting point (i.e. no
/// skipped-level factor included); callers scale by `2^gap` themselves.
fn node_minterm_count(
    mgr: &Manager,
    e: Edge,
    num_vars: usize,
    memo: &mut FxHashMap<Edge, BigUint>,
) -> BigUint {
    if let Some(v) = memo.get(&e) {
        return v.clone();
    }
    let id = e.target_node().expect("terminal edges handled by caller");
    let node_level = mgr.table.node(id).level();
    let (c0, c1) = cofactors(mgr, e, node_level);
    let total = minterm_count_from(mgr, c0, node_level + 1, num_vars, memo)
        + minterm_count_from(mgr, c1, node_level + 1, num_vars, memo);
    memo.insert(e, total.clone());
    total
}

fn minterm_count_from(
    mgr: &Manager,
    e: Edge,
    level: Level,
    num_vars: usize,
    memo: &mut FxHashMap<Edge, BigUint>,
) -> BigUint {
    if e.is_zero() {
        return BigUint::zero();
    }
    if e.is_one() {
        return BigUint::from(2u32).pow(num_vars as u32 - level);
    }
    let id = e.target_node().expect("checked terminals above");
    let node_level = mgr.table.node(id).level();
    let base = node_minterm_count(mgr, e, num_vars, memo);
    base * BigUint::from(2u32).pow(node_level - level)
}

/// Zeroth-order Walsh spectral coefficient: `2 * minterm_count(f) -
/// 2^num_vars`, signed since `f`'s off-set may
/// outweigh its on-set.
pub fn walsh0(mgr: &Manager, f: Edge, num_vars: usize) -> BigInt {
    let mc = BigInt::from(minterm_count(mgr, f, num_vars));
    let total = BigInt::from(BigUint::from(2u32).pow(num_vars as u32));
    mc * 2 - total
}

/// First-order Walsh coefficient with respect to `var`: the difference
/// between the zeroth-order coefficients of `f`'s two cofactors, a
/// standard measure of `var`'s net influence.
pub fn walsh1(mgr: &mut Manager, f: Edge, var: VarId, num_vars: usize) -> BigInt {
    let f0 = cofactor(mgr, f, var, false);
    let f1 = cofactor(mgr, f, var, true);
    walsh0(mgr, f0, num_vars - 1) - walsh0(mgr, f1, num_vars - 1)
}

/// Whether `cube` is an implicant of `f`, i.e. every minterm satisfying
/// `cube` also satisfies `f`.
pub fn check_cube(mgr: &mut Manager, f: Edge, cube: &Cube) -> bool {
    let mut cur = f;
    for lit in &cube.literals {
        cur = cofactor(mgr, cur, lit.var, lit.polarity);
    }
    cur.is_one()
}

/// As [`check_cube`], but additionally requires every literal in `cube`
/// to be positive.
pub fn check_posi_cube(mgr: &mut Manager, f: Edge, cube: &Cube) -> bool {
    cube.literals.iter().all(|l| l.polarity) && check_cube(mgr, f, cube)
}

/// Whether `f` is symmetric (`positive`) or anti-symmetric (`negative`)
/// in `var_a` and `var_b`: for `positive`, swapping their values while
/// holding every other variable fixed never changes `f`; for `negative`,
/// swapping them while also forcing them unequal never changes `f`.
/// `var_a == var_b` is a trivial case handled without touching the
/// manager: a variable is always positively, never negatively,
/// symmetric with itself.
pub fn check_symmetry(mgr: &mut Manager, f: Edge, var_a: VarId, var_b: VarId, positive: bool) -> bool {
    if var_a == var_b {
        return positive;
    }
    let a0 = cofactor(mgr, f, var_a, false);
    let a1 = cofactor(mgr, f, var_a, true);
    if positive {
        let a0_b1 = cofactor(mgr, a0, var_b, true);
        let a1_b0 = cofactor(mgr, a1, var_b, false);
        a0_b1 == a1_b0
    } else {
        let a0_b0 = cofactor(mgr, a0, var_b, false);
        let a1_b1 = cofactor(mgr, a1, var_b, true);
        a0_b0 == a1_b1
    }
}

/// The smallest cube containing `f`'s entire on-set: at each level, a
/// variable is included as a literal only if one of its cofactors is
/// identically zero; otherwise the variable is a don't-care and the
/// two cofactors are merged with `or` before continuing.
pub fn smallest_cube(mgr: &mut Manager, f: Edge) -> Option<Cube> {
    if f.is_zero() {
        return None;
    }
    if f.is_one() {
        return Some(Cube::tautology());
    }
    let (var, e0, e1) = root_decomp(mgr, f)?;
    if e0.is_zero() {
        let mut cube = smallest_cube(mgr, e1)?;
        cube.literals.push(Literal::positive(var));
        return Some(cube);
    }
    if e1.is_zero() {
        let mut cube = smallest_cube(mgr, e0)?;
        cube.literals.push(Literal::negative(var));
        return Some(cube);
    }
    let merged = or(mgr, e0, e1);
    smallest_cube(mgr, merged)
}
