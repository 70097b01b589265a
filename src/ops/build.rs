//! BDD construction from external representations: truth vectors,
//! threshold functions, and logic expressions.
//!
//! Grounded directly on `original_source/BddMgr.cc`'s `tvec_to_bdd`,
//! `make_thfunc`, and `expr_to_bdd(const LogExpr&, const VarBddMap&)`.

use crate::edge::Edge;
use crate::expr::{Expr, Substitution};
use crate::manager::Manager;
use crate::ops::{and, or, xor};
use crate::var::VarId;

/// Build the BDD whose truth table over `vars` (ordered, most
/// significant first) is exactly `table`. `table.len()` must equal `2^vars.len()`;
/// panics otherwise, matching the original's `assert`-style contract
/// ("v の大きさは 2^ni に等しくなければならない" — "v's size must equal
/// 2^ni").
pub fn table_from_truth_vector(mgr: &mut Manager, vars: &[VarId], table: &[bool]) -> Edge {
    assert_eq!(
        table.len(),
        1usize << vars.len(),
        "truth vector length must equal 2^vars.len()"
    );
    tvec_rec(mgr, vars, table)
}

fn tvec_rec(mgr: &mut Manager, vars: &[VarId], table: &[bool]) -> Edge {
    let Some((&var, rest)) = vars.split_first() else {
        return Edge::constant(table[0]);
    };
    let half = table.len() / 2;
    let e0 = tvec_rec(mgr, rest, &table[..half]);
    let e1 = tvec_rec(mgr, rest, &table[half..]);
    mgr.build_node(var, e0, e1)
}

/// The threshold function over `vars`: 1 iff at least `threshold` of
/// `vars` are 1. Built bottom-up via the
/// same `table[i][j]` dynamic program as `BddMgr::make_thfunc`, where
/// `table[i][j]` is the BDD over `vars[i..]` that is 1 iff at least `j`
/// of the remaining variables are 1.
pub fn thfunc(mgr: &mut Manager, vars: &[VarId], threshold: usize) -> Edge {
    let n = vars.len();
    if threshold == 0 {
        return Edge::one();
    }
    if threshold > n {
        return Edge::zero();
    }
    // table[i * (threshold + 1) + j], i in 0..=n, j in 0..=threshold.
    let mut table = vec![Edge::zero(); (n + 1) * (threshold + 1)];
    let idx = |i: usize, j: usize| i * (threshold + 1) + j;
    table[idx(n, 0)] = Edge::one();
    for j in 1..=threshold {
        table[idx(n, j)] = Edge::zero();
    }
    for i in (0..n).rev() {
        table[idx(i, 0)] = Edge::one();
        for j in 1..=threshold {
            table[idx(i, j)] = if j > n - i {
                Edge::zero()
            } else {
                let lo = table[idx(i + 1, j)];
                let hi = table[idx(i + 1, j - 1)];
                mgr.build_node(vars[i], lo, hi)
            };
        }
    }
    table[idx(0, threshold)]
}

/// Realize `expr` as a BDD, replacing each literal's variable through
/// `subst` before combining.
pub fn expr_to_bdd(mgr: &mut Manager, expr: &Expr, subst: &Substitution) -> Edge {
    match expr {
        Expr::Zero => Edge::zero(),
        Expr::One => Edge::one(),
        Expr::Literal(lit) => {
            let base = match subst {
                Substitution::Identity => mgr.positive_literal(lit.var),
                Substitution::VarToVar(map) => {
                    let target = map.get(&lit.var).copied().unwrap_or(lit.var);
                    mgr.positive_literal(target)
                }
                Substitution::VarToEdge(map) => match map.get(&lit.var) {
                    Some(&e) => e,
                    None => mgr.positive_literal(lit.var),
                },
            };
            base.with_polarity(lit.polarity)
        }
        Expr::Not(e) => expr_to_bdd(mgr, e, subst).negate(),
        Expr::And(es) => es.iter().fold(Edge::one(), |acc, e| {
            let e = expr_to_bdd(mgr, e, subst);
            and(mgr, acc, e)
        }),
        Expr::Or(es) => es.iter().fold(Edge::zero(), |acc, e| {
            let e = expr_to_bdd(mgr, e, subst);
            or(mgr, acc, e)
        }),
        Expr::Xor(a, b) => {
            let a = expr_to_bdd(mgr, a, subst);
            let b = expr_to_bdd(mgr, b, subst);
            xor(mgr, a, b)
        }
    }
}
