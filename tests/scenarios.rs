//! Six concrete end-to-end scenarios, each run in a fresh 3-variable
//! manager (`x0, x1, x2` registered in that order unless noted).

use num_bigint::BigUint;

use robdd::ops::analysis::{minterm_count, node_count, support};
use robdd::ops::build::{expr_to_bdd, table_from_truth_vector, thfunc};
use robdd::ops::{and, compose, compose_reg, compose_start, or, xor};
use robdd::{Expr, Manager, Substitution, VarId};

fn manager_with_vars(n: u32) -> (Manager, Vec<VarId>) {
    let mut mgr = Manager::new("classic", "scenarios", "");
    let vars: Vec<VarId> = (0..n).map(VarId::new).collect();
    for v in &vars {
        mgr.new_var(*v);
    }
    (mgr, vars)
}

#[test]
fn scenario_1_and_of_two_literals() {
    let (mut mgr, vars) = manager_with_vars(3);
    let a = mgr.literal(vars[0], true);
    let b = mgr.literal(vars[1], true);
    let f = and(&mut mgr, a, b);

    assert_eq!(minterm_count(&mgr, f, 3), BigUint::from(2u32));
    assert_eq!(support(&mut mgr, f), vec![vars[0], vars[1]]);
    assert_eq!(node_count(&mut mgr, f), 2);
}

#[test]
fn scenario_2_xor_of_two_literals() {
    let (mut mgr, vars) = manager_with_vars(3);
    let a = mgr.literal(vars[0], true);
    let b = mgr.literal(vars[1], true);
    let f = xor(&mut mgr, a, b);

    assert_eq!(minterm_count(&mgr, f, 3), BigUint::from(4u32));

    // f evaluates to 1 on {x0=1,x1=0,x2=*} and {x0=0,x1=1,x2=*}.
    let on1 = table_from_truth_vector(&mut mgr, &vars, &tt(3, |a| a[0] && !a[1]));
    let on2 = table_from_truth_vector(&mut mgr, &vars, &tt(3, |a| !a[0] && a[1]));
    let on_union = or(&mut mgr, on1, on2);
    assert_eq!(on_union, f);
}

#[test]
fn scenario_3_threshold_function_walsh0() {
    let (mut mgr, vars) = manager_with_vars(3);
    let f = thfunc(&mut mgr, &vars, 2);

    assert_eq!(minterm_count(&mgr, f, 3), BigUint::from(4u32));
    let w0 = robdd::ops::analysis::walsh0(&mgr, f, 3);
    assert_eq!(w0, num_bigint::BigInt::from(0));
}

#[test]
fn scenario_4_truth_vector_equals_xor() {
    let (mut mgr, vars) = manager_with_vars(2);
    let table = [false, true, true, false];
    let from_table = table_from_truth_vector(&mut mgr, &vars, &table);

    let a = mgr.literal(vars[0], true);
    let b = mgr.literal(vars[1], true);
    let from_xor = xor(&mut mgr, a, b);

    assert_eq!(from_table, from_xor, "edges must be literally equal");
}

#[test]
fn scenario_5_dump_restore_across_managers() {
    let (mut src, vars) = manager_with_vars(3);
    let a = src.literal(vars[0], true);
    let b = src.literal(vars[1], true);
    let c = src.literal(vars[2], true);
    let ab = or(&mut src, a, b);
    let f = or(&mut src, ab, c);

    let mut bytes = Vec::new();
    robdd::dump::dump(&mut src, &[f], &mut bytes).unwrap();

    let (mut dst, _) = manager_with_vars(3);
    let mut cursor = std::io::Cursor::new(bytes);
    let roots = robdd::dump::restore(&mut dst, &mut cursor).unwrap();
    assert_eq!(roots.len(), 1);

    let restored = roots[0];
    assert_eq!(minterm_count(&dst, restored, 3), BigUint::from(7u32));
    assert_eq!(support(&mut dst, restored), vars);
}

#[test]
fn scenario_6_compose_substitutes_x0_with_x1() {
    let (mut mgr, vars) = manager_with_vars(3);
    let lit1 = mgr.literal(vars[1], true);
    let f = {
        let x0 = mgr.literal(vars[0], true);
        let x2 = mgr.literal(vars[2], true);
        and(&mut mgr, x0, x2)
    };

    compose_start(&mut mgr);
    compose_reg(&mut mgr, vars[0], lit1);
    let composed = compose(&mut mgr, f);

    let expected = {
        let x1 = mgr.literal(vars[1], true);
        let x2 = mgr.literal(vars[2], true);
        and(&mut mgr, x1, x2)
    };
    assert_eq!(composed, expected);
}

#[test]
fn expr_to_bdd_matches_equivalent_ops_construction() {
    let (mut mgr, vars) = manager_with_vars(2);
    let expr = Expr::And(vec![
        Expr::Literal(robdd::Literal::positive(vars[0])),
        Expr::Not(Box::new(Expr::Literal(robdd::Literal::positive(vars[1])))),
    ]);
    let via_expr = expr_to_bdd(&mut mgr, &expr, &Substitution::Identity);

    let a = mgr.literal(vars[0], true);
    let b = mgr.literal(vars[1], false);
    let via_ops = and(&mut mgr, a, b);
    assert_eq!(via_expr, via_ops);
}

/// Build a truth table over `n` variables from a predicate over a
/// fixed bit assignment (MSB = first variable, matching the
/// truth-vector convention `table_from_truth_vector` expects).
fn tt(n: usize, pred: impl Fn(&[bool]) -> bool) -> Vec<bool> {
    (0..(1usize << n))
        .map(|p| {
            let bits: Vec<bool> = (0..n).map(|i| (p >> (n - i - 1)) & 1 == 1).collect();
            pred(&bits)
        })
        .collect()
}
