//! Universal properties that must hold for any function built in a
//! fresh manager: canonicity, negation involution,
//! reducedness, round-trip through dump/restore, and the standard
//! operator laws (AND/XOR identities, ITE degenerate cases, compose and
//! quantifier identities, minterm-count complementation).

use num_bigint::BigUint;

use robdd::ops::analysis::{minterm_count, node_count, support};
use robdd::ops::{and, cofactor, compose, compose_reg, compose_start, exist, ite, or, restrict, xor};
use robdd::{Edge, Manager, VarId};

fn manager_with_vars(n: u32) -> (Manager, Vec<VarId>) {
    let mut mgr = Manager::new("classic", "properties", "");
    let vars: Vec<VarId> = (0..n).map(VarId::new).collect();
    for v in &vars {
        mgr.new_var(*v);
    }
    (mgr, vars)
}

#[test]
fn negation_is_an_involution() {
    let (mut mgr, vars) = manager_with_vars(2);
    let a = mgr.literal(vars[0], true);
    let b = mgr.literal(vars[1], true);
    let f = and(&mut mgr, a, b);
    assert_eq!(f.negate().negate(), f);
}

#[test]
fn canonicity_equal_functions_share_an_edge() {
    let (mut mgr, vars) = manager_with_vars(2);
    let a1 = mgr.literal(vars[0], true);
    let b1 = mgr.literal(vars[1], true);
    let f1 = and(&mut mgr, a1, b1);

    // Built via De Morgan instead, starting from fresh literal lookups:
    // AND(a,b) == NOT(OR(NOT a, NOT b)).
    let a2 = mgr.literal(vars[0], true);
    let b2 = mgr.literal(vars[1], true);
    let not_a2 = a2.negate();
    let not_b2 = b2.negate();
    let nor = or(&mut mgr, not_a2, not_b2);
    let f2 = nor.negate();

    assert_eq!(f1, f2, "two constructions of the same function must be the same edge");
}

#[test]
fn reduced_bdd_has_no_redundant_node() {
    // A BDD built from a variable ANDed with itself must reduce away:
    // and(x, x) == x, no node should ever be created for it.
    let (mut mgr, vars) = manager_with_vars(1);
    let x = mgr.literal(vars[0], true);
    let f = and(&mut mgr, x, x);
    assert_eq!(f, x);
    assert_eq!(node_count(&mut mgr, f), 1);
}

#[test]
fn and_self_is_identity_and_and_with_negation_is_zero() {
    let (mut mgr, vars) = manager_with_vars(2);
    let a = mgr.literal(vars[0], true);
    let b = mgr.literal(vars[1], true);
    let f = xor(&mut mgr, a, b);

    let self_and = and(&mut mgr, f, f);
    assert_eq!(self_and, f);

    let not_f = f.negate();
    let zero = and(&mut mgr, f, not_f);
    assert!(zero.is_zero());
}

#[test]
fn xor_self_is_zero_and_xor_complement_is_one() {
    let (mut mgr, vars) = manager_with_vars(2);
    let a = mgr.literal(vars[0], true);
    let b = mgr.literal(vars[1], true);
    let f = and(&mut mgr, a, b);

    let self_xor = xor(&mut mgr, f, f);
    assert!(self_xor.is_zero());

    let not_f = f.negate();
    let complement_xor = xor(&mut mgr, f, not_f);
    assert!(complement_xor.is_one());
}

#[test]
fn ite_degenerate_selector_returns_the_right_branch() {
    let (mut mgr, vars) = manager_with_vars(2);
    let g = mgr.literal(vars[0], true);
    let h = mgr.literal(vars[1], true);
    let one = mgr.one();
    let zero = mgr.zero();

    assert_eq!(ite(&mut mgr, one, g, h), g);
    assert_eq!(ite(&mut mgr, zero, g, h), h);
}

#[test]
fn compose_of_a_single_variable_matches_cofactor_identity() {
    // f[x := g] for f = x, composed with a single staged substitution,
    // must equal g itself.
    let (mut mgr, vars) = manager_with_vars(2);
    let x = mgr.literal(vars[0], true);
    let g = mgr.literal(vars[1], true);

    compose_start(&mut mgr);
    compose_reg(&mut mgr, vars[0], g);
    let composed = compose(&mut mgr, x);
    assert_eq!(composed, g);
}

#[test]
fn existential_quantification_equals_cofactor_disjunction() {
    let (mut mgr, vars) = manager_with_vars(2);
    let a = mgr.literal(vars[0], true);
    let b = mgr.literal(vars[1], true);
    let f = and(&mut mgr, a, b);

    let f0 = cofactor(&mut mgr, f, vars[0], false);
    let f1 = cofactor(&mut mgr, f, vars[0], true);
    let expected = or(&mut mgr, f0, f1);

    let s = mgr.literal(vars[0], true);
    let quantified = exist(&mut mgr, f, s);
    assert_eq!(quantified, expected);
}

#[test]
fn existential_quantification_drops_the_variable_from_support() {
    let (mut mgr, vars) = manager_with_vars(3);
    let a = mgr.literal(vars[0], true);
    let b = mgr.literal(vars[1], true);
    let f = and(&mut mgr, a, b);

    let s = mgr.literal(vars[0], true);
    let quantified = exist(&mut mgr, f, s);
    assert_eq!(support(&mut mgr, quantified), vec![vars[1]]);
}

#[test]
fn existential_quantification_over_a_multi_variable_set() {
    // Quantifying out {x0, x1} at once from (x0 & x1) | x2 must agree
    // with quantifying them out one at a time.
    let (mut mgr, vars) = manager_with_vars(3);
    let x0 = mgr.literal(vars[0], true);
    let x1 = mgr.literal(vars[1], true);
    let x2 = mgr.literal(vars[2], true);
    let and01 = and(&mut mgr, x0, x1);
    let f = or(&mut mgr, and01, x2);

    let s = and(&mut mgr, x0, x1);
    let quantified = exist(&mut mgr, f, s);

    let one_at_a_time = exist(&mut mgr, f, x0);
    let one_at_a_time = exist(&mut mgr, one_at_a_time, x1);
    assert_eq!(quantified, one_at_a_time);
    assert!(quantified.is_one());
}

#[test]
fn restrict_by_an_empty_care_set_is_an_error() {
    let (mut mgr, vars) = manager_with_vars(2);
    let a = mgr.literal(vars[0], true);
    let b = mgr.literal(vars[1], true);
    let f = and(&mut mgr, a, b);

    let restricted = restrict(&mut mgr, f, Edge::zero());
    assert_eq!(restricted, Edge::error());
}

#[test]
fn minterm_count_of_a_function_and_its_complement_sum_to_universe_size() {
    let (mut mgr, vars) = manager_with_vars(4);
    let a = mgr.literal(vars[0], true);
    let b = mgr.literal(vars[1], true);
    let c = mgr.literal(vars[2], true);
    let ab = and(&mut mgr, a, b);
    let f = xor(&mut mgr, ab, c);

    let n = vars.len();
    let on = minterm_count(&mgr, f, n);
    let off = minterm_count(&mgr, f.negate(), n);
    assert_eq!(on + off, BigUint::from(2u32).pow(n as u32));
}

#[test]
fn support_of_a_constant_is_empty() {
    let (mut mgr, _vars) = manager_with_vars(2);
    let one = mgr.one();
    let zero = mgr.zero();
    assert!(support(&mut mgr, one).is_empty());
    assert!(support(&mut mgr, zero).is_empty());
}

#[test]
fn dump_restore_round_trip_preserves_the_function() {
    let (mut src, vars) = manager_with_vars(3);
    let a = src.literal(vars[0], true);
    let b = src.literal(vars[1], true);
    let c = src.literal(vars[2], true);
    let ab = and(&mut src, a, b);
    let f = xor(&mut src, ab, c);

    let mut bytes = Vec::new();
    robdd::dump::dump(&mut src, &[f], &mut bytes).unwrap();

    let (mut dst, dst_vars) = manager_with_vars(3);
    let mut cursor = std::io::Cursor::new(bytes);
    let roots = robdd::dump::restore(&mut dst, &mut cursor).unwrap();

    let a2 = dst.literal(dst_vars[0], true);
    let b2 = dst.literal(dst_vars[1], true);
    let c2 = dst.literal(dst_vars[2], true);
    let ab2 = and(&mut dst, a2, b2);
    let expected = xor(&mut dst, ab2, c2);

    assert_eq!(roots[0], expected);
}

#[test]
fn isop_cover_lies_between_lower_and_upper() {
    use robdd::ops::analysis::check_cube;
    use robdd::ops::isop::isop;

    let (mut mgr, vars) = manager_with_vars(2);
    let a = mgr.literal(vars[0], true);
    let b = mgr.literal(vars[1], true);
    let lower = and(&mut mgr, a, b);
    let upper = or(&mut mgr, a, b);

    let (cover, edge) = isop(&mut mgr, lower, upper);
    assert!(!cover.cubes.is_empty());
    for cube in &cover.cubes {
        assert!(check_cube(&mut mgr, upper, cube), "every cube must imply upper");
    }

    let lower_implies_edge = {
        let not_edge = edge.negate();
        and(&mut mgr, lower, not_edge)
    };
    assert!(lower_implies_edge.is_zero(), "lower must imply the cover");

    let edge_implies_upper = {
        let not_upper = upper.negate();
        and(&mut mgr, edge, not_upper)
    };
    assert!(edge_implies_upper.is_zero(), "cover must imply upper");
}

#[test]
fn check_symmetry_detects_symmetric_and_non_symmetric_vars() {
    use robdd::ops::analysis::check_symmetry;

    // f = (x0 & x1) | x2 is symmetric in x0/x1 but not anti-symmetric:
    // swapping x0 and x1 never changes f, but forcing them unequal does.
    let (mut mgr, vars) = manager_with_vars(3);
    let x0 = mgr.literal(vars[0], true);
    let x1 = mgr.literal(vars[1], true);
    let x2 = mgr.literal(vars[2], true);
    let and01 = and(&mut mgr, x0, x1);
    let f = or(&mut mgr, and01, x2);

    assert!(check_symmetry(&mut mgr, f, vars[0], vars[1], true));
    assert!(!check_symmetry(&mut mgr, f, vars[0], vars[1], false));

    // A variable is always positively, never negatively, symmetric with itself.
    assert!(check_symmetry(&mut mgr, f, vars[0], vars[0], true));
    assert!(!check_symmetry(&mut mgr, f, vars[0], vars[0], false));

    // g = ite(x2, x0, x1) depends on which of x0/x1 is selected by x2, so
    // swapping x0 and x1 changes g whenever x2 = 1.
    let g = ite(&mut mgr, x2, x0, x1);
    assert!(!check_symmetry(&mut mgr, g, vars[0], vars[1], true));
}

#[test]
fn thfunc_threshold_zero_is_one_and_above_arity_is_zero() {
    use robdd::ops::build::thfunc;

    let (mut mgr, vars) = manager_with_vars(3);
    let always = thfunc(&mut mgr, &vars, 0);
    assert!(always.is_one());

    let impossible = thfunc(&mut mgr, &vars, 4);
    assert!(impossible.is_zero());
}
