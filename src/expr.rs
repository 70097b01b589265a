//! A minimal logic-expression surface.
//!
//! Logic-expression types are treated as an external collaborator the
//! core merely consumes and produces; this module does not attempt to
//! be a general boolean-expression library. `Cube`/`Cover`
//! are exactly the shape [`crate::ops::isop::prime_cover`] needs, and
//! `Expr` is just rich enough to round-trip through
//! [`Manager::expr_to_bdd`](crate::manager::Manager::expr_to_bdd), the
//! same surface `original_source/BddMgr.cc`'s `expr_to_bdd(const
//! LogExpr&, const VarBddMap&)` consumes.

use rustc_hash::FxHashMap;

use crate::edge::Edge;
use crate::var::{Literal, VarId};

/// A conjunction of literals (a product term / cube).
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Cube {
    pub literals: Vec<Literal>,
}

impl Cube {
    pub fn new(literals: Vec<Literal>) -> Self {
        Cube { literals }
    }

    pub fn tautology() -> Self {
        Cube::default()
    }

    pub fn is_tautology(&self) -> bool {
        self.literals.is_empty()
    }

    /// The polarity this cube demands of `var`, if it constrains it.
    pub fn polarity_of(&self, var: VarId) -> Option<bool> {
        self.literals
            .iter()
            .find(|l| l.var == var)
            .map(|l| l.polarity)
    }
}

/// A disjunction of cubes (a sum-of-products cover).
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Cover {
    pub cubes: Vec<Cube>,
}

impl Cover {
    pub fn new(cubes: Vec<Cube>) -> Self {
        Cover { cubes }
    }

    pub fn empty() -> Self {
        Cover::default()
    }

    pub fn is_empty(&self) -> bool {
        self.cubes.is_empty()
    }
}

/// A logic expression tree: the minimal AST `expr_to_bdd` consumes,
/// mirroring `LogExpr`'s constant / literal / and / or / xor / not
/// constructors. Parsing expressions
/// from text is out of scope — clients build an `Expr` directly or via
/// [`Cover::into_expr`].
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Expr {
    Zero,
    One,
    Literal(Literal),
    Not(Box<Expr>),
    And(Vec<Expr>),
    Or(Vec<Expr>),
    Xor(Box<Expr>, Box<Expr>),
}

impl Cover {
    /// Realize this cover as a sum-of-products `Expr` (an `Or` of
    /// `And`s of `Literal`s).
    pub fn into_expr(self) -> Expr {
        if self.cubes.is_empty() {
            return Expr::Zero;
        }
        Expr::Or(
            self.cubes
                .into_iter()
                .map(|cube| {
                    if cube.literals.is_empty() {
                        Expr::One
                    } else {
                        Expr::And(cube.literals.into_iter().map(Expr::Literal).collect())
                    }
                })
                .collect(),
        )
    }
}

/// How `expr_to_bdd` should replace the literals it encounters,
/// mirroring `BddMgr::expr_to_bdd`'s `VarVarMap`/`VarBddMap` overloads.
/// A variable with no entry is left as its own positive/negative
/// literal, per the original's "varmap に登録されていないリテラルはそのまま使う"
/// ("a literal not registered in varmap is used as-is").
#[derive(Clone, Debug, Default)]
pub enum Substitution {
    /// No substitution: every literal maps to its own variable.
    #[default]
    Identity,
    /// Replace each key variable with another variable (keeping the
    /// literal's own polarity).
    VarToVar(FxHashMap<VarId, VarId>),
    /// Replace each key variable with an arbitrary edge (the literal's
    /// polarity is applied to that edge via [`Edge::with_polarity`]).
    VarToEdge(FxHashMap<VarId, Edge>),
}

impl Substitution {
    pub fn var_to_var(map: FxHashMap<VarId, VarId>) -> Self {
        Substitution::VarToVar(map)
    }

    pub fn var_to_edge(map: FxHashMap<VarId, Edge>) -> Self {
        Substitution::VarToEdge(map)
    }
}
