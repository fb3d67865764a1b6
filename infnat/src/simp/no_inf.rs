//! Infinity elimination.
//!
//! [`no_inf`] lifts every occurrence of infinity out of an expression, producing a decision
//! tree whose branch predicates are strict comparisons on finite subexpressions. [`nat_op`]
//! collapses two such trees into a proposition whose strict atoms never mention infinity, which
//! is the form an external finite decision procedure can consume.

use crate::ast::{Expr, Op, Prop};

/// A decision tree produced during infinity elimination.
///
/// A `Return` leaf is either entirely free of infinity or the literal infinity constant (a
/// branch whose value is wholly infinite); an `Impossible` leaf marks a branch excluded because
/// a subterm that must be finite would have to be infinite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IfExpr<T> {
    /// A case split on a proposition.
    If(Prop, Box<IfExpr<T>>, Box<IfExpr<T>>),

    /// A leaf value.
    Return(T),

    /// A semantically excluded branch.
    Impossible,
}

impl<T> IfExpr<T> {
    /// Sequential composition: applies `f` to every leaf value. `Impossible` is absorbing.
    pub fn and_then<U, F: Fn(T) -> IfExpr<U>>(self, f: F) -> IfExpr<U> {
        self.bind(&f)
    }

    fn bind<U, F: Fn(T) -> IfExpr<U>>(self, f: &F) -> IfExpr<U> {
        match self {
            IfExpr::Impossible => IfExpr::Impossible,
            IfExpr::Return(value) => f(value),
            IfExpr::If(cond, then, els) => {
                IfExpr::If(cond, Box::new(then.bind(f)), Box::new(els.bind(f)))
            }
        }
    }

    /// The values of all `Return` leaves, left to right.
    pub fn return_leaves(&self) -> Vec<&T> {
        let mut leaves = Vec::new();
        self.collect_leaves(&mut leaves);
        leaves
    }

    fn collect_leaves<'a>(&'a self, leaves: &mut Vec<&'a T>) {
        match self {
            IfExpr::Impossible => (),
            IfExpr::Return(value) => leaves.push(value),
            IfExpr::If(_, then, els) => {
                then.collect_leaves(leaves);
                els.collect_leaves(leaves);
            }
        }
    }
}

/// Collapses a decision tree over propositions into a single proposition.
pub fn to_prop(tree: IfExpr<Prop>) -> Prop {
    match tree {
        IfExpr::Impossible => Prop::False,
        IfExpr::Return(prop) => prop,
        IfExpr::If(cond, then, els) => {
            let then = to_prop(*then);
            let els = to_prop(*els);
            cond.clone().and(then).or((!cond).and(els))
        }
    }
}

/// Builds the decision tree for an expression, lifting infinity out of every subexpression.
/// Children are eliminated first and their trees composed monadically.
pub fn no_inf(expr: &Expr) -> IfExpr<Expr> {
    match expr {
        Expr::K(_) | Expr::Var(_) => IfExpr::Return(expr.clone()),
        Expr::Op(op, args) => {
            let op = *op;
            match args.as_slice() {
                [x] => no_inf(x).and_then(move |x| lift_unary(op, x)),
                [x, y] => no_inf(x)
                    .and_then(move |x| no_inf(y).and_then(move |y| lift_binary(op, x.clone(), y))),
                [x, y, z] => no_inf(x).and_then(move |x| {
                    no_inf(y).and_then(move |y| {
                        let x = x.clone();
                        no_inf(z).and_then(move |z| {
                            lift_ternary(op, x.clone(), y.clone(), z)
                        })
                    })
                }),
                _ => unreachable!("operator applied to wrong number of arguments"),
            }
        }
    }
}

fn lift_unary(op: Op, x: Expr) -> IfExpr<Expr> {
    if x.is_inf() {
        IfExpr::Return(Expr::inf())
    } else {
        IfExpr::Return(Expr::Op(op, vec![x]))
    }
}

fn lift_binary(op: Op, x: Expr, y: Expr) -> IfExpr<Expr> {
    use IfExpr::{Impossible, Return};

    match op {
        Op::Add | Op::Max => {
            if x.is_inf() || y.is_inf() {
                Return(Expr::inf())
            } else {
                Return(Expr::Op(op, vec![x, y]))
            }
        }
        Op::Sub => {
            if y.is_inf() {
                Impossible
            } else if x.is_inf() {
                Return(Expr::inf())
            } else {
                Return(Expr::Op(op, vec![x, y]))
            }
        }
        Op::Div => {
            if x.is_inf() {
                Impossible
            } else if y.is_inf() {
                Return(Expr::zero())
            } else {
                Return(Expr::Op(op, vec![x, y]))
            }
        }
        Op::Mod => {
            if x.is_inf() {
                Impossible
            } else if y.is_inf() {
                Return(x)
            } else {
                Return(Expr::Op(op, vec![x, y]))
            }
        }
        Op::Min => {
            if x.is_inf() {
                Return(y)
            } else if y.is_inf() {
                Return(x)
            } else {
                Return(Expr::Op(op, vec![x, y]))
            }
        }
        Op::Mul => match (x.is_inf(), y.is_inf()) {
            (true, true) => Return(Expr::inf()),
            (true, false) => branch_on_zero(y, Expr::zero()),
            (false, true) => branch_on_zero(x, Expr::zero()),
            (false, false) => Return(Expr::Op(op, vec![x, y])),
        },
        Op::Exp => match (x.is_inf(), y.is_inf()) {
            (true, true) => Return(Expr::inf()),
            // An infinite base: the result is one exactly when the exponent is zero
            (true, false) => branch_on_zero(y, Expr::one()),
            // An infinite exponent: a base of zero or one is preserved, anything else blows up
            (false, true) => IfExpr::If(
                Prop::eq_fin(x.clone(), Expr::zero()),
                Box::new(Return(Expr::zero())),
                Box::new(IfExpr::If(
                    Prop::eq_fin(x, Expr::one()),
                    Box::new(Return(Expr::one())),
                    Box::new(Return(Expr::inf())),
                )),
            ),
            (false, false) => Return(Expr::Op(op, vec![x, y])),
        },
        _ => unreachable!("not a binary operator: {}", op),
    }
}

/// Splits on `finite :==: 0`, yielding `zero_case` when it holds and infinity otherwise.
fn branch_on_zero(finite: Expr, zero_case: Expr) -> IfExpr<Expr> {
    IfExpr::If(
        Prop::eq_fin(finite, Expr::zero()),
        Box::new(IfExpr::Return(zero_case)),
        Box::new(IfExpr::Return(Expr::inf())),
    )
}

fn lift_ternary(op: Op, x: Expr, y: Expr, z: Expr) -> IfExpr<Expr> {
    match op {
        Op::LenFromThen | Op::LenFromThenTo => {
            if x.is_inf() || y.is_inf() || z.is_inf() {
                IfExpr::Impossible
            } else {
                IfExpr::Return(Expr::Op(op, vec![x, y, z]))
            }
        }
        _ => unreachable!("not a ternary operator: {}", op),
    }
}

/// The bridge from the extended-natural comparisons to the strict ones: eliminates infinity
/// from both sides, rejects the branches where either side is infinite, and collapses the tree.
/// The resulting proposition never mentions infinity.
pub fn nat_op(strict: fn(Expr, Expr) -> Prop, x: &Expr, y: &Expr) -> Prop {
    let tree = no_inf(x).and_then(|x| {
        no_inf(y).and_then(move |y| {
            if x.is_inf() || y.is_inf() {
                IfExpr::Impossible
            } else {
                IfExpr::Return(strict(x.clone(), y))
            }
        })
    });
    to_prop(tree)
}
