//! The local, one-step simplification rules.
//!
//! Each rule inspects a specific syntactic shape and either returns a rewritten proposition or
//! reports that no rule fires; the driver in the parent module handles congruence. The rules for
//! `fin` and `== 0` are the only places where infinity interacts with finite arithmetic, so
//! their case tables enumerate every operator.

use super::no_inf::nat_op;
use crate::ast::{Expr, ExtNat, Name, Op, Prop};

fn fin(e: &Expr) -> Prop {
    Prop::fin(e.clone())
}

fn eq_zero(e: &Expr) -> Prop {
    Prop::eq(e.clone(), Expr::zero())
}

fn eq_one(e: &Expr) -> Prop {
    Prop::eq(e.clone(), Expr::one())
}

fn eq_inf(e: &Expr) -> Prop {
    Prop::eq(e.clone(), Expr::inf())
}

/// Decides or rewrites `expr == 0`. Returns `None` when no rule applies, which happens only for
/// variables and `mod` terms.
pub fn is_zero(expr: &Expr) -> Option<Prop> {
    match expr {
        Expr::K(ExtNat::Inf) => Some(Prop::False),
        Expr::K(ExtNat::Nat(n)) => Some(Prop::bool(*n == 0)),
        Expr::Var(_) => None,
        Expr::Op(op, args) => match (op, args.as_slice()) {
            (Op::Add, [a, b]) => Some(eq_zero(a).and(eq_zero(b))),
            (Op::Sub, [a, b]) => Some(Prop::eq(a.clone(), b.clone())),
            (Op::Mul, [a, b]) => Some(eq_zero(a).or(eq_zero(b))),
            (Op::Div, [a, b]) => Some(Prop::gt(b.clone(), a.clone())),
            (Op::Mod, _) => None,
            (Op::Exp, [a, b]) => Some(eq_zero(a).and(Prop::gt(b.clone(), Expr::zero()))),
            (Op::Min, [a, b]) => Some(eq_zero(a).or(eq_zero(b))),
            (Op::Max, [a, b]) => Some(eq_zero(a).and(eq_zero(b))),
            (Op::Lg2, [a]) => Some(eq_zero(a).or(eq_one(a))),
            (Op::Width, [a]) => Some(eq_zero(a)),
            (Op::LenFromThen, [x, y, w]) => {
                Some(eq_zero(w).or(Prop::gt(x.clone(), y.clone())))
            }
            (Op::LenFromThenTo, [x, y, z]) => Some(
                Prop::gt(x.clone(), y.clone())
                    .and(Prop::gt(z.clone(), x.clone()))
                    .or(Prop::gt(y.clone(), x.clone()).and(Prop::gt(x.clone(), z.clone()))),
            ),
            _ => unreachable!("operator applied to wrong number of arguments"),
        },
    }
}

/// Decides or rewrites `fin expr`. Returns `None` only for variables, which are exactly the
/// atoms the propagation rule of [`step_and`] tracks.
pub fn is_fin(expr: &Expr) -> Option<Prop> {
    match expr {
        Expr::K(k) => Some(Prop::bool(!k.is_inf())),
        Expr::Var(_) => None,
        Expr::Op(op, args) => match (op, args.as_slice()) {
            (Op::Add, [a, b]) => Some(fin(a).and(fin(b))),
            (Op::Sub, [a, _]) => Some(fin(a)),
            (Op::Mul, [a, b]) => Some(
                fin(a)
                    .and(fin(b))
                    .or(eq_zero(a).and(eq_inf(b)).or(eq_zero(b).and(eq_inf(a)))),
            ),
            (Op::Div, [a, _]) => Some(fin(a)),
            (Op::Mod, _) => Some(Prop::True),
            (Op::Exp, [a, b]) => Some(
                fin(a).and(fin(b)).or(eq_inf(a)
                    .and(eq_zero(b))
                    .or(eq_inf(b).and(eq_zero(a).or(eq_one(a))))),
            ),
            (Op::Min, [a, b]) => Some(fin(a).or(fin(b))),
            (Op::Max, [a, b]) => Some(fin(a).and(fin(b))),
            (Op::Lg2 | Op::Width, [a]) => Some(fin(a)),
            (Op::LenFromThen | Op::LenFromThenTo, _) => Some(Prop::True),
            _ => unreachable!("operator applied to wrong number of arguments"),
        },
    }
}

/// Decides or rewrites `x == y` over the extended naturals.
///
/// A zero side delegates to [`is_zero`] (whose failure propagates), an infinity side turns into
/// a finiteness assertion, and the general case splits on whether both sides are finite, with
/// the finite branch handed to [`nat_op`].
pub fn is_eq(x: &Expr, y: &Expr) -> Option<Prop> {
    if let (Some(a), Some(b)) = (x.as_const(), y.as_const()) {
        return Some(Prop::bool(a == b));
    }
    if x.is_zero() {
        is_zero(y)
    } else if y.is_zero() {
        is_zero(x)
    } else if x.is_inf() {
        Some(!fin(y))
    } else if y.is_inf() {
        Some(!fin(x))
    } else {
        Some(
            (!fin(x))
                .and(!fin(y))
                .or(fin(x).and(fin(y).and(nat_op(Prop::eq_fin, x, y)))),
        )
    }
}

/// Rewrites `x > y` over the extended naturals. Always succeeds.
pub fn is_gt(x: &Expr, y: &Expr) -> Prop {
    if let (Some(a), Some(b)) = (x.as_const(), y.as_const()) {
        return Prop::bool(a > b);
    }
    if y.is_zero() {
        !eq_zero(x)
    } else {
        fin(y).and(eq_inf(x).or(fin(x).and(nat_op(Prop::gt_fin, x, y))))
    }
}

/// Rewrites `x >= y` over the extended naturals. Always succeeds: the residual general case
/// splits into the equality and the strict ordering, which the other rules then eliminate.
pub fn is_geq(x: &Expr, y: &Expr) -> Prop {
    if let (Some(a), Some(b)) = (x.as_const(), y.as_const()) {
        return Prop::bool(a >= b);
    }
    if x.is_zero() {
        eq_zero(y)
    } else if x.is_inf() || y.is_zero() {
        Prop::True
    } else if y.is_inf() {
        eq_inf(x)
    } else {
        Prop::eq(x.clone(), y.clone()).or(Prop::gt(x.clone(), y.clone()))
    }
}

/// One step of negation pushing, given the body of the negation. Decides negated constants,
/// cancels double negation, applies De Morgan, and flips comparisons. Negated `fin` atoms,
/// negated infinity-free equalities and negated strict atoms are left alone.
pub fn step_not(prop: &Prop) -> Option<Prop> {
    match prop {
        Prop::True => Some(Prop::False),
        Prop::False => Some(Prop::True),
        Prop::Not(p) => Some((**p).clone()),
        Prop::And(p, q) => Some((!(**p).clone()).or(!(**q).clone())),
        Prop::Or(p, q) => Some((!(**p).clone()).and(!(**q).clone())),
        Prop::Geq(x, y) => Some(Prop::gt(y.clone(), x.clone())),
        Prop::Gt(x, y) => Some(Prop::geq(y.clone(), x.clone())),
        Prop::Eq(x, y) if y.is_inf() => Some(Prop::fin(x.clone())),
        Prop::Eq(x, y) if x.is_inf() => Some(Prop::fin(y.clone())),
        _ => None,
    }
}

/// One step of conjunction simplification: constant operands, right-reassociation of a nested
/// conjunction on the left, and propagation of variable finiteness into the sibling operand.
pub fn step_and(left: &Prop, right: &Prop) -> Option<Prop> {
    match (left, right) {
        (Prop::True, q) => Some(q.clone()),
        (Prop::False, _) | (_, Prop::False) => Some(Prop::False),
        (p, Prop::True) => Some(p.clone()),
        (Prop::And(p1, p2), q) => Some((**p1).clone().and((**p2).clone().and(q.clone()))),
        _ => {
            if let Some((name, value)) = as_fin_atom(left) {
                if let Some(rewritten) = subst_fin(right, name, value) {
                    return Some(left.clone().and(rewritten));
                }
            }
            if let Some((name, value)) = as_fin_atom(right) {
                if let Some(rewritten) = subst_fin(left, name, value) {
                    return Some(rewritten.and(right.clone()));
                }
            }
            None
        }
    }
}

/// One step of disjunction simplification: constant operands only.
pub fn step_or(left: &Prop, right: &Prop) -> Option<Prop> {
    match (left, right) {
        (Prop::False, q) => Some(q.clone()),
        (Prop::True, _) | (_, Prop::True) => Some(Prop::True),
        (p, Prop::False) => Some(p.clone()),
        _ => None,
    }
}

/// Recognizes the atoms `fin x` and `not (fin x)` over a variable, returning the variable and
/// the truth value the atom asserts for its own finiteness.
fn as_fin_atom(prop: &Prop) -> Option<(Name, bool)> {
    match prop {
        Prop::Fin(Expr::Var(x)) => Some((*x, true)),
        Prop::Not(p) => match &**p {
            Prop::Fin(Expr::Var(x)) => Some((*x, false)),
            _ => None,
        },
        _ => None,
    }
}

/// Rewrites every occurrence of `fin name` in `prop` to the given constant, descending through
/// connectives only. Returns `None` if there was no occurrence to rewrite.
fn subst_fin(prop: &Prop, name: Name, value: bool) -> Option<Prop> {
    match prop {
        Prop::Fin(Expr::Var(x)) if *x == name => Some(Prop::bool(value)),
        Prop::Not(p) => Some(!subst_fin(p, name, value)?),
        Prop::And(p, q) => match (subst_fin(p, name, value), subst_fin(q, name, value)) {
            (None, None) => None,
            (new_p, new_q) => Some(
                new_p
                    .unwrap_or_else(|| (**p).clone())
                    .and(new_q.unwrap_or_else(|| (**q).clone())),
            ),
        },
        Prop::Or(p, q) => match (subst_fin(p, name, value), subst_fin(q, name, value)) {
            (None, None) => None,
            (new_p, new_q) => Some(
                new_p
                    .unwrap_or_else(|| (**p).clone())
                    .or(new_q.unwrap_or_else(|| (**q).clone())),
            ),
        },
        _ => None,
    }
}
