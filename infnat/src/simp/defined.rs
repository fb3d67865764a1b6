//! The well-definedness predicate.

use crate::ast::{Expr, Op, Prop};

/// Computes a proposition whose truth is a necessary condition for `expr` to denote a value
/// under every total assignment.
///
/// The conditions for each subterm are conjoined left to right, followed by the local side
/// conditions of the operator itself: no subtraction underflow or infinite subtrahend, no
/// division of an infinite value or by zero, and no enumeration with equal first elements. The
/// result is intended to be passed through [`simplify`](crate::simplify).
pub fn defined(expr: &Expr) -> Prop {
    match expr {
        Expr::K(_) | Expr::Var(_) => Prop::True,
        Expr::Op(op, args) => {
            let subterms = args
                .iter()
                .map(defined)
                .reduce(Prop::and)
                .unwrap_or(Prop::True);
            match (op, args.as_slice()) {
                (Op::Add | Op::Mul | Op::Exp | Op::Min | Op::Max, [_, _])
                | (Op::Lg2 | Op::Width, [_]) => subterms,
                (Op::Sub, [x, y]) => subterms
                    .and(Prop::fin(y.clone()))
                    .and(Prop::geq(x.clone(), y.clone())),
                (Op::Div | Op::Mod, [x, y]) => subterms
                    .and(Prop::fin(x.clone()))
                    .and(!Prop::eq(y.clone(), Expr::zero())),
                (Op::LenFromThen | Op::LenFromThenTo, [x, y, z]) => subterms
                    .and(Prop::fin(x.clone()))
                    .and(Prop::fin(y.clone()))
                    .and(Prop::fin(z.clone()))
                    .and(!Prop::eq(x.clone(), y.clone())),
                _ => unreachable!("operator applied to wrong number of arguments"),
            }
        }
    }
}
