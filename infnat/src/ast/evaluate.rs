//! Evaluation of expressions and propositions under a total variable assignment.
//!
//! Evaluation is the reference semantics used by the randomized tests: every rewrite the
//! simplifier performs must preserve it wherever it is defined.

use super::{Expr, ExtNat, Name, Op, Prop};
use std::collections::HashMap;

/// A total assignment of extended naturals to variable names.
pub type Assignment = HashMap<Name, ExtNat>;

impl Expr {
    /// Evaluates the expression under `env`. Returns `None` if the expression is undefined (a
    /// division by zero, a subtraction underflow, a same-endpoint enumeration) or mentions a
    /// variable missing from the assignment.
    pub fn evaluate(&self, env: &Assignment) -> Option<ExtNat> {
        match self {
            Expr::K(k) => Some(k.clone()),
            Expr::Var(name) => env.get(name).cloned(),
            Expr::Op(op, args) => {
                let mut values = Vec::with_capacity(args.len());
                for a in args {
                    values.push(a.evaluate(env)?);
                }
                match (op, values.as_slice()) {
                    (Op::Add, [x, y]) => Some(x.add(y)),
                    (Op::Sub, [x, y]) => x.sub(y),
                    (Op::Mul, [x, y]) => Some(x.mul(y)),
                    (Op::Exp, [x, y]) => x.exp(y),
                    (Op::Div, [x, y]) => x.div(y),
                    (Op::Mod, [x, y]) => x.modulo(y),
                    (Op::Lg2, [x]) => Some(x.lg2()),
                    (Op::Width, [x]) => Some(x.width()),
                    (Op::Min, [x, y]) => Some(x.clone().min(y.clone())),
                    (Op::Max, [x, y]) => Some(x.clone().max(y.clone())),
                    (Op::LenFromThen, [x, y, w]) => ExtNat::len_from_then(x, y, w),
                    (Op::LenFromThenTo, [x, y, z]) => ExtNat::len_from_then_to(x, y, z),
                    _ => unreachable!("operator applied to wrong number of arguments"),
                }
            }
        }
    }
}

impl Prop {
    /// Evaluates the proposition under `env` in a three-valued (Kleene) semantics: a conjunction
    /// with a false operand is false even if the other operand is undefined, and dually for
    /// disjunction. The strict atoms are undefined whenever either side is infinite.
    pub fn evaluate(&self, env: &Assignment) -> Option<bool> {
        match self {
            Prop::True => Some(true),
            Prop::False => Some(false),
            Prop::Fin(e) => Some(!e.evaluate(env)?.is_inf()),
            Prop::Eq(x, y) => Some(x.evaluate(env)? == y.evaluate(env)?),
            Prop::Geq(x, y) => Some(x.evaluate(env)? >= y.evaluate(env)?),
            Prop::Gt(x, y) => Some(x.evaluate(env)? > y.evaluate(env)?),
            Prop::EqFin(x, y) => {
                let (x, y) = (x.evaluate(env)?, y.evaluate(env)?);
                match (x.as_nat(), y.as_nat()) {
                    (Some(x), Some(y)) => Some(x == y),
                    _ => None,
                }
            }
            Prop::GtFin(x, y) => {
                let (x, y) = (x.evaluate(env)?, y.evaluate(env)?);
                match (x.as_nat(), y.as_nat()) {
                    (Some(x), Some(y)) => Some(x > y),
                    _ => None,
                }
            }
            Prop::Not(p) => Some(!p.evaluate(env)?),
            Prop::And(p, q) => match (p.evaluate(env), q.evaluate(env)) {
                (Some(false), _) | (_, Some(false)) => Some(false),
                (Some(true), Some(true)) => Some(true),
                _ => None,
            },
            Prop::Or(p, q) => match (p.evaluate(env), q.evaluate(env)) {
                (Some(true), _) | (_, Some(true)) => Some(true),
                (Some(false), Some(false)) => Some(false),
                _ => None,
            },
        }
    }
}
