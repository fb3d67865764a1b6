//! The simplification driver.
//!
//! [`simp_step`] performs one leftmost-outermost rewrite, [`simp_steps`] lazily yields the full
//! trace of intermediate forms, and [`simplify`] iterates to the fixpoint.

mod defined;
mod no_inf;
mod rules;

pub use defined::defined;
pub use no_inf::{nat_op, no_inf, to_prop, IfExpr};
pub use rules::{is_eq, is_gt};

use crate::ast::Prop;
use indexmap::IndexSet;

/// Performs one simplification step, or returns `None` when the proposition is in normal form.
///
/// The strategy is leftmost-outermost: the rule for the head operator is attempted first, then
/// the left child, then the right child. The strict comparisons are always fixed points; they
/// belong to the external decision procedure.
pub fn simp_step(prop: &Prop) -> Option<Prop> {
    match prop {
        Prop::True | Prop::False | Prop::EqFin(..) | Prop::GtFin(..) => None,
        Prop::Fin(e) => rules::is_fin(e),
        Prop::Eq(x, y) => rules::is_eq(x, y),
        Prop::Geq(x, y) => Some(rules::is_geq(x, y)),
        Prop::Gt(x, y) => Some(rules::is_gt(x, y)),
        Prop::Not(p) => rules::step_not(p).or_else(|| Some(!simp_step(p)?)),
        Prop::And(p, q) => rules::step_and(p, q)
            .or_else(|| Some(simp_step(p)?.and((**q).clone())))
            .or_else(|| Some((**p).clone().and(simp_step(q)?))),
        Prop::Or(p, q) => rules::step_or(p, q)
            .or_else(|| Some(simp_step(p)?.or((**q).clone())))
            .or_else(|| Some((**p).clone().or(simp_step(q)?))),
    }
}

/// The lazy sequence of intermediate forms: the input itself, then the result of each step,
/// ending with the normal form.
pub fn simp_steps(prop: Prop) -> impl Iterator<Item = Prop> {
    std::iter::successors(Some(prop), |current| simp_step(current))
}

/// Simplifies a proposition to its normal form.
///
/// Simplification has no formal termination measure, so a step cap quadratic in the input size
/// is enforced, and forms already visited are tracked; exhausting either is a bug in the rule
/// set and panics with the offending proposition.
pub fn simplify(prop: Prop) -> Prop {
    let cap = step_cap(&prop);
    let mut seen = IndexSet::new();
    let mut current = prop;
    for _ in 0..cap {
        if !seen.insert(current.clone()) {
            panic!("cycle while simplifying: {}", current);
        }
        match simp_step(&current) {
            Some(next) => current = next,
            None => return current,
        }
    }
    panic!("step cap ({}) exhausted while simplifying: {}", cap, current);
}

fn step_cap(prop: &Prop) -> usize {
    let size = prop.size();
    64 * (size + 4) * (size + 4)
}
