//! A pretty printer for expressions and propositions.
//!
//! The printed form is deterministic, parenthesizes only when precedence requires it, and
//! round-trips through the parser. It is the canonical format used by the golden tests.

use super::{Expr, ExtNat, Name, Op, Prop};
use std::fmt;

impl fmt::Display for ExtNat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ExtNat::Nat(n) => write!(f, "{}", n),
            ExtNat::Inf => write!(f, "inf"),
        }
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // Names are drawn from the canonical stream `a, b, .., z, a1, b1, ..`
        let letter = (b'a' + (self.index() % 26) as u8) as char;
        match self.index() / 26 {
            0 => write!(f, "{}", letter),
            n => write!(f, "{}{}", letter, n),
        }
    }
}

// Precedence levels for expressions. Prefix applications bind tighter than any infix operator,
// and their arguments must be atoms.
const EXPR_ADD: u8 = 0;
const EXPR_MUL: u8 = 1;
const EXPR_EXP: u8 = 2;
const EXPR_APP: u8 = 3;
const EXPR_ATOM: u8 = 4;

// Precedence levels for propositions. `fin` and `not` take atom-level arguments.
const PROP_OR: u8 = 0;
const PROP_AND: u8 = 1;
const PROP_CMP: u8 = 2;
const PROP_APP: u8 = 3;
const PROP_ATOM: u8 = 4;

fn write_expr(f: &mut fmt::Formatter, expr: &Expr, required: u8) -> fmt::Result {
    match expr {
        Expr::K(k) => write!(f, "{}", k),
        Expr::Var(name) => write!(f, "{}", name),
        Expr::Op(op, args) => {
            let prec = match op {
                Op::Add | Op::Sub => EXPR_ADD,
                Op::Mul => EXPR_MUL,
                Op::Exp => EXPR_EXP,
                _ => EXPR_APP,
            };
            let parens = required > prec;
            if parens {
                write!(f, "(")?;
            }
            if op.is_prefix() {
                write!(f, "{}", op)?;
                for a in args {
                    write!(f, " ")?;
                    write_expr(f, a, EXPR_ATOM)?;
                }
            } else {
                // `^^` is right-associative, `+`, `-` and `*` are left-associative
                let (left_req, right_req) = match op {
                    Op::Exp => (prec + 1, prec),
                    _ => (prec, prec + 1),
                };
                write_expr(f, &args[0], left_req)?;
                write!(f, " {} ", op)?;
                write_expr(f, &args[1], right_req)?;
            }
            if parens {
                write!(f, ")")?;
            }
            Ok(())
        }
    }
}

fn write_prop(f: &mut fmt::Formatter, prop: &Prop, required: u8) -> fmt::Result {
    let prec = match prop {
        Prop::True | Prop::False => PROP_ATOM,
        Prop::Fin(_) | Prop::Not(_) => PROP_APP,
        Prop::Eq(..) | Prop::Geq(..) | Prop::Gt(..) | Prop::EqFin(..) | Prop::GtFin(..) => {
            PROP_CMP
        }
        Prop::And(..) => PROP_AND,
        Prop::Or(..) => PROP_OR,
    };
    let parens = required > prec;
    if parens {
        write!(f, "(")?;
    }
    match prop {
        Prop::True => write!(f, "True")?,
        Prop::False => write!(f, "False")?,
        Prop::Fin(e) => {
            write!(f, "fin ")?;
            write_expr(f, e, EXPR_ATOM)?;
        }
        Prop::Not(p) => {
            write!(f, "not ")?;
            write_prop(f, p, PROP_ATOM)?;
        }
        Prop::Eq(x, y) => write_comparison(f, "==", x, y)?,
        Prop::Geq(x, y) => write_comparison(f, ">=", x, y)?,
        Prop::Gt(x, y) => write_comparison(f, ">", x, y)?,
        Prop::EqFin(x, y) => write_comparison(f, ":==:", x, y)?,
        Prop::GtFin(x, y) => write_comparison(f, ":>:", x, y)?,
        Prop::And(p, q) => {
            // `&&` and `||` are both printed right-associatively
            write_prop(f, p, PROP_AND + 1)?;
            write!(f, " && ")?;
            write_prop(f, q, PROP_AND)?;
        }
        Prop::Or(p, q) => {
            write_prop(f, p, PROP_OR + 1)?;
            write!(f, " || ")?;
            write_prop(f, q, PROP_OR)?;
        }
    }
    if parens {
        write!(f, ")")?;
    }
    Ok(())
}

fn write_comparison(f: &mut fmt::Formatter, op: &str, x: &Expr, y: &Expr) -> fmt::Result {
    write_expr(f, x, EXPR_ADD)?;
    write!(f, " {} ", op)?;
    write_expr(f, y, EXPR_ADD)
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_expr(f, self, EXPR_ADD)
    }
}

impl fmt::Display for Prop {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_prop(f, self, PROP_OR)
    }
}
