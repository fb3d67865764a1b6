//! The abstract syntax for numeric constraints over the extended naturals.
//!
//! This module defines the extended naturals themselves, symbolic expressions and propositions
//! over them, their evaluation under total assignments, and the canonical printed form.

#[macro_use]
mod macros;
mod evaluate;
mod printer;
mod term;

pub use evaluate::Assignment;
pub use term::{Expr, ExtNat, Name, Op, Prop};
