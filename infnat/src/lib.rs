//! A symbolic simplifier for numeric constraints over the extended naturals.
//!
//! The extended naturals are the natural numbers together with a single infinity element. This
//! crate normalizes and partially decides propositions such as `fin x`, `x == y` and `x >= y`
//! where both sides are symbolic arithmetic expressions over the extended naturals, as they
//! arise in a type checker for size-indexed types (bit-vector widths, sequence lengths).
//!
//! Every rewrite is sound, and the normal form of a proposition is either a decided `True` or
//! `False`, or a combination of atoms an external decision procedure for purely finite
//! arithmetic can consume: `fin` of a variable, comparisons with zero, and the strict (finite)
//! comparisons `:==:` and `:>:`.

#![deny(clippy::disallowed_methods)]
#![deny(clippy::self_named_module_files)]
#![deny(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::branches_sharing_code)]
#![warn(clippy::cloned_instead_of_copied)]
#![warn(clippy::copy_iterator)]
#![warn(clippy::dbg_macro)]
#![warn(clippy::doc_markdown)]
#![warn(clippy::equatable_if_let)]
#![warn(clippy::explicit_into_iter_loop)]
#![warn(clippy::explicit_iter_loop)]
#![warn(clippy::from_iter_instead_of_collect)]
#![warn(clippy::get_unwrap)]
#![warn(clippy::if_not_else)]
#![warn(clippy::implicit_clone)]
#![warn(clippy::inconsistent_struct_constructor)]
#![warn(clippy::index_refutable_slice)]
#![warn(clippy::inefficient_to_string)]
#![warn(clippy::items_after_statements)]
#![warn(clippy::large_types_passed_by_value)]
#![warn(clippy::manual_assert)]
#![warn(clippy::manual_ok_or)]
#![warn(clippy::map_unwrap_or)]
#![warn(clippy::match_wildcard_for_single_variants)]
#![warn(clippy::mixed_read_write_in_expression)]
#![warn(clippy::redundant_closure_for_method_calls)]
#![warn(clippy::redundant_pub_crate)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![warn(clippy::str_to_string)]
#![warn(clippy::string_to_string)]
#![warn(clippy::trivially_copy_pass_by_ref)]
#![warn(clippy::unnecessary_wraps)]
#![warn(clippy::unnested_or_patterns)]
#![warn(clippy::unused_self)]

#[macro_use]
pub mod ast;
pub mod parser;
pub mod simp;

pub use simp::{defined, is_eq, is_gt, nat_op, no_inf, simp_step, simp_steps, simplify, IfExpr};

use parser::{ParserError, Position};
use thiserror::Error;

pub type InfNatResult<T> = Result<T, Error>;

fn wrap_parser_error_message(e: &ParserError, pos: &Position) -> String {
    format!("parser error: {} (on line {}, column {})", e, pos.0, pos.1)
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("{}", wrap_parser_error_message(.0, .1))]
    Parser(ParserError, Position),
}
