//! The types for parser errors.

use crate::parser::Token;
use thiserror::Error;

/// The error type for the parser.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParserError {
    /// The lexer encountered an unexpected character.
    #[error("unexpected character: '{0}'")]
    UnexpectedChar(char),

    /// The lexer encountered a numeral with a leading zero, e.g. `0123`.
    #[error("leading zero in numeral '{0}'")]
    LeadingZero(String),

    /// The parser encountered an unexpected token.
    #[error("unexpected token: '{0}'")]
    UnexpectedToken(Token),

    /// The parser expected a comparison operator.
    #[error("expected a comparison operator, got '{0}'")]
    ExpectedComparison(Token),

    /// The parser encountered an identifier that is neither an operator nor a well-formed
    /// variable name.
    #[error("identifier '{0}' is not defined")]
    UndefinedIden(String),
}
