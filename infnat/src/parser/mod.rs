//! A parser for the textual form of expressions and propositions, as produced by the printer.

mod error;
mod lexer;
#[cfg(test)]
pub(crate) mod tests;

pub use error::ParserError;
pub use lexer::{Lexer, Position, Token};

use crate::ast::{Expr, ExtNat, Name, Op, Prop};
use crate::{Error, InfNatResult};
use std::str::FromStr;

/// Parses a proposition from its textual form, requiring the whole input to be consumed.
pub fn parse_prop(input: &str) -> InfNatResult<Prop> {
    let mut parser = Parser::new(input)?;
    let prop = parser.parse_prop()?;
    parser.expect(Token::Eof)?;
    Ok(prop)
}

/// Parses an expression from its textual form, requiring the whole input to be consumed.
pub fn parse_expr(input: &str) -> InfNatResult<Expr> {
    let mut parser = Parser::new(input)?;
    let expr = parser.parse_expr()?;
    parser.expect(Token::Eof)?;
    Ok(expr)
}

/// A recursive descent parser over a pre-lexed token buffer. Buffering the tokens up front keeps
/// backtracking (needed to tell a parenthesized proposition from a parenthesized expression)
/// down to an index reset.
pub struct Parser {
    tokens: Vec<(Token, Position)>,
    index: usize,
}

impl Parser {
    /// Constructs a new `Parser` for the given input. This lexes the whole input and can fail
    /// with a lexer error.
    pub fn new(input: &str) -> InfNatResult<Self> {
        let mut lexer = Lexer::new(input);
        let mut tokens = Vec::new();
        loop {
            let (token, position) = lexer.next_token()?;
            let done = token == Token::Eof;
            tokens.push((token, position));
            if done {
                return Ok(Parser { tokens, index: 0 });
            }
        }
    }

    fn current(&self) -> &Token {
        &self.tokens[self.index].0
    }

    fn current_position(&self) -> Position {
        self.tokens[self.index].1
    }

    /// Advances the parser one token, and returns the previous current token.
    fn next_token(&mut self) -> Token {
        let token = self.tokens[self.index].0.clone();
        if self.index < self.tokens.len() - 1 {
            self.index += 1;
        }
        token
    }

    fn error(&self, e: ParserError) -> Error {
        Error::Parser(e, self.current_position())
    }

    fn expect(&mut self, expected: Token) -> InfNatResult<()> {
        if *self.current() == expected {
            self.next_token();
            Ok(())
        } else {
            Err(self.error(ParserError::UnexpectedToken(self.current().clone())))
        }
    }

    /// Parses a proposition: a `||`-chain of conjunctions. Both `&&` and `||` associate to the
    /// right.
    pub fn parse_prop(&mut self) -> InfNatResult<Prop> {
        let first = self.parse_and_operand()?;
        if *self.current() == Token::OrOr {
            self.next_token();
            let rest = self.parse_prop()?;
            Ok(first.or(rest))
        } else {
            Ok(first)
        }
    }

    fn parse_and_operand(&mut self) -> InfNatResult<Prop> {
        let first = self.parse_prop_atom()?;
        if *self.current() == Token::AndAnd {
            self.next_token();
            let rest = self.parse_and_operand()?;
            Ok(first.and(rest))
        } else {
            Ok(first)
        }
    }

    fn parse_prop_atom(&mut self) -> InfNatResult<Prop> {
        match self.current() {
            Token::Symbol(s) if s == "True" => {
                self.next_token();
                Ok(Prop::True)
            }
            Token::Symbol(s) if s == "False" => {
                self.next_token();
                Ok(Prop::False)
            }
            Token::Symbol(s) if s == "fin" => {
                self.next_token();
                Ok(Prop::Fin(self.parse_expr_atom()?))
            }
            Token::Symbol(s) if s == "not" => {
                self.next_token();
                Ok(!self.parse_prop_atom()?)
            }
            Token::OpenParen => {
                // A `(` can open either a parenthesized proposition or a parenthesized
                // expression on the left side of a comparison. Try the proposition reading
                // first, and fall back to the comparison reading on failure (or when the
                // parenthesized group is followed by more of an expression).
                let snapshot = self.index;
                self.next_token();
                if let Ok(prop) = self.parse_prop() {
                    if *self.current() == Token::CloseParen {
                        self.next_token();
                        if !self.starts_expr_continuation() {
                            return Ok(prop);
                        }
                    }
                }
                self.index = snapshot;
                self.parse_comparison()
            }
            _ => self.parse_comparison(),
        }
    }

    /// Returns `true` if the current token would extend a parenthesized group into a larger
    /// expression or comparison.
    fn starts_expr_continuation(&self) -> bool {
        matches!(
            self.current(),
            Token::Plus
                | Token::Minus
                | Token::Star
                | Token::Hat
                | Token::Eq
                | Token::Geq
                | Token::Gt
                | Token::EqFin
                | Token::GtFin
        )
    }

    fn parse_comparison(&mut self) -> InfNatResult<Prop> {
        let x = self.parse_expr()?;
        let build: fn(Expr, Expr) -> Prop = match self.current() {
            Token::Eq => Prop::eq,
            Token::Geq => Prop::geq,
            Token::Gt => Prop::gt,
            Token::EqFin => Prop::eq_fin,
            Token::GtFin => Prop::gt_fin,
            t => return Err(self.error(ParserError::ExpectedComparison(t.clone()))),
        };
        self.next_token();
        let y = self.parse_expr()?;
        Ok(build(x, y))
    }

    /// Parses an expression: a chain of `+` and `-` over products, associating to the left.
    pub fn parse_expr(&mut self) -> InfNatResult<Expr> {
        let mut result = self.parse_mul_operand()?;
        loop {
            let op = match self.current() {
                Token::Plus => Op::Add,
                Token::Minus => Op::Sub,
                _ => return Ok(result),
            };
            self.next_token();
            let rhs = self.parse_mul_operand()?;
            result = Expr::Op(op, vec![result, rhs]);
        }
    }

    fn parse_mul_operand(&mut self) -> InfNatResult<Expr> {
        let mut result = self.parse_exp_operand()?;
        while *self.current() == Token::Star {
            self.next_token();
            let rhs = self.parse_exp_operand()?;
            result = Expr::Op(Op::Mul, vec![result, rhs]);
        }
        Ok(result)
    }

    fn parse_exp_operand(&mut self) -> InfNatResult<Expr> {
        let base = self.parse_expr_atom()?;
        if *self.current() == Token::Hat {
            self.next_token();
            // `^^` associates to the right
            let exponent = self.parse_exp_operand()?;
            Ok(Expr::Op(Op::Exp, vec![base, exponent]))
        } else {
            Ok(base)
        }
    }

    fn parse_expr_atom(&mut self) -> InfNatResult<Expr> {
        match self.current().clone() {
            Token::Numeral(n) => {
                self.next_token();
                Ok(Expr::K(ExtNat::Nat(n)))
            }
            Token::Symbol(s) if s == "inf" => {
                self.next_token();
                Ok(Expr::inf())
            }
            Token::Symbol(s) => {
                if let Ok(op) = Op::from_str(&s) {
                    self.next_token();
                    let mut args = Vec::with_capacity(op.arity());
                    for _ in 0..op.arity() {
                        args.push(self.parse_expr_atom()?);
                    }
                    Ok(Expr::Op(op, args))
                } else {
                    let name = self
                        .variable_name(&s)
                        .ok_or_else(|| self.error(ParserError::UndefinedIden(s.clone())))?;
                    self.next_token();
                    Ok(Expr::Var(name))
                }
            }
            Token::OpenParen => {
                self.next_token();
                let expr = self.parse_expr()?;
                self.expect(Token::CloseParen)?;
                Ok(expr)
            }
            t => Err(self.error(ParserError::UnexpectedToken(t))),
        }
    }

    /// Resolves a symbol to a variable name: a lowercase letter optionally followed by a decimal
    /// suffix, inverting the canonical name stream (`a` is 0, `z` is 25, `a1` is 26, ..).
    fn variable_name(&self, symbol: &str) -> Option<Name> {
        let mut chars = symbol.chars();
        let letter = chars.next()?;
        if !letter.is_ascii_lowercase() {
            return None;
        }
        let suffix = chars.as_str();
        let row = if suffix.is_empty() {
            0
        } else {
            if suffix.starts_with('0') {
                return None;
            }
            suffix.parse::<u32>().ok()?
        };
        let index = row.checked_mul(26)?.checked_add(letter as u32 - 'a' as u32)?;
        Some(Name::new(index))
    }
}
