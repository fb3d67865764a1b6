//! Helper functions and unit tests for the parser.

use crate::ast::{Expr, Prop};
use crate::parser::{Lexer, ParserError, Token};
use crate::Error;

/// Parses a proposition, panicking on failure. Intended for tests only.
pub(crate) fn parse_prop(input: &str) -> Prop {
    crate::parser::parse_prop(input)
        .unwrap_or_else(|e| panic!("parser error on {:?}: {}", input, e))
}

/// Parses an expression, panicking on failure. Intended for tests only.
pub(crate) fn parse_expr(input: &str) -> Expr {
    crate::parser::parse_expr(input)
        .unwrap_or_else(|e| panic!("parser error on {:?}: {}", input, e))
}

fn lex_all(input: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();
    loop {
        let (token, _) = lexer.next_token().expect("lexer error");
        if token == Token::Eof {
            return tokens;
        }
        tokens.push(token);
    }
}

#[test]
fn test_lexer() {
    use Token::*;

    assert_eq!(
        lex_all("(a + 10) * inf >= lg2 b13"),
        vec![
            OpenParen,
            Symbol("a".to_owned()),
            Plus,
            Numeral(10.into()),
            CloseParen,
            Star,
            Symbol("inf".to_owned()),
            Geq,
            Symbol("lg2".to_owned()),
            Symbol("b13".to_owned()),
        ]
    );
    assert_eq!(
        lex_all("a :==: b :>: 2 ^^ c && d || e > 0 == f"),
        vec![
            Symbol("a".to_owned()),
            EqFin,
            Symbol("b".to_owned()),
            GtFin,
            Numeral(2.into()),
            Hat,
            Symbol("c".to_owned()),
            AndAnd,
            Symbol("d".to_owned()),
            OrOr,
            Symbol("e".to_owned()),
            Gt,
            Numeral(0.into()),
            Eq,
            Symbol("f".to_owned()),
        ]
    );
}

#[test]
fn test_variable_names() {
    assert_eq!(parse_expr("a"), Expr::var(0));
    assert_eq!(parse_expr("z"), Expr::var(25));
    assert_eq!(parse_expr("a1"), Expr::var(26));
    assert_eq!(parse_expr("b3"), Expr::var(79));
}

#[test]
fn test_parse_prop() {
    let got = parse_prop("fin a && fin b || not (a == 0)");
    let expected = Prop::fin(Expr::var(0))
        .and(Prop::fin(Expr::var(1)))
        .or(!Prop::eq(Expr::var(0), Expr::zero()));
    assert_eq!(got, expected);

    // `&&` and `||` associate to the right
    let got = parse_prop("True && False && True");
    let expected = Prop::True.and(Prop::False.and(Prop::True));
    assert_eq!(got, expected);

    // A parenthesized expression on the left of a comparison is not a parenthesized proposition
    let got = parse_prop("(a + b) == 0");
    let expected = Prop::eq(parse_expr("a + b"), Expr::zero());
    assert_eq!(got, expected);
}

#[test]
fn test_parse_errors() {
    let matches_parser_error = |got: Result<Prop, Error>, expected: ParserError| match got {
        Err(Error::Parser(e, _)) => assert_eq!(e, expected),
        other => panic!("expected parser error, got {:?}", other),
    };

    matches_parser_error(
        crate::parser::parse_prop("a == 0123"),
        ParserError::LeadingZero("0123".to_owned()),
    );
    matches_parser_error(
        crate::parser::parse_prop("a ? 0"),
        ParserError::UnexpectedChar('?'),
    );
    matches_parser_error(
        crate::parser::parse_prop("a + b"),
        ParserError::ExpectedComparison(Token::Eof),
    );
    matches_parser_error(
        crate::parser::parse_prop("foo == 0"),
        ParserError::UndefinedIden("foo".to_owned()),
    );
    matches_parser_error(
        crate::parser::parse_prop("fin a fin b"),
        ParserError::UnexpectedToken(Token::Symbol("fin".to_owned())),
    );
}

#[test]
fn test_roundtrip() {
    let cases = [
        "True",
        "fin a",
        "a == 0",
        "fin a && (a == inf || b > 0)",
        "a + b * c - d == min a b",
        "not (fin (a ^^ b ^^ c))",
        "lenFromThenTo (a + 1) a 0 == 5 && True",
        "a :==: 0 && 0 :==: b || not (a :==: 0) && False",
        "fin (div a (b - 1)) && mod c 2 == 1",
        "width (max a1 b2) >= lg2 z",
    ];
    for input in cases {
        let parsed = parse_prop(input);
        assert_eq!(&format!("{}", parsed), input, "bad round trip");
        assert_eq!(parse_prop(&format!("{}", parsed)), parsed);
    }
}
