//! A small expression language for ad-hoc feedback functions.
//!
//! Expressions are boolean formulas over the indexed register bits, e.g.
//! `x[0] ^ x[1] & x[2]`. The text is tokenized and parsed into an explicit
//! AST, then evaluated by a plain recursive walk; no dynamic evaluation of
//! user input ever happens.
//!
//! Grammar, precedence low to high:
//!
//! ```text
//! or    := xor ('|' xor)*
//! xor   := and ('^' and)*
//! and   := unary ('&' unary)*
//! unary := ('!' | '~') unary | atom
//! atom  := 'x' '[' <decimal index> ']' | '(' or ')'
//! ```
//!
//! `^` is addition mod 2, `&`/`|` are ordinary boolean AND/OR; every
//! sub-expression evaluates to a single bit.

use std::fmt;

use crate::error::{Error, Result};
use crate::feedback::FeedbackFunction;
use crate::state::State;

/// The AST of a bit expression.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum BitExpr {
    /// The register bit at the given index.
    Var(usize),
    Not(Box<BitExpr>),
    And(Box<BitExpr>, Box<BitExpr>),
    Or(Box<BitExpr>, Box<BitExpr>),
    Xor(Box<BitExpr>, Box<BitExpr>),
}

impl BitExpr {
    pub fn var(index: usize) -> Self {
        BitExpr::Var(index)
    }

    /// Negation; collapses double negation.
    pub fn not(value: Self) -> Self {
        match value {
            BitExpr::Not(inner) => *inner,
            _ => BitExpr::Not(Box::new(value)),
        }
    }

    pub fn and(lhs: Self, rhs: Self) -> Self {
        BitExpr::And(Box::new(lhs), Box::new(rhs))
    }

    pub fn or(lhs: Self, rhs: Self) -> Self {
        BitExpr::Or(Box::new(lhs), Box::new(rhs))
    }

    pub fn xor(lhs: Self, rhs: Self) -> Self {
        BitExpr::Xor(Box::new(lhs), Box::new(rhs))
    }

    /// Evaluates the expression over `state`. All referenced indices must be
    /// in range; [`compile_expression`] guarantees this for compiled expressions.
    fn eval(&self, state: &State) -> u8 {
        match self {
            BitExpr::Var(index) => state.bit(*index),
            BitExpr::Not(a) => 1 - a.eval(state),
            BitExpr::And(a, b) => a.eval(state) & b.eval(state),
            BitExpr::Or(a, b) => a.eval(state) | b.eval(state),
            BitExpr::Xor(a, b) => a.eval(state) ^ b.eval(state),
        }
    }

    /// The first variable index at or above `len`, if any. Traversal order
    /// is left to right, so the reported index matches the leftmost
    /// offending atom.
    fn index_out_of_range(&self, len: usize) -> Option<usize> {
        match self {
            BitExpr::Var(index) => (*index >= len).then_some(*index),
            BitExpr::Not(a) => a.index_out_of_range(len),
            BitExpr::And(a, b) | BitExpr::Or(a, b) | BitExpr::Xor(a, b) => a
                .index_out_of_range(len)
                .or_else(|| b.index_out_of_range(len)),
        }
    }
}

impl fmt::Display for BitExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BitExpr::Var(index) => write!(f, "x[{}]", index),
            BitExpr::Not(a) => write!(f, "!{}", a),
            BitExpr::And(a, b) => write!(f, "({} & {})", a, b),
            BitExpr::Or(a, b) => write!(f, "({} | {})", a, b),
            BitExpr::Xor(a, b) => write!(f, "({} ^ {})", a, b),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Token {
    Or,
    Xor,
    And,
    Not,
    LParen,
    RParen,
    Var(usize),
}

/// Tokenizes the input, keeping the byte position of each token for error
/// reporting.
fn tokenize(input: &str) -> Result<Vec<(usize, Token)>> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;
    while pos < bytes.len() {
        let start = pos;
        match bytes[pos] {
            b' ' | b'\t' | b'\n' | b'\r' => pos += 1,
            b'|' => {
                tokens.push((start, Token::Or));
                pos += 1;
            }
            b'^' => {
                tokens.push((start, Token::Xor));
                pos += 1;
            }
            b'&' => {
                tokens.push((start, Token::And));
                pos += 1;
            }
            b'!' | b'~' => {
                tokens.push((start, Token::Not));
                pos += 1;
            }
            b'(' => {
                tokens.push((start, Token::LParen));
                pos += 1;
            }
            b')' => {
                tokens.push((start, Token::RParen));
                pos += 1;
            }
            b'x' => {
                pos += 1;
                if bytes.get(pos) != Some(&b'[') {
                    return Err(Error::Parse {
                        position: pos.min(bytes.len()),
                        message: "expected '[' after 'x'".to_string(),
                    });
                }
                pos += 1;
                let digits_start = pos;
                while pos < bytes.len() && bytes[pos].is_ascii_digit() {
                    pos += 1;
                }
                if pos == digits_start {
                    return Err(Error::Parse {
                        position: digits_start.min(bytes.len()),
                        message: "expected a bit index after 'x['".to_string(),
                    });
                }
                let index: usize =
                    input[digits_start..pos].parse().map_err(|_| Error::Parse {
                        position: digits_start,
                        message: "bit index is too large".to_string(),
                    })?;
                if bytes.get(pos) != Some(&b']') {
                    return Err(Error::Parse {
                        position: pos.min(bytes.len()),
                        message: "expected ']' after the bit index".to_string(),
                    });
                }
                pos += 1;
                tokens.push((start, Token::Var(index)));
            }
            other => {
                return Err(Error::Parse {
                    position: start,
                    message: format!("unexpected character '{}'", other as char),
                });
            }
        }
    }
    Ok(tokens)
}

/// Recursive-descent parser over the token stream.
struct Parser<'a> {
    tokens: &'a [(usize, Token)],
    at: usize,
    input_len: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.at).map(|&(_, token)| token)
    }

    fn bump(&mut self) -> Option<(usize, Token)> {
        let token = self.tokens.get(self.at).copied();
        self.at += 1;
        token
    }

    fn error_here(&self, message: impl Into<String>) -> Error {
        let position = self
            .tokens
            .get(self.at)
            .map(|&(pos, _)| pos)
            .unwrap_or(self.input_len);
        Error::Parse {
            position,
            message: message.into(),
        }
    }

    fn parse_or(&mut self) -> Result<BitExpr> {
        let mut expr = self.parse_xor()?;
        while self.peek() == Some(Token::Or) {
            self.bump();
            expr = BitExpr::or(expr, self.parse_xor()?);
        }
        Ok(expr)
    }

    fn parse_xor(&mut self) -> Result<BitExpr> {
        let mut expr = self.parse_and()?;
        while self.peek() == Some(Token::Xor) {
            self.bump();
            expr = BitExpr::xor(expr, self.parse_and()?);
        }
        Ok(expr)
    }

    fn parse_and(&mut self) -> Result<BitExpr> {
        let mut expr = self.parse_unary()?;
        while self.peek() == Some(Token::And) {
            self.bump();
            expr = BitExpr::and(expr, self.parse_unary()?);
        }
        Ok(expr)
    }

    fn parse_unary(&mut self) -> Result<BitExpr> {
        if self.peek() == Some(Token::Not) {
            self.bump();
            return Ok(BitExpr::not(self.parse_unary()?));
        }
        self.parse_atom()
    }

    fn parse_atom(&mut self) -> Result<BitExpr> {
        match self.peek() {
            Some(Token::Var(index)) => {
                self.bump();
                Ok(BitExpr::var(index))
            }
            Some(Token::LParen) => {
                self.bump();
                let expr = self.parse_or()?;
                if self.peek() != Some(Token::RParen) {
                    return Err(self.error_here("expected ')'"));
                }
                self.bump();
                Ok(expr)
            }
            Some(_) => Err(self.error_here("expected 'x[<index>]' or '('")),
            None => Err(self.error_here("unexpected end of expression")),
        }
    }
}

/// Parses an expression into its AST. Indices are not range-checked here;
/// use [`compile_expression`] to bind the expression to a register length.
pub fn parse(input: &str) -> Result<BitExpr> {
    let tokens = tokenize(input)?;
    let mut parser = Parser {
        tokens: &tokens,
        at: 0,
        input_len: input.len(),
    };
    let expr = parser.parse_or()?;
    if parser.peek().is_some() {
        return Err(parser.error_here("unexpected trailing input"));
    }
    Ok(expr)
}

/// A parsed expression bound to a fixed register length.
///
/// Implements [`FeedbackFunction`], so it can be handed straight to the
/// engine.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CompiledExpr {
    ast: BitExpr,
    len: usize,
}

impl CompiledExpr {
    /// The register length this expression was compiled for.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn ast(&self) -> &BitExpr {
        &self.ast
    }
}

impl FeedbackFunction for CompiledExpr {
    fn eval(&self, state: &State) -> Result<u8> {
        if state.len() != self.len {
            return Err(Error::InvalidStateLength {
                expected: self.len,
                actual: state.len(),
            });
        }
        Ok(self.ast.eval(state))
    }
}

impl fmt::Display for CompiledExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ast)
    }
}

/// Compiles a textual expression into a feedback function for an `n`-bit
/// register.
///
/// Both syntax errors and out-of-range indices are reported here, before the
/// expression is ever evaluated against a state.
pub fn compile_expression(input: &str, len: usize) -> Result<CompiledExpr> {
    let ast = parse(input)?;
    if let Some(index) = ast.index_out_of_range(len) {
        return Err(Error::IndexOutOfRange { index, len });
    }
    Ok(CompiledExpr { ast, len })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_and_binds_tighter_than_xor() {
        // x[0] ^ x[1] & x[2] parses as x[0] ^ (x[1] & x[2]).
        let expr = parse("x[0] ^ x[1] & x[2]").unwrap();
        assert_eq!(
            expr,
            BitExpr::xor(
                BitExpr::var(0),
                BitExpr::and(BitExpr::var(1), BitExpr::var(2))
            )
        );
    }

    #[test]
    fn test_precedence_or_is_loosest() {
        let expr = parse("x[0] | x[1] ^ x[2]").unwrap();
        assert_eq!(
            expr,
            BitExpr::or(
                BitExpr::var(0),
                BitExpr::xor(BitExpr::var(1), BitExpr::var(2))
            )
        );
    }

    #[test]
    fn test_parens_override_precedence() {
        let expr = parse("(x[0] ^ x[1]) & x[2]").unwrap();
        assert_eq!(
            expr,
            BitExpr::and(
                BitExpr::xor(BitExpr::var(0), BitExpr::var(1)),
                BitExpr::var(2)
            )
        );
    }

    #[test]
    fn test_not_and_double_not() {
        let expr = parse("!x[0] & ~x[1]").unwrap();
        assert_eq!(
            expr,
            BitExpr::and(
                BitExpr::not(BitExpr::var(0)),
                BitExpr::not(BitExpr::var(1))
            )
        );
        assert_eq!(parse("!!x[0]").unwrap(), BitExpr::var(0));
    }

    #[test]
    fn test_parse_errors_name_a_position() {
        for bad in ["x[0] ^", "x[", "x0", "x[0] ^ ^ x[1]", "(x[0]", "x[0])", "x[0] $ x[1]", ""] {
            match parse(bad) {
                Err(Error::Parse { position, .. }) => assert!(position <= bad.len()),
                other => panic!("expected parse error for {:?}, got {:?}", bad, other),
            }
        }
    }

    #[test]
    fn test_compile_checks_indices_before_evaluation() {
        let err = compile_expression("x[5] ^ x[9]", 3).unwrap_err();
        assert_eq!(err, Error::IndexOutOfRange { index: 5, len: 3 });
        assert!(compile_expression("x[0] ^ x[2]", 3).is_ok());
    }

    #[test]
    fn test_compiled_expression_evaluates() {
        let compiled = compile_expression("x[0] ^ x[1] & x[2]", 3).unwrap();
        for word in 0..8u64 {
            let state = State::from_word(word, 3);
            let expected = state.bit(0) ^ (state.bit(1) & state.bit(2));
            assert_eq!(compiled.eval(&state).unwrap(), expected);
        }
    }

    #[test]
    fn test_compiled_expression_rejects_wrong_length() {
        let compiled = compile_expression("x[0]", 3).unwrap();
        let err = compiled.eval(&State::zero(4)).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidStateLength {
                expected: 3,
                actual: 4
            }
        );
    }

    #[test]
    fn test_display_round_trips() {
        let compiled = compile_expression("!x[0] | x[1] ^ x[2] & x[3]", 4).unwrap();
        let reparsed = parse(&compiled.to_string()).unwrap();
        assert_eq!(&reparsed, compiled.ast());
    }
}
