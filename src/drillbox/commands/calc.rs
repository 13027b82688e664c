//! Arithmetic calculator with history.
//!
//! Expressions are restricted to `0-9 + - * / % ( ) .` and spaces, checked
//! before anything is parsed. Parsing is recursive descent over this grammar:
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := unary (('*' | '/' | '//' | '%') unary)*
//! unary  := ('+' | '-') unary | power
//! power  := atom ('**' unary)?
//! atom   := number | '(' expr ')'
//! ```
//!
//! `**` is right associative and binds tighter than a leading minus, so
//! `-2 ** 2` is `-4`. `//` and `%` are floored: the remainder takes the sign
//! of the divisor.

use crate::error::Result;
use crate::model::HistoryEntry;
use crate::store::DocumentStore;
use std::fmt;
use thiserror::Error;

use super::history;

const ALLOWED: &str = "0123456789+-*/(). %";

/// Deepest nesting of parentheses, signs and exponents accepted.
pub const MAX_DEPTH: usize = 256;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExprError {
    #[error("expression is empty")]
    Empty,

    #[error("invalid character {ch:?} at position {position}")]
    InvalidCharacter { ch: char, position: usize },

    #[error("malformed number {text:?} at position {position}")]
    MalformedNumber { text: String, position: usize },

    #[error("unexpected '{token}' at position {position}")]
    UnexpectedToken { token: String, position: usize },

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("division by zero")]
    DivisionByZero,

    #[error("result is not a finite number")]
    NotFinite,

    #[error("expression nests deeper than {max} levels")]
    TooDeep { max: usize },
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Num(f64),
    Plus,
    Minus,
    Star,
    Slash,
    FloorDiv,
    Percent,
    Pow,
    LParen,
    RParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Num(n) => write!(f, "{}", n),
            Token::Plus => f.write_str("+"),
            Token::Minus => f.write_str("-"),
            Token::Star => f.write_str("*"),
            Token::Slash => f.write_str("/"),
            Token::FloorDiv => f.write_str("//"),
            Token::Percent => f.write_str("%"),
            Token::Pow => f.write_str("**"),
            Token::LParen => f.write_str("("),
            Token::RParen => f.write_str(")"),
        }
    }
}

/// Validate, evaluate and record `expr`. Nothing is recorded on failure.
pub fn calculate<S: DocumentStore>(store: &mut S, expr: &str) -> Result<HistoryEntry> {
    let expr = expr.trim();
    let value = evaluate(expr)?;
    history::record(store, expr, value)
}

pub fn evaluate(expr: &str) -> std::result::Result<f64, ExprError> {
    if let Some((position, ch)) = expr.chars().enumerate().find(|(_, c)| !ALLOWED.contains(*c)) {
        return Err(ExprError::InvalidCharacter { ch, position });
    }

    let tokens = tokenize(expr)?;
    if tokens.is_empty() {
        return Err(ExprError::Empty);
    }

    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let value = parser.expr()?;
    if let Some((position, token)) = parser.peek() {
        return Err(ExprError::UnexpectedToken {
            token: token.to_string(),
            position,
        });
    }
    if !value.is_finite() {
        return Err(ExprError::NotFinite);
    }
    Ok(value)
}

/// Render a result the way a person would type it: `14`, not `14.0`.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

fn tokenize(expr: &str) -> std::result::Result<Vec<(usize, Token)>, ExprError> {
    let chars: Vec<char> = expr.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let start = i;
        let token = match c {
            ' ' => {
                i += 1;
                continue;
            }
            '0'..='9' | '.' => {
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                let text: String = chars[start..i].iter().collect();
                let value = parse_number(&text).ok_or(ExprError::MalformedNumber {
                    text,
                    position: start,
                })?;
                tokens.push((start, Token::Num(value)));
                continue;
            }
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' if chars.get(i + 1) == Some(&'*') => {
                i += 1;
                Token::Pow
            }
            '*' => Token::Star,
            '/' if chars.get(i + 1) == Some(&'/') => {
                i += 1;
                Token::FloorDiv
            }
            '/' => Token::Slash,
            '%' => Token::Percent,
            '(' => Token::LParen,
            ')' => Token::RParen,
            other => {
                return Err(ExprError::InvalidCharacter {
                    ch: other,
                    position: start,
                })
            }
        };
        tokens.push((start, token));
        i += 1;
    }

    Ok(tokens)
}

fn parse_number(text: &str) -> Option<f64> {
    if text == "." || text.matches('.').count() > 1 {
        return None;
    }
    text.parse().ok()
}

struct Parser {
    tokens: Vec<(usize, Token)>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<(usize, Token)> {
        self.tokens.get(self.pos).copied()
    }

    fn eat(&mut self, expected: Token) -> bool {
        if matches!(self.peek(), Some((_, t)) if t == expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn nested<F>(&mut self, parse: F) -> std::result::Result<f64, ExprError>
    where
        F: FnOnce(&mut Self) -> std::result::Result<f64, ExprError>,
    {
        if self.depth >= MAX_DEPTH {
            return Err(ExprError::TooDeep { max: MAX_DEPTH });
        }
        self.depth += 1;
        let value = parse(self);
        self.depth -= 1;
        value
    }

    fn expr(&mut self) -> std::result::Result<f64, ExprError> {
        let mut value = self.term()?;
        loop {
            if self.eat(Token::Plus) {
                value += self.term()?;
            } else if self.eat(Token::Minus) {
                value -= self.term()?;
            } else {
                return Ok(value);
            }
        }
    }

    fn term(&mut self) -> std::result::Result<f64, ExprError> {
        let mut value = self.unary()?;
        loop {
            if self.eat(Token::Star) {
                value *= self.unary()?;
            } else if self.eat(Token::Slash) {
                let rhs = nonzero(self.unary()?)?;
                value /= rhs;
            } else if self.eat(Token::FloorDiv) {
                let rhs = nonzero(self.unary()?)?;
                value = (value / rhs).floor();
            } else if self.eat(Token::Percent) {
                let rhs = nonzero(self.unary()?)?;
                value = floored_rem(value, rhs);
            } else {
                return Ok(value);
            }
        }
    }

    fn unary(&mut self) -> std::result::Result<f64, ExprError> {
        if self.eat(Token::Plus) {
            self.nested(Self::unary)
        } else if self.eat(Token::Minus) {
            Ok(-self.nested(Self::unary)?)
        } else {
            self.power()
        }
    }

    fn power(&mut self) -> std::result::Result<f64, ExprError> {
        let base = self.atom()?;
        if !self.eat(Token::Pow) {
            return Ok(base);
        }
        let exponent = self.nested(Self::unary)?;
        if base == 0.0 && exponent < 0.0 {
            return Err(ExprError::DivisionByZero);
        }
        let value = base.powf(exponent);
        if value.is_nan() {
            return Err(ExprError::NotFinite);
        }
        Ok(value)
    }

    fn atom(&mut self) -> std::result::Result<f64, ExprError> {
        match self.peek() {
            Some((_, Token::Num(n))) => {
                self.pos += 1;
                Ok(n)
            }
            Some((_, Token::LParen)) => {
                self.pos += 1;
                let value = self.nested(Self::expr)?;
                match self.peek() {
                    Some((_, Token::RParen)) => {
                        self.pos += 1;
                        Ok(value)
                    }
                    Some((position, token)) => Err(ExprError::UnexpectedToken {
                        token: token.to_string(),
                        position,
                    }),
                    None => Err(ExprError::UnexpectedEnd),
                }
            }
            Some((position, token)) => Err(ExprError::UnexpectedToken {
                token: token.to_string(),
                position,
            }),
            None => Err(ExprError::UnexpectedEnd),
        }
    }
}

fn nonzero(value: f64) -> std::result::Result<f64, ExprError> {
    if value == 0.0 {
        Err(ExprError::DivisionByZero)
    } else {
        Ok(value)
    }
}

fn floored_rem(lhs: f64, rhs: f64) -> f64 {
    let rem = lhs % rhs;
    if rem != 0.0 && (rem < 0.0) != (rhs < 0.0) {
        rem + rhs
    } else {
        rem
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::history;
    use crate::store::memory::InMemoryStore;

    fn eval(expr: &str) -> f64 {
        evaluate(expr).unwrap_or_else(|e| panic!("{:?} failed: {}", expr, e))
    }

    #[test]
    fn respects_precedence_and_parentheses() {
        assert_eq!(eval("2+3*4"), 14.0);
        assert_eq!(eval("(2+3)*4"), 20.0);
        assert_eq!(eval("10 - 4 - 3"), 3.0);
        assert_eq!(eval("2 * (3 + (4 - 1)) / 4"), 3.0);
        assert_eq!(eval("7 / 2"), 3.5);
    }

    #[test]
    fn unary_signs_and_decimals() {
        assert_eq!(eval("-3 + +5"), 2.0);
        assert_eq!(eval("--4"), 4.0);
        assert_eq!(eval(".5 + 3."), 3.5);
        assert_eq!(eval("0.1 * 10"), 1.0);
    }

    #[test]
    fn power_is_right_associative_and_beats_unary_minus() {
        assert_eq!(eval("2 ** 3 ** 2"), 512.0);
        assert_eq!(eval("-2 ** 2"), -4.0);
        assert_eq!(eval("2 ** -1"), 0.5);
    }

    #[test]
    fn floored_division_and_modulo() {
        assert_eq!(eval("7 // 2"), 3.0);
        assert_eq!(eval("-7 // 2"), -4.0);
        assert_eq!(eval("7 % 3"), 1.0);
        assert_eq!(eval("-7 % 3"), 2.0);
        assert_eq!(eval("7 % -3"), -2.0);
    }

    #[test]
    fn rejects_characters_outside_the_allow_list() {
        let err = evaluate("2 + x").unwrap_err();
        assert_eq!(err, ExprError::InvalidCharacter { ch: 'x', position: 4 });
        assert!(matches!(
            evaluate("__import__('os')"),
            Err(ExprError::InvalidCharacter { ch: '_', position: 0 })
        ));
    }

    #[test]
    fn reports_syntax_errors() {
        assert_eq!(evaluate(""), Err(ExprError::Empty));
        assert_eq!(evaluate("   "), Err(ExprError::Empty));
        assert_eq!(evaluate("2 +"), Err(ExprError::UnexpectedEnd));
        assert_eq!(evaluate("(1 + 2"), Err(ExprError::UnexpectedEnd));
        assert!(matches!(evaluate("1 2"), Err(ExprError::UnexpectedToken { .. })));
        assert!(matches!(evaluate("2 (3)"), Err(ExprError::UnexpectedToken { .. })));
        assert!(matches!(evaluate("* 3"), Err(ExprError::UnexpectedToken { .. })));
        assert!(matches!(evaluate("1.2.3"), Err(ExprError::MalformedNumber { .. })));
        assert!(matches!(evaluate("."), Err(ExprError::MalformedNumber { .. })));
    }

    #[test]
    fn deep_nesting_is_an_error_not_a_crash() {
        let parens = format!("{}1{}", "(".repeat(100_000), ")".repeat(100_000));
        assert_eq!(evaluate(&parens), Err(ExprError::TooDeep { max: MAX_DEPTH }));

        let signs = format!("{}1", "-".repeat(100_000));
        assert_eq!(evaluate(&signs), Err(ExprError::TooDeep { max: MAX_DEPTH }));

        let powers = format!("1{}", "**1".repeat(100_000));
        assert_eq!(evaluate(&powers), Err(ExprError::TooDeep { max: MAX_DEPTH }));

        let mut store = InMemoryStore::new();
        assert!(calculate(&mut store, &parens).unwrap_err().is_validation());
        assert!(history::all(&mut store).unwrap().is_empty());
    }

    #[test]
    fn nesting_up_to_the_limit_evaluates() {
        let depth = MAX_DEPTH - 1;
        let parens = format!("{}7{}", "(".repeat(depth), ")".repeat(depth));
        assert_eq!(eval(&parens), 7.0);
        assert_eq!(eval(&format!("{}3", "-".repeat(depth))), -3.0);
        assert_eq!(eval(&format!("{}3", "-".repeat(depth - 1))), 3.0);
    }

    #[test]
    fn reports_arithmetic_errors() {
        assert_eq!(evaluate("1 / 0"), Err(ExprError::DivisionByZero));
        assert_eq!(evaluate("1 // (2 - 2)"), Err(ExprError::DivisionByZero));
        assert_eq!(evaluate("5 % 0"), Err(ExprError::DivisionByZero));
        assert_eq!(evaluate("0 ** -1"), Err(ExprError::DivisionByZero));
        assert_eq!(evaluate("(-8) ** .5"), Err(ExprError::NotFinite));
        assert_eq!(evaluate("10 ** 400"), Err(ExprError::NotFinite));
    }

    #[test]
    fn calculate_records_only_successes() {
        let mut store = InMemoryStore::new();
        let entry = calculate(&mut store, "  2+3*4 ").unwrap();
        assert_eq!(entry.expr, "2+3*4");
        assert_eq!(entry.result, 14.0);

        assert!(calculate(&mut store, "2+a").unwrap_err().is_validation());
        assert!(calculate(&mut store, "1/0").unwrap_err().is_validation());

        let entries = history::all(&mut store).unwrap();
        assert_eq!(entries, vec![entry]);
    }

    #[test]
    fn formats_whole_numbers_without_fraction() {
        assert_eq!(format_number(14.0), "14");
        assert_eq!(format_number(-4.0), "-4");
        assert_eq!(format_number(3.5), "3.5");
        assert_eq!(format_number(1e20), "100000000000000000000");
    }
}
