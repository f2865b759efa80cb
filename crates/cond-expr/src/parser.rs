// cond-expr/src/parser.rs
// ============================================================================
// Module: Expression Parser
// Description: Recursive-descent parser for condition expressions.
// Purpose: Build the AST with conventional precedence and no backtracking.
// Dependencies: crate::{ast, error, token}
// ============================================================================

//! ## Overview
//! Precedence, low to high: `||`, `&&`, `!`, comparison / `in`, primary.
//! Comparisons do not chain (`a < b < c` is a syntax error). The only call
//! forms are `len(expr)` and `contains(expr, expr)`.

use crate::ast::CompareOp;
use crate::ast::Expr;
use crate::error::CompileError;
use crate::token::Spanned;
use crate::token::Token;
use crate::token::tokenize;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// Parses condition source text into an expression tree.
///
/// # Errors
///
/// Returns [`CompileError`] on lexical or grammatical failures.
pub fn parse(source: &str) -> Result<Expr, CompileError> {
    let tokens = tokenize(source)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        source_len: source.len(),
    };
    let expr = parser.parse_or()?;
    if let Some(trailing) = parser.peek() {
        return Err(CompileError::Syntax {
            position: trailing.position,
            detail: format!("unexpected trailing token {:?}", trailing.token),
        });
    }
    Ok(expr)
}

// ============================================================================
// SECTION: Parser State
// ============================================================================

/// Token-stream cursor.
struct Parser {
    /// Lexed tokens.
    tokens: Vec<Spanned>,
    /// Cursor into `tokens`.
    pos: usize,
    /// Source length in bytes, for end-of-input diagnostics.
    source_len: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Spanned> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Spanned> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, expected: &Token) -> bool {
        if self.peek().is_some_and(|spanned| &spanned.token == expected) {
            self.pos += 1;
            return true;
        }
        false
    }

    fn expect(&mut self, expected: &Token, what: &str) -> Result<(), CompileError> {
        if self.eat(expected) {
            return Ok(());
        }
        Err(self.unexpected(what))
    }

    fn unexpected(&self, what: &str) -> CompileError {
        match self.peek() {
            Some(spanned) => CompileError::Syntax {
                position: spanned.position,
                detail: format!("expected {what}, found {:?}", spanned.token),
            },
            None => CompileError::Syntax {
                position: self.source_len,
                detail: format!("expected {what}, found end of input"),
            },
        }
    }

    // ------------------------------------------------------------------
    // Grammar productions
    // ------------------------------------------------------------------

    fn parse_or(&mut self) -> Result<Expr, CompileError> {
        let mut expr = self.parse_and()?;
        while self.eat(&Token::OrOr) {
            let rhs = self.parse_and()?;
            expr = Expr::Or(Box::new(expr), Box::new(rhs));
        }
        Ok(expr)
    }

    fn parse_and(&mut self) -> Result<Expr, CompileError> {
        let mut expr = self.parse_unary()?;
        while self.eat(&Token::AndAnd) {
            let rhs = self.parse_unary()?;
            expr = Expr::And(Box::new(expr), Box::new(rhs));
        }
        Ok(expr)
    }

    fn parse_unary(&mut self) -> Result<Expr, CompileError> {
        if self.eat(&Token::Bang) {
            let inner = self.parse_unary()?;
            return Ok(Expr::Not(Box::new(inner)));
        }
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> Result<Expr, CompileError> {
        let lhs = self.parse_term()?;

        let op = match self.peek().map(|spanned| &spanned.token) {
            Some(Token::Eq) => Some(CompareOp::Eq),
            Some(Token::Ne) => Some(CompareOp::Ne),
            Some(Token::Lt) => Some(CompareOp::Lt),
            Some(Token::Le) => Some(CompareOp::Le),
            Some(Token::Gt) => Some(CompareOp::Gt),
            Some(Token::Ge) => Some(CompareOp::Ge),
            Some(Token::In) => None,
            _ => return Ok(lhs),
        };

        if let Some(op) = op {
            self.pos += 1;
            let rhs = self.parse_term()?;
            return Ok(Expr::Compare {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            });
        }

        // `needle in haystack`
        self.pos += 1;
        let haystack = self.parse_term()?;
        Ok(Expr::In {
            needle: Box::new(lhs),
            haystack: Box::new(haystack),
        })
    }

    fn parse_term(&mut self) -> Result<Expr, CompileError> {
        let Some(spanned) = self.advance() else {
            return Err(self.unexpected("an expression"));
        };

        match spanned.token {
            Token::True => Ok(Expr::Bool(true)),
            Token::False => Ok(Expr::Bool(false)),
            Token::Int(value) => Ok(Expr::Int(value)),
            Token::Float(value) => Ok(Expr::Float(value)),
            Token::Str(value) => Ok(Expr::Str(value)),
            Token::LParen => {
                let inner = self.parse_or()?;
                self.expect(&Token::RParen, "')'")?;
                Ok(inner)
            }
            Token::Ident(name) => self.parse_path_or_call(name),
            other => Err(CompileError::Syntax {
                position: spanned.position,
                detail: format!("expected an expression, found {other:?}"),
            }),
        }
    }

    /// Parses a dotted path, or a builtin call when the identifier is
    /// immediately followed by `(`.
    fn parse_path_or_call(&mut self, head: String) -> Result<Expr, CompileError> {
        if self.peek().is_some_and(|spanned| spanned.token == Token::LParen) {
            self.pos += 1;
            return match head.as_str() {
                "len" => {
                    let arg = self.parse_or()?;
                    self.expect(&Token::RParen, "')'")?;
                    Ok(Expr::Len(Box::new(arg)))
                }
                "contains" => {
                    let haystack = self.parse_or()?;
                    self.expect(&Token::Comma, "','")?;
                    let needle = self.parse_or()?;
                    self.expect(&Token::RParen, "')'")?;
                    Ok(Expr::In {
                        needle: Box::new(needle),
                        haystack: Box::new(haystack),
                    })
                }
                _ => Err(CompileError::UnknownFunction {
                    name: head,
                }),
            };
        }

        let mut segments = vec![head];
        while self.eat(&Token::Dot) {
            let Some(next) = self.advance() else {
                return Err(self.unexpected("a field name"));
            };
            match next.token {
                Token::Ident(segment) => segments.push(segment),
                // Keywords are valid field names after a dot (`session.in`
                // never occurs, but open roots accept arbitrary keys).
                Token::In => segments.push("in".to_string()),
                Token::True => segments.push("true".to_string()),
                Token::False => segments.push("false".to_string()),
                other => {
                    return Err(CompileError::Syntax {
                        position: next.position,
                        detail: format!("expected a field name, found {other:?}"),
                    });
                }
            }
        }
        Ok(Expr::Path(segments))
    }
}
