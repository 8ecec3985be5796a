//! Parser for formula text.
//!
//! Expression parsing lives in `expr`; this module holds the token cursor.

mod expr;

use crate::ast::*;
use crate::error::{ParseError, ParseResult};
use crate::lexer::{Lexer, Token, TokenKind};

// ==================== PARSER STATE ====================

/// Parser state.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    /// Create a new parser from formula text.
    pub fn new(input: &str) -> ParseResult<Self> {
        let tokens = Lexer::new(input).tokenize()?;
        Ok(Self { tokens, pos: 0 })
    }

    /// Parse a complete formula; trailing tokens are an error.
    pub fn parse(mut self) -> ParseResult<Expr> {
        if self.check(&TokenKind::Eof) {
            return Err(ParseError::unexpected_eof(self.peek().span, "expression"));
        }
        let expr = self.parse_expr()?;
        if !self.check(&TokenKind::Eof) {
            let token = self.peek();
            return Err(ParseError::unexpected_token(
                token.span,
                "operator or end of formula",
                token.kind.name(),
            ));
        }
        Ok(expr)
    }
}

// ==================== TOKEN HELPERS ====================

impl Parser {
    pub(crate) fn peek(&self) -> &Token {
        // The lexer always terminates the stream with Eof and `advance` never
        // moves past it.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    pub(crate) fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.peek().kind) == std::mem::discriminant(kind)
    }

    pub(crate) fn expect(&mut self, kind: &TokenKind) -> ParseResult<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            let token = self.peek();
            if matches!(token.kind, TokenKind::Eof) {
                return Err(ParseError::unexpected_eof(token.span, kind.name()));
            }
            Err(ParseError::unexpected_token(
                token.span,
                kind.name(),
                token.kind.name(),
            ))
        }
    }
}

// ==================== PUBLIC API ====================

/// Parse formula text into an expression.
pub fn parse_formula(input: &str) -> ParseResult<Expr> {
    Parser::new(input)?.parse()
}
