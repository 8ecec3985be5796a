//! Expression parsing (arithmetic precedence climbing).

use super::Parser;
use crate::ast::*;
use crate::error::{ParseError, ParseResult};
use crate::lexer::TokenKind;

impl Parser {
    /// Parse an expression.
    pub(crate) fn parse_expr(&mut self) -> ParseResult<Expr> {
        self.parse_additive()
    }

    fn parse_additive(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_multiplicative()?;

        loop {
            let op = if self.check(&TokenKind::Plus) {
                BinaryOp::Add
            } else if self.check(&TokenKind::Minus) {
                BinaryOp::Sub
            } else {
                break;
            };
            self.advance();
            let right = self.parse_multiplicative()?;
            let span = left.span().merge(right.span());
            left = Expr::BinaryOp(op, Box::new(left), Box::new(right), span);
        }

        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_unary()?;

        loop {
            let op = if self.check(&TokenKind::Star) {
                BinaryOp::Mul
            } else if self.check(&TokenKind::Slash) {
                BinaryOp::Div
            } else {
                break;
            };
            self.advance();
            let right = self.parse_unary()?;
            let span = left.span().merge(right.span());
            left = Expr::BinaryOp(op, Box::new(left), Box::new(right), span);
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> ParseResult<Expr> {
        if self.check(&TokenKind::Minus) {
            let start = self.advance().span;
            let operand = self.parse_unary()?;
            let span = start.merge(operand.span());
            return Ok(Expr::UnaryOp(UnaryOp::Neg, Box::new(operand), span));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> ParseResult<Expr> {
        let token = self.peek().clone();

        match token.kind {
            TokenKind::Number(n) => {
                self.advance();
                Ok(Expr::Number(n, token.span))
            }
            TokenKind::Ident(name) | TokenKind::Quoted(name) => {
                self.advance();
                Ok(Expr::Property(name.trim().to_string(), token.span))
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expr()?;
                let close = self.expect(&TokenKind::RParen)?;
                // Keep the inner node; only its span grows to cover the parens.
                Ok(with_span(inner, token.span.merge(close.span)))
            }
            TokenKind::Eof => Err(ParseError::unexpected_eof(token.span, "expression")),
            other => Err(ParseError::unexpected_token(
                token.span,
                "expression",
                other.name(),
            )),
        }
    }
}

fn with_span(expr: Expr, span: Span) -> Expr {
    match expr {
        Expr::Number(n, _) => Expr::Number(n, span),
        Expr::Property(name, _) => Expr::Property(name, span),
        Expr::UnaryOp(op, operand, _) => Expr::UnaryOp(op, operand, span),
        Expr::BinaryOp(op, l, r, _) => Expr::BinaryOp(op, l, r, span),
    }
}
