//! Mingle Formula Parser
//!
//! This crate turns formula text into an expression tree:
//! - Tokenizing numbers, bare and quoted property names, operators
//! - Precedence parsing of `+ - * /`, unary minus and parentheses
//! - Normalized rendering of a parsed formula
//! - Error handling with location information

mod ast;
mod error;
mod lexer;
mod parser;

pub use ast::*;
pub use error::*;
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::{parse_formula, Parser};
