//! Lexer (tokenizer) for formula text.

use crate::{ParseError, ParseResult, Span};

/// Token types.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals
    Number(f64),
    /// Bare property name.
    Ident(String),
    /// Property name in single quotes.
    Quoted(String),

    // Symbols
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,

    Eof,
}

impl TokenKind {
    /// Get a display name for the token kind.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Number(_) => "number",
            TokenKind::Ident(_) => "property name",
            TokenKind::Quoted(_) => "quoted property name",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::Eof => "end of formula",
        }
    }
}

/// A token with its location.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn eof(pos: usize) -> Self {
        Self {
            kind: TokenKind::Eof,
            span: Span::new(pos, pos),
        }
    }
}

/// Lexer state.
pub struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.char_indices().peekable(),
            pos: 0,
        }
    }

    /// Tokenize all input into a vector of tokens ending with `Eof`.
    pub fn tokenize(mut self) -> ParseResult<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = matches!(token.kind, TokenKind::Eof);
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }

    fn span_from(&self, start: usize) -> Span {
        Span::new(start, self.pos)
    }

    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn next_char(&mut self) -> Option<char> {
        let (pos, c) = self.chars.next()?;
        self.pos = pos + c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() {
                self.next_char();
            } else {
                break;
            }
        }
    }

    fn next_token(&mut self) -> ParseResult<Token> {
        self.skip_whitespace();

        let start = self.pos;
        let Some(c) = self.next_char() else {
            return Ok(Token::eof(self.pos));
        };

        let kind = match c {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '\'' => self.scan_quoted(start)?,
            c if c.is_ascii_digit() || c == '.' => self.scan_number(c, start)?,
            c if c.is_alphabetic() || c == '_' => self.scan_ident(c),
            other => {
                return Err(ParseError::new(
                    format!("unexpected character '{}'", other),
                    self.span_from(start),
                ));
            }
        };

        Ok(Token::new(kind, self.span_from(start)))
    }

    fn scan_quoted(&mut self, start: usize) -> ParseResult<TokenKind> {
        let mut name = String::new();
        loop {
            match self.next_char() {
                Some('\'') if self.peek_char() == Some('\'') => {
                    self.next_char();
                    name.push('\'');
                }
                Some('\'') => break,
                Some(c) => name.push(c),
                None => {
                    return Err(ParseError::unexpected_eof(
                        self.span_from(start),
                        "closing quote",
                    ));
                }
            }
        }
        if name.trim().is_empty() {
            return Err(ParseError::new(
                "property name can't be blank",
                self.span_from(start),
            ));
        }
        Ok(TokenKind::Quoted(name))
    }

    fn scan_ident(&mut self, first: char) -> TokenKind {
        let mut ident = String::new();
        ident.push(first);
        while let Some(c) = self.peek_char() {
            if c.is_alphanumeric() || c == '_' {
                ident.push(c);
                self.next_char();
            } else {
                break;
            }
        }
        TokenKind::Ident(ident)
    }

    fn scan_number(&mut self, first: char, start: usize) -> ParseResult<TokenKind> {
        let mut number = String::new();
        number.push(first);
        while let Some(c) = self.peek_char() {
            if c.is_ascii_digit() || c == '.' {
                number.push(c);
                self.next_char();
            } else {
                break;
            }
        }
        let value = mingle_core::parse_number(&number)
            .map_err(|e| ParseError::new(e.to_string(), self.span_from(start)))?;
        Ok(TokenKind::Number(value))
    }
}
