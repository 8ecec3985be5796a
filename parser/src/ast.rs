//! Abstract Syntax Tree for formula expressions.

use std::fmt;

/// Source location (byte offsets into the formula text).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Smallest span covering both.
    pub fn merge(self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }

    /// 1-based column of the start, for messages.
    pub fn column(&self) -> usize {
        self.start + 1
    }
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
        }
    }

    /// Binding strength; higher binds tighter.
    pub fn precedence(&self) -> u8 {
        match self {
            BinaryOp::Add | BinaryOp::Sub => 1,
            BinaryOp::Mul | BinaryOp::Div => 2,
        }
    }

    /// Whether `a op (b op c)` differs from `(a op b) op c`.
    fn is_left_only(&self) -> bool {
        matches!(self, BinaryOp::Sub | BinaryOp::Div)
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
}

/// A formula expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Numeric literal.
    Number(f64, Span),
    /// Reference to a property by name, as written.
    Property(String, Span),
    /// Unary operation.
    UnaryOp(UnaryOp, Box<Expr>, Span),
    /// Binary operation.
    BinaryOp(BinaryOp, Box<Expr>, Box<Expr>, Span),
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::Number(_, s) | Expr::Property(_, s) => *s,
            Expr::UnaryOp(_, _, s) | Expr::BinaryOp(_, _, _, s) => *s,
        }
    }

    /// Property names referenced, in order of first appearance.
    pub fn property_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        self.collect_names(&mut names);
        names
    }

    fn collect_names<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            Expr::Number(..) => {}
            Expr::Property(name, _) => {
                if !names.iter().any(|n| n.eq_ignore_ascii_case(name)) {
                    names.push(name);
                }
            }
            Expr::UnaryOp(_, operand, _) => operand.collect_names(names),
            Expr::BinaryOp(_, left, right, _) => {
                left.collect_names(names);
                right.collect_names(names);
            }
        }
    }

    /// Rewrite every property reference through `rename`.
    pub fn map_properties(&self, rename: &impl Fn(&str) -> String) -> Expr {
        match self {
            Expr::Number(n, s) => Expr::Number(*n, *s),
            Expr::Property(name, s) => Expr::Property(rename(name), *s),
            Expr::UnaryOp(op, operand, s) => {
                Expr::UnaryOp(*op, Box::new(operand.map_properties(rename)), *s)
            }
            Expr::BinaryOp(op, left, right, s) => Expr::BinaryOp(
                *op,
                Box::new(left.map_properties(rename)),
                Box::new(right.map_properties(rename)),
                *s,
            ),
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Expr::BinaryOp(op, ..) => op.precedence(),
            Expr::UnaryOp(..) => 3,
            _ => 4,
        }
    }
}

/// Quote a property name unless it is a plain identifier. Quotes inside the
/// name are doubled.
pub fn quote_name(name: &str) -> String {
    let plain = !name.is_empty()
        && name
            .chars()
            .next()
            .map(|c| c.is_alphabetic() || c == '_')
            .unwrap_or(false)
        && name.chars().all(|c| c.is_alphanumeric() || c == '_');
    if plain {
        name.to_string()
    } else {
        format!("'{}'", name.replace('\'', "''"))
    }
}

/// Normalized rendering: single spaces around operators, minimal parentheses.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(n, _) => write!(f, "{}", n),
            Expr::Property(name, _) => write!(f, "{}", quote_name(name)),
            Expr::UnaryOp(UnaryOp::Neg, operand, _) => {
                if operand.precedence() < self.precedence() {
                    write!(f, "-({})", operand)
                } else {
                    write!(f, "-{}", operand)
                }
            }
            Expr::BinaryOp(op, left, right, _) => {
                let prec = op.precedence();
                if left.precedence() < prec {
                    write!(f, "({})", left)?;
                } else {
                    write!(f, "{}", left)?;
                }
                write!(f, " {} ", op.symbol())?;
                let right_needs_parens = right.precedence() < prec
                    || (op.is_left_only() && right.precedence() == prec);
                if right_needs_parens {
                    write!(f, "({})", right)
                } else {
                    write!(f, "{}", right)
                }
            }
        }
    }
}
