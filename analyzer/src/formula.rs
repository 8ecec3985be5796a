//! Compiled formulas: expressions with property references resolved to ids.

use crate::Kind;
use mingle_core::PropertyDefinitionId;
use mingle_parser::{BinaryOp, Expr, Span, UnaryOp};
use mingle_registry::Schema;

/// A formula expression with resolved components.
#[derive(Debug, Clone, PartialEq)]
pub enum FormulaExpr {
    Number(f64),
    Component(PropertyDefinitionId, Kind),
    Neg(Box<FormulaExpr>),
    Binary(BinaryOp, Box<FormulaExpr>, Box<FormulaExpr>),
}

impl FormulaExpr {
    /// Convert back to a syntax tree, naming components through `name_of`.
    pub fn to_expr(&self, name_of: &impl Fn(PropertyDefinitionId) -> String) -> Expr {
        let span = Span::default();
        match self {
            FormulaExpr::Number(n) => Expr::Number(*n, span),
            FormulaExpr::Component(id, _) => Expr::Property(name_of(*id), span),
            FormulaExpr::Neg(operand) => {
                Expr::UnaryOp(UnaryOp::Neg, Box::new(operand.to_expr(name_of)), span)
            }
            FormulaExpr::Binary(op, left, right) => Expr::BinaryOp(
                *op,
                Box::new(left.to_expr(name_of)),
                Box::new(right.to_expr(name_of)),
                span,
            ),
        }
    }
}

/// A validated formula.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledFormula {
    pub expr: FormulaExpr,
    /// Component properties in order of first appearance.
    pub components: Vec<PropertyDefinitionId>,
    /// Kind of the computed value.
    pub kind: Kind,
    /// Normalized text at compile time.
    pub text: String,
}

impl CompiledFormula {
    /// Check if the formula reads a property.
    pub fn uses(&self, property: PropertyDefinitionId) -> bool {
        self.components.contains(&property)
    }

    /// Render with the current names of the components.
    pub fn render(&self, schema: &Schema) -> String {
        self.expr
            .to_expr(&|id| {
                schema
                    .property(id)
                    .map(|p| p.name.clone())
                    .unwrap_or_else(|| id.to_string())
            })
            .to_string()
    }

    /// Render with one component renamed; other names come from the schema.
    pub fn render_renamed(
        &self,
        schema: &Schema,
        property: PropertyDefinitionId,
        new_name: &str,
    ) -> String {
        self.expr
            .to_expr(&|id| {
                if id == property {
                    new_name.to_string()
                } else {
                    schema
                        .property(id)
                        .map(|p| p.name.clone())
                        .unwrap_or_else(|| id.to_string())
                }
            })
            .to_string()
    }
}
