//! Formula analyzer implementation.

use crate::{CompiledFormula, FormulaError, FormulaExpr, FormulaResult, Kind};
use mingle_core::{CardTypeId, PropertyDefinitionId};
use mingle_parser::{parse_formula, BinaryOp, Expr, UnaryOp};
use mingle_registry::{PropertyKind, Schema};
use std::collections::BTreeSet;
use tracing::debug;

/// The FormulaAnalyzer resolves component names and checks operand kinds.
pub struct FormulaAnalyzer<'s> {
    /// The schema for property lookups.
    schema: &'s Schema,
}

impl<'s> FormulaAnalyzer<'s> {
    /// Create a new analyzer over the given schema.
    pub fn new(schema: &'s Schema) -> Self {
        Self { schema }
    }

    /// Validate a formula for the card types it would be enabled on.
    ///
    /// `formula` is the id of the formula property being edited, if it exists
    /// already; referencing it from its own expression is rejected.
    pub fn analyze(
        &self,
        text: &str,
        formula: Option<PropertyDefinitionId>,
        card_types: &BTreeSet<CardTypeId>,
    ) -> FormulaResult<CompiledFormula> {
        let ast = parse_formula(text)?;
        let mut components = Vec::new();
        let (expr, kind) = self.analyze_expr(&ast, formula, &mut components)?;
        self.check_card_types(&components, card_types)?;

        let compiled = CompiledFormula {
            expr,
            components,
            kind,
            text: String::new(),
        };
        let text = compiled.render(self.schema);
        debug!(formula = %text, kind = %kind, "formula compiled");
        Ok(CompiledFormula { text, ..compiled })
    }

    /// Resolve the properties a stored formula names, without checking kinds.
    ///
    /// Names that resolve to nothing are skipped.
    pub fn components(&self, text: &str) -> FormulaResult<Vec<PropertyDefinitionId>> {
        let ast = parse_formula(text)?;
        Ok(ast
            .property_names()
            .into_iter()
            .filter_map(|name| self.schema.find_property_with_hidden(name))
            .map(|p| p.id)
            .collect())
    }

    /// Analyze an expression, collecting resolved components.
    fn analyze_expr(
        &self,
        expr: &Expr,
        formula: Option<PropertyDefinitionId>,
        components: &mut Vec<PropertyDefinitionId>,
    ) -> FormulaResult<(FormulaExpr, Kind)> {
        match expr {
            Expr::Number(n, _) => Ok((FormulaExpr::Number(*n), Kind::Number)),
            Expr::Property(name, _) => {
                let (id, kind) = self.resolve_component(name, formula)?;
                if !components.contains(&id) {
                    components.push(id);
                }
                Ok((FormulaExpr::Component(id, kind), kind))
            }
            Expr::UnaryOp(UnaryOp::Neg, operand, _) => {
                let (inner, kind) = self.analyze_expr(operand, formula, components)?;
                if kind == Kind::Date {
                    return Err(FormulaError::date_negated(expr.to_string()));
                }
                Ok((FormulaExpr::Neg(Box::new(inner)), Kind::Number))
            }
            Expr::BinaryOp(op, left, right, _) => {
                let (l, left_kind) = self.analyze_expr(left, formula, components)?;
                let (r, right_kind) = self.analyze_expr(right, formula, components)?;
                let kind = self.analyze_binary_op(*op, expr, left, right, left_kind, right_kind)?;
                Ok((FormulaExpr::Binary(*op, Box::new(l), Box::new(r)), kind))
            }
        }
    }

    /// Get the result kind of a binary operation.
    fn analyze_binary_op(
        &self,
        op: BinaryOp,
        whole: &Expr,
        left: &Expr,
        right: &Expr,
        left_kind: Kind,
        right_kind: Kind,
    ) -> FormulaResult<Kind> {
        match (op, left_kind, right_kind) {
            (_, Kind::Number, Kind::Number) => Ok(Kind::Number),
            (BinaryOp::Add, Kind::Date, Kind::Number) | (BinaryOp::Add, Kind::Number, Kind::Date) => {
                Ok(Kind::Date)
            }
            (BinaryOp::Add, Kind::Date, Kind::Date) => {
                Err(FormulaError::dates_added(whole.to_string()))
            }
            (BinaryOp::Sub, Kind::Date, Kind::Number) => Ok(Kind::Date),
            (BinaryOp::Sub, Kind::Date, Kind::Date) => Ok(Kind::Number),
            (BinaryOp::Sub, Kind::Number, Kind::Date) => {
                Err(FormulaError::date_subtracted_from_number(
                    whole.to_string(),
                    operand_text(right),
                    operand_text(left),
                ))
            }
            (BinaryOp::Mul | BinaryOp::Div, _, _) => {
                Err(FormulaError::date_scaled(whole.to_string(), op.symbol()))
            }
        }
    }

    /// Resolve a component name to a property and its operand kind.
    fn resolve_component(
        &self,
        name: &str,
        formula: Option<PropertyDefinitionId>,
    ) -> FormulaResult<(PropertyDefinitionId, Kind)> {
        let property = self
            .schema
            .find_property_with_hidden(name)
            .ok_or_else(|| FormulaError::unknown_property(name))?;

        if Some(property.id) == formula || property.kind.is_formula() {
            return Err(FormulaError::nested_formula(&property.name));
        }

        match Kind::of_property(&property.kind) {
            Some(kind) => Ok((property.id, kind)),
            None => Err(FormulaError::unsupported_component(
                &property.name,
                describe_for_message(&property.kind),
            )),
        }
    }

    /// Check every component is enabled on every card type of the formula.
    fn check_card_types(
        &self,
        components: &[PropertyDefinitionId],
        card_types: &BTreeSet<CardTypeId>,
    ) -> FormulaResult<()> {
        for &component in components {
            let missing: Vec<String> = self
                .schema
                .card_types()
                .into_iter()
                .filter(|ct| card_types.contains(&ct.id) && !ct.has_property(component))
                .map(|ct| ct.name.clone())
                .collect();
            if !missing.is_empty() {
                let name = self
                    .schema
                    .property(component)
                    .map(|p| p.name.clone())
                    .unwrap_or_else(|| component.to_string());
                return Err(FormulaError::incompatible_card_types(name, missing));
            }
        }
        Ok(())
    }
}

/// Text of an operand for messages; bare names are shown unquoted.
fn operand_text(expr: &Expr) -> String {
    match expr {
        Expr::Property(name, _) => name.clone(),
        other => other.to_string(),
    }
}

fn describe_for_message(kind: &PropertyKind) -> String {
    kind.describe().to_lowercase()
}
