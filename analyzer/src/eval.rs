//! Evaluation of compiled formulas against card values.

use crate::{CompiledFormula, FormulaExpr, Kind};
use chrono::{Duration, NaiveDate};
use mingle_core::{round_to, PropertyDefinitionId, Value};
use mingle_parser::BinaryOp;
use std::collections::BTreeMap;

/// Intermediate result while evaluating.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Operand {
    Null,
    Number(f64),
    Date(NaiveDate),
}

impl CompiledFormula {
    /// Compute the formula value for one card.
    ///
    /// Unset numeric components count as zero when `null_is_zero` is set;
    /// unset dates always make the result unset. Division by zero gives an
    /// unset value. Numbers are rounded to `precision` decimal places.
    pub fn evaluate(
        &self,
        values: &BTreeMap<PropertyDefinitionId, Value>,
        null_is_zero: bool,
        precision: u8,
    ) -> Value {
        match eval(&self.expr, values, null_is_zero) {
            Operand::Null => Value::Null,
            Operand::Number(n) if n.is_finite() => Value::Number(round_to(n, precision)),
            Operand::Number(_) => Value::Null,
            Operand::Date(d) => Value::Date(d),
        }
    }
}

fn eval(
    expr: &FormulaExpr,
    values: &BTreeMap<PropertyDefinitionId, Value>,
    null_is_zero: bool,
) -> Operand {
    match expr {
        FormulaExpr::Number(n) => Operand::Number(*n),
        FormulaExpr::Component(id, kind) => {
            match (component_value(values.get(id)), kind) {
                (Operand::Null, Kind::Number) if null_is_zero => Operand::Number(0.0),
                (operand, _) => operand,
            }
        }
        FormulaExpr::Neg(operand) => match eval(operand, values, null_is_zero) {
            Operand::Number(n) => Operand::Number(-n),
            _ => Operand::Null,
        },
        FormulaExpr::Binary(op, left, right) => apply(
            *op,
            eval(left, values, null_is_zero),
            eval(right, values, null_is_zero),
        ),
    }
}

fn component_value(value: Option<&Value>) -> Operand {
    match value {
        Some(Value::Number(n)) => Operand::Number(*n),
        Some(Value::Date(d)) => Operand::Date(*d),
        // Managed number lists may hold their value as text.
        Some(Value::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map(Operand::Number)
            .unwrap_or(Operand::Null),
        _ => Operand::Null,
    }
}

fn apply(op: BinaryOp, left: Operand, right: Operand) -> Operand {
    use Operand::*;
    match (op, left, right) {
        (_, Null, _) | (_, _, Null) => Null,
        (BinaryOp::Add, Number(a), Number(b)) => Number(a + b),
        (BinaryOp::Sub, Number(a), Number(b)) => Number(a - b),
        (BinaryOp::Mul, Number(a), Number(b)) => Number(a * b),
        (BinaryOp::Div, Number(_), Number(b)) if b == 0.0 => Null,
        (BinaryOp::Div, Number(a), Number(b)) => Number(a / b),
        (BinaryOp::Add, Date(d), Number(n)) | (BinaryOp::Add, Number(n), Date(d)) => {
            shift(d, n)
        }
        (BinaryOp::Sub, Date(d), Number(n)) => shift(d, -n),
        (BinaryOp::Sub, Date(a), Date(b)) => Number((a - b).num_days() as f64),
        _ => Null,
    }
}

fn shift(date: NaiveDate, days: f64) -> Operand {
    Duration::try_days(days.round() as i64)
        .and_then(|delta| date.checked_add_signed(delta))
        .map(Operand::Date)
        .unwrap_or(Operand::Null)
}
