//! Mingle Analyzer
//!
//! Name resolution and type checking of formula expressions against the
//! project schema, plus evaluation of compiled formulas on card values.

mod analyzer;
mod error;
mod eval;
mod formula;
mod types;

pub use analyzer::FormulaAnalyzer;
pub use error::{FormulaError, FormulaResult};
pub use formula::{CompiledFormula, FormulaExpr};
pub use types::*;
