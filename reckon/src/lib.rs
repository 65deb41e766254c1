//! Unit-aware expression evaluation
//!
//! Parses arithmetic expressions, evaluates them with full dimensional
//! analysis, and converts between units. Expressions may mix plain
//! numbers, constants, function calls, and quantities written as a
//! number followed by a unit symbol:
//!
//! ```
//! use reckon::Calculator;
//!
//! let calc = Calculator::new();
//!
//! let outcome = calc.evaluate("2 + 3 * 4").unwrap();
//! assert_eq!(outcome.value, 14.0);
//! assert_eq!(outcome.unit, None);
//!
//! let speed = calc.evaluate("100 km / 2 h").unwrap();
//! assert_eq!(speed.value, 50.0);
//! assert_eq!(speed.unit.as_deref(), Some("km/h"));
//!
//! let km = calc.evaluate("5000 m to km").unwrap();
//! assert_eq!(km.value, 5.0);
//! assert_eq!(km.unit.as_deref(), Some("km"));
//! ```

mod ast;
mod eval;
mod parser;
mod value;

pub use ast::{BinOp, Expr, UnaryOp};
pub use eval::{Evaluator, MAX_EVAL_DEPTH};
pub use parser::{parse_expression, MAX_EXPRESSION_LENGTH};
pub use value::Value;

pub use reckon_core::{CalcError, ErrorContext, ErrorKind};
pub use reckon_functions::FunctionRegistry;
pub use reckon_units::{Quantity, Unit, UnitRegistry};

use reckon_units::parse_quantity_string;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Result of a successful evaluation
///
/// `unit` is absent for dimensionless results, so scalar outcomes
/// serialize as just `{"value": 14.0}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalOutcome {
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// The calculator facade: registries plus the evaluation pipeline
///
/// Registries are built once at construction and shared behind [`Arc`],
/// so cloning handles out to concurrent callers stays cheap.
pub struct Calculator {
    units: Arc<UnitRegistry>,
    functions: Arc<FunctionRegistry>,
}

impl Calculator {
    pub fn new() -> Self {
        let units = Arc::new(UnitRegistry::new());
        let functions = Arc::new(reckon_functions::standard_registry());
        tracing::debug!(
            "Calculator ready with {} units and {} functions",
            units.symbols().len(),
            functions.len()
        );
        Self { units, functions }
    }

    /// Evaluate an expression or a conversion phrase
    ///
    /// A phrase of the form `<quantity> to <unit>` is handled as a
    /// conversion request before the expression grammar sees the
    /// input; anything else goes through parse and evaluation.
    pub fn evaluate(&self, input: &str) -> Result<EvalOutcome, CalcError> {
        parser::check_input(input)?;

        if let Some(result) = self.try_conversion_phrase(input) {
            return result;
        }

        let expr = parser::parse_checked(input)?;
        let value = Evaluator::new(&self.units, &self.functions).eval(&expr)?;
        Ok(outcome_from_value(value))
    }

    /// Convert a value between two named units
    pub fn convert(&self, value: f64, from: &str, to: &str) -> Result<f64, CalcError> {
        self.units.convert(value, from, to)
    }

    /// Unit symbols grouped by category, in registration order
    pub fn list_units(&self) -> BTreeMap<String, Vec<String>> {
        self.units.categories()
    }

    /// Function names grouped by category, in registration order
    pub fn list_functions(&self) -> BTreeMap<String, Vec<String>> {
        self.functions.by_category()
    }

    pub fn units(&self) -> &UnitRegistry {
        &self.units
    }

    pub fn functions(&self) -> &FunctionRegistry {
        &self.functions
    }

    /// Recognize `<quantity> to <unit>`, e.g. `5 km to mi`
    ///
    /// Returns `None` when the input does not commit to the phrase
    /// form, in which case it falls through to the expression grammar.
    /// Once the left side reads as a quantity and a target name is
    /// present, the phrase is committed and its errors are final.
    fn try_conversion_phrase(&self, input: &str) -> Option<Result<EvalOutcome, CalcError>> {
        if !input.contains(" to ") {
            return None;
        }
        let parts: Vec<&str> = input.split(" to ").collect();
        if parts.len() != 2 {
            return None;
        }

        let (value, from_unit) = match parse_quantity_string(&self.units, parts[0]) {
            Ok(parsed) => parsed,
            Err(_) => return None,
        };
        let target_name = parts[1].trim();
        if target_name.is_empty() {
            return None;
        }

        Some(self.finish_conversion(value, from_unit, target_name))
    }

    fn finish_conversion(
        &self,
        value: f64,
        from_unit: Option<Arc<Unit>>,
        target_name: &str,
    ) -> Result<EvalOutcome, CalcError> {
        let target = self.units.resolve(target_name)?;
        let from = match from_unit {
            Some(unit) => unit,
            None => {
                return Err(CalcError::dimensionality(format!(
                    "Cannot convert a dimensionless value to {}",
                    target.symbol
                ))
                .with_suggestion("Attach a source unit, e.g. '5 m to km'"))
            }
        };
        let converted = from.convert_to(value, &target)?;
        tracing::debug!(
            "Converted {} {} to {} {}",
            value,
            from.symbol,
            converted,
            target.symbol
        );
        Ok(EvalOutcome {
            value: converted,
            unit: Some(target.symbol.clone()),
        })
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

fn outcome_from_value(value: Value) -> EvalOutcome {
    match value {
        Value::Scalar(v) => EvalOutcome {
            value: v,
            unit: None,
        },
        Value::Quantity(q) => EvalOutcome {
            value: q.value,
            unit: Some(q.unit.symbol.clone()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_outcome_has_no_unit() {
        let calc = Calculator::new();
        let outcome = calc.evaluate("2 + 2").unwrap();
        assert_eq!(outcome.value, 4.0);
        assert_eq!(outcome.unit, None);
    }

    #[test]
    fn test_quantity_outcome_reports_unit() {
        let calc = Calculator::new();
        let outcome = calc.evaluate("3 km + 400 m").unwrap();
        assert_eq!(outcome.value, 3.4);
        assert_eq!(outcome.unit.as_deref(), Some("km"));
    }

    #[test]
    fn test_conversion_phrase() {
        let calc = Calculator::new();
        let outcome = calc.evaluate("5 km to mi").unwrap();
        assert!((outcome.value - 3.106855961).abs() < 1e-6);
        assert_eq!(outcome.unit.as_deref(), Some("mi"));
    }

    #[test]
    fn test_conversion_phrase_accepts_aliases() {
        let calc = Calculator::new();
        let outcome = calc.evaluate("5 kilometers to miles").unwrap();
        assert_eq!(outcome.unit.as_deref(), Some("mi"));
    }

    #[test]
    fn test_conversion_phrase_compound_units() {
        let calc = Calculator::new();
        let outcome = calc.evaluate("10 m/s to km/h").unwrap();
        assert!((outcome.value - 36.0).abs() < 1e-9);
        assert_eq!(outcome.unit.as_deref(), Some("km/h"));
    }

    #[test]
    fn test_committed_phrase_with_unknown_target() {
        let calc = Calculator::new();
        let err = calc.evaluate("5 km to mle").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Evaluation);
        assert!(err.message.contains("mle"));
        assert!(err.suggestion.unwrap().contains("Similar"));
    }

    #[test]
    fn test_committed_phrase_incompatible_dimensions() {
        let calc = Calculator::new();
        let err = calc.evaluate("5 km to kg").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Dimensionality);
    }

    #[test]
    fn test_dimensionless_left_side_is_rejected() {
        let calc = Calculator::new();
        let err = calc.evaluate("5 to km").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Dimensionality);
        assert!(err.message.contains("dimensionless"));
    }

    #[test]
    fn test_non_quantity_left_side_falls_through_to_grammar() {
        // "2 + 3 to km" is not a conversion phrase; the grammar then
        // rejects the dangling identifier.
        let calc = Calculator::new();
        let err = calc.evaluate("2 + 3 to km").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Syntax);
    }

    #[test]
    fn test_phrase_with_two_separators_falls_through() {
        let calc = Calculator::new();
        let err = calc.evaluate("5 km to mi to ft").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Syntax);
    }

    #[test]
    fn test_input_checks_run_before_phrase_handling() {
        let calc = Calculator::new();
        let err = calc.evaluate("5 km @ to mi").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Syntax);
        assert!(err.message.contains("invalid character"));
    }

    #[test]
    fn test_convert() {
        let calc = Calculator::new();
        let miles = calc.convert(5.0, "km", "mi").unwrap();
        assert!((miles - 3.106855961).abs() < 1e-6);
    }

    #[test]
    fn test_convert_temperature_fixed_points() {
        let calc = Calculator::new();
        assert!((calc.convert(0.0, "degC", "degF").unwrap() - 32.0).abs() < 1e-9);
        assert!((calc.convert(100.0, "degC", "degF").unwrap() - 212.0).abs() < 1e-9);
        assert!((calc.convert(-40.0, "degF", "degC").unwrap() + 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_list_units_is_grouped_and_ordered() {
        let calc = Calculator::new();
        let units = calc.list_units();
        assert_eq!(
            units["length"],
            vec!["m", "km", "cm", "mm", "in", "ft", "yd", "mi"]
        );
        assert!(units.contains_key("temperature"));
        // BTreeMap keys come out sorted
        let categories: Vec<&String> = units.keys().collect();
        let mut sorted = categories.clone();
        sorted.sort();
        assert_eq!(categories, sorted);
    }

    #[test]
    fn test_list_functions_is_grouped_and_ordered() {
        let calc = Calculator::new();
        let functions = calc.list_functions();
        assert_eq!(
            functions["trigonometric"],
            vec!["sin", "cos", "tan", "asin", "acos", "atan"]
        );
        assert_eq!(
            functions["statistical"],
            vec!["mean", "median", "mode", "stdev", "variance"]
        );
    }

    #[test]
    fn test_outcome_serialization_skips_missing_unit() {
        let scalar = EvalOutcome {
            value: 14.0,
            unit: None,
        };
        assert_eq!(serde_json::to_string(&scalar).unwrap(), r#"{"value":14.0}"#);

        let quantity = EvalOutcome {
            value: 3.4,
            unit: Some("km".to_string()),
        };
        assert_eq!(
            serde_json::to_string(&quantity).unwrap(),
            r#"{"value":3.4,"unit":"km"}"#
        );
    }
}
