//! Tree-walk evaluator
//!
//! Walks a parsed [`Expr`] and folds it into a single [`Value`].
//! Identifiers resolve at evaluation time: mathematical constants take
//! priority, then unit symbols, which enter the arithmetic as
//! magnitude-one quantities so `5 km` is just `5 * km`.

use crate::ast::{BinOp, Expr, UnaryOp};
use crate::value::Value;
use reckon_core::CalcError;
use reckon_functions::FunctionRegistry;
use reckon_units::{Quantity, UnitRegistry};

/// Recursion limit for nested expressions
pub const MAX_EVAL_DEPTH: usize = 50;

/// Named constants, resolved before unit symbols
const CONSTANTS: &[(&str, f64)] = &[
    ("pi", std::f64::consts::PI),
    ("e", std::f64::consts::E),
    ("tau", std::f64::consts::TAU),
    ("phi", 1.618033988749895), // (1 + sqrt 5) / 2
];

pub struct Evaluator<'a> {
    units: &'a UnitRegistry,
    functions: &'a FunctionRegistry,
}

impl<'a> Evaluator<'a> {
    pub fn new(units: &'a UnitRegistry, functions: &'a FunctionRegistry) -> Self {
        Self { units, functions }
    }

    pub fn eval(&self, expr: &Expr) -> Result<Value, CalcError> {
        self.eval_depth(expr, 0)
    }

    fn eval_depth(&self, expr: &Expr, depth: usize) -> Result<Value, CalcError> {
        if depth >= MAX_EVAL_DEPTH {
            return Err(CalcError::depth_exceeded(MAX_EVAL_DEPTH));
        }

        let value = match expr {
            Expr::Number(n) => Value::Scalar(*n),
            Expr::Identifier(name) => self.resolve_identifier(name)?,
            Expr::UnaryOp(op, inner) => {
                let value = self.eval_depth(inner, depth + 1)?;
                match op {
                    UnaryOp::Neg => value.negate(),
                    UnaryOp::Pos => value,
                }
            }
            Expr::BinaryOp(lhs, op, rhs) => {
                let left = self.eval_depth(lhs, depth + 1)?;
                let right = self.eval_depth(rhs, depth + 1)?;
                apply_binary(left, *op, right)?
            }
            Expr::FunctionCall(name, args) => self.eval_call(name, args, depth)?,
        };

        // Catches overflowing literals like 1e999 as well as
        // arithmetic that ran off to infinity or NaN.
        if value.is_finite() {
            Ok(value)
        } else {
            Err(CalcError::overflow())
        }
    }

    fn resolve_identifier(&self, name: &str) -> Result<Value, CalcError> {
        for (constant, value) in CONSTANTS {
            if name == *constant {
                return Ok(Value::Scalar(*value));
            }
        }
        if let Some(unit) = self.units.get(name) {
            return Ok(Value::Quantity(Quantity::new(1.0, unit)));
        }
        let mut err = CalcError::unknown_identifier(name);
        if let Some(hint) = self.units.suggest(name) {
            err = err.with_suggestion(hint);
        }
        Err(err)
    }

    fn eval_call(&self, name: &str, args: &[Expr], depth: usize) -> Result<Value, CalcError> {
        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            let value = self.eval_depth(arg, depth + 1)?;
            match value.as_dimensionless() {
                Some(v) => values.push(v),
                None => {
                    return Err(CalcError::dimensionality(format!(
                        "{}() requires dimensionless arguments, got a quantity in {}",
                        name,
                        value.unit_symbol().unwrap_or_default()
                    ))
                    .with_suggestion("Convert the argument to a plain number first"))
                }
            }
        }
        Ok(Value::Scalar(self.functions.call(name, &values)?))
    }
}

fn apply_binary(lhs: Value, op: BinOp, rhs: Value) -> Result<Value, CalcError> {
    match op {
        BinOp::Add => lhs.add(rhs),
        BinOp::Sub => lhs.sub(rhs),
        BinOp::Mul => lhs.mul(rhs),
        BinOp::Div => lhs.div(rhs),
        BinOp::Rem => lhs.rem(rhs),
        BinOp::Pow => lhs.pow(rhs),
    }
}
