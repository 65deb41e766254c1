//! Runtime values
//!
//! Every evaluation step produces either a bare scalar or a quantity
//! with a unit. Arithmetic between the two follows dimensional rules:
//! addition needs matching dimensions, multiplication composes them,
//! and a quantity whose dimensions cancel collapses back to a scalar.

use reckon_core::CalcError;
use reckon_units::{Quantity, Unit};
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(f64),
    Quantity(Quantity),
}

impl Value {
    /// Wrap a quantity, collapsing dimensionless ones to scalars
    ///
    /// The collapse goes through the SI magnitude so that ratios of
    /// different units of the same dimension come out right:
    /// 10 km / 5000 m is 2, not 0.002.
    pub fn from_quantity(quantity: Quantity) -> Value {
        if quantity.is_dimensionless() {
            Value::Scalar(quantity.si_value())
        } else {
            Value::Quantity(quantity)
        }
    }

    /// The numeric magnitude, in the value's own unit
    pub fn magnitude(&self) -> f64 {
        match self {
            Value::Scalar(v) => *v,
            Value::Quantity(q) => q.value,
        }
    }

    /// The unit symbol, if the value carries one
    pub fn unit_symbol(&self) -> Option<String> {
        match self {
            Value::Scalar(_) => None,
            Value::Quantity(q) => Some(q.unit.symbol.clone()),
        }
    }

    /// Extract a plain number, accepting scalars and dimensionless
    /// quantities
    pub fn as_dimensionless(&self) -> Option<f64> {
        match self {
            Value::Scalar(v) => Some(*v),
            Value::Quantity(q) if q.is_dimensionless() => Some(q.si_value()),
            Value::Quantity(_) => None,
        }
    }

    /// Whether the magnitude (and any unit scale factor) is finite
    pub fn is_finite(&self) -> bool {
        match self {
            Value::Scalar(v) => v.is_finite(),
            Value::Quantity(q) => q.value.is_finite() && q.unit.to_si_factor.is_finite(),
        }
    }

    pub fn negate(self) -> Value {
        match self {
            Value::Scalar(v) => Value::Scalar(-v),
            Value::Quantity(q) => Value::Quantity(q.scale(-1.0)),
        }
    }

    /// Addition; the right operand is converted into the left's unit
    pub fn add(self, rhs: Value) -> Result<Value, CalcError> {
        match (self, rhs) {
            (Value::Scalar(a), Value::Scalar(b)) => Ok(Value::Scalar(a + b)),
            (Value::Quantity(a), Value::Quantity(b)) => Ok(Value::from_quantity(a.add(&b)?)),
            (a, b) => Err(mixed_operands("add", &a, &b)),
        }
    }

    /// Subtraction; the right operand is converted into the left's unit
    pub fn sub(self, rhs: Value) -> Result<Value, CalcError> {
        match (self, rhs) {
            (Value::Scalar(a), Value::Scalar(b)) => Ok(Value::Scalar(a - b)),
            (Value::Quantity(a), Value::Quantity(b)) => Ok(Value::from_quantity(a.sub(&b)?)),
            (a, b) => Err(mixed_operands("subtract", &a, &b)),
        }
    }

    /// Multiplication; dimension exponents add up
    pub fn mul(self, rhs: Value) -> Result<Value, CalcError> {
        match (self, rhs) {
            (Value::Scalar(a), Value::Scalar(b)) => Ok(Value::Scalar(a * b)),
            (Value::Scalar(a), Value::Quantity(b)) => Ok(Value::from_quantity(b.scale(a))),
            (Value::Quantity(a), Value::Scalar(b)) => Ok(Value::from_quantity(a.scale(b))),
            (Value::Quantity(a), Value::Quantity(b)) => Ok(Value::from_quantity(a.mul(&b))),
        }
    }

    /// Division; dimension exponents subtract, and a zero divisor
    /// magnitude is rejected before anything is computed
    pub fn div(self, rhs: Value) -> Result<Value, CalcError> {
        if rhs.magnitude() == 0.0 {
            return Err(CalcError::div_zero());
        }
        match (self, rhs) {
            (Value::Scalar(a), Value::Scalar(b)) => Ok(Value::Scalar(a / b)),
            (Value::Scalar(a), Value::Quantity(b)) => {
                let lifted = Quantity::new(a, Arc::new(Unit::dimensionless()));
                Ok(Value::from_quantity(lifted.div(&b)))
            }
            (Value::Quantity(a), Value::Scalar(b)) => {
                Ok(Value::from_quantity(Quantity::new(a.value / b, a.unit)))
            }
            (Value::Quantity(a), Value::Quantity(b)) => Ok(Value::from_quantity(a.div(&b))),
        }
    }

    /// Remainder with the sign of the dividend; defined for plain
    /// numbers only
    pub fn rem(self, rhs: Value) -> Result<Value, CalcError> {
        match (&self, &rhs) {
            (Value::Scalar(a), Value::Scalar(b)) => {
                if *b == 0.0 {
                    return Err(CalcError::div_zero());
                }
                Ok(Value::Scalar(a % b))
            }
            _ => Err(mixed_operands("take the remainder of", &self, &rhs)
                .with_suggestion("The % operator works on plain numbers only")),
        }
    }

    /// Exponentiation
    ///
    /// The exponent must be a plain number. A unit-bearing base
    /// additionally requires an integer exponent, since fractional
    /// dimension exponents have no meaning here.
    pub fn pow(self, rhs: Value) -> Result<Value, CalcError> {
        let exponent = match rhs.as_dimensionless() {
            Some(e) => e,
            None => {
                return Err(CalcError::dimensionality(
                    "Exponents must be dimensionless numbers",
                ))
            }
        };

        match self {
            Value::Scalar(base) => {
                if base == 0.0 && exponent < 0.0 {
                    return Err(CalcError::div_zero());
                }
                if base < 0.0 && exponent.fract() != 0.0 {
                    return Err(CalcError::evaluation(format!(
                        "Cannot raise negative base {} to fractional exponent {}",
                        base, exponent
                    )));
                }
                Ok(Value::Scalar(base.powf(exponent)))
            }
            Value::Quantity(q) => {
                if exponent.fract() != 0.0 {
                    return Err(CalcError::dimensionality(format!(
                        "Cannot raise a quantity in {} to non-integer exponent {}",
                        q.unit.symbol, exponent
                    ))
                    .with_suggestion("Use an integer exponent for unit-bearing values"));
                }
                if q.value == 0.0 && exponent < 0.0 {
                    return Err(CalcError::div_zero());
                }
                Ok(Value::from_quantity(q.powi(exponent as i32)))
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Scalar(v) => write!(f, "{}", v),
            Value::Quantity(q) => write!(f, "{}", q),
        }
    }
}

fn mixed_operands(verb: &str, lhs: &Value, rhs: &Value) -> CalcError {
    CalcError::dimensionality(format!(
        "Cannot {} {} and {}",
        verb,
        describe(lhs),
        describe(rhs)
    ))
}

fn describe(value: &Value) -> String {
    match value {
        Value::Scalar(_) => "a dimensionless value".to_string(),
        Value::Quantity(q) => format!("a quantity in {}", q.unit.symbol),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reckon_core::ErrorKind;
    use reckon_units::{Dimension, UnitRegistry};

    fn quantity(value: f64, symbol: &str) -> Value {
        let registry = UnitRegistry::new();
        Value::Quantity(Quantity::new(value, registry.get(symbol).unwrap()))
    }

    #[test]
    fn test_scalar_arithmetic() {
        assert_eq!(
            Value::Scalar(2.0).add(Value::Scalar(3.0)).unwrap(),
            Value::Scalar(5.0)
        );
        assert_eq!(
            Value::Scalar(2.0).mul(Value::Scalar(3.0)).unwrap(),
            Value::Scalar(6.0)
        );
    }

    #[test]
    fn test_add_converts_right_operand() {
        let sum = quantity(1.0, "km").add(quantity(500.0, "m")).unwrap();
        assert_eq!(sum, quantity(1.5, "km"));
        assert_eq!(sum.unit_symbol().unwrap(), "km");
    }

    #[test]
    fn test_add_incompatible_dimensions() {
        let err = quantity(1.0, "m").add(quantity(1.0, "s")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Dimensionality);
    }

    #[test]
    fn test_add_scalar_to_quantity_fails() {
        let err = Value::Scalar(1.0).add(quantity(1.0, "m")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Dimensionality);
        let err = quantity(1.0, "m").add(Value::Scalar(1.0)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Dimensionality);
    }

    #[test]
    fn test_scalar_scales_quantity() {
        let result = Value::Scalar(3.0).mul(quantity(2.0, "m")).unwrap();
        assert_eq!(result, quantity(6.0, "m"));
    }

    #[test]
    fn test_division_cancels_dimensions_to_scalar() {
        let result = quantity(10.0, "km").div(quantity(5000.0, "m")).unwrap();
        assert_eq!(result, Value::Scalar(2.0));
    }

    #[test]
    fn test_division_composes_units() {
        let result = quantity(100.0, "m").div(quantity(10.0, "s")).unwrap();
        match result {
            Value::Quantity(q) => {
                assert_eq!(q.value, 10.0);
                assert_eq!(q.dimension(), Dimension::VELOCITY);
            }
            other => panic!("expected quantity, got {:?}", other),
        }
    }

    #[test]
    fn test_division_by_zero() {
        let err = Value::Scalar(1.0).div(Value::Scalar(0.0)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Evaluation);
        assert!(err.message.contains("Division by zero"));

        let err = quantity(1.0, "m").div(quantity(0.0, "s")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Evaluation);
    }

    #[test]
    fn test_scalar_divided_by_quantity_inverts_unit() {
        let result = Value::Scalar(10.0).div(quantity(2.0, "s")).unwrap();
        match result {
            Value::Quantity(q) => {
                assert_eq!(q.value, 5.0);
                assert_eq!(q.dimension(), Dimension::TIME.invert());
            }
            other => panic!("expected quantity, got {:?}", other),
        }
    }

    #[test]
    fn test_remainder() {
        assert_eq!(
            Value::Scalar(7.0).rem(Value::Scalar(3.0)).unwrap(),
            Value::Scalar(1.0)
        );
        // sign follows the dividend
        assert_eq!(
            Value::Scalar(-7.0).rem(Value::Scalar(3.0)).unwrap(),
            Value::Scalar(-1.0)
        );
        assert_eq!(
            Value::Scalar(7.0).rem(Value::Scalar(-3.0)).unwrap(),
            Value::Scalar(1.0)
        );
    }

    #[test]
    fn test_remainder_rejects_units() {
        let err = quantity(7.0, "m").rem(Value::Scalar(3.0)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Dimensionality);
    }

    #[test]
    fn test_remainder_by_zero() {
        let err = Value::Scalar(7.0).rem(Value::Scalar(0.0)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Evaluation);
    }

    #[test]
    fn test_pow_scalar() {
        assert_eq!(
            Value::Scalar(2.0).pow(Value::Scalar(10.0)).unwrap(),
            Value::Scalar(1024.0)
        );
        assert_eq!(
            Value::Scalar(2.0).pow(Value::Scalar(-1.0)).unwrap(),
            Value::Scalar(0.5)
        );
    }

    #[test]
    fn test_pow_zero_base_negative_exponent() {
        let err = Value::Scalar(0.0).pow(Value::Scalar(-1.0)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Evaluation);
        assert!(err.message.contains("Division by zero"));
    }

    #[test]
    fn test_pow_negative_base_fractional_exponent() {
        let err = Value::Scalar(-8.0).pow(Value::Scalar(0.5)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Evaluation);
    }

    #[test]
    fn test_pow_quantity_integer_exponent() {
        let result = quantity(5.0, "km").pow(Value::Scalar(2.0)).unwrap();
        match result {
            Value::Quantity(q) => {
                assert_eq!(q.value, 25.0);
                assert_eq!(q.dimension(), Dimension::AREA);
                assert_eq!(q.unit.symbol, "km^2");
            }
            other => panic!("expected quantity, got {:?}", other),
        }
    }

    #[test]
    fn test_pow_quantity_fractional_exponent_fails() {
        let err = quantity(4.0, "m").pow(Value::Scalar(0.5)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Dimensionality);
    }

    #[test]
    fn test_pow_quantity_exponent_fails() {
        let err = Value::Scalar(2.0).pow(quantity(2.0, "m")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Dimensionality);
    }

    #[test]
    fn test_pow_zero_exponent_collapses_unit() {
        let result = quantity(5.0, "km").pow(Value::Scalar(0.0)).unwrap();
        assert_eq!(result, Value::Scalar(1.0));
    }

    #[test]
    fn test_negate() {
        assert_eq!(Value::Scalar(2.0).negate(), Value::Scalar(-2.0));
        assert_eq!(quantity(2.0, "m").negate(), quantity(-2.0, "m"));
    }
}
