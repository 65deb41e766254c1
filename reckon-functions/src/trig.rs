//! Trigonometric functions
//!
//! Angles are measured in degrees: sin/cos/tan take degrees, and the
//! inverse functions return degrees.

use crate::{Arity, FunctionMeta, ScalarFunction};
use reckon_core::CalcError;

pub struct Sin;
pub struct Cos;
pub struct Tan;
pub struct Asin;
pub struct Acos;
pub struct Atan;

impl ScalarFunction for Sin {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "sin",
            description: "Sine of an angle in degrees",
            usage: "sin(x)",
            returns: "dimensionless",
            category: "trigonometric",
        }
    }

    fn arity(&self) -> Arity {
        Arity::Exact(1)
    }

    fn apply(&self, args: &[f64]) -> f64 {
        args[0].to_radians().sin()
    }
}

impl ScalarFunction for Cos {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "cos",
            description: "Cosine of an angle in degrees",
            usage: "cos(x)",
            returns: "dimensionless",
            category: "trigonometric",
        }
    }

    fn arity(&self) -> Arity {
        Arity::Exact(1)
    }

    fn apply(&self, args: &[f64]) -> f64 {
        args[0].to_radians().cos()
    }
}

impl ScalarFunction for Tan {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "tan",
            description: "Tangent of an angle in degrees",
            usage: "tan(x)",
            returns: "dimensionless",
            category: "trigonometric",
        }
    }

    fn arity(&self) -> Arity {
        Arity::Exact(1)
    }

    fn apply(&self, args: &[f64]) -> f64 {
        args[0].to_radians().tan()
    }
}

impl ScalarFunction for Asin {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "asin",
            description: "Inverse sine, result in degrees",
            usage: "asin(x)",
            returns: "dimensionless",
            category: "trigonometric",
        }
    }

    fn arity(&self) -> Arity {
        Arity::Exact(1)
    }

    fn check_domain(&self, args: &[f64]) -> Result<(), CalcError> {
        require_unit_interval("asin", args[0])
    }

    fn apply(&self, args: &[f64]) -> f64 {
        args[0].asin().to_degrees()
    }
}

impl ScalarFunction for Acos {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "acos",
            description: "Inverse cosine, result in degrees",
            usage: "acos(x)",
            returns: "dimensionless",
            category: "trigonometric",
        }
    }

    fn arity(&self) -> Arity {
        Arity::Exact(1)
    }

    fn check_domain(&self, args: &[f64]) -> Result<(), CalcError> {
        require_unit_interval("acos", args[0])
    }

    fn apply(&self, args: &[f64]) -> f64 {
        args[0].acos().to_degrees()
    }
}

impl ScalarFunction for Atan {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "atan",
            description: "Inverse tangent, result in degrees",
            usage: "atan(x)",
            returns: "dimensionless",
            category: "trigonometric",
        }
    }

    fn arity(&self) -> Arity {
        Arity::Exact(1)
    }

    fn apply(&self, args: &[f64]) -> f64 {
        args[0].atan().to_degrees()
    }
}

fn require_unit_interval(name: &str, x: f64) -> Result<(), CalcError> {
    if !(-1.0..=1.0).contains(&x) {
        return Err(CalcError::domain(format!(
            "{}() argument must be between -1 and 1, got {}",
            name, x
        )));
    }
    Ok(())
}
