//! Exponential and power functions

use crate::{Arity, FunctionMeta, ScalarFunction};
use reckon_core::CalcError;

pub struct Exp;
pub struct Sqrt;
pub struct Pow;

impl ScalarFunction for Exp {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "exp",
            description: "e raised to the argument",
            usage: "exp(x)",
            returns: "dimensionless",
            category: "exponential",
        }
    }

    fn arity(&self) -> Arity {
        Arity::Exact(1)
    }

    fn apply(&self, args: &[f64]) -> f64 {
        args[0].exp()
    }
}

impl ScalarFunction for Sqrt {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "sqrt",
            description: "Square root",
            usage: "sqrt(x)",
            returns: "dimensionless",
            category: "exponential",
        }
    }

    fn arity(&self) -> Arity {
        Arity::Exact(1)
    }

    fn check_domain(&self, args: &[f64]) -> Result<(), CalcError> {
        if args[0] < 0.0 {
            return Err(CalcError::domain(format!(
                "sqrt() requires a non-negative argument, got {}",
                args[0]
            )));
        }
        Ok(())
    }

    fn apply(&self, args: &[f64]) -> f64 {
        args[0].sqrt()
    }
}

impl ScalarFunction for Pow {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "pow",
            description: "Base raised to an exponent",
            usage: "pow(base, exponent)",
            returns: "dimensionless",
            category: "exponential",
        }
    }

    fn arity(&self) -> Arity {
        Arity::Exact(2)
    }

    fn check_domain(&self, args: &[f64]) -> Result<(), CalcError> {
        let (base, exponent) = (args[0], args[1]);
        if base < 0.0 && exponent.fract() != 0.0 {
            return Err(CalcError::domain(format!(
                "pow() with negative base {} requires an integer exponent, got {}",
                base, exponent
            )));
        }
        if base == 0.0 && exponent < 0.0 {
            return Err(CalcError::domain(
                "pow() cannot raise zero to a negative exponent",
            ));
        }
        Ok(())
    }

    fn apply(&self, args: &[f64]) -> f64 {
        args[0].powf(args[1])
    }
}
