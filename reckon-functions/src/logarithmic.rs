//! Logarithmic functions
//!
//! `log` and `log10` are both base 10; `ln` is the natural logarithm.
//! All of them require a strictly positive argument.

use crate::{Arity, FunctionMeta, ScalarFunction};
use reckon_core::CalcError;

pub struct Log;
pub struct Log10;
pub struct Ln;

impl ScalarFunction for Log {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "log",
            description: "Base-10 logarithm",
            usage: "log(x)",
            returns: "dimensionless",
            category: "logarithmic",
        }
    }

    fn arity(&self) -> Arity {
        Arity::Exact(1)
    }

    fn check_domain(&self, args: &[f64]) -> Result<(), CalcError> {
        require_positive("log", args[0])
    }

    fn apply(&self, args: &[f64]) -> f64 {
        args[0].log10()
    }
}

impl ScalarFunction for Log10 {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "log10",
            description: "Base-10 logarithm",
            usage: "log10(x)",
            returns: "dimensionless",
            category: "logarithmic",
        }
    }

    fn arity(&self) -> Arity {
        Arity::Exact(1)
    }

    fn check_domain(&self, args: &[f64]) -> Result<(), CalcError> {
        require_positive("log10", args[0])
    }

    fn apply(&self, args: &[f64]) -> f64 {
        args[0].log10()
    }
}

impl ScalarFunction for Ln {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "ln",
            description: "Natural logarithm",
            usage: "ln(x)",
            returns: "dimensionless",
            category: "logarithmic",
        }
    }

    fn arity(&self) -> Arity {
        Arity::Exact(1)
    }

    fn check_domain(&self, args: &[f64]) -> Result<(), CalcError> {
        require_positive("ln", args[0])
    }

    fn apply(&self, args: &[f64]) -> f64 {
        args[0].ln()
    }
}

fn require_positive(name: &str, x: f64) -> Result<(), CalcError> {
    if x <= 0.0 {
        return Err(CalcError::domain(format!(
            "{}() requires a positive argument, got {}",
            name, x
        )));
    }
    Ok(())
}
