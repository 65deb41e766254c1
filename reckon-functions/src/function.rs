//! Function trait and metadata

use reckon_core::CalcError;
use std::fmt;

/// How many arguments a function accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly this many arguments
    Exact(usize),
    /// This many or more (variadic)
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(&self, count: usize) -> bool {
        match self {
            Arity::Exact(n) => count == *n,
            Arity::AtLeast(n) => count >= *n,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exact(1) => write!(f, "exactly 1 argument"),
            Arity::Exact(n) => write!(f, "exactly {} arguments", n),
            Arity::AtLeast(1) => write!(f, "at least 1 argument"),
            Arity::AtLeast(n) => write!(f, "at least {} arguments", n),
        }
    }
}

/// Static description of a function, used for listings and errors
#[derive(Debug, Clone, Copy)]
pub struct FunctionMeta {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub returns: &'static str,
    pub category: &'static str,
}

/// A pure scalar function over dimensionless arguments
pub trait ScalarFunction: Send + Sync {
    fn meta(&self) -> FunctionMeta;

    fn arity(&self) -> Arity;

    /// Validate argument values; the registry has already checked arity
    fn check_domain(&self, _args: &[f64]) -> Result<(), CalcError> {
        Ok(())
    }

    /// Compute the result; only called after arity and domain checks pass
    fn apply(&self, args: &[f64]) -> f64;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arity_accepts() {
        assert!(Arity::Exact(2).accepts(2));
        assert!(!Arity::Exact(2).accepts(1));
        assert!(!Arity::Exact(2).accepts(3));
        assert!(Arity::AtLeast(1).accepts(1));
        assert!(Arity::AtLeast(1).accepts(10));
        assert!(!Arity::AtLeast(2).accepts(1));
    }

    #[test]
    fn test_arity_display() {
        assert_eq!(Arity::Exact(1).to_string(), "exactly 1 argument");
        assert_eq!(Arity::Exact(2).to_string(), "exactly 2 arguments");
        assert_eq!(Arity::AtLeast(1).to_string(), "at least 1 argument");
        assert_eq!(Arity::AtLeast(2).to_string(), "at least 2 arguments");
    }
}
