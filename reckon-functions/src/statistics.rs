//! Statistical functions over variadic argument lists
//!
//! `stdev` and `variance` are the sample forms (n - 1 divisor); sample
//! statistics are undefined for fewer than two values, so a single
//! argument is a domain violation. When several values tie for the
//! highest count, `mode` returns the one that appeared first.

use crate::{Arity, FunctionMeta, ScalarFunction};
use reckon_core::CalcError;

pub struct Mean;
pub struct Median;
pub struct Mode;
pub struct Stdev;
pub struct Variance;

impl ScalarFunction for Mean {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "mean",
            description: "Arithmetic mean of the arguments",
            usage: "mean(x1, x2, ...)",
            returns: "dimensionless",
            category: "statistical",
        }
    }

    fn arity(&self) -> Arity {
        Arity::AtLeast(1)
    }

    fn apply(&self, args: &[f64]) -> f64 {
        mean_of(args)
    }
}

impl ScalarFunction for Median {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "median",
            description: "Middle value of the sorted arguments",
            usage: "median(x1, x2, ...)",
            returns: "dimensionless",
            category: "statistical",
        }
    }

    fn arity(&self) -> Arity {
        Arity::AtLeast(1)
    }

    fn apply(&self, args: &[f64]) -> f64 {
        let mut sorted = args.to_vec();
        sorted.sort_by(f64::total_cmp);
        let mid = sorted.len() / 2;
        if sorted.len() % 2 == 1 {
            sorted[mid]
        } else {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        }
    }
}

impl ScalarFunction for Mode {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "mode",
            description: "Most frequent argument, first seen on ties",
            usage: "mode(x1, x2, ...)",
            returns: "dimensionless",
            category: "statistical",
        }
    }

    fn arity(&self) -> Arity {
        Arity::AtLeast(1)
    }

    fn apply(&self, args: &[f64]) -> f64 {
        let mut best_value = args[0];
        let mut best_count = 0usize;
        for (i, &candidate) in args.iter().enumerate() {
            // Count each distinct value once, at its first occurrence
            if args[..i].iter().any(|&prev| prev == candidate) {
                continue;
            }
            let count = args.iter().filter(|&&v| v == candidate).count();
            if count > best_count {
                best_count = count;
                best_value = candidate;
            }
        }
        best_value
    }
}

impl ScalarFunction for Stdev {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "stdev",
            description: "Sample standard deviation of the arguments",
            usage: "stdev(x1, x2, ...)",
            returns: "dimensionless",
            category: "statistical",
        }
    }

    fn arity(&self) -> Arity {
        Arity::AtLeast(1)
    }

    fn check_domain(&self, args: &[f64]) -> Result<(), CalcError> {
        require_samples("stdev", args)
    }

    fn apply(&self, args: &[f64]) -> f64 {
        sample_variance(args).sqrt()
    }
}

impl ScalarFunction for Variance {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "variance",
            description: "Sample variance of the arguments",
            usage: "variance(x1, x2, ...)",
            returns: "dimensionless",
            category: "statistical",
        }
    }

    fn arity(&self) -> Arity {
        Arity::AtLeast(1)
    }

    fn check_domain(&self, args: &[f64]) -> Result<(), CalcError> {
        require_samples("variance", args)
    }

    fn apply(&self, args: &[f64]) -> f64 {
        sample_variance(args)
    }
}

fn require_samples(name: &str, args: &[f64]) -> Result<(), CalcError> {
    if args.len() < 2 {
        return Err(CalcError::domain(format!(
            "{}() requires at least two samples, got {}",
            name,
            args.len()
        )));
    }
    Ok(())
}

fn mean_of(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn sample_variance(values: &[f64]) -> f64 {
    let mean = mean_of(values);
    let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    sum_sq / (values.len() - 1) as f64
}
