//! Reckon Functions - Scalar Function Library
//!
//! Named functions callable from expressions, all operating on plain
//! `f64` values. Trigonometry works in degrees. Statistical functions
//! are variadic and use the sample (n - 1) forms.

pub mod exponential;
pub mod logarithmic;
pub mod statistics;
pub mod trig;

mod function;
mod registry;

pub use function::{Arity, FunctionMeta, ScalarFunction};
pub use registry::FunctionRegistry;

/// Load the standard functions into a registry
pub fn load_standard_functions(registry: FunctionRegistry) -> FunctionRegistry {
    registry
        .with_function(trig::Sin)
        .with_function(trig::Cos)
        .with_function(trig::Tan)
        .with_function(trig::Asin)
        .with_function(trig::Acos)
        .with_function(trig::Atan)
        .with_function(logarithmic::Log)
        .with_function(logarithmic::Log10)
        .with_function(logarithmic::Ln)
        .with_function(exponential::Exp)
        .with_function(exponential::Sqrt)
        .with_function(exponential::Pow)
        .with_function(statistics::Mean)
        .with_function(statistics::Median)
        .with_function(statistics::Mode)
        .with_function(statistics::Stdev)
        .with_function(statistics::Variance)
}

/// Create a registry with the standard functions
pub fn standard_registry() -> FunctionRegistry {
    let registry = load_standard_functions(FunctionRegistry::new());
    tracing::debug!("function registry initialized with {} functions", registry.len());
    registry
}
