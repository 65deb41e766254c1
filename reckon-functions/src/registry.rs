//! Function registry with builder-style registration

use crate::{Arity, ScalarFunction};
use reckon_core::CalcError;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Registry of named scalar functions
///
/// Names are case-insensitive: `SIN(30)` and `sin(30)` resolve to the
/// same function.
pub struct FunctionRegistry {
    functions: HashMap<String, Arc<dyn ScalarFunction>>,
    /// Names in registration order, for stable listings
    order: Vec<String>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        FunctionRegistry {
            functions: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Register a function, builder style
    pub fn with_function(mut self, function: impl ScalarFunction + 'static) -> Self {
        let name = function.meta().name.to_lowercase();
        self.order.push(name.clone());
        self.functions.insert(name, Arc::new(function));
        self
    }

    /// Get a function by name
    pub fn get(&self, name: &str) -> Option<&Arc<dyn ScalarFunction>> {
        self.functions.get(&name.to_lowercase())
    }

    /// Invoke a function by name with already-evaluated arguments
    ///
    /// Checks arity, then the function's own domain preconditions, then
    /// applies it and verifies the result is finite.
    pub fn call(&self, name: &str, args: &[f64]) -> Result<f64, CalcError> {
        let function = match self.get(name) {
            Some(f) => f,
            None => {
                tracing::warn!("unknown function '{}'", name);
                return Err(self.unknown_function_error(name));
            }
        };

        let arity = function.arity();
        if !arity.accepts(args.len()) {
            return Err(CalcError::arity_mismatch(function.meta().name, arity, args.len()));
        }

        function.check_domain(args)?;

        let result = function.apply(args);
        if !result.is_finite() {
            return Err(CalcError::overflow()
                .with_note(format!("while evaluating {}()", function.meta().name)));
        }
        Ok(result)
    }

    /// The arity a named function declares, if it exists
    pub fn arity_of(&self, name: &str) -> Option<Arity> {
        self.get(name).map(|f| f.arity())
    }

    /// All function names in registration order
    pub fn names(&self) -> Vec<&str> {
        self.order.iter().map(|s| s.as_str()).collect()
    }

    /// Group function names by category
    ///
    /// Categories come back in alphabetical order; names within a
    /// category keep their registration order.
    pub fn by_category(&self) -> BTreeMap<String, Vec<String>> {
        let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for name in &self.order {
            if let Some(function) = self.functions.get(name) {
                grouped
                    .entry(function.meta().category.to_string())
                    .or_default()
                    .push(name.clone());
            }
        }
        grouped
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn unknown_function_error(&self, name: &str) -> CalcError {
        let mut err = CalcError::unknown_function(name);
        let similar =
            reckon_core::similar::find_similar(name, self.order.iter().map(|s| s.as_str()));
        if !similar.is_empty() {
            let suggestions: Vec<&str> = similar.iter().take(5).map(|s| s.as_str()).collect();
            err = err.with_suggestion(format!("Similar: {}", suggestions.join(", ")));
        }
        err
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
