//! Structured errors for the calculation kernel
//!
//! Errors are values, not panics. Evaluation either produces a result or
//! terminates with exactly one of these; the caller fixes its input and
//! resubmits, or surfaces the message as-is.

use serde::{Deserialize, Serialize};

/// The four failure kinds surfaced by the kernel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    /// Malformed input: unbalanced parentheses, invalid tokens, length exceeded
    Syntax,
    /// A function argument violates a mathematical precondition
    Domain,
    /// An operation combines physically incompatible units
    Dimensionality,
    /// Runtime failures: unknown names, arity mismatch, division by zero, depth exceeded
    Evaluation,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Syntax => "syntax",
            ErrorKind::Domain => "domain",
            ErrorKind::Dimensionality => "dimensionality",
            ErrorKind::Evaluation => "evaluation",
        }
    }
}

/// Context about where and why an error occurred
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorContext {
    /// The offending slice of the input text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fragment: Option<String>,

    /// Character position in the input (0-based)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,

    /// The constraint that was violated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,

    /// The value that violated it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub found: Option<String>,

    /// Free-form notes accumulated during propagation
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub notes: Vec<String>,
}

/// Structured error carried through every fallible kernel operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalcError {
    /// Which of the four taxonomy kinds this is
    pub kind: ErrorKind,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,

    /// Where the error occurred
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<ErrorContext>,
}

impl CalcError {
    /// Create a new error
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            suggestion: None,
            context: None,
        }
    }

    /// Builder: add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Builder: replace context wholesale
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Builder: record the offending input fragment
    pub fn with_fragment(mut self, fragment: impl Into<String>) -> Self {
        let ctx = self.context.get_or_insert_with(ErrorContext::default);
        ctx.fragment = Some(fragment.into());
        self
    }

    /// Builder: record the character position (0-based)
    pub fn at_position(mut self, position: usize) -> Self {
        let ctx = self.context.get_or_insert_with(ErrorContext::default);
        ctx.position = Some(position);
        self
    }

    /// Builder: record the violated constraint
    pub fn expecting(mut self, expected: impl Into<String>) -> Self {
        let ctx = self.context.get_or_insert_with(ErrorContext::default);
        ctx.expected = Some(expected.into());
        self
    }

    /// Builder: record the offending value
    pub fn with_found(mut self, found: impl Into<String>) -> Self {
        let ctx = self.context.get_or_insert_with(ErrorContext::default);
        ctx.found = Some(found.into());
        self
    }

    /// Builder: add a propagation note
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        let ctx = self.context.get_or_insert_with(ErrorContext::default);
        ctx.notes.push(note.into());
        self
    }

    // ========== Syntax ==========

    pub fn syntax(details: impl Into<String>) -> Self {
        Self::new(ErrorKind::Syntax, format!("Syntax error: {}", details.into()))
            .with_suggestion("Check the expression syntax")
    }

    pub fn empty_expression() -> Self {
        Self::new(ErrorKind::Syntax, "Syntax error: empty expression")
            .with_suggestion("Provide a non-empty expression")
    }

    pub fn too_long(length: usize, max: usize) -> Self {
        Self::new(
            ErrorKind::Syntax,
            format!("Syntax error: expression exceeds maximum length ({} > {} characters)", length, max),
        )
        .with_suggestion("Shorten the expression")
    }

    pub fn invalid_char(ch: char, position: usize) -> Self {
        Self::new(
            ErrorKind::Syntax,
            format!("Syntax error: invalid character '{}' at position {}", ch, position),
        )
        .at_position(position)
        .with_found(ch.to_string())
        .with_suggestion("Remove the character; allowed are digits, letters, + - * / ^ % ( ) . , and spaces")
    }

    // ========== Domain ==========

    pub fn domain(details: impl Into<String>) -> Self {
        Self::new(ErrorKind::Domain, format!("Domain error: {}", details.into()))
    }

    // ========== Dimensionality ==========

    pub fn dimensionality(details: impl Into<String>) -> Self {
        Self::new(ErrorKind::Dimensionality, details)
    }

    // ========== Evaluation ==========

    pub fn evaluation(details: impl Into<String>) -> Self {
        Self::new(ErrorKind::Evaluation, details)
    }

    pub fn div_zero() -> Self {
        Self::new(ErrorKind::Evaluation, "Division by zero")
            .with_suggestion("Ensure the divisor is not zero")
    }

    pub fn unknown_identifier(name: &str) -> Self {
        Self::new(ErrorKind::Evaluation, format!("Unknown identifier: {}", name))
            .with_fragment(name)
            .with_suggestion("Use a registered unit or constant name, or check spelling")
    }

    pub fn unknown_function(name: &str) -> Self {
        Self::new(ErrorKind::Evaluation, format!("Unknown function: {}", name))
            .with_fragment(name)
            .with_suggestion("Use list_functions() to see available functions")
    }

    pub fn unknown_unit(name: &str) -> Self {
        Self::new(ErrorKind::Evaluation, format!("Unknown unit: {}", name))
            .with_fragment(name)
            .with_suggestion("Use list_units() to see available units")
    }

    pub fn arity_mismatch(func: &str, expected: impl std::fmt::Display, got: usize) -> Self {
        Self::new(
            ErrorKind::Evaluation,
            format!("{}() expects {}, got {}", func, expected, got),
        )
        .expecting(expected.to_string())
        .with_found(got.to_string())
    }

    pub fn depth_exceeded(limit: usize) -> Self {
        Self::new(
            ErrorKind::Evaluation,
            format!("Expression nesting exceeds maximum evaluation depth ({})", limit),
        )
        .with_suggestion("Simplify the expression")
    }

    pub fn overflow() -> Self {
        Self::new(ErrorKind::Evaluation, "Numeric overflow: result is not a finite number")
    }
}

impl std::fmt::Display for CalcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.kind.as_str(), self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for CalcError {}
