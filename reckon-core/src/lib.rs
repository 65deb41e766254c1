//! Reckon Core - Shared error taxonomy
//!
//! This crate provides the error vocabulary used throughout the reckon
//! kernel:
//! - `ErrorKind`: the four non-overlapping failure kinds
//! - `CalcError`: structured error with message, context and suggestion
//! - `ErrorContext`: offending fragment, position, violated constraint
//!
//! plus the name-similarity scoring that registries use to attach
//! "did you mean" suggestions to lookup failures.

mod error;
pub mod similar;

pub use error::{CalcError, ErrorContext, ErrorKind};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{CalcError, ErrorContext, ErrorKind};
}

#[cfg(test)]
mod tests {
    use super::*;

    mod error_tests {
        use super::*;

        #[test]
        fn test_error_construction() {
            let err = CalcError::div_zero();
            assert_eq!(err.kind, ErrorKind::Evaluation);
            assert!(err.suggestion.is_some());
        }

        #[test]
        fn test_kind_strings() {
            assert_eq!(ErrorKind::Syntax.as_str(), "syntax");
            assert_eq!(ErrorKind::Domain.as_str(), "domain");
            assert_eq!(ErrorKind::Dimensionality.as_str(), "dimensionality");
            assert_eq!(ErrorKind::Evaluation.as_str(), "evaluation");
        }

        #[test]
        fn test_error_with_context() {
            let err = CalcError::unknown_identifier("furlong")
                .at_position(4)
                .expecting("a registered unit or constant");
            let ctx = err.context.unwrap();
            assert_eq!(ctx.fragment, Some("furlong".to_string()));
            assert_eq!(ctx.position, Some(4));
            assert_eq!(ctx.expected, Some("a registered unit or constant".to_string()));
        }

        #[test]
        fn test_error_with_note() {
            let err = CalcError::domain("sqrt() requires a non-negative argument")
                .with_note("from left operand");
            let ctx = err.context.unwrap();
            assert_eq!(ctx.notes.len(), 1);
            assert_eq!(ctx.notes[0], "from left operand");
        }

        #[test]
        fn test_error_display() {
            let err = CalcError::syntax("unexpected token");
            let display = format!("{}", err);
            assert!(display.contains("[syntax]"));
            assert!(display.contains("unexpected token"));
        }

        #[test]
        fn test_invalid_char_records_position() {
            let err = CalcError::invalid_char('#', 2);
            assert_eq!(err.kind, ErrorKind::Syntax);
            let ctx = err.context.unwrap();
            assert_eq!(ctx.position, Some(2));
            assert_eq!(ctx.found, Some("#".to_string()));
        }

        #[test]
        fn test_arity_mismatch_message() {
            let err = CalcError::arity_mismatch("pow", "exactly 2 arguments", 1);
            assert_eq!(err.kind, ErrorKind::Evaluation);
            assert!(err.message.contains("pow()"));
            assert!(err.message.contains("exactly 2 arguments"));
            assert!(err.message.contains("got 1"));
        }

        #[test]
        fn test_serialization_skips_empty_fields() {
            let err = CalcError::new(ErrorKind::Domain, "bad argument");
            let json = serde_json::to_value(&err).unwrap();
            assert_eq!(json["kind"], "domain");
            assert_eq!(json["message"], "bad argument");
            assert!(json.get("suggestion").is_none());
            assert!(json.get("context").is_none());
        }

        #[test]
        fn test_serialization_round_trip() {
            let err = CalcError::div_zero().with_fragment("1 / 0");
            let json = serde_json::to_string(&err).unwrap();
            let back: CalcError = serde_json::from_str(&json).unwrap();
            assert_eq!(back.kind, ErrorKind::Evaluation);
            assert_eq!(back.context.unwrap().fragment, Some("1 / 0".to_string()));
        }
    }
}
