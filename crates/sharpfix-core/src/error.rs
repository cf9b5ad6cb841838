//! Error types and error code constants for sharpfix.
//!
//! This module provides a unified error type (`SharpfixError`) that bridges
//! failures from the parser, the edit layer and the CLI into a common format
//! suitable for JSON output.
//!
//! ## Error Code Mapping
//!
//! - `2`: Invalid arguments (bad input from caller, unknown rule id)
//! - `3`: Resolution errors (file not found)
//! - `4`: Apply errors (conflicting or out-of-range edits, write failures)
//! - `5`: Parse errors (input or fixed output is not well formed)
//! - `10`: Internal errors (bugs, unexpected state)
//!
//! Rule-level "can't proceed" conditions (no match, unsupported shape, lost
//! anchor) are never errors. They surface as `None` or as an unchanged
//! document and never reach this type.

use std::fmt;

use thiserror::Error;

// ============================================================================
// Output Error Codes
// ============================================================================

/// Error codes for JSON output.
///
/// These codes map to CLI exit codes and appear in JSON error responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OutputErrorCode {
    /// Invalid arguments from caller (bad input, malformed request).
    InvalidArguments = 2,
    /// Resolution errors (file not found).
    ResolutionError = 3,
    /// Apply errors (failed to apply or write changes).
    ApplyError = 4,
    /// Source text could not be parsed.
    ParseError = 5,
    /// Internal errors (bugs, unexpected state).
    InternalError = 10,
}

impl OutputErrorCode {
    /// Get the numeric code value.
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for OutputErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ============================================================================
// Unified Error Type
// ============================================================================

/// Unified error type for CLI output.
#[derive(Debug, Error)]
pub enum SharpfixError {
    /// Invalid arguments from caller.
    #[error("invalid arguments: {message}")]
    InvalidArguments {
        message: String,
        details: Option<serde_json::Value>,
    },

    /// A rule id that no registered rule owns.
    #[error("unknown rule id '{rule_id}'")]
    UnknownRule { rule_id: String },

    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound { path: String },

    /// Source text failed to parse.
    #[error("parse error in {path} at {line}:{col}: {message}")]
    ParseError {
        path: String,
        line: u32,
        col: u32,
        message: String,
    },

    /// Failed to apply changes.
    #[error("apply error: {message}")]
    ApplyError {
        message: String,
        file: Option<String>,
    },

    /// Internal error (bug or unexpected state).
    #[error("internal error: {message}")]
    InternalError { message: String },
}

// ============================================================================
// Error Code Mapping
// ============================================================================

impl From<&SharpfixError> for OutputErrorCode {
    fn from(err: &SharpfixError) -> Self {
        match err {
            SharpfixError::InvalidArguments { .. } => OutputErrorCode::InvalidArguments,
            SharpfixError::UnknownRule { .. } => OutputErrorCode::InvalidArguments,
            SharpfixError::FileNotFound { .. } => OutputErrorCode::ResolutionError,
            SharpfixError::ParseError { .. } => OutputErrorCode::ParseError,
            SharpfixError::ApplyError { .. } => OutputErrorCode::ApplyError,
            SharpfixError::InternalError { .. } => OutputErrorCode::InternalError,
        }
    }
}

impl From<SharpfixError> for OutputErrorCode {
    fn from(err: SharpfixError) -> Self {
        OutputErrorCode::from(&err)
    }
}

impl From<std::io::Error> for SharpfixError {
    fn from(err: std::io::Error) -> Self {
        SharpfixError::InternalError {
            message: format!("IO error: {}", err),
        }
    }
}

impl From<serde_json::Error> for SharpfixError {
    fn from(err: serde_json::Error) -> Self {
        SharpfixError::InvalidArguments {
            message: format!("JSON error: {}", err),
            details: None,
        }
    }
}

// ============================================================================
// Convenience Constructors
// ============================================================================

impl SharpfixError {
    pub fn invalid_args(message: impl Into<String>) -> Self {
        SharpfixError::InvalidArguments {
            message: message.into(),
            details: None,
        }
    }

    pub fn invalid_args_with_details(
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        SharpfixError::InvalidArguments {
            message: message.into(),
            details: Some(details),
        }
    }

    pub fn unknown_rule(rule_id: impl Into<String>) -> Self {
        SharpfixError::UnknownRule {
            rule_id: rule_id.into(),
        }
    }

    pub fn file_not_found(path: impl Into<String>) -> Self {
        SharpfixError::FileNotFound { path: path.into() }
    }

    pub fn apply(message: impl Into<String>) -> Self {
        SharpfixError::ApplyError {
            message: message.into(),
            file: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        SharpfixError::InternalError {
            message: message.into(),
        }
    }

    pub fn error_code(&self) -> OutputErrorCode {
        OutputErrorCode::from(self)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    mod error_code_mapping {
        use super::*;

        #[test]
        fn invalid_arguments_maps_to_invalid_arguments() {
            let err = SharpfixError::invalid_args("missing file argument");
            assert_eq!(
                OutputErrorCode::from(&err),
                OutputErrorCode::InvalidArguments
            );
            assert_eq!(err.error_code().code(), 2);
        }

        #[test]
        fn unknown_rule_maps_to_invalid_arguments() {
            let err = SharpfixError::unknown_rule("ACA9999");
            assert_eq!(err.error_code(), OutputErrorCode::InvalidArguments);
            assert_eq!(err.to_string(), "unknown rule id 'ACA9999'");
        }

        #[test]
        fn file_not_found_maps_to_resolution_error() {
            let err = SharpfixError::file_not_found("Missing.cs");
            assert_eq!(err.error_code().code(), 3);
        }

        #[test]
        fn parse_error_maps_to_parse_error() {
            let err = SharpfixError::ParseError {
                path: "Broken.cs".to_string(),
                line: 3,
                col: 7,
                message: "expected '}'".to_string(),
            };
            assert_eq!(err.error_code().code(), 5);
            assert_eq!(
                err.to_string(),
                "parse error in Broken.cs at 3:7: expected '}'"
            );
        }

        #[test]
        fn apply_error_maps_to_apply_error() {
            let err = SharpfixError::apply("edit out of range");
            assert_eq!(err.error_code(), OutputErrorCode::ApplyError);
        }

        #[test]
        fn internal_error_maps_to_internal_error() {
            let err = SharpfixError::internal("unexpected state");
            assert_eq!(OutputErrorCode::from(&err), OutputErrorCode::InternalError);
            assert_eq!(err.error_code().code(), 10);
        }
    }

    #[test]
    fn io_error_bridges_to_internal() {
        let io = std::io::Error::other("disk full");
        let err: SharpfixError = io.into();
        assert!(matches!(err, SharpfixError::InternalError { .. }));
        assert!(err.to_string().contains("disk full"));
    }
}
