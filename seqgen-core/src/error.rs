//! Structured errors for user-facing display
//!
//! Errors never crash the system. They are values that travel back to the
//! presentation layer and carry clear, actionable information.

use crate::ParamError;
use serde::{Deserialize, Serialize};

/// Standard error codes (machine-readable)
pub mod codes {
    pub const INVALID_COUNT: &str = "INVALID_COUNT";
    pub const TOO_MANY_TERMS: &str = "TOO_MANY_TERMS";
    pub const NON_FINITE: &str = "NON_FINITE";
    pub const UNKNOWN_KIND: &str = "UNKNOWN_KIND";
    pub const UNDEFINED_FUNC: &str = "UNDEFINED_FUNC";
    pub const UNDEFINED_FIELD: &str = "UNDEFINED_FIELD";
    pub const TYPE_ERROR: &str = "TYPE_ERROR";
    pub const ARG_COUNT: &str = "ARG_COUNT";
    pub const ARG_TYPE: &str = "ARG_TYPE";
    pub const DOMAIN_ERROR: &str = "DOMAIN_ERROR";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const INTERNAL: &str = "INTERNAL";
}

/// Severity level of an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Shown to the user, nothing was computed
    Warning,
    /// The request failed
    Error,
    /// The engine itself is broken
    Fatal,
}

/// Structured error returned to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeqError {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,

    /// Name of the parameter or field involved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,

    /// Severity level
    pub severity: Severity,
}

impl SeqError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            suggestion: None,
            field: None,
            severity: Severity::Error,
        }
    }

    /// Builder: add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Builder: name the offending field
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Builder: set severity
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    // ========== Common Error Constructors ==========

    pub fn undefined_func(name: &str) -> Self {
        Self::new(codes::UNDEFINED_FUNC, format!("Unknown function: {}", name))
            .with_suggestion("Use list_functions to see what is available")
    }

    pub fn undefined_field(name: &str) -> Self {
        Self::new(codes::UNDEFINED_FIELD, format!("Undefined field: {}", name))
    }

    pub fn type_error(expected: &str, got: &str) -> Self {
        Self::new(codes::TYPE_ERROR, format!("Expected {}, got {}", expected, got))
    }

    pub fn arg_count(func: &str, expected: usize, got: usize) -> Self {
        Self::new(
            codes::ARG_COUNT,
            format!("{}() expects {} arguments, got {}", func, expected, got),
        )
        .with_suggestion(format!("Use help('{}') for usage", func))
    }

    pub fn arg_type(func: &str, arg: &str, expected: &str, got: &str) -> Self {
        Self::new(
            codes::ARG_TYPE,
            format!("{}() argument '{}': expected {}, got {}", func, arg, expected, got),
        )
        .with_field(arg)
    }

    pub fn domain_error(details: impl Into<String>) -> Self {
        Self::new(codes::DOMAIN_ERROR, format!("Domain error: {}", details.into()))
    }

    pub fn unknown_kind(name: &str) -> Self {
        Self::new(codes::UNKNOWN_KIND, format!("Unknown sequence kind: {}", name))
            .with_suggestion("Use \"arithmetic\" or \"geometric\"")
    }

    pub fn internal(details: impl Into<String>) -> Self {
        Self::new(codes::INTERNAL, format!("Internal error: {}", details.into()))
            .with_suggestion("This is a bug, please report it")
            .with_severity(Severity::Fatal)
    }
}

impl std::fmt::Display for SeqError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for SeqError {}

impl From<ParamError> for SeqError {
    fn from(err: ParamError) -> Self {
        match err {
            ParamError::NonPositiveCount(_) => {
                Self::new(codes::INVALID_COUNT, "Please enter a positive number of terms.")
                    .with_field("num_terms")
                    .with_suggestion("Use a whole number between 1 and the term limit")
                    .with_severity(Severity::Warning)
            }
            ParamError::TooManyTerms { max, .. } => {
                Self::new(codes::TOO_MANY_TERMS, err.to_string())
                    .with_field("num_terms")
                    .with_suggestion(format!("Request at most {} terms", max))
                    .with_severity(Severity::Warning)
            }
            ParamError::NonFinite { field } => {
                Self::new(codes::NON_FINITE, err.to_string())
                    .with_field(field)
                    .with_suggestion("Use a finite number")
                    .with_severity(Severity::Warning)
            }
        }
    }
}
