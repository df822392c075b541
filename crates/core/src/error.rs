//! Error types for ddlforge
//!
//! A single error enum covers metadata access, statement generation and
//! configuration loading. Unknown logical types have no variant:
//! they degrade to a text column instead of failing.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for ddlforge
#[derive(Debug, Error)]
pub enum DdlError {
    // ========================================================================
    // Input Errors
    // ========================================================================
    /// A required object was absent (e.g. a `null` metadata document)
    #[error("Required input is missing: {0}")]
    NullInput(String),

    /// A required attribute was blank, or an entity had no fields
    #[error("Invalid argument '{argument}': {message}")]
    InvalidArgument { argument: String, message: String },

    // ========================================================================
    // Lookup Errors
    // ========================================================================
    /// Raw field-store access on an absent key
    #[error("Field not found: {0}")]
    NotFound(String),

    /// Dialect name that has no provider
    #[error("Unsupported dialect: {0}")]
    UnsupportedDialect(String),

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be read
    #[error("Failed to read file '{path}': {message}")]
    FileRead { path: PathBuf, message: String },

    /// TOML parse error
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    // ========================================================================
    // Serialization Errors
    // ========================================================================
    /// JSON (de)serialization error
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DdlError {
    /// Create an invalid-argument error for a named attribute
    pub fn invalid_argument(argument: impl Into<String>, msg: impl Into<String>) -> Self {
        DdlError::InvalidArgument {
            argument: argument.into(),
            message: msg.into(),
        }
    }

    /// Create an invalid-argument error for a missing or blank attribute
    pub fn missing(argument: impl Into<String>) -> Self {
        Self::invalid_argument(argument, "value is required and cannot be blank")
    }

    /// Create a not-found error for a field-store key
    pub fn not_found(key: impl Into<String>) -> Self {
        DdlError::NotFound(key.into())
    }

    /// Create a null-input error
    pub fn null_input(what: impl Into<String>) -> Self {
        DdlError::NullInput(what.into())
    }

    /// Create an invalid configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        DdlError::InvalidConfig(msg.into())
    }

    /// Check if this error is an invalid-argument error
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, DdlError::InvalidArgument { .. })
    }

    /// Check if this error is a not-found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, DdlError::NotFound(_))
    }

    /// Check if this error is a null-input error
    pub fn is_null_input(&self) -> bool {
        matches!(self, DdlError::NullInput(_))
    }

    /// Name of the offending attribute, for invalid-argument errors
    pub fn argument(&self) -> Option<&str> {
        match self {
            DdlError::InvalidArgument { argument, .. } => Some(argument),
            _ => None,
        }
    }
}

/// Result type alias using DdlError
pub type DdlResult<T> = Result<T, DdlError>;

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_error() {
        let err = DdlError::missing("TableName");
        assert!(err.is_invalid_argument());
        assert!(!err.is_not_found());
        assert_eq!(err.argument(), Some("TableName"));
        assert_eq!(
            err.to_string(),
            "Invalid argument 'TableName': value is required and cannot be blank"
        );
    }

    #[test]
    fn test_not_found_error() {
        let err = DdlError::not_found("Synonyms");
        assert!(err.is_not_found());
        assert!(!err.is_invalid_argument());
        assert_eq!(err.argument(), None);
        assert_eq!(err.to_string(), "Field not found: Synonyms");
    }

    #[test]
    fn test_null_input_error() {
        let err = DdlError::null_input("entity");
        assert!(err.is_null_input());
        assert_eq!(err.to_string(), "Required input is missing: entity");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: DdlError = json_err.into();
        assert!(matches!(err, DdlError::Json(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("dialect = ").unwrap_err();
        let err: DdlError = toml_err.into();
        assert!(err.to_string().starts_with("TOML parse error"));
    }
}
