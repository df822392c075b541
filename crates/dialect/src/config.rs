//! Script generator configuration
//!
//! Built in code with the `with_*` / `without_*` builders, or loaded from a
//! TOML file where every key is optional:
//!
//! ```toml
//! dialect = "sqlserver"
//! foreign_keys = false
//! batch_separator = "GO"
//! ```

use ddlforge_core::{DdlError, DdlResult, Dialect};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the script generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Target database
    pub dialect: Dialect,

    /// Whether to emit primary-key constraints
    pub primary_keys: bool,

    /// Whether to emit foreign-key constraints
    pub foreign_keys: bool,

    /// Line placed between statements, e.g. `GO` for SQL Server tooling
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_separator: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            dialect: Dialect::default(),
            primary_keys: true,
            foreign_keys: true,
            batch_separator: None,
        }
    }
}

impl GeneratorConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target dialect
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Disable primary-key statements
    pub fn without_primary_keys(mut self) -> Self {
        self.primary_keys = false;
        self
    }

    /// Disable foreign-key statements
    pub fn without_foreign_keys(mut self) -> Self {
        self.foreign_keys = false;
        self
    }

    /// Separate statements with a batch separator line
    pub fn with_batch_separator(mut self, separator: impl Into<String>) -> Self {
        self.batch_separator = Some(separator.into());
        self
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(text: &str) -> DdlResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> DdlResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| DdlError::FileRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        tracing::debug!(path = %path.display(), "loaded generator configuration");
        Self::from_toml_str(&text)
    }

    /// Reject a blank batch separator
    pub fn validate(&self) -> DdlResult<()> {
        if let Some(separator) = &self.batch_separator {
            if separator.trim().is_empty() {
                return Err(DdlError::config("batch_separator cannot be blank"));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
