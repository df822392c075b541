//! Core types used throughout ddlforge
//!
//! Logical type tags describe a field independently of any database, and
//! [`Dialect`] names the database a provider emits DDL for.

use crate::error::{DdlError, DdlResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

// ============================================================================
// Logical Types
// ============================================================================

/// Database-independent field type tag
///
/// Parsing is case-insensitive and never fails: a tag that is not
/// recognised is kept verbatim in [`LogicalType::Other`] so that providers
/// can fall back to a text column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum LogicalType {
    /// Variable-length text
    #[default]
    String,
    /// 32-bit integer (`int`, `int32`, `integer`)
    Int,
    /// 64-bit integer (`long`, `int64`)
    Long,
    /// 16-bit integer (`short`, `int16`)
    Short,
    /// Fixed-point number with precision and scale
    Decimal,
    /// Double-width floating point
    Double,
    /// Single-width floating point
    Float,
    /// Boolean (`bool`, `boolean`)
    Bool,
    /// Date and time
    DateTime,
    /// Globally unique identifier
    Guid,
    /// Variable-length binary (`byte[]`, `binary`)
    Binary,
    /// Unrecognised tag, kept as written
    Other(String),
}

impl LogicalType {
    /// Parse a type tag, case-insensitively
    pub fn parse(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "string" => LogicalType::String,
            "int" | "int32" | "integer" => LogicalType::Int,
            "long" | "int64" => LogicalType::Long,
            "short" | "int16" => LogicalType::Short,
            "decimal" => LogicalType::Decimal,
            "double" => LogicalType::Double,
            "float" => LogicalType::Float,
            "bool" | "boolean" => LogicalType::Bool,
            "datetime" => LogicalType::DateTime,
            "guid" => LogicalType::Guid,
            "byte[]" | "binary" => LogicalType::Binary,
            _ => LogicalType::Other(tag.trim().to_string()),
        }
    }

    /// Canonical tag for this type
    pub fn as_str(&self) -> &str {
        match self {
            LogicalType::String => "string",
            LogicalType::Int => "int",
            LogicalType::Long => "long",
            LogicalType::Short => "short",
            LogicalType::Decimal => "decimal",
            LogicalType::Double => "double",
            LogicalType::Float => "float",
            LogicalType::Bool => "bool",
            LogicalType::DateTime => "datetime",
            LogicalType::Guid => "guid",
            LogicalType::Binary => "binary",
            LogicalType::Other(tag) => tag,
        }
    }

    /// Whether the tag was recognised
    pub fn is_known(&self) -> bool {
        !matches!(self, LogicalType::Other(_))
    }

    /// Whether `Length` applies as a text cap
    pub fn is_text(&self) -> bool {
        matches!(self, LogicalType::String)
    }

    /// Whether `Precision` applies
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            LogicalType::Int
                | LogicalType::Long
                | LogicalType::Short
                | LogicalType::Decimal
                | LogicalType::Double
                | LogicalType::Float
        )
    }
}

impl FromStr for LogicalType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(LogicalType::parse(s))
    }
}

impl From<String> for LogicalType {
    fn from(tag: String) -> Self {
        LogicalType::parse(&tag)
    }
}

impl From<&str> for LogicalType {
    fn from(tag: &str) -> Self {
        LogicalType::parse(tag)
    }
}

impl From<LogicalType> for String {
    fn from(ty: LogicalType) -> Self {
        match ty {
            LogicalType::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for LogicalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Dialects
// ============================================================================

/// Target database dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "String", into = "String")]
pub enum Dialect {
    #[default]
    PostgreSql,
    SqlServer,
    MySql,
}

impl Dialect {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Dialect::PostgreSql => "PostgreSQL",
            Dialect::SqlServer => "SQL Server",
            Dialect::MySql => "MySQL",
        }
    }

    /// Short identifier used in configuration files
    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::PostgreSql => "postgresql",
            Dialect::SqlServer => "sqlserver",
            Dialect::MySql => "mysql",
        }
    }

    /// Get all dialects
    pub fn all() -> &'static [Dialect] {
        &[Dialect::PostgreSql, Dialect::SqlServer, Dialect::MySql]
    }
}

impl FromStr for Dialect {
    type Err = DdlError;

    fn from_str(s: &str) -> DdlResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(Dialect::PostgreSql),
            "sqlserver" | "mssql" => Ok(Dialect::SqlServer),
            "mysql" | "mariadb" => Ok(Dialect::MySql),
            _ => Err(DdlError::UnsupportedDialect(s.to_string())),
        }
    }
}

impl TryFrom<String> for Dialect {
    type Error = DdlError;

    fn try_from(value: String) -> DdlResult<Self> {
        value.parse()
    }
}

impl From<Dialect> for String {
    fn from(dialect: Dialect) -> Self {
        dialect.as_str().to_string()
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logical_type_aliases() {
        assert_eq!(LogicalType::parse("int32"), LogicalType::Int);
        assert_eq!(LogicalType::parse("Integer"), LogicalType::Int);
        assert_eq!(LogicalType::parse("INT64"), LogicalType::Long);
        assert_eq!(LogicalType::parse("int16"), LogicalType::Short);
        assert_eq!(LogicalType::parse("Boolean"), LogicalType::Bool);
        assert_eq!(LogicalType::parse("byte[]"), LogicalType::Binary);
        assert_eq!(LogicalType::parse(" DateTime "), LogicalType::DateTime);
    }

    #[test]
    fn test_logical_type_unknown_is_kept() {
        let ty = LogicalType::parse("money");
        assert_eq!(ty, LogicalType::Other("money".to_string()));
        assert!(!ty.is_known());
        assert_eq!(ty.to_string(), "money");
    }

    #[test]
    fn test_logical_type_serde() {
        let ty: LogicalType = serde_json::from_str("\"Decimal\"").unwrap();
        assert_eq!(ty, LogicalType::Decimal);
        assert_eq!(serde_json::to_string(&ty).unwrap(), "\"decimal\"");

        let other: LogicalType = serde_json::from_str("\"Money\"").unwrap();
        assert_eq!(serde_json::to_string(&other).unwrap(), "\"Money\"");
    }

    #[test]
    fn test_logical_type_categories() {
        assert!(LogicalType::String.is_text());
        assert!(LogicalType::Decimal.is_numeric());
        assert!(!LogicalType::Guid.is_numeric());
    }

    #[test]
    fn test_dialect_parse_aliases() {
        assert_eq!("postgres".parse::<Dialect>().unwrap(), Dialect::PostgreSql);
        assert_eq!("PG".parse::<Dialect>().unwrap(), Dialect::PostgreSql);
        assert_eq!("mssql".parse::<Dialect>().unwrap(), Dialect::SqlServer);
        assert_eq!("MariaDB".parse::<Dialect>().unwrap(), Dialect::MySql);
    }

    #[test]
    fn test_dialect_parse_unknown() {
        let err = "oracle".parse::<Dialect>().unwrap_err();
        assert!(matches!(err, DdlError::UnsupportedDialect(ref d) if d == "oracle"));
    }

    #[test]
    fn test_dialect_serde_round_trip() {
        let dialect: Dialect = serde_json::from_str("\"mssql\"").unwrap();
        assert_eq!(dialect, Dialect::SqlServer);
        assert_eq!(serde_json::to_string(&dialect).unwrap(), "\"sqlserver\"");
    }

    #[test]
    fn test_dialect_display() {
        assert_eq!(Dialect::PostgreSql.to_string(), "PostgreSQL");
        assert_eq!(Dialect::all().len(), 3);
    }
}
