//! SQL Server dialect provider
//!
//! SQL Server has no `CREATE TABLE IF NOT EXISTS`, so every statement is an
//! `IF … BEGIN … END;` block checked against `OBJECT_ID` or the `sys`
//! constraint catalog views.

use crate::provider::{
    DialectProvider, IdentifierLimit, KEY_COLUMN, require_columns, require_foreign_key,
    require_table,
};
use crate::typemap::{NativeType, TypeMap};
use ddlforge_core::{DdlResult, Dialect, LogicalType};
use ddlforge_metadata::{EntityMetadata, FieldMetadata};

/// Longest NVARCHAR that is not `MAX`
pub const MAX_NVARCHAR_LENGTH: i32 = 4000;

/// Largest DECIMAL precision
pub const MAX_DECIMAL_PRECISION: i32 = 38;

/// Longest `sysname` identifier, in characters
pub const MAX_IDENTIFIER_CHARS: usize = 128;

static SQLSERVER_ENTRIES: [(LogicalType, NativeType); 11] = [
    (
        LogicalType::String,
        NativeType::VarText {
            capped: "NVARCHAR",
            unbounded: "NVARCHAR(MAX)",
            max_length: MAX_NVARCHAR_LENGTH,
        },
    ),
    (
        LogicalType::Decimal,
        NativeType::Numeric {
            name: "DECIMAL",
            max_precision: MAX_DECIMAL_PRECISION,
        },
    ),
    (LogicalType::Double, NativeType::Plain("FLOAT")),
    (LogicalType::Float, NativeType::Plain("REAL")),
    (LogicalType::Int, NativeType::Plain("INT")),
    (LogicalType::Long, NativeType::Plain("BIGINT")),
    (LogicalType::Short, NativeType::Plain("SMALLINT")),
    (LogicalType::Bool, NativeType::Plain("BIT")),
    (LogicalType::DateTime, NativeType::Plain("DATETIME2")),
    (LogicalType::Guid, NativeType::Plain("UNIQUEIDENTIFIER")),
    (LogicalType::Binary, NativeType::Plain("VARBINARY(MAX)")),
];

static SQLSERVER_TYPES: TypeMap =
    TypeMap::new(&SQLSERVER_ENTRIES, NativeType::Plain("NVARCHAR(MAX)"));

/// SQL Server DDL provider
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlServerProvider;

impl SqlServerProvider {
    /// Create a new SQL Server provider
    pub fn new() -> Self {
        Self
    }

    fn guarded_constraint(
        &self,
        catalog: &str,
        schema: Option<&str>,
        table: &str,
        constraint: &str,
        definition: &str,
    ) -> String {
        format!(
            "IF NOT EXISTS (SELECT 1 FROM {catalog} WHERE name = {literal})\n\
             BEGIN\n    \
                 ALTER TABLE {table} ADD CONSTRAINT {name} {definition};\n\
             END;",
            catalog = catalog,
            literal = unicode_literal(constraint),
            table = self.qualify(schema, table),
            name = self.quote_ident(constraint),
            definition = definition,
        )
    }
}

/// `N'…'` literal with embedded quotes doubled
fn unicode_literal(value: &str) -> String {
    format!("N'{}'", value.replace('\'', "''"))
}

impl DialectProvider for SqlServerProvider {
    fn dialect(&self) -> Dialect {
        Dialect::SqlServer
    }

    fn type_map(&self) -> &'static TypeMap {
        &SQLSERVER_TYPES
    }

    fn quote_ident(&self, name: &str) -> String {
        format!("[{}]", name.replace(']', "]]"))
    }

    fn identifier_limit(&self) -> IdentifierLimit {
        IdentifierLimit::Chars(MAX_IDENTIFIER_CHARS)
    }

    fn create_table_statement(&self, entity: &EntityMetadata) -> DdlResult<String> {
        let target = require_columns(entity)?;
        let table = self.qualify(target.schema, target.table);
        Ok(format!(
            "IF OBJECT_ID({}, N'U') IS NULL\n\
             BEGIN\n    \
                 CREATE TABLE {} (\n{}\n    );\n\
             END;",
            unicode_literal(&table),
            table,
            self.column_list(entity, "        ")
        ))
    }

    fn primary_key_statement(&self, entity: &EntityMetadata) -> DdlResult<String> {
        let target = require_table(entity)?;
        Ok(self.guarded_constraint(
            "sys.key_constraints",
            target.schema,
            target.table,
            &self.primary_key_constraint(target.table),
            &format!("PRIMARY KEY ({})", self.quote_ident(KEY_COLUMN)),
        ))
    }

    fn foreign_key_statement(&self, field: &FieldMetadata) -> DdlResult<String> {
        let Some(target) = require_foreign_key(field)? else {
            return Ok(String::new());
        };
        Ok(self.guarded_constraint(
            "sys.foreign_keys",
            target.schema,
            target.table,
            &self.foreign_key_constraint(&target),
            &format!(
                "FOREIGN KEY ({}) REFERENCES {} ({})",
                self.quote_ident(target.column),
                self.qualify(target.schema, target.parent),
                self.quote_ident(KEY_COLUMN)
            ),
        ))
    }
}
