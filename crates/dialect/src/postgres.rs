//! PostgreSQL dialect provider
//!
//! Tables use `CREATE TABLE IF NOT EXISTS`; constraints are added inside a
//! `DO $$ … END $$;` block that first checks `pg_constraint`.

use crate::provider::{
    DialectProvider, IdentifierLimit, KEY_COLUMN, quote_literal, require_columns,
    require_foreign_key, require_table,
};
use crate::typemap::{NativeType, TypeMap};
use ddlforge_core::{DdlResult, Dialect, LogicalType};
use ddlforge_metadata::{EntityMetadata, FieldMetadata};

/// Longest identifier PostgreSQL keeps (NAMEDATALEN - 1); longer names are
/// truncated by the server, so constraint names are truncated here too to
/// keep the existence check matching
pub const MAX_IDENTIFIER_BYTES: usize = 63;

/// Largest declarable NUMERIC precision
pub const MAX_NUMERIC_PRECISION: i32 = 1000;

/// Largest declarable VARCHAR length
pub const MAX_VARCHAR_LENGTH: i32 = 10_485_760;

static POSTGRES_ENTRIES: [(LogicalType, NativeType); 11] = [
    (
        LogicalType::String,
        NativeType::VarText {
            capped: "VARCHAR",
            unbounded: "TEXT",
            max_length: MAX_VARCHAR_LENGTH,
        },
    ),
    (
        LogicalType::Decimal,
        NativeType::Numeric {
            name: "NUMERIC",
            max_precision: MAX_NUMERIC_PRECISION,
        },
    ),
    (LogicalType::Double, NativeType::Plain("DOUBLE PRECISION")),
    (LogicalType::Float, NativeType::Plain("REAL")),
    (LogicalType::Int, NativeType::Plain("INTEGER")),
    (LogicalType::Long, NativeType::Plain("BIGINT")),
    (LogicalType::Short, NativeType::Plain("SMALLINT")),
    (LogicalType::Bool, NativeType::Plain("BOOLEAN")),
    (LogicalType::DateTime, NativeType::Plain("TIMESTAMP")),
    (LogicalType::Guid, NativeType::Plain("UUID")),
    (LogicalType::Binary, NativeType::Plain("BYTEA")),
];

static POSTGRES_TYPES: TypeMap = TypeMap::new(&POSTGRES_ENTRIES, NativeType::Plain("TEXT"));

/// PostgreSQL DDL provider
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresProvider;

impl PostgresProvider {
    /// Create a new PostgreSQL provider
    pub fn new() -> Self {
        Self
    }

    /// `DO $$` block adding `definition` unless `constraint` exists
    fn guarded_constraint(
        &self,
        schema: Option<&str>,
        table: &str,
        constraint: &str,
        definition: &str,
    ) -> String {
        let mut check = format!(
            "SELECT 1 FROM pg_constraint WHERE conname = {}",
            quote_literal(constraint)
        );
        if let Some(schema) = schema {
            check.push_str(&format!(
                " AND connamespace = {}::regnamespace",
                quote_literal(&self.quote_ident(schema))
            ));
        }

        format!(
            "DO $$\n\
             BEGIN\n    \
                 IF NOT EXISTS (\n        \
                     {check}\n    \
                 ) THEN\n        \
                     ALTER TABLE {table} ADD CONSTRAINT {name} {definition};\n    \
                 END IF;\n\
             END $$;",
            check = check,
            table = self.qualify(schema, table),
            name = self.quote_ident(constraint),
            definition = definition,
        )
    }
}

impl DialectProvider for PostgresProvider {
    fn dialect(&self) -> Dialect {
        Dialect::PostgreSql
    }

    fn type_map(&self) -> &'static TypeMap {
        &POSTGRES_TYPES
    }

    fn quote_ident(&self, name: &str) -> String {
        format!("\"{}\"", name.replace('"', "\"\""))
    }

    fn identifier_limit(&self) -> IdentifierLimit {
        IdentifierLimit::Bytes(MAX_IDENTIFIER_BYTES)
    }

    fn create_table_statement(&self, entity: &EntityMetadata) -> DdlResult<String> {
        let target = require_columns(entity)?;
        Ok(format!(
            "CREATE TABLE IF NOT EXISTS {} (\n{}\n);",
            self.qualify(target.schema, target.table),
            self.column_list(entity, "    ")
        ))
    }

    fn primary_key_statement(&self, entity: &EntityMetadata) -> DdlResult<String> {
        let target = require_table(entity)?;
        Ok(self.guarded_constraint(
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

// ============================================================================
// Tests
// ============================================================================
