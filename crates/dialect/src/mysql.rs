//! MySQL dialect provider
//!
//! MySQL has no conditional `ADD CONSTRAINT`, so constraint statements build
//! the `ALTER TABLE` text with `IF(…)` over `information_schema` and run it
//! as a prepared statement; the fallback is a no-op `DO 0`.

use crate::provider::{
    DialectProvider, IdentifierLimit, KEY_COLUMN, require_columns, require_foreign_key,
    require_table,
};
use crate::typemap::{NativeType, TypeMap};
use ddlforge_core::{DdlResult, Dialect, LogicalType};
use ddlforge_metadata::{EntityMetadata, FieldMetadata};

/// Longest utf8mb4 VARCHAR that fits the row size limit
pub const MAX_VARCHAR_LENGTH: i32 = 16_383;

/// Largest DECIMAL precision
pub const MAX_DECIMAL_PRECISION: i32 = 65;

/// Longest identifier, in characters
pub const MAX_IDENTIFIER_CHARS: usize = 64;

static MYSQL_ENTRIES: [(LogicalType, NativeType); 11] = [
    (
        LogicalType::String,
        NativeType::VarText {
            capped: "VARCHAR",
            unbounded: "LONGTEXT",
            max_length: MAX_VARCHAR_LENGTH,
        },
    ),
    (
        LogicalType::Decimal,
        NativeType::Numeric {
            name: "DECIMAL",
            max_precision: MAX_DECIMAL_PRECISION,
        },
    ),
    (LogicalType::Double, NativeType::Plain("DOUBLE")),
    (LogicalType::Float, NativeType::Plain("FLOAT")),
    (LogicalType::Int, NativeType::Plain("INT")),
    (LogicalType::Long, NativeType::Plain("BIGINT")),
    (LogicalType::Short, NativeType::Plain("SMALLINT")),
    (LogicalType::Bool, NativeType::Plain("BOOLEAN")),
    (LogicalType::DateTime, NativeType::Plain("DATETIME")),
    (LogicalType::Guid, NativeType::Plain("CHAR(36)")),
    (LogicalType::Binary, NativeType::Plain("LONGBLOB")),
];

static MYSQL_TYPES: TypeMap = TypeMap::new(&MYSQL_ENTRIES, NativeType::Plain("LONGTEXT"));

/// MySQL DDL provider
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlProvider;

impl MySqlProvider {
    /// Create a new MySQL provider
    pub fn new() -> Self {
        Self
    }

    /// Schema predicate: the named schema, or the session database
    fn schema_predicate(schema: Option<&str>) -> String {
        match schema {
            Some(schema) => string_literal(schema),
            None => "DATABASE()".to_string(),
        }
    }

    /// Prepared-statement block running `alter` only when `condition`
    /// matches no rows in `information_schema.TABLE_CONSTRAINTS`
    fn guarded_constraint(
        &self,
        schema: Option<&str>,
        table: &str,
        condition: &str,
        alter: &str,
    ) -> String {
        format!(
            "SET @ddl = IF(\n    \
                 (SELECT COUNT(*) FROM information_schema.TABLE_CONSTRAINTS\n     \
                  WHERE TABLE_SCHEMA = {schema} AND TABLE_NAME = {table} AND {condition}) = 0,\n    \
                 {alter},\n    \
                 'DO 0'\n\
             );\n\
             PREPARE ddl_stmt FROM @ddl;\n\
             EXECUTE ddl_stmt;\n\
             DEALLOCATE PREPARE ddl_stmt;",
            schema = Self::schema_predicate(schema),
            table = string_literal(table),
            condition = condition,
            alter = string_literal(alter),
        )
    }
}

/// Single-quoted literal; MySQL also treats backslash as an escape
fn string_literal(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "''"))
}

impl DialectProvider for MySqlProvider {
    fn dialect(&self) -> Dialect {
        Dialect::MySql
    }

    fn type_map(&self) -> &'static TypeMap {
        &MYSQL_TYPES
    }

    fn quote_ident(&self, name: &str) -> String {
        format!("`{}`", name.replace('`', "``"))
    }

    fn identifier_limit(&self) -> IdentifierLimit {
        IdentifierLimit::Chars(MAX_IDENTIFIER_CHARS)
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
        // MySQL names every primary key PRIMARY, so match on the type
        let alter = format!(
            "ALTER TABLE {} ADD CONSTRAINT {} PRIMARY KEY ({})",
            self.qualify(target.schema, target.table),
            self.quote_ident(&self.primary_key_constraint(target.table)),
            self.quote_ident(KEY_COLUMN)
        );
        Ok(self.guarded_constraint(
            target.schema,
            target.table,
            "CONSTRAINT_TYPE = 'PRIMARY KEY'",
            &alter,
        ))
    }

    fn foreign_key_statement(&self, field: &FieldMetadata) -> DdlResult<String> {
        let Some(target) = require_foreign_key(field)? else {
            return Ok(String::new());
        };
        let name = self.foreign_key_constraint(&target);
        let alter = format!(
            "ALTER TABLE {} ADD CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {} ({})",
            self.qualify(target.schema, target.table),
            self.quote_ident(&name),
            self.quote_ident(target.column),
            self.qualify(target.schema, target.parent),
            self.quote_ident(KEY_COLUMN)
        );
        Ok(self.guarded_constraint(
            target.schema,
            target.table,
            &format!("CONSTRAINT_NAME = {}", string_literal(&name)),
            &alter,
        ))
    }
}
