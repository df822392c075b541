//! The dialect provider abstraction
//!
//! A [`DialectProvider`] turns entity and field metadata into DDL text for
//! one database. All three statement operations are pure: they validate
//! eagerly, never return a partial statement, and guard their effect so the
//! output can be applied repeatedly.

use crate::typemap::TypeMap;
use ddlforge_core::{DdlError, DdlResult, Dialect};
use ddlforge_metadata::{EntityMetadata, FieldMetadata};

/// Column every primary and foreign key points at
pub const KEY_COLUMN: &str = "Id";

/// Capability set implemented once per target database
pub trait DialectProvider: Send + Sync + std::fmt::Debug {
    /// The dialect this provider emits
    fn dialect(&self) -> Dialect;

    /// Logical → native mapping table
    fn type_map(&self) -> &'static TypeMap;

    /// Quote an identifier, escaping embedded quote characters
    fn quote_ident(&self, name: &str) -> String;

    /// Longest identifier the server accepts
    fn identifier_limit(&self) -> IdentifierLimit;

    /// `PK_<TableName>`, cut to the identifier limit
    fn primary_key_constraint(&self, table: &str) -> String {
        self.identifier_limit()
            .truncate(&primary_key_name(table))
            .to_string()
    }

    /// `FK_<TableName>_<FieldName>_<ParentTable>`, cut to the identifier limit
    fn foreign_key_constraint(&self, target: &ForeignKeyTarget<'_>) -> String {
        self.identifier_limit()
            .truncate(&foreign_key_name(target.table, target.column, target.parent))
            .to_string()
    }

    /// Quote a table name, schema-qualified when a schema is given
    fn qualify(&self, schema: Option<&str>, table: &str) -> String {
        match schema {
            Some(schema) => format!("{}.{}", self.quote_ident(schema), self.quote_ident(table)),
            None => self.quote_ident(table),
        }
    }

    /// Native column type for a field, sizes included
    fn native_type(&self, field: &FieldMetadata) -> String {
        self.type_map().render(field)
    }

    /// `<name> <type>[ NOT NULL][ UNIQUE]`
    fn column_definition(&self, field: &FieldMetadata) -> String {
        let mut column = format!(
            "{} {}",
            self.quote_ident(field.name.trim()),
            self.native_type(field)
        );
        if field.is_required {
            column.push_str(" NOT NULL");
        }
        if field.is_unique {
            column.push_str(" UNIQUE");
        }
        column
    }

    /// Column definitions in field order, one per line, comma-separated
    fn column_list(&self, entity: &EntityMetadata, indent: &str) -> String {
        entity
            .fields
            .iter()
            .map(|field| format!("{}{}", indent, self.column_definition(field)))
            .collect::<Vec<_>>()
            .join(",\n")
    }

    /// Guarded `CREATE TABLE` with one column per field, in list order
    fn create_table_statement(&self, entity: &EntityMetadata) -> DdlResult<String>;

    /// Guarded `PK_<TableName>` constraint on the `Id` column
    fn primary_key_statement(&self, entity: &EntityMetadata) -> DdlResult<String>;

    /// Guarded `FK_<TableName>_<FieldName>_<ParentTable>` constraint, or an
    /// empty string when the field declares no parent
    fn foreign_key_statement(&self, field: &FieldMetadata) -> DdlResult<String>;
}

// ============================================================================
// Identifier limits
// ============================================================================

/// Maximum identifier length, in the unit the server counts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierLimit {
    /// UTF-8 bytes
    Bytes(usize),
    /// Characters
    Chars(usize),
}

impl IdentifierLimit {
    /// Longest prefix of `name` within the limit, cut on a char boundary
    pub fn truncate(self, name: &str) -> &str {
        let end = match self {
            IdentifierLimit::Bytes(max) => {
                if name.len() <= max {
                    return name;
                }
                let mut end = max;
                while !name.is_char_boundary(end) {
                    end -= 1;
                }
                end
            }
            IdentifierLimit::Chars(max) => match name.char_indices().nth(max) {
                Some((end, _)) => end,
                None => return name,
            },
        };
        &name[..end]
    }
}

// ============================================================================
// Preconditions
// ============================================================================

/// Table and schema of an entity about to be created
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableTarget<'a> {
    pub schema: Option<&'a str>,
    pub table: &'a str,
}

/// Everything a foreign-key statement needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignKeyTarget<'a> {
    pub schema: Option<&'a str>,
    pub table: &'a str,
    pub column: &'a str,
    pub parent: &'a str,
}

/// Require a non-blank `TableName`
pub fn require_table(entity: &EntityMetadata) -> DdlResult<TableTarget<'_>> {
    let table = entity.table().ok_or_else(|| DdlError::missing("TableName"))?;
    Ok(TableTarget {
        schema: entity.schema_name(),
        table,
    })
}

/// Require a non-blank `TableName` and at least one field, each named
pub fn require_columns(entity: &EntityMetadata) -> DdlResult<TableTarget<'_>> {
    let target = require_table(entity)?;
    if entity.fields.is_empty() {
        return Err(DdlError::invalid_argument(
            "Fields",
            format!("entity '{}' has no fields", entity.name),
        ));
    }
    if let Some(index) = entity.fields.iter().position(|f| f.name.trim().is_empty()) {
        return Err(DdlError::missing(format!("Fields[{}].Name", index)));
    }
    Ok(target)
}

/// Require the owning table and field name; `None` when there is no parent
pub fn require_foreign_key(field: &FieldMetadata) -> DdlResult<Option<ForeignKeyTarget<'_>>> {
    let table = field
        .owning_table()
        .ok_or_else(|| DdlError::missing("TableName"))?;
    let column = field.name.trim();
    if column.is_empty() {
        return Err(DdlError::missing("Name"));
    }
    Ok(field.parent().map(|parent| ForeignKeyTarget {
        schema: field
            .table_schema
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty()),
        table,
        column,
        parent,
    }))
}

// ============================================================================
// Naming
// ============================================================================

/// `PK_<TableName>`
pub fn primary_key_name(table: &str) -> String {
    format!("PK_{}", table)
}

/// `FK_<TableName>_<FieldName>_<ParentTable>`
pub fn foreign_key_name(table: &str, column: &str, parent: &str) -> String {
    format!("FK_{}_{}_{}", table, column, parent)
}

/// Single-quoted string literal with embedded quotes doubled
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_table() {
        let entity = EntityMetadata::new("Order").with_table_name("  ");
        let err = require_table(&entity).unwrap_err();
        assert_eq!(err.argument(), Some("TableName"));

        let entity = EntityMetadata::new("Order")
            .with_table_name("orders")
            .with_schema("sales");
        let target = require_table(&entity).unwrap();
        assert_eq!(target.table, "orders");
        assert_eq!(target.schema, Some("sales"));
    }

    #[test]
    fn test_require_columns() {
        let entity = EntityMetadata::new("Order").with_table_name("orders");
        let err = require_columns(&entity).unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(err.argument(), Some("Fields"));

        let entity = entity
            .with_field(FieldMetadata::new("Id", "guid"))
            .with_field(FieldMetadata::new(" ", "int"));
        let err = require_columns(&entity).unwrap_err();
        assert_eq!(err.argument(), Some("Fields[1].Name"));
    }

    #[test]
    fn test_require_foreign_key() {
        let field = FieldMetadata::new("CustomerId", "guid").references("customers");
        assert_eq!(
            require_foreign_key(&field).unwrap_err().argument(),
            Some("TableName")
        );

        let field = FieldMetadata::new("", "guid").in_table("orders", None);
        assert_eq!(
            require_foreign_key(&field).unwrap_err().argument(),
            Some("Name")
        );

        let field = FieldMetadata::new("Note", "string").in_table("orders", None);
        assert_eq!(require_foreign_key(&field).unwrap(), None);

        let field = FieldMetadata::new("CustomerId", "guid")
            .references("customers")
            .in_table("orders", Some("sales".to_string()));
        let target = require_foreign_key(&field).unwrap().unwrap();
        assert_eq!(target.parent, "customers");
        assert_eq!(target.schema, Some("sales"));
    }

    #[test]
    fn test_constraint_names() {
        assert_eq!(primary_key_name("orders"), "PK_orders");
        assert_eq!(
            foreign_key_name("orders", "CustomerId", "customers"),
            "FK_orders_CustomerId_customers"
        );
    }

    #[test]
    fn test_identifier_limit_bytes() {
        let limit = IdentifierLimit::Bytes(63);
        let name = format!("{}é", "a".repeat(62));
        assert_eq!(limit.truncate(&name), "a".repeat(62));
        assert_eq!(limit.truncate("short"), "short");
    }

    #[test]
    fn test_identifier_limit_chars() {
        let limit = IdentifierLimit::Chars(4);
        assert_eq!(limit.truncate("ééééé"), "éééé");
        assert_eq!(limit.truncate("abcd"), "abcd");
        assert_eq!(limit.truncate("abc"), "abc");
    }

    #[test]
    fn test_quote_literal() {
        assert_eq!(quote_literal("o'brien"), "'o''brien'");
    }
}
