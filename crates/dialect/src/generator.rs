//! # Script Generator
//!
//! Runs a [`DialectProvider`] over a set of entities and assembles the
//! statements into one script.
//!
//! ## Ordering
//!
//! ```text
//! entities
//!    │
//!    ├──► CREATE TABLE   (every entity, input order)
//!    ├──► PRIMARY KEY    (every entity, input order)
//!    └──► FOREIGN KEY    (every field with a parent entity)
//! ```
//!
//! Every table exists before any constraint references it. Each statement is
//! individually guarded, so the script can be re-applied.

use ddlforge_core::DdlResult;
use ddlforge_metadata::EntityMetadata;

use crate::config::GeneratorConfig;
use crate::provider::DialectProvider;
use crate::provider_for;

// ============================================================================
// Output
// ============================================================================

/// Kind of generated statement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    CreateTable,
    PrimaryKey,
    ForeignKey,
}

/// One statement, tagged with the table it touches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedStatement {
    pub kind: StatementKind,
    pub table: String,
    pub sql: String,
}

/// Ordered statements for a set of entities
#[derive(Debug, Clone, Default)]
pub struct GeneratedScript {
    pub statements: Vec<GeneratedStatement>,
    batch_separator: Option<String>,
}

impl GeneratedScript {
    /// Number of statements
    pub fn statement_count(&self) -> usize {
        self.statements.len()
    }

    /// Statements of one kind, in script order
    pub fn statements_of(&self, kind: StatementKind) -> impl Iterator<Item = &GeneratedStatement> {
        self.statements.iter().filter(move |s| s.kind == kind)
    }

    /// The whole script, one blank line between statements, with the batch
    /// separator on its own line after each statement when configured
    pub fn to_sql(&self) -> String {
        let mut out = String::new();
        for statement in &self.statements {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&statement.sql);
            out.push('\n');
            if let Some(separator) = &self.batch_separator {
                out.push_str(separator);
                out.push('\n');
            }
        }
        out
    }
}

// ============================================================================
// Generator
// ============================================================================

/// Builds a [`GeneratedScript`] for the configured dialect
#[derive(Debug)]
pub struct Generator {
    config: GeneratorConfig,
    provider: Box<dyn DialectProvider>,
}

impl Generator {
    /// Create a generator for the given configuration
    pub fn new(config: GeneratorConfig) -> Self {
        let provider = provider_for(config.dialect);
        Self { config, provider }
    }

    /// Create a generator with default configuration
    pub fn with_defaults() -> Self {
        Self::new(GeneratorConfig::default())
    }

    /// Get the current configuration
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// The provider statements are generated with
    pub fn provider(&self) -> &dyn DialectProvider {
        self.provider.as_ref()
    }

    /// Generate the script for `entities`
    ///
    /// # Errors
    ///
    /// Fails on an invalid configuration, or on the first entity or field
    /// a provider rejects. No partial script is returned.
    pub fn generate(&self, entities: &[EntityMetadata]) -> DdlResult<GeneratedScript> {
        self.config.validate()?;
        tracing::info!(
            dialect = %self.config.dialect,
            entities = entities.len(),
            "generating DDL script"
        );

        let mut statements = Vec::new();

        for entity in entities {
            statements.push(GeneratedStatement {
                kind: StatementKind::CreateTable,
                table: table_label(entity),
                sql: self.provider.create_table_statement(entity)?,
            });
        }

        if self.config.primary_keys {
            for entity in entities {
                statements.push(GeneratedStatement {
                    kind: StatementKind::PrimaryKey,
                    table: table_label(entity),
                    sql: self.provider.primary_key_statement(entity)?,
                });
            }
        }

        if self.config.foreign_keys {
            for entity in entities {
                for field in entity.foreign_key_fields() {
                    let sql = self.provider.foreign_key_statement(&field)?;
                    if sql.is_empty() {
                        continue;
                    }
                    tracing::debug!(
                        table = %table_label(entity),
                        field = %field.name,
                        "foreign key"
                    );
                    statements.push(GeneratedStatement {
                        kind: StatementKind::ForeignKey,
                        table: table_label(entity),
                        sql,
                    });
                }
            }
        }

        tracing::info!(statements = statements.len(), "DDL script generated");
        Ok(GeneratedScript {
            statements,
            batch_separator: self.config.batch_separator.clone(),
        })
    }
}

fn table_label(entity: &EntityMetadata) -> String {
    entity.table().unwrap_or_default().to_string()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use ddlforge_core::{DdlError, Dialect};
    use ddlforge_metadata::FieldMetadata;
    use pretty_assertions::assert_eq;

    fn sample() -> Vec<EntityMetadata> {
        vec![
            EntityMetadata::new("Order")
                .with_table_name("orders")
                .with_field(FieldMetadata::new("Id", "guid").required())
                .with_field(FieldMetadata::new("CustomerId", "guid").references("customers"))
                .with_field(FieldMetadata::new("Note", "string")),
            EntityMetadata::new("Customer")
                .with_table_name("customers")
                .with_field(FieldMetadata::new("Id", "guid").required()),
        ]
    }

    #[test]
    fn test_statement_order() {
        let script = Generator::with_defaults().generate(&sample()).unwrap();
        let kinds: Vec<(StatementKind, &str)> = script
            .statements
            .iter()
            .map(|s| (s.kind, s.table.as_str()))
            .collect();
        assert_eq!(
            kinds,
            vec![
                (StatementKind::CreateTable, "orders"),
                (StatementKind::CreateTable, "customers"),
                (StatementKind::PrimaryKey, "orders"),
                (StatementKind::PrimaryKey, "customers"),
                (StatementKind::ForeignKey, "orders"),
            ]
        );
        assert_eq!(script.statements_of(StatementKind::ForeignKey).count(), 1);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let entities = sample();
        Generator::with_defaults().generate(&entities).unwrap();
        assert_eq!(entities[0].fields[1].table_name, None);
    }

    #[test]
    fn test_constraints_can_be_disabled() {
        let config = GeneratorConfig::new()
            .without_primary_keys()
            .without_foreign_keys();
        let script = Generator::new(config).generate(&sample()).unwrap();
        assert_eq!(script.statement_count(), 2);
        assert!(
            script
                .statements
                .iter()
                .all(|s| s.kind == StatementKind::CreateTable)
        );
    }

    #[test]
    fn test_batch_separator() {
        let config = GeneratorConfig::new()
            .with_dialect(Dialect::SqlServer)
            .with_batch_separator("GO");
        let script = Generator::new(config).generate(&sample()).unwrap();
        let sql = script.to_sql();
        assert_eq!(sql.matches("\nGO\n").count(), script.statement_count());
        assert!(sql.starts_with("IF OBJECT_ID(N'[orders]', N'U') IS NULL"));
    }

    #[test]
    fn test_to_sql_without_separator() {
        let entities = vec![
            EntityMetadata::new("A")
                .with_table_name("a")
                .with_field(FieldMetadata::new("Id", "int")),
        ];
        let config = GeneratorConfig::new()
            .with_dialect(Dialect::MySql)
            .without_primary_keys();
        let sql = Generator::new(config).generate(&entities).unwrap().to_sql();
        assert_eq!(sql, "CREATE TABLE IF NOT EXISTS `a` (\n    `Id` INT\n);\n");
    }

    #[test]
    fn test_failure_returns_no_script() {
        let mut entities = sample();
        entities.push(EntityMetadata::new("Empty").with_table_name("empty"));
        let err = Generator::with_defaults().generate(&entities).unwrap_err();
        assert_eq!(err.argument(), Some("Fields"));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = GeneratorConfig::new().with_batch_separator(" ");
        let err = Generator::new(config).generate(&sample()).unwrap_err();
        assert!(matches!(err, DdlError::InvalidConfig(_)));
    }
}
