//! Entity definitions for tables
//!
//! [`EntityMetadata`] describes one table: its logical name, table name,
//! schema and the ordered list of fields that become its columns.

use crate::field::{FieldMetadata, non_blank, optional};
use crate::record::{Document, FieldKey, KeyedRecord, fold_key};
use ddlforge_core::{
    DdlError, DdlResult, FromValue, Identifiable, JsonDocument, KeyProvider, Named, Timestamped,
    UuidKeyProvider, Validatable,
};
use heck::ToSnakeCase;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// EntityMetadata
// ============================================================================

/// Represents a data entity (maps to a database table)
///
/// Loading applies every key of the document with
/// [`set`](EntityMetadata::set), in any casing; a malformed `Fields` list
/// fails the load.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", try_from = "Document")]
pub struct EntityMetadata {
    #[serde(flatten)]
    record: KeyedRecord,

    /// Logical entity name
    pub name: String,

    /// Human-readable description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Database table name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,

    /// Database schema
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Fields in column order
    pub fields: Vec<FieldMetadata>,
}

impl EntityMetadata {
    /// Create a new entity with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_key_provider(name, &UuidKeyProvider)
    }

    /// Create a new entity keyed by `provider`
    pub fn with_key_provider(name: impl Into<String>, provider: &dyn KeyProvider) -> Self {
        Self {
            name: name.into(),
            ..Self::from_record(KeyedRecord::with_key_provider(provider))
        }
    }

    fn from_record(record: KeyedRecord) -> Self {
        Self {
            record,
            name: String::new(),
            description: None,
            table_name: None,
            schema: None,
            fields: Vec::new(),
        }
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Set the table name
    pub fn with_table_name(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = Some(table_name.into());
        self
    }

    /// Set the schema
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add a field using builder pattern
    pub fn with_field(mut self, field: FieldMetadata) -> Self {
        self.add_field(field);
        self
    }

    // ========================================================================
    // Field management
    // ========================================================================

    /// Append a field; it becomes the last column
    pub fn add_field(&mut self, field: FieldMetadata) {
        self.fields.push(field);
    }

    /// Get a field by name (case-insensitive)
    pub fn field(&self, name: &str) -> Option<&FieldMetadata> {
        self.fields.iter().find(|f| f.name_matches(name))
    }

    /// Get a mutable field by name (case-insensitive)
    pub fn field_mut(&mut self, name: &str) -> Option<&mut FieldMetadata> {
        self.fields.iter_mut().find(|f| f.name_matches(name))
    }

    /// Remove a field by ID
    pub fn remove_field(&mut self, field_id: &str) -> Option<FieldMetadata> {
        let pos = self.fields.iter().position(|f| f.matches_id(field_id))?;
        Some(self.fields.remove(pos))
    }

    /// Get the number of fields
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Fields that declare a parent entity, cloned and stamped with this
    /// entity's table name and schema
    pub fn foreign_key_fields(&self) -> Vec<FieldMetadata> {
        self.fields
            .iter()
            .filter(|f| f.is_foreign_key())
            .map(|f| {
                f.clone()
                    .in_table(self.table_name.clone().unwrap_or_default(), self.schema.clone())
            })
            .collect()
    }

    // ========================================================================
    // Naming
    // ========================================================================

    /// Table name if set and not blank
    pub fn table(&self) -> Option<&str> {
        non_blank(self.table_name.as_deref())
    }

    /// Schema if set and not blank
    pub fn schema_name(&self) -> Option<&str> {
        non_blank(self.schema.as_deref())
    }

    /// snake_case form of the entity name, for callers that want a default
    pub fn conventional_table_name(&self) -> String {
        self.name.to_snake_case()
    }

    // ========================================================================
    // Keyed access
    // ========================================================================

    /// Read an attribute by name (case-insensitive)
    pub fn get(&self, name: &str) -> DdlResult<Value> {
        let value = match fold_key(name).as_str() {
            "name" => Some(Value::from(self.name.clone())),
            "description" => self.description.clone().map(Value::from),
            "tablename" => self.table_name.clone().map(Value::from),
            "schema" => self.schema.clone().map(Value::from),
            "fields" => Some(serde_json::to_value(&self.fields)?),
            _ => return self.record.get(name),
        };
        value.ok_or_else(|| DdlError::not_found(name))
    }

    /// Write an attribute by name (case-insensitive). Always succeeds.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) {
        let value = value.into();
        match fold_key(name).as_str() {
            "name" => self.name = String::from_value(&value).unwrap_or_default(),
            "description" => self.description = optional(&value),
            "tablename" => self.table_name = optional(&value),
            "schema" => self.schema = optional(&value),
            "fields" => match serde_json::from_value::<Option<Vec<FieldMetadata>>>(value) {
                Ok(fields) => self.fields = fields.unwrap_or_default(),
                Err(e) => tracing::warn!(error = %e, "ignoring malformed Fields value"),
            },
            _ => self.record.set(name, value),
        }
    }

    /// Best-effort typed read, `None` on a missing key or failed conversion
    pub fn get_typed<T: FromValue>(&self, name: &str) -> Option<T> {
        self.get(name).ok().and_then(|value| T::from_value(&value))
    }

    /// Underlying record (identity, audit data, extension store)
    pub fn record(&self) -> &KeyedRecord {
        &self.record
    }

    /// Increment the version and return the new value
    pub fn bump_version(&mut self) -> i64 {
        self.record.bump_version()
    }
}

impl Validatable for EntityMetadata {
    fn validate(&self) -> DdlResult<()> {
        if self.name.trim().is_empty() {
            return Err(DdlError::missing("Name"));
        }
        for (index, field) in self.fields.iter().enumerate() {
            field.validate().map_err(|e| match e {
                DdlError::InvalidArgument { argument, message } => DdlError::InvalidArgument {
                    argument: format!("Fields[{}].{}", index, argument),
                    message,
                },
                other => other,
            })?;
        }
        Ok(())
    }
}

impl Named for EntityMetadata {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Identifiable for EntityMetadata {
    fn id(&self) -> &str {
        self.record.id()
    }
}

impl Timestamped for EntityMetadata {
    fn created_at(&self) -> chrono::DateTime<chrono::Utc> {
        self.record.created_at()
    }

    fn modified_at(&self) -> chrono::DateTime<chrono::Utc> {
        self.record.modified_at()
    }

    fn touch(&mut self) {
        self.record.touch();
    }
}

impl JsonDocument for EntityMetadata {}

impl TryFrom<Document> for EntityMetadata {
    type Error = serde_json::Error;

    fn try_from(mut document: Document) -> Result<Self, Self::Error> {
        let fields = match document.remove(&FieldKey::from("Fields")) {
            Some(value) => serde_json::from_value::<Option<Vec<FieldMetadata>>>(value)?,
            None => None,
        };
        let mut entity = Self::from_record(KeyedRecord::restore(&mut document));
        entity.fields = fields.unwrap_or_default();
        for (key, value) in document {
            entity.set(key.as_str(), value);
        }
        Ok(entity)
    }
}

impl PartialEq for EntityMetadata {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for EntityMetadata {}

// ============================================================================
// Tests
// ============================================================================
