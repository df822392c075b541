//! Field definitions for entity columns
//!
//! [`FieldMetadata`] describes one column: its logical type, sizing,
//! nullability, uniqueness and an optional parent entity for foreign keys.
//! Core schema attributes are typed; documentation-only extras such as
//! sample values and synonyms live in the record's extension store.

use crate::record::{Document, KeyedRecord, fold_key};
use ddlforge_core::{
    DdlError, DdlResult, FromValue, Identifiable, JsonDocument, KeyProvider, LogicalType, Named,
    Timestamped, UuidKeyProvider, Validatable,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Extension key holding example values
pub const SAMPLE_VALUES: &str = "SampleValues";

/// Extension key holding alternative names
pub const SYNONYMS: &str = "Synonyms";

// ============================================================================
// FieldMetadata
// ============================================================================

/// Represents a field within an entity (maps to a database column)
///
/// Loading goes through [`Document`]: every key, in any casing, is applied
/// with [`set`](FieldMetadata::set).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", from = "Document")]
pub struct FieldMetadata {
    #[serde(flatten)]
    record: KeyedRecord,

    /// Column name
    pub name: String,

    /// Logical type tag
    #[serde(rename = "Type")]
    pub logical_type: LogicalType,

    /// Text cap for strings; scale for decimals
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<i32>,

    /// Digit count for numeric types
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precision: Option<i32>,

    /// Whether the column is NOT NULL
    pub is_required: bool,

    /// Whether the column carries a UNIQUE constraint
    pub is_unique: bool,

    /// Entity (table) this field references; presence means a foreign key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_entity_name: Option<String>,

    /// Owning table, attached by the caller before foreign-key generation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,

    /// Schema of the owning table
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_schema: Option<String>,

    /// Human-readable label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Human-readable description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FieldMetadata {
    /// Create a new field with the given name and logical type
    pub fn new(name: impl Into<String>, logical_type: impl Into<LogicalType>) -> Self {
        Self::with_key_provider(name, logical_type, &UuidKeyProvider)
    }

    /// Create a new field keyed by `provider`
    pub fn with_key_provider(
        name: impl Into<String>,
        logical_type: impl Into<LogicalType>,
        provider: &dyn KeyProvider,
    ) -> Self {
        Self {
            name: name.into(),
            logical_type: logical_type.into(),
            ..Self::from_record(KeyedRecord::with_key_provider(provider))
        }
    }

    fn from_record(record: KeyedRecord) -> Self {
        Self {
            record,
            name: String::new(),
            logical_type: LogicalType::default(),
            length: None,
            precision: None,
            is_required: false,
            is_unique: false,
            parent_entity_name: None,
            table_name: None,
            table_schema: None,
            display_name: None,
            description: None,
        }
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Set the length (text cap, or decimal scale)
    pub fn with_length(mut self, length: i32) -> Self {
        self.length = Some(length);
        self
    }

    /// Set the precision
    pub fn with_precision(mut self, precision: i32) -> Self {
        self.precision = Some(precision);
        self
    }

    /// Mark the field as required (NOT NULL)
    pub fn required(mut self) -> Self {
        self.is_required = true;
        self
    }

    /// Mark the field as unique
    pub fn unique(mut self) -> Self {
        self.is_unique = true;
        self
    }

    /// Declare a foreign key to `parent`
    pub fn references(mut self, parent: impl Into<String>) -> Self {
        self.parent_entity_name = Some(parent.into());
        self
    }

    /// Attach the owning table (and optional schema)
    pub fn in_table(mut self, table: impl Into<String>, schema: Option<String>) -> Self {
        self.table_name = Some(table.into());
        self.table_schema = schema;
        self
    }

    /// Set the display name
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set sample values
    pub fn with_sample_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_sample_values(values);
        self
    }

    /// Set synonyms
    pub fn with_synonyms<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_synonyms(values);
        self
    }

    // ========================================================================
    // Documentation extras
    // ========================================================================

    /// Example values, empty when none were recorded
    pub fn sample_values(&self) -> Vec<String> {
        self.record.get_typed(SAMPLE_VALUES).unwrap_or_default()
    }

    /// Replace the sample values
    pub fn set_sample_values<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.record.set(SAMPLE_VALUES, string_array(values));
    }

    /// Alternative names, empty when none were recorded
    pub fn synonyms(&self) -> Vec<String> {
        self.record.get_typed(SYNONYMS).unwrap_or_default()
    }

    /// Replace the synonyms
    pub fn set_synonyms<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.record.set(SYNONYMS, string_array(values));
    }

    // ========================================================================
    // Keyed access
    // ========================================================================

    /// Read an attribute by name (case-insensitive)
    ///
    /// Unset optional attributes and unknown keys fail with `NotFound`.
    pub fn get(&self, name: &str) -> DdlResult<Value> {
        let value = match fold_key(name).as_str() {
            "name" => Some(Value::from(self.name.clone())),
            "type" => Some(Value::from(self.logical_type.as_str())),
            "length" => self.length.map(Value::from),
            "precision" => self.precision.map(Value::from),
            "isrequired" => Some(Value::from(self.is_required)),
            "isunique" => Some(Value::from(self.is_unique)),
            "parententityname" => self.parent_entity_name.clone().map(Value::from),
            "tablename" => self.table_name.clone().map(Value::from),
            "tableschema" => self.table_schema.clone().map(Value::from),
            "displayname" => self.display_name.clone().map(Value::from),
            "description" => self.description.clone().map(Value::from),
            _ => return self.record.get(name),
        };
        value.ok_or_else(|| DdlError::not_found(name))
    }

    /// Write an attribute by name (case-insensitive). Always succeeds;
    /// values that do not convert clear optional attributes.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) {
        let value = value.into();
        match fold_key(name).as_str() {
            "name" => self.name = String::from_value(&value).unwrap_or_default(),
            "type" => {
                self.logical_type = String::from_value(&value)
                    .map(|tag| LogicalType::parse(&tag))
                    .unwrap_or_default()
            }
            "length" => self.length = optional(&value),
            "precision" => self.precision = optional(&value),
            "isrequired" => self.is_required = bool::from_value(&value).unwrap_or(false),
            "isunique" => self.is_unique = bool::from_value(&value).unwrap_or(false),
            "parententityname" => self.parent_entity_name = optional(&value),
            "tablename" => self.table_name = optional(&value),
            "tableschema" => self.table_schema = optional(&value),
            "displayname" => self.display_name = optional(&value),
            "description" => self.description = optional(&value),
            _ => self.record.set(name, value),
        }
    }

    /// Best-effort typed read, `None` on a missing key or failed conversion
    pub fn get_typed<T: FromValue>(&self, name: &str) -> Option<T> {
        self.get(name).ok().and_then(|value| T::from_value(&value))
    }

    // ========================================================================
    // Utility methods
    // ========================================================================

    /// Underlying record (identity, audit data, extension store)
    pub fn record(&self) -> &KeyedRecord {
        &self.record
    }

    /// Increment the version and return the new value
    pub fn bump_version(&mut self) -> i64 {
        self.record.bump_version()
    }

    /// Whether a parent entity is declared
    pub fn is_foreign_key(&self) -> bool {
        non_blank(self.parent_entity_name.as_deref()).is_some()
    }

    /// Parent entity name, if declared and not blank
    pub fn parent(&self) -> Option<&str> {
        non_blank(self.parent_entity_name.as_deref())
    }

    /// Owning table name, if attached and not blank
    pub fn owning_table(&self) -> Option<&str> {
        non_blank(self.table_name.as_deref())
    }

    /// Display label (falls back to the field name)
    pub fn display_label(&self) -> &str {
        non_blank(self.display_name.as_deref()).unwrap_or(&self.name)
    }
}

impl Validatable for FieldMetadata {
    fn validate(&self) -> DdlResult<()> {
        if self.name.trim().is_empty() {
            return Err(DdlError::missing("Name"));
        }
        Ok(())
    }
}

impl Named for FieldMetadata {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Identifiable for FieldMetadata {
    fn id(&self) -> &str {
        self.record.id()
    }
}

impl Timestamped for FieldMetadata {
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

impl JsonDocument for FieldMetadata {}

impl From<Document> for FieldMetadata {
    fn from(mut document: Document) -> Self {
        let mut field = Self::from_record(KeyedRecord::restore(&mut document));
        for (key, value) in document {
            field.set(key.as_str(), value);
        }
        field
    }
}

impl Default for FieldMetadata {
    fn default() -> Self {
        Self::new("field", LogicalType::String)
    }
}

impl PartialEq for FieldMetadata {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for FieldMetadata {}

// ============================================================================
// Helper Functions
// ============================================================================

/// Trimmed value, or `None` when absent or blank
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Convert a value for an optional attribute; null or unconvertible clears it
pub(crate) fn optional<T: FromValue>(value: &Value) -> Option<T> {
    match Option::<T>::from_value(value) {
        Some(converted) => converted,
        None => {
            tracing::warn!(%value, "value did not convert, clearing attribute");
            None
        }
    }
}

fn string_array<I, S>(values: I) -> Value
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Value::Array(values.into_iter().map(|v| Value::String(v.into())).collect())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_new() {
        let field = FieldMetadata::new("Email", "string");
        assert_eq!(field.name, "Email");
        assert_eq!(field.logical_type, LogicalType::String);
        assert!(!field.is_required);
        assert!(!field.is_unique);
        assert!(!field.is_foreign_key());
        assert_eq!(field.id().len(), 32);
    }

    #[test]
    fn test_field_builder() {
        let field = FieldMetadata::new("Email", "String")
            .with_length(120)
            .required()
            .unique()
            .with_display_name("E-mail address");

        assert_eq!(field.length, Some(120));
        assert!(field.is_required);
        assert!(field.is_unique);
        assert_eq!(field.display_label(), "E-mail address");
    }

    #[test]
    fn test_keyed_access_is_case_insensitive() {
        let mut field = FieldMetadata::new("Total", "decimal");
        field.set("PRECISION", 10);
        field.set("length", "2");
        field.set("IsRequired", "true");

        assert_eq!(field.precision, Some(10));
        assert_eq!(field.length, Some(2));
        assert!(field.is_required);
        assert_eq!(field.get("Precision").unwrap(), json!(10));
        assert_eq!(field.get_typed::<i32>("LENGTH"), Some(2));
        assert_eq!(field.get("type").unwrap(), json!("decimal"));
    }

    #[test]
    fn test_type_set_parses_tag() {
        let mut field = FieldMetadata::default();
        field.set("Type", "Int64");
        assert_eq!(field.logical_type, LogicalType::Long);
        field.set("Type", "money");
        assert_eq!(field.logical_type, LogicalType::Other("money".to_string()));
    }

    #[test]
    fn test_unset_attribute_not_found() {
        let field = FieldMetadata::new("Code", "string");
        assert!(field.get("ParentEntityName").unwrap_err().is_not_found());
        assert!(field.get("Whatever").unwrap_err().is_not_found());
        assert_eq!(field.get_typed::<String>("Description"), None);
    }

    #[test]
    fn test_invalid_length_clears_attribute() {
        let mut field = FieldMetadata::new("Code", "string").with_length(5);
        field.set("Length", "wide");
        assert_eq!(field.length, None);
    }

    #[test]
    fn test_documentation_extras() {
        let mut field = FieldMetadata::new("Status", "string")
            .with_sample_values(["open", "closed"])
            .with_synonyms(vec!["state".to_string()]);

        assert_eq!(field.sample_values(), vec!["open", "closed"]);
        assert_eq!(field.synonyms(), vec!["state"]);

        field.set("synonyms", "phase, stage");
        assert_eq!(field.synonyms(), vec!["phase", "stage"]);
        assert_eq!(field.record().len(), 2);
    }

    #[test]
    fn test_foreign_key_helpers() {
        let field = FieldMetadata::new("CustomerId", "guid")
            .references("  ")
            .in_table("orders", None);
        assert!(!field.is_foreign_key());
        assert_eq!(field.owning_table(), Some("orders"));

        let field = field.references("customers");
        assert_eq!(field.parent(), Some("customers"));
    }

    #[test]
    fn test_field_validation() {
        assert!(FieldMetadata::new("Email", "string").validate().is_ok());
        let err = FieldMetadata::new("  ", "string").validate().unwrap_err();
        assert_eq!(err.argument(), Some("Name"));
    }

    #[test]
    fn test_field_json_round_trip() {
        let field = FieldMetadata::new("Amount", "Decimal")
            .with_precision(12)
            .with_length(2)
            .with_synonyms(["total"]);
        let json = field.to_json();

        assert!(json.contains("\"Type\": \"decimal\""));
        assert!(json.contains("\"Synonyms\""));

        let parsed = FieldMetadata::from_json(&json).unwrap();
        assert_eq!(parsed, field);
        assert_eq!(parsed.precision, Some(12));
        assert_eq!(parsed.synonyms(), vec!["total"]);
    }

    #[test]
    fn test_field_from_loose_json() {
        let parsed = FieldMetadata::from_json(
            r#"{ "Name": "Flag", "Type": "BOOLEAN", "IsRequired": true }"#,
        )
        .unwrap();
        assert_eq!(parsed.logical_type, LogicalType::Bool);
        assert!(parsed.is_required);
        assert_eq!(parsed.record().version(), 1);
    }

    #[test]
    fn test_field_from_json_any_key_casing() {
        let parsed = FieldMetadata::from_json(
            r#"{ "name": "Email", "type": "int", "isRequired": true, "LENGTH": "50", "tableName": "users", "note": "x" }"#,
        )
        .unwrap();

        assert_eq!(parsed.name, "Email");
        assert_eq!(parsed.logical_type, LogicalType::Int);
        assert!(parsed.is_required);
        assert_eq!(parsed.length, Some(50));
        assert_eq!(parsed.owning_table(), Some("users"));
        assert_eq!(parsed.get("NAME").unwrap(), json!("Email"));
        assert_eq!(parsed.record().keys().collect::<Vec<_>>(), vec!["note"]);

        let json = parsed.to_json();
        assert!(json.contains("\"Name\": \"Email\""));
        assert!(!json.contains("\"name\""));
        assert!(!json.contains("\"type\""));
        assert!(!json.contains("\"isRequired\""));
    }

    #[test]
    fn test_field_from_json_lenient_sizes() {
        let parsed =
            FieldMetadata::from_json(r#"{ "Name": "Total", "Type": "decimal", "Length": "2", "Precision": 10.0 }"#)
                .unwrap();
        assert_eq!(parsed.length, Some(2));
        assert_eq!(parsed.precision, Some(10));

        let parsed = FieldMetadata::from_json(r#"{ "Name": "Code", "Length": "wide" }"#).unwrap();
        assert_eq!(parsed.length, None);
        assert_eq!(parsed.logical_type, LogicalType::String);
    }
}
