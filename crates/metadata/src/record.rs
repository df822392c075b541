//! Case-insensitive keyed record store
//!
//! [`KeyedRecord`] is the foundation of every metadata object: an identity,
//! audit timestamps, a version counter and a map of ad-hoc attributes whose
//! keys compare case-insensitively (`"Name"` and `"name"` are one slot).

use chrono::{DateTime, Utc};
use ddlforge_core::{
    DdlError, DdlResult, FromValue, Identifiable, JsonDocument, KeyProvider, Timestamped,
    UuidKeyProvider, generate_key,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

/// Initial value of [`KeyedRecord::version`]
pub const INITIAL_VERSION: i64 = 1;

/// Fold a key for case-insensitive comparison
pub fn fold_key(name: &str) -> String {
    name.trim().to_lowercase()
}

// ============================================================================
// FieldKey
// ============================================================================

/// Map key that keeps its original spelling but compares case-insensitively
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldKey(String);

impl FieldKey {
    /// Create a key from a field name; surrounding whitespace is dropped
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        if name.trim().len() == name.len() {
            Self(name)
        } else {
            Self(name.trim().to_string())
        }
    }

    /// The spelling the key was first stored under
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn folded(&self) -> impl Iterator<Item = char> + '_ {
        self.0.trim().chars().flat_map(char::to_lowercase)
    }
}

impl From<&str> for FieldKey {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq for FieldKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FieldKey {}

impl PartialOrd for FieldKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FieldKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.folded().cmp(other.folded())
    }
}

impl Hash for FieldKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for c in self.folded() {
            c.hash(state);
        }
    }
}

/// A loaded JSON object, keyed case-insensitively
///
/// Metadata types deserialize through this map so that every entry takes
/// the same route as a keyed `set`, whatever its spelling.
pub type Document = BTreeMap<FieldKey, Value>;

// ============================================================================
// KeyedRecord
// ============================================================================

/// Identity, audit data and a case-insensitive attribute store
///
/// `set` never touches `ModifiedAt` or `Version`; callers that track
/// revisions call [`touch`](Timestamped::touch) and
/// [`bump_version`](KeyedRecord::bump_version) themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", from = "Document")]
pub struct KeyedRecord {
    id: String,
    created_at: DateTime<Utc>,
    modified_at: DateTime<Utc>,
    version: i64,

    #[serde(flatten)]
    values: Document,
}

impl KeyedRecord {
    /// Create a record keyed by the default provider
    pub fn new() -> Self {
        Self::with_key_provider(&UuidKeyProvider)
    }

    /// Create a record keyed by `provider`
    pub fn with_key_provider(provider: &dyn KeyProvider) -> Self {
        let now = Utc::now();
        Self {
            id: provider.generate_key(),
            created_at: now,
            modified_at: now,
            version: INITIAL_VERSION,
            values: BTreeMap::new(),
        }
    }

    /// Record for a loaded document: takes `Id` out of `document` (a fresh
    /// key when absent or blank); the caller routes the remaining entries
    pub(crate) fn restore(document: &mut Document) -> Self {
        let id = document
            .remove(&FieldKey::from("Id"))
            .and_then(|value| String::from_value(&value))
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(generate_key);
        let now = Utc::now();
        Self {
            id,
            created_at: now,
            modified_at: now,
            version: INITIAL_VERSION,
            values: Document::new(),
        }
    }

    // ========================================================================
    // Raw access
    // ========================================================================

    /// Read a value; audit attributes (`Id`, `CreatedAt`, `ModifiedAt`,
    /// `Version`) are readable under their names as well
    pub fn get(&self, name: &str) -> DdlResult<Value> {
        if let Some(value) = self.audit_value(name) {
            return Ok(value);
        }
        self.values
            .get(&FieldKey::from(name))
            .cloned()
            .ok_or_else(|| DdlError::not_found(name))
    }

    /// Borrow a stored attribute without cloning
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(&FieldKey::from(name))
    }

    /// Upsert a value. Always succeeds.
    ///
    /// `Id` is immutable and writes to it are ignored. Audit timestamps and
    /// the version accept any value convertible to their type.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) {
        let value = value.into();
        match fold_key(name).as_str() {
            "id" => {
                tracing::warn!(id = %self.id, "ignoring write to immutable record Id");
            }
            "createdat" => match DateTime::<Utc>::from_value(&value) {
                Some(ts) => self.created_at = ts,
                None => tracing::warn!(%value, "ignoring non-timestamp CreatedAt"),
            },
            "modifiedat" => match DateTime::<Utc>::from_value(&value) {
                Some(ts) => self.modified_at = ts,
                None => tracing::warn!(%value, "ignoring non-timestamp ModifiedAt"),
            },
            "version" => match i64::from_value(&value) {
                Some(version) => self.version = version,
                None => tracing::warn!(%value, "ignoring non-integer Version"),
            },
            _ => {
                // BTreeMap::insert keeps the stored key, so the first spelling wins
                self.values.insert(FieldKey::from(name), value);
            }
        }
    }

    /// Best-effort typed read: `None` on a missing key or failed conversion
    pub fn get_typed<T: FromValue>(&self, name: &str) -> Option<T> {
        self.get(name).ok().and_then(|value| T::from_value(&value))
    }

    /// Whether an attribute (or audit attribute) exists under `name`
    pub fn contains(&self, name: &str) -> bool {
        self.audit_value(name).is_some() || self.values.contains_key(&FieldKey::from(name))
    }

    /// Remove an attribute, returning its value
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.values.remove(&FieldKey::from(name))
    }

    /// Names of the stored attributes (audit attributes excluded)
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(FieldKey::as_str)
    }

    /// Number of stored attributes (audit attributes excluded)
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no attributes are stored
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    // ========================================================================
    // Audit data
    // ========================================================================

    /// Concurrency token, starting at 1
    pub fn version(&self) -> i64 {
        self.version
    }

    /// Increment the version and return the new value
    pub fn bump_version(&mut self) -> i64 {
        self.version += 1;
        self.version
    }

    fn audit_value(&self, name: &str) -> Option<Value> {
        match fold_key(name).as_str() {
            "id" => Some(Value::String(self.id.clone())),
            "createdat" => Some(Value::String(self.created_at.to_rfc3339())),
            "modifiedat" => Some(Value::String(self.modified_at.to_rfc3339())),
            "version" => Some(Value::from(self.version)),
            _ => None,
        }
    }
}

impl From<Document> for KeyedRecord {
    fn from(mut document: Document) -> Self {
        let mut record = Self::restore(&mut document);
        for (key, value) in document {
            record.set(key.as_str(), value);
        }
        record
    }
}

impl Default for KeyedRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl Identifiable for KeyedRecord {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Timestamped for KeyedRecord {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn modified_at(&self) -> DateTime<Utc> {
        self.modified_at
    }

    fn touch(&mut self) {
        self.modified_at = Utc::now();
    }
}

impl JsonDocument for KeyedRecord {}

// ============================================================================
// Tests
// ============================================================================
