//! Core traits for ddlforge
//!
//! These traits give metadata objects a consistent surface for validation,
//! JSON persistence, identity and audit timestamps.

use crate::error::{DdlError, DdlResult};
use serde::{Serialize, de::DeserializeOwned};

// ============================================================================
// Validatable Trait
// ============================================================================

/// Trait for types that can be validated
///
/// # Example
///
/// ```rust,ignore
/// use ddlforge_core::{DdlError, DdlResult, Validatable};
///
/// struct Column {
///     name: String,
/// }
///
/// impl Validatable for Column {
///     fn validate(&self) -> DdlResult<()> {
///         if self.name.trim().is_empty() {
///             return Err(DdlError::missing("Name"));
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Validatable {
    /// Validate the current state of the object
    fn validate(&self) -> DdlResult<()>;

    /// Check if the object is valid without returning error details
    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

// ============================================================================
// JsonDocument Trait
// ============================================================================

/// Trait for types persisted as indented JSON
pub trait JsonDocument: Serialize + DeserializeOwned + Sized {
    /// Indented, human-readable JSON
    ///
    /// Never fails: a serializer error (which owned metadata cannot
    /// produce) degrades to an empty object.
    fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Parse from JSON. A `null` document is rejected as a missing input.
    fn from_json(json: &str) -> DdlResult<Self> {
        let parsed: Option<Self> = serde_json::from_str(json)?;
        parsed.ok_or_else(|| DdlError::null_input(std::any::type_name::<Self>()))
    }
}

// ============================================================================
// Identifiable Trait
// ============================================================================

/// Trait for types that carry an opaque identifier
pub trait Identifiable {
    /// Get the unique identifier
    fn id(&self) -> &str;

    /// Check if this matches another identifier
    fn matches_id(&self, id: &str) -> bool {
        self.id() == id
    }
}

// ============================================================================
// Named Trait
// ============================================================================

/// Trait for types that have a logical name
pub trait Named {
    /// Get the name
    fn name(&self) -> &str;

    /// Check if the name matches (case-insensitive)
    fn name_matches(&self, other: &str) -> bool {
        self.name().to_lowercase() == other.to_lowercase()
    }
}

// ============================================================================
// Timestamped Trait
// ============================================================================

/// Trait for types that track creation and modification times
pub trait Timestamped {
    /// Get the creation timestamp
    fn created_at(&self) -> chrono::DateTime<chrono::Utc>;

    /// Get the last modification timestamp
    fn modified_at(&self) -> chrono::DateTime<chrono::Utc>;

    /// Update the modification timestamp to now
    fn touch(&mut self);
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Doc {
        name: String,
    }

    impl JsonDocument for Doc {}

    impl Validatable for Doc {
        fn validate(&self) -> DdlResult<()> {
            if self.name.is_empty() {
                return Err(DdlError::missing("name"));
            }
            Ok(())
        }
    }

    impl Named for Doc {
        fn name(&self) -> &str {
            &self.name
        }
    }

    #[test]
    fn test_validatable_trait() {
        assert!(Doc { name: "a".into() }.is_valid());
        assert!(!Doc { name: "".into() }.is_valid());
    }

    #[test]
    fn test_json_document_round_trip() {
        let doc = Doc {
            name: "orders".into(),
        };
        let json = doc.to_json();
        assert!(json.contains('\n'));
        assert_eq!(Doc::from_json(&json).unwrap(), doc);
    }

    #[test]
    fn test_json_document_null_is_null_input() {
        let err = Doc::from_json("null").unwrap_err();
        assert!(err.is_null_input());
    }

    #[test]
    fn test_named_is_case_insensitive() {
        let doc = Doc {
            name: "OrderLine".into(),
        };
        assert!(doc.name_matches("orderline"));
        assert!(!doc.name_matches("order"));
    }
}
