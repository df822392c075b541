//! # ddlforge Metadata
//!
//! The language-neutral description of a schema that dialect providers turn
//! into DDL.
//!
//! ## Core Concepts
//!
//! - **KeyedRecord**: identity, audit timestamps, a version and a
//!   case-insensitive attribute store
//! - **EntityMetadata**: one table, with its fields in column order
//! - **FieldMetadata**: one column, with type, sizing, constraints and an
//!   optional parent entity for foreign keys
//!

pub mod entity;
pub mod field;
pub mod record;

pub use entity::EntityMetadata;
pub use field::{FieldMetadata, SAMPLE_VALUES, SYNONYMS};
pub use record::{FieldKey, INITIAL_VERSION, KeyedRecord};

// Re-export core types that are commonly used with metadata
pub use ddlforge_core::{
    DdlError, DdlResult, Identifiable, JsonDocument, KeyProvider, LogicalType, Named, Timestamped,
    Validatable,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Convenient re-exports for common usage
pub mod prelude {
    pub use crate::{
        DdlError, DdlResult, EntityMetadata, FieldMetadata, Identifiable, JsonDocument,
        KeyedRecord, LogicalType, Named, Timestamped, Validatable,
    };
}
