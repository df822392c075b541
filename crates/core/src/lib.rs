//! # ddlforge Core
//!
//! Core types, traits, and error handling for ddlforge.
//!
//! - **Types**: logical type tags and target dialects
//! - **Keys**: the pluggable [`KeyProvider`] used to stamp new records
//! - **Values**: lenient [`FromValue`] conversions for typed reads
//! - **Traits**: `Validatable`, `JsonDocument`, `Identifiable`, `Named`, `Timestamped`
//! - **Errors**: `DdlError` and `DdlResult`
//!

pub mod error;
pub mod key;
pub mod traits;
pub mod types;
pub mod value;

// Re-export commonly used items at crate root
pub use error::{DdlError, DdlResult};
pub use key::{KeyProvider, UuidKeyProvider, generate_key};
pub use traits::{Identifiable, JsonDocument, Named, Timestamped, Validatable};
pub use types::{Dialect, LogicalType};
pub use value::FromValue;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
