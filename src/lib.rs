//! # ddlforge
//!
//! Dialect-aware DDL generation from language-neutral entity metadata.
//!
//! Describe tables as [`EntityMetadata`] with ordered [`FieldMetadata`],
//! then ask a [`DialectProvider`] (or the [`Generator`], for a whole script)
//! for guarded, re-runnable `CREATE TABLE` and constraint statements.
//!
//! ```rust,ignore
//! use ddlforge::prelude::*;
//!
//! ddlforge::init_tracing();
//!
//! let customers = EntityMetadata::new("Customer")
//!     .with_table_name("customers")
//!     .with_field(FieldMetadata::new("Id", "guid").required())
//!     .with_field(FieldMetadata::new("Email", "string").with_length(120).unique());
//!
//! let script = Generator::new(GeneratorConfig::new().with_dialect(Dialect::MySql))
//!     .generate(&[customers])?;
//! println!("{}", script.to_sql());
//! ```

pub use ddlforge_core::{
    DdlError, DdlResult, Dialect, FromValue, Identifiable, JsonDocument, KeyProvider, LogicalType,
    Named, Timestamped, UuidKeyProvider, Validatable, generate_key,
};
pub use ddlforge_dialect::{
    DialectProvider, GeneratedScript, GeneratedStatement, Generator, GeneratorConfig, IdentifierLimit,
    MySqlProvider, PostgresProvider, SqlServerProvider, StatementKind, provider_for,
};
pub use ddlforge_metadata::{EntityMetadata, FieldMetadata, KeyedRecord};

use tracing_subscriber::EnvFilter;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Install a `fmt` subscriber filtered by `RUST_LOG` (default `info`).
///
/// Does nothing when a global subscriber is already set.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_ok();
    if installed {
        tracing::debug!(version = VERSION, "ddlforge logging initialised");
    }
}

/// Convenient re-exports for common usage
pub mod prelude {
    pub use crate::{
        DdlError, DdlResult, Dialect, DialectProvider, EntityMetadata, FieldMetadata, Generator,
        GeneratorConfig, JsonDocument, LogicalType, Validatable, provider_for,
    };
}
