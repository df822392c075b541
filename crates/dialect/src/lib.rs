//! # ddlforge Dialect
//!
//! Turns [`EntityMetadata`](ddlforge_metadata::EntityMetadata) into
//! idempotent DDL for a target database.
//!
//! ## Modules
//!
//! - **provider**: the [`DialectProvider`] trait and shared preconditions
//! - **typemap**: data-driven logical → native type tables
//! - **postgres**, **sqlserver**, **mysql**: one provider per database
//! - **generator**: ordered scripts for a whole set of entities
//! - **config**: generator configuration, optionally loaded from TOML
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ddlforge_core::Dialect;
//! use ddlforge_dialect::{Generator, GeneratorConfig};
//!
//! let config = GeneratorConfig::new().with_dialect(Dialect::SqlServer);
//! let script = Generator::new(config).generate(&entities)?;
//! println!("{}", script.to_sql());
//! ```

pub mod config;
pub mod generator;
pub mod mysql;
pub mod postgres;
pub mod provider;
pub mod sqlserver;
pub mod typemap;

pub use config::GeneratorConfig;
pub use generator::{GeneratedScript, GeneratedStatement, Generator, StatementKind};
pub use mysql::MySqlProvider;
pub use postgres::PostgresProvider;
pub use provider::{DialectProvider, IdentifierLimit, KEY_COLUMN};
pub use sqlserver::SqlServerProvider;
pub use typemap::{NativeType, TypeMap};

use ddlforge_core::Dialect;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Provider for a dialect
pub fn provider_for(dialect: Dialect) -> Box<dyn DialectProvider> {
    match dialect {
        Dialect::PostgreSql => Box::new(PostgresProvider::new()),
        Dialect::SqlServer => Box::new(SqlServerProvider::new()),
        Dialect::MySql => Box::new(MySqlProvider::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_for_each_dialect() {
        for dialect in Dialect::all() {
            assert_eq!(provider_for(*dialect).dialect(), *dialect);
        }
    }

    #[test]
    fn test_every_provider_maps_every_known_type() {
        for dialect in Dialect::all() {
            let provider = provider_for(*dialect);
            assert_eq!(provider.type_map().logical_types().count(), 11);
        }
    }
}
