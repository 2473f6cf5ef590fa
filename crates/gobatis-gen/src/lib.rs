//! # gobatis-gen
//!
//! Schema-driven Go code generator for the gobatis mapper runtime.
//!
//! The library reads table metadata from a live database and renders, per
//! table:
//!
//! - **Record types**: Go structs with `db` and optional `json` tags
//! - **DAO interfaces**: Go interfaces with the full method catalog
//! - **Mapper documents**: gobatis XML with one statement per DAO method
//! - **SQL text**: plain statements in the dialect's placeholder syntax
//!
//! MySQL/MariaDB, PostgreSQL and SQLite catalogs are supported.
//!
//! ## Example
//!
//! ```rust,no_run
//! use gobatis_gen::{Generator, GeneratorConfig};
//!
//! #[tokio::main]
//! async fn main() -> gobatis_gen::Result<()> {
//!     let config = GeneratorConfig::load("gobatis-gen.yaml")?;
//!     let generator = Generator::new(config)?;
//!     let report = generator.run().await?.into_result()?;
//!     println!("Wrote {} files", report.files.len());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;
pub mod drivers;
pub mod error;
pub mod filter;
pub mod generator;
pub mod naming;
pub mod typemap;

// Re-exports for convenient access
pub use config::{DatabaseConfig, GeneratorConfig, OptionsConfig, OutputConfig, TablesConfig};
pub use crate::core::{Column, Dialect, SchemaProvider, Table};
pub use drivers::{Driver, ProviderImpl};
pub use error::{GenError, Result};
pub use filter::{filter_tables, TableFilter};
pub use generator::{ArtifactKind, GenerationReport, Generator, TableFailure};
pub use typemap::{map_native_type, MappedType, TargetKind};
