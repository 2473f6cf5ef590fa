//! PostgreSQL driver.
//!
//! - [`PostgresDialect`]: `$n` placeholders and `||` concatenation
//! - [`PostgresProvider`]: reads `pg_class` and `information_schema` for one schema

mod dialect;
mod reader;

pub use dialect::PostgresDialect;
pub use reader::PostgresProvider;
