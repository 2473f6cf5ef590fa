//! SQLite driver.
//!
//! - [`SqliteDialect`]: `?` placeholders and `||` concatenation
//! - [`SqliteProvider`]: reads `sqlite_master` and `pragma_table_info`
//!
//! SQLite has no auto-increment flag in its pragmas, so the provider scans
//! each table's `CREATE TABLE` text with the tokenizer in [`ddl`].
//!
//! # Connection String
//!
//! ```text
//! sqlite://path/to/app.db
//! sqlite:app.db
//! app.db
//! ```

pub mod ddl;
mod dialect;
mod reader;

pub use dialect::SqliteDialect;
pub use reader::SqliteProvider;
