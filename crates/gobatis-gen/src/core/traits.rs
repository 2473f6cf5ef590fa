//! Core traits for database-agnostic schema introspection.
//!
//! - [`SchemaProvider`]: reads table and column metadata from a catalog
//! - [`Dialect`]: SQL syntax differences needed when rendering statements

use async_trait::async_trait;

use crate::drivers::Driver;
use crate::error::Result;

use super::schema::{Column, Table};

/// Read table and column metadata from a database catalog.
///
/// A provider holds one connection for its lifetime. Implementations never
/// write to the catalog.
#[async_trait]
pub trait SchemaProvider: Send + Sync {
    /// List base tables in name order, columns populated.
    ///
    /// Issues one query for the table list and one per table for columns.
    /// Any failure aborts the whole listing.
    async fn list_tables(&self) -> Result<Vec<Table>> {
        let mut tables = self.table_names().await?;
        for table in &mut tables {
            table.columns = self.load_columns(&table.name).await?;
        }
        Ok(tables)
    }

    /// List tables with name and comment only.
    async fn table_names(&self) -> Result<Vec<Table>>;

    /// Load columns for a table in ordinal order.
    async fn load_columns(&self, table: &str) -> Result<Vec<Column>>;

    /// Dialect of this provider.
    fn driver(&self) -> Driver;

    /// Close the connection pool.
    async fn close(&self);
}

/// SQL syntax strategy for generated statement text.
pub trait Dialect: Send + Sync {
    /// Get the dialect name (e.g., "mysql", "postgres").
    fn name(&self) -> &str;

    /// Get the parameter placeholder for a given 1-based index.
    fn param_placeholder(&self, index: usize) -> String;

    /// Expression matching values that contain the bound parameter.
    fn contains_pattern(&self, placeholder: &str) -> String {
        format!("'%' || {} || '%'", placeholder)
    }

    /// Insert that fills every column from its default, without a terminator.
    fn default_values_insert(&self, table: &str) -> String {
        format!("INSERT INTO {} DEFAULT VALUES", table)
    }
}
