//! Database driver implementations.
//!
//! Each driver module provides:
//! - a [`SchemaProvider`] reading its catalog views or pragmas
//! - a [`Dialect`] describing its placeholder and pattern syntax
//!
//! The driver is chosen once, from the configured driver name, through
//! [`Driver`]. After that point everything goes through the enum-dispatched
//! [`ProviderImpl`] and [`DialectImpl`].
//!
//! # Adding New Databases
//!
//! 1. Create a new module under `drivers/` with a provider and a dialect
//! 2. Add a variant to [`Driver`], [`ProviderImpl`] and [`DialectImpl`]
//! 3. Add the native type table under `typemap/`

pub mod mysql;
pub mod postgres;
pub mod sqlite;

pub use mysql::{MysqlDialect, MysqlProvider};
pub use postgres::{PostgresDialect, PostgresProvider};
pub use sqlite::{SqliteDialect, SqliteProvider};

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::DatabaseConfig;
use crate::core::schema::{Column, Table};
use crate::core::traits::{Dialect, SchemaProvider};
use crate::error::{GenError, Result};

/// Connection pool acquire timeout shared by all drivers.
pub(crate) const POOL_CONNECTION_TIMEOUT: Duration = Duration::from_secs(30);

/// Supported database drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Driver {
    Mysql,
    Postgres,
    Sqlite,
}

impl Driver {
    pub fn name(self) -> &'static str {
        match self {
            Driver::Mysql => "mysql",
            Driver::Postgres => "postgres",
            Driver::Sqlite => "sqlite",
        }
    }

    /// SQL dialect for generated statement text.
    pub fn dialect(self) -> DialectImpl {
        match self {
            Driver::Mysql => DialectImpl::Mysql(MysqlDialect::new()),
            Driver::Postgres => DialectImpl::Postgres(PostgresDialect::new()),
            Driver::Sqlite => DialectImpl::Sqlite(SqliteDialect::new()),
        }
    }
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Driver {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "mysql" | "mariadb" => Ok(Driver::Mysql),
            "postgres" | "postgresql" | "pg" => Ok(Driver::Postgres),
            "sqlite" | "sqlite3" => Ok(Driver::Sqlite),
            other => Err(GenError::Config(format!(
                "unsupported database driver: '{}'. Supported drivers: mysql, postgres, sqlite",
                other
            ))),
        }
    }
}

/// Enum-based static dispatch for schema providers.
pub enum ProviderImpl {
    Mysql(MysqlProvider),
    Postgres(PostgresProvider),
    Sqlite(SqliteProvider),
}

impl ProviderImpl {
    /// Connect the provider for `driver` using the configured DSN.
    pub async fn connect(driver: Driver, config: &DatabaseConfig) -> Result<Self> {
        match driver {
            Driver::Mysql => Ok(ProviderImpl::Mysql(
                MysqlProvider::connect(&config.dsn).await?,
            )),
            Driver::Postgres => Ok(ProviderImpl::Postgres(
                PostgresProvider::connect(&config.dsn, config.schema_or_default()).await?,
            )),
            Driver::Sqlite => Ok(ProviderImpl::Sqlite(
                SqliteProvider::connect(&config.dsn).await?,
            )),
        }
    }
}

#[async_trait]
impl SchemaProvider for ProviderImpl {
    async fn list_tables(&self) -> Result<Vec<Table>> {
        match self {
            ProviderImpl::Mysql(p) => p.list_tables().await,
            ProviderImpl::Postgres(p) => p.list_tables().await,
            ProviderImpl::Sqlite(p) => p.list_tables().await,
        }
    }

    async fn table_names(&self) -> Result<Vec<Table>> {
        match self {
            ProviderImpl::Mysql(p) => p.table_names().await,
            ProviderImpl::Postgres(p) => p.table_names().await,
            ProviderImpl::Sqlite(p) => p.table_names().await,
        }
    }

    async fn load_columns(&self, table: &str) -> Result<Vec<Column>> {
        match self {
            ProviderImpl::Mysql(p) => p.load_columns(table).await,
            ProviderImpl::Postgres(p) => p.load_columns(table).await,
            ProviderImpl::Sqlite(p) => p.load_columns(table).await,
        }
    }

    fn driver(&self) -> Driver {
        match self {
            ProviderImpl::Mysql(p) => p.driver(),
            ProviderImpl::Postgres(p) => p.driver(),
            ProviderImpl::Sqlite(p) => p.driver(),
        }
    }

    async fn close(&self) {
        match self {
            ProviderImpl::Mysql(p) => p.close().await,
            ProviderImpl::Postgres(p) => p.close().await,
            ProviderImpl::Sqlite(p) => p.close().await,
        }
    }
}

/// Enum-based static dispatch for dialects.
#[derive(Debug, Clone)]
pub enum DialectImpl {
    Mysql(MysqlDialect),
    Postgres(PostgresDialect),
    Sqlite(SqliteDialect),
}

impl Dialect for DialectImpl {
    fn name(&self) -> &str {
        match self {
            DialectImpl::Mysql(d) => d.name(),
            DialectImpl::Postgres(d) => d.name(),
            DialectImpl::Sqlite(d) => d.name(),
        }
    }

    fn param_placeholder(&self, index: usize) -> String {
        match self {
            DialectImpl::Mysql(d) => d.param_placeholder(index),
            DialectImpl::Postgres(d) => d.param_placeholder(index),
            DialectImpl::Sqlite(d) => d.param_placeholder(index),
        }
    }

    fn contains_pattern(&self, placeholder: &str) -> String {
        match self {
            DialectImpl::Mysql(d) => d.contains_pattern(placeholder),
            DialectImpl::Postgres(d) => d.contains_pattern(placeholder),
            DialectImpl::Sqlite(d) => d.contains_pattern(placeholder),
        }
    }

    fn default_values_insert(&self, table: &str) -> String {
        match self {
            DialectImpl::Mysql(d) => d.default_values_insert(table),
            DialectImpl::Postgres(d) => d.default_values_insert(table),
            DialectImpl::Sqlite(d) => d.default_values_insert(table),
        }
    }
}
