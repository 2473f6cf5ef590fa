//! SQLite schema provider.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use tracing::{debug, info};

use super::ddl;
use crate::core::schema::{Column, Table};
use crate::core::traits::SchemaProvider;
use crate::drivers::{Driver, POOL_CONNECTION_TIMEOUT};
use crate::error::{GenError, Result};

/// SQLite schema provider. The database file is opened read-only.
pub struct SqliteProvider {
    pool: SqlitePool,
}

impl SqliteProvider {
    /// Open the database file read-only with a single-connection pool.
    pub async fn connect(dsn: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(dsn)
            .map_err(|e| GenError::Connection {
                driver: Driver::Sqlite.to_string(),
                source: e,
            })?
            .read_only(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .acquire_timeout(POOL_CONNECTION_TIMEOUT)
            .connect_with(options)
            .await
            .map_err(|e| GenError::Connection {
                driver: Driver::Sqlite.to_string(),
                source: e,
            })?;

        info!("Opened SQLite database: {}", dsn);

        Ok(Self { pool })
    }

    async fn create_sql(&self, table: &str) -> std::result::Result<String, sqlx::Error> {
        let sql: Option<String> = sqlx::query_scalar(
            "SELECT sql FROM sqlite_master WHERE type = 'table' AND name = ?1",
        )
        .bind(table)
        .fetch_optional(&self.pool)
        .await?
        .flatten();
        Ok(sql.unwrap_or_default())
    }

    fn column_from_row(row: &SqliteRow, create_sql: &str) -> std::result::Result<Column, sqlx::Error> {
        let name: String = row.try_get("name")?;
        let native_type: String = row.try_get("type")?;
        let not_null: i64 = row.try_get("notnull")?;
        let pk_position: i64 = row.try_get("pk")?;
        let is_primary_key = pk_position > 0;

        // pragma reports notnull = 0 for key columns declared without NOT NULL
        let nullable = not_null == 0 && !is_primary_key;
        let is_auto_increment = ddl::is_autoincrement(create_sql, &name);

        let mut column = Column::new(Driver::Sqlite, name, native_type, nullable)
            .with_default(row.try_get("dflt_value")?);
        column.is_primary_key = is_primary_key;
        column.is_auto_increment = is_auto_increment;
        Ok(column)
    }
}

#[async_trait]
impl SchemaProvider for SqliteProvider {
    async fn table_names(&self) -> Result<Vec<Table>> {
        let names: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT name FROM sqlite_master
            WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| GenError::query(e, "listing SQLite tables"))?;

        info!("Found {} tables in SQLite database", names.len());
        Ok(names.into_iter().map(Table::new).collect())
    }

    async fn load_columns(&self, table: &str) -> Result<Vec<Column>> {
        let context = format!("loading columns of SQLite table {}", table);

        let create_sql = self
            .create_sql(table)
            .await
            .map_err(|e| GenError::query(e, context.as_str()))?;

        let rows: Vec<SqliteRow> = sqlx::query(
            r#"
            SELECT name, type, "notnull", dflt_value, pk
            FROM pragma_table_info(?1)
            ORDER BY cid
            "#,
        )
        .bind(table)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| GenError::query(e, context.as_str()))?;

        let columns = rows
            .iter()
            .map(|row| Self::column_from_row(row, &create_sql))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| GenError::query(e, context.as_str()))?;

        debug!("Loaded {} columns for {}", columns.len(), table);
        Ok(columns)
    }

    fn driver(&self) -> Driver {
        Driver::Sqlite
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
