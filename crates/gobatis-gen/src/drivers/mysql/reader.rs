//! MySQL/MariaDB schema provider.
//!
//! Reads `INFORMATION_SCHEMA.TABLES` and `INFORMATION_SCHEMA.COLUMNS` for the
//! database named in the connection string.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions, MySqlRow};
use sqlx::Row;
use tracing::{debug, info};

use crate::config::redact_dsn;
use crate::core::schema::{Column, Table};
use crate::core::traits::SchemaProvider;
use crate::drivers::{Driver, POOL_CONNECTION_TIMEOUT};
use crate::error::{GenError, Result};

/// MySQL/MariaDB schema provider.
pub struct MysqlProvider {
    pool: MySqlPool,
}

impl MysqlProvider {
    /// Connect with a single-connection pool.
    pub async fn connect(dsn: &str) -> Result<Self> {
        let options = MySqlConnectOptions::from_str(dsn).map_err(|e| GenError::Connection {
            driver: Driver::Mysql.to_string(),
            source: e,
        })?;

        let pool = MySqlPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(POOL_CONNECTION_TIMEOUT)
            .connect_with(options)
            .await
            .map_err(|e| GenError::Connection {
                driver: Driver::Mysql.to_string(),
                source: e,
            })?;

        info!("Connected to MySQL: {}", redact_dsn(dsn));

        Ok(Self { pool })
    }

    fn column_from_row(row: &MySqlRow) -> std::result::Result<Column, sqlx::Error> {
        let name: String = row.try_get("COLUMN_NAME")?;
        let native_type: String = row.try_get("COLUMN_TYPE")?;
        let nullable = row.try_get::<i64, _>("is_nullable")? == 1;

        let mut column = Column::new(Driver::Mysql, name, native_type, nullable)
            .with_default(row.try_get("COLUMN_DEFAULT")?)
            .with_comment(row.try_get::<String, _>("COLUMN_COMMENT")?);
        column.is_primary_key = row.try_get::<i64, _>("is_primary_key")? == 1;
        column.is_auto_increment = row.try_get::<i64, _>("is_auto_increment")? == 1;
        Ok(column)
    }
}

#[async_trait]
impl SchemaProvider for MysqlProvider {
    async fn table_names(&self) -> Result<Vec<Table>> {
        // CAST to CHAR to handle collation and binary string differences
        let query = r#"
            SELECT
                CAST(TABLE_NAME AS CHAR(255)) AS TABLE_NAME,
                CAST(COALESCE(TABLE_COMMENT, '') AS CHAR(2048)) AS TABLE_COMMENT
            FROM INFORMATION_SCHEMA.TABLES
            WHERE TABLE_SCHEMA = DATABASE()
              AND TABLE_TYPE = 'BASE TABLE'
            ORDER BY TABLE_NAME
        "#;

        let rows = sqlx::query(query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| GenError::query(e, "listing MySQL tables"))?;

        let mut tables = Vec::with_capacity(rows.len());
        for row in rows {
            let name: String = row
                .try_get("TABLE_NAME")
                .map_err(|e| GenError::query(e, "decoding MySQL table list"))?;
            let comment: String = row
                .try_get("TABLE_COMMENT")
                .map_err(|e| GenError::query(e, "decoding MySQL table list"))?;
            tables.push(Table::new(name).with_comment(comment));
        }

        info!("Found {} tables in MySQL database", tables.len());
        Ok(tables)
    }

    async fn load_columns(&self, table: &str) -> Result<Vec<Column>> {
        // COLUMN_TYPE keeps tinyint(1) distinguishable from tinyint(4)
        let query = r#"
            SELECT
                CAST(COLUMN_NAME AS CHAR(255)) AS COLUMN_NAME,
                CAST(COLUMN_TYPE AS CHAR(1024)) AS COLUMN_TYPE,
                CAST(IF(IS_NULLABLE = 'YES', 1, 0) AS SIGNED) AS is_nullable,
                CAST(IF(COLUMN_KEY = 'PRI', 1, 0) AS SIGNED) AS is_primary_key,
                CAST(IF(EXTRA LIKE '%auto_increment%', 1, 0) AS SIGNED) AS is_auto_increment,
                CAST(COLUMN_DEFAULT AS CHAR(1024)) AS COLUMN_DEFAULT,
                CAST(COALESCE(COLUMN_COMMENT, '') AS CHAR(1024)) AS COLUMN_COMMENT
            FROM INFORMATION_SCHEMA.COLUMNS
            WHERE TABLE_SCHEMA = DATABASE() AND TABLE_NAME = ?
            ORDER BY ORDINAL_POSITION
        "#;

        let context = format!("loading columns of MySQL table {}", table);
        let rows: Vec<MySqlRow> = sqlx::query(query)
            .bind(table)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| GenError::query(e, context.as_str()))?;

        let columns = rows
            .iter()
            .map(Self::column_from_row)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| GenError::query(e, context.as_str()))?;

        debug!("Loaded {} columns for {}", columns.len(), table);
        Ok(columns)
    }

    fn driver(&self) -> Driver {
        Driver::Mysql
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
