//! PostgreSQL schema provider.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions, PgRow};
use sqlx::Row;
use tracing::{debug, info};

use crate::config::redact_dsn;
use crate::core::schema::{Column, Table};
use crate::core::traits::SchemaProvider;
use crate::drivers::{Driver, POOL_CONNECTION_TIMEOUT};
use crate::error::{GenError, Result};

/// PostgreSQL schema provider for a single schema.
pub struct PostgresProvider {
    pool: PgPool,
    schema: String,
}

impl PostgresProvider {
    /// Connect with a single-connection pool, reading tables from `schema`.
    pub async fn connect(dsn: &str, schema: &str) -> Result<Self> {
        let options = PgConnectOptions::from_str(dsn).map_err(|e| GenError::Connection {
            driver: Driver::Postgres.to_string(),
            source: e,
        })?;

        let pool = PgPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(POOL_CONNECTION_TIMEOUT)
            .connect_with(options)
            .await
            .map_err(|e| GenError::Connection {
                driver: Driver::Postgres.to_string(),
                source: e,
            })?;

        info!(
            "Connected to PostgreSQL: {} (schema {})",
            redact_dsn(dsn),
            schema
        );

        Ok(Self {
            pool,
            schema: schema.to_string(),
        })
    }

    fn column_from_row(row: &PgRow) -> std::result::Result<Column, sqlx::Error> {
        let name: String = row.try_get("column_name")?;
        let native_type: String = row.try_get("data_type")?;
        let nullable: bool = row.try_get("is_nullable")?;

        let mut column = Column::new(Driver::Postgres, name, native_type, nullable)
            .with_default(row.try_get("column_default")?)
            .with_comment(row.try_get::<String, _>("column_comment")?);
        column.is_primary_key = row.try_get("is_primary_key")?;
        column.is_auto_increment = row.try_get("is_auto_increment")?;
        Ok(column)
    }
}

#[async_trait]
impl SchemaProvider for PostgresProvider {
    async fn table_names(&self) -> Result<Vec<Table>> {
        let query = r#"
            SELECT
                c.relname::text AS table_name,
                COALESCE(obj_description(c.oid, 'pg_class'), '') AS table_comment
            FROM pg_class c
            JOIN pg_namespace n ON n.oid = c.relnamespace
            WHERE n.nspname = $1
              AND c.relkind IN ('r', 'p')
              AND NOT c.relispartition
            ORDER BY c.relname
        "#;

        let rows = sqlx::query(query)
            .bind(&self.schema)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| GenError::query(e, "listing PostgreSQL tables"))?;

        let mut tables = Vec::with_capacity(rows.len());
        for row in rows {
            let name: String = row
                .try_get("table_name")
                .map_err(|e| GenError::query(e, "decoding PostgreSQL table list"))?;
            let comment: String = row
                .try_get("table_comment")
                .map_err(|e| GenError::query(e, "decoding PostgreSQL table list"))?;
            tables.push(Table::new(name).with_comment(comment));
        }

        info!(
            "Found {} tables in PostgreSQL schema {}",
            tables.len(),
            self.schema
        );
        Ok(tables)
    }

    async fn load_columns(&self, table: &str) -> Result<Vec<Column>> {
        // information_schema uses domain types; cast to text/bool for decoding
        let query = r#"
            SELECT
                c.column_name::text AS column_name,
                c.data_type::text AS data_type,
                (c.is_nullable = 'YES') AS is_nullable,
                EXISTS (
                    SELECT 1
                    FROM information_schema.table_constraints tc
                    JOIN information_schema.key_column_usage kcu
                      ON tc.constraint_name = kcu.constraint_name
                     AND tc.table_schema = kcu.table_schema
                     AND tc.table_name = kcu.table_name
                    WHERE tc.constraint_type = 'PRIMARY KEY'
                      AND tc.table_schema = c.table_schema
                      AND tc.table_name = c.table_name
                      AND kcu.column_name = c.column_name
                ) AS is_primary_key,
                (COALESCE(c.column_default::text, '') LIKE 'nextval(%'
                    OR c.is_identity = 'YES') AS is_auto_increment,
                c.column_default::text AS column_default,
                COALESCE(
                    col_description(
                        format('%I.%I', c.table_schema, c.table_name)::regclass,
                        c.ordinal_position::int
                    ),
                    ''
                ) AS column_comment
            FROM information_schema.columns c
            WHERE c.table_schema = $1 AND c.table_name = $2
            ORDER BY c.ordinal_position
        "#;

        let context = format!("loading columns of PostgreSQL table {}.{}", self.schema, table);
        let rows: Vec<PgRow> = sqlx::query(query)
            .bind(&self.schema)
            .bind(table)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| GenError::query(e, context.as_str()))?;

        let columns = rows
            .iter()
            .map(Self::column_from_row)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| GenError::query(e, context.as_str()))?;

        debug!("Loaded {} columns for {}.{}", columns.len(), self.schema, table);
        Ok(columns)
    }

    fn driver(&self) -> Driver {
        Driver::Postgres
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
