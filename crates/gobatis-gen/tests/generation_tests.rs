//! End-to-end generation tests.

use gobatis_gen::generator::{
    DaoGenerator, MapperGenerator, RecordGenerator, RenderContext, SqlGenerator,
};
use gobatis_gen::generator::ArtifactGenerator;
use gobatis_gen::{filter_tables, Column, Driver, GenError, Generator, GeneratorConfig, Table};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::Executor;
use std::path::Path;
use tempfile::TempDir;

fn users_table(driver: Driver) -> Table {
    Table::new("users")
        .with_column(
            Column::new(driver, "id", "integer", false)
                .primary_key()
                .auto_increment(),
        )
        .with_column(Column::new(driver, "username", "varchar(64)", false))
        .with_column(Column::new(driver, "email", "varchar(255)", true))
}

fn config(driver: &str, output: &Path) -> GeneratorConfig {
    let mut config = GeneratorConfig::default();
    config.database.driver = driver.into();
    config.database.dsn = "unused://".into();
    config.output.dir = output.display().to_string();
    config
}

fn render_all(table: &Table, config: &GeneratorConfig, driver: Driver) -> [String; 4] {
    let ctx = RenderContext::new(config, driver);
    [
        RecordGenerator.render(table, &ctx).unwrap(),
        DaoGenerator.render(table, &ctx).unwrap(),
        SqlGenerator.render(table, &ctx).unwrap(),
        MapperGenerator.render(table, &ctx).unwrap(),
    ]
}

#[test]
fn test_users_table_scenario() {
    let dir = TempDir::new().unwrap();
    let config = config("mysql", dir.path());
    let [record, dao, sql, _mapper] = render_all(&users_table(Driver::Mysql), &config, Driver::Mysql);

    assert!(record.contains("type Users struct {"));
    assert!(record.contains("\tId       int"));
    assert!(record.contains("\tUsername string"));
    assert!(record.contains("\tEmail    *string"));

    for method in ["GetById(", "GetAll(", "UpdateById(", "DeleteById(", "Count("] {
        assert!(dao.contains(method), "interface lacks {}", method);
    }

    let insert = sql
        .lines()
        .find(|l| l.starts_with("INSERT INTO users ("))
        .unwrap();
    assert_eq!(insert, "INSERT INTO users (username, email) VALUES (?, ?);");
}

#[test]
fn test_exclude_pattern_scenario() {
    let mut config = GeneratorConfig::default();
    config.tables.exclude = vec!["temp_*".into()];
    let tables = vec![Table::new("temp_sessions"), Table::new("sessions")];

    let kept: Vec<_> = filter_tables(tables, &config.tables)
        .into_iter()
        .map(|t| t.name)
        .collect();
    assert_eq!(kept, vec!["sessions"]);
}

#[test]
fn test_keyless_table_scenario() {
    let dir = TempDir::new().unwrap();
    let config = config("postgres", dir.path());
    let table = Table::new("page_views")
        .with_column(Column::new(Driver::Postgres, "path", "text", false))
        .with_column(Column::new(Driver::Postgres, "viewed_at", "timestamp with time zone", true));
    let [record, dao, sql, mapper] = render_all(&table, &config, Driver::Postgres);

    assert!(record.contains("type PageViews struct {"));
    assert!(sql.contains("SELECT path, viewed_at FROM page_views;"));
    assert!(sql.contains("SELECT COUNT(*) FROM page_views;"));
    assert!(dao.contains("GetByCondition(condition map[string]interface{})"));
    assert!(dao.contains("CountByCondition("));
    for artifact in [&dao, &sql, &mapper] {
        for by_key in ["GetById", "UpdateById", "DeleteById", "ExistsById"] {
            assert!(!artifact.contains(by_key), "{} present", by_key);
        }
    }
}

#[test]
fn test_unsupported_driver_scenario() {
    let dir = TempDir::new().unwrap();
    let config = config("oracle", dir.path());

    let err = Generator::new(config).unwrap_err();
    assert!(matches!(err, GenError::Config(_)));
    assert!(err.to_string().contains("unsupported database driver"));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn test_key_name_and_type_agree_across_artifacts() {
    let dir = TempDir::new().unwrap();
    let config = config("postgres", dir.path());
    let table = Table::new("t_order_items")
        .with_column(Column::new(Driver::Postgres, "order_no", "varchar(32)", false).primary_key())
        .with_column(Column::new(Driver::Postgres, "quantity", "integer", false))
        .with_column(Column::new(Driver::Postgres, "unit_price", "numeric(10,2)", true));
    let [record, dao, sql, mapper] = render_all(&table, &config, Driver::Postgres);

    // key OrderNo string
    assert!(record.contains("\tOrderNo   string "));
    assert!(dao.contains("GetById(orderNo string) (*model.TOrderItems, error)"));
    assert!(sql.contains("--   order_no -> OrderNo string\n"));
    assert!(mapper.contains("<id property=\"OrderNo\" column=\"order_no\" goType=\"string\"/>"));

    // non-key fields
    assert!(record.contains("\tUnitPrice *float64 "));
    assert!(sql.contains("--   unit_price -> UnitPrice *float64\n"));
    assert!(mapper.contains(
        "<result property=\"UnitPrice\" column=\"unit_price\" goType=\"*float64\"/>"
    ));
    assert!(mapper.contains("#{UnitPrice}"));
}

#[test]
fn test_prefix_is_stripped_consistently() {
    let dir = TempDir::new().unwrap();
    let mut config = config("mysql", dir.path());
    config.tables.prefix = "t_".into();
    let table = Table::new("t_order_items")
        .with_column(Column::new(Driver::Mysql, "id", "bigint", false).primary_key());
    let [record, dao, sql, mapper] = render_all(&table, &config, Driver::Mysql);

    assert!(record.contains("type OrderItems struct {"));
    assert!(record.contains("return \"t_order_items\""));
    assert!(dao.contains("type OrderItemsDAO interface {"));
    assert!(sql.contains("-- Record: OrderItems\n"));
    assert!(sql.contains("FROM t_order_items;"));
    assert!(mapper.contains("<mapper namespace=\"OrderItemsDAO\">"));
}

async fn seed_sqlite(dir: &TempDir) -> String {
    let path = dir.path().join("shop.db");
    let options = SqliteConnectOptions::new()
        .filename(&path)
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .unwrap();
    for ddl in [
        "CREATE TABLE users (id INTEGER PRIMARY KEY AUTOINCREMENT, username VARCHAR(64) NOT NULL, email VARCHAR(255))",
        "CREATE TABLE temp_sessions (token TEXT NOT NULL)",
        "CREATE TABLE sessions (token TEXT NOT NULL, user_id INTEGER, expires_at DATETIME)",
    ] {
        pool.execute(ddl).await.unwrap();
    }
    pool.close().await;
    format!("sqlite://{}", path.display())
}

#[tokio::test]
async fn test_sqlite_end_to_end() {
    let db_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    let mut config = config("sqlite", out_dir.path());
    config.database.dsn = seed_sqlite(&db_dir).await;
    config.tables.exclude = vec!["temp_*".into()];

    let report = Generator::new(config)
        .unwrap()
        .run()
        .await
        .unwrap()
        .into_result()
        .unwrap();

    assert_eq!(report.tables_total, 2);
    assert_eq!(report.tables_success, 2);
    assert_eq!(report.files.len(), 8);
    assert!(!out_dir.path().join("model/temp_sessions.go").exists());

    let record = std::fs::read_to_string(out_dir.path().join("model/users.go")).unwrap();
    assert!(record.contains("\tEmail    *string "));

    let sql = std::fs::read_to_string(out_dir.path().join("sql/users.sql")).unwrap();
    assert!(sql.contains("INSERT INTO users (username, email) VALUES (?, ?);"));

    let mapper =
        std::fs::read_to_string(out_dir.path().join("mapper/sessions_mapper.xml")).unwrap();
    assert!(mapper.contains("<result property=\"ExpiresAt\" column=\"expires_at\" goType=\"*time.Time\"/>"));
    assert!(!mapper.contains("GetById"));
}

#[tokio::test]
async fn test_sqlite_dry_run_writes_nothing() {
    let db_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    let mut config = config("sqlite", out_dir.path());
    config.database.dsn = seed_sqlite(&db_dir).await;
    config.options.generate_sql = false;

    let report = Generator::new(config)
        .unwrap()
        .with_dry_run(true)
        .run()
        .await
        .unwrap();

    assert!(report.dry_run);
    assert_eq!(report.tables_total, 3);
    assert_eq!(report.files.len(), 9);
    assert!(std::fs::read_dir(out_dir.path()).unwrap().next().is_none());
}

#[tokio::test]
async fn test_missing_sqlite_file_is_a_connection_error() {
    let out_dir = TempDir::new().unwrap();
    let mut config = config("sqlite", out_dir.path());
    config.database.dsn = format!(
        "sqlite://{}",
        out_dir.path().join("missing.db").display()
    );

    let err = Generator::new(config).unwrap().run().await.unwrap_err();
    assert!(matches!(err, GenError::Connection { .. }));
    assert_eq!(err.exit_code(), 2);
}
