//! Artifact generation pipeline.
//!
//! Tables are processed one at a time and, within a table, artifacts are
//! rendered and written in a fixed order: record, then DAO interface and
//! mapper, then SQL. A failing table is reported and skipped; the run goes
//! on with the next one.

pub mod dao;
pub mod mapper;
pub mod methods;
pub mod record;
pub mod sql;
pub mod unit;
pub mod writer;

pub use dao::DaoGenerator;
pub use mapper::MapperGenerator;
pub use record::RecordGenerator;
pub use sql::SqlGenerator;
pub use unit::{GenerationUnit, RenderContext};

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::GeneratorConfig;
use crate::core::schema::Table;
use crate::core::traits::SchemaProvider;
use crate::drivers::{Driver, ProviderImpl};
use crate::error::{GenError, Result};
use crate::filter::filter_tables;

/// Import path of the gobatis Example package.
pub(crate) const EXAMPLE_IMPORT: &str = "github.com/chenjy16/gobatis/core/example";

/// Mapper parameter type of Example-family statements.
pub(crate) const EXAMPLE_TYPE: &str = "github.com/chenjy16/gobatis/core/example.Example";

/// The four generated artifact kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Record,
    Dao,
    Mapper,
    Sql,
}

impl ArtifactKind {
    /// Directory under the output root.
    pub fn subdir(self) -> &'static str {
        match self {
            ArtifactKind::Record => "model",
            ArtifactKind::Dao => "dao",
            ArtifactKind::Mapper => "mapper",
            ArtifactKind::Sql => "sql",
        }
    }

    /// File name for a snake_case stem.
    pub fn file_name(self, stem: &str) -> String {
        match self {
            ArtifactKind::Record => format!("{}.go", stem),
            ArtifactKind::Dao => format!("{}_dao.go", stem),
            ArtifactKind::Mapper => format!("{}_mapper.xml", stem),
            ArtifactKind::Sql => format!("{}.sql", stem),
        }
    }

    fn generator(self) -> &'static dyn ArtifactGenerator {
        match self {
            ArtifactKind::Record => &RecordGenerator,
            ArtifactKind::Dao => &DaoGenerator,
            ArtifactKind::Mapper => &MapperGenerator,
            ArtifactKind::Sql => &SqlGenerator,
        }
    }
}

/// Renders one artifact kind from a table.
///
/// Implementations are pure: the same table and context always give the
/// same text.
pub trait ArtifactGenerator: Send + Sync {
    fn kind(&self) -> ArtifactKind;

    fn render(&self, table: &Table, ctx: &RenderContext<'_>) -> Result<String>;
}

/// A table that could not be generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableFailure {
    pub table: String,
    pub error: String,
}

/// Result of a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    /// Files were planned but not written.
    pub dry_run: bool,

    /// When the run started.
    pub started_at: DateTime<Utc>,

    /// When the run completed.
    pub completed_at: DateTime<Utc>,

    /// Total duration in seconds.
    pub duration_seconds: f64,

    /// Tables left after filtering.
    pub tables_total: usize,

    /// Tables whose artifacts were all written.
    pub tables_success: usize,

    /// Tables that failed.
    pub tables_failed: usize,

    pub failed_tables: Vec<TableFailure>,

    /// Written (or, in a dry run, planned) files in generation order.
    pub files: Vec<String>,
}

impl GenerationReport {
    fn start(dry_run: bool, tables_total: usize) -> Self {
        let now = Utc::now();
        Self {
            dry_run,
            started_at: now,
            completed_at: now,
            duration_seconds: 0.0,
            tables_total,
            tables_success: 0,
            tables_failed: 0,
            failed_tables: Vec::new(),
            files: Vec::new(),
        }
    }

    fn record_failure(&mut self, table: &str, error: GenError) {
        let error = error.for_table(table);
        warn!("{}", error);
        self.tables_failed += 1;
        self.failed_tables.push(TableFailure {
            table: table.to_string(),
            error: match &error {
                GenError::Table { source, .. } => source.to_string(),
                other => other.to_string(),
            },
        });
    }

    fn finish(mut self) -> Self {
        self.completed_at = Utc::now();
        self.duration_seconds =
            (self.completed_at - self.started_at).num_milliseconds() as f64 / 1000.0;
        self
    }

    /// Convert to JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// `Incomplete` when any table failed, the report otherwise.
    pub fn into_result(self) -> Result<Self> {
        if self.failed_tables.is_empty() {
            Ok(self)
        } else {
            Err(GenError::Incomplete {
                failed: self.failed_tables.into_iter().map(|f| f.table).collect(),
            })
        }
    }
}

/// Drives a run: connect, list, filter, generate, disconnect.
#[derive(Debug)]
pub struct Generator {
    config: GeneratorConfig,
    driver: Driver,
    dry_run: bool,
}

impl Generator {
    /// Validate `config` and prepare a generator for it.
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        let driver = config.validate()?;
        Ok(Self {
            config,
            driver,
            dry_run: false,
        })
    }

    /// Plan files without writing them.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn driver(&self) -> Driver {
        self.driver
    }

    /// Run against the configured database.
    ///
    /// The connection is closed on every path once it has been opened.
    pub async fn run(&self) -> Result<GenerationReport> {
        let provider = ProviderImpl::connect(self.driver, &self.config.database).await?;
        info!("Connected to {} database", self.driver);

        let result = self.generate_from(&provider).await;
        provider.close().await;
        debug!("Closed {} connection", self.driver);
        result
    }

    /// List, filter and generate using an already connected provider.
    pub async fn generate_from<P>(&self, provider: &P) -> Result<GenerationReport>
    where
        P: SchemaProvider + ?Sized,
    {
        let tables = provider.list_tables().await?;
        let found = tables.len();
        let tables = filter_tables(tables, &self.config.tables);
        info!("Found {} tables, {} selected", found, tables.len());

        if tables.is_empty() {
            return Err(GenError::NoMatchingTables);
        }

        if self.dry_run {
            Ok(self.plan(&tables))
        } else {
            Ok(self.generate_tables(&tables))
        }
    }

    /// Artifact kinds enabled by the options, in generation order.
    pub fn artifact_kinds(&self) -> Vec<ArtifactKind> {
        let options = &self.config.options;
        let mut kinds = vec![ArtifactKind::Record];
        if options.generate_dao {
            kinds.push(ArtifactKind::Dao);
            kinds.push(ArtifactKind::Mapper);
        }
        if options.generate_sql {
            kinds.push(ArtifactKind::Sql);
        }
        kinds
    }

    fn output_dir(&self) -> &Path {
        Path::new(&self.config.output.dir)
    }

    /// Build the table's unit and reserve its file stem.
    ///
    /// `claimed` maps stems to the table that produced them; a later table
    /// deriving the same stem fails instead of overwriting those files.
    fn claim_stem(
        &self,
        table: &Table,
        ctx: &RenderContext<'_>,
        claimed: &mut HashMap<String, String>,
    ) -> Result<String> {
        let stem = GenerationUnit::build(table, ctx)?.file_stem;
        if let Some(first) = claimed.get(&stem) {
            return Err(GenError::render(
                &table.name,
                format!("derived name '{}' already generated for table {}", stem, first),
            ));
        }
        claimed.insert(stem.clone(), table.name.clone());
        Ok(stem)
    }

    /// Files a run would write for `tables`, without writing them.
    ///
    /// Tables the real run would reject are reported as failures here too.
    pub fn plan(&self, tables: &[Table]) -> GenerationReport {
        let ctx = RenderContext::new(&self.config, self.driver);
        let mut report = GenerationReport::start(true, tables.len());
        let mut claimed = HashMap::new();

        for table in tables {
            match self.claim_stem(table, &ctx, &mut claimed) {
                Ok(stem) => {
                    for kind in self.artifact_kinds() {
                        let path = writer::artifact_path(self.output_dir(), kind, &stem);
                        report.files.push(path.display().to_string());
                    }
                    report.tables_success += 1;
                }
                Err(e) => report.record_failure(&table.name, e),
            }
        }
        report.finish()
    }

    /// Render and write every artifact for `tables`.
    ///
    /// Never fails as a whole; per-table failures are collected in the
    /// report.
    pub fn generate_tables(&self, tables: &[Table]) -> GenerationReport {
        let ctx = RenderContext::new(&self.config, self.driver);
        let mut report = GenerationReport::start(false, tables.len());
        let mut claimed = HashMap::new();

        for table in tables {
            let mut written = Vec::new();
            let result = self
                .claim_stem(table, &ctx, &mut claimed)
                .and_then(|stem| self.generate_table(table, &stem, &ctx, &mut written));
            match result {
                Ok(()) => {
                    debug!("{}: {} files", table.name, written.len());
                    report.tables_success += 1;
                }
                Err(e) => report.record_failure(&table.name, e),
            }
            report
                .files
                .extend(written.iter().map(|p| p.display().to_string()));
        }

        let report = report.finish();
        info!(
            "Generated {} of {} tables ({} files) in {:.1}s",
            report.tables_success,
            report.tables_total,
            report.files.len(),
            report.duration_seconds
        );
        report
    }

    fn generate_table(
        &self,
        table: &Table,
        stem: &str,
        ctx: &RenderContext<'_>,
        written: &mut Vec<PathBuf>,
    ) -> Result<()> {
        if table.has_composite_key() {
            let keys = table.primary_key_columns();
            let ignored: Vec<_> = keys.iter().skip(1).map(|c| c.name.as_str()).collect();
            warn!(
                "{}: composite primary key, using {} and ignoring {}",
                table.name,
                keys[0].name,
                ignored.join(", ")
            );
        }

        for kind in self.artifact_kinds() {
            let mut content = kind.generator().render(table, ctx)?;
            if !content.ends_with('\n') {
                content.push('\n');
            }
            let path = writer::artifact_path(self.output_dir(), kind, stem);
            writer::write_atomic(&path, &content)?;
            info!("Wrote {}", path.display());
            written.push(path);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::Column;
    use crate::generator::unit::tests::{audit_log_table, config, users_table};
    use async_trait::async_trait;
    use tempfile::TempDir;

    struct StaticProvider {
        tables: Vec<Table>,
    }

    #[async_trait]
    impl SchemaProvider for StaticProvider {
        async fn table_names(&self) -> Result<Vec<Table>> {
            Ok(self
                .tables
                .iter()
                .map(|t| Table::new(t.name.clone()).with_comment(t.comment.clone()))
                .collect())
        }

        async fn load_columns(&self, table: &str) -> Result<Vec<Column>> {
            Ok(self
                .tables
                .iter()
                .find(|t| t.name == table)
                .map(|t| t.columns.clone())
                .unwrap_or_default())
        }

        fn driver(&self) -> Driver {
            Driver::Mysql
        }

        async fn close(&self) {}
    }

    fn generator(dir: &TempDir) -> Generator {
        let mut config = config();
        config.output.dir = dir.path().display().to_string();
        Generator::new(config).unwrap()
    }

    #[test]
    fn test_artifact_kind_names() {
        assert_eq!(ArtifactKind::Record.file_name("users"), "users.go");
        assert_eq!(ArtifactKind::Dao.file_name("users"), "users_dao.go");
        assert_eq!(ArtifactKind::Mapper.file_name("users"), "users_mapper.xml");
        assert_eq!(ArtifactKind::Sql.subdir(), "sql");
        for kind in [
            ArtifactKind::Record,
            ArtifactKind::Dao,
            ArtifactKind::Mapper,
            ArtifactKind::Sql,
        ] {
            assert_eq!(kind.generator().kind(), kind);
        }
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let err = Generator::new(GeneratorConfig::default()).unwrap_err();
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_artifact_kinds_follow_options() {
        let dir = TempDir::new().unwrap();
        let mut generator = generator(&dir);
        assert_eq!(
            generator.artifact_kinds(),
            vec![
                ArtifactKind::Record,
                ArtifactKind::Dao,
                ArtifactKind::Mapper,
                ArtifactKind::Sql
            ]
        );
        generator.config.options.generate_dao = false;
        generator.config.options.generate_sql = false;
        assert_eq!(generator.artifact_kinds(), vec![ArtifactKind::Record]);
    }

    #[test]
    fn test_generate_writes_all_artifacts() {
        let dir = TempDir::new().unwrap();
        let report = generator(&dir).generate_tables(&[users_table(), audit_log_table()]);

        assert_eq!(report.tables_total, 2);
        assert_eq!(report.tables_success, 2);
        assert_eq!(report.files.len(), 8);
        for rel in [
            "model/users.go",
            "dao/users_dao.go",
            "mapper/users_mapper.xml",
            "sql/users.sql",
            "model/audit_log.go",
            "sql/audit_log.sql",
        ] {
            let content = std::fs::read_to_string(dir.path().join(rel)).unwrap();
            assert!(content.ends_with('\n'), "{} lacks a final newline", rel);
        }
        assert!(report.into_result().is_ok());
    }

    #[test]
    fn test_failed_table_does_not_stop_the_run() {
        let dir = TempDir::new().unwrap();
        let bad = Table::new("2fa_codes")
            .with_column(Column::new(Driver::Mysql, "code", "varchar(6)", false));
        let report = generator(&dir).generate_tables(&[bad, users_table()]);

        assert_eq!(report.tables_success, 1);
        assert_eq!(report.tables_failed, 1);
        assert_eq!(report.failed_tables[0].table, "2fa_codes");
        assert!(report.failed_tables[0].error.contains("not a valid Go identifier"));
        assert!(dir.path().join("model/users.go").exists());

        let err = report.into_result().unwrap_err();
        assert!(matches!(err, GenError::Incomplete { ref failed } if failed == &["2fa_codes"]));
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn test_plan_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let report = generator(&dir)
            .with_dry_run(true)
            .plan(&[users_table()]);
        assert!(report.dry_run);
        assert_eq!(report.files.len(), 4);
        assert!(report.files[0].ends_with("users.go"));
        assert!(!dir.path().join("model").exists());
    }

    #[test]
    fn test_plan_reports_tables_the_run_rejects() {
        let dir = TempDir::new().unwrap();
        let bad = Table::new("2fa_codes")
            .with_column(Column::new(Driver::Mysql, "code", "varchar(6)", false));
        let generator = generator(&dir).with_dry_run(true);

        let planned = generator.plan(&[bad.clone(), users_table()]);
        let generated = generator.generate_tables(&[bad, users_table()]);

        assert_eq!(planned.tables_success, 1);
        assert_eq!(planned.tables_failed, 1);
        assert_eq!(planned.failed_tables[0].table, "2fa_codes");
        assert_eq!(planned.files.len(), 4);
        assert_eq!(planned.tables_failed, generated.tables_failed);
        assert_eq!(planned.files, generated.files);
    }

    fn accounts(name: &str, column: &str) -> Table {
        Table::new(name)
            .with_column(Column::new(Driver::Mysql, "id", "bigint", false).primary_key())
            .with_column(Column::new(Driver::Mysql, column, "varchar(32)", true))
    }

    #[test]
    fn test_colliding_names_fail_the_later_table() {
        let dir = TempDir::new().unwrap();
        let report = generator(&dir).generate_tables(&[
            accounts("user_accounts", "alpha"),
            accounts("USER_ACCOUNTS", "beta"),
        ]);

        assert_eq!(report.tables_success, 1);
        assert_eq!(report.tables_failed, 1);
        assert_eq!(report.failed_tables[0].table, "USER_ACCOUNTS");
        assert!(report.failed_tables[0]
            .error
            .contains("already generated for table user_accounts"));
        assert_eq!(report.files.len(), 4);

        let record = std::fs::read_to_string(dir.path().join("model/user_accounts.go")).unwrap();
        assert!(record.contains("Alpha"));
        assert!(!record.contains("Beta"));
    }

    #[test]
    fn test_plan_flags_colliding_names() {
        let dir = TempDir::new().unwrap();
        let report = generator(&dir).plan(&[
            accounts("user_accounts", "alpha"),
            accounts("USER_ACCOUNTS", "beta"),
        ]);
        assert_eq!(report.tables_success, 1);
        assert_eq!(report.tables_failed, 1);
        assert_eq!(report.files.len(), 4);
    }

    #[test]
    fn test_report_json() {
        let dir = TempDir::new().unwrap();
        let report = generator(&dir).plan(&[users_table()]);
        let json = report.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["tables_total"], 1);
        assert_eq!(value["files"].as_array().unwrap().len(), 4);
        assert!(value["started_at"].is_string());
    }

    #[tokio::test]
    async fn test_generate_from_provider_applies_filter() {
        let dir = TempDir::new().unwrap();
        let mut generator = generator(&dir);
        generator.config.tables.exclude = vec!["audit_log".into()];
        let provider = StaticProvider {
            tables: vec![users_table(), audit_log_table()],
        };

        let report = generator.generate_from(&provider).await.unwrap();
        assert_eq!(report.tables_total, 1);
        assert!(dir.path().join("model/users.go").exists());
        assert!(!dir.path().join("model/audit_log.go").exists());
    }

    #[tokio::test]
    async fn test_no_matching_tables() {
        let dir = TempDir::new().unwrap();
        let mut generator = generator(&dir);
        generator.config.tables.include = vec!["missing".into()];
        let provider = StaticProvider {
            tables: vec![users_table()],
        };

        let err = generator.generate_from(&provider).await.unwrap_err();
        assert!(matches!(err, GenError::NoMatchingTables));
        assert_eq!(err.exit_code(), 5);
    }
}
