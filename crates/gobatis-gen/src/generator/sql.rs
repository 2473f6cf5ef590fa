//! Plain SQL statement text generator.
//!
//! The statements mirror the DAO operations and use the placeholder syntax
//! of the configured dialect. Condition, pattern and range queries are
//! skeletons for documentation; no DAO method binds them directly.

use askama::Template;

use super::methods::{method_names, method_surface, DaoMethod, Operation};
use super::unit::{join, FieldView, GenerationUnit, RenderContext};
use super::{ArtifactGenerator, ArtifactKind};
use crate::core::schema::Table;
use crate::core::traits::Dialect;
use crate::drivers::DialectImpl;
use crate::error::{GenError, Result};
use crate::typemap::TargetKind;

/// Rows in the batch insert sample.
const BATCH_ROWS: usize = 3;

/// One labelled statement.
struct Statement {
    label: String,
    sql: String,
}

#[derive(Template)]
#[template(path = "statements.sql", escape = "none")]
struct SqlTemplate<'a> {
    unit: &'a GenerationUnit,
    statements: Vec<Statement>,
}

/// Numbers placeholders within a single statement.
struct Params<'d> {
    dialect: &'d DialectImpl,
    next: usize,
}

impl<'d> Params<'d> {
    fn new(dialect: &'d DialectImpl) -> Self {
        Self { dialect, next: 1 }
    }

    fn next(&mut self) -> String {
        let placeholder = self.dialect.param_placeholder(self.next);
        self.next += 1;
        placeholder
    }

    fn list(&mut self, n: usize) -> String {
        (0..n).map(|_| self.next()).collect::<Vec<_>>().join(", ")
    }
}

/// Renders one `.sql` file per table.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlGenerator;

struct StatementBuilder<'a> {
    unit: &'a GenerationUnit,
    dialect: DialectImpl,
    methods: Vec<DaoMethod>,
    columns: String,
    statements: Vec<Statement>,
}

impl<'a> StatementBuilder<'a> {
    fn new(unit: &'a GenerationUnit) -> Self {
        Self {
            unit,
            dialect: unit.driver.dialect(),
            methods: method_surface(unit.has_key(), unit.flags.generate_example),
            columns: unit.column_list(),
            statements: Vec::new(),
        }
    }

    fn push(&mut self, label: String, sql: String) {
        self.statements.push(Statement { label, sql });
    }

    fn push_for(&mut self, operation: Operation, sql: String) {
        let label = method_names(&self.methods, operation);
        self.push(label, sql);
    }

    fn build(mut self) -> Vec<Statement> {
        let unit = self.unit;
        let table = unit.table_name.as_str();

        self.push_for(
            Operation::SelectAll,
            format!("SELECT {} FROM {};", self.columns, table),
        );

        if let Some(key) = &unit.primary_key {
            let mut params = Params::new(&self.dialect);
            let sql = format!(
                "SELECT {} FROM {} WHERE {} = {};",
                self.columns,
                table,
                key.field.column,
                params.next()
            );
            self.push_for(Operation::SelectByKey, sql);
        }

        let insert = unit.insert_fields();
        if insert.is_empty() {
            // every column is generated
            let sql = format!("{};", self.dialect.default_values_insert(table));
            self.push_for(Operation::Insert, sql.clone());
            let batch = vec![sql; BATCH_ROWS].join("\n");
            self.push_for(Operation::InsertBatch, batch);
        } else {
            let insert_columns = join(insert.iter().map(|f| f.column.as_str()));
            let mut params = Params::new(&self.dialect);
            let sql = format!(
                "INSERT INTO {} ({}) VALUES ({});",
                table,
                insert_columns,
                params.list(insert.len())
            );
            self.push_for(Operation::Insert, sql);

            let mut params = Params::new(&self.dialect);
            let rows: Vec<String> = (0..BATCH_ROWS)
                .map(|_| format!("    ({})", params.list(insert.len())))
                .collect();
            let sql = format!(
                "INSERT INTO {} ({}) VALUES\n{};",
                table,
                insert_columns,
                rows.join(",\n")
            );
            self.push_for(Operation::InsertBatch, sql);
        }

        if let Some(key) = &unit.primary_key {
            let mut params = Params::new(&self.dialect);
            let set = unit
                .update_fields()
                .iter()
                .map(|f| format!("{} = {}", f.column, params.next()))
                .collect::<Vec<_>>()
                .join(", ");
            let sql = format!(
                "UPDATE {} SET {} WHERE {} = {};",
                table,
                set,
                key.field.column,
                params.next()
            );
            self.push_for(Operation::UpdateByKey, sql);

            let mut params = Params::new(&self.dialect);
            let sql = format!(
                "DELETE FROM {} WHERE {} = {};",
                table,
                key.field.column,
                params.next()
            );
            self.push_for(Operation::DeleteByKey, sql);

            let mut params = Params::new(&self.dialect);
            let sql = format!(
                "DELETE FROM {} WHERE {} IN ({});",
                table,
                key.field.column,
                params.list(BATCH_ROWS)
            );
            self.push_for(Operation::DeleteByKeys, sql);
        }

        let mut params = Params::new(&self.dialect);
        let sql = format!(
            "SELECT {} FROM {} ORDER BY {} LIMIT {} OFFSET {};",
            self.columns,
            table,
            unit.order_column(),
            params.next(),
            params.next()
        );
        self.push_for(Operation::SelectPage, sql);

        self.push_for(Operation::Count, format!("SELECT COUNT(*) FROM {};", table));

        if let Some(key) = &unit.primary_key {
            let mut params = Params::new(&self.dialect);
            let sql = format!(
                "SELECT COUNT(1) FROM {} WHERE {} = {};",
                table,
                key.field.column,
                params.next()
            );
            self.push_for(Operation::ExistsByKey, sql);
        }

        let mut params = Params::new(&self.dialect);
        let conditions = unit
            .fields
            .iter()
            .map(|f| format!("{} = {}", f.column, params.next()))
            .collect::<Vec<_>>()
            .join("\n  AND ");
        let label = format!(
            "{} (skeleton, keep the conditions you need)",
            method_names(&self.methods, Operation::SelectByCondition)
        );
        let sql = format!("SELECT {} FROM {}\nWHERE {};", self.columns, table, conditions);
        self.push(label, sql);

        for field in unit.fields.iter().filter(|f| f.kind.is_text()) {
            self.push_pattern(field);
        }
        for field in unit.fields.iter().filter(|f| is_ranged(f.kind)) {
            self.push_range(field);
        }

        self.statements
    }

    fn push_pattern(&mut self, field: &FieldView) {
        let mut params = Params::new(&self.dialect);
        let pattern = self.dialect.contains_pattern(&params.next());
        let sql = format!(
            "SELECT {} FROM {} WHERE {} LIKE {};",
            self.columns, self.unit.table_name, field.column, pattern
        );
        self.push(format!("Pattern match on {} (skeleton)", field.column), sql);
    }

    fn push_range(&mut self, field: &FieldView) {
        let mut params = Params::new(&self.dialect);
        let sql = format!(
            "SELECT {} FROM {} WHERE {} BETWEEN {} AND {};",
            self.columns,
            self.unit.table_name,
            field.column,
            params.next(),
            params.next()
        );
        self.push(format!("Range on {} (skeleton)", field.column), sql);
    }
}

fn is_ranged(kind: TargetKind) -> bool {
    kind.is_numeric() || kind == TargetKind::Time
}

impl ArtifactGenerator for SqlGenerator {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Sql
    }

    fn render(&self, table: &Table, ctx: &RenderContext<'_>) -> Result<String> {
        let unit = GenerationUnit::build(table, ctx)?;
        let template = SqlTemplate {
            statements: StatementBuilder::new(&unit).build(),
            unit: &unit,
        };
        template
            .render()
            .map_err(|e| GenError::render(&table.name, e.to_string()))
    }
}
