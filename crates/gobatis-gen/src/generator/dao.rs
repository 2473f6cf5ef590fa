//! Go DAO interface generator.

use askama::Template;

use super::methods::{method_surface, Operation};
use super::unit::{GenerationUnit, RenderContext};
use super::{ArtifactGenerator, ArtifactKind, EXAMPLE_IMPORT};
use crate::core::schema::Table;
use crate::error::{GenError, Result};

struct MethodView {
    name: &'static str,
    signature: String,
    doc: &'static str,
    group_start: bool,
}

#[derive(Template)]
#[template(path = "dao.go", escape = "none")]
struct DaoTemplate<'a> {
    unit: &'a GenerationUnit,
    example_import: &'static str,
    methods: Vec<MethodView>,
}

/// Renders the DAO interface for a table, aliases included.
#[derive(Debug, Clone, Copy, Default)]
pub struct DaoGenerator;

/// Go parameter and result lists for one operation.
fn signature(unit: &GenerationUnit, operation: Operation) -> String {
    let record = format!("*model.{}", unit.struct_name);
    let list = format!("[]*model.{}", unit.struct_name);
    let condition = "condition map[string]interface{}";
    let example = "example *example.Example";
    // by-key operations never reach here for keyless tables
    let (key_param, key_type, keys_param) = match &unit.primary_key {
        Some(key) => (
            key.param.as_str(),
            key.field.go_type.as_str(),
            key.params.as_str(),
        ),
        None => ("id", "interface{}", "ids"),
    };

    match operation {
        Operation::Insert => format!("(record {}) (int64, error)", record),
        Operation::InsertBatch => format!("(records []{}) (int64, error)", record),
        Operation::SelectByKey => format!("({} {}) ({}, error)", key_param, key_type, record),
        Operation::SelectAll => format!("() ({}, error)", list),
        Operation::SelectPage => format!("(offset, limit int) ({}, error)", list),
        Operation::SelectByCondition => format!("({}) ({}, error)", condition, list),
        Operation::Count => "() (int64, error)".to_string(),
        Operation::CountByCondition => format!("({}) (int64, error)", condition),
        Operation::ExistsByKey => format!("({} {}) (bool, error)", key_param, key_type),
        Operation::UpdateByKey => format!("(record {}) (int64, error)", record),
        Operation::UpdateByCondition => {
            format!("(record {}, {}) (int64, error)", record, condition)
        }
        Operation::DeleteByKey => format!("({} {}) (int64, error)", key_param, key_type),
        Operation::DeleteByKeys => format!("({} []{}) (int64, error)", keys_param, key_type),
        Operation::DeleteByCondition => format!("({}) (int64, error)", condition),
        Operation::SelectByExample => format!("({}) ({}, error)", example, list),
        Operation::CountByExample => format!("({}) (int64, error)", example),
        Operation::UpdateByExample => {
            format!("(record {}, {}) (int64, error)", record, example)
        }
        Operation::DeleteByExample => format!("({}) (int64, error)", example),
    }
}

impl DaoGenerator {
    fn methods(unit: &GenerationUnit) -> Vec<MethodView> {
        let mut previous = None;
        method_surface(unit.has_key(), unit.flags.generate_example)
            .into_iter()
            .map(|m| {
                let tag = m.operation.statement_tag();
                let group_start = previous != Some(tag);
                previous = Some(tag);
                MethodView {
                    name: m.name,
                    signature: signature(unit, m.operation),
                    doc: m.operation.doc(),
                    group_start,
                }
            })
            .collect()
    }
}

impl ArtifactGenerator for DaoGenerator {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Dao
    }

    fn render(&self, table: &Table, ctx: &RenderContext<'_>) -> Result<String> {
        let unit = GenerationUnit::build(table, ctx)?;
        let template = DaoTemplate {
            example_import: EXAMPLE_IMPORT,
            methods: Self::methods(&unit),
            unit: &unit,
        };
        template
            .render()
            .map_err(|e| GenError::render(&table.name, e.to_string()))
    }
}
