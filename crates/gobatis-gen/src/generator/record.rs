//! Go struct generator.

use askama::Template;

use super::unit::{GenerationUnit, RenderContext};
use super::{ArtifactGenerator, ArtifactKind};
use crate::core::schema::Table;
use crate::error::{GenError, Result};

struct RecordField {
    name: String,
    go_type: String,
    tag: String,
    comment: String,
}

#[derive(Template)]
#[template(path = "record.go", escape = "none")]
struct RecordTemplate<'a> {
    unit: &'a GenerationUnit,
    imports: Vec<&'static str>,
    fields: Vec<RecordField>,
}

/// Renders one Go struct per table, with a `TableName` method.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordGenerator;

impl RecordGenerator {
    fn fields(unit: &GenerationUnit) -> Vec<RecordField> {
        let name_width = unit.fields.iter().map(|f| f.name.len()).max().unwrap_or(0);
        let type_width = unit.fields.iter().map(|f| f.go_type.len()).max().unwrap_or(0);

        unit.fields
            .iter()
            .map(|f| {
                let tag = if unit.flags.json_tag {
                    format!("db:\"{}\" json:\"{}\"", f.column, f.wire)
                } else {
                    format!("db:\"{}\"", f.column)
                };
                RecordField {
                    name: format!("{:<width$}", f.name, width = name_width),
                    go_type: format!("{:<width$}", f.go_type, width = type_width),
                    tag,
                    comment: f.comment.clone(),
                }
            })
            .collect()
    }

    fn imports(unit: &GenerationUnit) -> Vec<&'static str> {
        let mut imports: Vec<_> = unit.fields.iter().filter_map(|f| f.kind.import()).collect();
        imports.sort_unstable();
        imports.dedup();
        imports
    }
}

impl ArtifactGenerator for RecordGenerator {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Record
    }

    fn render(&self, table: &Table, ctx: &RenderContext<'_>) -> Result<String> {
        let unit = GenerationUnit::build(table, ctx)?;
        let template = RecordTemplate {
            imports: Self::imports(&unit),
            fields: Self::fields(&unit),
            unit: &unit,
        };
        template
            .render()
            .map_err(|e| GenError::render(&table.name, e.to_string()))
    }
}
