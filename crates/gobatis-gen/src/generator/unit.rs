//! Per-table render input shared in shape by every artifact kind.
//!
//! A [`GenerationUnit`] is built from a [`Table`] and the configuration,
//! validated once, and never mutated afterwards. All derived names are
//! computed here so the four artifact kinds cannot disagree about them.

use std::collections::HashSet;

use crate::config::GeneratorConfig;
use crate::core::schema::{Column, Table};
use crate::drivers::Driver;
use crate::error::{GenError, Result};
use crate::naming::{
    go_param_name, is_exported_identifier, struct_name, to_identifier_case, to_wire_case,
};
use crate::typemap::TargetKind;

/// Everything a generator needs besides the table itself.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub config: &'a GeneratorConfig,
    pub driver: Driver,
}

impl<'a> RenderContext<'a> {
    pub fn new(config: &'a GeneratorConfig, driver: Driver) -> Self {
        Self { config, driver }
    }
}

/// Template branches controlled by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureFlags {
    pub json_tag: bool,
    pub generate_example: bool,
}

/// One column as seen by the templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    /// Go field name.
    pub name: String,
    /// Column name.
    pub column: String,
    /// Rendered Go type, pointer prefix included.
    pub go_type: String,
    pub kind: TargetKind,
    /// Serialized key for the json tag.
    pub wire: String,
    /// Single-line column comment.
    pub comment: String,
    /// True only for the designated primary key.
    pub is_primary_key: bool,
    pub is_auto_increment: bool,
}

impl FieldView {
    /// Mapper placeholder for this field, e.g. `#{Username}` or `#{item.Username}`.
    pub fn placeholder(&self, prefix: &str) -> String {
        format!("#{{{}{}}}", prefix, self.name)
    }
}

/// The designated primary key plus its Go parameter names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyView {
    pub field: FieldView,
    /// Parameter name in by-key signatures (`id`).
    pub param: String,
    /// Parameter name of the key slice in batch deletes (`ids`).
    pub params: String,
}

/// Per-table render input.
#[derive(Debug, Clone)]
pub struct GenerationUnit {
    pub table_name: String,
    pub table_comment: String,
    /// Derived Go type name (`Users`, `OrderItems`).
    pub struct_name: String,
    /// Snake-case stem for file names.
    pub file_stem: String,
    pub package: String,
    pub model_import: String,
    pub dao_name: String,
    pub namespace: String,
    pub fields: Vec<FieldView>,
    pub primary_key: Option<KeyView>,
    pub flags: FeatureFlags,
    pub driver: Driver,
}

impl GenerationUnit {
    /// Derive names and types for `table`, failing on names Go cannot use.
    pub fn build(table: &Table, ctx: &RenderContext<'_>) -> Result<Self> {
        let config = ctx.config;
        let struct_name = struct_name(&table.name, &config.tables.prefix);
        if !is_exported_identifier(&struct_name) {
            return Err(GenError::render(
                &table.name,
                format!("derived type name '{}' is not a valid Go identifier", struct_name),
            ));
        }
        if table.columns.is_empty() {
            return Err(GenError::render(&table.name, "table has no columns"));
        }

        let key_column = table.primary_key().map(|c| c.name.as_str());
        let mut seen = HashSet::new();
        let mut fields = Vec::with_capacity(table.columns.len());
        for column in &table.columns {
            let field = field_view(column, key_column == Some(column.name.as_str()));
            if !is_exported_identifier(&field.name) {
                return Err(GenError::render(
                    &table.name,
                    format!(
                        "column '{}' derives field name '{}', which is not a valid Go identifier",
                        column.name, field.name
                    ),
                ));
            }
            if !seen.insert(field.name.clone()) {
                return Err(GenError::render(
                    &table.name,
                    format!(
                        "column '{}' derives field name '{}', which is already used by another column",
                        column.name, field.name
                    ),
                ));
            }
            fields.push(field);
        }

        let primary_key = fields.iter().find(|f| f.is_primary_key).map(|field| {
            let param = go_param_name(&field.name);
            KeyView {
                params: format!("{}s", param),
                param,
                field: field.clone(),
            }
        });

        Ok(Self {
            table_name: table.name.clone(),
            table_comment: single_line(&table.comment),
            file_stem: to_wire_case(&struct_name),
            package: config.output.package.clone(),
            model_import: config.output.model_import_path(),
            dao_name: format!("{}DAO", struct_name),
            namespace: config.options.namespace_for(&struct_name),
            struct_name,
            fields,
            primary_key,
            flags: FeatureFlags {
                json_tag: config.options.json_tag,
                generate_example: config.options.generate_example,
            },
            driver: ctx.driver,
        })
    }

    pub fn has_key(&self) -> bool {
        self.primary_key.is_some()
    }

    /// Fields written by INSERT: everything the database does not assign.
    pub fn insert_fields(&self) -> Vec<&FieldView> {
        self.fields.iter().filter(|f| !f.is_auto_increment).collect()
    }

    /// Fields written by UPDATE: every non-key field, or all fields when the
    /// key is the only column.
    pub fn update_fields(&self) -> Vec<&FieldView> {
        let non_key: Vec<_> = self.fields.iter().filter(|f| !f.is_primary_key).collect();
        if non_key.is_empty() {
            self.fields.iter().collect()
        } else {
            non_key
        }
    }

    /// Column used to give paged queries a stable order.
    pub fn order_column(&self) -> &str {
        match &self.primary_key {
            Some(key) => &key.field.column,
            None => &self.fields[0].column,
        }
    }

    /// Comma-separated column list in ordinal order.
    pub fn column_list(&self) -> String {
        join(self.fields.iter().map(|f| f.column.as_str()))
    }
}

fn field_view(column: &Column, is_key: bool) -> FieldView {
    FieldView {
        name: to_identifier_case(&column.name),
        column: column.name.clone(),
        go_type: column.mapped_type.to_string(),
        kind: column.mapped_type.kind,
        wire: to_wire_case(&column.name),
        comment: single_line(&column.comment),
        is_primary_key: is_key,
        is_auto_increment: column.is_auto_increment,
    }
}

fn single_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Join with `, `.
pub(crate) fn join<'a>(items: impl IntoIterator<Item = &'a str>) -> String {
    items.into_iter().collect::<Vec<_>>().join(", ")
}
