//! gobatis mapper XML generator.
//!
//! Statement ids come from the same method catalog as the DAO interface, so
//! every interface method resolves to exactly one statement. Column lists,
//! set lists and where clauses are shared `<sql>` fragments.

use askama::Template;

use super::methods::{method_surface, Operation};
use super::unit::{join, GenerationUnit, RenderContext};
use super::{ArtifactGenerator, ArtifactKind, EXAMPLE_TYPE};
use crate::core::schema::Table;
use crate::core::traits::Dialect;
use crate::error::{GenError, Result};

const INDENT: &str = "        ";

const CRITERIA_CLAUSE: &str = r#"<where>
    <if test="COLLECTION != null and COLLECTION.size() > 0">
        <foreach collection="COLLECTION" item="criterion" separator="AND">
            <choose>
                <when test="criterion.noValue">
                    ${criterion.condition}
                </when>
                <when test="criterion.singleValue">
                    ${criterion.condition} #{criterion.value}
                </when>
                <when test="criterion.betweenValue">
                    ${criterion.condition} #{criterion.value} AND #{criterion.secondValue}
                </when>
                <when test="criterion.listValue">
                    ${criterion.condition}
                    <foreach collection="criterion.value" item="listItem" open="(" separator="," close=")">
                        #{listItem}
                    </foreach>
                </when>
            </choose>
        </foreach>
    </if>
</where>"#;

struct ResultEntry {
    tag: &'static str,
    property: String,
    column: String,
    go_type: String,
}

struct Fragment {
    id: &'static str,
    body: String,
}

struct StatementNode {
    tag: &'static str,
    id: &'static str,
    doc: &'static str,
    attributes: String,
    body: String,
}

#[derive(Template)]
#[template(path = "mapper.xml", escape = "none")]
struct MapperTemplate<'a> {
    unit: &'a GenerationUnit,
    namespace: String,
    result_map: String,
    result_entries: Vec<ResultEntry>,
    fragments: Vec<Fragment>,
    statements: Vec<StatementNode>,
}

/// Renders one gobatis mapper document per table.
#[derive(Debug, Clone, Copy, Default)]
pub struct MapperGenerator;

/// Escape a value for use inside a double-quoted XML attribute.
fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Indent every line of a multi-line body to statement depth.
fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!("{}{}", INDENT, line))
        .collect::<Vec<_>>()
        .join("\n")
}

fn criteria_clause(collection: &str) -> String {
    CRITERIA_CLAUSE.replace("COLLECTION", collection)
}

fn include(refid: &str) -> String {
    format!("<include refid=\"{}\"/>", refid)
}

struct MapperBuilder<'a> {
    unit: &'a GenerationUnit,
    result_map: String,
}

impl<'a> MapperBuilder<'a> {
    fn new(unit: &'a GenerationUnit) -> Self {
        Self {
            unit,
            result_map: format!("{}ResultMap", unit.struct_name),
        }
    }

    fn result_entries(&self) -> Vec<ResultEntry> {
        self.unit
            .fields
            .iter()
            .map(|f| ResultEntry {
                tag: if f.is_primary_key { "id" } else { "result" },
                property: f.name.clone(),
                column: xml_escape(&f.column),
                go_type: xml_escape(&f.go_type),
            })
            .collect()
    }

    fn fragments(&self) -> Vec<Fragment> {
        let unit = self.unit;
        let insert = unit.insert_fields();
        let update = unit.update_fields();

        let record_set = update
            .iter()
            .map(|f| {
                format!(
                    "<if test=\"record.{} != null\">{} = {},</if>",
                    f.name,
                    f.column,
                    f.placeholder("record.")
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        let mut condition = vec!["<where>".to_string()];
        condition.extend(unit.fields.iter().map(|f| {
            format!(
                "    <if test=\"condition.{} != null\">AND {} = {}</if>",
                f.name,
                f.column,
                f.placeholder("condition.")
            )
        }));
        condition.push("</where>".to_string());

        let mut fragments = vec![
            Fragment {
                id: "Base_Column_List",
                body: unit.column_list(),
            },
            Fragment {
                id: "Insert_Column_List",
                body: join(insert.iter().map(|f| f.column.as_str())),
            },
            Fragment {
                id: "Insert_Value_List",
                body: insert
                    .iter()
                    .map(|f| f.placeholder(""))
                    .collect::<Vec<_>>()
                    .join(", "),
            },
            Fragment {
                id: "Update_Set_List",
                body: update
                    .iter()
                    .map(|f| format!("{} = {}", f.column, f.placeholder("")))
                    .collect::<Vec<_>>()
                    .join(", "),
            },
            Fragment {
                id: "Update_Record_Set_List",
                body: record_set,
            },
            Fragment {
                id: "Condition_Where_Clause",
                body: condition.join("\n"),
            },
        ];
        if insert.is_empty() {
            fragments.retain(|f| !f.id.starts_with("Insert_"));
        }
        if unit.flags.generate_example {
            fragments.push(Fragment {
                id: "Example_Where_Clause",
                body: criteria_clause("criteria"),
            });
            fragments.push(Fragment {
                id: "Update_By_Example_Where_Clause",
                body: criteria_clause("example.criteria"),
            });
        }

        fragments
            .into_iter()
            .map(|f| Fragment {
                id: f.id,
                body: indent(&f.body),
            })
            .collect()
    }

    fn select_columns(&self) -> String {
        format!(
            "SELECT\n    {}\nFROM {}",
            include("Base_Column_List"),
            self.unit.table_name
        )
    }

    /// `parameterType`/`resultMap`/`resultType` attributes for an operation.
    fn attributes(&self, operation: Operation) -> String {
        let record = self.unit.struct_name.as_str();
        let key_type = self
            .unit
            .primary_key
            .as_ref()
            .map(|k| xml_escape(&k.field.go_type))
            .unwrap_or_default();
        let result_map = format!(" resultMap=\"{}\"", self.result_map);
        let param = |t: &str| format!(" parameterType=\"{}\"", t);

        match operation {
            Operation::Insert | Operation::UpdateByKey => param(record),
            Operation::InsertBatch
            | Operation::UpdateByCondition
            | Operation::DeleteByKeys
            | Operation::DeleteByCondition
            | Operation::UpdateByExample => param("map"),
            Operation::SelectByKey => format!("{}{}", param(&key_type), result_map),
            Operation::SelectAll => result_map,
            Operation::SelectPage | Operation::SelectByCondition => {
                format!("{}{}", param("map"), result_map)
            }
            Operation::Count => " resultType=\"int64\"".to_string(),
            Operation::CountByCondition => format!("{} resultType=\"int64\"", param("map")),
            Operation::ExistsByKey => format!("{} resultType=\"bool\"", param(&key_type)),
            Operation::DeleteByKey => param(&key_type),
            Operation::SelectByExample => format!("{}{}", param(EXAMPLE_TYPE), result_map),
            Operation::CountByExample => {
                format!("{} resultType=\"int64\"", param(EXAMPLE_TYPE))
            }
            Operation::DeleteByExample => param(EXAMPLE_TYPE),
        }
    }

    /// Statement text for an operation, before indentation.
    fn body(&self, operation: Operation) -> String {
        let unit = self.unit;
        let table = unit.table_name.as_str();
        let order = unit.order_column();
        // by-key operations are filtered out for keyless tables
        let (key_column, key_param, keys_param) = match &unit.primary_key {
            Some(key) => (
                key.field.column.as_str(),
                key.param.as_str(),
                key.params.as_str(),
            ),
            None => ("", "id", "ids"),
        };
        let key_where = format!("WHERE {} = #{{{}}}", key_column, key_param);

        let default_insert = || unit.driver.dialect().default_values_insert(table);
        let generated_only = unit.insert_fields().is_empty();

        match operation {
            Operation::Insert if generated_only => default_insert(),
            Operation::InsertBatch if generated_only => format!(
                "<foreach collection=\"records\" item=\"item\" separator=\";\">\n    {}\n</foreach>",
                default_insert()
            ),
            Operation::Insert => format!(
                "INSERT INTO {} (\n    {}\n) VALUES (\n    {}\n)",
                table,
                include("Insert_Column_List"),
                include("Insert_Value_List")
            ),
            Operation::InsertBatch => {
                let row = unit
                    .insert_fields()
                    .iter()
                    .map(|f| f.placeholder("item."))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!(
                    "INSERT INTO {} (\n    {}\n) VALUES\n<foreach collection=\"records\" item=\"item\" separator=\",\">\n    ({})\n</foreach>",
                    table,
                    include("Insert_Column_List"),
                    row
                )
            }
            Operation::SelectByKey => format!("{}\n{}", self.select_columns(), key_where),
            Operation::SelectAll => format!("{}\nORDER BY {}", self.select_columns(), order),
            Operation::SelectPage => format!(
                "{}\nORDER BY {}\nLIMIT #{{limit}} OFFSET #{{offset}}",
                self.select_columns(),
                order
            ),
            Operation::SelectByCondition => format!(
                "{}\n{}\nORDER BY {}",
                self.select_columns(),
                include("Condition_Where_Clause"),
                order
            ),
            Operation::Count => format!("SELECT COUNT(1)\nFROM {}", table),
            Operation::CountByCondition => format!(
                "SELECT COUNT(1)\nFROM {}\n{}",
                table,
                include("Condition_Where_Clause")
            ),
            Operation::ExistsByKey => {
                format!("SELECT COUNT(1) > 0\nFROM {}\n{}", table, key_where)
            }
            Operation::UpdateByKey => {
                let key_field = match &unit.primary_key {
                    Some(key) => key.field.placeholder(""),
                    None => String::new(),
                };
                format!(
                    "UPDATE {}\nSET {}\nWHERE {} = {}",
                    table,
                    include("Update_Set_List"),
                    key_column,
                    key_field
                )
            }
            Operation::UpdateByCondition => format!(
                "UPDATE {}\n<set>\n    {}\n</set>\n{}",
                table,
                include("Update_Record_Set_List"),
                include("Condition_Where_Clause")
            ),
            Operation::DeleteByKey => format!("DELETE FROM {}\n{}", table, key_where),
            Operation::DeleteByKeys => format!(
                "DELETE FROM {}\nWHERE {} IN\n<foreach collection=\"{}\" item=\"{}\" open=\"(\" separator=\",\" close=\")\">\n    #{{{}}}\n</foreach>",
                table, key_column, keys_param, key_param, key_param
            ),
            Operation::DeleteByCondition => format!(
                "DELETE FROM {}\n{}",
                table,
                include("Condition_Where_Clause")
            ),
            Operation::SelectByExample => format!(
                "{}\n{}\n<if test=\"orderByClause != null and orderByClause != ''\">\n    ORDER BY ${{orderByClause}}\n</if>\n<if test=\"limit != null\">\n    LIMIT #{{limit}}\n</if>\n<if test=\"offset != null\">\n    OFFSET #{{offset}}\n</if>",
                self.select_columns(),
                include("Example_Where_Clause")
            ),
            Operation::CountByExample => format!(
                "SELECT COUNT(1)\nFROM {}\n{}",
                table,
                include("Example_Where_Clause")
            ),
            Operation::UpdateByExample => format!(
                "UPDATE {}\n<set>\n    {}\n</set>\n{}",
                table,
                include("Update_Record_Set_List"),
                include("Update_By_Example_Where_Clause")
            ),
            Operation::DeleteByExample => format!(
                "DELETE FROM {}\n{}",
                table,
                include("Example_Where_Clause")
            ),
        }
    }

    fn statements(&self) -> Vec<StatementNode> {
        method_surface(self.unit.has_key(), self.unit.flags.generate_example)
            .into_iter()
            .map(|m| StatementNode {
                tag: m.operation.statement_tag(),
                id: m.name,
                doc: m.operation.doc(),
                attributes: self.attributes(m.operation),
                body: indent(&self.body(m.operation)),
            })
            .collect()
    }
}

impl ArtifactGenerator for MapperGenerator {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Mapper
    }

    fn render(&self, table: &Table, ctx: &RenderContext<'_>) -> Result<String> {
        let unit = GenerationUnit::build(table, ctx)?;
        let builder = MapperBuilder::new(&unit);
        let template = MapperTemplate {
            namespace: xml_escape(&unit.namespace),
            result_entries: builder.result_entries(),
            fragments: builder.fragments(),
            statements: builder.statements(),
            result_map: builder.result_map.clone(),
            unit: &unit,
        };
        template
            .render()
            .map_err(|e| GenError::render(&table.name, e.to_string()))
    }
}
