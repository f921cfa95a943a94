//! Update-fields exporter
//!
//! Renders the `update` map assignments a dao uses for partial updates.

use super::template::{Context, Template};
use crate::error::CodegenResult;
use crate::models::{
    COLUMN_CREATED_AT, COLUMN_DELETED_AT, COLUMN_UPDATED_AT, ColumnSchema, TableSchema,
    is_reserved_column,
};
use crate::validation::format_source;

const TEMPLATE: &str = r#"{{#fields}}
if table.{{field}}{{condition}} {
	update["{{column}}"] = table.{{field}}
}
{{/fields}}
"#;

const TIMESTAMP_COLUMNS: &[&str] = &[COLUMN_CREATED_AT, COLUMN_UPDATED_AT, COLUMN_DELETED_AT];

/// Zero test appended to `table.<Field>`; method calls attach without a space
fn condition(column: &ColumnSchema) -> String {
    let test = column.zero_condition();
    if test.starts_with('.') {
        test
    } else {
        format!(" {}", test)
    }
}

/// Exporter for update-field assignments
pub struct UpdateFieldsExporter {
    template: Template,
}

impl UpdateFieldsExporter {
    pub fn new() -> CodegenResult<Self> {
        Ok(Self {
            template: Template::compile("update_fields", TEMPLATE)?,
        })
    }

    /// Columns that get an assignment
    ///
    /// Reserved columns are skipped. Without `embed` the timestamp columns
    /// are real fields of the model and are kept.
    pub fn columns(table: &TableSchema, embed: bool) -> Vec<&ColumnSchema> {
        let keep: &[&str] = if embed { &[] } else { TIMESTAMP_COLUMNS };
        table
            .columns
            .iter()
            .filter(|c| !is_reserved_column(&c.column_name, keep))
            .collect()
    }

    pub fn export(&self, table: &TableSchema, embed: bool) -> CodegenResult<String> {
        let fields = Self::columns(table, embed)
            .into_iter()
            .map(|c| {
                Context::new()
                    .text("field", &c.field_name)
                    .text("column", &c.column_name)
                    .text("condition", condition(c))
            })
            .collect();

        let code = self.template.render(&Context::new().list("fields", fields))?;
        format_source("dao", &code)
    }
}
