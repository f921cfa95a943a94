//! JSON skeleton exporter

use super::fixups::{add_json_commas, json_assignments_to_pairs};
use super::template::{Context, Template};
use crate::error::CodegenResult;
use crate::models::TableSchema;
use crate::validation::format_source;

const TEMPLATE: &str = r#"{
{{#fields}}
	"{{column}}" {{zero}}
{{/fields}}
}
"#;

/// Exporter for a JSON document with one zero-valued key per column
pub struct JsonExporter {
    template: Template,
}

impl JsonExporter {
    pub fn new() -> CodegenResult<Self> {
        Ok(Self {
            template: Template::compile("json", TEMPLATE)?,
        })
    }

    pub fn export(&self, table: &TableSchema) -> CodegenResult<String> {
        let fields = table
            .columns
            .iter()
            .map(|c| {
                Context::new()
                    .text("column", &c.column_name)
                    .text("zero", c.zero_literal())
            })
            .collect();

        let code = self.template.render(&Context::new().list("fields", fields))?;
        let code = format_source("json", &code)?;
        Ok(add_json_commas(&json_assignments_to_pairs(&code)))
    }
}
