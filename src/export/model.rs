//! GORM model exporter

use super::fixups::{EMBEDDED_TYPE_MARKER, replace_embedded_marker};
use super::template::{Context, Template};
use super::{field_context, single_line};
use crate::error::CodegenResult;
use crate::models::{EMBEDDED_MARKER, TableSchema};
use crate::validation::format_source;

const STRUCT_TEMPLATE: &str = r#"{{?comment}}
// {{name}} {{comment}}
{{/comment}}
type {{name}} struct {
{{#fields}}
	{{field}} {{type}}{{?tag}} `{{tag}}`{{/tag}}{{?comment}} // {{comment}}{{/comment}}
{{/fields}}
}
{{?table_name_func}}

// TableName table name
func (m *{{name}}) TableName() string {
	return "{{raw_name}}"
}
{{/table_name_func}}
"#;

const FILE_TEMPLATE: &str = r#"package {{package}}
{{?imports}}

import (
{{#imports}}
	"{{path}}"
{{/imports}}
)
{{/imports}}
{{#structs}}

{{code}}
{{/structs}}
"#;

/// Exporter for the Go model file
pub struct ModelExporter {
    struct_template: Template,
    file_template: Template,
}

impl ModelExporter {
    pub fn new() -> CodegenResult<Self> {
        Ok(Self {
            struct_template: Template::compile("model_struct", STRUCT_TEMPLATE)?,
            file_template: Template::compile("model_file", FILE_TEMPLATE)?,
        })
    }

    /// Export the model struct of one table
    ///
    /// With `embed`, the reserved columns are replaced by a leading
    /// `mysql.Model` field.
    pub fn export_struct(&self, table: &TableSchema, embed: bool) -> CodegenResult<String> {
        let mut fields = Vec::with_capacity(table.columns.len() + 1);
        if embed {
            fields.push(
                Context::new()
                    .text("field", EMBEDDED_MARKER)
                    .text("column", EMBEDDED_MARKER)
                    .text("type", EMBEDDED_TYPE_MARKER)
                    .text("tag", "gorm:\"embedded\"")
                    .text("comment", "embed id and time"),
            );
        }
        fields.extend(
            table
                .columns
                .iter()
                .filter(|c| !embed || !c.is_reserved())
                .map(field_context),
        );

        let context = Context::new()
            .text("name", &table.normalized_name)
            .text("raw_name", &table.raw_table_name)
            .text("comment", single_line(table.comment.as_deref()))
            .flag("table_name_func", table.needs_table_name_mapping)
            .list("fields", fields);

        let code = format_source("model", &self.struct_template.render(&context)?)?;
        Ok(if embed {
            replace_embedded_marker(&code)
        } else {
            code
        })
    }

    /// Export the model file wrapping already exported structs
    pub fn export_file(
        &self,
        package: &str,
        imports: &[String],
        structs: &[String],
    ) -> CodegenResult<String> {
        let context = Context::new()
            .text("package", package)
            .list(
                "imports",
                imports
                    .iter()
                    .map(|p| Context::new().text("path", p))
                    .collect(),
            )
            .list(
                "structs",
                structs
                    .iter()
                    .map(|s| Context::new().text("code", s.trim_end()))
                    .collect(),
            );

        format_source("model", &self.file_template.render(&context)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ColumnSchema;

    fn user_table() -> TableSchema {
        let mut id = ColumnSchema::new("id", "ID", "uint64");
        id.tag = "gorm:\"column:id;primary_key\"".to_string();
        let mut name = ColumnSchema::new("name", "Name", "string");
        name.tag = "gorm:\"column:name;NOT NULL\"".to_string();
        name.comment = Some("user name".to_string());
        let mut created = ColumnSchema::new("created_at", "CreatedAt", "time.Time");
        created.tag = "gorm:\"column:created_at\"".to_string();
        let mut table = TableSchema::new("t_user", "User", vec![id, name, created]);
        table.comment = Some("user table".to_string());
        table
    }

    #[test]
    fn test_export_struct() {
        let exporter = ModelExporter::new().unwrap();
        let code = exporter.export_struct(&user_table(), false).unwrap();
        assert_eq!(
            code,
            "// User user table\n\
             type User struct {\n\
             \tID uint64 `gorm:\"column:id;primary_key\"`\n\
             \tName string `gorm:\"column:name;NOT NULL\"` // user name\n\
             \tCreatedAt time.Time `gorm:\"column:created_at\"`\n\
             }\n"
        );
    }

    #[test]
    fn test_export_struct_with_table_name_and_embed() {
        let mut table = user_table();
        table.needs_table_name_mapping = true;
        let code = ModelExporter::new()
            .unwrap()
            .export_struct(&table, true)
            .unwrap();
        assert!(code.contains("\tmysql.Model `gorm:\"embedded\"` // embed id and time\n"));
        assert!(!code.contains("CreatedAt"));
        assert!(!code.contains(EMBEDDED_MARKER));
        assert!(code.contains("func (m *User) TableName() string {\n\treturn \"t_user\"\n}\n"));
    }

    #[test]
    fn test_export_file() {
        let exporter = ModelExporter::new().unwrap();
        let structs = vec!["type A struct {\n}\n".to_string(), "type B struct {\n}\n".to_string()];
        let code = exporter
            .export_file("model", &["time".to_string()], &structs)
            .unwrap();
        assert_eq!(
            code,
            "package model\n\nimport (\n\t\"time\"\n)\n\ntype A struct {\n}\n\ntype B struct {\n}\n"
        );

        let code = exporter.export_file("model", &[], &structs[..1]).unwrap();
        assert_eq!(code, "package model\n\ntype A struct {\n}\n");
    }
}
