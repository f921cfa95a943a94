//! Handler request/response exporter
//!
//! Produces the create request, update-by-ID request and get-by-ID response
//! structs of a table, then applies the ID type rewrites.

use super::field_context;
use super::fixups::adjust_id_types;
use super::template::{Context, Template};
use crate::error::CodegenResult;
use crate::models::{
    COLUMN_CREATED_AT, COLUMN_ID, COLUMN_UPDATED_AT, ColumnSchema, TableSchema,
    is_reserved_column,
};
use crate::validation::format_source;

const CREATE_TEMPLATE: &str = r#"// Create{{name}}Request create params
type Create{{name}}Request struct {
	// todo fill in the binding rules https://github.com/go-playground/validator
{{#fields}}
	{{field}} {{type}} `json:"{{column}}" binding:""`{{?comment}} // {{comment}}{{/comment}}
{{/fields}}
}
"#;

const UPDATE_TEMPLATE: &str = r#"// Update{{name}}ByIDRequest update params
type Update{{name}}ByIDRequest struct {
{{#fields}}
	{{field}} {{type}} `json:"{{column}}" binding:""`{{?comment}} // {{comment}}{{/comment}}
{{/fields}}
}
"#;

const DETAIL_TEMPLATE: &str = r#"// Get{{name}}ByIDRespond respond detail
type Get{{name}}ByIDRespond struct {
{{#fields}}
	{{field}} {{type}} `json:"{{column}}"`{{?comment}} // {{comment}}{{/comment}}
{{/fields}}
}
"#;

/// Exporter for handler request and response structs
pub struct HandlerExporter {
    create_template: Template,
    update_template: Template,
    detail_template: Template,
}

impl HandlerExporter {
    pub fn new() -> CodegenResult<Self> {
        Ok(Self {
            create_template: Template::compile("handler_create", CREATE_TEMPLATE)?,
            update_template: Template::compile("handler_update", UPDATE_TEMPLATE)?,
            detail_template: Template::compile("handler_detail", DETAIL_TEMPLATE)?,
        })
    }

    /// Fields of the create request: no reserved column
    pub fn create_columns(table: &TableSchema) -> Vec<&ColumnSchema> {
        table
            .columns
            .iter()
            .filter(|c| !is_reserved_column(&c.column_name, &[]))
            .collect()
    }

    /// Fields of the update request: the create fields plus the primary key
    pub fn update_columns(table: &TableSchema) -> Vec<&ColumnSchema> {
        table
            .columns
            .iter()
            .filter(|c| c.is_primary_key || !is_reserved_column(&c.column_name, &[COLUMN_ID]))
            .collect()
    }

    /// Fields of the detail response: everything but `deleted_at`
    pub fn detail_columns(table: &TableSchema) -> Vec<&ColumnSchema> {
        table
            .columns
            .iter()
            .filter(|c| {
                !is_reserved_column(
                    &c.column_name,
                    &[COLUMN_ID, COLUMN_CREATED_AT, COLUMN_UPDATED_AT],
                )
            })
            .collect()
    }

    pub fn export_create(&self, table: &TableSchema) -> CodegenResult<String> {
        self.render(&self.create_template, table, Self::create_columns(table))
    }

    pub fn export_update(&self, table: &TableSchema) -> CodegenResult<String> {
        self.render(&self.update_template, table, Self::update_columns(table))
    }

    pub fn export_detail(&self, table: &TableSchema) -> CodegenResult<String> {
        self.render(&self.detail_template, table, Self::detail_columns(table))
    }

    /// All three structs of a table, ID fields rewritten
    pub fn export(&self, table: &TableSchema) -> CodegenResult<String> {
        let code = [
            self.export_create(table)?,
            self.export_update(table)?,
            self.export_detail(table)?,
        ]
        .join("\n");
        Ok(adjust_id_types(&code))
    }

    fn render(
        &self,
        template: &Template,
        table: &TableSchema,
        columns: Vec<&ColumnSchema>,
    ) -> CodegenResult<String> {
        let context = Context::new()
            .text("name", &table.normalized_name)
            .list("fields", columns.into_iter().map(field_context).collect());
        format_source("handler", &template.render(&context)?)
    }
}
