//! proto3 service exporter
//!
//! One file per table: a CRUD service plus its request/reply messages. Field
//! numbers restart at 1 in every message and follow column order.

use super::handler::HandlerExporter;
use super::single_line;
use super::template::{Context, Template};
use crate::error::CodegenResult;
use crate::models::{ColumnSchema, TableSchema};
use crate::validation::format_source;

const MESSAGE_TEMPLATE: &str = r#"message {{message}} {
{{#fields}}
	{{type}} {{column}} = {{number}};{{?comment}} // {{comment}}{{/comment}}
{{/fields}}
}
"#;

const FILE_TEMPLATE: &str = r#"syntax = "proto3";

package api.{{lower_name}}.v1;

import "api/{{lower_name}}/v1/query.proto";

option go_package = "./pb;pb";

service {{lower_name}}Service {
	rpc Create(Create{{name}}Request) returns (Create{{name}}Reply) {}
	rpc DeleteByID(Delete{{name}}ByIDRequest) returns (Delete{{name}}ByIDReply) {}
	rpc UpdateByID(Update{{name}}ByIDRequest) returns (Update{{name}}ByIDReply) {}
	rpc GetByID(Get{{name}}ByIDRequest) returns (Get{{name}}ByIDReply) {}
	rpc List(List{{name}}Request) returns (List{{name}}Reply) {}
}

{{create_message}}

message Create{{name}}Reply {
	uint64 id = 1;
}

message Delete{{name}}ByIDRequest {
	uint64 id = 1;
}

message Delete{{name}}ByIDReply {
}

{{update_message}}

message Update{{name}}ByIDReply {
}

{{detail_message}}

message Get{{name}}ByIDRequest {
	uint64 id = 1;
}

message Get{{name}}ByIDReply {
	{{name}} {{lower_name}} = 1;
}

message List{{name}}Request {
	Params params = 1;
}

message List{{name}}Reply {
	int64 total = 1;
	repeated {{name}} {{lower_name}}s = 2;
}
"#;

/// Exporter for the proto3 file of a table
pub struct ProtoExporter {
    message_template: Template,
    file_template: Template,
}

impl ProtoExporter {
    pub fn new() -> CodegenResult<Self> {
        Ok(Self {
            message_template: Template::compile("proto_message", MESSAGE_TEMPLATE)?,
            file_template: Template::compile("proto_file", FILE_TEMPLATE)?,
        })
    }

    /// Render one message, numbering fields from 1 in the given order
    pub fn export_message(&self, message: &str, columns: &[&ColumnSchema]) -> CodegenResult<String> {
        let fields = columns
            .iter()
            .enumerate()
            .map(|(idx, c)| {
                Context::new()
                    .text("type", &c.proto_type)
                    .text("column", &c.column_name)
                    .text("number", (idx + 1).to_string())
                    .text("comment", single_line(c.comment.as_deref()))
            })
            .collect();

        let context = Context::new().text("message", message).list("fields", fields);
        Ok(self.message_template.render(&context)?.trim_end().to_string())
    }

    pub fn export(&self, table: &TableSchema) -> CodegenResult<String> {
        let name = &table.normalized_name;
        let all: Vec<&ColumnSchema> = table.columns.iter().collect();

        let create = self.export_message(
            &format!("Create{}Request", name),
            &HandlerExporter::create_columns(table),
        )?;
        let update = self.export_message(
            &format!("Update{}ByIDRequest", name),
            &HandlerExporter::update_columns(table),
        )?;
        let detail = self.export_message(name, &all)?;

        let context = Context::new()
            .text("name", name)
            .text("lower_name", table.lower_name())
            .text("create_message", create)
            .text("update_message", update)
            .text("detail_message", detail);

        format_source("proto", &self.file_template.render(&context)?)
    }
}
