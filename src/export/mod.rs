//! Export functionality
//!
//! Provides exporters for each generated artifact:
//! - GORM model structs and the model file
//! - update-field assignments (dao)
//! - create/update/detail request and response structs (handler)
//! - JSON skeleton
//! - proto3 service file
//!
//! Every exporter owns its compiled templates, renders from a
//! [`TableSchema`](crate::models::TableSchema) and runs the result through
//! the syntax pass before any text fixups.

pub mod fixups;
pub mod handler;
pub mod json;
pub mod model;
pub mod proto;
pub mod template;
pub mod update_fields;

pub use handler::HandlerExporter;
pub use json::JsonExporter;
pub use model::ModelExporter;
pub use proto::ProtoExporter;
pub use template::{Context, Template, Value};
pub use update_fields::UpdateFieldsExporter;

use crate::models::ColumnSchema;

/// Collapse a DDL comment onto one line so it can follow `//`
pub(crate) fn single_line(comment: Option<&str>) -> String {
    comment
        .map(|c| c.split_whitespace().collect::<Vec<_>>().join(" "))
        .unwrap_or_default()
}

/// Template context shared by the struct-shaped exporters
pub(crate) fn field_context(column: &ColumnSchema) -> Context {
    Context::new()
        .text("field", &column.field_name)
        .text("column", &column.column_name)
        .text("type", &column.target_type)
        .text("tag", &column.tag)
        .text("comment", single_line(column.comment.as_deref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line() {
        assert_eq!(single_line(Some("user\nname  here")), "user name here");
        assert_eq!(single_line(None), "");
    }
}
