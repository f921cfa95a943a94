//! Table model for generated code

use super::column::ColumnSchema;
use crate::naming::first_lower;
use serde::{Deserialize, Serialize};

/// A `CREATE TABLE` statement resolved for code generation
///
/// Built once per statement and read by every emitter; never mutated after
/// the schema builder returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSchema {
    /// Table name as written in the DDL, without quotes or schema qualifier
    pub raw_table_name: String,
    /// Go type name (prefix stripped, singular, camel case)
    pub normalized_name: String,
    /// Whether the model needs an explicit `TableName()` accessor
    pub needs_table_name_mapping: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Columns in declaration order
    pub columns: Vec<ColumnSchema>,
    /// Sorted, deduplicated Go import paths required by the columns
    #[serde(default)]
    pub imports: Vec<String>,
}

impl TableSchema {
    pub fn new(raw_table_name: &str, normalized_name: &str, columns: Vec<ColumnSchema>) -> Self {
        Self {
            raw_table_name: raw_table_name.to_string(),
            normalized_name: normalized_name.to_string(),
            needs_table_name_mapping: false,
            comment: None,
            columns,
            imports: Vec::new(),
        }
    }

    /// `userExample` for `UserExample`, used for proto packages and fields
    pub fn lower_name(&self) -> String {
        first_lower(&self.normalized_name)
    }

    pub fn primary_key(&self) -> Option<&ColumnSchema> {
        self.columns.iter().find(|c| c.is_primary_key)
    }

    pub fn column(&self, column_name: &str) -> Option<&ColumnSchema> {
        self.columns.iter().find(|c| c.column_name == column_name)
    }
}
