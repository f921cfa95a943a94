//! Column model for generated code

use serde::{Deserialize, Serialize};

/// Primary key column conventionally shared by every table
pub const COLUMN_ID: &str = "id";
pub const COLUMN_CREATED_AT: &str = "created_at";
pub const COLUMN_UPDATED_AT: &str = "updated_at";
pub const COLUMN_DELETED_AT: &str = "deleted_at";
/// Synthetic field standing in for the embedded base model
pub const EMBEDDED_MARKER: &str = "__mysqlModel__";

/// Columns handled by the embedded base model rather than per table
pub const RESERVED_COLUMNS: &[&str] = &[
    COLUMN_ID,
    COLUMN_CREATED_AT,
    COLUMN_UPDATED_AT,
    COLUMN_DELETED_AT,
    EMBEDDED_MARKER,
];

/// Sentinel type for SQL types with no Go counterpart
pub const UNSUPPORTED_TYPE: &str = "UnSupport";

const GO_NUMERIC_TYPES: &[&str] = &[
    "int8", "int16", "int32", "int64", "int", "uint8", "uint16", "uint32", "uint64", "uint",
    "float64", "float32",
];

/// Whether `column_name` is reserved, unless it appears in `keep`
pub fn is_reserved_column(column_name: &str, keep: &[&str]) -> bool {
    if keep.contains(&column_name) {
        return false;
    }
    RESERVED_COLUMNS.contains(&column_name)
}

/// A column of a `CREATE TABLE` statement resolved for code generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSchema {
    /// Column name as written in the DDL
    pub column_name: String,
    /// Go field name
    pub field_name: String,
    /// Go type, wrapped according to the null style
    pub target_type: String,
    /// proto3 scalar type
    pub proto_type: String,
    /// SQL type as rendered from the parsed statement
    pub sql_type: String,
    /// Struct tag, e.g. `gorm:"column:name;NOT NULL" json:"name"`
    pub tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default)]
    pub is_primary_key: bool,
    #[serde(default)]
    pub is_not_null: bool,
    #[serde(default)]
    pub is_nullable: bool,
    #[serde(default)]
    pub is_unique: bool,
    #[serde(default)]
    pub is_auto_increment: bool,
}

impl ColumnSchema {
    /// Create a column with the given names and Go type; everything else empty
    pub fn new(column_name: &str, field_name: &str, target_type: &str) -> Self {
        Self {
            column_name: column_name.to_string(),
            field_name: field_name.to_string(),
            target_type: target_type.to_string(),
            proto_type: String::new(),
            sql_type: String::new(),
            tag: String::new(),
            comment: None,
            default_value: None,
            is_primary_key: false,
            is_not_null: false,
            is_nullable: false,
            is_unique: false,
            is_auto_increment: false,
        }
    }

    /// Go expression suffix testing that the field is not its zero value
    ///
    /// ```rust
    /// use sql2code::models::ColumnSchema;
    ///
    /// assert_eq!(ColumnSchema::new("age", "Age", "int").zero_condition(), "!= 0");
    /// assert_eq!(ColumnSchema::new("name", "Name", "string").zero_condition(), "!= \"\"");
    /// ```
    pub fn zero_condition(&self) -> String {
        match self.target_type.as_str() {
            t if GO_NUMERIC_TYPES.contains(&t) => "!= 0".to_string(),
            "string" => "!= \"\"".to_string(),
            "time.Time" => ".IsZero() == false".to_string(),
            other => format!("!= {}", other),
        }
    }

    /// Zero value assignment used in the JSON skeleton, before the `=` to `:` fixup
    pub fn zero_literal(&self) -> String {
        match self.target_type.as_str() {
            t if GO_NUMERIC_TYPES.contains(&t) => "= 0".to_string(),
            "string" => "= \"string\"".to_string(),
            "time.Time" => "= \"0000-01-00T00:00:00.000+08:00\"".to_string(),
            other => format!("= {}", other),
        }
    }

    pub fn is_reserved(&self) -> bool {
        is_reserved_column(&self.column_name, &[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_condition_by_type() {
        assert_eq!(ColumnSchema::new("a", "A", "uint64").zero_condition(), "!= 0");
        assert_eq!(ColumnSchema::new("a", "A", "float64").zero_condition(), "!= 0");
        assert_eq!(ColumnSchema::new("a", "A", "string").zero_condition(), "!= \"\"");
        assert_eq!(
            ColumnSchema::new("a", "A", "time.Time").zero_condition(),
            ".IsZero() == false"
        );
        assert_eq!(
            ColumnSchema::new("a", "A", "sql.NullString").zero_condition(),
            "!= sql.NullString"
        );
    }

    #[test]
    fn test_zero_literal_by_type() {
        assert_eq!(ColumnSchema::new("a", "A", "int").zero_literal(), "= 0");
        assert_eq!(ColumnSchema::new("a", "A", "string").zero_literal(), "= \"string\"");
        assert_eq!(
            ColumnSchema::new("a", "A", "time.Time").zero_literal(),
            "= \"0000-01-00T00:00:00.000+08:00\""
        );
    }

    #[test]
    fn test_reserved_columns() {
        assert!(is_reserved_column("id", &[]));
        assert!(is_reserved_column("deleted_at", &[]));
        assert!(!is_reserved_column("id", &[COLUMN_ID]));
        assert!(!is_reserved_column("name", &[]));
        assert!(ColumnSchema::new(EMBEDDED_MARKER, EMBEDDED_MARKER, "").is_reserved());
    }
}
