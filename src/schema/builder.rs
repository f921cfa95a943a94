//! Schema builder
//!
//! Resolves parsed tables into [`TableSchema`] values: Go names, mapped types
//! and gorm/json struct tags.

use crate::config::GenOptions;
use crate::import::{ParsedColumn, ParsedTable};
use crate::mapping::{IMPORT_TIME, collect_imports, map_sql_type};
use crate::models::{ColumnSchema, JsonNaming, TableSchema, UNSUPPORTED_TYPE};
use crate::naming::{
    Acronyms, needs_table_name_mapping, singularize, strip_prefix, to_camel, to_lower_camel,
};
use tracing::{debug, warn};

/// Import path of the package providing the embedded base model
pub const IMPORT_MYSQL_MODEL: &str = "github.com/zhufuyi/pkg/mysql";

/// Builds [`TableSchema`] values from parsed tables
pub struct SchemaBuilder<'a> {
    options: &'a GenOptions,
    acronyms: Acronyms,
}

impl<'a> SchemaBuilder<'a> {
    pub fn new(options: &'a GenOptions) -> Self {
        Self {
            options,
            acronyms: options.acronym_table(),
        }
    }

    pub fn build(&self, table: &ParsedTable) -> TableSchema {
        let raw = table.name.as_str();
        let (stripped, prefix_stripped) = strip_prefix(raw, &self.options.table_prefix);
        let normalized = to_camel(&singularize(stripped), &self.acronyms);

        let columns: Vec<ColumnSchema> = table
            .columns
            .iter()
            .map(|c| self.build_column(raw, c))
            .collect();

        let mut schema = TableSchema::new(raw, &normalized, columns);
        schema.needs_table_name_mapping =
            needs_table_name_mapping(raw, prefix_stripped, self.options.force_table_name);
        schema.comment = table.comment.clone();
        schema.imports = collect_imports(
            table
                .columns
                .iter()
                .filter_map(|c| map_sql_type(&c.sql_type, self.options.null_style).import),
        );

        debug!(
            "[SchemaBuilder] Table '{}' -> {} ({} columns, mapping: {})",
            raw,
            schema.normalized_name,
            schema.columns.len(),
            schema.needs_table_name_mapping
        );
        schema
    }

    fn build_column(&self, table: &str, column: &ParsedColumn) -> ColumnSchema {
        let (field, _) = strip_prefix(&column.name, &self.options.column_prefix);
        let mapped = map_sql_type(&column.sql_type, self.options.null_style);
        if mapped.go_type == UNSUPPORTED_TYPE {
            warn!(
                "[SchemaBuilder] Unsupported type '{}' for column {}.{}",
                column.sql_type, table, column.name
            );
        }

        let mut schema = ColumnSchema::new(
            &column.name,
            &to_camel(field, &self.acronyms),
            &mapped.go_type,
        );
        schema.proto_type = mapped.proto_type.to_string();
        schema.sql_type = column.sql_type.clone();
        schema.comment = column.comment.clone().filter(|c| !c.is_empty());
        schema.default_value = column.default_value.clone();
        schema.is_primary_key = column.primary_key;
        schema.is_not_null = column.not_null;
        schema.is_nullable = column.nullable;
        schema.is_unique = column.unique;
        schema.is_auto_increment = column.auto_increment;
        schema.tag = self.build_tag(&schema);
        schema
    }

    fn build_tag(&self, column: &ColumnSchema) -> String {
        let mut gorm = format!("column:{}", column.column_name);
        if self.options.gorm_type {
            gorm.push_str(";type:");
            gorm.push_str(&tag_value(&column.sql_type));
        }
        if column.is_primary_key {
            gorm.push_str(";primary_key");
        }
        if column.is_auto_increment {
            gorm.push_str(";AUTO_INCREMENT");
        }
        if let Some(default) = &column.default_value {
            gorm.push_str(";default:");
            gorm.push_str(&tag_value(default));
        }
        if column.is_unique {
            gorm.push_str(";unique");
        }
        if !column.is_primary_key && column.is_not_null {
            gorm.push_str(";NOT NULL");
        }

        let mut tag = format!("gorm:\"{}\"", gorm);
        if self.options.json_tag {
            let name = match self.options.json_named_type {
                JsonNaming::Snake => column.column_name.clone(),
                JsonNaming::Camel => to_lower_camel(&column.column_name),
            };
            tag.push_str(&format!(" json:\"{}\"", name));
        }
        tag
    }
}

/// Make a value safe inside a quoted key of a raw-string struct tag
///
/// Backticks cannot appear in the tag at all and are dropped; double quotes
/// are escaped.
fn tag_value(value: &str) -> String {
    value.replace('`', "").replace('"', "\\\"")
}

/// Imports of the model file for one table
///
/// With `embed`, the embedded base model import is added and `time` is
/// dropped when none of the remaining fields needs it.
pub fn model_imports(table: &TableSchema, embed: bool) -> Vec<String> {
    if !embed {
        return table.imports.clone();
    }
    let needs_time = table
        .columns
        .iter()
        .filter(|c| !c.is_reserved())
        .any(|c| c.target_type.contains("time.Time"));

    collect_imports(
        table
            .imports
            .iter()
            .map(String::as_str)
            .filter(|p| needs_time || *p != IMPORT_TIME)
            .chain(std::iter::once(IMPORT_MYSQL_MODEL)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::SqlParser;
    use crate::models::NullStyle;

    fn build(options: &GenOptions) -> Vec<TableSchema> {
        let tables = SqlParser::new(options.parser_config())
            .parse_tables(&options.sql)
            .unwrap();
        let builder = SchemaBuilder::new(options);
        tables.iter().map(|t| builder.build(t)).collect()
    }

    #[test]
    fn test_build_user_table() {
        let options = GenOptions::new(
            "CREATE TABLE user (id BIGINT UNSIGNED PRIMARY KEY AUTO_INCREMENT, \
             name CHAR(50) NOT NULL, email CHAR(50) NOT NULL UNIQUE, user_id INT)",
        )
        .with_json_tag(JsonNaming::Snake);
        let tables = build(&options);
        let table = &tables[0];

        assert_eq!(table.normalized_name, "User");
        assert!(!table.needs_table_name_mapping);

        let id = table.column("id").unwrap();
        assert_eq!(id.field_name, "ID");
        assert_eq!(id.target_type, "uint64");
        assert_eq!(id.tag, "gorm:\"column:id;primary_key;AUTO_INCREMENT\" json:\"id\"");

        let email = table.column("email").unwrap();
        assert_eq!(email.tag, "gorm:\"column:email;unique;NOT NULL\" json:\"email\"");

        assert_eq!(table.column("user_id").unwrap().field_name, "UserID");
    }

    #[test]
    fn test_camel_json_and_gorm_type() {
        let options = GenOptions::new("CREATE TABLE t (user_name VARCHAR(20))")
            .with_json_tag(JsonNaming::Camel)
            .with_gorm_type();
        let tables = build(&options);
        let tag = &tables[0].columns[0].tag;
        assert!(tag.contains(";type:VARCHAR(20)"), "{}", tag);
        assert!(tag.ends_with("json:\"userName\""), "{}", tag);
    }

    #[test]
    fn test_prefixes() {
        let options = GenOptions::new("CREATE TABLE t_order (o_total INT)")
            .with_table_prefix("t_")
            .with_column_prefix("o_");
        let table = &build(&options)[0];
        assert_eq!(table.normalized_name, "Order");
        assert!(table.needs_table_name_mapping);
        assert_eq!(table.columns[0].field_name, "Total");
        assert_eq!(table.columns[0].column_name, "o_total");
    }

    #[test]
    fn test_imports_and_unsupported() {
        let options = GenOptions::new(
            "CREATE TABLE place (created_at DATETIME, born DATE, shape GEOMETRY)",
        )
        .with_null_style(NullStyle::Sql);
        let table = &build(&options)[0];
        assert_eq!(table.imports, vec!["database/sql".to_string()]);
        assert_eq!(table.column("shape").unwrap().target_type, UNSUPPORTED_TYPE);
    }

    #[test]
    fn test_model_imports_with_embed() {
        let options = GenOptions::new("CREATE TABLE a (id INT, created_at DATETIME, name TEXT)");
        let table = &build(&options)[0];
        assert_eq!(table.imports, vec!["time".to_string()]);
        assert_eq!(model_imports(table, false), vec!["time".to_string()]);
        assert_eq!(model_imports(table, true), vec![IMPORT_MYSQL_MODEL.to_string()]);

        let options = GenOptions::new("CREATE TABLE b (id INT, born DATE)");
        let table = &build(&options)[0];
        assert_eq!(
            model_imports(table, true),
            vec![IMPORT_MYSQL_MODEL.to_string(), "time".to_string()]
        );
    }

    #[test]
    fn test_tag_value_escaping() {
        assert_eq!(tag_value("a`b"), "ab");
        assert_eq!(tag_value("say \"hi\""), "say \\\"hi\\\"");
        assert_eq!(tag_value("plain"), "plain");
    }
}
