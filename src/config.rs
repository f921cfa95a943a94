//! Generator options
//!
//! [`GenOptions`] is the option bag every entry point takes. It can be built
//! in code with the `with_*` methods or loaded from a TOML file:
//!
//! ```toml
//! sql = "CREATE TABLE user (id BIGINT UNSIGNED PRIMARY KEY, name CHAR(50))"
//! package = "model"
//! json_tag = true
//! json_named_type = "camel"
//! null_style = "ptr"
//! ```

use crate::error::{CodegenError, CodegenResult};
use crate::import::ParserConfig;
use crate::models::{JsonNaming, NullStyle};
use crate::naming::{Acronyms, DEFAULT_ACRONYMS};
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_package() -> String {
    "model".to_string()
}

fn default_dialect() -> String {
    "mysql".to_string()
}

fn default_acronyms() -> Vec<String> {
    DEFAULT_ACRONYMS.iter().map(|a| a.to_string()).collect()
}

/// Options controlling parsing and code generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenOptions {
    /// DDL text containing one or more `CREATE TABLE` statements
    pub sql: String,
    /// Go package of the model file
    pub package: String,
    /// Add a `json` struct tag next to the gorm tag
    pub json_tag: bool,
    pub json_named_type: JsonNaming,
    /// Add `;type:<sql type>` to the gorm tag
    pub gorm_type: bool,
    /// Replace the reserved columns with an embedded `mysql.Model`
    pub embed: bool,
    pub charset: Option<String>,
    pub collation: Option<String>,
    pub dialect: String,
    pub table_prefix: String,
    pub column_prefix: String,
    /// Always emit a `TableName()` accessor
    pub force_table_name: bool,
    pub null_style: NullStyle,
    /// Identifier segments rendered fully uppercase
    pub acronyms: Vec<String>,
}

impl Default for GenOptions {
    fn default() -> Self {
        Self {
            sql: String::new(),
            package: default_package(),
            json_tag: false,
            json_named_type: JsonNaming::default(),
            gorm_type: false,
            embed: false,
            charset: None,
            collation: None,
            dialect: default_dialect(),
            table_prefix: String::new(),
            column_prefix: String::new(),
            force_table_name: false,
            null_style: NullStyle::default(),
            acronyms: default_acronyms(),
        }
    }
}

impl GenOptions {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            ..Default::default()
        }
    }

    /// Parse options from TOML text
    pub fn from_toml_str(text: &str) -> CodegenResult<Self> {
        toml::from_str(text).map_err(|e| CodegenError::Config(e.to_string()))
    }

    /// Load options from a TOML file
    ///
    /// A relative `sql_file` key, when present, is resolved against the
    /// config file's directory and its content becomes `sql` if `sql` is empty.
    pub fn from_toml_file(path: impl AsRef<Path>) -> CodegenResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| CodegenError::Config(format!("{}: {}", path.display(), e)))?;

        let table: toml::Table =
            toml::from_str(&text).map_err(|e| CodegenError::Config(e.to_string()))?;
        let mut options = Self::from_toml_str(&text)?;

        let sql_file = table.get("sql_file").and_then(|v| v.as_str());
        if let (true, Some(sql_file)) = (options.sql.trim().is_empty(), sql_file) {
            let sql_path = match path.parent() {
                Some(dir) => dir.join(sql_file),
                None => Path::new(sql_file).to_path_buf(),
            };
            options.sql = std::fs::read_to_string(&sql_path)
                .map_err(|e| CodegenError::Config(format!("{}: {}", sql_path.display(), e)))?;
        }

        Ok(options)
    }

    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = package.into();
        self
    }

    pub fn with_json_tag(mut self, naming: JsonNaming) -> Self {
        self.json_tag = true;
        self.json_named_type = naming;
        self
    }

    pub fn with_gorm_type(mut self) -> Self {
        self.gorm_type = true;
        self
    }

    pub fn with_embed(mut self) -> Self {
        self.embed = true;
        self
    }

    pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = Some(charset.into());
        self
    }

    pub fn with_collation(mut self, collation: impl Into<String>) -> Self {
        self.collation = Some(collation.into());
        self
    }

    pub fn with_dialect(mut self, dialect: impl Into<String>) -> Self {
        self.dialect = dialect.into();
        self
    }

    pub fn with_table_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.table_prefix = prefix.into();
        self
    }

    pub fn with_column_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.column_prefix = prefix.into();
        self
    }

    pub fn with_force_table_name(mut self) -> Self {
        self.force_table_name = true;
        self
    }

    pub fn with_null_style(mut self, style: NullStyle) -> Self {
        self.null_style = style;
        self
    }

    pub fn with_acronyms<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.acronyms = words.into_iter().map(Into::into).collect();
        self
    }

    /// Check the options before generation
    ///
    /// # Errors
    ///
    /// [`CodegenError::MissingSql`] when no DDL text was supplied.
    pub fn validate(&self) -> CodegenResult<()> {
        if self.sql.trim().is_empty() {
            return Err(CodegenError::MissingSql);
        }
        Ok(())
    }

    pub fn acronym_table(&self) -> Acronyms {
        Acronyms::new(&self.acronyms)
    }

    pub fn parser_config(&self) -> ParserConfig {
        ParserConfig {
            dialect: self.dialect.clone(),
            charset: self.charset.clone(),
            collation: self.collation.clone(),
        }
    }

    /// Package name used in the model file, `model` when blank
    pub fn package_name(&self) -> &str {
        match self.package.trim() {
            "" => "model",
            name => name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = GenOptions::default();
        assert_eq!(options.package, "model");
        assert_eq!(options.dialect, "mysql");
        assert_eq!(options.null_style, NullStyle::Disabled);
        assert_eq!(options.acronyms, vec!["ID", "IP", "RPC"]);
        assert!(!options.json_tag);
    }

    #[test]
    fn test_validate_missing_sql() {
        assert!(matches!(
            GenOptions::new("   ").validate(),
            Err(CodegenError::MissingSql)
        ));
        assert!(GenOptions::new("CREATE TABLE t (id INT)").validate().is_ok());
    }

    #[test]
    fn test_from_toml_str() {
        let options = GenOptions::from_toml_str(
            r#"
            sql = "CREATE TABLE t (id INT)"
            package = "entity"
            json_tag = true
            json_named_type = "camel"
            null_style = "ptr"
            acronyms = ["ID", "URL"]
            "#,
        )
        .unwrap();
        assert_eq!(options.package, "entity");
        assert_eq!(options.json_named_type, JsonNaming::Camel);
        assert_eq!(options.null_style, NullStyle::Pointer);
        assert!(options.acronym_table().contains("url"));
        assert!(!options.embed);
    }

    #[test]
    fn test_from_toml_str_rejects_bad_null_style() {
        let result = GenOptions::from_toml_str(r#"null_style = "maybe""#);
        assert!(matches!(result, Err(CodegenError::Config(_))));
    }

    #[test]
    fn test_builder() {
        let options = GenOptions::new("x")
            .with_package("")
            .with_json_tag(JsonNaming::Camel)
            .with_embed()
            .with_table_prefix("t_");
        assert_eq!(options.package_name(), "model");
        assert!(options.json_tag);
        assert!(options.embed);
        assert_eq!(options.table_prefix, "t_");
    }
}
