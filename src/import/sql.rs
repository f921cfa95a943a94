//! SQL import functionality
//!
//! Parses `CREATE TABLE` statements with `sqlparser` and extracts the parts the
//! schema builder needs: table name and comment, the primary key, and each
//! column's type and options.

use crate::error::{CodegenError, CodegenResult};
use serde::{Deserialize, Serialize};
use sqlparser::ast::{
    ColumnDef, ColumnOption, CommentDef, CreateTable, CreateTableOptions, Expr, IndexColumn,
    SqlOption, Statement, TableConstraint,
};
use sqlparser::dialect::{Dialect, MySqlDialect, dialect_from_str};
use sqlparser::parser::Parser;
use tracing::debug;

/// Maximum length of the DDL fragment carried by a parse error
pub const ERROR_FRAGMENT_LEN: usize = 80;

/// Parser settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Dialect name understood by `sqlparser` (`mysql`, `generic`, `postgres`, ...)
    pub dialect: String,
    pub charset: Option<String>,
    pub collation: Option<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            dialect: "mysql".to_string(),
            charset: None,
            collation: None,
        }
    }
}

/// A column as declared in the DDL, before type mapping
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedColumn {
    pub name: String,
    /// SQL type as rendered by the parser, e.g. `VARCHAR(32)`
    pub sql_type: String,
    pub comment: Option<String>,
    pub default_value: Option<String>,
    pub primary_key: bool,
    pub not_null: bool,
    pub nullable: bool,
    pub unique: bool,
    pub auto_increment: bool,
}

/// A `CREATE TABLE` statement reduced to what code generation needs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedTable {
    pub name: String,
    pub comment: Option<String>,
    pub columns: Vec<ParsedColumn>,
}

impl ParsedTable {
    pub fn primary_key(&self) -> Option<&ParsedColumn> {
        self.columns.iter().find(|c| c.primary_key)
    }
}

/// SQL parser for `CREATE TABLE` statements
pub struct SqlParser {
    config: ParserConfig,
}

impl Default for SqlParser {
    fn default() -> Self {
        Self::new(ParserConfig::default())
    }
}

impl SqlParser {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    fn dialect(&self) -> Box<dyn Dialect> {
        match self.config.dialect.trim() {
            "" => Box::new(MySqlDialect {}),
            name => dialect_from_str(name).unwrap_or_else(|| {
                debug!("[SqlParser] Unknown dialect '{}', using mysql", name);
                Box::new(MySqlDialect {})
            }),
        }
    }

    /// Parse DDL text and keep only the `CREATE TABLE` statements
    ///
    /// # Errors
    ///
    /// Returns [`CodegenError::Parse`] when the text is not valid SQL for the
    /// configured dialect.
    pub fn parse(&self, ddl: &str) -> CodegenResult<Vec<CreateTable>> {
        if self.config.charset.is_some() || self.config.collation.is_some() {
            debug!(
                "[SqlParser] charset={:?} collation={:?}",
                self.config.charset, self.config.collation
            );
        }

        let dialect = self.dialect();
        let statements =
            Parser::parse_sql(dialect.as_ref(), ddl).map_err(|e| CodegenError::Parse {
                fragment: error_fragment(ddl),
                message: e.to_string(),
            })?;

        let mut tables = Vec::new();
        for (idx, statement) in statements.into_iter().enumerate() {
            match statement {
                Statement::CreateTable(create) => tables.push(create),
                other => {
                    let text = other.to_string();
                    debug!(
                        "[SqlParser] Skipping statement {}: {}",
                        idx,
                        error_fragment(&text)
                    );
                }
            }
        }

        debug!("[SqlParser] Parsed {} CREATE TABLE statement(s)", tables.len());
        Ok(tables)
    }

    /// Parse DDL text and extract every table
    pub fn parse_tables(&self, ddl: &str) -> CodegenResult<Vec<ParsedTable>> {
        Ok(self.parse(ddl)?.iter().map(extract_table).collect())
    }
}

/// Reduce a parsed `CREATE TABLE` to a [`ParsedTable`]
pub fn extract_table(create: &CreateTable) -> ParsedTable {
    let mut columns: Vec<ParsedColumn> = create.columns.iter().map(extract_column).collect();

    // A table-level PRIMARY KEY wins over column-level options; only its
    // first key column is marked.
    let mut constraint_pk = None;
    for constraint in &create.constraints {
        match constraint {
            TableConstraint::PrimaryKey(pk) if constraint_pk.is_none() => {
                constraint_pk = pk.columns.first().and_then(index_column_name);
            }
            TableConstraint::Unique(unique) if unique.columns.len() == 1 => {
                let name = unique.columns.first().and_then(index_column_name);
                if let Some(column) = name.and_then(|n| find_column(&mut columns, &n)) {
                    column.unique = true;
                }
            }
            _ => {}
        }
    }

    let pk_index = match constraint_pk {
        Some(pk) => columns.iter().position(|c| c.name.eq_ignore_ascii_case(&pk)),
        None => columns.iter().position(|c| c.primary_key),
    };
    for (idx, column) in columns.iter_mut().enumerate() {
        column.primary_key = Some(idx) == pk_index;
    }

    ParsedTable {
        name: table_name(&create.name.to_string()),
        comment: table_comment(create),
        columns,
    }
}

fn find_column<'a>(columns: &'a mut [ParsedColumn], name: &str) -> Option<&'a mut ParsedColumn> {
    columns.iter_mut().find(|c| c.name.eq_ignore_ascii_case(name))
}

/// Column named by a key part; prefix lengths such as `name(10)` are not keys
fn index_column_name(column: &IndexColumn) -> Option<String> {
    match &column.column.expr {
        Expr::Identifier(ident) => Some(ident.value.clone()),
        Expr::CompoundIdentifier(parts) => parts.last().map(|p| p.value.clone()),
        _ => None,
    }
}

fn extract_column(def: &ColumnDef) -> ParsedColumn {
    let mut column = ParsedColumn {
        name: def.name.value.clone(),
        sql_type: def.data_type.to_string(),
        ..Default::default()
    };

    for opt in &def.options {
        match &opt.option {
            ColumnOption::NotNull => column.not_null = true,
            ColumnOption::Null => column.nullable = true,
            ColumnOption::Comment(comment) => column.comment = Some(comment.clone()),
            ColumnOption::Default(expr) => column.default_value = default_value(expr),
            ColumnOption::PrimaryKey(_) => column.primary_key = true,
            ColumnOption::Unique(_) => column.unique = true,
            ColumnOption::DialectSpecific(tokens) => {
                let text = tokens
                    .iter()
                    .map(|t| t.to_string().to_ascii_uppercase())
                    .collect::<Vec<_>>();
                if text.iter().any(|t| t == "AUTO_INCREMENT" || t == "AUTOINCREMENT") {
                    column.auto_increment = true;
                }
            }
            _ => {}
        }
    }

    column
}

/// Default value as it appears in a gorm tag
///
/// Function calls yield their name only, `NULL` and empty literals yield
/// nothing, string literals yield their unescaped text.
fn default_value(expr: &Expr) -> Option<String> {
    let value = match expr {
        Expr::Function(f) => f.name.to_string(),
        Expr::Nested(inner) => return default_value(inner),
        Expr::Value(v) => v.clone().into_string().unwrap_or_else(|| v.to_string()),
        other => other.to_string(),
    };
    if value.is_empty() || value.eq_ignore_ascii_case("NULL") {
        None
    } else {
        Some(value)
    }
}

/// Remove identifier quoting (`` ` ``, `"`, `[]`)
pub fn unquote_identifier(ident: &str) -> String {
    let ident = ident.trim();
    let inner = ident
        .strip_prefix('`')
        .and_then(|t| t.strip_suffix('`'))
        .or_else(|| ident.strip_prefix('"').and_then(|t| t.strip_suffix('"')))
        .or_else(|| ident.strip_prefix('[').and_then(|t| t.strip_suffix(']')));
    inner.unwrap_or(ident).to_string()
}

/// Last segment of a possibly schema-qualified table name, unquoted
pub fn table_name(qualified: &str) -> String {
    let last = qualified.rsplit('.').next().unwrap_or(qualified);
    unquote_identifier(last)
}

/// Table comment from the table options, or the dialect's dedicated slot
fn table_comment(create: &CreateTable) -> Option<String> {
    let options = match &create.table_options {
        CreateTableOptions::Plain(options)
        | CreateTableOptions::With(options)
        | CreateTableOptions::Options(options)
        | CreateTableOptions::TableProperties(options) => options.as_slice(),
        CreateTableOptions::None => &[],
    };
    options
        .iter()
        .find_map(|option| match option {
            SqlOption::Comment(comment) => Some(comment_text(comment)),
            _ => None,
        })
        .or_else(|| create.comment.as_ref().map(comment_text))
        .filter(|c| !c.is_empty())
}

fn comment_text(comment: &CommentDef) -> String {
    match comment {
        CommentDef::WithEq(text) | CommentDef::WithoutEq(text) => text.clone(),
    }
}

fn error_fragment(ddl: &str) -> String {
    ddl.trim().chars().take(ERROR_FRAGMENT_LEN).collect()
}
