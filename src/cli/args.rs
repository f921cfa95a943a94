//! Command line arguments and their mapping onto [`GenOptions`]

use super::error::CliError;
use crate::config::GenOptions;
use crate::models::{CodeType, JsonNaming, NullStyle};
use clap::Parser;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Artifact selection of one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    One(CodeType),
    /// Every artifact as one JSON object
    All,
}

impl std::str::FromStr for Selection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(Selection::All);
        }
        s.parse::<CodeType>()
            .map(Selection::One)
            .map_err(|e| e.to_string())
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "sql2code",
    version,
    about = "Generate Go models, handler structs, JSON and proto3 files from CREATE TABLE statements"
)]
pub struct Cli {
    /// DDL text
    #[arg(long, conflicts_with = "file")]
    pub sql: Option<String>,

    /// File with the DDL, `-` for stdin
    #[arg(short, long)]
    pub file: Option<String>,

    /// TOML file with generation options; flags override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Artifact to print: model, json, dao, handler, proto, __table_name__ or all
    #[arg(short = 't', long, default_value = "model")]
    pub code_type: Selection,

    /// Write the result to a file instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    #[arg(long)]
    pub package: Option<String>,

    /// Add a json tag to the model fields
    #[arg(long)]
    pub json_tag: bool,

    /// Naming of the json tag: snake or camel
    #[arg(long)]
    pub json_named_type: Option<JsonNaming>,

    /// Add the column type to the gorm tag
    #[arg(long)]
    pub gorm_type: bool,

    /// Embed mysql.Model instead of the id and timestamp columns
    #[arg(long)]
    pub embed: bool,

    #[arg(long)]
    pub charset: Option<String>,

    #[arg(long)]
    pub collation: Option<String>,

    /// SQL dialect of the input
    #[arg(long)]
    pub dialect: Option<String>,

    #[arg(long)]
    pub table_prefix: Option<String>,

    #[arg(long)]
    pub column_prefix: Option<String>,

    /// Always emit a TableName() method
    #[arg(long)]
    pub force_table_name: bool,

    /// Null handling: disabled, sql or ptr
    #[arg(long)]
    pub null_style: Option<NullStyle>,

    /// Comma separated words kept uppercase in identifiers
    #[arg(long, value_delimiter = ',')]
    pub acronyms: Option<Vec<String>>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Load DDL from a file or stdin
fn load_input(input: &str) -> Result<String, CliError> {
    if input == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .map_err(|e| CliError::InvalidArgument(format!("Failed to read stdin: {}", e)))?;
        Ok(content)
    } else {
        let path = PathBuf::from(input);
        std::fs::read_to_string(&path).map_err(|e| CliError::FileReadError(path, e.to_string()))
    }
}

impl Cli {
    /// Resolve the generation options: config file first, then flags
    pub fn options(&self) -> Result<GenOptions, CliError> {
        let mut options = match &self.config {
            Some(path) => GenOptions::from_toml_file(path)?,
            None => GenOptions::default(),
        };

        if let Some(sql) = &self.sql {
            options.sql = sql.clone();
        } else if let Some(file) = &self.file {
            options.sql = load_input(file)?;
        }

        if let Some(package) = &self.package {
            options.package = package.clone();
        }
        if let Some(naming) = self.json_named_type {
            options.json_named_type = naming;
            options.json_tag = true;
        }
        options.json_tag |= self.json_tag;
        options.gorm_type |= self.gorm_type;
        options.embed |= self.embed;
        options.force_table_name |= self.force_table_name;

        if let Some(charset) = &self.charset {
            options.charset = Some(charset.clone());
        }
        if let Some(collation) = &self.collation {
            options.collation = Some(collation.clone());
        }
        if let Some(dialect) = &self.dialect {
            options.dialect = dialect.clone();
        }
        if let Some(prefix) = &self.table_prefix {
            options.table_prefix = prefix.clone();
        }
        if let Some(prefix) = &self.column_prefix {
            options.column_prefix = prefix.clone();
        }
        if let Some(style) = self.null_style {
            options.null_style = style;
        }
        if let Some(acronyms) = &self.acronyms {
            options.acronyms = acronyms
                .iter()
                .map(|a| a.trim().to_string())
                .filter(|a| !a.is_empty())
                .collect();
        }

        Ok(options)
    }

    pub fn out_path(&self) -> Option<&Path> {
        self.out.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("sql2code").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_selection() {
        assert_eq!("all".parse::<Selection>().unwrap(), Selection::All);
        assert_eq!(
            "proto".parse::<Selection>().unwrap(),
            Selection::One(CodeType::Proto)
        );
        assert!("yaml".parse::<Selection>().is_err());
    }

    #[test]
    fn test_flags_map_to_options() {
        let cli = parse(&[
            "--sql",
            "CREATE TABLE t (id INT)",
            "--package",
            "types",
            "--embed",
            "--null-style",
            "ptr",
            "--json-named-type",
            "camel",
            "--acronyms",
            "ID,URL",
        ]);
        let options = cli.options().unwrap();
        assert_eq!(options.sql, "CREATE TABLE t (id INT)");
        assert_eq!(options.package, "types");
        assert!(options.embed);
        assert!(options.json_tag);
        assert_eq!(options.json_named_type, JsonNaming::Camel);
        assert_eq!(options.null_style, NullStyle::Pointer);
        assert_eq!(options.acronyms, vec!["ID", "URL"]);
        assert_eq!(cli.code_type, Selection::One(CodeType::Model));
    }

    #[test]
    fn test_invalid_null_style_rejected() {
        let result = Cli::try_parse_from(["sql2code", "--sql", "x", "--null-style", "maybe"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file() {
        let cli = parse(&["--file", "/nonexistent/schema.sql"]);
        assert!(matches!(cli.options(), Err(CliError::FileReadError(_, _))));
    }
}
