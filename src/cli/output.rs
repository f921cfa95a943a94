//! Output formatting for CLI

use super::args::Selection;
use super::error::CliError;
use crate::engine::GeneratedCodes;
use std::path::Path;

/// Render the selected artifact; `all` is a pretty JSON object keyed by code type
pub fn format_output(codes: GeneratedCodes, selection: Selection) -> Result<String, CliError> {
    match selection {
        Selection::One(code_type) => Ok(codes.take(code_type)?),
        Selection::All => serde_json::to_string_pretty(&codes)
            .map(|mut json| {
                json.push('\n');
                json
            })
            .map_err(|e| CliError::OutputError(e.to_string())),
    }
}

/// Write to `path`, or stdout when absent
pub fn write_output(text: &str, path: Option<&Path>) -> Result<(), CliError> {
    match path {
        Some(path) => std::fs::write(path, text)
            .map_err(|e| CliError::FileWriteError(path.to_path_buf(), e.to_string())),
        None => {
            print!("{}", text);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GenOptions;
    use crate::models::CodeType;

    fn codes() -> GeneratedCodes {
        crate::generate(&GenOptions::new("CREATE TABLE users (id INT, name TEXT)")).unwrap()
    }

    #[test]
    fn test_single_artifact() {
        let text = format_output(codes(), Selection::One(CodeType::TableName)).unwrap();
        assert_eq!(text, "User");
    }

    #[test]
    fn test_all_as_json() {
        let text = format_output(codes(), Selection::All).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["__table_name__"], "User");
        assert!(value["model"].as_str().unwrap().contains("type User struct"));
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.go");
        write_output("package model\n", Some(&path)).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "package model\n");
    }
}
